pub mod analysis;
pub mod domain;
pub mod ingest;
pub mod news;
pub mod report;

pub mod config {
    use anyhow::Context;

    const DEFAULT_QUERY_BASE_URL: &str = "https://query2.finance.yahoo.com";
    const DEFAULT_WEB_BASE_URL: &str = "https://finance.yahoo.com";
    const DEFAULT_TIMEOUT_SECS: u64 = 30;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub sentry_dsn: Option<String>,
        pub data_provider_base_url: Option<String>,
        pub data_provider_web_url: Option<String>,
        pub data_provider_timeout_secs: Option<String>,
        pub data_provider_user_agent: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Ok(Self {
                sentry_dsn: std::env::var("SENTRY_DSN").ok(),
                data_provider_base_url: std::env::var("DATA_PROVIDER_BASE_URL").ok(),
                data_provider_web_url: std::env::var("DATA_PROVIDER_WEB_URL").ok(),
                data_provider_timeout_secs: std::env::var("DATA_PROVIDER_TIMEOUT_SECS").ok(),
                data_provider_user_agent: std::env::var("DATA_PROVIDER_USER_AGENT").ok(),
            })
        }

        pub fn data_provider_base_url(&self) -> &str {
            non_blank(self.data_provider_base_url.as_deref()).unwrap_or(DEFAULT_QUERY_BASE_URL)
        }

        pub fn data_provider_web_url(&self) -> &str {
            non_blank(self.data_provider_web_url.as_deref()).unwrap_or(DEFAULT_WEB_BASE_URL)
        }

        pub fn data_provider_timeout_secs(&self) -> anyhow::Result<u64> {
            match non_blank(self.data_provider_timeout_secs.as_deref()) {
                Some(s) => s
                    .parse::<u64>()
                    .with_context(|| format!("DATA_PROVIDER_TIMEOUT_SECS is not a number: {s}")),
                None => Ok(DEFAULT_TIMEOUT_SECS),
            }
        }
    }

    fn non_blank(v: Option<&str>) -> Option<&str> {
        v.map(str::trim).filter(|s| !s.is_empty())
    }

}
