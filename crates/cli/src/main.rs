use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use finpulse_core::domain::news::StockNewsResponse;
use finpulse_core::ingest::yahoo::YahooFinanceClient;
use finpulse_core::report::{build_financial_report, normalize_ticker};

#[derive(Debug, Parser)]
#[command(name = "finpulse_cli")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print liquidity/solvency ratios and revenue growth for a ticker.
    Finance { ticker: String },

    /// Print the latest headlines for a ticker.
    News {
        ticker: String,

        /// Maximum number of headlines (1-10).
        #[arg(long)]
        limit: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = finpulse_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    // Logs go to stderr so stdout stays valid JSON.
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();
    let provider = YahooFinanceClient::from_settings(&settings)?;

    let out = match args.command {
        Command::Finance { ticker } => {
            let report = build_financial_report(&provider, &ticker)
                .await
                .inspect_err(|err| {
                    sentry_anyhow::capture_anyhow(err);
                })?;
            serde_json::to_string_pretty(&report)?
        }
        Command::News { ticker, limit } => {
            let limit = finpulse_core::news::validate_limit(limit)?;
            let ticker = normalize_ticker(&ticker);
            let headlines =
                finpulse_core::news::fetch_headlines(&provider, &ticker, limit).await?;
            serde_json::to_string_pretty(&StockNewsResponse::new(ticker, headlines))?
        }
    };

    println!("{out}");
    Ok(())
}

fn init_sentry(settings: &finpulse_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
