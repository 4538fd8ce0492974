use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use finpulse_core::domain::financials::FinancialData;
use finpulse_core::domain::news::StockNewsResponse;
use finpulse_core::ingest::provider::MarketDataProvider;
use finpulse_core::ingest::yahoo::YahooFinanceClient;
use finpulse_core::report::{build_financial_report, is_valid_ticker, normalize_ticker};

mod error;

use error::ApiError;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = finpulse_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let provider = YahooFinanceClient::from_settings(&settings)?;
    let state = AppState {
        provider: Arc::new(provider),
    };

    let app = router(state);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, "api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/finance/:ticker", get(get_financial_results))
        .route("/news/:ticker", get(get_stock_news))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Clone)]
struct AppState {
    provider: Arc<dyn MarketDataProvider>,
}

#[derive(Debug, Deserialize)]
struct NewsParams {
    limit: Option<usize>,
}

async fn get_financial_results(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
) -> Result<Json<FinancialData>, ApiError> {
    let ticker_upper = normalize_ticker(&ticker);

    build_financial_report(state.provider.as_ref(), &ticker_upper)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_report_error(&ticker, &ticker_upper, e))
}

async fn get_stock_news(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
    params: Result<Query<NewsParams>, QueryRejection>,
) -> Result<Json<StockNewsResponse>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::Unprocessable(e.body_text()))?;
    let ticker_upper = normalize_ticker(&ticker);
    if !is_valid_ticker(&ticker_upper) {
        return Err(ApiError::Unprocessable(format!(
            "'{ticker}' is not a valid ticker symbol."
        )));
    }
    let limit = finpulse_core::news::validate_limit(params.limit)
        .map_err(|e| ApiError::Unprocessable(e.to_string()))?;

    let headlines = finpulse_core::news::fetch_headlines(state.provider.as_ref(), &ticker_upper, limit)
        .await
        .map_err(ApiError::from_upstream)?;

    Ok(Json(StockNewsResponse::new(ticker_upper, headlines)))
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
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
