use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::fmt;

use finpulse_core::analysis::error::{NoDataError, UpstreamUnavailable};

/// Handler error. The message is what the caller sees in `detail`; causes are
/// logged before one of these is built and never included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    NotFound(String),
    Unprocessable(String),
    Unavailable(String),
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            ApiError::NotFound(d)
            | ApiError::Unprocessable(d)
            | ApiError::Unavailable(d)
            | ApiError::Internal(d) => d,
        }
    }

    /// Classifies a `/finance` failure. `requested` is the ticker as the
    /// caller typed it, `ticker` the normalized one.
    pub fn from_report_error(requested: &str, ticker: &str, err: anyhow::Error) -> Self {
        if let Some(no_data) = err.downcast_ref::<NoDataError>() {
            tracing::warn!(%ticker, error = %no_data, "insufficient financial data");
            return ApiError::NotFound(format!(
                "Error: Data for ticker '{requested}' is incomplete or lacks historical depth. Details: {no_data}"
            ));
        }

        sentry_anyhow::capture_anyhow(&err);
        let cause = format!("{err:#}");
        tracing::error!(%ticker, error = %cause, "unhandled error building financial report");
        ApiError::Internal(format!("Internal Server Error processing ticker: {ticker}."))
    }

    pub fn from_upstream(err: UpstreamUnavailable) -> Self {
        ApiError::Unavailable(format!(
            "Failed to retrieve data for '{}'. Check ticker or service availability.",
            err.ticker
        ))
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status(), self.detail())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = axum::Json(json!({ "detail": self.detail() }));
        (status, body).into_response()
    }
}
