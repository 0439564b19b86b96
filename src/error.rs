use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors produced by the selection/series core. These are deterministic
/// outcomes of the user's current selection, not faults: the user adjusts
/// the selection and retries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChartError {
    #[error("x_column (for X-axis/categories) is required.")]
    MissingXColumn,

    #[error("y_column (for Y-axis/values) is required for bar/line charts unless aggregation is 'count'.")]
    MissingYColumn,

    #[error("y_column is required for 'sum' aggregation in a pie chart.")]
    MissingYColumnForPieSum,

    #[error("Selected column '{0}' not found in the uploaded data.")]
    UnknownColumn(String),

    #[error("The selected columns produced an empty chart series.")]
    EmptyResult,

    #[error("No column headers found in the uploaded CSV file.")]
    NoHeadersFound,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Chart(#[from] ChartError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No data uploaded yet. Please upload a CSV file first.")]
    NoDatasetLoaded,

    #[error("Upload transport unavailable: {0}")]
    TransportUnavailable(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Chart(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NoDatasetLoaded => StatusCode::BAD_REQUEST,
            AppError::Csv(_) => StatusCode::BAD_REQUEST,
            AppError::TransportUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}
