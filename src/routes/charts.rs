use axum::{
    extract::{Multipart, State},
    http::Method,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::{
    error::AppError,
    models::{Aggregation, ChartType, Selection},
    services::{csv_loader, series_builder},
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(3600));

    Router::new()
        .route("/upload", post(upload_csv))
        .route("/process", post(process_data))
        .layer(cors)
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    message: String,
    headers: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProcessRequest {
    x_column: Option<String>,
    y_column: Option<String>,
    #[serde(default)]
    chart_type: ChartType,
    aggregation_type: Option<Aggregation>,
}

#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    labels: Vec<String>,
    values: Vec<f64>,
    x_column_processed: String,
    y_column_processed: String,
}

#[axum::debug_handler]
async fn upload_csv(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let start = std::time::Instant::now();

    let mut file = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Malformed multipart request: {}", e)))?
    {
        if field.name() == Some("file") {
            let file_name = field.file_name().unwrap_or("").to_string();
            let data = field.bytes().await.map_err(|e| {
                AppError::TransportUnavailable(format!("Failed to read uploaded file: {}", e))
            })?;
            file = Some((file_name, data));
            break;
        }
    }

    let (file_name, data) =
        file.ok_or_else(|| AppError::InvalidInput("No file part in the request.".to_string()))?;

    if file_name.is_empty() {
        return Err(AppError::InvalidInput("No file selected.".to_string()));
    }
    if !file_name.to_lowercase().ends_with(".csv") {
        return Err(AppError::InvalidInput(
            "Invalid file type. Please upload a .csv file.".to_string(),
        ));
    }
    if data.len() > state.config.max_file_size {
        return Err(AppError::InvalidInput(format!(
            "File exceeds the {} byte upload limit.",
            state.config.max_file_size
        )));
    }

    tracing::info!(
        "Received file '{}', size: {}KB",
        file_name,
        data.len() / 1024
    );

    let dataset = csv_loader::parse_csv(&data)?;
    if dataset.rows.is_empty() {
        return Err(AppError::InvalidInput(
            "CSV file is empty or contains only headers.".to_string(),
        ));
    }

    tracing::info!(
        "Parsed {} rows x {} columns in {:?}",
        dataset.row_count(),
        dataset.headers.len(),
        start.elapsed()
    );

    let headers = dataset.headers.clone();
    // Replaces whatever dataset a previous upload left behind.
    *state.dataset.write() = Some(dataset);

    Ok(Json(UploadResponse {
        message: "File uploaded successfully. Headers are available.".to_string(),
        headers,
    }))
}

#[axum::debug_handler]
async fn process_data(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ProcessRequest>,
) -> Result<Json<ProcessResponse>, AppError> {
    let start = std::time::Instant::now();

    let selection = Selection {
        chart_type: request.chart_type,
        x_column: normalize_column(request.x_column),
        y_column: normalize_column(request.y_column),
        aggregation: request.aggregation_type,
    };

    let series = {
        let guard = state.dataset.read();
        let dataset = guard.as_ref().ok_or(AppError::NoDatasetLoaded)?;
        series_builder::build_series(&selection, dataset)?
    };

    tracing::info!(
        "Built {:?} series with {} groups in {:?}",
        selection.chart_type,
        series.labels.len(),
        start.elapsed()
    );

    Ok(Json(ProcessResponse {
        labels: series.labels,
        values: series.values,
        x_column_processed: series.x_display_name,
        y_column_processed: series.y_display_name,
    }))
}

// The frontend sends unset selectors as empty strings or null.
fn normalize_column(raw: Option<String>) -> Option<String> {
    raw.filter(|name| !name.is_empty())
}
