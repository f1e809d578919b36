use axum::{
    extract::State, http::StatusCode, response::IntoResponse, response::Response, routing::get,
    Json, Router,
};
use serde::Serialize;
use tracing::{debug, error, info};

use crate::{ingest, ChartState, Config, Dashboard, Dataset};

// ---

pub fn router() -> Router<Config> {
    // ---
    Router::new()
        .route("/dashboard", get(full))
        .route("/dashboard/map", get(map))
        .route("/dashboard/hourly", get(hourly))
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

async fn full(State(config): State<Config>) -> Response {
    // ---
    info!("GET /dashboard - Starting render pass");
    match render(&config).await {
        Ok(dashboard) => (StatusCode::OK, Json(dashboard)).into_response(),
        Err(resp) => resp,
    }
}

async fn map(State(config): State<Config>) -> Response {
    // ---
    debug!("GET /dashboard/map");
    match render(&config).await {
        Ok(dashboard) => (StatusCode::OK, Json(dashboard.map)).into_response(),
        Err(resp) => resp,
    }
}

async fn hourly(State(config): State<Config>) -> Response {
    // ---
    debug!("GET /dashboard/hourly");
    match load_dataset(&config).await {
        Ok(dataset) => (StatusCode::OK, Json(ChartState::from_dataset(&dataset))).into_response(),
        Err(resp) => resp,
    }
}

// ---

/// Fresh load of the configured sheet; every request replaces the whole set.
async fn load_dataset(config: &Config) -> Result<Dataset, Response> {
    // ---
    let rows = ingest::load_rows(&config.data_file, &config.prediction_prefix)
        .await
        .map_err(|e| {
            error!("Failed to load sensor sheet: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to load sensor data".to_string(),
                }),
            )
                .into_response()
        })?;

    Ok(Dataset::from_rows(&rows, &config.prediction_prefix))
}

async fn render(config: &Config) -> Result<Dashboard, Response> {
    // ---
    let dataset = load_dataset(config).await?;
    let dashboard = Dashboard::build(&dataset, &config.dashboard_options());
    info!(
        "Render pass complete: {} markers, {} rejected rows",
        dashboard.map.points.len(),
        dashboard.summary.rejected
    );
    Ok(dashboard)
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn test_missing_sheet_is_server_error() {
        // ---
        let config = Config::with_data_file("/no/such/sheet.csv");
        let response = tokio_test::block_on(full(State(config)));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_hourly_with_sheet() {
        // ---
        let path = std::env::temp_dir().join("tanklevel_dashboard_hourly_route.csv");
        std::fs::write(
            &path,
            "Datos Qr,Ubicación,time,nivel,nivel_predict_8\nA,\"1,2\",08:00,0.5,0.4\n",
        )
        .unwrap();

        let response = tokio_test::block_on(hourly(State(Config::with_data_file(&path))));
        assert_eq!(response.status(), StatusCode::OK);

        std::fs::remove_file(&path).unwrap();
    }
}
