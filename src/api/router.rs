use axum::Router;
use axum::http::Method;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};

use super::handlers;
use super::state::AppState;

/// Build the API router over `state`.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods([Method::GET]);
    Router::new()
        .merge(endpoints())
        .nest("/api", endpoints())
        .layer(cors)
        .with_state(state)
}

fn endpoints() -> Router<AppState> {
    Router::new()
        .route("/patient-data", get(handlers::patient_data))
        .route("/patient-data/", get(handlers::patient_data))
        .route("/export-patient-data", get(handlers::export_patient_data))
        .route("/export-patient-data/", get(handlers::export_patient_data))
        .route("/filter-options", get(handlers::filter_options))
        .route("/filter-options/", get(handlers::filter_options))
        .route("/patient-summary", get(handlers::patient_summary))
        .route("/patient-summary/", get(handlers::patient_summary))
}
