use axum::Json;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;

use super::error::ApiError;
use super::state::AppState;
use crate::errors::ServiceError;
use crate::export::{self, CSV_CONTENT_TYPE};
use crate::options::FilterOptions;
use crate::query;
use crate::record::PatientVisitRecord;
use crate::summary::Summary;

// Raw pairs keep repeated keys like `diagnosis[]=A&diagnosis[]=B`.
type RawParams = Query<Vec<(String, String)>>;

/// Store scans block, so they run on the blocking pool.
async fn blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ServiceError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Internal(format!("worker failed: {e}")))?
        .map_err(ApiError::from)
}

pub async fn patient_data(
    State(st): State<AppState>,
    Query(params): RawParams,
) -> Result<Json<Vec<PatientVisitRecord>>, ApiError> {
    let criteria = query::parse_filter_params(params)?;
    let service = st.service();
    let records = blocking(move || service.find(&criteria)).await?;
    Ok(Json(records))
}

pub async fn export_patient_data(
    State(st): State<AppState>,
    Query(params): RawParams,
) -> Result<impl IntoResponse, ApiError> {
    let criteria = query::parse_export_params(params);
    let service = st.service();
    let body = blocking(move || service.export_csv(&criteria)).await?;
    let headers = [
        (header::CONTENT_TYPE, CSV_CONTENT_TYPE.to_string()),
        (header::CONTENT_DISPOSITION, export::content_disposition()),
    ];
    Ok((headers, body))
}

pub async fn filter_options(State(st): State<AppState>) -> Result<Json<FilterOptions>, ApiError> {
    let service = st.service();
    let opts = blocking(move || service.filter_options()).await?;
    Ok(Json(opts))
}

pub async fn patient_summary(
    State(st): State<AppState>,
    Query(params): RawParams,
) -> Result<Json<Summary>, ApiError> {
    let criteria = query::parse_filter_params(params)?;
    let service = st.service();
    let s = blocking(move || service.summary(&criteria)).await?;
    Ok(Json(s))
}
