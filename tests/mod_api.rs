mod support;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use patient_visits::api::{AppState, router};
use patient_visits::store::MemoryStore;
use std::sync::Arc;
use tower::ServiceExt;

fn app_with(records: Vec<patient_visits::record::PatientVisitRecord>) -> Router {
    router(AppState::new(Arc::new(MemoryStore::new(records))))
}

fn sample_app() -> Router {
    app_with(support::sample_records())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()
}

async fn send(app: Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let resp = app.oneshot(get(uri)).await.unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes().to_vec();
    (status, headers, bytes)
}

async fn json(app: Router, uri: &str) -> serde_json::Value {
    let (status, _, body) = send(app, uri).await;
    assert_eq!(status, StatusCode::OK, "{uri}");
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn seeded_scenarios_over_http() {
    let v = json(sample_app(), "/patient-data?diagnosis%5B%5D=Hypertension").await;
    assert_eq!(v.as_array().unwrap().len(), 5);
    let v = json(sample_app(), "/patient-data?gender[]=Female").await;
    assert_eq!(v.as_array().unwrap().len(), 8);
    let v = json(sample_app(), "/patient-data?from_date=2024-01-01&to_date=2024-01-31").await;
    assert_eq!(v.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn repeated_keys_are_ored() {
    let v = json(sample_app(), "/api/patient-data/?diagnosis[]=Hypertension&diagnosis[]=Asthma").await;
    let got: Vec<&str> = v
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["diagnosis"].as_str().unwrap())
        .collect();
    assert_eq!(got.len(), 8);
    assert!(got.iter().all(|d| *d == "Hypertension" || *d == "Asthma"));
}

#[tokio::test]
async fn record_json_uses_dashboard_keys() {
    let v = json(sample_app(), "/patient-data?to_date=2024-01-15").await;
    let first = &v[0];
    assert_eq!(first["patient_id"], "P001");
    assert_eq!(first["date"], "2024-01-08");
    for key in ["age", "gender", "diagnosis", "lab_results", "medication", "visit_type", "outcome"] {
        assert!(first.get(key).is_some(), "missing {key}");
    }
}

#[tokio::test]
async fn missing_medication_is_null() {
    let v = json(app_with(support::three_visits()), "/patient-data").await;
    assert!(v[0]["medication"].is_null());
}

#[tokio::test]
async fn no_match_is_empty_array() {
    let v = json(sample_app(), "/patient-data?diagnosis[]=Influenza").await;
    assert_eq!(v, serde_json::json!([]));
}

#[tokio::test]
async fn malformed_date_is_bad_request() {
    let (status, _, body) = send(sample_app(), "/patient-data?from_date=2024-13-45").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let v: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(v["code"], "BAD_REQUEST");
    assert!(v["message"].as_str().unwrap().contains("from_date"));
}

#[tokio::test]
async fn blank_date_means_absent() {
    let v = json(sample_app(), "/patient-data?from_date=&to_date=").await;
    assert_eq!(v.as_array().unwrap().len(), 15);
}

#[tokio::test]
async fn export_sets_attachment_headers() {
    let (status, headers, body) = send(sample_app(), "/export-patient-data?diagnosis=Hypertension").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "text/csv");
    assert_eq!(
        headers[header::CONTENT_DISPOSITION],
        "attachment; filename=\"patient_data.csv\""
    );
    let text = String::from_utf8(body).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next().unwrap(),
        "Patient ID,Date,Age,Gender,Diagnosis,Lab Results,Medication,Visit Type,Outcome"
    );
    let rows: Vec<&str> = lines.collect();
    assert_eq!(rows.len(), 5);
    assert!(rows.iter().all(|r| r.contains("Hypertension")));
    for other in ["Asthma", "Diabetes", "COVID-19", "Heart Disease"] {
        assert!(!text.contains(other), "{other}");
    }
}

#[tokio::test]
async fn export_ignores_dates_and_brackets() {
    let (_, _, body) = send(
        sample_app(),
        "/export-patient-data?from_date=2030-01-01&diagnosis[]=Asthma",
    )
    .await;
    let text = String::from_utf8(body).unwrap();
    assert_eq!(text.lines().count(), 16);
}

#[tokio::test]
async fn export_three_visit_fixture_row() {
    let (_, _, body) = send(
        app_with(support::three_visits()),
        "/export-patient-data?diagnosis=Hypertension&gender=Male",
    )
    .await;
    let text = String::from_utf8(body).unwrap();
    let rows: Vec<&str> = text.lines().skip(1).collect();
    assert_eq!(rows, vec!["1,2024-01-15,45,Male,Hypertension,150.0,,Routine Checkup,Admitted"]);
}

#[tokio::test]
async fn filter_options_lists_distinct_values() {
    let v = json(sample_app(), "/filter-options").await;
    assert_eq!(
        v["diagnosis_options"],
        serde_json::json!(["Asthma", "Hypertension", "Diabetes", "COVID-19", "Heart Disease"])
    );
    assert_eq!(v["gender_options"], serde_json::json!(["Female", "Male"]));
    assert_eq!(
        v["visit_type_options"],
        serde_json::json!(["Emergency", "Follow-up", "Routine Checkup"])
    );
}

#[tokio::test]
async fn filter_options_on_empty_store() {
    let v = json(app_with(Vec::new()), "/api/filter-options").await;
    assert_eq!(v["diagnosis_options"], serde_json::json!([]));
    assert_eq!(v["gender_options"], serde_json::json!([]));
}

#[tokio::test]
async fn summary_follows_filters() {
    let v = json(sample_app(), "/patient-summary?diagnosis=Hypertension").await;
    assert_eq!(v["total_visits"], 5);
    assert_eq!(v["adverse_outcomes"], 3);
    assert_eq!(v["by_diagnosis"].as_array().unwrap().len(), 1);
    assert_eq!(v["by_diagnosis"][0]["adverse_outcome_pct"], 60.0);
}

#[tokio::test]
async fn summary_of_nothing_has_no_average() {
    let v = json(sample_app(), "/patient-summary?gender[]=Other").await;
    assert_eq!(v["total_visits"], 0);
    assert!(v["average_lab_results"].is_null());
}
