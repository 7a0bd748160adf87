//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;

use super::AppState;
use super::types::{ErrorResponse, FeedersQuery, ReportQuery};
use crate::report::grouping::FeederReport;
use crate::report::index::{FeederOption, SubstationOption};
use crate::report::view::{FeederScope, SubstationScope, ViewState};

type ApiError = (StatusCode, Json<ErrorResponse>);

fn bad_request(error: String) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error }))
}

/// Renders the report for the view described by the query.
///
/// `GET /report` → 200 + `FeederReport` JSON
/// `GET /report?substation=1&feeder=101` → report for one feeder, substation total
/// `GET /report?feeder=abc` or `?min_kva=NaN` → 400 + `ErrorResponse`
pub async fn get_report(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<FeederReport>, ApiError> {
    let feeder = match query.feeder.as_deref() {
        Some(raw) => raw
            .parse::<FeederScope>()
            .map_err(|e| bad_request(e.to_string()))?,
        None => FeederScope::All,
    };
    if let Some(min) = query.min_kva.filter(|v| !v.is_finite()) {
        return Err(bad_request(format!("min_kva \"{min}\" is not a finite number")));
    }
    let substation = query
        .substation
        .as_deref()
        .map_or(SubstationScope::All, |raw| {
            SubstationScope::resolve(raw, state.engine.classifier())
        });

    let view = ViewState {
        substation,
        feeder,
        query: query.q.unwrap_or_default(),
        min_kva: query.min_kva,
    };
    let show_blocks = query.blocks.unwrap_or(state.show_blocks);
    Ok(Json(state.engine.render(&view, show_blocks)))
}

/// `GET /substations` → 200 + `Vec<SubstationOption>` JSON
pub async fn get_substations(State(state): State<Arc<AppState>>) -> Json<Vec<SubstationOption>> {
    Json(state.engine.substation_options())
}

/// `GET /feeders?substation=KEY` → 200 + `Vec<FeederOption>` JSON
pub async fn get_feeders(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FeedersQuery>,
) -> Json<Vec<FeederOption>> {
    let scope = query
        .substation
        .as_deref()
        .map_or(SubstationScope::All, |raw| {
            SubstationScope::resolve(raw, state.engine.classifier())
        });
    Json(state.engine.feeder_options(&scope))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    use super::*;
    use crate::api::router;
    use crate::report::classify::Classifier;
    use crate::report::engine::ReportEngine;
    use crate::report::record::LoadRecord;

    fn make_test_state() -> Arc<AppState> {
        let records = vec![
            LoadRecord::new(101).with_block("A").with_kva(10.0, 0.0, 0.0),
            LoadRecord::new(104).with_kva(5.0, 0.0, 0.0),
            LoadRecord::new(301).with_kva(1.0, 0.0, 0.0),
        ];
        Arc::new(AppState {
            engine: ReportEngine::new(records, Classifier::new()),
            show_blocks: false,
        })
    }

    async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
        let app = router(make_test_state());
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn report_defaults_to_system_total() {
        let (status, json) = get_json("/report").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["grand_total"]["label"], "System Total");
        assert_eq!(json["grand_total"]["totals"]["combined_kva_total"], 16.0);
        assert_eq!(json["groups"].as_array().map(Vec::len), Some(3));
        assert_eq!(json["groups"][0]["blocks"].as_array().map(Vec::len), Some(0));
    }

    #[tokio::test]
    async fn report_honours_blocks_override() {
        let (_, json) = get_json("/report?blocks=true").await;
        assert_eq!(json["groups"][0]["blocks"][0]["block"], "A");
    }

    #[tokio::test]
    async fn bad_feeder_is_400() {
        let (status, json) = get_json("/report?feeder=abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().is_some_and(|e| e.contains("abc")));
    }

    #[tokio::test]
    async fn non_finite_min_kva_is_400() {
        for uri in ["/report?min_kva=NaN", "/report?min_kva=inf", "/report?min_kva=-inf"] {
            let (status, json) = get_json(uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert!(json["error"].as_str().is_some_and(|e| e.contains("min_kva")));
        }
    }

    #[tokio::test]
    async fn finite_min_kva_filters_rows() {
        let (status, json) = get_json("/report?min_kva=5").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["row_count"], 2);
    }

    #[tokio::test]
    async fn feeders_scoped_to_substation() {
        let (status, json) = get_json("/feeders?substation=1").await;
        assert_eq!(status, StatusCode::OK);
        let feeders: Vec<u64> = json
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|f| f["feeder"].as_u64())
            .collect();
        assert_eq!(feeders, [101, 104]);
    }
}
