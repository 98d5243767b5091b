use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{ClaimAttempt, FoundItemId, FoundItemSubmission, LostReportSubmission};
use super::repository::{FoundItemRepository, LostReportRepository};
use super::service::{RecoveryService, RecoveryServiceError};
use super::views::{ClaimResponse, FoundItemView, LostReportResponse};

#[derive(Debug, Default, Deserialize)]
pub(crate) struct FoundItemQuery {
    #[serde(default)]
    pub(crate) unclaimed: bool,
}

/// Router builder exposing found-item, lost-report, and claim endpoints.
pub fn recovery_router<F, L>(service: Arc<RecoveryService<F, L>>) -> Router
where
    F: FoundItemRepository + 'static,
    L: LostReportRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/found-items",
            post(register_found_handler::<F, L>).get(list_found_handler::<F, L>),
        )
        .route(
            "/api/v1/found-items/:found_id",
            get(found_item_handler::<F, L>),
        )
        .route(
            "/api/v1/found-items/:found_id/claim",
            post(claim_handler::<F, L>),
        )
        .route(
            "/api/v1/lost-reports",
            post(report_lost_handler::<F, L>).get(list_reports_handler::<F, L>),
        )
        .with_state(service)
}

pub(crate) async fn register_found_handler<F, L>(
    State(service): State<Arc<RecoveryService<F, L>>>,
    axum::Json(submission): axum::Json<FoundItemSubmission>,
) -> Response
where
    F: FoundItemRepository + 'static,
    L: LostReportRepository + 'static,
{
    match service.register_found(submission) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn list_found_handler<F, L>(
    State(service): State<Arc<RecoveryService<F, L>>>,
    Query(query): Query<FoundItemQuery>,
) -> Response
where
    F: FoundItemRepository + 'static,
    L: LostReportRepository + 'static,
{
    match service.list_found(query.unclaimed) {
        Ok(items) => {
            let views = items.iter().map(FoundItemView::from).collect::<Vec<_>>();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn found_item_handler<F, L>(
    State(service): State<Arc<RecoveryService<F, L>>>,
    Path(found_id): Path<String>,
) -> Response
where
    F: FoundItemRepository + 'static,
    L: LostReportRepository + 'static,
{
    match service.get_found(&FoundItemId(found_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(FoundItemView::from(&record))).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn claim_handler<F, L>(
    State(service): State<Arc<RecoveryService<F, L>>>,
    Path(found_id): Path<String>,
    axum::Json(attempt): axum::Json<ClaimAttempt>,
) -> Response
where
    F: FoundItemRepository + 'static,
    L: LostReportRepository + 'static,
{
    match service.claim(&FoundItemId(found_id), attempt).await {
        Ok(decision) => {
            (StatusCode::OK, axum::Json(ClaimResponse::from(&decision))).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn report_lost_handler<F, L>(
    State(service): State<Arc<RecoveryService<F, L>>>,
    axum::Json(submission): axum::Json<LostReportSubmission>,
) -> Response
where
    F: FoundItemRepository + 'static,
    L: LostReportRepository + 'static,
{
    match service.report_lost(submission) {
        Ok(outcome) => {
            let body = LostReportResponse::new(&outcome.report, outcome.matches);
            (StatusCode::CREATED, axum::Json(body)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn list_reports_handler<F, L>(
    State(service): State<Arc<RecoveryService<F, L>>>,
) -> Response
where
    F: FoundItemRepository + 'static,
    L: LostReportRepository + 'static,
{
    match service.list_reports() {
        Ok(reports) => (StatusCode::OK, axum::Json(reports)).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: RecoveryServiceError) -> Response {
    let payload = json!({
        "error": err.to_string(),
    });
    (err.status_code(), axum::Json(payload)).into_response()
}
