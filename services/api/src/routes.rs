use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use lost_found::workflows::recovery::{
    recovery_router, FoundItemRepository, LostReportRepository, RecoveryService,
};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_recovery_routes<F, L>(service: Arc<RecoveryService<F, L>>) -> axum::Router
where
    F: FoundItemRepository + 'static,
    L: LostReportRepository + 'static,
{
    recovery_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let scoring = if state.semantic_enabled {
        "semantic"
    } else {
        "local-only"
    };
    let payload = if ready {
        json!({ "status": "ready", "scoring": scoring })
    } else {
        json!({ "status": "initializing", "scoring": scoring })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
