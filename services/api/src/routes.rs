use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use matchvita::assessment::{assessment_router, AssessmentRepository, AssessmentService};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_assessment_routes<R>(service: Arc<AssessmentService<R>>) -> axum::Router
where
    R: AssessmentRepository + 'static,
{
    assessment_router(service)
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

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::InMemoryAssessmentRepository;
    use matchvita::assessment::AssessmentEngine;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tower::ServiceExt;

    fn state(ready: bool) -> AppState {
        AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        }
    }

    fn app(state: AppState) -> axum::Router {
        let service = Arc::new(AssessmentService::new(
            Arc::new(AssessmentEngine::standard()),
            Arc::new(InMemoryAssessmentRepository::default()),
        ));
        with_assessment_routes(service).layer(Extension(state))
    }

    async fn get(router: axum::Router, uri: &str) -> StatusCode {
        router
            .oneshot(
                axum::http::Request::get(uri)
                    .body(axum::body::Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes")
            .status()
    }

    #[tokio::test]
    async fn readiness_follows_the_startup_flag() {
        let state = state(false);
        let flag = state.readiness.clone();
        let router = app(state);

        assert_eq!(get(router.clone(), "/ready").await, StatusCode::SERVICE_UNAVAILABLE);
        flag.store(true, Ordering::Release);
        assert_eq!(get(router, "/ready").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn operational_and_quiz_routes_share_one_router() {
        let router = app(state(true));

        assert_eq!(get(router.clone(), "/health").await, StatusCode::OK);
        assert_eq!(get(router.clone(), "/metrics").await, StatusCode::OK);
        assert_eq!(get(router.clone(), "/api/v1/questions").await, StatusCode::OK);
        assert_eq!(
            get(router, "/api/v1/assessments/asm-unknown").await,
            StatusCode::NOT_FOUND
        );
    }
}
