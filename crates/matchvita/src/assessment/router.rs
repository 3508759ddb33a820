use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::advice::CategoryInsight;
use super::domain::{Assessment, AssessmentId, AssessmentSubmission, UserId};
use super::repository::{AssessmentRepository, AssessmentSummary, RepositoryError};
use super::service::{AssessmentService, AssessmentServiceError};

const DEFAULT_HISTORY_LIMIT: usize = 20;

/// Full result payload returned after submission and on lookup.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResultView {
    #[serde(flatten)]
    pub assessment: Assessment,
    pub overall_label: &'static str,
    pub insights: Vec<CategoryInsight>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct HistoryQuery {
    limit: Option<usize>,
}

/// Router builder exposing HTTP endpoints for quiz submission and results.
pub fn assessment_router<R>(service: Arc<AssessmentService<R>>) -> Router
where
    R: AssessmentRepository + 'static,
{
    Router::new()
        .route("/api/v1/questions", get(questions_handler::<R>))
        .route("/api/v1/assessments", post(submit_handler::<R>))
        .route(
            "/api/v1/assessments/:assessment_id",
            get(result_handler::<R>),
        )
        .route(
            "/api/v1/users/:user_id/assessments",
            get(history_handler::<R>),
        )
        .route(
            "/api/v1/users/:user_id/latest-scores",
            get(latest_scores_handler::<R>),
        )
        .with_state(service)
}

fn result_view<R>(service: &AssessmentService<R>, assessment: Assessment) -> AssessmentResultView
where
    R: AssessmentRepository + 'static,
{
    AssessmentResultView {
        insights: service.insights(&assessment),
        overall_label: assessment.evaluation.overall_level.label(),
        assessment,
    }
}

pub(crate) async fn questions_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    let catalog = service.engine().questions();
    (StatusCode::OK, axum::Json(catalog)).into_response()
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    axum::Json(submission): axum::Json<AssessmentSubmission>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    let AssessmentSubmission { user_id, answers } = submission;
    match service.submit(user_id, answers) {
        Ok(assessment) => {
            let view = result_view(&service, assessment);
            (StatusCode::CREATED, axum::Json(view)).into_response()
        }
        Err(AssessmentServiceError::Validation(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(AssessmentServiceError::Persistence { assessment, source }) => {
            let payload = json!({
                "error": format!("assessment could not be stored: {source}"),
                "assessment": assessment.bundle(),
            });
            (StatusCode::SERVICE_UNAVAILABLE, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn result_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(assessment_id): Path<String>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    let id = AssessmentId(assessment_id);
    match service.get(&id) {
        Ok(assessment) => {
            let view = result_view(&service, assessment);
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(AssessmentServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "assessmentId": id.0,
                "error": "assessment not found",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn history_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(user_id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    match service.history(&UserId(user_id), limit) {
        Ok(assessments) => {
            let summaries: Vec<AssessmentSummary> =
                assessments.iter().map(AssessmentSummary::from).collect();
            (StatusCode::OK, axum::Json(summaries)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn latest_scores_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(user_id): Path<String>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    match service.latest_scores(&UserId(user_id)) {
        Ok(scores) => (StatusCode::OK, axum::Json(scores)).into_response(),
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
