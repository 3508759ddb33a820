use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::advice::{category_insights, CategoryInsight};
use super::domain::{Answer, Assessment, AssessmentId, Category, CategoryScore, UserId};
use super::engine::{AssessmentEngine, ValidationError};
use super::repository::{AssessmentRepository, RepositoryError};

/// Orchestrates validation, scoring, matching, and persistence of quiz results.
pub struct AssessmentService<R> {
    engine: Arc<AssessmentEngine>,
    repository: Arc<R>,
}

static ASSESSMENT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_assessment_id() -> AssessmentId {
    let id = ASSESSMENT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    AssessmentId(format!("asm-{id:06}"))
}

impl<R> AssessmentService<R>
where
    R: AssessmentRepository + 'static,
{
    pub fn new(engine: Arc<AssessmentEngine>, repository: Arc<R>) -> Self {
        Self { engine, repository }
    }

    pub fn engine(&self) -> &AssessmentEngine {
        &self.engine
    }

    /// Score a completed quiz and store the result.
    ///
    /// When storage fails the computed assessment travels back inside
    /// [`AssessmentServiceError::Persistence`] so it can be retried with
    /// [`AssessmentService::retry_persist`].
    pub fn submit(
        &self,
        user_id: UserId,
        answers: Vec<Answer>,
    ) -> Result<Assessment, AssessmentServiceError> {
        if user_id.0.trim().is_empty() {
            return Err(ValidationError::MissingUserId.into());
        }

        let evaluation = self.engine.evaluate(&answers)?;
        let assessment = Assessment {
            id: next_assessment_id(),
            user_id,
            answers,
            evaluation,
            completed_at: Utc::now(),
        };

        if let Err(source) = self.repository.insert(assessment.clone()) {
            warn!(
                assessment_id = %assessment.id.0,
                error = %source,
                "assessment computed but not persisted"
            );
            return Err(AssessmentServiceError::Persistence {
                assessment: Box::new(assessment),
                source,
            });
        }

        info!(
            assessment_id = %assessment.id.0,
            overall_score = assessment.evaluation.overall_score,
            overall_level = assessment.evaluation.overall_level.number(),
            recommendations = assessment.evaluation.recommendations.len(),
            "assessment stored"
        );
        Ok(assessment)
    }

    /// Store a previously computed assessment without recomputing it.
    pub fn retry_persist(&self, assessment: &Assessment) -> Result<(), RepositoryError> {
        self.repository.insert(assessment.clone())
    }

    pub fn get(&self, id: &AssessmentId) -> Result<Assessment, AssessmentServiceError> {
        let assessment = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(assessment)
    }

    pub fn history(
        &self,
        user_id: &UserId,
        limit: usize,
    ) -> Result<Vec<Assessment>, AssessmentServiceError> {
        Ok(self.repository.history(user_id, limit)?)
    }

    /// Category scores of the user's most recent assessment; empty when the
    /// user has none.
    pub fn latest_scores(
        &self,
        user_id: &UserId,
    ) -> Result<BTreeMap<Category, CategoryScore>, AssessmentServiceError> {
        let latest = self.repository.history(user_id, 1)?.into_iter().next();
        Ok(latest
            .map(|assessment| assessment.evaluation.category_scores)
            .unwrap_or_default())
    }

    pub fn insights(&self, assessment: &Assessment) -> Vec<CategoryInsight> {
        category_insights(&assessment.evaluation, self.engine.products())
    }
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("assessment {} was computed but could not be stored: {source}", .assessment.id.0)]
    Persistence {
        assessment: Box<Assessment>,
        source: RepositoryError,
    },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
