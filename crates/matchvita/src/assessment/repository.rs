use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::{Assessment, AssessmentId, HealthLevel, UserId};

/// Storage abstraction so the service module can be exercised in isolation.
///
/// Assessments are append-only: `insert` must reject an id that already exists.
pub trait AssessmentRepository: Send + Sync {
    fn insert(&self, assessment: Assessment) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &AssessmentId) -> Result<Option<Assessment>, RepositoryError>;
    /// Most recent first.
    fn history(&self, user_id: &UserId, limit: usize) -> Result<Vec<Assessment>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Compact listing entry for a user's assessment history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentSummary {
    pub assessment_id: AssessmentId,
    pub overall_score: u8,
    pub overall_level: HealthLevel,
    pub overall_label: &'static str,
    pub categories_scored: usize,
    pub completed_at: DateTime<Utc>,
}

impl From<&Assessment> for AssessmentSummary {
    fn from(assessment: &Assessment) -> Self {
        Self {
            assessment_id: assessment.id.clone(),
            overall_score: assessment.evaluation.overall_score,
            overall_level: assessment.evaluation.overall_level,
            overall_label: assessment.evaluation.overall_level.label(),
            categories_scored: assessment.evaluation.category_scores.len(),
            completed_at: assessment.completed_at,
        }
    }
}
