use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::assessment::domain::{
    Answer, Assessment, AssessmentId, AssessmentSubmission, Category, QuestionId, UserId,
};
use crate::assessment::engine::AssessmentEngine;
use crate::assessment::repository::{AssessmentRepository, RepositoryError};
use crate::assessment::{assessment_router, AssessmentService};

/// Answers for the first `values.len()` standard questions of a category.
pub(super) fn answers_for(category: Category, values: &[u8]) -> Vec<Answer> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| Answer {
            question_id: QuestionId(format!("{}-{}", category.key(), index + 1)),
            category,
            value: *value,
        })
        .collect()
}

/// Immune scored 20 (level 4) and sleep scored 50 (level 3).
pub(super) fn struggling_answers() -> Vec<Answer> {
    let mut answers = answers_for(Category::Immune, &[1, 1, 1, 1]);
    answers.extend(answers_for(Category::Sleep, &[2, 2, 3, 3]));
    answers
}

/// Every category answered with the best option.
pub(super) fn healthy_answers() -> Vec<Answer> {
    Category::ALL
        .into_iter()
        .flat_map(|category| answers_for(category, &[5, 5, 5, 5]))
        .collect()
}

pub(super) fn submission() -> AssessmentSubmission {
    AssessmentSubmission {
        user_id: user(),
        answers: struggling_answers(),
    }
}

pub(super) fn user() -> UserId {
    UserId("user-42".to_string())
}

pub(super) fn engine() -> Arc<AssessmentEngine> {
    Arc::new(AssessmentEngine::standard())
}

pub(super) fn build_service() -> (
    AssessmentService<MemoryRepository>,
    Arc<MemoryRepository>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let service = AssessmentService::new(engine(), repository.clone());
    (service, repository)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<Vec<Assessment>>>,
}

impl MemoryRepository {
    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("repository mutex poisoned").len()
    }
}

impl AssessmentRepository for MemoryRepository {
    fn insert(&self, assessment: Assessment) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.iter().any(|stored| stored.id == assessment.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(assessment);
        Ok(())
    }

    fn fetch(&self, id: &AssessmentId) -> Result<Option<Assessment>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|stored| &stored.id == id).cloned())
    }

    fn history(&self, user_id: &UserId, limit: usize) -> Result<Vec<Assessment>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .iter()
            .rev()
            .filter(|stored| &stored.user_id == user_id)
            .take(limit)
            .cloned()
            .collect())
    }
}

pub(super) struct UnavailableRepository;

impl AssessmentRepository for UnavailableRepository {
    fn insert(&self, _assessment: Assessment) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &AssessmentId) -> Result<Option<Assessment>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn history(&self, _user_id: &UserId, _limit: usize) -> Result<Vec<Assessment>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn assessment_router_with_service(
    service: AssessmentService<MemoryRepository>,
) -> axum::Router {
    assessment_router(Arc::new(service))
}

pub(super) fn item_ids(assessment: &Assessment) -> Vec<&str> {
    assessment
        .evaluation
        .recommendations
        .iter()
        .map(|recommendation| recommendation.item_id.as_str())
        .collect()
}
