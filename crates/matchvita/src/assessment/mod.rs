//! Health self-assessment: answers in, category scores, levels, and catalog
//! recommendations out.
//!
//! Reference data lives in [`catalog`] and is loaded once into an
//! [`AssessmentEngine`]. The engine is pure; [`AssessmentService`] adds id
//! allocation and persistence, and [`assessment_router`] exposes it over HTTP.

pub mod advice;
pub mod catalog;
pub mod domain;
pub mod engine;
pub mod matcher;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use advice::{category_insights, CategoryInsight};
pub use catalog::{
    CatalogItem, ConfigurationError, ItemKind, ProductCatalog, QuestionCatalog,
    RecommendationRuleTable,
};
pub use domain::{
    Answer, Assessment, AssessmentBundle, AssessmentId, AssessmentSubmission, Category,
    CategoryScore, Evaluation, HealthLevel, QuestionId, Recommendation, RecommendationTrigger,
    UserId,
};
pub use engine::{AssessmentEngine, ValidationError};
pub use matcher::{ExactTagMatch, MatchedItem, SubstringMatch, TagMatchPolicy};
pub use repository::{AssessmentRepository, AssessmentSummary, RepositoryError};
pub use router::assessment_router;
pub use service::{AssessmentService, AssessmentServiceError};
