//! Read-only reference data: the quiz questions, the vitamin/food catalog, and the
//! recommendation rule table. Everything here is validated once at construction and
//! never mutated afterwards.

mod csv_row;
pub mod products;
pub mod questions;
pub mod rules;

use std::path::PathBuf;

use super::domain::{Category, HealthLevel, QuestionId};

pub use products::{CatalogItem, ItemKind, ProductCatalog};
pub use questions::{AnswerOption, Question, QuestionCatalog, MAX_OPTION_SCORE};
pub use rules::RecommendationRuleTable;

/// Raised when the catalog or rule table cannot be loaded or fails validation.
///
/// These are startup failures: an engine is never built from partial reference data.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid catalog CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("malformed rule table: {0}")]
    Rules(#[from] serde_json::Error),
    #[error("maximum option score must be greater than zero")]
    InvalidMaxOptionScore,
    #[error("question {0} has no options")]
    QuestionWithoutOptions(QuestionId),
    #[error("question {question} option scores {score}, outside 1..={max}")]
    OptionScoreOutOfRange {
        question: QuestionId,
        score: u8,
        max: u8,
    },
    #[error("question {0} is defined more than once")]
    DuplicateQuestion(QuestionId),
    #[error("catalog item {0} is defined more than once")]
    DuplicateCatalogItem(String),
    #[error("catalog item is missing its {field}")]
    MissingItemField { field: &'static str },
    #[error("catalog item {item} has rating {rating}, expected 0..=5")]
    InvalidRating { item: String, rating: f32 },
    #[error("unknown category '{0}'")]
    UnknownCategory(String),
    #[error("unknown item kind '{0}', expected vitamin or food")]
    UnknownItemKind(String),
    #[error("rule for {category} uses level {level}; only levels 3 and 4 trigger recommendations")]
    NonTriggeringRuleLevel { category: Category, level: u8 },
    #[error("rule for {category} level {} contains an empty pattern", level.number())]
    EmptyRulePattern {
        category: Category,
        level: HealthLevel,
    },
}
