use std::collections::{BTreeMap, HashSet};
use std::fmt;

use tracing::debug;

use super::catalog::{ConfigurationError, ProductCatalog, QuestionCatalog, RecommendationRuleTable};
use super::domain::{Answer, Category, CategoryScore, Evaluation, HealthLevel, QuestionId};
use super::matcher::{match_recommendations, MatchedItem, SubstringMatch, TagMatchPolicy};
use super::scoring::{aggregate, classify, overall_score};
use crate::config::{CatalogConfig, DEFAULT_FALLBACK_LIMIT};

/// Rejected submission. No partial result is produced alongside it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("submission contains no answers")]
    EmptySubmission,
    #[error("submission is missing a user id")]
    MissingUserId,
    #[error("unknown question {0}")]
    UnknownQuestion(QuestionId),
    #[error("question {question} belongs to {expected}, answer claims {actual}")]
    CategoryMismatch {
        question: QuestionId,
        expected: Category,
        actual: Category,
    },
    #[error("question {0} is answered more than once")]
    DuplicateQuestion(QuestionId),
    #[error("value {value} is not an option of question {question}")]
    InvalidAnswerValue { question: QuestionId, value: u8 },
}

/// Immutable scoring configuration: questions, catalog, rules, and matching policy.
///
/// Built once at startup and shared by reference between submissions.
pub struct AssessmentEngine {
    questions: QuestionCatalog,
    products: ProductCatalog,
    rules: RecommendationRuleTable,
    policy: Box<dyn TagMatchPolicy>,
    fallback_limit: usize,
}

impl fmt::Debug for AssessmentEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssessmentEngine")
            .field("questions", &self.questions.len())
            .field("products", &self.products.len())
            .field("fallback_limit", &self.fallback_limit)
            .finish_non_exhaustive()
    }
}

impl AssessmentEngine {
    pub fn new(
        questions: QuestionCatalog,
        products: ProductCatalog,
        rules: RecommendationRuleTable,
    ) -> Self {
        Self {
            questions,
            products,
            rules,
            policy: Box::new(SubstringMatch),
            fallback_limit: DEFAULT_FALLBACK_LIMIT,
        }
    }

    pub fn standard() -> Self {
        Self::new(
            QuestionCatalog::standard(),
            ProductCatalog::standard(),
            RecommendationRuleTable::standard(),
        )
    }

    /// Loads the catalog and rule table named by the configuration, falling back
    /// to the built-in data for sources that are not configured.
    pub fn from_config(config: &CatalogConfig) -> Result<Self, ConfigurationError> {
        let products = match &config.products_csv {
            Some(path) => ProductCatalog::from_path(path)?,
            None => ProductCatalog::standard(),
        };
        let rules = match &config.rules_json {
            Some(path) => RecommendationRuleTable::from_path(path)?,
            None => RecommendationRuleTable::standard(),
        };

        Ok(Self::new(QuestionCatalog::standard(), products, rules)
            .with_fallback_limit(config.fallback_limit))
    }

    pub fn with_policy<P>(mut self, policy: P) -> Self
    where
        P: TagMatchPolicy + 'static,
    {
        self.policy = Box::new(policy);
        self
    }

    pub fn with_fallback_limit(mut self, fallback_limit: usize) -> Self {
        self.fallback_limit = fallback_limit;
        self
    }

    pub fn questions(&self) -> &QuestionCatalog {
        &self.questions
    }

    pub fn products(&self) -> &ProductCatalog {
        &self.products
    }

    pub fn rules(&self) -> &RecommendationRuleTable {
        &self.rules
    }

    /// Checks every answer against the question catalog.
    pub fn validate(&self, answers: &[Answer]) -> Result<(), ValidationError> {
        if answers.is_empty() {
            return Err(ValidationError::EmptySubmission);
        }

        let mut seen = HashSet::new();
        for answer in answers {
            let question = self
                .questions
                .question(&answer.question_id)
                .ok_or_else(|| ValidationError::UnknownQuestion(answer.question_id.clone()))?;

            if question.category != answer.category {
                return Err(ValidationError::CategoryMismatch {
                    question: answer.question_id.clone(),
                    expected: question.category,
                    actual: answer.category,
                });
            }
            if !seen.insert(&answer.question_id) {
                return Err(ValidationError::DuplicateQuestion(
                    answer.question_id.clone(),
                ));
            }
            if !question.accepts(answer.value) {
                return Err(ValidationError::InvalidAnswerValue {
                    question: answer.question_id.clone(),
                    value: answer.value,
                });
            }
        }

        Ok(())
    }

    /// Validates, scores, classifies, and matches one set of answers.
    ///
    /// Pure: identical input always yields an identical evaluation.
    pub fn evaluate(&self, answers: &[Answer]) -> Result<Evaluation, ValidationError> {
        self.validate(answers)?;

        let normalized = aggregate(answers, self.questions.max_option_score());
        let overall = overall_score(&normalized).ok_or(ValidationError::EmptySubmission)?;

        let category_scores: BTreeMap<Category, CategoryScore> = normalized
            .into_iter()
            .map(|(category, score)| {
                let level = classify(f64::from(score));
                (category, CategoryScore { score, level })
            })
            .collect();

        let recommendations = self
            .recommend(&levels_of(&category_scores))
            .iter()
            .map(MatchedItem::to_recommendation)
            .collect::<Vec<_>>();

        debug!(
            categories = category_scores.len(),
            overall,
            recommendations = recommendations.len(),
            "assessment evaluated"
        );

        Ok(Evaluation {
            category_scores,
            overall_score: overall,
            overall_level: classify(f64::from(overall)),
            recommendations,
        })
    }

    /// Runs the matcher against this engine's catalog and rules.
    pub fn recommend(&self, levels: &BTreeMap<Category, HealthLevel>) -> Vec<MatchedItem<'_>> {
        match_recommendations(
            levels,
            &self.products,
            &self.rules,
            self.policy.as_ref(),
            self.fallback_limit,
        )
    }
}

pub(crate) fn levels_of(
    category_scores: &BTreeMap<Category, CategoryScore>,
) -> BTreeMap<Category, HealthLevel> {
    category_scores
        .iter()
        .map(|(category, score)| (*category, score.level))
        .collect()
}
