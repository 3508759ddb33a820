use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for stored assessments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssessmentId(pub String);

/// Identifier of the respondent owning an assessment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub String);

/// Identifier of a quiz question.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuestionId(pub String);

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The six health dimensions used both by the quiz and by catalog tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Energy,
    #[serde(alias = "joint")]
    Joints,
    Brain,
    Skin,
    Sleep,
    Immune,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Energy,
        Category::Joints,
        Category::Brain,
        Category::Skin,
        Category::Sleep,
        Category::Immune,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            Category::Energy => "energy",
            Category::Joints => "joints",
            Category::Brain => "brain",
            Category::Skin => "skin",
            Category::Sleep => "sleep",
            Category::Immune => "immune",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Category::Energy => "Energy",
            Category::Joints => "Bones & Joints",
            Category::Brain => "Brain & Memory",
            Category::Skin => "Skin",
            Category::Sleep => "Sleep",
            Category::Immune => "Immunity",
        }
    }

    /// Parses the wire key, accepting the singular `joint` spelling.
    pub fn from_key(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "energy" => Some(Category::Energy),
            "joints" | "joint" => Some(Category::Joints),
            "brain" => Some(Category::Brain),
            "skin" => Some(Category::Skin),
            "sleep" => Some(Category::Sleep),
            "immune" => Some(Category::Immune),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Ordinal health rating, 1 = best, 4 = worst. Serialised as its number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum HealthLevel {
    Excellent = 1,
    Good = 2,
    NeedsAttention = 3,
    NeedsImprovement = 4,
}

impl HealthLevel {
    pub const fn number(self) -> u8 {
        self as u8
    }

    pub const fn label(self) -> &'static str {
        match self {
            HealthLevel::Excellent => "Excellent",
            HealthLevel::Good => "Good",
            HealthLevel::NeedsAttention => "Needs attention",
            HealthLevel::NeedsImprovement => "Needs improvement",
        }
    }

    /// Levels 3 and 4 trigger rule-based recommendations.
    pub const fn needs_support(self) -> bool {
        matches!(self, HealthLevel::NeedsAttention | HealthLevel::NeedsImprovement)
    }
}

impl From<HealthLevel> for u8 {
    fn from(level: HealthLevel) -> Self {
        level.number()
    }
}

impl TryFrom<u8> for HealthLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(HealthLevel::Excellent),
            2 => Ok(HealthLevel::Good),
            3 => Ok(HealthLevel::NeedsAttention),
            4 => Ok(HealthLevel::NeedsImprovement),
            other => Err(format!("health level must be between 1 and 4, got {other}")),
        }
    }
}

/// One answered question as produced by the quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub question_id: QuestionId,
    #[serde(rename = "categoryId")]
    pub category: Category,
    pub value: u8,
}

/// Raw answer submission accepted by the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentSubmission {
    pub user_id: UserId,
    pub answers: Vec<Answer>,
}

/// Normalized score and derived level for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub score: u8,
    pub level: HealthLevel,
}

/// Catalog item selected for an assessment, with the rule that selected it.
///
/// `trigger` is `None` for items coming from the top-rated fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub item_id: String,
    pub name: String,
    pub kind: super::catalog::ItemKind,
    pub rating: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger: Option<RecommendationTrigger>,
}

/// The (category, level) pair whose rule matched an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationTrigger {
    pub category: Category,
    pub level: HealthLevel,
}

/// Scores, levels, and recommendations computed from one set of answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub category_scores: BTreeMap<Category, CategoryScore>,
    pub overall_score: u8,
    pub overall_level: HealthLevel,
    pub recommendations: Vec<Recommendation>,
}

/// A completed quiz. Never mutated after creation; a retake creates a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub id: AssessmentId,
    pub user_id: UserId,
    pub answers: Vec<Answer>,
    #[serde(flatten)]
    pub evaluation: Evaluation,
    pub completed_at: DateTime<Utc>,
}

impl Assessment {
    /// The persistence shape: recommendations reduced to item ids.
    pub fn bundle(&self) -> AssessmentBundle {
        AssessmentBundle {
            assessment_id: self.id.clone(),
            user_id: self.user_id.clone(),
            overall_score: self.evaluation.overall_score,
            overall_level: self.evaluation.overall_level,
            category_scores: self.evaluation.category_scores.clone(),
            recommendations: self
                .evaluation
                .recommendations
                .iter()
                .map(|recommendation| recommendation.item_id.clone())
                .collect(),
            completed_at: self.completed_at,
        }
    }
}

/// Outbound record handed to persistence and exposed by the status endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentBundle {
    pub assessment_id: AssessmentId,
    pub user_id: UserId,
    pub overall_score: u8,
    pub overall_level: HealthLevel,
    pub category_scores: BTreeMap<Category, CategoryScore>,
    pub recommendations: Vec<String>,
    pub completed_at: DateTime<Utc>,
}
