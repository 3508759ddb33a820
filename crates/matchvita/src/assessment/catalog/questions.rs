use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::ConfigurationError;
use crate::assessment::domain::{Category, QuestionId};

/// Highest score any option of the standard quiz awards.
pub const MAX_OPTION_SCORE: u8 = 5;

/// A selectable answer and the points it awards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub id: String,
    pub order: u8,
    pub text: String,
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub order: u16,
    pub category: Category,
    pub text: String,
    pub options: Vec<AnswerOption>,
}

impl Question {
    pub fn accepts(&self, value: u8) -> bool {
        self.options.iter().any(|option| option.score == value)
    }
}

/// Ordered quiz definition. The catalog is the single owner of the per-question
/// maximum used to normalize scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionCatalog {
    questions: Vec<Question>,
    max_option_score: u8,
}

impl QuestionCatalog {
    pub fn new(
        mut questions: Vec<Question>,
        max_option_score: u8,
    ) -> Result<Self, ConfigurationError> {
        if max_option_score == 0 {
            return Err(ConfigurationError::InvalidMaxOptionScore);
        }

        let mut seen = HashSet::new();
        for question in &questions {
            if !seen.insert(question.id.clone()) {
                return Err(ConfigurationError::DuplicateQuestion(question.id.clone()));
            }
            if question.options.is_empty() {
                return Err(ConfigurationError::QuestionWithoutOptions(
                    question.id.clone(),
                ));
            }
            if let Some(option) = question
                .options
                .iter()
                .find(|option| option.score == 0 || option.score > max_option_score)
            {
                return Err(ConfigurationError::OptionScoreOutOfRange {
                    question: question.id.clone(),
                    score: option.score,
                    max: max_option_score,
                });
            }
        }

        questions.sort_by_key(|question| question.order);
        for question in &mut questions {
            question.options.sort_by_key(|option| option.order);
        }

        Ok(Self {
            questions,
            max_option_score,
        })
    }

    /// The 24-question quiz: four questions for each of the six categories.
    pub fn standard() -> Self {
        let questions = STANDARD_QUESTIONS
            .iter()
            .enumerate()
            .map(|(index, (id, category, text, scale))| {
                let id = QuestionId((*id).to_string());
                Question {
                    options: scale.options(&id),
                    id,
                    order: index as u16 + 1,
                    category: *category,
                    text: (*text).to_string(),
                }
            })
            .collect();

        Self {
            questions,
            max_option_score: MAX_OPTION_SCORE,
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, id: &QuestionId) -> Option<&Question> {
        self.questions.iter().find(|question| &question.id == id)
    }

    pub fn for_category(&self, category: Category) -> impl Iterator<Item = &Question> {
        self.questions
            .iter()
            .filter(move |question| question.category == category)
    }

    pub fn max_option_score(&self) -> u8 {
        self.max_option_score
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
enum AnswerScale {
    /// How often a symptom occurs; "never" is the healthiest answer.
    SymptomFrequency,
    /// Self-rated quality from very poor to excellent.
    Quality,
}

impl AnswerScale {
    fn labels(self) -> [&'static str; MAX_OPTION_SCORE as usize] {
        match self {
            AnswerScale::SymptomFrequency => ["Always", "Often", "Sometimes", "Rarely", "Never"],
            AnswerScale::Quality => ["Very poor", "Poor", "Fair", "Good", "Excellent"],
        }
    }

    fn options(self, question: &QuestionId) -> Vec<AnswerOption> {
        self.labels()
            .iter()
            .enumerate()
            .map(|(index, label)| AnswerOption {
                id: format!("{}-{}", question.0, index + 1),
                order: index as u8 + 1,
                text: (*label).to_string(),
                score: index as u8 + 1,
            })
            .collect()
    }
}

const STANDARD_QUESTIONS: [(&str, Category, &str, AnswerScale); 24] = [
    ("energy-1", Category::Energy, "How would you rate your energy level during the day?", AnswerScale::Quality),
    ("energy-2", Category::Energy, "Do you feel tired even after a full night's sleep?", AnswerScale::SymptomFrequency),
    ("energy-3", Category::Energy, "Do you need caffeine or sugar to get through the afternoon?", AnswerScale::SymptomFrequency),
    ("energy-4", Category::Energy, "Do you run out of breath on light exertion such as stairs?", AnswerScale::SymptomFrequency),
    ("joints-1", Category::Joints, "Do your joints feel stiff when you wake up?", AnswerScale::SymptomFrequency),
    ("joints-2", Category::Joints, "Do you feel knee or back pain when standing for long periods?", AnswerScale::SymptomFrequency),
    ("joints-3", Category::Joints, "How would you rate your flexibility and range of motion?", AnswerScale::Quality),
    ("joints-4", Category::Joints, "Do you hear clicking or grinding from your joints?", AnswerScale::SymptomFrequency),
    ("brain-1", Category::Brain, "Do you forget appointments or where you left things?", AnswerScale::SymptomFrequency),
    ("brain-2", Category::Brain, "How would you rate your ability to concentrate on a task?", AnswerScale::Quality),
    ("brain-3", Category::Brain, "Do you experience brain fog during the day?", AnswerScale::SymptomFrequency),
    ("brain-4", Category::Brain, "Do you struggle to find the right word in conversation?", AnswerScale::SymptomFrequency),
    ("skin-1", Category::Skin, "Does your skin feel dry or tight?", AnswerScale::SymptomFrequency),
    ("skin-2", Category::Skin, "How would you rate your skin's elasticity and glow?", AnswerScale::Quality),
    ("skin-3", Category::Skin, "Do you get breakouts or irritation?", AnswerScale::SymptomFrequency),
    ("skin-4", Category::Skin, "Do you notice dark spots or uneven tone after sun exposure?", AnswerScale::SymptomFrequency),
    ("sleep-1", Category::Sleep, "Do you take longer than 30 minutes to fall asleep?", AnswerScale::SymptomFrequency),
    ("sleep-2", Category::Sleep, "Do you wake up during the night and struggle to fall back asleep?", AnswerScale::SymptomFrequency),
    ("sleep-3", Category::Sleep, "How would you rate the overall quality of your sleep?", AnswerScale::Quality),
    ("sleep-4", Category::Sleep, "Do you feel anxious or restless at bedtime?", AnswerScale::SymptomFrequency),
    ("immune-1", Category::Immune, "Do you catch colds or flu more than three times a year?", AnswerScale::SymptomFrequency),
    ("immune-2", Category::Immune, "Do small cuts or bruises take long to heal?", AnswerScale::SymptomFrequency),
    ("immune-3", Category::Immune, "How would you rate your recovery after being ill?", AnswerScale::Quality),
    ("immune-4", Category::Immune, "Do you suffer from allergies or recurring infections?", AnswerScale::SymptomFrequency),
];
