use serde::Serialize;

use super::catalog::ProductCatalog;
use super::domain::{Category, Evaluation, HealthLevel, Recommendation};

/// Items shown per category in the results breakdown.
pub const ITEMS_PER_CATEGORY: usize = 3;

/// Per-category breakdown shown alongside an assessment result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInsight {
    pub category: Category,
    pub category_label: &'static str,
    pub score: u8,
    pub level: HealthLevel,
    pub level_label: &'static str,
    pub description: &'static str,
    pub advice: &'static str,
    pub items: Vec<Recommendation>,
}

/// Builds the breakdown for every scored category.
///
/// Items come from the recommendations triggered by that category; categories
/// that triggered nothing show their best rated catalog items instead.
pub fn category_insights(evaluation: &Evaluation, catalog: &ProductCatalog) -> Vec<CategoryInsight> {
    evaluation
        .category_scores
        .iter()
        .map(|(category, score)| {
            let mut items: Vec<Recommendation> = evaluation
                .recommendations
                .iter()
                .filter(|recommendation| {
                    recommendation
                        .trigger
                        .is_some_and(|trigger| trigger.category == *category)
                })
                .take(ITEMS_PER_CATEGORY)
                .cloned()
                .collect();

            if items.is_empty() {
                let mut candidates: Vec<_> = catalog.for_category(*category).collect();
                candidates.sort_by(|a, b| b.rating.total_cmp(&a.rating));
                items = candidates
                    .into_iter()
                    .take(ITEMS_PER_CATEGORY)
                    .map(|item| Recommendation {
                        item_id: item.id.clone(),
                        name: item.name.clone(),
                        kind: item.kind,
                        rating: item.rating,
                        trigger: None,
                    })
                    .collect();
            }

            CategoryInsight {
                category: *category,
                category_label: category.label(),
                score: score.score,
                level: score.level,
                level_label: score.level.label(),
                description: level_description(*category, score.level),
                advice: lifestyle_advice(*category, score.level),
                items,
            }
        })
        .collect()
}

/// Short result description shown next to a category score.
pub fn level_description(category: Category, level: HealthLevel) -> &'static str {
    let row = match category {
        Category::Energy => [
            "Your energy is excellent.",
            "Your energy is in good shape.",
            "Your energy is average and could use some support.",
            "Your energy is low and needs more care.",
        ],
        Category::Joints => [
            "Your bones and joints are strong.",
            "Your bones and joints are in good condition.",
            "Your bones and joints need extra care.",
            "Your bones and joints need close attention.",
        ],
        Category::Brain => [
            "Your memory and focus are excellent.",
            "Your memory and focus are good.",
            "Your memory and focus would benefit from stimulation and care.",
            "Your memory and focus need serious attention.",
        ],
        Category::Skin => [
            "Your skin is in excellent condition.",
            "Your skin is in good condition.",
            "Your skin needs extra care.",
            "Your skin needs close attention.",
        ],
        Category::Sleep => [
            "Your sleep quality is excellent.",
            "Your sleep quality is good.",
            "Your sleep needs improvement.",
            "Your sleep needs serious attention.",
        ],
        Category::Immune => [
            "Your immune system is strong.",
            "Your immune system is in good shape.",
            "Your immune system would benefit from strengthening.",
            "Your immune system needs extra care.",
        ],
    };
    row[usize::from(level.number() - 1)]
}

/// Lifestyle advice for a category at a given level.
pub fn lifestyle_advice(category: Category, level: HealthLevel) -> &'static str {
    let row = match category {
        Category::Energy => [
            "Keep your energy up with balanced meals and regular exercise.",
            "Add 30 minutes of aerobic exercise three times a week.",
            "Eat more iron-rich foods and B vitamins.",
            "Talk to a doctor about persistent fatigue.",
        ],
        Category::Joints => [
            "Keep moving regularly to maintain mobility.",
            "Stretch your muscles as part of your routine.",
            "Add foods rich in calcium and vitamin D.",
            "See a physiotherapist or specialist.",
        ],
        Category::Brain => [
            "Keep your brain sharp with challenging activities.",
            "Play memory and puzzle games regularly.",
            "Add omega-3 rich foods and antioxidants.",
            "Talk to a doctor about memory concerns.",
        ],
        Category::Skin => [
            "Keep your skin hydrated with a moisturiser.",
            "Add foods rich in vitamins C and E.",
            "Drink more water and limit sun exposure.",
            "See a dermatologist for tailored care.",
        ],
        Category::Sleep => [
            "Keep a consistent sleep schedule.",
            "Keep your bedroom dark and quiet.",
            "Practice a relaxation routine before bed.",
            "Talk to a doctor about your sleep problems.",
        ],
        Category::Immune => [
            "Stay healthy with nutritious food.",
            "Add foods rich in vitamin C and zinc.",
            "Rest well and reduce stress.",
            "Talk to a doctor about strengthening your immunity.",
        ],
    };
    row[usize::from(level.number() - 1)]
}
