use std::collections::{BTreeMap, HashMap};

use crate::assessment::domain::{Answer, Category, QuestionId};

/// Reduces answers to one normalized 0..=100 score per category.
///
/// `max_per_question` comes from the question catalog. Categories without answers
/// are absent from the result rather than defaulted. A question answered more
/// than once counts only with its last answer.
pub fn aggregate(answers: &[Answer], max_per_question: u8) -> BTreeMap<Category, u8> {
    let mut latest: HashMap<&QuestionId, &Answer> = HashMap::new();
    for answer in answers {
        latest.insert(&answer.question_id, answer);
    }

    let mut totals: BTreeMap<Category, (u64, u64)> = BTreeMap::new();
    for answer in latest.into_values() {
        let (sum, count) = totals.entry(answer.category).or_insert((0, 0));
        *sum += u64::from(answer.value.min(max_per_question));
        *count += 1;
    }

    totals
        .into_iter()
        .filter_map(|(category, (sum, count))| {
            let possible = count * u64::from(max_per_question);
            (possible > 0).then(|| (category, rounded_percent(sum, possible)))
        })
        .collect()
}

/// Mean of the category scores that are present, rounded half up.
///
/// Returns `None` when no category was answered.
pub fn overall_score(category_scores: &BTreeMap<Category, u8>) -> Option<u8> {
    if category_scores.is_empty() {
        return None;
    }
    let sum: u64 = category_scores.values().map(|score| u64::from(*score)).sum();
    let count = category_scores.len() as u64;
    Some(rounded_ratio(u128::from(sum), u128::from(count)))
}

/// `round(part / whole * 100)` with half-up rounding in integer arithmetic.
fn rounded_percent(part: u64, whole: u64) -> u8 {
    rounded_ratio(u128::from(part) * 100, u128::from(whole))
}

/// Half-up `numerator / denominator`, capped at 100.
fn rounded_ratio(numerator: u128, denominator: u128) -> u8 {
    let value = (2 * numerator + denominator) / (2 * denominator);
    value.min(100) as u8
}
