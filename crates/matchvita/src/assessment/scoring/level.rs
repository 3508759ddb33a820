use crate::assessment::domain::HealthLevel;

const EXCELLENT_FLOOR: f64 = 76.0;
const GOOD_FLOOR: f64 = 51.0;
const ATTENTION_FLOOR: f64 = 26.0;

/// Maps a normalized 0..=100 score onto a level. Lower bounds are inclusive.
///
/// Out-of-range input is clamped (NaN counts as 0) instead of rejected.
pub fn classify(score: f64) -> HealthLevel {
    let score = if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 100.0)
    };

    if score >= EXCELLENT_FLOOR {
        HealthLevel::Excellent
    } else if score >= GOOD_FLOOR {
        HealthLevel::Good
    } else if score >= ATTENTION_FLOOR {
        HealthLevel::NeedsAttention
    } else {
        HealthLevel::NeedsImprovement
    }
}

/// Raw sum-of-answers scale used by earlier stored results, where each answer
/// scored 1..=4 and a category total ran from 4 to 16.
///
/// Only used to bring old totals onto the normalized scale; levels are always
/// derived from the normalized score via [`classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegacyRawScale {
    pub max_per_answer: u8,
}

impl Default for LegacyRawScale {
    fn default() -> Self {
        Self { max_per_answer: 4 }
    }
}

impl LegacyRawScale {
    /// Converts a raw total over `answered` answers to a 0..=100 score.
    ///
    /// Totals above the possible maximum count as full marks.
    pub fn normalize(&self, raw_total: u32, answered: u32) -> Option<u8> {
        let possible = u64::from(answered) * u64::from(self.max_per_answer);
        if possible == 0 {
            return None;
        }
        let earned = u64::from(raw_total).min(possible);
        let percent = (200 * earned + possible) / (2 * possible);
        u8::try_from(percent).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_map_to_the_better_level() {
        assert_eq!(classify(76.0), HealthLevel::Excellent);
        assert_eq!(classify(75.99), HealthLevel::Good);
        assert_eq!(classify(51.0), HealthLevel::Good);
        assert_eq!(classify(50.0), HealthLevel::NeedsAttention);
        assert_eq!(classify(26.0), HealthLevel::NeedsAttention);
        assert_eq!(classify(25.0), HealthLevel::NeedsImprovement);
    }

    #[test]
    fn every_score_in_range_has_a_level() {
        for score in 0..=100u8 {
            let level = classify(f64::from(score));
            assert!((1..=4).contains(&level.number()), "score {score}");
        }
    }

    #[test]
    fn clamps_out_of_range_scores() {
        assert_eq!(classify(-3.0), HealthLevel::NeedsImprovement);
        assert_eq!(classify(100.0000001), HealthLevel::Excellent);
        assert_eq!(classify(250.0), HealthLevel::Excellent);
        assert_eq!(classify(f64::NAN), HealthLevel::NeedsImprovement);
    }

    #[test]
    fn legacy_totals_normalize_onto_percent_scale() {
        let scale = LegacyRawScale::default();
        assert_eq!(scale.normalize(16, 4), Some(100));
        assert_eq!(scale.normalize(4, 4), Some(25));
        assert_eq!(scale.normalize(10, 4), Some(63));
        assert_eq!(scale.normalize(3, 0), None);
    }

    #[test]
    fn legacy_normalization_handles_extreme_totals() {
        let scale = LegacyRawScale { max_per_answer: 255 };
        assert_eq!(scale.normalize(u32::MAX, u32::MAX), Some(0));
        assert_eq!(scale.normalize(u32::MAX, 1), Some(100));
        assert_eq!(
            LegacyRawScale::default().normalize(u32::MAX / 2, u32::MAX / 8),
            Some(100)
        );
    }
}
