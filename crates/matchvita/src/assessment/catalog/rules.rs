use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Serialize;

use super::ConfigurationError;
use crate::assessment::domain::{Category, HealthLevel};

/// Wire shape of the rule table: `{category: {"3": [..], "4": [..]}}`.
type RawRuleTable = BTreeMap<Category, BTreeMap<u8, Vec<String>>>;

/// Static lookup from (category, level) to catalog name/tag patterns.
///
/// Only levels 3 and 4 carry rules.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RecommendationRuleTable {
    rules: BTreeMap<Category, BTreeMap<HealthLevel, Vec<String>>>,
}

impl RecommendationRuleTable {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ConfigurationError> {
        let raw: RawRuleTable = serde_json::from_reader(reader)?;
        Self::from_raw(raw)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ConfigurationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }

    fn from_raw(raw: RawRuleTable) -> Result<Self, ConfigurationError> {
        let mut table = Self::default();
        for (category, levels) in raw {
            for (level, patterns) in levels {
                let level = HealthLevel::try_from(level)
                    .ok()
                    .filter(|level| level.needs_support())
                    .ok_or(ConfigurationError::NonTriggeringRuleLevel { category, level })?;
                table = table.with_rule(category, level, patterns)?;
            }
        }
        Ok(table)
    }

    /// Adds or replaces the patterns for one (category, level) key.
    pub fn with_rule<I, S>(
        mut self,
        category: Category,
        level: HealthLevel,
        patterns: I,
    ) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if !level.needs_support() {
            return Err(ConfigurationError::NonTriggeringRuleLevel {
                category,
                level: level.number(),
            });
        }

        let patterns = patterns
            .into_iter()
            .map(|pattern| {
                let pattern: String = pattern.into();
                pattern.trim().to_string()
            })
            .collect::<Vec<_>>();
        if patterns.iter().any(String::is_empty) {
            return Err(ConfigurationError::EmptyRulePattern { category, level });
        }

        self.rules
            .entry(category)
            .or_default()
            .insert(level, patterns);
        Ok(self)
    }

    /// The built-in matching rules.
    pub fn standard() -> Self {
        let mut rules = BTreeMap::new();
        for (category, attention, improvement) in STANDARD_RULES {
            let mut levels = BTreeMap::new();
            levels.insert(HealthLevel::NeedsAttention, owned_patterns(attention));
            levels.insert(HealthLevel::NeedsImprovement, owned_patterns(improvement));
            rules.insert(category, levels);
        }
        Self { rules }
    }

    /// Patterns for the exact (category, level) key; empty when there is no rule.
    pub fn patterns(&self, category: Category, level: HealthLevel) -> &[String] {
        self.rules
            .get(&category)
            .and_then(|levels| levels.get(&level))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.rules.values().all(BTreeMap::is_empty)
    }
}

fn owned_patterns(patterns: &[&str]) -> Vec<String> {
    patterns.iter().map(|pattern| (*pattern).to_string()).collect()
}

const STANDARD_RULES: [(Category, &[&str], &[&str]); 6] = [
    (
        Category::Energy,
        &["B-Complex", "Vitamin C"],
        &["B-Complex", "CoQ10", "Iron"],
    ),
    (
        Category::Joints,
        &["Fish Oil", "Omega-3", "Glucosamine"],
        &["Glucosamine", "Chondroitin", "Calcium", "Vitamin D3"],
    ),
    (
        Category::Brain,
        &["Omega-3", "B12", "Ginkgo Biloba"],
        &["Phosphatidylserine", "Lions Mane", "L-Tyrosine"],
    ),
    (
        Category::Skin,
        &["Vitamin C", "Collagen", "Hyaluronic Acid"],
        &["Vitamin E", "Astaxanthin", "Zinc"],
    ),
    (
        Category::Sleep,
        &["Magnesium", "L-Theanine"],
        &["Melatonin", "Ashwagandha"],
    ),
    (
        Category::Immune,
        &["Vitamin C", "Zinc", "Quercetin"],
        &["Vitamin D3", "Elderberry", "Beta-Glucan"],
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_covers_levels_three_and_four() {
        let table = RecommendationRuleTable::standard();
        for category in Category::ALL {
            assert!(!table
                .patterns(category, HealthLevel::NeedsAttention)
                .is_empty());
            assert!(!table
                .patterns(category, HealthLevel::NeedsImprovement)
                .is_empty());
            assert!(table.patterns(category, HealthLevel::Good).is_empty());
        }
    }

    #[test]
    fn parses_json_rule_table() {
        let json = r#"{ "sleep": { "3": ["Magnesium"], "4": ["Melatonin", " Ashwagandha "] } }"#;
        let table = RecommendationRuleTable::from_reader(json.as_bytes()).expect("rules parse");

        assert_eq!(
            table.patterns(Category::Sleep, HealthLevel::NeedsImprovement),
            ["Melatonin".to_string(), "Ashwagandha".to_string()]
        );
        assert!(table
            .patterns(Category::Energy, HealthLevel::NeedsImprovement)
            .is_empty());
    }

    #[test]
    fn rejects_unknown_category() {
        let json = r#"{ "heart": { "3": ["CoQ10"] } }"#;
        assert!(matches!(
            RecommendationRuleTable::from_reader(json.as_bytes()),
            Err(ConfigurationError::Rules(_))
        ));
    }

    #[test]
    fn rejects_rules_for_healthy_levels() {
        let json = r#"{ "energy": { "2": ["B-Complex"] } }"#;
        match RecommendationRuleTable::from_reader(json.as_bytes()) {
            Err(ConfigurationError::NonTriggeringRuleLevel { category, level }) => {
                assert_eq!(category, Category::Energy);
                assert_eq!(level, 2);
            }
            other => panic!("expected level error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_blank_patterns() {
        let result = RecommendationRuleTable::default().with_rule(
            Category::Skin,
            HealthLevel::NeedsAttention,
            ["Collagen", "  "],
        );
        assert!(matches!(
            result,
            Err(ConfigurationError::EmptyRulePattern { .. })
        ));
    }
}
