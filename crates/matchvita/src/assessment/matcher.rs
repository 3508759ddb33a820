use std::collections::{BTreeMap, HashSet};

use super::catalog::{CatalogItem, ProductCatalog, RecommendationRuleTable};
use super::domain::{Category, HealthLevel, Recommendation, RecommendationTrigger};

/// Decides whether a rule pattern selects a catalog item.
///
/// Kept separate from the matcher so the policy can change without touching
/// deduplication or ordering.
pub trait TagMatchPolicy: Send + Sync {
    fn matches(&self, item: &CatalogItem, pattern: &str) -> bool;
}

/// Case-insensitive substring match against the item name or any tag.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringMatch;

impl TagMatchPolicy for SubstringMatch {
    fn matches(&self, item: &CatalogItem, pattern: &str) -> bool {
        let needle = pattern.to_lowercase();
        item.name.to_lowercase().contains(&needle)
            || item
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(&needle))
    }
}

/// Exact, case-insensitive equality against the item name or a tag.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactTagMatch;

impl TagMatchPolicy for ExactTagMatch {
    fn matches(&self, item: &CatalogItem, pattern: &str) -> bool {
        item.name.eq_ignore_ascii_case(pattern)
            || item.tags.iter().any(|tag| tag.eq_ignore_ascii_case(pattern))
    }
}

/// A catalog item picked by the matcher.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedItem<'a> {
    pub item: &'a CatalogItem,
    pub trigger: Option<RecommendationTrigger>,
}

impl MatchedItem<'_> {
    pub fn to_recommendation(&self) -> Recommendation {
        Recommendation {
            item_id: self.item.id.clone(),
            name: self.item.name.clone(),
            kind: self.item.kind,
            rating: self.item.rating,
            trigger: self.trigger,
        }
    }
}

/// Selects catalog items for every category at level 3 or 4.
///
/// Level-4 categories are visited before level-3 ones, so an item shared by both
/// is attributed to the more urgent trigger; later matches of an already selected
/// item are skipped. The result is ordered by triggering level, then rating, then
/// selection order. When nothing is selected, either because no category needs
/// support or because no rule pattern matched the catalog, the `fallback_limit`
/// top-rated items are returned instead.
pub fn match_recommendations<'a>(
    levels: &BTreeMap<Category, HealthLevel>,
    catalog: &'a ProductCatalog,
    rules: &RecommendationRuleTable,
    policy: &dyn TagMatchPolicy,
    fallback_limit: usize,
) -> Vec<MatchedItem<'a>> {
    let mut triggers: Vec<RecommendationTrigger> = levels
        .iter()
        .filter(|(_, level)| level.needs_support())
        .map(|(category, level)| RecommendationTrigger {
            category: *category,
            level: *level,
        })
        .collect();

    triggers.sort_by(|a, b| b.level.cmp(&a.level).then(a.category.cmp(&b.category)));

    let mut selected = Vec::new();
    let mut seen = HashSet::new();
    for trigger in triggers {
        for pattern in rules.patterns(trigger.category, trigger.level) {
            for item in catalog.items() {
                if policy.matches(item, pattern) && seen.insert(item.id.as_str()) {
                    selected.push(MatchedItem {
                        item,
                        trigger: Some(trigger),
                    });
                }
            }
        }
    }

    if selected.is_empty() {
        return top_rated(catalog, fallback_limit);
    }

    selected.sort_by(|a, b| {
        trigger_level(b)
            .cmp(&trigger_level(a))
            .then(b.item.rating.total_cmp(&a.item.rating))
    });
    selected
}

fn top_rated(catalog: &ProductCatalog, limit: usize) -> Vec<MatchedItem<'_>> {
    catalog
        .top_rated(limit)
        .into_iter()
        .map(|item| MatchedItem {
            item,
            trigger: None,
        })
        .collect()
}

fn trigger_level(matched: &MatchedItem<'_>) -> Option<HealthLevel> {
    matched.trigger.map(|trigger| trigger.level)
}
