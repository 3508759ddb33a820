use serde::{Deserialize, Deserializer};
use std::io::Read;

use super::products::{CatalogItem, ItemKind};
use super::ConfigurationError;
use crate::assessment::domain::Category;

/// Header: `id,name,kind,category,health_categories,tags,rating,dosage`.
/// List columns are `;`-separated.
pub(super) fn parse_items<R: Read>(reader: R) -> Result<Vec<CatalogItem>, ConfigurationError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut items = Vec::new();

    for record in csv_reader.deserialize::<CatalogRow>() {
        let row = record?;
        items.push(row.into_item()?);
    }

    Ok(items)
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    id: String,
    name: String,
    kind: String,
    category: String,
    #[serde(default)]
    health_categories: String,
    #[serde(default)]
    tags: String,
    rating: f32,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    dosage: Option<String>,
}

impl CatalogRow {
    fn into_item(self) -> Result<CatalogItem, ConfigurationError> {
        let kind = match self.kind.to_ascii_lowercase().as_str() {
            "vitamin" | "supplement" => ItemKind::Vitamin,
            "food" => ItemKind::Food,
            _ => return Err(ConfigurationError::UnknownItemKind(self.kind)),
        };

        let category = parse_category(&self.category)?;
        let mut health_categories = split_list(&self.health_categories)
            .map(parse_category)
            .collect::<Result<Vec<_>, _>>()?;
        if !health_categories.contains(&category) {
            health_categories.insert(0, category);
        }

        Ok(CatalogItem {
            id: self.id,
            name: self.name,
            kind,
            category,
            health_categories,
            tags: split_list(&self.tags).map(str::to_string).collect(),
            rating: self.rating,
            dosage: self.dosage,
        })
    }
}

fn parse_category(raw: &str) -> Result<Category, ConfigurationError> {
    Category::from_key(raw).ok_or_else(|| ConfigurationError::UnknownCategory(raw.to_string()))
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(';')
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
