use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::csv_row::parse_items;
use super::ConfigurationError;
use crate::assessment::domain::Category;

const MAX_RATING: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Vitamin,
    Food,
}

impl ItemKind {
    pub const fn label(self) -> &'static str {
        match self {
            ItemKind::Vitamin => "vitamin",
            ItemKind::Food => "food",
        }
    }
}

/// A vitamin or food that can be recommended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: String,
    pub name: String,
    pub kind: ItemKind,
    /// Primary health tag.
    pub category: Category,
    pub health_categories: Vec<Category>,
    pub tags: Vec<String>,
    pub rating: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dosage: Option<String>,
}

impl CatalogItem {
    pub fn supports(&self, category: Category) -> bool {
        self.category == category || self.health_categories.contains(&category)
    }
}

/// Validated, ordered list of recommendable items.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ProductCatalog {
    items: Vec<CatalogItem>,
}

impl ProductCatalog {
    pub fn new(items: Vec<CatalogItem>) -> Result<Self, ConfigurationError> {
        let mut seen = HashSet::new();
        for item in &items {
            if item.id.trim().is_empty() {
                return Err(ConfigurationError::MissingItemField { field: "id" });
            }
            if item.name.trim().is_empty() {
                return Err(ConfigurationError::MissingItemField { field: "name" });
            }
            if !seen.insert(item.id.as_str()) {
                return Err(ConfigurationError::DuplicateCatalogItem(item.id.clone()));
            }
            if !item.rating.is_finite() || !(0.0..=MAX_RATING).contains(&item.rating) {
                return Err(ConfigurationError::InvalidRating {
                    item: item.id.clone(),
                    rating: item.rating,
                });
            }
        }

        Ok(Self { items })
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ConfigurationError> {
        Self::new(parse_items(reader)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ConfigurationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }

    /// Built-in catalog of supplements and everyday foods.
    pub fn standard() -> Self {
        let mut items: Vec<CatalogItem> = STANDARD_VITAMINS
            .iter()
            .map(|(id, name, category, tags, rating, dosage)| CatalogItem {
                id: (*id).to_string(),
                name: (*name).to_string(),
                kind: ItemKind::Vitamin,
                category: *category,
                health_categories: vec![*category],
                tags: tags.iter().map(|tag| (*tag).to_string()).collect(),
                rating: *rating,
                dosage: Some((*dosage).to_string()),
            })
            .collect();

        items.extend(STANDARD_FOODS.iter().map(
            |(id, name, categories, tags, rating, portion)| CatalogItem {
                id: (*id).to_string(),
                name: (*name).to_string(),
                kind: ItemKind::Food,
                category: categories[0],
                health_categories: categories.to_vec(),
                tags: tags.iter().map(|tag| (*tag).to_string()).collect(),
                rating: *rating,
                dosage: Some((*portion).to_string()),
            },
        ));

        Self { items }
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn of_kind(&self, kind: ItemKind) -> impl Iterator<Item = &CatalogItem> {
        self.items.iter().filter(move |item| item.kind == kind)
    }

    pub fn for_category(&self, category: Category) -> impl Iterator<Item = &CatalogItem> {
        self.items.iter().filter(move |item| item.supports(category))
    }

    /// Highest rated items first; equal ratings keep catalog order.
    pub fn top_rated(&self, limit: usize) -> Vec<&CatalogItem> {
        let mut ranked: Vec<&CatalogItem> = self.items.iter().collect();
        ranked.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        ranked.truncate(limit);
        ranked
    }

    /// Case-insensitive search over names and tags.
    pub fn search(&self, query: &str) -> Vec<&CatalogItem> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.items
            .iter()
            .filter(|item| {
                item.name.to_lowercase().contains(&needle)
                    || item
                        .tags
                        .iter()
                        .any(|tag| tag.to_lowercase().contains(&needle))
            })
            .collect()
    }
}

type VitaminRow = (
    &'static str,
    &'static str,
    Category,
    &'static [&'static str],
    f32,
    &'static str,
);

type FoodRow = (
    &'static str,
    &'static str,
    &'static [Category],
    &'static [&'static str],
    f32,
    &'static str,
);

const STANDARD_VITAMINS: [VitaminRow; 26] = [
    ("vit-b-complex", "B-Complex", Category::Energy, &["b vitamins", "b12", "energy"], 4.6, "1 capsule daily with breakfast"),
    ("vit-c", "Vitamin C 1000 mg", Category::Immune, &["vitamin c", "antioxidant", "immune"], 4.7, "1 tablet daily"),
    ("vit-coq10", "CoQ10", Category::Energy, &["coenzyme q10", "heart", "energy"], 4.5, "100 mg daily with a meal"),
    ("vit-iron", "Iron Bisglycinate", Category::Energy, &["iron", "anemia", "energy"], 4.3, "18 mg daily"),
    ("vit-fish-oil", "Fish Oil", Category::Joints, &["omega-3", "epa", "dha"], 4.6, "1000 mg twice daily"),
    ("vit-glucosamine", "Glucosamine Sulfate", Category::Joints, &["joint support", "cartilage"], 4.4, "1500 mg daily"),
    ("vit-chondroitin", "Chondroitin", Category::Joints, &["cartilage", "joint support"], 4.2, "800 mg daily"),
    ("vit-calcium", "Calcium Citrate", Category::Joints, &["calcium", "bone density"], 4.3, "500 mg twice daily"),
    ("vit-d3", "Vitamin D3", Category::Immune, &["vitamin d", "bone density", "immune"], 4.8, "2000 IU daily"),
    ("vit-b12", "Vitamin B12", Category::Brain, &["methylcobalamin", "memory"], 4.5, "1000 mcg daily"),
    ("vit-ginkgo", "Ginkgo Biloba", Category::Brain, &["circulation", "memory"], 4.1, "120 mg daily"),
    ("vit-ps", "Phosphatidylserine", Category::Brain, &["cognition", "memory"], 4.2, "100 mg three times daily"),
    ("vit-lions-mane", "Lions Mane Mushroom", Category::Brain, &["focus", "nerve growth"], 4.4, "500 mg twice daily"),
    ("vit-tyrosine", "L-Tyrosine", Category::Brain, &["focus", "dopamine"], 4.0, "500 mg before noon"),
    ("vit-omega3-dha", "Algae Omega-3 DHA", Category::Brain, &["omega-3", "dha", "vegan"], 4.3, "1 softgel daily"),
    ("vit-collagen", "Collagen Peptides", Category::Skin, &["collagen", "elasticity"], 4.6, "10 g daily in a drink"),
    ("vit-hyaluronic", "Hyaluronic Acid", Category::Skin, &["hydration", "elasticity"], 4.3, "120 mg daily"),
    ("vit-e", "Vitamin E", Category::Skin, &["vitamin e", "antioxidant"], 4.1, "15 mg daily"),
    ("vit-astaxanthin", "Astaxanthin", Category::Skin, &["antioxidant", "uv protection"], 4.4, "12 mg daily"),
    ("vit-zinc", "Zinc Picolinate", Category::Immune, &["zinc", "skin repair", "immune"], 4.5, "15 mg daily"),
    ("vit-magnesium", "Magnesium Glycinate", Category::Sleep, &["magnesium", "relaxation"], 4.7, "300 mg before bed"),
    ("vit-theanine", "L-Theanine", Category::Sleep, &["calm", "relaxation"], 4.4, "200 mg in the evening"),
    ("vit-melatonin", "Melatonin", Category::Sleep, &["sleep onset", "circadian"], 4.2, "1-3 mg before bed"),
    ("vit-ashwagandha", "Ashwagandha", Category::Sleep, &["adaptogen", "stress"], 4.3, "600 mg daily"),
    ("vit-quercetin", "Quercetin", Category::Immune, &["flavonoid", "antioxidant"], 4.0, "500 mg daily"),
    ("vit-elderberry", "Elderberry Extract", Category::Immune, &["sambucus", "immune"], 4.3, "1 tablespoon syrup daily"),
];

const STANDARD_FOODS: [FoodRow; 10] = [
    ("food-salmon", "Grilled Salmon", &[Category::Brain, Category::Joints, Category::Skin], &["omega-3", "protein", "vitamin d"], 4.8, "150 g fillet"),
    ("food-chicken-rice", "Grilled Chicken Breast with Brown Rice", &[Category::Energy, Category::Immune], &["protein", "b vitamins", "fiber"], 4.5, "1 plate"),
    ("food-tom-yum", "Tom Yum Goong", &[Category::Immune], &["lemongrass", "galangal", "vitamin c"], 4.6, "1 bowl"),
    ("food-spinach", "Stir-fried Spinach with Garlic", &[Category::Energy, Category::Joints], &["iron", "calcium", "fiber"], 4.2, "1 side dish"),
    ("food-oats", "Overnight Oats with Banana", &[Category::Sleep, Category::Energy], &["magnesium", "fiber", "tryptophan"], 4.4, "1 jar"),
    ("food-papaya-salad", "Som Tam Papaya Salad", &[Category::Skin, Category::Immune], &["vitamin c", "fiber", "beta-carotene"], 4.3, "1 plate"),
    ("food-tofu-soup", "Clear Tofu Soup", &[Category::Joints, Category::Sleep], &["calcium", "soy", "light"], 4.1, "1 bowl"),
    ("food-walnuts", "Walnuts", &[Category::Brain], &["omega-3", "polyphenols"], 4.5, "30 g handful"),
    ("food-mushroom-soup", "Shiitake Mushroom Soup", &[Category::Immune], &["beta-glucan", "vitamin d"], 4.2, "1 bowl"),
    ("food-pumpkin-seeds", "Roasted Pumpkin Seeds", &[Category::Sleep, Category::Immune], &["zinc", "magnesium"], 4.0, "30 g handful"),
];
