// Popularity ranking by average rating
use serde::{Deserialize, Serialize};

/// An item with its aggregated rating statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopularItem {
    #[serde(rename = "ItemName")]
    pub item_name: String,
    #[serde(rename = "Description", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "Price", default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(rename = "Category", default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "ImageURL", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub num_ratings: u64,
    pub avg_ratings: f64,
}

impl PopularItem {
    /// Price, or `0` when absent
    pub fn price_or_default(&self) -> f64 {
        self.price.unwrap_or(0.0)
    }
}

/// A category with its best-rated items
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryGroup {
    pub category: String,
    pub items: Vec<PopularItem>,
}

#[derive(Debug, Clone, Default)]
pub struct PopularityRanking {
    items: Vec<PopularItem>,
}

impl PopularityRanking {
    pub fn new(items: Vec<PopularItem>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[PopularItem] {
        &self.items
    }

    /// Top `limit` items by descending average rating, optionally restricted
    /// to one category. Ties keep table order.
    pub fn top(&self, limit: usize, category: Option<&str>) -> Vec<PopularItem> {
        let mut ranked: Vec<&PopularItem> = self
            .items
            .iter()
            .filter(|item| match category {
                Some(c) => item.category.as_deref() == Some(c),
                None => true,
            })
            .collect();
        ranked.sort_by(|a, b| b.avg_ratings.total_cmp(&a.avg_ratings));
        ranked.into_iter().take(limit).cloned().collect()
    }

    /// One group per category in `categories`, each holding up to
    /// `per_category` items. Categories with no items are left out.
    pub fn by_category<S: AsRef<str>>(&self, categories: &[S], per_category: usize) -> Vec<CategoryGroup> {
        categories
            .iter()
            .filter_map(|category| {
                let category = category.as_ref();
                let items = self.top(per_category, Some(category));
                if items.is_empty() {
                    None
                } else {
                    Some(CategoryGroup { category: category.to_string(), items })
                }
            })
            .collect()
    }
}

impl From<Vec<PopularItem>> for PopularityRanking {
    fn from(items: Vec<PopularItem>) -> Self {
        Self::new(items)
    }
}
