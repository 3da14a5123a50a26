use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use crate::{Error, Result};

/// Placeholder shown for missing description and category values
pub const NOT_AVAILABLE: &str = "N/A";

/// One row of the menu table.
///
/// Only the name is mandatory; the other columns are frequently absent in
/// source data. Field names follow the source columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuRecord {
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
}

impl MenuRecord {
    #[must_use]
    pub fn new(item_name: impl Into<String>) -> Self {
        Self {
            item_name: item_name.into(),
            description: None,
            price: None,
            category: None,
            image_url: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Description, or `"N/A"` when absent
    pub fn description_or_default(&self) -> &str {
        self.description.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    /// Price, or `0` when absent
    pub fn price_or_default(&self) -> f64 {
        self.price.unwrap_or(0.0)
    }

    /// Category, or `"N/A"` when absent
    pub fn category_or_default(&self) -> &str {
        self.category.as_deref().unwrap_or(NOT_AVAILABLE)
    }
}

/// Item metadata keyed by item name.
///
/// A key may map to several records (the source data has duplicate rows);
/// lookups resolve to the first one in source order.
#[derive(Debug, Clone, Default)]
pub struct MenuTable {
    records: Vec<MenuRecord>,
    // item name -> positions in `records`, ascending
    by_name: AHashMap<String, Vec<usize>>,
}

impl MenuTable {
    pub fn new(records: Vec<MenuRecord>) -> Self {
        let mut by_name: AHashMap<String, Vec<usize>> = AHashMap::new();
        for (i, record) in records.iter().enumerate() {
            by_name.entry(record.item_name.clone()).or_default().push(i);
        }
        Self { records, by_name }
    }

    /// Number of rows, duplicates included
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of distinct item names
    pub fn distinct_items(&self) -> usize {
        self.by_name.len()
    }

    /// All records for `key`, in source order
    pub fn records_for<'a>(&'a self, key: &str) -> impl Iterator<Item = &'a MenuRecord> + 'a {
        self.by_name
            .get(key)
            .map(|positions| positions.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(move |&i| &self.records[i])
    }

    /// First record for `key`
    pub fn first(&self, key: &str) -> Option<&MenuRecord> {
        self.records_for(key).next()
    }

    /// Like [`MenuTable::first`], failing with [`Error::MissingMetadata`]
    pub fn lookup(&self, key: &str) -> Result<&MenuRecord> {
        self.first(key).ok_or_else(|| Error::MissingMetadata(key.to_string()))
    }

    pub fn records(&self) -> &[MenuRecord] {
        &self.records
    }
}

impl From<Vec<MenuRecord>> for MenuTable {
    fn from(records: Vec<MenuRecord>) -> Self {
        Self::new(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_record_wins() {
        let table = MenuTable::new(vec![
            MenuRecord::new("Pizza").with_price(9.5),
            MenuRecord::new("Pasta").with_price(8.0),
            MenuRecord::new("Pizza").with_price(11.0),
        ]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.distinct_items(), 2);
        assert_eq!(table.first("Pizza").unwrap().price, Some(9.5));
        assert_eq!(table.records_for("Pizza").count(), 2);
    }

    #[test]
    fn test_missing_key() {
        let table = MenuTable::new(vec![MenuRecord::new("Pizza")]);
        assert!(table.first("Sushi").is_none());
        assert_eq!(table.records_for("Sushi").count(), 0);
        assert!(matches!(table.lookup("Sushi"), Err(Error::MissingMetadata(_))));
    }

    #[test]
    fn test_defaults() {
        let bare = MenuRecord::new("Fries");
        assert_eq!(bare.description_or_default(), "N/A");
        assert_eq!(bare.price_or_default(), 0.0);
        assert_eq!(bare.category_or_default(), "N/A");

        let full = MenuRecord::new("Fries")
            .with_description("Crispy")
            .with_price(3.0)
            .with_category("Appetizers");
        assert_eq!(full.description_or_default(), "Crispy");
        assert_eq!(full.price_or_default(), 3.0);
        assert_eq!(full.category_or_default(), "Appetizers");
    }

    #[test]
    fn test_deserialize_source_columns() {
        let record: MenuRecord = serde_json::from_str(
            r#"{"ItemName": "Lassi", "Price": 60.0, "ImageURL": "http://img/lassi.png"}"#,
        ).unwrap();
        assert_eq!(record.item_name, "Lassi");
        assert_eq!(record.price, Some(60.0));
        assert!(record.description.is_none());
        assert_eq!(record.image_url.as_deref(), Some("http://img/lassi.png"));
    }
}
