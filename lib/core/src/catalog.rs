use serde::{Deserialize, Serialize};
use crate::{
    CategoryGroup, Error, ItemIndex, MenuRecord, MenuTable, PopularItem, PopularityRanking,
    Recommendation, Result, SelfExclusion, SimilarityLookup, SimilarityMatrix,
};

/// Categories shown when browsing, in display order
pub const DEFAULT_CATEGORIES: [&str; 6] = [
    "Appetizers",
    "Breakfast",
    "Lunch",
    "Dinner",
    "Desserts",
    "Beverages",
];

/// Configuration for serving recommendations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommenderConfig {
    pub default_count: usize,
    pub self_exclusion: SelfExclusion,
    pub popular_limit: usize,
    pub category_limit: usize,
    pub categories: Vec<String>,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            default_count: crate::recommend::DEFAULT_COUNT,
            self_exclusion: SelfExclusion::DropHead,
            popular_limit: 12,
            category_limit: 6,
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// All precomputed recommendation data, loaded once and shared read-only
#[derive(Debug, Clone)]
pub struct Catalog {
    index: ItemIndex,
    matrix: SimilarityMatrix,
    menu: MenuTable,
    popular: PopularityRanking,
    config: RecommenderConfig,
}

impl Catalog {
    /// Assemble a catalog, checking that the matrix is aligned with the index
    pub fn new(
        index: ItemIndex,
        matrix: SimilarityMatrix,
        menu: MenuTable,
        popular: PopularityRanking,
    ) -> Result<Self> {
        if index.len() != matrix.dim() {
            return Err(Error::DimensionMismatch {
                index: index.len(),
                matrix: matrix.dim(),
            });
        }
        Ok(Self {
            index,
            matrix,
            menu,
            popular,
            config: RecommenderConfig::default(),
        })
    }

    #[must_use]
    pub fn with_config(mut self, config: RecommenderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    pub fn index(&self) -> &ItemIndex {
        &self.index
    }

    pub fn matrix(&self) -> &SimilarityMatrix {
        &self.matrix
    }

    pub fn menu(&self) -> &MenuTable {
        &self.menu
    }

    pub fn popular(&self) -> &PopularityRanking {
        &self.popular
    }

    /// Number of items that can be queried
    pub fn item_count(&self) -> usize {
        self.index.len()
    }

    /// Lookup view using the configured self-exclusion policy
    pub fn lookup(&self) -> SimilarityLookup<'_> {
        SimilarityLookup::new(&self.index, &self.matrix, &self.menu)
            .with_self_exclusion(self.config.self_exclusion)
    }

    /// Recommendations for `item_key`; `count` falls back to the configured default
    pub fn recommend(&self, item_key: &str, count: Option<usize>) -> Result<Vec<Recommendation>> {
        self.lookup()
            .recommend(item_key, count.unwrap_or(self.config.default_count))
    }

    pub fn recommend_or_empty(&self, item_key: &str, count: Option<usize>) -> Vec<Recommendation> {
        self.lookup()
            .recommend_or_empty(item_key, count.unwrap_or(self.config.default_count))
    }

    pub fn top_popular(&self, limit: Option<usize>, category: Option<&str>) -> Vec<PopularItem> {
        self.popular
            .top(limit.unwrap_or(self.config.popular_limit), category)
    }

    pub fn browse_by_category(&self) -> Vec<CategoryGroup> {
        self.popular
            .by_category(&self.config.categories, self.config.category_limit)
    }

    pub fn menu_record(&self, item_key: &str) -> Option<&MenuRecord> {
        self.menu.first(item_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        let index = ItemIndex::new(vec!["Tea".into(), "Coffee".into(), "Cake".into()]).unwrap();
        let matrix = SimilarityMatrix::from_rows(vec![
            vec![1.0, 0.7, 0.1],
            vec![0.7, 1.0, 0.3],
            vec![0.1, 0.3, 1.0],
        ]).unwrap();
        let menu = MenuTable::new(vec![
            MenuRecord::new("Tea").with_category("Beverages"),
            MenuRecord::new("Coffee").with_category("Beverages"),
            MenuRecord::new("Cake").with_category("Desserts"),
        ]);
        let popular = PopularityRanking::new(vec![PopularItem {
            item_name: "Cake".into(),
            description: None,
            price: Some(4.0),
            category: Some("Desserts".into()),
            image_url: None,
            num_ratings: 3,
            avg_ratings: 5.0,
        }]);
        Catalog::new(index, matrix, menu, popular).unwrap()
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let index = ItemIndex::new(vec!["a".into(), "b".into()]).unwrap();
        let matrix = SimilarityMatrix::from_rows(vec![vec![1.0]]).unwrap();
        let err = Catalog::new(index, matrix, MenuTable::default(), PopularityRanking::default()).unwrap_err();
        assert!(matches!(err, Error::DimensionMismatch { index: 2, matrix: 1 }));
    }

    #[test]
    fn test_default_count_applies() {
        let catalog = catalog();
        let results = catalog.recommend("Tea", None).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].item_name, "Coffee");
        assert_eq!(catalog.recommend("Tea", Some(1)).unwrap().len(), 1);
    }

    #[test]
    fn test_fail_soft_for_unknown_item() {
        let catalog = catalog();
        assert!(catalog.recommend("Juice", None).is_err());
        assert!(catalog.recommend_or_empty("Juice", None).is_empty());
    }

    #[test]
    fn test_configured_policy_used() {
        let config = RecommenderConfig {
            self_exclusion: SelfExclusion::SkipQuery,
            ..RecommenderConfig::default()
        };
        let catalog = catalog().with_config(config);
        assert_eq!(catalog.lookup().self_exclusion(), SelfExclusion::SkipQuery);
    }

    #[test]
    fn test_browse_by_category() {
        let groups = catalog().browse_by_category();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].category, "Desserts");
        assert_eq!(catalog().top_popular(None, None).len(), 1);
    }
}
