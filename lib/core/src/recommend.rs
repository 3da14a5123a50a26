//! Similarity-based recommendation lookup
//!
//! Given an item key, ranks every other item by its precomputed similarity
//! to the query and joins the top neighbours against the menu table.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use crate::menu::MenuRecord;
use crate::{Error, ItemIndex, MenuTable, Result, SimilarityMatrix};

/// Number of neighbours returned when the caller does not ask for a count
pub const DEFAULT_COUNT: usize = 5;

/// How the query item is removed from its own ranking
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelfExclusion {
    /// Drop the top-ranked entry, whatever it is. Correct only while the
    /// diagonal is strictly the row maximum; if another item ties or beats
    /// self-similarity, that item is dropped and the query can appear.
    #[default]
    DropHead,
    /// Remove the query's own position from the ranking
    SkipQuery,
}

impl std::str::FromStr for SelfExclusion {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "drop-head" | "drop_head" => Ok(SelfExclusion::DropHead),
            "skip-query" | "skip_query" => Ok(SelfExclusion::SkipQuery),
            other => Err(format!("unknown self-exclusion policy: {}", other)),
        }
    }
}

/// A recommended item with its display metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Recommendation {
    pub item_name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    #[serde(rename = "ImageURL", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub similarity_score: f64,
}

impl Recommendation {
    fn from_record(record: &MenuRecord, item_name: &str, score: f64) -> Self {
        Self {
            item_name: item_name.to_string(),
            description: record.description_or_default().to_string(),
            price: record.price_or_default(),
            category: record.category_or_default().to_string(),
            image_url: record.image_url.clone(),
            similarity_score: score,
        }
    }
}

/// Read-only view over the three lookup inputs.
///
/// Cheap to construct; holds borrows only. Any number of lookups may run
/// against the same inputs concurrently.
#[derive(Debug, Clone, Copy)]
pub struct SimilarityLookup<'a> {
    index: &'a ItemIndex,
    matrix: &'a SimilarityMatrix,
    menu: &'a MenuTable,
    self_exclusion: SelfExclusion,
}

impl<'a> SimilarityLookup<'a> {
    pub fn new(index: &'a ItemIndex, matrix: &'a SimilarityMatrix, menu: &'a MenuTable) -> Self {
        Self {
            index,
            matrix,
            menu,
            self_exclusion: SelfExclusion::default(),
        }
    }

    #[must_use]
    pub fn with_self_exclusion(mut self, self_exclusion: SelfExclusion) -> Self {
        self.self_exclusion = self_exclusion;
        self
    }

    pub fn self_exclusion(&self) -> SelfExclusion {
        self.self_exclusion
    }

    /// Top `count` neighbours of `item_key`, most similar first.
    ///
    /// Fails with [`Error::ItemNotFound`] when the key is not in the index
    /// and [`Error::InvalidCount`] when `count` is zero. Neighbours without
    /// a menu record are skipped, so the result can be shorter than `count`.
    pub fn recommend(&self, item_key: &str, count: usize) -> Result<Vec<Recommendation>> {
        if count == 0 {
            return Err(Error::InvalidCount(count));
        }

        let position = self
            .index
            .position(item_key)
            .ok_or_else(|| Error::ItemNotFound(item_key.to_string()))?;

        let neighbours = self.ranked_neighbours(position)?;

        let mut results = Vec::with_capacity(count);
        for (j, score) in neighbours.into_iter().take(count) {
            // index and matrix dimensions are checked when the catalog is built
            let Some(key) = self.index.key(j) else {
                return Err(Error::DimensionMismatch {
                    index: self.index.len(),
                    matrix: self.matrix.dim(),
                });
            };
            match self.menu.lookup(key) {
                Ok(record) => results.push(Recommendation::from_record(record, key, score)),
                Err(Error::MissingMetadata(missing)) => {
                    debug!(item = %item_key, neighbour = %missing, "skipping neighbour without menu metadata");
                }
                Err(e) => return Err(e),
            }
        }

        Ok(results)
    }

    /// Fail-soft variant of [`SimilarityLookup::recommend`]: any error is
    /// logged and turned into an empty result.
    pub fn recommend_or_empty(&self, item_key: &str, count: usize) -> Vec<Recommendation> {
        match self.recommend(item_key, count) {
            Ok(results) => results,
            Err(e) => {
                warn!(item = %item_key, error = %e, "recommendation lookup failed");
                Vec::new()
            }
        }
    }

    /// Every position except the query's, ordered by descending score.
    /// Ties keep index order.
    fn ranked_neighbours(&self, position: usize) -> Result<Vec<(usize, f64)>> {
        let row = self.matrix.row(position).ok_or(Error::DimensionMismatch {
            index: self.index.len(),
            matrix: self.matrix.dim(),
        })?;

        let mut ranked: Vec<(usize, f64)> = row.iter().copied().enumerate().collect();
        // sort_by is stable
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        match self.self_exclusion {
            SelfExclusion::DropHead => {
                if !ranked.is_empty() {
                    ranked.remove(0);
                }
            }
            SelfExclusion::SkipQuery => ranked.retain(|&(j, _)| j != position),
        }

        Ok(ranked)
    }
}

/// Top `count` neighbours of `item_key` using the default self-exclusion
/// policy. See [`SimilarityLookup::recommend`].
pub fn recommend(
    item_key: &str,
    index: &ItemIndex,
    matrix: &SimilarityMatrix,
    menu: &MenuTable,
    count: usize,
) -> Result<Vec<Recommendation>> {
    SimilarityLookup::new(index, matrix, menu).recommend(item_key, count)
}
