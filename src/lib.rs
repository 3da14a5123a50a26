//! # MenuRec
//!
//! Menu item recommendations from a precomputed item-item similarity matrix.
//!
//! Given a menu item, MenuRec returns the most similar items together with
//! their display metadata (description, price, category), and ranks items by
//! average rating for a "popular items" view.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! menurec --models-dir ./models --http-port 8080
//! curl http://localhost:8080/items/Pizza/recommendations?count=5
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use menurec::prelude::*;
//!
//! let models = ModelManager::from_dir("./models", RecommenderConfig::default()).unwrap();
//! let catalog = models.catalog();
//!
//! // Fail-soft: an unknown item gives an empty list
//! for rec in catalog.recommend_or_empty("Pizza", Some(5)) {
//!     println!("{} ({:.0}% match)", rec.item_name, rec.similarity_score * 100.0);
//! }
//! ```
//!
//! ## Crate Structure
//!
//! - `menurec-core` - Item index, similarity matrix, menu table, lookup and popularity ranking
//! - `menurec-storage` - Artifact loading (JSON / gzip), bundles, reloadable model manager
//! - `menurec-api` - REST API

// Re-export core types
pub use menurec_core::{
    recommend, Catalog, CategoryGroup, Error, ItemIndex, MenuRecord, MenuTable, PopularItem,
    PopularityRanking, Recommendation, RecommenderConfig, Result, SelfExclusion,
    SimilarityLookup, SimilarityMatrix,
};

// Re-export storage
pub use menurec_storage::{ArtifactStore, BundleManager, ModelManager, ModelSource};

// Re-export API
pub use menurec_api::RestApi;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        recommend, Catalog, Error, ItemIndex, MenuRecord, MenuTable, ModelManager, ModelSource,
        PopularItem, Recommendation, RecommenderConfig, Result, SelfExclusion, SimilarityLookup,
        SimilarityMatrix,
    };
}
