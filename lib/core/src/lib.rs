//! # MenuRec Core
//!
//! Core library for the MenuRec item recommender.
//!
//! This crate provides the data model and the lookup algorithms:
//!
//! - [`ItemIndex`] - Ordered item keys defining matrix positions
//! - [`SimilarityMatrix`] - Precomputed dense item-item similarity scores
//! - [`MenuTable`] - Display metadata for each item
//! - [`SimilarityLookup`] - Top-N most similar items for a query item
//! - [`PopularityRanking`] - Best-rated items, overall or per category
//! - [`Catalog`] - All of the above, loaded once and shared
//!
//! ## Example
//!
//! ```rust
//! use menurec_core::{ItemIndex, MenuRecord, MenuTable, SimilarityMatrix, recommend};
//!
//! let index = ItemIndex::new(vec![
//!     "Pizza".to_string(),
//!     "Pasta".to_string(),
//!     "Burger".to_string(),
//!     "Fries".to_string(),
//! ]).unwrap();
//! let matrix = SimilarityMatrix::from_rows(vec![
//!     vec![1.0, 0.9, 0.2, 0.1],
//!     vec![0.9, 1.0, 0.3, 0.2],
//!     vec![0.2, 0.3, 1.0, 0.8],
//!     vec![0.1, 0.2, 0.8, 1.0],
//! ]).unwrap();
//! let menu = MenuTable::new(vec![
//!     MenuRecord::new("Pasta").with_price(8.5),
//!     MenuRecord::new("Burger").with_category("Lunch"),
//! ]);
//!
//! let results = recommend("Pizza", &index, &matrix, &menu, 2).unwrap();
//! assert_eq!(results[0].item_name, "Pasta");
//! assert_eq!(results[1].item_name, "Burger");
//! assert_eq!(results[1].description, "N/A");
//! ```

pub mod catalog;
pub mod error;
pub mod item;
pub mod matrix;
pub mod menu;
pub mod popular;
pub mod recommend;

pub use catalog::{Catalog, RecommenderConfig, DEFAULT_CATEGORIES};
pub use error::{Error, Result};
pub use item::ItemIndex;
pub use matrix::SimilarityMatrix;
pub use menu::{MenuRecord, MenuTable, NOT_AVAILABLE};
pub use popular::{CategoryGroup, PopularItem, PopularityRanking};
pub use recommend::{recommend, Recommendation, SelfExclusion, SimilarityLookup, DEFAULT_COUNT};
