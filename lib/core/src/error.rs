use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// A neighbour resolved to a key with no menu record. Non-fatal: the
    /// lookup drops that neighbour instead of failing the call.
    #[error("No menu metadata for item: {0}")]
    MissingMetadata(String),

    #[error("Invalid recommendation count: {0}")]
    InvalidCount(usize),

    #[error("Duplicate item in index: {0}")]
    DuplicateItem(String),

    #[error("Similarity matrix is not square: row {row} has {actual} columns, expected {expected}")]
    NotSquare { row: usize, expected: usize, actual: usize },

    #[error("Non-finite similarity score at ({row}, {col})")]
    NonFiniteScore { row: usize, col: usize },

    #[error("Dimension mismatch: index has {index} items, matrix has {matrix} rows")]
    DimensionMismatch { index: usize, matrix: usize },

    #[error("Storage error: {0}")]
    Storage(String),
}
