use serde::{Deserialize, Serialize};
use crate::{Error, Result};

/// Dense N×N item-item similarity matrix, stored row-major.
///
/// Cell `(i, j)` is the similarity between the items at positions `i` and
/// `j` of the accompanying [`crate::ItemIndex`]. Self-similarity sits on the
/// diagonal and is usually the row maximum, but nothing here enforces that.
/// Scores keep the double precision they are exported with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct SimilarityMatrix {
    dim: usize,
    data: Vec<f64>,
}

impl SimilarityMatrix {
    /// Build from row vectors. Every row must have as many columns as there
    /// are rows, and every score must be finite.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let dim = rows.len();
        let mut data = Vec::with_capacity(dim * dim);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != dim {
                return Err(Error::NotSquare { row, expected: dim, actual: values.len() });
            }
            data.extend(values);
        }
        Self::validated(dim, data)
    }

    /// Build from a flat row-major buffer of `dim * dim` scores
    pub fn from_flat(dim: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != dim * dim {
            let row = if dim == 0 { 0 } else { data.len() / dim };
            return Err(Error::NotSquare { row, expected: dim, actual: data.len() % dim.max(1) });
        }
        Self::validated(dim, data)
    }

    fn validated(dim: usize, data: Vec<f64>) -> Result<Self> {
        if let Some(pos) = data.iter().position(|v| !v.is_finite()) {
            return Err(Error::NonFiniteScore { row: pos / dim, col: pos % dim });
        }
        Ok(Self { dim, data })
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dim == 0
    }

    /// Similarity scores between the item at `position` and every item,
    /// itself included
    #[inline]
    pub fn row(&self, position: usize) -> Option<&[f64]> {
        if position >= self.dim {
            return None;
        }
        let start = position * self.dim;
        Some(&self.data[start..start + self.dim])
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.row(row).and_then(|r| r.get(col).copied())
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks_exact panics on a zero chunk size
        self.data.chunks_exact(self.dim.max(1))
    }
}

impl TryFrom<Vec<Vec<f64>>> for SimilarityMatrix {
    type Error = Error;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self> {
        Self::from_rows(rows)
    }
}

impl From<SimilarityMatrix> for Vec<Vec<f64>> {
    fn from(matrix: SimilarityMatrix) -> Self {
        matrix.rows().map(<[f64]>::to_vec).collect()
    }
}
