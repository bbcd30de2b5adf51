//! Embedding Matrix
//!
//! Dense row-major storage for word vectors with cached row norms.

use ndarray::{Array1, Array2, ArrayView1, Axis, ShapeError};

use super::similarity::{batch_cosine_similarity, cosine_from_dot};

/// Immutable `rows × dimension` embedding table
#[derive(Debug, Clone)]
pub struct EmbeddingMatrix {
    rows: Array2<f32>,
    /// Euclidean norm of each row, computed once
    norms: Array1<f32>,
}

impl EmbeddingMatrix {
    /// Wrap a flat row-major buffer of `values.len() / dimension` rows.
    ///
    /// Takes ownership of the buffer without copying.
    pub fn from_flat(values: Vec<f32>, dimension: usize) -> Result<Self, ShapeError> {
        let count = if dimension == 0 { 0 } else { values.len() / dimension };
        let rows = Array2::from_shape_vec((count, dimension), values)?;
        Ok(Self::from_array(rows))
    }

    /// Wrap an existing matrix
    pub fn from_array(rows: Array2<f32>) -> Self {
        let norms = rows.map_axis(Axis(1), |row| row.dot(&row).sqrt());
        Self { rows, norms }
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.nrows()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.rows.nrows() == 0
    }

    /// Embedding dimension
    pub fn dimension(&self) -> usize {
        self.rows.ncols()
    }

    /// View of one row. Panics if `index` is out of bounds.
    pub(crate) fn row(&self, index: usize) -> ArrayView1<'_, f32> {
        self.rows.row(index)
    }

    /// Cached norm of one row. Panics if `index` is out of bounds.
    pub(crate) fn norm(&self, index: usize) -> f32 {
        self.norms[index]
    }

    /// Cosine similarity of two rows, `None` if either is out of bounds
    pub fn similarity(&self, a: usize, b: usize) -> Option<f32> {
        if a >= self.len() || b >= self.len() {
            return None;
        }
        let dot = self.row(a).dot(&self.row(b));
        Some(cosine_from_dot(dot, self.norm(a) * self.norm(b)))
    }

    /// Cosine similarity of `query` against every row
    pub fn similarities(&self, query: ArrayView1<'_, f32>) -> Array1<f32> {
        batch_cosine_similarity(self.rows.view(), self.norms.view(), query)
    }
}
