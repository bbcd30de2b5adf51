//! Vector Similarity Functions
//!
//! Cosine similarity from dot products and cached norms, one pair or a whole
//! matrix at a time.

use ndarray::{Array1, ArrayView1, ArrayView2, Zip};

/// Cosine from a dot product and the product of the two norms.
///
/// Defined as 0 when either vector has zero norm.
#[inline]
pub fn cosine_from_dot(dot: f32, norms: f32) -> f32 {
    if norms > 0.0 {
        dot / norms
    } else {
        0.0
    }
}

/// Cosine similarity of `query` against every row of `rows` in one pass.
///
/// `norms[i]` must hold the Euclidean norm of row `i`. Rows or queries with
/// zero norm score 0.
pub fn batch_cosine_similarity(
    rows: ArrayView2<'_, f32>,
    norms: ArrayView1<'_, f32>,
    query: ArrayView1<'_, f32>,
) -> Array1<f32> {
    debug_assert_eq!(rows.ncols(), query.len(), "Vector dimensions must match");
    debug_assert_eq!(rows.nrows(), norms.len(), "One norm per row");

    let query_norm = query.dot(&query).sqrt();
    let dots = rows.dot(&query);

    Zip::from(&dots)
        .and(&norms)
        .map_collect(|&dot, &norm| cosine_from_dot(dot, norm * query_norm))
}
