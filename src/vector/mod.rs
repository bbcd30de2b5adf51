//! Vector Module
//!
//! Dense embedding storage and similarity operations.

mod matrix;
mod similarity;

pub use matrix::EmbeddingMatrix;
pub use similarity::{batch_cosine_similarity, cosine_from_dot};
