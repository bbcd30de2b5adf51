//! findsim - Word Embedding Similarity Lookup
//!
//! Loads a table of word embeddings and finds the words closest to a query
//! word, or to an analogy of the form `word - minus + plus`, by cosine
//! similarity.

pub mod config;
pub mod error;
pub mod lexicon;
pub mod vector;
pub mod vocabulary;

pub use config::{DuplicatePolicy, LexiconConfig, DEFAULT_TOP_K};
pub use error::{LexiconError, Result};
pub use lexicon::{format_for_printing, Lexicon};
pub use vector::EmbeddingMatrix;
pub use vocabulary::Vocabulary;
