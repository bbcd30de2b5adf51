//! Lexicon
//!
//! A vocabulary and its embedding matrix, loaded together from one file and
//! queried for nearest neighbours.

mod loader;
mod query;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use ndarray::ArrayView1;
use tracing::{debug, info};

use crate::config::LexiconConfig;
use crate::error::{LexiconError, Result};
use crate::vector::EmbeddingMatrix;
use crate::vocabulary::Vocabulary;

/// Word embeddings with similarity lookup.
///
/// ```no_run
/// use findsim::Lexicon;
///
/// let lexicon = Lexicon::load("words-10.txt")?;
/// let words = lexicon.find_similar("bagpipe", None, None)?;
/// println!("{}", findsim::format_for_printing(&words));
/// # Ok::<(), findsim::LexiconError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Lexicon {
    vocabulary: Vocabulary,
    matrix: EmbeddingMatrix,
    config: LexiconConfig,
}

impl Lexicon {
    /// Load an embeddings file with the default configuration
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::load_with_config(path, LexiconConfig::default())
    }

    /// Load an embeddings file
    pub fn load_with_config<P: AsRef<Path>>(path: P, config: LexiconConfig) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading embeddings");
        let started = Instant::now();

        let file = File::open(path)?;
        let size = file.metadata()?.len();
        let lexicon = loader::read_lexicon(BufReader::new(file), Some(size), config)?;

        info!(
            words = lexicon.len(),
            dimension = lexicon.dimension(),
            elapsed = ?started.elapsed(),
            "Loaded lexicon"
        );
        Ok(lexicon)
    }

    /// Load from any buffered reader
    pub fn from_reader<R: BufRead>(reader: R, config: LexiconConfig) -> Result<Self> {
        loader::read_lexicon(reader, None, config)
    }

    pub(crate) fn from_parts(
        vocabulary: Vocabulary,
        matrix: EmbeddingMatrix,
        config: LexiconConfig,
    ) -> Self {
        debug_assert_eq!(vocabulary.len(), matrix.len());
        Self {
            vocabulary,
            matrix,
            config,
        }
    }

    /// Number of words
    pub fn len(&self) -> usize {
        self.vocabulary.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }

    /// Embedding dimension
    pub fn dimension(&self) -> usize {
        self.matrix.dimension()
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn config(&self) -> &LexiconConfig {
        &self.config
    }

    /// Check if the word is known
    pub fn contains(&self, word: &str) -> bool {
        self.vocabulary.contains(word)
    }

    /// Embedding of a word
    pub fn vector(&self, word: &str) -> Result<ArrayView1<'_, f32>> {
        let index = self.vocabulary.index_of(word)?;
        Ok(self.matrix.row(index))
    }

    /// Cosine similarity between two known words
    pub fn similarity(&self, a: &str, b: &str) -> Result<f32> {
        let a = self.vocabulary.index_of(a)?;
        let b = self.vocabulary.index_of(b)?;
        self.matrix
            .similarity(a, b)
            .ok_or(LexiconError::OutOfRange {
                index: a.max(b),
                len: self.matrix.len(),
            })
    }
}

/// Render a result list the way the CLI prints it
pub fn format_for_printing(words: &[&str]) -> String {
    words.join(" ")
}
