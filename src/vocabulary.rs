//! Vocabulary Index
//!
//! Bijection between words and the row indices of the embedding matrix.

use hashbrown::HashMap;

use crate::error::{LexiconError, Result};

/// Immutable word <-> index mapping
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    words: Vec<String>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    /// Build from distinct words, assigning indices in input order.
    ///
    /// Fails with `DuplicateWord` on the first repeated word.
    pub fn build<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words = words.into_iter();
        let mut builder = VocabularyBuilder::with_capacity(words.size_hint().0);
        for word in words {
            builder.insert(word.into())?;
        }
        Ok(builder.finish())
    }

    /// Row index of `word`
    pub fn index_of(&self, word: &str) -> Result<usize> {
        self.index
            .get(word)
            .copied()
            .ok_or_else(|| LexiconError::NotFound(word.to_string()))
    }

    /// Word stored at `index`
    pub fn word_at(&self, index: usize) -> Result<&str> {
        self.words
            .get(index)
            .map(String::as_str)
            .ok_or(LexiconError::OutOfRange {
                index,
                len: self.words.len(),
            })
    }

    /// Check if the word is known
    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    /// Number of words
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Words in index order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

/// Incremental construction used while streaming an embeddings file.
#[derive(Debug, Default)]
pub(crate) struct VocabularyBuilder {
    words: Vec<String>,
    index: HashMap<String, usize>,
    offered: usize,
}

impl VocabularyBuilder {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            words: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            offered: 0,
        }
    }

    /// Append a word, returning its index.
    ///
    /// A rejected duplicate still advances the entry position so that
    /// positions in errors line up with the input sequence.
    pub(crate) fn insert(&mut self, word: String) -> Result<usize> {
        let position = self.offered;
        self.offered += 1;
        if self.index.contains_key(&word) {
            return Err(LexiconError::DuplicateWord { word, position });
        }
        let id = self.words.len();
        self.index.insert(word.clone(), id);
        self.words.push(word);
        Ok(id)
    }

    pub(crate) fn finish(self) -> Vocabulary {
        Vocabulary {
            words: self.words,
            index: self.index,
        }
    }
}
