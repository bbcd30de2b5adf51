//! Lexicon Configuration

/// Number of neighbours returned by a similarity query
pub const DEFAULT_TOP_K: usize = 10;

/// What to do when the embeddings file lists a word more than once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Fail the load with `DuplicateWord`
    #[default]
    Reject,
    /// Keep the first row for the word, skip later ones with a warning
    KeepFirst,
}

/// Lexicon configuration
#[derive(Debug, Clone)]
pub struct LexiconConfig {
    /// Maximum number of words returned by a query
    pub top_k: usize,

    /// Handling of repeated words while loading
    pub duplicates: DuplicatePolicy,
}

impl Default for LexiconConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            duplicates: DuplicatePolicy::Reject,
        }
    }
}

impl LexiconConfig {
    /// Set the number of words returned by a query
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Set the duplicate-word policy
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }
}
