//! Similarity Query
//!
//! Nearest neighbours of a word, or of `word - minus + plus`.

use ndarray::{Array1, ArrayView1};
use tracing::debug;

use super::Lexicon;
use crate::error::{LexiconError, Result};

impl Lexicon {
    /// Words most similar to `word`, best first.
    ///
    /// With `plus` and `minus` the query vector is `word - minus + plus`.
    /// The query word, and `plus`/`minus` when given, never appear in the
    /// result. At most `top_k` words are returned (10 by default).
    pub fn find_similar(
        &self,
        word: &str,
        plus: Option<&str>,
        minus: Option<&str>,
    ) -> Result<Vec<&str>> {
        let scored = self.find_similar_scored(word, plus, minus)?;
        Ok(scored.into_iter().map(|(word, _)| word).collect())
    }

    /// Same ranking as [`Lexicon::find_similar`], with cosine similarities
    pub fn find_similar_scored(
        &self,
        word: &str,
        plus: Option<&str>,
        minus: Option<&str>,
    ) -> Result<Vec<(&str, f32)>> {
        let analogy = match (plus, minus) {
            (Some(plus), Some(minus)) => Some((plus, minus)),
            (None, None) => None,
            _ => {
                return Err(LexiconError::InvalidArguments(
                    "must include both of `plus` and `minus` or neither".to_string(),
                ))
            }
        };
        debug!(word, ?plus, ?minus, "Finding similar words");

        let word_id = self.vocabulary.index_of(word)?;
        let mut excluded = vec![word_id];

        let query: Array1<f32> = match analogy {
            Some((plus, minus)) => {
                let plus_id = self.vocabulary.index_of(plus)?;
                let minus_id = self.vocabulary.index_of(minus)?;
                excluded.push(plus_id);
                excluded.push(minus_id);

                let mut query = &self.matrix.row(word_id) - &self.matrix.row(minus_id);
                query += &self.matrix.row(plus_id);
                query
            }
            None => self.matrix.row(word_id).to_owned(),
        };
        excluded.sort_unstable();
        excluded.dedup();

        let similarities = self.matrix.similarities(query.view());

        // Over-fetch so excluded words cannot push the result below top_k.
        let top_k = self.config.top_k;
        let candidates = top_candidates(similarities.view(), top_k + excluded.len());

        candidates
            .into_iter()
            .filter(|index| excluded.binary_search(index).is_err())
            .take(top_k)
            .map(|index| Ok((self.vocabulary.word_at(index)?, similarities[index])))
            .collect()
    }
}

/// Indices of the `take` highest scores, best first.
///
/// Equal scores are ordered by ascending index.
fn top_candidates(scores: ArrayView1<'_, f32>, take: usize) -> Vec<usize> {
    let rank = |&a: &usize, &b: &usize| {
        sort_key(scores[b])
            .total_cmp(&sort_key(scores[a]))
            .then(a.cmp(&b))
    };

    let mut order: Vec<usize> = (0..scores.len()).collect();
    if take < order.len() {
        order.select_nth_unstable_by(take, rank);
        order.truncate(take);
    }
    order.sort_unstable_by(rank);
    order
}

/// NaN ranks last; -0.0 ties with 0.0
#[inline]
fn sort_key(score: f32) -> f32 {
    if score.is_nan() {
        f32::NEG_INFINITY
    } else {
        score + 0.0
    }
}
