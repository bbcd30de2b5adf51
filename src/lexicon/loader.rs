//! Embeddings File Reader
//!
//! Text format: a `<words> <dimension>` header, then one
//! `word\tf1\t...\tfD` line per word.

use std::io::BufRead;

use tracing::warn;

use super::Lexicon;
use crate::config::{DuplicatePolicy, LexiconConfig};
use crate::error::{LexiconError, Result};
use crate::vector::EmbeddingMatrix;
use crate::vocabulary::VocabularyBuilder;

/// Smallest on-disk footprint of one value: a digit and a separator
const MIN_BYTES_PER_VALUE: u64 = 2;

/// Upper bounds on what is reserved before any row is read
const MAX_RESERVED_VALUES: usize = 1 << 24;
const MAX_RESERVED_WORDS: usize = 1 << 18;

/// Parse a whole embeddings stream.
///
/// `size_hint` is the stream length in bytes, when known. Together with
/// `MAX_RESERVED_VALUES` and `MAX_RESERVED_WORDS` it bounds the up-front
/// allocation, so a bogus header surfaces as a load error instead of an
/// allocation failure.
pub(crate) fn read_lexicon<R: BufRead>(
    reader: R,
    size_hint: Option<u64>,
    config: LexiconConfig,
) -> Result<Lexicon> {
    let mut lines = reader.lines();

    let header = match lines.next() {
        Some(line) => line?,
        None => return Err(LexiconError::header("file is empty")),
    };
    let (declared, dimension) = parse_header(&header)?;

    let mut capacity = declared.saturating_mul(dimension).min(MAX_RESERVED_VALUES);
    if let Some(bytes) = size_hint {
        let bound = usize::try_from(bytes / MIN_BYTES_PER_VALUE).unwrap_or(usize::MAX);
        capacity = capacity.min(bound);
    }
    let mut values: Vec<f32> = Vec::with_capacity(capacity);
    let mut vocabulary =
        VocabularyBuilder::with_capacity((capacity / dimension).min(MAX_RESERVED_WORDS));

    let mut rows = 0usize;
    for (offset, line) in lines.enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        rows += 1;
        if rows > declared {
            // Keep counting so the mismatch error reports the real total.
            continue;
        }

        let line_no = offset + 2;
        let start = values.len();
        let word = parse_row(&line, line_no, dimension, &mut values)?;

        match vocabulary.insert(word.to_string()) {
            Ok(_) => {}
            Err(LexiconError::DuplicateWord { word, .. })
                if config.duplicates == DuplicatePolicy::KeepFirst =>
            {
                warn!(word = %word, line = line_no, "Skipping duplicate word, keeping first");
                values.truncate(start);
            }
            Err(e) => return Err(e),
        }
    }

    if rows != declared {
        return Err(LexiconError::RowCountMismatch {
            declared,
            found: rows,
        });
    }

    let matrix = EmbeddingMatrix::from_flat(values, dimension)?;
    Ok(Lexicon::from_parts(vocabulary.finish(), matrix, config))
}

/// Parse `<words> <dimension>`
fn parse_header(line: &str) -> Result<(usize, usize)> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 2 {
        return Err(LexiconError::header(format!(
            "expected `<words> <dimension>`, got {:?}",
            line
        )));
    }

    let parse = |field: &str| {
        field.parse::<usize>().map_err(|_| {
            LexiconError::header(format!("`{}` is not a non-negative integer", field))
        })
    };
    let declared = parse(fields[0])?;
    let dimension = parse(fields[1])?;

    if dimension == 0 {
        return Err(LexiconError::header("dimension must be positive"));
    }
    Ok((declared, dimension))
}

/// Parse one data row, appending its values to `values` and returning the word.
fn parse_row<'a>(
    line: &'a str,
    line_no: usize,
    dimension: usize,
    values: &mut Vec<f32>,
) -> Result<&'a str> {
    let mut fields = line.split('\t');
    let word = fields.next().unwrap_or_default();
    if word.trim().is_empty() {
        return Err(LexiconError::row(line_no, "missing word"));
    }

    let mut count = 0usize;
    for field in fields {
        let field = field.trim();
        let value: f32 = field
            .parse()
            .map_err(|_| LexiconError::row(line_no, format!("`{}` is not a number", field)))?;
        if !value.is_finite() {
            return Err(LexiconError::row(
                line_no,
                format!("non-finite value `{}` for `{}`", field, word),
            ));
        }
        values.push(value);
        count += 1;
    }

    if count != dimension {
        return Err(LexiconError::row(
            line_no,
            format!(
                "expected {} values after `{}`, got {}",
                dimension, word, count
            ),
        ));
    }
    Ok(word)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn read(text: &str) -> Result<Lexicon> {
        read_lexicon(Cursor::new(text), None, LexiconConfig::default())
    }

    fn read_keep_first(text: &str) -> Result<Lexicon> {
        let config = LexiconConfig::default().with_duplicate_policy(DuplicatePolicy::KeepFirst);
        read_lexicon(Cursor::new(text), Some(text.len() as u64), config)
    }

    #[test]
    fn test_reads_rows_in_file_order() {
        let lexicon = read("3 2\nb\t0.9\t0.1\na\t1.0\t0.0\nc\t-1\t0\n").unwrap();
        assert_eq!(lexicon.len(), 3);
        assert_eq!(lexicon.dimension(), 2);
        assert_eq!(lexicon.vocabulary().word_at(0).unwrap(), "b");
        assert_eq!(lexicon.vocabulary().index_of("c").unwrap(), 2);
        assert_eq!(lexicon.vector("a").unwrap().to_vec(), vec![1.0, 0.0]);
    }

    #[test]
    fn test_header_with_one_integer() {
        let err = read("4\na\t1.0\t0.0\n").unwrap_err();
        assert!(matches!(err, LexiconError::MalformedHeader { .. }), "{:?}", err);
    }

    #[test]
    fn test_header_rejects_extra_and_non_integers() {
        for header in ["4 2 7", "four 2", "4 -2", "2.0 2", ""] {
            let text = format!("{}\na\t1\t0\n", header);
            let err = read(&text).unwrap_err();
            assert!(
                matches!(err, LexiconError::MalformedHeader { .. }),
                "header {:?}: {:?}",
                header,
                err
            );
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(read(""), Err(LexiconError::MalformedHeader { .. })));
    }

    #[test]
    fn test_zero_dimension() {
        assert!(matches!(read("0 0\n"), Err(LexiconError::MalformedHeader { .. })));
    }

    #[test]
    fn test_header_tolerates_extra_whitespace() {
        let lexicon = read("  1\t 2 \na\t1\t0\n").unwrap();
        assert_eq!(lexicon.len(), 1);
    }

    #[test]
    fn test_short_row() {
        let err = read("2 3\na\t1\t2\t3\nb\t1\t2\n").unwrap_err();
        match err {
            LexiconError::MalformedRow { line, reason } => {
                assert_eq!(line, 3);
                assert!(reason.contains("expected 3 values"), "{}", reason);
            }
            other => panic!("expected MalformedRow, got {:?}", other),
        }
    }

    #[test]
    fn test_long_row() {
        let err = read("1 2\na\t1\t2\t3\n").unwrap_err();
        assert!(matches!(err, LexiconError::MalformedRow { line: 2, .. }));
    }

    #[test]
    fn test_non_numeric_value() {
        let err = read("1 2\na\t1\tzero\n").unwrap_err();
        match err {
            LexiconError::MalformedRow { line, reason } => {
                assert_eq!(line, 2);
                assert!(reason.contains("zero"));
            }
            other => panic!("expected MalformedRow, got {:?}", other),
        }
    }

    #[test]
    fn test_non_finite_value() {
        let err = read("1 2\na\tNaN\t0\n").unwrap_err();
        assert!(matches!(err, LexiconError::MalformedRow { line: 2, .. }));
        let err = read("1 2\na\tinf\t0\n").unwrap_err();
        assert!(matches!(err, LexiconError::MalformedRow { line: 2, .. }));
    }

    #[test]
    fn test_missing_word() {
        let err = read("1 2\n\t1\t0\n").unwrap_err();
        assert!(matches!(err, LexiconError::MalformedRow { line: 2, .. }));
    }

    #[test]
    fn test_too_few_rows() {
        let err = read("4 2\na\t1\t0\nb\t0\t1\nc\t1\t1\n").unwrap_err();
        assert!(matches!(
            err,
            LexiconError::RowCountMismatch {
                declared: 4,
                found: 3
            }
        ));
    }

    #[test]
    fn test_too_many_rows_reports_real_total() {
        let err = read("1 2\na\t1\t0\nb\t0\t1\nc\t1\t1\n").unwrap_err();
        assert!(matches!(
            err,
            LexiconError::RowCountMismatch {
                declared: 1,
                found: 3
            }
        ));
    }

    #[test]
    fn test_duplicate_rejected_by_default() {
        let err = read("3 2\na\t1\t0\nb\t0\t1\na\t-1\t0\n").unwrap_err();
        match err {
            LexiconError::DuplicateWord { word, position } => {
                assert_eq!(word, "a");
                assert_eq!(position, 2);
            }
            other => panic!("expected DuplicateWord, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_keep_first() {
        let lexicon = read_keep_first("3 2\na\t1\t0\nb\t0\t1\na\t-1\t0\n").unwrap();
        assert_eq!(lexicon.len(), 2);
        assert_eq!(lexicon.vector("a").unwrap().to_vec(), vec![1.0, 0.0]);
        assert_eq!(lexicon.vector("b").unwrap().to_vec(), vec![0.0, 1.0]);
    }

    #[test]
    fn test_duplicate_keep_first_still_counts_rows() {
        // Header counts the skipped row too.
        let err = read_keep_first("2 2\na\t1\t0\nb\t0\t1\na\t-1\t0\n").unwrap_err();
        assert!(matches!(
            err,
            LexiconError::RowCountMismatch {
                declared: 2,
                found: 3
            }
        ));
    }

    #[test]
    fn test_crlf_and_blank_lines() {
        let lexicon = read("2 2\r\na\t1.0\t0.0\r\n\r\nb\t0.0\t1.0\r\n\n").unwrap();
        assert_eq!(lexicon.len(), 2);
        assert_eq!(lexicon.vector("b").unwrap().to_vec(), vec![0.0, 1.0]);
    }

    #[test]
    fn test_huge_header_without_size_hint() {
        let text = format!("{} 2\na\t1\t0\n", usize::MAX);
        let err = read(&text).unwrap_err();
        assert!(matches!(
            err,
            LexiconError::RowCountMismatch {
                declared: usize::MAX,
                found: 1
            }
        ));
    }

    #[test]
    fn test_large_header_without_size_hint() {
        let err = read("4000000000 300\na\t1\t0\n").unwrap_err();
        assert!(matches!(err, LexiconError::MalformedRow { line: 2, .. }));
    }

    #[test]
    fn test_lying_header_does_not_over_allocate() {
        let text = "1000000000 1000\na\t1\t0\n";
        let err = read_keep_first(text).unwrap_err();
        assert!(matches!(err, LexiconError::MalformedRow { line: 2, .. }));
    }
}
