use crate::error::{Result, SearchError};
use crate::index::InvertedIndex;
use crate::tokenizer::{split_into_words, validate_word};
use std::collections::BTreeSet;

/// Parsed query: deduplicated plus and minus words with stop words removed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Query {
    pub plus_words: BTreeSet<String>,
    pub minus_words: BTreeSet<String>,
}

struct QueryWord<'a> {
    data: &'a str,
    is_minus: bool,
}

fn parse_query_word(word: &str) -> Result<QueryWord<'_>> {
    validate_word(word).map_err(|e| SearchError::InvalidQueryWord {
        word: e.word,
        defect: e.defect,
    })?;
    Ok(match word.strip_prefix('-') {
        Some(rest) => QueryWord { data: rest, is_minus: true },
        None => QueryWord { data: word, is_minus: false },
    })
}

/// Parse `raw` against the stop words of `index`. A malformed word anywhere
/// in the query rejects the whole query.
pub fn parse_query(raw: &str, index: &InvertedIndex) -> Result<Query> {
    let mut query = Query::default();
    for word in split_into_words(raw) {
        let query_word = parse_query_word(word)?;
        if index.is_stop_word(query_word.data) {
            continue;
        }
        if query_word.is_minus {
            query.minus_words.insert(query_word.data.to_string());
        } else {
            query.plus_words.insert(query_word.data.to_string());
        }
    }
    tracing::trace!(
        plus = query.plus_words.len(),
        minus = query.minus_words.len(),
        "parsed query"
    );
    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(set: &BTreeSet<String>) -> Vec<&str> {
        set.iter().map(String::as_str).collect()
    }

    #[test]
    fn splits_plus_and_minus_words() {
        let index = InvertedIndex::new(["and"]).unwrap();
        let q = parse_query("black cat -tail and -and black", &index).unwrap();
        assert_eq!(words(&q.plus_words), vec!["black", "cat"]);
        assert_eq!(words(&q.minus_words), vec!["tail"]);
    }

    #[test]
    fn empty_query() {
        let index = InvertedIndex::default();
        assert_eq!(parse_query("   ", &index).unwrap(), Query::default());
    }

    #[test]
    fn malformed_words_reject_query() {
        let index = InvertedIndex::default();
        for raw in ["black --cat", "black -", "black ca\x12t", "-cat-"] {
            assert!(
                matches!(parse_query(raw, &index), Err(SearchError::InvalidQueryWord { .. })),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn error_names_offending_word() {
        let index = InvertedIndex::default();
        match parse_query("black --cat", &index) {
            Err(SearchError::InvalidQueryWord { word, .. }) => assert_eq!(word, "--cat"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
