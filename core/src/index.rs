use crate::document::{compute_average_rating, DocumentData, DocumentStatus};
use crate::error::{Result, SearchError};
use crate::tokenizer::{split_into_words, validate_word};
use crate::DocId;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Document id -> term frequency.
pub type Postings = BTreeMap<DocId, f64>;

/// Add-only inverted index over short documents.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    stop_words: BTreeSet<String>,
    word_to_document_freqs: HashMap<String, Postings>,
    documents: BTreeMap<DocId, DocumentData>,
    /// Ids in insertion order; position is the document's ordinal.
    document_ids: Vec<DocId>,
}

impl InvertedIndex {
    /// Build an index with the given stop words. Empty entries are skipped,
    /// duplicates collapse, and the first malformed word fails construction.
    pub fn new<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut unique = BTreeSet::new();
        for word in stop_words {
            let word = word.as_ref();
            if word.is_empty() {
                continue;
            }
            validate_word(word).map_err(|e| SearchError::InvalidStopWord {
                word: e.word,
                defect: e.defect,
            })?;
            unique.insert(word.to_string());
        }
        Ok(Self { stop_words: unique, ..Self::default() })
    }

    /// Stop words given as one space-delimited string.
    pub fn from_stop_words_text(text: &str) -> Result<Self> {
        Self::new(split_into_words(text))
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    pub fn stop_words(&self) -> impl Iterator<Item = &str> + '_ {
        self.stop_words.iter().map(String::as_str)
    }

    pub fn add_document(
        &mut self,
        document_id: DocId,
        document: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        if document_id < 0 {
            return Err(SearchError::NegativeDocumentId(document_id));
        }
        if self.documents.contains_key(&document_id) {
            return Err(SearchError::DuplicateDocumentId(document_id));
        }

        // Validate everything before touching the index.
        let words = self.split_into_words_no_stop(document, document_id)?;

        if !words.is_empty() {
            let inv_word_count = 1.0 / words.len() as f64;
            for word in &words {
                *self
                    .word_to_document_freqs
                    .entry((*word).to_string())
                    .or_default()
                    .entry(document_id)
                    .or_insert(0.0) += inv_word_count;
            }
        }

        let rating = compute_average_rating(ratings);
        self.documents.insert(document_id, DocumentData { rating, status });
        self.document_ids.push(document_id);
        tracing::debug!(document_id, words = words.len(), rating, %status, "indexed document");
        Ok(())
    }

    fn split_into_words_no_stop<'t>(&self, text: &'t str, document_id: DocId) -> Result<Vec<&'t str>> {
        let mut words = Vec::new();
        for word in split_into_words(text) {
            if self.is_stop_word(word) {
                continue;
            }
            validate_word(word).map_err(|e| SearchError::InvalidDocumentWord {
                word: e.word,
                document_id,
                defect: e.defect,
            })?;
            words.push(word);
        }
        Ok(words)
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Id of the document added at position `index` (0-based).
    pub fn document_id(&self, index: i32) -> Result<DocId> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.document_ids.get(i).copied())
            .ok_or_else(|| SearchError::OrdinalOutOfRange { index, count: self.document_count() })
    }

    pub fn contains(&self, document_id: DocId) -> bool {
        self.documents.contains_key(&document_id)
    }

    pub fn document_data(&self, document_id: DocId) -> Option<&DocumentData> {
        self.documents.get(&document_id)
    }

    /// Term frequencies of `word` per document, `None` if no document has it.
    pub fn postings(&self, word: &str) -> Option<&Postings> {
        self.word_to_document_freqs.get(word)
    }

    /// ln(N / df). Only defined for indexed words.
    pub fn inverse_document_freq(&self, postings: &Postings) -> f64 {
        (self.document_count() as f64 / postings.len() as f64).ln()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> InvertedIndex {
        InvertedIndex::new(["and", "в", "на", ""]).unwrap()
    }

    #[test]
    fn stop_words_from_text_and_list_agree() {
        let a = InvertedIndex::from_stop_words_text("  and in  and ").unwrap();
        let b = InvertedIndex::new(vec!["in".to_string(), "and".to_string()]).unwrap();
        assert_eq!(a.stop_words().collect::<Vec<_>>(), vec!["and", "in"]);
        assert_eq!(a.stop_words().collect::<Vec<_>>(), b.stop_words().collect::<Vec<_>>());
    }

    #[test]
    fn empty_stop_word_source_is_fine() {
        assert_eq!(InvertedIndex::new(Vec::<String>::new()).unwrap().stop_words().count(), 0);
        assert_eq!(InvertedIndex::from_stop_words_text("").unwrap().stop_words().count(), 0);
    }

    #[test]
    fn malformed_stop_word_fails_construction() {
        let err = InvertedIndex::new(["or\x12", "в", "на"]).unwrap_err();
        match err {
            SearchError::InvalidStopWord { word, .. } => assert_eq!(word, "or\x12"),
            other => panic!("unexpected error {other:?}"),
        }
        assert!(InvertedIndex::from_stop_words_text("or\x12 в на").is_err());
    }

    #[test]
    fn term_frequency_is_share_of_words() {
        let mut idx = index();
        idx.add_document(1, "black black tail", DocumentStatus::Actual, &[1]).unwrap();
        let black = idx.postings("black").unwrap();
        assert!((black[&1] - 2.0 / 3.0).abs() < 1e-12);
        assert!((idx.postings("tail").unwrap()[&1] - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn stop_words_are_not_indexed() {
        let mut idx = index();
        idx.add_document(0, "white cat and modern tail", DocumentStatus::Actual, &[1]).unwrap();
        assert!(idx.postings("and").is_none());
        assert!((idx.postings("cat").unwrap()[&0] - 0.25).abs() < 1e-12);
    }

    #[test]
    fn document_without_words_is_still_stored() {
        let mut idx = index();
        idx.add_document(3, "and  на", DocumentStatus::Banned, &[]).unwrap();
        assert_eq!(idx.document_count(), 1);
        assert_eq!(
            idx.document_data(3),
            Some(&DocumentData { rating: 0, status: DocumentStatus::Banned })
        );
    }

    #[test]
    fn rejects_bad_ids() {
        let mut idx = index();
        idx.add_document(0, "white cat", DocumentStatus::Actual, &[1]).unwrap();
        assert!(matches!(
            idx.add_document(0, "black dog", DocumentStatus::Actual, &[1]),
            Err(SearchError::DuplicateDocumentId(0))
        ));
        assert!(matches!(
            idx.add_document(-1, "black dog", DocumentStatus::Actual, &[1]),
            Err(SearchError::NegativeDocumentId(-1))
        ));
        assert_eq!(idx.document_count(), 1);
        assert!(idx.postings("dog").is_none());
    }

    #[test]
    fn invalid_word_leaves_index_untouched() {
        let mut idx = index();
        let err = idx
            .add_document(1, "white\x12 cat and modern tail", DocumentStatus::Actual, &[1])
            .unwrap_err();
        assert!(matches!(err, SearchError::InvalidDocumentWord { document_id: 1, .. }));

        let err = idx.add_document(2, "modern cat -", DocumentStatus::Actual, &[1]).unwrap_err();
        assert!(matches!(err, SearchError::InvalidDocumentWord { document_id: 2, .. }));

        assert_eq!(idx.document_count(), 0);
        assert!(idx.postings("modern").is_none());
        assert!(idx.document_id(0).is_err());
    }

    #[test]
    fn ordinals_follow_insertion_order() {
        let mut idx = index();
        for id in [7, 3, 5] {
            idx.add_document(id, "cat", DocumentStatus::Actual, &[]).unwrap();
        }
        assert_eq!(idx.document_id(0).unwrap(), 7);
        assert_eq!(idx.document_id(2).unwrap(), 5);
        assert!(idx.document_id(3).unwrap_err().is_out_of_range());
        assert!(idx.document_id(-1).unwrap_err().is_out_of_range());
    }

    #[test]
    fn idf_uses_document_count() {
        let mut idx = index();
        idx.add_document(0, "cat", DocumentStatus::Actual, &[]).unwrap();
        idx.add_document(1, "dog", DocumentStatus::Actual, &[]).unwrap();
        let idf = idx.inverse_document_freq(idx.postings("cat").unwrap());
        assert!((idf - 2f64.ln()).abs() < 1e-12);
    }
}
