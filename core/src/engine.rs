use crate::config::EngineConfig;
use crate::document::{DocumentStatus, ScoredDocument};
use crate::error::{Result, SearchError};
use crate::index::InvertedIndex;
use crate::query::{parse_query, Query};
use crate::tokenizer::validate_word;
use crate::DocId;
use std::collections::BTreeMap;

/// Decides whether a document may appear in search results.
pub trait DocumentFilter {
    fn accepts(&self, document_id: DocId, status: DocumentStatus, rating: i32) -> bool;
}

impl<F> DocumentFilter for F
where
    F: Fn(DocId, DocumentStatus, i32) -> bool,
{
    fn accepts(&self, document_id: DocId, status: DocumentStatus, rating: i32) -> bool {
        self(document_id, status, rating)
    }
}

impl DocumentFilter for DocumentStatus {
    fn accepts(&self, _document_id: DocId, status: DocumentStatus, _rating: i32) -> bool {
        status == *self
    }
}

/// TF-IDF search over an [`InvertedIndex`].
#[derive(Debug, Default)]
pub struct SearchEngine {
    index: InvertedIndex,
    config: EngineConfig,
}

impl SearchEngine {
    pub fn new<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self::with_index(InvertedIndex::new(stop_words)?, EngineConfig::default()))
    }

    pub fn from_stop_words_text(text: &str) -> Result<Self> {
        Ok(Self::with_index(InvertedIndex::from_stop_words_text(text)?, EngineConfig::default()))
    }

    pub fn with_index(index: InvertedIndex, config: EngineConfig) -> Self {
        Self { index, config }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn index(&self) -> &InvertedIndex {
        &self.index
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn add_document(
        &mut self,
        document_id: DocId,
        document: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        self.index.add_document(document_id, document, status, ratings)
    }

    pub fn document_count(&self) -> usize {
        self.index.document_count()
    }

    pub fn document_id(&self, index: i32) -> Result<DocId> {
        self.index.document_id(index)
    }

    /// Top documents with status ACTUAL.
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<ScoredDocument>> {
        self.find_top_documents_by(raw_query, DocumentStatus::Actual)
    }

    /// Top documents accepted by `filter`: a [`DocumentStatus`] or a
    /// `Fn(id, status, rating) -> bool`.
    pub fn find_top_documents_by<F: DocumentFilter>(
        &self,
        raw_query: &str,
        filter: F,
    ) -> Result<Vec<ScoredDocument>> {
        let query = parse_query(raw_query, &self.index)?;
        let mut matched = self.find_all_documents(&query, &filter)?;

        order_by_relevance(&mut matched, self.config.relevance_epsilon);
        matched.truncate(self.config.max_result_document_count);
        Ok(matched)
    }

    fn find_all_documents(&self, query: &Query, filter: &dyn DocumentFilter) -> Result<Vec<ScoredDocument>> {
        let mut document_to_relevance: BTreeMap<DocId, f64> = BTreeMap::new();

        for word in &query.plus_words {
            check_query_word(word)?;
            let Some(postings) = self.index.postings(word) else {
                continue;
            };
            let idf = self.index.inverse_document_freq(postings);
            for (&document_id, &term_freq) in postings {
                let Some(data) = self.index.document_data(document_id) else {
                    continue;
                };
                if filter.accepts(document_id, data.status, data.rating) {
                    *document_to_relevance.entry(document_id).or_insert(0.0) += term_freq * idf;
                }
            }
        }

        for word in &query.minus_words {
            check_query_word(word)?;
            if let Some(postings) = self.index.postings(word) {
                for document_id in postings.keys() {
                    document_to_relevance.remove(document_id);
                }
            }
        }

        Ok(document_to_relevance
            .into_iter()
            .filter_map(|(document_id, relevance)| {
                self.index
                    .document_data(document_id)
                    .map(|data| ScoredDocument::new(document_id, relevance, data.rating))
            })
            .collect())
    }

    /// Plus words of the query found in the document, or none at all if the
    /// document has any minus word, together with the document status.
    pub fn match_document(&self, raw_query: &str, document_id: DocId) -> Result<(Vec<String>, DocumentStatus)> {
        if document_id < 0 {
            return Err(SearchError::NegativeDocumentId(document_id));
        }
        let status = self
            .index
            .document_data(document_id)
            .map(|data| data.status)
            .ok_or(SearchError::DocumentNotFound(document_id))?;

        let query = parse_query(raw_query, &self.index)?;
        let in_document = |word: &str| {
            self.index
                .postings(word)
                .is_some_and(|postings| postings.contains_key(&document_id))
        };

        let mut matched_words = Vec::new();
        for word in &query.plus_words {
            check_query_word(word)?;
            if in_document(word) {
                matched_words.push(word.clone());
            }
        }
        for word in &query.minus_words {
            check_query_word(word)?;
            if in_document(word) {
                matched_words.clear();
                break;
            }
        }
        Ok((matched_words, status))
    }
}

/// Descending relevance. Documents within `epsilon` of the first document of
/// their run are ranked by descending rating; equal ratings keep id order.
fn order_by_relevance(documents: &mut [ScoredDocument], epsilon: f64) {
    documents.sort_by(|lhs, rhs| rhs.relevance.total_cmp(&lhs.relevance));
    let mut start = 0;
    while start < documents.len() {
        let head = documents[start].relevance;
        let end = documents[start..]
            .iter()
            .position(|d| head - d.relevance >= epsilon)
            .map_or(documents.len(), |n| start + n);
        documents[start..end].sort_by(|lhs, rhs| rhs.rating.cmp(&lhs.rating));
        start = end;
    }
}

fn check_query_word(word: &str) -> Result<()> {
    validate_word(word).map_err(|e| SearchError::InvalidQueryWord {
        word: e.word,
        defect: e.defect,
    })
}
