use crate::tokenizer::WordDefect;
use crate::DocId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Stop word {word} {defect}")]
    InvalidStopWord { word: String, defect: WordDefect },

    #[error("Document ID {0} is negative")]
    NegativeDocumentId(DocId),

    #[error("Document ID {0} already exists")]
    DuplicateDocumentId(DocId),

    #[error("Word {word} in document with id = {document_id} {defect}")]
    InvalidDocumentWord {
        word: String,
        document_id: DocId,
        defect: WordDefect,
    },

    #[error("Word {word} in query {defect}")]
    InvalidQueryWord { word: String, defect: WordDefect },

    #[error("Document ID {0} does not exist")]
    DocumentNotFound(DocId),

    #[error("ID index = {index} is out of range for {count} documents")]
    OrdinalOutOfRange { index: i32, count: usize },

    #[error("Page size must be positive")]
    InvalidPageSize,

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SearchError>;

impl SearchError {
    /// Caller supplied a bad id, word or size.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            SearchError::InvalidStopWord { .. }
                | SearchError::NegativeDocumentId(_)
                | SearchError::DuplicateDocumentId(_)
                | SearchError::InvalidDocumentWord { .. }
                | SearchError::InvalidQueryWord { .. }
                | SearchError::DocumentNotFound(_)
                | SearchError::InvalidPageSize
        )
    }

    pub fn is_out_of_range(&self) -> bool {
        matches!(self, SearchError::OrdinalOutOfRange { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offender() {
        let err = SearchError::InvalidDocumentWord {
            word: "white\x12".into(),
            document_id: 1,
            defect: WordDefect::ControlCharacter,
        };
        assert_eq!(
            err.to_string(),
            "Word white\x12 in document with id = 1 contains control characters"
        );
        assert_eq!(
            SearchError::NegativeDocumentId(-1).to_string(),
            "Document ID -1 is negative"
        );
    }

    #[test]
    fn taxonomy() {
        assert!(SearchError::OrdinalOutOfRange { index: 4, count: 3 }.is_out_of_range());
        assert!(SearchError::DuplicateDocumentId(0).is_invalid_argument());
        assert!(!SearchError::DocumentNotFound(9).is_out_of_range());
        assert!(SearchError::InvalidPageSize.is_invalid_argument());
        assert!(!SearchError::OrdinalOutOfRange { index: -1, count: 0 }.is_invalid_argument());
    }

    #[test]
    fn config_errors_are_neither_class() {
        let err = crate::config::Settings::from_json("{engine").unwrap_err();
        assert!(matches!(err, SearchError::Config(_)));
        assert!(!err.is_invalid_argument());
        assert!(!err.is_out_of_range());
    }
}
