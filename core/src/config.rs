use crate::error::Result;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_RESULT_DOCUMENT_COUNT: usize = 5;
pub const DEFAULT_RELEVANCE_EPSILON: f64 = 1e-6;
/// One request per minute for a day.
pub const DEFAULT_HISTORY_CAPACITY: usize = 1440;

/// Ranking settings owned by a single engine instance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub max_result_document_count: usize,
    /// Relevance differences below this are ties, broken by rating.
    pub relevance_epsilon: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_result_document_count: DEFAULT_MAX_RESULT_DOCUMENT_COUNT,
            relevance_epsilon: DEFAULT_RELEVANCE_EPSILON,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestQueueConfig {
    pub history_capacity: usize,
}

impl Default for RequestQueueConfig {
    fn default() -> Self {
        Self { history_capacity: DEFAULT_HISTORY_CAPACITY }
    }
}

/// Top-level settings file, e.g. `{"engine": {"max_result_document_count": 10}}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub engine: EngineConfig,
    pub request_queue: RequestQueueConfig,
}

impl Settings {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let s = Settings::default();
        assert_eq!(s.engine.max_result_document_count, 5);
        assert_eq!(s.engine.relevance_epsilon, 1e-6);
        assert_eq!(s.request_queue.history_capacity, 1440);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let s = Settings::from_json(r#"{"engine": {"max_result_document_count": 10}}"#).unwrap();
        assert_eq!(s.engine.max_result_document_count, 10);
        assert_eq!(s.engine.relevance_epsilon, DEFAULT_RELEVANCE_EPSILON);
        assert_eq!(s.request_queue, RequestQueueConfig::default());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(Settings::from_json("{engine").is_err());
    }
}
