use crate::config::RequestQueueConfig;
use crate::document::ScoredDocument;
use crate::engine::{DocumentFilter, SearchEngine};
use crate::error::Result;
use std::collections::VecDeque;

const MINUTES_IN_DAY: u32 = 1440;

#[derive(Debug, Clone)]
struct QueryResult {
    request: String,
    result: Vec<ScoredDocument>,
}

/// Records recent searches against an engine and counts the empty ones.
#[derive(Debug)]
pub struct RequestQueue<'a> {
    search_engine: &'a SearchEngine,
    requests: VecDeque<QueryResult>,
    capacity: usize,
    no_result_requests: usize,
    current_minute: u32,
}

impl<'a> RequestQueue<'a> {
    pub fn new(search_engine: &'a SearchEngine) -> Self {
        Self::with_config(search_engine, RequestQueueConfig::default())
    }

    pub fn with_config(search_engine: &'a SearchEngine, config: RequestQueueConfig) -> Self {
        Self {
            search_engine,
            requests: VecDeque::with_capacity(config.history_capacity),
            capacity: config.history_capacity,
            no_result_requests: 0,
            current_minute: 0,
        }
    }

    pub fn add_find_request(&mut self, raw_query: &str) -> Result<Vec<ScoredDocument>> {
        self.tick();
        let result = self.search_engine.find_top_documents(raw_query)?;
        Ok(self.record(raw_query, result))
    }

    pub fn add_find_request_by<F: DocumentFilter>(
        &mut self,
        raw_query: &str,
        filter: F,
    ) -> Result<Vec<ScoredDocument>> {
        self.tick();
        let result = self.search_engine.find_top_documents_by(raw_query, filter)?;
        Ok(self.record(raw_query, result))
    }

    fn tick(&mut self) {
        self.current_minute = (self.current_minute + 1) % MINUTES_IN_DAY;
    }

    fn record(&mut self, raw_query: &str, result: Vec<ScoredDocument>) -> Vec<ScoredDocument> {
        if self.capacity == 0 {
            return result;
        }
        while self.requests.len() >= self.capacity {
            let Some(evicted) = self.requests.pop_front() else {
                break;
            };
            if evicted.result.is_empty() {
                self.no_result_requests -= 1;
            }
            tracing::debug!(request = %evicted.request, "evicted oldest request");
        }
        if result.is_empty() {
            self.no_result_requests += 1;
        }
        self.requests.push_back(QueryResult { request: raw_query.to_string(), result: result.clone() });
        result
    }

    /// Retained requests that returned nothing.
    pub fn no_result_requests(&self) -> usize {
        self.no_result_requests
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn history_capacity(&self) -> usize {
        self.capacity
    }

    pub fn current_minute(&self) -> u32 {
        self.current_minute
    }
}
