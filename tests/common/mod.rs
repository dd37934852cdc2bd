// tests/common/mod.rs
//! Shared helpers: an in-memory repository and fixture loading.

#![allow(dead_code)]

use notion_mcp::{ApiRequest, AppError, NotionRepository};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Answers requests from a queue of canned responses and records them.
#[derive(Default)]
pub struct MockRepository {
    responses: Mutex<VecDeque<Result<Value, AppError>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond_with(self, response: Value) -> Self {
        self.responses.lock().unwrap().push_back(Ok(response));
        self
    }

    pub fn fail_with(self, error: AppError) -> Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl NotionRepository for MockRepository {
    async fn send(&self, request: ApiRequest) -> Result<Value, AppError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AppError::MalformedResponse("no canned response".to_string())))
    }
}

/// Loads a JSON fixture from `tests/fixtures`.
pub fn fixture(name: &str) -> Value {
    let path = format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name);
    let text = std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("reading {}: {}", path, e));
    serde_json::from_str(&text).unwrap_or_else(|e| panic!("parsing {}: {}", path, e))
}
