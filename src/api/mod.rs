// src/api/mod.rs
//! Notion API interaction: the ability to send one request to a workspace.
//!
//! Tools build an `ApiRequest`, the repository sends it and hands back the
//! decoded JSON body. Nothing here interprets the response.

pub mod client;
pub mod parser;
mod types;

use crate::error::AppError;
use serde_json::Value;

pub use client::NotionHttpClient;
pub use types::{ApiRequest, HttpMethod};

/// The ability to exchange a request with the Notion API.
///
/// Tool dispatch depends on this trait, never on HTTP details, so tests
/// can substitute an in-memory double.
#[async_trait::async_trait]
pub trait NotionRepository: Send + Sync {
    /// Sends a request and returns the decoded response body.
    async fn send(&self, request: ApiRequest) -> Result<Value, AppError>;
}
