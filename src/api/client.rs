// src/api/client.rs
//! HTTP client wrapper for the Notion API.
//!
//! Handles authentication headers and request assembly. Response bodies
//! are handed to the parser untouched.

use super::parser::parse_api_response;
use super::types::{ApiRequest, HttpMethod};
use super::NotionRepository;
use crate::constants::{NOTION_API_BASE_URL, NOTION_API_VERSION};
use crate::error::AppError;
use crate::types::ApiKey;
use reqwest::{header, Client, Method, Response};
use serde_json::Value;

/// A thin wrapper around a reqwest `Client` carrying Notion credentials.
#[derive(Clone)]
pub struct NotionHttpClient {
    client: Client,
    base_url: String,
}

impl NotionHttpClient {
    /// Creates a new HTTP client with Notion API authentication.
    pub fn new(api_key: &ApiKey) -> Result<Self, AppError> {
        Self::with_base_url(api_key, NOTION_API_BASE_URL)
    }

    /// Same as `new`, against a different API root.
    pub fn with_base_url(api_key: &ApiKey, base_url: &str) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(api_key)?)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Creates the default headers for Notion API requests.
    fn create_headers(api_key: &ApiKey) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", api_key.as_str());
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header).map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid API token format: {}", e))
            })?,
        );

        headers.insert(
            "Notion-Version",
            header::HeaderValue::from_static(NOTION_API_VERSION),
        );

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    fn url_for(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }
}

fn reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
    }
}

#[async_trait::async_trait]
impl NotionRepository for NotionHttpClient {
    async fn send(&self, request: ApiRequest) -> Result<Value, AppError> {
        let url = self.url_for(&request.endpoint);
        log::debug!("{} {}", request.method, url);

        let mut builder = self.client.request(reqwest_method(request.method), url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let result = extract_response_text(response).await?;
        log::debug!("{} answered with status {}", request, result.status);
        parse_api_response(result)
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: u16,
    pub url: String,
}

/// Extracts the response body as text with metadata.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, AppError> {
    let status = response.status().as_u16();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}
