use serde::{Deserialize, Serialize};

use quire_core::{Document, SearchResult, SearchScope};

/// Text extracted from an uploaded PDF
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractTextResponse {
    pub text: String,
    pub page_count: usize,
    pub filename: String,
    pub success: bool,
}

/// Question extraction request. Required fields are optional here so a
/// missing field maps to a 400, not a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct ExtractQuestionsRequest {
    pub text: Option<String>,
    pub filename: Option<String>,
}

/// Questions surfaced from one document's text
#[derive(Debug, Serialize)]
pub struct ExtractQuestionsResponse {
    pub questions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    pub success: bool,
}

/// Answer generation request
#[derive(Debug, Deserialize)]
pub struct AnswerQuestionRequest {
    pub question: Option<String>,
    pub context: Option<String>,
    pub filename: Option<String>,
}

/// Generated answer
#[derive(Debug, Serialize)]
pub struct AnswerQuestionResponse {
    pub answer: String,
    pub success: bool,
}

/// Full document listing
#[derive(Debug, Serialize)]
pub struct DocumentsResponse {
    pub documents: Vec<Document>,
    pub success: bool,
}

/// Keyword search request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub search_term: Option<String>,
    #[serde(default)]
    pub search_in: SearchScope,
}

/// Search matches plus their count
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
    pub count: usize,
    pub success: bool,
}

/// Document deletion request
#[derive(Debug, Deserialize)]
pub struct DeleteRequest {
    pub id: Option<String>,
}

/// Bare success acknowledgement
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub success: bool,
}

/// API error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
