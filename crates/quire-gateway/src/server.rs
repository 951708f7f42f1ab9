use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::{HeaderValue, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use quire_core::{pdf, AnswerEngine, Document, DocumentStore, LlmClient, QuestionExtractor};

use crate::types::*;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DocumentStore>,
    pub llm: Arc<dyn LlmClient>,
    pub allowed_origins: Vec<String>,
}

/// Largest accepted request body; PDFs arrive whole as multipart uploads.
const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Create the Axum router with all routes
pub fn create_router(state: AppState) -> Router {
    // Build CORS layer
    let cors = if state.allowed_origins.is_empty() {
        // Permissive for development
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(
                state
                    .allowed_origins
                    .iter()
                    .map(|s| s.parse::<HeaderValue>().unwrap())
                    .collect::<Vec<_>>(),
            )
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        .route("/health", get(health_check))
        .route("/extract-text", post(extract_text))
        .route("/extract-questions", post(extract_questions))
        .route("/answer-question", post(answer_question))
        .route(
            "/search",
            get(list_documents)
                .put(upsert_document)
                .post(search_documents)
                .delete(delete_document),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Start the gateway server
pub async fn start_server(state: AppState, host: &str, port: u16) -> anyhow::Result<()> {
    let router = create_router(state);
    let addr = format!("{}:{}", host, port);

    info!(addr = %addr, "Starting gateway server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Gateway server stopped");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to listen for Ctrl+C");
    info!("Shutdown signal received, shutting down");
}

// --- Handlers ---

type HandlerError = (StatusCode, Json<ErrorResponse>);

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// POST /extract-text: multipart PDF upload, returns text + page count.
async fn extract_text(
    State(_state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ExtractTextResponse>, HandlerError> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request(&format!("Invalid multipart body: {}", e)))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("upload.pdf").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| bad_request(&format!("Failed to read upload: {}", e)))?;
            upload = Some((filename, data.to_vec()));
        }
    }

    let Some((filename, data)) = upload else {
        return Err(bad_request("No file provided"));
    };

    // pdf-extract is CPU-bound; keep it off the async workers.
    let extracted = tokio::task::spawn_blocking(move || pdf::extract(&data))
        .await
        .map_err(|e| internal_error(&format!("Extraction task failed: {}", e)))?
        .map_err(|e| {
            error!(error = %e, filename = %filename, "PDF extraction failed");
            internal_error("Failed to extract text from PDF")
        })?;

    Ok(Json(ExtractTextResponse {
        text: extracted.text,
        page_count: extracted.page_count,
        filename,
        success: true,
    }))
}

/// POST /extract-questions: surface the questions embedded in a text.
async fn extract_questions(
    State(state): State<AppState>,
    Json(req): Json<ExtractQuestionsRequest>,
) -> Result<Json<ExtractQuestionsResponse>, HandlerError> {
    let Some(text) = req.text.filter(|t| !t.is_empty()) else {
        return Err(bad_request("No text provided"));
    };

    let extractor = QuestionExtractor::new(state.llm.clone());
    match extractor.extract(&text).await {
        Ok(questions) => Ok(Json(ExtractQuestionsResponse {
            questions,
            filename: req.filename,
            success: true,
        })),
        Err(e) => {
            error!(error = %e, "Question extraction failed");
            Err(internal_error(&format!("Failed to extract questions: {}", e)))
        }
    }
}

/// POST /answer-question: answer one question from a document-context window.
async fn answer_question(
    State(state): State<AppState>,
    Json(req): Json<AnswerQuestionRequest>,
) -> Result<Json<AnswerQuestionResponse>, HandlerError> {
    let (Some(question), Some(context)) = (
        req.question.filter(|q| !q.is_empty()),
        req.context.filter(|c| !c.is_empty()),
    ) else {
        return Err(bad_request("Missing question or context"));
    };

    let engine = AnswerEngine::new(state.llm.clone());
    let filename = req.filename.unwrap_or_default();

    match engine.answer(&question, &context, &filename).await {
        Ok(answer) => Ok(Json(AnswerQuestionResponse {
            answer,
            success: true,
        })),
        Err(e) => {
            error!(error = %e, "Answer generation failed");
            Err(internal_error(&format!("Failed to generate answer: {}", e)))
        }
    }
}

/// GET /search: all stored documents.
async fn list_documents(
    State(state): State<AppState>,
) -> Result<Json<DocumentsResponse>, HandlerError> {
    match state.store.list().await {
        Ok(documents) => Ok(Json(DocumentsResponse {
            documents,
            success: true,
        })),
        Err(e) => {
            error!(error = %e, "Failed to list documents");
            Err(internal_error("Failed to get documents"))
        }
    }
}

/// PUT /search: insert or replace one document.
async fn upsert_document(
    State(state): State<AppState>,
    Json(document): Json<Document>,
) -> Result<Json<StatusResponse>, HandlerError> {
    if document.id.is_empty() || document.filename.is_empty() {
        return Err(bad_request("Invalid document data"));
    }

    match state.store.upsert(document).await {
        Ok(()) => Ok(Json(StatusResponse { success: true })),
        Err(e) => {
            error!(error = %e, "Failed to save document");
            Err(internal_error("Failed to save document"))
        }
    }
}

/// POST /search: keyword search over questions/answers/filenames.
async fn search_documents(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, HandlerError> {
    let Some(term) = req.search_term.filter(|t| !t.is_empty()) else {
        return Err(bad_request("No search term provided"));
    };

    match state.store.search(&term, req.search_in).await {
        Ok(results) => Ok(Json(SearchResponse {
            count: results.len(),
            results,
            success: true,
        })),
        Err(e) => {
            error!(error = %e, "Search failed");
            Err(internal_error("Failed to search documents"))
        }
    }
}

/// DELETE /search: remove one document by id.
async fn delete_document(
    State(state): State<AppState>,
    Json(req): Json<DeleteRequest>,
) -> Result<Json<StatusResponse>, HandlerError> {
    let Some(id) = req.id.filter(|i| !i.is_empty()) else {
        return Err(bad_request("No document ID provided"));
    };

    match state.store.delete(&id).await {
        Ok(()) => Ok(Json(StatusResponse { success: true })),
        Err(e) => {
            error!(error = %e, "Failed to delete document");
            Err(internal_error("Failed to delete document"))
        }
    }
}

fn bad_request(message: &str) -> HandlerError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

fn internal_error(message: &str) -> HandlerError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}
