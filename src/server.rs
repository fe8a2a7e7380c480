//! Knowledge Console HTTP API.
//!
//! Serves the admin console's JSON API: document upload and deletion,
//! listing, keyword search, the chat stub, its history, and dashboard stats.
//!
//! # Endpoints
//!
//! | Method   | Path | Description |
//! |----------|------|-------------|
//! | `GET`    | `/health` | Health check (returns version) |
//! | `POST`   | `/api/upload` | Upload a file (multipart field `file`) |
//! | `DELETE` | `/api/upload/{id}` | Delete a document and its segments |
//! | `GET`    | `/api/documents` | List document summaries |
//! | `GET`    | `/api/documents/{id}` | One document with its segments |
//! | `POST`   | `/api/search` | Keyword search |
//! | `POST`   | `/api/chat` | Reply to a message and log the exchange |
//! | `GET`    | `/api/history` | Logged exchanges, most recent first |
//! | `GET`    | `/api/stats` | Totals and recent activity |
//!
//! # Error Contract
//!
//! ```json
//! { "error": { "code": "bad_request", "message": "Query is required" } }
//! ```
//!
//! Error codes: `bad_request` (400), `not_found` (404), `internal` (500).
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted so the browser console
//! can be served from a different origin.

use axum::{
    extract::{
        multipart::MultipartRejection, rejection::JsonRejection, DefaultBodyLimit, Multipart, Path,
        State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use knowledge_console_core::interactions::{list_interactions, record_interaction};
use knowledge_console_core::registry::{delete_document, get_document, list_documents};
use knowledge_console_core::search::{search, SearchRequest};
use knowledge_console_core::stats::{console_stats, ConsoleStats};
use knowledge_console_core::{Document, DocumentSummary, Interaction, KnowledgeError, Segment};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::ingest::{ingest_upload, Upload};
use crate::state::AppState;

/// Multipart framing allowance on top of `upload.max_bytes`.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Starts the HTTP server on `[server].bind` with a fresh in-memory store.
///
/// Runs until the process is terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let bind_addr = config.server.bind.clone();
    let app = router(AppState::new(config.clone()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "knowledge console listening");
    axum::serve(listener, app).await?;

    Ok(())
}

/// Builds the API router over `state`.
///
/// Split out from [`run_server`] so tests can drive it in-process.
pub fn router(state: AppState) -> Router {
    let body_limit = state.config.upload.max_bytes.saturating_add(MULTIPART_OVERHEAD);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health))
        .route("/api/upload", post(handle_upload))
        .route("/api/upload/{id}", delete(handle_delete))
        .route("/api/documents", get(handle_list_documents))
        .route("/api/documents/{id}", get(handle_get_document))
        .route("/api/search", post(handle_search))
        .route("/api/chat", post(handle_chat))
        .route("/api/history", get(handle_history))
        .route("/api/stats", get(handle_stats))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    /// Machine-readable error code (e.g., `"bad_request"`, `"not_found"`).
    code: String,
    message: String,
}

/// Error type that converts into an Axum HTTP response.
#[derive(Debug)]
struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "bad_request".to_string(),
        message: message.into(),
    }
}

fn not_found(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::NOT_FOUND,
        code: "not_found".to_string(),
        message: message.into(),
    }
}

fn internal() -> AppError {
    AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        code: "internal".to_string(),
        message: "internal server error".to_string(),
    }
}

impl From<KnowledgeError> for AppError {
    fn from(err: KnowledgeError) -> Self {
        match err {
            KnowledgeError::Validation(msg) => bad_request(msg),
            KnowledgeError::NotFound(_) => not_found("Document not found"),
            KnowledgeError::Internal(e) => {
                tracing::error!(error = %e, "request failed");
                internal()
            }
        }
    }
}

fn json_rejection(rejection: JsonRejection) -> AppError {
    bad_request(rejection.body_text())
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ POST /api/upload ============

#[derive(Serialize)]
struct UploadResponse {
    id: String,
    filename: String,
    size: usize,
    #[serde(rename = "type")]
    content_type: String,
    chunks: usize,
    message: String,
}

/// Handler for `POST /api/upload`.
///
/// Reads the multipart field named `file`; other fields are ignored.
async fn handle_upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    let mut multipart = multipart.map_err(|e| bad_request(e.body_text()))?;

    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request(e.body_text()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(|e| bad_request(e.body_text()))?;
        upload = Some(Upload {
            filename,
            content_type,
            bytes: bytes.to_vec(),
        });
        break;
    }

    let upload = upload.ok_or_else(|| bad_request("No file provided"))?;
    if upload.filename.trim().is_empty() {
        return Err(bad_request("No file provided"));
    }

    let ingested = ingest_upload(&state, upload).await?;
    Ok(Json(UploadResponse {
        id: ingested.document.id,
        filename: ingested.document.filename,
        size: ingested.size,
        content_type: ingested.content_type,
        chunks: ingested.document.segments.len(),
        message: "File uploaded and processed successfully".to_string(),
    }))
}

// ============ DELETE /api/upload/{id} ============

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteResponse {
    message: String,
    filename: String,
    chunks_removed: usize,
}

async fn handle_delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    let outcome = delete_document(state.store.as_ref(), &id).await?;
    Ok(Json(DeleteResponse {
        message: "Document deleted successfully".to_string(),
        filename: outcome.filename,
        chunks_removed: outcome.segments_removed,
    }))
}

// ============ GET /api/documents ============

#[derive(Serialize)]
struct DocumentListResponse {
    documents: Vec<DocumentSummary>,
    total: usize,
}

async fn handle_list_documents(
    State(state): State<AppState>,
) -> Result<Json<DocumentListResponse>, AppError> {
    let documents = list_documents(state.store.as_ref()).await?;
    Ok(Json(DocumentListResponse {
        total: documents.len(),
        documents,
    }))
}

// ============ GET /api/documents/{id} ============

async fn handle_get_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Document>, AppError> {
    Ok(Json(get_document(state.store.as_ref(), &id).await?))
}

// ============ POST /api/search ============

#[derive(Deserialize)]
struct SearchBody {
    #[serde(default)]
    query: Option<String>,
    #[serde(default = "default_language")]
    language: String,
}

fn default_language() -> String {
    "en".to_string()
}

#[derive(Serialize)]
struct SearchResponse {
    results: Vec<Segment>,
    total: usize,
    query: String,
    language: String,
}

/// Handler for `POST /api/search`.
///
/// A missing or blank query is a 400. Results are capped at
/// `[retrieval].final_limit`.
async fn handle_search(
    State(state): State<AppState>,
    body: Result<Json<SearchBody>, JsonRejection>,
) -> Result<Json<SearchResponse>, AppError> {
    let Json(body) = body.map_err(json_rejection)?;
    let query = body
        .query
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| bad_request("Query is required"))?;

    let req = SearchRequest::new(&query, &body.language)
        .with_limit(state.config.retrieval.final_limit);
    let results = search(state.store.as_ref(), &req).await?;

    Ok(Json(SearchResponse {
        total: results.len(),
        results,
        query,
        language: body.language,
    }))
}

// ============ POST /api/chat ============

#[derive(Deserialize)]
struct ChatBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default = "default_language")]
    language: String,
}

#[derive(Serialize)]
struct ChatResponse {
    reply: String,
    timestamp: DateTime<Utc>,
}

async fn handle_chat(
    State(state): State<AppState>,
    body: Result<Json<ChatBody>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(body) = body.map_err(json_rejection)?;
    let message = body
        .message
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| bad_request("Message is required"))?;

    let reply = state
        .responder
        .respond(&message, &body.language)
        .await
        .map_err(KnowledgeError::from)?;
    let interaction =
        record_interaction(state.store.as_ref(), &message, &body.language, &reply).await?;

    Ok(Json(ChatResponse {
        reply: interaction.reply,
        timestamp: interaction.timestamp,
    }))
}

// ============ GET /api/history ============

#[derive(Serialize)]
struct HistoryResponse {
    history: Vec<Interaction>,
    total: usize,
}

async fn handle_history(State(state): State<AppState>) -> Result<Json<HistoryResponse>, AppError> {
    let history = list_interactions(state.store.as_ref()).await?;
    Ok(Json(HistoryResponse {
        total: history.len(),
        history,
    }))
}

// ============ GET /api/stats ============

async fn handle_stats(State(state): State<AppState>) -> Result<Json<ConsoleStats>, AppError> {
    Ok(Json(console_stats(state.store.as_ref()).await?))
}
