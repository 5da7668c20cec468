//! HTTP request handlers.

use std::collections::HashMap;

use axum::extract::{Form, Query, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::info;
use wowinfo_rag::{clean_text, is_valid_url, loader, Answer, AnswerOptions, Document};

use crate::error::ApiError;
use crate::schemas::*;
use crate::state::AppState;

/// Strictly parse caller-supplied metadata as a JSON object of strings.
fn parse_metadata(metadata: &str) -> Result<HashMap<String, String>, ApiError> {
    serde_json::from_str(metadata)
        .map_err(|e| ApiError::BadRequest(format!("Invalid metadata format: {e}")))
}

/// Resolve a document body from an id or inline text.
///
/// An unknown id is a 404 carrying `label`; an absent id with inline text
/// resolves to the text; neither resolves to `None`.
async fn resolve_document_text(
    state: &AppState,
    document_id: Option<&str>,
    document_text: Option<&str>,
    label: &str,
) -> Result<Option<String>, ApiError> {
    if let Some(id) = document_id {
        let collection = &state.engine.config().default_collection;
        let document = state.engine.store().get(collection, id).await?;
        return match document {
            Some(document) => Ok(Some(document.text)),
            None => Err(ApiError::NotFound(format!("{label} not found"))),
        };
    }
    Ok(document_text.map(str::to_string))
}

/// `GET /query`
pub async fn query(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<Json<Answer>, ApiError> {
    if !(0.0..=1.0).contains(&params.creativity) {
        return Err(ApiError::BadRequest("creativity must be between 0.0 and 1.0".to_string()));
    }

    let options = AnswerOptions {
        num_results: params.num_results,
        creativity: params.creativity,
        max_length: params.max_length,
        response_format: params.response_format,
        additional_context: params.additional_context,
    };
    let collection = &state.engine.config().default_collection;
    let answer = state.engine.answer_question(collection, &params.query, &options).await?;
    Ok(Json(answer))
}

/// `POST /feedback`
pub async fn feedback(
    Json(feedback): Json<Feedback>,
) -> (StatusCode, Json<MessageResponse>) {
    // No persistence; feedback lands in the log stream.
    info!(
        query_id = %feedback.query_id,
        feedback = %feedback.feedback,
        comment = feedback.comment.as_deref(),
        "received feedback"
    );
    (StatusCode::CREATED, Json(MessageResponse::new("Feedback received successfully")))
}

/// `POST /context`
pub async fn context(
    Json(upload): Json<DocumentUpload>,
) -> (StatusCode, Json<ContextResponse>) {
    let cleaned_context = clean_text(&upload.content);
    (
        StatusCode::CREATED,
        Json(ContextResponse { message: "Context received".to_string(), cleaned_context }),
    )
}

/// `POST /summarize`
pub async fn summarize(
    State(state): State<AppState>,
    Json(request): Json<SummaryRequest>,
) -> Result<Json<String>, ApiError> {
    let mut document_text = resolve_document_text(
        &state,
        request.document_id.as_deref(),
        request.document_text.as_deref(),
        "Document",
    )
    .await?
    .unwrap_or_default();

    if document_text.is_empty() {
        if let Some(urls) = &request.urls {
            let mut url_contents = Vec::new();
            for url in urls {
                if !is_valid_url(url) {
                    return Err(ApiError::BadRequest(format!("Invalid URL: {url}")));
                }
                // unreachable-but-valid URLs yield None and are skipped
                if let Some(content) = state.fetcher.fetch(url).await {
                    url_contents.push(content);
                }
            }
            document_text = url_contents.join("\n\n");
        }
    }

    if document_text.is_empty() {
        return Err(ApiError::BadRequest("No document content provided".to_string()));
    }

    let summary = state
        .engine
        .summarize(&document_text, &request.summary_length, &request.summary_style)
        .await?;
    Ok(Json(summary))
}

/// `POST /compare`
pub async fn compare(
    State(state): State<AppState>,
    Json(request): Json<ComparisonRequest>,
) -> Result<Json<String>, ApiError> {
    let doc1_text = resolve_document_text(
        &state,
        request.document1_id.as_deref(),
        request.document1_text.as_deref(),
        "Document 1",
    )
    .await?
    .unwrap_or_default();
    let doc2_text = resolve_document_text(
        &state,
        request.document2_id.as_deref(),
        request.document2_text.as_deref(),
        "Document 2",
    )
    .await?
    .unwrap_or_default();

    if doc1_text.is_empty() || doc2_text.is_empty() {
        return Err(ApiError::BadRequest("Both document texts are required".to_string()));
    }

    let comparison = state.engine.compare(&doc1_text, &doc2_text).await?;
    Ok(Json(comparison))
}

/// `POST /translate`
pub async fn translate(
    State(state): State<AppState>,
    Json(request): Json<TranslationRequest>,
) -> Result<Json<String>, ApiError> {
    let translation = state.engine.translate(&request.text, &request.target_language).await?;
    Ok(Json(translation))
}

/// `POST /multi_turn`
pub async fn multi_turn(
    State(state): State<AppState>,
    Json(request): Json<MultiTurnRequest>,
) -> Result<Json<Answer>, ApiError> {
    let answer = state.engine.multi_turn(&request.query, &request.session_id).await?;
    Ok(Json(answer))
}

/// `GET /new_session`
pub async fn new_session(State(state): State<AppState>) -> Json<NewSessionResponse> {
    Json(NewSessionResponse { session_id: state.engine.sessions().new_session() })
}

/// `POST /generate_questions`
pub async fn generate_questions(
    State(state): State<AppState>,
    Json(request): Json<QuestionsRequest>,
) -> Result<Json<String>, ApiError> {
    let document_text = resolve_document_text(
        &state,
        request.document_id.as_deref(),
        request.document_text.as_deref(),
        "Document",
    )
    .await?
    .unwrap_or_default();

    if document_text.is_empty() {
        return Err(ApiError::BadRequest("No document content provided.".to_string()));
    }

    let questions =
        state.engine.generate_questions(&document_text, request.num_questions).await?;
    Ok(Json(questions))
}

/// `POST /paraphrase`
pub async fn paraphrase(
    State(state): State<AppState>,
    Json(request): Json<ParaphraseRequest>,
) -> Result<Json<String>, ApiError> {
    let paraphrased = state.engine.paraphrase(&request.text).await?;
    Ok(Json(paraphrased))
}

/// `POST /extract_entities`
pub async fn extract_entities(
    State(state): State<AppState>,
    Form(form): Form<ExtractEntitiesForm>,
) -> Result<Json<EntitiesResponse>, ApiError> {
    let entities = state.engine.extract_entities(&form.text).await?;
    Ok(Json(EntitiesResponse { entities }))
}

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// `POST /admin/add_document`
pub async fn add_document(
    State(state): State<AppState>,
    Form(form): Form<AddDocumentForm>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let metadata = parse_metadata(&form.metadata)?;
    let document = Document { id: form.doc_id, text: form.document, metadata };

    let collection = &state.engine.config().default_collection;
    state.engine.store().add(collection, &document).await?;

    Ok((StatusCode::CREATED, Json(MessageResponse::new("Document added successfully"))))
}

/// `POST /admin/update_document`
pub async fn update_document(
    State(state): State<AppState>,
    Form(form): Form<UpdateDocumentForm>,
) -> Result<Json<MessageResponse>, ApiError> {
    let metadata = form.metadata.as_deref().map(parse_metadata).transpose()?;

    let collection = &state.engine.config().default_collection;
    state
        .engine
        .store()
        .update(collection, &form.doc_id, form.document.as_deref(), metadata.as_ref())
        .await?;

    Ok(Json(MessageResponse::new("Document updated successfully")))
}

/// `DELETE /admin/delete_document`
pub async fn delete_document(
    State(state): State<AppState>,
    Query(params): Query<DeleteDocumentParams>,
) -> Result<Json<MessageResponse>, ApiError> {
    let collection = &state.engine.config().default_collection;
    state.engine.store().delete(collection, &params.doc_id).await?;
    Ok(Json(MessageResponse::new("Document deleted successfully")))
}

/// `POST /admin/reload_data`
pub async fn reload_data(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let collection = &state.engine.config().default_collection;
    let count =
        loader::load_csv(state.engine.store().as_ref(), collection, &state.config.data_path)
            .await?;

    info!(count, "reloaded data from CSV");
    Ok((StatusCode::CREATED, Json(MessageResponse::new("Data reloaded successfully from CSV"))))
}
