use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
    Json as RequestJson,
};
use serde::Serialize;
use std::sync::Arc;

use crate::error::ReducerError;
use crate::logic::ReplayError;
use crate::model::{
    Action, DocumentSummary, Id, NewDocument, Operation, PageDataArchitectureDocument,
    PageDataArchitectureState,
};
use crate::store::traits::{Store, UpdateOutcome};

pub type AppState<S> = Arc<S>;
pub type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

/// Simple health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ErrorResponse {
    pub fn new(message: &str) -> Self {
        Self {
            error: message.to_string(),
            code: None,
        }
    }

    pub fn with_code(message: &str, code: &str) -> Self {
        Self {
            error: message.to_string(),
            code: Some(code.to_string()),
        }
    }
}

/// Request body for `POST /documents/:id/actions`: one action or a batch
#[derive(Debug, Clone, PartialEq)]
pub enum ActionRequest {
    Batch(Vec<Action>),
    Single(Action),
}

impl ActionRequest {
    /// An array is a batch, anything else a single action. Parse errors name
    /// the offending field.
    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        if value.is_array() {
            serde_json::from_value(value).map(ActionRequest::Batch)
        } else {
            serde_json::from_value(value).map(ActionRequest::Single)
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchResponse {
    pub revision: u64,
    pub operations: Vec<Operation>,
    pub state: PageDataArchitectureState,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayResponse {
    pub revision: u64,
    pub consistent: bool,
    pub state: PageDataArchitectureState,
}

fn internal_error(context: &str, e: anyhow::Error) -> (StatusCode, Json<ErrorResponse>) {
    log::error!("{}: {:#}", context, e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(&format!("{}: {}", context, e))),
    )
}

fn document_not_found(id: &Id) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::with_code(
            &format!("Document with ID {} not found", id),
            "DOCUMENT_NOT_FOUND",
        )),
    )
}

fn bad_request(message: &str, code: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::with_code(message, code)),
    )
}

fn rejected(e: &ReducerError) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ErrorResponse::with_code(&e.to_string(), e.code())),
    )
}

async fn load_document<S: Store>(
    store: &S,
    id: &Id,
) -> Result<PageDataArchitectureDocument, (StatusCode, Json<ErrorResponse>)> {
    match store.get_document(id).await {
        Ok(Some(document)) => Ok(document),
        Ok(None) => Err(document_not_found(id)),
        Err(e) => Err(internal_error("Failed to load document", e)),
    }
}

pub async fn list_documents<S: Store>(
    State(store): State<AppState<S>>,
) -> ApiResult<ListResponse<DocumentSummary>> {
    let documents = store
        .list_documents()
        .await
        .map_err(|e| internal_error("Failed to list documents", e))?;

    let items: Vec<DocumentSummary> = documents.iter().map(|d| d.summary()).collect();
    let total = items.len();
    Ok(Json(ListResponse { items, total }))
}

pub async fn create_document<S: Store>(
    State(store): State<AppState<S>>,
    RequestJson(request): RequestJson<NewDocument>,
) -> Result<(StatusCode, Json<PageDataArchitectureDocument>), (StatusCode, Json<ErrorResponse>)> {
    let document = PageDataArchitectureDocument::from_request(request);
    let inserted = store
        .insert_document(document.clone())
        .await
        .map_err(|e| internal_error("Failed to create document", e))?;
    if !inserted {
        return Err((
            StatusCode::CONFLICT,
            Json(ErrorResponse::with_code(
                &format!("Document with ID {} already exists", document.header.id),
                "DOCUMENT_EXISTS",
            )),
        ));
    }

    log::info!("created document {} ({})", document.header.id, document.header.name);
    Ok((StatusCode::CREATED, Json(document)))
}

pub async fn get_document<S: Store>(
    State(store): State<AppState<S>>,
    Path(id): Path<Id>,
) -> ApiResult<PageDataArchitectureDocument> {
    load_document(&*store, &id).await.map(Json)
}

pub async fn get_document_state<S: Store>(
    State(store): State<AppState<S>>,
    Path(id): Path<Id>,
) -> ApiResult<PageDataArchitectureState> {
    let document = load_document(&*store, &id).await?;
    Ok(Json(document.state))
}

pub async fn list_operations<S: Store>(
    State(store): State<AppState<S>>,
    Path(id): Path<Id>,
) -> ApiResult<ListResponse<Operation>> {
    let document = load_document(&*store, &id).await?;
    let total = document.operations.len();
    Ok(Json(ListResponse {
        items: document.operations,
        total,
    }))
}

pub async fn delete_document<S: Store>(
    State(store): State<AppState<S>>,
    Path(id): Path<Id>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    match store.delete_document(&id).await {
        Ok(true) => {
            log::info!("deleted document {}", id);
            Ok(StatusCode::NO_CONTENT)
        }
        Ok(false) => Err(document_not_found(&id)),
        Err(e) => Err(internal_error("Failed to delete document", e)),
    }
}

/// Apply one action, or a batch atomically, and persist the result.
///
/// Load, dispatch and save run as one store update, so concurrent requests
/// against the same document are applied one after another.
pub async fn dispatch_actions<S: Store>(
    State(store): State<AppState<S>>,
    Path(id): Path<Id>,
    body: Result<RequestJson<serde_json::Value>, JsonRejection>,
) -> ApiResult<DispatchResponse> {
    let RequestJson(body) = body.map_err(|e| bad_request(&e.body_text(), "INVALID_JSON"))?;
    let request = ActionRequest::from_value(body)
        .map_err(|e| bad_request(&format!("Invalid action: {}", e), "INVALID_ACTION"))?;

    let outcome = store
        .update_document(&id, move |document| {
            let operations = match request {
                ActionRequest::Single(action) => document
                    .dispatch(action)
                    .map(|operation| vec![operation.clone()]),
                ActionRequest::Batch(actions) => document.dispatch_all(actions),
            }?;
            Ok::<_, ReducerError>(DispatchResponse {
                revision: document.header.revision,
                operations,
                state: document.state.clone(),
            })
        })
        .await
        .map_err(|e| internal_error("Failed to save document", e))?;

    match outcome {
        UpdateOutcome::Applied(response) => Ok(Json(response)),
        UpdateOutcome::Rejected(e) => Err(rejected(&e)),
        UpdateOutcome::NotFound => Err(document_not_found(&id)),
    }
}

/// Re-run the operation log and report whether it reproduces the stored state.
pub async fn replay_document<S: Store>(
    State(store): State<AppState<S>>,
    Path(id): Path<Id>,
) -> ApiResult<ReplayResponse> {
    let document = load_document(&*store, &id).await?;

    match document.replay() {
        Ok(state) => Ok(Json(ReplayResponse {
            revision: document.header.revision,
            consistent: state == document.state,
            state,
        })),
        Err(e @ ReplayError::Hash(_)) => Err(internal_error("Failed to replay document", e.into())),
        Err(e) => Err((
            StatusCode::CONFLICT,
            Json(ErrorResponse::with_code(&e.to_string(), "REPLAY_FAILED")),
        )),
    }
}
