use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_macros::debug_handler;
use utoipa::OpenApi;

use std::sync::Arc;

use crate::{
    dto::{MessageResponse, NoteRequest, NoteResponse},
    service::{NoteService, ServiceError},
};


const NOTE_NOT_FOUND: &str = "Note not found";
const FIELDS_REQUIRED: &str = "Title and content are required";

#[derive(OpenApi)]
#[openapi(
    paths(
        get_all_notes,
        get_one_note,
        get_note_by_title,
        create_note,
        update_note,
        delete_note
    ),
    components(schemas(NoteResponse, NoteRequest, MessageResponse)),
    tags(
        (name = "notes", description = "Notes management API")
    )
)]
pub struct ApiDoc;

fn message(status: StatusCode, text: &str) -> Response {
    (status, Json(MessageResponse::new(text))).into_response()
}

/// Any body that does not decode into a `NoteRequest` is reported the same
/// way as a missing field.
fn decode(payload: Result<Json<NoteRequest>, JsonRejection>) -> Result<NoteRequest, ServiceError> {
    payload.map(|Json(request)| request).map_err(|e| {
        tracing::debug!("rejected note body: {}", e);
        ServiceError::Validation
    })
}

#[utoipa::path(
    get,
    path = "/notes",
    responses(
        (status = 200, description = "List of all notes", body = Vec<NoteResponse>),
        (status = 404, description = "No notes stored", body = MessageResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn get_all_notes(State(service): State<Arc<NoteService>>) -> Response {
    match service.get_all_notes().await {
        Ok(notes) if notes.is_empty() => message(StatusCode::NOT_FOUND, "No notes found"),
        Ok(notes) => (StatusCode::OK, Json(notes)).into_response(),
        Err(e) => {
            tracing::error!("failed to get note entries: {}", e);
            message(StatusCode::INTERNAL_SERVER_ERROR, "Error retrieving notes")
        }
    }
}

#[utoipa::path(
    get,
    path = "/note/{id}",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note found", body = NoteResponse),
        (status = 404, description = "Note not found", body = MessageResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn get_one_note(
    State(service): State<Arc<NoteService>>,
    Path(id): Path<String>,
) -> Response {
    match service.get_one_note(&id).await {
        Ok(note) => (StatusCode::OK, Json(note)).into_response(),
        Err(ServiceError::NotFound) => message(StatusCode::NOT_FOUND, NOTE_NOT_FOUND),
        Err(e) => {
            tracing::error!("failed to get note entry {}: {}", id, e);
            message(StatusCode::INTERNAL_SERVER_ERROR, "Error retrieving note")
        }
    }
}

#[utoipa::path(
    get,
    path = "/note/read/{title}",
    params(
        ("title" = String, Path, description = "Exact note title")
    ),
    responses(
        (status = 200, description = "Oldest note with this title", body = NoteResponse),
        (status = 404, description = "Note not found", body = MessageResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn get_note_by_title(
    State(service): State<Arc<NoteService>>,
    Path(title): Path<String>,
) -> Response {
    match service.get_note_by_title(&title).await {
        Ok(note) => (StatusCode::OK, Json(note)).into_response(),
        Err(ServiceError::NotFound) => message(StatusCode::NOT_FOUND, NOTE_NOT_FOUND),
        Err(e) => {
            tracing::error!("failed to get note entry by title: {}", e);
            message(StatusCode::INTERNAL_SERVER_ERROR, "Error retrieving note")
        }
    }
}

#[utoipa::path(
    post,
    path = "/note/",
    request_body = NoteRequest,
    responses(
        (status = 201, description = "Note created successfully", body = NoteResponse),
        (status = 400, description = "Title or content missing", body = MessageResponse),
        (status = 409, description = "Note could not be stored", body = MessageResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn create_note(
    State(service): State<Arc<NoteService>>,
    payload: Result<Json<NoteRequest>, JsonRejection>,
) -> Response {
    let result = match decode(payload) {
        Ok(request) => service.create_note(request).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(note) => (StatusCode::CREATED, Json(note)).into_response(),
        Err(ServiceError::Validation) => message(StatusCode::BAD_REQUEST, FIELDS_REQUIRED),
        Err(e) => {
            tracing::error!("failed to create note entry: {}", e);
            message(StatusCode::CONFLICT, "Error creating note")
        }
    }
}

#[utoipa::path(
    put,
    path = "/note/{id}",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    request_body = NoteRequest,
    responses(
        (status = 200, description = "Note updated successfully", body = NoteResponse),
        (status = 400, description = "Title or content missing", body = MessageResponse),
        (status = 409, description = "Note not found or could not be stored", body = MessageResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn update_note(
    State(service): State<Arc<NoteService>>,
    Path(id): Path<String>,
    payload: Result<Json<NoteRequest>, JsonRejection>,
) -> Response {
    let result = match decode(payload) {
        Ok(request) => service.update_note(&id, request).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(note) => (StatusCode::OK, Json(note)).into_response(),
        Err(ServiceError::Validation) => message(StatusCode::BAD_REQUEST, FIELDS_REQUIRED),
        Err(ServiceError::NotFound) => message(StatusCode::CONFLICT, NOTE_NOT_FOUND),
        Err(e) => {
            tracing::error!("failed to update note entry {}: {}", id, e);
            message(StatusCode::CONFLICT, "Error updating note")
        }
    }
}

#[utoipa::path(
    delete,
    path = "/note/{id}",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    responses(
        (status = 204, description = "Note deleted successfully"),
        (status = 409, description = "Note not found", body = MessageResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn delete_note(
    State(service): State<Arc<NoteService>>,
    Path(id): Path<String>,
) -> Response {
    match service.delete_note(&id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(ServiceError::NotFound) => message(StatusCode::CONFLICT, NOTE_NOT_FOUND),
        Err(e) => {
            tracing::error!("failed to delete note entry {}: {}", id, e);
            message(StatusCode::INTERNAL_SERVER_ERROR, "Error deleting note")
        }
    }
}
