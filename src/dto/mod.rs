use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Note, format_timestamp};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NoteResponse {
    /// Note ID
    pub id: i64,
    /// Note title
    pub title: String,
    /// Note content
    pub content: String,
    /// Creation time, ISO 8601 (UTC)
    pub created: String,
    /// Last modification time, ISO 8601 (UTC)
    pub changed: String,
}

impl From<Note> for NoteResponse {
    fn from(note: Note) -> Self {
        Self {
            id: note.id,
            created: format_timestamp(&note.created),
            changed: format_timestamp(&note.changed),
            title: note.title,
            content: note.content,
        }
    }
}

/// Body of both create and update requests. Fields are optional at the wire
/// level so that absence is reported as a validation error, not a decode
/// failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct NoteRequest {
    /// Note title, must be non-empty
    pub title: Option<String>,
    /// Note content, must be non-empty
    pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
