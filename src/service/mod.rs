use crate::{
    dto::{NoteRequest, NoteResponse},
    repository::Repository,
};

use chrono::Utc;

use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("title and content are required")]
    Validation,

    #[error("note not found")]
    NotFound,

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

#[derive(Clone)]
pub struct NoteService {
    repo: Arc<tokio::sync::Mutex<Repository>>,
}

impl NoteService {
    pub const fn new(repo: Arc<tokio::sync::Mutex<Repository>>) -> Self {
        Self { repo }
    }

    pub async fn create_note(&self, request: NoteRequest) -> Result<NoteResponse, ServiceError> {
        let (title, content) = required_fields(request)?;
        let now = Utc::now();

        let note = self
            .repo
            .lock()
            .await
            .create_note(&title, &content, &now)?;

        tracing::info!("Created note {}", note.id);

        Ok(note.into())
    }

    pub async fn update_note(
        &self,
        id: &str,
        request: NoteRequest,
    ) -> Result<NoteResponse, ServiceError> {
        let (title, content) = required_fields(request)?;
        let id = parse_id(id)?;
        let now = Utc::now();

        self.repo
            .lock()
            .await
            .update_note(id, &title, &content, &now)?
            .map(Into::into)
            .ok_or(ServiceError::NotFound)
    }

    pub async fn delete_note(&self, id: &str) -> Result<(), ServiceError> {
        let id = parse_id(id)?;

        if self.repo.lock().await.delete_note(id)? {
            tracing::info!("Deleted note {id}");
            Ok(())
        } else {
            Err(ServiceError::NotFound)
        }
    }

    pub async fn get_one_note(&self, id: &str) -> Result<NoteResponse, ServiceError> {
        let id = parse_id(id)?;

        self.repo
            .lock()
            .await
            .get_one_note(id)?
            .map(Into::into)
            .ok_or(ServiceError::NotFound)
    }

    pub async fn get_note_by_title(&self, title: &str) -> Result<NoteResponse, ServiceError> {
        self.repo
            .lock()
            .await
            .get_note_by_title(title)?
            .map(Into::into)
            .ok_or(ServiceError::NotFound)
    }

    pub async fn get_all_notes(&self) -> Result<Vec<NoteResponse>, ServiceError> {
        let notes = self.repo.lock().await.get_all_notes()?;

        Ok(notes.into_iter().map(Into::into).collect())
    }
}

/// Both fields must be present and non-empty.
fn required_fields(request: NoteRequest) -> Result<(String, String), ServiceError> {
    match (request.title, request.content) {
        (Some(title), Some(content)) if !title.is_empty() && !content.is_empty() => {
            Ok((title, content))
        }
        _ => Err(ServiceError::Validation),
    }
}

/// A path segment that is not an integer can never match a stored id.
fn parse_id(raw: &str) -> Result<i64, ServiceError> {
    raw.parse().map_err(|_| ServiceError::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> NoteService {
        let repo = Repository::open_in_memory().unwrap();
        repo.migrate().unwrap();
        NoteService::new(Arc::new(tokio::sync::Mutex::new(repo)))
    }

    fn request(title: Option<&str>, content: Option<&str>) -> NoteRequest {
        NoteRequest {
            title: title.map(str::to_string),
            content: content.map(str::to_string),
        }
    }

    #[test]
    fn required_fields_rejects_missing_or_empty() {
        for req in [
            request(None, Some("B")),
            request(Some("A"), None),
            request(Some(""), Some("B")),
            request(Some("A"), Some("")),
            request(None, None),
        ] {
            assert!(matches!(
                required_fields(req),
                Err(ServiceError::Validation)
            ));
        }

        assert_eq!(
            required_fields(request(Some("A"), Some("B"))).unwrap(),
            ("A".to_string(), "B".to_string())
        );
    }

    #[test]
    fn non_numeric_id_is_not_found() {
        assert!(matches!(parse_id("abc"), Err(ServiceError::NotFound)));
        assert!(matches!(parse_id("1.5"), Err(ServiceError::NotFound)));
        assert_eq!(parse_id("7").unwrap(), 7);
    }

    #[tokio::test]
    async fn invalid_create_does_not_insert() {
        let service = service();

        let result = service.create_note(request(Some("A"), None)).await;

        assert!(matches!(result, Err(ServiceError::Validation)));
        assert!(service.get_all_notes().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn validation_runs_before_id_lookup() {
        let service = service();

        let result = service.update_note("missing", request(None, None)).await;

        assert!(matches!(result, Err(ServiceError::Validation)));
    }

    #[tokio::test]
    async fn full_lifecycle() {
        let service = service();

        let created = service
            .create_note(request(Some("A"), Some("B")))
            .await
            .unwrap();
        assert_eq!(created.created, created.changed);

        let id = created.id.to_string();
        let updated = service
            .update_note(&id, request(Some("A2"), Some("B2")))
            .await
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created, created.created);
        assert!(updated.changed >= created.changed);

        assert_eq!(service.get_note_by_title("A2").await.unwrap(), updated);

        service.delete_note(&id).await.unwrap();
        assert!(matches!(
            service.get_one_note(&id).await,
            Err(ServiceError::NotFound)
        ));
        assert!(matches!(
            service.delete_note(&id).await,
            Err(ServiceError::NotFound)
        ));
    }
}
