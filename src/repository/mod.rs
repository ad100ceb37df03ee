mod schema;

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params, types::Type};

use crate::models::{Note, format_timestamp};

const NOTE_COLUMNS: &str = "id, title, content, created, changed";

pub struct Repository {
    conn: Connection,
}

impl Repository {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, rusqlite::Error> {
        let conn = Connection::open(path)?;

        Ok(Self { conn })
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self, rusqlite::Error> {
        let conn = Connection::open_in_memory()?;

        Ok(Self { conn })
    }

    pub fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(schema::CREATE_NOTES_TABLE)?;

        tracing::info!("DB migrations finished!");

        Ok(())
    }

    pub fn create_note(
        &self,
        title: &str,
        content: &str,
        now: &DateTime<Utc>,
    ) -> Result<Note, rusqlite::Error> {
        self.conn.query_row(
            &format!(
                "INSERT INTO notes (title, content, created, changed) VALUES (?1, ?2, ?3, ?3) \
                 RETURNING {NOTE_COLUMNS}"
            ),
            params![title, content, format_timestamp(now)],
            row_to_note,
        )
    }

    /// Rewrites title and content. `changed` never moves backwards, even if
    /// the wall clock does; `created` is left as stored.
    pub fn update_note(
        &self,
        id: i64,
        title: &str,
        content: &str,
        now: &DateTime<Utc>,
    ) -> Result<Option<Note>, rusqlite::Error> {
        self.conn
            .query_row(
                &format!(
                    "UPDATE notes SET title = ?1, content = ?2, changed = MAX(?3, changed) \
                     WHERE id = ?4 RETURNING {NOTE_COLUMNS}"
                ),
                params![title, content, format_timestamp(now), id],
                row_to_note,
            )
            .optional()
    }

    pub fn delete_note(&self, id: i64) -> Result<bool, rusqlite::Error> {
        let rows = self
            .conn
            .execute("DELETE FROM notes WHERE id = ?1", params![id])?;

        Ok(rows == 1)
    }

    pub fn get_one_note(&self, id: i64) -> Result<Option<Note>, rusqlite::Error> {
        self.conn
            .query_row(
                &format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = ?1"),
                params![id],
                row_to_note,
            )
            .optional()
    }

    /// Titles are not unique; the oldest note (lowest id) with the title wins.
    pub fn get_note_by_title(&self, title: &str) -> Result<Option<Note>, rusqlite::Error> {
        self.conn
            .query_row(
                &format!("SELECT {NOTE_COLUMNS} FROM notes WHERE title = ?1 ORDER BY id LIMIT 1"),
                params![title],
                row_to_note,
            )
            .optional()
    }

    pub fn get_all_notes(&self) -> Result<Vec<Note>, rusqlite::Error> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {NOTE_COLUMNS} FROM notes ORDER BY id"))?;

        let notes = stmt
            .query_map([], row_to_note)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(notes)
    }
}

fn row_to_note(row: &Row<'_>) -> Result<Note, rusqlite::Error> {
    Ok(Note {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        created: parse_timestamp(row, 3)?,
        changed: parse_timestamp(row, 4)?,
    })
}

fn parse_timestamp(row: &Row<'_>, idx: usize) -> Result<DateTime<Utc>, rusqlite::Error> {
    let raw: String = row.get(idx)?;

    DateTime::parse_from_rfc3339(&raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
