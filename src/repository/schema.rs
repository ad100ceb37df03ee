/// `notes` table; a no-op when the table already exists.
pub const CREATE_NOTES_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS notes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    content TEXT NOT NULL,
    created TEXT NOT NULL,
    changed TEXT NOT NULL
)
";
