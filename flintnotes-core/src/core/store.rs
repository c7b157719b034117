//! CRUD operations over the `notes` table.

use crate::core::note::{now_iso, Note};
use crate::{FlintnotesError, Result, Storage};
use rusqlite::Connection;
use std::path::Path;

/// An open note collection backed by a SQLite database.
///
/// `NoteStore` is the primary interface for all note reads and mutations.
/// It owns the underlying [`Storage`] connection; mutating operations take
/// `&mut self`, so concurrent writers over one store are unrepresentable.
///
/// All `isMarkdown` coercion happens at this boundary: reads always produce
/// a genuine `bool`, writes always persist 0 or 1.
pub struct NoteStore {
    storage: Storage,
}

impl NoteStore {
    /// Opens the note database at `path`, creating and migrating it as needed.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FlintnotesError::Initialization`] if the store cannot
    /// be opened or migrated.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            storage: Storage::open(path)?,
        })
    }

    /// Returns the underlying SQLite connection.
    pub fn connection(&self) -> &Connection {
        self.storage.connection()
    }

    pub(crate) fn connection_mut(&mut self) -> &mut Connection {
        self.storage.connection_mut()
    }

    /// Inserts a new note and returns its assigned ID.
    ///
    /// `createdAt` and `updatedAt` are both set to the current time.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FlintnotesError::Database`] if the write fails.
    pub fn create(&mut self, title: &str, content: &str, is_markdown: bool) -> Result<i64> {
        let now = now_iso();
        self.storage.connection().execute(
            "INSERT INTO notes (title, content, isMarkdown, createdAt, updatedAt)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![title, content, is_markdown as i64, now, now],
        )?;
        Ok(self.storage.connection().last_insert_rowid())
    }

    /// Returns all notes, most recently modified first.
    pub fn get_all(&self) -> Result<Vec<Note>> {
        let mut stmt = self.connection().prepare(
            "SELECT id, title, content, isMarkdown, createdAt, updatedAt
             FROM notes ORDER BY updatedAt DESC",
        )?;
        let notes = stmt
            .query_map([], map_note_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(notes)
    }

    /// Fetches a single note by ID.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FlintnotesError::NoteNotFound`] if no note with `id`
    /// exists.
    pub fn get_by_id(&self, id: i64) -> Result<Note> {
        match self.connection().query_row(
            "SELECT id, title, content, isMarkdown, createdAt, updatedAt
             FROM notes WHERE id = ?1",
            rusqlite::params![id],
            map_note_row,
        ) {
            Ok(note) => Ok(note),
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(FlintnotesError::NoteNotFound(id)),
            Err(e) => Err(e.into()),
        }
    }

    /// Updates the title, content, and Markdown flag of an existing note,
    /// refreshing `updatedAt`. `id` and `createdAt` are never touched.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FlintnotesError::NoteNotFound`] if no note with `id`
    /// exists, or [`crate::FlintnotesError::Database`] for any other SQLite
    /// failure.
    pub fn update(
        &mut self,
        id: i64,
        title: &str,
        content: &str,
        is_markdown: bool,
    ) -> Result<()> {
        let now = now_iso();
        let changed = self.storage.connection().execute(
            "UPDATE notes SET title = ?1, content = ?2, isMarkdown = ?3, updatedAt = ?4
             WHERE id = ?5",
            rusqlite::params![title, content, is_markdown as i64, now, id],
        )?;

        // SQLite UPDATE on a missing row succeeds but touches zero rows.
        if changed == 0 {
            return Err(FlintnotesError::NoteNotFound(id));
        }
        Ok(())
    }

    /// Permanently deletes a note. There is no soft-delete or tombstone.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FlintnotesError::NoteNotFound`] if no note with `id`
    /// exists.
    pub fn delete(&mut self, id: i64) -> Result<()> {
        let changed = self
            .storage
            .connection()
            .execute("DELETE FROM notes WHERE id = ?1", rusqlite::params![id])?;
        if changed == 0 {
            return Err(FlintnotesError::NoteNotFound(id));
        }
        Ok(())
    }

    /// Returns notes whose title or content contains `query`, matched
    /// case-insensitively, most recently modified first.
    ///
    /// An empty query matches every note.
    pub fn search(&self, query: &str) -> Result<Vec<Note>> {
        let pattern = format!("%{}%", escape_like(query));
        let mut stmt = self.connection().prepare(
            "SELECT id, title, content, isMarkdown, createdAt, updatedAt
             FROM notes
             WHERE title LIKE ?1 ESCAPE '\\' OR content LIKE ?1 ESCAPE '\\'
             ORDER BY updatedAt DESC",
        )?;
        let notes = stmt
            .query_map([&pattern], map_note_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(notes)
    }

    /// Deletes every note, returning how many were removed.
    pub fn clear(&mut self) -> Result<usize> {
        Ok(self.storage.connection().execute("DELETE FROM notes", [])?)
    }
}

fn map_note_row(row: &rusqlite::Row) -> rusqlite::Result<Note> {
    Ok(Note {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        is_markdown: row.get::<_, i64>(3).map(|v| v != 0)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

/// Escapes SQL LIKE metacharacters so user input matches literally.
fn escape_like(query: &str) -> String {
    query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn open_store(temp: &NamedTempFile) -> NoteStore {
        NoteStore::open(temp.path()).unwrap()
    }

    #[test]
    fn test_create_and_get_by_id() {
        let temp = NamedTempFile::new().unwrap();
        let mut store = open_store(&temp);

        let id = store.create("Groceries", "- eggs\n- milk", true).unwrap();
        let note = store.get_by_id(id).unwrap();

        assert_eq!(note.id, id);
        assert_eq!(note.title, "Groceries");
        assert_eq!(note.content, "- eggs\n- milk");
        assert!(note.is_markdown);
        assert_eq!(note.created_at, note.updated_at);
    }

    #[test]
    fn test_get_all_returns_created_note() {
        let temp = NamedTempFile::new().unwrap();
        let mut store = open_store(&temp);

        store.create("A", "B", false).unwrap();

        let notes = store.get_all().unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title, "A");
        assert_eq!(notes[0].content, "B");
        assert!(!notes[0].is_markdown);
    }

    #[test]
    fn test_get_all_orders_by_updated_at_desc() {
        let temp = NamedTempFile::new().unwrap();
        let mut store = open_store(&temp);

        let first = store.create("first", "", false).unwrap();
        let second = store.create("second", "", false).unwrap();
        let third = store.create("third", "", false).unwrap();

        // Force distinct modification times; same-millisecond creates would
        // make the ordering ambiguous.
        for (id, stamp) in [
            (first, "2024-01-02T00:00:00.000Z"),
            (second, "2024-01-03T00:00:00.000Z"),
            (third, "2024-01-01T00:00:00.000Z"),
        ] {
            store
                .connection()
                .execute(
                    "UPDATE notes SET updatedAt = ?1 WHERE id = ?2",
                    rusqlite::params![stamp, id],
                )
                .unwrap();
        }

        let titles: Vec<String> = store
            .get_all()
            .unwrap()
            .into_iter()
            .map(|n| n.title)
            .collect();
        assert_eq!(titles, vec!["second", "first", "third"]);
    }

    #[test]
    fn test_update_refreshes_updated_at_only() {
        let temp = NamedTempFile::new().unwrap();
        let mut store = open_store(&temp);

        let id = store.create("before", "body", false).unwrap();
        let original = store.get_by_id(id).unwrap();

        store.update(id, "after", "new body", true).unwrap();
        let updated = store.get_by_id(id).unwrap();

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.title, "after");
        assert_eq!(updated.content, "new body");
        assert!(updated.is_markdown);
        assert_eq!(updated.created_at, original.created_at);
        assert!(updated.updated_at >= original.updated_at);
    }

    #[test]
    fn test_update_missing_note_is_not_found() {
        let temp = NamedTempFile::new().unwrap();
        let mut store = open_store(&temp);

        let result = store.update(999, "t", "c", false);
        assert!(matches!(result, Err(FlintnotesError::NoteNotFound(999))));
    }

    #[test]
    fn test_delete_removes_row() {
        let temp = NamedTempFile::new().unwrap();
        let mut store = open_store(&temp);

        let keep = store.create("keep", "", false).unwrap();
        let gone = store.create("gone", "", false).unwrap();

        store.delete(gone).unwrap();

        assert_eq!(store.get_all().unwrap().len(), 1);
        assert!(store.get_by_id(keep).is_ok());
        assert!(matches!(
            store.get_by_id(gone),
            Err(FlintnotesError::NoteNotFound(_))
        ));
    }

    #[test]
    fn test_delete_missing_note_leaves_count_unchanged() {
        let temp = NamedTempFile::new().unwrap();
        let mut store = open_store(&temp);

        store.create("only", "", false).unwrap();

        let result = store.delete(12345);
        assert!(matches!(result, Err(FlintnotesError::NoteNotFound(12345))));
        assert_eq!(store.get_all().unwrap().len(), 1);
    }

    #[test]
    fn test_is_markdown_persists_as_integer() {
        let temp = NamedTempFile::new().unwrap();
        let mut store = open_store(&temp);

        let id = store.create("md", "", true).unwrap();

        let raw: i64 = store
            .connection()
            .query_row(
                "SELECT isMarkdown FROM notes WHERE id = ?1",
                rusqlite::params![id],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(raw, 1);
        assert!(store.get_by_id(id).unwrap().is_markdown);
    }

    #[test]
    fn test_search_matches_title_and_content() {
        let temp = NamedTempFile::new().unwrap();
        let mut store = open_store(&temp);

        store.create("Shopping List", "eggs and milk", false).unwrap();
        store.create("Meeting", "discuss SHOPPING budget", false).unwrap();
        store.create("Journal", "nothing relevant", false).unwrap();

        let hits = store.search("shopping").unwrap();
        assert_eq!(hits.len(), 2);
        assert!(store.search("zzz").unwrap().is_empty());
    }

    #[test]
    fn test_search_treats_wildcards_literally() {
        let temp = NamedTempFile::new().unwrap();
        let mut store = open_store(&temp);

        store.create("Progress", "100% done", false).unwrap();
        store.create("Other", "item 1004 pending", false).unwrap();

        let hits = store.search("100%").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Progress");
    }

    #[test]
    fn test_clear_empties_store() {
        let temp = NamedTempFile::new().unwrap();
        let mut store = open_store(&temp);

        store.create("a", "", false).unwrap();
        store.create("b", "", false).unwrap();

        assert_eq!(store.clear().unwrap(), 2);
        assert!(store.get_all().unwrap().is_empty());
    }
}
