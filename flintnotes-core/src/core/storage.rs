use crate::core::note::now_iso;
use crate::{FlintnotesError, Result};
use rusqlite::Connection;
use std::path::Path;

pub struct Storage {
    conn: Connection,
}

impl Storage {
    /// Opens (or creates) the note database at `path` and brings its schema
    /// up to date. Idempotent; called at every process start.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FlintnotesError::Initialization`] if the database
    /// cannot be opened, the `notes` table cannot be created, or migration
    /// fails. None of these are recoverable by the caller.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path).map_err(init_err)?;
        conn.execute_batch(include_str!("schema.sql"))
            .map_err(init_err)?;
        migrate(&conn).map_err(init_err)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }
}

fn init_err(e: rusqlite::Error) -> FlintnotesError {
    FlintnotesError::Initialization(e.to_string())
}

/// Brings a legacy `notes` table up to the current column set.
///
/// Databases written before timestamps were tracked lack the `createdAt` and
/// `updatedAt` columns. Add each missing column, then backfill null or empty
/// cells with the current time, one column at a time.
fn migrate(conn: &Connection) -> rusqlite::Result<()> {
    let now = now_iso();
    for column in ["createdAt", "updatedAt"] {
        let column_exists: bool = conn.query_row(
            "SELECT COUNT(*) FROM pragma_table_info('notes') WHERE name = ?1",
            [column],
            |row| row.get::<_, i64>(0).map(|count| count > 0),
        )?;

        if !column_exists {
            conn.execute(&format!("ALTER TABLE notes ADD COLUMN {column} TEXT"), [])?;
        }

        let backfilled = conn.execute(
            &format!("UPDATE notes SET {column} = ?1 WHERE {column} IS NULL OR {column} = ''"),
            [&now],
        )?;
        if backfilled > 0 {
            log::debug!("backfilled {backfilled} notes missing {column}");
        }
    }
    Ok(())
}
