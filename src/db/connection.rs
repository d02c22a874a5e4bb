use rusqlite::Connection;
use std::path::Path;

use crate::error::{CatalogueError, CatalogueResult};

/// Marker stored in the snapshot's `meta` table so a load can tell a real
/// catalogue file apart from any other SQLite database.
const FORMAT_MARKER: &str = "library-catalogue";
/// Snapshot schema version. Bumped if the table layout ever changes; loads
/// of a different version are rejected rather than migrated.
const SCHEMA_VERSION: &str = "1";

/// Open a brand-new snapshot file and lay down the full schema plus the
/// identifying `meta` rows. The caller guarantees no file exists at `path`,
/// so every snapshot is written from scratch.
pub(crate) fn create_snapshot(path: &Path) -> CatalogueResult<Connection> {
    let conn = Connection::open(path)?;
    conn.execute("PRAGMA foreign_keys = ON", [])?;

    conn.execute(
        "CREATE TABLE meta (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE categories (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            position INTEGER NOT NULL,
            name TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE books (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            category_id INTEGER NOT NULL,
            position INTEGER NOT NULL,
            title TEXT NOT NULL,
            author TEXT NOT NULL,
            isbn TEXT NOT NULL,
            kind TEXT NOT NULL,
            detail TEXT,
            FOREIGN KEY(category_id) REFERENCES categories(id) ON DELETE CASCADE
        )",
        [],
    )?;

    conn.execute(
        "INSERT INTO meta (key, value) VALUES ('format', ?1), ('version', ?2)",
        [FORMAT_MARKER, SCHEMA_VERSION],
    )?;

    Ok(conn)
}

/// Check the `meta` rows of an opened snapshot. Anything other than our
/// marker and current version is reported as corrupt data; a file that is
/// not SQLite at all fails earlier, on the first query.
pub(crate) fn verify_marker(conn: &Connection) -> CatalogueResult<()> {
    let format: String =
        conn.query_row("SELECT value FROM meta WHERE key = 'format'", [], |row| {
            row.get(0)
        })?;
    if format != FORMAT_MARKER {
        return Err(CatalogueError::CorruptData(format!(
            "unexpected format marker '{format}'"
        )));
    }

    let version: String =
        conn.query_row("SELECT value FROM meta WHERE key = 'version'", [], |row| {
            row.get(0)
        })?;
    if version != SCHEMA_VERSION {
        return Err(CatalogueError::CorruptData(format!(
            "unsupported snapshot version '{version}'"
        )));
    }

    Ok(())
}
