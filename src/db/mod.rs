//! Snapshot persistence split across logical submodules. A snapshot is a
//! self-contained SQLite file holding the whole catalogue graph; saving
//! always writes it from scratch inside one transaction, loading rebuilds
//! every category, book, and back-reference in a single pass.

mod books;
mod categories;
mod connection;

use std::fs;
use std::path::Path;

use rusqlite::Connection;

use crate::catalogue::Catalogue;
use crate::error::{CatalogueError, CatalogueResult};
use crate::models::Category;

/// Knobs for [`save_catalogue`]. Defaults create missing parent directories
/// and refuse to clobber an existing file.
#[derive(Debug, Clone)]
pub struct SaveOptions {
    /// Create the snapshot's parent directory (and any ancestors) when it is
    /// missing. When off, a missing parent fails the save instead.
    pub make_dirs: bool,
    /// Replace an existing file at the target path. When off, an existing
    /// file fails the save and is left untouched.
    pub overwrite: bool,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            make_dirs: true,
            overwrite: false,
        }
    }
}

/// Write the full catalogue graph to a snapshot file at `path`.
///
/// The collision check runs before anything touches the filesystem, so a
/// refused save leaves the existing file byte-for-byte intact. All rows go
/// in under one transaction; a failure mid-write rolls the file back to an
/// empty schema rather than leaving half a graph behind.
pub fn save_catalogue(
    catalogue: &Catalogue,
    path: &Path,
    options: &SaveOptions,
) -> CatalogueResult<()> {
    if path.exists() {
        if !options.overwrite {
            return Err(CatalogueError::AlreadyExists(path.to_path_buf()));
        }
        // Start from a fresh file rather than mutating the stale snapshot.
        fs::remove_file(path)?;
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            if options.make_dirs {
                fs::create_dir_all(parent)?;
            } else {
                return Err(CatalogueError::PathUnavailable(parent.to_path_buf()));
            }
        }
    }

    let mut conn = connection::create_snapshot(path)?;
    let tx = conn.transaction()?;

    for (position, category) in catalogue.categories.iter().enumerate() {
        let category_id = categories::insert_category(&tx, position, category)?;
        for (shelf_position, book) in category.books.iter().enumerate() {
            books::insert_book(&tx, category_id, shelf_position, book)?;
        }
    }

    tx.commit()?;
    tracing::info!(
        "saved catalogue snapshot with {} categories to {}",
        catalogue.categories.len(),
        path.display()
    );
    Ok(())
}

/// Reconstruct a catalogue from the snapshot at `path`.
///
/// A path that is not a file fails with [`CatalogueError::Missing`]. Any
/// other failure — not a SQLite file, wrong format marker, unknown book
/// kind — is logged with its underlying cause and folded into
/// [`CatalogueError::CorruptData`] at this boundary; nothing propagates
/// past it.
pub fn load_catalogue(path: &Path) -> CatalogueResult<Catalogue> {
    if !path.is_file() {
        return Err(CatalogueError::Missing(path.to_path_buf()));
    }

    match read_snapshot(path) {
        Ok(catalogue) => {
            tracing::info!(
                "loaded catalogue snapshot with {} categories from {}",
                catalogue.categories.len(),
                path.display()
            );
            Ok(catalogue)
        }
        Err(err) => {
            tracing::error!(
                "file at {} is not a valid catalogue snapshot: {err}",
                path.display()
            );
            Err(CatalogueError::CorruptData(err.to_string()))
        }
    }
}

/// Read and rebuild the whole graph. Categories come back in saved order,
/// each with its books in shelved order and their back-references pointing
/// at the owning category's name.
fn read_snapshot(path: &Path) -> CatalogueResult<Catalogue> {
    let conn = Connection::open(path)?;
    connection::verify_marker(&conn)?;

    let mut restored = Vec::new();
    for (category_id, name) in categories::fetch_categories(&conn)? {
        let books = books::fetch_books_for_category(&conn, category_id, &name)?;
        restored.push(Category { name, books });
    }

    Ok(Catalogue::with_categories(restored))
}
