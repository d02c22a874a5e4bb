use rusqlite::{params, Connection};

use crate::error::{CatalogueError, CatalogueResult};
use crate::models::{Book, BookKind};

/// Flatten a [`BookKind`] into its stored `(kind, detail)` column pair. The
/// detail column carries the single variant payload and stays NULL for plain
/// books.
fn kind_columns(kind: &BookKind) -> (&'static str, Option<&str>) {
    match kind {
        BookKind::Standard => ("book", None),
        BookKind::Dictionary { language } => ("dictionary", Some(language)),
        BookKind::Encyclopedia { subject } => ("encyclopedia", Some(subject)),
        BookKind::Magazine { issue } => ("magazine", Some(issue)),
        BookKind::Newspaper { issue } => ("newspaper", Some(issue)),
    }
}

/// Rebuild a [`BookKind`] from its stored column pair. A kind tag we do not
/// recognize, or a variant row missing its payload, means the file was not
/// written by us and is reported as corrupt.
fn kind_from_columns(kind: &str, detail: Option<String>) -> CatalogueResult<BookKind> {
    let payload = |detail: Option<String>| {
        detail.ok_or_else(|| {
            CatalogueError::CorruptData(format!("'{kind}' row is missing its detail column"))
        })
    };

    match kind {
        "book" => Ok(BookKind::Standard),
        "dictionary" => Ok(BookKind::Dictionary {
            language: payload(detail)?,
        }),
        "encyclopedia" => Ok(BookKind::Encyclopedia {
            subject: payload(detail)?,
        }),
        "magazine" => Ok(BookKind::Magazine {
            issue: payload(detail)?,
        }),
        "newspaper" => Ok(BookKind::Newspaper {
            issue: payload(detail)?,
        }),
        other => Err(CatalogueError::CorruptData(format!(
            "unknown book kind '{other}'"
        ))),
    }
}

/// Insert one book row under its owning category. The row link doubles as
/// the serialized back-reference.
pub(crate) fn insert_book(
    conn: &Connection,
    category_id: i64,
    position: usize,
    book: &Book,
) -> CatalogueResult<()> {
    let (kind, detail) = kind_columns(&book.kind);
    conn.execute(
        "INSERT INTO books (category_id, position, title, author, isbn, kind, detail)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            category_id,
            position as i64,
            book.title,
            book.author,
            book.isbn,
            kind,
            detail
        ],
    )?;
    Ok(())
}

/// Get every book belonging to one category, in shelved order, with the
/// category back-reference already resolved to `category_name`.
pub(crate) fn fetch_books_for_category(
    conn: &Connection,
    category_id: i64,
    category_name: &str,
) -> CatalogueResult<Vec<Book>> {
    let mut stmt = conn.prepare(
        "SELECT title, author, isbn, kind, detail
         FROM books
         WHERE category_id = ?1
         ORDER BY position",
    )?;

    let rows = stmt
        .query_map([category_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, Option<String>>(4)?,
            ))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let mut books = Vec::with_capacity(rows.len());
    for (title, author, isbn, kind, detail) in rows {
        books.push(Book {
            title,
            author,
            isbn,
            kind: kind_from_columns(&kind, detail)?,
            category: Some(category_name.to_string()),
        });
    }

    Ok(books)
}
