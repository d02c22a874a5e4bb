use rusqlite::{params, Connection};

use crate::error::CatalogueResult;
use crate::models::Category;

/// Insert one category row, returning its generated id so the caller can
/// link the category's books to it.
pub(crate) fn insert_category(
    conn: &Connection,
    position: usize,
    category: &Category,
) -> CatalogueResult<i64> {
    conn.execute(
        "INSERT INTO categories (position, name) VALUES (?1, ?2)",
        params![position as i64, category.name],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Retrieve every category id and name in catalogue order. The `position`
/// column is the single source of truth for ordering, so a reconstructed
/// catalogue lists categories exactly as the saved one did.
pub(crate) fn fetch_categories(conn: &Connection) -> CatalogueResult<Vec<(i64, String)>> {
    let mut stmt = conn.prepare("SELECT id, name FROM categories ORDER BY position")?;

    let categories = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(categories)
}
