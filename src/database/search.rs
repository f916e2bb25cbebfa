//! Paginated substring search over the item table.

use serde_json::{Map, Value};
use sqlx::Row;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::rows::row_to_json;

/// Fixed page size for item listings.
pub const PAGE_SIZE: i64 = 50;

/// One page of items plus the total page count for the same search term.
#[derive(Debug)]
pub struct SearchPage {
    pub items: Vec<Map<String, Value>>,
    pub total_pages: i64,
}

// Rows are numbered densely from 1 over the filtered set, ordered by the
// immutable primary key, so a fixed term always yields the same windows.
const SEARCH_SQL: &str = r#"
    WITH ordered_items AS (
        SELECT *, ROW_NUMBER() OVER (ORDER BY "ItemID") AS "RowNum"
        FROM "iteminfo"
        WHERE "ItemName" LIKE $1
    )
    SELECT * FROM ordered_items
    WHERE "RowNum" BETWEEN $2 AND $3
    ORDER BY "RowNum"
"#;

const COUNT_SQL: &str = r#"SELECT COUNT(*) AS count FROM "iteminfo" WHERE "ItemName" LIKE $1"#;

/// Fetch one page of items whose name contains `search`.
///
/// An empty term matches every row with a non-null name. Pages past the end
/// of the filtered set come back empty, while `total_pages` still reports
/// the true count.
pub async fn search_items(page: i64, search: &str) -> Result<SearchPage, DatabaseError> {
    let pool = DatabaseManager::pool().await?;

    let pattern = format!("%{}%", search);
    let (start_row, end_row) = page_window(page);

    let rows = sqlx::query(SEARCH_SQL)
        .bind(&pattern)
        .bind(start_row)
        .bind(end_row)
        .fetch_all(&pool)
        .await?;

    let count_row = sqlx::query(COUNT_SQL)
        .bind(&pattern)
        .fetch_one(&pool)
        .await?;
    let matching_rows: i64 = count_row.try_get("count")?;

    let items = rows
        .iter()
        .map(|row| row_to_json(row, &["RowNum"]))
        .collect();

    Ok(SearchPage {
        items,
        total_pages: total_pages(matching_rows),
    })
}

/// Inclusive row-number window covering the 1-based page `page`.
/// Non-positive input is clamped to the first page.
fn page_window(page: i64) -> (i64, i64) {
    let page = page.max(1);
    ((page - 1) * PAGE_SIZE + 1, page * PAGE_SIZE)
}

/// Total page count. An empty result set is reported as one trivial empty
/// page rather than zero pages.
fn total_pages(matching_rows: i64) -> i64 {
    ((matching_rows + PAGE_SIZE - 1) / PAGE_SIZE).max(1)
}
