use axum::{extract::Query, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;

use crate::database::search;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct ItemsQuery {
    /// 1-based page number; anything unparseable falls back to page 1.
    pub page: Option<String>,
    /// Substring match against the item name; empty matches everything.
    pub search: Option<String>,
}

/// GET /api/items?page=N&search=term - one 50-row page of the item table.
pub async fn list_get(Query(query): Query<ItemsQuery>) -> Result<impl IntoResponse, ApiError> {
    let page = query
        .page
        .as_deref()
        .and_then(|p| p.parse::<i64>().ok())
        .unwrap_or(1);
    let search = query.search.unwrap_or_default();

    let page_result = search::search_items(page, &search).await?;

    Ok(Json(json!({
        "items": page_result.items,
        "totalPages": page_result.total_pages,
    })))
}
