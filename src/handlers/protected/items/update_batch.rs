use axum::{response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::database::batch;
use crate::error::ApiError;

/// POST /api/items/updateBatch - apply a list of partial row updates in one
/// transaction.
///
/// The plan is built before any store access, so a malformed payload is
/// rejected with 400 without a connection being attempted. Execution is
/// all-or-nothing: the first unknown ItemID rolls everything back with 404.
pub async fn update_batch_post(Json(payload): Json<Value>) -> Result<impl IntoResponse, ApiError> {
    let plan = batch::build_plan(payload.get("updates"))?;
    batch::execute_batch(plan).await?;

    Ok(Json(json!({ "success": true })))
}
