use axum::{response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;

use crate::error::ApiError;

const IP_LOOKUP_URL: &str = "https://api.ipify.org?format=json";

#[derive(Debug, Deserialize)]
struct IpLookup {
    ip: String,
}

/// GET /api/myip - report this server's public IP via ipify.
pub async fn myip_get() -> Result<impl IntoResponse, ApiError> {
    let lookup = async {
        reqwest::get(IP_LOOKUP_URL)
            .await?
            .error_for_status()?
            .json::<IpLookup>()
            .await
    };

    match lookup.await {
        Ok(body) => Ok(Json(json!({ "ip": body.ip }))),
        Err(e) => {
            tracing::error!("Failed to get public IP: {}", e);
            Err(ApiError::internal_server_error("Failed to get public IP"))
        }
    }
}
