mod common;

use anyhow::Result;
use reqwest::StatusCode;

#[tokio::test]
async fn myip_passthrough_responds() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(15))
        .build()?;

    let res = client
        .get(format!("{}/api/myip", server.base_url))
        .send()
        .await?;

    // The upstream lookup may be unreachable in a sandboxed environment
    let status = res.status();
    assert!(
        status == StatusCode::OK || status == StatusCode::INTERNAL_SERVER_ERROR,
        "unexpected status: {}",
        status
    );

    let body = res.json::<serde_json::Value>().await?;
    if status == StatusCode::OK {
        let ip = body["ip"].as_str().unwrap_or_default();
        assert!(!ip.is_empty(), "empty ip in body: {}", body);
    } else {
        assert!(body.get("error").is_some(), "missing error field: {}", body);
    }

    Ok(())
}
