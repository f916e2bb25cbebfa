mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn correct_password_returns_the_static_token() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/login", server.base_url))
        .json(&json!({ "password": common::TEST_PASSWORD }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["success"], true, "unexpected body: {}", body);
    assert_eq!(body["token"], common::TEST_TOKEN, "unexpected body: {}", body);

    Ok(())
}

#[tokio::test]
async fn wrong_password_yields_401_and_never_leaks_the_token() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/login", server.base_url))
        .json(&json!({ "password": "not-the-password" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["success"], false, "unexpected body: {}", body);
    assert!(body.get("error").is_some(), "missing error field: {}", body);
    assert!(
        !body.to_string().contains(common::TEST_TOKEN),
        "token leaked in failure body: {}",
        body
    );

    Ok(())
}

#[tokio::test]
async fn empty_body_is_rejected() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/login", server.base_url))
        .json(&json!({}))
        .send()
        .await?;

    // Defaulted empty password must not match the configured one
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}
