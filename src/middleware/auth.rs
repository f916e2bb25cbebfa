use axum::{extract::Request, http::HeaderMap, middleware::Next, response::Response};

use crate::config;
use crate::error::ApiError;

/// Bearer-token filter for the protected item routes.
///
/// The service has one static token; a request either presents exactly
/// `Bearer <token>` or is turned away with 403 before any handler runs.
pub async fn bearer_auth_middleware(
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let presented =
        extract_bearer_token(&headers).ok_or_else(|| ApiError::forbidden("Forbidden"))?;

    if !token_matches(presented, &config::config().auth_token) {
        return Err(ApiError::forbidden("Forbidden"));
    }

    Ok(next.run(request).await)
}

/// Pull the token out of an `Authorization: Bearer <token>` header.
fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

// Plain string equality. An empty configured token never matches anything.
fn token_matches(presented: &str, configured: &str) -> bool {
    !configured.is_empty() && presented == configured
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_auth(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_bearer_tokens() {
        let headers = headers_with_auth("Bearer secret-token");
        assert_eq!(extract_bearer_token(&headers), Some("secret-token"));
    }

    #[test]
    fn rejects_other_schemes() {
        let headers = headers_with_auth("Basic c2E6cGFzcw==");
        assert_eq!(extract_bearer_token(&headers), None);
    }

    #[test]
    fn rejects_missing_header() {
        assert_eq!(extract_bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn empty_configured_token_never_matches() {
        assert!(!token_matches("", ""));
        assert!(!token_matches("anything", ""));
    }

    #[test]
    fn exact_equality_required() {
        assert!(token_matches("secret", "secret"));
        assert!(!token_matches("secret ", "secret"));
        assert!(!token_matches("Secret", "secret"));
    }
}
