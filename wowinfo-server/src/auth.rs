//! HTTP Basic authentication for the admin routes.

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use tracing::warn;

use crate::error::ApiError;
use crate::state::AppState;

fn unauthorized() -> ApiError {
    ApiError::Unauthorized("Incorrect username or password".to_string())
}

/// Decode the `Authorization: Basic ...` header into `(username, password)`.
fn decode_credentials(header_value: &str) -> Option<(String, String)> {
    let encoded = header_value.strip_prefix("Basic ")?;
    let decoded = BASE64.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

/// Middleware guarding the admin routes.
///
/// Rejects the request with 401 before the handler runs, so no store
/// mutation can happen without valid credentials.
pub async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let credentials = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(decode_credentials);

    match credentials {
        Some((username, password))
            if username == state.config.admin.username
                && password == state.config.admin.password =>
        {
            Ok(next.run(request).await)
        }
        _ => {
            warn!(path = %request.uri().path(), "rejected unauthenticated admin request");
            Err(unauthorized())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_well_formed_header() {
        let encoded = BASE64.encode("admin:secret");
        let decoded = decode_credentials(&format!("Basic {encoded}"));
        assert_eq!(decoded, Some(("admin".to_string(), "secret".to_string())));
    }

    #[test]
    fn rejects_non_basic_schemes_and_garbage() {
        assert!(decode_credentials("Bearer token").is_none());
        assert!(decode_credentials("Basic not-base64!!").is_none());
        let no_colon = BASE64.encode("justausername");
        assert!(decode_credentials(&format!("Basic {no_colon}")).is_none());
    }
}
