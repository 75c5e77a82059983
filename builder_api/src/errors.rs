//! Error types and response classification for the Builder API.

use reqwest::StatusCode;
use thiserror::Error;

use crate::types::ErrorBody;

/// Error message the service sends when the Authorization header is not
/// shaped as a bearer token.
const BEARER_FORMAT_MESSAGE: &str = "authorization header format must be Bearer {token}";

/// Errors from Builder API operations.
///
/// Service failures are normalized into the closed set of sentinel
/// variants below so callers can match exhaustively; transport and JSON
/// failures keep their source errors.
#[derive(Error, Debug)]
pub enum Error {
    /// The fronting gateway answered 404 with an HTML body: the tenant
    /// does not exist. Requests for known tenants reach the service
    /// itself, which answers in JSON.
    #[error("Tenant not found")]
    TenantNotFound,
    #[error("Tree not found")]
    TreeNotFound,
    #[error("Release not found")]
    ReleaseNotFound,
    #[error("Invalid API key (HTTP 401)")]
    InvalidApiKey,
    #[error("Wrong API key format")]
    ApiKeyFormat,
    #[error("Not enough privileges (HTTP 403)")]
    PermissionDenied,
    #[error("Rate limited by the Builder API")]
    RateLimited,
    /// Any service failure outside the documented set. The raw status is
    /// kept so logs can tell a genuine internal error from a gap in the
    /// classification table.
    #[error("Builder API internal error (HTTP {status})")]
    Api { status: u16 },
    /// JSON serialization of a request body or deserialization of a
    /// response body failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// The request could not be completed (connect, timeout, body read).
    #[error("Network error")]
    Network(#[from] reqwest::Error),
}

/// Maps an error response (status >= 400) to an [`Error`].
///
/// HTML bodies come from the load balancer in front of the service and
/// carry no JSON payload, so they classify on status alone; everything
/// else is expected to be a JSON `{"error": "..."}` envelope.
pub(crate) fn classify_response(status: StatusCode, content_type: &str, body: &str) -> Error {
    if content_type.contains("text/html") {
        return gateway_error(status);
    }

    let parsed: ErrorBody = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(err) => {
            tracing::error!("unreadable error body (status {}): {}", status, err);
            return Error::Serialization(err);
        }
    };

    service_error(status, &parsed.error)
}

fn gateway_error(status: StatusCode) -> Error {
    match status {
        StatusCode::NOT_FOUND => Error::TenantNotFound,
        StatusCode::SERVICE_UNAVAILABLE => Error::RateLimited,
        _ => Error::Api {
            status: status.as_u16(),
        },
    }
}

fn service_error(status: StatusCode, error: &str) -> Error {
    match status {
        StatusCode::NOT_FOUND => match error {
            "tree_not_found" => Error::TreeNotFound,
            "function_not_found" => Error::ReleaseNotFound,
            _ => Error::Api {
                status: status.as_u16(),
            },
        },
        StatusCode::UNAUTHORIZED => Error::InvalidApiKey,
        StatusCode::FORBIDDEN => Error::PermissionDenied,
        StatusCode::BAD_REQUEST => match error {
            BEARER_FORMAT_MESSAGE => Error::ApiKeyFormat,
            "tree_not_found" => Error::TreeNotFound,
            _ => Error::Api {
                status: status.as_u16(),
            },
        },
        _ => Error::Api {
            status: status.as_u16(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HTML: &str = "text/html; charset=utf-8";
    const JSON: &str = "application/json";

    fn classify(status: u16, content_type: &str, body: &str) -> Error {
        classify_response(StatusCode::from_u16(status).unwrap(), content_type, body)
    }

    #[test]
    fn html_404_is_tenant_not_found() {
        let err = classify(404, HTML, "<html>not found</html>");
        assert!(matches!(err, Error::TenantNotFound));
    }

    #[test]
    fn html_503_is_rate_limited() {
        let err = classify(503, HTML, "<html>rate limit</html>");
        assert!(matches!(err, Error::RateLimited));
    }

    #[test]
    fn html_other_status_is_generic_api_error() {
        let err = classify(500, HTML, "<html>boom</html>");
        assert!(matches!(err, Error::Api { status: 500 }));
    }

    #[test]
    fn json_404_dispatches_on_error_field() {
        let err = classify(404, JSON, r#"{"error": "tree_not_found"}"#);
        assert!(matches!(err, Error::TreeNotFound));

        let err = classify(404, JSON, r#"{"error": "function_not_found"}"#);
        assert!(matches!(err, Error::ReleaseNotFound));

        let err = classify(404, JSON, r#"{"error": "something_else"}"#);
        assert!(matches!(err, Error::Api { status: 404 }));
    }

    #[test]
    fn json_401_ignores_body_content() {
        let err = classify(401, JSON, r#"{"error": "whatever the body says"}"#);
        assert!(matches!(err, Error::InvalidApiKey));
    }

    #[test]
    fn json_403_is_permission_denied() {
        let err = classify(403, JSON, r#"{"error": "not_allowd"}"#);
        assert!(matches!(err, Error::PermissionDenied));
    }

    #[test]
    fn json_400_dispatches_on_error_field() {
        let err = classify(
            400,
            JSON,
            r#"{"error": "authorization header format must be Bearer {token}"}"#,
        );
        assert!(matches!(err, Error::ApiKeyFormat));

        let err = classify(400, JSON, r#"{"error": "tree_not_found"}"#);
        assert!(matches!(err, Error::TreeNotFound));

        let err = classify(400, JSON, r#"{"error": "bad parameters"}"#);
        assert!(matches!(err, Error::Api { status: 400 }));
    }

    #[test]
    fn json_unlisted_status_is_generic_api_error() {
        let err = classify(418, JSON, r#"{"error": "teapot"}"#);
        assert!(matches!(err, Error::Api { status: 418 }));
    }

    #[test]
    fn json_body_without_error_field_still_classifies() {
        let err = classify(404, JSON, "{}");
        assert!(matches!(err, Error::Api { status: 404 }));
    }

    #[test]
    fn malformed_json_error_body_surfaces_decode_failure() {
        let err = classify(404, JSON, "not json at all");
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn error_display() {
        assert!(Error::TenantNotFound.to_string().contains("Tenant"));
        assert!(Error::InvalidApiKey.to_string().contains("401"));
        assert!(Error::Api { status: 500 }.to_string().contains("500"));
    }
}
