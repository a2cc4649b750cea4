use serde_json::Value;

use crate::domain::{ApiError, ApiErrorKind};

const UNAUTHORIZED_MESSAGE: &str = "Unauthorized: Incorrect token";
const FORBIDDEN_MESSAGE: &str = "Forbidden. API may not be available in some regions. Please ask api@alerts.in.ua for details.";
const RATE_LIMIT_MESSAGE: &str = "Too many requests: Rate limit exceeded";
const INTERNAL_SERVER_MESSAGE: &str = "Internal server error";

/// Build an [`ApiError`] for a non-success response.
///
/// The body's `message` field is used for 401/403/429 when present. 500 and
/// any other status always use a fixed message. Unparseable bodies fall back
/// to the default text.
pub fn decode_api_error(status: u16, body: &str) -> ApiError {
    let kind = ApiErrorKind::from_status(status);
    let server_message =
        extract_message(body).map(|message| format!("{message} HTTP Code:{status}"));

    let message = match kind {
        ApiErrorKind::Unauthorized => {
            server_message.unwrap_or_else(|| UNAUTHORIZED_MESSAGE.to_owned())
        }
        ApiErrorKind::Forbidden => server_message.unwrap_or_else(|| FORBIDDEN_MESSAGE.to_owned()),
        ApiErrorKind::RateLimit => server_message.unwrap_or_else(|| RATE_LIMIT_MESSAGE.to_owned()),
        ApiErrorKind::InternalServer => INTERNAL_SERVER_MESSAGE.to_owned(),
        ApiErrorKind::Unknown => format!("Unknown error. HTTP Code:{status}"),
    };

    ApiError {
        kind,
        status,
        message,
    }
}

fn extract_message(body: &str) -> Option<String> {
    let parsed: Value = serde_json::from_str(body).ok()?;
    match parsed.get("message")? {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uses_server_message_for_client_errors() {
        for (status, kind) in [
            (401, ApiErrorKind::Unauthorized),
            (403, ApiErrorKind::Forbidden),
            (429, ApiErrorKind::RateLimit),
        ] {
            let err = decode_api_error(status, r#"{"message":"Nope"}"#);
            assert_eq!(err.kind, kind);
            assert_eq!(err.status, status);
            assert_eq!(err.message, format!("Nope HTTP Code:{status}"));
        }
    }

    #[test]
    fn falls_back_to_defaults_without_message() {
        let err = decode_api_error(401, "");
        assert_eq!(err.message, "Unauthorized: Incorrect token");

        let err = decode_api_error(403, "<html>blocked</html>");
        assert_eq!(
            err.message,
            "Forbidden. API may not be available in some regions. Please ask api@alerts.in.ua for details."
        );

        let err = decode_api_error(429, r#"{"error":"slow down"}"#);
        assert_eq!(err.message, "Too many requests: Rate limit exceeded");

        let err = decode_api_error(401, r#"{"message":null}"#);
        assert_eq!(err.message, "Unauthorized: Incorrect token");

        let err = decode_api_error(429, r#"["message"]"#);
        assert_eq!(err.message, "Too many requests: Rate limit exceeded");
    }

    #[test]
    fn non_string_message_is_rendered_as_json() {
        let err = decode_api_error(429, r#"{"message":42}"#);
        assert_eq!(err.message, "42 HTTP Code:429");
    }

    #[test]
    fn internal_server_error_ignores_server_message() {
        let err = decode_api_error(500, r#"{"message":"db down"}"#);
        assert_eq!(err.kind, ApiErrorKind::InternalServer);
        assert_eq!(err.message, "Internal server error");
    }

    #[test]
    fn unknown_status_ignores_server_message() {
        let err = decode_api_error(418, r#"{"message":"teapot"}"#);
        assert_eq!(err.kind, ApiErrorKind::Unknown);
        assert_eq!(err.status, 418);
        assert_eq!(err.message, "Unknown error. HTTP Code:418");
        assert_eq!(err.to_string(), "Unknown error. HTTP Code:418");
    }
}
