//! Classification of failed API calls into user-facing categories.

use serde_json::Value;

/// Why a request to the tasks API failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiFailure {
    /// 400
    BadRequest,
    /// 401
    Unauthorized,
    /// 403
    Forbidden,
    /// 404
    NotFound,
    /// 422
    Validation,
    /// 429
    RateLimited,
    /// 5xx
    Server(u16),
    /// Any other non-success status
    Status(u16),
    /// The request went out but no response came back
    NoResponse,
    /// The request could not be built or sent
    Request,
}

impl ApiFailure {
    /// Classifies a non-success HTTP status code
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => ApiFailure::BadRequest,
            401 => ApiFailure::Unauthorized,
            403 => ApiFailure::Forbidden,
            404 => ApiFailure::NotFound,
            422 => ApiFailure::Validation,
            429 => ApiFailure::RateLimited,
            s if s >= 500 => ApiFailure::Server(s),
            s => ApiFailure::Status(s),
        }
    }

    /// Classifies a transport error that produced no HTTP response
    pub fn from_transport(error: &reqwest::Error) -> Self {
        if error.is_builder() {
            ApiFailure::Request
        } else {
            ApiFailure::NoResponse
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiFailure::BadRequest => Some(400),
            ApiFailure::Unauthorized => Some(401),
            ApiFailure::Forbidden => Some(403),
            ApiFailure::NotFound => Some(404),
            ApiFailure::Validation => Some(422),
            ApiFailure::RateLimited => Some(429),
            ApiFailure::Server(s) | ApiFailure::Status(s) => Some(*s),
            ApiFailure::NoResponse | ApiFailure::Request => None,
        }
    }

    /// Short message shown to the user
    pub fn message(&self) -> String {
        match self {
            ApiFailure::BadRequest => "Bad request".to_string(),
            ApiFailure::Unauthorized => "Authorization required".to_string(),
            ApiFailure::Forbidden => "Access denied".to_string(),
            ApiFailure::NotFound => "Resource not found".to_string(),
            ApiFailure::Validation => "Validation error".to_string(),
            ApiFailure::RateLimited => "Too many requests".to_string(),
            ApiFailure::Server(_) => "Internal server error".to_string(),
            ApiFailure::Status(s) => format!("Error {}", s),
            ApiFailure::NoResponse => "No response from server. Check your connection.".to_string(),
            ApiFailure::Request => "Error while sending request".to_string(),
        }
    }

    /// Message with the server's `detail`, when there is one, appended
    pub fn message_with_detail(&self, detail: Option<&str>) -> String {
        match detail {
            Some(detail) if !detail.is_empty() => format!("{}: {}", self.message(), detail),
            _ => self.message(),
        }
    }
}

/// Extracts the `detail` field of an error body
///
/// A string detail is returned as is; a list of validation entries is
/// reduced to their `msg` fields joined with `", "`. Anything else yields
/// `None`.
pub fn error_detail(body: &Value) -> Option<String> {
    match body.get("detail")? {
        Value::String(detail) => Some(detail.clone()),
        Value::Array(entries) => Some(
            entries
                .iter()
                .filter_map(|entry| entry.get("msg").and_then(Value::as_str))
                .collect::<Vec<_>>()
                .join(", "),
        ),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (400, "Bad request"),
            (401, "Authorization required"),
            (403, "Access denied"),
            (404, "Resource not found"),
            (422, "Validation error"),
            (429, "Too many requests"),
            (500, "Internal server error"),
            (503, "Internal server error"),
            (409, "Error 409"),
            (418, "Error 418"),
        ];

        for (status, expected) in cases {
            let failure = ApiFailure::from_status(status);
            assert_eq!(failure.message(), expected, "status {}", status);
            assert_eq!(failure.status(), Some(status));
        }
    }

    #[test]
    fn test_transport_messages() {
        assert_eq!(
            ApiFailure::NoResponse.message(),
            "No response from server. Check your connection."
        );
        assert_eq!(ApiFailure::Request.message(), "Error while sending request");
        assert_eq!(ApiFailure::NoResponse.status(), None);
    }

    #[test]
    fn test_string_detail() {
        let body = json!({ "detail": "Task not found" });
        let detail = error_detail(&body);

        assert_eq!(detail.as_deref(), Some("Task not found"));
        assert_eq!(
            ApiFailure::NotFound.message_with_detail(detail.as_deref()),
            "Resource not found: Task not found"
        );
    }

    #[test]
    fn test_list_detail_joins_messages() {
        let body = json!({
            "detail": [
                { "loc": ["body", "title"], "msg": "field required", "type": "value_error.missing" },
                { "loc": ["body", "is_completed"], "msg": "value is not a valid boolean" }
            ]
        });

        assert_eq!(
            error_detail(&body).as_deref(),
            Some("field required, value is not a valid boolean")
        );
    }

    #[test]
    fn test_missing_or_unusable_detail() {
        assert_eq!(error_detail(&json!({ "message": "nope" })), None);
        assert_eq!(error_detail(&json!({ "detail": 42 })), None);
        assert_eq!(error_detail(&json!("plain")), None);
        assert_eq!(ApiFailure::BadRequest.message_with_detail(None), "Bad request");
        assert_eq!(ApiFailure::BadRequest.message_with_detail(Some("")), "Bad request");
    }

    #[test]
    fn test_empty_detail_list_keeps_plain_message() {
        let body = json!({ "detail": [] });
        let detail = error_detail(&body);

        assert_eq!(detail.as_deref(), Some(""));
        assert_eq!(
            ApiFailure::Validation.message_with_detail(detail.as_deref()),
            "Validation error"
        );
    }
}
