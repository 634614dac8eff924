//! Error types for the Ainfinit client library.

use thiserror::Error;

use crate::status::StatusTable;

/// The main error type for all Ainfinit client operations.
#[derive(Error, Debug)]
pub enum AinfinitError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP request with middleware failed
    #[error("HTTP request failed: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    /// The platform answered with a non-2xx HTTP status
    #[error("HTTP status {status}: {body}")]
    HttpStatus {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// JSON deserialization of a response failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// JSON serialization of the signature payload failed
    #[error("Signature encoding error: {0}")]
    Encoding(#[source] serde_json::Error),

    /// The block cipher rejected the key or the ciphertext
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// Base64 decoding error
    #[error("Base64 error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// The response envelope carried a non-success status
    #[error("Ainfinit API error: {0}")]
    Api(ApiError),

    /// A request was rejected locally before being sent
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid response from the API
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl AinfinitError {
    /// The vendor status code, if this is an application error.
    pub fn status_code(&self) -> Option<i64> {
        match self {
            Self::Api(err) => Some(err.code),
            _ => None,
        }
    }
}

/// Application error returned in the response envelope.
///
/// The HTTP exchange succeeded but the `status` field of the body is outside
/// the success range. The code is resolved through the status table of the
/// endpoint that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// Name of the status table the code was resolved against (e.g. "open door")
    pub table: &'static str,
    /// The numeric status code from the envelope
    pub code: i64,
    /// Documented description, `None` when the code is not in the table
    pub description: Option<&'static str>,
    /// The `message` field of the envelope
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.description {
            Some(description) => write!(
                f,
                "{} status {} ({}): {}",
                self.table, self.code, description, self.message
            ),
            None => write!(
                f,
                "{} unknown status {}: {}",
                self.table, self.code, self.message
            ),
        }
    }
}

impl ApiError {
    /// Resolve a status code through the table `S`.
    pub fn from_status<S: StatusTable>(code: i64, message: impl Into<String>) -> Self {
        Self {
            table: S::LABEL,
            code,
            description: S::from_code(code).description(),
            message: message.into(),
        }
    }

    /// Recover the typed status.
    ///
    /// Any table can be used; a code outside it yields its `Unknown` variant.
    pub fn status<S: StatusTable>(&self) -> S {
        S::from_code(self.code)
    }

    /// Whether the code was found in the table it was resolved against.
    pub fn is_known(&self) -> bool {
        self.description.is_some()
    }
}

impl From<ApiError> for AinfinitError {
    fn from(err: ApiError) -> Self {
        Self::Api(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::operation::OpenDoorStatus;
    use crate::status::CommonStatus;

    #[test]
    fn test_api_error_known_code() {
        let error = ApiError::from_status::<CommonStatus>(40506, "vm missing");
        assert_eq!(error.description, Some("Self dealer does not exist"));
        assert_eq!(
            error.to_string(),
            "common status 40506 (Self dealer does not exist): vm missing"
        );
        assert!(error.is_known());
    }

    #[test]
    fn test_api_error_unknown_code() {
        let error = ApiError::from_status::<CommonStatus>(12345, "boom");
        assert!(!error.is_known());
        assert_eq!(error.to_string(), "common unknown status 12345: boom");
        assert_eq!(error.status::<CommonStatus>(), CommonStatus::Unknown(12345));
    }

    #[test]
    fn test_api_error_typed_status() {
        let error = ApiError::from_status::<OpenDoorStatus>(10416, "offline");
        assert_eq!(
            error.status::<OpenDoorStatus>(),
            OpenDoorStatus::OfflineEquipment
        );
        let wrapped = AinfinitError::from(error);
        assert_eq!(wrapped.status_code(), Some(10416));
    }
}
