use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

/// Application-specific error types.
#[derive(Debug, Clone)]
pub enum AppError {
    /// Missing or malformed caller input.
    Validation(String),
    /// The vendor request could not be encoded.
    Marshal(String),
    /// The vendor classified the inquiry as failed.
    VendorFailure {
        /// Raw STATUS text from the vendor.
        status: String,
        /// Raw REMARKS text from the vendor.
        remarks: String,
    },
    /// The outbound call to the vendor portal failed.
    Transport(String),
    /// The vendor payload did not match the expected shape.
    Decode(String),
    /// Internal server error.
    Internal(String),
    /// Error with context chain for better debugging.
    WithContext {
        /// The underlying source of the error.
        source: Box<AppError>,
        /// Additional context message.
        context: String,
    },
}

impl AppError {
    /// HTTP status this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Marshal(_) | AppError::VendorFailure { .. } => {
                StatusCode::BAD_REQUEST
            }
            AppError::Transport(_) | AppError::Decode(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::WithContext { source, .. } => source.status_code(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Invalid input: {}", msg),
            AppError::Marshal(msg) => write!(f, "Failed to encode vendor request: {}", msg),
            AppError::VendorFailure { status, remarks } => {
                write!(f, "Vendor reported failure: {} ({})", status, remarks)
            }
            AppError::Transport(msg) => write!(f, "Vendor transport error: {}", msg),
            AppError::Decode(msg) => write!(f, "Failed to decode vendor response: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
            AppError::WithContext { source, context } => {
                write!(f, "{}: {}", context, source)
            }
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    /// Innermost error, with all context layers peeled off.
    pub fn root(&self) -> &AppError {
        match self {
            AppError::WithContext { source, .. } => source.root(),
            other => other,
        }
    }

    /// Log level used when this error ends a request.
    pub fn log_level(&self) -> tracing::Level {
        if self.status_code().is_client_error() {
            tracing::Level::WARN
        } else {
            tracing::Level::ERROR
        }
    }
}

impl IntoResponse for AppError {
    /// Converts the error into an HTTP response with an empty body.
    ///
    /// Logged once, with the full context chain, at the level of the
    /// innermost error: client-side failures as warnings, server-side ones
    /// as errors.
    fn into_response(self) -> Response {
        let kind = match self.root() {
            AppError::Validation(_) | AppError::Marshal(_) => "Rejecting request",
            AppError::VendorFailure { .. } => "Vendor failure",
            AppError::Transport(_) => "Vendor transport error",
            AppError::Decode(_) => "Vendor decode error",
            AppError::Internal(_) | AppError::WithContext { .. } => "Internal error",
        };

        if self.log_level() == tracing::Level::WARN {
            tracing::warn!("{}: {}", kind, self);
        } else {
            tracing::error!("{}: {}", kind, self);
        }

        self.status_code().into_response()
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Transport(err.to_string())
    }
}

/// Extension trait for adding context to errors.
/// Similar to `anyhow::Context` but for our `AppError` type.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T, AppError>;

    /// Add context lazily (only evaluated on error).
    fn with_context<F>(self, f: F) -> Result<T, AppError>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T, AppError> {
    fn context(self, context: impl Into<String>) -> Result<T, AppError> {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(e),
            context: context.into(),
        })
    }

    fn with_context<F>(self, f: F) -> Result<T, AppError>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(e),
            context: f(),
        })
    }
}

/// Errors raised while loading a circle directory feed.
#[derive(Debug)]
pub enum FetchError {
    /// The feed request could not be completed.
    Transport(reqwest::Error),
    /// The feed answered with a non-success status.
    Status(reqwest::StatusCode),
    /// The feed body did not decode into the expected shape.
    Decode(serde_json::Error),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Transport(e) => write!(f, "Circle feed request failed: {}", e),
            FetchError::Status(status) => write!(f, "Circle feed returned {}", status),
            FetchError::Decode(e) => write!(f, "Circle feed could not be decoded: {}", e),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Transport(e) => Some(e),
            FetchError::Status(_) => None,
            FetchError::Decode(e) => Some(e),
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport(err)
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_map_to_bad_request() {
        assert_eq!(
            AppError::Validation("phone".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Marshal("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        let vendor = AppError::VendorFailure {
            status: "FAIL".into(),
            remarks: "bad account".into(),
        };
        assert_eq!(vendor.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_server_errors_map_to_internal_error() {
        for err in [
            AppError::Transport("timeout".into()),
            AppError::Decode("eof".into()),
            AppError::Internal("oops".into()),
        ] {
            assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn test_context_keeps_source_status() {
        let result: Result<(), AppError> = Err(AppError::Validation("empty phone".into()));
        let err = result.context("building request").unwrap_err();

        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.to_string(),
            "building request: Invalid input: empty phone"
        );
    }

    #[test]
    fn test_with_context_is_lazy_on_success() {
        let result: Result<u8, AppError> = Ok(7);
        let value = result
            .with_context(|| panic!("context must not be evaluated"))
            .unwrap();
        assert_eq!(value, 7);
    }

    #[test]
    fn test_wrapped_error_logs_at_source_level() {
        let marshal: Result<(), AppError> = Err(AppError::Marshal("bad utf8".into()));
        let err = marshal.context("inner").context("outer").unwrap_err();
        assert!(matches!(err.root(), AppError::Marshal(_)));
        assert_eq!(err.log_level(), tracing::Level::WARN);

        let transport: Result<(), AppError> = Err(AppError::Transport("reset".into()));
        let err = transport.context("balance inquiry").unwrap_err();
        assert!(matches!(err.root(), AppError::Transport(_)));
        assert_eq!(err.log_level(), tracing::Level::ERROR);
    }

    #[tokio::test]
    async fn test_wrapped_error_response_keeps_source_status() {
        let result: Result<(), AppError> = Err(AppError::VendorFailure {
            status: "FAIL".into(),
            remarks: "bad account".into(),
        });
        let response = result.context("balance inquiry").unwrap_err().into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn test_error_response_has_empty_body() {
        let response = AppError::Decode("bad json".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(bytes.is_empty());
    }
}
