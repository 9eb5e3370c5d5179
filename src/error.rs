//! Error Types
//!
//! Failures surfaced by the API layer, the list controllers and the forms.

use thiserror::Error;

/// A required or malformed form field, caught before submission
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self { field, message: message.into() }
    }

    pub fn required(field: &'static str) -> Self {
        Self::new(field, format!("{} is required", field.replace('_', " ")))
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Request rejected before any response arrived
    #[error("network error: {0}")]
    Network(String),

    #[error("server returned {code} for {url}")]
    Status { code: u16, url: String },

    #[error("unexpected response body: {0}")]
    Decode(String),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("action cancelled")]
    ConfirmationDeclined,
}

impl ApiError {
    /// Short text for a toast
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => "Could not reach the server".to_string(),
            ApiError::Status { code: 401 | 403, .. } => "You are not allowed to do that".to_string(),
            ApiError::Status { code: 404, .. } => "Not found".to_string(),
            ApiError::Status { code, .. } => format!("Server error ({})", code),
            ApiError::Decode(_) => "The server sent an unexpected response".to_string(),
            ApiError::Validation(e) => e.message.clone(),
            ApiError::ConfirmationDeclined => "Cancelled".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_message_uses_readable_field() {
        let err = ValidationError::required("confirm_password");
        assert_eq!(err.field, "confirm_password");
        assert_eq!(err.to_string(), "confirm password is required");
    }

    #[test]
    fn test_validation_converts_into_api_error() {
        let err: ApiError = ValidationError::required("email").into();
        assert_eq!(err.user_message(), "email is required");
        assert_eq!(err.to_string(), "email is required");
    }

    #[test]
    fn test_validation_error_is_std_error() {
        let err = ValidationError::new("expiry", "Expiry must look like MM/YY");
        let dynamic: &dyn std::error::Error = &err;
        assert_eq!(dynamic.to_string(), "Expiry must look like MM/YY");
        assert!(dynamic.source().is_none());
    }

    #[test]
    fn test_status_user_message() {
        let err = ApiError::Status { code: 403, url: "/api/orders".into() };
        assert_eq!(err.user_message(), "You are not allowed to do that");
        let err = ApiError::Status { code: 500, url: "/api/orders".into() };
        assert_eq!(err.user_message(), "Server error (500)");
    }
}
