//! Error types and error handling for mealfinder.
//!
//! This module defines all error types used throughout the application,
//! including error codes, error responses for the local API, and CLI exit codes.
//!
//! Remote failures are represented here so that they can be logged with
//! context, but the meal client never hands them to its callers: they are
//! absorbed into an empty or absent result (see [`crate::mealdb`]).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Stable error codes exposed in API error bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    /// E001: Configuration is invalid
    #[serde(rename = "E001")]
    ConfigInvalid,

    /// E002: The recipe service could not be reached
    #[serde(rename = "E002")]
    UpstreamUnavailable,

    /// E003: No meal exists for the requested identifier
    #[serde(rename = "E003")]
    MealNotFound,

    /// E004: Request is invalid
    #[serde(rename = "E004")]
    InvalidRequest,

    /// E005: The recipe service answered with an unusable response
    #[serde(rename = "E005")]
    UpstreamResponse,

    /// E006: Internal failure
    #[serde(rename = "E006")]
    Internal,
}

impl ErrorCode {
    /// Returns the error code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ConfigInvalid => "E001",
            ErrorCode::UpstreamUnavailable => "E002",
            ErrorCode::MealNotFound => "E003",
            ErrorCode::InvalidRequest => "E004",
            ErrorCode::UpstreamResponse => "E005",
            ErrorCode::Internal => "E006",
        }
    }

    /// Returns the default message for this error code.
    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorCode::ConfigInvalid => "Configuration is invalid",
            ErrorCode::UpstreamUnavailable => "Recipe service is unavailable",
            ErrorCode::MealNotFound => "Meal not found",
            ErrorCode::InvalidRequest => "Request is invalid",
            ErrorCode::UpstreamResponse => "Recipe service returned an unusable response",
            ErrorCode::Internal => "Internal error",
        }
    }

    /// Returns the HTTP status code for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            ErrorCode::ConfigInvalid => 500,
            ErrorCode::UpstreamUnavailable => 502,
            ErrorCode::MealNotFound => 404,
            ErrorCode::InvalidRequest => 400,
            ErrorCode::UpstreamResponse => 502,
            ErrorCode::Internal => 500,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// CLI exit codes.
pub mod exit_code {
    /// Success
    pub const SUCCESS: i32 = 0;
    /// General error
    pub const GENERAL_ERROR: i32 = 1;
    /// Configuration error
    pub const CONFIG_ERROR: i32 = 2;
    /// Recipe service could not be reached or answered badly
    pub const UPSTREAM_ERROR: i32 = 3;
    /// Command line argument error
    pub const CLI_ERROR: i32 = 64;
}

/// The main error type for mealfinder.
#[derive(Debug, Error)]
pub enum MealFinderError {
    /// Configuration file is invalid or cannot be loaded.
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The recipe service could not be reached.
    #[error("Upstream unavailable: {endpoint}")]
    Upstream {
        endpoint: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The recipe service answered with a non-success status.
    #[error("Upstream returned status {status} for {endpoint}")]
    UpstreamStatus { endpoint: String, status: u16 },

    /// The recipe service answered with a body that could not be decoded.
    #[error("Failed to decode response from {endpoint}")]
    Decode {
        endpoint: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// No meal exists for the given identifier.
    #[error("Meal not found: {id}")]
    MealNotFound { id: String },

    /// Request is invalid.
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MealFinderError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            MealFinderError::Config { .. } => ErrorCode::ConfigInvalid,
            MealFinderError::Upstream { .. } => ErrorCode::UpstreamUnavailable,
            MealFinderError::UpstreamStatus { .. } => ErrorCode::UpstreamResponse,
            MealFinderError::Decode { .. } => ErrorCode::UpstreamResponse,
            MealFinderError::MealNotFound { .. } => ErrorCode::MealNotFound,
            MealFinderError::InvalidRequest { .. } => ErrorCode::InvalidRequest,
            MealFinderError::Io(_) => ErrorCode::Internal,
            MealFinderError::Yaml(_) => ErrorCode::ConfigInvalid,
            MealFinderError::Json(_) => ErrorCode::InvalidRequest,
        }
    }

    /// Returns the CLI exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            MealFinderError::Config { .. } | MealFinderError::Yaml(_) => exit_code::CONFIG_ERROR,
            MealFinderError::Upstream { .. }
            | MealFinderError::UpstreamStatus { .. }
            | MealFinderError::Decode { .. } => exit_code::UPSTREAM_ERROR,
            MealFinderError::InvalidRequest { .. } => exit_code::CLI_ERROR,
            _ => exit_code::GENERAL_ERROR,
        }
    }

    /// Creates a configuration error with a message.
    pub fn config(message: impl Into<String>) -> Self {
        MealFinderError::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a configuration error with a message and source.
    pub fn config_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        MealFinderError::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates an upstream connection error with a source.
    pub fn upstream_with_source(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        MealFinderError::Upstream {
            endpoint: endpoint.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a decode error with a source.
    pub fn decode_with_source(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        MealFinderError::Decode {
            endpoint: endpoint.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates an invalid request error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        MealFinderError::InvalidRequest {
            message: message.into(),
        }
    }
}

/// Error details for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Additional context fields.
    #[serde(flatten)]
    pub fields: HashMap<String, serde_json::Value>,
}

impl ErrorDetails {
    /// Creates empty error details.
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
        }
    }

    /// Adds a field to the error details.
    pub fn with_field(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }
}

impl Default for ErrorDetails {
    fn default() -> Self {
        Self::new()
    }
}

/// Error response structure for the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code (e.g., "E001").
    pub code: ErrorCode,

    /// Human-readable error message.
    pub message: String,

    /// Additional error details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<ErrorDetails>,
}

impl ErrorResponse {
    /// Creates a new error response.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Creates an error response from a MealFinderError.
    pub fn from_error(error: &MealFinderError) -> Self {
        let code = error.code();
        let message = error.to_string();

        let details = match error {
            MealFinderError::MealNotFound { id } => Some(
                ErrorDetails::new()
                    .with_field("id", id.clone())
                    .with_field(
                        "suggestion",
                        "Search by ingredient to find valid meal identifiers",
                    ),
            ),
            MealFinderError::UpstreamStatus { endpoint, status } => Some(
                ErrorDetails::new()
                    .with_field("endpoint", endpoint.clone())
                    .with_field("status", *status),
            ),
            MealFinderError::Upstream { endpoint, .. } | MealFinderError::Decode { endpoint, .. } => {
                Some(ErrorDetails::new().with_field("endpoint", endpoint.clone()))
            }
            _ => None,
        };

        Self {
            code,
            message,
            details,
        }
    }
}

/// Result type alias for mealfinder operations.
pub type Result<T> = std::result::Result<T, MealFinderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_as_str() {
        assert_eq!(ErrorCode::ConfigInvalid.as_str(), "E001");
        assert_eq!(ErrorCode::UpstreamUnavailable.as_str(), "E002");
        assert_eq!(ErrorCode::MealNotFound.as_str(), "E003");
        assert_eq!(ErrorCode::InvalidRequest.as_str(), "E004");
        assert_eq!(ErrorCode::UpstreamResponse.as_str(), "E005");
        assert_eq!(ErrorCode::Internal.as_str(), "E006");
    }

    #[test]
    fn test_error_code_http_status() {
        assert_eq!(ErrorCode::ConfigInvalid.http_status(), 500);
        assert_eq!(ErrorCode::UpstreamUnavailable.http_status(), 502);
        assert_eq!(ErrorCode::MealNotFound.http_status(), 404);
        assert_eq!(ErrorCode::InvalidRequest.http_status(), 400);
        assert_eq!(ErrorCode::UpstreamResponse.http_status(), 502);
        assert_eq!(ErrorCode::Internal.http_status(), 500);
    }

    #[test]
    fn test_error_code_mapping() {
        let err = MealFinderError::MealNotFound {
            id: "52772".to_string(),
        };
        assert_eq!(err.code(), ErrorCode::MealNotFound);

        let err = MealFinderError::config("invalid yaml");
        assert_eq!(err.code(), ErrorCode::ConfigInvalid);

        let err = MealFinderError::UpstreamStatus {
            endpoint: "/filter.php".to_string(),
            status: 503,
        };
        assert_eq!(err.code(), ErrorCode::UpstreamResponse);
    }

    #[test]
    fn test_exit_codes() {
        let err = MealFinderError::config("invalid yaml");
        assert_eq!(err.exit_code(), exit_code::CONFIG_ERROR);

        let err = MealFinderError::UpstreamStatus {
            endpoint: "/random.php".to_string(),
            status: 500,
        };
        assert_eq!(err.exit_code(), exit_code::UPSTREAM_ERROR);

        let err = MealFinderError::invalid_request("no ingredients");
        assert_eq!(err.exit_code(), exit_code::CLI_ERROR);

        let err = MealFinderError::MealNotFound {
            id: "0".to_string(),
        };
        assert_eq!(err.exit_code(), exit_code::GENERAL_ERROR);
    }

    #[test]
    fn test_error_response_from_not_found() {
        let err = MealFinderError::MealNotFound {
            id: "99999".to_string(),
        };
        let response = ErrorResponse::from_error(&err);

        assert_eq!(response.code, ErrorCode::MealNotFound);
        assert!(response.message.contains("99999"));

        let details = response.details.unwrap();
        assert_eq!(
            details.fields.get("id"),
            Some(&serde_json::Value::String("99999".to_string()))
        );
    }

    #[test]
    fn test_error_response_serialization() {
        let response = ErrorResponse::new(ErrorCode::MealNotFound, "Meal not found: 1");
        let json = serde_json::to_string(&response).unwrap();

        assert!(json.contains("\"code\":\"E003\""));
        assert!(json.contains("Meal not found: 1"));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_error_display() {
        let err = MealFinderError::UpstreamStatus {
            endpoint: "/lookup.php".to_string(),
            status: 404,
        };
        assert_eq!(
            format!("{}", err),
            "Upstream returned status 404 for /lookup.php"
        );

        let err = MealFinderError::invalid_request("ingredients must be a string or a list");
        assert_eq!(
            format!("{}", err),
            "Invalid request: ingredients must be a string or a list"
        );
    }
}
