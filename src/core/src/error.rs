//! Error types for Tenderdesk Core.
//!
//! The authorization evaluator itself never fails: malformed or missing input
//! degrades to "deny". Errors only arise at the edges, when parsing
//! identifiers, loading session snapshots or configuration, and from
//! [`enforce`](crate::rbac::policy::enforce), which turns a deny into an error
//! for callers that prefer `?`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A specialized Result type for Tenderdesk operations.
pub type Result<T> = std::result::Result<T, AuthzError>;

/// Machine-readable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    UnknownPermission,
    UnknownRole,
    UnknownResource,
    PermissionDenied,
    InvalidSession,
    ConfigurationError,
    IoError,
}

impl ErrorCode {
    pub const fn numeric_code(&self) -> u32 {
        match self {
            Self::UnknownPermission => 4100,
            Self::UnknownRole => 4101,
            Self::UnknownResource => 4102,
            Self::PermissionDenied => 4003,
            Self::InvalidSession => 4200,
            Self::ConfigurationError => 5000,
            Self::IoError => 9000,
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthzError {
    #[error("Unknown permission: {0}")]
    UnknownPermission(String),

    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Invalid session: {0}")]
    Session(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AuthzError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::UnknownPermission(_) => ErrorCode::UnknownPermission,
            Self::UnknownRole(_) => ErrorCode::UnknownRole,
            Self::UnknownResource(_) => ErrorCode::UnknownResource,
            Self::PermissionDenied(_) => ErrorCode::PermissionDenied,
            Self::Session(_) => ErrorCode::InvalidSession,
            Self::Config(_) => ErrorCode::ConfigurationError,
            Self::Io(_) => ErrorCode::IoError,
        }
    }
}

impl From<serde_json::Error> for AuthzError {
    fn from(e: serde_json::Error) -> Self {
        Self::Session(e.to_string())
    }
}

impl From<serde_yaml::Error> for AuthzError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Session(e.to_string())
    }
}

impl From<toml::de::Error> for AuthzError {
    fn from(e: toml::de::Error) -> Self {
        Self::Session(e.to_string())
    }
}

impl From<config::ConfigError> for AuthzError {
    fn from(e: config::ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}
