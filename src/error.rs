use thiserror::Error;

use crate::webex_tools::support::PlatformError;

// Every variant maps to a stable `kind` string that tool results expose to callers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Webex access token is not configured: {0}")]
    AuthConfiguration(String),

    #[error("Configuration validation failed: {0}")]
    Configuration(String),

    #[error("Tool '{0}' is already registered")]
    DuplicateTool(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Missing required parameter: {field}")]
    MissingParameter { field: String },

    #[error("Invalid value '{value}' for '{field}', expected {}", .allowed.join(", "))]
    InvalidValue {
        field:   String,
        value:   String,
        allowed: Vec<String>,
    },

    #[error("Ambiguous target: only one of {} may be given, got {}", .candidates.join(", "), .supplied.join(", "))]
    AmbiguousTarget {
        candidates: Vec<String>,
        supplied:   Vec<String>,
    },

    #[error("Missing target: exactly one of {} is required", .candidates.join(", "))]
    MissingTarget { candidates: Vec<String> },

    #[error("Parameter '{field}' must be {expected}")]
    TypeMismatch {
        field:    String,
        expected: &'static str,
    },

    #[error("Parameters {} refer to the same property, use only one", .fields.join(" and "))]
    ConflictingParameters { fields: Vec<String> },

    #[error(transparent)]
    Platform(#[from] PlatformError),
}

impl Error {
    /// Stable, machine-readable category reported as `error.kind`
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AuthConfiguration(_) => "AuthConfiguration",
            Self::Configuration(_) => "Configuration",
            Self::DuplicateTool(_) => "DuplicateTool",
            Self::UnknownTool(_) => "UnknownTool",
            Self::MissingParameter { .. } => "MissingParameter",
            Self::InvalidValue { .. } => "InvalidValue",
            Self::AmbiguousTarget { .. } => "AmbiguousTarget",
            Self::MissingTarget { .. } => "MissingTarget",
            Self::TypeMismatch { .. } => "TypeMismatch",
            Self::ConflictingParameters { .. } => "ConflictingParameters",
            Self::Platform(err) => err.kind.as_str(),
        }
    }

    /// The offending parameter, when a single one can be named
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingParameter { field }
            | Self::InvalidValue { field, .. }
            | Self::TypeMismatch { field, .. } => Some(field),
            _ => None,
        }
    }

    /// Local validation failures never reach the platform
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingParameter { .. }
                | Self::InvalidValue { .. }
                | Self::AmbiguousTarget { .. }
                | Self::MissingTarget { .. }
                | Self::TypeMismatch { .. }
                | Self::ConflictingParameters { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
