use thiserror::Error;

/// Structured error types for the MCP server core
#[derive(Debug, Error)]
pub enum Error {
    /// A tool or prompt name was registered twice
    #[error("Duplicate name: '{name}' is already registered as a {kind}")]
    DuplicateName { kind: &'static str, name: String },

    /// Tool name not present in the registry
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Prompt name not present in the registry
    #[error("Unknown prompt: {0}")]
    UnknownPrompt(String),

    /// Input did not conform to a declared schema
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// Stale or invalid session identifier
    #[error("No session found for id '{0}'")]
    SessionNotFound(String),

    /// Protocol-level errors (malformed messages, unsupported refs, etc.)
    #[error("Protocol error: {message}")]
    Protocol {
        message: String,
        error_code: Option<i32>,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Upstream HTTP client errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a duplicate-name error for a tool registration
    pub fn duplicate_tool<S: Into<String>>(name: S) -> Self {
        Self::DuplicateName {
            kind: "tool",
            name: name.into(),
        }
    }

    /// Create a duplicate-name error for a prompt registration
    pub fn duplicate_prompt<S: Into<String>>(name: S) -> Self {
        Self::DuplicateName {
            kind: "prompt",
            name: name.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
            field: None,
        }
    }

    /// Create a new validation error with field context
    pub fn validation_field<S: Into<String>, F: Into<String>>(message: S, field: F) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a new protocol error
    pub fn protocol<S: Into<String>>(message: S) -> Self {
        Self::Protocol {
            message: message.into(),
            error_code: None,
        }
    }

    /// Create a new configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// JSON-RPC error code a request-level failure is reported with.
    ///
    /// Client mistakes (bad params, unknown names) map to `-32602`; everything
    /// else is an internal error. Session misses are handled at the HTTP layer
    /// and never reach a JSON-RPC response.
    pub fn jsonrpc_code(&self) -> i32 {
        match self {
            Self::Validation { .. } | Self::UnknownTool(_) | Self::UnknownPrompt(_) => -32602,
            Self::Protocol { error_code, .. } => error_code.unwrap_or(-32600),
            _ => -32603,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
