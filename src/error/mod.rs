//! Error types and handling infrastructure for dashboard to ConfigMap conversion

use std::fmt;
use std::path::PathBuf;

/// Main error type for conversion operations
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("{} is not a json file", .path.display())]
    InvalidInputKind { path: PathBuf },

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Dashboard encoding error: {message}")]
    Encode { message: String },

    #[error("Manifest serialization error: {message}")]
    Serialize { message: String },

    #[error("Directory walk error on {}: {message}", .path.display())]
    Walk { path: PathBuf, message: String },

    #[error("Invalid configuration: {message}")]
    Configuration { message: String },
}

impl ConversionError {
    pub fn invalid_input_kind(path: impl Into<PathBuf>) -> Self {
        Self::InvalidInputKind { path: path.into() }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn encode(message: String) -> Self {
        Self::Encode { message }
    }

    pub fn serialize(message: String) -> Self {
        Self::Serialize { message }
    }

    pub fn walk(path: impl Into<PathBuf>, message: String) -> Self {
        Self::Walk {
            path: path.into(),
            message,
        }
    }

    pub fn configuration(message: String) -> Self {
        Self::Configuration { message }
    }

    /// Create a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidInputKind { path } => {
                format!("{} is not a json file (expected a .json suffix)", path.display())
            }
            Self::Io { path, source } => {
                format!("{} could not be accessed ({})", path.display(), source)
            }
            Self::Parse(err) => match err.location {
                Some((line, col)) => format!(
                    "{} contents could not be parsed as JSON at line {}, column {} ({})",
                    err.path.display(),
                    line,
                    col,
                    err.message
                ),
                None => format!(
                    "{} contents could not be parsed as JSON ({})",
                    err.path.display(),
                    err.message
                ),
            },
            _ => self.to_string(),
        }
    }
}

/// JSON parsing errors
#[derive(Debug, Clone)]
pub struct ParseError {
    pub path: PathBuf,
    pub message: String,
    pub location: Option<(usize, usize)>,
}

impl ParseError {
    pub fn new(path: impl Into<PathBuf>, message: String, location: Option<(usize, usize)>) -> Self {
        Self {
            path: path.into(),
            message,
            location,
        }
    }

    /// Build from a serde_json error, keeping its line and column
    pub fn from_json(path: impl Into<PathBuf>, error: &serde_json::Error) -> Self {
        let location = (error.line() > 0).then(|| (error.line(), error.column()));
        Self::new(path, error.to_string(), location)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JSON parse error in {}: {}", self.path.display(), self.message)
    }
}

impl std::error::Error for ParseError {}

/// Result type for conversion operations
pub type ConversionResult<T> = Result<T, ConversionError>;

/// Convenience result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;
