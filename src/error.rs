use std::fmt;

/// Result type alias for configuration operations
pub type ParseResult<T> = Result<T, ConfigError>;

/// Errors that can occur while loading, querying or saving a configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The file to load does not exist
    NotFound { path: String },

    /// Any other failure reading or writing a file
    IoError { path: String, message: String },

    /// Stored text could not be parsed as the requested type
    TypeError {
        key: String,
        expected: String,
        found: String,
    },

    /// Custom error with message
    Custom { message: String },
}

impl ConfigError {
    /// Create a not found error
    pub fn not_found(path: impl Into<String>) -> Self {
        ConfigError::NotFound { path: path.into() }
    }

    /// Create an I/O error
    pub fn io(path: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::IoError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a type error
    pub fn type_error(
        key: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        ConfigError::TypeError {
            key: key.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create a custom error
    pub fn custom(message: impl Into<String>) -> Self {
        ConfigError::Custom {
            message: message.into(),
        }
    }

    /// Map an I/O error for `path` onto `NotFound` or `IoError`
    pub(crate) fn from_io(path: &std::path::Path, err: std::io::Error) -> Self {
        let path = path.display().to_string();
        if err.kind() == std::io::ErrorKind::NotFound {
            ConfigError::not_found(path)
        } else {
            ConfigError::io(path, err.to_string())
        }
    }

    /// Whether this error means the file simply was not there
    pub fn is_not_found(&self) -> bool {
        matches!(self, ConfigError::NotFound { .. })
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NotFound { path } => {
                write!(f, "Configuration file '{}' not found", path)
            }
            ConfigError::IoError { path, message } => {
                write!(f, "I/O error for '{}': {}", path, message)
            }
            ConfigError::TypeError {
                key,
                expected,
                found,
            } => {
                write!(
                    f,
                    "Type error for '{}': expected {}, found '{}'",
                    key, expected, found
                )
            }
            ConfigError::Custom { message } => {
                write!(f, "{}", message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
