//! Error handling for debug-graphs
//!
//! The data plane (`add`, `update`, collapse toggling) never fails. Errors
//! only come from loading configuration and parsing colors.

use thiserror::Error;

/// Main error type for debug-graphs operations
#[derive(Error, Debug)]
pub enum DebugGraphError {
    /// Errors related to configuration loading
    #[error("Configuration error: {0}")]
    Config(String),

    /// A color string that is not `#RRGGBB` or `#RRGGBBAA`
    #[error("Invalid color {input:?}: {reason}")]
    Color { input: String, reason: String },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<DebugGraphError>,
    },
}

impl DebugGraphError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        DebugGraphError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    pub(crate) fn color(input: &str, reason: impl Into<String>) -> Self {
        DebugGraphError::Color {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<toml::de::Error> for DebugGraphError {
    fn from(err: toml::de::Error) -> Self {
        DebugGraphError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for DebugGraphError {
    fn from(err: serde_json::Error) -> Self {
        DebugGraphError::Serialization(err.to_string())
    }
}

/// Result type alias for debug-graphs operations
pub type Result<T> = std::result::Result<T, DebugGraphError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<DebugGraphError>,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.into().with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.into().with_context(f()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DebugGraphError::Config("missing plots table".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing plots table");
    }

    #[test]
    fn test_error_with_context() {
        let err = DebugGraphError::Config("bad".to_string());
        let with_ctx = err.with_context("Failed to load debug-graphs.toml");
        assert!(with_ctx.to_string().contains("Failed to load debug-graphs.toml"));
    }

    #[test]
    fn test_color_error() {
        let err = DebugGraphError::color("#12", "expected 6 or 8 hex digits");
        assert!(err.to_string().contains("\"#12\""));
        assert!(err.to_string().contains("hex digits"));
    }

    #[test]
    fn test_result_ext_on_io_error() {
        let res: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "gone",
        ));
        let err = res.context("reading config").unwrap_err();
        assert!(matches!(err, DebugGraphError::WithContext { .. }));
        assert!(err.to_string().starts_with("reading config"));
    }
}
