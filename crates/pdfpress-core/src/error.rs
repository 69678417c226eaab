//! Error types for conversion operations.
//!
//! The taxonomy is the user-visible contract: an unsupported extension is
//! an expected outcome, malformed input carries a diagnostic, and internal
//! render or storage faults surface as generic failures. Nothing below the
//! pipeline boundary is allowed to escape unconverted.

use thiserror::Error;

/// Error conditions produced by the conversion pipeline.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// The declared file extension is not in the supported set.
    ///
    /// This is a normal, expected outcome (the `Rejected` terminal state),
    /// distinct from internal failures. It is not logged as an error.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The content does not parse as its declared format (corrupt
    /// spreadsheet, invalid image, broken document container).
    ///
    /// Carries a human-readable diagnostic suitable for the client.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// A rendering collaborator faulted (encoder error, layout engine
    /// crash, strategy panic). The client sees a generic message; the
    /// full diagnostic is logged server-side.
    #[error("render failure: {0}")]
    RenderFailure(String),

    /// Scratch storage read/write failed (disk full, permission denied).
    ///
    /// Fatal for the request; never retried.
    #[error("storage failure: {0}")]
    Storage(#[from] std::io::Error),
}

/// Coarse classification used by callers (HTTP layer, CLI) to map errors
/// to status codes or exit codes without matching on message strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Expected rejection: extension outside the supported set.
    Unsupported,
    /// Client-attributable parse failure.
    Malformed,
    /// Internal failure (render or storage).
    Internal,
}

impl ConvertError {
    /// Classify this error for transport mapping.
    #[inline]
    #[must_use = "returns the error classification"]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedFormat(_) => ErrorKind::Unsupported,
            Self::MalformedInput(_) => ErrorKind::Malformed,
            Self::RenderFailure(_) | Self::Storage(_) => ErrorKind::Internal,
        }
    }

    /// Message safe to show to the client.
    ///
    /// Unsupported/malformed errors carry their diagnostic; internal
    /// failures collapse to a generic message (details go to the log).
    #[must_use = "returns the client-facing message"]
    pub fn user_message(&self) -> String {
        match self {
            Self::UnsupportedFormat(_) | Self::MalformedInput(_) => self.to_string(),
            Self::RenderFailure(_) | Self::Storage(_) => "conversion failed".to_string(),
        }
    }
}

/// Type alias for [`Result<T, ConvertError>`].
pub type Result<T> = std::result::Result<T, ConvertError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_display() {
        let err = ConvertError::UnsupportedFormat(".exe".to_string());
        assert_eq!(err.to_string(), "unsupported format: .exe");
        assert_eq!(err.kind(), ErrorKind::Unsupported);
    }

    #[test]
    fn test_malformed_carries_diagnostic() {
        let err = ConvertError::MalformedInput("slide3.xml: unexpected EOF".to_string());
        assert!(err.to_string().contains("slide3.xml"));
        assert_eq!(err.kind(), ErrorKind::Malformed);
        assert!(err.user_message().contains("slide3.xml"));
    }

    #[test]
    fn test_internal_user_message_is_generic() {
        let err = ConvertError::RenderFailure("jpeg encoder: invalid dimensions".to_string());
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert_eq!(err.user_message(), "conversion failed");
        // Full detail stays available for the log.
        assert!(err.to_string().contains("jpeg encoder"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ConvertError = io_err.into();
        match err {
            ConvertError::Storage(e) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            _ => panic!("expected Storage variant"),
        }
        assert_eq!(
            ConvertError::Storage(std::io::Error::other("disk full")).kind(),
            ErrorKind::Internal
        );
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn inner() -> Result<()> {
            Err(ConvertError::UnsupportedFormat(".zip".to_string()))
        }
        fn outer() -> Result<()> {
            inner()?;
            Ok(())
        }
        match outer() {
            Err(ConvertError::UnsupportedFormat(ext)) => assert_eq!(ext, ".zip"),
            _ => panic!("expected UnsupportedFormat to propagate"),
        }
    }

    #[test]
    fn test_error_size() {
        // Errors should stay small; boxing would be needed otherwise.
        assert!(std::mem::size_of::<ConvertError>() < 256);
    }
}
