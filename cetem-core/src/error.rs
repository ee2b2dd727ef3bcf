//! Typed errors for corpus parsing
//!
//! Every parse failure is fatal to the current pass and carries the source
//! line number of the offending record. Skip-and-continue is a caller-level
//! policy, not a default.

use thiserror::Error;

/// Errors produced while reading an annotated corpus
#[derive(Error, Debug)]
pub enum CorpusError {
    /// Data line with fewer than the five fixed tab-separated fields
    #[error("malformed record at line {line}: expected at least 5 tab-separated fields, found {found}")]
    MalformedRecord {
        /// Source line number (1-based)
        line: u64,
        /// Number of tab-separated fields actually present
        found: usize,
    },

    /// Closing tag with no matching open region, a nesting-order violation,
    /// or end of input with unclosed regions
    #[error("unbalanced markup at line {line}: {detail}")]
    UnbalancedMarkup {
        /// Source line number (1-based)
        line: u64,
        /// Human-readable description of the structural violation
        detail: String,
    },

    /// Granularity name that does not map to a known level
    #[error("unknown granularity '{0}' (expected extract, paragraph, sentence, token or line)")]
    UnknownGranularity(String),

    /// Invalid or conflicting configuration
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Line source failed mid-iteration
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CorpusError {
    pub(crate) fn unbalanced(line: u64, detail: impl Into<String>) -> Self {
        CorpusError::UnbalancedMarkup {
            line,
            detail: detail.into(),
        }
    }
}

/// Result type for corpus operations
pub type Result<T> = std::result::Result<T, CorpusError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_record_display() {
        let err = CorpusError::MalformedRecord { line: 42, found: 2 };
        assert_eq!(
            err.to_string(),
            "malformed record at line 42: expected at least 5 tab-separated fields, found 2"
        );
    }

    #[test]
    fn test_unbalanced_markup_display() {
        let err = CorpusError::unbalanced(7, "</s> with no open sentence");
        assert_eq!(
            err.to_string(),
            "unbalanced markup at line 7: </s> with no open sentence"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: CorpusError = io.into();
        assert!(matches!(err, CorpusError::Io(_)));
    }
}
