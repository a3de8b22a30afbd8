//! Error handling for the extraction engine
//!
//! This module provides a unified error type and result type for all
//! engine operations.
//!
//! Contract violations (reading two cells past a grid edge, invoking a
//! subroutine from the wrong control state) are not represented here: those
//! are programmer errors and panic with a precise message instead of being
//! threaded through `Result`.

use std::fmt;

/// Engine error type
#[derive(Debug, Clone)]
pub enum EngineError {
    /// Malformed pattern - surfaced when a scan subroutine is built,
    /// never during a scan
    RegexSyntax {
        message: String,
        position: Option<usize>,
    },
    /// Reading past the end of a linear cursor with nothing left - a normal
    /// "no more input" condition, not a contract violation
    CursorExhausted,
    /// The configuration search exceeded its exploration bound
    RunawaySearch { explored: usize },
    /// IO error (for file operations)
    IoError { message: String },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::RegexSyntax { message, position } => {
                if let Some(pos) = position {
                    write!(f, "Pattern error at offset {}: {}", pos, message)
                } else {
                    write!(f, "Pattern error: {}", message)
                }
            }
            EngineError::CursorExhausted => {
                write!(f, "Cursor exhausted: no characters remain")
            }
            EngineError::RunawaySearch { explored } => {
                write!(
                    f,
                    "Runaway search: exploration bound reached after {} configurations",
                    explored
                )
            }
            EngineError::IoError { message } => {
                write!(f, "IO error: {}", message)
            }
        }
    }
}

impl std::error::Error for EngineError {}

impl From<std::io::Error> for EngineError {
    fn from(err: std::io::Error) -> Self {
        EngineError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

// Convenience constructors for errors
impl EngineError {
    pub fn regex(message: impl Into<String>) -> Self {
        EngineError::RegexSyntax {
            message: message.into(),
            position: None,
        }
    }

    pub fn regex_at(message: impl Into<String>, position: usize) -> Self {
        EngineError::RegexSyntax {
            message: message.into(),
            position: Some(position),
        }
    }

    pub fn runaway(explored: usize) -> Self {
        EngineError::RunawaySearch { explored }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regex_error_display() {
        let err = EngineError::regex("unbalanced group");
        assert!(err.to_string().contains("Pattern error"));
        assert!(err.to_string().contains("unbalanced group"));
    }

    #[test]
    fn test_regex_error_with_position() {
        let err = EngineError::regex_at("dangling star", 3);
        let msg = err.to_string();
        assert!(msg.contains("offset 3"));
        assert!(msg.contains("dangling star"));
    }

    #[test]
    fn test_runaway_display() {
        let err = EngineError::runaway(100_000);
        assert!(err.to_string().contains("100000"));
    }
}
