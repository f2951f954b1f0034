//! Error taxonomy shared by every back end (ECO, SPORT, TURBO) and the
//! validator.

use std::fmt;
use std::io;

/// Position information for validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Byte offset (0-indexed).
    pub offset: usize,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed, in bytes not characters).
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}, column {} (offset {})",
            self.line, self.column, self.offset
        )
    }
}

/// The exhaustive error taxonomy shared by the validator and all three
/// minification back ends.
#[derive(Debug)]
pub enum Error {
    /// Zero-length input.
    EmptyInput,
    /// Byte not permitted by the JSON grammar at this position.
    UnexpectedCharacter { found: u8, position: Position },
    /// EOF before a matching closing quote.
    UnterminatedString { position: Position },
    /// Number grammar violation.
    InvalidNumber { reason: &'static str, position: Position },
    /// Escape prefix not followed by a permitted character.
    InvalidEscape { position: Position },
    /// Nesting reached the 64-level limit.
    MaxDepthExceeded { position: Position },
    /// Closer without matching opener, or EOF with open structures.
    UnbalancedStructure { position: Position },
    /// Caller-supplied output buffer shorter than the produced minified form.
    OutputBufferTooSmall { needed: usize, provided: usize },
    /// Propagated from a reader or writer.
    IoError(io::Error),
    /// Allocation of a working buffer failed.
    AllocationFailed,
    /// External cancellation was observed mid-call.
    Cancelled,
    /// Invariant violation; should not occur in released builds.
    Internal(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "empty input"),
            Self::UnexpectedCharacter { found, position } => write!(
                f,
                "unexpected character {:?} at {}",
                *found as char, position
            ),
            Self::UnterminatedString { position } => {
                write!(f, "unterminated string at {}", position)
            }
            Self::InvalidNumber { reason, position } => {
                write!(f, "invalid number ({}) at {}", reason, position)
            }
            Self::InvalidEscape { position } => write!(f, "invalid escape sequence at {}", position),
            Self::MaxDepthExceeded { position } => {
                write!(f, "nesting depth exceeded at {}", position)
            }
            Self::UnbalancedStructure { position } => {
                write!(f, "unbalanced structure at {}", position)
            }
            Self::OutputBufferTooSmall { needed, provided } => write!(
                f,
                "output buffer too small: needed at least {} bytes, got {}",
                needed, provided
            ),
            Self::IoError(inner) => write!(f, "I/O error: {}", inner),
            Self::AllocationFailed => write!(f, "allocation failed"),
            Self::Cancelled => write!(f, "operation cancelled"),
            Self::Internal(msg) => write!(f, "internal error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::IoError(inner) => Some(inner),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(inner: io::Error) -> Self {
        Self::IoError(inner)
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
