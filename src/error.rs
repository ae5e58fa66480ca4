//! Error types for the analysis engine.
//!
//! Everything in the core fails fast with a [`SeqError`]; nothing is repaired
//! or silently dropped. Collaborators (fetching, config) keep their own error
//! enums next to their code.

use core::fmt;

use thiserror::Error;

use crate::seq::SeqKind;

/// Offenders listed in a message before it is abbreviated.
const MAX_LISTED: usize = 10;

/// Why raw input was rejected by the classifier.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Invalid {
    /// Nothing left after whitespace was stripped.
    Empty,
    /// Characters outside the accepted alphabet, as `(offset, char)` into the
    /// normalized text (0-based).
    Disallowed(Vec<(usize, char)>),
    /// Both `T` and `U` occur; offsets of the first of each.
    Mixed { first_t: usize, first_u: usize },
}

impl fmt::Display for Invalid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Invalid::Empty => f.write_str("sequence is empty"),
            Invalid::Mixed { first_t, first_u } => write!(
                f,
                "mixed DNA/RNA symbols ('T' at {first_t}, 'U' at {first_u})"
            ),
            Invalid::Disallowed(bad) => {
                f.write_str("disallowed character(s): ")?;
                for (i, (pos, c)) in bad.iter().take(MAX_LISTED).enumerate() {
                    if i > 0 { f.write_str(", ")?; }
                    write!(f, "'{}' at {}", c.escape_default(), pos)?;
                }
                if bad.len() > MAX_LISTED {
                    write!(f, " (+{} more)", bad.len() - MAX_LISTED)?;
                }
                Ok(())
            }
        }
    }
}

/// Unified error type for the analysis engine.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum SeqError {
    /// Raw input could not be turned into a [`crate::Sequence`].
    #[error("invalid sequence: {0}")]
    InvalidSequence(Invalid),

    /// An operation was asked to work on the wrong nucleic acid.
    #[error("wrong sequence kind: expected {expected}, found {found}")]
    WrongKind { expected: SeqKind, found: SeqKind },

    /// Motif pattern rejected before searching.
    #[error("invalid motif: {0}")]
    InvalidMotif(String),
}

impl SeqError {
    /// The classifier's diagnosis, if this is an invalid-sequence error.
    pub fn invalid(&self) -> Option<&Invalid> {
        match self {
            SeqError::InvalidSequence(why) => Some(why),
            _ => None,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SeqError>;
