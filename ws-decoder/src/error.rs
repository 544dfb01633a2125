//! Decoder errors

use thiserror::Error;
use ws_spec::SpecError;

/// Load-time decode failure
///
/// Positions are byte offsets of the first token of the offending instruction.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Unknown opcode at byte {position}")]
    UnknownOpcode { position: usize },

    #[error("Unterminated parameter for instruction at byte {position}")]
    UnterminatedParameter { position: usize },

    #[error("Number out of range for instruction at byte {position}")]
    NumberOutOfRange { position: usize },

    #[error(transparent)]
    Spec(#[from] SpecError),
}

impl ParseError {
    /// Byte offset of the offending instruction, if known
    pub fn position(&self) -> Option<usize> {
        match self {
            ParseError::UnknownOpcode { position }
            | ParseError::UnterminatedParameter { position }
            | ParseError::NumberOutOfRange { position } => Some(*position),
            ParseError::Spec(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ParseError>;
