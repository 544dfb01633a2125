//! # Error Types for the whitespace core

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    // Number encoding errors
    #[error("Number out of range: magnitude does not fit in 64 bits")]
    NumberOutOfRange,

    #[error("Invalid sign token: {0}")]
    InvalidSign(crate::Token),

    #[error("Invalid digit token: {0}")]
    InvalidDigit(crate::Token),

    // Instruction errors
    #[error("Parameter does not match opcode {0}")]
    ParameterMismatch(crate::Opcode),

    // Program image errors
    #[error("Invalid program magic: expected 0x43505357, got {0:#010x}")]
    InvalidMagic(u32),

    #[error("Invalid program version: expected {expected:#010x}, found {found:#010x}")]
    InvalidVersion { expected: u32, found: u32 },

    #[error("Invalid program image: {0}")]
    InvalidImage(String),
}

impl SpecError {
    /// Errors raised while reading number parameters
    pub fn is_encoding_error(&self) -> bool {
        matches!(
            self,
            SpecError::NumberOutOfRange | SpecError::InvalidSign(_) | SpecError::InvalidDigit(_)
        )
    }
}
