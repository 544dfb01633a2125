//! Runtime error types

use thiserror::Error;
use ws_spec::{Label, Word};

/// Fatal run-time fault raised by a single instruction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Fault {
    #[error("Stack underflow: needed {needed} items, found {available}")]
    StackUnderflow { needed: usize, available: usize },

    #[error("Invalid stack index: {index}")]
    InvalidStackIndex { index: Word },

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Arithmetic overflow")]
    ArithmeticOverflow,

    #[error("Invalid heap address: {address}")]
    InvalidHeapAddress { address: Word },

    #[error("Undefined label: {label}")]
    UndefinedLabel { label: Label },

    #[error("Call stack underflow")]
    CallStackUnderflow,

    #[error("Unexpected end of input")]
    UnexpectedEndOfInput,

    #[error("Invalid character code: {value}")]
    InvalidCharacter { value: Word },

    #[error("Invalid number input: {text:?}")]
    InvalidNumberInput { text: String },

    #[error("Instruction pointer out of range: {ip}")]
    InstructionPointerOutOfRange { ip: usize },

    #[error("I/O error: {message}")]
    Io { message: String },
}

impl From<std::io::Error> for Fault {
    fn from(err: std::io::Error) -> Self {
        Fault::Io {
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// Raised by the label pre-pass, before any instruction executes
    #[error("Duplicate label {label}: defined at instructions {first} and {second}")]
    DuplicateLabel {
        label: Label,
        first: usize,
        second: usize,
    },

    #[error("Fault at instruction {ip}: {fault}")]
    Fault { ip: usize, fault: Fault },

    /// Cancellation by the caller's step budget; not a fault
    #[error("Step limit exceeded: {limit}")]
    StepLimitExceeded { limit: u64 },
}

impl RuntimeError {
    /// The fault, if this error is a run-time fault
    pub fn fault(&self) -> Option<&Fault> {
        match self {
            RuntimeError::Fault { fault, .. } => Some(fault),
            _ => None,
        }
    }

    /// Check if the program was rejected before execution started
    pub fn is_load_error(&self) -> bool {
        matches!(self, RuntimeError::DuplicateLabel { .. })
    }
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
