//! # Whitespace Language Core
//!
//! Core types shared by the decoder and the virtual machine.
//!
//! ## Key Features
//! - Three-token alphabet: space, tab and line-feed
//! - Prefix-free opcode table (24 instructions), checked at compile time
//! - Sign-prefixed binary number encoding (not two's complement)
//! - Opaque label keys compared by equality only
//! - Immutable `Program` with a textual listing and a binary image format

pub mod token;
pub mod opcode;
pub mod instruction;
pub mod encoding;
pub mod error;
pub mod program;

pub use token::Token;
pub use opcode::{Category, Opcode, OpcodeEntry, ParamKind, OPCODE_TABLE};
pub use instruction::{Instruction, Label, Parameter};
pub use error::SpecError;
pub use program::Program;

/// Signed machine word used for stack cells, heap cells and parameters
pub type Word = i64;

/// Heap address (non-negative `Word`)
pub type Address = Word;
