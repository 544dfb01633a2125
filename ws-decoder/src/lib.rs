//! # Whitespace Decoder
//!
//! Turn whitespace source text into a structured [`Program`].
//!
//! Only space, tab and line-feed carry meaning; every other character is
//! skipped wherever it appears, including inside instruction codes and
//! parameters.
//!
//! ## Example
//!
//! ```rust
//! use ws_decoder::decode;
//! use ws_spec::Instruction;
//!
//! // push 1; end (with a comment in the middle)
//! let source = "  push \t\n\n\nend\n";
//! let program = decode(source).unwrap();
//! assert_eq!(program.instructions(), &[Instruction::Push(1), Instruction::End]);
//! ```

pub mod error;
pub mod lexer;
pub mod parser;

pub use error::{ParseError, Result};
pub use lexer::{lex, Spanned};
pub use parser::{decode, decode_bytes, decode_tokens};

pub use ws_spec::Program;
