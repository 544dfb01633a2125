//! # Program Structure
//!
//! A decoded program and its binary image format.
//!
//! Image layout:
//! ```text
//! Offset  Size  Field
//! ──────────────────────────────────
//! 0x00    4     magic ("WSPC")
//! 0x04    4     version
//! 0x08    ..    bincode-encoded instruction list
//! ```

use crate::error::SpecError;
use crate::instruction::Instruction;
use crate::token::{tokens_to_string, Token};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Magic number for program images: "WSPC" = 0x43505357 (little-endian)
pub const MAGIC: u32 = u32::from_le_bytes(*b"WSPC");

/// Image format version 1.0
pub const VERSION: u32 = 0x0001_0000;

/// Header size in bytes
pub const HEADER_SIZE: usize = 8;

/// Ordered, immutable instruction sequence
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    instructions: Vec<Instruction>,
}

impl Program {
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Instruction at `index`, if in bounds
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Instruction> {
        self.instructions.get(index)
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.instructions.iter()
    }

    /// Token encoding of the whole program
    pub fn to_tokens(&self) -> Vec<Token> {
        let mut out = Vec::new();
        for instr in &self.instructions {
            instr.encode(&mut out);
        }
        out
    }

    /// Whitespace source text of the whole program
    pub fn to_source(&self) -> String {
        tokens_to_string(&self.to_tokens())
    }

    /// Check whether `bytes` start with the image magic
    pub fn is_image(bytes: &[u8]) -> bool {
        bytes.len() >= 4 && bytes[0..4] == MAGIC.to_le_bytes()
    }

    /// Serialize to a binary image
    pub fn to_bytes(&self) -> Result<Vec<u8>, SpecError> {
        let payload = bincode::serialize(&self.instructions)
            .map_err(|e| SpecError::InvalidImage(e.to_string()))?;

        let mut bytes = Vec::with_capacity(HEADER_SIZE + payload.len());
        bytes.extend_from_slice(&MAGIC.to_le_bytes());
        bytes.extend_from_slice(&VERSION.to_le_bytes());
        bytes.extend_from_slice(&payload);
        Ok(bytes)
    }

    /// Deserialize from a binary image
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SpecError> {
        if bytes.len() < HEADER_SIZE {
            return Err(SpecError::InvalidImage(format!(
                "expected at least {} header bytes, found {}",
                HEADER_SIZE,
                bytes.len()
            )));
        }

        let magic = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        if magic != MAGIC {
            return Err(SpecError::InvalidMagic(magic));
        }

        let version = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        if version != VERSION {
            return Err(SpecError::InvalidVersion {
                expected: VERSION,
                found: version,
            });
        }

        let instructions: Vec<Instruction> = bincode::deserialize(&bytes[HEADER_SIZE..])
            .map_err(|e| SpecError::InvalidImage(e.to_string()))?;
        Ok(Self { instructions })
    }
}

impl FromIterator<Instruction> for Program {
    fn from_iter<I: IntoIterator<Item = Instruction>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.instructions.iter()
    }
}

/// One indexed line per instruction
impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.len().saturating_sub(1).to_string().len();
        for (index, instr) in self.instructions.iter().enumerate() {
            writeln!(f, "{:>width$}  {}", index, instr, width = width)?;
        }
        Ok(())
    }
}
