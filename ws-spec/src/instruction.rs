//! Whitespace instruction set
//!
//! Each instruction is an opcode plus an optional parameter:
//! - Integer: PUSH, COPY, SLIDE
//! - Label:   MARK, CALL, JUMP, JZ, JN
//! - None:    everything else

use crate::encoding::encode_number;
use crate::opcode::{Category, Opcode, ParamKind};
use crate::token::Token;
use crate::Word;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque label key
///
/// The raw space/tab string between a flow code and its terminator. Labels are
/// never interpreted numerically; two labels are the same label only if their
/// tokens are equal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Label(Vec<Token>);

impl Label {
    pub fn new(tokens: Vec<Token>) -> Self {
        Label(tokens)
    }

    /// Build a label from a `0`/`1` string (`0` = space, `1` = tab).
    /// Any other character yields `None`.
    pub fn from_bits(bits: &str) -> Option<Self> {
        bits.chars()
            .map(|c| match c {
                '0' => Some(Token::Space),
                '1' => Some(Token::Tab),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()
            .map(Label)
    }

    pub fn tokens(&self) -> &[Token] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L")?;
        for token in &self.0 {
            let bit = match token {
                Token::Space => '0',
                Token::Tab => '1',
                Token::LineFeed => '?',
            };
            write!(f, "{}", bit)?;
        }
        Ok(())
    }
}

/// Borrowed view of an instruction's parameter
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Parameter<'a> {
    None,
    Integer(Word),
    Label(&'a Label),
}

/// Whitespace instruction
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Instruction {
    // ========== Stack ==========
    /// PUSH: push n
    Push(Word),

    /// DUP: duplicate top
    Dup,

    /// COPY: push the nth item below the top (0 = top)
    Copy(Word),

    /// SWAP: swap the top two items
    Swap,

    /// DISCARD: drop top
    Discard,

    /// SLIDE: drop n items below the top, keeping the top
    Slide(Word),

    // ========== Arithmetic ==========
    /// ADD: push a + b
    Add,

    /// SUB: push a - b
    Sub,

    /// MUL: push a * b
    Mul,

    /// DIV: push floor(a / b)
    Div,

    /// MOD: push a mod b
    Mod,

    // ========== Heap ==========
    /// STORE: heap[address] = value (value on top)
    Store,

    /// RETRIEVE: push heap[address]
    Retrieve,

    // ========== Flow ==========
    /// MARK: label the next instruction
    Mark(Label),

    /// CALL: push return index, jump to label
    Call(Label),

    /// JUMP: jump to label
    Jump(Label),

    /// JZ: pop, jump to label if zero
    JumpIfZero(Label),

    /// JN: pop, jump to label if negative
    JumpIfNegative(Label),

    /// RET: pop return index from call stack
    Return,

    /// END: halt
    End,

    // ========== I/O ==========
    /// PRINTC: pop and write as a character
    PrintChar,

    /// PRINTI: pop and write as a decimal integer
    PrintInt,

    /// READC: pop address, read a character into heap[address]
    ReadChar,

    /// READI: pop address, read an integer into heap[address]
    ReadInt,
}

impl Instruction {
    /// Instruction kind
    pub fn opcode(&self) -> Opcode {
        match self {
            Instruction::Push(_) => Opcode::Push,
            Instruction::Dup => Opcode::Dup,
            Instruction::Copy(_) => Opcode::Copy,
            Instruction::Swap => Opcode::Swap,
            Instruction::Discard => Opcode::Discard,
            Instruction::Slide(_) => Opcode::Slide,
            Instruction::Add => Opcode::Add,
            Instruction::Sub => Opcode::Sub,
            Instruction::Mul => Opcode::Mul,
            Instruction::Div => Opcode::Div,
            Instruction::Mod => Opcode::Mod,
            Instruction::Store => Opcode::Store,
            Instruction::Retrieve => Opcode::Retrieve,
            Instruction::Mark(_) => Opcode::Mark,
            Instruction::Call(_) => Opcode::Call,
            Instruction::Jump(_) => Opcode::Jump,
            Instruction::JumpIfZero(_) => Opcode::JumpIfZero,
            Instruction::JumpIfNegative(_) => Opcode::JumpIfNegative,
            Instruction::Return => Opcode::Return,
            Instruction::End => Opcode::End,
            Instruction::PrintChar => Opcode::PrintChar,
            Instruction::PrintInt => Opcode::PrintInt,
            Instruction::ReadChar => Opcode::ReadChar,
            Instruction::ReadInt => Opcode::ReadInt,
        }
    }

    #[inline]
    pub fn category(&self) -> Category {
        self.opcode().category()
    }

    pub fn parameter(&self) -> Parameter<'_> {
        match self {
            Instruction::Push(n) | Instruction::Copy(n) | Instruction::Slide(n) => {
                Parameter::Integer(*n)
            }
            Instruction::Mark(label)
            | Instruction::Call(label)
            | Instruction::Jump(label)
            | Instruction::JumpIfZero(label)
            | Instruction::JumpIfNegative(label) => Parameter::Label(label),
            _ => Parameter::None,
        }
    }

    /// Build an instruction taking no parameter
    pub fn nullary(opcode: Opcode) -> Option<Self> {
        let instr = match opcode {
            Opcode::Dup => Instruction::Dup,
            Opcode::Swap => Instruction::Swap,
            Opcode::Discard => Instruction::Discard,
            Opcode::Add => Instruction::Add,
            Opcode::Sub => Instruction::Sub,
            Opcode::Mul => Instruction::Mul,
            Opcode::Div => Instruction::Div,
            Opcode::Mod => Instruction::Mod,
            Opcode::Store => Instruction::Store,
            Opcode::Retrieve => Instruction::Retrieve,
            Opcode::Return => Instruction::Return,
            Opcode::End => Instruction::End,
            Opcode::PrintChar => Instruction::PrintChar,
            Opcode::PrintInt => Instruction::PrintInt,
            Opcode::ReadChar => Instruction::ReadChar,
            Opcode::ReadInt => Instruction::ReadInt,
            _ => return None,
        };
        Some(instr)
    }

    /// Build an instruction taking an integer parameter
    pub fn with_integer(opcode: Opcode, value: Word) -> Option<Self> {
        match opcode {
            Opcode::Push => Some(Instruction::Push(value)),
            Opcode::Copy => Some(Instruction::Copy(value)),
            Opcode::Slide => Some(Instruction::Slide(value)),
            _ => None,
        }
    }

    /// Build an instruction taking a label parameter
    pub fn with_label(opcode: Opcode, label: Label) -> Option<Self> {
        match opcode {
            Opcode::Mark => Some(Instruction::Mark(label)),
            Opcode::Call => Some(Instruction::Call(label)),
            Opcode::Jump => Some(Instruction::Jump(label)),
            Opcode::JumpIfZero => Some(Instruction::JumpIfZero(label)),
            Opcode::JumpIfNegative => Some(Instruction::JumpIfNegative(label)),
            _ => None,
        }
    }

    /// Append the token encoding of this instruction to `out`
    pub fn encode(&self, out: &mut Vec<Token>) {
        out.extend_from_slice(self.opcode().code());
        match self.parameter() {
            Parameter::None => {}
            Parameter::Integer(n) => encode_number(n, out),
            Parameter::Label(label) => {
                out.extend_from_slice(label.tokens());
                out.push(Token::LineFeed);
            }
        }
    }

    /// Whether the parameter shape matches the opcode's declared kind
    pub fn is_well_formed(&self) -> bool {
        let kind = match self.parameter() {
            Parameter::None => ParamKind::None,
            Parameter::Integer(_) => ParamKind::Integer,
            Parameter::Label(_) => ParamKind::Label,
        };
        kind == self.opcode().param_kind()
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.parameter() {
            Parameter::None => write!(f, "{}", self.opcode()),
            Parameter::Integer(n) => write!(f, "{} {}", self.opcode(), n),
            Parameter::Label(label) => write!(f, "{} {}", self.opcode(), label),
        }
    }
}
