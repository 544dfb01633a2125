//! # Opcode Table
//!
//! Every instruction is identified by a short token code. Codes are grouped by
//! an instruction modification parameter (IMP) prefix:
//! - `S`:  Stack manipulation
//! - `TS`: Arithmetic
//! - `TT`: Heap access
//! - `L`:  Flow control
//! - `TL`: I/O
//!
//! The table is prefix-free: no code is a prefix of another, so the decoder can
//! take the first matching entry without backtracking. This is enforced at
//! compile time by the `const` assertions at the bottom of the table.

use crate::token::Token;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Instruction kind
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opcode {
    // ========== Stack (IMP: S) ==========
    /// PUSH n: push n onto the stack
    Push = 0,
    /// DUP: duplicate the top item
    Dup = 1,
    /// COPY n: copy the nth item (0 = top) onto the top
    Copy = 2,
    /// SWAP: swap the top two items
    Swap = 3,
    /// DISCARD: drop the top item
    Discard = 4,
    /// SLIDE n: remove n items below the top, keeping the top
    Slide = 5,

    // ========== Arithmetic (IMP: TS) ==========
    /// ADD: a + b
    Add = 6,
    /// SUB: a - b
    Sub = 7,
    /// MUL: a * b
    Mul = 8,
    /// DIV: a / b (floored)
    Div = 9,
    /// MOD: a mod b (sign of b)
    Mod = 10,

    // ========== Heap (IMP: TT) ==========
    /// STORE: heap[address] = value
    Store = 11,
    /// RETRIEVE: push heap[address]
    Retrieve = 12,

    // ========== Flow (IMP: L) ==========
    /// MARK l: set label
    Mark = 13,
    /// CALL l: call subroutine
    Call = 14,
    /// JUMP l: unconditional jump
    Jump = 15,
    /// JZ l: jump if top is zero
    JumpIfZero = 16,
    /// JN l: jump if top is negative
    JumpIfNegative = 17,
    /// RET: end subroutine
    Return = 18,
    /// END: end program
    End = 19,

    // ========== I/O (IMP: TL) ==========
    /// PRINTC: write top as a character
    PrintChar = 20,
    /// PRINTI: write top as a decimal integer
    PrintInt = 21,
    /// READC: read a character into heap[top]
    ReadChar = 22,
    /// READI: read an integer into heap[top]
    ReadInt = 23,
}

impl Opcode {
    /// Number of opcodes
    pub const COUNT: usize = 24;

    pub const ALL: [Opcode; Self::COUNT] = [
        Opcode::Push,
        Opcode::Dup,
        Opcode::Copy,
        Opcode::Swap,
        Opcode::Discard,
        Opcode::Slide,
        Opcode::Add,
        Opcode::Sub,
        Opcode::Mul,
        Opcode::Div,
        Opcode::Mod,
        Opcode::Store,
        Opcode::Retrieve,
        Opcode::Mark,
        Opcode::Call,
        Opcode::Jump,
        Opcode::JumpIfZero,
        Opcode::JumpIfNegative,
        Opcode::Return,
        Opcode::End,
        Opcode::PrintChar,
        Opcode::PrintInt,
        Opcode::ReadChar,
        Opcode::ReadInt,
    ];

    #[inline]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Kind of parameter that follows the code
    pub const fn param_kind(self) -> ParamKind {
        match self {
            Opcode::Push | Opcode::Copy | Opcode::Slide => ParamKind::Integer,
            Opcode::Mark
            | Opcode::Call
            | Opcode::Jump
            | Opcode::JumpIfZero
            | Opcode::JumpIfNegative => ParamKind::Label,
            Opcode::Dup
            | Opcode::Swap
            | Opcode::Discard
            | Opcode::Add
            | Opcode::Sub
            | Opcode::Mul
            | Opcode::Div
            | Opcode::Mod
            | Opcode::Store
            | Opcode::Retrieve
            | Opcode::Return
            | Opcode::End
            | Opcode::PrintChar
            | Opcode::PrintInt
            | Opcode::ReadChar
            | Opcode::ReadInt => ParamKind::None,
        }
    }

    /// Get the instruction category
    pub const fn category(self) -> Category {
        match self {
            Opcode::Push
            | Opcode::Dup
            | Opcode::Copy
            | Opcode::Swap
            | Opcode::Discard
            | Opcode::Slide => Category::Stack,
            Opcode::Add | Opcode::Sub | Opcode::Mul | Opcode::Div | Opcode::Mod => {
                Category::Arithmetic
            }
            Opcode::Store | Opcode::Retrieve => Category::Heap,
            Opcode::Mark
            | Opcode::Call
            | Opcode::Jump
            | Opcode::JumpIfZero
            | Opcode::JumpIfNegative
            | Opcode::Return
            | Opcode::End => Category::Flow,
            Opcode::PrintChar | Opcode::PrintInt | Opcode::ReadChar | Opcode::ReadInt => {
                Category::Io
            }
        }
    }

    /// Table entry for this opcode
    #[inline]
    pub fn entry(self) -> &'static OpcodeEntry {
        // Table order matches discriminants (checked below)
        &OPCODE_TABLE[self as usize]
    }

    /// Token code identifying this opcode
    #[inline]
    pub fn code(self) -> &'static [Token] {
        self.entry().code
    }

    /// Find the entry whose code starts `tokens`
    pub fn lookup(tokens: &[Token]) -> Option<&'static OpcodeEntry> {
        OPCODE_TABLE.iter().find(|entry| tokens.starts_with(entry.code))
    }

    pub const fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Push => "push",
            Opcode::Dup => "dup",
            Opcode::Copy => "copy",
            Opcode::Swap => "swap",
            Opcode::Discard => "discard",
            Opcode::Slide => "slide",
            Opcode::Add => "add",
            Opcode::Sub => "sub",
            Opcode::Mul => "mul",
            Opcode::Div => "div",
            Opcode::Mod => "mod",
            Opcode::Store => "store",
            Opcode::Retrieve => "retrieve",
            Opcode::Mark => "mark",
            Opcode::Call => "call",
            Opcode::Jump => "jump",
            Opcode::JumpIfZero => "jz",
            Opcode::JumpIfNegative => "jn",
            Opcode::Return => "ret",
            Opcode::End => "end",
            Opcode::PrintChar => "printc",
            Opcode::PrintInt => "printi",
            Opcode::ReadChar => "readc",
            Opcode::ReadInt => "readi",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}

/// Parameter carried by an instruction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParamKind {
    None,
    /// Signed number terminated by a line-feed
    Integer,
    /// Opaque label key terminated by a line-feed
    Label,
}

/// Instruction category
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// PUSH, DUP, COPY, SWAP, DISCARD, SLIDE
    Stack = 0,
    /// ADD, SUB, MUL, DIV, MOD
    Arithmetic = 1,
    /// STORE, RETRIEVE
    Heap = 2,
    /// MARK, CALL, JUMP, JZ, JN, RET, END
    Flow = 3,
    /// PRINTC, PRINTI, READC, READI
    Io = 4,
}

impl Category {
    /// Total number of categories
    pub const COUNT: usize = 5;
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Stack => "stack",
            Category::Arithmetic => "arithmetic",
            Category::Heap => "heap",
            Category::Flow => "flow",
            Category::Io => "io",
        };
        write!(f, "{}", name)
    }
}

/// One row of the opcode table
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpcodeEntry {
    pub opcode: Opcode,
    pub code: &'static [Token],
    pub param: ParamKind,
    pub category: Category,
}

impl OpcodeEntry {
    const fn new(opcode: Opcode, code: &'static [Token]) -> Self {
        Self {
            opcode,
            code,
            param: opcode.param_kind(),
            category: opcode.category(),
        }
    }
}

const S: Token = Token::Space;
const T: Token = Token::Tab;
const L: Token = Token::LineFeed;

/// The opcode table, ordered by opcode discriminant
pub const OPCODE_TABLE: &[OpcodeEntry] = &[
    OpcodeEntry::new(Opcode::Push, &[S, S]),
    OpcodeEntry::new(Opcode::Dup, &[S, L, S]),
    OpcodeEntry::new(Opcode::Copy, &[S, T, S]),
    OpcodeEntry::new(Opcode::Swap, &[S, L, T]),
    OpcodeEntry::new(Opcode::Discard, &[S, L, L]),
    OpcodeEntry::new(Opcode::Slide, &[S, T, L]),
    OpcodeEntry::new(Opcode::Add, &[T, S, S, S]),
    OpcodeEntry::new(Opcode::Sub, &[T, S, S, T]),
    OpcodeEntry::new(Opcode::Mul, &[T, S, S, L]),
    OpcodeEntry::new(Opcode::Div, &[T, S, T, S]),
    OpcodeEntry::new(Opcode::Mod, &[T, S, T, T]),
    OpcodeEntry::new(Opcode::Store, &[T, T, S]),
    OpcodeEntry::new(Opcode::Retrieve, &[T, T, T]),
    OpcodeEntry::new(Opcode::Mark, &[L, S, S]),
    OpcodeEntry::new(Opcode::Call, &[L, S, T]),
    OpcodeEntry::new(Opcode::Jump, &[L, S, L]),
    OpcodeEntry::new(Opcode::JumpIfZero, &[L, T, S]),
    OpcodeEntry::new(Opcode::JumpIfNegative, &[L, T, T]),
    OpcodeEntry::new(Opcode::Return, &[L, T, L]),
    OpcodeEntry::new(Opcode::End, &[L, L, L]),
    OpcodeEntry::new(Opcode::PrintChar, &[T, L, S, S]),
    OpcodeEntry::new(Opcode::PrintInt, &[T, L, S, T]),
    OpcodeEntry::new(Opcode::ReadChar, &[T, L, T, S]),
    OpcodeEntry::new(Opcode::ReadInt, &[T, L, T, T]),
];

const _: () = assert!(
    OPCODE_TABLE.len() == Opcode::COUNT,
    "opcode table must have one entry per opcode"
);
const _: () = assert!(
    is_ordered_by_opcode(OPCODE_TABLE),
    "opcode table must be ordered by opcode discriminant"
);
const _: () = assert!(is_prefix_free(OPCODE_TABLE), "opcode codes must be prefix-free");

/// `short` is a prefix of (or equal to) `long`
const fn is_prefix(short: &[Token], long: &[Token]) -> bool {
    if short.len() > long.len() {
        return false;
    }
    let mut i = 0;
    while i < short.len() {
        if short[i] as u8 != long[i] as u8 {
            return false;
        }
        i += 1;
    }
    true
}

/// No code is a prefix of (or equal to) another code
pub const fn is_prefix_free(table: &[OpcodeEntry]) -> bool {
    let mut i = 0;
    while i < table.len() {
        if table[i].code.is_empty() {
            return false;
        }
        let mut j = 0;
        while j < table.len() {
            if i != j && is_prefix(table[i].code, table[j].code) {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}

const fn is_ordered_by_opcode(table: &[OpcodeEntry]) -> bool {
    let mut i = 0;
    while i < table.len() {
        if table[i].opcode as usize != i {
            return false;
        }
        i += 1;
    }
    true
}
