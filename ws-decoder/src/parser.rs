//! Instruction decoder
//!
//! Scans the token stream left to right. At each position the opcode table
//! yields at most one matching code (the table is prefix-free), and the
//! parameter, if any, runs up to and including the next line-feed.

use crate::error::{ParseError, Result};
use crate::lexer::{lex, Spanned};
use ws_spec::encoding::decode_number;
use ws_spec::{Instruction, Label, Opcode, ParamKind, Program, SpecError, Token};

/// Decode whitespace source text
pub fn decode(source: &str) -> Result<Program> {
    decode_tokens(&lex(source))
}

/// Decode raw program bytes
///
/// Bytes that are not valid UTF-8 are replaced before lexing; the replacement
/// character is a separator like any other.
pub fn decode_bytes(bytes: &[u8]) -> Result<Program> {
    decode(&String::from_utf8_lossy(bytes))
}

/// Decode an already-lexed token stream
pub fn decode_tokens(tokens: &[Spanned]) -> Result<Program> {
    let kinds: Vec<Token> = tokens.iter().map(|s| s.token).collect();
    let mut instructions = Vec::new();
    let mut pos = 0;

    while pos < kinds.len() {
        let position = tokens[pos].offset;
        let (instr, next) = decode_instruction(&kinds, pos, position)?;
        instructions.push(instr);
        pos = next;
    }

    Ok(Program::new(instructions))
}

/// Decode one instruction starting at token index `pos`.
/// Returns the instruction and the index just past it.
fn decode_instruction(
    kinds: &[Token],
    pos: usize,
    position: usize,
) -> Result<(Instruction, usize)> {
    let entry = Opcode::lookup(&kinds[pos..]).ok_or(ParseError::UnknownOpcode { position })?;
    let opcode = entry.opcode;
    let start = pos + entry.code.len();

    let (instr, next) = match entry.param {
        ParamKind::None => (Instruction::nullary(opcode), start),
        ParamKind::Integer => {
            let (param, next) = read_parameter(kinds, start)
                .ok_or(ParseError::UnterminatedParameter { position })?;
            // Parameters never contain a line-feed, so only the range can fail
            let value =
                decode_number(param).map_err(|_| ParseError::NumberOutOfRange { position })?;
            (Instruction::with_integer(opcode, value), next)
        }
        ParamKind::Label => {
            let (param, next) = read_parameter(kinds, start)
                .ok_or(ParseError::UnterminatedParameter { position })?;
            (Instruction::with_label(opcode, Label::new(param.to_vec())), next)
        }
    };

    let instr = instr.ok_or(SpecError::ParameterMismatch(opcode))?;
    Ok((instr, next))
}

/// Tokens from `start` up to the next line-feed, and the index past it
fn read_parameter(kinds: &[Token], start: usize) -> Option<(&[Token], usize)> {
    let rest = &kinds[start..];
    let len = rest.iter().position(|&t| t == Token::LineFeed)?;
    Some((&rest[..len], start + len + 1))
}
