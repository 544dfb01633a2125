//! Additional encoding tests for edge cases not covered in unit tests

use ws_spec::encoding::*;
use ws_spec::{Category, Instruction, Label, Opcode, ParamKind, SpecError, Token, OPCODE_TABLE};

use ws_spec::Token::{LineFeed as L, Space as S, Tab as T};

// ============================================================================
// Number Encoding Edge Cases
// ============================================================================

#[test]
fn test_zero_is_positive_and_empty() {
    assert_eq!(number_tokens(0), vec![S, L]);
}

#[test]
fn test_extreme_values() {
    let max = number_tokens(i64::MAX);
    assert_eq!(max.len(), 1 + 63 + 1);
    assert_eq!(max[0], S);
    assert!(max[1..64].iter().all(|&t| t == T));

    let min = number_tokens(i64::MIN);
    assert_eq!(min.len(), 1 + 64 + 1);
    assert_eq!(min[0], T);
    assert_eq!(min[1], T);
    assert!(min[2..65].iter().all(|&t| t == S));
}

#[test]
fn test_decode_ignores_leading_zero_bits() {
    assert_eq!(decode_number(&[S, S, S, T, S, T]), Ok(5));
    assert_eq!(decode_number(&[T, S, S]), Ok(0));
}

#[test]
fn test_decode_errors() {
    assert_eq!(decode_number(&[L]), Err(SpecError::InvalidSign(L)));
    assert_eq!(decode_number(&[S, T, L]), Err(SpecError::InvalidDigit(L)));

    let mut too_big = vec![S];
    too_big.extend(std::iter::repeat(T).take(64));
    assert_eq!(decode_number(&too_big), Err(SpecError::NumberOutOfRange));
}

#[test]
fn test_encode_appends() {
    let mut out = vec![L];
    encode_number(-1, &mut out);
    assert_eq!(out, vec![L, T, T, L]);
}

// ============================================================================
// Opcode Table
// ============================================================================

#[test]
fn test_table_covers_every_opcode_once() {
    assert_eq!(OPCODE_TABLE.len(), Opcode::COUNT);
    for (entry, opcode) in OPCODE_TABLE.iter().zip(Opcode::ALL) {
        assert_eq!(entry.opcode, opcode);
        assert_eq!(opcode.entry().code, entry.code);
    }
}

#[test]
fn test_codes_start_with_category_prefix() {
    for entry in OPCODE_TABLE.iter() {
        let prefix: &[Token] = match entry.category {
            Category::Stack => &[S],
            Category::Arithmetic => &[T, S],
            Category::Heap => &[T, T],
            Category::Flow => &[L],
            Category::Io => &[T, L],
        };
        assert!(entry.code.starts_with(prefix), "{}", entry.opcode);
    }
}

#[test]
fn test_parameter_kinds() {
    let with_integer: Vec<Opcode> = Opcode::ALL
        .into_iter()
        .filter(|op| op.param_kind() == ParamKind::Integer)
        .collect();
    assert_eq!(with_integer, vec![Opcode::Push, Opcode::Copy, Opcode::Slide]);

    let with_label = Opcode::ALL
        .into_iter()
        .filter(|op| op.param_kind() == ParamKind::Label)
        .count();
    assert_eq!(with_label, 5);
}

#[test]
fn test_instruction_encoding_matches_table() {
    let mut tokens = Vec::new();
    Instruction::JumpIfNegative(Label::from_bits("10").unwrap()).encode(&mut tokens);
    assert_eq!(tokens, vec![L, T, T, T, S, L]);

    tokens.clear();
    Instruction::Slide(2).encode(&mut tokens);
    assert_eq!(tokens, vec![S, T, L, S, T, S, L]);
}
