//! # Number Encoding
//!
//! Numbers are a sign token followed by a binary magnitude, most significant
//! digit first, terminated by a line-feed:
//!
//! ```text
//! [sign][digit]*[LF]
//! sign:  Space = positive, Tab = negative
//! digit: Space = 0,        Tab = 1
//! ```
//!
//! This is sign-and-magnitude, not two's complement: `-0` and `+0` are both 0.
//! An empty magnitude is 0. Zero encodes as `[Space][LF]`.

use crate::error::SpecError;
use crate::token::Token;
use crate::Word;

/// Append the encoding of `value` (including the terminator) to `out`
pub fn encode_number(value: Word, out: &mut Vec<Token>) {
    out.push(if value < 0 { Token::Tab } else { Token::Space });

    let magnitude = value.unsigned_abs();
    let bits = u64::BITS - magnitude.leading_zeros();
    for i in (0..bits).rev() {
        out.push(bit_token((magnitude >> i) & 1 == 1));
    }

    out.push(Token::LineFeed);
}

/// Encode `value` into a fresh token vector
pub fn number_tokens(value: Word) -> Vec<Token> {
    let mut out = Vec::new();
    encode_number(value, &mut out);
    out
}

/// Decode a number parameter (terminator excluded)
///
/// An empty parameter denotes 0.
pub fn decode_number(tokens: &[Token]) -> Result<Word, SpecError> {
    let Some((&sign, digits)) = tokens.split_first() else {
        return Ok(0);
    };

    let negative = match sign {
        Token::Space => false,
        Token::Tab => true,
        Token::LineFeed => return Err(SpecError::InvalidSign(sign)),
    };

    let mut magnitude: u64 = 0;
    for &digit in digits {
        let bit = match digit {
            Token::Space => 0,
            Token::Tab => 1,
            Token::LineFeed => return Err(SpecError::InvalidDigit(digit)),
        };
        magnitude = magnitude
            .checked_mul(2)
            .and_then(|m| m.checked_add(bit))
            .ok_or(SpecError::NumberOutOfRange)?;
    }

    if !negative {
        Word::try_from(magnitude).map_err(|_| SpecError::NumberOutOfRange)
    } else if magnitude == Word::MIN.unsigned_abs() {
        Ok(Word::MIN)
    } else {
        Word::try_from(magnitude)
            .map(|m| -m)
            .map_err(|_| SpecError::NumberOutOfRange)
    }
}

#[inline]
fn bit_token(set: bool) -> Token {
    if set {
        Token::Tab
    } else {
        Token::Space
    }
}
