//! The three meaningful characters of the language

use serde::{Deserialize, Serialize};
use std::fmt;

/// Language token
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Token {
    /// `' '`: binary 0, positive sign
    Space = 0,
    /// `'\t'`: binary 1, negative sign
    Tab = 1,
    /// `'\n'`: parameter terminator
    LineFeed = 2,
}

impl Token {
    pub const ALL: [Token; 3] = [Token::Space, Token::Tab, Token::LineFeed];

    #[inline]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            ' ' => Some(Token::Space),
            '\t' => Some(Token::Tab),
            '\n' => Some(Token::LineFeed),
            _ => None,
        }
    }

    #[inline]
    pub const fn to_char(self) -> char {
        match self {
            Token::Space => ' ',
            Token::Tab => '\t',
            Token::LineFeed => '\n',
        }
    }

    /// Short name used in listings (`S`, `T`, `L`)
    pub const fn short_name(self) -> char {
        match self {
            Token::Space => 'S',
            Token::Tab => 'T',
            Token::LineFeed => 'L',
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Token::Space => "[Space]",
            Token::Tab => "[Tab]",
            Token::LineFeed => "[LF]",
        };
        write!(f, "{}", name)
    }
}

/// Render tokens as source text
pub fn tokens_to_string(tokens: &[Token]) -> String {
    tokens.iter().map(|t| t.to_char()).collect()
}
