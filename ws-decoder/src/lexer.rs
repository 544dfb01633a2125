//! # Lexer for whitespace source
//!
//! Produces the raw token stream. Everything that is not a space, tab or
//! line-feed is a separator and never reaches the decoder.

use logos::Logos;
use ws_spec::Token;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[^ \t\n]+")]
enum Lexeme {
    #[token(" ")]
    Space,

    #[token("\t")]
    Tab,

    #[token("\n")]
    LineFeed,
}

impl From<Lexeme> for Token {
    fn from(lexeme: Lexeme) -> Self {
        match lexeme {
            Lexeme::Space => Token::Space,
            Lexeme::Tab => Token::Tab,
            Lexeme::LineFeed => Token::LineFeed,
        }
    }
}

/// Token with its byte offset in the source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spanned {
    pub token: Token,
    pub offset: usize,
}

/// Lex `source` into meaningful tokens
pub fn lex(source: &str) -> Vec<Spanned> {
    Lexeme::lexer(source)
        .spanned()
        // Every character is either a token or skipped, so errors never occur
        .filter_map(|(lexeme, span)| {
            lexeme.ok().map(|lexeme| Spanned {
                token: lexeme.into(),
                offset: span.start,
            })
        })
        .collect()
}
