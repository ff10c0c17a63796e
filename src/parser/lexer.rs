//! Token definitions for annotation blocks.
//!
//! The lexer is stateless and reentrant: one left-to-right pass, longest
//! match per rule, no lookahead. Any byte outside the recognized classes
//! fails the whole block with a [`LexError`].

use logos::Logos;

use crate::error::LexError;

/// Token classes, in priority order.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// Run of line breaks.
    #[regex(r"[\n\r]+")]
    Eol,

    /// The keyword opening every annotation statement.
    #[token("@fyi")]
    Marker,

    /// Run of letters, digits and the fixed punctuation set.
    #[regex(r#"[A-Za-z0-9_./:,\-'()~\[\]{}="|%]+"#)]
    Word,

    /// Run of horizontal whitespace.
    #[regex(r"[ \t]+")]
    Space,
}

/// Tokenize a block of text into a flat `(token, slice)` stream.
pub fn lex(input: &str) -> Result<Vec<(Token, &str)>, LexError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(input);
    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => tokens.push((token, lexer.slice())),
            Err(()) => {
                let offset = lexer.span().start;
                let found = input[offset..].chars().next().unwrap_or('\u{fffd}');
                return Err(LexError { found, offset });
            }
        }
    }
    Ok(tokens)
}
