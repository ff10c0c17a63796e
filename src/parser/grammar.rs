//! Statement grammar — turns a token stream into ordered `Statement`s.
//!
//! Each statement is one annotation line group:
//!
//! ```text
//! @fyi <key> <value>
//! @fyi.error <key> <value>
//! @fyi.error.suggestion <key> <value>
//! ```
//!
//! The value runs until the next `@fyi` marker, so it may span lines; line
//! breaks inside a value collapse to single spaces. Blocks without any marker
//! parse to an empty statement list.

use std::fmt;

use crate::error::ParseError;
use crate::parser::lexer::{self, Token};

/// Nesting level an annotation statement applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Root,
    Error,
    ErrorSuggestion,
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ScopeKind::Root => "root",
            ScopeKind::Error => "error",
            ScopeKind::ErrorSuggestion => "error.suggestion",
        };
        f.write_str(s)
    }
}

/// Closed keyword vocabulary. Which keys are legal depends on the scope kind;
/// the pairing is checked once, in [`Key::for_scope`], so the assembler can
/// match on `(ScopeKind, Key)` exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Name,
    Title,
    Description,
    BaseUrl,
    Version,
    Repository,
    Code,
    Short,
    Long,
    Severity,
    DocRef,
}

impl Key {
    /// Resolve a raw keyword against the legal set for `scope`.
    fn for_scope(scope: ScopeKind, word: &str) -> Option<Key> {
        match scope {
            ScopeKind::Root => match word {
                "name" => Some(Key::Name),
                "title" => Some(Key::Title),
                "description" => Some(Key::Description),
                "base_url" => Some(Key::BaseUrl),
                "version" => Some(Key::Version),
                "repository" => Some(Key::Repository),
                _ => None,
            },
            ScopeKind::Error => match word {
                "code" => Some(Key::Code),
                "title" => Some(Key::Title),
                "short" => Some(Key::Short),
                "long" => Some(Key::Long),
                "severity" => Some(Key::Severity),
                _ => None,
            },
            ScopeKind::ErrorSuggestion => match word {
                "short" => Some(Key::Short),
                "doc_ref" => Some(Key::DocRef),
                _ => None,
            },
        }
    }
}

/// Statement scope: nesting level plus the keyword it assigns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scope {
    pub kind: ScopeKind,
    pub key: Key,
}

/// One parsed annotation statement. Transient: produced and consumed within
/// a single parse call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub scope: Scope,
    pub value: String,
}

/// Parse a block of comment text into ordered statements.
pub fn parse(input: &str) -> Result<Vec<Statement>, ParseError> {
    let tokens = lexer::lex(input)?;
    let mut statements = Vec::new();
    let mut cursor = tokens.iter().copied().peekable();

    while let Some((token, _)) = cursor.next() {
        if token != Token::Marker {
            continue;
        }

        // Optional scope suffix, lexed as a word starting with '.'.
        let mut kind = ScopeKind::Root;
        if let Some((Token::Word, suffix)) = cursor.peek() {
            if suffix.starts_with('.') {
                kind = match *suffix {
                    ".error" => ScopeKind::Error,
                    ".error.suggestion" => ScopeKind::ErrorSuggestion,
                    other => {
                        return Err(ParseError::UnknownScope {
                            found: other.to_string(),
                        })
                    }
                };
                cursor.next();
            }
        }

        // Key word, required.
        let word = loop {
            match cursor.peek() {
                Some((Token::Space, _)) => {
                    cursor.next();
                }
                Some((Token::Word, word)) => {
                    let word = *word;
                    cursor.next();
                    break word;
                }
                _ => return Err(ParseError::MissingKey { scope: kind }),
            }
        };
        let key = Key::for_scope(kind, word).ok_or_else(|| ParseError::UnknownKey {
            scope: kind,
            key: word.to_string(),
        })?;

        // Value: everything up to the next marker. Horizontal whitespace is
        // kept verbatim, line-break runs become single spaces.
        let mut value = String::new();
        while let Some((token, slice)) = cursor.peek() {
            match token {
                Token::Marker => break,
                Token::Eol => value.push(' '),
                Token::Word | Token::Space => value.push_str(slice),
            }
            cursor.next();
        }

        statements.push(Statement {
            scope: Scope { kind, key },
            value: value.trim().to_string(),
        });
    }

    Ok(statements)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_root_statements() {
        let statements = parse("@fyi version v1\n@fyi name cli\n@fyi base_url https://x.io").unwrap();
        assert_eq!(statements.len(), 3);
        assert_eq!(statements[0].scope.kind, ScopeKind::Root);
        assert_eq!(statements[0].scope.key, Key::Version);
        assert_eq!(statements[0].value, "v1");
        assert_eq!(statements[1].scope.key, Key::Name);
        assert_eq!(statements[1].value, "cli");
        assert_eq!(statements[2].scope.key, Key::BaseUrl);
        assert_eq!(statements[2].value, "https://x.io");
    }

    #[test]
    fn parse_error_scope() {
        let statements = parse("@fyi.error code invalid_payment").unwrap();
        assert_eq!(statements[0].scope.kind, ScopeKind::Error);
        assert_eq!(statements[0].scope.key, Key::Code);
        assert_eq!(statements[0].value, "invalid_payment");
    }

    #[test]
    fn parse_suggestion_scope() {
        let statements = parse("@fyi.error.suggestion short try again").unwrap();
        assert_eq!(statements[0].scope.kind, ScopeKind::ErrorSuggestion);
        assert_eq!(statements[0].scope.key, Key::Short);
        assert_eq!(statements[0].value, "try again");
    }

    #[test]
    fn parse_multi_word_value() {
        let statements = parse("@fyi description this is an example description").unwrap();
        assert_eq!(statements[0].value, "this is an example description");
    }

    #[test]
    fn parse_multi_line_value() {
        let statements =
            parse("@fyi.error long the command has not\nbeen implemented yet\n@fyi.error short nope")
                .unwrap();
        assert_eq!(statements[0].value, "the command has not been implemented yet");
        assert_eq!(statements[1].value, "nope");
    }

    #[test]
    fn parse_without_marker_is_empty() {
        assert_eq!(parse("just a plain comment line").unwrap(), vec![]);
        assert_eq!(parse("").unwrap(), vec![]);
    }

    #[test]
    fn parse_unknown_key_fails() {
        let err = parse("@fyi.error bogus_key value").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnknownKey {
                scope: ScopeKind::Error,
                key: "bogus_key".to_string(),
            }
        );
    }

    #[test]
    fn parse_key_scope_sets_are_disjoint() {
        // `code` is only legal under .error, `doc_ref` only under .error.suggestion
        assert!(parse("@fyi code x").is_err());
        assert!(parse("@fyi.error doc_ref x").is_err());
        assert!(parse("@fyi.error.suggestion code x").is_err());
    }

    #[test]
    fn parse_unknown_scope_fails() {
        let err = parse("@fyi.warning title boom").unwrap_err();
        assert!(matches!(err, ParseError::UnknownScope { .. }));
    }

    #[test]
    fn parse_missing_key_fails() {
        let err = parse("@fyi.error").unwrap_err();
        assert_eq!(err, ParseError::MissingKey { scope: ScopeKind::Error });
    }

    #[test]
    fn parse_trims_surrounding_whitespace() {
        let statements = parse("@fyi title   spaced out \n").unwrap();
        assert_eq!(statements[0].value, "spaced out");
    }
}
