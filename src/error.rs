//! Error taxonomy for the annotation pipeline and the resolution client.
//!
//! Lex/parse/coercion errors are scoped to one comment block; load and
//! resolution errors are scoped to one lookup. None of them is process-fatal.

use std::path::PathBuf;

use crate::parser::grammar::ScopeKind;

/// Illegal byte encountered while tokenizing a comment block.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("illegal character {found:?} at byte offset {offset}")]
pub struct LexError {
    pub found: char,
    pub offset: usize,
}

/// Statement-level failure while parsing a comment block.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    /// The marker was followed by a scope suffix other than `.error` or
    /// `.error.suggestion`.
    #[error("unknown annotation scope {found:?}")]
    UnknownScope { found: String },

    /// The key is not in the legal set for its scope.
    #[error("unknown key {key:?} in {scope} scope")]
    UnknownKey { scope: ScopeKind, key: String },

    /// A marker (plus optional scope suffix) with no key before the input or
    /// the next statement began.
    #[error("annotation statement in {scope} scope is missing its key")]
    MissingKey { scope: ScopeKind },
}

/// A value did not fit the target field's semantic type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("value {value:?} is not valid for field {field:?}: expected {expected}")]
pub struct TypeCoercionError {
    pub field: &'static str,
    pub value: String,
    pub expected: &'static str,
}

/// Failure while folding one comment block into manifest state. The block is
/// rejected as a whole; previously assembled state is untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssembleError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Coercion(#[from] TypeCoercionError),

    /// An error definition reached the end of its block without a `code`
    /// statement. Writers must put `code` first in every `.error` group.
    #[error("error definition has no code (block at {file}:{line})")]
    MissingCode { file: String, line: u64 },
}

/// Manifest bytes could not be obtained or decoded.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("manifest file does not exist: {0}")]
    NotFound(PathBuf),

    #[error("unsupported manifest format: {0:?}")]
    UnsupportedFormat(String),

    #[error("failed to decode manifest: {0}")]
    DecodeFailed(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Lookup-time failure. Callers absorb this and fall back to the original,
/// unmodified fault.
#[derive(Debug, thiserror::Error)]
pub enum ResolutionError {
    #[error("error manifest is unavailable: {0}")]
    ManifestUnavailable(#[from] LoadError),

    #[error("no error definition found for code {0:?}")]
    CodeNotFound(String),
}
