//! Manifest assembler — folds ordered statement sequences into manifests.
//!
//! One assembler accumulates every comment block of a process run. Blocks
//! naming different applications open independent manifests, so a single
//! extraction pass can serve multiple services.
//!
//! Error-scoped statements buffer into a pending definition and are only
//! inserted into the catalog once the definition is finalized (next `code`
//! statement or end of block). Writers should still put `code` first in every
//! `.error` group: statements before it attach to a definition whose key is
//! not yet known, and a group that never states its code is rejected rather
//! than stored under an empty key.

use tracing::{debug, warn};

use crate::error::{AssembleError, TypeCoercionError};
use crate::model::{ErrorDefinition, Location, Manifest, Suggestion};
use crate::parser::grammar::{self, Key, ScopeKind, Statement};

/// Position of a comment block as a whole, attached to every error
/// definition the block touches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceLocation {
    pub file_path: String,
    pub line: u64,
}

/// Strict value coercions for annotation values.
pub mod coerce {
    use super::TypeCoercionError;
    use crate::model::Severity;

    /// Strict true/false parse.
    pub fn boolean(field: &'static str, value: &str) -> Result<bool, TypeCoercionError> {
        match value.trim() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(TypeCoercionError {
                field,
                value: value.to_string(),
                expected: "true or false",
            }),
        }
    }

    /// Strict decimal parse.
    pub fn float(field: &'static str, value: &str) -> Result<f64, TypeCoercionError> {
        value.trim().parse::<f64>().map_err(|_| TypeCoercionError {
            field,
            value: value.to_string(),
            expected: "a decimal number",
        })
    }

    /// Case-insensitive match against the severity set.
    pub fn severity(value: &str) -> Result<Severity, TypeCoercionError> {
        value.parse()
    }
}

/// Working state for the `.error` group currently being folded.
#[derive(Default)]
struct PendingError {
    definition: ErrorDefinition,
    /// Accumulates suggestion fields across `.error.suggestion` statements.
    suggestion: Suggestion,
}

/// Folds comment blocks into one or more manifests.
#[derive(Default)]
pub struct Assembler {
    /// Open manifests, in order of first appearance.
    manifests: Vec<Manifest>,
    /// Index of the manifest the next anonymous block merges into.
    current: usize,
}

impl Assembler {
    pub fn new() -> Self {
        Assembler::default()
    }

    /// Fold one comment block into the accumulated state.
    ///
    /// A failing block leaves previously assembled state untouched; whether
    /// the caller aborts the run or skips the block is its own policy (see
    /// [`assemble_all`]).
    pub fn push_block(
        &mut self,
        text: &str,
        location: Option<&SourceLocation>,
    ) -> Result<(), AssembleError> {
        let statements = grammar::parse(text)?;
        if statements.is_empty() {
            return Ok(());
        }
        debug!(statements = statements.len(), "folding annotation block");

        let partial = fold_statements(&statements, location)?;
        self.merge(partial, location);
        Ok(())
    }

    /// Hand off the assembled manifests. Manifests that never received a
    /// name stay in the open (invalid) state and are handed off as-is; the
    /// caller decides whether to keep them.
    pub fn finish(self) -> Vec<Manifest> {
        self.manifests
    }

    /// Merge a block's partial manifest into the accumulated set. Scalar root
    /// fields are first-seen-wins once non-empty; error definitions merge by
    /// code, last write wins.
    fn merge(&mut self, partial: Manifest, location: Option<&SourceLocation>) {
        let target = match self.target_index(&partial.name) {
            Some(index) => index,
            None => {
                self.manifests.push(Manifest::default());
                self.manifests.len() - 1
            }
        };
        self.current = target;
        let manifest = &mut self.manifests[target];

        if manifest.name.is_empty() {
            manifest.name = partial.name;
        }
        if manifest.version.is_empty() {
            manifest.version = partial.version;
        }
        if manifest.base_url.is_empty() {
            manifest.base_url = partial.base_url;
        }
        if manifest.title.is_none() {
            manifest.title = partial.title;
        }
        if manifest.description.is_none() {
            manifest.description = partial.description;
        }
        if manifest.repository.is_none() {
            manifest.repository = partial.repository;
        }

        for (code, mut definition) in partial.errors {
            definition.location = location.map(|loc| Location {
                file: loc.file_path.clone(),
                line: loc.line,
            });
            manifest.errors.insert(code, definition);
        }
    }

    /// Pick the manifest a block merges into: by name when the block states
    /// one, otherwise the current open manifest.
    fn target_index(&self, name: &str) -> Option<usize> {
        if name.is_empty() {
            if self.manifests.is_empty() {
                return None;
            }
            return Some(self.current);
        }
        if let Some(index) = self.manifests.iter().position(|m| m.name == name) {
            return Some(index);
        }
        // A still-anonymous open manifest adopts the first name it sees.
        self.manifests
            .iter()
            .position(|m| m.name.is_empty())
            .filter(|_| self.manifests.len() == 1 && self.current == 0)
    }
}

/// Fold one block's statements into a partial manifest.
fn fold_statements(
    statements: &[Statement],
    location: Option<&SourceLocation>,
) -> Result<Manifest, AssembleError> {
    let mut partial = Manifest::default();
    let mut pending: Option<PendingError> = None;

    for statement in statements {
        let value = statement.value.as_str();
        match statement.scope.kind {
            ScopeKind::Root => assign_root(&mut partial, statement.scope.key, value),
            ScopeKind::Error => {
                if statement.scope.key == Key::Code {
                    // A new code finalizes the previous definition.
                    if let Some(previous) = pending.take() {
                        flush_pending(&mut partial, previous, location)?;
                    }
                    let entry = pending.get_or_insert_with(PendingError::default);
                    entry.definition.code = value.trim().to_string();
                } else {
                    let entry = pending.get_or_insert_with(PendingError::default);
                    assign_error(&mut entry.definition, statement.scope.key, value)?;
                }
            }
            ScopeKind::ErrorSuggestion => {
                let entry = pending.get_or_insert_with(PendingError::default);
                match statement.scope.key {
                    Key::Short => entry.suggestion.short = value.to_string(),
                    Key::DocRef => entry.suggestion.doc_ref = Some(value.to_string()),
                    // Unreachable: the grammar only admits the keys above in
                    // suggestion scope.
                    _ => {}
                }
                // Every completed suggestion statement appends a snapshot
                // under the next sequence id.
                let mut snapshot = entry.suggestion.clone();
                snapshot.id = (entry.definition.suggestions.len() + 1).to_string();
                entry.definition.suggestions.push(snapshot);
            }
        }
    }

    if let Some(last) = pending {
        flush_pending(&mut partial, last, location)?;
    }

    Ok(partial)
}

fn flush_pending(
    partial: &mut Manifest,
    pending: PendingError,
    location: Option<&SourceLocation>,
) -> Result<(), AssembleError> {
    let definition = pending.definition;
    if definition.code.is_empty() {
        let loc = location.cloned().unwrap_or_default();
        return Err(AssembleError::MissingCode {
            file: loc.file_path,
            line: loc.line,
        });
    }
    partial.errors.insert(definition.code.clone(), definition);
    Ok(())
}

fn assign_root(manifest: &mut Manifest, key: Key, value: &str) {
    match key {
        Key::Name => manifest.name = value.to_string(),
        Key::Title => manifest.title = Some(value.to_string()),
        Key::Description => manifest.description = Some(value.to_string()),
        Key::BaseUrl => manifest.base_url = value.to_string(),
        Key::Version => manifest.version = value.to_string(),
        Key::Repository => manifest.repository = Some(value.to_string()),
        // Unreachable: the grammar only admits the keys above in root scope.
        _ => {}
    }
}

fn assign_error(
    definition: &mut ErrorDefinition,
    key: Key,
    value: &str,
) -> Result<(), TypeCoercionError> {
    match key {
        Key::Title => definition.title = value.to_string(),
        Key::Short => definition.short = value.to_string(),
        Key::Long => definition.long = Some(value.to_string()),
        Key::Severity => definition.severity = coerce::severity(value)?,
        // Code is handled by the caller; other keys are unreachable here.
        _ => {}
    }
    Ok(())
}

/// Drive the assembler over many blocks with a caller-chosen failure policy:
/// strict aborts on the first bad block, lenient logs and skips it.
pub fn assemble_all<'a, I>(blocks: I, strict: bool) -> Result<Vec<Manifest>, AssembleError>
where
    I: IntoIterator<Item = (&'a str, Option<&'a SourceLocation>)>,
{
    let mut assembler = Assembler::new();
    for (text, location) in blocks {
        if let Err(err) = assembler.push_block(text, location) {
            if strict {
                return Err(err);
            }
            warn!(error = %err, "skipping malformed annotation block");
        }
    }
    Ok(assembler.finish())
}
