//! Annotation parsing pipeline: raw comment text → tokens → statements →
//! manifests. Collaborators hand in already-extracted comment blocks; this
//! module never touches the filesystem.

pub mod assemble;
pub mod grammar;
pub mod lexer;

pub use assemble::{assemble_all, Assembler, SourceLocation};
pub use grammar::{Key, Scope, ScopeKind, Statement};

use crate::error::AssembleError;
use crate::model::Manifest;

/// Evaluate a single comment block into a partial manifest. Convenience for
/// callers that do not need multi-block accumulation.
pub fn eval(text: &str) -> Result<Manifest, AssembleError> {
    let mut assembler = Assembler::new();
    assembler.push_block(text, None)?;
    Ok(assembler.finish().into_iter().next().unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eval_single_block() {
        let manifest = eval("@fyi name cli\n@fyi version v1.0.0-alpha1").unwrap();
        assert_eq!(manifest.name, "cli");
        assert_eq!(manifest.version, "v1.0.0-alpha1");
    }

    #[test]
    fn eval_plain_comment_is_empty() {
        let manifest = eval("TODO: tidy this up").unwrap();
        assert_eq!(manifest, Manifest::default());
    }
}
