//! Renderer module — trait-based output-style dispatch.
//!
//! Renderers are pure string transforms: same definition and configuration
//! in, byte-identical message out.

pub mod markdown;
pub mod text;

use crate::client::{Options, RenderMode};
use crate::model::{ErrorDefinition, Manifest, Suggestion};

/// Trait for rendering an error definition into a user-facing message.
pub trait Renderer {
    fn render(&self, manifest: &Manifest, error: &ErrorDefinition, opts: &Options) -> String;
}

/// Create a renderer for the configured output style.
pub fn create_renderer(mode: RenderMode) -> Box<dyn Renderer> {
    match mode {
        RenderMode::Text => Box::new(text::TextRenderer),
        RenderMode::Markdown => Box::new(markdown::MarkdownRenderer),
    }
}

/// Documentation URL for an error definition:
/// `{base_url}/{name}/{segment}/{code}`, replaced wholesale by a non-empty
/// override.
pub(crate) fn error_url(manifest: &Manifest, error: &ErrorDefinition, opts: &Options) -> String {
    match opts.override_url.as_deref() {
        Some(url) if !url.is_empty() => url.to_string(),
        _ => format!(
            "{}/{}/{}/{}",
            manifest.base_url, manifest.name, opts.error_path_segment, error.code
        ),
    }
}

/// Suggestions in ascending numeric id order, skipping empty remediation
/// text, capped at `max_suggestions`. Sorting here keeps the output
/// deterministic even for definitions built outside the assembler.
pub(crate) fn ordered_suggestions<'a>(
    error: &'a ErrorDefinition,
    opts: &Options,
) -> Vec<&'a Suggestion> {
    let mut suggestions: Vec<&Suggestion> = error
        .suggestions
        .iter()
        .filter(|s| !s.short.is_empty())
        .collect();
    suggestions.sort_by_key(|s| s.id.parse::<u64>().unwrap_or(u64::MAX));
    suggestions.truncate(opts.max_suggestions);
    suggestions
}
