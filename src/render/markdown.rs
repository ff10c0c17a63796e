//! Markdown-flavored renderer. Same sections as the text renderer, with the
//! title upper-cased into a heading and the URL line block-quoted.

use crate::client::Options;
use crate::model::{ErrorDefinition, Manifest};
use crate::render::{error_url, ordered_suggestions, Renderer};

pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn render(&self, manifest: &Manifest, error: &ErrorDefinition, opts: &Options) -> String {
        let mut content = String::new();

        if !error.title.is_empty() {
            content.push_str(&format!("# {}\n", error.title.to_uppercase()));
        }

        if opts.show_short_summary && !error.short.is_empty() {
            content.push_str("## What caused the error\n");
            content.push_str(error.short.trim());
            content.push('\n');
        }

        if opts.show_url {
            content.push_str(&format!(
                "\n> Additional information is available at: {}\n",
                error_url(manifest, error, opts)
            ));
        }

        let suggestions = ordered_suggestions(error, opts);
        if !suggestions.is_empty() {
            content.push_str("## Quick Solutions\n");
            for suggestion in suggestions {
                content.push_str(&format!("* **Suggestion**: {}\n", suggestion.short));
            }
        }

        content
    }
}
