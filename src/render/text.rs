//! Plain-text renderer.

use crate::client::Options;
use crate::model::{ErrorDefinition, Manifest};
use crate::render::{error_url, ordered_suggestions, Renderer};

pub struct TextRenderer;

impl Renderer for TextRenderer {
    fn render(&self, manifest: &Manifest, error: &ErrorDefinition, opts: &Options) -> String {
        let mut content = String::new();

        if !error.title.is_empty() {
            content.push_str(&error.title);
            content.push('\n');
        }

        if opts.show_short_summary && !error.short.is_empty() {
            content.push_str("What caused the error\n");
            content.push_str(error.short.trim());
            content.push('\n');
        }

        if opts.show_url {
            content.push_str(&format!(
                "\nAdditional information is available at: {}\n",
                error_url(manifest, error, opts)
            ));
        }

        let suggestions = ordered_suggestions(error, opts);
        if !suggestions.is_empty() {
            content.push_str("Quick Solutions\n");
            for suggestion in suggestions {
                content.push_str(&format!("* Suggestion: {}\n", suggestion.short));
            }
        }

        content
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Suggestion;

    fn fixture() -> (Manifest, ErrorDefinition) {
        let manifest = Manifest {
            name: "cli".into(),
            base_url: "https://x.io".into(),
            ..Manifest::default()
        };
        let error = ErrorDefinition {
            code: "invalid_payment".into(),
            title: "Invalid Payment".into(),
            short: "the payment was rejected".into(),
            suggestions: vec![
                Suggestion {
                    id: "1".into(),
                    short: "retry the payment".into(),
                    doc_ref: None,
                },
                Suggestion {
                    id: "2".into(),
                    short: "contact support".into(),
                    doc_ref: None,
                },
            ],
            ..ErrorDefinition::default()
        };
        (manifest, error)
    }

    #[test]
    fn full_message() {
        let (manifest, error) = fixture();
        let opts = Options::default();
        let rendered = TextRenderer.render(&manifest, &error, &opts);
        assert_eq!(
            rendered,
            "Invalid Payment\n\
             What caused the error\n\
             the payment was rejected\n\
             \nAdditional information is available at: https://x.io/cli/errors/invalid_payment\n\
             Quick Solutions\n\
             * Suggestion: retry the payment\n\
             * Suggestion: contact support\n"
        );
    }

    #[test]
    fn deterministic_output() {
        let (manifest, error) = fixture();
        let opts = Options::default();
        let first = TextRenderer.render(&manifest, &error, &opts);
        let second = TextRenderer.render(&manifest, &error, &opts);
        assert_eq!(first, second);
    }

    #[test]
    fn zero_cap_omits_suggestions_section() {
        let (manifest, error) = fixture();
        let opts = Options {
            max_suggestions: 0,
            ..Options::default()
        };
        let rendered = TextRenderer.render(&manifest, &error, &opts);
        assert!(!rendered.contains("Quick Solutions"));
        assert!(!rendered.contains("Suggestion:"));
    }

    #[test]
    fn toggles_hide_sections() {
        let (manifest, error) = fixture();
        let opts = Options {
            show_short_summary: false,
            show_url: false,
            ..Options::default()
        };
        let rendered = TextRenderer.render(&manifest, &error, &opts);
        assert!(!rendered.contains("What caused the error"));
        assert!(!rendered.contains("Additional information"));
    }
}
