//! Error resolution client — the read path of the manifest document.

pub mod local;

pub use local::LocalClient;

use crate::error::ResolutionError;

/// Output style for resolved messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderMode {
    #[default]
    Text,
    Markdown,
}

/// Resolution and rendering configuration. This is the closed option set;
/// construct with struct update syntax over [`Options::default`].
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub render_as: RenderMode,
    pub show_short_summary: bool,
    pub show_url: bool,
    /// Replaces the constructed documentation URL wholesale when non-empty.
    pub override_url: Option<String>,
    /// Cap on rendered suggestions; 0 omits the section entirely.
    pub max_suggestions: usize,
    /// URL path segment under which error pages live.
    pub error_path_segment: String,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            render_as: RenderMode::Text,
            show_short_summary: true,
            show_url: true,
            override_url: None,
            max_suggestions: 3,
            error_path_segment: "errors".to_string(),
        }
    }
}

/// Resolves an error code into a rendered, human-facing message.
pub trait Client {
    fn resolve(&self, code: &str) -> Result<String, ResolutionError>;
}
