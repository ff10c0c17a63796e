//! fyi — structured error metadata as code annotations.
//!
//! Engineers describe errors in `@fyi` comment lines next to the code that
//! produces them; the write path compiles those comments into one or more
//! manifests; the read path resolves an error code back into a human-facing
//! explanation.
//!
//! Write path:
//!
//! ```
//! use fyi::parser::Assembler;
//!
//! let mut assembler = Assembler::new();
//! assembler.push_block(
//!     "@fyi name cli\n\
//!      @fyi base_url https://errors.example.io\n\
//!      @fyi.error code invalid_payment\n\
//!      @fyi.error title Invalid Payment\n\
//!      @fyi.error short the payment was rejected\n\
//!      @fyi.error.suggestion short retry the payment",
//!     None,
//! )?;
//! let manifests = assembler.finish();
//! assert_eq!(manifests[0].name, "cli");
//! # Ok::<(), fyi::AssembleError>(())
//! ```
//!
//! Read path:
//!
//! ```
//! use fyi::client::{LocalClient, Options};
//!
//! let manifest = "\
//! name: cli
//! base_url: https://errors.example.io
//! errors:
//!   invalid_payment: { code: invalid_payment, title: Invalid Payment, short: rejected }
//! ";
//! let client = LocalClient::from_bytes(manifest, Options::default());
//! let message = client.resolve("invalid_payment")?;
//! assert!(message.starts_with("Invalid Payment"));
//! # Ok::<(), fyi::ResolutionError>(())
//! ```
//!
//! Resolution is best-effort enrichment: [`LocalClient::annotate`] wraps an
//! underlying fault with the resolved message, and falls back to the
//! original fault untouched when resolution fails for any reason.

pub mod client;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;

pub use client::{Client, LocalClient, Options, RenderMode};
pub use error::{
    AssembleError, LexError, LoadError, ParseError, ResolutionError, TypeCoercionError,
};
pub use model::{ErrorDefinition, Location, Manifest, Severity, Suggestion};

use std::fmt;

use tracing::debug;

/// An underlying fault, optionally enriched with a resolved explanation.
///
/// When enrichment failed the wrapper is transparent: it displays exactly as
/// the original fault does.
#[derive(Debug)]
pub struct Annotated<E> {
    message: Option<String>,
    source: E,
}

impl<E> Annotated<E> {
    /// Whether resolution succeeded and a message is attached.
    pub fn is_enriched(&self) -> bool {
        self.message.is_some()
    }

    /// The original fault.
    pub fn into_inner(self) -> E {
        self.source
    }
}

impl<E: fmt::Display> fmt::Display for Annotated<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{}: [{}]", message, self.source),
            None => self.source.fmt(f),
        }
    }
}

impl<E: std::error::Error + 'static> std::error::Error for Annotated<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

impl LocalClient {
    /// Wrap `err` with the explanation resolved from `code`.
    ///
    /// Never fails the caller's error path: on any [`ResolutionError`] the
    /// failure is logged at debug level and the returned wrapper displays
    /// the original fault unmodified.
    pub fn annotate<E: std::error::Error>(&self, err: E, code: &str) -> Annotated<E> {
        match self.resolve(code) {
            Ok(message) => Annotated {
                message: Some(message),
                source: err,
            },
            Err(resolution_err) => {
                debug!(code, error = %resolution_err, "error enrichment skipped");
                Annotated {
                    message: None,
                    source: err,
                }
            }
        }
    }
}
