//! Local manifest client: loads a manifest document lazily, caches it for
//! the client's lifetime, and resolves codes against it.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

use tracing::debug;

use crate::client::{Client, Options};
use crate::error::{LoadError, ResolutionError};
use crate::model::Manifest;
use crate::render;

/// Where the manifest bytes come from.
enum Source {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

/// A caller-constructed resolution client backed by a local manifest
/// document. Decode happens once, on first use; afterwards the manifest is
/// immutable and `resolve` can be called concurrently from multiple threads.
pub struct LocalClient {
    source: Source,
    opts: Options,
    manifest: OnceLock<Manifest>,
    // Serializes the first decode so it runs exactly once.
    init: Mutex<()>,
}

impl LocalClient {
    /// Client over a manifest file. The format is picked by extension
    /// (`yaml`/`yml` or `json`); the file is not touched until first use.
    pub fn from_path(path: impl Into<PathBuf>, opts: Options) -> Self {
        LocalClient {
            source: Source::Path(path.into()),
            opts,
            manifest: OnceLock::new(),
            init: Mutex::new(()),
        }
    }

    /// Client over in-memory manifest bytes (YAML, or JSON — a YAML subset).
    pub fn from_bytes(bytes: impl Into<Vec<u8>>, opts: Options) -> Self {
        LocalClient {
            source: Source::Bytes(bytes.into()),
            opts,
            manifest: OnceLock::new(),
            init: Mutex::new(()),
        }
    }

    /// The decoded manifest, loading it on first call.
    pub fn manifest(&self) -> Result<&Manifest, LoadError> {
        if let Some(manifest) = self.manifest.get() {
            return Ok(manifest);
        }
        let _guard = match self.init.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(manifest) = self.manifest.get() {
            return Ok(manifest);
        }
        let decoded = self.load()?;
        Ok(self.manifest.get_or_init(|| decoded))
    }

    fn load(&self) -> Result<Manifest, LoadError> {
        let manifest = match &self.source {
            Source::Bytes(bytes) => decode_yaml(bytes)?,
            Source::Path(path) => {
                if !path.exists() {
                    return Err(LoadError::NotFound(path.clone()));
                }
                let bytes = std::fs::read(path)
                    .map_err(|err| LoadError::DecodeFailed(Box::new(err)))?;
                match extension(path) {
                    "yaml" | "yml" => decode_yaml(&bytes)?,
                    "json" => serde_json::from_slice::<Manifest>(&bytes)
                        .map_err(|err| LoadError::DecodeFailed(Box::new(err)))?,
                    other => return Err(LoadError::UnsupportedFormat(other.to_string())),
                }
            }
        };

        if !manifest.is_valid() {
            return Err(LoadError::DecodeFailed(
                "manifest name must not be empty".into(),
            ));
        }
        debug!(name = %manifest.name, errors = manifest.errors.len(), "manifest loaded");
        Ok(manifest)
    }

    /// Resolve a code into a rendered message using this client's options.
    pub fn resolve(&self, code: &str) -> Result<String, ResolutionError> {
        let code = code.trim();
        let manifest = self.manifest()?;
        let error = manifest
            .error(code)
            .ok_or_else(|| ResolutionError::CodeNotFound(code.to_string()))?;
        let renderer = render::create_renderer(self.opts.render_as);
        Ok(renderer.render(manifest, error, &self.opts))
    }
}

impl Client for LocalClient {
    fn resolve(&self, code: &str) -> Result<String, ResolutionError> {
        LocalClient::resolve(self, code)
    }
}

fn decode_yaml(bytes: &[u8]) -> Result<Manifest, LoadError> {
    serde_yaml::from_slice(bytes).map_err(|err| LoadError::DecodeFailed(Box::new(err)))
}

fn extension(path: &Path) -> &str {
    path.extension().and_then(|ext| ext.to_str()).unwrap_or("")
}
