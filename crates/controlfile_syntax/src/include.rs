//! Include resolution for `INCLUDE "path"` directives.
//!
//! The parser never reads files itself; it asks an [`IncludeResolver`] for the
//! text behind an include path. [`FileSystemResolver`] searches the current
//! directory and then a list of configured directories; [`InMemoryResolver`]
//! serves fixed buffers for tests and embedding.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// The text behind a resolved include path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeSource {
    /// Identifier used in positions and for include-cycle detection.
    pub name: String,
    pub text: String,
}

#[derive(Debug, Error)]
pub enum IncludeError {
    #[error("Cannot find include file `{path}`. Searched: {}.", .searched.join(", "))]
    NotFound { path: String, searched: Vec<String> },

    #[error("Cannot read include file `{path}`: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
}

pub trait IncludeResolver {
    fn resolve(&self, path: &str) -> Result<IncludeSource, IncludeError>;
}

/// Looks up include paths on disk: current directory first, then each search directory.
#[derive(Debug, Clone, Default)]
pub struct FileSystemResolver {
    search_dirs: Vec<PathBuf>,
}

impl FileSystemResolver {
    pub fn new(search_dirs: Vec<PathBuf>) -> Self {
        Self { search_dirs }
    }

    pub fn search_dirs(&self) -> &[PathBuf] {
        &self.search_dirs
    }

    fn candidates(&self, path: &str) -> Vec<PathBuf> {
        let path = Path::new(path);
        if path.is_absolute() {
            return vec![path.to_path_buf()];
        }
        std::iter::once(path.to_path_buf())
            .chain(self.search_dirs.iter().map(|dir| dir.join(path)))
            .collect()
    }
}

impl IncludeResolver for FileSystemResolver {
    fn resolve(&self, path: &str) -> Result<IncludeSource, IncludeError> {
        let Some(found) = self.candidates(path).into_iter().find(|p| p.is_file()) else {
            let searched = std::iter::once(".".to_string())
                .chain(self.search_dirs.iter().map(|d| d.display().to_string()))
                .collect();
            return Err(IncludeError::NotFound {
                path: path.to_string(),
                searched,
            });
        };

        let text = fs::read_to_string(&found).map_err(|source| IncludeError::Read {
            path: found.display().to_string(),
            source,
        })?;
        let name = found.canonicalize().unwrap_or(found).display().to_string();
        tracing::debug!(include = path, file = %name, "resolved include on disk");
        Ok(IncludeSource { name, text })
    }
}

/// Serves include buffers from memory, keyed by the exact include path.
#[derive(Debug, Clone, Default)]
pub struct InMemoryResolver {
    files: HashMap<String, String>,
}

impl InMemoryResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<String>, text: impl Into<String>) -> Self {
        self.files.insert(path.into(), text.into());
        self
    }
}

impl IncludeResolver for InMemoryResolver {
    fn resolve(&self, path: &str) -> Result<IncludeSource, IncludeError> {
        self.files
            .get(path)
            .map(|text| IncludeSource {
                name: path.to_string(),
                text: text.clone(),
            })
            .ok_or_else(|| IncludeError::NotFound {
                path: path.to_string(),
                searched: vec!["<memory>".to_string()],
            })
    }
}
