//! Resolution of `==== ExternalSource: ... ====` sections.
//!
//! An external source is read from a file next to the test case. Its direct
//! imports are pulled in as well, one level deep: imports of imported files
//! are not followed.

use crate::errors::{ReaderError, ReaderResult};
use crate::imports::ImportExtractor;
use std::fs;
use std::path::{Component, Path};
use tracing::{debug, trace};

/// Reads external sources relative to a test case's directory.
pub struct ExternalSourceResolver<'a> {
    base_dir: &'a Path,
    imports: &'a dyn ImportExtractor,
    follow_imports: bool,
}

impl<'a> ExternalSourceResolver<'a> {
    /// `base_dir` is the directory containing the test case document.
    pub fn new(base_dir: &'a Path, imports: &'a dyn ImportExtractor) -> Self {
        Self {
            base_dir,
            imports,
            follow_imports: true,
        }
    }

    /// Whether imports of the external source are registered too.
    pub fn follow_imports(mut self, follow: bool) -> Self {
        self.follow_imports = follow;
        self
    }

    /// Resolve an external source marker payload (`name` or `name=path`)
    /// into the name/content pairs to register, in registration order.
    ///
    /// `line` is the document line of the marker, used for error positions.
    /// An empty name (`=path`) still registers the imports; only the
    /// external source's own entry is left out.
    pub fn resolve(&self, payload: &str, line: usize) -> ReaderResult<Vec<(String, String)>> {
        let (name, path) = split_remapping(payload);

        let relative = Path::new(path);
        if !relative.is_relative() {
            return Err(ReaderError::parse(
                line,
                format!("external source path must be relative: {}", path),
            ));
        }

        let full_path = self.base_dir.join(relative);
        if !full_path.exists() {
            return Err(ReaderError::io(relative, "external source not found"));
        }
        let content = fs::read_to_string(&full_path).map_err(|e| ReaderError::io(&full_path, e))?;

        let mut registered = Vec::new();
        if self.follow_imports {
            let parent = relative.parent().unwrap_or_else(|| Path::new(""));
            for import in self.imports.imports(&content) {
                let import_path = Path::new(&import);
                if !import_path.is_relative() {
                    return Err(ReaderError::parse(
                        line,
                        format!("import \"{}\" of external source {} must be relative", import, path),
                    ));
                }

                let import_full = self.base_dir.join(parent).join(import_path);
                let imported =
                    fs::read_to_string(&import_full).map_err(|e| ReaderError::io(&import_full, e))?;
                let composed = normalize(&parent.join(import_path));
                trace!(import = %import, composed = %composed, "registering import");

                registered.push((import.clone(), imported.clone()));
                registered.push((composed, imported));
            }
        }

        if !name.is_empty() {
            debug!(name = %name, path = %path, "registering external source");
            registered.push((name.to_string(), content));
        }

        Ok(registered)
    }
}

/// Split `name=path` into its trimmed halves; a bare payload is both.
fn split_remapping(payload: &str) -> (&str, &str) {
    match payload.split_once('=') {
        Some((name, path)) => (name.trim(), path.trim()),
        None => (payload, payload),
    }
}

/// Lexically normalize a relative path into `/`-separated form.
fn normalize(path: &Path) -> String {
    let mut parts: Vec<String> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(last) if last != ".." => {
                    parts.pop();
                }
                _ => parts.push("..".to_string()),
            },
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::RootDir | Component::Prefix(_) => {}
        }
    }
    parts.join("/")
}
