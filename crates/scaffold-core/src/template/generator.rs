//! Scaffold generation
//!
//! Walks a template root, substitutes tokens into file contents and
//! relative paths, and writes the resolved tree under an output root.
//!
//! Resolution is two-phase: every template is read and rendered in memory
//! before anything is written. An unresolved token or unreadable template
//! therefore aborts the run with no output files created and no
//! half-substituted file on disk.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Result, ScaffoldError};
use crate::template::manifest::{ScaffoldManifest, MANIFEST_FILE};
use crate::template::render::render;
use crate::template::token;
use crate::vars::Vars;

/// One fully resolved output file
#[derive(Debug, Clone)]
pub struct ResolvedFile {
    /// Path relative to the output root, tokens already substituted
    pub path: PathBuf,
    pub contents: Vec<u8>,
}

/// Resolve a template tree in memory without writing anything.
///
/// Files are visited in sorted order, so repeated runs resolve to the
/// identical list. Templates whose bytes are not valid UTF-8 (icons and
/// the like) pass through unchanged; their paths are still substituted.
pub fn resolve(
    template_dir: &Path,
    vars: &Vars,
    features: &[String],
) -> Result<Vec<ResolvedFile>> {
    let manifest = ScaffoldManifest::load(template_dir)?;
    match &manifest {
        Some(manifest) => manifest.validate_features(features)?,
        None => {
            // Without a manifest there is nothing to gate
            if let Some(feature) = features.first() {
                return Err(ScaffoldError::UnknownFeature {
                    feature: feature.clone(),
                    available: Vec::new(),
                });
            }
        }
    }

    let mut resolved = Vec::new();
    // Rendered output path -> the template it came from. Distinct
    // templates may substitute to the same path; letting the last one
    // win would silently drop a file.
    let mut sources: BTreeMap<PathBuf, PathBuf> = BTreeMap::new();

    for entry in WalkDir::new(template_dir).sort_by_file_name() {
        let entry = entry.map_err(walk_error(template_dir))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let rel = match entry.path().strip_prefix(template_dir) {
            Ok(rel) => rel,
            Err(_) => continue,
        };
        let rel_str = rel_to_slash(rel)
            .ok_or_else(|| non_utf8_name(entry.path()))?;

        if rel_str == MANIFEST_FILE {
            continue;
        }
        if let Some(manifest) = &manifest {
            if !manifest.includes(&rel_str, features) {
                continue;
            }
        }

        let bytes = fs::read(entry.path()).map_err(|e| ScaffoldError::io(entry.path(), e))?;
        let contents = match std::str::from_utf8(&bytes) {
            Ok(text) => render(text, vars, rel)?.into_bytes(),
            Err(_) => bytes,
        };

        let out_rel_str = render(&rel_str, vars, rel)?;
        let out_rel = slash_to_rel(&out_rel_str).ok_or_else(|| ScaffoldError::InvalidPath {
            file: rel.to_path_buf(),
            rendered: out_rel_str.clone(),
        })?;

        if let Some(first) = sources.get(&out_rel) {
            return Err(ScaffoldError::DuplicateOutput {
                first: first.clone(),
                second: rel.to_path_buf(),
                rendered: out_rel_str,
            });
        }
        sources.insert(out_rel.clone(), rel.to_path_buf());

        resolved.push(ResolvedFile {
            path: out_rel,
            contents,
        });
    }

    Ok(resolved)
}

/// Write an already-resolved scaffold under `out_dir`, creating the root
/// and any parent directories as needed
pub fn write_tree(files: &[ResolvedFile], out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir).map_err(|e| ScaffoldError::io(out_dir, e))?;

    for file in files {
        let target = out_dir.join(&file.path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| ScaffoldError::io(parent, e))?;
        }
        fs::write(&target, &file.contents).map_err(|e| ScaffoldError::io(&target, e))?;
    }

    Ok(())
}

/// Resolve a template tree and write it under `out_dir`.
///
/// Returns the output-relative paths written, in order. Runs with
/// identical inputs produce byte-identical trees.
pub fn generate(
    template_dir: &Path,
    out_dir: &Path,
    vars: &Vars,
    features: &[String],
) -> Result<Vec<PathBuf>> {
    let resolved = resolve(template_dir, vars, features)?;
    write_tree(&resolved, out_dir)?;
    Ok(resolved.into_iter().map(|f| f.path).collect())
}

/// Scan a template tree and report every token key with the files that
/// reference it (content or path). Dry-run aid for the `tokens` command.
pub fn scan_tree(template_dir: &Path) -> Result<BTreeMap<String, Vec<PathBuf>>> {
    let mut found: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();

    for entry in WalkDir::new(template_dir).sort_by_file_name() {
        let entry = entry.map_err(walk_error(template_dir))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let rel = match entry.path().strip_prefix(template_dir) {
            Ok(rel) => rel,
            Err(_) => continue,
        };
        let rel_str = rel_to_slash(rel)
            .ok_or_else(|| non_utf8_name(entry.path()))?;
        if rel_str == MANIFEST_FILE {
            continue;
        }

        let mut keys: Vec<String> = token::scan(&rel_str).into_iter().map(|t| t.key).collect();
        let bytes = fs::read(entry.path()).map_err(|e| ScaffoldError::io(entry.path(), e))?;
        if let Ok(text) = std::str::from_utf8(&bytes) {
            keys.extend(token::scan(text).into_iter().map(|t| t.key));
        }

        for key in keys {
            let files = found.entry(key).or_default();
            if !files.iter().any(|f| f == rel) {
                files.push(rel.to_path_buf());
            }
        }
    }

    Ok(found)
}

fn walk_error(template_dir: &Path) -> impl Fn(walkdir::Error) -> ScaffoldError + '_ {
    move |e| {
        let path = e
            .path()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| template_dir.to_path_buf());
        let source = e
            .into_io_error()
            .unwrap_or_else(|| io::Error::other("file system loop"));
        ScaffoldError::Io { path, source }
    }
}

fn non_utf8_name(path: &Path) -> ScaffoldError {
    ScaffoldError::io(
        path,
        io::Error::new(io::ErrorKind::InvalidData, "non-UTF-8 file name"),
    )
}

/// Join a relative path's components with forward slashes
fn rel_to_slash(rel: &Path) -> Option<String> {
    let mut parts = Vec::new();
    for component in rel.components() {
        parts.push(component.as_os_str().to_str()?);
    }
    Some(parts.join("/"))
}

/// Parse a rendered slash-separated path back into a relative `PathBuf`,
/// rejecting anything that could land outside the output root
fn slash_to_rel(rendered: &str) -> Option<PathBuf> {
    if rendered.is_empty() || rendered.starts_with('/') {
        return None;
    }
    let mut out = PathBuf::new();
    for part in rendered.split('/') {
        if part.is_empty() || part == "." || part == ".." {
            return None;
        }
        out.push(part);
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slash_to_rel_accepts_plain_paths() {
        assert_eq!(
            slash_to_rel("chrome/content/overlay.js"),
            Some(PathBuf::from("chrome/content/overlay.js"))
        );
        assert_eq!(slash_to_rel("prefs.js"), Some(PathBuf::from("prefs.js")));
    }

    #[test]
    fn slash_to_rel_rejects_escapes() {
        assert_eq!(slash_to_rel(""), None);
        assert_eq!(slash_to_rel("/etc/passwd"), None);
        assert_eq!(slash_to_rel("../outside"), None);
        assert_eq!(slash_to_rel("a/../../b"), None);
        assert_eq!(slash_to_rel("a//b"), None);
        assert_eq!(slash_to_rel("a/./b"), None);
    }
}
