//! Template asset collection.
//!
//! A template ships as a pre-built static output directory
//! (`<templates_dir>/<template>/dist`). Publishing walks that tree and turns
//! every regular file into a [`TemplateAsset`] ready for upload: a relative
//! key (forward slashes on every platform), the file bytes, and a
//! content-type inferred from the extension.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::CoreError;

/// Root document a template must contain to be servable.
pub const TEMPLATE_ENTRY_POINT: &str = "index.html";

/// One deployable file of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateAsset {
    /// Upload key relative to the deploy prefix, `/`-separated.
    pub path: String,
    pub body: Vec<u8>,
    pub content_type: Option<&'static str>,
}

/// Content-type for a file key, from a fixed extension table.
///
/// Unknown extensions (and extension-less keys) yield `None`; the upload
/// then carries no content-type and the store applies its default.
pub fn content_type_for(path: &str) -> Option<&'static str> {
    let ext = Path::new(path).extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "html" => Some("text/html; charset=utf-8"),
        "js" | "mjs" => Some("application/javascript"),
        "css" => Some("text/css; charset=utf-8"),
        "json" => Some("application/json"),
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        "ico" => Some("image/x-icon"),
        "txt" => Some("text/plain; charset=utf-8"),
        _ => None,
    }
}

/// Pre-built output directory for a named template.
///
/// Template names are matched case-insensitively against lowercase
/// directory names (`"Minimal"` → `<templates_dir>/minimal/dist`).
pub fn template_dist_dir(templates_dir: &Path, template: &str) -> PathBuf {
    templates_dir
        .join(template.trim().to_lowercase())
        .join("dist")
}

/// Collect every regular file under `dir` as a [`TemplateAsset`].
///
/// The walk is depth-first with entries sorted by file name at each level,
/// so the returned order is deterministic. Fails with
/// [`CoreError::TemplateNotFound`] when `dir` does not exist and with
/// [`CoreError::TemplateInvalid`] when no root-level `index.html` is among
/// the collected files.
pub fn collect_template_assets(dir: &Path) -> Result<Vec<TemplateAsset>, CoreError> {
    if !dir.is_dir() {
        return Err(CoreError::TemplateNotFound(dir.to_path_buf()));
    }

    let mut assets = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| CoreError::Io(std::io::Error::other(e)))?;
        if !entry.file_type().is_file() {
            continue;
        }

        // strip_prefix cannot fail: every entry is under `dir`.
        let rel = entry
            .path()
            .strip_prefix(dir)
            .expect("walked entry outside its root");
        let path = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        let body = std::fs::read(entry.path())?;
        let content_type = content_type_for(&path);
        assets.push(TemplateAsset {
            path,
            body,
            content_type,
        });
    }

    if !assets.iter().any(|a| a.path == TEMPLATE_ENTRY_POINT) {
        return Err(CoreError::TemplateInvalid(format!(
            "missing {TEMPLATE_ENTRY_POINT} at {}",
            dir.display()
        )));
    }

    Ok(assets)
}
