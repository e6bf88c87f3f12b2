//! Input document reading.

use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::batch::Document;
use crate::{NerError, Result};

/// Read documents from a file or a directory.
///
/// - `.txt` file: one document named after the file
/// - `.json` file holding an array: one document per item, named
///   `{stem}_{n}` from 1; string items are used as-is, other values as JSON
/// - any other `.json` file: one document holding the whole value
/// - directory: every `*.txt` directly inside it, sorted by file name
pub fn read_documents(path: impl AsRef<Path>) -> Result<Vec<Document>> {
    let path = path.as_ref();

    let documents = if path.is_file() {
        read_file(path)?
    } else if path.is_dir() {
        read_directory(path)?
    } else {
        return Err(NerError::Document(format!(
            "Invalid input path: {}",
            path.display()
        )));
    };

    debug!("Read {} document(s) from {}", documents.len(), path.display());
    Ok(documents)
}

fn read_file(path: &Path) -> Result<Vec<Document>> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("txt") => Ok(vec![read_text_file(path)?]),
        Some("json") => read_json_file(path),
        _ => Err(NerError::Document(format!(
            "Unsupported input file (expected .txt or .json): {}",
            path.display()
        ))),
    }
}

fn read_text_file(path: &Path) -> Result<Document> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| NerError::Document(format!("Failed to read {}: {}", path.display(), e)))?;
    Ok(Document::new(file_name(path), content))
}

fn read_json_file(path: &Path) -> Result<Vec<Document>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| NerError::Document(format!("Failed to read {}: {}", path.display(), e)))?;
    let data: Value = serde_json::from_str(&raw)
        .map_err(|e| NerError::Document(format!("Invalid JSON in {}: {}", path.display(), e)))?;

    let documents = match data {
        Value::Array(items) => {
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            items
                .into_iter()
                .enumerate()
                .map(|(i, item)| Document::new(format!("{}_{}", stem, i + 1), value_to_text(item)))
                .collect()
        }
        other => vec![Document::new(file_name(path), value_to_text(other))],
    };

    Ok(documents)
}

fn value_to_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

fn read_directory(path: &Path) -> Result<Vec<Document>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(path)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "txt"))
        .collect();
    files.sort();

    files.iter().map(|file| read_text_file(file)).collect()
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Create the output directory (and its parents) if needed.
pub fn ensure_output_directory(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    std::fs::create_dir_all(path)?;
    Ok(path.to_path_buf())
}
