//! Output writers: the rewritten token-list JSON and the HTML preview.
//!
//! Both outputs are written atomically (temp file + rename) so a failed
//! write never leaves a half-serialized collection behind.

mod preview;

pub use preview::{PreviewCard, cards_from_document, list_title, render_preview};

use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use tokentint_shared::{Result, TokenTintError};

/// Serialize the token-list document back to `path`.
///
/// Output is indented with 4 spaces, keys in constructed order, with a
/// trailing newline.
pub fn write_token_list(path: &Path, document: &Value) -> Result<()> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    document
        .serialize(&mut ser)
        .map_err(|e| TokenTintError::validation(format!("JSON serialization failed: {e}")))?;
    buf.push(b'\n');

    write_atomic(path, &buf)
}

/// Write the rendered preview document to `path`.
pub fn write_preview(path: &Path, html: &str) -> Result<()> {
    write_atomic(path, html.as_bytes())
}

/// Write to a dot-prefixed sibling temp file, then rename into place.
fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let file_name = path.file_name().and_then(|n| n.to_str()).ok_or_else(|| {
        TokenTintError::validation(format!("not a writable file path: {}", path.display()))
    })?;
    let temp = path.with_file_name(format!(".{file_name}.tmp"));

    std::fs::write(&temp, content).map_err(|e| TokenTintError::io(&temp, e))?;
    std::fs::rename(&temp, path).map_err(|e| TokenTintError::io(path, e))?;

    debug!(path = %path.display(), len = content.len(), "wrote output file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_list_uses_four_space_indent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.json");

        let doc: Value = serde_json::from_str(r#"{"name": "Test", "tokens": [{"symbol": "A"}]}"#)
            .unwrap();
        write_token_list(&path, &doc).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\n    \"name\""), "expected 4-space indent:\n{written}");
        assert!(written.contains("\n            \"symbol\""));
        assert!(written.ends_with('\n'));
    }

    #[test]
    fn token_list_preserves_key_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.json");

        // Deliberately non-alphabetical key order.
        let doc: Value =
            serde_json::from_str(r#"{"version": 2, "name": "Test", "tokens": []}"#).unwrap();
        write_token_list(&path, &doc).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let version_at = written.find("\"version\"").unwrap();
        let name_at = written.find("\"name\"").unwrap();
        let tokens_at = written.find("\"tokens\"").unwrap();
        assert!(version_at < name_at && name_at < tokens_at);
    }

    #[test]
    fn writes_leave_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.json");

        write_token_list(&path, &serde_json::json!({"tokens": []})).unwrap();
        write_preview(&dir.path().join("preview.html"), "<html></html>").unwrap();

        for entry in std::fs::read_dir(dir.path()).unwrap() {
            let name = entry.unwrap().file_name().to_string_lossy().to_string();
            assert!(!name.starts_with('.'), "temp file left behind: {name}");
        }
    }

    #[test]
    fn overwrite_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.json");

        write_token_list(&path, &serde_json::json!({"tokens": [1]})).unwrap();
        write_token_list(&path, &serde_json::json!({"tokens": []})).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"tokens\": []"));
    }
}
