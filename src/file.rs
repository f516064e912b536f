use std::{fs::File, io::{BufReader, Read}, path::{Path, PathBuf}};
use serde_json::Value;
use crate::error::{AppError, Result};

/// A parsed document plus the name and directory its saved searches use.
#[derive(Debug)]
pub struct Document {
    pub root: Value,
    pub source_name: String,
    pub store_dir: PathBuf,
}

pub const STDIN_SOURCE: &str = "stdin";

pub fn open_file(path: &Path) -> Result<Document> {
    if !path.exists() {
        return Err(AppError::MissingFile(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(AppError::NotAFile(path.to_path_buf()));
    }
    let f = File::open(path)?;
    let root = read_json(BufReader::new(f))?;

    let source_name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| STDIN_SOURCE.to_string());
    let store_dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();

    tracing::debug!(path = %path.display(), source = %source_name, "loaded document");
    Ok(Document { root, source_name, store_dir })
}

pub fn open_reader<R: Read>(reader: R) -> Result<Document> {
    let root = read_json(BufReader::new(reader))?;
    Ok(Document {
        root,
        source_name: STDIN_SOURCE.to_string(),
        store_dir: PathBuf::new(),
    })
}

fn read_json<R: Read>(reader: R) -> Result<Value> {
    serde_json::from_reader(reader).map_err(AppError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn file_source_uses_stem_and_parent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("inventory.json");
        std::fs::write(&path, r#"{"items": [1, 2]}"#).unwrap();

        let doc = open_file(&path).unwrap();
        assert_eq!(doc.source_name, "inventory");
        assert_eq!(doc.store_dir, dir.path());
        assert_eq!(doc.root["items"][1], 2);
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempdir().unwrap();
        let err = open_file(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, AppError::MissingFile(_)));
    }

    #[test]
    fn directory_is_not_a_file() {
        let dir = tempdir().unwrap();
        let err = open_file(dir.path()).unwrap_err();
        assert!(matches!(err, AppError::NotAFile(_)));
    }

    #[test]
    fn malformed_input_is_a_parse_error() {
        let err = open_reader("{\"a\": ".as_bytes()).unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
    }

    #[test]
    fn reader_source_is_stdin() {
        let doc = open_reader("[true]".as_bytes()).unwrap();
        assert_eq!(doc.source_name, STDIN_SOURCE);
        assert_eq!(doc.store_dir, PathBuf::new());
    }
}
