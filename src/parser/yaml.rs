//! YAML document loading for Kubernetes manifests.
//!
//! Files are normalised to `\n` line endings, split on `---` separator lines
//! and parsed into [`RawDocument`]s carrying the detected `apiVersion` and
//! `kind`. Decoding into typed resources happens later, in
//! [`crate::context::decode`].

use crate::error::{Result, ScoreError};
use std::io::Read;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Source name used for documents read from standard input.
pub const STDIN_SOURCE: &str = "<stdin>";

/// One YAML document with its detected type header.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDocument {
    /// File the document came from, or `<stdin>`.
    pub source_name: String,
    /// Position of the document within its source, starting at 0.
    pub index: usize,
    /// Empty when the document has no `apiVersion`.
    pub api_version: String,
    /// Empty when the document has no `kind`.
    pub kind: String,
    pub body: serde_yaml::Value,
}

/// Split and parse the contents of one source.
///
/// Empty and comment-only documents are dropped. A document that is not
/// valid YAML, is not a mapping, or has a non-string `apiVersion`/`kind`
/// fails the whole source.
pub fn parse_documents(source_name: &str, bytes: &[u8]) -> Result<Vec<RawDocument>> {
    let content = std::str::from_utf8(bytes).map_err(|e| ScoreError::Parse {
        source_name: source_name.to_string(),
        message: format!("not valid UTF-8: {}", e),
    })?;
    let content = content.replace("\r\n", "\n");

    let mut documents = Vec::new();
    for chunk in split_documents(&content) {
        if is_blank_document(&chunk) {
            continue;
        }

        let body: serde_yaml::Value =
            serde_yaml::from_str(&chunk).map_err(|e| ScoreError::Parse {
                source_name: source_name.to_string(),
                message: e.to_string(),
            })?;
        if body.is_null() {
            continue;
        }
        if !body.is_mapping() {
            return Err(ScoreError::Parse {
                source_name: source_name.to_string(),
                message: "document is not a mapping".to_string(),
            });
        }

        let api_version = header_field(&body, "apiVersion", source_name)?;
        let kind = header_field(&body, "kind", source_name)?;
        documents.push(RawDocument {
            source_name: source_name.to_string(),
            index: documents.len(),
            api_version,
            kind,
            body,
        });
    }

    Ok(documents)
}

/// Read every document from a reader.
pub fn load_reader(source_name: &str, mut reader: impl Read) -> Result<Vec<RawDocument>> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|source| ScoreError::Io {
            path: PathBuf::from(source_name),
            source,
        })?;
    parse_documents(source_name, &bytes)
}

/// Load documents from files, directories (recursively, `.yaml`/`.yml` only,
/// in file-name order) and `-` for standard input.
pub fn load_paths(paths: &[PathBuf]) -> Result<Vec<RawDocument>> {
    let mut documents = Vec::new();

    for path in paths {
        if path.as_os_str() == "-" {
            documents.extend(load_reader(STDIN_SOURCE, std::io::stdin().lock())?);
        } else if path.is_dir() {
            for file in yaml_files(path)? {
                documents.extend(load_file(&file)?);
            }
        } else {
            documents.extend(load_file(path)?);
        }
    }

    Ok(documents)
}

fn load_file(path: &Path) -> Result<Vec<RawDocument>> {
    let bytes = std::fs::read(path).map_err(|source| ScoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("loaded {} ({} bytes)", path.display(), bytes.len());
    parse_documents(&path.display().to_string(), &bytes)
}

fn yaml_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            let source = e
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("filesystem loop"));
            ScoreError::Io { path, source }
        })?;
        let ext = entry.path().extension().and_then(|e| e.to_str());
        if entry.file_type().is_file() && matches!(ext, Some("yaml") | Some("yml")) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

fn split_documents(content: &str) -> Vec<String> {
    let mut documents = vec![String::new()];
    for line in content.split('\n') {
        if is_separator(line) {
            documents.push(String::new());
            continue;
        }
        if let Some(current) = documents.last_mut() {
            current.push_str(line);
            current.push('\n');
        }
    }
    documents
}

fn is_separator(line: &str) -> bool {
    let line = line.trim_end();
    line == "---" || line.starts_with("--- #")
}

fn is_blank_document(doc: &str) -> bool {
    doc.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#')
    })
}

fn header_field(body: &serde_yaml::Value, key: &str, source_name: &str) -> Result<String> {
    match body.get(key) {
        None | Some(serde_yaml::Value::Null) => Ok(String::new()),
        Some(serde_yaml::Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ScoreError::Parse {
            source_name: source_name.to_string(),
            message: format!("'{}' is not a string", key),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_multiple_documents() {
        let yaml = "apiVersion: v1\nkind: Pod\nmetadata:\n  name: a\n---\napiVersion: v1\nkind: Service\nmetadata:\n  name: b\n";
        let docs = parse_documents("test.yaml", yaml.as_bytes()).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].kind, "Pod");
        assert_eq!(docs[1].kind, "Service");
        assert_eq!(docs[1].index, 1);
        assert_eq!(docs[1].source_name, "test.yaml");
    }

    #[test]
    fn test_crlf_and_leading_separator() {
        let yaml = "---\r\napiVersion: apps/v1\r\nkind: Deployment\r\n---\r\n";
        let docs = parse_documents("crlf.yaml", yaml.as_bytes()).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].api_version, "apps/v1");
    }

    #[test]
    fn test_skip_empty_and_comment_documents() {
        let yaml = "# just a comment\n---\n\n---\napiVersion: v1\nkind: ConfigMap\n";
        let docs = parse_documents("c.yaml", yaml.as_bytes()).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].kind, "ConfigMap");
        assert_eq!(docs[0].index, 0);
    }

    #[test]
    fn test_missing_header_is_empty() {
        let docs = parse_documents("x.yaml", b"foo: bar\n").unwrap();
        assert_eq!(docs[0].kind, "");
        assert_eq!(docs[0].api_version, "");
    }

    #[test]
    fn test_invalid_documents_fail() {
        assert!(matches!(
            parse_documents("bad.yaml", b"key: [unclosed\n"),
            Err(ScoreError::Parse { .. })
        ));
        assert!(matches!(
            parse_documents("list.yaml", b"- a\n- b\n"),
            Err(ScoreError::Parse { .. })
        ));
        assert!(matches!(
            parse_documents("kind.yaml", b"apiVersion: v1\nkind: [Pod]\n"),
            Err(ScoreError::Parse { .. })
        ));
    }

    #[test]
    fn test_load_paths_walks_directories() {
        let dir = tempfile::tempdir().unwrap();
        let mut a = std::fs::File::create(dir.path().join("a.yaml")).unwrap();
        writeln!(a, "apiVersion: v1\nkind: Pod\nmetadata:\n  name: a").unwrap();
        let mut b = std::fs::File::create(dir.path().join("b.yml")).unwrap();
        writeln!(b, "apiVersion: v1\nkind: Service\nmetadata:\n  name: b").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "kind: Pod").unwrap();

        let docs = load_paths(&[dir.path().to_path_buf()]).unwrap();
        let kinds: Vec<&str> = docs.iter().map(|d| d.kind.as_str()).collect();
        assert_eq!(kinds, vec!["Pod", "Service"]);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = load_paths(&[PathBuf::from("/nonexistent/manifest.yaml")]).unwrap_err();
        assert!(matches!(err, ScoreError::Io { .. }));
    }
}
