//! Manifest loading: files, directories and stdin into raw documents.

pub mod yaml;

pub use yaml::{RawDocument, load_paths, load_reader, parse_documents};
