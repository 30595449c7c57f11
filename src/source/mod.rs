pub mod imports;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read sources: {0}")]
    ReadFailed(#[from] std::io::Error),
    #[error("failed to parse sources: {0}")]
    ParseFailed(#[from] serde_json::Error),
    #[error("no source files provided")]
    Empty,
    #[error("duplicate source file path: {0}")]
    DuplicatePath(String),
}

/// A verified contract source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub file_path: String,
    pub source_code: String,
}

impl SourceFile {
    pub fn new(file_path: impl Into<String>, source_code: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            source_code: source_code.into(),
        }
    }
}

/// The two document shapes accepted on input: a bare list of files, or a
/// verified contract with its main file plus additional sources.
#[derive(Deserialize)]
#[serde(untagged)]
enum SourcesDocument {
    Files(Vec<SourceFile>),
    Contract {
        file_path: String,
        source_code: String,
        #[serde(default)]
        additional_sources: Vec<SourceFile>,
    },
}

impl SourcesDocument {
    fn into_files(self) -> Vec<SourceFile> {
        match self {
            SourcesDocument::Files(files) => files,
            SourcesDocument::Contract {
                file_path,
                source_code,
                additional_sources,
            } => {
                let mut files = Vec::with_capacity(additional_sources.len() + 1);
                files.push(SourceFile::new(file_path, source_code));
                files.extend(additional_sources);
                files
            }
        }
    }
}

/// Ordered, non-empty collection of source files with unique paths.
///
/// Built once and never mutated; every index handed out by the viewer refers
/// into this collection.
#[derive(Debug, Clone)]
pub struct SourceSet {
    files: Vec<SourceFile>,
}

impl SourceSet {
    pub fn new(files: Vec<SourceFile>) -> Result<Self, SourceError> {
        if files.is_empty() {
            return Err(SourceError::Empty);
        }
        let mut seen = HashSet::with_capacity(files.len());
        for file in &files {
            if !seen.insert(file.file_path.as_str()) {
                return Err(SourceError::DuplicatePath(file.file_path.clone()));
            }
        }
        Ok(Self { files })
    }

    /// Parse a sources document (see [`SourcesDocument`]).
    pub fn from_json(json: &str) -> Result<Self, SourceError> {
        let doc: SourcesDocument = serde_json::from_str(json)?;
        Self::new(doc.into_files())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_single(&self) -> bool {
        self.files.len() == 1
    }

    pub fn get(&self, idx: usize) -> Option<&SourceFile> {
        self.files.get(idx)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SourceFile> {
        self.files.iter()
    }

    pub fn first(&self) -> &SourceFile {
        &self.files[0]
    }

    pub fn index_of(&self, path: &str) -> Option<usize> {
        self.files.iter().position(|f| f.file_path == path)
    }

    /// Resolve an import written in the file at `current` to a file index.
    pub fn resolve_import(&self, current: usize, import_path: &str) -> Option<usize> {
        let current = self.files.get(current)?;
        let resolved = imports::resolve_import_path(&current.file_path, import_path);
        self.index_of(&resolved)
    }
}

/// Read and parse a sources document from disk.
pub async fn load(path: &Path) -> Result<SourceSet, SourceError> {
    let contents = tokio::fs::read_to_string(path).await?;
    let set = SourceSet::from_json(&contents)?;
    tracing::info!(path = %path.display(), files = set.len(), "loaded sources");
    Ok(set)
}
