use std::path::{Path, PathBuf};

use thiserror::Error;

/// Rejections raised before anything is sent to the analysis service.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UploadError {
    #[error("Please select at least 2 files (.dat, .hea) with the same base name. Consider providing .atr file with true annotations.")]
    FileCount(usize),
    #[error("All files must have the same base name (e.g., 100.dat, 100.hea, 100.atr)")]
    BaseNameMismatch(Vec<String>),
}

/// A validated record: signal and header files, optionally with an annotation file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordSelection {
    pub base_name: String,
    pub files: Vec<PathBuf>,
}

impl RecordSelection {
    pub fn has_annotations(&self) -> bool {
        self.files
            .iter()
            .any(|f| f.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("atr")))
    }

    /// Directory holding the record files (the working directory for bare names).
    pub fn directory(&self) -> PathBuf {
        self.files
            .first()
            .and_then(|f| f.parent())
            .map(Path::to_path_buf)
            .unwrap_or_default()
    }
}

/// File name without its last extension: `100.dat` -> `100`, `a.b.hea` -> `a.b`.
pub fn base_name(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match name.rsplit_once('.') {
        Some((base, _)) => base.to_string(),
        None => String::new(),
    }
}

pub fn validate_record_files(paths: &[PathBuf]) -> Result<RecordSelection, UploadError> {
    if !(2..=3).contains(&paths.len()) {
        return Err(UploadError::FileCount(paths.len()));
    }
    let names: Vec<String> = paths.iter().map(|p| base_name(p)).collect();
    if names.iter().any(|n| n != &names[0]) {
        return Err(UploadError::BaseNameMismatch(names));
    }
    Ok(RecordSelection {
        base_name: names[0].clone(),
        files: paths.to_vec(),
    })
}

/// Split a user-typed list of paths on whitespace, commas and semicolons.
pub fn parse_path_list(input: &str) -> Vec<PathBuf> {
    input
        .split(|c: char| c.is_whitespace() || c == ',' || c == ';')
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .collect()
}
