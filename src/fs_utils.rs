use crate::error::{AmalgamateError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A directory entry seen while scanning the root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub name: String,
    /// True only for regular files; directories and symlinks are false
    pub is_file: bool,
}

impl CandidateFile {
    pub fn new(name: impl Into<String>, is_file: bool) -> Self {
        Self {
            name: name.into(),
            is_file,
        }
    }
}

/// Directory the tool amalgamates when no root is given: the parent of this
/// crate's own source directory, where the header family lives.
pub fn default_root_dir() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .unwrap_or(manifest_dir)
        .to_path_buf()
}

/// Lists the entries directly inside `dir`, in no particular order
///
/// Links are not followed. Names that are not valid UTF-8 are skipped.
///
/// # Errors
///
/// - `AmalgamateError::DirectoryNotFound` if `dir` doesn't exist or isn't a directory.
/// - `AmalgamateError::WalkDir` if an entry can't be read.
pub fn list_directory(dir: &Path) -> Result<Vec<CandidateFile>> {
    if !dir.is_dir() {
        return Err(AmalgamateError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false);

    let mut entries = Vec::new();
    for entry in walker {
        let entry = entry?;
        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        entries.push(CandidateFile::new(name, entry.file_type().is_file()));
    }

    Ok(entries)
}

/// Reads the contents of a file at the given path
///
/// # Errors
///
/// - `AmalgamateError::FileNotFound` if the path doesn't exist or isn't a file.
/// - `AmalgamateError::Read` if the file can't be read.
///
/// Invalid UTF-8 is replaced with U+FFFD rather than rejected.
pub fn read_file_contents(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(AmalgamateError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let bytes = fs::read(path).map_err(|source| AmalgamateError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Writes `contents` to `path`, replacing whatever was there
///
/// # Errors
///
/// Returns `AmalgamateError::Write` if the file can't be created or written.
pub fn write_file_contents(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|source| AmalgamateError::Write {
        path: path.to_path_buf(),
        source,
    })
}
