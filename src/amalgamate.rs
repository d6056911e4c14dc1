use crate::error::Result;
use crate::fs_utils::{
    CandidateFile, default_root_dir, list_directory, read_file_contents, write_file_contents,
};
use regex::Regex;
use std::path::{Path, PathBuf};

/// Filename prefix shared by every header of the family
pub const FILE_PREFIX: &str = "ail";
/// Filename extension shared by every header of the family
pub const FILE_SUFFIX: &str = ".h";
/// Name of the generated amalgamation, written next to its sources
pub const OUTPUT_FILENAME: &str = "ail_all.h";
/// Headers that match the family naming but are no longer shipped
pub const DEPRECATED_FILENAMES: &[&str] = &["ail_gui.h"];
/// Placed between consecutive blocks (four blank lines)
pub const SEPARATOR: &str = "\n\n\n\n\n";

const BANNER_RULE: &str = "////////";

/// Configuration for an amalgamation run
#[derive(Debug, Clone)]
pub struct AmalgamateConfig {
    /// Directory that is scanned and that receives the output file
    pub root_dir: PathBuf,
    pub prefix: String,
    pub suffix: String,
    pub output_filename: String,
    /// Filenames excluded even though they match prefix and suffix
    pub deprecated: Vec<String>,
    pub separator: String,
}

impl Default for AmalgamateConfig {
    fn default() -> Self {
        Self::with_root(default_root_dir())
    }
}

impl AmalgamateConfig {
    /// Default settings, scanning `root_dir` instead of the default root
    pub fn with_root(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            prefix: FILE_PREFIX.to_string(),
            suffix: FILE_SUFFIX.to_string(),
            output_filename: OUTPUT_FILENAME.to_string(),
            deprecated: DEPRECATED_FILENAMES
                .iter()
                .map(ToString::to_string)
                .collect(),
            separator: SEPARATOR.to_string(),
        }
    }

    pub fn output_path(&self) -> PathBuf {
        self.root_dir.join(&self.output_filename)
    }

    /// Whether a directory entry belongs in the amalgamation
    pub fn accepts(&self, candidate: &CandidateFile) -> bool {
        let name = candidate.name.as_str();
        candidate.is_file
            && name != self.output_filename
            && !self.deprecated.iter().any(|d| d == name)
            && name.starts_with(&self.prefix)
            && name.ends_with(&self.suffix)
    }

    /// Pattern for an include of another family member, newline included
    ///
    /// The filename part stops at any line terminator, so a match never
    /// spans lines that end in a bare `\r`.
    ///
    /// # Errors
    ///
    /// Returns `AmalgamateError::Regex` if the pattern fails to compile.
    pub fn local_include_pattern(&self) -> Result<Regex> {
        let pattern = format!(
            r#"#include\s+"{}[^\r\n\x{{2028}}\x{{2029}}]*{}"\n"#,
            regex::escape(&self.prefix),
            regex::escape(&self.suffix)
        );
        Ok(Regex::new(&pattern)?)
    }
}

/// A selected header and its raw contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    pub filename: String,
    pub raw_text: String,
}

/// A header after banner insertion and include stripping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformedEntry {
    pub filename: String,
    pub text: String,
    /// The removed include line, without its newline
    pub stripped_include: Option<String>,
}

/// The joined output of a run, plus the blocks it was built from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Amalgamation {
    pub entries: Vec<TransformedEntry>,
    pub text: String,
}

impl Amalgamation {
    /// Writes the text to `path`, replacing any existing file
    ///
    /// # Errors
    ///
    /// Returns `AmalgamateError::Write` if the file can't be written.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        write_file_contents(path, &self.text)
    }
}

/// Keeps the candidates that belong in the amalgamation, sorted by name
pub fn select_sources(candidates: &[CandidateFile], config: &AmalgamateConfig) -> Vec<String> {
    let mut names: Vec<String> = candidates
        .iter()
        .filter(|c| config.accepts(c))
        .map(|c| c.name.clone())
        .collect();
    names.sort();
    names
}

/// Header block placed above each file's contents
pub fn banner(filename: &str) -> String {
    format!("{BANNER_RULE}\n// From {filename}\n{BANNER_RULE}\n\n\n")
}

/// Prepends the banner and removes the first local include
///
/// Later matches are left in place.
pub fn transform(entry: &SourceEntry, local_include: &Regex) -> TransformedEntry {
    let mut text = banner(&entry.filename);
    text.push_str(&entry.raw_text);

    let mut stripped_include = None;
    if let Some(found) = local_include.find(&text) {
        let range = found.range();
        stripped_include = Some(found.as_str().trim_end_matches('\n').to_string());
        text.replace_range(range, "");
    }

    TransformedEntry {
        filename: entry.filename.clone(),
        text,
        stripped_include,
    }
}

/// Joins transformed blocks with `separator`; no entries gives an empty string
pub fn assemble(entries: &[TransformedEntry], separator: &str) -> String {
    entries
        .iter()
        .map(|e| e.text.as_str())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Lists the root and reads every selected header, in output order
///
/// # Errors
///
/// Returns listing errors from `list_directory` and read errors from
/// `read_file_contents`. Nothing is returned unless every file was read.
pub fn read_sources(config: &AmalgamateConfig) -> Result<Vec<SourceEntry>> {
    let candidates = list_directory(&config.root_dir)?;

    select_sources(&candidates, config)
        .into_iter()
        .map(|filename| {
            let raw_text = read_file_contents(&config.root_dir.join(&filename))?;
            Ok(SourceEntry { filename, raw_text })
        })
        .collect()
}

/// Builds the amalgamation in memory without writing it
///
/// # Errors
///
/// Returns errors from `read_sources` or from compiling the include pattern.
pub fn build(config: &AmalgamateConfig) -> Result<Amalgamation> {
    let local_include = config.local_include_pattern()?;
    let entries: Vec<TransformedEntry> = read_sources(config)?
        .iter()
        .map(|source| transform(source, &local_include))
        .collect();
    let text = assemble(&entries, &config.separator);

    Ok(Amalgamation { entries, text })
}

/// Builds the amalgamation and writes it to the configured output path
///
/// # Errors
///
/// Returns errors from `build`, or `AmalgamateError::Write` if the output
/// can't be written.
pub fn run(config: &AmalgamateConfig) -> Result<Amalgamation> {
    let amalgamation = build(config)?;
    amalgamation.write_to(&config.output_path())?;
    Ok(amalgamation)
}
