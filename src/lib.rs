//! # amalgamate
//!
//! Builds the single-header distribution of the `ail` C library by concatenating
//! every `ail*.h` header of a directory into one `ail_all.h`.
//!
//! ## What a run does
//!
//! - Lists the library directory (one level, no recursion)
//! - Keeps regular files named `ail*.h`, except `ail_all.h` itself and the
//!   deprecated `ail_gui.h`, sorted by name
//! - Puts a `// From <file>` banner above each header
//! - Drops the first `#include "ail....h"` line of each header, since the
//!   included header is already part of the amalgamation
//! - Joins the blocks with four blank lines and writes `ail_all.h`
//!
//! ## Usage
//!
//! ### As a Library
//!
//! ```no_run
//! use amalgamate::AmalgamateConfig;
//!
//! let config = AmalgamateConfig::with_root("/path/to/ail");
//!
//! match amalgamate::run(&config) {
//!     Ok(result) => println!("{} headers amalgamated", result.entries.len()),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```
//!
//! ### As a CLI Tool
//!
//! ```bash
//! # Regenerate ail_all.h in the library this tool is checked out in
//! amalgamate
//!
//! # Amalgamate another checkout
//! amalgamate --root /path/to/ail
//!
//! # Show which headers would be included
//! amalgamate --list=detailed
//! ```

pub mod amalgamate;
pub mod error;
pub mod fs_utils;

// Re-export main types and functions for convenience
pub use amalgamate::{
    AmalgamateConfig, Amalgamation, DEPRECATED_FILENAMES, FILE_PREFIX, FILE_SUFFIX,
    OUTPUT_FILENAME, SEPARATOR, SourceEntry, TransformedEntry, assemble, banner, build,
    read_sources, run, select_sources, transform,
};
pub use error::{AmalgamateError, Result};
pub use fs_utils::CandidateFile;
