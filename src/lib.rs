//! Notescan - structured developer-annotation scanner.
//!
//! Finds `TODO`, `FIXME`, `XXX`, `NOTE` and `HACK` markers in source comments,
//! along with `TODOS.START` ... `TODOS.END` regions and `TODO: { ... }`
//! continuations, and returns them as [`AnnotationRecord`]s.
//!
//! ```rust
//! let config = notescan::Config::default();
//! let outcome = notescan::scan("# TODO: Add rate limiting\n", &config).unwrap();
//! assert_eq!(outcome.records[0].body(), "Add rate limiting");
//! ```

pub mod config;
pub mod error;
pub mod files;
pub mod languages;
pub mod matcher;
pub mod normalize;
pub mod record;
pub mod report;
pub mod scanner;

pub use config::{BlockComment, Config};
pub use error::{Error, Result, ScanError};
pub use files::{list_files, scan_file, scan_files, FileReport};
pub use matcher::Matcher;
pub use record::{AnnotationRecord, MarkerKind};
pub use report::Summary;
pub use scanner::{ScanOutcome, Scanner};

/// Scans `text` to the end. An unterminated region does not make this fail;
/// it is reported in [`ScanOutcome::error`] next to the records found before it.
pub fn scan(text: &str, config: &Config) -> Result<ScanOutcome> {
    let matcher = Matcher::new(config)?;
    Ok(ScanOutcome::collect(Scanner::new(text, &matcher)))
}

/// Like [`scan`], but any unterminated region is an error.
pub fn records(text: &str, config: &Config) -> Result<Vec<AnnotationRecord>> {
    Ok(scan(text, config)?.into_result()?)
}
