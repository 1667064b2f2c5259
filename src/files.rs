use crate::config::Config;
use crate::error::{Error, Result};
use crate::languages;
use crate::matcher::Matcher;
use crate::scanner::{ScanOutcome, Scanner};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub struct FileReport {
    pub path: PathBuf,
    pub outcome: ScanOutcome,
}

fn is_source(path: &Path) -> bool {
    languages::syntax_for_path(path).is_some()
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> Error + '_ {
    move |source| Error::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Expands files and directories into a sorted list of source files whose
/// extension has a known comment syntax. Explicitly named files are kept
/// regardless of extension.
pub fn list_files(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut out: Vec<PathBuf> = Vec::new();

    for p in inputs {
        if p.is_dir() {
            for entry in fs::read_dir(p).map_err(io_err(p))? {
                let sub_path = entry.map_err(io_err(p))?.path();
                if sub_path.is_dir() {
                    out.extend(list_files(&[sub_path])?);
                } else if sub_path.is_file() && is_source(&sub_path) {
                    out.push(sub_path);
                }
            }
        } else if p.is_file() {
            out.push(p.clone());
        } else {
            log::warn!("skipping {}: not a file or directory", p.display());
        }
    }

    out.sort();
    out.dedup();
    log::debug!("discovered {} source file(s)", out.len());
    Ok(out)
}

pub fn scan_file(path: &Path, config: &Config) -> Result<FileReport> {
    let text = fs::read_to_string(path).map_err(io_err(path))?;
    let config = config.for_path(path);
    let matcher = Matcher::new(&config)?;
    let outcome = ScanOutcome::collect(Scanner::new(&text, &matcher));

    log::debug!(
        "{}: {} annotation(s), {} warning(s)",
        path.display(),
        outcome.records.len(),
        outcome.warnings.len()
    );
    if let Some(err) = &outcome.error {
        log::warn!("{}: {}", path.display(), err);
    }

    Ok(FileReport {
        path: path.to_path_buf(),
        outcome,
    })
}

/// Scans every file in parallel. Results come back in input order.
pub fn scan_files(paths: &[PathBuf], config: &Config) -> Vec<Result<FileReport>> {
    paths.par_iter().map(|p| scan_file(p, config)).collect()
}
