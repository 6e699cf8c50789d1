// Copyright 2022 Yin Guanhao <sopium@mysterious.site>

// This file is part of add-copyright.

// add-copyright is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// add-copyright is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with add-copyright.  If not, see <https://www.gnu.org/licenses/>.

//! Walk a directory tree and put the copyright header into qualifying files.

use crate::header::{self, Verdict};
use anyhow::Context;
use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

pub const DEFAULT_EXTENSIONS: &[&str] = &[".ts", ".tsx", ".js", ".py", ".css", ".scss"];

pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &["node_modules", ".git", "dist", "build", "coverage"];

/// Prepend a dot unless it's already there, so `ts` and `.ts` mean the same.
pub fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim();
    if ext.starts_with('.') {
        ext.into()
    } else {
        format!(".{}", ext)
    }
}

/// What to walk and which files to touch. Built once at startup.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct InjectConfig {
    pub root: PathBuf,
    pub extensions: BTreeSet<String>,
    pub excluded_dirs: BTreeSet<String>,
}

impl Default for InjectConfig {
    fn default() -> InjectConfig {
        InjectConfig::new(".")
    }
}

impl InjectConfig {
    pub fn new(root: impl Into<PathBuf>) -> InjectConfig {
        InjectConfig {
            root: root.into(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            excluded_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|d| d.to_string()).collect(),
        }
    }

    pub fn with_extensions<I, S>(mut self, extensions: I) -> InjectConfig
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|e| normalize_extension(e.as_ref()))
            .filter(|e| e != ".")
            .collect();
        self
    }

    pub fn with_excluded_dirs<I, S>(mut self, dirs: I) -> InjectConfig
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }

    /// Case sensitive suffix match on the file name.
    pub fn is_qualifying(&self, file_name: &OsStr) -> bool {
        let file_name = file_name.to_string_lossy();
        self.extensions
            .iter()
            .any(|ext| file_name.ends_with(ext.as_str()))
    }

    pub fn is_excluded_dir(&self, dir_name: &OsStr) -> bool {
        self.excluded_dirs
            .iter()
            .any(|d| OsStr::new(d.as_str()) == dir_name)
    }

    /// Qualifying files under root, in file name order.
    ///
    /// Excluded directories are pruned, except the root itself. Walk errors
    /// are passed through so the caller can report them.
    pub fn files(&self) -> impl Iterator<Item = walkdir::Result<DirEntry>> + '_ {
        WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |e| {
                e.depth() == 0 || !(e.file_type().is_dir() && self.is_excluded_dir(e.file_name()))
            })
            .filter(move |r| match r {
                Ok(e) => e.file_type().is_file() && self.is_qualifying(e.file_name()),
                Err(_) => true,
            })
    }
}

/// The result of handling one file.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Outcome {
    /// The header was written into the file.
    Added,
    /// The header is missing but the file was not touched (verify mode).
    Missing,
    AlreadyPresent,
    /// Empty or whitespace only.
    Empty,
}

impl Outcome {
    fn unchanged(verdict: Verdict) -> Outcome {
        match verdict {
            Verdict::Blank => Outcome::Empty,
            Verdict::Present => Outcome::AlreadyPresent,
            Verdict::Missing => Outcome::Missing,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Outcome::Added => "header added",
            Outcome::Missing => "header missing",
            Outcome::AlreadyPresent => "header already present",
            Outcome::Empty => "empty file",
        })
    }
}

/// Insert the header into one file if it needs it.
///
/// The file is written at most once, with its full new content.
pub fn process(path: &Path) -> anyhow::Result<Outcome> {
    process_with(path, rewrite)
}

fn process_with(
    path: &Path,
    write: impl FnOnce(&Path, &str) -> anyhow::Result<()>,
) -> anyhow::Result<Outcome> {
    let content = read(path)?;
    match header::insert_header(&content) {
        Some(new_content) => {
            write(path, &new_content)?;
            Ok(Outcome::Added)
        }
        None => Ok(Outcome::unchanged(header::inspect(&content))),
    }
}

/// Like [`process`] but never writes.
pub fn check(path: &Path) -> anyhow::Result<Outcome> {
    let content = read(path)?;
    Ok(Outcome::unchanged(header::inspect(&content)))
}

fn read(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Replace the whole content of the file in a single write.
fn rewrite(path: &Path, content: &str) -> anyhow::Result<()> {
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}

/// Receives what happens to each file during a run.
pub trait Report {
    fn outcome(&mut self, path: &Path, outcome: Outcome);

    fn failed(&mut self, path: &Path, error: &anyhow::Error);
}

#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub struct Summary {
    pub added: usize,
    pub missing: usize,
    pub already_present: usize,
    pub empty: usize,
    /// Files that could not be read or written.
    pub failed: usize,
    /// Directory entries the walk itself could not read.
    pub walk_failed: usize,
}

impl Summary {
    fn record(&mut self, outcome: Outcome) {
        let counter = match outcome {
            Outcome::Added => &mut self.added,
            Outcome::Missing => &mut self.missing,
            Outcome::AlreadyPresent => &mut self.already_present,
            Outcome::Empty => &mut self.empty,
        };
        *counter += 1;
    }

    /// Number of qualifying files handled, successfully or not. Walk
    /// failures are not files and are not counted.
    pub fn visited(&self) -> usize {
        self.added + self.missing + self.already_present + self.empty + self.failed
    }

    pub fn failures(&self) -> usize {
        self.failed + self.walk_failed
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} files visited, {} added, {} missing, {} already present, {} empty, {} failed",
            self.visited(),
            self.added,
            self.missing,
            self.already_present,
            self.empty,
            self.failed
        )?;
        if self.walk_failed > 0 {
            write!(f, ", {} walk errors", self.walk_failed)?;
        }
        Ok(())
    }
}

fn run(
    config: &InjectConfig,
    report: &mut dyn Report,
    handle: impl Fn(&Path) -> anyhow::Result<Outcome>,
) -> Summary {
    let mut summary = Summary::default();
    for entry in config.files() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e.path().unwrap_or_else(|| config.root.as_path()).to_path_buf();
                let e = anyhow::Error::new(e).context("failed to walk directory");
                debug!("{}: {:?}", path.display(), e);
                report.failed(&path, &e);
                summary.walk_failed += 1;
                continue;
            }
        };
        let path = entry.path();
        match handle(path) {
            Ok(outcome) => {
                if outcome != Outcome::Added && outcome != Outcome::Missing {
                    debug!("skipping {}: {}", path.display(), outcome);
                }
                summary.record(outcome);
                report.outcome(path, outcome);
            }
            Err(e) => {
                debug!("{}: {:?}", path.display(), e);
                summary.failed += 1;
                report.failed(path, &e);
            }
        }
    }
    summary
}

/// Put the header into every qualifying file under the configured root.
///
/// Per file errors are reported and counted, never returned, so one bad file
/// doesn't stop the rest of the run.
pub fn traverse(config: &InjectConfig, report: &mut dyn Report) -> Summary {
    run(config, report, process)
}

/// Report qualifying files lacking the header without modifying anything.
pub fn verify(config: &InjectConfig, report: &mut dyn Report) -> Summary {
    run(config, report, check)
}
