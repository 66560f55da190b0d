//! Garbage collector for a bbl state directory
//!
//! Runs once at teardown. Everything the [`OwnershipPolicy`] licenses is
//! deleted; files a user added next to generated ones are left in place and
//! reported, one report per managed area.

use crate::error::GcError;
use crate::fs::{DirEntry, FileSystem};
use crate::policy::{Classification, DeletionMode, ManagedArea, OwnershipPolicy};
use crate::reporter::Reporter;
use serde::Serialize;
use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// What a teardown would do, computed without touching anything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TeardownPlan {
    /// Whether the state file exists. When false nothing else is filled in.
    pub initialized: bool,
    pub files: Vec<PathBuf>,
    pub directories: Vec<PathBuf>,
    pub preserved: Vec<PathBuf>,
}

impl TeardownPlan {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.directories.is_empty() && self.preserved.is_empty()
    }
}

#[derive(Debug)]
struct AreaSurvey {
    dir: PathBuf,
    known: Vec<PathBuf>,
    foreign: Vec<PathBuf>,
}

pub struct GarbageCollector<F: FileSystem, R: Reporter> {
    fs: F,
    reporter: R,
    policy: OwnershipPolicy,
}

impl<F: FileSystem, R: Reporter> GarbageCollector<F, R> {
    pub fn new(fs: F, reporter: R) -> Self {
        Self::with_policy(fs, reporter, OwnershipPolicy::bbl())
    }

    pub fn with_policy(fs: F, reporter: R, policy: OwnershipPolicy) -> Self {
        Self {
            fs,
            reporter,
            policy,
        }
    }

    pub fn policy(&self) -> &OwnershipPolicy {
        &self.policy
    }

    /// Delete every bbl-owned file under `dir`.
    ///
    /// A directory without the state file is treated as never initialized and
    /// left untouched. Missing targets are skipped; any other failure aborts
    /// the run. The state file is removed first, so calling `remove` again
    /// after a partial run does nothing and the remaining files stay behind.
    pub fn remove(&self, dir: &Path) -> Result<(), GcError> {
        let state_file = dir.join(self.policy.state_file());
        if !self.fs.exists(&state_file) {
            info!(dir = %dir.display(), "No bbl state found, nothing to clean up");
            return Ok(());
        }

        info!(dir = %dir.display(), "Removing bbl-generated files");

        self.remove_file(&state_file)?;
        self.remove_scripts(dir)?;

        for area in self.policy.areas() {
            match area.mode() {
                DeletionMode::Selective => self.remove_selective(dir, area)?,
                DeletionMode::Whole => self.remove_whole(dir, area)?,
            }
        }

        info!(dir = %dir.display(), "Finished removing bbl-generated files");
        Ok(())
    }

    /// Report what [`GarbageCollector::remove`] would delete and preserve.
    pub fn plan(&self, dir: &Path) -> Result<TeardownPlan, GcError> {
        let mut plan = TeardownPlan::default();

        let state_file = dir.join(self.policy.state_file());
        if !self.fs.exists(&state_file) {
            return Ok(plan);
        }
        plan.initialized = true;
        plan.files.push(state_file);

        // listing does not follow symlinks, so dangling links still count
        let present: BTreeSet<PathBuf> = self
            .list(dir)?
            .unwrap_or_default()
            .into_iter()
            .map(|entry| entry.path().to_path_buf())
            .collect();

        for script in self.policy.scripts() {
            let path = dir.join(script);
            if present.contains(&path) {
                plan.files.push(path);
            }
        }

        for area in self.policy.areas() {
            match area.mode() {
                DeletionMode::Selective => {
                    if let Some(survey) = self.survey(dir, area)? {
                        plan.files.extend(survey.known);
                        if survey.foreign.is_empty() {
                            plan.directories.push(survey.dir);
                        } else {
                            plan.preserved.extend(survey.foreign);
                        }
                    }
                }
                DeletionMode::Whole => {
                    let path = dir.join(area.subpath());
                    if present.contains(&path) {
                        plan.directories.push(path);
                    }
                }
            }
        }

        Ok(plan)
    }

    /// Every script is attempted; the first failure is returned after the loop.
    fn remove_scripts(&self, dir: &Path) -> Result<(), GcError> {
        let mut first_error = None;

        for script in self.policy.scripts() {
            if let Err(e) = self.remove_file(&dir.join(script)) {
                warn!(error = %e, "Failed to remove helper script");
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn remove_selective(&self, dir: &Path, area: &ManagedArea) -> Result<(), GcError> {
        let survey = match self.survey(dir, area)? {
            Some(survey) => survey,
            None => {
                debug!(area = area.subpath(), "Managed area absent, skipping");
                return Ok(());
            }
        };

        for path in &survey.known {
            self.remove_file(path)?;
        }

        // second pass: only an empty directory may go
        let remaining = match self.list(&survey.dir)? {
            Some(entries) => entries,
            None => return Ok(()),
        };

        if remaining.is_empty() {
            self.remove_file(&survey.dir)?;
            return Ok(());
        }

        let mut leftovers: Vec<String> = remaining
            .iter()
            .map(|entry| entry.path().display().to_string())
            .collect();
        leftovers.sort();
        leftovers.dedup();

        warn!(
            area = area.subpath(),
            count = leftovers.len(),
            "Leaving files that were not generated by bbl"
        );
        self.reporter.report(&leftovers.join("\n"));

        Ok(())
    }

    fn remove_whole(&self, dir: &Path, area: &ManagedArea) -> Result<(), GcError> {
        let path = dir.join(area.subpath());
        match self.fs.remove_all(&path) {
            Ok(()) => {
                debug!(path = %path.display(), "Removed directory tree");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(GcError::RemoveAll { path, source }),
        }
    }

    fn survey(&self, dir: &Path, area: &ManagedArea) -> Result<Option<AreaSurvey>, GcError> {
        let area_dir = dir.join(area.subpath());
        let entries = match self.list(&area_dir)? {
            Some(entries) => entries,
            None => return Ok(None),
        };

        let mut survey = AreaSurvey {
            dir: area_dir,
            known: Vec::new(),
            foreign: Vec::new(),
        };

        for entry in &entries {
            let path = entry.path().to_path_buf();
            match area.classify(entry) {
                Classification::Known => survey.known.push(path),
                Classification::Foreign => survey.foreign.push(path),
            }
        }

        Ok(Some(survey))
    }

    fn list(&self, path: &Path) -> Result<Option<Vec<DirEntry>>, GcError> {
        match self.fs.read_dir(path) {
            Ok(entries) => Ok(Some(entries)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(GcError::ReadDir {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    fn remove_file(&self, path: &Path) -> Result<(), GcError> {
        match self.fs.remove(path) {
            Ok(()) => {
                debug!(path = %path.display(), "Removed");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(GcError::Remove {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}
