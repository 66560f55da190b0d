//! Ownership policy for a bbl state directory
//!
//! Every file the collector is allowed to delete is named here. Filenames
//! must match what the generation side writes byte for byte: a name missing
//! from this list leaves a generated file behind as foreign, and an extra
//! name lets the collector delete a file it does not own.

use crate::fs::{DirEntry, FileType};
use serde::Serialize;
use std::collections::BTreeSet;

pub const STATE_FILE: &str = "bbl-state.json";

pub const HELPER_SCRIPTS: &[&str] = &[
    "create-director.sh",
    "create-jumpbox.sh",
    "delete-director.sh",
    "delete-jumpbox.sh",
];

pub const CLOUD_CONFIG_FILES: &[&str] = &["cloud-config.yml", "ops.yml"];

pub const VARS_FILES: &[&str] = &[
    "bbl.tfvars",
    "bosh-state.json",
    "cloud-config-vars.yml",
    "director-vars-file.yml",
    "director-vars-store.yml",
    "jumpbox-state.json",
    "jumpbox-vars-file.yml",
    "jumpbox-vars-store.yml",
    "terraform.tfstate",
    "terraform.tfstate.backup",
];

pub const TERRAFORM_FILES: &[&str] = &["bbl-template.tf"];

pub const OWNED_DIRECTORIES: &[&str] = &[
    ".terraform",
    "bosh-deployment",
    "jumpbox-deployment",
    "bbl-ops-files",
];

/// How a managed area is cleaned up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletionMode {
    /// Remove the directory recursively without looking inside
    Whole,
    /// Remove known files one by one, then the directory if nothing else is left
    Selective,
}

/// Verdict for one listed entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Known,
    Foreign,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedArea {
    subpath: String,
    known: BTreeSet<String>,
    mode: DeletionMode,
}

impl ManagedArea {
    pub fn selective<I, S>(subpath: impl Into<String>, known: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            subpath: subpath.into(),
            known: known.into_iter().map(Into::into).collect(),
            mode: DeletionMode::Selective,
        }
    }

    pub fn whole(subpath: impl Into<String>) -> Self {
        Self {
            subpath: subpath.into(),
            known: BTreeSet::new(),
            mode: DeletionMode::Whole,
        }
    }

    pub fn subpath(&self) -> &str {
        &self.subpath
    }

    pub fn mode(&self) -> DeletionMode {
        self.mode
    }

    pub fn known(&self) -> impl Iterator<Item = &str> {
        self.known.iter().map(String::as_str)
    }

    pub fn is_known(&self, name: &str) -> bool {
        self.known.contains(name)
    }

    /// Files and symlinks are classified by name. A directory is always
    /// foreign since single-entry removal cannot delete its contents.
    pub fn classify(&self, entry: &DirEntry) -> Classification {
        if entry.file_type() != FileType::Directory && self.is_known(entry.file_name()) {
            Classification::Known
        } else {
            Classification::Foreign
        }
    }
}

/// Immutable description of what bbl owns inside a state directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnershipPolicy {
    state_file: String,
    scripts: Vec<String>,
    areas: Vec<ManagedArea>,
}

impl OwnershipPolicy {
    pub fn new(
        state_file: impl Into<String>,
        scripts: impl IntoIterator<Item = impl Into<String>>,
        areas: impl IntoIterator<Item = ManagedArea>,
    ) -> Self {
        Self {
            state_file: state_file.into(),
            scripts: scripts.into_iter().map(Into::into).collect(),
            areas: areas.into_iter().collect(),
        }
    }

    /// The layout written by bbl's generation steps.
    pub fn bbl() -> Self {
        let mut areas = vec![
            ManagedArea::selective("cloud-config", CLOUD_CONFIG_FILES.iter().copied()),
            ManagedArea::selective("vars", VARS_FILES.iter().copied()),
            ManagedArea::selective("terraform", TERRAFORM_FILES.iter().copied()),
        ];
        areas.extend(OWNED_DIRECTORIES.iter().copied().map(ManagedArea::whole));

        Self::new(STATE_FILE, HELPER_SCRIPTS.iter().copied(), areas)
    }

    pub fn state_file(&self) -> &str {
        &self.state_file
    }

    pub fn scripts(&self) -> impl Iterator<Item = &str> {
        self.scripts.iter().map(String::as_str)
    }

    /// Areas in the order they are processed
    pub fn areas(&self) -> &[ManagedArea] {
        &self.areas
    }

    pub fn selective_areas(&self) -> impl Iterator<Item = &ManagedArea> {
        self.areas
            .iter()
            .filter(|a| a.mode == DeletionMode::Selective)
    }

    pub fn whole_areas(&self) -> impl Iterator<Item = &ManagedArea> {
        self.areas.iter().filter(|a| a.mode == DeletionMode::Whole)
    }

    pub fn area(&self, subpath: &str) -> Option<&ManagedArea> {
        self.areas.iter().find(|a| a.subpath == subpath)
    }
}

impl Default for OwnershipPolicy {
    fn default() -> Self {
        Self::bbl()
    }
}
