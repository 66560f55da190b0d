//! Shared fixtures for tests that run against a real directory

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary state directory laid out the way bbl leaves it after `up`
pub struct StateDir {
    dir: TempDir,
}

impl StateDir {
    /// Every generated file and directory bbl writes
    pub fn full() -> Self {
        let state = Self::empty();
        state.file("bbl-state.json", "{\"version\": 14}");
        for script in [
            "create-director.sh",
            "create-jumpbox.sh",
            "delete-director.sh",
            "delete-jumpbox.sh",
        ] {
            state.file(script, "#!/bin/sh\nexit 0\n");
        }
        state.file("cloud-config/cloud-config.yml", "azs: []\n");
        state.file("cloud-config/ops.yml", "[]\n");
        for name in [
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
        ] {
            state.file(&format!("vars/{}", name), "");
        }
        state.file("terraform/bbl-template.tf", "variable \"env_id\" {}\n");
        state.file(".terraform/plugins/linux_amd64/lock.json", "{}");
        state.file("bosh-deployment/bosh.yml", "name: bosh\n");
        state.file("jumpbox-deployment/jumpbox.yml", "name: jumpbox\n");
        state.file("bbl-ops-files/gcp/bosh-director-ephemeral-ip-ops.yml", "[]\n");
        state
    }

    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    pub fn file(&self, rel: &str, contents: &str) {
        let path = self.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(path, contents).expect("Failed to write fixture file");
    }

    pub fn dir(&self, rel: &str) {
        fs::create_dir_all(self.join(rel)).expect("Failed to create fixture dir");
    }

    pub fn exists(&self, rel: &str) -> bool {
        self.join(rel).exists()
    }

    /// Top-level entry names, sorted
    pub fn listing(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.path())
            .expect("Failed to list state dir")
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }
}
