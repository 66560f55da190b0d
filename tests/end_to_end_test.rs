//! End-to-end cleanup of a real state directory

mod support;

use bbl_janitor::{GarbageCollector, RealFileSystem, RecordingReporter};
use support::StateDir;

#[test]
fn test_full_state_dir_is_emptied() {
    let state = StateDir::full();
    let reporter = RecordingReporter::new();
    let gc = GarbageCollector::new(RealFileSystem::new(), &reporter);

    gc.remove(state.path()).unwrap();

    assert!(state.listing().is_empty(), "left: {:?}", state.listing());
    assert_eq!(reporter.call_count(), 0);
    assert!(state.path().exists());
}

#[test]
fn test_user_files_survive_and_are_reported() {
    let state = StateDir::full();
    state.file("vars/user-managed-file", "mine");
    state.file("terraform/override.tf", "# mine");
    state.file("README.md", "notes");
    let reporter = RecordingReporter::new();
    let gc = GarbageCollector::new(RealFileSystem::new(), &reporter);

    gc.remove(state.path()).unwrap();

    assert_eq!(state.listing(), vec!["README.md", "terraform", "vars"]);
    assert!(state.exists("vars/user-managed-file"));
    assert!(!state.exists("vars/bbl.tfvars"));
    assert!(!state.exists("vars/bosh-state.json"));
    assert!(state.exists("terraform/override.tf"));
    assert!(!state.exists("terraform/bbl-template.tf"));

    assert_eq!(
        reporter.messages(),
        vec![
            state.join("vars/user-managed-file").display().to_string(),
            state.join("terraform/override.tf").display().to_string(),
        ]
    );
}

#[test]
fn test_wholly_owned_directories_go_regardless_of_contents() {
    let state = StateDir::empty();
    state.file("bbl-state.json", "{}");
    state.file(".terraform/modules/custom/main.tf", "# added by hand");
    state.file("bbl-ops-files/user-ops.yml", "[]");
    let reporter = RecordingReporter::new();
    let gc = GarbageCollector::new(RealFileSystem::new(), &reporter);

    gc.remove(state.path()).unwrap();

    assert!(!state.exists(".terraform"));
    assert!(!state.exists("bbl-ops-files"));
    assert_eq!(reporter.call_count(), 0);
}

#[test]
fn test_uninitialized_directory_is_untouched() {
    let state = StateDir::full();
    std::fs::remove_file(state.join("bbl-state.json")).unwrap();
    let before = state.listing();
    let reporter = RecordingReporter::new();
    let gc = GarbageCollector::new(RealFileSystem::new(), &reporter);

    gc.remove(state.path()).unwrap();

    assert_eq!(state.listing(), before);
    assert!(state.exists("vars/bbl.tfvars"));
    assert!(state.exists(".terraform/plugins/linux_amd64/lock.json"));
}

#[test]
fn test_nonexistent_directory_is_a_noop() {
    let state = StateDir::empty();
    let missing = state.join("never-created");
    let gc = GarbageCollector::new(RealFileSystem::new(), RecordingReporter::new());

    gc.remove(&missing).unwrap();

    assert!(!missing.exists());
}

#[test]
fn test_remove_is_idempotent() {
    let state = StateDir::full();
    state.file("cloud-config/user-ops.yml", "[]");
    let reporter = RecordingReporter::new();
    let gc = GarbageCollector::new(RealFileSystem::new(), &reporter);

    gc.remove(state.path()).unwrap();
    gc.remove(state.path()).unwrap();

    assert_eq!(state.listing(), vec!["cloud-config"]);
    assert_eq!(reporter.call_count(), 1);
}

#[test]
fn test_plan_matches_remove() {
    let state = StateDir::full();
    state.file("vars/user-managed-file", "mine");
    let gc = GarbageCollector::new(RealFileSystem::new(), RecordingReporter::new());

    let plan = gc.plan(state.path()).unwrap();

    assert!(plan.initialized);
    assert!(plan.files.contains(&state.join("bbl-state.json")));
    assert!(plan.files.contains(&state.join("vars/bbl.tfvars")));
    assert!(plan.directories.contains(&state.join("cloud-config")));
    assert!(plan.directories.contains(&state.join(".terraform")));
    assert!(!plan.directories.contains(&state.join("vars")));
    assert_eq!(plan.preserved, vec![state.join("vars/user-managed-file")]);

    // planning leaves everything in place
    assert!(state.exists("bbl-state.json"));

    gc.remove(state.path()).unwrap();
    for path in plan.files.iter().chain(plan.directories.iter()) {
        assert!(!path.exists(), "{} should be gone", path.display());
    }
    for path in &plan.preserved {
        assert!(path.exists());
    }
}

#[cfg(unix)]
#[test]
fn test_symlink_with_known_name_is_unlinked_not_followed() {
    let state = StateDir::empty();
    state.file("bbl-state.json", "{}");
    state.file("elsewhere/bbl.tfvars", "real");
    state.dir("vars");
    std::os::unix::fs::symlink(state.join("elsewhere/bbl.tfvars"), state.join("vars/bbl.tfvars"))
        .unwrap();
    let reporter = RecordingReporter::new();
    let gc = GarbageCollector::new(RealFileSystem::new(), &reporter);

    gc.remove(state.path()).unwrap();

    assert!(state.join("vars/bbl.tfvars").symlink_metadata().is_err());
    assert!(!state.exists("vars"));
    assert_eq!(
        std::fs::read_to_string(state.join("elsewhere/bbl.tfvars")).unwrap(),
        "real"
    );
    assert_eq!(reporter.call_count(), 0);
}

#[test]
fn test_directory_with_known_name_is_preserved() {
    let state = StateDir::empty();
    state.file("bbl-state.json", "{}");
    state.file("vars/bbl.tfvars/inner.txt", "mine");
    let reporter = RecordingReporter::new();
    let gc = GarbageCollector::new(RealFileSystem::new(), &reporter);

    gc.remove(state.path()).unwrap();

    assert!(state.exists("vars/bbl.tfvars/inner.txt"));
    assert_eq!(
        reporter.messages(),
        vec![state.join("vars/bbl.tfvars").display().to_string()]
    );
}

#[cfg(unix)]
#[test]
fn test_plan_lists_dangling_script_symlink() {
    let state = StateDir::empty();
    state.file("bbl-state.json", "{}");
    std::os::unix::fs::symlink(state.join("gone.sh"), state.join("create-director.sh")).unwrap();
    let gc = GarbageCollector::new(RealFileSystem::new(), RecordingReporter::new());

    let plan = gc.plan(state.path()).unwrap();
    assert!(plan.files.contains(&state.join("create-director.sh")));

    gc.remove(state.path()).unwrap();
    assert!(state.join("create-director.sh").symlink_metadata().is_err());
}

#[cfg(target_os = "linux")]
#[test]
fn test_non_utf8_foreign_name_keeps_its_real_path() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let state = StateDir::full();
    let odd = state.join("vars").join(OsStr::from_bytes(b"user-\xff-file"));
    std::fs::write(&odd, "mine").unwrap();
    let reporter = RecordingReporter::new();
    let gc = GarbageCollector::new(RealFileSystem::new(), &reporter);

    let plan = gc.plan(state.path()).unwrap();
    assert_eq!(plan.preserved, vec![odd.clone()]);

    gc.remove(state.path()).unwrap();

    assert!(odd.exists());
    assert_eq!(reporter.messages(), vec![odd.display().to_string()]);
}
