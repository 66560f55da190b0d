use super::{DirEntry, FileSystem, FileType};
use std::collections::{BTreeMap, HashMap};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

#[derive(Debug, Clone)]
struct MockEntry {
    content: Option<Vec<u8>>,
    file_type: FileType,
}

/// A call observed by [`MockFileSystem`], in the order it was made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FsCall {
    Exists(PathBuf),
    Remove(PathBuf),
    RemoveAll(PathBuf),
    ReadDir(PathBuf),
    WriteFile(PathBuf),
}

impl FsCall {
    pub fn path(&self) -> &Path {
        match self {
            FsCall::Exists(p)
            | FsCall::Remove(p)
            | FsCall::RemoveAll(p)
            | FsCall::ReadDir(p)
            | FsCall::WriteFile(p) => p,
        }
    }

    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            FsCall::Remove(_) | FsCall::RemoveAll(_) | FsCall::WriteFile(_)
        )
    }
}

/// In-memory tree keyed by path as given (no normalization).
///
/// Every call is recorded, and [`MockFileSystem::fail_with`] makes any
/// removal, listing or write on a path fail with the chosen error kind.
#[derive(Debug, Default)]
pub struct MockFileSystem {
    files: RwLock<BTreeMap<PathBuf, MockEntry>>,
    failures: RwLock<HashMap<PathBuf, io::ErrorKind>>,
    calls: RwLock<Vec<FsCall>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: &str) {
        let path = path.as_ref().to_path_buf();
        let mut files = self.files.write().unwrap();

        if let Some(parent) = path.parent() {
            Self::ensure_parents(&mut files, parent);
        }

        files.insert(
            path,
            MockEntry {
                content: Some(content.as_bytes().to_vec()),
                file_type: FileType::File,
            },
        );
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let mut files = self.files.write().unwrap();
        Self::ensure_parents(&mut files, path.as_ref());
    }

    pub fn add_symlink(&self, path: impl AsRef<Path>) {
        let path = path.as_ref().to_path_buf();
        let mut files = self.files.write().unwrap();

        if let Some(parent) = path.parent() {
            Self::ensure_parents(&mut files, parent);
        }

        files.insert(
            path,
            MockEntry {
                content: None,
                file_type: FileType::Symlink,
            },
        );
    }

    /// Make every failable operation on `path` return an error of `kind`.
    pub fn fail_with(&self, path: impl AsRef<Path>, kind: io::ErrorKind) {
        self.failures
            .write()
            .unwrap()
            .insert(path.as_ref().to_path_buf(), kind);
    }

    /// Contents of a file, or `None` for directories and missing paths
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        self.files
            .read()
            .unwrap()
            .get(path.as_ref())
            .and_then(|e| e.content.clone())
    }

    pub fn calls(&self) -> Vec<FsCall> {
        self.calls.read().unwrap().clone()
    }

    pub fn mutations(&self) -> Vec<FsCall> {
        self.calls().into_iter().filter(FsCall::is_mutation).collect()
    }

    pub fn removed(&self) -> Vec<PathBuf> {
        self.collect_calls(|c| matches!(c, FsCall::Remove(_)))
    }

    pub fn removed_all(&self) -> Vec<PathBuf> {
        self.collect_calls(|c| matches!(c, FsCall::RemoveAll(_)))
    }

    pub fn listed(&self) -> Vec<PathBuf> {
        self.collect_calls(|c| matches!(c, FsCall::ReadDir(_)))
    }

    pub fn clear_calls(&self) {
        self.calls.write().unwrap().clear();
    }

    fn collect_calls(&self, keep: impl Fn(&FsCall) -> bool) -> Vec<PathBuf> {
        self.calls
            .read()
            .unwrap()
            .iter()
            .filter(|c| keep(*c))
            .map(|c| c.path().to_path_buf())
            .collect()
    }

    fn record(&self, call: FsCall) {
        self.calls.write().unwrap().push(call);
    }

    fn injected(&self, path: &Path) -> io::Result<()> {
        match self.failures.read().unwrap().get(path) {
            Some(kind) => Err(io::Error::new(
                *kind,
                format!("injected failure for {}", path.display()),
            )),
            None => Ok(()),
        }
    }

    fn ensure_parents(files: &mut BTreeMap<PathBuf, MockEntry>, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            files.entry(current.clone()).or_insert(MockEntry {
                content: None,
                file_type: FileType::Directory,
            });
        }
    }

    fn not_found(path: &Path) -> io::Error {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("no such file or directory: {}", path.display()),
        )
    }

    fn children(files: &BTreeMap<PathBuf, MockEntry>, path: &Path) -> Vec<DirEntry> {
        files
            .iter()
            .filter(|(p, _)| p.parent() == Some(path))
            .map(|(p, entry)| DirEntry {
                path: p.clone(),
                name: p
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default(),
                file_type: entry.file_type,
            })
            .collect()
    }
}

impl FileSystem for MockFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.record(FsCall::Exists(path.to_path_buf()));
        self.files.read().unwrap().contains_key(path)
    }

    fn remove(&self, path: &Path) -> io::Result<()> {
        self.record(FsCall::Remove(path.to_path_buf()));
        self.injected(path)?;

        let mut files = self.files.write().unwrap();
        if !files.contains_key(path) {
            return Err(Self::not_found(path));
        }
        if !Self::children(&files, path).is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                format!("directory not empty: {}", path.display()),
            ));
        }

        files.remove(path);
        Ok(())
    }

    fn remove_all(&self, path: &Path) -> io::Result<()> {
        self.record(FsCall::RemoveAll(path.to_path_buf()));
        self.injected(path)?;

        self.files
            .write()
            .unwrap()
            .retain(|p, _| !p.starts_with(path));
        Ok(())
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        self.record(FsCall::ReadDir(path.to_path_buf()));
        self.injected(path)?;

        let files = self.files.read().unwrap();
        match files.get(path) {
            None => Err(Self::not_found(path)),
            Some(entry) if entry.file_type != FileType::Directory => Err(io::Error::new(
                io::ErrorKind::Other,
                format!("not a directory: {}", path.display()),
            )),
            Some(_) => Ok(Self::children(&files, path)),
        }
    }

    fn write_file(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        self.record(FsCall::WriteFile(path.to_path_buf()));
        self.injected(path)?;

        let mut files = self.files.write().unwrap();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !files.contains_key(parent) {
                return Err(Self::not_found(parent));
            }
        }

        files.insert(
            path.to_path_buf(),
            MockEntry {
                content: Some(contents.to_vec()),
                file_type: FileType::File,
            },
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_file_creates_parents() {
        let fs = MockFileSystem::new();
        fs.add_file("state/vars/bbl.tfvars", "");

        assert!(fs.exists(Path::new("state")));
        assert!(fs.exists(Path::new("state/vars")));
        assert!(fs.exists(Path::new("state/vars/bbl.tfvars")));
    }

    #[test]
    fn test_read_dir_lists_direct_children_only() {
        let fs = MockFileSystem::new();
        fs.add_file("state/vars/bbl.tfvars", "");
        fs.add_file("state/vars/nested/deep.txt", "");
        fs.add_file("state/bbl-state.json", "{}");

        let entries = fs.read_dir(Path::new("state/vars")).unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.file_name()).collect();

        assert_eq!(names, vec!["bbl.tfvars", "nested"]);
        assert_eq!(entries[1].file_type(), FileType::Directory);
    }

    #[test]
    fn test_read_dir_missing_is_not_found() {
        let fs = MockFileSystem::new();
        let err = fs.read_dir(Path::new("nowhere")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_remove_refuses_non_empty_directory() {
        let fs = MockFileSystem::new();
        fs.add_file("state/vars/bbl.tfvars", "");

        assert!(fs.remove(Path::new("state/vars")).is_err());
        fs.remove(Path::new("state/vars/bbl.tfvars")).unwrap();
        fs.remove(Path::new("state/vars")).unwrap();
        assert!(!fs.exists(Path::new("state/vars")));
    }

    #[test]
    fn test_remove_all_drops_subtree() {
        let fs = MockFileSystem::new();
        fs.add_file("state/.terraform/plugins/provider", "");
        fs.add_file("state/bbl-state.json", "{}");

        fs.remove_all(Path::new("state/.terraform")).unwrap();

        assert!(!fs.exists(Path::new("state/.terraform/plugins/provider")));
        assert!(!fs.exists(Path::new("state/.terraform")));
        assert!(fs.exists(Path::new("state/bbl-state.json")));
    }

    #[test]
    fn test_injected_failure() {
        let fs = MockFileSystem::new();
        fs.add_file("state/bbl-state.json", "{}");
        fs.fail_with("state/bbl-state.json", io::ErrorKind::PermissionDenied);

        let err = fs.remove(Path::new("state/bbl-state.json")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
        assert!(fs.exists(Path::new("state/bbl-state.json")));
    }

    #[test]
    fn test_calls_are_recorded_in_order() {
        let fs = MockFileSystem::new();
        fs.add_dir("state");

        fs.exists(Path::new("state"));
        let _ = fs.remove(Path::new("state/missing"));
        fs.write_file(Path::new("state/notes"), b"x").unwrap();

        assert_eq!(
            fs.calls(),
            vec![
                FsCall::Exists(PathBuf::from("state")),
                FsCall::Remove(PathBuf::from("state/missing")),
                FsCall::WriteFile(PathBuf::from("state/notes")),
            ]
        );
        assert_eq!(fs.mutations().len(), 2);
        assert_eq!(fs.contents("state/notes"), Some(b"x".to_vec()));
        assert_eq!(fs.contents("state"), None);
    }
}
