use crate::artifacts::objects::entry_mode::EntryMode;
use crate::artifacts::objects::tree::TreeEntry;
use crate::errors::{StoreError, StoreResult};
use bytes::Bytes;
use derive_new::new;
use is_executable::IsExecutable;
use std::path::{Path, PathBuf};

/// What a directory child is, as far as snapshots are concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File(EntryMode),
    Directory,
}

impl EntryKind {
    pub fn mode(&self) -> EntryMode {
        match self {
            EntryKind::File(mode) => *mode,
            EntryKind::Directory => EntryMode::Directory,
        }
    }
}

/// A regular file or directory found while listing a directory
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct WorkspaceEntry {
    pub name: String,
    pub path: PathBuf,
    pub kind: EntryKind,
}

/// Filesystem access for the working tree
///
/// Relative paths are resolved against the workspace root; absolute paths are
/// used as they are.
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// List the regular files and directories inside `dir_path`
    ///
    /// Symbolic links and special files are skipped. Entries come back in
    /// git tree order so snapshots hash the same on every platform.
    pub fn list_dir(&self, dir_path: &Path) -> StoreResult<Vec<WorkspaceEntry>> {
        let dir_path = self.path.join(dir_path);
        let read_dir =
            std::fs::read_dir(&dir_path).map_err(|err| StoreError::filesystem(&dir_path, err))?;

        let mut entries = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|err| StoreError::filesystem(&dir_path, err))?;
            let path = entry.path();

            let name = entry.file_name().into_string().map_err(|name| {
                StoreError::filesystem(
                    &path,
                    std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        format!("file name {:?} is not valid UTF-8", name),
                    ),
                )
            })?;

            if let Some(kind) = self.stat_entry(&path)? {
                entries.push(WorkspaceEntry::new(name, path, kind));
            }
        }

        entries.sort_by_cached_key(|entry| TreeEntry::sort_key(&entry.name, entry.kind.mode()));
        Ok(entries)
    }

    /// Classify a path without following symbolic links
    ///
    /// Returns `None` for anything that is neither a regular file nor a directory.
    pub fn stat_entry(&self, path: &Path) -> StoreResult<Option<EntryKind>> {
        let path = self.path.join(path);
        let metadata =
            std::fs::symlink_metadata(&path).map_err(|err| StoreError::filesystem(&path, err))?;

        let kind = if metadata.is_dir() {
            Some(EntryKind::Directory)
        } else if metadata.is_file() {
            if path.is_executable() {
                Some(EntryKind::File(EntryMode::Executable))
            } else {
                Some(EntryKind::File(EntryMode::Regular))
            }
        } else {
            None
        };

        Ok(kind)
    }

    pub fn read_file(&self, file_path: &Path) -> StoreResult<Bytes> {
        let file_path = self.path.join(file_path);

        let content =
            std::fs::read(&file_path).map_err(|err| StoreError::filesystem(&file_path, err))?;

        Ok(Bytes::from(content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use assert_fs::prelude::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn lists_files_and_directories_in_tree_order() {
        let dir = TempDir::new().unwrap();
        dir.child("b.txt").write_str("b").unwrap();
        dir.child("a").create_dir_all().unwrap();
        dir.child("a.txt").write_str("a").unwrap();
        let workspace = Workspace::new(dir.path().to_path_buf().into_boxed_path());

        let entries = workspace.list_dir(Path::new("")).unwrap();
        let listed = entries
            .iter()
            .map(|entry| (entry.name.as_str(), entry.kind))
            .collect::<Vec<_>>();

        assert_eq!(
            listed,
            vec![
                ("a.txt", EntryKind::File(EntryMode::Regular)),
                ("a", EntryKind::Directory),
                ("b.txt", EntryKind::File(EntryMode::Regular)),
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn detects_executables_and_skips_symlinks() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        dir.child("run.sh").write_str("#!/bin/sh\n").unwrap();
        std::fs::set_permissions(
            dir.child("run.sh").path(),
            std::fs::Permissions::from_mode(0o755),
        )
        .unwrap();
        std::os::unix::fs::symlink(dir.child("run.sh").path(), dir.child("link").path()).unwrap();
        let workspace = Workspace::new(dir.path().to_path_buf().into_boxed_path());

        let entries = workspace.list_dir(dir.path()).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, EntryKind::File(EntryMode::Executable));
    }

    #[test]
    fn missing_directory_is_a_filesystem_error() {
        let dir = TempDir::new().unwrap();
        let workspace = Workspace::new(dir.path().to_path_buf().into_boxed_path());

        assert!(matches!(
            workspace.list_dir(Path::new("nope")),
            Err(StoreError::FilesystemError { path, .. }) if path.ends_with("nope")
        ));
        assert!(matches!(
            workspace.read_file(Path::new("nope.txt")),
            Err(StoreError::FilesystemError { .. })
        ));
    }
}
