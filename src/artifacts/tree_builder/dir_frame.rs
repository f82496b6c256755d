use crate::areas::workspace::{Workspace, WorkspaceEntry};
use crate::artifacts::objects::entry_mode::EntryMode;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::TreeEntry;
use crate::errors::StoreResult;
use bytes::BytesMut;
use std::path::{Path, PathBuf};

/// Working state for one directory of an in-progress snapshot
///
/// The frame owns the tree body accumulated so far. It is revisited, never
/// replaced, after a child frame has been drained.
#[derive(Debug)]
pub struct DirFrame {
    path: PathBuf,
    /// Name under which the parent records this directory; empty for the root
    name: String,
    pending: Vec<WorkspaceEntry>,
    cursor: usize,
    buffer: BytesMut,
}

impl DirFrame {
    /// Snapshot the children of `path` and start with an empty body
    pub fn open(workspace: &Workspace, path: &Path, name: String) -> StoreResult<Self> {
        let pending = workspace.list_dir(path)?;

        Ok(DirFrame {
            path: path.to_path_buf(),
            name,
            pending,
            cursor: 0,
            buffer: BytesMut::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Entry under the cursor, `None` once the frame is exhausted
    pub fn current(&self) -> Option<&WorkspaceEntry> {
        self.pending.get(self.cursor)
    }

    pub fn advance(&mut self) {
        self.cursor += 1;
    }

    /// Record a finished child in this directory's tree body
    pub fn append_entry(&mut self, mode: EntryMode, name: &str, oid: ObjectId) {
        TreeEntry::new(mode, name.to_string(), oid).write_to(&mut self.buffer);
    }

    /// Tree body accumulated so far
    pub fn body(&self) -> &[u8] {
        &self.buffer
    }
}
