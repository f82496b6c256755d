//! Snapshot a directory subtree as tree objects
//!
//! The walk keeps an explicit stack of [`DirFrame`]s instead of recursing, so
//! the depth of the directory tree never grows the call stack. Files are
//! stored as blobs and folded into their directory's frame right away. A
//! subdirectory pushes a new frame and suspends its parent; once the child is
//! exhausted its tree is stored, the frame is popped, and the child's entry is
//! folded into the parent, whose cursor only then moves past it.
//!
//! A directory's tree is written after every one of its descendants, so a
//! stored tree never references a missing object.

pub mod dir_frame;

use crate::areas::database::{Database, Stored};
use crate::areas::workspace::{EntryKind, Workspace};
use crate::artifacts::objects::entry_mode::EntryMode;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::StoreResult;
use derive_new::new;
use dir_frame::DirFrame;
use std::path::Path;

/// Result of a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeBuildReport {
    /// Digest of the root directory's tree
    pub root: ObjectId,
    pub trees: usize,
    pub blobs: usize,
    /// Objects that did not exist in the store before this build
    pub written: usize,
}

#[derive(Debug, Default)]
struct Tally {
    trees: usize,
    blobs: usize,
    written: usize,
}

impl Tally {
    fn record(&mut self, object_type: ObjectType, stored: Stored) {
        match object_type {
            ObjectType::Tree => self.trees += 1,
            _ => self.blobs += 1,
        }
        if stored.written {
            self.written += 1;
        }
    }

    fn into_report(self, root: ObjectId) -> TreeBuildReport {
        TreeBuildReport {
            root,
            trees: self.trees,
            blobs: self.blobs,
            written: self.written,
        }
    }
}

#[derive(new)]
pub struct TreeBuilder<'r> {
    workspace: &'r Workspace,
    database: &'r Database,
    /// Directory name never included in a snapshot (the metadata directory)
    excluded: &'r str,
}

impl TreeBuilder<'_> {
    /// Store every file and directory below `root` and return the root tree
    ///
    /// Any filesystem error aborts the build. Objects written before the
    /// failure stay in the store and are reused by the next build.
    pub fn build(&self, root: &Path) -> StoreResult<TreeBuildReport> {
        let mut tally = Tally::default();
        let mut frame = DirFrame::open(self.workspace, root, String::new())?;
        let mut parents: Vec<DirFrame> = Vec::new();
        tracing::debug!(root = %root.display(), "building tree");

        loop {
            let Some(entry) = frame.current() else {
                // exhausted: store this directory and fold it into its parent
                let stored = self.database.put_object(ObjectType::Tree, frame.body())?;
                tally.record(ObjectType::Tree, stored);

                let Some(parent) = parents.pop() else {
                    return Ok(tally.into_report(stored.oid));
                };
                let child = std::mem::replace(&mut frame, parent);
                tracing::trace!(dir = %child.name(), oid = %stored.oid, "finished directory");

                frame.append_entry(EntryMode::Directory, child.name(), stored.oid);
                frame.advance();
                continue;
            };

            if entry.name == self.excluded {
                frame.advance();
                continue;
            }

            match entry.kind {
                EntryKind::File(mode) => {
                    let content = self.workspace.read_file(&entry.path)?;
                    let name = entry.name.clone();

                    let stored = self.database.put_object(ObjectType::Blob, &content)?;
                    tally.record(ObjectType::Blob, stored);

                    frame.append_entry(mode, &name, stored.oid);
                    frame.advance();
                }
                EntryKind::Directory => {
                    // the parent's cursor stays on this entry until the child is popped
                    let child = DirFrame::open(self.workspace, &entry.path, entry.name.clone())?;
                    tracing::trace!(
                        dir = %child.path().display(),
                        depth = parents.len() + 1,
                        "entering directory"
                    );
                    parents.push(std::mem::replace(&mut frame, child));
                }
            }
        }
    }
}
