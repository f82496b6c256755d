//! Plumbing commands (low-level object operations)
//!
//! ## Commands
//!
//! - `cat-file`: Print the type, size or content of an object
//! - `hash-object`: Compute object ID and optionally store in database
//! - `ls-tree`: List contents of a tree object
//! - `write-tree`: Snapshot the working directory as tree objects
//! - `commit-tree`: Create a commit object for a tree

pub mod cat_file;
pub mod commit_tree;
pub mod hash_object;
pub mod ls_tree;
pub mod write_tree;
