//! Command implementations
//!
//! - `plumbing`: Low-level commands for direct object manipulation
//!   (cat-file, hash-object, ls-tree, write-tree, commit-tree)
//! - `porcelain`: Repository setup (init)
//!
//! Every command is a method on `Repository` that takes its options as plain
//! arguments and writes its output to the repository's writer.

pub mod plumbing;
pub mod porcelain;
