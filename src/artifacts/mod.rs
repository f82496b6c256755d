//! Object model and the algorithms built on it
//!
//! - `core`: Shared utilities (byte cursor)
//! - `database`: Compression of stored objects
//! - `inspect`: Read-side views used by `cat-file` and `ls-tree`
//! - `objects`: Object types (blob, tree, commit) and their encoding
//! - `tree_builder`: Iterative snapshot of a directory subtree

pub mod core;
pub mod database;
pub mod inspect;
pub mod objects;
pub mod tree_builder;
