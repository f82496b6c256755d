//! Core repository components
//!
//! - `database`: Object database for storing blobs, trees, and commits
//! - `repository`: Repository handle, root discovery and output plumbing
//! - `workspace`: Working directory file system operations

pub mod database;
pub mod repository;
pub mod workspace;
