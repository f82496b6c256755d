//! Content-addressable object store in the style of git's loose objects
//!
//! Blobs, trees and commits are encoded as `<type> <size>\0<body>`, named by
//! the SHA-1 of those bytes, and kept zlib-compressed under
//! `<git-dir>/objects/xx/yyyy...`.

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod config;
pub mod errors;
