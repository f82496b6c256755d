//! Porcelain commands
//!
//! - `init`: Create the metadata directory layout

pub mod init;
