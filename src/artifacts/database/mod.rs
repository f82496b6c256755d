//! Storage-side helpers for the object database
//!
//! - `compression`: chunked zlib deflate/inflate of stored objects

pub mod compression;
