//! Error taxonomy of the object store
//!
//! Every library-level operation returns a [`StoreResult`]. The command layer
//! wraps these errors with `anyhow` context before they reach the user.

use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The object header or body violates the serialized layout.
    #[error("malformed object: {0}")]
    MalformedObject(String),

    /// A tree body ended where a 20-byte hash was expected.
    #[error("truncated tree: {0}")]
    TruncatedTree(String),

    /// A digest string is not 40 lowercase or uppercase hex characters.
    #[error("invalid hash: {0}")]
    InvalidHash(String),

    /// The compressed stream could not be inflated.
    #[error("corrupt object: {0}")]
    CorruptObject(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("object not found: {0}")]
    ObjectNotFound(ObjectId),

    #[error("object {oid} is a {found}, not a {expected}")]
    WrongObjectKind {
        oid: ObjectId,
        expected: ObjectType,
        found: ObjectType,
    },

    /// Stat, list or open failure while walking the working tree.
    #[error("filesystem error at {}: {source}", path.display())]
    FilesystemError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::FilesystemError {
            path: path.into(),
            source,
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
