//! Object types and their canonical encoding
//!
//! Every object is stored as `<type> <size>\0<content>` and identified by the
//! SHA-1 digest of exactly those bytes. There are three kinds:
//!
//! - **Blob**: File content (raw bytes)
//! - **Tree**: Directory listing (names, modes, and object IDs)
//! - **Commit**: Snapshot with metadata (author, message, parent commit, tree)

pub mod blob;
pub mod commit;
pub mod entry_mode;
pub mod object;
pub mod object_header;
pub mod object_id;
pub mod object_type;
pub mod tree;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of a SHA-1 hash in raw bytes
pub const OBJECT_ID_BYTES: usize = 20;
