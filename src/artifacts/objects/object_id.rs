//! Object identifier (SHA-1 digest)
//!
//! Every object is identified by the SHA-1 digest of its full serialized
//! form, header included. The digest is kept as 20 raw bytes and rendered as
//! 40 lowercase hex characters.
//!
//! ## Storage
//!
//! Objects are stored in `objects/<first-2-chars>/<remaining-38-chars>`

use crate::artifacts::core::byte_cursor::ByteCursor;
use crate::artifacts::objects::object_header::ObjectHeader;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::{OBJECT_ID_BYTES, OBJECT_ID_LENGTH};
use crate::errors::{StoreError, StoreResult};
use bytes::BufMut;
use sha1::{Digest, Sha1};
use std::path::PathBuf;
use std::str::FromStr;

/// 160-bit content digest of a serialized object
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ObjectId([u8; OBJECT_ID_BYTES]);

impl ObjectId {
    /// Hash the complete serialized object (`"<type> <len>\0<body>"`)
    pub fn hash_of(serialized: &[u8]) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(serialized);
        let digest = hasher.finalize();

        let mut bytes = [0u8; OBJECT_ID_BYTES];
        bytes.copy_from_slice(&digest);
        Self(bytes)
    }

    /// Hash an object from its kind and body, without joining header and body
    pub fn for_object(object_type: ObjectType, body: &[u8]) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(ObjectHeader::prefix(object_type, body.len()));
        hasher.update(body);
        let digest = hasher.finalize();

        let mut bytes = [0u8; OBJECT_ID_BYTES];
        bytes.copy_from_slice(&digest);
        Self(bytes)
    }

    /// Parse and validate an object ID from its hex form
    ///
    /// # Arguments
    ///
    /// * `id` - 40-character hexadecimal string
    ///
    /// # Returns
    ///
    /// Validated ObjectId, or `InvalidHash` on a wrong length or a non-hex character
    pub fn try_parse(id: &str) -> StoreResult<Self> {
        if id.len() != OBJECT_ID_LENGTH {
            return Err(StoreError::InvalidHash(format!(
                "expected {} hex characters, got {} in {:?}",
                OBJECT_ID_LENGTH,
                id.len(),
                id
            )));
        }

        let mut bytes = [0u8; OBJECT_ID_BYTES];
        hex::decode_to_slice(id, &mut bytes)
            .map_err(|_| StoreError::InvalidHash(format!("non-hex characters in {:?}", id)))?;

        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; OBJECT_ID_BYTES] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Write the object ID in binary form (20 bytes), as tree entries store it
    pub fn write_h40_to(&self, buffer: &mut impl BufMut) {
        buffer.put_slice(&self.0);
    }

    /// Read a binary object ID (20 bytes) from the cursor
    ///
    /// Returns `None` when fewer than 20 bytes remain.
    pub fn read_h40_from(cursor: &mut ByteCursor<'_>) -> Option<Self> {
        let raw = cursor.take(OBJECT_ID_BYTES)?;
        let mut bytes = [0u8; OBJECT_ID_BYTES];
        bytes.copy_from_slice(raw);

        Some(Self(bytes))
    }

    /// Convert to the relative storage path
    ///
    /// Splits the hash as `XX/YYYYYY...` where XX is the first 2 chars.
    /// For example, `abc123...` becomes `ab/c123...`
    pub fn to_path(&self) -> PathBuf {
        let hex = self.to_hex();
        let (dir, file) = hex.split_at(2);
        PathBuf::from(dir).join(file)
    }
}

impl FromStr for ObjectId {
    type Err = StoreError;

    fn from_str(s: &str) -> StoreResult<Self> {
        Self::try_parse(s)
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl std::fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ObjectId({})", self.to_hex())
    }
}
