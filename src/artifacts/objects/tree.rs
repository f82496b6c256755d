//! Tree object
//!
//! Trees represent directory snapshots. They contain entries for files
//! (blobs) and subdirectories (other trees), along with their names and modes.
//!
//! ## Format
//!
//! On disk: `tree <size>\0<entries>`
//! Each entry: `<mode> <name>\0<20-byte-sha1>`
//!
//! Entries are kept in the order they were given or decoded. Builders that
//! want reproducible hashes sort them with [`TreeEntry::sort_key`] first.

use crate::artifacts::core::byte_cursor::ByteCursor;
use crate::artifacts::objects::entry_mode::EntryMode;
use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{StoreError, StoreResult};
use bytes::{BufMut, Bytes, BytesMut};
use derive_new::new;

/// One child of a directory snapshot
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct TreeEntry {
    pub mode: EntryMode,
    pub name: String,
    pub oid: ObjectId,
}

impl TreeEntry {
    /// Append `"<mode> <name>\0<20 raw hash bytes>"` to a tree body
    pub fn write_to(&self, buffer: &mut impl BufMut) {
        buffer.put_slice(self.mode.as_str().as_bytes());
        buffer.put_u8(b' ');
        buffer.put_slice(self.name.as_bytes());
        buffer.put_u8(0);
        self.oid.write_h40_to(buffer);
    }

    /// One listing line: `<6-digit mode> <kind> <hash> <name>`
    pub fn display_line(&self, kind: ObjectType) -> String {
        format!(
            "{} {} {} {}",
            self.mode.as_padded_str(),
            kind,
            self.oid,
            self.name
        )
    }

    /// Ordering key matching git: directories compare as if suffixed with `/`
    pub fn sort_key(name: &str, mode: EntryMode) -> Vec<u8> {
        let mut key = name.as_bytes().to_vec();
        if mode.is_tree() {
            key.push(b'/');
        }
        key
    }

    fn read_from(cursor: &mut ByteCursor<'_>) -> StoreResult<Self> {
        let entry_offset = cursor.position();

        let mode = cursor.take_until(b' ').ok_or_else(|| {
            StoreError::MalformedObject(format!("missing mode at offset {}", entry_offset))
        })?;
        let mode = std::str::from_utf8(mode)
            .map_err(|_| StoreError::MalformedObject("entry mode is not ASCII".into()))?;
        let mode = EntryMode::from_octal_str(mode)?;

        let name = cursor.take_until(b'\0').ok_or_else(|| {
            StoreError::MalformedObject(format!(
                "missing NUL after entry name at offset {}",
                entry_offset
            ))
        })?;
        let name = std::str::from_utf8(name)
            .map_err(|_| StoreError::MalformedObject("entry name is not valid UTF-8".into()))?;
        if name.is_empty() || name.contains('/') {
            return Err(StoreError::MalformedObject(format!(
                "invalid entry name {:?}",
                name
            )));
        }

        let oid = ObjectId::read_h40_from(cursor).ok_or_else(|| {
            StoreError::TruncatedTree(format!(
                "entry {:?} has only {} of 20 hash bytes",
                name,
                cursor.remaining()
            ))
        })?;

        Ok(Self::new(mode, name.to_string(), oid))
    }
}

/// Directory snapshot: an ordered sequence of entries
#[derive(Debug, Clone, Default, PartialEq, Eq, new)]
pub struct Tree {
    entries: Vec<TreeEntry>,
}

impl Tree {
    pub fn entries(&self) -> impl Iterator<Item = &TreeEntry> {
        self.entries.iter()
    }

    pub fn into_entries(self) -> impl Iterator<Item = TreeEntry> {
        self.entries.into_iter()
    }

    /// Parse a tree body into entries, in on-disk order
    pub fn decode_entries(body: &[u8]) -> StoreResult<Vec<TreeEntry>> {
        let mut cursor = ByteCursor::new(body);
        let mut entries = Vec::new();

        while !cursor.is_empty() {
            entries.push(TreeEntry::read_from(&mut cursor)?);
        }

        Ok(entries)
    }
}

impl Packable for Tree {
    fn body(&self) -> Bytes {
        let mut body = BytesMut::new();
        for entry in &self.entries {
            entry.write_to(&mut body);
        }

        body.freeze()
    }
}

impl Unpackable for Tree {
    fn deserialize(body: &[u8]) -> StoreResult<Self> {
        Ok(Self::new(Self::decode_entries(body)?))
    }
}

impl Object for Tree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }

    fn display(&self) -> String {
        self.entries
            .iter()
            .map(|entry| entry.display_line(entry.mode.object_type()))
            .collect::<Vec<String>>()
            .join("\n")
    }
}
