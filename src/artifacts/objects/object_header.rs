//! The `"<type> <size>\0"` prefix shared by every serialized object

use crate::artifacts::core::byte_cursor::ByteCursor;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{StoreError, StoreResult};
use bytes::{BufMut, Bytes, BytesMut};
use derive_new::new;

#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct ObjectHeader {
    pub object_type: ObjectType,
    /// Declared body length in bytes
    pub body_len: usize,
    /// Offset of the first body byte, just past the NUL
    pub body_offset: usize,
}

impl ObjectHeader {
    /// The `"<type> <len>\0"` prefix for a body of `body_len` bytes
    pub fn prefix(object_type: ObjectType, body_len: usize) -> String {
        format!("{} {}\0", object_type.as_str(), body_len)
    }

    /// Prefix `body` with its header, producing the bytes that get hashed and stored
    pub fn encode(object_type: ObjectType, body: &[u8]) -> Bytes {
        let header = Self::prefix(object_type, body.len());

        let mut object_bytes = BytesMut::with_capacity(header.len() + body.len());
        object_bytes.put_slice(header.as_bytes());
        object_bytes.put_slice(body);

        object_bytes.freeze()
    }

    /// Parse the header at the start of a serialized object
    ///
    /// Validates the type token and the declared length against the size of
    /// `data`.
    pub fn decode(data: &[u8]) -> StoreResult<Self> {
        let header = Self::decode_prefix(data)?;

        let available = data.len() - header.body_offset;
        if header.body_len > available {
            return Err(StoreError::MalformedObject(format!(
                "declared size {} exceeds the {} bytes available",
                header.body_len, available
            )));
        }

        Ok(header)
    }

    /// Parse only the header, without requiring the body to be present
    ///
    /// `data` must reach at least the NUL that ends the header.
    pub fn decode_prefix(data: &[u8]) -> StoreResult<Self> {
        let mut cursor = ByteCursor::new(data);

        let header = cursor
            .take_until(b'\0')
            .ok_or_else(|| StoreError::MalformedObject("missing NUL after header".into()))?;
        let header = std::str::from_utf8(header)
            .map_err(|_| StoreError::MalformedObject("header is not valid UTF-8".into()))?;

        let (object_type, size) = header.split_once(' ').ok_or_else(|| {
            StoreError::MalformedObject(format!("missing size in header {:?}", header))
        })?;
        let object_type = ObjectType::try_from(object_type)?;

        if size.is_empty() || !size.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(StoreError::MalformedObject(format!(
                "invalid object size {:?}",
                size
            )));
        }
        let body_len = size.parse::<usize>().map_err(|_| {
            StoreError::MalformedObject(format!("object size {:?} out of range", size))
        })?;

        Ok(Self::new(object_type, body_len, cursor.position()))
    }

    /// The header text without the trailing NUL, e.g. `blob 6`
    pub fn display(&self) -> String {
        format!("{} {}", self.object_type, self.body_len)
    }

    /// Slice the body out of the serialized object this header was decoded from
    pub fn body<'a>(&self, data: &'a [u8]) -> &'a [u8] {
        &data[self.body_offset..self.body_offset + self.body_len]
    }
}
