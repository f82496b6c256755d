//! Length-checked reading over an immutable byte slice
//!
//! Decoders never index into a buffer directly: they advance a cursor that
//! hands out sub-slices and reports `None` instead of reading past the end.

#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        ByteCursor { data, position: 0 }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Everything not consumed yet
    pub fn rest(&self) -> &'a [u8] {
        &self.data[self.position..]
    }

    /// Take exactly `len` bytes
    pub fn take(&mut self, len: usize) -> Option<&'a [u8]> {
        if self.remaining() < len {
            return None;
        }

        let slice = &self.data[self.position..self.position + len];
        self.position += len;
        Some(slice)
    }

    /// Take the bytes up to `delimiter` and step over the delimiter itself
    ///
    /// Leaves the cursor untouched when the delimiter does not occur.
    pub fn take_until(&mut self, delimiter: u8) -> Option<&'a [u8]> {
        let rest = self.rest();
        let offset = rest.iter().position(|&byte| byte == delimiter)?;

        self.position += offset + 1;
        Some(&rest[..offset])
    }
}
