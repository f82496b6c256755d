use crate::artifacts::database::compression::Compressor;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_header::ObjectHeader;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use crate::errors::{StoreError, StoreResult};
use bytes::Bytes;
use fake::rand;
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

/// Longest header accepted: `"commit "` plus a 20-digit size and the NUL
const MAX_HEADER_LEN: usize = 32;

/// A decompressed object: its parsed header plus the full serialized bytes
#[derive(Debug, Clone)]
pub struct RawObject {
    pub header: ObjectHeader,
    data: Bytes,
}

impl RawObject {
    pub fn object_type(&self) -> ObjectType {
        self.header.object_type
    }

    /// Header and body exactly as hashed
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    pub fn body(&self) -> Bytes {
        self.data
            .slice(self.header.body_offset..self.header.body_offset + self.header.body_len)
    }
}

/// Outcome of a write: the digest and whether a new file was created
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stored {
    pub oid: ObjectId,
    pub written: bool,
}

/// Loose object storage under `<git-dir>/objects/xx/yyyy...`
#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
    compressor: Compressor,
}

// TODO: implement packfiles for better performance and storage efficiency
impl Database {
    pub fn new(path: Box<Path>, compressor: Compressor) -> Self {
        Database { path, compressor }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    pub fn object_path(&self, object_id: &ObjectId) -> PathBuf {
        self.path.join(object_id.to_path())
    }

    pub fn exists(&self, object_id: &ObjectId) -> bool {
        self.object_path(object_id).is_file()
    }

    /// Encode, hash and persist an object body of the given kind
    pub fn put(&self, object_type: ObjectType, body: &[u8]) -> StoreResult<ObjectId> {
        Ok(self.put_object(object_type, body)?.oid)
    }

    pub fn store(&self, object: &impl Object) -> StoreResult<ObjectId> {
        self.put(object.object_type(), &object.body())
    }

    /// Like [`Database::put`], also reporting whether the object was new
    ///
    /// Writing a digest that already exists is a no-op.
    pub fn put_object(&self, object_type: ObjectType, body: &[u8]) -> StoreResult<Stored> {
        let header = ObjectHeader::prefix(object_type, body.len());
        let oid = ObjectId::for_object(object_type, body);
        let object_path = self.object_path(&oid);

        if object_path.exists() {
            tracing::trace!(%oid, %object_type, "object already stored");
            return Ok(Stored {
                oid,
                written: false,
            });
        }

        let object_dir = object_path.parent().ok_or_else(|| {
            StoreError::Io(std::io::Error::new(
                ErrorKind::InvalidInput,
                format!("invalid object path {}", object_path.display()),
            ))
        })?;
        std::fs::create_dir_all(object_dir)?;

        self.write_object(object_dir, &object_path, header.as_bytes().chain(body))?;
        tracing::debug!(%oid, %object_type, size = body.len(), "stored object");

        Ok(Stored { oid, written: true })
    }

    /// Decompress an object and parse its header
    pub fn load(&self, object_id: &ObjectId) -> StoreResult<RawObject> {
        let file = self.open_object(object_id)?;

        let mut data = Vec::new();
        self.compressor
            .decompress(BufReader::new(file), &mut data)
            .inspect_err(|err| tracing::warn!(oid = %object_id, "failed to read object: {}", err))?;

        let data = Bytes::from(data);
        let header = ObjectHeader::decode(&data)?;

        Ok(RawObject { header, data })
    }

    /// Parse an object's header, inflating no further than its NUL
    pub fn read_header(&self, object_id: &ObjectId) -> StoreResult<ObjectHeader> {
        let file = self.open_object(object_id)?;

        let prefix = self
            .compressor
            .decompress_until(BufReader::new(file), b'\0', MAX_HEADER_LEN)
            .inspect_err(|err| tracing::warn!(oid = %object_id, "failed to read header: {}", err))?;

        ObjectHeader::decode_prefix(&prefix)
    }

    fn open_object(&self, object_id: &ObjectId) -> StoreResult<File> {
        match File::open(self.object_path(object_id)) {
            Ok(file) => Ok(file),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Err(StoreError::ObjectNotFound(*object_id))
            }
            Err(err) => Err(StoreError::Io(err)),
        }
    }

    pub fn parse_object_as_tree(&self, object_id: &ObjectId) -> StoreResult<Tree> {
        let body = self.load_expecting(object_id, ObjectType::Tree)?;
        Tree::deserialize(&body)
    }

    pub fn parse_object_as_commit(&self, object_id: &ObjectId) -> StoreResult<Commit> {
        let body = self.load_expecting(object_id, ObjectType::Commit)?;
        Commit::deserialize(&body)
    }

    fn load_expecting(&self, object_id: &ObjectId, expected: ObjectType) -> StoreResult<Bytes> {
        let raw = self.load(object_id)?;

        if raw.object_type() != expected {
            return Err(StoreError::WrongObjectKind {
                oid: *object_id,
                expected,
                found: raw.object_type(),
            });
        }

        Ok(raw.body())
    }

    fn write_object(
        &self,
        object_dir: &Path,
        object_path: &Path,
        object_content: impl Read,
    ) -> StoreResult<()> {
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let result = self.write_temp_object(&temp_object_path, object_content);
        let result = result.and_then(|()| {
            // rename the temp file to the object file to make it atomic
            std::fs::rename(&temp_object_path, object_path).map_err(StoreError::from)
        });

        if result.is_err() {
            let _ = std::fs::remove_file(&temp_object_path);
        }

        result
    }

    fn write_temp_object(
        &self,
        temp_object_path: &Path,
        object_content: impl Read,
    ) -> StoreResult<()> {
        let file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(temp_object_path)?;

        let mut writer = BufWriter::new(file);
        self.compressor.compress(object_content, &mut writer)?;

        writer
            .into_inner()
            .map_err(|err| StoreError::Io(err.into_error()))?
            .sync_all()?;

        Ok(())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}
