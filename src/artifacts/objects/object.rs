use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_header::ObjectHeader;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use crate::errors::StoreResult;
use bytes::Bytes;

pub trait Packable {
    /// Kind-specific body, without the `"<type> <size>\0"` header
    fn body(&self) -> Bytes;
}

pub trait Unpackable {
    /// Rebuild the object from a body whose header has already been consumed
    fn deserialize(body: &[u8]) -> StoreResult<Self>
    where
        Self: Sized;
}

pub trait Object: Packable {
    fn object_type(&self) -> ObjectType;

    fn display(&self) -> String;

    /// Full serialized form: header followed by body
    fn serialize(&self) -> Bytes {
        ObjectHeader::encode(self.object_type(), &self.body())
    }

    fn object_id(&self) -> ObjectId {
        ObjectId::for_object(self.object_type(), &self.body())
    }
}

/// Any decoded object, tagged by kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectBox {
    Blob(Box<Blob>),
    Tree(Box<Tree>),
    Commit(Box<Commit>),
}

impl ObjectBox {
    /// Decode a complete serialized object, dispatching once on its type tag
    pub fn decode(serialized: &[u8]) -> StoreResult<Self> {
        let header = ObjectHeader::decode(serialized)?;
        Self::from_body(header.object_type, header.body(serialized))
    }

    pub fn from_body(object_type: ObjectType, body: &[u8]) -> StoreResult<Self> {
        match object_type {
            ObjectType::Blob => Ok(ObjectBox::Blob(Box::new(Blob::deserialize(body)?))),
            ObjectType::Tree => Ok(ObjectBox::Tree(Box::new(Tree::deserialize(body)?))),
            ObjectType::Commit => Ok(ObjectBox::Commit(Box::new(Commit::deserialize(body)?))),
        }
    }
}
