//! Read-side projections of stored objects (`cat-file`, `ls-tree`)

use crate::areas::database::Database;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use crate::errors::StoreResult;
use bytes::Bytes;
use derive_new::new;

/// Which part of a raw object to return
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectView {
    /// `"<type> <size>"`, without the NUL
    Header,
    /// The body only
    Content,
    /// Header, NUL and body, exactly as hashed
    Full,
}

#[derive(new)]
pub struct ObjectReader<'d> {
    database: &'d Database,
}

impl ObjectReader<'_> {
    pub fn cat_raw(&self, oid: &ObjectId, view: ObjectView) -> StoreResult<Bytes> {
        let raw = self.database.load(oid)?;

        Ok(match view {
            ObjectView::Header => Bytes::from(raw.header.display()),
            ObjectView::Content => raw.body(),
            ObjectView::Full => raw.data().clone(),
        })
    }

    pub fn object_type(&self, oid: &ObjectId) -> StoreResult<ObjectType> {
        Ok(self.database.read_header(oid)?.object_type)
    }

    pub fn object_size(&self, oid: &ObjectId) -> StoreResult<usize> {
        Ok(self.database.read_header(oid)?.body_len)
    }

    /// Human-readable content
    ///
    /// Blobs and commits come back verbatim. Trees list one entry per line as
    /// `<6-digit mode> <kind> <hash> <name>`, where the kind is read from the
    /// child object's own header.
    pub fn cat_pretty(&self, oid: &ObjectId) -> StoreResult<Bytes> {
        let raw = self.database.load(oid)?;

        match raw.object_type() {
            ObjectType::Blob | ObjectType::Commit => Ok(raw.body()),
            ObjectType::Tree => {
                let mut output = String::new();
                for entry in Tree::decode_entries(&raw.body())? {
                    let child_type = self.object_type(&entry.oid)?;
                    output.push_str(&entry.display_line(child_type));
                    output.push('\n');
                }
                Ok(Bytes::from(output))
            }
        }
    }

    /// List a tree's entries in on-disk order
    ///
    /// Each line is either the bare name or `<mode> <name> <hash>`.
    pub fn ls_tree(&self, oid: &ObjectId, name_only: bool) -> StoreResult<Vec<String>> {
        let tree = self.database.parse_object_as_tree(oid)?;

        Ok(tree
            .into_entries()
            .map(|entry| {
                if name_only {
                    entry.name
                } else {
                    format!("{} {} {}", entry.mode.as_padded_str(), entry.name, entry.oid)
                }
            })
            .collect())
    }
}
