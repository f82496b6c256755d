use crate::areas::repository::Repository;
use crate::artifacts::inspect::ObjectReader;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::io::Write;

/// What `cat-file` reports about an object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatFileMode {
    Type,
    Size,
    Pretty,
}

impl Repository {
    pub fn cat_file(&mut self, object_id: &str, mode: CatFileMode) -> anyhow::Result<()> {
        let oid = ObjectId::try_parse(object_id)?;
        let reader = ObjectReader::new(self.database());

        match mode {
            CatFileMode::Type => {
                let object_type = reader.object_type(&oid)?;
                writeln!(self.writer(), "{}", object_type)?;
            }
            CatFileMode::Size => {
                let size = reader.object_size(&oid)?;
                writeln!(self.writer(), "{}", size)?;
            }
            CatFileMode::Pretty => {
                let content = reader
                    .cat_pretty(&oid)
                    .with_context(|| format!("Unable to read object {}", oid))?;
                self.writer().write_all(&content)?;
            }
        }

        Ok(())
    }
}
