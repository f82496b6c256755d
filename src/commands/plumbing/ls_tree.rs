use crate::areas::repository::Repository;
use crate::artifacts::inspect::ObjectReader;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    pub fn ls_tree(&mut self, object_id: &str, name_only: bool) -> anyhow::Result<()> {
        let oid = ObjectId::try_parse(object_id)?;
        let lines = ObjectReader::new(self.database()).ls_tree(&oid, name_only)?;

        let mut writer = self.writer();
        for line in lines {
            writeln!(writer, "{}", line)?;
        }

        Ok(())
    }
}
