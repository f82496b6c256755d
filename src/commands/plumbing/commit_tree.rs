use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::{Author, Commit};
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::io::Write;

impl Repository {
    pub fn commit_tree(
        &mut self,
        tree: &str,
        parent: Option<&str>,
        message: &str,
    ) -> anyhow::Result<()> {
        let tree_oid = ObjectId::try_parse(tree)?;
        self.database()
            .parse_object_as_tree(&tree_oid)
            .with_context(|| format!("{} is not a valid tree object", tree_oid))?;

        let parent = parent.map(ObjectId::try_parse).transpose()?;
        if let Some(parent) = &parent {
            self.database()
                .parse_object_as_commit(parent)
                .with_context(|| format!("{} is not a valid commit object", parent))?;
        }

        let author = Author::load_from_env()?;
        let committer = Author::load_committer_from_env(&author)?;

        let mut message = message.to_string();
        if !message.ends_with('\n') {
            message.push('\n');
        }

        let commit = Commit::new(tree_oid, parent, author, committer, message);
        let commit_id = self.database().store(&commit)?;

        writeln!(self.writer(), "{}", commit_id)?;

        Ok(())
    }
}
