use crate::areas::repository::Repository;
use crate::artifacts::tree_builder::TreeBuilder;
use anyhow::Context;
use std::io::Write;
use std::path::Path;

impl Repository {
    /// Snapshot `root` (the repository root by default) and print the tree hash
    pub fn write_tree(&mut self, root: Option<&Path>) -> anyhow::Result<()> {
        let root = root.unwrap_or(self.path()).to_path_buf();

        let report = TreeBuilder::new(self.workspace(), self.database(), &self.config().git_dir)
            .build(&root)
            .with_context(|| format!("Unable to write tree for {}", root.display()))?;

        tracing::info!(
            trees = report.trees,
            blobs = report.blobs,
            written = report.written,
            "wrote tree"
        );
        writeln!(self.writer(), "{}", report.root)?;

        Ok(())
    }
}
