use crate::areas::repository::Repository;
use anyhow::Context;
use std::fs;
use std::io::Write;

const DEFAULT_BRANCH: &str = "main";

impl Repository {
    pub fn init(&mut self) -> anyhow::Result<()> {
        let git_path = self.git_path();

        fs::create_dir_all(self.database().objects_path())
            .with_context(|| format!("Failed to create {}/objects directory", git_path.display()))?;

        fs::create_dir_all(git_path.join("refs").join("heads"))
            .with_context(|| format!("Failed to create {}/refs directory", git_path.display()))?;

        let head_path = git_path.join("HEAD");
        if !head_path.exists() {
            fs::write(&head_path, format!("ref: refs/heads/{}\n", DEFAULT_BRANCH))
                .context("Failed to create initial HEAD reference")?;
        }

        writeln!(
            self.writer(),
            "Initialized git directory at {}",
            self.path().display()
        )?;

        Ok(())
    }
}
