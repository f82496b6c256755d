use crate::areas::database::Database;
use crate::areas::workspace::Workspace;
use crate::config::Config;
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::path::{Path, PathBuf};

pub struct Repository {
    path: Box<Path>,
    config: Config,
    writer: RefCell<Box<dyn std::io::Write>>,
    database: Database,
    workspace: Workspace,
}

impl Repository {
    /// Open the repository rooted at `path`, which need not be initialized yet
    pub fn new(path: &Path, config: Config, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        if !path.exists() {
            std::fs::create_dir_all(path)
                .with_context(|| format!("Unable to create directory {}", path.display()))?;
        }
        let path = path
            .canonicalize()
            .with_context(|| format!("Unable to resolve {}", path.display()))?;

        let git_path = path.join(&config.git_dir);
        let database = Database::new(
            git_path.join("objects").into_boxed_path(),
            config.compressor(),
        );
        let workspace = Workspace::new(path.clone().into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            config,
            writer: RefCell::new(writer),
            database,
            workspace,
        })
    }

    /// Open the repository containing `start`, walking up to find it
    pub fn discover(start: &Path, config: Config, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let root = locate_repository_root(start, &config.git_dir)?;
        Self::new(&root, config, writer)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn git_path(&self) -> PathBuf {
        self.path.join(&self.config.git_dir)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }
}

/// Find the closest ancestor of `start` (inclusive) that contains `git_dir`
pub fn locate_repository_root(start: &Path, git_dir: &str) -> anyhow::Result<PathBuf> {
    let start = start
        .canonicalize()
        .with_context(|| format!("Unable to resolve {}", start.display()))?;

    start
        .ancestors()
        .find(|dir| dir.join(git_dir).is_dir())
        .map(Path::to_path_buf)
        .with_context(|| {
            format!(
                "not a git repository (or any of the parent directories): {}",
                git_dir
            )
        })
}
