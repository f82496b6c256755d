//! Runtime configuration
//!
//! A single [`Config`] value is built at startup and passed by reference to
//! the repository and every command; nothing here is global state.

use crate::artifacts::database::compression::{Compressor, DEFAULT_CHUNK_SIZE};
use anyhow::Context;
use flate2::Compression;

/// Name of the metadata directory at the repository root
pub const DEFAULT_GIT_DIR: &str = ".git";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Metadata directory name, also excluded from tree snapshots
    pub git_dir: String,
    /// zlib level, 0-9
    pub compression_level: u32,
    /// Chunk size used when streaming objects through zlib
    pub chunk_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            git_dir: DEFAULT_GIT_DIR.to_string(),
            compression_level: Compression::default().level(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl Config {
    /// Read overrides from BIT_DIR, BIT_COMPRESSION_LEVEL and BIT_CHUNK_SIZE
    pub fn load_from_env() -> anyhow::Result<Self> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    fn load_with(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut config = Config::default();

        if let Some(git_dir) = lookup("BIT_DIR") {
            if matches!(git_dir.as_str(), "" | "." | "..") || git_dir.contains(['/', '\\']) {
                anyhow::bail!("BIT_DIR must be a plain directory name, got {:?}", git_dir);
            }
            config.git_dir = git_dir;
        }

        if let Some(level) = lookup("BIT_COMPRESSION_LEVEL") {
            let level = level
                .parse::<u32>()
                .with_context(|| format!("Invalid BIT_COMPRESSION_LEVEL: {}", level))?;
            if level > 9 {
                anyhow::bail!("BIT_COMPRESSION_LEVEL must be between 0 and 9, got {}", level);
            }
            config.compression_level = level;
        }

        if let Some(chunk_size) = lookup("BIT_CHUNK_SIZE") {
            let chunk_size = chunk_size
                .parse::<usize>()
                .with_context(|| format!("Invalid BIT_CHUNK_SIZE: {}", chunk_size))?;
            if chunk_size == 0 {
                anyhow::bail!("BIT_CHUNK_SIZE must be positive");
            }
            config.chunk_size = chunk_size;
        }

        Ok(config)
    }

    pub fn compressor(&self) -> Compressor {
        Compressor::new(Compression::new(self.compression_level), self.chunk_size)
    }
}
