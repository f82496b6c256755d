use anyhow::Result;
use bitstore::areas::repository::Repository;
use bitstore::commands::plumbing::cat_file::CatFileMode;
use bitstore::config::Config;
use clap::{Args, Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "bitstore",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A content-addressable object store",
    long_about = "Stores blobs, trees and commits the way git stores loose objects: \
    zlib-compressed, named by the SHA-1 of their contents, under a two-level directory layout.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct CatFileFlags {
    #[arg(short = 't', help = "Show the object type")]
    show_type: bool,
    #[arg(short = 's', help = "Show the object size")]
    show_size: bool,
    #[arg(short = 'p', help = "Pretty-print the object content")]
    pretty: bool,
}

impl CatFileFlags {
    fn mode(&self) -> CatFileMode {
        if self.show_type {
            CatFileMode::Type
        } else if self.show_size {
            CatFileMode::Size
        } else {
            CatFileMode::Pretty
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command initializes a new repository in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<PathBuf>,
    },
    #[command(
        name = "cat-file",
        about = "Print the type, size or content of an object",
        long_about = "This command prints information about an object in the repository. \
        Exactly one of -t, -s or -p must be given."
    )]
    CatFile {
        #[command(flatten)]
        flags: CatFileFlags,
        #[arg(index = 1, help = "The object SHA")]
        sha: String,
    },
    #[command(
        name = "hash-object",
        about = "Hash a file as a blob and optionally write it to the object database"
    )]
    HashObject {
        #[arg(short, long, help = "Write the object to the object database")]
        write: bool,
        #[arg(index = 1)]
        file: PathBuf,
    },
    #[command(name = "ls-tree", about = "List the entries of a tree object")]
    LsTree {
        #[arg(long, help = "List only entry names")]
        name_only: bool,
        #[arg(index = 1, help = "The tree SHA")]
        sha: String,
    },
    #[command(
        name = "write-tree",
        about = "Store the working directory as tree objects and print the root tree SHA"
    )]
    WriteTree {
        #[arg(index = 1, help = "Directory to snapshot (defaults to the repository root)")]
        path: Option<PathBuf>,
    },
    #[command(name = "commit-tree", about = "Create a commit object for a tree")]
    CommitTree {
        #[arg(index = 1, help = "The tree SHA")]
        tree: String,
        #[arg(short, long, help = "The parent commit SHA")]
        parent: Option<String>,
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load_from_env()?;
    let pwd = std::env::current_dir()?;
    let stdout = Box::new(std::io::stdout());

    let mut repository = match &cli.command {
        Commands::Init { path } => {
            let path = path.as_ref().map_or_else(|| pwd.clone(), |path| pwd.join(path));
            Repository::new(&path, config, stdout)?
        }
        // hashing without writing needs no repository
        Commands::HashObject { write: false, .. } => Repository::new(&pwd, config, stdout)?,
        _ => Repository::discover(&pwd, config, stdout)?,
    };

    match &cli.command {
        Commands::Init { .. } => repository.init()?,
        Commands::CatFile { flags, sha } => repository.cat_file(sha, flags.mode())?,
        Commands::HashObject { write, file } => repository.hash_object(&pwd.join(file), *write)?,
        Commands::LsTree { name_only, sha } => repository.ls_tree(sha, *name_only)?,
        Commands::WriteTree { path } => {
            let path = path.as_ref().map(|path| pwd.join(path));
            repository.write_tree(path.as_deref())?
        }
        Commands::CommitTree {
            tree,
            parent,
            message,
        } => repository.commit_tree(tree, parent.as_deref(), message)?,
    }

    repository.writer().flush()?;

    Ok(())
}
