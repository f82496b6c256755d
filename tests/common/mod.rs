#![allow(dead_code)]

pub mod command;
pub mod file;

/// Blob hashes of the files written by `init_repository_dir`
pub const ONE_TXT_OID: &str = "43dd47ea691c90a5fa7827892c70241913351963";
pub const TWO_TXT_OID: &str = "64c5e5885a4b06010b3a0c20edb7900dd0311025";
pub const THREE_TXT_OID: &str = "1d19714ffbc272ba0da6eb419d66123c20527174";

/// Tree hashes of the same layout: `a/b`, `a`, and the root
pub const B_TREE_OID: &str = "d864f7793fd2952c217c27d3780442f8943c8663";
pub const A_TREE_OID: &str = "202bc192d34beb85d0301ec8c8940cd0252cc48a";
pub const ROOT_TREE_OID: &str = "88484bd9e7919fa9b7dfeb008fb8f6c85743d171";

/// Count the loose object files stored under `<dir>/.git/objects`
pub fn count_objects(dir: &std::path::Path) -> usize {
    walkdir::WalkDir::new(dir.join(".git").join("objects"))
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .count()
}
