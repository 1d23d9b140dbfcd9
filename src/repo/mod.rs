mod commit;
pub mod database;
mod hash_object;
pub mod objects;
mod tree_builder;
mod write_tree;

use std::fs;

use bstr::BString;
use camino::{Utf8Path, Utf8PathBuf};
use flate2::Compression;
use tracing::*;

use database::Database;

use crate::digest::Digest;
use crate::error::{Error, IoContext, Result};
use crate::storable::tree::Tree;
use crate::storable::Object;

pub use tree_builder::TreeBuilder;

pub struct Repo {
    dir: Utf8PathBuf,
    git_dir: Utf8PathBuf,
    pub database: Database,
}

impl Repo {
    /// Name of the metadata directory. It is never included in a snapshot, at any depth.
    pub const METADATA_DIR: &'static str = ".git";

    const HEAD_CONTENTS: &'static str = "ref: refs/heads/main\n";

    /// Create the metadata directory under `path`: `objects/`, `refs/heads/` and a `HEAD`
    /// pointing at `main`. Running it on an existing repository leaves existing files alone.
    pub fn init(path: &Utf8Path) -> Result<()> {
        let git_dir = path.join(Self::METADATA_DIR);
        trace!(path=?git_dir, "Initialising repo");

        if git_dir.join("objects").is_dir() {
            warn!(path=?git_dir, "Repo already exists, only missing files will be created");
        }

        for d in ["objects", "refs/heads"] {
            let dir = git_dir.join(d);
            trace!(path=?dir, "Creating directory");
            fs::create_dir_all(&dir).at_path(&dir)?;
        }

        let head_path = git_dir.join("HEAD");
        if !head_path.exists() {
            fs::write(&head_path, Self::HEAD_CONTENTS).at_path(&head_path)?;
        }

        Ok(())
    }

    /// Open the repository rooted at `path`. New objects are compressed at `compression`.
    pub fn open(path: Utf8PathBuf, compression: Compression) -> Result<Self> {
        let git_dir = path.join(Self::METADATA_DIR);
        if !git_dir.join("objects").is_dir() {
            return Err(Error::NotARepository { path: path.into() });
        }

        let database = Database::new(&git_dir, compression);
        trace!(path=?path, "Opened repo");

        Ok(Self {
            dir: path,
            git_dir,
            database,
        })
    }

    #[cfg(test)]
    pub fn dir(&self) -> &Utf8Path {
        &self.dir
    }

    pub fn git_dir(&self) -> &Utf8Path {
        &self.git_dir
    }

    pub fn read_object(&self, oid: &Digest) -> Result<Object> {
        self.database.load(oid)
    }

    /// The content of the blob `oid`.
    pub fn read_blob(&self, oid: &Digest) -> Result<Vec<u8>> {
        Ok(self.database.load_blob(oid)?.into_data())
    }

    pub fn read_tree(&self, oid: &Digest) -> Result<Tree> {
        self.database.load_tree(oid)
    }

    /// The names of the immediate entries of the tree `oid`, in stored order.
    pub fn list_tree_names(&self, oid: &Digest) -> Result<Vec<BString>> {
        let tree = self.read_tree(oid)?;
        Ok(tree.names().map(ToOwned::to_owned).collect())
    }
}
