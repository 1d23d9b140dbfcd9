use std::fs;
use std::os::unix::ffi::{OsStrExt, OsStringExt};
use std::path::Path;

use rayon::prelude::*;
use tracing::*;
use walkdir::{DirEntry, WalkDir};

use super::database::Database;
use crate::digest::Digest;
use crate::error::{Error, IoContext, Result};
use crate::filemode::FileMode;
use crate::storable::blob::Blob;
use crate::storable::tree::{Tree, TreeEntry};

/// Snapshots a directory into the object database as a graph of trees and blobs.
pub struct TreeBuilder<'a> {
    database: &'a Database,
    ignored: &'a [&'a str],
}

impl<'a> TreeBuilder<'a> {
    /// `ignored` names are skipped at every depth (the repository's own metadata directory).
    pub fn new(database: &'a Database, ignored: &'a [&'a str]) -> Self {
        Self { database, ignored }
    }

    /// Store every file below `dir` as a blob and every directory as a tree, and return the id
    /// of the tree for `dir` itself.
    ///
    /// A tree can only be hashed once the ids of all its children are known, so subtrees are
    /// finished before their parent. Siblings don't depend on each other and are built in
    /// parallel.
    pub fn build(&self, dir: &Path) -> Result<Digest> {
        trace!(path = ?dir, "Building tree");

        let children = self.list_entries(dir)?;
        let entries = children
            .par_iter()
            .filter_map(|child| self.build_entry(child).transpose())
            .collect::<Result<Vec<_>>>()?;

        let tree = Tree::canonical(entries);
        let oid = self.database.write(&tree)?;
        debug!(path = ?dir, %oid, entries = tree.entries().len(), "Stored tree");
        Ok(oid)
    }

    fn list_entries(&self, dir: &Path) -> Result<Vec<DirEntry>> {
        WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| !self.is_ignored(entry))
            .map(|entry| entry.map_err(|e| walkdir_error(dir, e)))
            .collect()
    }

    fn is_ignored(&self, entry: &DirEntry) -> bool {
        let name = entry.file_name().as_bytes();
        self.ignored.iter().any(|ignored| ignored.as_bytes() == name)
    }

    /// Returns `None` for entries that cannot be represented in a tree.
    fn build_entry(&self, entry: &DirEntry) -> Result<Option<TreeEntry>> {
        let path = entry.path();
        let name = entry.file_name().as_bytes();
        let file_type = entry.file_type();

        let (mode, oid) = if file_type.is_dir() {
            (FileMode::DIRECTORY, self.build(path)?)
        } else if file_type.is_symlink() {
            // Links are stored, not followed: the blob holds the link's target path.
            let target = fs::read_link(path).at_path(path)?;
            let blob = Blob::new(target.into_os_string().into_vec());
            (FileMode::SYMLINK, self.database.write(&blob)?)
        } else if file_type.is_file() {
            let metadata = entry.metadata().map_err(|e| walkdir_error(path, e))?;
            let data = fs::read(path).at_path(path)?;
            let blob = Blob::new(data);
            (FileMode::of_file(&metadata), self.database.write(&blob)?)
        } else {
            warn!(?path, "Skipping special file");
            return Ok(None);
        };

        trace!(?path, %oid, "Stored entry");
        Ok(Some(TreeEntry::new(mode, name, oid)))
    }
}

fn walkdir_error(fallback: &Path, e: walkdir::Error) -> Error {
    let path = e.path().unwrap_or(fallback).to_owned();
    Error::Io {
        path,
        source: e.into(),
    }
}

#[cfg(test)]
mod tests {
    use std::os::unix::fs::{symlink, PermissionsExt};

    use flate2::Compression;
    use pretty_assertions::assert_eq;
    use tempdir::TempDir;

    use super::*;
    use crate::storable::DatabaseObject;

    const IGNORED: &[&str] = &[".git"];

    fn setup() -> Result<(TempDir, TempDir), std::io::Error> {
        Ok((TempDir::new("work")?, TempDir::new("store")?))
    }

    #[test]
    fn test_single_file() -> color_eyre::Result<()> {
        let (work, store) = setup()?;
        let database = Database::new(store.path(), Compression::default());
        fs::write(work.path().join("hello.txt"), "hello\n")?;

        let oid = TreeBuilder::new(&database, IGNORED).build(work.path())?;

        let blob_oid = DatabaseObject::new(&Blob::new(b"hello\n".to_vec())).into_oid();
        let expected = Tree::new(vec![TreeEntry::new(FileMode::REGULAR, "hello.txt", blob_oid)]);
        assert_eq!(oid, DatabaseObject::new(&expected).into_oid());
        assert_eq!(database.load_tree(&oid)?, expected);
        assert_eq!(database.load_blob(&blob_oid)?.into_data(), b"hello\n");

        Ok(())
    }

    #[test]
    fn test_empty_directory() -> color_eyre::Result<()> {
        let (work, store) = setup()?;
        let database = Database::new(store.path(), Compression::default());

        let oid = TreeBuilder::new(&database, IGNORED).build(work.path())?;
        assert_eq!(oid.to_hex(), "4b825dc642cb6eb9a060e54bf8d69288fbee4904");
        Ok(())
    }

    #[test]
    fn test_modes() -> color_eyre::Result<()> {
        let (work, store) = setup()?;
        let database = Database::new(store.path(), Compression::default());

        fs::write(work.path().join("script.sh"), "#!/bin/sh\n")?;
        fs::set_permissions(
            work.path().join("script.sh"),
            fs::Permissions::from_mode(0o755),
        )?;
        fs::write(work.path().join("notes"), "notes\n")?;
        fs::set_permissions(work.path().join("notes"), fs::Permissions::from_mode(0o655))?;
        symlink("notes", work.path().join("link"))?;

        let oid = TreeBuilder::new(&database, IGNORED).build(work.path())?;
        let tree = database.load_tree(&oid)?;

        let modes: Vec<_> = tree
            .entries()
            .iter()
            .map(|e| (e.name().to_string(), e.mode()))
            .collect();
        assert_eq!(
            modes,
            [
                ("link".to_owned(), FileMode::SYMLINK),
                ("notes".to_owned(), FileMode::REGULAR),
                ("script.sh".to_owned(), FileMode::EXECUTABLE),
            ]
        );

        let link = &tree.entries()[0];
        assert_eq!(database.load_blob(link.oid())?.into_data(), b"notes");

        Ok(())
    }

    #[test]
    fn test_ignored_at_every_depth() -> color_eyre::Result<()> {
        let (work, store) = setup()?;
        let database = Database::new(store.path(), Compression::default());

        fs::create_dir_all(work.path().join(".git/objects"))?;
        fs::create_dir_all(work.path().join("sub/.git"))?;
        fs::write(work.path().join("sub/.git/HEAD"), "ref: refs/heads/main\n")?;
        fs::write(work.path().join("sub/file"), "file\n")?;

        let oid = TreeBuilder::new(&database, IGNORED).build(work.path())?;
        let root = database.load_tree(&oid)?;
        let names: Vec<_> = root.names().map(|n| n.to_string()).collect();
        assert_eq!(names, ["sub"]);

        let sub = database.load_tree(root.entries()[0].oid())?;
        let names: Vec<_> = sub.names().map(|n| n.to_string()).collect();
        assert_eq!(names, ["file"]);

        Ok(())
    }
}
