use std::fs;

use flate2::Compression;
use pretty_assertions::assert_eq;
use tempdir::TempDir;

use super::utf8_root;
use crate::error::Error;
use crate::repo::Repo;
use crate::Result;

#[test]
fn cairn_init() -> Result<()> {
    let dir = TempDir::new("")?;
    let root = utf8_root(&dir);
    Repo::init(&root)?;

    let git_dir = root.join(".git");
    assert!(git_dir.is_dir());
    assert!(git_dir.join("objects").is_dir());
    assert!(git_dir.join("refs").is_dir());
    assert!(git_dir.join("refs/heads").is_dir());
    assert_eq!(
        fs::read_to_string(git_dir.join("HEAD"))?,
        "ref: refs/heads/main\n"
    );

    let repo = Repo::open(root.clone(), Compression::default())?;
    assert_eq!(repo.dir(), root);
    assert_eq!(repo.git_dir(), git_dir);

    Ok(())
}

#[test]
/// Running init on an existing repository must not clobber what is already there.
fn cairn_init_twice() -> Result<()> {
    let dir = TempDir::new("")?;
    let root = utf8_root(&dir);
    Repo::init(&root)?;

    let repo = Repo::open(root.clone(), Compression::default())?;
    let oid = repo.commit_tree(repo.write_tree()?, vec![], "first")?;

    fs::write(root.join(".git/HEAD"), "ref: refs/heads/other\n")?;
    Repo::init(&root)?;

    assert_eq!(
        fs::read_to_string(root.join(".git/HEAD"))?,
        "ref: refs/heads/other\n"
    );
    assert!(repo.database.exists(&oid));

    Ok(())
}

#[test]
fn open_without_init() -> Result<()> {
    let dir = TempDir::new("")?;
    let root = utf8_root(&dir);

    assert!(matches!(
        Repo::open(root, Compression::default()),
        Err(Error::NotARepository { .. })
    ));
    Ok(())
}
