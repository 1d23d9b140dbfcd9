mod init;

use camino::{Utf8Path, Utf8PathBuf};
use flate2::Compression;
use tempdir::TempDir;

use crate::repo::Repo;

/// Write each path (relative to `$root`) with the contents `"<path>-contents\n"`, creating parent
/// directories as needed.
#[macro_export]
macro_rules! create_test_files {
    ($root:expr, [$($path:literal),*]) => {{
        use std::io::Write;
        $({
            let path = $root.join($path);
            std::fs::create_dir_all(path.parent().unwrap())?;
            std::fs::File::create(&path)?
                .write_all($crate::test_file_contents!($path).as_bytes())?;
        })*
    }};
}

#[macro_export]
macro_rules! test_file_contents {
    ($path:literal) => {
        concat!($path, "-contents\n")
    };
}

/// A freshly initialised repository in a temporary directory. Keep the `TempDir` alive for as
/// long as the repo is used.
pub fn init_repo() -> crate::Result<(TempDir, Repo)> {
    let dir = TempDir::new("cairn")?;
    let root = utf8_root(&dir);
    Repo::init(&root)?;
    let repo = Repo::open(root, Compression::default())?;
    Ok((dir, repo))
}

pub fn utf8_root(dir: &TempDir) -> Utf8PathBuf {
    Utf8Path::from_path(dir.path())
        .expect("temporary directories have UTF-8 paths")
        .to_owned()
}
