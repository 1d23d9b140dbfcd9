//! Loose objects: one zlib-compressed file per object, at `objects/<xx>/<38 hex chars>`.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::*;

use crate::digest::Digest;
use crate::error::{Error, IoContext, Result};
use crate::util;

pub struct LooseStore {
    objects_dir: PathBuf,
}

impl LooseStore {
    pub fn new(objects_dir: impl AsRef<Path>) -> Self {
        Self {
            objects_dir: objects_dir.as_ref().to_owned(),
        }
    }

    pub fn object_path(&self, oid: &Digest) -> PathBuf {
        let (prefix, suffix) = oid.loose_components();
        self.objects_dir.join(prefix).join(suffix)
    }

    pub fn contains(&self, oid: &Digest) -> bool {
        self.object_path(oid).is_file()
    }

    /// Write already-compressed bytes for `oid`.
    ///
    /// Storing an object that already exists is a no-op. The bytes are written to a temporary
    /// file next to their final location and renamed into place, so writers racing on the same
    /// object both succeed and writers of different objects never touch the same file.
    pub fn put(&self, oid: &Digest, compressed: &[u8]) -> Result<()> {
        let (prefix, suffix) = oid.loose_components();
        let dirname = self.objects_dir.join(prefix);
        let object_path = dirname.join(suffix);

        if object_path.exists() {
            trace!(%oid, "Object already stored");
            return Ok(());
        }

        // Many objects share a fan-out directory; finding it already present is fine.
        fs::create_dir_all(&dirname).at_path(&dirname)?;

        let temp_path = dirname.join(util::tmp_file_name());
        let mut file = File::options()
            .write(true)
            .create_new(true)
            .open(&temp_path)
            .at_path(&temp_path)?;
        file.write_all(compressed).at_path(&temp_path)?;
        drop(file);

        if let Err(source) = fs::rename(&temp_path, &object_path) {
            let _ = fs::remove_file(&temp_path);
            return Err(Error::Io {
                path: object_path,
                source,
            });
        }

        trace!(%oid, path = ?object_path, "Wrote loose object");
        Ok(())
    }

    /// Read the compressed bytes stored for `oid`.
    pub fn get(&self, oid: &Digest) -> Result<Vec<u8>> {
        let object_path = self.object_path(oid);
        match fs::read(&object_path) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(Error::NotFound { oid: *oid }),
            Err(source) => Err(Error::Io {
                path: object_path,
                source,
            }),
        }
    }
}
