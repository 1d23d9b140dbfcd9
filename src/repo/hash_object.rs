use std::fs;

use camino::Utf8Path;
use tracing::trace;

use crate::digest::Digest;
use crate::error::{IoContext, Result};
use crate::storable::blob::Blob;
use crate::storable::DatabaseObject;

impl super::Repo {
    /// Compute the blob id of the file at `path`. With `write`, the blob is also stored.
    ///
    /// Relative paths are resolved against the repository root.
    pub fn hash_file(&self, path: &Utf8Path, write: bool) -> Result<Digest> {
        let abs_path = self.dir.join(path);
        trace!(path=?abs_path, write, "Hashing file");

        let data = fs::read(&abs_path).at_path(&abs_path)?;
        let blob = Blob::new(data);
        let blob = DatabaseObject::new(&blob);

        if write {
            self.database.store(&blob)?;
        }

        Ok(blob.into_oid())
    }
}
