use std::path::Path;

use flate2::Compression;
use tracing::*;

use super::objects::LooseStore;
use crate::compress;
use crate::digest::Digest;
use crate::error::{Error, IoContext, Result};
use crate::storable::blob::Blob;
use crate::storable::tree::Tree;
use crate::storable::{DatabaseObject, Object, ObjectKind, Storable};

/// The object database: serializes, names, compresses and stores objects, and reverses that on
/// the way out.
pub struct Database {
    store: LooseStore,
    compression: Compression,
}

impl Database {
    pub fn new(git_dir: impl AsRef<Path>, compression: Compression) -> Self {
        Self {
            store: LooseStore::new(git_dir.as_ref().join("objects")),
            compression,
        }
    }

    pub fn store<T: Storable + ?Sized>(&self, obj: &DatabaseObject<T>) -> Result<()> {
        trace!(oid = %obj.oid(), kind = %obj.kind(), "Writing object to database");

        if self.store.contains(obj.oid()) {
            return Ok(());
        }

        let compressed = compress::compress(obj.formatted(), self.compression)
            .at_path(self.store.object_path(obj.oid()))?;
        self.store.put(obj.oid(), &compressed)
    }

    /// Store `obj` and return its id.
    pub fn write<T: Storable + ?Sized>(&self, obj: &T) -> Result<Digest> {
        let obj = DatabaseObject::new(obj);
        self.store(&obj)?;
        Ok(obj.into_oid())
    }

    pub fn exists(&self, oid: &Digest) -> bool {
        self.store.contains(oid)
    }

    /// Read and decompress an object, returning its formatted bytes (header included).
    pub fn read_to_vec(&self, oid: &Digest) -> Result<Vec<u8>> {
        trace!(object = %oid, "Reading object from database");

        let compressed = self.store.get(oid)?;
        compress::decompress(&compressed).map_err(|source| Error::CorruptStream {
            oid: *oid,
            source,
        })
    }

    pub fn load(&self, oid: &Digest) -> Result<Object> {
        let bytes = self.read_to_vec(oid)?;
        Object::parse(&bytes).map_err(|source| Error::Malformed { oid: *oid, source })
    }

    pub fn load_blob(&self, oid: &Digest) -> Result<Blob> {
        let object = self.load(oid)?;
        let actual = object.kind();
        object.into_blob().ok_or(Error::UnexpectedKind {
            oid: *oid,
            expected: ObjectKind::Blob,
            actual,
        })
    }

    pub fn load_tree(&self, oid: &Digest) -> Result<Tree> {
        let object = self.load(oid)?;
        let actual = object.kind();
        object.into_tree().ok_or(Error::UnexpectedKind {
            oid: *oid,
            expected: ObjectKind::Tree,
            actual,
        })
    }
}
