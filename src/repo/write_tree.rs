use camino::Utf8Path;
use tracing::trace;

use super::TreeBuilder;
use crate::digest::Digest;
use crate::error::Result;

impl super::Repo {
    /// Snapshot the whole working directory and return the root tree id.
    pub fn write_tree(&self) -> Result<Digest> {
        self.write_tree_at(&self.dir)
    }

    /// Snapshot `path` (relative paths are resolved against the repository root).
    pub fn write_tree_at(&self, path: &Utf8Path) -> Result<Digest> {
        let path = self.dir.join(path);
        trace!(?path, "Writing tree");

        TreeBuilder::new(&self.database, &[Self::METADATA_DIR]).build(path.as_std_path())
    }
}
