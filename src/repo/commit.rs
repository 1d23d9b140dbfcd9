use tracing::debug;

use crate::digest::Digest;
use crate::error::Result;
use crate::storable::commit::Commit;
use crate::storable::DatabaseObject;

impl super::Repo {
    /// Store a commit pointing at `tree_id` with the given parents, in order.
    ///
    /// Neither the tree nor the parents need to exist in the database.
    pub fn commit_tree(
        &self,
        tree_id: Digest,
        parents: Vec<Digest>,
        message: &str,
    ) -> Result<Digest> {
        let commit = Commit::new(tree_id, parents, message.to_owned());
        let commit = DatabaseObject::new(&commit);

        self.database.store(&commit)?;
        debug!(oid = %commit.oid().short(), tree = %tree_id.short(), "Created commit");

        Ok(commit.into_oid())
    }
}
