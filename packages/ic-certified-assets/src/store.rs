//! The store module contains the state that outlives individual messages.

use crate::index::MetadataIndex;
use crate::CertificationTree;

/// The persistent state of a [CertifiedAssets](crate::CertifiedAssets)
/// instance: the certification tree and the metadata directory over it.
///
/// Canisters keep the store (or the [CertifiedAssets](crate::CertifiedAssets)
/// instance wrapping it) in a `thread_local!` and rebuild their certified
/// endpoints in `init` and `post_upgrade`.
#[derive(Debug, Default)]
pub struct StableStore {
    pub(crate) tree: CertificationTree,
    pub(crate) metadata: MetadataIndex,
}

/// Creates an empty [StableStore].
pub fn init_stable_store() -> StableStore {
    StableStore::default()
}
