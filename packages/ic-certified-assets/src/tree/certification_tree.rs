use crate::utils::cbor_encode;
use crate::Hash;
use ic_certification::{hash_tree::pruned, merge_hash_trees, AsHashTree, HashTree, NestedTree};

/// A single label on a path into the certification tree.
pub type TreePathSegment = Vec<u8>;

/// A full path into the certification tree.
pub type TreePath = Vec<TreePathSegment>;

pub(crate) const EXPR_PATH_PREFIX: &str = "http_expr";
pub(crate) const ASSETS_PATH_PREFIX: &str = "http_assets";

pub(crate) const EXACT_PATH_TERMINATOR: &str = "<$>";
pub(crate) const WILDCARD_PATH_TERMINATOR: &str = "<*>";

/// Returns the legacy v1 tree path for a URL: `["http_assets", url]`.
pub(crate) fn assets_tree_path(url: &str) -> TreePath {
    vec![
        ASSETS_PATH_PREFIX.as_bytes().to_vec(),
        url.as_bytes().to_vec(),
    ]
}

/// Encodes a witness as self-describing CBOR, following the certificate
/// encoding of the HTTP gateway protocol.
pub fn encode_witness(witness: &HashTree) -> Vec<u8> {
    cbor_encode(witness)
}

/// A certification tree for the HTTP exchanges served by a canister.
///
/// Two subtrees coexist under distinct top labels: `"http_assets"` binds each
/// URL to its response body hash (legacy v1 certification), and `"http_expr"`
/// holds one path per certified exchange, terminated by the expression,
/// request and response hashes (v2 certification). The root hash over both
/// subtrees is the canister's single certified value.
#[derive(Debug, Clone, Default)]
pub struct CertificationTree {
    tree: NestedTree<TreePathSegment, Vec<u8>>,
}

impl CertificationTree {
    /// Returns the root hash of the tree.
    /// This hash is the value the canister installs as its certified data.
    pub fn root_hash(&self) -> Hash {
        self.tree.root_hash()
    }

    /// Inserts or overwrites the leaf at the given path.
    pub fn put(&mut self, path: &[TreePathSegment], value: Vec<u8>) {
        self.tree.insert(path, value);
    }

    /// Removes the leaf at the given path, pruning parent nodes left empty.
    pub fn delete(&mut self, path: &[TreePathSegment]) {
        self.tree.delete(path);
    }

    /// Returns true if a leaf or a subtree exists at the given path.
    pub fn contains_path(&self, path: &[TreePathSegment]) -> bool {
        self.tree.contains_path(path)
    }

    /// Returns a pruned [HashTree] that reveals the leaf at the given path and
    /// whose root hash equals the full tree's [root hash](CertificationTree::root_hash).
    ///
    /// A path with no leaf produces a proof of absence.
    pub fn reveal(&self, path: &[TreePathSegment]) -> HashTree {
        self.tree.witness(path)
    }

    /// Returns one pruned [HashTree] covering every path in the given set.
    /// Revealed paths share structure instead of producing one witness each.
    pub fn reveals<'a>(&self, paths: impl IntoIterator<Item = &'a TreePath>) -> HashTree {
        let mut witness = pruned(self.tree.root_hash());
        for path in paths {
            witness = merge_hash_trees(witness, self.tree.witness(path));
        }

        witness
    }

    /// Drops both subtrees, restoring the empty tree.
    pub fn clear(&mut self) {
        self.tree = NestedTree::default();
    }
}
