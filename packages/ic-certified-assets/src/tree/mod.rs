//! The tree module contains the certification tree in which every certified
//! HTTP exchange is stored, and from which witnesses are produced.

mod certification_tree;
pub use certification_tree::*;

pub(crate) use certification_tree::{
    assets_tree_path, EXACT_PATH_TERMINATOR, EXPR_PATH_PREFIX, WILDCARD_PATH_TERMINATOR,
};
