mod arena;
mod handle;
mod invariants;
mod node;
mod raw_avl_tree;
mod size;

pub(crate) use handle::Handle;
pub(crate) use node::Node;
pub(crate) use raw_avl_tree::RawAvlTree;
