mod node;
mod tree;
mod tree_iter;

pub use tree::OrderedTree;
pub use tree_iter::TreeIter;

// Smallest degree for which a node can hold a separator between two children
pub(crate) const MIN_DEGREE_LOWER_BOUND: usize = 2;
