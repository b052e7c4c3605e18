#[cfg(test)]
mod tests;

pub mod btree;

mod error;

pub use btree::{OrderedTree, TreeIter};
pub use error::TreeError;
