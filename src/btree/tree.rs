use super::node::Node;
use super::tree_iter::TreeIter;
use super::MIN_DEGREE_LOWER_BOUND;
use crate::error::TreeError;

/// A balanced multiway search tree (B-tree) holding a set of ordered keys.
///
/// The minimum degree `t` is chosen at construction: every node holds at
/// most `2t - 1` keys and every node except the root holds at least `t - 1`.
/// All leaves sit at the same depth, and every mutation restores the full
/// set of invariants before returning; no intermediate state is observable.
///
/// The tree exclusively owns its entire node graph. It is single-threaded:
/// concurrent use requires external serialization of whole operations.
#[derive(Clone, Debug)]
pub struct OrderedTree<K: Ord + Clone> {
    min_degree: usize,
    pub(super) root: Option<Box<Node<K>>>,
    len: usize,
}

impl<K: Ord + Clone> OrderedTree<K> {
    /// Create an empty tree with the given minimum degree.
    ///
    /// Rejects `min_degree < 2`: a smaller degree cannot form an internal
    /// node with a separator between two children.
    pub fn new(min_degree: usize) -> Result<Self, TreeError> {
        if min_degree < MIN_DEGREE_LOWER_BOUND {
            return Err(TreeError::MinDegreeTooSmall(min_degree));
        }
        Ok(OrderedTree {
            min_degree,
            root: None,
            len: 0,
        })
    }

    /// Return the minimum degree this tree was built with
    pub fn min_degree(&self) -> usize {
        self.min_degree
    }

    /// Return the total number of keys in the tree
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Return whether the key is present
    pub fn contains(&self, key: &K) -> bool {
        match &self.root {
            None => false,
            Some(root) => root.contains(key),
        }
    }

    /// Insert a key, keeping the tree balanced.
    ///
    /// Returns `true` if the key was added and `false` if it was already
    /// present; a duplicate insert never changes the tree.
    ///
    /// A full root is split preemptively before the descent starts, so the
    /// recursion below never enters a node without room for a promoted key.
    pub fn insert(&mut self, key: K) -> bool {
        let t = self.min_degree;
        let root = match self.root.take() {
            None => {
                self.root = Some(Box::new(Node::leaf_with_key(key)));
                self.len = 1;
                return true;
            }
            Some(root) if root.is_full(t) => {
                // Grow from the root: the old root becomes the only child
                // of a fresh root, then splits under it
                let mut new_root = Node::internal_above(root);
                new_root.split_child(0, t);
                Box::new(new_root)
            }
            Some(root) => root,
        };
        self.root = Some(root);
        let root = self.root.as_mut().expect("root restored above");
        let inserted = root.insert_non_full(key, t);
        if inserted {
            self.len += 1;
        }
        inserted
    }

    /// Remove a key, keeping the tree balanced.
    ///
    /// Returns `true` if the key was present and `false` otherwise; removing
    /// an absent key never changes the tree.
    pub fn remove(&mut self, key: &K) -> bool {
        let t = self.min_degree;
        let removed = match &mut self.root {
            None => false,
            Some(root) => root.remove(key, t),
        };
        if removed {
            self.len -= 1;
        }

        // Rebalancing may drain the root; the tree shrinks from the top
        let root_drained = self.root.as_ref().map_or(false, |root| root.len() == 0);
        if root_drained {
            let old_root = self.root.take().expect("root checked above");
            self.root = old_root.into_sole_child();
        }
        removed
    }

    /// Return a fresh iterator over the keys in ascending order
    pub fn iter(&self) -> TreeIter<'_, K> {
        TreeIter::new(self)
    }
}

impl<'a, K: Ord + Clone> IntoIterator for &'a OrderedTree<K> {
    type Item = &'a K;
    type IntoIter = TreeIter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Ord + Clone> Extend<K> for OrderedTree<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

#[cfg(test)]
impl<K: Ord + Clone> OrderedTree<K> {
    /// Walk the whole tree and assert every structural invariant
    pub(crate) fn assert_invariants(&self) {
        self.leaf_depth();
        assert_eq!(self.len, self.iter().count());
    }

    /// Shared depth of every leaf, measured by the invariant walk; the root
    /// alone sits at depth zero and an empty tree has no leaves at all
    pub(crate) fn leaf_depth(&self) -> Option<usize> {
        self.root
            .as_ref()
            .map(|root| root.assert_invariants(self.min_degree, true, (None, None)))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rejects_degenerate_degrees() {
        assert_eq!(
            OrderedTree::<i32>::new(0).unwrap_err(),
            TreeError::MinDegreeTooSmall(0)
        );
        assert_eq!(
            OrderedTree::<i32>::new(1).unwrap_err(),
            TreeError::MinDegreeTooSmall(1)
        );
        assert!(OrderedTree::<i32>::new(2).is_ok());
    }

    #[test]
    fn grows_a_new_root_when_the_old_one_fills() {
        let mut tree = OrderedTree::new(2).unwrap();
        let capacity = 2 * tree.min_degree() - 1;
        for i in 0..capacity as i32 {
            tree.insert(i);
        }
        assert_eq!(tree.len(), capacity);
        assert_eq!(tree.root.as_ref().unwrap().len(), capacity);

        // One more key forces the root to split
        tree.insert(capacity as i32);
        assert_eq!(tree.len(), capacity + 1);
        assert_eq!(tree.root.as_ref().unwrap().len(), 1);
        tree.assert_invariants();
    }

    #[test]
    fn shrinks_back_to_empty() {
        let mut tree = OrderedTree::new(2).unwrap();
        for i in 0..20 {
            tree.insert(i);
        }
        for i in 0..20 {
            assert!(tree.remove(&i));
            tree.assert_invariants();
        }
        assert!(tree.is_empty());
        assert!(tree.root.is_none());
        assert_eq!(tree.iter().count(), 0);
    }

    #[test]
    fn duplicate_inserts_do_not_count() {
        let mut tree = OrderedTree::new(3).unwrap();
        assert!(tree.insert(7));
        assert!(!tree.insert(7));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn extend_and_into_iterator() {
        let mut tree = OrderedTree::new(2).unwrap();
        tree.extend(vec![3, 1, 2, 3, 1]);
        let collected: Vec<i32> = (&tree).into_iter().cloned().collect();
        assert_eq!(collected, vec![1, 2, 3]);
    }

    #[test]
    fn cloned_trees_are_independent() {
        let mut tree = OrderedTree::new(2).unwrap();
        tree.extend(0..50);
        let mut other = tree.clone();
        other.remove(&25);
        assert!(tree.contains(&25));
        assert!(!other.contains(&25));
        tree.assert_invariants();
        other.assert_invariants();
    }
}
