use super::node::Node;
use super::OrderedTree;

#[derive(Copy, Clone)]
struct TreeIterState<'a, K: Ord + Clone> {
    node: &'a Node<K>,
    pos: usize,
}

/// In-order iterator over the keys of an [`OrderedTree`], yielding them in
/// ascending order. Each call to [`OrderedTree::iter`] performs a fresh
/// walk; nothing persists across iterators.
pub struct TreeIter<'a, K: Ord + Clone> {
    /// List of ancestor nodes and the next key position in each of them
    tail_states: Vec<TreeIterState<'a, K>>,
    /// The current leaf and the next key position to return
    head_state: Option<TreeIterState<'a, K>>,
    len: usize,
}

impl<'a, K: Ord + Clone> TreeIter<'a, K> {
    pub(super) fn new(tree: &'a OrderedTree<K>) -> Self {
        let mut iter = TreeIter {
            tail_states: vec![],
            head_state: None,
            len: tree.len(),
        };
        if let Some(root) = &tree.root {
            iter.prepare_state_from(root);
        }
        iter
    }

    /// Descend to the leftmost leaf under `node`, stacking the internal
    /// nodes along the way
    fn prepare_state_from(&mut self, mut node: &'a Node<K>) {
        while !node.is_leaf() {
            self.tail_states.push(TreeIterState { node, pos: 0 });
            node = node.child(0);
        }
        self.head_state = Some(TreeIterState { node, pos: 0 });
    }
}

impl<'a, K: Ord + Clone> Iterator for TreeIter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        // Drain the current leaf first
        if let Some(state) = &mut self.head_state {
            let node = state.node;
            if state.pos < node.len() {
                let res = node.key(state.pos);
                state.pos += 1;
                self.len -= 1;
                return Some(res);
            }
        }

        // Climb until an ancestor still owes a key, emit it, and descend
        // into the subtree to its right
        loop {
            match self.tail_states.pop() {
                None => {
                    self.head_state = None;
                    return None;
                }
                Some(parent) if parent.pos < parent.node.len() => {
                    let res = parent.node.key(parent.pos);
                    self.tail_states.push(TreeIterState {
                        node: parent.node,
                        pos: parent.pos + 1,
                    });
                    self.prepare_state_from(parent.node.child(parent.pos + 1));
                    self.len -= 1;
                    return Some(res);
                }
                Some(_) => {}
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, K: Ord + Clone> ExactSizeIterator for TreeIter<'a, K> {}
impl<'a, K: Ord + Clone> std::iter::FusedIterator for TreeIter<'a, K> {}
