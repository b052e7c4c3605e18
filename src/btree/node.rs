/// A single multiway node: a sorted run of keys plus, for internal nodes,
/// one owned child on each side of every key.
///
/// A node with no children is a leaf. An internal node always holds exactly
/// `keys.len() + 1` children. The tree's minimum degree `t` is not stored
/// here; the owning tree threads it through every call that needs it.
#[derive(Clone, Debug)]
pub(super) struct Node<K> {
    keys: Vec<K>,
    children: Vec<Box<Node<K>>>,
}

impl<K: Ord + Clone> Node<K> {
    /// Build a leaf holding a single key, used when the first key enters an
    /// empty tree.
    pub(super) fn leaf_with_key(key: K) -> Self {
        Node {
            keys: vec![key],
            children: Vec::new(),
        }
    }

    /// Build a keyless internal node with `child` as its only child.
    /// Only the root-split path may create this shape, and it must split
    /// that child before the node becomes visible to any other operation.
    pub(super) fn internal_above(child: Box<Node<K>>) -> Self {
        Node {
            keys: Vec::new(),
            children: vec![child],
        }
    }

    pub(super) fn len(&self) -> usize {
        self.keys.len()
    }

    pub(super) fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub(super) fn is_full(&self, t: usize) -> bool {
        self.keys.len() == 2 * t - 1
    }

    /// Return the key at the given index. Panics if out-of-bounds.
    pub(super) fn key(&self, index: usize) -> &K {
        &self.keys[index]
    }

    /// Return the child at the given index.
    /// Panics if this is a leaf or the index is out-of-bounds.
    pub(super) fn child(&self, index: usize) -> &Node<K> {
        &self.children[index]
    }

    /// Tear down a keyless root: a leaf dissolves into the empty tree, an
    /// internal node hands the tree over to its sole remaining child.
    pub(super) fn into_sole_child(self) -> Option<Box<Node<K>>> {
        debug_assert!(self.keys.is_empty());
        self.children.into_iter().next()
    }

    /// Recursive lookup: stop at a match, fall off a leaf on a miss.
    pub(super) fn contains(&self, key: &K) -> bool {
        match self.keys.binary_search(key) {
            Ok(_) => true,
            Err(index) => !self.is_leaf() && self.children[index].contains(key),
        }
    }

    /// Recursive implementation of `OrderedTree::insert`.
    ///
    /// The caller guarantees this node is not full, so a leaf always has
    /// room and a child split always has a slot to promote into. Returns
    /// whether the key was actually added; a duplicate anywhere along the
    /// search path leaves the tree untouched.
    pub(super) fn insert_non_full(&mut self, key: K, t: usize) -> bool {
        debug_assert!(!self.is_full(t));
        match self.keys.binary_search(&key) {
            Ok(_) => false,
            Err(index) if self.is_leaf() => {
                self.keys.insert(index, key);
                true
            }
            Err(mut index) => {
                if self.children[index].is_full(t) {
                    self.split_child(index, t);
                    // The promoted separator decides which half continues
                    // the descent; it may be the key itself
                    match key.cmp(&self.keys[index]) {
                        std::cmp::Ordering::Equal => return false,
                        std::cmp::Ordering::Greater => index += 1,
                        std::cmp::Ordering::Less => {}
                    }
                }
                self.children[index].insert_non_full(key, t)
            }
        }
    }

    /// Split the full child at `index` into two minimally-filled siblings,
    /// promoting its middle key into this node.
    ///
    /// The child keeps its lower `t - 1` keys (and `t` children), the new
    /// right sibling takes the upper `t - 1` keys (and `t` children), and
    /// the middle key lands at `keys[index]`. This is the only mechanism by
    /// which the tree grows: height increases only when the root itself is
    /// the child being split.
    pub(super) fn split_child(&mut self, index: usize, t: usize) {
        let child = &mut self.children[index];
        debug_assert!(child.is_full(t));

        let right_keys = child.keys.split_off(t);
        let median = child
            .keys
            .pop()
            .expect("a full child holds 2t-1 >= 3 keys");
        let right_children = if child.is_leaf() {
            Vec::new()
        } else {
            child.children.split_off(t)
        };

        let sibling = Node {
            keys: right_keys,
            children: right_children,
        };
        self.keys.insert(index, median);
        self.children.insert(index + 1, Box::new(sibling));
    }

    /// Recursive implementation of `OrderedTree::remove`.
    ///
    /// Before descending, the target child is always topped up to at least
    /// `t` keys (see `fill`), so the recursion below never has to touch its
    /// own parent to restore the minimum-occupancy invariant. Returns
    /// whether the key was present.
    pub(super) fn remove(&mut self, key: &K, t: usize) -> bool {
        match self.keys.binary_search(key) {
            Ok(index) => {
                if self.is_leaf() {
                    self.keys.remove(index);
                } else {
                    self.remove_separator(index, key, t);
                }
                true
            }
            Err(_) if self.is_leaf() => false,
            Err(index) => {
                let was_last = index == self.keys.len();
                if self.children[index].len() < t {
                    self.fill(index, t);
                }
                // A merge with the left sibling absorbed child `index` into
                // its predecessor
                let index = if was_last && index > self.keys.len() {
                    index - 1
                } else {
                    index
                };
                self.children[index].remove(key, t)
            }
        }
    }

    /// Remove `keys[index]`, which separates two children of this internal
    /// node. Substitute the predecessor if the left child can spare a key,
    /// the successor if the right child can, and otherwise merge both
    /// children around the doomed key and recurse into the merged node.
    fn remove_separator(&mut self, index: usize, key: &K, t: usize) {
        if self.children[index].len() >= t {
            let predecessor = self.children[index].rightmost_key().clone();
            self.keys[index] = predecessor.clone();
            self.children[index].remove(&predecessor, t);
        } else if self.children[index + 1].len() >= t {
            let successor = self.children[index + 1].leftmost_key().clone();
            self.keys[index] = successor.clone();
            self.children[index + 1].remove(&successor, t);
        } else {
            self.merge_children(index);
            self.children[index].remove(key, t);
        }
    }

    /// Guarantee the child at `index` holds at least `t` keys before the
    /// removal recursion descends into it: borrow through the parent from a
    /// sibling that can spare a key, or merge with one that cannot.
    fn fill(&mut self, index: usize, t: usize) {
        if index > 0 && self.children[index - 1].len() >= t {
            self.borrow_from_prev(index);
        } else if index + 1 < self.children.len() && self.children[index + 1].len() >= t {
            self.borrow_from_next(index);
        } else if index + 1 < self.children.len() {
            self.merge_children(index);
        } else {
            self.merge_children(index - 1);
        }
    }

    /// Rotate one key clockwise through the parent: the separator drops to
    /// the front of the deficient child, the left sibling's last key rises
    /// to replace it, and the sibling's last child (if any) comes along.
    fn borrow_from_prev(&mut self, index: usize) {
        let (left, right) = self.children.split_at_mut(index);
        let sibling = &mut left[index - 1];
        let child = &mut right[0];

        let spare = sibling.keys.pop().expect("donor sibling has >= t keys");
        let separator = std::mem::replace(&mut self.keys[index - 1], spare);
        child.keys.insert(0, separator);

        if let Some(moved) = sibling.children.pop() {
            child.children.insert(0, moved);
        }
    }

    /// Mirror image of `borrow_from_prev`, rotating counterclockwise from
    /// the right sibling.
    fn borrow_from_next(&mut self, index: usize) {
        let (left, right) = self.children.split_at_mut(index + 1);
        let child = &mut left[index];
        let sibling = &mut right[0];

        let spare = sibling.keys.remove(0);
        let separator = std::mem::replace(&mut self.keys[index], spare);
        child.keys.push(separator);

        if !sibling.children.is_empty() {
            child.children.push(sibling.children.remove(0));
        }
    }

    /// Fuse the children on both sides of `keys[index]` into a single node,
    /// pulling the separator down between their key runs. The right child
    /// is destroyed; both were at minimum occupancy, so the result holds at
    /// most 2t-1 keys.
    fn merge_children(&mut self, index: usize) {
        let mut right = self.children.remove(index + 1);
        let separator = self.keys.remove(index);
        let left = &mut self.children[index];

        left.keys.push(separator);
        left.keys.append(&mut right.keys);
        left.children.append(&mut right.children);
    }

    /// Maximum key of the subtree rooted here, found by descending rightmost.
    fn rightmost_key(&self) -> &K {
        let mut node = self;
        while !node.is_leaf() {
            node = node.children.last().expect("internal node has children");
        }
        node.keys.last().expect("nodes on a search path hold keys")
    }

    /// Minimum key of the subtree rooted here, found by descending leftmost.
    fn leftmost_key(&self) -> &K {
        let mut node = self;
        while !node.is_leaf() {
            node = node.children.first().expect("internal node has children");
        }
        node.keys.first().expect("nodes on a search path hold keys")
    }
}

#[cfg(test)]
impl<K: Ord + Clone> Node<K> {
    /// Assert every structural invariant of the subtree rooted here and
    /// return its leaf depth. `bounds` carries the open interval the
    /// separators above this node impose on every key below it.
    pub(crate) fn assert_invariants(
        &self,
        t: usize,
        is_root: bool,
        bounds: (Option<&K>, Option<&K>),
    ) -> usize {
        assert!(self.keys.len() <= 2 * t - 1, "node over capacity");
        if !is_root {
            assert!(self.keys.len() >= t - 1, "non-root node under-filled");
        }
        for pair in self.keys.windows(2) {
            assert!(pair[0] < pair[1], "keys within a node must increase");
        }
        if let Some(lower) = bounds.0 {
            assert!(self.keys.first().unwrap() > lower, "separator bound broken");
        }
        if let Some(upper) = bounds.1 {
            assert!(self.keys.last().unwrap() < upper, "separator bound broken");
        }

        if self.is_leaf() {
            return 0;
        }

        assert_eq!(
            self.children.len(),
            self.keys.len() + 1,
            "internal node must hold one more child than keys"
        );
        let mut depth = None;
        for (i, child) in self.children.iter().enumerate() {
            let lower = if i == 0 { bounds.0 } else { Some(&self.keys[i - 1]) };
            let upper = if i == self.keys.len() {
                bounds.1
            } else {
                Some(&self.keys[i])
            };
            let child_depth = child.assert_invariants(t, false, (lower, upper));
            match depth {
                None => depth = Some(child_depth),
                Some(d) => assert_eq!(d, child_depth, "leaves at unequal depths"),
            }
        }
        depth.unwrap() + 1
    }
}
