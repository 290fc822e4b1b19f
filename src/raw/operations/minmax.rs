//! Smallest and largest element below a node.
//!
//! Both walks are greedy descents. They rely on the structural invariant
//! that every child subtree contains at least one element (a node with no
//! element is either the root or has at least two edges, and every
//! childless node has an element), so a descent never dead-ends except at
//! an empty root.

use crate::raw::{NodeArena, NodeRef};

/// First (smallest) element in the subtree rooted at `n`, counting `n`'s
/// own element. A node's own element sorts before everything under its
/// edges, so the descent checks the element before taking the lowest edge.
pub(crate) fn first_in_subtree<T>(arena: &NodeArena<T>, mut n: NodeRef) -> Option<NodeRef> {
    loop {
        let node = &arena[n];
        if node.element.is_some() {
            return Some(n);
        }
        match node.first_live_from(0) {
            Some(idx) => {
                n = node.edges[idx].as_ref().expect("live index").child;
            }
            // only the empty root has neither element nor edges
            None => return None,
        }
    }
}

/// Last (largest) element in the subtree rooted at `n`, counting `n`'s own
/// element. Everything under an edge sorts after the node's own element,
/// so the descent keeps taking the highest edge while one exists.
pub(crate) fn last_in_subtree<T>(arena: &NodeArena<T>, mut n: NodeRef) -> Option<NodeRef> {
    loop {
        let node = &arena[n];
        match node.last_live_before(node.edges.len()) {
            Some(idx) => {
                n = node.edges[idx].as_ref().expect("live index").child;
            }
            None => return node.element.is_some().then_some(n),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::RadixTree;

    #[test]
    fn first_and_last_on_single_element_tree_agree() {
        let mut tree = RadixTree::new();
        let n = tree.insert(b"only", 'o').unwrap();
        assert_eq!(tree.first(), Some(n));
        assert_eq!(tree.last(), Some(n));
    }

    #[test]
    fn prefix_element_is_the_subtree_minimum() {
        let mut tree = RadixTree::new();
        let long = tree.insert(b"name.example", 2).unwrap();
        let short = tree.insert(b"name", 1).unwrap();
        assert_eq!(tree.first(), Some(short));
        assert_eq!(tree.last(), Some(long));
    }

    #[test]
    fn min_max_over_generated_keys() {
        let mut tree = RadixTree::new();
        for (i, key) in crate::tests_common::generate_key_fixed_length(3, 5).enumerate() {
            tree.insert(&key, i).unwrap();
        }
        let first = tree.first().unwrap();
        let last = tree.last().unwrap();
        assert_eq!(tree.element(first), Some(&0));
        assert_eq!(tree.element(last), Some(&(tree.len() - 1)));
    }

    #[test]
    fn empty_tree_has_no_extremes() {
        let tree = RadixTree::<()>::new();
        assert_eq!(tree.first(), None);
        assert_eq!(tree.last(), None);
    }
}
