//! A traversal that checks the tree is well-formed.

use crate::{NodeRef, RadixTree};
use std::{collections::HashSet, error::Error, fmt};

/// An issue with the well-formedness of the tree. See
/// [`WellFormedChecker`] for the list of invariants checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedTreeError {
    /// A node was reached through two different paths.
    LoopFound {
        /// The node observed twice.
        node: NodeRef,
        /// Reconstructed key prefix of the second sighting.
        key_prefix: Box<[u8]>,
    },
    /// An edge points at a handle that does not resolve.
    DanglingEdge {
        /// The node holding the edge.
        node: NodeRef,
        /// Selection byte of the offending edge.
        selection_byte: u8,
    },
    /// A child's parent link or index-in-parent stamp does not point back
    /// at the edge it hangs from.
    BadBackReference {
        /// The child whose back-reference is wrong.
        child: NodeRef,
        /// Reconstructed key prefix of the child.
        key_prefix: Box<[u8]>,
    },
    /// A non-empty edge array whose first or last entry is vacant, or
    /// whose range runs past byte value 255.
    LooseEdgeRange {
        /// The node with the untrimmed or overflowing array.
        node: NodeRef,
        /// The node's range start.
        offset: u8,
        /// The node's array length.
        len: usize,
    },
    /// A non-root node with no element and fewer than two edges, which
    /// path compression should have removed or merged.
    PassThroughNode {
        /// The offending node.
        node: NodeRef,
        /// Reconstructed key prefix of the node.
        key_prefix: Box<[u8]>,
    },
    /// The tree's element count does not match the elements reachable
    /// from the root.
    CountMismatch {
        /// What [`RadixTree::len`] reports.
        recorded: usize,
        /// How many element-bearing nodes the walk found.
        reachable: usize,
    },
    /// The arena holds more live nodes than are reachable from the root.
    LeakedNodes {
        /// Live slots in the arena.
        live: usize,
        /// Nodes reachable from the root.
        reachable: usize,
    },
}

impl fmt::Display for MalformedTreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedTreeError::LoopFound { node, key_prefix } => {
                write!(f, "node [{node:?}] reached twice, second time at key prefix [{key_prefix:?}]")
            }
            MalformedTreeError::DanglingEdge { node, selection_byte } => {
                write!(f, "edge [{selection_byte:#04x}] of node [{node:?}] points at a dead slot")
            }
            MalformedTreeError::BadBackReference { child, key_prefix } => {
                write!(f, "node [{child:?}] at key prefix [{key_prefix:?}] does not point back at its incoming edge")
            }
            MalformedTreeError::LooseEdgeRange { node, offset, len } => {
                write!(f, "edge array of node [{node:?}] (offset {offset}, len {len}) is not tight around its live entries")
            }
            MalformedTreeError::PassThroughNode { node, key_prefix } => {
                write!(f, "element-less node [{node:?}] at key prefix [{key_prefix:?}] has fewer than two edges")
            }
            MalformedTreeError::CountMismatch { recorded, reachable } => {
                write!(f, "tree records [{recorded}] elements but [{reachable}] are reachable")
            }
            MalformedTreeError::LeakedNodes { live, reachable } => {
                write!(f, "arena holds [{live}] live nodes but only [{reachable}] are reachable")
            }
        }
    }
}

impl Error for MalformedTreeError {}

/// A traversal of the tree which checks that it is well-formed.
///
/// In this context, well-formed means:
///  1. no node is reachable through two different paths and every edge
///     resolves to a live node;
///  2. every child's parent link and `index_in_parent` stamp point back
///     at the edge it hangs from;
///  3. every non-empty edge array is tight: first and last entries are
///     occupied and the range stays within byte values 0..=255;
///  4. path compression is maximal: no element-less non-root node has
///     fewer than two edges;
///  5. the recorded element count matches the reachable elements, and the
///     arena holds no unreachable live nodes.
///
/// The checker reports the first issue it finds. A tree is well-formed
/// only if [`check`](WellFormedChecker::check) returns `Ok`.
#[derive(Debug)]
pub struct WellFormedChecker;

impl WellFormedChecker {
    /// Traverse `tree` and check that it is well-formed. Returns the
    /// total number of nodes (not elements) in the tree.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn check<T>(tree: &RadixTree<T>) -> Result<usize, MalformedTreeError> {
        let arena = tree.arena();
        let root = tree.root();

        let mut seen: HashSet<NodeRef> = HashSet::new();
        seen.insert(root);
        // depth-first over (node, reconstructed key prefix)
        let mut stack: Vec<(NodeRef, Vec<u8>)> = vec![(root, Vec::new())];
        let mut nodes = 0usize;
        let mut elements = 0usize;

        while let Some((n, prefix)) = stack.pop() {
            let node = &arena[n];
            nodes += 1;
            if node.element.is_some() {
                elements += 1;
            }

            if !node.edges.is_empty() {
                let tight = node.edges.first().is_some_and(|e| e.is_some())
                    && node.edges.last().is_some_and(|e| e.is_some())
                    && node.offset as usize + node.edges.len() <= 256;
                if !tight {
                    return Err(MalformedTreeError::LooseEdgeRange {
                        node: n,
                        offset: node.offset,
                        len: node.edges.len(),
                    });
                }
            }

            if n != root && node.element.is_none() && node.live_edge_count() < 2 {
                return Err(MalformedTreeError::PassThroughNode {
                    node: n,
                    key_prefix: prefix.clone().into_boxed_slice(),
                });
            }

            for (idx, entry) in node.edges.iter().enumerate() {
                let Some(edge) = entry else { continue };
                let mut child_prefix = prefix.clone();
                child_prefix.push(node.selection_byte(idx));
                child_prefix.extend_from_slice(&edge.label);

                let Some(child) = arena.get(edge.child) else {
                    return Err(MalformedTreeError::DanglingEdge {
                        node: n,
                        selection_byte: node.selection_byte(idx),
                    });
                };
                if child.parent != Some(n) || child.index_in_parent as usize != idx {
                    return Err(MalformedTreeError::BadBackReference {
                        child: edge.child,
                        key_prefix: child_prefix.into_boxed_slice(),
                    });
                }
                if !seen.insert(edge.child) {
                    return Err(MalformedTreeError::LoopFound {
                        node: edge.child,
                        key_prefix: child_prefix.into_boxed_slice(),
                    });
                }
                stack.push((edge.child, child_prefix));
            }
        }

        if elements != tree.len() {
            return Err(MalformedTreeError::CountMismatch {
                recorded: tree.len(),
                reachable: elements,
            });
        }
        let live = arena.occupied();
        if live != nodes {
            return Err(MalformedTreeError::LeakedNodes {
                live,
                reachable: nodes,
            });
        }
        Ok(nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests_common::generate_key_fixed_length;

    #[test]
    fn empty_tree_is_well_formed() {
        let tree = RadixTree::<u8>::new();
        assert_eq!(WellFormedChecker::check(&tree), Ok(1));
    }

    #[test]
    fn generated_tree_is_well_formed_with_expected_node_count() {
        let mut tree = RadixTree::new();
        for (i, key) in generate_key_fixed_length(2, 4).enumerate() {
            tree.insert(&key, i).unwrap();
        }
        // 5 distinct values per digit: 25 leaves, 5 interior nodes, the root
        assert_eq!(tree.len(), 25);
        assert_eq!(WellFormedChecker::check(&tree), Ok(31));
    }

    #[test]
    fn checker_passes_across_a_full_delete_cycle() {
        let mut tree = RadixTree::new();
        let handles: Vec<_> = generate_key_fixed_length(3, 3)
            .enumerate()
            .map(|(i, key)| tree.insert(&key, i).unwrap())
            .collect();
        WellFormedChecker::check(&tree).unwrap();

        for handle in handles {
            tree.remove(handle);
            WellFormedChecker::check(&tree).unwrap();
        }
        assert_eq!(WellFormedChecker::check(&tree), Ok(1));
    }
}
