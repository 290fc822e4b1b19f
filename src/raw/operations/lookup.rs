//! Exact search and ordered nearest-predecessor search.

use crate::{
    bytes::common_prefix_len,
    raw::{
        operations::{iterator::prev, minmax::last_in_subtree},
        NodeArena, NodeRef,
    },
};

/// Exact lookup: the node holding an element for `key`, or `None`.
///
/// Descends edge by edge, consuming the selection byte and then the full
/// edge label at every step. Any partial label match means the key
/// diverges from everything stored and the search misses. Never mutates.
pub(crate) fn search<T>(arena: &NodeArena<T>, root: NodeRef, key: &[u8]) -> Option<NodeRef> {
    let mut n = root;
    let mut pos = 0;
    loop {
        let node = &arena[n];
        if pos == key.len() {
            return node.element.is_some().then_some(n);
        }
        let edge = node.edge(key[pos])?;
        pos += 1;
        let label: &[u8] = &edge.label;
        if !label.is_empty() {
            if key.len() < pos + label.len() || &key[pos..pos + label.len()] != label {
                return None;
            }
            pos += label.len();
        }
        n = edge.child;
    }
}

/// Nearest-predecessor lookup: the exact node for `key` when present,
/// otherwise the largest stored key strictly smaller than `key`.
///
/// Returns `(true, Some(node))` on an exact hit, `(false, Some(node))`
/// for a strict predecessor, and `(false, None)` when `key` sorts before
/// everything in the tree.
///
/// The descent mirrors [`search`], but instead of giving up at a
/// divergence it decides, from the byte where the key and the stored
/// structure part ways, on which side of the current edge the predecessor
/// lives: below a lower sibling, at the current node's own element, at
/// the maximum of the diverging edge's subtree, or further up via the
/// ordinary predecessor walk.
pub(crate) fn find_less_equal<T>(
    arena: &NodeArena<T>,
    root: NodeRef,
    key: &[u8],
) -> (bool, Option<NodeRef>) {
    let mut n = root;
    let mut pos = 0;
    while pos < key.len() {
        let node = &arena[n];
        let byte = key[pos];
        if node.edges.is_empty() || byte < node.offset {
            // every edge of `n` selects a byte greater than `byte`, so the
            // whole remaining subtree sorts after the key; `n` itself (a
            // strict prefix of the key) is the closest candidate
            return (false, self_or_prev(arena, n));
        }
        let idx = (byte - node.offset) as usize;
        if idx >= node.edges.len() {
            // every edge selects a smaller byte: all of `n`'s subtree,
            // including `n`, sorts before the key
            let result = last_in_subtree(arena, n).or_else(|| prev(arena, n));
            return (false, result);
        }
        let Some(edge) = node.edges[idx].as_ref() else {
            return (false, below_index(arena, n, idx));
        };
        let rest = &key[pos + 1..];
        let label: &[u8] = &edge.label;
        let common = common_prefix_len(rest, label);
        if common == label.len() {
            pos += 1 + label.len();
            n = edge.child;
            continue;
        }
        if common == rest.len() || rest[common] < label[common] {
            // the key exhausts inside the label, or diverges below it:
            // the whole edge subtree sorts after the key
            return (false, below_index(arena, n, idx));
        }
        // the key diverges above the label: the whole edge subtree sorts
        // before the key and its maximum is the predecessor
        return (false, last_in_subtree(arena, edge.child));
    }
    // key fully consumed: `n` is the node spelling exactly `key`
    let node = &arena[n];
    if node.element.is_some() {
        (true, Some(n))
    } else {
        (false, prev(arena, n))
    }
}

/// `n` itself when it carries an element, otherwise its predecessor.
fn self_or_prev<T>(arena: &NodeArena<T>, n: NodeRef) -> Option<NodeRef> {
    if arena[n].element.is_some() {
        Some(n)
    } else {
        prev(arena, n)
    }
}

/// Predecessor of the (missing or too-large) edge entry at `idx` of `n`:
/// the maximum under the nearest live sibling below `idx`, else `n`'s own
/// element, else `n`'s predecessor.
fn below_index<T>(arena: &NodeArena<T>, n: NodeRef, idx: usize) -> Option<NodeRef> {
    let node = &arena[n];
    if let Some(sib) = node.last_live_before(idx) {
        let child = node.edges[sib].as_ref().expect("live index").child;
        return last_in_subtree(arena, child);
    }
    self_or_prev(arena, n)
}
