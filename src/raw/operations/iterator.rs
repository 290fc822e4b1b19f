//! One step of ordered traversal, in either direction.
//!
//! Neither walk re-descends from the root: the parent back-reference and
//! `index_in_parent` stamp give the next/previous sibling edge directly,
//! so a full scan of the tree costs O(total key bytes) with no recursion
//! and no auxiliary storage.

use crate::raw::{
    operations::minmax::{first_in_subtree, last_in_subtree},
    NodeArena, NodeRef,
};

/// The element following `n` in key order, or `None` if `n` is the last.
///
/// Anything under `n`'s own edges extends `n`'s key and therefore comes
/// first; otherwise the walk climbs until some ancestor has a sibling edge
/// above the one it came from.
pub(crate) fn next<T>(arena: &NodeArena<T>, n: NodeRef) -> Option<NodeRef> {
    let node = &arena[n];
    if let Some(idx) = node.first_live_from(0) {
        let child = node.edges[idx].as_ref().expect("live index").child;
        return first_in_subtree(arena, child);
    }
    let mut cur = n;
    loop {
        let node = &arena[cur];
        let parent = node.parent?;
        let pidx = node.index_in_parent as usize;
        let pnode = &arena[parent];
        if let Some(idx) = pnode.first_live_from(pidx + 1) {
            let child = pnode.edges[idx].as_ref().expect("live index").child;
            return first_in_subtree(arena, child);
        }
        cur = parent;
    }
}

/// The element preceding `n` in key order, or `None` if `n` is the first.
///
/// `n`'s own children all sort after it, so the walk goes straight up:
/// at each ancestor, the nearest sibling edge below the incoming one holds
/// the predecessor subtree; failing that, the ancestor's own element is
/// the predecessor (the ancestor's key is a strict prefix of `n`'s).
pub(crate) fn prev<T>(arena: &NodeArena<T>, n: NodeRef) -> Option<NodeRef> {
    let mut cur = n;
    loop {
        let node = &arena[cur];
        let parent = node.parent?;
        let pidx = node.index_in_parent as usize;
        let pnode = &arena[parent];
        if let Some(idx) = pnode.last_live_before(pidx) {
            let child = pnode.edges[idx].as_ref().expect("live index").child;
            return last_in_subtree(arena, child);
        }
        if pnode.element.is_some() {
            return Some(parent);
        }
        cur = parent;
    }
}
