//! Insertion, including edge splitting and edge-array growth.

use crate::{
    bytes::{common_prefix_len, is_prefix},
    raw::{Edge, EdgeLabel, Node, NodeArena, NodeRef},
};
use std::mem;

/// Descend as far as whole edges match, returning the deepest node fully
/// reached and the number of key bytes consumed getting there.
///
/// Descent only follows an edge when its entire label matches the key, so
/// the returned position always sits either at the end of the key or on a
/// selection byte of the returned node.
fn find_insert_point<T>(arena: &NodeArena<T>, root: NodeRef, key: &[u8]) -> (NodeRef, usize) {
    let mut n = root;
    let mut pos = 0;
    loop {
        let node = &arena[n];
        if pos == key.len() {
            return (n, pos);
        }
        let Some(edge) = node.edge(key[pos]) else {
            return (n, pos);
        };
        if !is_prefix(&edge.label, &key[pos + 1..]) {
            return (n, pos);
        }
        pos += 1 + edge.label.len();
        n = edge.child;
    }
}

/// Insert `element` under `key`, restructuring at the point where descent
/// stopped. On success returns the node now holding the element; a
/// duplicate key hands the element back untouched and mutates nothing.
pub(crate) fn insert<T>(
    arena: &mut NodeArena<T>,
    root: NodeRef,
    key: &[u8],
    element: T,
) -> Result<NodeRef, T> {
    let (n, pos) = find_insert_point(arena, root, key);
    if pos == key.len() {
        // a node already spells out the key exactly
        let node = &mut arena[n];
        if node.element.is_some() {
            return Err(element);
        }
        node.element = Some(element);
        return Ok(n);
    }
    let byte = key[pos];
    let idx = match arena[n].edge_index(byte) {
        Some(idx) => idx,
        None => arena.make_room(n, byte),
    };
    if arena[n].edges[idx].is_none() {
        // vacant entry: a fresh leaf hangs straight off this node with the
        // whole key remainder as its label
        let leaf = arena.alloc(Node::leaf(element, n, idx as u8));
        arena[n].edges[idx] = Some(Edge {
            label: EdgeLabel::from_slice(&key[pos + 1..]),
            child: leaf,
        });
        return Ok(leaf);
    }
    split_edge(arena, n, idx, &key[pos + 1..], element)
}

/// Split the occupied edge at `idx` of `n` where `rest` (the key remainder
/// after the selection byte) parts ways with the edge label.
fn split_edge<T>(
    arena: &mut NodeArena<T>,
    n: NodeRef,
    idx: usize,
    rest: &[u8],
    element: T,
) -> Result<NodeRef, T> {
    let (label, old_child) = {
        let edge = arena[n].edges[idx].as_mut().expect("occupied split edge");
        (mem::take(&mut edge.label), edge.child)
    };
    let common = common_prefix_len(rest, &label);
    debug_assert!(
        common < label.len(),
        "a fully matched label is descended, never split"
    );

    if common == rest.len() {
        // the key ends inside the label: the intermediate node carries the
        // element itself, with the old subtree as its single child
        let mid = arena.alloc(Node {
            element: Some(element),
            parent: Some(n),
            index_in_parent: idx as u8,
            offset: label[common],
            edges: vec![Some(Edge {
                label: EdgeLabel::from_slice(&label[common + 1..]),
                child: old_child,
            })],
        });
        let old = &mut arena[old_child];
        old.parent = Some(mid);
        old.index_in_parent = 0;
        arena[n].edges[idx] = Some(Edge {
            label: EdgeLabel::from_slice(&label[..common]),
            child: mid,
        });
        return Ok(mid);
    }

    // true divergence: an element-less intermediate with two children,
    // ordered by their differing bytes
    let old_byte = label[common];
    let new_byte = rest[common];
    debug_assert_ne!(old_byte, new_byte);
    let lo = old_byte.min(new_byte);
    let old_idx = (old_byte - lo) as usize;
    let new_idx = (new_byte - lo) as usize;
    let span = old_idx.max(new_idx) + 1;

    let mut edges: Vec<Option<Edge>> = Vec::with_capacity(span);
    edges.resize_with(span, || None);
    let mid = arena.alloc(Node {
        element: None,
        parent: Some(n),
        index_in_parent: idx as u8,
        offset: lo,
        edges,
    });
    let leaf = arena.alloc(Node::leaf(element, mid, new_idx as u8));
    {
        let mid_node = &mut arena[mid];
        mid_node.edges[old_idx] = Some(Edge {
            label: EdgeLabel::from_slice(&label[common + 1..]),
            child: old_child,
        });
        mid_node.edges[new_idx] = Some(Edge {
            label: EdgeLabel::from_slice(&rest[common + 1..]),
            child: leaf,
        });
    }
    {
        let old = &mut arena[old_child];
        old.parent = Some(mid);
        old.index_in_parent = old_idx as u8;
    }
    arena[n].edges[idx] = Some(Edge {
        label: EdgeLabel::from_slice(&label[..common]),
        child: mid,
    });
    Ok(leaf)
}
