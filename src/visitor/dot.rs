//! Render the tree shape as Graphviz DOT.

use crate::RadixTree;
use std::fmt;

/// Writes the node/edge structure of a tree in Graphviz DOT format.
///
/// Nodes show their arena slot, selection-byte range, and element (via
/// `Display`); edges show their selection byte and label. Label bytes
/// outside printable ASCII are escaped as `\xNN`.
///
/// # Examples
///
/// ```rust
/// use nametrie::{visitor::DotPrinter, RadixTree};
///
/// let mut tree = RadixTree::new();
/// tree.insert(b"ax", 1).unwrap();
/// tree.insert(b"ay", 2).unwrap();
///
/// let mut out = String::new();
/// DotPrinter::print(&tree, &mut out).unwrap();
/// assert!(out.starts_with("digraph tree {"));
/// ```
#[derive(Debug)]
pub struct DotPrinter;

impl DotPrinter {
    /// Write the DOT representation of `tree` to `output`.
    ///
    /// # Errors
    ///
    /// Only fails when the underlying writer does.
    pub fn print<T: fmt::Display>(
        tree: &RadixTree<T>,
        output: &mut dyn fmt::Write,
    ) -> fmt::Result {
        let arena = tree.arena();
        writeln!(output, "digraph tree {{")?;
        writeln!(output, "    node [shape=record];")?;

        let mut stack = vec![tree.root()];
        while let Some(n) = stack.pop() {
            let node = &arena[n];
            let id = format!("n{}", n.index);
            let range = if node.edges.is_empty() {
                String::from("-")
            } else {
                format!(
                    "{:#04x}..{:#04x}",
                    node.offset,
                    node.offset as usize + node.edges.len() - 1
                )
            };
            match &node.element {
                Some(element) => {
                    writeln!(output, "    {id} [label=\"{{{id} | {range} | {element}}}\"];")?
                }
                None => writeln!(output, "    {id} [label=\"{{{id} | {range}}}\"];")?,
            }
            for (idx, entry) in node.edges.iter().enumerate() {
                let Some(edge) = entry else { continue };
                let mut label = String::new();
                escape_byte(node.selection_byte(idx), &mut label);
                if !edge.label.is_empty() {
                    label.push('+');
                    for &b in edge.label.iter() {
                        escape_byte(b, &mut label);
                    }
                }
                writeln!(
                    output,
                    "    {id} -> n{} [label=\"{label}\"];",
                    edge.child.index
                )?;
                stack.push(edge.child);
            }
        }

        writeln!(output, "}}")
    }
}

/// Printable ASCII passes through (DOT-quoted where needed), everything
/// else becomes `\xNN`.
fn escape_byte(b: u8, out: &mut String) {
    match b {
        b'"' | b'\\' => {
            out.push('\\');
            out.push(b as char);
        }
        0x20..=0x7e => out.push(b as char),
        _ => out.push_str(&format!("\\\\x{b:02x}")),
    }
}
