#![deny(
    missing_docs,
    unsafe_code,
    deprecated_in_future,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    rustdoc::invalid_codeblock_attributes
)]
#![doc(test(attr(deny(warnings))))]

//! Path-compressed radix trie over byte-string keys.
//!
//! The trie stores one element per distinct key and keeps the keys in
//! lexicographic byte order, with a prefix sorting before all of its
//! extensions. Lookup, insertion, deletion, and one step of ordered
//! traversal all run in time proportional to the key length, independent
//! of how many elements the tree holds. That ordering rule is what makes
//! the structure suitable as the index underneath name-based lookup
//! systems (a zone's name sorts immediately before everything inside the
//! zone); the [`dname`] module provides the domain-name key codec for
//! exactly that use.
//!
//! Keys are not stored verbatim: the tree keeps only the byte fragments it
//! needs for navigation. Callers that want the key back must retain it
//! themselves.
//!
//! # Example
//!
//! ```rust
//! use nametrie::RadixTree;
//!
//! let mut tree = RadixTree::new();
//! tree.insert(b"a", 1).unwrap();
//! tree.insert(b"ab", 2).unwrap();
//! tree.insert(b"ac", 3).unwrap();
//!
//! let first = tree.first().unwrap();
//! assert_eq!(tree.element(first), Some(&1));
//!
//! let (exact, node) = tree.find_less_equal(b"ab\x00");
//! assert!(!exact);
//! assert_eq!(tree.element(node.unwrap()), Some(&2));
//! ```

mod bytes;
mod raw;
mod tree;

pub mod dname;
pub mod visitor;

#[doc(hidden)]
pub mod tests_common;

pub use bytes::{common_prefix_len, is_prefix};
pub use raw::NodeRef;
pub use tree::{DuplicateEntryError, Iter, RadixTree};
