//! Domain-name keys for the trie.
//!
//! A DNS wire-format name (length-prefixed labels, most-specific first,
//! terminated by the empty root label) does not sort the way a name
//! database needs it to: the hierarchy reads right to left. The codec in
//! this module turns a wire name into a trie key such that
//!
//!  - the mapping is deterministic and invertible (up to ASCII case,
//!    which DNS compares insensitively), and
//!  - an ancestor name's key is a byte-prefix of every descendant's key,
//!    so the trie's prefix-before-suffix ordering coincides with zone
//!    containment.
//!
//! The key is the labels in reverse order, joined by `0x00`. To keep the
//! separator unambiguous, label bytes below `b'A'` are shifted up by one
//! and uppercase ASCII is folded to lowercase; both adjustments preserve
//! the case-insensitive canonical ordering of names.
//!
//! The wrappers at the bottom ([`RadixTree::insert_name`] and friends)
//! convert and then delegate to the core operations, keeping parse
//! failures strictly separate from tree errors.

use crate::{tree::DuplicateEntryError, NodeRef, RadixTree};
use std::{error::Error, fmt};

/// Longest wire-format name accepted, in bytes, including the root label.
pub const MAX_NAME_LEN: usize = 255;

/// Longest single label accepted, in bytes.
pub const MAX_LABEL_LEN: usize = 63;

/// A wire-format name failed to parse, or a key failed to convert back
/// into a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameError {
    /// A label length byte was 64 or more at the given offset. This also
    /// covers compression pointers, which are not allowed here.
    BadLabel {
        /// Byte offset of the offending length byte.
        offset: usize,
    },
    /// The input ended before the root label.
    Truncated,
    /// The complete name would exceed [`MAX_NAME_LEN`] bytes.
    TooLong {
        /// The offending total length.
        len: usize,
    },
}

impl fmt::Display for NameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameError::BadLabel { offset } => {
                write!(f, "bad label length or compression pointer at offset {offset}")
            }
            NameError::Truncated => write!(f, "name ended before the root label"),
            NameError::TooLong { len } => {
                write!(f, "name of {len} bytes exceeds the {MAX_NAME_LEN} byte limit")
            }
        }
    }
}

impl Error for NameError {}

/// Insert by name failed: either the name did not parse, or the key it
/// maps to already holds an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameInsertError<T> {
    /// The name did not parse; the tree was never consulted.
    Name(NameError),
    /// The parsed name is already present.
    Duplicate(DuplicateEntryError<T>),
}

impl<T> From<NameError> for NameInsertError<T> {
    fn from(err: NameError) -> Self {
        NameInsertError::Name(err)
    }
}

impl<T> From<DuplicateEntryError<T>> for NameInsertError<T> {
    fn from(err: DuplicateEntryError<T>) -> Self {
        NameInsertError::Duplicate(err)
    }
}

impl<T> fmt::Display for NameInsertError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameInsertError::Name(err) => write!(f, "{err}"),
            NameInsertError::Duplicate(err) => write!(f, "{err}"),
        }
    }
}

impl<T: fmt::Debug> Error for NameInsertError<T> {}

/// One label byte, name form to key form: make room above the `0x00`
/// separator and fold case.
fn byte_to_key(b: u8) -> u8 {
    if b < b'A' {
        b + 1
    } else if b <= b'Z' {
        b - b'A' + b'a'
    } else {
        b
    }
}

/// One label byte, key form back to (lowercased) name form.
fn byte_from_key(b: u8) -> u8 {
    debug_assert_ne!(b, 0, "separators are stripped before conversion");
    if b <= b'A' {
        b - 1
    } else {
        b
    }
}

/// Split a wire-format name into its label ranges, validating as it goes.
/// Returns `(content ranges, total encoded length)`.
fn parse_wire_name(name: &[u8]) -> Result<(Vec<(usize, usize)>, usize), NameError> {
    let mut labels = Vec::new();
    let mut at = 0;
    loop {
        let Some(&len) = name.get(at) else {
            return Err(NameError::Truncated);
        };
        if len == 0 {
            let total = at + 1;
            if total > MAX_NAME_LEN {
                return Err(NameError::TooLong { len: total });
            }
            return Ok((labels, total));
        }
        if len as usize > MAX_LABEL_LEN {
            return Err(NameError::BadLabel { offset: at });
        }
        let start = at + 1;
        let end = start + len as usize;
        if end > name.len() {
            return Err(NameError::Truncated);
        }
        labels.push((start, end));
        at = end;
    }
}

/// Convert a wire-format name into its trie key.
///
/// The root name (a lone zero byte) maps to the empty key.
///
/// # Errors
///
/// Rejects malformed wire names; see [`NameError`].
///
/// # Examples
///
/// ```rust
/// use nametrie::dname::name_to_key;
///
/// // www.example.com
/// let name = b"\x03www\x07example\x03com\x00";
/// // com
/// let parent = b"\x03com\x00";
/// let key = name_to_key(name).unwrap();
/// let parent_key = name_to_key(parent).unwrap();
/// assert!(key.starts_with(&parent_key));
/// ```
pub fn name_to_key(name: &[u8]) -> Result<Vec<u8>, NameError> {
    let (labels, total) = parse_wire_name(name)?;
    let mut key = Vec::with_capacity(total);
    for (i, (start, end)) in labels.iter().rev().enumerate() {
        if i > 0 {
            key.push(0);
        }
        key.extend(name[*start..*end].iter().copied().map(byte_to_key));
    }
    Ok(key)
}

/// Convert a trie key produced by [`name_to_key`] back into a wire-format
/// name. Case folded during encoding stays folded.
///
/// # Errors
///
/// Rejects keys whose labels are empty or longer than [`MAX_LABEL_LEN`],
/// and keys whose decoded name would exceed [`MAX_NAME_LEN`].
pub fn key_to_name(key: &[u8]) -> Result<Vec<u8>, NameError> {
    let mut name = Vec::with_capacity(key.len() + 2);
    if !key.is_empty() {
        for label in key.rsplit(|&b| b == 0) {
            if label.is_empty() || label.len() > MAX_LABEL_LEN {
                return Err(NameError::BadLabel {
                    offset: label.as_ptr() as usize - key.as_ptr() as usize,
                });
            }
            name.push(label.len() as u8);
            name.extend(label.iter().copied().map(byte_from_key));
        }
    }
    name.push(0);
    if name.len() > MAX_NAME_LEN {
        return Err(NameError::TooLong { len: name.len() });
    }
    Ok(name)
}

impl<T> RadixTree<T> {
    /// Insert by wire-format name. See [`RadixTree::insert`].
    ///
    /// # Errors
    ///
    /// A malformed name reports [`NameInsertError::Name`] without touching
    /// the tree; a name already present reports
    /// [`NameInsertError::Duplicate`].
    pub fn insert_name(&mut self, name: &[u8], value: T) -> Result<NodeRef, NameInsertError<T>> {
        let key = name_to_key(name)?;
        Ok(self.insert(&key, value)?)
    }

    /// Exact lookup by wire-format name. See [`RadixTree::search`].
    ///
    /// # Errors
    ///
    /// Reports a parse error for a malformed name, distinct from a miss.
    pub fn search_name(&self, name: &[u8]) -> Result<Option<NodeRef>, NameError> {
        let key = name_to_key(name)?;
        Ok(self.search(&key))
    }

    /// Exact-or-nearest-predecessor lookup by wire-format name, under the
    /// canonical name ordering. See [`RadixTree::find_less_equal`].
    ///
    /// # Errors
    ///
    /// Reports a parse error for a malformed name.
    pub fn find_name_less_equal(
        &self,
        name: &[u8],
    ) -> Result<(bool, Option<NodeRef>), NameError> {
        let key = name_to_key(name)?;
        Ok(self.find_less_equal(&key))
    }

    /// Remove by wire-format name, returning the element if the name was
    /// present. See [`RadixTree::remove`].
    ///
    /// # Errors
    ///
    /// Reports a parse error for a malformed name; removing an absent
    /// name is an ordinary `Ok(None)`.
    pub fn remove_name(&mut self, name: &[u8]) -> Result<Option<T>, NameError> {
        let key = name_to_key(name)?;
        Ok(self.search(&key).and_then(|node| self.remove(node)))
    }
}
