//! Key-set generators shared by unit tests, integration tests, and
//! benches. Not part of the public API.

use std::iter;

/// Keys of strictly increasing length where each key is all-zero except
/// for a final high byte: `[255]`, `[0, 255]`, `[0, 0, 255]`, and so on
/// up to `max_len` bytes. Every key diverges from every other at its
/// first byte or extends a shared zero run, which exercises both deep
/// label chains and first/last edge handling.
pub fn generate_keys_skewed(max_len: usize) -> impl Iterator<Item = Box<[u8]>> {
    iter::successors(Some(vec![u8::MAX; 1].into_boxed_slice()), move |prev| {
        if prev.len() < max_len {
            let mut key = vec![u8::MIN; prev.len()];
            key.push(u8::MAX);
            Some(key.into_boxed_slice())
        } else {
            None
        }
    })
}

/// Every key of exactly `len` bytes where each byte takes one of
/// `stops + 1` evenly spaced values, yielded in ascending lexicographic
/// order. `stops = 4` gives byte values `{0, 63, 126, 189, 252}` and
/// `(stops + 1)^len` keys in total.
pub fn generate_key_fixed_length(len: usize, stops: u8) -> impl Iterator<Item = Box<[u8]>> {
    let step = u8::MAX / stops;
    let values: Vec<u8> = (0..=stops).map(|i| i * step).collect();
    let mut counters = vec![0usize; len];
    let mut done = false;
    iter::from_fn(move || {
        if done {
            return None;
        }
        let key: Box<[u8]> = counters.iter().map(|&c| values[c]).collect();
        let mut digit = len;
        loop {
            if digit == 0 {
                done = true;
                break;
            }
            digit -= 1;
            if counters[digit] + 1 < values.len() {
                counters[digit] += 1;
                break;
            }
            counters[digit] = 0;
        }
        Some(key)
    })
}

/// Wire-format names for every leaf of a synthetic zone tree `depth`
/// labels deep with `width` children per label, root-ward labels last.
/// Handy for exercising the domain-name codec against realistic shapes.
pub fn generate_wire_names(depth: usize, width: u8) -> Vec<Vec<u8>> {
    let mut names = vec![vec![0u8]];
    let mut frontier = vec![Vec::<u8>::new()];
    for level in 0..depth {
        let mut next = Vec::new();
        for prefix in &frontier {
            for child in 0..width {
                // single printable label per level/child pair
                let label = [b'a' + (level as u8 % 26), b'a' + (child % 26)];
                let mut name = vec![label.len() as u8];
                name.extend_from_slice(&label);
                name.extend_from_slice(prefix);
                let mut wire = name.clone();
                wire.push(0);
                names.push(wire);
                next.push(name);
            }
        }
        frontier = next;
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skewed_keys_are_distinct_and_bounded() {
        let keys: Vec<_> = generate_keys_skewed(6).collect();
        assert_eq!(keys.len(), 6);
        assert!(keys.iter().all(|k| k.len() <= 6));
        let mut dedup = keys.clone();
        dedup.sort();
        dedup.dedup();
        assert_eq!(dedup.len(), keys.len());
    }

    #[test]
    fn fixed_length_keys_come_out_sorted() {
        let keys: Vec<_> = generate_key_fixed_length(2, 4).collect();
        assert_eq!(keys.len(), 25);
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn wire_names_parse_and_cover_all_levels() {
        let names = generate_wire_names(2, 3);
        // root + 3 + 9
        assert_eq!(names.len(), 13);
        for name in &names {
            crate::dname::name_to_key(name).expect("generated names are valid");
        }
    }
}
