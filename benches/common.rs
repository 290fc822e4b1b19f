use nametrie::RadixTree;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::BTreeSet;

/// Distinct random keys over a 16-letter alphabet, so branch points stay
/// narrow and splits are frequent.
pub fn generated_keys(count: usize, max_len: usize, seed: u64) -> Vec<Vec<u8>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut keys = BTreeSet::new();
    while keys.len() < count {
        let len = rng.random_range(1..=max_len);
        let key: Vec<u8> = (0..len).map(|_| rng.random_range(b'a'..=b'p')).collect();
        keys.insert(key);
    }
    keys.into_iter().collect()
}

pub fn populated_tree(keys: &[Vec<u8>]) -> RadixTree<usize> {
    let mut tree = RadixTree::new();
    for (i, key) in keys.iter().enumerate() {
        tree.insert(key, i).expect("generated keys are distinct");
    }
    tree
}
