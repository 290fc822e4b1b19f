//! End-to-end use of the tree through the domain-name adapter: a
//! miniature zone store keyed by wire-format names.

use nametrie::{
    dname::{key_to_name, name_to_key, NameError},
    tests_common::generate_wire_names,
    visitor::WellFormedChecker,
    RadixTree,
};

#[test]
fn a_zone_tree_full_of_names_stays_ordered_and_well_formed() {
    let names = generate_wire_names(3, 3);
    let mut tree = RadixTree::new();
    for (i, name) in names.iter().enumerate() {
        tree.insert_name(name, i).unwrap();
    }
    assert_eq!(tree.len(), names.len());
    WellFormedChecker::check(&tree).unwrap();

    // traversal visits names in canonical order: sort the originals by
    // their key encoding and compare
    let mut expected: Vec<usize> = (0..names.len()).collect();
    expected.sort_by_key(|&i| name_to_key(&names[i]).unwrap());
    let order: Vec<usize> = tree.iter().map(|(_, v)| *v).collect();
    assert_eq!(order, expected);
}

#[test]
fn the_root_name_sorts_first() {
    let names = generate_wire_names(2, 2);
    let mut tree = RadixTree::new();
    for (i, name) in names.iter().enumerate() {
        tree.insert_name(name, i).unwrap();
    }
    // generate_wire_names yields the root name first
    let first = tree.first().unwrap();
    assert_eq!(tree.element(first), Some(&0));
}

#[test]
fn every_stored_name_survives_a_key_round_trip() {
    for name in generate_wire_names(3, 2) {
        let key = name_to_key(&name).unwrap();
        assert_eq!(key_to_name(&key).unwrap(), name);
    }
}

#[test]
fn find_name_less_equal_matches_canonical_name_order() {
    let mut tree = RadixTree::new();
    // apexes only
    tree.insert_name(b"\x00", "root").unwrap();
    tree.insert_name(b"\x03com\x00", "com").unwrap();
    tree.insert_name(b"\x07example\x03com\x00", "example.com").unwrap();

    // a name inside a zone lands on its apex; a name past a whole zone
    // subtree lands on the largest stored name before it
    let cases: [(&[u8], bool, &str); 4] = [
        (b"\x03www\x07example\x03com\x00", false, "example.com"),
        (b"\x01a\x03com\x00", false, "com"),
        (b"\x03org\x00", false, "example.com"),
        (b"\x07example\x03com\x00", true, "example.com"),
    ];
    for (probe, want_exact, want) in cases {
        let (exact, node) = tree.find_name_less_equal(probe).unwrap();
        assert_eq!(exact, want_exact, "probe {probe:?}");
        assert_eq!(tree.element(node.unwrap()), Some(&want), "probe {probe:?}");
    }
}

#[test]
fn removing_by_name_restores_structure() {
    let names = generate_wire_names(2, 3);
    let mut tree = RadixTree::new();
    for (i, name) in names.iter().enumerate() {
        tree.insert_name(name, i).unwrap();
    }
    let baseline = tree.len();

    // remove every second-level name, checking structure as we go
    let second_level: Vec<_> = names.iter().filter(|n| n.len() > 4).cloned().collect();
    assert!(!second_level.is_empty());
    for name in &second_level {
        assert!(tree.remove_name(name).unwrap().is_some());
        WellFormedChecker::check(&tree).unwrap();
    }
    assert_eq!(tree.len(), baseline - second_level.len());

    // gone from lookup, absent removes are no-ops
    for name in &second_level {
        assert_eq!(tree.search_name(name).unwrap(), None);
        assert_eq!(tree.remove_name(name).unwrap(), None);
    }
}

#[test]
fn parse_failures_never_touch_the_tree() {
    let mut tree = RadixTree::new();
    tree.insert_name(b"\x02ok\x00", 1).unwrap();

    let malformed: [&[u8]; 3] = [b"\x02ok", b"\xc0\x00", b"\x40ok\x00"];
    for name in malformed {
        assert!(tree.search_name(name).is_err());
        assert!(tree.remove_name(name).is_err());
        assert!(tree.insert_name(name, 9).is_err());
    }
    assert_eq!(tree.len(), 1);
    WellFormedChecker::check(&tree).unwrap();
}

#[test]
fn mixed_case_names_collide_as_duplicates() {
    let mut tree = RadixTree::new();
    tree.insert_name(b"\x04Zone\x02io\x00", 1).unwrap();
    let err = tree.insert_name(b"\x04zone\x02IO\x00", 2).unwrap_err();
    assert!(matches!(err, nametrie::dname::NameInsertError::Duplicate(_)));
    assert!(tree.search_name(b"\x04ZONE\x02Io\x00").unwrap().is_some());
}

#[test]
fn error_kinds_carry_positions() {
    assert_eq!(
        name_to_key(b"\x01a\x41bad"),
        Err(NameError::BadLabel { offset: 2 })
    );
    assert_eq!(name_to_key(b"\x01a"), Err(NameError::Truncated));
}
