#![no_main]

use libfuzzer_sys::arbitrary::{self, Arbitrary};
use nametrie::{visitor::WellFormedChecker, NodeRef, RadixTree};
use std::collections::{BTreeMap, HashMap};

#[derive(Arbitrary, Debug)]
enum Action {
    Insert(Box<[u8]>),
    Remove(Box<[u8]>),
    RemoveStale,
    Search(Box<[u8]>),
    FindLessEqual(Box<[u8]>),
    InsertName(Box<[u8]>),
    RemoveName(Box<[u8]>),
    CheckTraversal,
    Clear,
}

libfuzzer_sys::fuzz_target!(|actions: Vec<Action>| {
    let mut tree = RadixTree::<u32>::new();
    let mut oracle: BTreeMap<Box<[u8]>, u32> = BTreeMap::new();
    let mut handles: HashMap<Box<[u8]>, NodeRef> = HashMap::new();
    let mut spent: Vec<NodeRef> = Vec::new();
    let mut next_value = 0u32;

    for action in actions {
        match action {
            Action::Insert(key) => {
                let value = next_value;
                next_value += 1;
                match tree.insert(&key, value) {
                    Ok(node) => {
                        assert!(oracle.insert(key.clone(), value).is_none());
                        handles.insert(key, node);
                    }
                    Err(err) => {
                        assert!(oracle.contains_key(&key));
                        assert_eq!(err.value, value);
                    }
                }
            }
            Action::Remove(key) => match oracle.remove(&key) {
                Some(expected) => {
                    let handle = handles.remove(&key).unwrap();
                    assert_eq!(tree.remove(handle), Some(expected));
                    spent.push(handle);
                }
                None => assert!(tree.search(&key).is_none()),
            },
            Action::RemoveStale => {
                // spent handles must stay inert no matter what happened since
                if let Some(handle) = spent.pop() {
                    assert_eq!(tree.remove(handle), None);
                    assert_eq!(tree.element(handle), None);
                }
            }
            Action::Search(key) => {
                let got = tree.search(&key).and_then(|n| tree.element(n));
                assert_eq!(got, oracle.get(&key));
            }
            Action::FindLessEqual(key) => {
                let (exact, node) = tree.find_less_equal(&key);
                match oracle.range(..=key.clone()).next_back() {
                    Some((expected_key, expected_value)) => {
                        assert_eq!(exact, *expected_key == key);
                        assert_eq!(tree.element(node.unwrap()), Some(expected_value));
                    }
                    None => {
                        assert!(!exact);
                        assert!(node.is_none());
                    }
                }
            }
            Action::InsertName(name) => {
                let value = next_value;
                next_value += 1;
                if let Ok(key) = nametrie::dname::name_to_key(&name) {
                    let key: Box<[u8]> = key.into();
                    match tree.insert(&key, value) {
                        Ok(node) => {
                            assert!(oracle.insert(key.clone(), value).is_none());
                            handles.insert(key, node);
                        }
                        Err(_) => assert!(oracle.contains_key(&key)),
                    }
                } else {
                    assert!(tree.insert_name(&name, value).is_err());
                }
            }
            Action::RemoveName(name) => {
                if let Ok(key) = nametrie::dname::name_to_key(&name) {
                    let key: Box<[u8]> = key.into();
                    let expected = oracle.remove(&key);
                    if expected.is_some() {
                        if let Some(handle) = handles.remove(&key) {
                            spent.push(handle);
                        }
                    }
                    assert_eq!(tree.remove_name(&name).unwrap(), expected);
                }
            }
            Action::CheckTraversal => {
                WellFormedChecker::check(&tree).unwrap();
                assert_eq!(tree.len(), oracle.len());
                let values: Vec<u32> = tree.iter().map(|(_, v)| *v).collect();
                let expected: Vec<u32> = oracle.values().copied().collect();
                assert_eq!(values, expected);
            }
            Action::Clear => {
                tree.clear();
                oracle.clear();
                spent.extend(handles.drain().map(|(_, handle)| handle));
            }
        }
    }

    WellFormedChecker::check(&tree).unwrap();
});
