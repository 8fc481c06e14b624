use bst_map::{Error, OrderedMap};

use std::collections::{HashMap, HashSet};

use crate::Op;

/// Applies a set of operations to a map and a hashmap.
/// This way we can ensure that after a random smattering of inserts
/// and deletes we have the same set of keys in the map.
fn do_ops<K, V>(ops: &[Op<K, V>], bst: &mut OrderedMap<K, V>, map: &mut HashMap<K, V>)
where
    K: std::hash::Hash + Eq + Clone + Ord,
    V: std::fmt::Debug + PartialEq + Clone,
{
    for op in ops {
        match op {
            Op::Insert(k, v) => {
                bst.insert(k.clone(), v.clone());
                map.insert(k.clone(), v.clone());
            }
            Op::Remove(k) => {
                assert_eq!(bst.erase(k), map.remove(k));
            }
        }
    }
}

quickcheck::quickcheck! {
    fn fuzz_multiple_operations_i8(ops: Vec<Op<i8, i8>>) -> bool {
        let mut bst = OrderedMap::new();
        let mut map = HashMap::new();

        do_ops(&ops, &mut bst, &mut map);
        bst.len() == map.len() && map.keys().all(|key| bst.find(key).ok() == map.get(key))
    }

    fn contains(xs: Vec<i8>) -> bool {
        let mut bst = OrderedMap::new();
        for x in &xs {
            bst.insert(*x, *x);
        }

        xs.iter().all(|x| bst.contains(x) && bst.find(x) == Ok(x))
    }

    fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
        let mut bst = OrderedMap::new();
        for x in &xs {
            bst.insert(*x, *x);
        }
        let added: HashSet<_> = xs.into_iter().collect();
        let nots: HashSet<_> = nots.into_iter().collect();
        let mut nots = nots.difference(&added);

        nots.all(|x| !bst.contains(x) && bst.find(x) == Err(Error::NotFound))
    }

    fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
        let mut bst = OrderedMap::new();
        for x in &xs {
            bst.insert(*x, *x);
        }
        for delete in &deletes {
            bst.erase(delete);
        }

        let mut still_present = xs;
        for delete in &deletes {
            // We may have inserted the same value multiple times - delete each one.
            while let Some(pos) = still_present.iter().position(|x| x == delete) {
                still_present.swap_remove(pos);
            }
        }
        let distinct: HashSet<_> = still_present.iter().collect();

        deletes.iter().all(|x| !bst.contains(x))
            && still_present.iter().all(|x| bst.contains(x))
            && bst.len() == distinct.len()
    }

    fn inserting_twice_is_idempotent(xs: Vec<(i8, i8)>) -> bool {
        let mut once = OrderedMap::new();
        let mut twice = OrderedMap::new();
        for (k, v) in &xs {
            once.insert(*k, *v);
            twice.insert(*k, *v);
            twice.insert(*k, *v);
        }

        format!("{:?}", once) == format!("{:?}", twice) && once.len() == twice.len()
    }

    fn min_and_max_are_extremes(xs: Vec<i16>) -> bool {
        let mut bst = OrderedMap::new();
        for x in &xs {
            bst.insert(*x, ());
        }

        match (xs.iter().min(), xs.iter().max()) {
            (Some(min), Some(max)) => {
                bst.min() == Ok((min, &())) && bst.max() == Ok((max, &()))
            }
            _ => bst.min() == Err(Error::EmptyContainer) && bst.max() == Err(Error::EmptyContainer),
        }
    }

    fn copies_are_independent(xs: Vec<i8>, ys: Vec<i8>) -> bool {
        let mut original = OrderedMap::new();
        for x in &xs {
            original.insert(*x, *x);
        }
        let snapshot = format!("{:?}", original);

        let mut copy = original.clone();
        for y in &ys {
            copy.insert(*y, y.wrapping_neg());
            copy.erase(&y.wrapping_add(1));
        }

        format!("{:?}", original) == snapshot
    }
}
