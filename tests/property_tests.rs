//! Randomized invariant checks over the geometric primitives and the index.

use std::collections::BTreeSet;

use num_bigint::BigUint;
use proptest::prelude::*;

use tetrisdb::{
    decompose, is_ancestor, leaf, AttrKind, Attribute, DuplicatePolicy, DyadicBox, EngineConfig,
    OrderedIndex, Relation, Schema, Tuple,
};

const DEPTH: u64 = 8;

fn two_byte_schema() -> Schema {
    Schema::new(vec![
        Attribute::new("a", AttrKind::Int, 1),
        Attribute::new("b", AttrKind::Int, 1),
    ])
}

fn point(values: &[u64]) -> DyadicBox {
    DyadicBox::from_tuple(&Tuple::from_u64s(values), &two_byte_schema())
}

/// An arbitrary valid node id at depth <= DEPTH: a leading one bit followed
/// by up to DEPTH path bits.
fn node_id() -> impl Strategy<Value = BigUint> {
    (0u64..=DEPTH).prop_flat_map(|d| (0u64..(1 << d)).prop_map(move |p| BigUint::from((1 << d) | p)))
}

/// The half-open interval of leaves a node id covers.
fn leaf_range(id: &BigUint) -> (u64, u64) {
    let bits = id.bits();
    let shift = DEPTH + 1 - bits;
    let id = u64::try_from(id).unwrap();
    let lo = (id << shift) & ((1 << DEPTH) - 1);
    (lo, lo + (1 << shift))
}

proptest! {
    #[test]
    fn ancestor_agrees_with_leaf_ranges(a in node_id(), b in node_id()) {
        let (alo, ahi) = leaf_range(&a);
        let (blo, bhi) = leaf_range(&b);
        prop_assert_eq!(is_ancestor(&a, &b), alo <= blo && bhi <= ahi);
    }

    #[test]
    fn decompose_covers_exactly(lo in 0u64..256, hi in 0u64..=256) {
        let blocks = decompose(&BigUint::from(lo), &BigUint::from(hi), DEPTH);
        let mut covered = BTreeSet::new();
        for block in &blocks {
            let (blo, bhi) = leaf_range(block);
            for v in blo..bhi {
                // Disjointness: no leaf may appear under two blocks.
                prop_assert!(covered.insert(v), "leaf {v} covered twice");
            }
        }
        let want: BTreeSet<u64> = (lo..hi.min(256)).collect();
        prop_assert_eq!(covered, want);
    }

    #[test]
    fn decompose_is_minimal(lo in 0u64..256, hi in 0u64..=256) {
        // No two emitted blocks are siblings; a sibling pair would merge.
        let blocks = decompose(&BigUint::from(lo), &BigUint::from(hi), DEPTH);
        for a in &blocks {
            for b in &blocks {
                if a < b {
                    prop_assert_ne!(a.clone() ^ b.clone(), BigUint::from(1u32));
                }
            }
        }
    }

    #[test]
    fn contains_is_reflexive_and_leaf_consistent(a in node_id(), b in node_id()) {
        let ab = DyadicBox::new(vec![a.clone(), b.clone()]);
        prop_assert!(ab.contains(&ab));
        let la = leaf_range(&a).0;
        let lb = leaf_range(&b).0;
        prop_assert!(ab.contains(&point(&[la, lb])));
    }

    #[test]
    fn split_then_resolve_is_identity(a in node_id(), b in node_id()) {
        let schema = two_byte_schema();
        let parent = DyadicBox::new(vec![a, b]);
        if !parent.is_point(&schema) {
            let (left, right) = parent.split(&schema).unwrap();
            prop_assert!(parent.contains(&left));
            prop_assert!(parent.contains(&right));
            prop_assert_eq!(left.resolve(&right).unwrap(), parent);
        }
    }

    #[test]
    fn point_box_round_trips(x in 0u64..256, y in 0u64..256) {
        let schema = two_byte_schema();
        let tuple = Tuple::from_u64s(&[x, y]);
        let b = DyadicBox::from_tuple(&tuple, &schema);
        prop_assert!(b.is_point(&schema));
        prop_assert_eq!(b.to_tuple(&schema).unwrap(), tuple);
    }

    #[test]
    fn index_iterates_in_sorted_order(values in prop::collection::vec(0u64..10_000, 0..200)) {
        let mut index = OrderedIndex::with_seed(DuplicatePolicy::Allow, 7);
        for v in &values {
            index.insert(*v).unwrap();
        }
        let mut sorted = values.clone();
        sorted.sort_unstable();
        let got: Vec<u64> = index.iter().copied().collect();
        prop_assert_eq!(got, sorted);
    }

    #[test]
    fn index_neighbours_match_sorted_scan(
        values in prop::collection::btree_set(0u64..500, 0..60),
        probe in 0u64..500,
    ) {
        let mut index = OrderedIndex::with_seed(DuplicatePolicy::Reject, 7);
        for v in &values {
            index.insert(*v).unwrap();
        }
        let (pred, succ) = index.neighbours(&probe);
        prop_assert_eq!(pred.copied(), values.range(..probe).next_back().copied());
        prop_assert_eq!(succ.copied(), values.range(probe..).next().copied());
    }

    #[test]
    fn gaps_never_cover_stored_tuples(
        stored in prop::collection::btree_set((0u64..256, 0u64..256), 1..30),
        probe in (0u64..256, 0u64..256),
    ) {
        let schema = two_byte_schema();
        let mut relation = Relation::new("r", schema.clone(), &EngineConfig::default()).unwrap();
        for (x, y) in &stored {
            relation.insert(Tuple::from_u64s(&[*x, *y])).unwrap();
        }
        let probe_tuple = Tuple::from_u64s(&[probe.0, probe.1]);
        let gaps = relation.gaps(&probe_tuple).unwrap();
        for (x, y) in &stored {
            let p = point(&[*x, *y]);
            prop_assert!(
                !gaps.iter().any(|g| g.contains(&p)),
                "stored ({x}, {y}) inside a gap for probe {probe_tuple}"
            );
        }
        if relation.contains(&probe_tuple) {
            prop_assert!(gaps.is_empty());
        } else {
            let p = point(&[probe.0, probe.1]);
            prop_assert!(gaps.iter().any(|g| g.contains(&p)));
        }
    }

    #[test]
    fn gap_leaves_are_leaf_encoded(v in 0u64..256, d in 0u64..=DEPTH) {
        // leaf() puts the marker bit above the value; walking d levels back up
        // must stay an ancestor of the full-depth leaf.
        let full = leaf(&BigUint::from(v), DEPTH);
        let trimmed = full.clone() >> d;
        prop_assert!(is_ancestor(&trimmed, &full));
    }
}
