//! Certificate store: the per-execution memo of boxes proven empty.
//!
//! A `k`-dimensional box is stored as a chain of `k` node ids through nested
//! per-dimension levels; the innermost level's presence marks the box. A
//! witness lookup walks each query id from its own depth up toward the root,
//! recursing into every stored ancestor-or-equal id, and returns the first
//! chain that matches in all dimensions. One store lives exactly as long as
//! one join execution.

use std::collections::HashMap;

use num_bigint::BigUint;

use tetrisdb_core::boxes::DyadicBox;

#[derive(Default)]
struct Level {
    children: HashMap<BigUint, Level>,
}

pub struct CertificateStore {
    root: Level,
    arity: usize,
    len: usize,
}

impl CertificateStore {
    pub fn new(arity: usize) -> Self {
        Self {
            root: Level::default(),
            arity,
            len: 0,
        }
    }

    /// Number of distinct boxes inserted so far.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn insert(&mut self, b: &DyadicBox) {
        debug_assert_eq!(b.arity(), self.arity);
        let mut level = &mut self.root;
        let mut fresh = false;
        for id in b.ids() {
            if !level.children.contains_key(id) {
                fresh = true;
            }
            level = level.children.entry(id.clone()).or_default();
        }
        if fresh {
            self.len += 1;
        }
    }

    /// The first previously-inserted box found that contains `b`, or `None`.
    ///
    /// Contract: a returned witness always satisfies `witness.contains(b)`.
    pub fn witness(&self, b: &DyadicBox) -> Option<DyadicBox> {
        debug_assert_eq!(b.arity(), self.arity);
        let mut path = Vec::with_capacity(self.arity);
        if Self::search(&self.root, b.ids(), &mut path) {
            Some(DyadicBox::new(path))
        } else {
            None
        }
    }

    /// Depth-first over dimensions: try every stored ancestor-or-equal of the
    /// query id, deepest first.
    fn search(level: &Level, ids: &[BigUint], path: &mut Vec<BigUint>) -> bool {
        let Some((first, rest)) = ids.split_first() else {
            return true;
        };
        let mut candidate = first.clone();
        loop {
            if let Some(child) = level.children.get(&candidate) {
                path.push(candidate.clone());
                if Self::search(child, rest, path) {
                    return true;
                }
                path.pop();
            }
            if candidate.bits() <= 1 {
                return false;
            }
            candidate >>= 1;
        }
    }
}
