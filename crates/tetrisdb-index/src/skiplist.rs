//! Arena-backed skip list.
//!
//! Nodes live in a `Vec` arena and link forward by index, which keeps the
//! structure in safe Rust with no reference counting. Tower heights come from
//! a fair coin of a seedable RNG, so a seeded index is fully replayable.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use tetrisdb_core::config::DuplicatePolicy;
use tetrisdb_core::error::{Error, Result};

const MAX_LEVEL: usize = 32;

struct Node<T> {
    value: T,
    /// Forward pointer per level, up to this node's tower height.
    forward: Vec<Option<usize>>,
}

/// A probabilistically balanced ordered container.
///
/// Iteration always yields values in ascending order. Equal values are
/// either rejected or kept adjacent, per the configured policy.
pub struct OrderedIndex<T> {
    nodes: Vec<Node<T>>,
    /// Forward pointers out of the virtual head, one per level.
    head: Vec<Option<usize>>,
    /// Highest level currently in use.
    level: usize,
    len: usize,
    policy: DuplicatePolicy,
    rng: StdRng,
}

impl<T: Ord + fmt::Display> OrderedIndex<T> {
    pub fn new(policy: DuplicatePolicy) -> Self {
        Self::with_rng(policy, StdRng::from_entropy())
    }

    /// Deterministic tower heights for replayable runs.
    pub fn with_seed(policy: DuplicatePolicy, seed: u64) -> Self {
        Self::with_rng(policy, StdRng::seed_from_u64(seed))
    }

    fn with_rng(policy: DuplicatePolicy, rng: StdRng) -> Self {
        Self {
            nodes: Vec::new(),
            head: vec![None; MAX_LEVEL],
            level: 1,
            len: 0,
            policy,
            rng,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    fn next_of(&self, at: Option<usize>, level: usize) -> Option<usize> {
        match at {
            None => self.head[level],
            Some(i) => self.nodes[i].forward[level],
        }
    }

    fn random_height(&mut self) -> usize {
        let mut h = 1;
        while h < MAX_LEVEL && self.rng.gen::<bool>() {
            h += 1;
        }
        h
    }

    /// Insert `value`, keeping the list sorted. Expected O(log n).
    pub fn insert(&mut self, value: T) -> Result<()> {
        // Per level, the last node (None = head) strictly below `value`.
        let mut update: [Option<usize>; MAX_LEVEL] = [None; MAX_LEVEL];
        let mut at: Option<usize> = None;
        for level in (0..self.level).rev() {
            while let Some(next) = self.next_of(at, level) {
                if self.nodes[next].value < value {
                    at = Some(next);
                } else {
                    break;
                }
            }
            update[level] = at;
        }

        if self.policy == DuplicatePolicy::Reject {
            if let Some(succ) = self.next_of(at, 0) {
                if self.nodes[succ].value == value {
                    return Err(Error::DuplicateTuple(value.to_string()));
                }
            }
        }

        let height = self.random_height();
        if height > self.level {
            for slot in update.iter_mut().take(height).skip(self.level) {
                *slot = None;
            }
            self.level = height;
        }

        let idx = self.nodes.len();
        let mut forward = vec![None; height];
        for (level, slot) in forward.iter_mut().enumerate() {
            *slot = self.next_of(update[level], level);
        }
        for (level, &prev) in update.iter().enumerate().take(height) {
            match prev {
                None => self.head[level] = Some(idx),
                Some(i) => self.nodes[i].forward[level] = Some(idx),
            }
        }
        self.nodes.push(Node { value, forward });
        self.len += 1;
        Ok(())
    }

    /// Strict predecessor and first value `>= probe`, in one descent.
    pub fn neighbours(&self, probe: &T) -> (Option<&T>, Option<&T>) {
        let mut at: Option<usize> = None;
        for level in (0..self.level).rev() {
            while let Some(next) = self.next_of(at, level) {
                if self.nodes[next].value < *probe {
                    at = Some(next);
                } else {
                    break;
                }
            }
        }
        let pred = at.map(|i| &self.nodes[i].value);
        let succ = self.next_of(at, 0).map(|i| &self.nodes[i].value);
        (pred, succ)
    }

    pub fn contains(&self, probe: &T) -> bool {
        matches!(self.neighbours(probe), (_, Some(succ)) if succ == probe)
    }

    /// In-order iteration over the level-0 chain.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            index: self,
            at: self.head[0],
        }
    }
}

pub struct Iter<'a, T> {
    index: &'a OrderedIndex<T>,
    at: Option<usize>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let i = self.at?;
        let node = &self.index.nodes[i];
        self.at = node.forward[0];
        Some(&node.value)
    }
}

impl<T: Ord + fmt::Display> fmt::Debug for OrderedIndex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedIndex")
            .field("len", &self.len)
            .field("level", &self.level)
            .finish()
    }
}
