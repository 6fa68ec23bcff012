//! Dyadic interval utilities and the trie node-id encoding.
//!
//! Every coordinate that takes part in the box algebra is a node id of an
//! implicit perfect binary trie of depth `D`: id `1` is the root (the whole
//! domain, a wildcard), each left/right descent shifts a `0`/`1` bit into the
//! id, and a concrete value `v` is the depth-`D` leaf `v | 2^D`. A node at
//! depth `d` covers a dyadic interval of `2^(D-d)` consecutive values.
//!
//! This single representation lets a concrete tuple coordinate and a dyadic
//! sub-range share one integer type and one containment/split algebra.

use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Number of significant bits in `x`. The trie depth of a node id is
/// `bit_length(id) - 1`; ids of a depth-`D` dimension use at most `D + 1` bits.
pub fn bit_length(x: &BigUint) -> u64 {
    x.bits()
}

/// The wildcard node id covering an entire dimension.
pub fn wildcard() -> BigUint {
    BigUint::one()
}

/// Node id of the depth-`depth` leaf for the raw value `v`.
pub fn leaf(v: &BigUint, depth: u64) -> BigUint {
    v | (BigUint::one() << depth)
}

/// Dimension-wise ancestor test: true iff `a` is a trie ancestor of (or equal
/// to) `b`, i.e. `a` is a prefix of `b` in the bit encoding.
pub fn is_ancestor(a: &BigUint, b: &BigUint) -> bool {
    let (la, lb) = (a.bits(), b.bits());
    la <= lb && (b >> (lb - la)) == *a
}

/// Split the half-open range `[lo, hi)` of a depth-`depth` domain into the
/// minimal set of pairwise-disjoint dyadic blocks, returned as trie node ids.
///
/// The gap construction phrases its ranges as open intervals `(start, end)`
/// excluding both endpoints; callers express that here as `[start + 1, end)`.
/// Returns an empty vec when the range has no points.
pub fn decompose(lo: &BigUint, hi: &BigUint, depth: u64) -> Vec<BigUint> {
    let mut out = Vec::new();
    if lo < hi {
        cover(BigUint::one(), &BigUint::zero(), depth, lo, hi, &mut out);
    }
    out
}

/// Emit the maximal dyadic blocks of `[lo, hi)` that lie under the node `id`,
/// which spans `[base, base + 2^size)`.
fn cover(id: BigUint, base: &BigUint, size: u64, lo: &BigUint, hi: &BigUint, out: &mut Vec<BigUint>) {
    let end = base + (BigUint::one() << size);
    if hi <= base || &end <= lo {
        return;
    }
    if lo <= base && &end <= hi {
        out.push(id);
        return;
    }
    // A partially covered node always has room to descend: a depth-D leaf is
    // either fully inside or fully outside the range.
    debug_assert!(size > 0);
    let half = size - 1;
    let mid = base + (BigUint::one() << half);
    let left = &id << 1u32;
    let right = &left | BigUint::one();
    cover(left, base, half, lo, hi, out);
    cover(right, &mid, half, lo, hi, out);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(v: u64) -> BigUint {
        BigUint::from(v)
    }

    fn ids(blocks: &[u64]) -> Vec<BigUint> {
        blocks.iter().map(|&b| big(b)).collect()
    }

    #[test]
    fn leaf_sets_marker() {
        assert_eq!(leaf(&big(5), 3), big(0b1101));
        assert_eq!(leaf(&big(0), 8), big(1 << 8));
    }

    #[test]
    fn ancestor_tests() {
        // 0b1 (root) is an ancestor of everything.
        assert!(is_ancestor(&big(1), &big(0b1011)));
        // 0b10 covers the lower half; 0b1011 lives in it.
        assert!(is_ancestor(&big(0b10), &big(0b1011)));
        assert!(!is_ancestor(&big(0b11), &big(0b1011)));
        // Not reflexive-breaking: equal ids contain each other.
        assert!(is_ancestor(&big(0b1011), &big(0b1011)));
        // A deeper id never contains a shallower one.
        assert!(!is_ancestor(&big(0b1011), &big(0b10)));
    }

    #[test]
    fn decompose_empty_range() {
        assert!(decompose(&big(4), &big(4), 3).is_empty());
        assert!(decompose(&big(5), &big(4), 3).is_empty());
    }

    #[test]
    fn decompose_whole_domain() {
        assert_eq!(decompose(&big(0), &big(8), 3), ids(&[1]));
    }

    #[test]
    fn decompose_low_run() {
        // [0, 3) over D=3: block [0,2) at depth 2 (id 0b100) + leaf 2 (0b1010).
        assert_eq!(decompose(&big(0), &big(3), 3), ids(&[0b100, 0b1010]));
    }

    #[test]
    fn decompose_interior() {
        // (1, 6) open = [2, 6): blocks [2,4) and [4,6).
        assert_eq!(decompose(&big(2), &big(6), 3), ids(&[0b101, 0b110]));
    }

    #[test]
    fn decompose_above_value() {
        // (5, 8) open = [6, 8): one depth-2 block.
        assert_eq!(decompose(&big(6), &big(8), 3), ids(&[0b111]));
    }

    #[test]
    fn decompose_single_point() {
        assert_eq!(decompose(&big(5), &big(6), 3), ids(&[0b1101]));
    }

    #[test]
    fn decompose_covers_exactly() {
        // Brute-force check over the full D=4 domain.
        let depth = 4u64;
        for lo in 0u64..=16 {
            for hi in lo..=16 {
                let blocks = decompose(&big(lo), &big(hi), depth);
                let mut covered = vec![false; 16];
                for id in &blocks {
                    let d = id.bits() - 1;
                    let size = 1u64 << (depth - d);
                    let start: u64 =
                        ((id - (BigUint::one() << d)) << (depth - d)).try_into().unwrap();
                    for v in start..start + size {
                        assert!(!covered[v as usize], "overlap at {v}");
                        covered[v as usize] = true;
                    }
                }
                for v in 0..16u64 {
                    assert_eq!(covered[v as usize], v >= lo && v < hi);
                }
            }
        }
    }
}
