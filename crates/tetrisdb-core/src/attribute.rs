//! Static column descriptors. Pure data; immutable once a relation exists.

use num_bigint::BigUint;
use num_traits::One;
use serde::{Deserialize, Serialize};

/// Logical kind of an attribute's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttrKind {
    Int,
    Str,
    Char,
    Bool,
}

/// A column descriptor: name, logical kind, and byte width.
///
/// The byte width fixes the dimension's bit depth `D = width * 8`; every raw
/// value of this attribute lies in `[0, 2^D)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub kind: AttrKind,
    pub width: usize,
}

impl Attribute {
    pub fn new(name: impl Into<String>, kind: AttrKind, width: usize) -> Self {
        Self {
            name: name.into(),
            kind,
            width,
        }
    }

    /// Bit depth of this dimension's domain.
    pub fn depth(&self) -> u64 {
        (self.width * 8) as u64
    }

    /// Leaf-level marker `1 << depth`. Or-ing it onto a raw value yields the
    /// value's trie node id; a set marker bit flags a fully specified dimension.
    pub fn marker(&self) -> BigUint {
        BigUint::one() << self.depth()
    }
}

/// An ordered list of attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub attributes: Vec<Attribute>,
}

impl Schema {
    pub fn new(attributes: Vec<Attribute>) -> Self {
        Self { attributes }
    }

    pub fn arity(&self) -> usize {
        self.attributes.len()
    }

    pub fn attribute(&self, idx: usize) -> Option<&Attribute> {
        self.attributes.get(idx)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.attributes.iter().position(|a| a.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter()
    }

    /// Total bit depth across all dimensions; one split consumes one bit, so
    /// this (plus one per dimension for the root level) bounds the probe
    /// recursion depth of a join over this schema.
    pub fn total_depth(&self) -> u64 {
        self.attributes.iter().map(|a| a.depth()).sum()
    }
}
