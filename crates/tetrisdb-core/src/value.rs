//! Typed attribute values and their order-preserving wide-integer encoding.
//!
//! The join itself only ever sees raw `BigUint` coordinates; this module is
//! the boundary where logical values become coordinates. The encoding is
//! chosen so that the coordinate order matches the natural value order:
//! integers map numerically, strings are left-aligned big-endian in the
//! attribute's byte width (lexicographic string order = integer order),
//! chars map to their code point, booleans to 0/1.

use num_bigint::BigUint;
use num_traits::{One, ToPrimitive, Zero};
use serde::{Deserialize, Serialize};

use crate::attribute::{AttrKind, Attribute, Schema};
use crate::error::{Error, Result};
use crate::tuple::Tuple;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Int(u64),
    Str(String),
    Char(char),
    Bool(bool),
}

impl Value {
    pub fn kind(&self) -> AttrKind {
        match self {
            Value::Int(_) => AttrKind::Int,
            Value::Str(_) => AttrKind::Str,
            Value::Char(_) => AttrKind::Char,
            Value::Bool(_) => AttrKind::Bool,
        }
    }

    /// Encode this value as a raw coordinate of `attr`'s dimension.
    pub fn encode(&self, attr: &Attribute) -> Result<BigUint> {
        if self.kind() != attr.kind {
            return Err(Error::UnsupportedOperation(format!(
                "value kind {:?} does not match attribute '{}' ({:?})",
                self.kind(),
                attr.name,
                attr.kind
            )));
        }
        let raw = match self {
            Value::Int(v) => BigUint::from(*v),
            Value::Str(s) => {
                let bytes = s.as_bytes();
                if bytes.len() > attr.width {
                    return Err(Error::ValueOutOfLimits {
                        attribute: attr.name.clone(),
                        value: format!("{s:?}"),
                        bits: attr.depth(),
                    });
                }
                let mut padded = bytes.to_vec();
                padded.resize(attr.width, 0);
                BigUint::from_bytes_be(&padded)
            }
            Value::Char(c) => BigUint::from(*c as u32),
            Value::Bool(b) => {
                if *b {
                    BigUint::one()
                } else {
                    BigUint::zero()
                }
            }
        };
        if raw.bits() > attr.depth() {
            return Err(Error::ValueOutOfLimits {
                attribute: attr.name.clone(),
                value: raw.to_string(),
                bits: attr.depth(),
            });
        }
        Ok(raw)
    }

    /// Decode a raw coordinate back into a typed value.
    pub fn decode(raw: &BigUint, attr: &Attribute) -> Result<Value> {
        match attr.kind {
            AttrKind::Int => raw
                .to_u64()
                .map(Value::Int)
                .ok_or_else(|| Error::ValueOutOfLimits {
                    attribute: attr.name.clone(),
                    value: raw.to_string(),
                    bits: 64,
                }),
            AttrKind::Str => {
                let mut bytes = raw.to_bytes_be();
                if bytes.len() > attr.width {
                    return Err(Error::ValueOutOfLimits {
                        attribute: attr.name.clone(),
                        value: raw.to_string(),
                        bits: attr.depth(),
                    });
                }
                // Restore the left alignment the encoder used, then trim the
                // zero padding.
                let mut padded = vec![0u8; attr.width - bytes.len()];
                padded.append(&mut bytes);
                while padded.last() == Some(&0) {
                    padded.pop();
                }
                String::from_utf8(padded)
                    .map(Value::Str)
                    .map_err(|e| Error::UnsupportedOperation(format!("invalid utf-8: {e}")))
            }
            AttrKind::Char => {
                let cp = raw.to_u32().ok_or_else(|| Error::ValueOutOfLimits {
                    attribute: attr.name.clone(),
                    value: raw.to_string(),
                    bits: 32,
                })?;
                char::from_u32(cp)
                    .map(Value::Char)
                    .ok_or_else(|| Error::UnsupportedOperation(format!("invalid code point {cp}")))
            }
            AttrKind::Bool => {
                if raw.is_zero() {
                    Ok(Value::Bool(false))
                } else if raw.is_one() {
                    Ok(Value::Bool(true))
                } else {
                    Err(Error::ValueOutOfLimits {
                        attribute: attr.name.clone(),
                        value: raw.to_string(),
                        bits: 1,
                    })
                }
            }
        }
    }
}

impl Schema {
    /// Encode one typed value per attribute into a raw tuple.
    pub fn encode_tuple(&self, values: &[Value]) -> Result<Tuple> {
        if values.len() != self.arity() {
            return Err(Error::ArityMismatch {
                got: values.len(),
                expected: self.arity(),
            });
        }
        let raw = values
            .iter()
            .zip(self.iter())
            .map(|(v, a)| v.encode(a))
            .collect::<Result<Vec<_>>>()?;
        Ok(Tuple::new(raw))
    }

    /// Decode a raw tuple back into typed values.
    pub fn decode_tuple(&self, tuple: &Tuple) -> Result<Vec<Value>> {
        if tuple.arity() != self.arity() {
            return Err(Error::ArityMismatch {
                got: tuple.arity(),
                expected: self.arity(),
            });
        }
        tuple
            .iter()
            .zip(self.iter())
            .map(|(raw, a)| Value::decode(raw, a))
            .collect()
    }
}
