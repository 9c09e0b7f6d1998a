//! Serde helpers for big integers, written as `serde_with` adapters so that they compose with
//! `Option`, `Vec`, etc. through `#[serde_as]`.

use crate::error::ArithmeticError;
use ark_std::{format, string::String};
use num::{traits::Num, BigUint};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_with::{DeserializeAs, SerializeAs};

/// Writes a `BigUint` as a lowercase hex string with a `0x` prefix, e.g. `"0x1f"`. Reading accepts
/// the prefix as optional.
pub struct HexBigUint;

impl HexBigUint {
    pub fn serialize<S: Serializer>(x: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
        Serialize::serialize(&to_hex(x), serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigUint, D::Error> {
        let s: String = Deserialize::deserialize(deserializer)?;
        from_hex(&s).map_err(|e| serde::de::Error::custom(format!("{:?}", e)))
    }
}

impl SerializeAs<BigUint> for HexBigUint {
    fn serialize_as<S>(x: &BigUint, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Self::serialize(x, serializer)
    }
}

impl<'de> DeserializeAs<'de, BigUint> for HexBigUint {
    fn deserialize_as<D>(deserializer: D) -> Result<BigUint, D::Error>
    where
        D: Deserializer<'de>,
    {
        Self::deserialize(deserializer)
    }
}

pub fn to_hex(x: &BigUint) -> String {
    format!("0x{}", x.to_str_radix(16))
}

pub fn from_hex(s: &str) -> Result<BigUint, ArithmeticError> {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    if digits.is_empty() {
        return Err(ArithmeticError::InvalidHex(s.into()));
    }
    BigUint::from_str_radix(digits, 16).map_err(|_| ArithmeticError::InvalidHex(s.into()))
}
