//! The curves shipped with the crate.
//!
//! - `p256`: NIST P-256, the curve of the ECDSA keys.
//! - `war256`: Tom-256 in short Weierstrass form. Its group order is the field modulus of P-256 so
//!   P-256 coordinates are its scalars.
//! - `tomEdwards256`: the same curve as `war256` in twisted Edwards form, with a prime-order
//!   subgroup of cofactor 4 whose order is again the field modulus of P-256.

use super::group::{CurveModel, Group};
use crate::error::Error;
use ark_std::string::ToString;
use num::BigUint;
use std::sync::LazyLock;

fn hex(s: &str) -> BigUint {
    BigUint::parse_bytes(s.as_bytes(), 16).unwrap_or_default()
}

pub static P256: LazyLock<Group> = LazyLock::new(|| {
    Group::new(
        "p256",
        hex("ffffffff00000001000000000000000000000000ffffffffffffffffffffffff"),
        hex("ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551"),
        1,
        (
            hex("6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296"),
            hex("4fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5"),
        ),
        CurveModel::ShortWeierstrass {
            a: hex("ffffffff00000001000000000000000000000000fffffffffffffffffffffffc"),
            b: hex("5ac635d8aa3a93e7b3ebbd55769886bc651d06b0cc53b0f63bce3c3e27d2604b"),
        },
    )
});

pub static WAR256: LazyLock<Group> = LazyLock::new(|| {
    Group::new(
        "war256",
        hex("ffffffff0000000100000000000000017e72b42b30e7317793135661b1c4b117"),
        hex("ffffffff00000001000000000000000000000000ffffffffffffffffffffffff"),
        1,
        (
            hex("3"),
            hex("5a6dd32df58708e64e97345cbe66600decd9d538a351bb3c30b4954925b1f02d"),
        ),
        CurveModel::ShortWeierstrass {
            a: hex("ffffffff0000000100000000000000017e72b42b30e7317793135661b1c4b114"),
            b: hex("b441071b12f4a0366fb552f8e21ed4ac36b06aceeb354224863e60f20219fc56"),
        },
    )
});

pub static TOM_EDWARDS256: LazyLock<Group> = LazyLock::new(|| {
    Group::new(
        "tomEdwards256",
        hex("3fffffffc000000040000000000000002ae382c7957cc4ff9713c3d82bc47d3af"),
        hex("ffffffff00000001000000000000000000000000ffffffffffffffffffffffff"),
        4,
        (
            hex("7907055d0a7d4abc3eafdc25d431d9659fbe007ee2d8ddc4e906206ea9ba4fdb"),
            hex("be231cb9f9bf18319c9f081141559b0a33dddccd2221f0464a9cd57081b01a01"),
        ),
        CurveModel::TwistedEdwards {
            a: hex("1abce3fd8e1d7a21252515332a512e09d4249bd5b1ec35e316c02254fe8cedf5d"),
            d: hex("051781d9823abde00ec99295ba542c8b1401874bcbeb9e9c861174c7bca6a02aa"),
        },
    )
});

pub fn p256() -> &'static Group {
    &P256
}

pub fn war256() -> &'static Group {
    &WAR256
}

pub fn tom_edwards256() -> &'static Group {
    &TOM_EDWARDS256
}

/// Resolves the name used in serialized points, scalars and parameters
pub fn group_by_name(name: &str) -> Result<&'static Group, Error> {
    match name {
        "p256" => Ok(p256()),
        "war256" => Ok(war256()),
        "tomEdwards256" => Ok(tom_edwards256()),
        _ => Err(Error::UnknownGroup(name.to_string())),
    }
}
