//! Integers modulo the order of a [`Group`]. A scalar is always kept reduced.

use super::{group::Group, instances::group_by_name};
use crate::error::Error;
use ark_std::{
    cmp::Ordering,
    fmt,
    ops::{Add, Mul, Neg, Sub},
    string::String,
    vec::Vec,
};
use num::{
    traits::{One, Zero},
    BigUint,
};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use zkattest_utils::{
    modular::{add_mod, inv_mod, mul_mod, neg_mod, nibbles, sub_mod, to_be_bytes_fixed},
    serde_utils::HexBigUint,
};

#[derive(Clone, Serialize, Deserialize)]
#[serde(try_from = "ScalarRepr", into = "ScalarRepr")]
pub struct Scalar {
    group: &'static Group,
    k: BigUint,
}

#[serde_as]
#[derive(Serialize, Deserialize)]
struct ScalarRepr {
    group: String,
    #[serde_as(as = "HexBigUint")]
    k: BigUint,
}

impl Scalar {
    pub(crate) fn new(group: &'static Group, k: BigUint) -> Self {
        let k = if k < *group.order() { k } else { k % group.order() };
        Self { group, k }
    }

    pub fn group(&self) -> &'static Group {
        self.group
    }

    pub fn value(&self) -> &BigUint {
        &self.k
    }

    pub fn into_value(self) -> BigUint {
        self.k
    }

    pub fn is_zero(&self) -> bool {
        self.k.is_zero()
    }

    pub fn is_one(&self) -> bool {
        self.k.is_one()
    }

    pub fn inverse(&self) -> Result<Self, Error> {
        Ok(Self::new(self.group, inv_mod(&self.k, self.group.order())?))
    }

    pub fn square(&self) -> Self {
        self * self
    }

    pub fn pow(&self, exp: u64) -> Self {
        Self::new(
            self.group,
            self.k.modpow(&BigUint::from(exp), self.group.order()),
        )
    }

    /// Big-endian bytes padded to the size of a field element of the group
    pub fn to_bytes(&self) -> Vec<u8> {
        // The order never has more bytes than the field modulus so this cannot fail
        to_be_bytes_fixed(&self.k, self.group.size_field_bytes())
            .unwrap_or_else(|_| self.k.to_bytes_be())
    }

    /// Base-16 digits, most significant first
    pub(crate) fn nibbles(&self) -> Vec<u8> {
        nibbles(&self.k)
    }

    fn assert_compatible(&self, other: &Self) {
        assert!(
            self.group == other.group,
            "scalars of groups {} and {} cannot be combined",
            self.group,
            other.group
        );
    }
}

impl fmt::Debug for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scalar({}, 0x{:x})", self.group, self.k)
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        self.group == other.group && self.k == other.k
    }
}

impl Eq for Scalar {}

impl PartialOrd for Scalar {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Orders by the canonical representative. Only meaningful within one group.
impl Ord for Scalar {
    fn cmp(&self, other: &Self) -> Ordering {
        self.k.cmp(&other.k)
    }
}

impl<'a> Add<&'a Scalar> for &'a Scalar {
    type Output = Scalar;

    fn add(self, rhs: &'a Scalar) -> Scalar {
        self.assert_compatible(rhs);
        Scalar {
            group: self.group,
            k: add_mod(&self.k, &rhs.k, self.group.order()),
        }
    }
}

impl<'a> Sub<&'a Scalar> for &'a Scalar {
    type Output = Scalar;

    fn sub(self, rhs: &'a Scalar) -> Scalar {
        self.assert_compatible(rhs);
        Scalar {
            group: self.group,
            k: sub_mod(&self.k, &rhs.k, self.group.order()),
        }
    }
}

impl<'a> Mul<&'a Scalar> for &'a Scalar {
    type Output = Scalar;

    fn mul(self, rhs: &'a Scalar) -> Scalar {
        self.assert_compatible(rhs);
        Scalar {
            group: self.group,
            k: mul_mod(&self.k, &rhs.k, self.group.order()),
        }
    }
}

impl<'a> Neg for &'a Scalar {
    type Output = Scalar;

    fn neg(self) -> Scalar {
        Scalar {
            group: self.group,
            k: neg_mod(&self.k, self.group.order()),
        }
    }
}

impl Neg for Scalar {
    type Output = Scalar;

    fn neg(self) -> Scalar {
        -&self
    }
}

macro_rules! impl_owned_scalar_ops {
    ($($trait: ident, $fn: ident);*) => {
        $(
            impl $trait<Scalar> for Scalar {
                type Output = Scalar;

                fn $fn(self, rhs: Scalar) -> Scalar {
                    (&self).$fn(&rhs)
                }
            }

            impl<'a> $trait<&'a Scalar> for Scalar {
                type Output = Scalar;

                fn $fn(self, rhs: &'a Scalar) -> Scalar {
                    (&self).$fn(rhs)
                }
            }
        )*
    };
}

impl_owned_scalar_ops!(Add, add; Sub, sub; Mul, mul);

impl From<Scalar> for ScalarRepr {
    fn from(s: Scalar) -> Self {
        Self {
            group: String::from(s.group.name()),
            k: s.k,
        }
    }
}

impl TryFrom<ScalarRepr> for Scalar {
    type Error = Error;

    fn try_from(repr: ScalarRepr) -> Result<Self, Error> {
        group_by_name(&repr.group)?.scalar_checked(repr.k)
    }
}
