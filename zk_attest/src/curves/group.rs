//! Descriptors of the prime-order (sub)groups of elliptic curves used by the protocols. A [`Group`]
//! is immutable and lives for the whole program, so points and scalars keep a `&'static Group`.

use super::{
    edwards::ExtendedPoint,
    field::Fp,
    instances::group_by_name,
    point::{Coordinates, Point},
    scalar::Scalar,
    weierstrass::ProjectivePoint,
};
use crate::error::Error;
use ark_std::{fmt, rand::RngCore, string::String, vec::Vec};
use digest::Digest;
use num::{
    traits::{One, Zero},
    BigUint,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_with::{DeserializeAs, SerializeAs};
use zkattest_utils::{
    hashing_utils::try_and_incr,
    modular::{byte_len, is_probable_prime, random_below, sqrt_mod, DEFAULT_MILLER_RABIN_ROUNDS},
};

#[derive(Clone, Debug)]
pub enum CurveModel {
    /// `y^2 = x^3 + a·x + b`. Only `a = -3` is supported.
    ShortWeierstrass { a: BigUint, b: BigUint },
    /// `a·x^2 + y^2 = 1 + d·x^2·y^2`
    TwistedEdwards { a: BigUint, d: BigUint },
}

#[derive(Clone, Debug)]
pub struct Group {
    name: &'static str,
    /// Field modulus
    p: BigUint,
    /// Prime order of the subgroup generated by `gen`
    order: BigUint,
    /// Number of curve points divided by `order`
    cofactor: u32,
    gen: (BigUint, BigUint),
    model: CurveModel,
}

impl PartialEq for Group {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Group {}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl Group {
    /// Does not check the parameters, call [`Group::validate`] for that
    pub fn new(
        name: &'static str,
        p: BigUint,
        order: BigUint,
        cofactor: u32,
        gen: (BigUint, BigUint),
        model: CurveModel,
    ) -> Self {
        Self {
            name,
            p,
            order,
            cofactor,
            gen,
            model,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn field_modulus(&self) -> &BigUint {
        &self.p
    }

    pub fn order(&self) -> &BigUint {
        &self.order
    }

    pub fn cofactor(&self) -> u32 {
        self.cofactor
    }

    pub fn model(&self) -> &CurveModel {
        &self.model
    }

    pub(crate) fn field(&self) -> Fp {
        Fp::new(&self.p)
    }

    /// Byte length of a field element
    pub fn size_field_bytes(&self) -> usize {
        byte_len(&self.p)
    }

    /// Byte length of an encoded point other than the Weierstrass point at infinity
    pub fn size_point_bytes(&self) -> usize {
        1 + 2 * self.size_field_bytes()
    }

    pub fn generator(&'static self) -> Point {
        let (x, y) = self.gen.clone();
        self.point_from_affine_unchecked(x, y)
    }

    pub fn identity(&'static self) -> Point {
        let coords = match &self.model {
            CurveModel::ShortWeierstrass { .. } => {
                Coordinates::Projective(ProjectivePoint::identity())
            }
            CurveModel::TwistedEdwards { .. } => Coordinates::Extended(ExtendedPoint::identity()),
        };
        Point::from_coordinates(self, coords)
    }

    /// Reduces `k` modulo the group order
    pub fn scalar(&'static self, k: BigUint) -> Scalar {
        Scalar::new(self, k)
    }

    pub fn scalar_from_u64(&'static self, k: u64) -> Scalar {
        Scalar::new(self, BigUint::from(k))
    }

    /// Like [`Group::scalar`] but rejects `k >= order` instead of reducing it
    pub fn scalar_checked(&'static self, k: BigUint) -> Result<Scalar, Error> {
        if k >= self.order {
            return Err(Error::ScalarOutOfRange);
        }
        Ok(Scalar::new(self, k))
    }

    pub fn random_scalar<R: RngCore>(&'static self, rng: &mut R) -> Scalar {
        Scalar::new(self, random_below(rng, &self.order))
    }

    /// Point from affine coordinates after checking they are in range and satisfy the curve equation
    pub fn new_point(&'static self, x: BigUint, y: BigUint) -> Result<Point, Error> {
        if x >= self.p || y >= self.p {
            return Err(Error::CoordinateOutOfRange);
        }
        let point = self.point_from_affine_unchecked(x, y);
        if !point.is_on_curve() {
            return Err(Error::PointNotOnCurve);
        }
        Ok(point)
    }

    pub(crate) fn point_from_affine_unchecked(&'static self, x: BigUint, y: BigUint) -> Point {
        let coords = match &self.model {
            CurveModel::ShortWeierstrass { .. } => {
                Coordinates::Projective(ProjectivePoint::from_affine(x, y))
            }
            CurveModel::TwistedEdwards { .. } => {
                Coordinates::Extended(ExtendedPoint::from_affine(x, y, self.field()))
            }
        };
        Point::from_coordinates(self, coords)
    }

    /// Decodes `0x04 || x || y` with each coordinate big-endian and padded to the field size. For
    /// Weierstrass curves a single `0x00` byte is the point at infinity.
    pub fn deserialize_point(&'static self, bytes: &[u8]) -> Result<Point, Error> {
        if matches!(self.model, CurveModel::ShortWeierstrass { .. })
            && bytes.len() == 1
            && bytes[0] == 0
        {
            return Ok(self.identity());
        }
        if bytes.len() != self.size_point_bytes() || bytes[0] != 0x04 {
            return Err(Error::InvalidPointEncoding);
        }
        let size = self.size_field_bytes();
        let x = BigUint::from_bytes_be(&bytes[1..1 + size]);
        let y = BigUint::from_bytes_be(&bytes[1 + size..]);
        self.new_point(x, y)
    }

    /// Decodes a big-endian scalar and rejects it if not below the group order
    pub fn deserialize_scalar(&'static self, bytes: &[u8]) -> Result<Scalar, Error> {
        self.scalar_checked(BigUint::from_bytes_be(bytes))
    }

    /// Errors unless `point` belongs to this group
    pub fn ensure_point(&self, point: &Point) -> Result<(), Error> {
        self.ensure_group(point.group())
    }

    pub fn ensure_points<'a>(&self, points: impl IntoIterator<Item = &'a Point>) -> Result<(), Error> {
        points.into_iter().try_for_each(|p| self.ensure_point(p))
    }

    pub fn ensure_scalars<'a>(
        &self,
        scalars: impl IntoIterator<Item = &'a Scalar>,
    ) -> Result<(), Error> {
        scalars
            .into_iter()
            .try_for_each(|s| self.ensure_group(s.group()))
    }

    fn ensure_group(&self, other: &Group) -> Result<(), Error> {
        if self != other {
            return Err(Error::IncompatibleGroup(
                String::from(self.name),
                String::from(other.name),
            ));
        }
        Ok(())
    }

    /// Hash `label` to a point of the prime-order subgroup whose discrete logarithm w.r.t. the
    /// generator is unknown. The x-coordinate comes from the digest by try-and-increment, the
    /// sign of y from the first digest byte, and the point is multiplied by the cofactor. This is
    /// vulnerable to timing attacks and only meant for public input like setup labels.
    pub fn hash_to_point<D: Digest>(&'static self, label: &[u8]) -> Point {
        try_and_incr::<D, _>(label, |hash| {
            let x = BigUint::from_bytes_be(hash) % &self.p;
            let y = self.y_from_x(&x, hash[0] & 1 == 1)?;
            let point = self
                .point_from_affine_unchecked(x, y)
                .mul_biguint(&BigUint::from(self.cofactor));
            if point.is_identity() {
                None
            } else {
                Some(point)
            }
        })
    }

    /// A y-coordinate for `x` with the requested parity, if `x` is the abscissa of a curve point
    fn y_from_x(&self, x: &BigUint, odd: bool) -> Option<BigUint> {
        let f = self.field();
        let y_sqr = match &self.model {
            CurveModel::ShortWeierstrass { a, b } => f.add(
                &f.add(&f.mul(&f.sqr(x), x), &f.mul(a, x)),
                b,
            ),
            CurveModel::TwistedEdwards { a, d } => {
                // y^2 = (1 - a·x^2) / (1 - d·x^2)
                let x2 = f.sqr(x);
                let one = BigUint::one();
                let num = f.sub(&one, &f.mul(a, &x2));
                let den = f.sub(&one, &f.mul(d, &x2));
                f.mul(&num, &f.inv(&den).ok()?)
            }
        };
        let y = sqrt_mod(&y_sqr, &self.p).ok()?;
        if y.bit(0) == odd {
            Some(y)
        } else {
            Some(f.neg(&y))
        }
    }

    /// Checks the curve parameters: primality of the field modulus and of the order, ranges of
    /// the coefficients, and that the generator is a curve point of the claimed order.
    pub fn validate<R: RngCore>(&'static self, rng: &mut R) -> Result<(), Error> {
        if !is_probable_prime(&self.p, DEFAULT_MILLER_RABIN_ROUNDS, rng) {
            return Err(Error::InvalidGroupParameters("field modulus is not prime"));
        }
        if !is_probable_prime(&self.order, DEFAULT_MILLER_RABIN_ROUNDS, rng) {
            return Err(Error::InvalidGroupParameters("group order is not prime"));
        }
        if self.cofactor == 0 {
            return Err(Error::InvalidGroupParameters("cofactor is zero"));
        }
        match &self.model {
            CurveModel::ShortWeierstrass { a, b } => {
                if *a != &self.p - 3u32 {
                    return Err(Error::InvalidGroupParameters("only a = -3 is supported"));
                }
                if *b >= self.p {
                    return Err(Error::InvalidGroupParameters("coefficient b out of range"));
                }
            }
            CurveModel::TwistedEdwards { a, d } => {
                if a.is_zero() || d.is_zero() || a == d || *a >= self.p || *d >= self.p {
                    return Err(Error::InvalidGroupParameters("coefficients a and d are invalid"));
                }
            }
        }
        let (x, y) = self.gen.clone();
        let gen = self
            .new_point(x, y)
            .map_err(|_| Error::InvalidGroupParameters("generator is not on the curve"))?;
        if gen.is_identity() || !gen.mul_biguint(&self.order).is_identity() {
            return Err(Error::InvalidGroupParameters("generator does not have the group order"));
        }
        Ok(())
    }
}

/// Serializes a `&'static Group` as its name and resolves the name when deserializing
pub struct GroupByName;

impl SerializeAs<&'static Group> for GroupByName {
    fn serialize_as<S>(group: &&'static Group, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Serialize::serialize(group.name, serializer)
    }
}

impl<'de> DeserializeAs<'de, &'static Group> for GroupByName {
    fn deserialize_as<D>(deserializer: D) -> Result<&'static Group, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name: String = Deserialize::deserialize(deserializer)?;
        group_by_name(&name).map_err(serde::de::Error::custom)
    }
}

/// Concatenation of the encodings of `points`
pub fn points_to_bytes<'a>(points: impl IntoIterator<Item = &'a Point>) -> Vec<u8> {
    let mut bytes = Vec::new();
    for p in points {
        bytes.extend_from_slice(&p.to_bytes());
    }
    bytes
}
