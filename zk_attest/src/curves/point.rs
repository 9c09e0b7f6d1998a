//! Points of a [`Group`]. Arithmetic is dispatched on the curve model of the group: projective
//! coordinates for short Weierstrass curves and extended coordinates for twisted Edwards curves.

use super::{
    edwards::ExtendedPoint,
    group::{points_to_bytes, CurveModel, Group},
    instances::group_by_name,
    scalar::Scalar,
    weierstrass::ProjectivePoint,
};
use crate::error::Error;
use ark_std::{
    fmt,
    ops::{Add, Mul, Neg, Sub},
    string::String,
    vec,
    vec::Vec,
};
use num::BigUint;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use std::sync::OnceLock;
use zkattest_utils::{
    hashing_utils::challenge_from_bytes,
    modular::{nibbles, to_be_bytes_fixed},
    serde_utils::HexBigUint,
};

#[derive(Clone, Debug)]
pub(crate) enum Coordinates {
    Projective(ProjectivePoint),
    Extended(ExtendedPoint),
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(try_from = "PointRepr", into = "PointRepr")]
pub struct Point {
    group: &'static Group,
    coords: Coordinates,
    /// Affine coordinates, computed on first use. `None` is the Weierstrass point at infinity.
    affine: OnceLock<Option<(BigUint, BigUint)>>,
}

/// Affine form used by serde. Both coordinates are `None` only for the Weierstrass point at infinity.
#[serde_as]
#[derive(Serialize, Deserialize)]
struct PointRepr {
    group: String,
    #[serde_as(as = "Option<HexBigUint>")]
    x: Option<BigUint>,
    #[serde_as(as = "Option<HexBigUint>")]
    y: Option<BigUint>,
}

impl Point {
    pub(crate) fn from_coordinates(group: &'static Group, coords: Coordinates) -> Self {
        Self {
            group,
            coords,
            affine: OnceLock::new(),
        }
    }

    pub fn group(&self) -> &'static Group {
        self.group
    }

    pub fn is_identity(&self) -> bool {
        match &self.coords {
            Coordinates::Projective(c) => c.is_identity(),
            Coordinates::Extended(c) => c.is_identity(),
        }
    }

    pub fn is_on_curve(&self) -> bool {
        let f = self.group.field();
        match (&self.coords, self.group.model()) {
            (Coordinates::Projective(c), CurveModel::ShortWeierstrass { a, b }) => {
                c.is_on_curve(f, a, b)
            }
            (Coordinates::Extended(c), CurveModel::TwistedEdwards { a, d }) => {
                c.is_on_curve(f, a, d)
            }
            _ => false,
        }
    }

    /// Affine coordinates `(x, y)`, or `None` for the Weierstrass point at infinity
    pub fn to_affine(&self) -> Option<(&BigUint, &BigUint)> {
        self.affine
            .get_or_init(|| {
                let f = self.group.field();
                match &self.coords {
                    Coordinates::Projective(c) => c.to_affine(f),
                    Coordinates::Extended(c) => c.to_affine(f),
                }
            })
            .as_ref()
            .map(|(x, y)| (x, y))
    }

    /// `0x04 || x || y` with coordinates padded to the field size. The Weierstrass point at
    /// infinity is the single byte `0x00`.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self.to_affine() {
            None => vec![0u8],
            Some((x, y)) => {
                let size = self.group.size_field_bytes();
                let mut bytes = Vec::with_capacity(1 + 2 * size);
                bytes.push(0x04);
                for c in [x, y] {
                    match to_be_bytes_fixed(c, size) {
                        Ok(b) => bytes.extend_from_slice(&b),
                        // Coordinates are reduced modulo `p` so they always fit
                        Err(_) => bytes.extend_from_slice(&c.to_bytes_be()),
                    }
                }
                bytes
            }
        }
    }

    pub fn dbl(&self) -> Self {
        let f = self.group.field();
        let coords = match (&self.coords, self.group.model()) {
            (Coordinates::Projective(c), CurveModel::ShortWeierstrass { b, .. }) => {
                Coordinates::Projective(c.dbl(f, b))
            }
            (Coordinates::Extended(c), CurveModel::TwistedEdwards { a, .. }) => {
                Coordinates::Extended(c.dbl(f, a))
            }
            _ => unreachable!("coordinates always follow the curve model of their group"),
        };
        Self::from_coordinates(self.group, coords)
    }

    fn add_point(&self, other: &Self) -> Self {
        self.assert_compatible(other.group);
        let f = self.group.field();
        let coords = match (&self.coords, &other.coords, self.group.model()) {
            (
                Coordinates::Projective(p1),
                Coordinates::Projective(p2),
                CurveModel::ShortWeierstrass { b, .. },
            ) => Coordinates::Projective(p1.add(p2, f, b)),
            (
                Coordinates::Extended(p1),
                Coordinates::Extended(p2),
                CurveModel::TwistedEdwards { a, d },
            ) => Coordinates::Extended(p1.add(p2, f, a, d)),
            _ => unreachable!("coordinates always follow the curve model of their group"),
        };
        Self::from_coordinates(self.group, coords)
    }

    fn neg_point(&self) -> Self {
        let f = self.group.field();
        let coords = match &self.coords {
            Coordinates::Projective(c) => Coordinates::Projective(c.neg(f)),
            Coordinates::Extended(c) => Coordinates::Extended(c.neg(f)),
        };
        Self::from_coordinates(self.group, coords)
    }

    /// Table `[0·P, 1·P, ..., 15·P]` for 4-bit windows
    fn window_table(&self) -> Vec<Self> {
        let mut table = Vec::with_capacity(16);
        let mut curr = self.group.identity();
        for _ in 0..16 {
            let next = curr.add_point(self);
            table.push(curr);
            curr = next;
        }
        table
    }

    /// `k·P` for an integer `k` that is not reduced modulo the group order. Fixed 4-bit windows,
    /// most significant first.
    pub(crate) fn mul_biguint(&self, k: &BigUint) -> Self {
        self.mul_digits(&nibbles(k))
    }

    fn mul_digits(&self, digits: &[u8]) -> Self {
        let table = self.window_table();
        let mut q = self.group.identity();
        for d in digits {
            q = q.dbl().dbl().dbl().dbl();
            q = q.add_point(&table[*d as usize]);
        }
        q
    }

    /// `s1·self + s2·other` with a shared chain of doublings
    pub fn dbl_mul(&self, s1: &Scalar, other: &Self, s2: &Scalar) -> Self {
        self.assert_compatible(other.group);
        self.assert_compatible(s1.group());
        self.assert_compatible(s2.group());
        let mut k1 = s1.nibbles();
        let mut k2 = s2.nibbles();
        // Left-pad the shorter digit string with zeros
        if k1.len() < k2.len() {
            let mut padded = vec![0u8; k2.len() - k1.len()];
            padded.append(&mut k1);
            k1 = padded;
        } else if k2.len() < k1.len() {
            let mut padded = vec![0u8; k1.len() - k2.len()];
            padded.append(&mut k2);
            k2 = padded;
        }
        let table1 = self.window_table();
        let table2 = other.window_table();
        let mut q = self.group.identity();
        for (d1, d2) in k1.iter().zip(k2.iter()) {
            q = q.dbl().dbl().dbl().dbl();
            q = q.add_point(&table1[*d1 as usize]);
            q = q.add_point(&table2[*d2 as usize]);
        }
        q
    }

    fn assert_compatible(&self, group: &Group) {
        assert!(
            self.group == group,
            "elements of groups {} and {} cannot be combined",
            self.group,
            group
        );
    }
}

/// Fiat–Shamir challenge over points: SHA-256 of the concatenated encodings truncated to 80 bits
pub fn hash_points<'a>(points: impl IntoIterator<Item = &'a Point>) -> BigUint {
    challenge_from_bytes(&points_to_bytes(points))
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        if self.group != other.group {
            return false;
        }
        let f = self.group.field();
        match (&self.coords, &other.coords) {
            (Coordinates::Projective(p1), Coordinates::Projective(p2)) => p1.eq(p2, f),
            (Coordinates::Extended(p1), Coordinates::Extended(p2)) => p1.eq(p2, f),
            _ => false,
        }
    }
}

impl Eq for Point {}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_affine() {
            Some((x, y)) => write!(f, "Point({}, 0x{:x}, 0x{:x})", self.group, x, y),
            None => write!(f, "Point({}, infinity)", self.group),
        }
    }
}

impl<'a> Add<&'a Point> for &'a Point {
    type Output = Point;

    fn add(self, rhs: &'a Point) -> Point {
        self.add_point(rhs)
    }
}

impl<'a> Sub<&'a Point> for &'a Point {
    type Output = Point;

    fn sub(self, rhs: &'a Point) -> Point {
        self.add_point(&rhs.neg_point())
    }
}

impl<'a> Neg for &'a Point {
    type Output = Point;

    fn neg(self) -> Point {
        self.neg_point()
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        self.neg_point()
    }
}

impl<'a> Mul<&'a Scalar> for &'a Point {
    type Output = Point;

    fn mul(self, rhs: &'a Scalar) -> Point {
        self.assert_compatible(rhs.group());
        self.mul_digits(&rhs.nibbles())
    }
}

impl<'a> Mul<&'a Scalar> for Point {
    type Output = Point;

    fn mul(self, rhs: &'a Scalar) -> Point {
        &self * rhs
    }
}

impl Add<Point> for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        self.add_point(&rhs)
    }
}

impl<'a> Add<&'a Point> for Point {
    type Output = Point;

    fn add(self, rhs: &'a Point) -> Point {
        self.add_point(rhs)
    }
}

impl Sub<Point> for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        &self - &rhs
    }
}

impl<'a> Sub<&'a Point> for Point {
    type Output = Point;

    fn sub(self, rhs: &'a Point) -> Point {
        &self - rhs
    }
}

impl From<Point> for PointRepr {
    fn from(p: Point) -> Self {
        let (x, y) = match p.to_affine() {
            Some((x, y)) => (Some(x.clone()), Some(y.clone())),
            None => (None, None),
        };
        Self {
            group: String::from(p.group.name()),
            x,
            y,
        }
    }
}

impl TryFrom<PointRepr> for Point {
    type Error = Error;

    fn try_from(repr: PointRepr) -> Result<Self, Error> {
        let group = group_by_name(&repr.group)?;
        match (repr.x, repr.y, group.model()) {
            (None, None, CurveModel::ShortWeierstrass { .. }) => Ok(group.identity()),
            (Some(x), Some(y), _) => group.new_point(x, y),
            _ => Err(Error::InvalidPointEncoding),
        }
    }
}

