//! Pedersen commitments `g·v + h·r` over any [`Group`], and commitments to the coordinates of a
//! point of another curve whose field modulus is the order of the committing group.

use crate::{
    curves::{Group, GroupByName, Point, Scalar},
    error::Error,
};
use ark_std::{
    ops::{Add, Mul, Sub},
    rand::RngCore,
    vec::Vec,
};
use digest::Digest;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

/// Public parameters `(group, g, h)` of Pedersen commitments. Binding requires that nobody knows
/// `log_g(h)`.
#[serde_as]
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(try_from = "PedersenParamsRepr")]
pub struct PedersenParams {
    #[serde_as(as = "GroupByName")]
    pub group: &'static Group,
    pub g: Point,
    pub h: Point,
}

#[serde_as]
#[derive(Deserialize)]
struct PedersenParamsRepr {
    #[serde_as(as = "GroupByName")]
    group: &'static Group,
    g: Point,
    h: Point,
}

/// A commitment and the randomness used to create it
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Commitment {
    pub point: Point,
    pub randomness: Scalar,
}

/// Commitments to both coordinates of an elliptic curve point
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct PointCommitment {
    /// Commitment to the `x` coordinate
    pub x: Point,
    /// Commitment to the `y` coordinate
    pub y: Point,
}

/// Commitments to both coordinates of an elliptic curve point along with the coordinates and
/// randomness.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PointCommitmentWithOpening {
    /// `x` coordinate as a scalar of the committing group
    pub x: Scalar,
    /// `y` coordinate as a scalar of the committing group
    pub y: Scalar,
    pub comm_x: Commitment,
    pub comm_y: Commitment,
}

impl PedersenParams {
    /// `g` is the group generator and `h = g·r` for a random `r` that is then forgotten. Whoever
    /// runs this could open commitments to any value if they kept `r`, so use
    /// [`PedersenParams::new`] when the setup is not trusted.
    pub fn generate<R: RngCore>(rng: &mut R, group: &'static Group) -> Self {
        let g = group.generator();
        let h = &g * &group.random_scalar(rng);
        Self { group, g, h }
    }

    /// `g` is the group generator and `h` is hashed from `label`, so nobody knows `log_g(h)`
    pub fn new<D: Digest>(group: &'static Group, label: &[u8]) -> Self {
        let mut h_label = label.to_vec();
        h_label.extend_from_slice(b" : H");
        Self {
            group,
            g: group.generator(),
            h: group.hash_to_point::<D>(&h_label),
        }
    }

    /// Parameters with the given bases, which must be distinct points of the same group other than
    /// the identity
    pub fn with_bases(g: Point, h: Point) -> Result<Self, Error> {
        let group = g.group();
        group.ensure_point(&h)?;
        if g.is_identity() || h.is_identity() {
            return Err(Error::PointAtInfinity);
        }
        if g == h {
            return Err(Error::EqualCommitmentBases);
        }
        Ok(Self { group, g, h })
    }

    /// Commit to `value` with fresh randomness
    pub fn commit<R: RngCore>(&self, rng: &mut R, value: &Scalar) -> Commitment {
        let r = self.group.random_scalar(rng);
        self.commit_with_randomness(value, r)
    }

    pub fn commit_with_randomness(&self, value: &Scalar, randomness: Scalar) -> Commitment {
        Commitment {
            point: self.h.dbl_mul(&randomness, &self.g, value),
            randomness,
        }
    }

    /// Whether `commitment` opens to `value`
    pub fn opens_to(&self, commitment: &Commitment, value: &Scalar) -> bool {
        self.h.dbl_mul(&commitment.randomness, &self.g, value) == commitment.point
    }

    /// Coordinates of `point` as scalars of this group. The point must not be the point at
    /// infinity and its field modulus must be the order of this group.
    pub fn coordinates_as_scalars(&self, point: &Point) -> Result<(Scalar, Scalar), Error> {
        if point.group().field_modulus() != self.group.order() {
            return Err(Error::ScalarFieldBaseFieldMismatch);
        }
        match point.to_affine() {
            Some((x, y)) => Ok((self.group.scalar(x.clone()), self.group.scalar(y.clone()))),
            None => Err(Error::PointAtInfinity),
        }
    }

    /// Commit to both coordinates of `point` with fresh randomness
    pub fn commit_point<R: RngCore>(
        &self,
        rng: &mut R,
        point: &Point,
    ) -> Result<PointCommitmentWithOpening, Error> {
        let r_x = self.group.random_scalar(rng);
        let r_y = self.group.random_scalar(rng);
        self.commit_point_with_randomness(point, r_x, r_y)
    }

    /// `r_x` and `r_y` are the randomness in the commitments to the x and y coordinates respectively
    pub fn commit_point_with_randomness(
        &self,
        point: &Point,
        r_x: Scalar,
        r_y: Scalar,
    ) -> Result<PointCommitmentWithOpening, Error> {
        let (x, y) = self.coordinates_as_scalars(point)?;
        let comm_x = self.commit_with_randomness(&x, r_x);
        let comm_y = self.commit_with_randomness(&y, r_y);
        Ok(PointCommitmentWithOpening {
            x,
            y,
            comm_x,
            comm_y,
        })
    }

    /// Commit to a batch of values, each with its own fresh randomness
    pub fn commit_to_a_batch<R: RngCore>(&self, rng: &mut R, values: &[Scalar]) -> Vec<Commitment> {
        values.iter().map(|v| self.commit(rng, v)).collect()
    }
}

impl TryFrom<PedersenParamsRepr> for PedersenParams {
    type Error = Error;

    fn try_from(repr: PedersenParamsRepr) -> Result<Self, Error> {
        repr.group.ensure_points([&repr.g, &repr.h])?;
        Self::with_bases(repr.g, repr.h)
    }
}

impl PointCommitmentWithOpening {
    pub fn comm(&self) -> PointCommitment {
        PointCommitment {
            x: self.comm_x.point.clone(),
            y: self.comm_y.point.clone(),
        }
    }
}

impl<'a> Add<&'a Commitment> for &'a Commitment {
    type Output = Commitment;

    fn add(self, rhs: &'a Commitment) -> Commitment {
        Commitment {
            point: &self.point + &rhs.point,
            randomness: &self.randomness + &rhs.randomness,
        }
    }
}

impl<'a> Sub<&'a Commitment> for &'a Commitment {
    type Output = Commitment;

    fn sub(self, rhs: &'a Commitment) -> Commitment {
        Commitment {
            point: &self.point - &rhs.point,
            randomness: &self.randomness - &rhs.randomness,
        }
    }
}

impl<'a> Mul<&'a Scalar> for &'a Commitment {
    type Output = Commitment;

    fn mul(self, rhs: &'a Scalar) -> Commitment {
        Commitment {
            point: &self.point * rhs,
            randomness: &self.randomness * rhs,
        }
    }
}
