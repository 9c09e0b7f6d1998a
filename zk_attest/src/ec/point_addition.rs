//! Proof of point addition on a short Weierstrass curve when only commitments to the coordinates
//! are known to the verifier, as in section 4.1 of [ZKAttest](https://eprint.iacr.org/2021/1183).
//!
//! Proves `P + Q = R` for `P = (x1, y1)`, `Q = (x2, y2)`, `R = (x3, y3)` with `P != ±Q`, given
//! commitments `C1..C6` to `x1, y1, x2, y2, x3, y3` in a group whose order is the field modulus of
//! the curve. With `λ = (y2 - y1) / (x2 - x1)` the addition law is `x3 = λ^2 - x1 - x2` and
//! `y3 = λ·(x1 - x3) - y1`. The prover commits to
//! - `i8 = (x2 - x1)^-1` and proves `(x2 - x1)·i8 = 1`, which also shows `x2 != x1`
//! - `λ = i8·(y2 - y1)`
//! - `λ^2` and proves it equals `x1 + x2 + x3`
//! - `λ·(x1 - x3)` and proves it equals `y1 + y3`
//!
//! where commitments to differences and sums come from the homomorphism of Pedersen commitments.

use crate::{
    commitments::{Commitment, PedersenParams, PointCommitment, PointCommitmentWithOpening},
    curves::{MultiMult, Point},
    error::Error,
    relations::{EqualityProof, MultProof},
};
use ark_std::rand::RngCore;
use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct PointAddProof {
    /// Commitment to `(x2 - x1)^-1`
    pub comm_inv: Point,
    /// Commitment to `λ`
    pub comm_lambda: Point,
    /// Commitment to `λ^2`
    pub comm_lambda_sqr: Point,
    /// Commitment to `λ·(x1 - x3)`
    pub comm_lambda_x: Point,
    /// To prove `(x2 - x1)·(x2 - x1)^-1 = 1`
    pub inv: MultProof,
    /// To prove `λ = (x2 - x1)^-1·(y2 - y1)`
    pub lambda: MultProof,
    /// To prove `λ^2` is properly created
    pub lambda_sqr: MultProof,
    /// To prove `λ·(x1 - x3)` is properly created
    pub lambda_x: MultProof,
    /// To prove `λ^2 = x1 + x2 + x3`
    pub x: EqualityProof,
    /// To prove `λ·(x1 - x3) = y1 + y3`
    pub y: EqualityProof,
}

/// Commitments to the intermediate values that both sides derive from the coordinate commitments
struct Derived<T> {
    /// `x2 - x1`
    x2_minus_x1: T,
    /// `y2 - y1`
    y2_minus_y1: T,
    /// `x1 - x3`
    x1_minus_x3: T,
    /// `x1 + x2 + x3`
    x_sum: T,
    /// `y1 + y3`
    y_sum: T,
}

impl PointAddProof {
    /// Prove that `p + q = r`. `comm_p`, `comm_q` and `comm_r` are commitments to the coordinates
    /// of `p`, `q` and `r` respectively.
    pub fn new<R: RngCore>(
        rng: &mut R,
        params: &PedersenParams,
        p: &Point,
        q: &Point,
        r: &Point,
        comm_p: &PointCommitmentWithOpening,
        comm_q: &PointCommitmentWithOpening,
        comm_r: &PointCommitmentWithOpening,
    ) -> Result<Self, Error> {
        Self::ensure_addition_possible(params, p, q, r, comm_p, comm_q, comm_r)?;
        let group = params.group;

        let (x1, y1, x2, y2, x3) = (&comm_p.x, &comm_p.y, &comm_q.x, &comm_q.y, &comm_r.x);
        let x2_minus_x1 = x2 - x1;
        let inv = x2_minus_x1.inverse()?;
        let y2_minus_y1 = y2 - y1;
        let lambda = &inv * &y2_minus_y1;
        let lambda_sqr = lambda.square();
        let x1_minus_x3 = x1 - x3;
        let lambda_x = &lambda * &x1_minus_x3;

        let comm_inv = params.commit(rng, &inv);
        let comm_lambda = params.commit(rng, &lambda);
        let comm_lambda_sqr = params.commit(rng, &lambda_sqr);
        let comm_lambda_x = params.commit(rng, &lambda_x);
        // Commitment to 1 with randomness 0
        let comm_one = Commitment {
            point: params.g.clone(),
            randomness: group.scalar_from_u64(0),
        };

        let d = Derived {
            x2_minus_x1: &comm_q.comm_x - &comm_p.comm_x,
            y2_minus_y1: &comm_q.comm_y - &comm_p.comm_y,
            x1_minus_x3: &comm_p.comm_x - &comm_r.comm_x,
            x_sum: &(&comm_r.comm_x + &comm_p.comm_x) + &comm_q.comm_x,
            y_sum: &comm_r.comm_y + &comm_p.comm_y,
        };

        let inv_proof = MultProof::new(
            rng,
            params,
            &x2_minus_x1,
            &inv,
            &group.scalar_from_u64(1),
            &d.x2_minus_x1,
            &comm_inv,
            &comm_one,
        )?;
        let lambda_proof = MultProof::new(
            rng,
            params,
            &inv,
            &y2_minus_y1,
            &lambda,
            &comm_inv,
            &d.y2_minus_y1,
            &comm_lambda,
        )?;
        let lambda_sqr_proof = MultProof::new(
            rng,
            params,
            &lambda,
            &lambda,
            &lambda_sqr,
            &comm_lambda,
            &comm_lambda,
            &comm_lambda_sqr,
        )?;
        let x_proof = EqualityProof::new(rng, params, &lambda_sqr, &comm_lambda_sqr, &d.x_sum)?;
        let lambda_x_proof = MultProof::new(
            rng,
            params,
            &lambda,
            &x1_minus_x3,
            &lambda_x,
            &comm_lambda,
            &d.x1_minus_x3,
            &comm_lambda_x,
        )?;
        let y_proof = EqualityProof::new(rng, params, &lambda_x, &comm_lambda_x, &d.y_sum)?;

        Ok(Self {
            comm_inv: comm_inv.point,
            comm_lambda: comm_lambda.point,
            comm_lambda_sqr: comm_lambda_sqr.point,
            comm_lambda_x: comm_lambda_x.point,
            inv: inv_proof,
            lambda: lambda_proof,
            lambda_sqr: lambda_sqr_proof,
            lambda_x: lambda_x_proof,
            x: x_proof,
            y: y_proof,
        })
    }

    pub fn verify<R: RngCore>(
        &self,
        rng: &mut R,
        params: &PedersenParams,
        comm_p: &PointCommitment,
        comm_q: &PointCommitment,
        comm_r: &PointCommitment,
    ) -> Result<bool, Error> {
        let mut multi = MultiMult::new(params.group);
        multi.add_known(params.g.clone());
        multi.add_known(params.h.clone());
        self.aggregate(rng, params, comm_p, comm_q, comm_r, &mut multi)?;
        Ok(multi.verify())
    }

    /// Add the relations checked by [`PointAddProof::verify`] to `multi`
    pub fn aggregate<R: RngCore>(
        &self,
        rng: &mut R,
        params: &PedersenParams,
        comm_p: &PointCommitment,
        comm_q: &PointCommitment,
        comm_r: &PointCommitment,
        multi: &mut MultiMult,
    ) -> Result<(), Error> {
        params.group.ensure_points([
            &comm_p.x,
            &comm_p.y,
            &comm_q.x,
            &comm_q.y,
            &comm_r.x,
            &comm_r.y,
            &self.comm_inv,
            &self.comm_lambda,
            &self.comm_lambda_sqr,
            &self.comm_lambda_x,
        ])?;
        let d = Derived {
            x2_minus_x1: &comm_q.x - &comm_p.x,
            y2_minus_y1: &comm_q.y - &comm_p.y,
            x1_minus_x3: &comm_p.x - &comm_r.x,
            x_sum: &(&comm_r.x + &comm_p.x) + &comm_q.x,
            y_sum: &comm_r.y + &comm_p.y,
        };

        self.inv
            .aggregate(rng, params, &d.x2_minus_x1, &self.comm_inv, &params.g, multi)?;
        self.lambda.aggregate(
            rng,
            params,
            &self.comm_inv,
            &d.y2_minus_y1,
            &self.comm_lambda,
            multi,
        )?;
        self.lambda_sqr.aggregate(
            rng,
            params,
            &self.comm_lambda,
            &self.comm_lambda,
            &self.comm_lambda_sqr,
            multi,
        )?;
        self.x
            .aggregate(rng, params, &self.comm_lambda_sqr, &d.x_sum, multi)?;
        self.lambda_x.aggregate(
            rng,
            params,
            &self.comm_lambda,
            &d.x1_minus_x3,
            &self.comm_lambda_x,
            multi,
        )?;
        self.y
            .aggregate(rng, params, &self.comm_lambda_x, &d.y_sum, multi)?;
        Ok(())
    }

    /// Checks that the points can be added with the chord rule, that `p + q = r` and that the
    /// commitments are to their coordinates.
    pub fn ensure_addition_possible(
        params: &PedersenParams,
        p: &Point,
        q: &Point,
        r: &Point,
        comm_p: &PointCommitmentWithOpening,
        comm_q: &PointCommitmentWithOpening,
        comm_r: &PointCommitmentWithOpening,
    ) -> Result<(), Error> {
        p.group().ensure_points([q, r])?;
        if p.is_identity() || q.is_identity() || r.is_identity() {
            return Err(Error::PointAtInfinity);
        }
        for (point, comm) in [(p, comm_p), (q, comm_q), (r, comm_r)] {
            let (x, y) = params.coordinates_as_scalars(point)?;
            if x != comm.x || y != comm.y {
                return Err(Error::IncorrectPointOpening);
            }
        }
        if comm_p.x == comm_q.x {
            return Err(Error::XCoordCantBeSame);
        }
        if &(p + q) != r {
            return Err(Error::InvalidPointAddResult);
        }
        Ok(())
    }
}
