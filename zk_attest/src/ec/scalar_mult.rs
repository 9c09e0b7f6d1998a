//! Proof of scalar multiplication on a short Weierstrass curve, section 5 of
//! [ZKAttest](https://eprint.iacr.org/2021/1183).
//!
//! The protocol proves that `p = g·s - q` for a committed scalar `s`, a curve point `p` of which
//! only commitments to the coordinates are known, a public base `g` and an optional public offset
//! `q`. The scalar is committed in the curve's own group with `scalar_params`, whose `g` is the
//! base. The coordinates of `p` are committed with `coord_params` in a group whose order is the
//! field modulus of the curve.
//!
//! One repetition:
//! - Prover picks random `alpha`, computes `t = g·alpha`, commits to `alpha` as `a = t + h·r` and
//!   to the coordinates of `t`.
//! - If the challenge bit is 1, the prover opens `a` and the coordinate commitments.
//! - If the challenge bit is 0, the prover reveals `z = alpha - s` so that the verifier can compute
//!   `t1 = g·z + q`, and proves with [`PointAddProof`] that `t1 + p = t` using commitments to the
//!   coordinates of `t1` whose randomness it reveals. It also reveals `z2` with
//!   `g·z + c_s - a + h·z2 = 0`.
//!
//! A cheating prover passes one repetition with probability 1/2 so the number of repetitions is the
//! security parameter. The challenge has [`MAX_REPETITIONS`] bits which caps the number of
//! repetitions.

use crate::{
    commitments::{Commitment, PedersenParams, PointCommitment, PointCommitmentWithOpening},
    curves::{hash_points, Group, MultiMult, Point, Relation, Scalar},
    ec::point_addition::PointAddProof,
    error::Error,
};
use ark_std::{
    cfg_into_iter, cfg_iter, end_timer,
    rand::{seq::SliceRandom, RngCore},
    start_timer, vec,
    vec::Vec,
};
use num::BigUint;
use serde::{Deserialize, Serialize};
use zkattest_utils::hashing_utils::CHALLENGE_BYTE_SIZE;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Upper bound on repetitions, one per bit of the challenge
pub const MAX_REPETITIONS: usize = CHALLENGE_BYTE_SIZE * 8;

/// Response in the repetition where the challenge bit is 1. Contains openings of the commitments.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct OpeningRep {
    pub alpha: Scalar,
    pub beta_1: Scalar,
    pub beta_2: Scalar,
    pub beta_3: Scalar,
}

/// Response in the repetition where the challenge bit is 0
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct AdditionRep {
    /// `alpha - s`
    pub z: Scalar,
    /// Difference of the randomness in the commitments to `alpha` and `s`
    pub z_2: Scalar,
    /// Randomness in the commitment to the x coordinate of `t1`
    pub r_1: Scalar,
    /// Randomness in the commitment to the y coordinate of `t1`
    pub r_2: Scalar,
    pub proof: PointAddProof,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum OpeningOrAdditionRep {
    Opening(OpeningRep),
    Addition(AdditionRep),
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ExpProofSingleRep {
    /// Commitment to `alpha`
    pub a: Point,
    /// Commitment to the x coordinate of `t = g·alpha`
    pub t_x: Point,
    /// Commitment to the y coordinate of `t = g·alpha`
    pub t_y: Point,
    pub response: OpeningOrAdditionRep,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ExpProof(pub Vec<ExpProofSingleRep>);

impl ExpProof {
    /// Prove that `result = scalar_params.g·scalar - offset` where `comm_scalar` is a commitment to
    /// `scalar` with `scalar_params` and `comm_result` is a commitment to the coordinates of
    /// `result` with `coord_params`. `sec_param` is the number of repetitions.
    pub fn new<R: RngCore>(
        rng: &mut R,
        scalar: &Scalar,
        comm_scalar: &Commitment,
        result: &Point,
        comm_result: &PointCommitmentWithOpening,
        offset: Option<&Point>,
        sec_param: usize,
        scalar_params: &PedersenParams,
        coord_params: &PedersenParams,
    ) -> Result<Self, Error> {
        if sec_param == 0 {
            return Err(Error::ZeroRepetitions);
        }
        if sec_param > MAX_REPETITIONS {
            return Err(Error::TooManyRepetitions(sec_param, MAX_REPETITIONS));
        }
        let group = scalar_params.group;
        group.ensure_point(result)?;
        group.ensure_scalars([scalar, &comm_scalar.randomness])?;
        if let Some(q) = offset {
            group.ensure_point(q)?;
        }
        if !scalar_params.opens_to(comm_scalar, scalar) {
            return Err(Error::IncorrectScalarOpening);
        }
        let g = &scalar_params.g;
        if &with_offset(g * scalar, offset.map(|q| -q)) != result {
            return Err(Error::InvalidScalarMultResult);
        }
        let (x, y) = coord_params.coordinates_as_scalars(result)?;
        if x != comm_result.x || y != comm_result.y {
            return Err(Error::IncorrectPointOpening);
        }

        let commit_time = start_timer!(|| format!("Commit to {} repetitions", sec_param));
        let alpha = (0..sec_param)
            .map(|_| group.random_scalar(rng))
            .collect::<Vec<_>>();
        let r = (0..sec_param)
            .map(|_| group.random_scalar(rng))
            .collect::<Vec<_>>();
        let r_t = (0..sec_param)
            .map(|_| {
                (
                    coord_params.group.random_scalar(rng),
                    coord_params.group.random_scalar(rng),
                )
            })
            .collect::<Vec<_>>();
        // (t, a, commitment to coordinates of t) for each repetition
        let commitments = cfg_into_iter!(0..sec_param)
            .map(|i| {
                let t = g * &alpha[i];
                let a = scalar_params.commit_with_randomness(&alpha[i], r[i].clone()).point;
                let comm_t = coord_params.commit_point_with_randomness(
                    &t,
                    r_t[i].0.clone(),
                    r_t[i].1.clone(),
                )?;
                Ok((t, a, comm_t))
            })
            .collect::<Result<Vec<_>, Error>>()?;
        end_timer!(commit_time);

        let challenge = Self::challenge(
            &comm_result.comm(),
            commitments
                .iter()
                .map(|(_, a, comm_t)| (a, &comm_t.comm_x.point, &comm_t.comm_y.point)),
        );

        let response_time = start_timer!(|| "Responses");
        let mut reps = Vec::with_capacity(sec_param);
        for (i, (t, a, comm_t)) in commitments.into_iter().enumerate() {
            let response = if challenge.bit(i as u64) {
                OpeningOrAdditionRep::Opening(OpeningRep {
                    alpha: alpha[i].clone(),
                    beta_1: r[i].clone(),
                    beta_2: comm_t.comm_x.randomness.clone(),
                    beta_3: comm_t.comm_y.randomness.clone(),
                })
            } else {
                let z = &alpha[i] - scalar;
                let t_1 = with_offset(g * &z, offset.cloned());
                let comm_t_1 = coord_params.commit_point(rng, &t_1)?;
                let proof = PointAddProof::new(
                    rng,
                    coord_params,
                    &t_1,
                    result,
                    &t,
                    &comm_t_1,
                    comm_result,
                    &comm_t,
                )?;
                OpeningOrAdditionRep::Addition(AdditionRep {
                    z,
                    z_2: &r[i] - &comm_scalar.randomness,
                    r_1: comm_t_1.comm_x.randomness,
                    r_2: comm_t_1.comm_y.randomness,
                    proof,
                })
            };
            reps.push(ExpProofSingleRep {
                a,
                t_x: comm_t.comm_x.point,
                t_y: comm_t.comm_y.point,
                response,
            });
        }
        end_timer!(response_time);
        Ok(Self(reps))
    }

    /// Verify the proof for `sec_param` repetitions chosen at random from the ones in the proof. The
    /// proof must have at least `sec_param` repetitions.
    pub fn verify<R: RngCore>(
        &self,
        rng: &mut R,
        comm_scalar: &Point,
        comm_result: &PointCommitment,
        offset: Option<&Point>,
        sec_param: usize,
        scalar_params: &PedersenParams,
        coord_params: &PedersenParams,
    ) -> Result<bool, Error> {
        let mut multi_scalar = MultiMult::new(scalar_params.group);
        multi_scalar.add_known(scalar_params.g.clone());
        multi_scalar.add_known(scalar_params.h.clone());
        multi_scalar.add_known(comm_scalar.clone());
        let mut multi_coord = MultiMult::new(coord_params.group);
        multi_coord.add_known(coord_params.g.clone());
        multi_coord.add_known(coord_params.h.clone());
        if !self.aggregate(
            rng,
            comm_scalar,
            comm_result,
            offset,
            sec_param,
            scalar_params,
            coord_params,
            &mut multi_scalar,
            &mut multi_coord,
        )? {
            return Ok(false);
        }
        Ok(multi_scalar.verify() && multi_coord.verify())
    }

    /// Add the relations checked by [`ExpProof::verify`] to `multi_scalar`, over the group of the
    /// curve, and `multi_coord`, over the group committing to coordinates. Returns false when a
    /// repetition can be rejected without evaluating any relation.
    pub fn aggregate<R: RngCore>(
        &self,
        rng: &mut R,
        comm_scalar: &Point,
        comm_result: &PointCommitment,
        offset: Option<&Point>,
        sec_param: usize,
        scalar_params: &PedersenParams,
        coord_params: &PedersenParams,
        multi_scalar: &mut MultiMult,
        multi_coord: &mut MultiMult,
    ) -> Result<bool, Error> {
        if sec_param == 0 {
            return Err(Error::ZeroRepetitions);
        }
        if self.0.len() > MAX_REPETITIONS {
            return Err(Error::TooManyRepetitions(self.0.len(), MAX_REPETITIONS));
        }
        if sec_param > self.0.len() {
            return Err(Error::InsufficientNumberOfRepetitions(
                sec_param,
                self.0.len(),
            ));
        }
        let scalar_group = scalar_params.group;
        let coord_group = coord_params.group;
        scalar_group.ensure_point(comm_scalar)?;
        coord_group.ensure_points([&comm_result.x, &comm_result.y])?;
        if let Some(q) = offset {
            scalar_group.ensure_point(q)?;
        }
        for rep in &self.0 {
            scalar_group.ensure_point(&rep.a)?;
            coord_group.ensure_points([&rep.t_x, &rep.t_y])?;
            match &rep.response {
                OpeningOrAdditionRep::Opening(o) => {
                    scalar_group.ensure_scalars([&o.alpha, &o.beta_1])?;
                    coord_group.ensure_scalars([&o.beta_2, &o.beta_3])?;
                }
                OpeningOrAdditionRep::Addition(a) => {
                    scalar_group.ensure_scalars([&a.z, &a.z_2])?;
                    coord_group.ensure_scalars([&a.r_1, &a.r_2])?;
                }
            }
        }

        let challenge = Self::challenge(
            comm_result,
            self.0.iter().map(|rep| (&rep.a, &rep.t_x, &rep.t_y)),
        );

        let mut indices = (0..self.0.len()).collect::<Vec<_>>();
        indices.shuffle(rng);
        indices.truncate(sec_param);

        let g = &scalar_params.g;
        // The point `t` for opened repetitions and `t1` for the others
        let points = cfg_iter!(indices)
            .map(|i| match &self.0[*i].response {
                OpeningOrAdditionRep::Opening(o) => g * &o.alpha,
                OpeningOrAdditionRep::Addition(a) => with_offset(g * &a.z, offset.cloned()),
            })
            .collect::<Vec<_>>();

        for (i, point) in indices.into_iter().zip(points) {
            let rep = &self.0[i];
            let (x, y) = match coord_params.coordinates_as_scalars(&point) {
                Ok(c) => c,
                Err(Error::PointAtInfinity) => return Ok(false),
                Err(e) => return Err(e),
            };
            match (&rep.response, challenge.bit(i as u64)) {
                (OpeningOrAdditionRep::Opening(o), true) => {
                    let mut rel = Relation::new(scalar_group);
                    rel.insert_many(
                        vec![g.clone(), scalar_params.h.clone(), rep.a.clone()],
                        vec![o.alpha.clone(), o.beta_1.clone(), minus_one(scalar_group)],
                    );
                    rel.drain(rng, multi_scalar);

                    let openings = [(x, &o.beta_2, &rep.t_x), (y, &o.beta_3, &rep.t_y)];
                    for (coord, randomness, comm) in openings {
                        let mut rel = Relation::new(coord_group);
                        rel.insert_many(
                            vec![coord_params.g.clone(), coord_params.h.clone(), comm.clone()],
                            vec![coord, randomness.clone(), minus_one(coord_group)],
                        );
                        rel.drain(rng, multi_coord);
                    }
                }
                (OpeningOrAdditionRep::Addition(a), false) => {
                    let mut rel = Relation::new(scalar_group);
                    rel.insert_many(
                        vec![
                            g.clone(),
                            comm_scalar.clone(),
                            rep.a.clone(),
                            scalar_params.h.clone(),
                        ],
                        vec![
                            a.z.clone(),
                            scalar_group.scalar_from_u64(1),
                            minus_one(scalar_group),
                            a.z_2.clone(),
                        ],
                    );
                    rel.drain(rng, multi_scalar);

                    let comm_t_1 = PointCommitment {
                        x: coord_params.commit_with_randomness(&x, a.r_1.clone()).point,
                        y: coord_params.commit_with_randomness(&y, a.r_2.clone()).point,
                    };
                    let comm_t = PointCommitment {
                        x: rep.t_x.clone(),
                        y: rep.t_y.clone(),
                    };
                    a.proof.aggregate(
                        rng,
                        coord_params,
                        &comm_t_1,
                        comm_result,
                        &comm_t,
                        multi_coord,
                    )?;
                }
                // Response does not match the challenge bit
                _ => return Ok(false),
            }
        }
        Ok(true)
    }

    /// Challenge over the commitment to the result and the commitments of every repetition
    fn challenge<'a>(
        comm_result: &'a PointCommitment,
        reps: impl Iterator<Item = (&'a Point, &'a Point, &'a Point)>,
    ) -> BigUint {
        let mut points = vec![&comm_result.x, &comm_result.y];
        for (a, t_x, t_y) in reps {
            points.push(a);
            points.push(t_x);
            points.push(t_y);
        }
        hash_points(points)
    }
}

fn with_offset(point: Point, offset: Option<Point>) -> Point {
    match offset {
        Some(q) => point + q,
        None => point,
    }
}

fn minus_one(group: &'static Group) -> Scalar {
    -group.scalar_from_u64(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::{p256, tom_edwards256};
    use ark_std::rand::{rngs::StdRng, SeedableRng};
    use std::time::Instant;

    fn setup(rng: &mut StdRng) -> (PedersenParams, PedersenParams) {
        (
            PedersenParams::generate(rng, p256()),
            PedersenParams::generate(rng, tom_edwards256()),
        )
    }

    #[test]
    fn scalar_mult() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let (scalar_params, coord_params) = setup(&mut rng);
        let curve = p256();
        let num_reps = 16;

        for with_q in [false, true] {
            let s = curve.random_scalar(&mut rng);
            let q = &curve.generator() * &curve.random_scalar(&mut rng);
            let offset = if with_q { Some(&q) } else { None };
            let p = match offset {
                Some(q) => &(&scalar_params.g * &s) - q,
                None => &scalar_params.g * &s,
            };
            let comm_s = scalar_params.commit(&mut rng, &s);
            let comm_p = coord_params.commit_point(&mut rng, &p).unwrap();

            let start = Instant::now();
            let proof = ExpProof::new(
                &mut rng,
                &s,
                &comm_s,
                &p,
                &comm_p,
                offset,
                num_reps,
                &scalar_params,
                &coord_params,
            )
            .unwrap();
            println!(
                "Proving scalar multiplication with {} repetitions takes {:?}",
                num_reps,
                start.elapsed()
            );
            assert_eq!(proof.0.len(), num_reps);
            // Both kinds of responses are present
            assert!(proof
                .0
                .iter()
                .any(|r| matches!(r.response, OpeningOrAdditionRep::Opening(_))));
            assert!(proof
                .0
                .iter()
                .any(|r| matches!(r.response, OpeningOrAdditionRep::Addition(_))));

            let start = Instant::now();
            assert!(proof
                .verify(
                    &mut rng,
                    &comm_s.point,
                    &comm_p.comm(),
                    offset,
                    num_reps,
                    &scalar_params,
                    &coord_params
                )
                .unwrap());
            println!(
                "Verifying scalar multiplication with {} repetitions takes {:?}",
                num_reps,
                start.elapsed()
            );

            // A random subset of the repetitions
            assert!(proof
                .verify(
                    &mut rng,
                    &comm_s.point,
                    &comm_p.comm(),
                    offset,
                    num_reps / 2,
                    &scalar_params,
                    &coord_params
                )
                .unwrap());

            // Different scalar commitment
            let other_comm_s = scalar_params.commit(&mut rng, &s);
            assert!(!proof
                .verify(
                    &mut rng,
                    &other_comm_s.point,
                    &comm_p.comm(),
                    offset,
                    num_reps,
                    &scalar_params,
                    &coord_params
                )
                .unwrap());

            // Different offset
            let other_q = curve.generator();
            assert!(!proof
                .verify(
                    &mut rng,
                    &comm_s.point,
                    &comm_p.comm(),
                    Some(&other_q),
                    num_reps,
                    &scalar_params,
                    &coord_params
                )
                .unwrap());

            assert_eq!(
                proof.verify(
                    &mut rng,
                    &comm_s.point,
                    &comm_p.comm(),
                    offset,
                    num_reps + 1,
                    &scalar_params,
                    &coord_params
                ),
                Err(Error::InsufficientNumberOfRepetitions(num_reps + 1, num_reps))
            );
        }
    }

    #[test]
    fn tampered_proof() {
        let mut rng = StdRng::seed_from_u64(1u64);
        let (scalar_params, coord_params) = setup(&mut rng);
        let curve = p256();
        let num_reps = 8;
        let s = curve.random_scalar(&mut rng);
        let p = &scalar_params.g * &s;
        let comm_s = scalar_params.commit(&mut rng, &s);
        let comm_p = coord_params.commit_point(&mut rng, &p).unwrap();
        let proof = ExpProof::new(
            &mut rng,
            &s,
            &comm_s,
            &p,
            &comm_p,
            None,
            num_reps,
            &scalar_params,
            &coord_params,
        )
        .unwrap();
        let verify = |proof: &ExpProof, rng: &mut StdRng| {
            proof
                .verify(
                    rng,
                    &comm_s.point,
                    &comm_p.comm(),
                    None,
                    num_reps,
                    &scalar_params,
                    &coord_params,
                )
                .unwrap()
        };
        assert!(verify(&proof, &mut rng));

        let one = curve.scalar_from_u64(1);
        for i in 0..num_reps {
            let mut tampered = proof.clone();
            match &mut tampered.0[i].response {
                OpeningOrAdditionRep::Opening(o) => o.alpha = &o.alpha + &one,
                OpeningOrAdditionRep::Addition(a) => a.z_2 = &a.z_2 + &one,
            }
            assert!(!verify(&tampered, &mut rng));
        }

        // Changing a commitment changes the challenge bits
        let mut tampered = proof.clone();
        tampered.0[0].a = &tampered.0[0].a + &curve.generator();
        assert!(!verify(&tampered, &mut rng));

        // A response of the wrong kind
        let opening = proof
            .0
            .iter()
            .position(|r| matches!(r.response, OpeningOrAdditionRep::Opening(_)));
        let addition = proof
            .0
            .iter()
            .position(|r| matches!(r.response, OpeningOrAdditionRep::Addition(_)));
        if let (Some(i), Some(j)) = (opening, addition) {
            let mut tampered = proof.clone();
            tampered.0[i].response = proof.0[j].response.clone();
            assert!(!verify(&tampered, &mut rng));
        }
    }

    #[test]
    fn invalid_inputs() {
        let mut rng = StdRng::seed_from_u64(2u64);
        let (scalar_params, coord_params) = setup(&mut rng);
        let curve = p256();
        let s = curve.random_scalar(&mut rng);
        let p = &scalar_params.g * &s;
        let comm_s = scalar_params.commit(&mut rng, &s);
        let comm_p = coord_params.commit_point(&mut rng, &p).unwrap();
        let prove = |rng: &mut StdRng, s: &Scalar, p: &Point, comm_p, reps| {
            ExpProof::new(
                rng,
                s,
                &comm_s,
                p,
                comm_p,
                None,
                reps,
                &scalar_params,
                &coord_params,
            )
        };

        assert_eq!(
            prove(&mut rng, &s, &p, &comm_p, MAX_REPETITIONS + 1),
            Err(Error::TooManyRepetitions(MAX_REPETITIONS + 1, MAX_REPETITIONS))
        );
        assert_eq!(prove(&mut rng, &s, &p, &comm_p, 0), Err(Error::ZeroRepetitions));

        let other_s = &s + &curve.scalar_from_u64(1);
        assert_eq!(
            prove(&mut rng, &other_s, &p, &comm_p, 4),
            Err(Error::IncorrectScalarOpening)
        );

        let other_p = p.dbl();
        let comm_other_p = coord_params.commit_point(&mut rng, &other_p).unwrap();
        assert_eq!(
            prove(&mut rng, &s, &other_p, &comm_other_p, 4),
            Err(Error::InvalidScalarMultResult)
        );
        assert_eq!(
            prove(&mut rng, &s, &p, &comm_other_p, 4),
            Err(Error::IncorrectPointOpening)
        );

        let proof = prove(&mut rng, &s, &p, &comm_p, 4).unwrap();
        assert_eq!(
            proof.verify(
                &mut rng,
                &comm_s.point,
                &comm_p.comm(),
                None,
                0,
                &scalar_params,
                &coord_params
            ),
            Err(Error::ZeroRepetitions)
        );
    }
}
