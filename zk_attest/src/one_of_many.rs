//! One-out-of-many proof of [Groth and Kohlweiss](https://eprint.iacr.org/2014/764) showing that a
//! Pedersen commitment opens to one of the values of a public list without revealing which one.
//!
//! The list is padded to `N = 2^n` entries by repeating its first value. The prover commits to each
//! bit `l_j` of the secret index `l` as `cl_j`, to a mask `a_j` as `ca_j` and to `l_j·a_j` as `cb_j`.
//! With `f_j = l_j·x + a_j`, the polynomial `p_i(x) = Π_j (bit j of i ? f_j : x - f_j)` has degree
//! `n` in `x` only for `i = l`, so `Σ_i v_i·p_i(x) = v_l·x^n - d(x)` for a polynomial `d` of degree
//! less than `n` that the prover commits to coefficient-wise in `cd`. The coefficients of `d` come from
//! interpolating its values at `0..n`.
//!
//! The challenge hashes the commitment and the padded list along with the prover's commitments, so a
//! proof only verifies for the statement it was created for.

use crate::{
    commitments::{Commitment, PedersenParams},
    curves::{group::points_to_bytes, Group, MultiMult, Point, Relation, Scalar},
    error::Error,
};
use ark_std::{cfg_into_iter, end_timer, rand::RngCore, start_timer, vec, vec::Vec};
use num::BigUint;
use serde::{Deserialize, Serialize};
use zkattest_utils::{hashing_utils::challenge_from_bytes, poly::interpolate};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct MembershipProof {
    /// Commitments to the bits of the index
    pub cl: Vec<Point>,
    /// Commitments to the masks of the bits
    pub ca: Vec<Point>,
    /// Commitments to the products of the bits and their masks
    pub cb: Vec<Point>,
    /// Commitments to the coefficients of `d`
    pub cd: Vec<Point>,
    pub f: Vec<Scalar>,
    pub za: Vec<Scalar>,
    pub zb: Vec<Scalar>,
    pub zd: Scalar,
}

impl MembershipProof {
    /// Prove that `comm`, created with `params`, opens to `values[index]`
    pub fn new<R: RngCore>(
        rng: &mut R,
        params: &PedersenParams,
        comm: &Commitment,
        index: usize,
        values: &[Scalar],
    ) -> Result<Self, Error> {
        let group = params.group;
        group.ensure_scalars(values)?;
        group.ensure_point(&comm.point)?;
        let values = pad(values)?;
        if index >= values.len() {
            return Err(Error::IndexOutOfBounds(index, values.len()));
        }
        if !params.opens_to(comm, &values[index]) {
            return Err(Error::CommitmentDoesNotOpenToValue(index));
        }
        let n = values.len().trailing_zeros() as usize;
        let zero = group.scalar_from_u64(0);
        let one = group.scalar_from_u64(1);

        let bits = (0..n)
            .map(|j| {
                if (index >> j) & 1 == 1 {
                    one.clone()
                } else {
                    zero.clone()
                }
            })
            .collect::<Vec<_>>();
        let mut random = || {
            (0..n)
                .map(|_| group.random_scalar(rng))
                .collect::<Vec<_>>()
        };
        let r = random();
        let a = random();
        let s = random();
        let t = random();
        let rho = random();

        let commit_time = start_timer!(|| format!("Commit to {} bits", n));
        let mut cl = Vec::with_capacity(n);
        let mut ca = Vec::with_capacity(n);
        let mut cb = Vec::with_capacity(n);
        for j in 0..n {
            cl.push(params.commit_with_randomness(&bits[j], r[j].clone()).point);
            ca.push(params.commit_with_randomness(&a[j], s[j].clone()).point);
            cb.push(
                params
                    .commit_with_randomness(&(&bits[j] * &a[j]), t[j].clone())
                    .point,
            );
        }
        end_timer!(commit_time);

        let interpolate_time = start_timer!(|| "Interpolate d");
        // Values of d at 0..n
        let d_evals = cfg_into_iter!(0..n)
            .map(|w| {
                let w = group.scalar_from_u64(w as u64);
                let f_1 = (0..n)
                    .map(|j| &(&bits[j] * &w) + &a[j])
                    .collect::<Vec<_>>();
                let f_0 = (0..n)
                    .map(|j| &(&(&one - &bits[j]) * &w) - &a[j])
                    .collect::<Vec<_>>();
                let p = bit_products(&f_1, &f_0, &one);
                values
                    .iter()
                    .zip(p.iter())
                    .fold(zero.clone(), |acc, (v, p_i)| {
                        &acc + &(&(&values[index] - v) * p_i)
                    })
                    .into_value()
            })
            .collect::<Vec<_>>();
        let nodes = (0..n).map(BigUint::from).collect::<Vec<_>>();
        let d = interpolate(&nodes, &d_evals, group.order())?;
        let cd = d
            .into_iter()
            .zip(rho.iter())
            .map(|(d_k, rho_k)| {
                params
                    .commit_with_randomness(&group.scalar(d_k), rho_k.clone())
                    .point
            })
            .collect::<Vec<_>>();
        end_timer!(interpolate_time);

        let x = statement_challenge(
            group,
            &comm.point,
            &values,
            cl.iter().chain(&ca).chain(&cb).chain(&cd),
        );
        let mut f = Vec::with_capacity(n);
        let mut za = Vec::with_capacity(n);
        let mut zb = Vec::with_capacity(n);
        for j in 0..n {
            let f_j = &(&bits[j] * &x) + &a[j];
            za.push(&(&r[j] * &x) + &s[j]);
            zb.push(&(&r[j] * &(&x - &f_j)) + &t[j]);
            f.push(f_j);
        }
        let zd = rho
            .iter()
            .enumerate()
            .fold(&comm.randomness * &x.pow(n as u64), |acc, (k, rho_k)| {
                &acc - &(rho_k * &x.pow(k as u64))
            });

        Ok(Self {
            cl,
            ca,
            cb,
            cd,
            f,
            za,
            zb,
            zd,
        })
    }

    /// Verify that `comm` opens to one of `values`
    pub fn verify<R: RngCore>(
        &self,
        rng: &mut R,
        params: &PedersenParams,
        comm: &Point,
        values: &[Scalar],
    ) -> Result<bool, Error> {
        let mut multi = MultiMult::new(params.group);
        multi.add_known(params.g.clone());
        multi.add_known(params.h.clone());
        if !self.aggregate(rng, params, comm, values, &mut multi)? {
            return Ok(false);
        }
        Ok(multi.verify())
    }

    /// Add the relations checked by [`MembershipProof::verify`] to `multi`. Returns false when the
    /// size of the proof does not match the size of the list.
    pub fn aggregate<R: RngCore>(
        &self,
        rng: &mut R,
        params: &PedersenParams,
        comm: &Point,
        values: &[Scalar],
        multi: &mut MultiMult,
    ) -> Result<bool, Error> {
        let group = params.group;
        group.ensure_point(comm)?;
        group.ensure_scalars(values)?;
        group.ensure_points(self.cl.iter().chain(&self.ca).chain(&self.cb).chain(&self.cd))?;
        group.ensure_scalars(self.f.iter().chain(&self.za).chain(&self.zb))?;
        group.ensure_scalars([&self.zd])?;
        let values = pad(values)?;
        let n = values.len().trailing_zeros() as usize;
        if [
            self.cl.len(),
            self.ca.len(),
            self.cb.len(),
            self.cd.len(),
            self.f.len(),
            self.za.len(),
            self.zb.len(),
        ]
        .iter()
        .any(|l| *l != n)
        {
            return Ok(false);
        }

        let x = statement_challenge(
            group,
            comm,
            &values,
            self.cl
                .iter()
                .chain(&self.ca)
                .chain(&self.cb)
                .chain(&self.cd),
        );
        let one = group.scalar_from_u64(1);
        let minus_one = -&one;

        for j in 0..n {
            // Commitments to bits
            let mut rel = Relation::new(group);
            rel.insert_many(
                vec![
                    self.cl[j].clone(),
                    self.ca[j].clone(),
                    params.g.clone(),
                    params.h.clone(),
                ],
                vec![x.clone(), one.clone(), -&self.f[j], -&self.za[j]],
            );
            rel.drain(rng, multi);

            let mut rel = Relation::new(group);
            rel.insert_many(
                vec![self.cl[j].clone(), self.cb[j].clone(), params.h.clone()],
                vec![&x - &self.f[j], one.clone(), -&self.zb[j]],
            );
            rel.drain(rng, multi);
        }

        let x_minus_f = self.f.iter().map(|f_j| &x - f_j).collect::<Vec<_>>();
        let p = bit_products(&self.f, &x_minus_f, &one);
        let total = values
            .iter()
            .zip(p.iter())
            .fold(group.scalar_from_u64(0), |acc, (v, p_i)| &acc + &(v * p_i));

        let mut rel = Relation::new(group);
        let mut x_pow = one;
        for cd_k in &self.cd {
            rel.insert(cd_k.clone(), &minus_one * &x_pow);
            x_pow = &x_pow * &x;
        }
        rel.insert(comm.clone(), x_pow);
        rel.insert(params.g.clone(), -&total);
        rel.insert(params.h.clone(), -&self.zd);
        rel.drain(rng, multi);
        Ok(true)
    }
}

/// Pad `values` to a power of two, and at least 2, by repeating the first value
pub fn pad(values: &[Scalar]) -> Result<Vec<Scalar>, Error> {
    let first = values.first().ok_or(Error::EmptyValueList)?;
    let size = values.len().next_power_of_two().max(2);
    let mut padded = values.to_vec();
    padded.resize(size, first.clone());
    Ok(padded)
}

/// Fiat–Shamir challenge over the commitment, the padded list and the first move of the prover
fn statement_challenge<'a>(
    group: &'static Group,
    comm: &'a Point,
    values: &[Scalar],
    commitments: impl IntoIterator<Item = &'a Point>,
) -> Scalar {
    let mut bytes = points_to_bytes(ark_std::iter::once(comm).chain(commitments));
    for v in values {
        bytes.extend_from_slice(&v.to_bytes());
    }
    group.scalar(challenge_from_bytes(&bytes))
}

/// For each `i` below `2^n`, the product over `j` of `ones[j]` if bit `j` of `i` is set and of
/// `zeros[j]` otherwise.
fn bit_products(ones: &[Scalar], zeros: &[Scalar], one: &Scalar) -> Vec<Scalar> {
    let mut p = vec![one.clone()];
    for (f_1, f_0) in ones.iter().zip(zeros) {
        let upper = p.iter().map(|p_i| p_i * f_1).collect::<Vec<_>>();
        for p_i in p.iter_mut() {
            *p_i = &*p_i * f_0;
        }
        p.extend(upper);
    }
    p
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::{p256, tom_edwards256};
    use ark_std::rand::{rngs::StdRng, SeedableRng};
    use std::time::Instant;

    fn values(count: usize, rng: &mut StdRng, params: &PedersenParams) -> Vec<Scalar> {
        (0..count)
            .map(|_| params.group.random_scalar(rng))
            .collect()
    }

    #[test]
    fn membership() {
        let mut rng = StdRng::seed_from_u64(0u64);
        for group in [p256(), tom_edwards256()] {
            let params = PedersenParams::generate(&mut rng, group);
            for count in [1, 2, 3, 4, 7, 8, 16] {
                let values = values(count, &mut rng, &params);
                for index in [0, count / 2, count - 1] {
                    let comm = params.commit(&mut rng, &values[index]);

                    let start = Instant::now();
                    let proof =
                        MembershipProof::new(&mut rng, &params, &comm, index, &values).unwrap();
                    let prove_time = start.elapsed();

                    let start = Instant::now();
                    assert!(proof
                        .verify(&mut rng, &params, &comm.point, &values)
                        .unwrap());
                    println!(
                        "For a list of {} values over {}, proving takes {:?} and verifying takes {:?}",
                        count,
                        group,
                        prove_time,
                        start.elapsed()
                    );

                    // Tampered list
                    let mut tampered = values.clone();
                    tampered[index] = &tampered[index] + &group.scalar_from_u64(1);
                    assert!(!proof
                        .verify(&mut rng, &params, &comm.point, &tampered)
                        .unwrap());

                    // Different commitment to the same value
                    let other = params.commit(&mut rng, &values[index]);
                    assert!(!proof
                        .verify(&mut rng, &params, &other.point, &values)
                        .unwrap());
                }
            }
        }
    }

    #[test]
    fn moved_entry() {
        let mut rng = StdRng::seed_from_u64(1u64);
        let params = PedersenParams::generate(&mut rng, tom_edwards256());
        let values = values(8, &mut rng, &params);
        let comm = params.commit(&mut rng, &values[3]);
        let proof = MembershipProof::new(&mut rng, &params, &comm, 3, &values).unwrap();
        assert!(proof.verify(&mut rng, &params, &comm.point, &values).unwrap());

        let mut moved = values.clone();
        moved.swap(3, 5);
        assert!(!proof.verify(&mut rng, &params, &comm.point, &moved).unwrap());

        // A list of a different size gives a proof of a different size
        assert!(!proof
            .verify(&mut rng, &params, &comm.point, &values[..4])
            .unwrap());
        let mut longer = values.clone();
        longer.push(values[0].clone());
        assert!(!proof.verify(&mut rng, &params, &comm.point, &longer).unwrap());

        let mut tampered = proof.clone();
        tampered.zd = &tampered.zd + &params.group.scalar_from_u64(1);
        assert!(!tampered.verify(&mut rng, &params, &comm.point, &values).unwrap());

        let mut tampered = proof.clone();
        tampered.cd.swap(0, 1);
        assert!(!tampered.verify(&mut rng, &params, &comm.point, &values).unwrap());
    }

    #[test]
    fn challenge_binds_statement() {
        let mut rng = StdRng::seed_from_u64(3u64);
        let params = PedersenParams::generate(&mut rng, tom_edwards256());
        let values = values(3, &mut rng, &params);
        let comm = params.commit(&mut rng, &values[1]);
        let proof = MembershipProof::new(&mut rng, &params, &comm, 1, &values).unwrap();

        // Writing out the padding is the same statement
        let mut padded = values.clone();
        padded.push(values[0].clone());
        assert!(proof.verify(&mut rng, &params, &comm.point, &padded).unwrap());

        let first_move = proof
            .cl
            .iter()
            .chain(&proof.ca)
            .chain(&proof.cb)
            .chain(&proof.cd)
            .cloned()
            .collect::<Vec<_>>();
        let padded = pad(&values).unwrap();
        let x = statement_challenge(params.group, &comm.point, &padded, &first_move);

        let other_comm = params.commit(&mut rng, &values[1]);
        assert_ne!(
            statement_challenge(params.group, &other_comm.point, &padded, &first_move),
            x
        );
        let mut other_values = padded.clone();
        other_values[2] = params.group.random_scalar(&mut rng);
        assert_ne!(
            statement_challenge(params.group, &comm.point, &other_values, &first_move),
            x
        );

        // Same value under another randomness
        assert!(!proof
            .verify(&mut rng, &params, &other_comm.point, &values)
            .unwrap());
        // An entry other than the committed one replaced
        assert!(!proof
            .verify(&mut rng, &params, &comm.point, &other_values)
            .unwrap());
    }

    #[test]
    fn invalid_inputs() {
        let mut rng = StdRng::seed_from_u64(2u64);
        let params = PedersenParams::generate(&mut rng, tom_edwards256());
        let values = values(5, &mut rng, &params);
        let comm = params.commit(&mut rng, &values[2]);

        assert_eq!(
            MembershipProof::new(&mut rng, &params, &comm, 8, &values),
            Err(Error::IndexOutOfBounds(8, 8))
        );
        assert_eq!(
            MembershipProof::new(&mut rng, &params, &comm, 1, &values),
            Err(Error::CommitmentDoesNotOpenToValue(1))
        );
        assert_eq!(
            MembershipProof::new(&mut rng, &params, &comm, 0, &[]),
            Err(Error::EmptyValueList)
        );
        // Padded entries repeat the first value
        let comm_first = params.commit(&mut rng, &values[0]);
        let proof = MembershipProof::new(&mut rng, &params, &comm_first, 6, &values).unwrap();
        assert!(proof
            .verify(&mut rng, &params, &comm_first.point, &values)
            .unwrap());

        let other_params = PedersenParams::generate(&mut rng, p256());
        let other_values = other_params.group.random_scalar(&mut rng);
        assert!(MembershipProof::new(&mut rng, &params, &comm, 0, &[other_values]).is_err());
    }

    #[test]
    fn padding() {
        let group = tom_edwards256();
        let values = (1..=5u64)
            .map(|v| group.scalar_from_u64(v))
            .collect::<Vec<_>>();
        let padded = pad(&values).unwrap();
        assert_eq!(padded.len(), 8);
        assert_eq!(&padded[..5], &values[..]);
        assert!(padded[5..].iter().all(|v| v == &values[0]));
        assert_eq!(pad(&values[..1]).unwrap().len(), 2);
        assert_eq!(pad(&values[..4]).unwrap().len(), 4);
    }
}
