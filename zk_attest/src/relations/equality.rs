//! Proof that 2 Pedersen commitments `C1 = g·x + h·r1` and `C2 = g·x + h·r2` hide the same `x`.
//!
//! The prover picks random `k` and commits to it twice, `A1 = g·k + h·s1` and `A2 = g·k + h·s2`.
//! With challenge `c = H(C1, C2, A1, A2)` the responses are `t_x = k - c·x`, `t_r1 = s1 - c·r1` and
//! `t_r2 = s2 - c·r2`, and the verifier checks
//! `g·t_x + h·t_r1 + C1·c - A1 = O` and `g·t_x + h·t_r2 + C2·c - A2 = O`.

use super::challenge;
use crate::{
    commitments::{Commitment, PedersenParams},
    curves::{MultiMult, Point, Relation, Scalar},
    error::Error,
};
use ark_std::{rand::RngCore, vec};
use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct EqualityProof {
    pub a_1: Point,
    pub a_2: Point,
    pub t_x: Scalar,
    pub t_r1: Scalar,
    pub t_r2: Scalar,
}

impl EqualityProof {
    /// Prove that `c1` and `c2` both commit to `x`
    pub fn new<R: RngCore>(
        rng: &mut R,
        params: &PedersenParams,
        x: &Scalar,
        c1: &Commitment,
        c2: &Commitment,
    ) -> Result<Self, Error> {
        let group = params.group;
        group.ensure_points([&c1.point, &c2.point])?;
        group.ensure_scalars([x, &c1.randomness, &c2.randomness])?;

        let k = group.random_scalar(rng);
        let a_1 = params.commit(rng, &k);
        let a_2 = params.commit(rng, &k);
        let c = challenge(group, [&c1.point, &c2.point, &a_1.point, &a_2.point]);
        let t_x = &k - &(&c * x);
        let t_r1 = &a_1.randomness - &(&c * &c1.randomness);
        let t_r2 = &a_2.randomness - &(&c * &c2.randomness);
        Ok(Self {
            a_1: a_1.point,
            a_2: a_2.point,
            t_x,
            t_r1,
            t_r2,
        })
    }

    pub fn verify<R: RngCore>(
        &self,
        rng: &mut R,
        params: &PedersenParams,
        c1: &Point,
        c2: &Point,
    ) -> Result<bool, Error> {
        let mut multi = MultiMult::new(params.group);
        multi.add_known(params.g.clone());
        multi.add_known(params.h.clone());
        self.aggregate(rng, params, c1, c2, &mut multi)?;
        Ok(multi.verify())
    }

    /// Add the relations checked by [`EqualityProof::verify`] to `multi`
    pub fn aggregate<R: RngCore>(
        &self,
        rng: &mut R,
        params: &PedersenParams,
        c1: &Point,
        c2: &Point,
        multi: &mut MultiMult,
    ) -> Result<(), Error> {
        let group = params.group;
        group.ensure_points([c1, c2, &self.a_1, &self.a_2])?;
        group.ensure_scalars([&self.t_x, &self.t_r1, &self.t_r2])?;

        let c = challenge(group, [c1, c2, &self.a_1, &self.a_2]);
        let minus_one = -group.scalar_from_u64(1);
        for (comm, a, t_r) in [(c1, &self.a_1, &self.t_r1), (c2, &self.a_2, &self.t_r2)] {
            let mut rel = Relation::new(group);
            rel.insert_many(
                vec![params.g.clone(), params.h.clone(), comm.clone(), a.clone()],
                vec![self.t_x.clone(), t_r.clone(), c.clone(), minus_one.clone()],
            );
            rel.drain(rng, multi);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::{p256, tom_edwards256};
    use ark_std::rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn equality_of_committed_values() {
        let mut rng = StdRng::seed_from_u64(0u64);
        for group in [tom_edwards256(), p256()] {
            let params = PedersenParams::generate(&mut rng, group);
            let x = group.random_scalar(&mut rng);
            let c1 = params.commit(&mut rng, &x);
            let c2 = params.commit(&mut rng, &x);
            let proof = EqualityProof::new(&mut rng, &params, &x, &c1, &c2).unwrap();
            assert!(proof
                .verify(&mut rng, &params, &c1.point, &c2.point)
                .unwrap());

            // Swapped commitments change the challenge
            assert!(!proof
                .verify(&mut rng, &params, &c2.point, &c1.point)
                .unwrap());

            // Commitments to different values
            let y = group.random_scalar(&mut rng);
            let c3 = params.commit(&mut rng, &y);
            let proof = EqualityProof::new(&mut rng, &params, &x, &c1, &c3).unwrap();
            assert!(!proof
                .verify(&mut rng, &params, &c1.point, &c3.point)
                .unwrap());

            let mut proof = EqualityProof::new(&mut rng, &params, &x, &c1, &c2).unwrap();
            proof.t_r2 = &proof.t_r2 + &group.scalar_from_u64(1);
            assert!(!proof
                .verify(&mut rng, &params, &c1.point, &c2.point)
                .unwrap());
        }
    }

    #[test]
    fn rejects_foreign_elements() {
        let mut rng = StdRng::seed_from_u64(1u64);
        let params = PedersenParams::generate(&mut rng, tom_edwards256());
        let x = params.group.random_scalar(&mut rng);
        let c1 = params.commit(&mut rng, &x);
        let c2 = params.commit(&mut rng, &x);
        let mut proof = EqualityProof::new(&mut rng, &params, &x, &c1, &c2).unwrap();
        proof.a_1 = p256().generator();
        assert!(matches!(
            proof.verify(&mut rng, &params, &c1.point, &c2.point),
            Err(Error::IncompatibleGroup(_, _))
        ));
        let y = p256().random_scalar(&mut rng);
        assert!(EqualityProof::new(&mut rng, &params, &y, &c1, &c2).is_err());
    }
}
