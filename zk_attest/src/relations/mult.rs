//! Proof that Pedersen commitments `Cx`, `Cy`, `Cz` hide `x`, `y` and `z = x·y`.
//!
//! `Cz` is rewritten as `Cz = Cx·y + h·(rz - rx·y)`, so the prover shows knowledge of the openings
//! of `Cx` and `Cy` and that the same `y` is the discrete log of `Cz` w.r.t. `Cx`. With random
//! `kx, ky, kz` it sends `Ax = g·kx + h·sx`, `Ay = g·ky + h·sy` and `Az = Cx·ky + h·kz`, and with
//! challenge `c = H(Cx, Cy, Cz, Ax, Ay, Az)` responds
//! `t_x = kx - c·x`, `t_y = ky - c·y`, `t_rx = sx - c·rx`, `t_ry = sy - c·ry` and
//! `t_rz = kz - c·(rz - rx·y)`. The verifier checks
//! - `g·t_x + h·t_rx + Cx·c - Ax = O`
//! - `g·t_y + h·t_ry + Cy·c - Ay = O`
//! - `Cx·t_y + h·t_rz + Cz·c - Az = O`

use super::challenge;
use crate::{
    commitments::{Commitment, PedersenParams},
    curves::{MultiMult, Point, Relation, Scalar},
    error::Error,
};
use ark_std::{rand::RngCore, vec};
use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct MultProof {
    pub a_x: Point,
    pub a_y: Point,
    pub a_z: Point,
    pub t_x: Scalar,
    pub t_y: Scalar,
    pub t_rx: Scalar,
    pub t_ry: Scalar,
    pub t_rz: Scalar,
}

impl MultProof {
    /// Prove that `cz` commits to the product of the values committed in `cx` and `cy`
    pub fn new<R: RngCore>(
        rng: &mut R,
        params: &PedersenParams,
        x: &Scalar,
        y: &Scalar,
        z: &Scalar,
        cx: &Commitment,
        cy: &Commitment,
        cz: &Commitment,
    ) -> Result<Self, Error> {
        let group = params.group;
        group.ensure_points([&cx.point, &cy.point, &cz.point])?;
        group.ensure_scalars([
            x,
            y,
            z,
            &cx.randomness,
            &cy.randomness,
            &cz.randomness,
        ])?;
        if &(x * y) != z {
            return Err(Error::NotAProduct);
        }

        let k_x = group.random_scalar(rng);
        let k_y = group.random_scalar(rng);
        let k_z = group.random_scalar(rng);
        let a_x = params.commit(rng, &k_x);
        let a_y = params.commit(rng, &k_y);
        let a_z = cx.point.dbl_mul(&k_y, &params.h, &k_z);

        let c = challenge(
            group,
            [
                &cx.point,
                &cy.point,
                &cz.point,
                &a_x.point,
                &a_y.point,
                &a_z,
            ],
        );
        let t_x = &k_x - &(&c * x);
        let t_y = &k_y - &(&c * y);
        let t_rx = &a_x.randomness - &(&c * &cx.randomness);
        let t_ry = &a_y.randomness - &(&c * &cy.randomness);
        // Randomness of Cz when written as Cx·y + h·r
        let r = &cz.randomness - &(&cx.randomness * y);
        let t_rz = &k_z - &(&c * &r);
        Ok(Self {
            a_x: a_x.point,
            a_y: a_y.point,
            a_z,
            t_x,
            t_y,
            t_rx,
            t_ry,
            t_rz,
        })
    }

    pub fn verify<R: RngCore>(
        &self,
        rng: &mut R,
        params: &PedersenParams,
        cx: &Point,
        cy: &Point,
        cz: &Point,
    ) -> Result<bool, Error> {
        let mut multi = MultiMult::new(params.group);
        multi.add_known(params.g.clone());
        multi.add_known(params.h.clone());
        self.aggregate(rng, params, cx, cy, cz, &mut multi)?;
        Ok(multi.verify())
    }

    /// Add the relations checked by [`MultProof::verify`] to `multi`
    pub fn aggregate<R: RngCore>(
        &self,
        rng: &mut R,
        params: &PedersenParams,
        cx: &Point,
        cy: &Point,
        cz: &Point,
        multi: &mut MultiMult,
    ) -> Result<(), Error> {
        let group = params.group;
        group.ensure_points([cx, cy, cz, &self.a_x, &self.a_y, &self.a_z])?;
        group.ensure_scalars([&self.t_x, &self.t_y, &self.t_rx, &self.t_ry, &self.t_rz])?;

        let c = challenge(group, [cx, cy, cz, &self.a_x, &self.a_y, &self.a_z]);
        let minus_one = -group.scalar_from_u64(1);

        let mut rel_x = Relation::new(group);
        rel_x.insert_many(
            vec![params.g.clone(), params.h.clone(), cx.clone(), self.a_x.clone()],
            vec![self.t_x.clone(), self.t_rx.clone(), c.clone(), minus_one.clone()],
        );
        let mut rel_y = Relation::new(group);
        rel_y.insert_many(
            vec![params.g.clone(), params.h.clone(), cy.clone(), self.a_y.clone()],
            vec![self.t_y.clone(), self.t_ry.clone(), c.clone(), minus_one.clone()],
        );
        let mut rel_z = Relation::new(group);
        rel_z.insert_many(
            vec![cx.clone(), params.h.clone(), cz.clone(), self.a_z.clone()],
            vec![self.t_y.clone(), self.t_rz.clone(), c, minus_one],
        );
        rel_x.drain(rng, multi);
        rel_y.drain(rng, multi);
        rel_z.drain(rng, multi);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::{p256, tom_edwards256};
    use ark_std::rand::{rngs::StdRng, SeedableRng};
    use std::time::Instant;

    #[test]
    fn product_of_committed_values() {
        let mut rng = StdRng::seed_from_u64(0u64);
        for group in [tom_edwards256(), p256()] {
            let params = PedersenParams::generate(&mut rng, group);
            let x = group.random_scalar(&mut rng);
            let y = group.random_scalar(&mut rng);
            let z = &x * &y;
            let cx = params.commit(&mut rng, &x);
            let cy = params.commit(&mut rng, &y);
            let cz = params.commit(&mut rng, &z);

            let start = Instant::now();
            let proof = MultProof::new(&mut rng, &params, &x, &y, &z, &cx, &cy, &cz).unwrap();
            println!("Proving product over {} takes {:?}", group, start.elapsed());
            let start = Instant::now();
            assert!(proof
                .verify(&mut rng, &params, &cx.point, &cy.point, &cz.point)
                .unwrap());
            println!("Verifying product over {} takes {:?}", group, start.elapsed());

            // Same value on both sides, as for squares
            let x2 = x.square();
            let cx2 = params.commit(&mut rng, &x2);
            let proof = MultProof::new(&mut rng, &params, &x, &x, &x2, &cx, &cx, &cx2).unwrap();
            assert!(proof
                .verify(&mut rng, &params, &cx.point, &cx.point, &cx2.point)
                .unwrap());

            // Commitments in the wrong order
            let proof = MultProof::new(&mut rng, &params, &x, &y, &z, &cx, &cy, &cz).unwrap();
            assert!(!proof
                .verify(&mut rng, &params, &cy.point, &cx.point, &cz.point)
                .unwrap());

            let mut tampered = proof.clone();
            tampered.t_rz = &tampered.t_rz + &group.scalar_from_u64(1);
            assert!(!tampered
                .verify(&mut rng, &params, &cx.point, &cy.point, &cz.point)
                .unwrap());
        }
    }

    #[test]
    fn rejects_non_products() {
        let mut rng = StdRng::seed_from_u64(1u64);
        let params = PedersenParams::generate(&mut rng, tom_edwards256());
        let group = params.group;
        let x = group.random_scalar(&mut rng);
        let y = group.random_scalar(&mut rng);
        let z = &(&x * &y) + &group.scalar_from_u64(1);
        let cx = params.commit(&mut rng, &x);
        let cy = params.commit(&mut rng, &y);
        let cz = params.commit(&mut rng, &z);
        assert_eq!(
            MultProof::new(&mut rng, &params, &x, &y, &z, &cx, &cy, &cz),
            Err(Error::NotAProduct)
        );
    }
}
