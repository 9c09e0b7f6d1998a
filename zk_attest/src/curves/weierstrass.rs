//! Short Weierstrass curves `y^2 = x^3 - 3x + b` in projective coordinates `(X : Y : Z)`, using the
//! complete formulas for `a = -3` of Renes, Costello and Batina, "Complete addition formulas for
//! prime order elliptic curves" (algorithms 4 and 6). The identity is `(0 : 1 : 0)`.

use super::field::Fp;
use num::{
    traits::{One, Zero},
    BigUint,
};

#[derive(Clone, Debug)]
pub(crate) struct ProjectivePoint {
    pub x: BigUint,
    pub y: BigUint,
    pub z: BigUint,
}

impl ProjectivePoint {
    pub fn identity() -> Self {
        Self {
            x: BigUint::zero(),
            y: BigUint::one(),
            z: BigUint::zero(),
        }
    }

    pub fn from_affine(x: BigUint, y: BigUint) -> Self {
        Self {
            x,
            y,
            z: BigUint::one(),
        }
    }

    /// Any curve point with `Z = 0` has `X = 0` as well
    pub fn is_identity(&self) -> bool {
        self.z.is_zero()
    }

    pub fn eq(&self, other: &Self, f: Fp) -> bool {
        f.mul(&self.x, &other.z) == f.mul(&other.x, &self.z)
            && f.mul(&self.y, &other.z) == f.mul(&other.y, &self.z)
    }

    pub fn neg(&self, f: Fp) -> Self {
        Self {
            x: self.x.clone(),
            y: f.neg(&self.y),
            z: self.z.clone(),
        }
    }

    pub fn to_affine(&self, f: Fp) -> Option<(BigUint, BigUint)> {
        if self.is_identity() {
            return None;
        }
        let z_inv = f.inv(&self.z).ok()?;
        Some((f.mul(&self.x, &z_inv), f.mul(&self.y, &z_inv)))
    }

    /// Checks `Y^2 Z = X^3 + a X Z^2 + b Z^3`
    pub fn is_on_curve(&self, f: Fp, a: &BigUint, b: &BigUint) -> bool {
        let (x, y, z) = (&self.x, &self.y, &self.z);
        if x >= f.p || y >= f.p || z >= f.p {
            return false;
        }
        let z2 = f.sqr(z);
        let lhs = f.mul(&f.sqr(y), z);
        let rhs = f.add(
            &f.add(&f.mul(&f.sqr(x), x), &f.mul(&f.mul(a, x), &z2)),
            &f.mul(b, &f.mul(&z2, z)),
        );
        lhs == rhs
    }

    pub fn dbl(&self, f: Fp, b: &BigUint) -> Self {
        let (x, y, z) = (&self.x, &self.y, &self.z);
        let mut t0 = f.sqr(x);
        let t1 = f.sqr(y);
        let mut t2 = f.sqr(z);
        let mut t3 = f.mul(x, y);
        t3 = f.dbl(&t3);
        let mut z3 = f.mul(x, z);
        z3 = f.dbl(&z3);
        let mut y3 = f.mul(b, &t2);
        y3 = f.sub(&y3, &z3);
        let mut x3 = f.dbl(&y3);
        y3 = f.add(&x3, &y3);
        x3 = f.sub(&t1, &y3);
        y3 = f.add(&t1, &y3);
        y3 = f.mul(&x3, &y3);
        x3 = f.mul(&x3, &t3);
        t3 = f.dbl(&t2);
        t2 = f.add(&t2, &t3);
        z3 = f.mul(b, &z3);
        z3 = f.sub(&z3, &t2);
        z3 = f.sub(&z3, &t0);
        t3 = f.dbl(&z3);
        z3 = f.add(&z3, &t3);
        t3 = f.dbl(&t0);
        t0 = f.add(&t3, &t0);
        t0 = f.sub(&t0, &t2);
        t0 = f.mul(&t0, &z3);
        y3 = f.add(&y3, &t0);
        t0 = f.mul(y, z);
        t0 = f.dbl(&t0);
        z3 = f.mul(&t0, &z3);
        x3 = f.sub(&x3, &z3);
        z3 = f.mul(&t0, &t1);
        z3 = f.dbl(&z3);
        z3 = f.dbl(&z3);
        Self {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    pub fn add(&self, other: &Self, f: Fp, b: &BigUint) -> Self {
        let (x1, y1, z1) = (&self.x, &self.y, &self.z);
        let (x2, y2, z2) = (&other.x, &other.y, &other.z);
        let mut t0 = f.mul(x1, x2);
        let mut t1 = f.mul(y1, y2);
        let mut t2 = f.mul(z1, z2);
        let mut t3 = f.add(x1, y1);
        let mut t4 = f.add(x2, y2);
        t3 = f.mul(&t3, &t4);
        t4 = f.add(&t0, &t1);
        t3 = f.sub(&t3, &t4);
        t4 = f.add(y1, z1);
        let mut x3 = f.add(y2, z2);
        t4 = f.mul(&t4, &x3);
        x3 = f.add(&t1, &t2);
        t4 = f.sub(&t4, &x3);
        x3 = f.add(x1, z1);
        let mut y3 = f.add(x2, z2);
        x3 = f.mul(&x3, &y3);
        y3 = f.add(&t0, &t2);
        y3 = f.sub(&x3, &y3);
        let mut z3 = f.mul(b, &t2);
        x3 = f.sub(&y3, &z3);
        z3 = f.dbl(&x3);
        x3 = f.add(&x3, &z3);
        z3 = f.sub(&t1, &x3);
        x3 = f.add(&t1, &x3);
        y3 = f.mul(b, &y3);
        t1 = f.dbl(&t2);
        t2 = f.add(&t1, &t2);
        y3 = f.sub(&y3, &t2);
        y3 = f.sub(&y3, &t0);
        t1 = f.dbl(&y3);
        y3 = f.add(&t1, &y3);
        t1 = f.dbl(&t0);
        t0 = f.add(&t1, &t0);
        t0 = f.sub(&t0, &t2);
        t1 = f.mul(&t4, &y3);
        t2 = f.mul(&t0, &y3);
        y3 = f.mul(&x3, &z3);
        y3 = f.add(&y3, &t2);
        x3 = f.mul(&t3, &x3);
        x3 = f.sub(&x3, &t1);
        z3 = f.mul(&t4, &z3);
        t1 = f.mul(&t3, &t0);
        z3 = f.add(&z3, &t1);
        Self {
            x: x3,
            y: y3,
            z: z3,
        }
    }
}
