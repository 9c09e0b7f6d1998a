//! Twisted Edwards curves `a x^2 + y^2 = 1 + d x^2 y^2` in extended coordinates `(X : Y : T : Z)`
//! with `x = X/Z`, `y = Y/Z` and `T = XY/Z`, using the formulas of sections 3.1 and 3.3 of Hisil et al.,
//! "Twisted Edwards Curves Revisited". The identity is `(0 : 1 : 0 : 1)`.

use super::field::Fp;
use num::{
    traits::{One, Zero},
    BigUint,
};

#[derive(Clone, Debug)]
pub(crate) struct ExtendedPoint {
    pub x: BigUint,
    pub y: BigUint,
    pub t: BigUint,
    pub z: BigUint,
}

impl ExtendedPoint {
    pub fn identity() -> Self {
        Self {
            x: BigUint::zero(),
            y: BigUint::one(),
            t: BigUint::zero(),
            z: BigUint::one(),
        }
    }

    pub fn from_affine(x: BigUint, y: BigUint, f: Fp) -> Self {
        let t = f.mul(&x, &y);
        Self {
            x,
            y,
            t,
            z: BigUint::one(),
        }
    }

    pub fn is_identity(&self) -> bool {
        self.x.is_zero() && !self.z.is_zero() && self.y == self.z
    }

    pub fn eq(&self, other: &Self, f: Fp) -> bool {
        f.mul(&self.x, &other.z) == f.mul(&other.x, &self.z)
            && f.mul(&self.y, &other.z) == f.mul(&other.y, &self.z)
    }

    pub fn neg(&self, f: Fp) -> Self {
        Self {
            x: f.neg(&self.x),
            y: self.y.clone(),
            t: f.neg(&self.t),
            z: self.z.clone(),
        }
    }

    /// Never `None` for a point on the curve since `Z` is then non-zero
    pub fn to_affine(&self, f: Fp) -> Option<(BigUint, BigUint)> {
        let z_inv = f.inv(&self.z).ok()?;
        Some((f.mul(&self.x, &z_inv), f.mul(&self.y, &z_inv)))
    }

    /// Checks `a X^2 + Y^2 = Z^2 + d T^2` and `XY = ZT`
    pub fn is_on_curve(&self, f: Fp, a: &BigUint, d: &BigUint) -> bool {
        let (x, y, t, z) = (&self.x, &self.y, &self.t, &self.z);
        if x >= f.p || y >= f.p || t >= f.p || z >= f.p || z.is_zero() {
            return false;
        }
        let lhs = f.add(&f.mul(a, &f.sqr(x)), &f.sqr(y));
        let rhs = f.add(&f.sqr(z), &f.mul(d, &f.sqr(t)));
        lhs == rhs && f.mul(x, y) == f.mul(z, t)
    }

    pub fn dbl(&self, f: Fp, a: &BigUint) -> Self {
        let (x, y, z) = (&self.x, &self.y, &self.z);
        let aa = f.sqr(x);
        let bb = f.sqr(y);
        let cc = f.dbl(&f.sqr(z));
        let dd = f.mul(a, &aa);
        let ee = f.sub(&f.sub(&f.sqr(&f.add(x, y)), &aa), &bb);
        let gg = f.add(&dd, &bb);
        let ff = f.sub(&gg, &cc);
        let hh = f.sub(&dd, &bb);
        Self {
            x: f.mul(&ee, &ff),
            y: f.mul(&gg, &hh),
            t: f.mul(&ee, &hh),
            z: f.mul(&ff, &gg),
        }
    }

    pub fn add(&self, other: &Self, f: Fp, a: &BigUint, d: &BigUint) -> Self {
        let aa = f.mul(&self.x, &other.x);
        let bb = f.mul(&self.y, &other.y);
        let cc = f.mul(d, &f.mul(&self.t, &other.t));
        let dd = f.mul(&self.z, &other.z);
        let ee = f.sub(
            &f.sub(
                &f.mul(&f.add(&self.x, &self.y), &f.add(&other.x, &other.y)),
                &aa,
            ),
            &bb,
        );
        let ff = f.sub(&dd, &cc);
        let gg = f.add(&dd, &cc);
        let hh = f.sub(&bb, &f.mul(a, &aa));
        Self {
            x: f.mul(&ee, &ff),
            y: f.mul(&gg, &hh),
            t: f.mul(&ee, &hh),
            z: f.mul(&ff, &gg),
        }
    }
}
