use num::BigUint;
use zkattest_utils::{
    modular::{add_mod, inv_mod, mul_mod, neg_mod, sub_mod},
    ArithmeticError,
};

/// Arithmetic in the base field `F_p` of a curve. Inputs must already be reduced.
#[derive(Clone, Copy)]
pub(crate) struct Fp<'a> {
    pub p: &'a BigUint,
}

impl<'a> Fp<'a> {
    pub fn new(p: &'a BigUint) -> Self {
        Self { p }
    }

    pub fn add(&self, a: &BigUint, b: &BigUint) -> BigUint {
        add_mod(a, b, self.p)
    }

    pub fn sub(&self, a: &BigUint, b: &BigUint) -> BigUint {
        sub_mod(a, b, self.p)
    }

    pub fn mul(&self, a: &BigUint, b: &BigUint) -> BigUint {
        mul_mod(a, b, self.p)
    }

    pub fn sqr(&self, a: &BigUint) -> BigUint {
        mul_mod(a, a, self.p)
    }

    pub fn dbl(&self, a: &BigUint) -> BigUint {
        add_mod(a, a, self.p)
    }

    pub fn neg(&self, a: &BigUint) -> BigUint {
        neg_mod(a, self.p)
    }

    pub fn inv(&self, a: &BigUint) -> Result<BigUint, ArithmeticError> {
        inv_mod(a, self.p)
    }
}
