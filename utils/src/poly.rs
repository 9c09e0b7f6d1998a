use crate::{
    error::ArithmeticError,
    modular::{add_mod, inv_mod, mul_mod, neg_mod, sub_mod},
};
use ark_std::{cfg_into_iter, vec, vec::Vec};
use num::{traits::Zero, BigUint};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Evaluate the polynomial with coefficients `coeffs` (constant term first) at `x` using Horner's rule
pub fn eval_poly(coeffs: &[BigUint], x: &BigUint, m: &BigUint) -> BigUint {
    coeffs.iter().rev().fold(BigUint::zero(), |acc, c| {
        add_mod(&mul_mod(&acc, x, m), c, m)
    })
}

/// Coefficients of `(X - roots[0]) * (X - roots[1]) * ...` modulo `m`, constant term first
pub fn poly_from_roots(roots: &[BigUint], m: &BigUint) -> Vec<BigUint> {
    let mut s = vec![BigUint::from(1u32) % m];
    for r in roots {
        let neg_r = neg_mod(r, m);
        let mut next = vec![BigUint::zero(); s.len() + 1];
        for (i, c) in s.iter().enumerate() {
            next[i + 1] = add_mod(&next[i + 1], c, m);
            next[i] = add_mod(&next[i], &mul_mod(c, &neg_r, m), m);
        }
        s = next;
    }
    s
}

/// Lagrange interpolation modulo `m` (a prime). Returns the coefficients, constant term first, of
/// the unique polynomial of degree less than `xs.len()` passing through every `(xs[i], ys[i])`.
///
/// Uses `s(X) = Π (X - x_i)`: the basis polynomial for `x_i` is `(s(X) / (X - x_i)) / s'(x_i)`, and
/// the quotient comes from synthetic division. The result is re-evaluated at every node before returning.
pub fn interpolate(
    xs: &[BigUint],
    ys: &[BigUint],
    m: &BigUint,
) -> Result<Vec<BigUint>, ArithmeticError> {
    if xs.len() != ys.len() {
        return Err(ArithmeticError::ExpectedSameSizeSequences(
            xs.len(),
            ys.len(),
        ));
    }
    let n = xs.len();
    let s = poly_from_roots(xs, m);
    // One scaled basis polynomial per node
    let basis = cfg_into_iter!(0..n)
        .map(|i| {
            // s'(x_i) = Π_{j != i} (x_i - x_j)
            let mut phi = BigUint::zero();
            for j in (1..=n).rev() {
                phi = add_mod(
                    &mul_mod(&BigUint::from(j), &s[j], m),
                    &mul_mod(&xs[i], &phi, m),
                    m,
                );
            }
            let phi_inv = match inv_mod(&phi, m) {
                Ok(inv) => inv,
                Err(ArithmeticError::NotInvertible) => {
                    let j = (0..n)
                        .find(|&j| j != i && sub_mod(&xs[i], &xs[j], m).is_zero())
                        .unwrap_or(i);
                    return Err(ArithmeticError::RepeatedInterpolationNode(i, j));
                }
                Err(e) => return Err(e),
            };
            let w = mul_mod(&phi_inv, &ys[i], m);

            // Synthetic division of s(X) by (X - x_i)
            let mut term = vec![BigUint::zero(); n];
            let mut b = BigUint::from(1u32);
            for j in (0..n).rev() {
                term[j] = mul_mod(&b, &w, m);
                b = add_mod(&s[j], &mul_mod(&xs[i], &b, m), m);
            }
            Ok(term)
        })
        .collect::<Result<Vec<_>, ArithmeticError>>()?;
    let mut coeffs = vec![BigUint::zero(); n];
    for term in basis {
        for (c, t) in coeffs.iter_mut().zip(term) {
            *c = add_mod(c, &t, m);
        }
    }
    for (x, y) in xs.iter().zip(ys.iter()) {
        if eval_poly(&coeffs, x, m) != (y % m) {
            return Err(ArithmeticError::InterpolationFailed);
        }
    }
    Ok(coeffs)
}
