//! Arithmetic over integers modulo an arbitrary modulus, on top of `num`'s `BigUint`.
//! All results are canonical, i.e. lie in `[0, m)`.

use crate::error::ArithmeticError;
use ark_std::{rand::RngCore, vec, vec::Vec};
use num::{
    traits::{One, Zero},
    BigInt, BigUint, Integer,
};

/// Reduce a possibly negative integer to `[0, m)`
pub fn pos_mod(a: &BigInt, m: &BigUint) -> BigUint {
    let m = BigInt::from(m.clone());
    // `mod_floor` takes the sign of the divisor
    match a.mod_floor(&m).to_biguint() {
        Some(r) => r,
        None => BigUint::zero(),
    }
}

pub fn add_mod(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    (a + b) % m
}

pub fn sub_mod(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    let a = a % m;
    let b = b % m;
    if a >= b {
        a - b
    } else {
        m - b + a
    }
}

pub fn mul_mod(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    (a * b) % m
}

pub fn neg_mod(a: &BigUint, m: &BigUint) -> BigUint {
    let a = a % m;
    if a.is_zero() {
        a
    } else {
        m - a
    }
}

/// `base^exp mod m`. A modulus of 1 gives 0.
pub fn pow_mod(base: &BigUint, exp: &BigUint, m: &BigUint) -> Result<BigUint, ArithmeticError> {
    if m.is_zero() {
        return Err(ArithmeticError::InvalidModulus);
    }
    Ok(base.modpow(exp, m))
}

/// Inverse of `a` modulo `m` with the extended Euclidean algorithm.
pub fn inv_mod(a: &BigUint, m: &BigUint) -> Result<BigUint, ArithmeticError> {
    if m.is_zero() {
        return Err(ArithmeticError::InvalidModulus);
    }
    let a = a % m;
    if a.is_zero() {
        return Err(ArithmeticError::NotInvertible);
    }
    let (mut old_r, mut r) = (BigInt::from(a), BigInt::from(m.clone()));
    let (mut old_s, mut s) = (BigInt::one(), BigInt::zero());
    while !r.is_zero() {
        let q = &old_r / &r;
        let next_r = &old_r - &q * &r;
        old_r = ark_std::mem::replace(&mut r, next_r);
        let next_s = &old_s - &q * &s;
        old_s = ark_std::mem::replace(&mut s, next_s);
    }
    if !old_r.is_one() {
        return Err(ArithmeticError::NotInvertible);
    }
    Ok(pos_mod(&old_s, m))
}

/// `a / b mod m`
pub fn div_mod(a: &BigUint, b: &BigUint, m: &BigUint) -> Result<BigUint, ArithmeticError> {
    Ok(mul_mod(a, &inv_mod(b, m)?, m))
}

/// Euler's criterion. `p` must be an odd prime.
pub fn is_quadratic_residue(a: &BigUint, p: &BigUint) -> Result<bool, ArithmeticError> {
    let a = a % p;
    if a.is_zero() {
        return Ok(true);
    }
    let e = (p - 1u32) >> 1;
    Ok(pow_mod(&a, &e, p)?.is_one())
}

/// Square root modulo a prime `p ≡ 3 (mod 4)`, computed as `a^((p+1)/4)`. Which of the two roots
/// is returned is unspecified.
pub fn sqrt_mod(a: &BigUint, p: &BigUint) -> Result<BigUint, ArithmeticError> {
    if (p % 4u32) != BigUint::from(3u32) {
        return Err(ArithmeticError::InvalidModulus);
    }
    let a = a % p;
    let root = pow_mod(&a, &((p + 1u32) >> 2), p)?;
    if mul_mod(&root, &root, p) != a {
        return Err(ArithmeticError::NonResidue);
    }
    Ok(root)
}

/// Miller–Rabin rounds used unless the caller needs a different error bound
pub const DEFAULT_MILLER_RABIN_ROUNDS: usize = 7;

/// Miller–Rabin with `rounds` random bases. Composites pass with probability at most `4^-rounds`.
pub fn is_probable_prime<R: RngCore>(n: &BigUint, rounds: usize, rng: &mut R) -> bool {
    let two = BigUint::from(2u32);
    let three = BigUint::from(3u32);
    if *n == two || *n == three {
        return true;
    }
    if *n < two || n.is_even() {
        return false;
    }
    let n_minus_one = n - 1u32;
    let s = match n_minus_one.trailing_zeros() {
        Some(s) => s,
        None => return false,
    };
    let d = &n_minus_one >> s;
    'witness: for _ in 0..rounds {
        // base in [2, n - 2]
        let base = random_below(rng, &(n - &three)) + &two;
        let mut x = base.modpow(&d, n);
        if x.is_one() || x == n_minus_one {
            continue;
        }
        for _ in 1..s {
            x = mul_mod(&x, &x, n);
            if x.is_one() {
                return false;
            }
            if x == n_minus_one {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

/// Uniformly random integer in `[0, n)` by rejection sampling. `n` must be non-zero.
pub fn random_below<R: RngCore>(rng: &mut R, n: &BigUint) -> BigUint {
    if n.is_zero() {
        return BigUint::zero();
    }
    let bits = n.bits();
    let num_bytes = ((bits + 7) / 8) as usize;
    let excess = (num_bytes as u64) * 8 - bits;
    let mut buf = vec![0u8; num_bytes];
    loop {
        rng.fill_bytes(&mut buf);
        // Clear the bits above the bit length of `n` so that at least half the samples are accepted
        buf[0] &= 0xffu8 >> excess;
        let candidate = BigUint::from_bytes_be(&buf);
        if candidate < *n {
            return candidate;
        }
    }
}

/// Number of bytes needed to write any integer below `m`
pub fn byte_len(m: &BigUint) -> usize {
    ((m.bits() + 7) / 8) as usize
}

/// Big-endian bytes of `n` left-padded with zeros to exactly `len` bytes
pub fn to_be_bytes_fixed(n: &BigUint, len: usize) -> Result<Vec<u8>, ArithmeticError> {
    let bytes = if n.is_zero() {
        Vec::new()
    } else {
        n.to_bytes_be()
    };
    if bytes.len() > len {
        return Err(ArithmeticError::ValueTooLarge(bytes.len(), len));
    }
    let mut out = vec![0u8; len - bytes.len()];
    out.extend_from_slice(&bytes);
    Ok(out)
}

/// Keep the `bit_len(n)` most significant bits of `z`, as ECDSA does with message digests
pub fn truncate_to_bit_len(z: &BigUint, n: &BigUint) -> BigUint {
    let z_bits = z.bits();
    let n_bits = n.bits();
    if z_bits > n_bits {
        z >> (z_bits - n_bits)
    } else {
        z.clone()
    }
}

/// Base-16 digits of `k`, most significant first. 0 has the single digit 0.
pub fn nibbles(k: &BigUint) -> Vec<u8> {
    k.to_radix_be(16)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_std::rand::{rngs::StdRng, SeedableRng};

    fn big(s: &str) -> BigUint {
        BigUint::parse_bytes(s.as_bytes(), 16).unwrap()
    }

    #[test]
    fn inverses() {
        assert_eq!(
            inv_mod(&BigUint::from(3u32), &BigUint::from(5u32)).unwrap(),
            BigUint::from(2u32)
        );
        assert_eq!(
            inv_mod(&BigUint::from(7u32), &BigUint::from(41u32)).unwrap(),
            BigUint::from(6u32)
        );
        assert_eq!(
            inv_mod(&BigUint::from(6u32), &BigUint::from(9u32)),
            Err(ArithmeticError::NotInvertible)
        );
        assert_eq!(
            inv_mod(&BigUint::from(0u32), &BigUint::from(7u32)),
            Err(ArithmeticError::NotInvertible)
        );

        let mut rng = StdRng::seed_from_u64(0u64);
        let p = big("ffffffff00000001000000000000000000000000ffffffffffffffffffffffff");
        for _ in 0..20 {
            let a = random_below(&mut rng, &p);
            if a.is_zero() {
                continue;
            }
            let inv = inv_mod(&a, &p).unwrap();
            assert!(mul_mod(&a, &inv, &p).is_one());
            assert_eq!(div_mod(&a, &a, &p).unwrap(), BigUint::one());
        }
    }

    #[test]
    fn reductions() {
        let m = BigUint::from(7u32);
        assert_eq!(pos_mod(&BigInt::from(-1), &m), BigUint::from(6u32));
        assert_eq!(pos_mod(&BigInt::from(-14), &m), BigUint::zero());
        assert_eq!(pos_mod(&BigInt::from(15), &m), BigUint::one());
        assert_eq!(
            sub_mod(&BigUint::from(2u32), &BigUint::from(5u32), &m),
            BigUint::from(4u32)
        );
        assert_eq!(neg_mod(&BigUint::zero(), &m), BigUint::zero());
        assert_eq!(neg_mod(&BigUint::from(3u32), &m), BigUint::from(4u32));
        assert_eq!(
            pow_mod(&BigUint::from(5u32), &BigUint::from(3u32), &BigUint::one()).unwrap(),
            BigUint::zero()
        );
        assert_eq!(
            pow_mod(&BigUint::from(5u32), &BigUint::from(3u32), &BigUint::zero()),
            Err(ArithmeticError::InvalidModulus)
        );
    }

    #[test]
    fn primality() {
        let mut rng = StdRng::seed_from_u64(1u64);
        // 561 and 1105 are Carmichael numbers
        for (n, expected) in [
            (23u32, true),
            (221, false),
            (257, true),
            (477, false),
            (561, false),
            (1105, false),
            (2, true),
            (1, false),
        ] {
            assert_eq!(
                is_probable_prime(&BigUint::from(n), DEFAULT_MILLER_RABIN_ROUNDS, &mut rng),
                expected,
                "{}",
                n
            );
        }
        let war256_p = big("ffffffff0000000100000000000000017e72b42b30e7317793135661b1c4b117");
        assert!(is_probable_prime(&war256_p, DEFAULT_MILLER_RABIN_ROUNDS, &mut rng));
        assert!(!is_probable_prime(
            &(&war256_p * 3u32),
            DEFAULT_MILLER_RABIN_ROUNDS,
            &mut rng
        ));
        assert!(is_probable_prime(&war256_p, 20, &mut rng));
    }

    #[test]
    fn square_roots() {
        let p = BigUint::from(23u32);
        for a in 1u32..23 {
            let a = BigUint::from(a);
            match sqrt_mod(&a, &p) {
                Ok(root) => {
                    assert!(is_quadratic_residue(&a, &p).unwrap());
                    assert_eq!(mul_mod(&root, &root, &p), a);
                }
                Err(e) => {
                    assert_eq!(e, ArithmeticError::NonResidue);
                    assert!(!is_quadratic_residue(&a, &p).unwrap());
                }
            }
        }
        assert_eq!(
            sqrt_mod(&BigUint::from(4u32), &BigUint::from(17u32)),
            Err(ArithmeticError::InvalidModulus)
        );
    }

    #[test]
    fn byte_helpers() {
        assert_eq!(
            to_be_bytes_fixed(&BigUint::from(0x0102u32), 4).unwrap(),
            vec![0, 0, 1, 2]
        );
        assert_eq!(to_be_bytes_fixed(&BigUint::zero(), 2).unwrap(), vec![0, 0]);
        assert_eq!(
            to_be_bytes_fixed(&BigUint::from(0x010203u32), 2),
            Err(ArithmeticError::ValueTooLarge(3, 2))
        );
        assert_eq!(byte_len(&BigUint::from(256u32)), 2);
        assert_eq!(nibbles(&BigUint::from(0xa5u32)), vec![0xa, 0x5]);
        assert_eq!(nibbles(&BigUint::zero()), vec![0]);

        let n = BigUint::from(0xffu32);
        assert_eq!(
            truncate_to_bit_len(&BigUint::from(0xabcdu32), &n),
            BigUint::from(0xabu32)
        );
        assert_eq!(truncate_to_bit_len(&BigUint::from(0x12u32), &n), BigUint::from(0x12u32));
    }

    #[test]
    fn random_is_below_bound() {
        let mut rng = StdRng::seed_from_u64(2u64);
        let n = BigUint::from(1000u32);
        for _ in 0..200 {
            assert!(random_below(&mut rng, &n) < n);
        }
    }
}
