use ark_std::{string::ToString, vec::Vec};
use digest::Digest;
use num::BigUint;
use sha2::Sha256;

/// Number of leading digest bytes kept for a Fiat–Shamir challenge, giving 80-bit challenges
pub const CHALLENGE_BYTE_SIZE: usize = 10;

/// Challenge from arbitrary bytes: SHA-256 of `bytes`, truncated to its first
/// [`CHALLENGE_BYTE_SIZE`] bytes and read as a big-endian integer.
pub fn challenge_from_bytes(bytes: &[u8]) -> BigUint {
    let hash = Sha256::digest(bytes);
    BigUint::from_bytes_be(&hash[..CHALLENGE_BYTE_SIZE])
}

/// Hash a list of integers. Each integer is written as its decimal string, prefixed by the 4-byte
/// big-endian length of that string, and the concatenation is hashed as in [`challenge_from_bytes`].
pub fn hash_nums(nums: &[BigUint]) -> BigUint {
    let mut bytes = Vec::new();
    for n in nums {
        let s = n.to_string();
        bytes.extend_from_slice(&(s.len() as u32).to_be_bytes());
        bytes.extend_from_slice(s.as_bytes());
    }
    challenge_from_bytes(&bytes)
}

/// Try-and-increment: hash `bytes` and feed the digest to `f` until it accepts one. The first
/// attempt hashes `bytes` alone, attempt `j` hashes `bytes || "-attempt-" || j`. This is vulnerable
/// to timing attacks and must only be used with public input, like when generating setup parameters.
pub fn try_and_incr<D: Digest, T>(bytes: &[u8], mut f: impl FnMut(&[u8]) -> Option<T>) -> T {
    let mut hash = D::digest(bytes);
    let mut j = 1u64;
    loop {
        if let Some(t) = f(&hash) {
            return t;
        }
        let mut attempt = bytes.to_vec();
        attempt.extend_from_slice(b"-attempt-");
        attempt.extend_from_slice(&j.to_le_bytes());
        hash = D::digest(&attempt);
        j += 1;
    }
}
