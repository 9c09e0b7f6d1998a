//! ECDSA P-256 keys and signatures created with the `p256` crate

use p256::ecdsa::{signature::Signer, Signature, SigningKey};
use rand_core::OsRng;
use sha2::{Digest, Sha256};

pub struct SignedMessage {
    /// Uncompressed SEC1 encoding of the public key
    pub public_key: Vec<u8>,
    /// SHA-256 digest of the message
    pub msg_hash: Vec<u8>,
    /// Big-endian `r || s`
    pub signature: Vec<u8>,
}

/// A fresh key pair
pub fn keypair() -> SigningKey {
    SigningKey::random(&mut OsRng)
}

/// Uncompressed SEC1 encoding of the public key of `key`
pub fn public_key_bytes(key: &SigningKey) -> Vec<u8> {
    key.verifying_key()
        .to_encoded_point(false)
        .as_bytes()
        .to_vec()
}

/// Signs `msg` with `key`, hashing it with SHA-256
pub fn sign(key: &SigningKey, msg: &[u8]) -> SignedMessage {
    let signature: Signature = key.sign(msg);
    SignedMessage {
        public_key: public_key_bytes(key),
        msg_hash: Sha256::digest(msg).to_vec(),
        signature: signature.to_bytes().to_vec(),
    }
}
