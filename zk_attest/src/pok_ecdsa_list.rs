//! Proof of knowledge of an ECDSA signature on a message by one of the public keys of a list,
//! without revealing the signature or which key signed, following
//! [ZKAttest](https://eprint.iacr.org/2021/1183).
//!
//! An ECDSA signature `(r, s)` on digest `z` by key `pk` satisfies `R = G·(z/s) + pk·(r/s)` where
//! `r = R.x mod n`. With `s1 = s/r` and `z1 = z/r` this becomes `pk = R·s1 - G·z1`, so once `R` is
//! public the prover
//! 1. commits to `s1` with `R` as the base,
//! 2. commits to the coordinates of `pk` in the group whose order is the field modulus of the
//!    signature curve,
//! 3. proves with an [`ExpProof`] that the committed point is `R·s1 - G·z1`,
//! 4. proves with a [`MembershipProof`] that the committed x coordinate is one of the list.
//!
//! `R` alone reveals neither the key nor the signature since `s` is hidden.

use crate::{
    commitments::{PedersenParams, PointCommitment},
    curves::{p256, tom_edwards256, Group, MultiMult, Point, Scalar},
    ec::scalar_mult::ExpProof,
    error::Error,
    one_of_many::MembershipProof,
};
use ark_std::{end_timer, rand::RngCore, start_timer, vec::Vec};
use digest::Digest;
use num::{BigUint, Zero};
use serde::{Deserialize, Serialize};
use zkattest_utils::modular::truncate_to_bit_len;

/// Repetitions of the exponentiation proof for 80-bit soundness
pub const DEFAULT_SECURITY_LEVEL: usize = 80;
/// Repetitions of the exponentiation proof commonly used for attestations
pub const ATTESTATION_SECURITY_LEVEL: usize = 20;

/// Public parameters of the protocol
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct SystemParameters {
    /// Commitments in the group of the signature curve
    pub nist: PedersenParams,
    /// Commitments to coordinates of points of the signature curve
    pub proof: PedersenParams,
    /// Number of repetitions of the exponentiation proof
    pub sec_level: usize,
}

impl SystemParameters {
    /// Parameters for P-256 signatures with coordinates committed over tomEdwards256. The second
    /// bases are random multiples of the generators, see [`PedersenParams::generate`].
    pub fn generate<R: RngCore>(rng: &mut R, sec_level: usize) -> Self {
        Self {
            nist: PedersenParams::generate(rng, p256()),
            proof: PedersenParams::generate(rng, tom_edwards256()),
            sec_level,
        }
    }

    /// Like [`SystemParameters::generate`] but the second bases are hashed from `label`
    pub fn new<D: Digest>(label: &[u8], sec_level: usize) -> Self {
        let mut nist_label = label.to_vec();
        nist_label.extend_from_slice(b" : NIST");
        let mut proof_label = label.to_vec();
        proof_label.extend_from_slice(b" : PROOF");
        Self {
            nist: PedersenParams::new::<D>(p256(), &nist_label),
            proof: PedersenParams::new::<D>(tom_edwards256(), &proof_label),
            sec_level,
        }
    }
}

/// ECDSA signature rewritten as `pk = r_point·s1 - G·z1`
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TransformedEcdsaSig {
    /// The point `R` whose x coordinate gives `r`
    pub r_point: Point,
    /// `s/r`
    pub s1: Scalar,
    /// `z/r`
    pub z1: Scalar,
}

impl TransformedEcdsaSig {
    /// Verifies `signature`, the big-endian `r || s`, on `msg_hash` by `public_key` and transforms
    /// it. Errors with [`Error::InvalidSignature`] if the signature does not verify.
    pub fn new(signature: &[u8], msg_hash: &[u8], public_key: &Point) -> Result<Self, Error> {
        let group = public_key.group();
        if public_key.is_identity() {
            return Err(Error::PointAtInfinity);
        }
        if signature.is_empty() || signature.len() % 2 != 0 {
            return Err(Error::InvalidSignature);
        }
        let (r, s) = signature.split_at(signature.len() / 2);
        let r = BigUint::from_bytes_be(r);
        let s = BigUint::from_bytes_be(s);
        if r.is_zero() || s.is_zero() || &r >= group.order() || &s >= group.order() {
            return Err(Error::InvalidSignature);
        }
        let r = group.scalar(r);
        let s = group.scalar(s);
        let z = message_scalar(group, msg_hash);

        let s_inv = s
            .inverse()
            .map_err(|_| Error::EcdsaSigResponseNotInvertible)?;
        let r_point = group
            .generator()
            .dbl_mul(&(&z * &s_inv), public_key, &(&r * &s_inv));
        match r_point.to_affine() {
            Some((x, _)) if group.scalar(x.clone()) == r => (),
            _ => return Err(Error::InvalidSignature),
        }

        let r_inv = r.inverse()?;
        Ok(Self {
            s1: &s * &r_inv,
            z1: &z * &r_inv,
            r_point,
        })
    }

    /// Whether `public_key = r_point·s1 - G·z1`
    pub fn verify_prehashed(&self, public_key: &Point) -> Result<bool, Error> {
        let group = self.r_point.group();
        group.ensure_point(public_key)?;
        group.ensure_scalars([&self.s1, &self.z1])?;
        let expected = self
            .r_point
            .dbl_mul(&self.s1, &group.generator(), &(-&self.z1));
        Ok(&expected == public_key)
    }
}

/// Decodes an uncompressed SEC1 P-256 public key, rejecting points not on the curve
pub fn public_key_from_bytes(bytes: &[u8]) -> Result<Point, Error> {
    decode_public_key(p256(), bytes)
}

fn decode_public_key(group: &'static Group, bytes: &[u8]) -> Result<Point, Error> {
    let point = group.deserialize_point(bytes)?;
    if point.is_identity() {
        return Err(Error::PointAtInfinity);
    }
    Ok(point)
}

/// The x coordinate of an uncompressed SEC1 P-256 public key. Lists of keys are lists of these.
pub fn key_to_int(public_key: &[u8]) -> Result<BigUint, Error> {
    let point = public_key_from_bytes(public_key)?;
    point
        .to_affine()
        .map(|(x, _)| x.clone())
        .ok_or(Error::PointAtInfinity)
}

/// Proof that the prover knows a signature on a message by one of a list of public keys
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct SignatureProofList {
    pub r: Point,
    /// Commitment to `s1` with `r` as the base
    pub com_s1: Point,
    /// Commitment to the x coordinate of the public key
    pub key_x_com: Point,
    /// Commitment to the y coordinate of the public key
    pub key_y_com: Point,
    pub exp_proof: ExpProof,
    pub membership_proof: MembershipProof,
}

impl SignatureProofList {
    /// `signature` is the big-endian `r || s` on `msg_hash` by `public_key`, an uncompressed SEC1
    /// key whose x coordinate is `keys[index]`
    pub fn new<R: RngCore>(
        rng: &mut R,
        params: &SystemParameters,
        msg_hash: &[u8],
        signature: &[u8],
        public_key: &[u8],
        index: usize,
        keys: &[BigUint],
    ) -> Result<Self, Error> {
        let public_key = decode_public_key(params.nist.group, public_key)?;
        let sig = TransformedEcdsaSig::new(signature, msg_hash, &public_key)?;
        let params_sig_exp =
            PedersenParams::with_bases(sig.r_point.clone(), params.nist.h.clone())?;

        let commit_time = start_timer!(|| "Commit to signature and key");
        let com_s1 = params_sig_exp.commit(rng, &sig.s1);
        let key_comm = params.proof.commit_point(rng, &public_key)?;
        let q = &params.nist.group.generator() * &sig.z1;
        end_timer!(commit_time);

        let membership_time =
            start_timer!(|| format!("Membership proof over {} keys", keys.len()));
        let keys = keys_as_scalars(params, keys);
        let membership_proof =
            MembershipProof::new(rng, &params.proof, &key_comm.comm_x, index, &keys)?;
        end_timer!(membership_time);

        let exp_time = start_timer!(|| format!(
            "Exponentiation proof with {} repetitions",
            params.sec_level
        ));
        let exp_proof = ExpProof::new(
            rng,
            &sig.s1,
            &com_s1,
            &public_key,
            &key_comm,
            Some(&q),
            params.sec_level,
            &params_sig_exp,
            &params.proof,
        )?;
        end_timer!(exp_time);

        Ok(Self {
            r: sig.r_point,
            com_s1: com_s1.point,
            key_x_com: key_comm.comm_x.point,
            key_y_com: key_comm.comm_y.point,
            exp_proof,
            membership_proof,
        })
    }

    pub fn verify<R: RngCore>(
        &self,
        rng: &mut R,
        params: &SystemParameters,
        msg_hash: &[u8],
        keys: &[BigUint],
    ) -> Result<bool, Error> {
        let group = params.nist.group;
        group.ensure_points([&self.r, &self.com_s1])?;
        let r_x = match self.r.to_affine() {
            Some((x, _)) => group.scalar(x.clone()),
            None => return Err(Error::PointAtInfinity),
        };
        let z1 = &message_scalar(group, msg_hash) * &r_x.inverse()?;
        let q = &group.generator() * &z1;
        let params_sig_exp =
            PedersenParams::with_bases(self.r.clone(), params.nist.h.clone())?;
        let keys = keys_as_scalars(params, keys);

        let verify_time = start_timer!(|| "Verify signature proof");
        let mut multi_nist = MultiMult::new(group);
        multi_nist.add_known(params_sig_exp.g.clone());
        multi_nist.add_known(params_sig_exp.h.clone());
        multi_nist.add_known(self.com_s1.clone());
        let mut multi_proof = MultiMult::new(params.proof.group);
        multi_proof.add_known(params.proof.g.clone());
        multi_proof.add_known(params.proof.h.clone());

        if !self.membership_proof.aggregate(
            rng,
            &params.proof,
            &self.key_x_com,
            &keys,
            &mut multi_proof,
        )? {
            return Ok(false);
        }
        let key_comm = PointCommitment {
            x: self.key_x_com.clone(),
            y: self.key_y_com.clone(),
        };
        if !self.exp_proof.aggregate(
            rng,
            &self.com_s1,
            &key_comm,
            Some(&q),
            params.sec_level,
            &params_sig_exp,
            &params.proof,
            &mut multi_nist,
            &mut multi_proof,
        )? {
            return Ok(false);
        }
        let valid = multi_nist.verify() && multi_proof.verify();
        end_timer!(verify_time);
        Ok(valid)
    }
}

/// The digest truncated to the bit length of the group order, as a scalar
fn message_scalar(group: &'static Group, msg_hash: &[u8]) -> Scalar {
    group.scalar(truncate_to_bit_len(
        &BigUint::from_bytes_be(msg_hash),
        group.order(),
    ))
}

fn keys_as_scalars(params: &SystemParameters, keys: &[BigUint]) -> Vec<Scalar> {
    keys.iter()
        .map(|k| params.proof.group.scalar(k.clone()))
        .collect()
}
