//! Zero-knowledge proof that a message was signed with one ECDSA key of a public list, without revealing which
//! key, as described in the paper [ZKAttest Ring and Group Signatures for Existing ECDSA Keys](https://eprint.iacr.org/2021/1183).
//!
//! - Elliptic curve groups of short Weierstrass and twisted Edwards curves, with points, scalars and a batch verifier that
//! evaluates many randomized relations with one Bos–Coster multi-scalar multiplication. Check the [module](./src/curves/mod.rs)
//! - Pedersen commitments to scalars and to the coordinates of points of another curve. Check the [module](./src/commitments.rs)
//! - Sigma protocols for equality and product of committed values. Check the [module](./src/relations/mod.rs)
//! - Proofs of point addition and scalar multiplication on a short Weierstrass curve given commitments to the coordinates of the points.
//! Check the [point addition module](./src/ec/point_addition.rs) and [scalar multiplication module](./src/ec/scalar_mult.rs)
//! - The one-out-of-many proof of Groth and Kohlweiss. Check the [module](./src/one_of_many.rs)
//! - The attestation protocol combining the above for P-256 signatures, with coordinates committed over the tomEdwards256 curve whose
//! group order is the field modulus of P-256. Check the [module](./src/pok_ecdsa_list.rs)

pub mod commitments;
pub mod curves;
/// Protocols for proving addition and scalar multiplication of short Weierstrass elliptic curve points given Pedersen commitments
/// to their coordinates.
pub mod ec;
pub mod error;
pub mod one_of_many;
pub mod pok_ecdsa_list;
pub mod relations;
