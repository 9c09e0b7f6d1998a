#![cfg_attr(not(feature = "std"), no_std)]

//! Arithmetic and encoding helpers shared by the `zk_attest` crates: modular arithmetic over `num`
//! big integers, Fiat–Shamir challenge hashing, polynomial interpolation and serde adapters.

pub mod error;
pub mod hashing_utils;
pub mod modular;
pub mod poly;
pub mod serde_utils;

pub use error::ArithmeticError;
