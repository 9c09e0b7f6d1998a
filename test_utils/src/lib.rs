pub mod ecdsa;
#[macro_use]
pub mod serialization;
pub mod statistics;
