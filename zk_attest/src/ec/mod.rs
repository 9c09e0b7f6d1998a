//! Protocols about elliptic curve points whose coordinates are committed in another group: point
//! addition, and knowledge of the discrete logarithm of a point given a commitment to it.

pub mod point_addition;
pub mod scalar_mult;
