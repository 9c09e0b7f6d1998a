//! Sigma protocols over Pedersen commitments made non-interactive with Fiat–Shamir:
//! - equality of the values committed in 2 commitments
//! - a committed value is the product of 2 other committed values
//!
//! Each proof offers `new` to create it, `verify` to check it on its own and `aggregate` to push its
//! verification relations into a caller's [`MultiMult`](crate::curves::MultiMult) so that many proofs
//! are checked with a single multi-scalar multiplication.

pub mod equality;
pub mod mult;

pub use equality::EqualityProof;
pub use mult::MultProof;

use crate::curves::{hash_points, Group, Point, Scalar};

/// Fiat–Shamir challenge over `points` as a scalar of `group`
pub(crate) fn challenge<'a>(
    group: &'static Group,
    points: impl IntoIterator<Item = &'a Point>,
) -> Scalar {
    group.scalar(hash_points(points))
}
