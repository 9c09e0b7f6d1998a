//! Elliptic curve groups with big-integer arithmetic: short Weierstrass curves with `a = -3` and
//! twisted Edwards curves, their points and scalars, and batch verification of linear relations.

mod edwards;
mod field;
pub mod group;
pub mod instances;
pub mod multimult;
pub mod point;
pub mod scalar;
mod weierstrass;

pub use group::{CurveModel, Group, GroupByName};
pub use instances::{group_by_name, p256, tom_edwards256, war256};
pub use multimult::{MultiMult, Relation};
pub use point::{hash_points, Point};
pub use scalar::Scalar;
