//! Batch verification of linear relations between points.
//!
//! A [`Relation`] is a claim `s_1·P_1 + s_2·P_2 + ... = O`. Several relations are combined into one
//! [`MultiMult`] by multiplying each relation with a fresh random scalar, so that the whole batch
//! holds (except with negligible probability) iff the sum evaluates to the identity. The sum is
//! evaluated with the Bos–Coster method: repeatedly replace the two largest terms `a·P + b·Q`,
//! `a >= b`, by `(a - b)·P + b·(Q + P)` until a single non-zero term is left. When `a` is several
//! times `b` the subtractions are done at once with a small scalar multiplication.

use super::{group::Group, point::Point, scalar::Scalar};
use ark_std::{
    cmp::Ordering, collections::BinaryHeap, end_timer, rand::RngCore, start_timer, vec::Vec,
};
use num::traits::One;

#[derive(Clone, Debug)]
struct Pair {
    point: Point,
    scalar: Scalar,
}

impl PartialEq for Pair {
    fn eq(&self, other: &Self) -> bool {
        self.scalar == other.scalar
    }
}

impl Eq for Pair {}

impl PartialOrd for Pair {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Pairs are ordered by their scalar only
impl Ord for Pair {
    fn cmp(&self, other: &Self) -> Ordering {
        self.scalar.cmp(&other.scalar)
    }
}

/// Accumulator of `(point, scalar)` pairs whose sum of products is computed at the end.
#[derive(Clone, Debug)]
pub struct MultiMult {
    group: &'static Group,
    pairs: Vec<Pair>,
    /// Indices into `pairs` of points registered with [`MultiMult::add_known`]
    known: Vec<usize>,
}

impl MultiMult {
    pub fn new(group: &'static Group) -> Self {
        Self {
            group,
            pairs: Vec::new(),
            known: Vec::new(),
        }
    }

    pub fn group(&self) -> &'static Group {
        self.group
    }

    /// Number of pairs that will take part in the evaluation
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Register a point that is expected to appear in many relations, like a commitment key. All
    /// later insertions of an equal point add to a single scalar instead of creating a new pair.
    pub fn add_known(&mut self, point: Point) {
        if self.known.iter().any(|i| self.pairs[*i].point == point) {
            return;
        }
        self.known.push(self.pairs.len());
        self.pairs.push(Pair {
            point,
            scalar: self.group.scalar_from_u64(0),
        });
    }

    pub fn insert(&mut self, point: Point, scalar: Scalar) {
        let group = self.group;
        assert!(
            *point.group() == *group && *scalar.group() == *group,
            "cannot insert elements of another group into a batch over {}",
            group
        );
        match self.known.iter().find(|i| self.pairs[**i].point == point) {
            Some(i) => {
                let pair = &mut self.pairs[*i];
                pair.scalar = &pair.scalar + &scalar;
            }
            None => self.pairs.push(Pair { point, scalar }),
        }
    }

    /// `Σ s_i·P_i` computed with the Bos–Coster method
    pub fn evaluate(self) -> Point {
        let eval_time = start_timer!(|| format!("Bos-Coster over {} pairs", self.pairs.len()));
        let group = self.group;
        let mut heap = BinaryHeap::from(self.pairs);
        let result = loop {
            let a = match heap.pop() {
                Some(a) => a,
                None => break group.identity(),
            };
            let mut b = match heap.peek_mut() {
                Some(b) => b,
                None => break &a.point * &a.scalar,
            };
            if b.scalar.is_zero() {
                break &a.point * &a.scalar;
            }
            // a·P + b·Q = (a mod b)·P + b·(Q + q·P) with q = a / b
            let q = a.scalar.value() / b.scalar.value();
            let diff = group.scalar(a.scalar.value() % b.scalar.value());
            let sum = if q.is_one() {
                &b.point + &a.point
            } else {
                &b.point + &a.point.mul_biguint(&q)
            };
            b.point = sum;
            // Dropping `b` restores the heap property. Its scalar did not change so nothing moves.
            drop(b);
            if !diff.is_zero() {
                heap.push(Pair {
                    point: a.point,
                    scalar: diff,
                });
            }
        };
        end_timer!(eval_time);
        result
    }

    /// Whether the batch sums to the identity
    pub fn verify(self) -> bool {
        self.evaluate().is_identity()
    }
}

/// A claim that `Σ s_i·P_i` is the identity
#[derive(Clone, Debug)]
pub struct Relation {
    group: &'static Group,
    pairs: Vec<(Point, Scalar)>,
}

impl Relation {
    pub fn new(group: &'static Group) -> Self {
        Self {
            group,
            pairs: Vec::new(),
        }
    }

    pub fn insert(&mut self, point: Point, scalar: Scalar) {
        self.pairs.push((point, scalar));
    }

    /// Insert the pairs `(points[i], scalars[i])`. Both must have the same length.
    pub fn insert_many(&mut self, points: Vec<Point>, scalars: Vec<Scalar>) {
        assert_eq!(
            points.len(),
            scalars.len(),
            "relation needs as many points as scalars"
        );
        self.pairs.extend(points.into_iter().zip(scalars));
    }

    /// Move the relation into `multi` after multiplying all its scalars by one fresh random scalar
    pub fn drain<R: RngCore>(self, rng: &mut R, multi: &mut MultiMult) {
        let r = self.group.random_scalar(rng);
        for (point, scalar) in self.pairs {
            multi.insert(point, &scalar * &r);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::instances::{p256, tom_edwards256};
    use ark_std::rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn bos_coster_matches_naive_sum() {
        let mut rng = StdRng::seed_from_u64(0u64);
        for group in [p256(), tom_edwards256()] {
            let g = group.generator();
            for n in [0usize, 1, 2, 5, 12] {
                let points = (0..n)
                    .map(|_| &g * &group.random_scalar(&mut rng))
                    .collect::<Vec<_>>();
                let scalars = (0..n)
                    .map(|_| group.random_scalar(&mut rng))
                    .collect::<Vec<_>>();
                let mut expected = group.identity();
                let mut multi = MultiMult::new(group);
                for (p, s) in points.iter().zip(scalars.iter()) {
                    expected = expected + &(p * s);
                    multi.insert(p.clone(), s.clone());
                }
                assert_eq!(multi.len(), n);
                assert_eq!(multi.evaluate(), expected);
            }
        }
    }

    #[test]
    fn equal_and_zero_scalars() {
        let group = p256();
        let g = group.generator();
        let h = &g * &group.scalar_from_u64(7);

        // Equal scalars make a zero difference which must not be pushed back
        let mut multi = MultiMult::new(group);
        multi.insert(g.clone(), group.scalar_from_u64(5));
        multi.insert(h.clone(), group.scalar_from_u64(5));
        assert_eq!(multi.evaluate(), &g * &group.scalar_from_u64(40));

        let mut multi = MultiMult::new(group);
        multi.insert(g.clone(), group.scalar_from_u64(0));
        multi.insert(h.clone(), group.scalar_from_u64(0));
        assert!(multi.verify());
    }

    #[test]
    fn unbalanced_scalars() {
        let group = p256();
        let g = group.generator();
        let h = g.dbl();
        let big = group.scalar(num::BigUint::from(1u32) << 200);
        let small = group.scalar_from_u64(3);
        let mut multi = MultiMult::new(group);
        multi.insert(g.clone(), big.clone());
        multi.insert(h.clone(), small.clone());
        assert_eq!(multi.evaluate(), g.dbl_mul(&big, &h, &small));
    }

    #[test]
    fn known_points_are_merged() {
        let mut rng = StdRng::seed_from_u64(1u64);
        let group = tom_edwards256();
        let g = group.generator();
        let h = &g * &group.random_scalar(&mut rng);
        let mut multi = MultiMult::new(group);
        multi.add_known(g.clone());
        multi.add_known(h.clone());
        multi.add_known(g.clone());
        assert_eq!(multi.len(), 2);

        multi.insert(g.clone(), group.scalar_from_u64(3));
        multi.insert(h.clone(), group.scalar_from_u64(2));
        multi.insert(g.clone(), group.scalar_from_u64(4));
        // A known point given in other coordinates is still recognized
        multi.insert(&(&g + &g) - &g, group.scalar_from_u64(1));
        assert_eq!(multi.len(), 2);
        let expected = g.dbl_mul(&group.scalar_from_u64(8), &h, &group.scalar_from_u64(2));
        assert_eq!(multi.evaluate(), expected);
    }

    #[test]
    fn batched_relations() {
        let mut rng = StdRng::seed_from_u64(2u64);
        let group = p256();
        let g = group.generator();
        let x = group.random_scalar(&mut rng);
        let y = group.random_scalar(&mut rng);
        let gx = &g * &x;
        let gy = &g * &y;

        // x·G - 1·(xG) = O and y·G - 1·(yG) = O
        let mut multi = MultiMult::new(group);
        multi.add_known(g.clone());
        let mut rel = Relation::new(group);
        rel.insert_many(
            vec![g.clone(), gx.clone()],
            vec![x.clone(), -group.scalar_from_u64(1)],
        );
        rel.drain(&mut rng, &mut multi);
        let mut rel = Relation::new(group);
        rel.insert(g.clone(), y.clone());
        rel.insert(gy.clone(), -group.scalar_from_u64(1));
        rel.drain(&mut rng, &mut multi);
        assert!(multi.verify());

        // One false relation spoils the batch
        let mut multi = MultiMult::new(group);
        let mut rel = Relation::new(group);
        rel.insert_many(
            vec![g.clone(), gx.clone()],
            vec![x.clone(), -group.scalar_from_u64(1)],
        );
        rel.drain(&mut rng, &mut multi);
        let mut rel = Relation::new(group);
        rel.insert_many(
            vec![g.clone(), gy.clone()],
            vec![x.clone(), -group.scalar_from_u64(1)],
        );
        rel.drain(&mut rng, &mut multi);
        assert!(!multi.verify());
    }

    #[test]
    #[should_panic]
    fn relation_lengths_must_match() {
        let group = p256();
        let mut rel = Relation::new(group);
        rel.insert_many(vec![group.generator()], vec![]);
    }
}
