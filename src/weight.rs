//! Vector weights with a component-wise partial order, and Pareto fronts of such weights.
//!
//! A `Weight` `a` dominates `b` if every dimension of `a` is greater or equal to the respective
//! dimension of `b`. A `WeightFront` only holds weights that do not dominate each other.

use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// A weight vector with a fixed number of dimensions.
#[derive(Debug, Eq, PartialEq, Clone, Hash)]
pub struct Weight {
    values: Vec<i64>,
}

impl Weight {

    /// Returns the zero weight with `dimension` dimensions.
    pub fn zero(dimension: usize) -> Self {
        Weight { values: vec![0; dimension] }
    }

    /// Returns a weight with `value` in each of the `dimension` dimensions.
    pub fn uniform(dimension: usize, value: i64) -> Self {
        Weight { values: vec![value; dimension] }
    }

    pub fn dimension(&self) -> usize {
        self.values.len()
    }

    pub fn values(&self) -> &[i64] {
        &self.values
    }

    /// Returns `true` if every dimension of `self` is lower or equal to the one of `other`.
    pub fn dominated_by(&self, other: &Weight) -> bool {
        debug_assert_eq!(self.dimension(), other.dimension());
        self.values.iter().zip(other.values.iter()).all(|(a, b)| a <= b)
    }
}

impl From<Vec<i64>> for Weight {
    fn from(values: Vec<i64>) -> Self {
        Weight { values }
    }
}

impl AddAssign<&Weight> for Weight {
    fn add_assign(&mut self, other: &Weight) {
        debug_assert_eq!(self.dimension(), other.dimension());
        for (a, b) in self.values.iter_mut().zip(other.values.iter()) {
            *a += b;
        }
    }
}

impl SubAssign<&Weight> for Weight {
    fn sub_assign(&mut self, other: &Weight) {
        debug_assert_eq!(self.dimension(), other.dimension());
        for (a, b) in self.values.iter_mut().zip(other.values.iter()) {
            *a -= b;
        }
    }
}

impl Add for &Weight {
    type Output = Weight;

    fn add(self, other: &Weight) -> Weight {
        let mut sum = self.clone();
        sum += other;
        sum
    }
}

impl Sub for &Weight {
    type Output = Weight;

    fn sub(self, other: &Weight) -> Weight {
        let mut diff = self.clone();
        diff -= other;
        diff
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, v) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", v)?;
        }
        write!(f, "}}")
    }
}

/// A set of mutually non-dominated weights.
#[derive(Debug, Eq, PartialEq, Clone, Default)]
pub struct WeightFront {
    weights: Vec<Weight>,
}

impl WeightFront {

    pub fn new() -> Self {
        WeightFront { weights: Vec::new() }
    }

    /// Builds the front of all given weights.
    pub fn from_weights<'w>(weights: impl IntoIterator<Item=&'w Weight>) -> Self {
        let mut front = WeightFront::new();
        for weight in weights {
            front.try_insert(weight.clone());
        }
        front
    }

    /// Inserts `weight` unless it is dominated by (or equal to) a member. Members dominated by
    /// `weight` are evicted.
    /// Returns `true` if `weight` was inserted.
    pub fn try_insert(&mut self, weight: Weight) -> bool {
        if self.weights.iter().any(|member| weight.dominated_by(member)) {
            return false
        }
        self.weights.retain(|member| !member.dominated_by(&weight));
        self.weights.push(weight);
        true
    }

    /// Returns `true` if some member dominates or equals `weight`.
    pub fn dominates(&self, weight: &Weight) -> bool {
        self.weights.iter().any(|member| weight.dominated_by(member))
    }

    /// Returns `true` if every member is dominated by (or equal to) `bound`. Trivially `true` for
    /// an empty front.
    pub fn within(&self, bound: &Weight) -> bool {
        self.weights.iter().all(|member| member.dominated_by(bound))
    }

    /// Sums up a sequence of fronts with `+=`.
    pub fn sum<'f>(fronts: impl IntoIterator<Item=&'f WeightFront>) -> WeightFront {
        let mut total = WeightFront::new();
        for front in fronts {
            total += front;
        }
        total
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item=&Weight> + '_ {
        self.weights.iter()
    }
}

/// Pareto sum: every pairwise sum of members, filtered for dominance. An empty front is neutral.
impl AddAssign<&WeightFront> for WeightFront {
    fn add_assign(&mut self, other: &WeightFront) {
        if other.is_empty() {
            return
        }
        if self.is_empty() {
            *self = other.clone();
            return
        }
        let old = std::mem::take(&mut self.weights);
        for a in &old {
            for b in &other.weights {
                self.try_insert(a + b);
            }
        }
    }
}
