//! # Permutations
//!
//! This module provides the canonical [`Permutation`] value type: a bijection of
//! `1..=n` stored as its one-line notation, `data[k - 1]` being the image of `k`.
//!
//! ## Key Features:
//!
//! - **Construction**:
//!   - From one-line notation: `Permutation::new(vec![...])` (validated).
//!   - Identity: `Permutation::identity(n)`.
//!   - From disjoint cycles: `Permutation::from_cycles(&[vec![...]])`.
//!   - From a 0/1 matrix: `Permutation::from_matrix(&m)`.
//!   - By lexicographic rank: `Permutation::nth(n, k)`.
//!   - Randomly: `Permutation::random(n)`, `Permutation::ewens(n, theta)`.
//!   - Single transpositions: `Permutation::transposition(n, a, b)`.
//! - **Group Operations**:
//!   - Composition: `p.compose(&q)` (applies `q` first, then `p`).
//!   - Inverse: `p.inverse()`, power: `p.pow(m)`, square root: `p.sqrt()`.
//!   - Sign, order and cycle type.
//! - **Views**: cycles, two-row notation, matrix, `BTreeMap` and slice iterators.
//! - **Combinatorics**: rank, inversion count, longest monotone subsequences,
//!   reversal and extension to a larger degree.
//!
//! Values of this type never change after construction, except through
//! [`Permutation::apply_transposition_mut`], which rewrites two entries in place
//! and therefore needs exclusive access like any `&mut` method.

use std::{fmt, ops::Index};

use bitvec::vec::BitVec;
use itertools::Itertools;

use crate::error::PermutationError;

mod cycles;
mod iter;
mod matrix;
mod monotone;
pub(crate) mod rank;


pub use iter::{PermutationMapIter, PermutationMapIterMut};

/// A permutation of `1..=n` in one-line notation.
///
/// # Examples
///
/// ```
/// use symperm::Permutation;
///
/// let p = Permutation::new(vec![4, 1, 3, 2, 6, 5]).unwrap();
/// assert_eq!(p[2], 1);
/// assert_eq!(p.to_string(), "(1,4,2)(3)(5,6)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Permutation {
    data: Vec<usize>,
}

impl Permutation {
    // --------------------------------------------------------------------------------------------
    // Basic Constructors and Accessors
    // --------------------------------------------------------------------------------------------

    /// Creates a permutation from its one-line notation.
    ///
    /// Fails with [`PermutationError::InvalidPermutation`] unless `data` contains
    /// every value of `1..=data.len()` exactly once.
    ///
    /// # Examples
    ///
    /// ```
    /// # use symperm::Permutation;
    /// assert!(Permutation::new(vec![2, 3, 1]).is_ok());
    /// assert!(Permutation::new(vec![2, 2, 1]).is_err());
    /// assert!(Permutation::new(vec![0, 1]).is_err());
    /// ```
    pub fn new(data: Vec<usize>) -> Result<Self, PermutationError> {
        Self::validate(&data)?;
        Ok(Permutation { data })
    }

    /// Checks the bijection invariant on a candidate one-line notation.
    pub(crate) fn validate(data: &[usize]) -> Result<(), PermutationError> {
        let n = data.len();
        let mut seen: BitVec = BitVec::repeat(false, n);
        for (pos, &value) in data.iter().enumerate() {
            if value == 0 || value > n {
                return Err(PermutationError::invalid(format!(
                    "value {value} at position {} is outside 1..={n}",
                    pos + 1
                )));
            }
            if seen.replace(value - 1, true) {
                return Err(PermutationError::invalid(format!(
                    "value {value} appears more than once"
                )));
            }
        }
        Ok(())
    }

    /// Wraps data the caller has already proven to be a bijection.
    pub(crate) fn from_data_unchecked(data: Vec<usize>) -> Self {
        debug_assert!(Self::validate(&data).is_ok(), "not a permutation: {data:?}");
        Permutation { data }
    }

    /// Creates the identity permutation of degree `n`.
    ///
    /// ```
    /// # use symperm::Permutation;
    /// assert_eq!(Permutation::identity(3).data(), &[1, 2, 3]);
    /// ```
    pub fn identity(n: usize) -> Self {
        Permutation {
            data: (1..=n).collect(),
        }
    }

    /// The transposition of degree `n` swapping `a` and `b`.
    ///
    /// Requires `1 <= a, b <= n` (else [`PermutationError::Index`]) and `a != b`
    /// (else [`PermutationError::Argument`]).
    ///
    /// ```
    /// # use symperm::Permutation;
    /// let t = Permutation::transposition(6, 3, 5).unwrap();
    /// assert_eq!(t.compose(&t).unwrap(), Permutation::identity(6));
    /// ```
    pub fn transposition(n: usize, a: usize, b: usize) -> Result<Self, PermutationError> {
        let mut p = Self::identity(n);
        p.apply_transposition_mut(a, b)?;
        Ok(p)
    }

    /// The degree `n` of the permutation.
    pub fn degree(&self) -> usize {
        self.data.len()
    }

    /// The one-line notation: `data()[k - 1]` is the image of `k`.
    pub fn data(&self) -> &[usize] {
        &self.data
    }

    pub fn into_data(self) -> Vec<usize> {
        self.data
    }

    /// The image of `k`, or [`PermutationError::Index`] if `k` is not in `1..=n`.
    ///
    /// ```
    /// # use symperm::Permutation;
    /// let p = Permutation::new(vec![4, 1, 3, 2, 6, 5]).unwrap();
    /// assert_eq!(p.apply(2), Ok(1));
    /// assert!(p.apply(7).is_err());
    /// ```
    pub fn apply(&self, k: usize) -> Result<usize, PermutationError> {
        PermutationError::check_index(k, self.degree())?;
        Ok(self.data[k - 1])
    }

    // --------------------------------------------------------------------------------------------
    // Basic Operations
    // --------------------------------------------------------------------------------------------

    /// Composes `self` with `other`: `(self ∘ other)(k) = self(other(k))`.
    ///
    /// `other` is applied first. Both must have the same degree.
    ///
    /// ```
    /// # use symperm::Permutation;
    /// let p = Permutation::new(vec![2, 1, 3]).unwrap(); // (1,2)
    /// let q = Permutation::new(vec![1, 3, 2]).unwrap(); // (2,3)
    /// assert_eq!(p.compose(&q).unwrap().data(), &[2, 3, 1]);
    /// ```
    pub fn compose(&self, other: &Self) -> Result<Self, PermutationError> {
        PermutationError::check_degree(self.degree(), other.degree())?;
        let data = other.data.iter().map(|&k| self.data[k - 1]).collect();
        Ok(Permutation { data })
    }

    /// Composes a sequence right to left, `p1 ∘ p2 ∘ ... ∘ pm`.
    ///
    /// A single operand is returned unchanged; an empty sequence is an
    /// [`PermutationError::Argument`] since its degree is unknown.
    pub fn compose_all<'a, I>(perms: I) -> Result<Self, PermutationError>
    where
        I: IntoIterator<Item = &'a Permutation>,
    {
        let mut perms = perms.into_iter();
        let first = perms
            .next()
            .ok_or_else(|| PermutationError::Argument("empty product".to_string()))?;
        perms.try_fold(first.clone(), |acc, p| acc.compose(p))
    }

    /// Returns the inverse: `q` with `q(p(k)) = k` for all `k`.
    ///
    /// ```
    /// # use symperm::Permutation;
    /// let p = Permutation::new(vec![3, 1, 2]).unwrap();
    /// assert_eq!(p.inverse().data(), &[2, 3, 1]);
    /// ```
    pub fn inverse(&self) -> Self {
        let mut data = vec![0; self.degree()];
        for (i, &j) in self.data.iter().enumerate() {
            data[j - 1] = i + 1;
        }
        Permutation { data }
    }

    /// Computes the `m`-th power by square-and-multiply.
    ///
    /// `m == 0` gives the identity, negative `m` powers the inverse.
    ///
    /// ```
    /// # use symperm::Permutation;
    /// let p = Permutation::new(vec![2, 3, 1]).unwrap();
    /// assert_eq!(p.pow(2).data(), &[3, 1, 2]);
    /// assert_eq!(p.pow(3), Permutation::identity(3));
    /// assert_eq!(p.pow(-1), p.inverse());
    /// ```
    pub fn pow(&self, m: i64) -> Self {
        if m < 0 {
            self.inverse().pow_unsigned(m.unsigned_abs())
        } else {
            self.pow_unsigned(m.unsigned_abs())
        }
    }

    fn pow_unsigned(&self, m: u64) -> Self {
        match m {
            0 => Self::identity(self.degree()),
            1 => self.clone(),
            _ => {
                let half = self.pow_unsigned(m / 2);
                let square = half.compose_same(&half);
                if m % 2 == 0 {
                    square
                } else {
                    self.compose_same(&square)
                }
            }
        }
    }

    /// `compose` for operands known to share a degree.
    fn compose_same(&self, other: &Self) -> Self {
        debug_assert_eq!(self.degree(), other.degree());
        Permutation {
            data: other.data.iter().map(|&k| self.data[k - 1]).collect(),
        }
    }

    /// Reverses the one-line notation. This is not the group inverse.
    ///
    /// ```
    /// # use symperm::Permutation;
    /// let p = Permutation::new(vec![2, 3, 1]).unwrap();
    /// assert_eq!(p.reverse().data(), &[1, 3, 2]);
    /// ```
    pub fn reverse(&self) -> Self {
        Permutation {
            data: self.data.iter().rev().copied().collect(),
        }
    }

    /// Extends to degree `n`, fixing every point above the current degree.
    ///
    /// ```
    /// # use symperm::Permutation;
    /// let p = Permutation::new(vec![2, 1]).unwrap();
    /// assert_eq!(p.extend(4).unwrap().data(), &[2, 1, 3, 4]);
    /// assert!(p.extend(1).is_err());
    /// ```
    pub fn extend(&self, n: usize) -> Result<Self, PermutationError> {
        if n < self.degree() {
            return Err(PermutationError::Argument(format!(
                "cannot extend a permutation of degree {} to degree {n}",
                self.degree()
            )));
        }
        let mut data = self.data.clone();
        data.extend(self.degree() + 1..=n);
        Ok(Permutation { data })
    }

    /// Returns a copy with entries `i` and `j` swapped, that is `self ∘ (i,j)`.
    pub fn apply_transposition(&self, i: usize, j: usize) -> Result<Self, PermutationError> {
        let mut p = self.clone();
        p.apply_transposition_mut(i, j)?;
        Ok(p)
    }

    /// Swaps entries `i` and `j` in place.
    ///
    /// This is the only mutating operation on a `Permutation`; sharing the value
    /// across threads while calling it needs external synchronisation.
    ///
    /// ```
    /// # use symperm::Permutation;
    /// let mut p = Permutation::identity(3);
    /// p.apply_transposition_mut(1, 3).unwrap();
    /// assert_eq!(p.data(), &[3, 2, 1]);
    /// assert!(p.apply_transposition_mut(2, 2).is_err());
    /// ```
    pub fn apply_transposition_mut(&mut self, i: usize, j: usize) -> Result<(), PermutationError> {
        let n = self.degree();
        PermutationError::check_index(i, n)?;
        PermutationError::check_index(j, n)?;
        if i == j {
            return Err(PermutationError::Argument(format!(
                "a transposition needs two distinct points, got {i} twice"
            )));
        }
        self.data.swap(i - 1, j - 1);
        Ok(())
    }

    /// Indexes `slice` by the permutation: `result[k - 1] = slice[p(k) - 1]`.
    ///
    /// ```
    /// # use symperm::Permutation;
    /// let p = Permutation::new(vec![3, 1, 2]).unwrap();
    /// assert_eq!(p.apply_slice(&["a", "b", "c"]).unwrap(), vec!["c", "a", "b"]);
    /// ```
    pub fn apply_slice<T: Clone>(&self, slice: &[T]) -> Result<Vec<T>, PermutationError> {
        Ok(self.iter_slice(slice)?.cloned().collect())
    }

    // --------------------------------------------------------------------------------------------
    // Predicates and Counts
    // --------------------------------------------------------------------------------------------

    pub fn is_identity(&self) -> bool {
        self.data.iter().enumerate().all(|(i, &m)| i + 1 == m)
    }

    /// The points `k` with `p(k) == k`, ascending.
    pub fn fixed_points(&self) -> Vec<usize> {
        self.data
            .iter()
            .enumerate()
            .filter(|&(i, &m)| i + 1 == m)
            .map(|(i, _)| i + 1)
            .collect()
    }

    /// `true` if no point is fixed. The empty permutation is a derangement.
    pub fn is_derangement(&self) -> bool {
        self.data.iter().enumerate().all(|(i, &m)| i + 1 != m)
    }

    /// Number of pairs `i < j` with `p(i) > p(j)`.
    ///
    /// This is the length of any reduced word in adjacent transpositions.
    pub fn inversions(&self) -> usize {
        // Fenwick tree over values seen so far.
        let n = self.degree();
        let mut tree = vec![0usize; n + 1];
        let mut count = 0;
        for (seen, &value) in self.data.iter().enumerate() {
            let mut not_above = 0;
            let mut i = value;
            while i > 0 {
                not_above += tree[i];
                i &= i - 1;
            }
            count += seen - not_above;

            let mut i = value;
            while i <= n {
                tree[i] += 1;
                i += i & i.wrapping_neg();
            }
        }
        count
    }
}

impl fmt::Display for Permutation {
    /// Disjoint-cycle notation including fixed points, e.g. `(1,4,2)(3)(5,6)`.
    /// The empty permutation renders as `()`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.data.is_empty() {
            return write!(f, "()");
        }
        for cycle in self.cycles() {
            write!(f, "({})", cycle.iter().join(","))?;
        }
        Ok(())
    }
}

impl Index<usize> for Permutation {
    type Output = usize;

    /// The image of `k`.
    ///
    /// # Panics
    ///
    /// Panics if `k` is not in `1..=n`; use [`Permutation::apply`] to get an error instead.
    fn index(&self, k: usize) -> &Self::Output {
        assert!(
            (1..=self.degree()).contains(&k),
            "index {k} out of range 1..={}",
            self.degree()
        );
        &self.data[k - 1]
    }
}

impl TryFrom<Vec<usize>> for Permutation {
    type Error = PermutationError;

    fn try_from(data: Vec<usize>) -> Result<Self, Self::Error> {
        Permutation::new(data)
    }
}

impl From<Permutation> for Vec<usize> {
    fn from(p: Permutation) -> Self {
        p.data
    }
}
