//! Lexicographic enumeration of permutations, optionally restricted position by position.

use std::iter::FusedIterator;

use bitvec::vec::BitVec;
use log::debug;

use crate::{error::PermutationError, permutation::Permutation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Fresh,
    Running,
    Done,
}

/// Iterator over permutations in lexicographic order of their one-line notation.
///
/// Every position `k` carries the sorted set of values it may take; the
/// unrestricted generator allows everything everywhere. Cloning a generator
/// clones its position, so restarting is cloning a fresh one.
///
/// ```
/// # use symperm::PermGen;
/// let all: Vec<String> = PermGen::new(3).map(|p| format!("{:?}", p.data())).collect();
/// assert_eq!(all[0], "[1, 2, 3]");
/// assert_eq!(all[5], "[3, 2, 1]");
/// assert_eq!(PermGen::derangements(4).count(), 9);
/// ```
#[derive(Debug, Clone)]
pub struct PermGen {
    allowed: Vec<Vec<usize>>,
    /// Index into `allowed[pos]` of the value placed at each filled position.
    cursor: Vec<usize>,
    used: BitVec,
    state: State,
}

impl PermGen {
    /// All permutations of degree `n`.
    pub fn new(n: usize) -> Self {
        Self::from_allowed((0..n).map(|_| (1..=n).collect()).collect())
    }

    /// All permutations of degree `n` without fixed points.
    pub fn derangements(n: usize) -> Self {
        Self::from_allowed(
            (1..=n)
                .map(|k| (1..=n).filter(|&v| v != k).collect())
                .collect(),
        )
    }

    /// Permutations `p` of degree `allowed.len()` with `p(k)` in `allowed[k - 1]`.
    ///
    /// Fails with [`PermutationError::Argument`] when a set names a value
    /// outside `1..=n`. Duplicates in a set are ignored.
    ///
    /// ```
    /// # use symperm::PermGen;
    /// let gen = PermGen::constrained(vec![vec![2, 3], vec![1], vec![3, 2]]).unwrap();
    /// let found: Vec<Vec<usize>> = gen.map(|p| p.into_data()).collect();
    /// assert_eq!(found, vec![vec![2, 1, 3], vec![3, 1, 2]]);
    /// ```
    pub fn constrained(mut allowed: Vec<Vec<usize>>) -> Result<Self, PermutationError> {
        let n = allowed.len();
        for (pos, values) in allowed.iter_mut().enumerate() {
            if let Some(&bad) = values.iter().find(|&&v| v == 0 || v > n) {
                debug!("rejecting constraint: value {bad} at position {}", pos + 1);
                return Err(PermutationError::Argument(format!(
                    "position {} allows {bad}, outside 1..={n}",
                    pos + 1
                )));
            }
            values.sort_unstable();
            values.dedup();
        }
        Ok(Self::from_allowed(allowed))
    }

    fn from_allowed(allowed: Vec<Vec<usize>>) -> Self {
        let n = allowed.len();
        PermGen {
            cursor: Vec::with_capacity(n),
            used: BitVec::repeat(false, n),
            allowed,
            state: State::Fresh,
        }
    }

    pub fn degree(&self) -> usize {
        self.allowed.len()
    }

    /// Undoes the deepest placement, returning where the search resumes.
    fn retreat(&mut self) -> Option<(usize, usize)> {
        let idx = self.cursor.pop()?;
        let pos = self.cursor.len();
        self.used.set(self.allowed[pos][idx] - 1, false);
        Some((pos, idx + 1))
    }

    /// Depth-first search for the next complete placement, trying values of
    /// position `pos` from index `start` on.
    fn search(&mut self, mut pos: usize, mut start: usize) -> bool {
        let n = self.degree();
        loop {
            if pos == n {
                return true;
            }
            let found = self.allowed[pos][start..]
                .iter()
                .position(|&v| !self.used[v - 1])
                .map(|offset| start + offset);
            match found {
                Some(idx) => {
                    self.used.set(self.allowed[pos][idx] - 1, true);
                    self.cursor.push(idx);
                    pos += 1;
                    start = 0;
                }
                None => match self.retreat() {
                    Some((back, next)) => {
                        pos = back;
                        start = next;
                    }
                    None => return false,
                },
            }
        }
    }

    fn current(&self) -> Permutation {
        Permutation::from_data_unchecked(
            self.cursor
                .iter()
                .enumerate()
                .map(|(pos, &idx)| self.allowed[pos][idx])
                .collect(),
        )
    }
}

impl Iterator for PermGen {
    type Item = Permutation;

    fn next(&mut self) -> Option<Self::Item> {
        let found = match self.state {
            State::Done => return None,
            State::Fresh => self.search(0, 0),
            State::Running => match self.retreat() {
                Some((pos, start)) => self.search(pos, start),
                None => false,
            },
        };
        if found {
            self.state = State::Running;
            Some(self.current())
        } else {
            self.state = State::Done;
            None
        }
    }
}

impl FusedIterator for PermGen {}

impl Permutation {
    /// Every permutation of degree `n`, in lexicographic order.
    pub fn all(n: usize) -> PermGen {
        PermGen::new(n)
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;
    use crate::permutation::rank::factorial;

    #[test]
    fn counts() {
        for n in 0..=7 {
            assert_eq!(PermGen::new(n).count() as u128, factorial(n).unwrap());
        }
        let derangements: Vec<usize> = (0..=7).map(|n| PermGen::derangements(n).count()).collect();
        assert_eq!(derangements, vec![1, 0, 1, 2, 9, 44, 265, 1854]);
    }

    #[test]
    fn lexicographic_and_matches_nth() {
        for n in 0..=6 {
            let all: Vec<Permutation> = Permutation::all(n).collect();
            assert!(all.windows(2).all(|w| w[0] < w[1]));
            for (k, p) in all.iter().enumerate() {
                assert_eq!(*p, Permutation::nth(n, k as u128 + 1).unwrap());
            }
        }
    }

    #[test]
    fn matches_itertools() {
        let expected: Vec<Vec<usize>> = (1..=5).permutations(5).collect();
        let found: Vec<Vec<usize>> = PermGen::new(5).map(Permutation::into_data).collect();
        similar_asserts::assert_eq!(found, expected);
    }

    #[test]
    fn derangements_have_no_fixed_points() {
        assert!(PermGen::derangements(6).all(|p| p.is_derangement()));
    }

    #[test]
    fn restart_by_cloning() {
        let fresh = PermGen::new(4);
        let mut gen = fresh.clone();
        let first: Vec<Permutation> = gen.by_ref().take(5).collect();
        let again: Vec<Permutation> = fresh.clone().take(5).collect();
        assert_eq!(first, again);

        // a clone taken midway continues from the same point
        let rest: Vec<Permutation> = gen.clone().collect();
        assert_eq!(rest.len(), 24 - 5);
        assert_eq!(gen.collect::<Vec<_>>(), rest);
    }

    #[test]
    fn fused_after_exhaustion() {
        let mut gen = PermGen::new(2);
        assert_eq!(gen.by_ref().count(), 2);
        assert!(gen.next().is_none());
        assert!(gen.next().is_none());
    }

    #[test]
    fn constrained_sets() {
        let none = PermGen::constrained(vec![vec![1], vec![1]]).unwrap();
        assert_eq!(none.count(), 0);

        let with_duplicates = PermGen::constrained(vec![vec![2, 1, 2], vec![1, 2]]).unwrap();
        let found: Vec<Vec<usize>> = with_duplicates.map(Permutation::into_data).collect();
        assert_eq!(found, vec![vec![1, 2], vec![2, 1]]);

        assert!(matches!(
            PermGen::constrained(vec![vec![0], vec![1]]),
            Err(PermutationError::Argument(_))
        ));
        assert!(PermGen::constrained(vec![vec![3], vec![1]]).is_err());

        // an empty set anywhere leaves nothing to enumerate
        assert_eq!(PermGen::constrained(vec![vec![1, 2], vec![]]).unwrap().count(), 0);
    }

    #[test]
    fn constrained_matches_filtering() {
        let allowed = vec![vec![1, 3, 4], vec![2, 4], vec![1, 2, 3, 4], vec![1, 3]];
        let expected: Vec<Permutation> = PermGen::new(4)
            .filter(|p| {
                p.data()
                    .iter()
                    .zip(&allowed)
                    .all(|(v, set)| set.contains(v))
            })
            .collect();
        let found: Vec<Permutation> = PermGen::constrained(allowed).unwrap().collect();
        assert_eq!(found, expected);
    }
}
