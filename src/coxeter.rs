//! # Coxeter decompositions
//!
//! Every permutation of degree `n` is a product of the adjacent transpositions
//! `s_k = (k, k+1)`, `1 <= k < n`. A [`CoxeterDecomposition`] stores such a word
//! in a normal form produced by [`reduce`]:
//!
//! - adjacent equal generators cancel (`s_k s_k = e`),
//! - adjacent commuting generators (`|j - k| >= 2`) are sorted ascending,
//! - six-term blocks `(s_k s_{k+1})^3` are deleted.
//!
//! Two decompositions compare equal iff their reduced words are equal. Words
//! that only differ by reordering commuting generators always reduce to the
//! same normal form; beyond that the form is whatever this rewriting reaches.
//!
//! The word is read as a right-to-left product, `[t1, t2, ..., tm]` meaning
//! `s_t1 ∘ s_t2 ∘ ... ∘ s_tm`.

use std::fmt;

use itertools::Itertools;

use crate::{error::PermutationError, permutation::Permutation};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CoxeterDecomposition {
    degree: usize,
    terms: Vec<usize>,
}

impl CoxeterDecomposition {
    /// Builds and reduces the word `terms` over the generators of degree `degree`.
    ///
    /// Every term must lie in `1..degree`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use symperm::CoxeterDecomposition;
    /// let a = CoxeterDecomposition::new(5, vec![3, 1]).unwrap();
    /// let b = CoxeterDecomposition::new(5, vec![1, 3]).unwrap();
    /// assert_eq!(a, b);
    /// assert_eq!(a.terms(), &[1, 3]);
    ///
    /// let cancelled = CoxeterDecomposition::new(5, vec![2, 2]).unwrap();
    /// assert!(cancelled.is_empty());
    /// ```
    pub fn new(degree: usize, mut terms: Vec<usize>) -> Result<Self, PermutationError> {
        if let Some(&bad) = terms.iter().find(|&&t| t == 0 || t >= degree) {
            return Err(PermutationError::Argument(format!(
                "generator s_{bad} does not exist in degree {degree}"
            )));
        }
        reduce(&mut terms);
        Ok(CoxeterDecomposition { degree, terms })
    }

    /// The empty word of degree `degree`.
    pub fn identity(degree: usize) -> Self {
        CoxeterDecomposition {
            degree,
            terms: Vec::new(),
        }
    }

    /// Decomposes `p` by bubble sorting its one-line notation.
    ///
    /// Each adjacent swap at `k, k+1` records `k`; the reversed record is a word
    /// for `p` whose length is the inversion count of `p`.
    ///
    /// ```
    /// # use symperm::{CoxeterDecomposition, Permutation};
    /// let p = Permutation::new(vec![2, 3, 1]).unwrap();
    /// let word = CoxeterDecomposition::from_permutation(&p);
    /// assert_eq!(word.terms(), &[1, 2]);
    /// assert_eq!(word.to_permutation(), p);
    /// ```
    pub fn from_permutation(p: &Permutation) -> Self {
        let mut data = p.data().to_vec();
        let mut terms = Vec::with_capacity(p.inversions());
        let mut swapped = true;
        while swapped {
            swapped = false;
            for k in 1..data.len() {
                if data[k - 1] > data[k] {
                    data.swap(k - 1, k);
                    terms.push(k);
                    swapped = true;
                }
            }
        }
        terms.reverse();
        reduce(&mut terms);
        CoxeterDecomposition {
            degree: p.degree(),
            terms,
        }
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn terms(&self) -> &[usize] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Multiplies the generators back together.
    ///
    /// Composing with `s_k` on the right swaps entries `k` and `k + 1`, so the
    /// fold starts at the identity and performs one swap per term.
    pub fn to_permutation(&self) -> Permutation {
        let mut data: Vec<usize> = (1..=self.degree).collect();
        for &k in &self.terms {
            data.swap(k - 1, k);
        }
        Permutation::from_data_unchecked(data)
    }

    /// `self ∘ other`: the concatenated word, reduced.
    pub fn compose(&self, other: &Self) -> Result<Self, PermutationError> {
        PermutationError::check_degree(self.degree, other.degree)?;
        let mut terms = Vec::with_capacity(self.len() + other.len());
        terms.extend_from_slice(&self.terms);
        terms.extend_from_slice(&other.terms);
        reduce(&mut terms);
        Ok(CoxeterDecomposition {
            degree: self.degree,
            terms,
        })
    }

    /// `self ∘ s_k`.
    ///
    /// ```
    /// # use symperm::CoxeterDecomposition;
    /// let word = CoxeterDecomposition::new(4, vec![1, 2]).unwrap();
    /// assert_eq!(word.compose_generator(2).unwrap().terms(), &[1]);
    /// assert!(word.compose_generator(4).is_err());
    /// ```
    pub fn compose_generator(&self, k: usize) -> Result<Self, PermutationError> {
        self.compose(&Self::new(self.degree, vec![k])?)
    }

    /// The inverse word: the terms in reverse order.
    ///
    /// Reversal keeps cancellations and braid blocks absent but undoes the
    /// ascending order of commuting generators, so the result is sorted again.
    ///
    /// ```
    /// # use symperm::CoxeterDecomposition;
    /// let word = CoxeterDecomposition::new(5, vec![1, 2, 4]).unwrap();
    /// assert_eq!(word.inverse().terms(), &[2, 1, 4]);
    /// ```
    pub fn inverse(&self) -> Self {
        let mut terms: Vec<usize> = self.terms.iter().rev().copied().collect();
        reduce(&mut terms);
        CoxeterDecomposition {
            degree: self.degree,
            terms,
        }
    }
}

/// Rewrites `terms` to its normal form, in place.
///
/// Rules are applied left to right and passes repeat until one changes
/// nothing, so the result is a fixed point and `reduce` is idempotent.
///
/// ```
/// # use symperm::coxeter::reduce;
/// let mut terms = vec![4, 1, 2, 1, 2, 1, 2, 5, 5];
/// reduce(&mut terms);
/// assert_eq!(terms, vec![4]);
/// ```
pub fn reduce(terms: &mut Vec<usize>) {
    let original_len = terms.len();
    let mut passes = 0;
    let mut changed = true;
    while changed {
        changed = false;
        passes += 1;
        let mut i = 0;
        while i + 1 < terms.len() {
            let (a, b) = (terms[i], terms[i + 1]);
            if a == b {
                terms.drain(i..i + 2);
                changed = true;
                i = i.saturating_sub(1);
            } else if a > b + 1 {
                terms.swap(i, i + 1);
                changed = true;
                i += 1;
            } else if is_braid_block(&terms[i..]) {
                terms.drain(i..i + 6);
                changed = true;
                i = i.saturating_sub(1);
            } else {
                i += 1;
            }
        }
    }
    log::debug!(
        "reduced coxeter word from {original_len} to {} terms in {passes} passes",
        terms.len()
    );
}

/// `true` if `terms` starts with `x y x y x y` where `|x - y| == 1`.
fn is_braid_block(terms: &[usize]) -> bool {
    let [x, y, rest @ ..] = terms else {
        return false;
    };
    x.abs_diff(*y) == 1
        && rest.len() >= 4
        && rest[..4].iter().zip([x, y, x, y]).all(|(t, s)| t == s)
}

impl From<&Permutation> for CoxeterDecomposition {
    fn from(p: &Permutation) -> Self {
        CoxeterDecomposition::from_permutation(p)
    }
}

impl From<&CoxeterDecomposition> for Permutation {
    fn from(word: &CoxeterDecomposition) -> Self {
        word.to_permutation()
    }
}

impl fmt::Display for CoxeterDecomposition {
    /// `s_1 s_3 s_2`, or `e` for the empty word.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "e");
        }
        write!(f, "{}", self.terms.iter().map(|t| format!("s_{t}")).join(" "))
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    /// Word product without any reduction.
    fn raw_product(degree: usize, terms: &[usize]) -> Permutation {
        terms.iter().fold(Permutation::identity(degree), |acc, &k| {
            acc.compose(&Permutation::transposition(degree, k, k + 1).unwrap())
                .unwrap()
        })
    }

    #[test]
    fn cancellation() {
        let mut terms = vec![1, 2, 2, 1];
        reduce(&mut terms);
        assert!(terms.is_empty());
    }

    #[test]
    fn commuting_generators_are_sorted() {
        let mut terms = vec![5, 3, 1];
        reduce(&mut terms);
        assert_eq!(terms, vec![1, 3, 5]);

        let a = CoxeterDecomposition::new(6, vec![3, 5, 1]).unwrap();
        let b = CoxeterDecomposition::new(6, vec![1, 3, 5]).unwrap();
        let c = CoxeterDecomposition::new(6, vec![5, 1, 3]).unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn non_commuting_generators_keep_their_order() {
        let mut terms = vec![2, 1];
        reduce(&mut terms);
        assert_eq!(terms, vec![2, 1]);
    }

    #[test]
    fn braid_blocks_vanish() {
        for block in [vec![1, 2, 1, 2, 1, 2], vec![3, 2, 3, 2, 3, 2]] {
            let mut terms = block.clone();
            reduce(&mut terms);
            assert!(terms.is_empty(), "{block:?} reduced to {terms:?}");
            assert!(raw_product(5, &block).is_identity());
        }
    }

    #[test]
    fn cascading_rewrites() {
        // 4 moves past the 1 2 1 2 1 2 block, 5 5 cancels, then the block goes
        let mut terms = vec![4, 1, 2, 1, 2, 1, 2, 5, 5];
        reduce(&mut terms);
        assert_eq!(terms, vec![4]);

        // 3 does not commute with 2, so the block stays split
        let mut terms = vec![3, 1, 2, 1, 2, 1, 2];
        reduce(&mut terms);
        assert_eq!(terms, vec![1, 3, 2, 1, 2, 1, 2]);
    }

    #[test]
    fn rejects_missing_generators() {
        assert!(CoxeterDecomposition::new(3, vec![3]).is_err());
        assert!(CoxeterDecomposition::new(3, vec![0]).is_err());
        assert!(CoxeterDecomposition::new(1, vec![1]).is_err());
    }

    #[test]
    fn empty_word_is_identity_of_its_degree() {
        let word = CoxeterDecomposition::identity(4);
        assert_eq!(word.to_permutation(), Permutation::identity(4));
        assert_eq!(word.to_string(), "e");
        assert_eq!(
            CoxeterDecomposition::from_permutation(&Permutation::identity(0)),
            CoxeterDecomposition::identity(0)
        );
    }

    #[test]
    fn display() {
        let p = Permutation::new(vec![3, 2, 1]).unwrap();
        let word = CoxeterDecomposition::from_permutation(&p);
        insta::assert_snapshot!(word.to_string(), @"s_1 s_2 s_1");
    }

    #[test]
    fn compose_matches_permutations() {
        let p = Permutation::new(vec![3, 1, 4, 2]).unwrap();
        let q = Permutation::new(vec![2, 4, 1, 3]).unwrap();
        let wp = CoxeterDecomposition::from(&p);
        let wq = CoxeterDecomposition::from(&q);
        assert_eq!(
            wp.compose(&wq).unwrap().to_permutation(),
            p.compose(&q).unwrap()
        );
        assert!(wp.compose(&CoxeterDecomposition::identity(3)).is_err());
    }

    #[test]
    fn reverse_permutation_word_has_maximal_length() {
        let n = 6;
        let p = Permutation::identity(n).reverse();
        let word = CoxeterDecomposition::from_permutation(&p);
        assert_eq!(word.len(), n * (n - 1) / 2);
        assert_eq!(word.to_permutation(), p);
    }

    fn permutation(max_degree: usize) -> impl Strategy<Value = Permutation> {
        (0..=max_degree)
            .prop_flat_map(|n| Just((1..=n).collect::<Vec<_>>()).prop_shuffle())
            .prop_map(|data| Permutation::new(data).unwrap())
    }

    fn word(degree: usize, max_len: usize) -> impl Strategy<Value = Vec<usize>> {
        prop::collection::vec(1..degree, 0..=max_len)
    }

    proptest! {
        #[test]
        fn decompose_then_recompose(p in permutation(9)) {
            let word = CoxeterDecomposition::from_permutation(&p);
            prop_assert_eq!(word.len(), p.inversions());
            prop_assert_eq!(word.to_permutation(), p);
        }

        #[test]
        fn reduce_is_idempotent(mut terms in word(6, 40)) {
            reduce(&mut terms);
            let once = terms.clone();
            reduce(&mut terms);
            prop_assert_eq!(once, terms);
        }

        #[test]
        fn reduce_preserves_the_product(terms in word(6, 40)) {
            let word = CoxeterDecomposition::new(6, terms.clone()).unwrap();
            prop_assert_eq!(word.to_permutation(), raw_product(6, &terms));
        }

        #[test]
        fn commuting_shuffles_reduce_alike(
            p in permutation(8),
            swaps in prop::collection::vec(any::<prop::sample::Index>(), 0..30),
        ) {
            let canonical = CoxeterDecomposition::from_permutation(&p);
            let mut terms = canonical.terms().to_vec();
            if terms.len() >= 2 {
                for swap in swaps {
                    let i = swap.index(terms.len() - 1);
                    if terms[i].abs_diff(terms[i + 1]) >= 2 {
                        terms.swap(i, i + 1);
                    }
                }
            }
            let shuffled = CoxeterDecomposition::new(p.degree(), terms).unwrap();
            prop_assert_eq!(shuffled, canonical);
        }

        #[test]
        fn inverse_word_is_inverse_permutation(p in permutation(8)) {
            let word = CoxeterDecomposition::from_permutation(&p);
            prop_assert_eq!(word.inverse().len(), word.len());
            prop_assert_eq!(word.inverse().to_permutation(), p.inverse());
        }
    }
}
