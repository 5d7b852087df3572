//! # Compiled permutations
//!
//! A [`CompiledPermutation`] re-encodes a permutation for repeated in-place
//! application to data vectors. The cycle structure is packed in one buffer:
//!
//! ```text
//! [ c1 c2 c3 0  d1 d2 d3 d4 0 ... | a1 b1  a2 b2 ... ]
//!   cycles of length >= 3,          swaps (2-cycles)
//!   each terminated by 0
//! ```
//!
//! Fixed points are not stored. Every cycle starts at its smallest element and
//! lists the elements in the order the permutation visits them, and every swap
//! stores its smaller element first, so a permutation has exactly one encoding.
//!
//! Applying the encoding to a vector `v` of the same length leaves `v[k]`
//! holding the old `v[p(k)]`, exactly like [`Permutation::apply_slice`], but
//! without allocating.

use std::fmt;

use itertools::Itertools;

use crate::{error::PermutationError, permutation::Permutation};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompiledPermutation {
    degree: usize,
    buffer: Vec<usize>,
    /// Start of the swap region in `buffer`.
    swaps_start: usize,
}

impl CompiledPermutation {
    // --------------------------------------------------------------------------------------------
    // Encoding
    // --------------------------------------------------------------------------------------------

    /// Encodes a one-line notation, leaving `data` untouched.
    ///
    /// Fails with [`PermutationError::InvalidPermutation`] if `data` is not a
    /// permutation of `1..=data.len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use symperm::CompiledPermutation;
    /// let data = vec![3, 1, 2];
    /// let compiled = CompiledPermutation::encode_copy(&data).unwrap();
    /// assert_eq!(compiled.buffer(), &[1, 3, 2, 0]);
    ///
    /// let mut v = vec!['a', 'b', 'c'];
    /// compiled.apply(&mut v).unwrap();
    /// assert_eq!(v, vec!['c', 'a', 'b']);
    /// ```
    pub fn encode_copy(data: &[usize]) -> Result<Self, PermutationError> {
        Self::encode_consuming(data.to_vec())
    }

    /// Encodes a one-line notation, using `data` itself as the scratch space.
    ///
    /// The vector is zeroed while its cycles are traced and then dropped.
    pub fn encode_consuming(mut data: Vec<usize>) -> Result<Self, PermutationError> {
        let n = data.len();
        if n <= 2 {
            return Self::encode_small(&data);
        }

        let mut cycles = Vec::with_capacity(n + n / 3);
        let mut swaps = Vec::new();
        let mut absorbed = 0;

        for start in 1..=n {
            // 0 marks a position already traced, or an invalid entry that the
            // final count will catch.
            if data[start - 1] == 0 {
                continue;
            }
            let chain_start = cycles.len();
            let mut k = start;
            loop {
                let next = data[k - 1];
                if next == 0 {
                    return Err(PermutationError::invalid(format!(
                        "the chain from {start} breaks off after {k}"
                    )));
                }
                if next > n {
                    return Err(PermutationError::invalid(format!(
                        "value {next} at position {k} is outside 1..={n}"
                    )));
                }
                data[k - 1] = 0;
                absorbed += 1;
                cycles.push(k);
                if next == start {
                    break;
                }
                k = next;
            }

            match cycles.len() - chain_start {
                1 => cycles.truncate(chain_start),
                2 => swaps.extend(cycles.drain(chain_start..)),
                _ => cycles.push(0),
            }
        }

        if absorbed != n {
            return Err(PermutationError::invalid(format!(
                "{} positions lie on no cycle",
                n - absorbed
            )));
        }

        let swaps_start = cycles.len();
        cycles.extend(swaps);
        log::trace!(
            "compiled permutation of degree {n}: {swaps_start} cycle entries, {} swaps",
            (cycles.len() - swaps_start) / 2
        );
        Ok(CompiledPermutation {
            degree: n,
            buffer: cycles,
            swaps_start,
        })
    }

    /// Degrees 0, 1 and 2 have only the identity and one swap.
    fn encode_small(data: &[usize]) -> Result<Self, PermutationError> {
        let buffer = match data {
            [] | [1] | [1, 2] => Vec::new(),
            [2, 1] => vec![1, 2],
            _ => {
                return Err(PermutationError::invalid(format!(
                    "{data:?} is not a permutation"
                )))
            }
        };
        Ok(CompiledPermutation {
            degree: data.len(),
            buffer,
            swaps_start: 0,
        })
    }

    /// Encodes a validated permutation; this cannot fail.
    pub fn from_permutation(p: &Permutation) -> Self {
        match Self::encode_copy(p.data()) {
            Ok(compiled) => compiled,
            Err(e) => unreachable!("a validated permutation failed to compile: {e}"),
        }
    }

    // --------------------------------------------------------------------------------------------
    // Accessors
    // --------------------------------------------------------------------------------------------

    pub fn degree(&self) -> usize {
        self.degree
    }

    /// The packed buffer: cycles (0-terminated) followed by swap pairs.
    pub fn buffer(&self) -> &[usize] {
        &self.buffer
    }

    /// The 2-cycles, smaller element first.
    pub fn swaps(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.swap_region().iter().copied().tuples()
    }

    /// The cycles of length at least 3, without their terminators.
    pub fn cycles(&self) -> impl Iterator<Item = &[usize]> + '_ {
        self.cycle_region()
            .split(|&k| k == 0)
            .filter(|cycle| !cycle.is_empty())
    }

    fn cycle_region(&self) -> &[usize] {
        debug_assert!(self.swaps_start <= self.buffer.len());
        debug_assert!(self.swaps_start == 0 || self.buffer[self.swaps_start - 1] == 0);
        &self.buffer[..self.swaps_start]
    }

    fn swap_region(&self) -> &[usize] {
        debug_assert_eq!((self.buffer.len() - self.swaps_start) % 2, 0);
        &self.buffer[self.swaps_start..]
    }

    /// The image of `k`, found by scanning the buffer.
    ///
    /// ```
    /// # use symperm::CompiledPermutation;
    /// let compiled = CompiledPermutation::encode_copy(&[4, 1, 3, 2, 6, 5]).unwrap();
    /// assert_eq!(compiled.image(2), Ok(1));
    /// assert_eq!(compiled.image(3), Ok(3));
    /// assert_eq!(compiled.image(5), Ok(6));
    /// ```
    pub fn image(&self, k: usize) -> Result<usize, PermutationError> {
        PermutationError::check_index(k, self.degree)?;
        for (a, b) in self.swaps() {
            if a == k {
                return Ok(b);
            }
            if b == k {
                return Ok(a);
            }
        }
        for cycle in self.cycles() {
            if let Some(i) = cycle.iter().position(|&x| x == k) {
                return Ok(cycle[(i + 1) % cycle.len()]);
            }
        }
        Ok(k)
    }

    // --------------------------------------------------------------------------------------------
    // Application
    // --------------------------------------------------------------------------------------------

    /// Permutes `v` in place so that afterwards `v[k - 1]` holds the old
    /// `v[p(k) - 1]`.
    ///
    /// Swaps are applied first, from the back of the buffer, then every cycle
    /// `a, b, c, ...` is rotated in one pass so `v[a], v[b], ...` take the old
    /// values of `v[b], v[c], ..., v[a]`. Fails with
    /// [`PermutationError::DegreeMismatch`] if `v.len()` is not the degree.
    pub fn apply<T>(&self, v: &mut [T]) -> Result<(), PermutationError> {
        PermutationError::check_degree(self.degree, v.len())?;
        for pair in self.swap_region().chunks_exact(2).rev() {
            v.swap(pair[0] - 1, pair[1] - 1);
        }
        for cycle in self.cycles() {
            debug_assert!(cycle.len() >= 3);
            for step in cycle.windows(2) {
                v.swap(step[0] - 1, step[1] - 1);
            }
        }
        Ok(())
    }

    /// Permutes `v` by the inverse, undoing [`CompiledPermutation::apply`].
    pub fn apply_inverse<T>(&self, v: &mut [T]) -> Result<(), PermutationError> {
        PermutationError::check_degree(self.degree, v.len())?;
        for pair in self.swap_region().chunks_exact(2) {
            v.swap(pair[0] - 1, pair[1] - 1);
        }
        for cycle in self.cycles() {
            for step in cycle.windows(2).rev() {
                v.swap(step[0] - 1, step[1] - 1);
            }
        }
        Ok(())
    }

    // --------------------------------------------------------------------------------------------
    // Conversions
    // --------------------------------------------------------------------------------------------

    /// The encoding of the inverse permutation, without re-encoding.
    ///
    /// Swaps are their own inverse. Each cycle `c1 c2 ... cm` becomes
    /// `c1 cm ... c2`: reversed, but still starting at its smallest element.
    ///
    /// ```
    /// # use symperm::{CompiledPermutation, Permutation};
    /// let p = Permutation::new(vec![3, 1, 2, 5, 4]).unwrap();
    /// let compiled = CompiledPermutation::from_permutation(&p);
    /// assert_eq!(compiled.inverse().decode(), p.inverse());
    /// ```
    pub fn inverse(&self) -> Self {
        let mut buffer = self.buffer.clone();
        buffer[..self.swaps_start]
            .split_mut(|&k| k == 0)
            .filter(|cycle| cycle.len() > 1)
            .for_each(|cycle| cycle[1..].reverse());
        CompiledPermutation {
            degree: self.degree,
            buffer,
            swaps_start: self.swaps_start,
        }
    }

    /// Recovers the one-line notation.
    pub fn decode(&self) -> Permutation {
        let mut data: Vec<usize> = (1..=self.degree).collect();
        for (a, b) in self.swaps() {
            data[a - 1] = b;
            data[b - 1] = a;
        }
        for cycle in self.cycles() {
            for (&from, &to) in cycle.iter().zip(cycle.iter().cycle().skip(1)) {
                data[from - 1] = to;
            }
        }
        Permutation::from_data_unchecked(data)
    }
}

impl From<&Permutation> for CompiledPermutation {
    fn from(p: &Permutation) -> Self {
        CompiledPermutation::from_permutation(p)
    }
}

impl From<&CompiledPermutation> for Permutation {
    fn from(compiled: &CompiledPermutation) -> Self {
        compiled.decode()
    }
}

impl TryFrom<Vec<usize>> for CompiledPermutation {
    type Error = PermutationError;

    fn try_from(data: Vec<usize>) -> Result<Self, Self::Error> {
        CompiledPermutation::encode_consuming(data)
    }
}

impl fmt::Display for CompiledPermutation {
    /// Non-trivial cycles only, swaps first: `(5,6)(1,4,2)`; `()` if there are none.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.buffer.is_empty() {
            return write!(f, "()");
        }
        for (a, b) in self.swaps() {
            write!(f, "({a},{b})")?;
        }
        for cycle in self.cycles() {
            write!(f, "({})", cycle.iter().join(","))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use proptest::prelude::*;

    use super::*;

    fn all_permutations(n: usize) -> impl Iterator<Item = Vec<usize>> {
        (1..=n).permutations(n)
    }

    #[test]
    fn three_cycle_layout() {
        let compiled = CompiledPermutation::encode_copy(&[3, 1, 2]).unwrap();
        assert_eq!(compiled.buffer(), &[1, 3, 2, 0]);
        assert_eq!(compiled.swaps().count(), 0);
        assert_eq!(compiled.cycles().collect::<Vec<_>>(), vec![&[1, 3, 2][..]]);
    }

    #[test]
    fn mixed_layout() {
        let compiled = CompiledPermutation::encode_copy(&[4, 1, 3, 2, 6, 5, 8, 9, 7]).unwrap();
        assert_eq!(compiled.buffer(), &[1, 4, 2, 0, 7, 8, 9, 0, 5, 6]);
        assert_eq!(compiled.swaps().collect::<Vec<_>>(), vec![(5, 6)]);
        insta::assert_snapshot!(compiled.to_string(), @"(5,6)(1,4,2)(7,8,9)");
    }

    #[test]
    fn small_degrees() {
        assert!(CompiledPermutation::encode_copy(&[]).unwrap().buffer().is_empty());
        assert!(CompiledPermutation::encode_copy(&[1]).unwrap().buffer().is_empty());
        assert!(CompiledPermutation::encode_copy(&[1, 2]).unwrap().buffer().is_empty());
        assert_eq!(CompiledPermutation::encode_copy(&[2, 1]).unwrap().buffer(), &[1, 2]);
        assert!(CompiledPermutation::encode_copy(&[2]).is_err());
        assert!(CompiledPermutation::encode_copy(&[1, 1]).is_err());
        assert!(CompiledPermutation::encode_copy(&[0, 2]).is_err());
        assert_eq!(CompiledPermutation::encode_copy(&[]).unwrap().to_string(), "()");
    }

    #[test]
    fn rejects_broken_chains() {
        // out of range
        assert!(CompiledPermutation::encode_copy(&[4, 1, 2]).is_err());
        // two positions map to 2
        assert!(CompiledPermutation::encode_copy(&[2, 2, 1]).is_err());
        // a zero that no chain ever reaches
        assert!(CompiledPermutation::encode_copy(&[0, 2, 3]).is_err());
        // a chain running into a zero
        assert!(CompiledPermutation::encode_copy(&[3, 1, 0]).is_err());
    }

    #[test]
    fn source_is_untouched() {
        let p = Permutation::new(vec![2, 3, 1, 5, 4]).unwrap();
        let before = p.clone();
        let _ = CompiledPermutation::from_permutation(&p);
        assert_eq!(p, before);
    }

    #[test]
    fn exhaustive_round_trip() {
        for n in 0..=6 {
            for data in all_permutations(n) {
                let p = Permutation::new(data.clone()).unwrap();
                let compiled = CompiledPermutation::encode_copy(&data).unwrap();
                assert_eq!(compiled.decode(), p);

                let mut v: Vec<usize> = (101..101 + n).collect();
                let expected = p.apply_slice(&v).unwrap();
                compiled.apply(&mut v).unwrap();
                similar_asserts::assert_eq!(v, expected);

                compiled.apply_inverse(&mut v).unwrap();
                assert_eq!(v, (101..101 + n).collect::<Vec<_>>());

                assert_eq!(compiled.inverse(), CompiledPermutation::from_permutation(&p.inverse()));
                for k in 1..=n {
                    assert_eq!(compiled.image(k), Ok(p[k]));
                }
            }
        }
    }

    #[test]
    fn exhaustive_invalid_arrays() {
        // every array of length 1..=4 over 0..=n+1 compiles iff it is a permutation
        for n in 1..=4usize {
            for data in (0..n).map(|_| 0..=n + 1).multi_cartesian_product() {
                let compiled = CompiledPermutation::encode_copy(&data);
                let valid = Permutation::new(data.clone()).is_ok();
                assert_eq!(compiled.is_ok(), valid, "{data:?}");
            }
        }
    }

    #[test]
    fn degree_mismatch() {
        let compiled = CompiledPermutation::encode_copy(&[2, 3, 1]).unwrap();
        let mut v = vec![1, 2];
        assert_eq!(
            compiled.apply(&mut v),
            Err(PermutationError::DegreeMismatch { left: 3, right: 2 })
        );
        assert!(compiled.image(4).is_err());
    }

    fn permutation(max_degree: usize) -> impl Strategy<Value = Permutation> {
        (0..=max_degree)
            .prop_flat_map(|n| Just((1..=n).collect::<Vec<_>>()).prop_shuffle())
            .prop_map(|data| Permutation::new(data).unwrap())
    }

    proptest! {
        #[test]
        fn apply_matches_indexing(p in permutation(200)) {
            let compiled = CompiledPermutation::from_permutation(&p);
            let mut v: Vec<String> = (0..p.degree()).map(|i| format!("item{i}")).collect();
            let expected = p.apply_slice(&v).unwrap();
            compiled.apply(&mut v).unwrap();
            prop_assert_eq!(v, expected);
            prop_assert_eq!(compiled.decode(), p);
        }

        #[test]
        fn consuming_matches_copy(p in permutation(50)) {
            let copied = CompiledPermutation::encode_copy(p.data()).unwrap();
            let consumed = CompiledPermutation::encode_consuming(p.clone().into_data()).unwrap();
            prop_assert_eq!(copied, consumed);
        }
    }
}
