use std::collections::BTreeMap;

use bitvec::vec::BitVec;

use super::Permutation;
use crate::error::PermutationError;

impl Permutation {
    // --------------------------------------------------------------------------------------------
    // Cycles
    // --------------------------------------------------------------------------------------------

    /// Creates a permutation from disjoint cycles covering `1..=n`.
    ///
    /// Each cycle maps every element to its successor, the last one back to the
    /// first. Fixed points must be listed as singleton cycles: the degree is the
    /// total number of elements.
    ///
    /// # Examples
    ///
    /// ```
    /// # use symperm::Permutation;
    /// let p = Permutation::from_cycles(&[vec![1, 4, 2], vec![3], vec![5, 6]]).unwrap();
    /// assert_eq!(p.data(), &[4, 1, 3, 2, 6, 5]);
    ///
    /// // overlapping cycles are rejected
    /// assert!(Permutation::from_cycles(&[vec![1, 2], vec![2, 3]]).is_err());
    /// ```
    pub fn from_cycles<C: AsRef<[usize]>>(cycles: &[C]) -> Result<Self, PermutationError> {
        let n = cycles.iter().map(|c| c.as_ref().len()).sum::<usize>();
        let mut seen: BitVec = BitVec::repeat(false, n);
        let mut data = vec![0; n];

        for cycle in cycles {
            let cycle = cycle.as_ref();
            if cycle.is_empty() {
                return Err(PermutationError::invalid_cycles("empty cycle"));
            }
            for &x in cycle {
                if x == 0 || x > n {
                    return Err(PermutationError::invalid_cycles(format!(
                        "element {x} is outside 1..={n}"
                    )));
                }
                if seen.replace(x - 1, true) {
                    return Err(PermutationError::invalid_cycles(format!(
                        "element {x} appears in more than one place"
                    )));
                }
            }
            for (&from, &to) in cycle.iter().zip(cycle.iter().cycle().skip(1)) {
                data[from - 1] = to;
            }
        }

        Ok(Permutation::from_data_unchecked(data))
    }

    /// Returns the disjoint cycles, fixed points included.
    ///
    /// Cycles are ordered by their smallest element, and each cycle starts at
    /// its smallest element and follows the permutation from there.
    ///
    /// ```
    /// # use symperm::Permutation;
    /// let p = Permutation::new(vec![4, 1, 3, 2, 6, 5]).unwrap();
    /// assert_eq!(p.cycles(), vec![vec![1, 4, 2], vec![3], vec![5, 6]]);
    /// ```
    pub fn cycles(&self) -> Vec<Vec<usize>> {
        let n = self.degree();
        let mut visited: BitVec = BitVec::repeat(false, n);
        let mut cycles = Vec::new();
        for start in 1..=n {
            if visited[start - 1] {
                continue;
            }
            let mut cycle = Vec::new();
            let mut k = start;
            while !visited.replace(k - 1, true) {
                cycle.push(k);
                k = self.data[k - 1];
            }
            cycles.push(cycle);
        }
        cycles
    }

    /// Cycle lengths in decreasing order; a partition of `n`.
    pub fn cycle_type(&self) -> Vec<usize> {
        let mut lengths: Vec<usize> = self.cycles().iter().map(Vec::len).collect();
        lengths.sort_unstable_by(|a, b| b.cmp(a));
        lengths
    }

    /// Returns `+1` for an even permutation and `-1` for an odd one.
    ///
    /// ```
    /// # use symperm::Permutation;
    /// let p = Permutation::new(vec![2, 3, 4, 1]).unwrap();
    /// assert_eq!(p.sign(), -1);
    /// assert_eq!(p.compose(&p).unwrap().sign(), 1);
    /// ```
    pub fn sign(&self) -> i8 {
        // A cycle of length L is a product of L - 1 transpositions.
        let transpositions: usize = self.cycles().iter().map(|c| c.len() - 1).sum();
        if transpositions % 2 == 0 {
            1
        } else {
            -1
        }
    }

    /// The least `m > 0` with `p^m` the identity: the lcm of the cycle lengths.
    ///
    /// Fails with [`PermutationError::Overflow`] if the order exceeds `u128`.
    ///
    /// ```
    /// # use symperm::Permutation;
    /// let p = Permutation::new(vec![2, 3, 1, 5, 4]).unwrap();
    /// assert_eq!(p.order(), Ok(6));
    /// ```
    pub fn order(&self) -> Result<u128, PermutationError> {
        self.cycles().iter().try_fold(1u128, |acc, cycle| {
            let len = cycle.len() as u128;
            (acc / gcd(acc, len))
                .checked_mul(len)
                .ok_or(PermutationError::Overflow)
        })
    }

    /// Returns some `q` with `q ∘ q == self`, or `None` if there is none.
    ///
    /// An odd cycle has a root on its own elements. Even cycles only have a root
    /// when paired with another cycle of the same length, so a permutation with
    /// an odd number of even cycles of some length has no square root.
    ///
    /// ```
    /// # use symperm::Permutation;
    /// let p = Permutation::new(vec![2, 3, 1]).unwrap();
    /// let q = p.sqrt().unwrap();
    /// assert_eq!(q.compose(&q).unwrap(), p);
    ///
    /// assert!(Permutation::new(vec![2, 1]).unwrap().sqrt().is_none());
    /// ```
    pub fn sqrt(&self) -> Option<Self> {
        let mut roots: Vec<Vec<usize>> = Vec::new();
        let mut waiting: BTreeMap<usize, Vec<usize>> = BTreeMap::new();

        for cycle in self.cycles() {
            let len = cycle.len();
            if len % 2 == 1 {
                let step = len.div_ceil(2);
                roots.push((0..len).map(|i| cycle[(i * step) % len]).collect());
            } else if let Some(partner) = waiting.remove(&len) {
                roots.push(
                    partner
                        .iter()
                        .zip(&cycle)
                        .flat_map(|(&a, &b)| [a, b])
                        .collect(),
                );
            } else {
                waiting.insert(len, cycle);
            }
        }

        if !waiting.is_empty() {
            return None;
        }
        // The root cycles are disjoint and cover 1..=n by construction.
        Permutation::from_cycles(&roots).ok()
    }
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}
