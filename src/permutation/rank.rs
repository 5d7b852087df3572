use bitvec::vec::BitVec;
use rand::{seq::SliceRandom, Rng};

use super::Permutation;
use crate::error::PermutationError;

/// `n!`, or `None` if it does not fit in a `u128`.
pub(crate) fn factorial(n: usize) -> Option<u128> {
    (1..=n as u128).try_fold(1u128, |acc, k| acc.checked_mul(k))
}

impl Permutation {
    // --------------------------------------------------------------------------------------------
    // Ranking and Unranking
    // --------------------------------------------------------------------------------------------

    /// The `k`-th permutation of degree `n` in lexicographic order, counting from 1.
    ///
    /// `nth(n, 1)` is the identity and `nth(n, n!)` the reversal. A rank outside
    /// `1..=n!` fails with [`PermutationError::Range`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use symperm::Permutation;
    /// let p = Permutation::nth(6, 701).unwrap();
    /// assert_eq!(p.to_string(), "(1,6,3)(2,5)(4)");
    /// assert!(Permutation::nth(3, 7).is_err());
    /// ```
    pub fn nth(n: usize, k: u128) -> Result<Self, PermutationError> {
        let out_of_range = PermutationError::Range { rank: k, degree: n };
        if k == 0 {
            return Err(out_of_range);
        }
        if factorial(n).is_some_and(|total| k > total) {
            return Err(out_of_range);
        }

        // Factorial number system digits of k - 1, most significant first.
        let mut rest = k - 1;
        let mut remaining: Vec<usize> = (1..=n).collect();
        let mut data = Vec::with_capacity(n);
        for i in (0..n).rev() {
            let digit = match factorial(i) {
                Some(place) => {
                    let digit = rest / place;
                    rest %= place;
                    digit as usize
                }
                // place > u128::MAX > rest
                None => 0,
            };
            data.push(remaining.remove(digit));
        }
        Ok(Permutation::from_data_unchecked(data))
    }

    /// The 1-based lexicographic rank, inverse to [`Permutation::nth`].
    ///
    /// Fails with [`PermutationError::Overflow`] once the rank exceeds `u128`.
    ///
    /// ```
    /// # use symperm::Permutation;
    /// let p = Permutation::new(vec![6, 5, 1, 4, 2, 3]).unwrap();
    /// assert_eq!(p.rank(), Ok(701));
    /// ```
    pub fn rank(&self) -> Result<u128, PermutationError> {
        let n = self.degree();
        let mut used: BitVec = BitVec::repeat(false, n);
        let mut rank = 0u128;
        for (i, &value) in self.data.iter().enumerate() {
            let smaller_unused = used[..value - 1].count_zeros() as u128;
            used.set(value - 1, true);
            if smaller_unused == 0 {
                continue;
            }
            let place = factorial(n - 1 - i).ok_or(PermutationError::Overflow)?;
            rank = smaller_unused
                .checked_mul(place)
                .and_then(|term| rank.checked_add(term))
                .ok_or(PermutationError::Overflow)?;
        }
        rank.checked_add(1).ok_or(PermutationError::Overflow)
    }

    // --------------------------------------------------------------------------------------------
    // Random Permutations
    // --------------------------------------------------------------------------------------------

    /// A uniformly random permutation of degree `n`, using the thread-local generator.
    pub fn random(n: usize) -> Self {
        Self::random_with(n, &mut rand::thread_rng())
    }

    /// A uniformly random permutation of degree `n` drawn from `rng`.
    ///
    /// ```
    /// # use symperm::Permutation;
    /// use rand::{rngs::SmallRng, SeedableRng};
    ///
    /// let mut rng = SmallRng::seed_from_u64(7);
    /// let p = Permutation::random_with(10, &mut rng);
    /// assert_eq!(p.degree(), 10);
    /// ```
    pub fn random_with<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Self {
        let mut data: Vec<usize> = (1..=n).collect();
        data.shuffle(rng);
        Permutation::from_data_unchecked(data)
    }

    /// A permutation drawn from the Ewens distribution with parameter `theta`,
    /// using the thread-local generator.
    pub fn ewens(n: usize, theta: f64) -> Result<Self, PermutationError> {
        Self::ewens_with(n, theta, &mut rand::thread_rng())
    }

    /// A permutation drawn from the Ewens distribution with parameter `theta`.
    ///
    /// The probability of a permutation with `c` cycles is proportional to
    /// `theta^c`: `theta == 1` is uniform, `theta == 0` always gives a single
    /// `n`-cycle and large `theta` favours many fixed points. Built by the
    /// Chinese restaurant process: point `i` opens a new cycle with probability
    /// `theta / (theta + i - 1)`, otherwise it is inserted after a uniformly
    /// chosen earlier point.
    ///
    /// ```
    /// # use symperm::Permutation;
    /// use rand::{rngs::SmallRng, SeedableRng};
    ///
    /// let mut rng = SmallRng::seed_from_u64(1);
    /// let p = Permutation::ewens_with(8, 0.0, &mut rng).unwrap();
    /// assert_eq!(p.cycle_type(), vec![8]);
    /// assert!(Permutation::ewens_with(8, -1.0, &mut rng).is_err());
    /// ```
    pub fn ewens_with<R: Rng + ?Sized>(
        n: usize,
        theta: f64,
        rng: &mut R,
    ) -> Result<Self, PermutationError> {
        if !theta.is_finite() || theta < 0.0 {
            return Err(PermutationError::Argument(format!(
                "Ewens parameter must be finite and non-negative, got {theta}"
            )));
        }
        let mut data: Vec<usize> = Vec::with_capacity(n);
        for i in 1..=n {
            if i == 1 || rng.gen_bool(theta / (theta + (i - 1) as f64)) {
                data.push(i);
            } else {
                let j = rng.gen_range(1..i);
                data.push(data[j - 1]);
                data[j - 1] = i;
            }
        }
        Ok(Permutation::from_data_unchecked(data))
    }
}
