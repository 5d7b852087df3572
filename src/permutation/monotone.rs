use super::Permutation;

impl Permutation {
    // --------------------------------------------------------------------------------------------
    // Monotone Subsequences
    // --------------------------------------------------------------------------------------------

    /// The longest subsequence of the one-line notation whose consecutive values
    /// satisfy `cmp`.
    ///
    /// Quadratic dynamic program over positions. Among several longest chains
    /// the one starting at the earliest position wins, and each step moves to
    /// the earliest admissible later position.
    pub fn longest_monotone<F>(&self, cmp: F) -> Vec<usize>
    where
        F: Fn(usize, usize) -> bool,
    {
        let n = self.degree();
        if n == 0 {
            return Vec::new();
        }

        // score[k]: length of the longest chain starting at position k
        let mut score = vec![1usize; n];
        for k in (0..n - 1).rev() {
            let longest_after = (k + 1..n)
                .filter(|&i| cmp(self.data[k], self.data[i]))
                .map(|i| score[i])
                .max()
                .unwrap_or(0);
            score[k] = 1 + longest_after;
        }

        // first position reaching the best score
        let best = score.iter().copied().max().unwrap_or(0);
        let Some(mut current) = score.iter().position(|&s| s == best) else {
            return Vec::new();
        };

        let mut chain = Vec::with_capacity(best);
        chain.push(self.data[current]);
        while score[current] > 1 {
            let Some(next) = (current + 1..n).find(|&i| {
                score[i] == score[current] - 1 && cmp(self.data[current], self.data[i])
            }) else {
                break;
            };
            chain.push(self.data[next]);
            current = next;
        }
        chain
    }

    /// Longest increasing subsequence of the one-line notation.
    ///
    /// ```
    /// # use symperm::Permutation;
    /// let p = Permutation::new(vec![3, 1, 4, 2, 5]).unwrap();
    /// assert_eq!(p.longest_increasing(), vec![3, 4, 5]);
    /// ```
    pub fn longest_increasing(&self) -> Vec<usize> {
        self.longest_monotone(|a, b| a < b)
    }

    /// Longest decreasing subsequence of the one-line notation.
    ///
    /// ```
    /// # use symperm::Permutation;
    /// let p = Permutation::new(vec![3, 1, 4, 2, 5]).unwrap();
    /// assert_eq!(p.longest_decreasing(), vec![3, 1]);
    /// ```
    pub fn longest_decreasing(&self) -> Vec<usize> {
        self.longest_monotone(|a, b| a > b)
    }
}
