use std::collections::BTreeMap;

use super::Permutation;
use crate::{
    error::PermutationError,
    num_traits::{RefOne, RefZero, Unit},
};

impl Permutation {
    // --------------------------------------------------------------------------------------------
    // Views
    // --------------------------------------------------------------------------------------------

    /// The permutation matrix `M` with `M[i][j] == 1` iff `i == p(j)` (1-based),
    /// so column `j` is the indicator of `p(j)`.
    ///
    /// ```
    /// # use symperm::Permutation;
    /// let p = Permutation::new(vec![2, 3, 1]).unwrap();
    /// assert_eq!(
    ///     p.to_matrix(),
    ///     vec![vec![0, 0, 1], vec![1, 0, 0], vec![0, 1, 0]]
    /// );
    /// ```
    pub fn to_matrix(&self) -> Vec<Vec<u8>> {
        self.to_matrix_of()
    }

    /// [`Permutation::to_matrix`] with entries of any numeric type.
    pub fn to_matrix_of<T: Unit + Clone>(&self) -> Vec<Vec<T>> {
        let n = self.degree();
        let mut matrix = vec![vec![T::zero(); n]; n];
        for (j, &i) in self.data.iter().enumerate() {
            matrix[i - 1][j] = T::one();
        }
        matrix
    }

    /// Recovers a permutation from its matrix, see [`Permutation::to_matrix`].
    ///
    /// The matrix must be square, contain only zeros and ones, and have exactly
    /// one `1` per row and per column; otherwise this fails with
    /// [`PermutationError::InvalidPermutationMatrix`].
    ///
    /// ```
    /// # use symperm::Permutation;
    /// let m = vec![vec![0.0, 1.0], vec![1.0, 0.0]];
    /// assert_eq!(Permutation::from_matrix(&m).unwrap().data(), &[2, 1]);
    ///
    /// let not_square = vec![vec![1, 0]];
    /// assert!(Permutation::from_matrix(&not_square).is_err());
    /// ```
    pub fn from_matrix<T, R>(matrix: &[R]) -> Result<Self, PermutationError>
    where
        T: RefZero + RefOne + PartialEq,
        R: AsRef<[T]>,
    {
        let n = matrix.len();
        let mut data = vec![0; n];
        let mut row_used = vec![false; n];

        for (i, row) in matrix.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != n {
                return Err(PermutationError::invalid_matrix(format!(
                    "row {} has {} entries, expected {n}",
                    i + 1,
                    row.len()
                )));
            }
            for (j, entry) in row.iter().enumerate() {
                if *entry == entry.ref_zero() {
                    continue;
                }
                if *entry != entry.ref_one() {
                    return Err(PermutationError::invalid_matrix(format!(
                        "entry ({}, {}) is neither 0 nor 1",
                        i + 1,
                        j + 1
                    )));
                }
                if std::mem::replace(&mut row_used[i], true) {
                    return Err(PermutationError::invalid_matrix(format!(
                        "row {} has more than one 1",
                        i + 1
                    )));
                }
                if data[j] != 0 {
                    return Err(PermutationError::invalid_matrix(format!(
                        "column {} has more than one 1",
                        j + 1
                    )));
                }
                data[j] = i + 1;
            }
        }

        if let Some(j) = data.iter().position(|&i| i == 0) {
            return Err(PermutationError::invalid_matrix(format!(
                "column {} has no 1",
                j + 1
            )));
        }
        Ok(Permutation::from_data_unchecked(data))
    }

    /// Two-row notation: `[1, 2, ..., n]` over `[p(1), p(2), ..., p(n)]`.
    pub fn to_two_row(&self) -> [Vec<usize>; 2] {
        [(1..=self.degree()).collect(), self.data.clone()]
    }

    /// The permutation as a map `k ↦ p(k)`.
    pub fn to_map(&self) -> BTreeMap<usize, usize> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, &m)| (i + 1, m))
            .collect()
    }
}
