use thiserror::Error;

/// Everything that can go wrong when building or combining permutations.
///
/// Every failure is local and synchronous: a constructor that returns an error
/// never leaves a partially built value behind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PermutationError {
    #[error("Invalid permutation: {reason}")]
    InvalidPermutation { reason: String },

    #[error("Invalid cycles: {reason}")]
    InvalidCycles { reason: String },

    #[error("Invalid permutation matrix: {reason}")]
    InvalidPermutationMatrix { reason: String },

    #[error("Degree mismatch: {left} vs {right}")]
    DegreeMismatch { left: usize, right: usize },

    #[error("Index {index} out of range 1..={degree}")]
    Index { index: usize, degree: usize },

    #[error("Rank {rank} out of range 1..={degree}!")]
    Range { rank: u128, degree: usize },

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error("Order does not fit in 128 bits")]
    Overflow,
}

impl PermutationError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        log::debug!("rejecting permutation: {reason}");
        PermutationError::InvalidPermutation { reason }
    }

    pub(crate) fn invalid_cycles(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        log::debug!("rejecting cycles: {reason}");
        PermutationError::InvalidCycles { reason }
    }

    pub(crate) fn invalid_matrix(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        log::debug!("rejecting permutation matrix: {reason}");
        PermutationError::InvalidPermutationMatrix { reason }
    }

    /// Checks that `left == right`.
    pub(crate) fn check_degree(left: usize, right: usize) -> Result<(), Self> {
        if left == right {
            Ok(())
        } else {
            Err(PermutationError::DegreeMismatch { left, right })
        }
    }

    /// Checks that `index` lies in `1..=degree`.
    pub(crate) fn check_index(index: usize, degree: usize) -> Result<(), Self> {
        if (1..=degree).contains(&index) {
            Ok(())
        } else {
            Err(PermutationError::Index { index, degree })
        }
    }
}
