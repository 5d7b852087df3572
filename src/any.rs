//! Either representation of a permutation behind one type.

use std::fmt;

use crate::{compiled::CompiledPermutation, error::PermutationError, permutation::Permutation};

/// A permutation in canonical one-line form or in compiled form.
///
/// Both variants answer the same questions; equality compares the underlying
/// permutations, so a canonical and a compiled value of the same permutation
/// are equal.
///
/// ```
/// # use symperm::{AnyPermutation, Permutation};
/// let p = Permutation::new(vec![2, 3, 1]).unwrap();
/// let canonical = AnyPermutation::from(p.clone());
/// let compiled = canonical.clone().compile();
/// assert_eq!(canonical, compiled);
/// assert_eq!(compiled.image(3), Ok(1));
/// ```
#[derive(Debug, Clone)]
pub enum AnyPermutation {
    Canonical(Permutation),
    Compiled(CompiledPermutation),
}

impl AnyPermutation {
    pub fn degree(&self) -> usize {
        match self {
            AnyPermutation::Canonical(p) => p.degree(),
            AnyPermutation::Compiled(c) => c.degree(),
        }
    }

    /// The image of `k`, [`PermutationError::Index`] outside `1..=n`.
    pub fn image(&self, k: usize) -> Result<usize, PermutationError> {
        match self {
            AnyPermutation::Canonical(p) => p.apply(k),
            AnyPermutation::Compiled(c) => c.image(k),
        }
    }

    /// The inverse, in the same representation.
    pub fn inverse(&self) -> Self {
        match self {
            AnyPermutation::Canonical(p) => AnyPermutation::Canonical(p.inverse()),
            AnyPermutation::Compiled(c) => AnyPermutation::Compiled(c.inverse()),
        }
    }

    pub fn is_compiled(&self) -> bool {
        matches!(self, AnyPermutation::Compiled(_))
    }

    pub fn to_canonical(&self) -> Permutation {
        match self {
            AnyPermutation::Canonical(p) => p.clone(),
            AnyPermutation::Compiled(c) => c.decode(),
        }
    }

    pub fn to_compiled(&self) -> CompiledPermutation {
        match self {
            AnyPermutation::Canonical(p) => CompiledPermutation::from_permutation(p),
            AnyPermutation::Compiled(c) => c.clone(),
        }
    }

    /// Switches to the canonical representation.
    pub fn canonicalize(self) -> Self {
        match self {
            AnyPermutation::Compiled(c) => AnyPermutation::Canonical(c.decode()),
            canonical => canonical,
        }
    }

    /// Switches to the compiled representation.
    pub fn compile(self) -> Self {
        match self {
            AnyPermutation::Canonical(p) => {
                AnyPermutation::Compiled(CompiledPermutation::from_permutation(&p))
            }
            compiled => compiled,
        }
    }

    /// Permutes `v` in place, `v[k - 1]` taking the old `v[p(k) - 1]`.
    ///
    /// The canonical variant compiles a temporary encoding first; keep the
    /// value compiled when applying it repeatedly.
    pub fn apply_in_place<T>(&self, v: &mut [T]) -> Result<(), PermutationError> {
        match self {
            AnyPermutation::Canonical(p) => CompiledPermutation::from_permutation(p).apply(v),
            AnyPermutation::Compiled(c) => c.apply(v),
        }
    }
}

impl PartialEq for AnyPermutation {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (AnyPermutation::Canonical(a), AnyPermutation::Canonical(b)) => a == b,
            (AnyPermutation::Compiled(a), AnyPermutation::Compiled(b)) => a == b,
            (AnyPermutation::Canonical(a), AnyPermutation::Compiled(b))
            | (AnyPermutation::Compiled(b), AnyPermutation::Canonical(a)) => {
                CompiledPermutation::from_permutation(a) == *b
            }
        }
    }
}

impl Eq for AnyPermutation {}

impl From<Permutation> for AnyPermutation {
    fn from(p: Permutation) -> Self {
        AnyPermutation::Canonical(p)
    }
}

impl From<CompiledPermutation> for AnyPermutation {
    fn from(c: CompiledPermutation) -> Self {
        AnyPermutation::Compiled(c)
    }
}

impl From<AnyPermutation> for Permutation {
    fn from(any: AnyPermutation) -> Self {
        match any {
            AnyPermutation::Canonical(p) => p,
            AnyPermutation::Compiled(c) => c.decode(),
        }
    }
}

impl fmt::Display for AnyPermutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnyPermutation::Canonical(p) => write!(f, "{p}"),
            AnyPermutation::Compiled(c) => write!(f, "{}", c.decode()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants_agree() {
        let p = Permutation::new(vec![4, 1, 3, 2, 6, 5]).unwrap();
        let canonical = AnyPermutation::from(p.clone());
        let compiled = canonical.clone().compile();

        assert!(compiled.is_compiled());
        assert!(!canonical.is_compiled());
        assert_eq!(compiled.degree(), canonical.degree());
        for k in 1..=6 {
            assert_eq!(compiled.image(k), canonical.image(k));
        }
        assert_eq!(compiled.inverse(), canonical.inverse());
        assert_eq!(compiled.to_string(), "(1,4,2)(3)(5,6)");
        assert_eq!(compiled.clone().canonicalize(), canonical);

        let encoded = CompiledPermutation::from_permutation(&p);
        assert_eq!(canonical.to_canonical(), p);
        assert_eq!(compiled.to_canonical(), p);
        assert_eq!(canonical.to_compiled(), encoded);
        assert_eq!(compiled.to_compiled(), encoded);
        assert_eq!(Permutation::from(compiled), p);
    }

    #[test]
    fn apply_in_place_either_way() {
        let p = Permutation::new(vec![2, 3, 1]).unwrap();
        for any in [AnyPermutation::from(p.clone()), AnyPermutation::from(p.clone()).compile()] {
            let mut v = vec!["x", "y", "z"];
            any.apply_in_place(&mut v).unwrap();
            assert_eq!(v, vec!["y", "z", "x"]);
            assert!(any.apply_in_place(&mut ["x"]).is_err());
            assert!(any.image(0).is_err());
        }
    }

    #[test]
    fn different_permutations_differ() {
        let a = AnyPermutation::from(Permutation::new(vec![2, 1, 3]).unwrap());
        let b = AnyPermutation::from(Permutation::new(vec![1, 3, 2]).unwrap()).compile();
        assert_ne!(a, b);
    }
}
