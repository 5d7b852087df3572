//! # Symperm
//!
//! Symperm is a Rust library for working with permutations of `1..n` as
//! elements of the symmetric group.
//!
//! Besides the canonical [`Permutation`](permutation::Permutation) value type it
//! provides a normalised word of adjacent transpositions
//! ([`CoxeterDecomposition`](coxeter::CoxeterDecomposition)) and a compact
//! swap/cycle encoding ([`CompiledPermutation`](compiled::CompiledPermutation))
//! that applies a fixed permutation to many data vectors in place.
//!
//! All indices and values in the public API are 1-based.

pub mod any;
pub mod compiled;
pub mod coxeter;
pub mod error;
pub mod generator;
pub mod num_traits;
pub mod permutation;

pub use any::AnyPermutation;
pub use compiled::CompiledPermutation;
pub use coxeter::CoxeterDecomposition;
pub use error::PermutationError;
pub use generator::PermGen;
pub use permutation::Permutation;
