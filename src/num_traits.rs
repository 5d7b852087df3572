//! # Matrix entry traits
//!
//! Permutation matrices are plain nested vectors of some numeric type. These
//! traits let [`Permutation::from_matrix`](crate::permutation::Permutation::from_matrix)
//! and [`Permutation::to_matrix_of`](crate::permutation::Permutation::to_matrix_of)
//! stay generic over that type without pulling in a numerics crate.
//!
//! - **`RefZero<T = Self>`**: `ref_zero(&self) -> T`, a zero of the same type
//!   as (or borrowed from) `self`.
//! - **`RefOne`**: `ref_one(&self) -> Self`, the corresponding one.
//! - **`Unit`**: types that can produce zero and one from nothing, needed to
//!   build a matrix from scratch.

use duplicate::duplicate;
use std::borrow::Borrow;

pub trait RefZero<T = Self>: Borrow<T> {
    fn ref_zero(&self) -> T;
}

pub trait RefOne {
    fn ref_one(&self) -> Self;
}

pub trait Unit: Sized {
    fn zero() -> Self;
    fn one() -> Self;
}

duplicate! {
    [types zero_value one_value;
        [f32] [0.0] [1.];
        [f64] [0.0] [1.];
        [i8] [0] [1];
        [i16] [0] [1] ;
        [i32] [0] [1];
        [i64] [0] [1];
        [i128] [0] [1];
        [isize] [0] [1];
        [u8] [0] [1];
        [u16] [0] [1];
        [u32] [0] [1];
        [u64] [0] [1];
        [u128] [0] [1];
        [usize] [0] [1];
        [bool] [false] [true];
        ]

    impl RefZero for types{
        fn ref_zero(&self)-> Self{
            zero_value
        }
    }

    impl RefOne for types{
        fn ref_one(&self)-> Self{
            one_value
        }
    }

    impl Unit for types{
        fn zero()-> Self{
            zero_value
        }

        fn one()-> Self{
            one_value
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ref_zero_and_one_match_unit() {
        assert_eq!(5i32.ref_zero(), <i32 as Unit>::zero());
        assert_eq!(5i32.ref_one(), <i32 as Unit>::one());
        assert_eq!((&2.5f64).ref_zero(), 0.0);
        assert!(false.ref_one());
    }

    #[test]
    fn unit_constants_per_type() {
        assert_eq!(<f64 as Unit>::zero(), 0.0);
        assert_eq!(<f32 as Unit>::one(), 1.0);
        assert_eq!(<u128 as Unit>::one(), 1);
        assert_eq!(<isize as Unit>::zero(), 0);
        assert!(!<bool as Unit>::zero());
        assert!(<bool as Unit>::one());
        assert_eq!(7u8.ref_one(), <u8 as Unit>::one());
    }
}
