use std::{iter::FusedIterator, marker::PhantomData, ptr::NonNull};

use super::Permutation;
use crate::error::PermutationError;

impl Permutation {
    // --------------------------------------------------------------------------------------------
    // Iterating
    // --------------------------------------------------------------------------------------------

    /// Returns an iterator over `slice` in the order given by the permutation,
    /// yielding `slice[p(1) - 1], slice[p(2) - 1], ...`.
    ///
    /// Fails with [`PermutationError::DegreeMismatch`] if `slice.len()` is not the degree.
    ///
    /// # Examples
    ///
    /// ```
    /// # use symperm::Permutation;
    /// let p = Permutation::new(vec![3, 1, 2]).unwrap();
    /// let data = vec![10, 20, 30];
    /// let mut iter = p.iter_slice(&data).unwrap();
    /// assert_eq!(iter.next(), Some(&30));
    /// assert_eq!(iter.next(), Some(&10));
    /// assert_eq!(iter.next(), Some(&20));
    /// assert_eq!(iter.next(), None);
    /// ```
    pub fn iter_slice<'a, T>(
        &'a self,
        slice: &'a [T],
    ) -> Result<PermutationMapIter<'a, T>, PermutationError> {
        PermutationError::check_degree(self.degree(), slice.len())?;
        Ok(PermutationMapIter::new(slice, &self.data))
    }

    /// Mutable counterpart of [`Permutation::iter_slice`].
    ///
    /// ```
    /// # use symperm::Permutation;
    /// let p = Permutation::new(vec![3, 1, 2]).unwrap();
    /// let mut data = vec![10, 20, 30];
    /// for (i, value) in p.iter_slice_mut(&mut data).unwrap().enumerate() {
    ///     *value += i * 100; // visits data[2], data[0], data[1]
    /// }
    /// assert_eq!(data, vec![110, 220, 30]);
    /// ```
    pub fn iter_slice_mut<'a, T>(
        &'a self,
        slice: &'a mut [T],
    ) -> Result<PermutationMapIterMut<'a, T>, PermutationError> {
        PermutationError::check_degree(self.degree(), slice.len())?;
        Ok(PermutationMapIterMut::new(slice, &self.data))
    }
}

/// An iterator over a slice, ordered by a permutation's one-line notation.
#[derive(Debug, Clone)]
pub struct PermutationMapIter<'a, T: 'a> {
    slice: &'a [T],
    images: &'a [usize],
    current: usize,
}

impl<'a, T: 'a> PermutationMapIter<'a, T> {
    fn new(slice: &'a [T], images: &'a [usize]) -> Self {
        debug_assert!(images.iter().all(|&k| (1..=slice.len()).contains(&k)));
        PermutationMapIter {
            slice,
            images,
            current: 0,
        }
    }
}

impl<'a, T> Iterator for PermutationMapIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let &k = self.images.get(self.current)?;
        self.current += 1;
        Some(&self.slice[k - 1])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.images.len() - self.current;
        (len, Some(len))
    }
}

impl<T> ExactSizeIterator for PermutationMapIter<'_, T> {
    fn len(&self) -> usize {
        self.images.len() - self.current
    }
}

impl<T> FusedIterator for PermutationMapIter<'_, T> {}

/// A mutable iterator over a slice, ordered by a permutation's one-line notation.
#[derive(Debug)]
pub struct PermutationMapIterMut<'a, T: 'a> {
    ptr: NonNull<T>,
    images: &'a [usize],
    current: usize,
    _marker: PhantomData<&'a mut T>,
}

impl<'a, T: 'a> PermutationMapIterMut<'a, T> {
    fn new(slice: &'a mut [T], images: &'a [usize]) -> Self {
        debug_assert_eq!(
            slice.len(),
            images.len(),
            "slice length must equal the permutation degree"
        );
        PermutationMapIterMut {
            ptr: NonNull::from(slice).cast(),
            images,
            current: 0,
            _marker: PhantomData,
        }
    }
}

impl<'a, T> Iterator for PermutationMapIterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        let &k = self.images.get(self.current)?;
        self.current += 1;
        // SAFETY:
        // - `ptr` points to a live slice of `images.len()` elements for 'a.
        // - `images` comes from a validated permutation, so `k - 1` is in bounds
        //   and each index is yielded at most once: the references never alias.
        unsafe { Some(&mut *self.ptr.as_ptr().add(k - 1)) }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.images.len() - self.current;
        (len, Some(len))
    }
}

impl<T> ExactSizeIterator for PermutationMapIterMut<'_, T> {
    fn len(&self) -> usize {
        self.images.len() - self.current
    }
}

impl<T> FusedIterator for PermutationMapIterMut<'_, T> {}
