//! One random permutation applied to several parallel columns.

use crate::core::rng::Rng;
use crate::error::ShuffleError;

/// Anything whose elements can be permuted in place.
pub trait Column {
    fn len(&self) -> usize;
    fn swap(&mut self, a: usize, b: usize);
}

impl<T> Column for Vec<T> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.as_mut_slice().swap(a, b);
    }
}

impl<T, const N: usize> Column for [T; N] {
    fn len(&self) -> usize {
        N
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.as_mut_slice().swap(a, b);
    }
}

/// Shuffle every column with the same seeded Fisher-Yates permutation.
///
/// All columns must have the same length; nothing is touched otherwise.
/// Returns `perm` where slot `i` now holds what used to be at `perm[i]`.
pub fn shuffle_parallel(seed: u64, columns: &mut [&mut dyn Column]) -> Result<Vec<usize>, ShuffleError> {
    let len = match columns.first() {
        Some(first) => first.len(),
        None => return Ok(Vec::new()),
    };
    for (column, c) in columns.iter().enumerate() {
        if c.len() != len {
            return Err(ShuffleError::LengthMismatch {
                column,
                expected: len,
                found: c.len(),
            });
        }
    }

    let mut rng = Rng::new(seed);
    let mut perm: Vec<usize> = (0..len).collect();
    let mut remaining = len;
    while remaining > 0 {
        let pick = rng.next_int(remaining as u32) as usize;
        remaining -= 1;
        perm.swap(remaining, pick);
        for c in columns.iter_mut() {
            c.swap(remaining, pick);
        }
    }
    Ok(perm)
}
