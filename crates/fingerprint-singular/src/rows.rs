//! Row-wise fill of dense grids, parallel with the `rayon` feature.
//!
//! Every row is written by exactly one closure call that only reads shared
//! immutable inputs, so serial and parallel runs produce identical grids.

use fingerprint_core::Field;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

pub(crate) fn fill_rows<T, F>(out: &mut Field<T>, f: F)
where
    T: Copy + Send,
    F: Fn(usize, &mut [T]) + Sync,
{
    let width = out.width();
    if width == 0 {
        return;
    }

    #[cfg(feature = "rayon")]
    out.data_mut()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| f(y, row));

    #[cfg(not(feature = "rayon"))]
    for (y, row) in out.data_mut().chunks_mut(width).enumerate() {
        f(y, row);
    }
}

/// Map each element of `items` in order, in parallel with the `rayon` feature.
pub(crate) fn map_ordered<I, T, F>(items: &[I], f: F) -> Vec<T>
where
    I: Sync,
    T: Send,
    F: Fn(&I) -> T + Sync + Send,
{
    #[cfg(feature = "rayon")]
    {
        items.par_iter().map(f).collect()
    }

    #[cfg(not(feature = "rayon"))]
    {
        items.iter().map(f).collect()
    }
}
