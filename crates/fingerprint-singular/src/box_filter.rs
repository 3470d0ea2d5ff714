//! Unnormalized box sums.
//!
//! `box_sum(f, k)` replaces every sample by the plain sum of the `k × k`
//! neighborhood anchored at `k / 2`, with out-of-image samples synthesized
//! by the border policy. The filter is separable: a horizontal pass followed
//! by a vertical pass, each summed directly (no running sum), so a region of
//! exact zeros stays exactly zero regardless of what surrounds it.

use fingerprint_core::{map_index, BorderMode, Field};

use crate::rows::fill_rows;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Sum `src` over a `size × size` box at every pixel.
///
/// `size == 0` yields an all-zero grid.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "trace", skip(src), fields(w = src.width(), h = src.height()))
)]
pub fn box_sum(src: &Field<f32>, size: usize, border: BorderMode) -> Field<f32> {
    let (w, h) = src.dims();
    let mut out = Field::filled(w, h, 0.0f32);
    if size == 0 || w == 0 || h == 0 {
        return out;
    }

    let col_taps = taps(w, size, border);
    let row_taps = taps(h, size, border);

    let mut horizontal = Field::filled(w, h, 0.0f32);
    fill_rows(&mut horizontal, |y, row| {
        let s = src.row(y);
        for (o, idx) in row.iter_mut().zip(&col_taps) {
            *o = idx.iter().map(|&i| s[i] as f64).sum::<f64>() as f32;
        }
    });

    fill_rows(&mut out, |y, row| {
        for (x, o) in row.iter_mut().enumerate() {
            *o = row_taps[y]
                .iter()
                .map(|&j| horizontal.at(x, j) as f64)
                .sum::<f64>() as f32;
        }
    });

    out
}

/// Source indices contributing to each output index along one axis.
fn taps(len: usize, size: usize, border: BorderMode) -> Vec<Vec<usize>> {
    let anchor = (size / 2) as isize;
    (0..len as isize)
        .map(|i| {
            (0..size as isize)
                .filter_map(|k| map_index(i + k - anchor, len, border))
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_field_sums_to_window_area() {
        let f = Field::filled(10, 7, 2.0f32);
        let s = box_sum(&f, 5, BorderMode::Reflect101);
        assert!(s.data().iter().all(|&v| v == 50.0));
    }

    #[test]
    fn impulse_spreads_over_window() {
        let mut f = Field::filled(9, 9, 0.0f32);
        f.set(4, 4, 1.0);
        let s = box_sum(&f, 3, BorderMode::Reflect101);
        for y in 0..9 {
            for x in 0..9 {
                let inside = (3..=5).contains(&x) && (3..=5).contains(&y);
                assert_eq!(s.at(x, y), if inside { 1.0 } else { 0.0 }, "({x},{y})");
            }
        }
    }

    #[test]
    fn reflect101_counts_mirrored_samples() {
        // Row [1, 0, 0, 0]: at x=0 the 3-box sees [f(1), f(0), f(1)] = [0, 1, 0].
        // At x=1 it sees [1, 0, 0]. Column sums triple the row sum (height-1 image
        // mirrors onto itself).
        let f = Field::from_vec(4, 1, vec![1.0f32, 0.0, 0.0, 0.0]).expect("field");
        let s = box_sum(&f, 3, BorderMode::Reflect101);
        assert_eq!(s.row(0), &[3.0, 3.0, 0.0, 0.0]);
    }

    #[test]
    fn zero_region_stays_exactly_zero() {
        let f = Field::from_fn(40, 3, |x, _| if x < 10 { 1.0e6 + x as f32 * 0.1 } else { 0.0 });
        let s = box_sum(&f, 5, BorderMode::Reflect101);
        assert!(s.row(1)[13..].iter().all(|&v| v == 0.0));
    }
}
