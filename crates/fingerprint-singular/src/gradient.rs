//! Sobel image gradients.
//!
//! Convolves the 3×3 Sobel pair with the configured border policy and
//! returns `gx`, `gy` as float grids of the input shape. `gx` grows with
//! intensity to the right, `gy` grows with intensity downwards (image rows).

use fingerprint_core::{map_index, BorderMode, Field, GrayImageView};

use crate::rows::fill_rows;
use crate::SingularPointError;

#[cfg(feature = "tracing")]
use tracing::instrument;

type Kernel3 = [[f32; 3]; 3];

const SOBEL_KERNEL_X: Kernel3 = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const SOBEL_KERNEL_Y: Kernel3 = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

/// Per-pixel intensity derivatives.
#[derive(Clone, Debug)]
pub struct GradientField {
    /// Horizontal derivative (convolution with kernel X).
    pub gx: Field<f32>,
    /// Vertical derivative (convolution with kernel Y).
    pub gy: Field<f32>,
}

impl GradientField {
    /// Pair two precomputed derivative grids.
    pub fn from_parts(gx: Field<f32>, gy: Field<f32>) -> Result<Self, SingularPointError> {
        if gx.width() == 0 || gx.height() == 0 {
            return Err(fingerprint_core::InputError::EmptyImage {
                width: gx.width(),
                height: gx.height(),
            }
            .into());
        }
        gx.ensure_same_shape(&gy)?;
        Ok(Self { gx, gy })
    }

    #[inline]
    pub fn dims(&self) -> (usize, usize) {
        self.gx.dims()
    }

    /// Euclidean magnitude `sqrt(gx² + gy²)` per pixel.
    pub fn magnitude(&self) -> Field<f32> {
        let mut out = Field::filled(self.gx.width(), self.gx.height(), 0.0f32);
        fill_rows(&mut out, |y, row| {
            for ((o, &a), &b) in row.iter_mut().zip(self.gx.row(y)).zip(self.gy.row(y)) {
                *o = (a * a + b * b).sqrt();
            }
        });
        out
    }
}

/// Compute Sobel gradients of an 8-bit image.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(img), fields(width = img.width, height = img.height))
)]
pub fn sobel_gradients(
    img: &GrayImageView<'_>,
    border: BorderMode,
) -> Result<GradientField, SingularPointError> {
    img.validate()?;
    let w = img.width;
    let h = img.height;

    // Column lookup is shared by every row.
    let cols: Vec<[usize; 3]> = (0..w)
        .map(|x| neighbors(x, w, border))
        .collect();

    let mut gx = Field::filled(w, h, 0.0f32);
    let mut gy = Field::filled(w, h, 0.0f32);

    fill_rows(&mut gx, |y, out| {
        convolve_row(img, &cols, neighbors(y, h, border), &SOBEL_KERNEL_X, out)
    });
    fill_rows(&mut gy, |y, out| {
        convolve_row(img, &cols, neighbors(y, h, border), &SOBEL_KERNEL_Y, out)
    });

    Ok(GradientField { gx, gy })
}

#[inline]
fn neighbors(i: usize, len: usize, border: BorderMode) -> [usize; 3] {
    let i = i as isize;
    // `len > 0` is checked by the caller, so the mapping always exists.
    let m = |k: isize| map_index(k, len, border).unwrap_or(0);
    [m(i - 1), m(i), m(i + 1)]
}

fn convolve_row(
    img: &GrayImageView<'_>,
    cols: &[[usize; 3]],
    rows_idx: [usize; 3],
    kernel: &Kernel3,
    out: &mut [f32],
) {
    let rows = [
        img.row(rows_idx[0]),
        img.row(rows_idx[1]),
        img.row(rows_idx[2]),
    ];
    for (o, xi) in out.iter_mut().zip(cols) {
        let mut sum = 0.0f32;
        for (k_row, src) in kernel.iter().zip(&rows) {
            sum += src[xi[0]] as f32 * k_row[0]
                + src[xi[1]] as f32 * k_row[1]
                + src[xi[2]] as f32 * k_row[2];
        }
        *o = sum;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fingerprint_core::GrayImage;

    #[test]
    fn horizontal_ramp_has_pure_x_gradient() {
        let img = GrayImage::from_fn(8, 6, |x, _| (x * 10) as u8);
        let g = sobel_gradients(&img.view(), BorderMode::Reflect101).expect("gradients");

        // Interior: 4 * 2 * 10 = 80 (kernel weights sum to 4, central difference spans 2 px).
        assert_eq!(g.gx.at(3, 2), 80.0);
        assert_eq!(g.gy.at(3, 2), 0.0);
        // Reflect101 mirrors column 1 into column -1, so the edge derivative vanishes.
        assert_eq!(g.gx.at(0, 2), 0.0);
    }

    #[test]
    fn vertical_ramp_points_down() {
        let img = GrayImage::from_fn(5, 7, |_, y| (y * 5) as u8);
        let g = sobel_gradients(&img.view(), BorderMode::Clamp).expect("gradients");
        assert_eq!(g.gy.at(2, 3), 40.0);
        assert_eq!(g.gx.at(2, 3), 0.0);
        // Clamp repeats the edge row: one-sided difference of 5 with weight 4.
        assert_eq!(g.gy.at(2, 0), 20.0);
        assert_eq!(g.magnitude().at(2, 3), 40.0);
    }

    #[test]
    fn flat_image_has_zero_gradient() {
        let img = GrayImage::from_fn(4, 4, |_, _| 77);
        let g = sobel_gradients(&img.view(), BorderMode::Reflect101).expect("gradients");
        assert!(g.gx.data().iter().chain(g.gy.data()).all(|&v| v == 0.0));
    }

    #[test]
    fn single_pixel_image_is_supported() {
        let img = GrayImage::from_fn(1, 1, |_, _| 200);
        let g = sobel_gradients(&img.view(), BorderMode::Reflect101).expect("gradients");
        assert_eq!(g.dims(), (1, 1));
        assert_eq!(g.gx.at(0, 0), 0.0);
    }

    #[test]
    fn empty_image_is_rejected() {
        let view = GrayImageView {
            width: 0,
            height: 0,
            data: &[],
        };
        assert!(matches!(
            sobel_gradients(&view, BorderMode::Reflect101),
            Err(SingularPointError::InvalidInput(_))
        ));
    }

    #[test]
    fn from_parts_checks_shapes() {
        let a = Field::filled(3, 3, 0.0f32);
        let b = Field::filled(3, 2, 0.0f32);
        assert!(GradientField::from_parts(a.clone(), b).is_err());
        assert!(GradientField::from_parts(a.clone(), a).is_ok());
    }
}
