//! Ridge orientation field from windowed gradient statistics.
//!
//! For every pixel the structure tensor terms `Gxx = Σ gx²`, `Gyy = Σ gy²`
//! and `Gxy = Σ gx·gy` are summed over a box. The dominant gradient direction
//! is half the angle of `(Gxx - Gyy, 2·Gxy)`; the ridge runs perpendicular to
//! it. Angles use the mathematical convention (y up), hence the sign flip on
//! `Gxy`, whose `gy` factor is measured along image rows (y down).
//!
//! Coherence ("strength") is `|(Gxx - Gyy, 2·Gxy)| / (Gxx + Gyy)`, which is 1
//! for perfectly parallel gradients and 0 for isotropic or flat windows.
//!
//! The foreground mask keeps pixels whose windowed gradient magnitude exceeds
//! a fraction of the image-wide maximum.

use std::f32::consts::PI;

use fingerprint_core::{wrap_angle_pi, Field, GrayImageView, Mask};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::box_filter::box_sum;
use crate::gradient::{sobel_gradients, GradientField};
use crate::rows::fill_rows;
use crate::{OrientationParams, SingularPointError};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Orientation, coherence and foreground mask, one value per pixel.
#[derive(Clone, Debug)]
pub struct OrientationField {
    /// Ridge orientation in `[0, π)`, counter-clockwise from +x with y up.
    pub orientation: Field<f32>,
    /// Coherence in `[0, 1]` (up to rounding); exactly 0 on flat windows.
    pub strength: Field<f32>,
    pub mask: Mask,
}

/// One orientation sample on a regular grid, for overlays.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrientationSample {
    pub x: usize,
    pub y: usize,
    pub angle: f32,
    pub strength: f32,
}

impl OrientationField {
    /// Assemble a field from precomputed grids, checking that shapes agree.
    pub fn from_parts(
        orientation: Field<f32>,
        strength: Field<f32>,
        mask: Mask,
    ) -> Result<Self, SingularPointError> {
        if orientation.width() == 0 || orientation.height() == 0 {
            return Err(fingerprint_core::InputError::EmptyImage {
                width: orientation.width(),
                height: orientation.height(),
            }
            .into());
        }
        orientation.ensure_same_shape(&strength)?;
        orientation.ensure_same_shape(&mask)?;
        Ok(Self {
            orientation,
            strength,
            mask,
        })
    }

    #[inline]
    pub fn dims(&self) -> (usize, usize) {
        self.orientation.dims()
    }

    /// Foreground samples every `step` pixels, skipping `border` pixels at each edge.
    pub fn sample_grid(&self, step: usize, border: usize) -> Vec<OrientationSample> {
        let (w, h) = self.dims();
        let step = step.max(1);
        let mut out = Vec::new();
        if w <= 2 * border || h <= 2 * border {
            return out;
        }
        for y in (border..h - border).step_by(step) {
            for x in (border..w - border).step_by(step) {
                if !self.mask.at(x, y) {
                    continue;
                }
                out.push(OrientationSample {
                    x,
                    y,
                    angle: self.orientation.at(x, y),
                    strength: self.strength.at(x, y),
                });
            }
        }
        out
    }
}

/// Run the Sobel operator and build the orientation field of an image.
pub fn orientation_field_from_image(
    img: &GrayImageView<'_>,
    params: &OrientationParams,
) -> Result<OrientationField, SingularPointError> {
    params.validate()?;
    let grad = sobel_gradients(img, params.border)?;
    build_orientation_field(&grad, params)
}

/// Build orientation, strength and mask from precomputed gradients.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(grad, params), fields(w = grad.dims().0, h = grad.dims().1))
)]
pub fn build_orientation_field(
    grad: &GradientField,
    params: &OrientationParams,
) -> Result<OrientationField, SingularPointError> {
    params.validate()?;
    let (w, h) = grad.dims();
    if w == 0 || h == 0 {
        return Err(fingerprint_core::InputError::EmptyImage {
            width: w,
            height: h,
        }
        .into());
    }
    grad.gx.ensure_same_shape(&grad.gy)?;

    let mask = foreground_mask(grad, params);

    let gx2 = grad.gx.map(|v| v * v);
    let gy2 = grad.gy.map(|v| v * v);
    let gxgy = grad.gx.zip_map(&grad.gy, |a, b| a * b)?;

    let gxx = box_sum(&gx2, params.tensor_window, params.border);
    let gyy = box_sum(&gy2, params.tensor_window, params.border);
    let gxy = box_sum(&gxgy, params.tensor_window, params.border);

    let mut orientation = Field::filled(w, h, 0.0f32);
    fill_rows(&mut orientation, |y, row| {
        for (x, o) in row.iter_mut().enumerate() {
            let diff = gxx.at(x, y) - gyy.at(x, y);
            let cross = 2.0 * gxy.at(x, y);
            *o = ridge_angle(diff, cross);
        }
    });

    let mut strength = Field::filled(w, h, 0.0f32);
    fill_rows(&mut strength, |y, row| {
        for (x, s) in row.iter_mut().enumerate() {
            let (a, b) = (gxx.at(x, y), gyy.at(x, y));
            *s = coherence(a - b, 2.0 * gxy.at(x, y), a + b);
        }
    });

    debug!(
        "orientation field {}x{}: mask coverage {:.3}",
        w,
        h,
        mask.coverage()
    );

    Ok(OrientationField {
        orientation,
        strength,
        mask,
    })
}

/// Threshold the windowed gradient magnitude at a fraction of its maximum.
fn foreground_mask(grad: &GradientField, params: &OrientationParams) -> Mask {
    let sum_gm = box_sum(&grad.magnitude(), params.mask_window, params.border);
    let thr = sum_gm.max_value().unwrap_or(0.0) * params.mask_threshold_frac;
    sum_gm.map(|v| v > thr)
}

/// Ridge angle in `[0, π)` from the doubled-angle tensor components.
#[inline]
fn ridge_angle(diff: f32, cross: f32) -> f32 {
    wrap_angle_pi(((-cross).atan2(diff) + PI) / 2.0)
}

#[inline]
fn coherence(diff: f32, cross: f32, energy: f32) -> f32 {
    if energy == 0.0 {
        return 0.0;
    }
    let s = (diff * diff + cross * cross).sqrt() / energy;
    if s.is_finite() {
        s
    } else {
        0.0
    }
}
