//! Synthetic ridge patterns with a single planted singular point.
#![allow(dead_code)]

use fingerprint_core::GrayImage;

fn render(w: usize, h: usize, phase: impl Fn(f32, f32) -> f32) -> GrayImage {
    GrayImage::from_fn(w, h, |x, y| {
        let v = 128.0 + 100.0 * phase(x as f32, y as f32).cos();
        v.round().clamp(0.0, 255.0) as u8
    })
}

/// Confocal parabolas opening towards +x around `(cx, cy)`: a core.
///
/// Level lines of `sqrt(r - X)` (X right, Y up) run at half the polar angle.
pub fn core_image(w: usize, h: usize, cx: f32, cy: f32, omega: f32) -> GrayImage {
    render(w, h, |x, y| {
        let (dx, dy) = (x - cx, -(y - cy));
        let r = (dx * dx + dy * dy).sqrt();
        omega * (r - dx).max(0.0).sqrt()
    })
}

/// Three-way ridge junction around `(cx, cy)`: a delta.
///
/// Level lines of `Im(z^{3/2})` run at minus half the polar angle.
pub fn delta_image(w: usize, h: usize, cx: f32, cy: f32, omega: f32) -> GrayImage {
    render(w, h, |x, y| {
        let (dx, dy) = (x - cx, -(y - cy));
        let r = (dx * dx + dy * dy).sqrt();
        let phi = dy.atan2(dx);
        omega * r.powf(1.5) * (1.5 * phi).sin()
    })
}

pub fn flat_image(w: usize, h: usize, value: u8) -> GrayImage {
    GrayImage::from_fn(w, h, |_, _| value)
}
