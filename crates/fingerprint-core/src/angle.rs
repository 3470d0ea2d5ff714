//! Angle arithmetic for ridge orientations, which live on the circle with
//! period π (a ridge has no polarity).
use std::f32::consts::{FRAC_PI_2, PI};

/// Wrap an angle into `[0, π)`.
pub fn wrap_angle_pi(theta: f32) -> f32 {
    let mut t = theta % PI;
    if t < 0.0 {
        t += PI;
    }
    // `-ε + π` rounds to π in f32.
    if t >= PI {
        t -= PI;
    }
    t
}

/// Fold an angular difference into `(-π/2, π/2]`.
///
/// This is the step rule of the Poincaré index: consecutive orientation
/// samples along a path are assumed to differ by less than a quarter turn.
#[inline]
pub fn wrap_half_pi(d: f32) -> f32 {
    let mut d = d;
    while d > FRAC_PI_2 {
        d -= PI;
    }
    while d <= -FRAC_PI_2 {
        d += PI;
    }
    d
}
