//! Fingerprint ridge orientation field and singular point detection.
//!
//! Pipeline, leaves first:
//!
//! 1. [`gradient`]: Sobel derivatives `gx`, `gy`.
//! 2. [`orientation`]: box-summed structure tensor → ridge orientation in
//!    `[0, π)`, coherence, and a foreground mask.
//! 3. [`poincare`]: grid of candidates, each classified by the total
//!    orientation turning around a small square loop.
//! 4. [`merge`]: greedy suppression of nearby duplicate detections.
//! 5. [`classify`]: arch / tented arch / loop / whorl from the point counts.
//!
//! [`SingularPointDetector`] runs all stages with one [`SingularPointParams`].
//!
//! # Features
//!
//! - `rayon`: dense per-row stages and scanner rows run in parallel. Results
//!   are bit-identical to the serial build; the merger always runs serially.
//! - `tracing`: `tracing` spans on the stage entry points.
//!
//! ```
//! use fingerprint_core::GrayImage;
//! use fingerprint_singular::{PatternClass, SingularPointDetector, SingularPointParams};
//!
//! let img = GrayImage::from_fn(64, 64, |_, _| 128);
//! let detector = SingularPointDetector::new(SingularPointParams::default())?;
//! let result = detector.detect(&img.view())?;
//! assert_eq!(result.class, PatternClass::Arch);
//! # Ok::<(), fingerprint_singular::SingularPointError>(())
//! ```

pub mod box_filter;
pub mod classify;
pub mod gradient;
pub mod merge;
pub mod orientation;
pub mod poincare;

mod detector;
mod error;
mod params;
mod rows;
mod types;

pub use classify::{classify_pattern, PatternClass};
pub use detector::{SingularPointAnalysis, SingularPointDetector, SingularPointResult};
pub use error::SingularPointError;
pub use gradient::{sobel_gradients, GradientField};
pub use merge::merge_nearby_points;
pub use orientation::{
    build_orientation_field, orientation_field_from_image, OrientationField, OrientationSample,
};
pub use params::{
    MergeParams, OrientationParams, PathMaskPolicy, PoincareParams, SingularPointParams,
};
pub use poincare::{
    loop_path, poincare_index, scan_candidates, scan_singular_points, CandidateOutcome,
    CandidateRecord,
};
pub use types::{PixelCoords, SingularKind, SingularPoint};
