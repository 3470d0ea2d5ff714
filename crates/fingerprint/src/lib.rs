//! High-level facade crate for the `fingerprint-*` workspace.
//!
//! This crate provides:
//! - re-exports of the core grid types and the singular point detector
//! - (feature-gated) end-to-end helpers that decode an image with the
//!   `image` crate and run the detector on it or on a raw buffer.
//!
//! ## Quickstart
//!
//! ```no_run
//! use fingerprint::detect;
//! use fingerprint::singular::SingularPointParams;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let img = detect::load_gray("print.png")?;
//! let result = detect::detect_singular_points(&img, SingularPointParams::default())?;
//! println!("{} ({} points)", result.class, result.points.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `fingerprint::core`: image and grid types, border modes, angle helpers, logging.
//! - `fingerprint::singular`: orientation field, Poincaré scanner, merger, classifier.
//! - `fingerprint::detect` (feature `image`): helpers over `image::GrayImage`.

pub use fingerprint_core as core;
pub use fingerprint_singular as singular;

pub use fingerprint_singular::{
    PatternClass, SingularKind, SingularPoint, SingularPointDetector, SingularPointParams,
    SingularPointResult,
};

#[cfg(feature = "image")]
pub mod detect;
