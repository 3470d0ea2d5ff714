//! Core types and utilities for fingerprint orientation analysis.
//!
//! This crate is intentionally small. It holds the grid containers shared by
//! the analysis stages, border policies, mod-π angle arithmetic and the
//! logging setup. It does *not* implement any stage of the pipeline.

mod angle;
mod border;
mod error;
mod image;
mod logger;

pub use angle::{wrap_angle_pi, wrap_half_pi};
pub use border::{map_index, BorderMode};
pub use error::InputError;
pub use image::{Field, GrayImage, GrayImageView, Mask};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
