use fingerprint_core::BorderMode;
use serde::{Deserialize, Serialize};

use crate::SingularPointError;

/// Parameters of the orientation field builder.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrientationParams {
    /// Side of the box used to sum gradient magnitude for the foreground mask.
    pub mask_window: usize,
    /// A pixel is foreground when its magnitude sum exceeds this fraction of
    /// the global maximum.
    pub mask_threshold_frac: f32,
    /// Side of the box used to sum the structure tensor terms.
    pub tensor_window: usize,
    /// Border policy shared by the Sobel operator and the box sums.
    pub border: BorderMode,
}

impl Default for OrientationParams {
    fn default() -> Self {
        Self {
            mask_window: 25,
            mask_threshold_frac: 0.2,
            tensor_window: 23,
            border: BorderMode::Reflect101,
        }
    }
}

impl OrientationParams {
    pub fn validate(&self) -> Result<(), SingularPointError> {
        if self.mask_window == 0 || self.tensor_window == 0 {
            return Err(invalid(format!(
                "box windows must be non-zero (mask_window={}, tensor_window={})",
                self.mask_window, self.tensor_window
            )));
        }
        if !(0.0..=1.0).contains(&self.mask_threshold_frac) {
            return Err(invalid(format!(
                "mask_threshold_frac must lie in [0, 1], got {}",
                self.mask_threshold_frac
            )));
        }
        Ok(())
    }
}

/// What the scanner does with masked-out pixels on a candidate loop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathMaskPolicy {
    /// Reject the candidate when any top-edge pixel is masked out; omit
    /// masked-out pixels on the other three edges.
    #[default]
    AbortOnTopEdge,
    /// Keep only the path prefix before the first masked-out pixel.
    Truncate,
    /// Omit every masked-out pixel and never reject.
    Omit,
}

/// Parameters of the Poincaré scanner.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoincareParams {
    /// Stride of the candidate grid, in pixels.
    pub step: usize,
    /// Half-width of the square loop integrated around each candidate.
    pub window_size: usize,
    /// Slack around -180/+180/+360 degrees when labelling a candidate.
    pub tolerance_degrees: f32,
    /// Candidates whose surviving path is shorter than this are skipped.
    pub min_path_len: usize,
    pub mask_policy: PathMaskPolicy,
}

impl Default for PoincareParams {
    fn default() -> Self {
        Self {
            step: 10,
            window_size: 6,
            tolerance_degrees: 45.0,
            min_path_len: 8,
            mask_policy: PathMaskPolicy::AbortOnTopEdge,
        }
    }
}

impl PoincareParams {
    /// Sparser grid with a tighter loop (`step = 16`, `window_size = 3`).
    pub fn coarse() -> Self {
        Self {
            step: 16,
            window_size: 3,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), SingularPointError> {
        if self.step == 0 {
            return Err(invalid("step must be non-zero".to_string()));
        }
        if self.window_size == 0 {
            return Err(invalid("window_size must be non-zero".to_string()));
        }
        if !self.tolerance_degrees.is_finite() || self.tolerance_degrees <= 0.0 {
            return Err(invalid(format!(
                "tolerance_degrees must be positive, got {}",
                self.tolerance_degrees
            )));
        }
        Ok(())
    }
}

/// Parameters of the greedy duplicate merger.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeParams {
    /// Points at or below this distance (pixels) from an accepted point are
    /// dropped as duplicates.
    pub distance_threshold: f32,
}

impl Default for MergeParams {
    fn default() -> Self {
        Self {
            distance_threshold: 50.0,
        }
    }
}

impl MergeParams {
    /// Wider merge radius (80 px) for high-resolution scans.
    pub fn wide() -> Self {
        Self {
            distance_threshold: 80.0,
        }
    }

    pub fn validate(&self) -> Result<(), SingularPointError> {
        if !self.distance_threshold.is_finite() || self.distance_threshold < 0.0 {
            return Err(invalid(format!(
                "distance_threshold must be a non-negative number, got {}",
                self.distance_threshold
            )));
        }
        Ok(())
    }
}

/// Full pipeline configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SingularPointParams {
    pub orientation: OrientationParams,
    pub poincare: PoincareParams,
    pub merge: MergeParams,
}

impl SingularPointParams {
    pub fn validate(&self) -> Result<(), SingularPointError> {
        self.orientation.validate()?;
        self.poincare.validate()?;
        self.merge.validate()
    }
}

fn invalid(msg: String) -> SingularPointError {
    SingularPointError::InvalidParams(msg)
}
