use fingerprint_core::GrayImageView;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::classify::{classify_pattern, PatternClass};
use crate::merge::merge_nearby_points;
use crate::orientation::{orientation_field_from_image, OrientationField};
use crate::poincare::{scan_candidates, CandidateRecord};
use crate::types::SingularPoint;
use crate::{SingularPointError, SingularPointParams};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Output of one detector run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SingularPointResult {
    /// Scanner output before merging, in scan order.
    pub raw_points: Vec<SingularPoint>,
    /// Merged points, in first-accepted order.
    pub points: Vec<SingularPoint>,
    pub class: PatternClass,
    /// Fraction of pixels in the foreground mask.
    pub mask_coverage: f32,
}

/// Everything computed by [`SingularPointDetector::analyze`].
#[derive(Clone, Debug)]
pub struct SingularPointAnalysis {
    pub result: SingularPointResult,
    pub field: OrientationField,
    pub candidates: Vec<CandidateRecord>,
}

/// Image → orientation field → Poincaré scan → merge → pattern class.
#[derive(Clone, Debug)]
pub struct SingularPointDetector {
    params: SingularPointParams,
}

impl SingularPointDetector {
    pub fn new(params: SingularPointParams) -> Result<Self, SingularPointError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &SingularPointParams {
        &self.params
    }

    /// Run the full pipeline on a grayscale image.
    pub fn detect(&self, img: &GrayImageView<'_>) -> Result<SingularPointResult, SingularPointError> {
        Ok(self.analyze(img)?.result)
    }

    /// Run the full pipeline and keep the intermediate field and candidate records.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, img), fields(width = img.width, height = img.height))
    )]
    pub fn analyze(&self, img: &GrayImageView<'_>) -> Result<SingularPointAnalysis, SingularPointError> {
        let field = orientation_field_from_image(img, &self.params.orientation)?;
        let (result, candidates) = self.run_on_field(&field)?;
        Ok(SingularPointAnalysis {
            result,
            field,
            candidates,
        })
    }

    /// Run scan, merge and classification on a precomputed orientation field.
    pub fn detect_from_field(
        &self,
        field: &OrientationField,
    ) -> Result<SingularPointResult, SingularPointError> {
        Ok(self.run_on_field(field)?.0)
    }

    fn run_on_field(
        &self,
        field: &OrientationField,
    ) -> Result<(SingularPointResult, Vec<CandidateRecord>), SingularPointError> {
        let candidates = scan_candidates(&field.orientation, &field.mask, &self.params.poincare)?;
        let raw_points: Vec<SingularPoint> = candidates
            .iter()
            .filter_map(CandidateRecord::singular_point)
            .collect();
        let points = merge_nearby_points(&raw_points, &self.params.merge);
        let class = classify_pattern(&points);
        debug!(
            "classified as {} ({} raw, {} merged points)",
            class,
            raw_points.len(),
            points.len()
        );
        let result = SingularPointResult {
            raw_points,
            points,
            class,
            mask_coverage: field.mask.coverage(),
        };
        Ok((result, candidates))
    }
}
