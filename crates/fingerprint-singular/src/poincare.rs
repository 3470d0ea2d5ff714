//! Poincaré-index scanner.
//!
//! Candidates sit on a regular grid (`step` apart, at least `window_size`
//! from every edge). Around each foreground candidate the orientation field
//! is read along the border of a `(2·window_size + 1)` square, walked
//! clockwise on screen: top edge left to right, right edge downwards, bottom
//! edge right to left, left edge upwards. Each step's orientation change is
//! folded into `(-π/2, π/2]` and the changes are summed around the closed
//! path. The total is a multiple of π: about -180° around a core, +180°
//! around a delta, 0° in regular flow.

use fingerprint_core::{wrap_half_pi, Field, Mask};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::orientation::OrientationField;
use crate::rows::map_ordered;
use crate::types::{PixelCoords, SingularKind, SingularPoint};
use crate::{PathMaskPolicy, PoincareParams, SingularPointError};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Why a candidate did or did not produce a singular point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CandidateOutcome {
    Singular { kind: SingularKind },
    NotSingular,
    MaskedCenter,
    MaskedTopEdge,
    InsufficientPath { len: usize },
}

/// Evaluation record of one grid candidate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub coords: PixelCoords,
    /// Total turning in degrees, when the path was integrated.
    pub index_degrees: Option<f32>,
    pub outcome: CandidateOutcome,
}

impl CandidateRecord {
    /// The singular point this candidate produced, if any.
    pub fn singular_point(&self) -> Option<SingularPoint> {
        match (self.outcome, self.index_degrees) {
            (CandidateOutcome::Singular { kind }, Some(index)) => {
                Some(SingularPoint::new(kind, self.coords, index))
            }
            _ => None,
        }
    }
}

/// Scan an orientation field for singular points, in scan order.
pub fn scan_singular_points(
    field: &OrientationField,
    params: &PoincareParams,
) -> Result<Vec<SingularPoint>, SingularPointError> {
    Ok(scan_candidates(&field.orientation, &field.mask, params)?
        .iter()
        .filter_map(CandidateRecord::singular_point)
        .collect())
}

/// Scan and return the record of every grid candidate, rows top to bottom,
/// columns left to right.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(orientation, mask, params), fields(w = orientation.width(), h = orientation.height()))
)]
pub fn scan_candidates(
    orientation: &Field<f32>,
    mask: &Mask,
    params: &PoincareParams,
) -> Result<Vec<CandidateRecord>, SingularPointError> {
    params.validate()?;
    let (w, h) = orientation.dims();
    if w == 0 || h == 0 {
        return Err(fingerprint_core::InputError::EmptyImage {
            width: w,
            height: h,
        }
        .into());
    }
    orientation.ensure_same_shape(mask)?;

    let ws = params.window_size;
    let ys = grid_positions(h, ws, params.step);
    let xs = grid_positions(w, ws, params.step);

    let rows = map_ordered(&ys, |&y| {
        let mut path = Vec::with_capacity(8 * ws);
        xs.iter()
            .map(|&x| evaluate_candidate(orientation, mask, x, y, params, &mut path))
            .collect::<Vec<_>>()
    });
    let records: Vec<CandidateRecord> = rows.into_iter().flatten().collect();

    let found = records
        .iter()
        .filter(|r| matches!(r.outcome, CandidateOutcome::Singular { .. }))
        .count();
    debug!(
        "poincare scan: {} candidates, {} singular (step={}, window_size={})",
        records.len(),
        found,
        params.step,
        ws
    );

    Ok(records)
}

/// Candidate positions `ws, ws + step, ...` strictly below `len - ws`.
fn grid_positions(len: usize, ws: usize, step: usize) -> Vec<usize> {
    if len <= 2 * ws {
        return Vec::new();
    }
    (ws..len - ws).step_by(step).collect()
}

/// Border of the square of half-width `ws` around `(x, y)`, clockwise on
/// screen starting at the top-left corner. Every border pixel appears once.
///
/// Callers guarantee `ws <= x`, `ws <= y`.
pub fn loop_path(x: usize, y: usize, ws: usize) -> Vec<PixelCoords> {
    let mut path = Vec::with_capacity(8 * ws);
    push_loop_path(x, y, ws, &mut path);
    path
}

fn push_loop_path(x: usize, y: usize, ws: usize, out: &mut Vec<PixelCoords>) {
    let (x0, x1, y0, y1) = (x - ws, x + ws, y - ws, y + ws);
    out.extend((x0..=x1).map(|i| PixelCoords::new(i, y0)));
    out.extend((y0 + 1..=y1).map(|j| PixelCoords::new(x1, j)));
    out.extend((x0..x1).rev().map(|i| PixelCoords::new(i, y1)));
    out.extend((y0 + 1..y1).rev().map(|j| PixelCoords::new(x0, j)));
}

fn evaluate_candidate(
    orientation: &Field<f32>,
    mask: &Mask,
    x: usize,
    y: usize,
    params: &PoincareParams,
    path: &mut Vec<PixelCoords>,
) -> CandidateRecord {
    let coords = PixelCoords::new(x, y);
    let record = |index_degrees, outcome| CandidateRecord {
        coords,
        index_degrees,
        outcome,
    };

    if !mask.at(x, y) {
        return record(None, CandidateOutcome::MaskedCenter);
    }

    let ws = params.window_size;
    path.clear();
    push_loop_path(x, y, ws, path);

    let top_len = 2 * ws + 1;
    let is_fg = |p: &PixelCoords| mask.get(p.x as i64, p.y as i64).unwrap_or(false);
    match params.mask_policy {
        PathMaskPolicy::AbortOnTopEdge => {
            if !path[..top_len].iter().all(is_fg) {
                trace!("candidate ({x}, {y}): masked pixel on top edge");
                return record(None, CandidateOutcome::MaskedTopEdge);
            }
            path.retain(is_fg);
        }
        PathMaskPolicy::Truncate => {
            let keep = path.iter().position(|p| !is_fg(p)).unwrap_or(path.len());
            path.truncate(keep);
        }
        PathMaskPolicy::Omit => path.retain(is_fg),
    }

    if path.len() < params.min_path_len {
        trace!("candidate ({x}, {y}): path too short ({})", path.len());
        return record(None, CandidateOutcome::InsufficientPath { len: path.len() });
    }

    let index = poincare_index(orientation, path).to_degrees();
    match SingularKind::from_index(index, params.tolerance_degrees) {
        Some(kind) => {
            trace!("candidate ({x}, {y}): {} at {index:.1} deg", kind.as_str());
            record(Some(index), CandidateOutcome::Singular { kind })
        }
        None => record(Some(index), CandidateOutcome::NotSingular),
    }
}

/// Total orientation turning (radians) around a closed path.
///
/// Consecutive samples, including last to first, contribute their
/// difference folded into `(-π/2, π/2]`. Paths shorter than two points
/// have no turning.
pub fn poincare_index(orientation: &Field<f32>, path: &[PixelCoords]) -> f32 {
    let n = path.len();
    if n < 2 {
        return 0.0;
    }
    let theta = |p: &PixelCoords| orientation.at(p.x, p.y);
    (0..n)
        .map(|i| wrap_half_pi(theta(&path[(i + 1) % n]) - theta(&path[i])))
        .sum()
}
