//! Greedy single-pass duplicate suppression.
//!
//! Points are visited in input order. A point is kept only if it lies
//! farther than the threshold from every point kept so far; kind is not
//! compared. The result depends on input order and is not a globally
//! optimal clustering. Kept points are never revisited, so this stage must
//! run sequentially.

use log::debug;

use crate::types::SingularPoint;
use crate::MergeParams;

/// Drop points within `params.distance_threshold` of an earlier kept point.
pub fn merge_nearby_points(points: &[SingularPoint], params: &MergeParams) -> Vec<SingularPoint> {
    let mut merged: Vec<SingularPoint> = Vec::with_capacity(points.len());
    for p in points {
        let duplicate = merged
            .iter()
            .any(|kept| kept.coords().distance(&p.coords()) <= params.distance_threshold);
        if !duplicate {
            merged.push(*p);
        }
    }
    debug!(
        "merge: {} -> {} points (threshold {:.1}px)",
        points.len(),
        merged.len(),
        params.distance_threshold
    );
    merged
}
