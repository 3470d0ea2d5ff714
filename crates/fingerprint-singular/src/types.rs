use serde::{Deserialize, Serialize};

/// Integer pixel location (column `x`, row `y`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelCoords {
    pub x: usize,
    pub y: usize,
}

impl PixelCoords {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in pixels.
    pub fn distance(&self, other: &PixelCoords) -> f32 {
        let dx = self.x as f64 - other.x as f64;
        let dy = self.y as f64 - other.y as f64;
        (dx * dx + dy * dy).sqrt() as f32
    }
}

/// Topological type of a singular point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SingularKind {
    Core,
    Delta,
    WhorlCore,
}

impl SingularKind {
    /// Total turning (degrees) that identifies this kind.
    pub const fn target_degrees(self) -> f32 {
        match self {
            SingularKind::Core => -180.0,
            SingularKind::Delta => 180.0,
            SingularKind::WhorlCore => 360.0,
        }
    }

    /// Label a Poincaré index, testing core, delta and whorl core in that order.
    ///
    /// A kind matches when the index lies strictly within `tolerance_degrees`
    /// of its target.
    pub fn from_index(index_degrees: f32, tolerance_degrees: f32) -> Option<Self> {
        [
            SingularKind::Core,
            SingularKind::Delta,
            SingularKind::WhorlCore,
        ]
        .into_iter()
        .find(|k| (index_degrees - k.target_degrees()).abs() < tolerance_degrees)
    }

    /// Counts towards the core tally of the pattern classifier.
    pub const fn is_core_like(self) -> bool {
        matches!(self, SingularKind::Core | SingularKind::WhorlCore)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            SingularKind::Core => "core",
            SingularKind::Delta => "delta",
            SingularKind::WhorlCore => "whorl_core",
        }
    }
}

/// Detected singular point: kind, location and Poincaré index in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SingularPoint {
    Core { coords: PixelCoords, index: f32 },
    Delta { coords: PixelCoords, index: f32 },
    WhorlCore { coords: PixelCoords, index: f32 },
}

impl SingularPoint {
    pub fn new(kind: SingularKind, coords: PixelCoords, index: f32) -> Self {
        match kind {
            SingularKind::Core => SingularPoint::Core { coords, index },
            SingularKind::Delta => SingularPoint::Delta { coords, index },
            SingularKind::WhorlCore => SingularPoint::WhorlCore { coords, index },
        }
    }

    pub fn kind(&self) -> SingularKind {
        match self {
            SingularPoint::Core { .. } => SingularKind::Core,
            SingularPoint::Delta { .. } => SingularKind::Delta,
            SingularPoint::WhorlCore { .. } => SingularKind::WhorlCore,
        }
    }

    pub fn coords(&self) -> PixelCoords {
        match *self {
            SingularPoint::Core { coords, .. }
            | SingularPoint::Delta { coords, .. }
            | SingularPoint::WhorlCore { coords, .. } => coords,
        }
    }

    /// Poincaré index in degrees.
    pub fn index(&self) -> f32 {
        match *self {
            SingularPoint::Core { index, .. }
            | SingularPoint::Delta { index, .. }
            | SingularPoint::WhorlCore { index, .. } => index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_labelling_uses_strict_tolerance() {
        assert_eq!(SingularKind::from_index(-180.0, 45.0), Some(SingularKind::Core));
        assert_eq!(SingularKind::from_index(-140.0, 45.0), Some(SingularKind::Core));
        assert_eq!(SingularKind::from_index(-135.0, 45.0), None);
        assert_eq!(SingularKind::from_index(170.0, 45.0), Some(SingularKind::Delta));
        assert_eq!(SingularKind::from_index(350.0, 45.0), Some(SingularKind::WhorlCore));
        assert_eq!(SingularKind::from_index(0.0, 45.0), None);
        assert_eq!(SingularKind::from_index(-360.0, 45.0), None);
        // Overlapping windows resolve to the first kind in test order.
        assert_eq!(SingularKind::from_index(270.0, 100.0), Some(SingularKind::Delta));
    }

    #[test]
    fn point_accessors_follow_variant() {
        let p = SingularPoint::new(SingularKind::WhorlCore, PixelCoords::new(3, 4), 358.0);
        assert_eq!(p.kind(), SingularKind::WhorlCore);
        assert_eq!(p.coords(), PixelCoords::new(3, 4));
        assert_eq!(p.index(), 358.0);
        assert!(p.kind().is_core_like());
        assert!(!SingularKind::Delta.is_core_like());
    }

    #[test]
    fn serializes_as_tagged_record() {
        let p = SingularPoint::new(SingularKind::Core, PixelCoords::new(10, 20), -180.0);
        let json = serde_json::to_value(p).expect("serialize");
        assert_eq!(json["type"], "core");
        assert_eq!(json["coords"]["x"], 10);
        assert_eq!(json["index"], -180.0);
    }

    #[test]
    fn distance_is_euclidean() {
        let a = PixelCoords::new(0, 0);
        let b = PixelCoords::new(3, 4);
        assert_eq!(a.distance(&b), 5.0);
        assert_eq!(b.distance(&a), 5.0);
    }
}
