//! Coarse pattern class from merged singular points.
//!
//! Whorl cores count as cores. The first matching row wins:
//!
//! | cores | deltas | condition          | class          |
//! |-------|--------|--------------------|----------------|
//! | ≥ 2   | ≥ 2    |                    | whorl          |
//! | 1     | 1      | core.x > delta.x   | right loop     |
//! | 1     | 1      | core.x ≤ delta.x   | left loop      |
//! | 1     | 0      |                    | tented arch    |
//! | 0     | 0      |                    | arch           |
//! | other |        |                    | unclassified   |

use serde::{Deserialize, Serialize};

use crate::types::{SingularKind, SingularPoint};

/// Coarse fingerprint pattern class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternClass {
    Whorl,
    RightLoop,
    LeftLoop,
    /// One core and no delta: tented arch, or a loop whose delta lies outside
    /// the captured area.
    TentedArch,
    Arch,
    Unclassified,
}

impl PatternClass {
    pub const fn label(self) -> &'static str {
        match self {
            PatternClass::Whorl => "Whorl",
            PatternClass::RightLoop => "Right Loop",
            PatternClass::LeftLoop => "Left Loop",
            PatternClass::TentedArch => "Tented Arch / incomplete Loop",
            PatternClass::Arch => "Arch",
            PatternClass::Unclassified => "Unclassified/Atypical",
        }
    }

    /// Polish label with the English name in parentheses.
    pub const fn bilingual_label(self) -> &'static str {
        match self {
            PatternClass::Whorl => "Wir (Whorl)",
            PatternClass::RightLoop => "Pętla Prawa (Right Loop)",
            PatternClass::LeftLoop => "Pętla Lewa (Left Loop)",
            PatternClass::TentedArch => "Namiotowy Łuk (Tented Arch) / Pętla (niekompletna)",
            PatternClass::Arch => "Łuk (Arch)",
            PatternClass::Unclassified => "Niesklasyfikowany / Nietypowy",
        }
    }
}

impl std::fmt::Display for PatternClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Map merged singular points to a pattern class.
///
/// For the single-core/single-delta case the core may be a plain core or a
/// whorl core; plain cores are preferred when both kinds are present.
pub fn classify_pattern(points: &[SingularPoint]) -> PatternClass {
    let num_cores = points.iter().filter(|p| p.kind().is_core_like()).count();
    let num_deltas = points
        .iter()
        .filter(|p| p.kind() == SingularKind::Delta)
        .count();

    match (num_cores, num_deltas) {
        (c, d) if c >= 2 && d >= 2 => PatternClass::Whorl,
        (1, 1) => {
            let core = points
                .iter()
                .find(|p| p.kind() == SingularKind::Core)
                .or_else(|| points.iter().find(|p| p.kind().is_core_like()));
            let delta = points.iter().find(|p| p.kind() == SingularKind::Delta);
            match (core, delta) {
                (Some(core), Some(delta)) if core.coords().x > delta.coords().x => {
                    PatternClass::RightLoop
                }
                (Some(_), Some(_)) => PatternClass::LeftLoop,
                _ => PatternClass::Unclassified,
            }
        }
        (1, 0) => PatternClass::TentedArch,
        (0, 0) => PatternClass::Arch,
        _ => PatternClass::Unclassified,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PixelCoords;

    fn pt(kind: SingularKind, x: usize, y: usize) -> SingularPoint {
        SingularPoint::new(kind, PixelCoords::new(x, y), kind.target_degrees())
    }

    fn core(x: usize) -> SingularPoint {
        pt(SingularKind::Core, x, 50)
    }

    fn delta(x: usize) -> SingularPoint {
        pt(SingularKind::Delta, x, 150)
    }

    #[test]
    fn decision_table_labels() {
        assert_eq!(
            classify_pattern(&[core(10), core(200), delta(40), delta(180)]).label(),
            "Whorl"
        );
        assert_eq!(classify_pattern(&[core(120), delta(60)]).label(), "Right Loop");
        assert_eq!(classify_pattern(&[core(60), delta(120)]).label(), "Left Loop");
        assert_eq!(classify_pattern(&[core(60), delta(60)]).label(), "Left Loop");
        assert_eq!(
            classify_pattern(&[core(60)]).label(),
            "Tented Arch / incomplete Loop"
        );
        assert_eq!(classify_pattern(&[]).label(), "Arch");
        assert_eq!(
            classify_pattern(&[core(1), core(2), core(3)]).label(),
            "Unclassified/Atypical"
        );
    }

    #[test]
    fn uncovered_counts_are_unclassified() {
        assert_eq!(classify_pattern(&[delta(5)]), PatternClass::Unclassified);
        assert_eq!(
            classify_pattern(&[core(5), core(9), delta(7)]),
            PatternClass::Unclassified
        );
        assert_eq!(
            classify_pattern(&[core(5), delta(7), delta(9)]),
            PatternClass::Unclassified
        );
    }

    #[test]
    fn whorl_cores_count_as_cores() {
        let w1 = pt(SingularKind::WhorlCore, 10, 10);
        let w2 = pt(SingularKind::WhorlCore, 90, 10);
        assert_eq!(
            classify_pattern(&[w1, w2, delta(20), delta(80)]),
            PatternClass::Whorl
        );
        assert_eq!(classify_pattern(&[w1]), PatternClass::TentedArch);
    }

    #[test]
    fn single_whorl_core_with_delta_is_compared_by_position() {
        let w = pt(SingularKind::WhorlCore, 150, 10);
        assert_eq!(classify_pattern(&[w, delta(20)]), PatternClass::RightLoop);
        assert_eq!(classify_pattern(&[delta(200), w]), PatternClass::LeftLoop);
    }

    #[test]
    fn display_and_serde_names() {
        assert_eq!(PatternClass::RightLoop.to_string(), "Right Loop");
        assert_eq!(PatternClass::Arch.bilingual_label(), "Łuk (Arch)");
        assert_eq!(
            serde_json::to_string(&PatternClass::TentedArch).expect("serialize"),
            "\"tented_arch\""
        );
    }
}
