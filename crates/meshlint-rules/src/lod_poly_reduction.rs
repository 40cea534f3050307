//! Rule checking triangle reduction between consecutive LOD levels.
//!
//! # Configuration
//!
//! - `WarningThreshold`: reduction percent below which a warning fires
//!   (default 20.0)
//! - `ErrorThreshold`: reduction percent below which an error fires
//!   (default 10.0)

use meshlint_core::{AnalysisResult, CheckRule, MeshAsset, Profile, Severity};

/// Rule id for the LOD polygon-reduction check.
pub const RULE_ID: &str = "SM_LODPolyReduction";

/// Checks that each LOD step actually reduces triangle count.
///
/// A LOD chain where LOD2 is nearly as dense as LOD1 costs memory without
/// buying render time. Several weak steps in one chain are aggregated into a
/// single worst-severity finding.
#[derive(Debug, Default)]
pub struct LodPolyReductionRule;

impl LodPolyReductionRule {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl CheckRule for LodPolyReductionRule {
    fn rule_id(&self) -> &'static str {
        RULE_ID
    }

    fn description(&self) -> &'static str {
        "Checks that consecutive LOD levels reduce polygon count sufficiently"
    }

    fn check(&self, asset: &MeshAsset, profile: &Profile, out: &mut Vec<AnalysisResult>) -> bool {
        if !profile.is_rule_enabled(RULE_ID) || asset.lods.len() < 2 {
            return false;
        }

        let warning_below = profile.parameter_f32(RULE_ID, "WarningThreshold", 20.0);
        let error_below = profile.parameter_f32(RULE_ID, "ErrorThreshold", 10.0);

        let mut worst = None;
        let mut details = Vec::new();

        for (index, pair) in asset.lods.windows(2).enumerate() {
            let prev = pair[0].triangles;
            let next = pair[1].triangles;
            if prev == 0 {
                continue;
            }
            let reduction = 100.0 * (f64::from(prev) - f64::from(next)) / f64::from(prev);
            #[allow(clippy::cast_possible_truncation)]
            let reduction = reduction as f32;

            let severity = if reduction < error_below {
                Severity::Error
            } else if reduction < warning_below {
                Severity::Warning
            } else {
                continue;
            };

            worst = worst.max(Some(severity));
            details.push(format!(
                "LOD{}->LOD{} reduces by {reduction:.1}%",
                index,
                index + 1
            ));
        }

        let Some(severity) = worst else {
            return false;
        };

        out.push(AnalysisResult::new(
            asset.asset_ref(),
            severity,
            RULE_ID,
            format!(
                "static mesh '{}' has insufficient LOD reduction: {} (warning below {warning_below:.1}%, error below {error_below:.1}%)",
                asset.name,
                details.join(", ")
            ),
        ));
        true
    }
}
