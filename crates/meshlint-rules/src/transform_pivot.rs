//! Rule checking pivot placement.
//!
//! # Configuration
//!
//! - `Severity`: severity floor for the finding (default warning)
//! - `WarningDistance` / `ErrorDistance`: pivot offset distances triggering
//!   a warning / error (defaults 50.0 / 200.0)
//!
//! There is no fix action: pivots are moved in the DCC tool, where the
//! artist can see what the change does to placement workflows.

use meshlint_core::{AnalysisResult, CheckRule, MeshAsset, Profile, Severity};

/// Rule id for the transform-pivot check.
pub const RULE_ID: &str = "SM_TransformPivot";

/// Checks how far the pivot sits from the mesh bounds origin.
#[derive(Debug, Default)]
pub struct TransformPivotRule;

impl TransformPivotRule {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl CheckRule for TransformPivotRule {
    fn rule_id(&self) -> &'static str {
        RULE_ID
    }

    fn description(&self) -> &'static str {
        "Checks for pivots placed far away from the mesh origin"
    }

    fn check(&self, asset: &MeshAsset, profile: &Profile, out: &mut Vec<AnalysisResult>) -> bool {
        if !profile.is_rule_enabled(RULE_ID) {
            return false;
        }

        let warning_at = profile.parameter_f32(RULE_ID, "WarningDistance", 50.0);
        let error_at = profile.parameter_f32(RULE_ID, "ErrorDistance", 200.0);

        let [x, y, z] = asset.pivot_offset;
        let distance = (x * x + y * y + z * z).sqrt();

        let severity = if distance >= error_at {
            Severity::Error
        } else if distance >= warning_at {
            Severity::Warning
        } else {
            return false;
        };

        out.push(AnalysisResult::new(
            asset.asset_ref(),
            severity,
            RULE_ID,
            format!(
                "static mesh '{}' has its pivot {distance:.1} unit(s) from the origin (warning at {warning_at:.0}, error at {error_at:.0})",
                asset.name
            ),
        ));
        true
    }
}
