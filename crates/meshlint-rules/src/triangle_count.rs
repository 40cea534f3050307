//! Rule checking LOD0 triangle counts against performance budgets.
//!
//! # Configuration
//!
//! - `BaseThreshold`: base triangle budget (default 50000)
//! - `WarningPercentage`: percent above base that triggers a warning
//!   (default 20.0)
//! - `ErrorPercentage`: percent above base that triggers an error
//!   (default 50.0)
//!
//! There is no fix action: automated mesh reduction damages UVs and
//! silhouettes, so dense meshes go back to the DCC tool.

use meshlint_core::{AnalysisResult, CheckRule, MeshAsset, Profile, Severity};
use tracing::debug;

/// Rule id for the triangle-count check.
pub const RULE_ID: &str = "SM_TriangleCount";

/// Checks whether LOD0 exceeds the configured triangle budget.
#[derive(Debug, Default)]
pub struct TriangleCountRule;

impl TriangleCountRule {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl CheckRule for TriangleCountRule {
    fn rule_id(&self) -> &'static str {
        RULE_ID
    }

    fn description(&self) -> &'static str {
        "Checks that LOD0 triangle counts stay within the performance budget"
    }

    fn check(&self, asset: &MeshAsset, profile: &Profile, out: &mut Vec<AnalysisResult>) -> bool {
        if !profile.is_rule_enabled(RULE_ID) {
            return false;
        }

        let triangles = asset.lod0_triangles();
        if triangles == 0 {
            debug!("'{}' has no LOD0 triangles, skipping budget check", asset.name);
            return false;
        }

        let base = profile.parameter_u32(RULE_ID, "BaseThreshold", 50_000);
        let warning_percent = profile.parameter_f32(RULE_ID, "WarningPercentage", 20.0);
        let error_percent = profile.parameter_f32(RULE_ID, "ErrorPercentage", 50.0);

        let warning_at = threshold_for(base, warning_percent);
        let error_at = threshold_for(base, error_percent);

        let severity = if triangles >= error_at {
            Severity::Error
        } else if triangles >= warning_at {
            Severity::Warning
        } else {
            return false;
        };

        let excess = 100.0 * (f64::from(triangles) - f64::from(base)) / f64::from(base);
        out.push(AnalysisResult::new(
            asset.asset_ref(),
            severity,
            RULE_ID,
            format!(
                "static mesh '{}' has {triangles} triangle(s) in LOD0, {excess:.1}% over the base budget of {base}; reduce in an external DCC tool to preserve UVs and silhouette",
                asset.name
            ),
        ));
        true
    }
}

fn threshold_for(base: u32, percent: f32) -> u32 {
    let extra = (f64::from(base) * f64::from(percent) / 100.0).round();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    {
        base.saturating_add(extra.max(0.0) as u32)
    }
}
