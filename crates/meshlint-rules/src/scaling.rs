//! Rule checking import scale for non-uniform and zero components.
//!
//! # Configuration
//!
//! - `WarningRatio`: max/min scale component ratio triggering a warning
//!   (default 2.0)
//! - `ZeroScaleThreshold`: components below this magnitude count as zero
//!   (default 0.01)
//! - `ZeroScaleSeverity`: severity of the zero-scale sub-check
//!   (default error)

use meshlint_core::{AnalysisResult, CheckRule, MeshAsset, Profile, Severity};

/// Rule id for the scaling check.
pub const RULE_ID: &str = "SM_Scaling";

/// Checks the import scale. Non-uniform and zero-scale sub-checks aggregate
/// into one worst-severity finding.
#[derive(Debug, Default)]
pub struct ScalingRule;

impl ScalingRule {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl CheckRule for ScalingRule {
    fn rule_id(&self) -> &'static str {
        RULE_ID
    }

    fn description(&self) -> &'static str {
        "Checks for non-uniform or zero import scale"
    }

    fn check(&self, asset: &MeshAsset, profile: &Profile, out: &mut Vec<AnalysisResult>) -> bool {
        if !profile.is_rule_enabled(RULE_ID) {
            return false;
        }

        let warning_ratio = profile.parameter_f32(RULE_ID, "WarningRatio", 2.0);
        let zero_threshold = profile.parameter_f32(RULE_ID, "ZeroScaleThreshold", 0.01);
        let zero_severity =
            profile.parameter_severity(RULE_ID, "ZeroScaleSeverity", Severity::Error);

        let mut worst = None;
        let mut details = Vec::new();

        let magnitudes: Vec<f32> = asset.scale.iter().map(|c| c.abs()).collect();
        let zeroes: Vec<usize> = magnitudes
            .iter()
            .enumerate()
            .filter(|(_, &m)| m < zero_threshold)
            .map(|(axis, _)| axis)
            .collect();

        if zeroes.is_empty() {
            let max = magnitudes.iter().fold(f32::MIN, |a, &b| a.max(b));
            let min = magnitudes.iter().fold(f32::MAX, |a, &b| a.min(b));
            if min > 0.0 && max / min >= warning_ratio {
                worst = worst.max(Some(Severity::Warning));
                details.push(format!(
                    "non-uniform scale [{:.2}, {:.2}, {:.2}] (ratio {:.1})",
                    asset.scale[0],
                    asset.scale[1],
                    asset.scale[2],
                    max / min
                ));
            }
        } else {
            worst = worst.max(Some(zero_severity));
            let axes: Vec<&str> = zeroes.iter().map(|&axis| ["x", "y", "z"][axis]).collect();
            details.push(format!("zero scale on axis {}", axes.join(", ")));
        }

        let Some(severity) = worst else {
            return false;
        };

        out.push(AnalysisResult::new(
            asset.asset_ref(),
            severity,
            RULE_ID,
            format!(
                "static mesh '{}' has scaling issues: {}",
                asset.name,
                details.join("; ")
            ),
        ));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshlint_core::RuleConfig;

    fn enabled_profile() -> Profile {
        let mut profile = Profile::default_profile();
        profile.set_rule_config(
            RuleConfig::new(RULE_ID, true)
                .with_param("WarningRatio", "2.0")
                .with_param("ZeroScaleThreshold", "0.01")
                .with_param("ZeroScaleSeverity", "error"),
        );
        profile
    }

    fn mesh_with_scale(scale: [f32; 3]) -> MeshAsset {
        MeshAsset {
            name: "SM_Test".to_string(),
            scale,
            ..MeshAsset::default()
        }
    }

    #[test]
    fn uniform_scale_passes() {
        let mut out = Vec::new();
        assert!(!ScalingRule::new().check(
            &mesh_with_scale([1.0, 1.0, 1.0]),
            &enabled_profile(),
            &mut out
        ));
    }

    #[test]
    fn mildly_non_uniform_scale_passes() {
        let mut out = Vec::new();
        assert!(!ScalingRule::new().check(
            &mesh_with_scale([1.0, 1.5, 1.0]),
            &enabled_profile(),
            &mut out
        ));
    }

    #[test]
    fn strongly_non_uniform_scale_warns() {
        let mut out = Vec::new();
        assert!(ScalingRule::new().check(
            &mesh_with_scale([1.0, 3.0, 1.0]),
            &enabled_profile(),
            &mut out
        ));
        assert_eq!(out[0].severity, Severity::Warning);
        assert!(out[0].description.contains("non-uniform"));
    }

    #[test]
    fn zero_scale_component_uses_configured_severity() {
        let mut out = Vec::new();
        ScalingRule::new().check(
            &mesh_with_scale([1.0, 0.0, 1.0]),
            &enabled_profile(),
            &mut out,
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].severity, Severity::Error);
        assert!(out[0].description.contains("axis y"));
    }

    #[test]
    fn negative_scale_uses_magnitude() {
        let mut out = Vec::new();
        assert!(!ScalingRule::new().check(
            &mesh_with_scale([-1.0, 1.0, 1.0]),
            &enabled_profile(),
            &mut out
        ));
    }

    #[test]
    fn disabled_rule_stays_silent() {
        let mut profile = Profile::default_profile();
        profile.set_rule_config(RuleConfig::new(RULE_ID, false));
        let mut out = Vec::new();
        assert!(!ScalingRule::new().check(
            &mesh_with_scale([0.0, 0.0, 0.0]),
            &profile,
            &mut out
        ));
    }
}
