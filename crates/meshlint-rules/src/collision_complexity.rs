//! Rule checking collision setups for excessive complexity.
//!
//! # Configuration
//!
//! - `WarningThreshold` / `ErrorThreshold`: primitive counts triggering a
//!   warning / error (defaults 15 / 25)
//! - `TreatUseComplexAsSimpleAsError`: flag complex-as-simple collision as
//!   an error (default true)
//! - `AllowAutoFix`: permit truncating the primitive list (default true)

use meshlint_core::{AnalysisResult, CheckRule, FixAction, FixError, MeshAsset, Profile, Severity};

/// Rule id for the collision-complexity check.
pub const RULE_ID: &str = "SM_CollisionComplexity";

/// Checks primitive counts and the complex-as-simple flag.
///
/// Both sub-checks aggregate into one worst-severity finding per asset.
#[derive(Debug, Default)]
pub struct CollisionComplexityRule;

impl CollisionComplexityRule {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl CheckRule for CollisionComplexityRule {
    fn rule_id(&self) -> &'static str {
        RULE_ID
    }

    fn description(&self) -> &'static str {
        "Checks for collision setups that are too expensive to simulate"
    }

    fn check(&self, asset: &MeshAsset, profile: &Profile, out: &mut Vec<AnalysisResult>) -> bool {
        if !profile.is_rule_enabled(RULE_ID) {
            return false;
        }

        let warning_at = profile.parameter_u32(RULE_ID, "WarningThreshold", 15) as usize;
        let error_at = profile.parameter_u32(RULE_ID, "ErrorThreshold", 25) as usize;
        let complex_is_error =
            profile.parameter_bool(RULE_ID, "TreatUseComplexAsSimpleAsError", true);

        let mut worst = None;
        let mut details = Vec::new();
        let primitives = asset.collision.primitives.len();

        if primitives >= error_at {
            worst = worst.max(Some(Severity::Error));
            details.push(format!("{primitives} collision primitive(s)"));
        } else if primitives >= warning_at {
            worst = worst.max(Some(Severity::Warning));
            details.push(format!("{primitives} collision primitive(s)"));
        }

        if asset.collision.use_complex_as_simple {
            let severity = if complex_is_error {
                Severity::Error
            } else {
                Severity::Warning
            };
            worst = worst.max(Some(severity));
            details.push("render mesh is used as collision (complex-as-simple)".to_string());
        }

        let Some(severity) = worst else {
            return false;
        };

        let mut result = AnalysisResult::new(
            asset.asset_ref(),
            severity,
            RULE_ID,
            format!(
                "static mesh '{}' has overly complex collision: {}",
                asset.name,
                details.join(", ")
            ),
        );

        let allow_fix = profile.parameter_bool(RULE_ID, "AllowAutoFix", true);
        // Truncation only helps when the primitive count itself is the
        // problem; complex-as-simple needs authored collision instead.
        if allow_fix && primitives >= warning_at && !asset.collision.use_complex_as_simple {
            let source = asset.source.clone();
            let keep = warning_at.saturating_sub(1).max(1);
            result = result.with_fix(FixAction::new(
                format!("simplify collision to {keep} primitive(s)"),
                move || truncate_primitives(&source, keep),
            ));
        }

        out.push(result);
        true
    }
}

fn truncate_primitives(source: &std::path::Path, keep: usize) -> Result<(), FixError> {
    let mut asset = MeshAsset::load(source).map_err(|e| FixError::Stale(e.to_string()))?;
    asset.collision.primitives.truncate(keep);
    asset.save()
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshlint_core::{CollisionInfo, CollisionPrimitive, RuleConfig};

    fn enabled_profile() -> Profile {
        let mut profile = Profile::default_profile();
        profile.set_rule_config(
            RuleConfig::new(RULE_ID, true)
                .with_param("WarningThreshold", "15")
                .with_param("ErrorThreshold", "25")
                .with_param("TreatUseComplexAsSimpleAsError", "true")
                .with_param("AllowAutoFix", "true"),
        );
        profile
    }

    fn mesh_with_primitives(count: usize, complex_as_simple: bool) -> MeshAsset {
        MeshAsset {
            name: "SM_Test".to_string(),
            collision: CollisionInfo {
                primitives: (0..count)
                    .map(|_| CollisionPrimitive { kind: "convex".to_string() })
                    .collect(),
                use_complex_as_simple: complex_as_simple,
            },
            ..MeshAsset::default()
        }
    }

    #[test]
    fn modest_collision_passes() {
        let mut out = Vec::new();
        assert!(!CollisionComplexityRule::new().check(
            &mesh_with_primitives(5, false),
            &enabled_profile(),
            &mut out
        ));
    }

    #[test]
    fn many_primitives_warn_with_simplify_fix() {
        let mut out = Vec::new();
        assert!(CollisionComplexityRule::new().check(
            &mesh_with_primitives(18, false),
            &enabled_profile(),
            &mut out
        ));
        assert_eq!(out[0].severity, Severity::Warning);
        assert!(out[0].has_fix());
    }

    #[test]
    fn excessive_primitives_error() {
        let mut out = Vec::new();
        CollisionComplexityRule::new().check(
            &mesh_with_primitives(30, false),
            &enabled_profile(),
            &mut out,
        );
        assert_eq!(out[0].severity, Severity::Error);
    }

    #[test]
    fn complex_as_simple_is_an_error_without_fix() {
        let mut out = Vec::new();
        CollisionComplexityRule::new().check(
            &mesh_with_primitives(0, true),
            &enabled_profile(),
            &mut out,
        );
        assert_eq!(out[0].severity, Severity::Error);
        assert!(!out[0].has_fix());
    }

    #[test]
    fn both_conditions_aggregate_into_one_finding() {
        let mut out = Vec::new();
        CollisionComplexityRule::new().check(
            &mesh_with_primitives(18, true),
            &enabled_profile(),
            &mut out,
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].severity, Severity::Error);
        assert!(out[0].description.contains("primitive(s)"));
        assert!(out[0].description.contains("complex-as-simple"));
    }

    #[test]
    fn fix_truncates_primitives_on_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("SM_Test.mesh.json");
        let primitives: Vec<String> = (0..20).map(|_| r#"{ "kind": "convex" }"#.to_string()).collect();
        std::fs::write(
            &path,
            format!(
                r#"{{ "name": "SM_Test", "collision": {{ "primitives": [{}] }} }}"#,
                primitives.join(", ")
            ),
        )
        .expect("write");

        let asset = MeshAsset::load(&path).expect("load");
        let mut out = Vec::new();
        CollisionComplexityRule::new().check(&asset, &enabled_profile(), &mut out);
        out[0].take_fix().expect("fix").apply().expect("apply");

        let fixed = MeshAsset::load(&path).expect("reload");
        assert_eq!(fixed.collision.primitives.len(), 14);
    }

    #[test]
    fn disabled_rule_stays_silent() {
        let mut profile = Profile::default_profile();
        profile.set_rule_config(RuleConfig::new(RULE_ID, false));
        let mut out = Vec::new();
        assert!(!CollisionComplexityRule::new().check(
            &mesh_with_primitives(50, true),
            &profile,
            &mut out
        ));
    }
}
