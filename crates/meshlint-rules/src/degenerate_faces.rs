//! Rule checking for degenerate (zero-area) triangles.
//!
//! # Configuration
//!
//! - `WarningThreshold`: degenerate percent of LOD0 triggering a warning
//!   (default 1.0)
//! - `ErrorThreshold`: degenerate percent triggering an error (default 5.0)
//! - `AllowAutoFix`: permit removing degenerate triangles (default true)

use meshlint_core::{AnalysisResult, CheckRule, FixAction, FixError, MeshAsset, Profile, Severity};

/// Rule id for the degenerate-face check.
pub const RULE_ID: &str = "SM_DegenerateFaces";

/// Removal is only offered while degenerates are a small fraction of the
/// mesh; past this share the mesh needs manual repair.
const MAX_SAFE_REMOVAL_PERCENT: f32 = 25.0;

/// Checks the share of degenerate triangles in LOD0.
#[derive(Debug, Default)]
pub struct DegenerateFacesRule;

impl DegenerateFacesRule {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl CheckRule for DegenerateFacesRule {
    fn rule_id(&self) -> &'static str {
        RULE_ID
    }

    fn description(&self) -> &'static str {
        "Checks for zero-area triangles that cause rendering artifacts"
    }

    fn check(&self, asset: &MeshAsset, profile: &Profile, out: &mut Vec<AnalysisResult>) -> bool {
        if !profile.is_rule_enabled(RULE_ID) {
            return false;
        }

        let triangles = asset.lod0_triangles();
        if triangles == 0 || asset.degenerate_triangles == 0 {
            return false;
        }

        #[allow(clippy::cast_possible_truncation)]
        let percent =
            (100.0 * f64::from(asset.degenerate_triangles) / f64::from(triangles)) as f32;
        let warning_at = profile.parameter_f32(RULE_ID, "WarningThreshold", 1.0);
        let error_at = profile.parameter_f32(RULE_ID, "ErrorThreshold", 5.0);

        let severity = if percent >= error_at {
            Severity::Error
        } else if percent >= warning_at {
            Severity::Warning
        } else {
            return false;
        };

        let mut result = AnalysisResult::new(
            asset.asset_ref(),
            severity,
            RULE_ID,
            format!(
                "static mesh '{}' has {} degenerate triangle(s) ({percent:.2}% of LOD0)",
                asset.name, asset.degenerate_triangles
            ),
        );

        let allow_fix = profile.parameter_bool(RULE_ID, "AllowAutoFix", true);
        if allow_fix && percent <= MAX_SAFE_REMOVAL_PERCENT {
            let source = asset.source.clone();
            result = result.with_fix(FixAction::new(
                format!("remove {} degenerate triangle(s)", asset.degenerate_triangles),
                move || remove_degenerates(&source),
            ));
        }

        out.push(result);
        true
    }
}

fn remove_degenerates(source: &std::path::Path) -> Result<(), FixError> {
    let mut asset = MeshAsset::load(source).map_err(|e| FixError::Stale(e.to_string()))?;
    let removed = asset.degenerate_triangles;
    if let Some(lod0) = asset.lods.first_mut() {
        lod0.triangles = lod0.triangles.saturating_sub(removed);
    }
    asset.degenerate_triangles = 0;
    asset.save()
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshlint_core::{LodInfo, RuleConfig};

    fn enabled_profile(allow_fix: bool) -> Profile {
        let mut profile = Profile::default_profile();
        profile.set_rule_config(
            RuleConfig::new(RULE_ID, true)
                .with_param("WarningThreshold", "1.0")
                .with_param("ErrorThreshold", "5.0")
                .with_param("AllowAutoFix", allow_fix.to_string()),
        );
        profile
    }

    fn mesh(triangles: u32, degenerate: u32) -> MeshAsset {
        MeshAsset {
            name: "SM_Test".to_string(),
            lods: vec![LodInfo { triangles, vertices: 0 }],
            degenerate_triangles: degenerate,
            ..MeshAsset::default()
        }
    }

    #[test]
    fn clean_mesh_passes() {
        let mut out = Vec::new();
        assert!(!DegenerateFacesRule::new().check(&mesh(1000, 0), &enabled_profile(true), &mut out));
    }

    #[test]
    fn below_warning_share_passes() {
        let mut out = Vec::new();
        // 0.5% of 1000 triangles.
        assert!(!DegenerateFacesRule::new().check(&mesh(1000, 5), &enabled_profile(true), &mut out));
    }

    #[test]
    fn warning_share_warns_with_fix() {
        let mut out = Vec::new();
        // 2% degenerate.
        assert!(DegenerateFacesRule::new().check(&mesh(1000, 20), &enabled_profile(true), &mut out));
        assert_eq!(out[0].severity, Severity::Warning);
        assert!(out[0].has_fix());
    }

    #[test]
    fn error_share_errors() {
        let mut out = Vec::new();
        DegenerateFacesRule::new().check(&mesh(1000, 80), &enabled_profile(true), &mut out);
        assert_eq!(out[0].severity, Severity::Error);
    }

    #[test]
    fn fix_withheld_past_safety_ceiling() {
        let mut out = Vec::new();
        // 40% degenerate: finding fires, fix is withheld.
        DegenerateFacesRule::new().check(&mesh(1000, 400), &enabled_profile(true), &mut out);
        assert_eq!(out.len(), 1);
        assert!(!out[0].has_fix());
    }

    #[test]
    fn fix_withheld_when_disallowed_by_profile() {
        let mut out = Vec::new();
        DegenerateFacesRule::new().check(&mesh(1000, 20), &enabled_profile(false), &mut out);
        assert!(!out[0].has_fix());
    }

    #[test]
    fn fix_zeroes_degenerates_on_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("SM_Test.mesh.json");
        std::fs::write(
            &path,
            r#"{ "name": "SM_Test", "lods": [{ "triangles": 1000 }], "degenerate_triangles": 20 }"#,
        )
        .expect("write");

        let asset = MeshAsset::load(&path).expect("load");
        let mut out = Vec::new();
        DegenerateFacesRule::new().check(&asset, &enabled_profile(true), &mut out);
        out[0].take_fix().expect("fix").apply().expect("apply");

        let fixed = MeshAsset::load(&path).expect("reload");
        assert_eq!(fixed.degenerate_triangles, 0);
        assert_eq!(fixed.lod0_triangles(), 980);
    }
}
