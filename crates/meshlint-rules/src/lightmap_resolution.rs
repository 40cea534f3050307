//! Rule checking lightmap resolution bounds.
//!
//! # Configuration
//!
//! - `Severity`: finding severity (default warning)
//! - `MinResolution` / `MaxResolution`: allowed range for the resolution
//!   exponent; a value of 4 means 16x16 texels (defaults 4 / 16)
//! - `AllowAutoFix`: permit clamping the resolution into range
//!   (default true)

use meshlint_core::{AnalysisResult, CheckRule, FixAction, FixError, MeshAsset, Profile, Severity};

/// Rule id for the lightmap-resolution check.
pub const RULE_ID: &str = "SM_LightmapResolution";

/// Checks that the lightmap resolution exponent sits inside the configured
/// range: too low bakes blotchy shadows, too high wastes lightmap atlas
/// space.
#[derive(Debug, Default)]
pub struct LightmapResolutionRule;

impl LightmapResolutionRule {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl CheckRule for LightmapResolutionRule {
    fn rule_id(&self) -> &'static str {
        RULE_ID
    }

    fn description(&self) -> &'static str {
        "Checks that lightmap resolutions stay within the configured range"
    }

    fn check(&self, asset: &MeshAsset, profile: &Profile, out: &mut Vec<AnalysisResult>) -> bool {
        if !profile.is_rule_enabled(RULE_ID) {
            return false;
        }

        // Resolution only matters for meshes that participate in baking.
        if asset.uv.lightmap_channel.is_none() && !asset.uv.generate_lightmap_uvs {
            return false;
        }

        let min = profile.parameter_u32(RULE_ID, "MinResolution", 4);
        let max = profile.parameter_u32(RULE_ID, "MaxResolution", 16);
        let resolution = asset.uv.lightmap_resolution;

        let problem = if resolution < min {
            format!(
                "lightmap resolution 2^{resolution} is below the minimum 2^{min}; baked lighting will be blotchy"
            )
        } else if resolution > max {
            format!(
                "lightmap resolution 2^{resolution} exceeds the maximum 2^{max}; atlas space is wasted"
            )
        } else {
            return false;
        };

        let severity = profile.parameter_severity(RULE_ID, "Severity", Severity::Warning);
        let mut result = AnalysisResult::new(
            asset.asset_ref(),
            severity,
            RULE_ID,
            format!("static mesh '{}': {problem}", asset.name),
        );

        if profile.parameter_bool(RULE_ID, "AllowAutoFix", true) {
            let source = asset.source.clone();
            let clamped = resolution.clamp(min, max);
            result = result.with_fix(FixAction::new(
                format!("set lightmap resolution to 2^{clamped}"),
                move || set_resolution(&source, clamped),
            ));
        }

        out.push(result);
        true
    }
}

fn set_resolution(source: &std::path::Path, resolution: u32) -> Result<(), FixError> {
    let mut asset = MeshAsset::load(source).map_err(|e| FixError::Stale(e.to_string()))?;
    asset.uv.lightmap_resolution = resolution;
    asset.save()
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshlint_core::{RuleConfig, UvInfo};

    fn enabled_profile(allow_fix: bool) -> Profile {
        let mut profile = Profile::default_profile();
        profile.set_rule_config(
            RuleConfig::new(RULE_ID, true)
                .with_param("MinResolution", "4")
                .with_param("MaxResolution", "16")
                .with_param("AllowAutoFix", allow_fix.to_string()),
        );
        profile
    }

    fn baked_mesh(resolution: u32) -> MeshAsset {
        MeshAsset {
            name: "SM_Test".to_string(),
            uv: UvInfo {
                lightmap_channel: Some(1),
                lightmap_resolution: resolution,
                ..UvInfo::default()
            },
            ..MeshAsset::default()
        }
    }

    #[test]
    fn in_range_resolution_passes() {
        let mut out = Vec::new();
        assert!(!LightmapResolutionRule::new().check(
            &baked_mesh(8),
            &enabled_profile(true),
            &mut out
        ));
    }

    #[test]
    fn unbaked_mesh_is_out_of_scope() {
        let mut out = Vec::new();
        let mesh = MeshAsset {
            name: "SM_Test".to_string(),
            ..MeshAsset::default()
        };
        assert!(!LightmapResolutionRule::new().check(&mesh, &enabled_profile(true), &mut out));
    }

    #[test]
    fn low_resolution_fires_with_clamp_fix() {
        let mut out = Vec::new();
        assert!(LightmapResolutionRule::new().check(
            &baked_mesh(2),
            &enabled_profile(true),
            &mut out
        ));
        assert!(out[0].description.contains("below the minimum"));
        assert_eq!(out[0].fix_label(), Some("set lightmap resolution to 2^4"));
    }

    #[test]
    fn high_resolution_fires() {
        let mut out = Vec::new();
        LightmapResolutionRule::new().check(&baked_mesh(20), &enabled_profile(true), &mut out);
        assert!(out[0].description.contains("exceeds the maximum"));
    }

    #[test]
    fn fix_withheld_when_disallowed() {
        let mut out = Vec::new();
        LightmapResolutionRule::new().check(&baked_mesh(2), &enabled_profile(false), &mut out);
        assert!(!out[0].has_fix());
    }

    #[test]
    fn fix_clamps_resolution_on_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("SM_Test.mesh.json");
        std::fs::write(
            &path,
            r#"{ "name": "SM_Test", "uv": { "lightmap_channel": 1, "lightmap_resolution": 2 } }"#,
        )
        .expect("write");

        let asset = MeshAsset::load(&path).expect("load");
        let mut out = Vec::new();
        LightmapResolutionRule::new().check(&asset, &enabled_profile(true), &mut out);
        out[0].take_fix().expect("fix").apply().expect("apply");

        let fixed = MeshAsset::load(&path).expect("reload");
        assert_eq!(fixed.uv.lightmap_resolution, 4);
    }

    #[test]
    fn disabled_rule_stays_silent() {
        let mut profile = Profile::default_profile();
        profile.set_rule_config(RuleConfig::new(RULE_ID, false));
        let mut out = Vec::new();
        assert!(!LightmapResolutionRule::new().check(&baked_mesh(1), &profile, &mut out));
    }
}
