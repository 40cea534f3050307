//! Rule checking that meshes carry enough LOD levels.
//!
//! # Configuration
//!
//! - `MinLODs`: minimum required LOD count (default 3)
//! - `Severity`: finding severity (default warning)
//! - `AllowAutoFix`: permit appending generated LOD entries (default false)
//! - `MinReductionPercentage`: triangle reduction applied per generated LOD

use meshlint_core::{
    AnalysisResult, CheckRule, FixAction, FixError, LodInfo, MeshAsset, Profile, Severity,
};
use tracing::debug;

/// Rule id for the missing-LOD check.
pub const RULE_ID: &str = "SM_LODMissing";

/// Meshes beyond this LOD0 triangle count are left to external tooling; a
/// generated reduction chain would not preserve their silhouette.
const MAX_SAFE_GENERATION_TRIANGLES: u32 = 200_000;

/// Checks that a mesh has at least the configured number of LOD levels.
#[derive(Debug, Default)]
pub struct LodMissingRule;

impl LodMissingRule {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl CheckRule for LodMissingRule {
    fn rule_id(&self) -> &'static str {
        RULE_ID
    }

    fn description(&self) -> &'static str {
        "Checks that static meshes define the minimum required LOD levels"
    }

    fn check(&self, asset: &MeshAsset, profile: &Profile, out: &mut Vec<AnalysisResult>) -> bool {
        if !profile.is_rule_enabled(RULE_ID) {
            return false;
        }

        let min_lods = profile.parameter_u32(RULE_ID, "MinLODs", 3) as usize;
        let current = asset.lods.len();
        if current >= min_lods {
            return false;
        }

        let severity = profile.parameter_severity(RULE_ID, "Severity", Severity::Warning);
        let mut result = AnalysisResult::new(
            asset.asset_ref(),
            severity,
            RULE_ID,
            format!(
                "static mesh '{}' has {current} LOD level(s), {min_lods} required",
                asset.name
            ),
        );

        let allow_fix = profile.parameter_bool(RULE_ID, "AllowAutoFix", false);
        if allow_fix && can_safely_generate(asset) {
            let source = asset.source.clone();
            let reduction = profile.parameter_f32(RULE_ID, "MinReductionPercentage", 30.0);
            let missing = min_lods - current;
            result = result.with_fix(FixAction::new(
                format!("generate {missing} missing LOD level(s)"),
                move || generate_lods(&source, min_lods, reduction),
            ));
        }

        out.push(result);
        debug!(
            "missing LODs on '{}': {current} present, {min_lods} required",
            asset.name
        );
        true
    }
}

/// Generated LODs only make sense for meshes with geometry and of a size the
/// naive reduction chain can represent.
fn can_safely_generate(asset: &MeshAsset) -> bool {
    let lod0 = asset.lod0_triangles();
    lod0 > 0 && lod0 <= MAX_SAFE_GENERATION_TRIANGLES
}

/// Appends reduced LOD entries until `min_lods` levels exist.
fn generate_lods(
    source: &std::path::Path,
    min_lods: usize,
    reduction_percent: f32,
) -> Result<(), FixError> {
    let mut asset = MeshAsset::load(source).map_err(|e| FixError::Stale(e.to_string()))?;
    if asset.lods.is_empty() {
        return Err(FixError::Stale("mesh no longer has any LODs".to_string()));
    }

    let keep = (100.0 - reduction_percent.clamp(0.0, 95.0)) / 100.0;
    while asset.lods.len() < min_lods {
        let last = asset.lods[asset.lods.len() - 1];
        asset.lods.push(LodInfo {
            triangles: scale_count(last.triangles, keep),
            vertices: scale_count(last.vertices, keep),
        });
    }
    asset.save()
}

fn scale_count(count: u32, keep: f32) -> u32 {
    let scaled = (f64::from(count) * f64::from(keep)).round();
    if scaled < 1.0 {
        1
    } else {
        scaled as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshlint_core::RuleConfig;

    fn profile(min_lods: u32, allow_fix: bool) -> Profile {
        let mut profile = Profile::default_profile();
        profile.set_rule_config(
            RuleConfig::new(RULE_ID, true)
                .with_param("MinLODs", min_lods.to_string())
                .with_param("AllowAutoFix", allow_fix.to_string())
                .with_param("MinReductionPercentage", "50.0"),
        );
        profile
    }

    fn mesh_with_lods(triangles: &[u32]) -> MeshAsset {
        MeshAsset {
            name: "SM_Test".to_string(),
            lods: triangles
                .iter()
                .map(|&t| LodInfo {
                    triangles: t,
                    vertices: t / 2,
                })
                .collect(),
            ..MeshAsset::default()
        }
    }

    #[test]
    fn enough_lods_pass() {
        let mut out = Vec::new();
        assert!(!LodMissingRule::new().check(
            &mesh_with_lods(&[1000, 500, 250]),
            &profile(3, false),
            &mut out
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn too_few_lods_fire_with_configured_severity() {
        let mut p = profile(3, false);
        p.set_rule_config(
            RuleConfig::new(RULE_ID, true)
                .with_param("MinLODs", "3")
                .with_param("Severity", "error"),
        );

        let mut out = Vec::new();
        assert!(LodMissingRule::new().check(&mesh_with_lods(&[1000]), &p, &mut out));
        assert_eq!(out[0].severity, Severity::Error);
        assert!(out[0].description.contains("1 LOD level(s), 3 required"));
    }

    #[test]
    fn fix_is_withheld_when_not_allowed() {
        let mut out = Vec::new();
        LodMissingRule::new().check(&mesh_with_lods(&[1000]), &profile(3, false), &mut out);
        assert!(!out[0].has_fix());
    }

    #[test]
    fn fix_is_withheld_above_safety_ceiling() {
        let mut out = Vec::new();
        LodMissingRule::new().check(
            &mesh_with_lods(&[MAX_SAFE_GENERATION_TRIANGLES + 1]),
            &profile(3, true),
            &mut out,
        );
        assert_eq!(out.len(), 1);
        assert!(!out[0].has_fix());
    }

    #[test]
    fn fix_appends_reduced_lods() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("SM_Test.mesh.json");
        std::fs::write(
            &path,
            r#"{ "name": "SM_Test", "lods": [{ "triangles": 1000, "vertices": 500 }] }"#,
        )
        .expect("write");

        let asset = MeshAsset::load(&path).expect("load");
        let mut out = Vec::new();
        LodMissingRule::new().check(&asset, &profile(3, true), &mut out);

        let fix = out[0].take_fix().expect("fix attached");
        fix.apply().expect("fix succeeds");

        let fixed = MeshAsset::load(&path).expect("reload");
        assert_eq!(fixed.lods.len(), 3);
        assert_eq!(fixed.lods[1].triangles, 500);
        assert_eq!(fixed.lods[2].triangles, 250);
    }

    #[test]
    fn disabled_rule_stays_silent() {
        let mut p = Profile::default_profile();
        p.set_rule_config(RuleConfig::new(RULE_ID, false));
        let mut out = Vec::new();
        assert!(!LodMissingRule::new().check(&mesh_with_lods(&[10]), &p, &mut out));
        assert!(out.is_empty());
    }
}
