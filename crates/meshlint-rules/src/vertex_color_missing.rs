//! Rule checking for missing vertex colors on dense meshes.
//!
//! # Configuration
//!
//! - `Severity`: finding severity (default warning)
//! - `RequiredThreshold`: LOD0 triangle count above which vertex colors are
//!   required (default 1000)
//!
//! There is no fix action: vertex colors encode authored intent and cannot
//! be generated mechanically.

use meshlint_core::{AnalysisResult, CheckRule, MeshAsset, Profile, Severity};

/// Rule id for the vertex-color check.
pub const RULE_ID: &str = "SM_VertexColorMissing";

/// Checks that meshes above the configured density carry vertex colors.
#[derive(Debug, Default)]
pub struct VertexColorMissingRule;

impl VertexColorMissingRule {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl CheckRule for VertexColorMissingRule {
    fn rule_id(&self) -> &'static str {
        RULE_ID
    }

    fn description(&self) -> &'static str {
        "Checks that dense static meshes carry the vertex colors shaders expect"
    }

    fn check(&self, asset: &MeshAsset, profile: &Profile, out: &mut Vec<AnalysisResult>) -> bool {
        if !profile.is_rule_enabled(RULE_ID) {
            return false;
        }

        let required_above = profile.parameter_u32(RULE_ID, "RequiredThreshold", 1000);
        let triangles = asset.lod0_triangles();
        if triangles <= required_above || !asset.vertex_colors.channels.is_empty() {
            return false;
        }

        let severity = profile.parameter_severity(RULE_ID, "Severity", Severity::Warning);
        out.push(AnalysisResult::new(
            asset.asset_ref(),
            severity,
            RULE_ID,
            format!(
                "static mesh '{}' has {triangles} triangle(s) but no vertex color channels (required above {required_above})",
                asset.name
            ),
        ));
        true
    }
}
