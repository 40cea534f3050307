//! Rule checking UV channels for overlapping coordinates.
//!
//! # Configuration
//!
//! - `CheckUVChannel0`..`CheckUVChannel3`: which channels to inspect
//! - `TextureWarningThreshold` / `TextureErrorThreshold`: overlap percent
//!   thresholds for texture channels (defaults 5.0 / 15.0)
//! - `LightmapWarningThreshold` / `LightmapErrorThreshold`: stricter
//!   thresholds applied to the lightmap channel (defaults 2.0 / 8.0)
//!
//! There is no fix action: overlapping UVs are repaired in external DCC
//! tools where the unwrap can be re-authored without quality loss.

use meshlint_core::{AnalysisResult, CheckRule, MeshAsset, Profile, Severity};

/// Rule id for the UV-overlap check.
pub const RULE_ID: &str = "SM_UVOverlapping";

/// Checks configured UV channels against overlap-percentage thresholds.
///
/// Findings from several channels aggregate into one worst-severity result
/// so one bad unwrap does not flood the report.
#[derive(Debug, Default)]
pub struct UvOverlappingRule;

impl UvOverlappingRule {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl CheckRule for UvOverlappingRule {
    fn rule_id(&self) -> &'static str {
        RULE_ID
    }

    fn description(&self) -> &'static str {
        "Checks UV channels for overlapping coordinates that break texturing and light baking"
    }

    fn check(&self, asset: &MeshAsset, profile: &Profile, out: &mut Vec<AnalysisResult>) -> bool {
        if !profile.is_rule_enabled(RULE_ID) {
            return false;
        }

        let texture_warning = profile.parameter_f32(RULE_ID, "TextureWarningThreshold", 5.0);
        let texture_error = profile.parameter_f32(RULE_ID, "TextureErrorThreshold", 15.0);
        let lightmap_warning = profile.parameter_f32(RULE_ID, "LightmapWarningThreshold", 2.0);
        let lightmap_error = profile.parameter_f32(RULE_ID, "LightmapErrorThreshold", 8.0);

        let mut worst = None;
        let mut details = Vec::new();

        for channel in &asset.uv.channels {
            let key = format!("CheckUVChannel{}", channel.index);
            let default_checked = channel.index <= 1;
            if !profile.parameter_bool(RULE_ID, &key, default_checked) {
                continue;
            }

            let is_lightmap = asset.uv.lightmap_channel == Some(channel.index);
            let (warning_at, error_at) = if is_lightmap {
                (lightmap_warning, lightmap_error)
            } else {
                (texture_warning, texture_error)
            };

            let severity = if channel.overlap_percent >= error_at {
                Severity::Error
            } else if channel.overlap_percent >= warning_at {
                Severity::Warning
            } else {
                continue;
            };

            worst = worst.max(Some(severity));
            let kind = if is_lightmap { "lightmap" } else { "texture" };
            details.push(format!(
                "UV{} ({kind}) overlaps {:.1}% of its area",
                channel.index, channel.overlap_percent
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
                "static mesh '{}' has overlapping UVs: {}",
                asset.name,
                details.join(", ")
            ),
        ));
        true
    }
}
