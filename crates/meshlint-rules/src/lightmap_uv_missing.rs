//! Rule checking lightmap UV configuration.
//!
//! # Configuration
//!
//! - `Severity`: finding severity (default warning)
//! - `RequireValidUVs`: the lightmap channel must reference an existing UV
//!   channel (default true)
//! - `AllowAutoGeneration`: permit enabling lightmap UV generation as a fix
//!   (default true)

use meshlint_core::{AnalysisResult, CheckRule, FixAction, FixError, MeshAsset, Profile, Severity};

/// Rule id for the lightmap-UV check.
pub const RULE_ID: &str = "SM_LightmapUVMissing";

/// Checks that a mesh has a usable lightmap UV setup.
#[derive(Debug, Default)]
pub struct LightmapUvMissingRule;

impl LightmapUvMissingRule {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl CheckRule for LightmapUvMissingRule {
    fn rule_id(&self) -> &'static str {
        RULE_ID
    }

    fn description(&self) -> &'static str {
        "Checks that static meshes have a valid lightmap UV channel or generate one"
    }

    fn check(&self, asset: &MeshAsset, profile: &Profile, out: &mut Vec<AnalysisResult>) -> bool {
        if !profile.is_rule_enabled(RULE_ID) {
            return false;
        }

        if asset.uv.generate_lightmap_uvs {
            return false;
        }

        let require_valid = profile.parameter_bool(RULE_ID, "RequireValidUVs", true);
        let problem = match asset.uv.lightmap_channel {
            None => Some("no lightmap UV channel is assigned".to_string()),
            Some(channel) => {
                let exists = asset.uv.channels.iter().any(|c| c.index == channel);
                if require_valid && !exists {
                    Some(format!(
                        "lightmap channel {channel} does not reference an existing UV channel"
                    ))
                } else {
                    None
                }
            }
        };

        let Some(problem) = problem else {
            return false;
        };

        let severity = profile.parameter_severity(RULE_ID, "Severity", Severity::Warning);
        let mut result = AnalysisResult::new(
            asset.asset_ref(),
            severity,
            RULE_ID,
            format!("static mesh '{}': {problem}", asset.name),
        );

        let allow_generation = profile.parameter_bool(RULE_ID, "AllowAutoGeneration", true);
        if allow_generation && !asset.uv.channels.is_empty() {
            let source = asset.source.clone();
            result = result.with_fix(FixAction::new("enable lightmap UV generation", move || {
                enable_generation(&source)
            }));
        }

        out.push(result);
        true
    }
}

fn enable_generation(source: &std::path::Path) -> Result<(), FixError> {
    let mut asset = MeshAsset::load(source).map_err(|e| FixError::Stale(e.to_string()))?;
    asset.uv.generate_lightmap_uvs = true;
    asset.save()
}
