//! Rule checking for meshes with no collision setup.
//!
//! # Configuration
//!
//! - `Severity`: finding severity (default error)
//! - `AllowAutoFix`: permit generating a simple box primitive (default true)

use meshlint_core::{
    AnalysisResult, CheckRule, CollisionPrimitive, FixAction, FixError, MeshAsset, Profile,
    Severity,
};
use tracing::debug;

/// Rule id for the missing-collision check.
pub const RULE_ID: &str = "SM_CollisionMissing";

/// Auto-generation is only offered for meshes simple enough that a box
/// approximation is plausible.
const MAX_SAFE_GENERATION_TRIANGLES: u32 = 100_000;

/// Checks that a mesh has either simple collision primitives or uses its
/// render geometry for collision.
#[derive(Debug, Default)]
pub struct CollisionMissingRule;

impl CollisionMissingRule {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl CheckRule for CollisionMissingRule {
    fn rule_id(&self) -> &'static str {
        RULE_ID
    }

    fn description(&self) -> &'static str {
        "Checks for static meshes that are missing collision geometry"
    }

    fn check(&self, asset: &MeshAsset, profile: &Profile, out: &mut Vec<AnalysisResult>) -> bool {
        if !profile.is_rule_enabled(RULE_ID) {
            return false;
        }

        if !asset.collision.primitives.is_empty() || asset.collision.use_complex_as_simple {
            return false;
        }

        let severity = profile.parameter_severity(RULE_ID, "Severity", Severity::Error);
        let allow_fix = profile.parameter_bool(RULE_ID, "AllowAutoFix", true);
        let can_fix = can_safely_generate(asset);

        debug!(
            "missing collision on '{}': auto-fix allowed={allow_fix}, safe={can_fix}",
            asset.name
        );

        let mut description = format!(
            "static mesh '{}' has no collision geometry; physics interactions will fall through it",
            asset.name
        );

        let mut result = if allow_fix && can_fix {
            AnalysisResult::new(asset.asset_ref(), severity, RULE_ID, description)
        } else {
            description.push_str(" (auto-fix unavailable: check mesh complexity or settings)");
            AnalysisResult::new(asset.asset_ref(), severity, RULE_ID, description)
        };

        if allow_fix && can_fix {
            let source = asset.source.clone();
            result = result.with_fix(FixAction::new("generate box collision", move || {
                generate_box_collision(&source)
            }));
        }

        out.push(result);
        true
    }
}

fn can_safely_generate(asset: &MeshAsset) -> bool {
    let lod0 = asset.lod0_triangles();
    lod0 > 0 && lod0 <= MAX_SAFE_GENERATION_TRIANGLES
}

fn generate_box_collision(source: &std::path::Path) -> Result<(), FixError> {
    let mut asset = MeshAsset::load(source).map_err(|e| FixError::Stale(e.to_string()))?;
    if !asset.collision.primitives.is_empty() {
        return Err(FixError::Stale(
            "mesh already gained collision primitives".to_string(),
        ));
    }
    asset.collision.primitives.push(CollisionPrimitive {
        kind: "box".to_string(),
    });
    asset.save()
}
