//! Rule checking material slot counts and empty slots.
//!
//! # Configuration
//!
//! - `WarningThreshold` / `ErrorThreshold`: slot counts triggering a
//!   warning / error (defaults 4 / 6)
//! - `AllowAutoFix`: permit stripping unassigned slots (default true)

use meshlint_core::{AnalysisResult, CheckRule, FixAction, FixError, MeshAsset, Profile, Severity};

/// Rule id for the material-slot check.
pub const RULE_ID: &str = "SM_MaterialSlot";

/// Checks slot counts (each slot is a draw call) and flags slots with no
/// material assigned. Both sub-checks aggregate into one worst-severity
/// finding.
#[derive(Debug, Default)]
pub struct MaterialSlotRule;

impl MaterialSlotRule {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl CheckRule for MaterialSlotRule {
    fn rule_id(&self) -> &'static str {
        RULE_ID
    }

    fn description(&self) -> &'static str {
        "Checks material slot counts and empty material slots"
    }

    fn check(&self, asset: &MeshAsset, profile: &Profile, out: &mut Vec<AnalysisResult>) -> bool {
        if !profile.is_rule_enabled(RULE_ID) {
            return false;
        }

        let warning_at = profile.parameter_u32(RULE_ID, "WarningThreshold", 4) as usize;
        let error_at = profile.parameter_u32(RULE_ID, "ErrorThreshold", 6) as usize;

        let slots = asset.materials.len();
        let empty: Vec<&str> = asset
            .materials
            .iter()
            .filter(|slot| !slot.assigned)
            .map(|slot| slot.name.as_str())
            .collect();

        let mut worst = None;
        let mut details = Vec::new();

        if slots >= error_at {
            worst = worst.max(Some(Severity::Error));
            details.push(format!("{slots} material slot(s)"));
        } else if slots >= warning_at {
            worst = worst.max(Some(Severity::Warning));
            details.push(format!("{slots} material slot(s)"));
        }

        if !empty.is_empty() {
            worst = worst.max(Some(Severity::Warning));
            details.push(format!("empty slot(s): {}", empty.join(", ")));
        }

        let Some(severity) = worst else {
            return false;
        };

        let mut result = AnalysisResult::new(
            asset.asset_ref(),
            severity,
            RULE_ID,
            format!(
                "static mesh '{}' has material slot issues: {}",
                asset.name,
                details.join("; ")
            ),
        );

        let allow_fix = profile.parameter_bool(RULE_ID, "AllowAutoFix", true);
        // Stripping only helps with empty slots, and a mesh must keep at
        // least one assigned slot to stay renderable.
        let assigned = slots - empty.len();
        if allow_fix && !empty.is_empty() && assigned > 0 {
            let source = asset.source.clone();
            result = result.with_fix(FixAction::new(
                format!("remove {} empty material slot(s)", empty.len()),
                move || strip_empty_slots(&source),
            ));
        }

        out.push(result);
        true
    }
}

fn strip_empty_slots(source: &std::path::Path) -> Result<(), FixError> {
    let mut asset = MeshAsset::load(source).map_err(|e| FixError::Stale(e.to_string()))?;
    asset.materials.retain(|slot| slot.assigned);
    asset.save()
}
