//! Rule enforcing the static-mesh naming convention.
//!
//! # Configuration
//!
//! - `NamingPattern`: wildcard pattern the asset name must match
//!   (`*` matches any run of characters, `?` a single character).
//!   Default: `SM_*`.

use glob::Pattern;
use meshlint_core::{AnalysisResult, CheckRule, FixAction, FixError, MeshAsset, Profile, Severity};
use tracing::{debug, warn};

/// Rule id for the naming convention check.
pub const RULE_ID: &str = "SM_Naming";

/// Checks that static-mesh names follow the configured wildcard pattern.
#[derive(Debug, Default)]
pub struct NamingRule;

impl NamingRule {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl CheckRule for NamingRule {
    fn rule_id(&self) -> &'static str {
        RULE_ID
    }

    fn description(&self) -> &'static str {
        "Validates that static-mesh assets follow the configured naming convention"
    }

    fn check(&self, asset: &MeshAsset, profile: &Profile, out: &mut Vec<AnalysisResult>) -> bool {
        if !profile.is_rule_enabled(RULE_ID) {
            return false;
        }

        let pattern = profile.rule_parameter(RULE_ID, "NamingPattern", "SM_*");
        if name_matches_pattern(&asset.name, &pattern) {
            return false;
        }

        let suggested = suggest_name(&asset.name, &pattern);
        let mut result = AnalysisResult::new(
            asset.asset_ref(),
            Severity::Warning,
            RULE_ID,
            format!(
                "static mesh '{}' does not follow the naming convention (expected pattern '{pattern}')",
                asset.name
            ),
        );

        if let Some(new_name) = suggested {
            let source = asset.source.clone();
            result = result.with_fix(FixAction::new(
                format!("rename to '{new_name}'"),
                move || rename_asset(&source, &new_name),
            ));
        }

        out.push(result);
        debug!(
            "naming violation for '{}' (expected pattern '{pattern}')",
            asset.name
        );
        true
    }
}

/// Matches an asset name against a `*`/`?` wildcard pattern.
fn name_matches_pattern(name: &str, pattern: &str) -> bool {
    match Pattern::new(pattern) {
        Ok(compiled) => compiled.matches(name),
        Err(e) => {
            warn!("invalid naming pattern '{pattern}': {e}; treating name as conforming");
            true
        }
    }
}

/// Builds the conforming name for a non-matching asset.
///
/// For prefix-style patterns like `SM_*` the wildcard is replaced with the
/// current name. Patterns without a wildcard offer no derivable name, so no
/// fix is suggested.
fn suggest_name(current: &str, pattern: &str) -> Option<String> {
    let star = pattern.find('*')?;
    let prefix = &pattern[..star];
    if current.starts_with(prefix) {
        return None;
    }
    Some(pattern.replacen('*', current, 1))
}

/// Rewrites the descriptor under its new name and renames the file to match.
fn rename_asset(source: &std::path::Path, new_name: &str) -> Result<(), FixError> {
    let mut asset = MeshAsset::load(source).map_err(|e| FixError::Stale(e.to_string()))?;
    let old_path = asset.source.clone();
    asset.name = new_name.to_string();
    asset.source = old_path.with_file_name(format!("{new_name}{}", meshlint_core::DESCRIPTOR_SUFFIX));
    asset.save()?;
    std::fs::remove_file(&old_path).map_err(|source| FixError::Io {
        path: old_path,
        source,
    })?;
    debug!("renamed asset descriptor to '{new_name}'");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshlint_core::RuleConfig;

    fn profile_with_pattern(pattern: &str) -> Profile {
        let mut profile = Profile::default_profile();
        profile.set_rule_config(
            RuleConfig::new(RULE_ID, true).with_param("NamingPattern", pattern),
        );
        profile
    }

    fn mesh_named(name: &str) -> MeshAsset {
        MeshAsset {
            name: name.to_string(),
            ..MeshAsset::default()
        }
    }

    #[test]
    fn conforming_name_passes() {
        let mut out = Vec::new();
        let found = NamingRule::new().check(
            &mesh_named("SM_Rock01"),
            &profile_with_pattern("SM_*"),
            &mut out,
        );
        assert!(!found);
        assert!(out.is_empty());
    }

    #[test]
    fn nonconforming_name_is_a_warning_with_rename_fix() {
        let mut out = Vec::new();
        let found = NamingRule::new().check(
            &mesh_named("Rock01"),
            &profile_with_pattern("SM_*"),
            &mut out,
        );
        assert!(found);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].severity, Severity::Warning);
        assert_eq!(out[0].rule_id, RULE_ID);
        assert_eq!(out[0].fix_label(), Some("rename to 'SM_Rock01'"));
    }

    #[test]
    fn disabled_rule_stays_silent() {
        let mut profile = Profile::default_profile();
        profile.set_rule_config(RuleConfig::new(RULE_ID, false));

        let mut out = Vec::new();
        assert!(!NamingRule::new().check(&mesh_named("Rock01"), &profile, &mut out));
        assert!(out.is_empty());
    }

    #[test]
    fn question_mark_matches_single_character() {
        assert!(name_matches_pattern("SM_A", "SM_?"));
        assert!(!name_matches_pattern("SM_AB", "SM_?"));
    }

    #[test]
    fn pattern_without_wildcard_offers_no_fix() {
        let mut out = Vec::new();
        NamingRule::new().check(
            &mesh_named("Rock01"),
            &profile_with_pattern("ExactName"),
            &mut out,
        );
        assert_eq!(out.len(), 1);
        assert!(!out[0].has_fix());
    }

    #[test]
    fn rename_fix_rewrites_the_descriptor() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("Rock01.mesh.json");
        std::fs::write(
            &path,
            r#"{ "name": "Rock01", "lods": [{ "triangles": 12 }] }"#,
        )
        .expect("write");

        let asset = MeshAsset::load(&path).expect("load");
        let mut out = Vec::new();
        NamingRule::new().check(&asset, &profile_with_pattern("SM_*"), &mut out);

        let fix = out[0].take_fix().expect("fix attached");
        fix.apply().expect("rename succeeds");

        let new_path = dir.path().join("SM_Rock01.mesh.json");
        assert!(new_path.exists());
        assert!(!path.exists());
        let renamed = MeshAsset::load(&new_path).expect("reload");
        assert_eq!(renamed.name, "SM_Rock01");
    }
}
