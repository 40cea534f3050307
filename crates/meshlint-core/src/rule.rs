//! The check-rule contract.

use crate::asset::MeshAsset;
use crate::profile::Profile;
use crate::types::AnalysisResult;

/// A single check over one loaded asset.
///
/// Rules are constructed once at startup and are stateless across calls; any
/// per-call state lives in the call. A rule must:
///
/// - return with no findings when it is disabled in the profile,
/// - read every threshold through the profile's parameters, never from
///   hardcoded constants, so profile edits take effect without rebuilds,
/// - never mutate the asset outside a fix-action closure, and only attach a
///   fix when its own can-safely-fix predicate holds for that instance,
/// - report the single worst severity with an aggregated description when
///   several sub-conditions fire for the same asset.
///
/// # Example
///
/// ```ignore
/// use meshlint_core::{AnalysisResult, CheckRule, MeshAsset, Profile, Severity};
///
/// pub struct EmptyMeshRule;
///
/// impl CheckRule for EmptyMeshRule {
///     fn rule_id(&self) -> &'static str { "SM_EmptyMesh" }
///     fn description(&self) -> &'static str { "Flags meshes with no geometry" }
///
///     fn check(&self, asset: &MeshAsset, profile: &Profile, out: &mut Vec<AnalysisResult>) -> bool {
///         if !profile.is_rule_enabled(self.rule_id()) || asset.lod0_triangles() > 0 {
///             return false;
///         }
///         out.push(AnalysisResult::new(
///             asset.asset_ref(),
///             Severity::Error,
///             self.rule_id(),
///             format!("mesh '{}' has no triangles", asset.name),
///         ));
///         true
///     }
/// }
/// ```
pub trait CheckRule: Send + Sync {
    /// Returns the stable identifier of this rule, unique across the rule
    /// set; this is the join key against the profile's rule configs.
    fn rule_id(&self) -> &'static str;

    /// Returns a human-facing description of what this rule checks.
    fn description(&self) -> &'static str;

    /// Checks one loaded asset, appending findings to `out`.
    ///
    /// Returns true iff findings were appended. "Zero findings" and "rule
    /// not applicable" both look like an unchanged `out`; rules never signal
    /// inapplicability through errors or panics.
    fn check(&self, asset: &MeshAsset, profile: &Profile, out: &mut Vec<AnalysisResult>) -> bool;
}

/// Type alias for boxed rule trait objects.
pub type RuleBox = Box<dyn CheckRule>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::AssetTypeId;
    use crate::types::Severity;
    use std::path::PathBuf;

    struct AlwaysFires;

    impl CheckRule for AlwaysFires {
        fn rule_id(&self) -> &'static str {
            "SM_AlwaysFires"
        }
        fn description(&self) -> &'static str {
            "A test rule"
        }
        fn check(
            &self,
            asset: &MeshAsset,
            _profile: &Profile,
            out: &mut Vec<AnalysisResult>,
        ) -> bool {
            out.push(AnalysisResult::new(
                asset.asset_ref(),
                Severity::Info,
                self.rule_id(),
                "fired",
            ));
            true
        }
    }

    #[test]
    fn rule_appends_and_reports() {
        let asset = MeshAsset {
            name: "SM_Test".to_string(),
            asset_type: AssetTypeId::new("StaticMesh"),
            source: PathBuf::from("SM_Test.mesh.json"),
            ..MeshAsset::default()
        };
        let profile = Profile::default_profile();
        let rule = AlwaysFires;

        let mut out = Vec::new();
        assert!(rule.check(&asset, &profile, &mut out));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].rule_id, "SM_AlwaysFires");
    }
}
