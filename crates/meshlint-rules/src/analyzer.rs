//! The static-mesh analyzer: owns every static-mesh rule and runs them
//! against one loaded asset.

use meshlint_core::{
    AnalysisResult, AssetAnalyzer, AssetCatalog, AssetRef, CheckRule, Profile, RuleBox, Severity,
};
use tracing::{debug, error};

use crate::{
    CollisionComplexityRule, CollisionMissingRule, DegenerateFacesRule, LightmapResolutionRule,
    LightmapUvMissingRule, LodMissingRule, LodPolyReductionRule, MaterialSlotRule, NamingRule,
    ScalingRule, SocketNamingRule, TransformPivotRule, TriangleCountRule, UvOverlappingRule,
    VertexColorMissingRule,
};

/// Reserved rule id for static-mesh descriptor loading failures.
pub const ASSET_LOADING_RULE_ID: &str = "SM_AssetLoading";

/// Analyzer for static-mesh assets (and, through the type hierarchy, their
/// subtypes).
pub struct StaticMeshAnalyzer {
    rules: Vec<RuleBox>,
}

impl Default for StaticMeshAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl StaticMeshAnalyzer {
    /// Creates the analyzer with the full built-in rule set.
    #[must_use]
    pub fn new() -> Self {
        let analyzer = Self {
            rules: all_rules(),
        };
        debug!(
            "static-mesh analyzer initialized with {} rule(s)",
            analyzer.rules.len()
        );
        analyzer
    }

    /// Creates an analyzer with an explicit rule list.
    #[must_use]
    pub fn with_rules(rules: Vec<RuleBox>) -> Self {
        Self { rules }
    }

    /// Returns the owned rules, in registration order.
    #[must_use]
    pub fn rules(&self) -> &[RuleBox] {
        &self.rules
    }
}

impl AssetAnalyzer for StaticMeshAnalyzer {
    fn analyze(
        &self,
        asset: &AssetRef,
        catalog: &dyn AssetCatalog,
        profile: &Profile,
        out: &mut Vec<AnalysisResult>,
    ) {
        let mesh = match catalog.load(asset) {
            Ok(mesh) => mesh,
            Err(e) => {
                error!("failed to load static mesh '{}': {e}", asset.name);
                out.push(AnalysisResult::new(
                    asset.clone(),
                    Severity::Error,
                    ASSET_LOADING_RULE_ID,
                    format!("failed to load static mesh asset '{}': {e}", asset.name),
                ));
                return;
            }
        };

        debug!(
            "analyzing static mesh '{}' with {} rule(s)",
            asset.name,
            self.rules.len()
        );
        for rule in &self.rules {
            rule.check(&mesh, profile, out);
        }
    }
}

/// Returns every built-in static-mesh rule, in the analyzer's registration
/// order.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![
        Box::new(NamingRule::new()),
        Box::new(LodMissingRule::new()),
        Box::new(LodPolyReductionRule::new()),
        Box::new(LightmapUvMissingRule::new()),
        Box::new(UvOverlappingRule::new()),
        Box::new(TriangleCountRule::new()),
        Box::new(DegenerateFacesRule::new()),
        Box::new(CollisionMissingRule::new()),
        Box::new(CollisionComplexityRule::new()),
        Box::new(MaterialSlotRule::new()),
        Box::new(VertexColorMissingRule::new()),
        Box::new(TransformPivotRule::new()),
        Box::new(ScalingRule::new()),
        Box::new(LightmapResolutionRule::new()),
        Box::new(SocketNamingRule::new()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshlint_core::{AssetTypeId, LoadError, MeshAsset};
    use std::collections::HashSet;
    use std::path::{Path, PathBuf};

    struct FailingCatalog;

    impl AssetCatalog for FailingCatalog {
        fn assets_in_path(&self, _path: &Path, _recursive: bool) -> Vec<AssetRef> {
            Vec::new()
        }
        fn selected_assets(&self) -> Vec<AssetRef> {
            Vec::new()
        }
        fn load(&self, asset: &AssetRef) -> Result<MeshAsset, LoadError> {
            Err(LoadError::Parse {
                path: asset.path.clone(),
                message: "corrupted descriptor".to_string(),
            })
        }
    }

    struct HealthyCatalog;

    impl AssetCatalog for HealthyCatalog {
        fn assets_in_path(&self, _path: &Path, _recursive: bool) -> Vec<AssetRef> {
            Vec::new()
        }
        fn selected_assets(&self) -> Vec<AssetRef> {
            Vec::new()
        }
        fn load(&self, asset: &AssetRef) -> Result<MeshAsset, LoadError> {
            Ok(MeshAsset {
                name: asset.name.clone(),
                source: asset.path.clone(),
                ..MeshAsset::default()
            })
        }
    }

    fn asset() -> AssetRef {
        AssetRef::new(
            "SM_Test",
            PathBuf::from("SM_Test.mesh.json"),
            AssetTypeId::new("StaticMesh"),
        )
    }

    #[test]
    fn rule_ids_are_unique() {
        let rules = all_rules();
        let ids: HashSet<&str> = rules.iter().map(|r| r.rule_id()).collect();
        assert_eq!(ids.len(), rules.len());
    }

    #[test]
    fn every_rule_has_a_description() {
        for rule in all_rules() {
            assert!(
                !rule.description().is_empty(),
                "rule {} has no description",
                rule.rule_id()
            );
        }
    }

    #[test]
    fn load_failure_produces_the_reserved_finding() {
        let analyzer = StaticMeshAnalyzer::new();
        let profile = Profile::default_profile();
        let mut out = Vec::new();

        analyzer.analyze(&asset(), &FailingCatalog, &profile, &mut out);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].rule_id, ASSET_LOADING_RULE_ID);
        assert_eq!(out[0].severity, Severity::Error);
        assert!(out[0].description.contains("corrupted descriptor"));
    }

    #[test]
    fn loadable_asset_runs_all_rules_without_panicking() {
        let analyzer = StaticMeshAnalyzer::new();
        let profile = Profile::default_profile();
        let mut out = Vec::new();

        // An empty default mesh violates the naming pattern among others;
        // the point here is that the full rule set runs cleanly.
        analyzer.analyze(&asset(), &HealthyCatalog, &profile, &mut out);
        assert!(out.iter().all(|r| r.rule_id != ASSET_LOADING_RULE_ID));
    }

    #[test]
    fn custom_rule_list_is_respected() {
        let analyzer = StaticMeshAnalyzer::with_rules(vec![Box::new(NamingRule::new())]);
        assert_eq!(analyzer.rules().len(), 1);
    }
}
