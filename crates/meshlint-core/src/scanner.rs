//! Analyzer registry and single-asset dispatch.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::analyzer::AssetAnalyzer;
use crate::asset::{AssetRef, AssetTypeId};
use crate::catalog::AssetCatalog;
use crate::settings::GuardianSettings;
use crate::types::AnalysisResult;

/// Explicit child-to-parent links between asset type tags.
///
/// Dispatch walks from an asset's most-derived tag up this chain until it
/// finds a registered analyzer, so "any subtype of `StaticMesh` is handled
/// by the `StaticMesh` analyzer" works without per-subtype registration and
/// without reflection.
#[derive(Debug, Default)]
pub struct TypeHierarchy {
    parents: HashMap<AssetTypeId, AssetTypeId>,
}

impl TypeHierarchy {
    /// Creates an empty hierarchy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares `child` as a subtype of `parent`.
    ///
    /// Self-links are ignored with a log line; chain walks are additionally
    /// bounded, so a cycle introduced through several links cannot hang
    /// dispatch.
    pub fn link(&mut self, child: AssetTypeId, parent: AssetTypeId) {
        if child == parent {
            warn!("ignoring self-referential type link for '{child}'");
            return;
        }
        self.parents.insert(child, parent);
    }

    /// Returns the declared parent of a type tag.
    #[must_use]
    pub fn parent_of(&self, type_id: &AssetTypeId) -> Option<&AssetTypeId> {
        self.parents.get(type_id)
    }

    /// Returns the chain from `start` to its root, most-derived first.
    #[must_use]
    pub fn chain(&self, start: &AssetTypeId) -> Vec<AssetTypeId> {
        let mut chain = vec![start.clone()];
        let mut current = start;
        // Bounded by the link count to survive accidental cycles.
        for _ in 0..self.parents.len() {
            match self.parents.get(current) {
                Some(parent) => {
                    chain.push(parent.clone());
                    current = parent;
                }
                None => break,
            }
        }
        chain
    }
}

/// Holds the type-to-analyzer registry and dispatches assets to analyzers.
///
/// The registry is expected to be fully populated before any scan begins;
/// registration does not race in-flight scans.
pub struct AssetScanner {
    analyzers: HashMap<AssetTypeId, Arc<dyn AssetAnalyzer>>,
    hierarchy: TypeHierarchy,
    catalog: Arc<dyn AssetCatalog>,
}

impl AssetScanner {
    /// Creates a scanner over an asset catalog.
    pub fn new(catalog: Arc<dyn AssetCatalog>, hierarchy: TypeHierarchy) -> Self {
        Self {
            analyzers: HashMap::new(),
            hierarchy,
            catalog,
        }
    }

    /// Returns the catalog this scanner discovers and loads through.
    #[must_use]
    pub fn catalog(&self) -> &dyn AssetCatalog {
        self.catalog.as_ref()
    }

    /// Registers an analyzer for an asset type tag.
    ///
    /// Upserts: registering the same tag twice replaces the analyzer. An
    /// empty tag is logged and ignored, never fatal.
    pub fn register_analyzer(&mut self, type_id: AssetTypeId, analyzer: Arc<dyn AssetAnalyzer>) {
        if type_id.is_empty() {
            warn!("refusing to register analyzer for an empty type tag");
            return;
        }
        info!("registered asset analyzer for type '{type_id}'");
        self.analyzers.insert(type_id, analyzer);
    }

    /// Returns how many analyzers are registered.
    #[must_use]
    pub fn analyzer_count(&self) -> usize {
        self.analyzers.len()
    }

    /// Analyzes a single asset with the analyzer registered for its type,
    /// falling back through the type hierarchy.
    ///
    /// Degrades to "no findings plus a log line" when the asset reference is
    /// invalid, no active profile is resolvable from `settings`, or no
    /// analyzer is registered anywhere in the type chain. Unregistered types
    /// are simply unchecked, not an error.
    pub fn analyze_single_asset(
        &self,
        asset: &AssetRef,
        settings: &GuardianSettings,
        out: &mut Vec<AnalysisResult>,
    ) {
        if !asset.is_valid() {
            warn!("skipping invalid asset reference: {}", asset.path.display());
            return;
        }

        let Some(profile) = settings.cached_profile() else {
            warn!("no active profile available, skipping analysis of '{}'", asset.name);
            return;
        };

        for type_id in self.hierarchy.chain(&asset.asset_type) {
            if let Some(analyzer) = self.analyzers.get(&type_id) {
                debug!(
                    "analyzer for '{type_id}' handles asset '{}' (declared type '{}')",
                    asset.name, asset.asset_type
                );
                analyzer.analyze(asset, self.catalog.as_ref(), profile, out);
                return;
            }
        }

        debug!(
            "no analyzer registered for type '{}' or its parents (asset '{}')",
            asset.asset_type, asset.name
        );
    }

    /// Finds assets under a content path. Pure discovery, no analysis.
    #[must_use]
    pub fn scan_assets_in_path(&self, path: &std::path::Path, recursive: bool) -> Vec<AssetRef> {
        self.catalog.assets_in_path(path, recursive)
    }

    /// Finds the currently selected assets. Pure discovery, no analysis.
    #[must_use]
    pub fn scan_selected_assets(&self) -> Vec<AssetRef> {
        self.catalog.selected_assets()
    }

    /// Clears the analyzer registry. Used at shutdown.
    pub fn unregister_all_analyzers(&mut self) {
        if self.analyzers.is_empty() {
            debug!("no asset analyzers to unregister");
        } else {
            info!("unregistering all ({}) asset analyzers", self.analyzers.len());
            self.analyzers.clear();
        }
    }
}
