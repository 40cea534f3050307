//! The per-asset-type analyzer contract.

use crate::asset::AssetRef;
use crate::catalog::AssetCatalog;
use crate::profile::Profile;
use crate::types::AnalysisResult;

/// Orchestrates the checks applicable to one asset type.
///
/// An analyzer owns an ordered list of rules, resolves the asset handle to a
/// loaded descriptor, and runs every rule against it, concatenating findings
/// into the shared output. Registration order carries no semantics: rules
/// must be able to run in any order and must not depend on one another's
/// side effects.
///
/// A load failure is reported as a single synthetic `Error`-severity finding
/// under a reserved `<Type>_AssetLoading` rule id, so the failure surfaces
/// in the same channel as real findings instead of vanishing into a log.
pub trait AssetAnalyzer: Send + Sync {
    /// Analyzes one asset, appending findings to `out`.
    fn analyze(
        &self,
        asset: &AssetRef,
        catalog: &dyn AssetCatalog,
        profile: &Profile,
        out: &mut Vec<AnalysisResult>,
    );
}
