//! Scan command implementation.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use meshlint_core::{
    AssetRef, AssetScanner, AssetTypeId, CancelToken, FsAssetCatalog, GuardianSettings,
    ScanCoordinator, ScanReport, ScanRequest, Severity, TypeHierarchy,
};
use meshlint_rules::StaticMeshAnalyzer;
use serde::Deserialize;

use crate::progress::TerminalProgress;
use crate::OutputFormat;

/// Inputs of one `meshlint scan` invocation.
pub struct ScanArgs {
    /// Content root containing asset descriptors.
    pub root: PathBuf,
    /// Optional settings file path.
    pub config: Option<PathBuf>,
    /// Folder scope, when given.
    pub folders: Vec<String>,
    /// Explicit asset scope, when given.
    pub assets: Vec<PathBuf>,
    /// Level file scope, when given.
    pub level: Option<PathBuf>,
    /// Report output format.
    pub format: OutputFormat,
    /// Profile document overriding the configured active profile.
    pub profile: Option<PathBuf>,
    /// Apply attached fix actions after the scan.
    pub fix: bool,
    /// Suppress the progress bar.
    pub quiet: bool,
}

/// A level document referencing member assets by descriptor path.
#[derive(Deserialize)]
struct LevelDoc {
    #[serde(default)]
    assets: Vec<PathBuf>,
}

/// Runs the scan command.
pub fn run(args: ScanArgs) -> Result<()> {
    let mut settings = match &args.config {
        Some(path) => GuardianSettings::from_file(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => GuardianSettings::new(),
    };

    if let Some(profile_path) = &args.profile {
        settings
            .set_active_profile(profile_path)
            .with_context(|| format!("failed to load profile {}", profile_path.display()))?;
    }

    // Selection and level discovery happen up front, before the background
    // task is created; only folder/project discovery is deferred.
    let request = if !args.assets.is_empty() {
        ScanRequest::assets(resolve_assets(&args.root, &args.assets))
    } else if let Some(level) = &args.level {
        ScanRequest::open_level(resolve_level_assets(&args.root, level)?)
    } else if !args.folders.is_empty() {
        ScanRequest::folders(args.folders.clone())
    } else {
        ScanRequest::project()
    };

    let catalog = Arc::new(FsAssetCatalog::new(&args.root));
    let mut scanner = AssetScanner::new(catalog, static_mesh_hierarchy());
    scanner.register_analyzer(
        AssetTypeId::new("StaticMesh"),
        Arc::new(StaticMeshAnalyzer::new()),
    );
    let coordinator = ScanCoordinator::new(Arc::new(scanner));

    let mut progress = TerminalProgress::new(args.quiet);
    let mut report = coordinator.run_scan(request, &mut settings, &mut progress, &CancelToken::new());

    if args.fix {
        apply_fixes(&mut report);
    }

    super::output::print(&report, args.format)?;

    if report.has_findings_at(Severity::Error) {
        std::process::exit(1);
    }
    Ok(())
}

/// Known static-mesh subtypes handled by the static-mesh analyzer.
fn static_mesh_hierarchy() -> TypeHierarchy {
    let mut hierarchy = TypeHierarchy::new();
    for subtype in ["DestructibleMesh", "SplineMesh", "InstancedStaticMesh"] {
        hierarchy.link(AssetTypeId::new(subtype), AssetTypeId::new("StaticMesh"));
    }
    hierarchy
}

fn resolve_assets(root: &Path, paths: &[PathBuf]) -> Vec<AssetRef> {
    paths
        .iter()
        .map(|path| {
            let full = if path.is_absolute() {
                path.clone()
            } else {
                root.join(path)
            };
            FsAssetCatalog::asset_ref_for(&full)
        })
        .collect()
}

fn resolve_level_assets(root: &Path, level: &Path) -> Result<Vec<AssetRef>> {
    let full = if level.is_absolute() {
        level.to_path_buf()
    } else {
        root.join(level)
    };
    let content = std::fs::read_to_string(&full)
        .with_context(|| format!("failed to read level file {}", full.display()))?;
    let doc: LevelDoc = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse level file {}", full.display()))?;
    Ok(resolve_assets(root, &doc.assets))
}

/// Applies every attached fix action, logging each outcome.
///
/// Failed fixes are reported and never retried.
fn apply_fixes(report: &mut ScanReport) {
    let mut applied = 0usize;
    let mut failed = 0usize;

    for result in &mut report.results {
        let Some(fix) = result.take_fix() else {
            continue;
        };
        let label = fix.label().to_string();
        match fix.apply() {
            Ok(()) => {
                applied += 1;
                tracing::info!("fixed [{}] {}: {label}", result.rule_id, result.asset.name);
            }
            Err(e) => {
                failed += 1;
                tracing::error!(
                    "fix failed [{}] {}: {label}: {e}",
                    result.rule_id,
                    result.asset.name
                );
            }
        }
    }

    if applied + failed > 0 {
        println!("applied {applied} fix(es), {failed} failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hierarchy_links_known_subtypes_to_static_mesh() {
        let hierarchy = static_mesh_hierarchy();
        let chain = hierarchy.chain(&AssetTypeId::new("SplineMesh"));
        assert_eq!(chain.last().map(AssetTypeId::as_str), Some("StaticMesh"));
    }

    #[test]
    fn resolve_assets_reads_descriptor_headers() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("SM_A.mesh.json");
        std::fs::write(&path, r#"{ "name": "SM_A" }"#).expect("write");

        let refs = resolve_assets(dir.path(), &[PathBuf::from("SM_A.mesh.json")]);
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].name, "SM_A");
        assert!(refs[0].is_valid());
    }

    #[test]
    fn resolve_level_collects_member_assets() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("SM_A.mesh.json"), r#"{ "name": "SM_A" }"#)
            .expect("write");
        std::fs::write(
            dir.path().join("arena.level.json"),
            r#"{ "assets": ["SM_A.mesh.json"] }"#,
        )
        .expect("write");

        let refs = resolve_level_assets(dir.path(), Path::new("arena.level.json"))
            .expect("level resolves");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].name, "SM_A");
    }

    #[test]
    fn malformed_level_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("bad.level.json"), "{ nope").expect("write");
        assert!(resolve_level_assets(dir.path(), Path::new("bad.level.json")).is_err());
    }
}
