//! End-to-end coverage of the two-phase scan pipeline over a real
//! filesystem catalog.

use std::path::Path;
use std::sync::Arc;

use meshlint_core::{
    AnalysisResult, AssetAnalyzer, AssetCatalog, AssetRef, AssetScanner, AssetTypeId, CancelToken,
    FsAssetCatalog, GuardianSettings, NoProgress, Profile, ScanCoordinator, ScanRequest, Severity,
    TypeHierarchy,
};

/// Analyzer that loads the descriptor and reports one finding per asset,
/// plus the reserved loading-failure finding for unreadable descriptors.
struct ProbeAnalyzer;

impl AssetAnalyzer for ProbeAnalyzer {
    fn analyze(
        &self,
        asset: &AssetRef,
        catalog: &dyn AssetCatalog,
        _profile: &Profile,
        out: &mut Vec<AnalysisResult>,
    ) {
        match catalog.load(asset) {
            Ok(mesh) => out.push(AnalysisResult::new(
                asset.clone(),
                Severity::Info,
                "SM_Probe",
                format!("probed '{}' with {} triangle(s)", mesh.name, mesh.lod0_triangles()),
            )),
            Err(e) => out.push(AnalysisResult::new(
                asset.clone(),
                Severity::Error,
                "SM_AssetLoading",
                e.to_string(),
            )),
        }
    }
}

fn write_descriptor(root: &Path, rel: &str, name: &str, asset_type: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("mkdir");
    }
    std::fs::write(
        &path,
        format!(
            r#"{{ "name": "{name}", "asset_type": "{asset_type}", "lods": [{{ "triangles": 500 }}] }}"#
        ),
    )
    .expect("write descriptor");
}

fn build_coordinator(root: &Path) -> ScanCoordinator {
    let catalog = Arc::new(FsAssetCatalog::new(root));
    let mut hierarchy = TypeHierarchy::new();
    hierarchy.link(
        AssetTypeId::new("DestructibleMesh"),
        AssetTypeId::new("StaticMesh"),
    );
    let mut scanner = AssetScanner::new(catalog, hierarchy);
    scanner.register_analyzer(AssetTypeId::new("StaticMesh"), Arc::new(ProbeAnalyzer));
    ScanCoordinator::new(Arc::new(scanner))
}

#[test]
fn project_scan_walks_the_content_tree() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_descriptor(dir.path(), "SM_Crate.mesh.json", "SM_Crate", "StaticMesh");
    write_descriptor(
        dir.path(),
        "props/SM_Barrel.mesh.json",
        "SM_Barrel",
        "StaticMesh",
    );

    let coordinator = build_coordinator(dir.path());
    let mut settings = GuardianSettings::new();
    let report = coordinator.run_scan(
        ScanRequest::project(),
        &mut settings,
        &mut NoProgress,
        &CancelToken::new(),
    );

    assert_eq!(report.total, 2);
    assert_eq!(report.analyzed, 2);
    assert_eq!(report.results.len(), 2);
    assert!(report.is_complete());
}

#[test]
fn subtype_assets_dispatch_to_the_base_analyzer() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_descriptor(
        dir.path(),
        "SM_Wall.mesh.json",
        "SM_Wall",
        "DestructibleMesh",
    );

    let coordinator = build_coordinator(dir.path());
    let mut settings = GuardianSettings::new();
    let report = coordinator.run_scan(
        ScanRequest::project(),
        &mut settings,
        &mut NoProgress,
        &CancelToken::new(),
    );

    assert_eq!(report.results.len(), 1);
    assert_eq!(report.results[0].rule_id, "SM_Probe");
}

#[test]
fn unparseable_descriptor_surfaces_as_loading_failure() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_descriptor(dir.path(), "SM_Good.mesh.json", "SM_Good", "StaticMesh");
    // Header parses (name and type present) but the LOD section is broken,
    // so discovery succeeds and the analyzer's load fails.
    std::fs::write(
        dir.path().join("SM_Torn.mesh.json"),
        r#"{ "name": "SM_Torn", "asset_type": "StaticMesh", "lods": [{ "triangles": "many" }] }"#,
    )
    .expect("write");

    let coordinator = build_coordinator(dir.path());
    let mut settings = GuardianSettings::new();
    let report = coordinator.run_scan(
        ScanRequest::project(),
        &mut settings,
        &mut NoProgress,
        &CancelToken::new(),
    );

    let loading_failures: Vec<&AnalysisResult> = report
        .results
        .iter()
        .filter(|r| r.rule_id == "SM_AssetLoading")
        .collect();
    assert_eq!(loading_failures.len(), 1);
    assert_eq!(loading_failures[0].severity, Severity::Error);
    assert_eq!(report.analyzed, 2);
}

#[test]
fn folder_scan_only_sees_the_requested_folders() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_descriptor(
        dir.path(),
        "props/SM_Barrel.mesh.json",
        "SM_Barrel",
        "StaticMesh",
    );
    write_descriptor(dir.path(), "env/SM_Rock.mesh.json", "SM_Rock", "StaticMesh");
    write_descriptor(dir.path(), "SM_Loose.mesh.json", "SM_Loose", "StaticMesh");

    let coordinator = build_coordinator(dir.path());
    let mut settings = GuardianSettings::new();
    let report = coordinator.run_scan(
        ScanRequest::folders(vec!["props".to_string()]),
        &mut settings,
        &mut NoProgress,
        &CancelToken::new(),
    );

    assert_eq!(report.total, 1);
    assert_eq!(report.results[0].asset.name, "SM_Barrel");
}

#[test]
fn repeated_scans_are_deterministic() {
    let dir = tempfile::tempdir().expect("tempdir");
    for i in 0..5 {
        write_descriptor(
            dir.path(),
            &format!("SM_Item{i}.mesh.json"),
            &format!("SM_Item{i}"),
            "StaticMesh",
        );
    }

    let coordinator = build_coordinator(dir.path());
    let mut settings = GuardianSettings::new();

    let order = |report: &meshlint_core::ScanReport| -> Vec<String> {
        report
            .results
            .iter()
            .map(|r| r.asset.name.clone())
            .collect()
    };

    let first = coordinator.run_scan(
        ScanRequest::project(),
        &mut settings,
        &mut NoProgress,
        &CancelToken::new(),
    );
    let second = coordinator.run_scan(
        ScanRequest::project(),
        &mut settings,
        &mut NoProgress,
        &CancelToken::new(),
    );

    assert_eq!(order(&first), order(&second));
}
