//! # meshlint-core
//!
//! Core framework for validating 3D mesh asset descriptors.
//!
//! This crate provides the orchestration skeleton of the validation engine:
//!
//! - [`CheckRule`] for single-asset checks and [`AssetAnalyzer`] for
//!   per-type rule sets
//! - [`AssetScanner`] for type-tag dispatch with hierarchy fallback
//! - [`Profile`] and [`GuardianSettings`] for per-rule configuration
//! - [`ScanTask`] and [`ScanCoordinator`] for the two-phase scan pipeline
//! - [`AnalysisResult`] for findings with optional deferred fixes
//!
//! ## Example
//!
//! ```ignore
//! use meshlint_core::{
//!     AssetScanner, CancelToken, FsAssetCatalog, GuardianSettings, NoProgress,
//!     ScanCoordinator, ScanRequest, TypeHierarchy,
//! };
//! use std::sync::Arc;
//!
//! let catalog = Arc::new(FsAssetCatalog::new("./content"));
//! let mut scanner = AssetScanner::new(catalog, TypeHierarchy::new());
//! scanner.register_analyzer("StaticMesh".into(), my_analyzer);
//!
//! let coordinator = ScanCoordinator::new(Arc::new(scanner));
//! let mut settings = GuardianSettings::new();
//! let report = coordinator.run_scan(
//!     ScanRequest::project(),
//!     &mut settings,
//!     &mut NoProgress,
//!     &CancelToken::new(),
//! );
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod asset;
mod catalog;
mod coordinator;
mod profile;
mod rule;
mod scanner;
mod settings;
mod task;
mod types;

pub use analyzer::AssetAnalyzer;
pub use asset::{
    AssetRef, AssetTypeId, CollisionInfo, CollisionPrimitive, LoadError, LodInfo, MaterialSlot,
    MeshAsset, SocketInfo, UvChannel, UvInfo, VertexColorInfo, DESCRIPTOR_SUFFIX,
};
pub use catalog::{AssetCatalog, FsAssetCatalog};
pub use coordinator::{CancelToken, NoProgress, ScanCoordinator, ScanProgress};
pub use profile::{Profile, ProfileError, RuleConfig};
pub use rule::{CheckRule, RuleBox};
pub use scanner::{AssetScanner, TypeHierarchy};
pub use settings::{sync_quick_settings, GuardianSettings, QuickSettings, SettingsError};
pub use task::{ScanCompletion, ScanMode, ScanOutcome, ScanRequest, ScanTask, TaskState};
pub use types::{AnalysisResult, FixAction, FixError, ScanReport, Severity};
