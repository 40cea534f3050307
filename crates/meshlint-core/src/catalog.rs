//! Asset discovery and loading.
//!
//! The scanner does not touch the filesystem itself; it delegates to an
//! [`AssetCatalog`], the engine's view of the project's asset index. The
//! bundled [`FsAssetCatalog`] serves descriptors from a directory tree.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::asset::{AssetRef, AssetTypeId, LoadError, MeshAsset, DESCRIPTOR_SUFFIX};

/// The asset-index collaborator consumed by the scanner.
///
/// Discovery is pure: it produces [`AssetRef`] handles and never analyzes.
pub trait AssetCatalog: Send + Sync {
    /// Finds assets under a content path, optionally recursing.
    fn assets_in_path(&self, path: &Path, recursive: bool) -> Vec<AssetRef>;

    /// Returns the current selection, e.g. assets picked in a browser.
    fn selected_assets(&self) -> Vec<AssetRef>;

    /// Loads the full descriptor for an asset handle.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the descriptor cannot be read or parsed.
    fn load(&self, asset: &AssetRef) -> Result<MeshAsset, LoadError>;
}

/// Only the header fields discovery needs; the full document is parsed at
/// load time.
#[derive(Deserialize)]
struct DescriptorHeader {
    name: String,
    #[serde(default = "header_default_type")]
    asset_type: AssetTypeId,
}

fn header_default_type() -> AssetTypeId {
    AssetTypeId::new("StaticMesh")
}

/// Filesystem-backed catalog rooted at a content directory.
pub struct FsAssetCatalog {
    root: PathBuf,
    selection: Vec<AssetRef>,
}

impl FsAssetCatalog {
    /// Creates a catalog rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            selection: Vec::new(),
        }
    }

    /// Returns the content root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Sets the selection returned by [`AssetCatalog::selected_assets`].
    ///
    /// Must be configured before the catalog is shared with a scanner.
    pub fn set_selection(&mut self, selection: Vec<AssetRef>) {
        self.selection = selection;
    }

    /// Reads a descriptor header and builds an [`AssetRef`] for it.
    ///
    /// Headers that cannot be read produce an invalid reference rather than
    /// dropping the asset from discovery, so the failure stays visible.
    #[must_use]
    pub fn asset_ref_for(path: &Path) -> AssetRef {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("unreadable asset descriptor {}: {e}", path.display());
                return AssetRef::unreadable(path.to_path_buf());
            }
        };
        match serde_json::from_str::<DescriptorHeader>(&content) {
            Ok(header) => AssetRef::new(header.name, path.to_path_buf(), header.asset_type),
            Err(e) => {
                warn!("malformed asset descriptor {}: {e}", path.display());
                AssetRef::unreadable(path.to_path_buf())
            }
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl AssetCatalog for FsAssetCatalog {
    fn assets_in_path(&self, path: &Path, recursive: bool) -> Vec<AssetRef> {
        let base = self.resolve(path);
        let max_depth = if recursive { usize::MAX } else { 1 };

        let mut assets = Vec::new();
        for entry in WalkDir::new(&base)
            .max_depth(max_depth)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
        {
            let entry_path = entry.path();
            if !entry.file_type().is_file() {
                continue;
            }
            let is_descriptor = entry_path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(DESCRIPTOR_SUFFIX));
            if is_descriptor {
                assets.push(Self::asset_ref_for(entry_path));
            }
        }

        debug!(
            "found {} asset(s) in {} (recursive: {recursive})",
            assets.len(),
            base.display()
        );
        assets
    }

    fn selected_assets(&self) -> Vec<AssetRef> {
        self.selection.clone()
    }

    fn load(&self, asset: &AssetRef) -> Result<MeshAsset, LoadError> {
        MeshAsset::load(&self.resolve(&asset.path))
    }
}
