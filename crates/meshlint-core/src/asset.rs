//! The mesh-asset descriptor model.
//!
//! Assets are JSON descriptor documents (`*.mesh.json`) carrying the
//! geometry, material, UV, and collision metadata that check rules inspect.
//! The engine never parses raw mesh geometry; the descriptor is the unit of
//! discovery, loading, and fixing.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::types::FixError;

/// File suffix identifying mesh-asset descriptors.
pub const DESCRIPTOR_SUFFIX: &str = ".mesh.json";

/// A runtime type tag for an asset kind.
///
/// Analyzer dispatch walks an explicit chain of these tags (see
/// [`TypeHierarchy`](crate::TypeHierarchy)) instead of relying on
/// reflection, so a subtype without a registered analyzer falls back to its
/// parent's.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetTypeId(String);

impl AssetTypeId {
    /// Creates a type tag.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the tag as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true for an empty tag, which is never a valid registration key.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for AssetTypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AssetTypeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// An opaque handle identifying one discovered asset.
///
/// Produced by discovery, consumed read-only by analysis. Fix actions mutate
/// the underlying descriptor on disk, never the handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRef {
    /// Asset name (descriptor `name` field).
    pub name: String,
    /// Path of the descriptor file.
    pub path: PathBuf,
    /// Most-derived type tag declared by the descriptor.
    pub asset_type: AssetTypeId,
    /// Whether discovery could read the descriptor header.
    pub valid: bool,
}

impl AssetRef {
    /// Creates a valid asset reference.
    pub fn new(name: impl Into<String>, path: PathBuf, asset_type: AssetTypeId) -> Self {
        Self {
            name: name.into(),
            path,
            asset_type,
            valid: true,
        }
    }

    /// Creates a reference for a descriptor whose header could not be read.
    ///
    /// The name falls back to the file stem so the asset still shows up in
    /// logs and reports.
    pub fn unreadable(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            name,
            path,
            asset_type: AssetTypeId::new(""),
            valid: false,
        }
    }

    /// Returns true if discovery produced a usable header.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

/// Errors loading an asset descriptor.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Reading the descriptor file failed.
    #[error("failed to read asset descriptor {path}: {source}")]
    Io {
        /// Descriptor path.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The descriptor is not valid JSON or violates the descriptor schema.
    #[error("failed to parse asset descriptor {path}: {message}")]
    Parse {
        /// Descriptor path.
        path: PathBuf,
        /// Parse error message.
        message: String,
    },
}

fn default_asset_type() -> AssetTypeId {
    AssetTypeId::new("StaticMesh")
}

fn default_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

/// One level-of-detail entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LodInfo {
    /// Triangle count at this LOD.
    pub triangles: u32,
    /// Vertex count at this LOD.
    #[serde(default)]
    pub vertices: u32,
}

/// One UV channel with its precomputed overlap metric.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct UvChannel {
    /// Channel index.
    pub index: u32,
    /// Percentage of surface area with overlapping UVs in this channel.
    #[serde(default)]
    pub overlap_percent: f32,
}

/// UV layout metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UvInfo {
    /// UV channels present on the mesh.
    #[serde(default)]
    pub channels: Vec<UvChannel>,
    /// Channel index used for lightmaps, if one is assigned.
    #[serde(default)]
    pub lightmap_channel: Option<u32>,
    /// Whether lightmap UVs are generated at import time.
    #[serde(default)]
    pub generate_lightmap_uvs: bool,
    /// Lightmap resolution as a power-of-two exponent (4 means 16x16).
    #[serde(default)]
    pub lightmap_resolution: u32,
}

/// One material slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialSlot {
    /// Slot name.
    pub name: String,
    /// Whether a material is assigned to the slot.
    #[serde(default)]
    pub assigned: bool,
}

/// One simple collision primitive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollisionPrimitive {
    /// Primitive kind, e.g. "box", "sphere", "convex".
    pub kind: String,
}

/// Collision setup metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollisionInfo {
    /// Simple collision primitives.
    #[serde(default)]
    pub primitives: Vec<CollisionPrimitive>,
    /// Whether the render mesh doubles as the collision mesh.
    #[serde(default)]
    pub use_complex_as_simple: bool,
}

/// Vertex color metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VertexColorInfo {
    /// Named vertex color channels present on the mesh.
    #[serde(default)]
    pub channels: Vec<String>,
}

/// One socket attachment point.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocketInfo {
    /// Socket name.
    pub name: String,
    /// Socket offset from the mesh origin.
    #[serde(default)]
    pub offset: [f32; 3],
}

/// A fully loaded mesh-asset descriptor.
///
/// Unknown fields in the document are tolerated; missing sections default to
/// empty so partially authored descriptors still analyze.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshAsset {
    /// Asset name.
    pub name: String,
    /// Most-derived type tag.
    #[serde(default = "default_asset_type")]
    pub asset_type: AssetTypeId,
    /// Level-of-detail chain, LOD0 first.
    #[serde(default)]
    pub lods: Vec<LodInfo>,
    /// Count of zero-area triangles in LOD0.
    #[serde(default)]
    pub degenerate_triangles: u32,
    /// Pivot offset from the mesh bounds origin.
    #[serde(default)]
    pub pivot_offset: [f32; 3],
    /// Import scale.
    #[serde(default = "default_scale")]
    pub scale: [f32; 3],
    /// UV layout.
    #[serde(default)]
    pub uv: UvInfo,
    /// Material slots.
    #[serde(default)]
    pub materials: Vec<MaterialSlot>,
    /// Collision setup.
    #[serde(default)]
    pub collision: CollisionInfo,
    /// Vertex colors.
    #[serde(default)]
    pub vertex_colors: VertexColorInfo,
    /// Socket attachment points.
    #[serde(default)]
    pub sockets: Vec<SocketInfo>,
    /// Descriptor path this asset was loaded from. Not part of the document.
    #[serde(skip)]
    pub source: PathBuf,
}

impl Default for MeshAsset {
    fn default() -> Self {
        Self {
            name: String::new(),
            asset_type: default_asset_type(),
            lods: Vec::new(),
            degenerate_triangles: 0,
            pivot_offset: [0.0; 3],
            scale: default_scale(),
            uv: UvInfo::default(),
            materials: Vec::new(),
            collision: CollisionInfo::default(),
            vertex_colors: VertexColorInfo::default(),
            sockets: Vec::new(),
            source: PathBuf::new(),
        }
    }
}

impl MeshAsset {
    /// Loads a descriptor from disk.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Io`] if the file cannot be read and
    /// [`LoadError::Parse`] if its contents are not a valid descriptor.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut asset: Self = serde_json::from_str(&content).map_err(|e| LoadError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        asset.source = path.to_path_buf();
        Ok(asset)
    }

    /// Writes the descriptor back to the path it was loaded from.
    ///
    /// Used by fix actions; check-time code never calls this.
    ///
    /// # Errors
    ///
    /// Returns [`FixError`] if serialization or the write fails.
    pub fn save(&self) -> Result<(), FixError> {
        let json = serde_json::to_string_pretty(self).map_err(|e| FixError::Serialize {
            path: self.source.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&self.source, json).map_err(|source| FixError::Io {
            path: self.source.clone(),
            source,
        })
    }

    /// Builds the asset reference for this descriptor.
    #[must_use]
    pub fn asset_ref(&self) -> AssetRef {
        AssetRef::new(
            self.name.clone(),
            self.source.clone(),
            self.asset_type.clone(),
        )
    }

    /// Triangle count of LOD0, or 0 when no LODs are present.
    #[must_use]
    pub fn lod0_triangles(&self) -> u32 {
        self.lods.first().map_or(0, |lod| lod.triangles)
    }
}
