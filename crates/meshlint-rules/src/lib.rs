//! # meshlint-rules
//!
//! Built-in static-mesh check rules for meshlint.
//!
//! ## Available Rules
//!
//! | Rule id | Checks | Auto-fix |
//! |---------|--------|----------|
//! | `SM_Naming` | naming convention pattern | rename |
//! | `SM_LODMissing` | minimum LOD count | generate LOD entries |
//! | `SM_LODPolyReduction` | reduction between LODs | - |
//! | `SM_LightmapUVMissing` | lightmap UV setup | enable generation |
//! | `SM_UVOverlapping` | UV overlap percentages | - |
//! | `SM_TriangleCount` | LOD0 triangle budget | - |
//! | `SM_DegenerateFaces` | zero-area triangles | remove |
//! | `SM_CollisionMissing` | collision presence | generate box |
//! | `SM_CollisionComplexity` | collision primitive count | simplify |
//! | `SM_MaterialSlot` | slot count and empty slots | strip empty |
//! | `SM_VertexColorMissing` | vertex colors on dense meshes | - |
//! | `SM_TransformPivot` | pivot distance from origin | - |
//! | `SM_Scaling` | non-uniform / zero scale | - |
//! | `SM_LightmapResolution` | resolution range | clamp |
//! | `SM_SocketNaming` | socket prefix and placement | rename |
//!
//! ## Usage
//!
//! ```ignore
//! use meshlint_core::{AssetScanner, AssetTypeId};
//! use meshlint_rules::StaticMeshAnalyzer;
//! use std::sync::Arc;
//!
//! scanner.register_analyzer(
//!     AssetTypeId::new("StaticMesh"),
//!     Arc::new(StaticMeshAnalyzer::new()),
//! );
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod collision_complexity;
mod collision_missing;
mod degenerate_faces;
mod lightmap_resolution;
mod lightmap_uv_missing;
mod lod_missing;
mod lod_poly_reduction;
mod material_slot;
mod naming;
mod scaling;
mod socket_naming;
mod transform_pivot;
mod triangle_count;
mod uv_overlapping;
mod vertex_color_missing;

pub use analyzer::{all_rules, StaticMeshAnalyzer, ASSET_LOADING_RULE_ID};
pub use collision_complexity::CollisionComplexityRule;
pub use collision_missing::CollisionMissingRule;
pub use degenerate_faces::DegenerateFacesRule;
pub use lightmap_resolution::LightmapResolutionRule;
pub use lightmap_uv_missing::LightmapUvMissingRule;
pub use lod_missing::LodMissingRule;
pub use lod_poly_reduction::LodPolyReductionRule;
pub use material_slot::MaterialSlotRule;
pub use naming::NamingRule;
pub use scaling::ScalingRule;
pub use socket_naming::SocketNamingRule;
pub use transform_pivot::TransformPivotRule;
pub use triangle_count::TriangleCountRule;
pub use uv_overlapping::UvOverlappingRule;
pub use vertex_color_missing::VertexColorMissingRule;

/// Re-export core types for convenience.
pub use meshlint_core::{AnalysisResult, CheckRule, RuleBox, Severity};
