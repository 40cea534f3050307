//! Process-wide configuration and active-profile management.
//!
//! [`GuardianSettings`] is an explicit context object constructed once at
//! startup and threaded through scan entry points; there is no hidden global
//! state, so tests can inject a fresh instance each.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::profile::{Profile, RuleConfig};
use crate::types::Severity;

/// Errors loading or persisting settings and profile files.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// Reading or writing a file failed.
    #[error("failed to access {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The settings file is not valid TOML.
    #[error("failed to parse settings: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// A profile document failed to load or validate.
    #[error("failed to load profile from {path}: {message}")]
    Profile {
        /// Profile path.
        path: PathBuf,
        /// Failure description.
        message: String,
    },
}

/// The flat quick-settings surface: commonly tweaked scalars mirrored into
/// the active profile's per-rule parameters.
///
/// Every field maps to exactly one rule parameter (or enable flag) in
/// [`sync_quick_settings`]; keeping the mapping total prevents silent
/// configuration drift between the two surfaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuickSettings {
    /// Enable naming convention checks.
    pub enable_naming_rule: bool,
    /// Wildcard naming pattern (`*` any run, `?` single character).
    pub naming_pattern: String,

    /// Enable missing-LOD checks.
    pub enable_lod_missing_rule: bool,
    /// Minimum required LOD count.
    pub min_required_lods: u32,
    /// Allow appending generated LOD entries.
    pub allow_lod_auto_fix: bool,

    /// Enable LOD polygon-reduction checks.
    pub enable_lod_reduction_rule: bool,
    /// Minimum reduction between consecutive LODs, percent.
    pub min_lod_reduction_percent: f32,
    /// Reduction below this triggers a warning.
    pub lod_reduction_warning_percent: f32,
    /// Reduction below this triggers an error.
    pub lod_reduction_error_percent: f32,

    /// Enable lightmap-UV checks.
    pub enable_lightmap_uv_rule: bool,
    /// Severity for lightmap-UV findings.
    pub lightmap_uv_severity: Severity,
    /// Require the lightmap channel to reference an existing UV channel.
    pub require_valid_lightmap_uvs: bool,
    /// Allow enabling lightmap-UV generation as a fix.
    pub allow_lightmap_uv_auto_fix: bool,

    /// Enable UV-overlap checks.
    pub enable_uv_overlap_rule: bool,
    /// Severity cap for UV-overlap findings.
    pub uv_overlap_severity: Severity,
    /// Which UV channels to check (indices 0..=3).
    pub check_uv_channels: Vec<u32>,
    /// Overlap percent triggering a warning on texture channels.
    pub texture_uv_overlap_warning_percent: f32,
    /// Overlap percent triggering an error on texture channels.
    pub texture_uv_overlap_error_percent: f32,
    /// Overlap percent triggering a warning on the lightmap channel.
    pub lightmap_uv_overlap_warning_percent: f32,
    /// Overlap percent triggering an error on the lightmap channel.
    pub lightmap_uv_overlap_error_percent: f32,

    /// Enable triangle-count checks.
    pub enable_triangle_count_rule: bool,
    /// Base triangle threshold.
    pub triangle_count_base_threshold: u32,
    /// Percent above base triggering a warning.
    pub triangle_count_warning_percent: f32,
    /// Percent above base triggering an error.
    pub triangle_count_error_percent: f32,

    /// Enable degenerate-face checks.
    pub enable_degenerate_faces_rule: bool,
    /// Degenerate percent triggering a warning.
    pub degenerate_faces_warning_percent: f32,
    /// Degenerate percent triggering an error.
    pub degenerate_faces_error_percent: f32,
    /// Allow removing degenerate faces as a fix.
    pub allow_degenerate_faces_auto_fix: bool,

    /// Enable missing-collision checks.
    pub enable_collision_missing_rule: bool,
    /// Severity for missing collision.
    pub collision_missing_severity: Severity,
    /// Allow generating collision as a fix.
    pub allow_collision_auto_fix: bool,

    /// Enable collision-complexity checks.
    pub enable_collision_complexity_rule: bool,
    /// Primitive count triggering a warning.
    pub collision_complexity_warning_threshold: u32,
    /// Primitive count triggering an error.
    pub collision_complexity_error_threshold: u32,
    /// Treat complex-as-simple collision as an error.
    pub treat_complex_as_simple_as_error: bool,
    /// Allow simplifying collision as a fix.
    pub allow_collision_complexity_auto_fix: bool,

    /// Enable material-slot checks.
    pub enable_material_slot_rule: bool,
    /// Slot count triggering a warning.
    pub material_slot_warning_threshold: u32,
    /// Slot count triggering an error.
    pub material_slot_error_threshold: u32,
    /// Allow stripping empty slots as a fix.
    pub allow_material_slot_auto_fix: bool,

    /// Enable vertex-color checks.
    pub enable_vertex_color_rule: bool,
    /// Require vertex colors above this triangle count.
    pub vertex_color_required_triangles: u32,

    /// Enable transform-pivot checks.
    pub enable_transform_pivot_rule: bool,
    /// Pivot distance triggering a warning.
    pub pivot_warning_distance: f32,
    /// Pivot distance triggering an error.
    pub pivot_error_distance: f32,

    /// Enable scaling checks.
    pub enable_scaling_rule: bool,
    /// Non-uniform scale ratio triggering a warning.
    pub nonuniform_scale_warning_ratio: f32,
    /// Scale components below this count as zero scale.
    pub zero_scale_threshold: f32,

    /// Enable lightmap-resolution checks.
    pub enable_lightmap_resolution_rule: bool,
    /// Minimum resolution exponent (4 means 16x16).
    pub lightmap_resolution_min: u32,
    /// Maximum resolution exponent.
    pub lightmap_resolution_max: u32,
    /// Allow clamping the resolution as a fix.
    pub allow_lightmap_resolution_auto_fix: bool,

    /// Enable socket-naming checks.
    pub enable_socket_naming_rule: bool,
    /// Required socket name prefix; empty disables the prefix check.
    pub socket_naming_prefix: String,
    /// Socket offset distance triggering a warning.
    pub socket_distance_warning: f32,
    /// Allow renaming sockets as a fix.
    pub allow_socket_auto_fix: bool,
}

impl Default for QuickSettings {
    fn default() -> Self {
        Self {
            enable_naming_rule: true,
            naming_pattern: "SM_*".to_string(),
            enable_lod_missing_rule: true,
            min_required_lods: 3,
            allow_lod_auto_fix: false,
            enable_lod_reduction_rule: true,
            min_lod_reduction_percent: 30.0,
            lod_reduction_warning_percent: 20.0,
            lod_reduction_error_percent: 10.0,
            enable_lightmap_uv_rule: true,
            lightmap_uv_severity: Severity::Warning,
            require_valid_lightmap_uvs: true,
            allow_lightmap_uv_auto_fix: true,
            enable_uv_overlap_rule: true,
            uv_overlap_severity: Severity::Warning,
            check_uv_channels: vec![0, 1],
            texture_uv_overlap_warning_percent: 5.0,
            texture_uv_overlap_error_percent: 15.0,
            lightmap_uv_overlap_warning_percent: 2.0,
            lightmap_uv_overlap_error_percent: 8.0,
            enable_triangle_count_rule: true,
            triangle_count_base_threshold: 50000,
            triangle_count_warning_percent: 20.0,
            triangle_count_error_percent: 50.0,
            enable_degenerate_faces_rule: true,
            degenerate_faces_warning_percent: 1.0,
            degenerate_faces_error_percent: 5.0,
            allow_degenerate_faces_auto_fix: true,
            enable_collision_missing_rule: true,
            collision_missing_severity: Severity::Error,
            allow_collision_auto_fix: true,
            enable_collision_complexity_rule: true,
            collision_complexity_warning_threshold: 15,
            collision_complexity_error_threshold: 25,
            treat_complex_as_simple_as_error: true,
            allow_collision_complexity_auto_fix: true,
            enable_material_slot_rule: true,
            material_slot_warning_threshold: 4,
            material_slot_error_threshold: 6,
            allow_material_slot_auto_fix: true,
            enable_vertex_color_rule: true,
            vertex_color_required_triangles: 1000,
            enable_transform_pivot_rule: true,
            pivot_warning_distance: 50.0,
            pivot_error_distance: 200.0,
            enable_scaling_rule: true,
            nonuniform_scale_warning_ratio: 2.0,
            zero_scale_threshold: 0.01,
            enable_lightmap_resolution_rule: true,
            lightmap_resolution_min: 4,
            lightmap_resolution_max: 16,
            allow_lightmap_resolution_auto_fix: true,
            enable_socket_naming_rule: true,
            socket_naming_prefix: "Socket_".to_string(),
            socket_distance_warning: 100.0,
            allow_socket_auto_fix: true,
        }
    }
}

fn default_master_enable() -> bool {
    true
}

/// On-disk representation of the settings file (`meshlint.toml`).
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct SettingsFile {
    #[serde(default = "default_master_enable")]
    master_enable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    active_profile: Option<PathBuf>,
    quick: QuickSettings,
}

/// Process-wide configuration holding the active profile reference.
#[derive(Debug)]
pub struct GuardianSettings {
    /// Master switch; when off, scans short-circuit with a cleared report.
    pub master_enable: bool,
    /// Path to the active profile document, if one is configured.
    pub active_profile_path: Option<PathBuf>,
    /// The flat quick-settings surface.
    pub quick: QuickSettings,
    cached_profile: Option<Profile>,
}

impl Default for GuardianSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl GuardianSettings {
    /// Creates settings with built-in defaults and no cached profile.
    #[must_use]
    pub fn new() -> Self {
        Self {
            master_enable: true,
            active_profile_path: None,
            quick: QuickSettings::default(),
            cached_profile: None,
        }
    }

    /// Loads settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parses settings from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Parse`] on malformed TOML.
    pub fn parse(content: &str) -> Result<Self, SettingsError> {
        let file: SettingsFile = toml::from_str(content).map_err(|e| SettingsError::Parse {
            message: e.to_string(),
        })?;
        Ok(Self {
            master_enable: file.master_enable,
            active_profile_path: file.active_profile,
            quick: file.quick,
            cached_profile: None,
        })
    }

    /// Persists the settings (not the cached profile) to a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save_to_file(&self, path: &Path) -> Result<(), SettingsError> {
        let file = SettingsFile {
            master_enable: self.master_enable,
            active_profile: self.active_profile_path.clone(),
            quick: self.quick.clone(),
        };
        let content = toml::to_string_pretty(&file).map_err(|e| SettingsError::Parse {
            message: e.to_string(),
        })?;
        std::fs::write(path, content).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Returns the active profile, resolving it on first call.
    ///
    /// Resolution order: cached profile, then the configured profile path,
    /// then a freshly constructed default profile. Whichever source wins,
    /// quick settings are synced in and the result is cached, so repeat
    /// calls are idempotent until [`Self::set_active_profile`] replaces it.
    pub fn active_profile(&mut self) -> &Profile {
        if self.cached_profile.is_none() {
            let mut profile = match self.load_configured_profile() {
                Some(profile) => profile,
                None => {
                    info!("no active profile configured, creating default profile on demand");
                    Profile::default_profile()
                }
            };
            sync_quick_settings(&self.quick, &mut profile);
            self.cached_profile = Some(profile);
        }

        // Filled above; the fallback closure never runs.
        self.cached_profile.get_or_insert_with(Profile::default_profile)
    }

    /// Returns the cached active profile without resolving it.
    ///
    /// Scan-time consumers use this read-only view; a caller that never
    /// warmed the cache gets `None` and the scanner degrades to "no
    /// findings" with a log line.
    #[must_use]
    pub fn cached_profile(&self) -> Option<&Profile> {
        self.cached_profile.as_ref()
    }

    /// Sets the active profile by path.
    ///
    /// The path is validated by loading it first; on failure the existing
    /// active profile and path are left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Profile`] if the path does not resolve to a
    /// loadable profile document.
    pub fn set_active_profile(&mut self, path: &Path) -> Result<(), SettingsError> {
        let profile = load_profile_file(path)?;
        info!("active profile set to '{}' from {}", profile.name, path.display());
        self.active_profile_path = Some(path.to_path_buf());
        self.cached_profile = Some(profile);
        Ok(())
    }

    /// Re-applies the quick settings to the cached active profile.
    ///
    /// No-op when no profile has been resolved yet; the lazy path in
    /// [`Self::active_profile`] syncs on creation.
    pub fn sync_quick_settings_to_profile(&mut self) {
        let quick = self.quick.clone();
        if let Some(profile) = self.cached_profile.as_mut() {
            sync_quick_settings(&quick, profile);
        } else {
            warn!("quick-settings sync requested before a profile was resolved");
        }
    }

    /// Exports the active profile to a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile cannot be serialized or written.
    pub fn export_active_profile(&mut self, path: &Path) -> Result<(), SettingsError> {
        let profile = self.active_profile();
        let json = profile
            .export_to_json()
            .map_err(|e| SettingsError::Profile {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        std::fs::write(path, json).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!("exported active profile to {}", path.display());
        Ok(())
    }

    /// Imports a profile from a JSON file, optionally making it active.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid
    /// profile document. The active profile is unchanged on failure.
    pub fn import_profile_from_file(
        &mut self,
        path: &Path,
        set_active: bool,
    ) -> Result<Profile, SettingsError> {
        let profile = load_profile_file(path)?;
        if set_active {
            self.active_profile_path = Some(path.to_path_buf());
            self.cached_profile = Some(profile.clone());
            info!("imported and activated profile '{}'", profile.name);
        } else {
            info!("imported profile '{}'", profile.name);
        }
        Ok(profile)
    }

    fn load_configured_profile(&self) -> Option<Profile> {
        let path = self.active_profile_path.as_deref()?;
        match load_profile_file(path) {
            Ok(profile) => Some(profile),
            Err(e) => {
                warn!("failed to load active profile: {e}");
                None
            }
        }
    }
}

fn load_profile_file(path: &Path) -> Result<Profile, SettingsError> {
    let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut profile = Profile::default_profile();
    profile
        .import_from_json(&json)
        .map_err(|e| SettingsError::Profile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    Ok(profile)
}

/// Translates the flat quick-settings surface into per-rule configurations
/// and upserts them into `profile`.
///
/// This is the single translation boundary between the two configuration
/// surfaces; every quick setting lands in exactly one rule parameter.
pub fn sync_quick_settings(quick: &QuickSettings, profile: &mut Profile) {
    profile.set_rule_config(
        RuleConfig::new("SM_Naming", quick.enable_naming_rule)
            .with_param("NamingPattern", &quick.naming_pattern),
    );

    profile.set_rule_config(
        RuleConfig::new("SM_LODMissing", quick.enable_lod_missing_rule)
            .with_param("MinLODs", quick.min_required_lods.to_string())
            .with_param("AllowAutoFix", bool_param(quick.allow_lod_auto_fix))
            .with_param(
                "MinReductionPercentage",
                float_param(quick.min_lod_reduction_percent),
            ),
    );

    profile.set_rule_config(
        RuleConfig::new("SM_LODPolyReduction", quick.enable_lod_reduction_rule)
            .with_param(
                "MinReductionPercentage",
                float_param(quick.min_lod_reduction_percent),
            )
            .with_param(
                "WarningThreshold",
                float_param(quick.lod_reduction_warning_percent),
            )
            .with_param(
                "ErrorThreshold",
                float_param(quick.lod_reduction_error_percent),
            ),
    );

    profile.set_rule_config(
        RuleConfig::new("SM_LightmapUVMissing", quick.enable_lightmap_uv_rule)
            .with_param("Severity", quick.lightmap_uv_severity.to_string())
            .with_param(
                "RequireValidUVs",
                bool_param(quick.require_valid_lightmap_uvs),
            )
            .with_param(
                "AllowAutoGeneration",
                bool_param(quick.allow_lightmap_uv_auto_fix),
            ),
    );

    let mut uv_overlap = RuleConfig::new("SM_UVOverlapping", quick.enable_uv_overlap_rule)
        .with_param("Severity", quick.uv_overlap_severity.to_string())
        .with_param(
            "TextureWarningThreshold",
            float_param(quick.texture_uv_overlap_warning_percent),
        )
        .with_param(
            "TextureErrorThreshold",
            float_param(quick.texture_uv_overlap_error_percent),
        )
        .with_param(
            "LightmapWarningThreshold",
            float_param(quick.lightmap_uv_overlap_warning_percent),
        )
        .with_param(
            "LightmapErrorThreshold",
            float_param(quick.lightmap_uv_overlap_error_percent),
        );
    for channel in 0..4u32 {
        uv_overlap = uv_overlap.with_param(
            format!("CheckUVChannel{channel}"),
            bool_param(quick.check_uv_channels.contains(&channel)),
        );
    }
    profile.set_rule_config(uv_overlap);

    profile.set_rule_config(
        RuleConfig::new("SM_TriangleCount", quick.enable_triangle_count_rule)
            .with_param("BaseThreshold", quick.triangle_count_base_threshold.to_string())
            .with_param(
                "WarningPercentage",
                float_param(quick.triangle_count_warning_percent),
            )
            .with_param(
                "ErrorPercentage",
                float_param(quick.triangle_count_error_percent),
            ),
    );

    profile.set_rule_config(
        RuleConfig::new("SM_DegenerateFaces", quick.enable_degenerate_faces_rule)
            .with_param(
                "WarningThreshold",
                float_param(quick.degenerate_faces_warning_percent),
            )
            .with_param(
                "ErrorThreshold",
                float_param(quick.degenerate_faces_error_percent),
            )
            .with_param(
                "AllowAutoFix",
                bool_param(quick.allow_degenerate_faces_auto_fix),
            ),
    );

    profile.set_rule_config(
        RuleConfig::new("SM_CollisionMissing", quick.enable_collision_missing_rule)
            .with_param("Severity", quick.collision_missing_severity.to_string())
            .with_param("AllowAutoFix", bool_param(quick.allow_collision_auto_fix)),
    );

    profile.set_rule_config(
        RuleConfig::new(
            "SM_CollisionComplexity",
            quick.enable_collision_complexity_rule,
        )
        .with_param(
            "WarningThreshold",
            quick.collision_complexity_warning_threshold.to_string(),
        )
        .with_param(
            "ErrorThreshold",
            quick.collision_complexity_error_threshold.to_string(),
        )
        .with_param(
            "TreatUseComplexAsSimpleAsError",
            bool_param(quick.treat_complex_as_simple_as_error),
        )
        .with_param(
            "AllowAutoFix",
            bool_param(quick.allow_collision_complexity_auto_fix),
        ),
    );

    profile.set_rule_config(
        RuleConfig::new("SM_MaterialSlot", quick.enable_material_slot_rule)
            .with_param(
                "WarningThreshold",
                quick.material_slot_warning_threshold.to_string(),
            )
            .with_param(
                "ErrorThreshold",
                quick.material_slot_error_threshold.to_string(),
            )
            .with_param(
                "AllowAutoFix",
                bool_param(quick.allow_material_slot_auto_fix),
            ),
    );

    profile.set_rule_config(
        RuleConfig::new("SM_VertexColorMissing", quick.enable_vertex_color_rule).with_param(
            "RequiredThreshold",
            quick.vertex_color_required_triangles.to_string(),
        ),
    );

    profile.set_rule_config(
        RuleConfig::new("SM_TransformPivot", quick.enable_transform_pivot_rule)
            .with_param("WarningDistance", float_param(quick.pivot_warning_distance))
            .with_param("ErrorDistance", float_param(quick.pivot_error_distance)),
    );

    profile.set_rule_config(
        RuleConfig::new("SM_Scaling", quick.enable_scaling_rule)
            .with_param(
                "WarningRatio",
                float_param(quick.nonuniform_scale_warning_ratio),
            )
            .with_param("ZeroScaleThreshold", float_param(quick.zero_scale_threshold)),
    );

    profile.set_rule_config(
        RuleConfig::new(
            "SM_LightmapResolution",
            quick.enable_lightmap_resolution_rule,
        )
        .with_param("MinResolution", quick.lightmap_resolution_min.to_string())
        .with_param("MaxResolution", quick.lightmap_resolution_max.to_string())
        .with_param(
            "AllowAutoFix",
            bool_param(quick.allow_lightmap_resolution_auto_fix),
        ),
    );

    profile.set_rule_config(
        RuleConfig::new("SM_SocketNaming", quick.enable_socket_naming_rule)
            .with_param("NamingPrefix", &quick.socket_naming_prefix)
            .with_param(
                "TransformWarningDistance",
                float_param(quick.socket_distance_warning),
            )
            .with_param("AllowAutoFix", bool_param(quick.allow_socket_auto_fix)),
    );

    debug!("synced quick settings into profile '{}'", profile.name);
}

fn bool_param(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

fn float_param(value: f32) -> String {
    // Lossless: parameter strings round-trip through parse::<f32>.
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Rule ids the quick-settings surface is expected to cover.
    const SYNCED_RULE_IDS: &[&str] = &[
        "SM_Naming",
        "SM_LODMissing",
        "SM_LODPolyReduction",
        "SM_LightmapUVMissing",
        "SM_UVOverlapping",
        "SM_TriangleCount",
        "SM_DegenerateFaces",
        "SM_CollisionMissing",
        "SM_CollisionComplexity",
        "SM_MaterialSlot",
        "SM_VertexColorMissing",
        "SM_TransformPivot",
        "SM_Scaling",
        "SM_LightmapResolution",
        "SM_SocketNaming",
    ];

    #[test]
    fn active_profile_is_created_lazily_and_cached() {
        let mut settings = GuardianSettings::new();
        assert!(settings.cached_profile().is_none());

        let name = settings.active_profile().name.clone();
        assert_eq!(name, "Default Profile");
        assert!(settings.cached_profile().is_some());

        // Mutating quick settings after resolution must not change the
        // cached profile until an explicit re-sync.
        settings.quick.naming_pattern = "Mesh_*".to_string();
        let pattern = settings
            .active_profile()
            .rule_parameter("SM_Naming", "NamingPattern", "");
        assert_eq!(pattern, "SM_*");

        settings.sync_quick_settings_to_profile();
        let pattern = settings
            .active_profile()
            .rule_parameter("SM_Naming", "NamingPattern", "");
        assert_eq!(pattern, "Mesh_*");
    }

    #[test]
    fn quick_settings_cover_every_rule() {
        let mut settings = GuardianSettings::new();
        let profile = settings.active_profile();
        for rule_id in SYNCED_RULE_IDS {
            assert!(
                profile.rule_config(rule_id).is_some(),
                "quick settings did not sync {rule_id}"
            );
        }
    }

    #[test]
    fn quick_setting_enables_flow_into_profile() {
        let mut settings = GuardianSettings::new();
        settings.quick.enable_triangle_count_rule = false;
        settings.quick.collision_missing_severity = Severity::Critical;

        let profile = settings.active_profile();
        assert!(!profile.is_rule_enabled("SM_TriangleCount"));
        assert_eq!(
            profile.parameter_severity("SM_CollisionMissing", "Severity", Severity::Info),
            Severity::Critical
        );
    }

    #[test]
    fn set_active_profile_failure_leaves_state_untouched() {
        let mut settings = GuardianSettings::new();
        let original_name = settings.active_profile().name.clone();

        let result = settings.set_active_profile(Path::new("/nonexistent/profile.json"));
        assert!(result.is_err());
        assert!(settings.active_profile_path.is_none());
        assert_eq!(settings.active_profile().name, original_name);
    }

    #[test]
    fn set_active_profile_replaces_cache() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("studio.json");
        let mut exported = Profile::new("Studio", "studio rules");
        exported.version = 2;
        std::fs::write(&path, exported.export_to_json().expect("export")).expect("write");

        let mut settings = GuardianSettings::new();
        settings.set_active_profile(&path).expect("set active");
        assert_eq!(settings.active_profile().name, "Studio");
        assert_eq!(settings.active_profile_path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn unloadable_configured_path_falls_back_to_default() {
        let mut settings = GuardianSettings::new();
        settings.active_profile_path = Some(PathBuf::from("/nonexistent/profile.json"));
        assert_eq!(settings.active_profile().name, "Default Profile");
    }

    #[test]
    fn settings_parse_from_toml() {
        let toml = r#"
master_enable = false

[quick]
naming_pattern = "Prop_*"
min_required_lods = 2
collision_missing_severity = "critical"
"#;
        let settings = GuardianSettings::parse(toml).expect("parse");
        assert!(!settings.master_enable);
        assert_eq!(settings.quick.naming_pattern, "Prop_*");
        assert_eq!(settings.quick.min_required_lods, 2);
        assert_eq!(settings.quick.collision_missing_severity, Severity::Critical);
        // Unspecified quick settings keep their defaults.
        assert_eq!(settings.quick.triangle_count_base_threshold, 50000);
    }

    #[test]
    fn settings_save_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("meshlint.toml");

        let mut settings = GuardianSettings::new();
        settings.master_enable = false;
        settings.quick.naming_pattern = "Env_*".to_string();
        settings.save_to_file(&path).expect("save");

        let reloaded = GuardianSettings::from_file(&path).expect("reload");
        assert!(!reloaded.master_enable);
        assert_eq!(reloaded.quick.naming_pattern, "Env_*");
    }

    #[test]
    fn export_and_import_profile_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("exported.json");

        let mut settings = GuardianSettings::new();
        settings.export_active_profile(&path).expect("export");

        let mut other = GuardianSettings::new();
        let profile = other
            .import_profile_from_file(&path, true)
            .expect("import");
        assert_eq!(profile.name, "Default Profile");
        assert_eq!(other.active_profile_path.as_deref(), Some(path.as_path()));
    }
}
