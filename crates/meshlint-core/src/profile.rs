//! Validation profiles: named bundles of per-rule configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::Severity;

/// Errors produced by profile serialization.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    /// The JSON document could not be parsed.
    #[error("failed to parse profile document: {0}")]
    Parse(String),

    /// The profile could not be serialized.
    #[error("failed to serialize profile: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Configuration of a single rule within a profile.
///
/// Parameters are string-keyed and string-valued regardless of logical type;
/// rules parse on read and fall back to defaults on parse failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleConfig {
    /// Rule this configuration applies to.
    pub rule_id: String,
    /// Whether the rule runs at all.
    pub enabled: bool,
    /// Rule-specific parameters.
    pub parameters: BTreeMap<String, String>,
}

impl RuleConfig {
    /// Creates a configuration for a rule.
    pub fn new(rule_id: impl Into<String>, enabled: bool) -> Self {
        Self {
            rule_id: rule_id.into(),
            enabled,
            parameters: BTreeMap::new(),
        }
    }

    /// Adds a parameter, builder style.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }
}

/// A named, serializable collection of rule configurations.
///
/// Exactly one rule config exists per rule id; [`Profile::set_rule_config`]
/// upserts. Lookups for unknown rules yield an implicit disabled config, not
/// an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// Display name.
    pub name: String,
    /// What this profile is intended for.
    pub description: String,
    /// Version for compatibility tracking.
    pub version: u32,
    rule_configs: Vec<RuleConfig>,
}

impl Profile {
    /// Creates a profile seeded with the built-in starter rule set.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        let mut profile = Self {
            name: name.into(),
            description: description.into(),
            version: 1,
            rule_configs: Vec::new(),
        };
        profile.initialize_default_rules();
        profile
    }

    /// The process-default profile used when no profile path is configured.
    #[must_use]
    pub fn default_profile() -> Self {
        Self::new("Default Profile", "Default meshlint validation profile")
    }

    /// Seeds the starter rule set. Runs once at construction, never again.
    fn initialize_default_rules(&mut self) {
        self.set_rule_config(
            RuleConfig::new("SM_Naming", true).with_param("NamingPattern", "SM_*"),
        );
        self.set_rule_config(RuleConfig::new("SM_LODMissing", true).with_param("MinLODs", "3"));
        self.set_rule_config(
            RuleConfig::new("SM_LODPolyReduction", true)
                .with_param("MinReductionPercentage", "30.0")
                .with_param("WarningThreshold", "20.0")
                .with_param("ErrorThreshold", "10.0"),
        );
        self.set_rule_config(
            RuleConfig::new("SM_UVOverlapping", true)
                .with_param("Severity", "warning")
                .with_param("CheckUVChannel0", "true")
                .with_param("CheckUVChannel1", "true")
                .with_param("CheckUVChannel2", "false")
                .with_param("CheckUVChannel3", "false")
                .with_param("TextureWarningThreshold", "5.0")
                .with_param("TextureErrorThreshold", "15.0")
                .with_param("LightmapWarningThreshold", "2.0")
                .with_param("LightmapErrorThreshold", "8.0"),
        );
        self.set_rule_config(
            RuleConfig::new("SM_TriangleCount", true)
                .with_param("Severity", "warning")
                .with_param("BaseThreshold", "50000")
                .with_param("WarningPercentage", "20.0")
                .with_param("ErrorPercentage", "50.0"),
        );

        debug!(
            "profile '{}' initialized with {} default rule(s)",
            self.name,
            self.rule_configs.len()
        );
    }

    /// Returns the configured rules in insertion order.
    #[must_use]
    pub fn rule_configs(&self) -> &[RuleConfig] {
        &self.rule_configs
    }

    /// Returns the stored config for a rule, if one exists.
    #[must_use]
    pub fn rule_config(&self, rule_id: &str) -> Option<&RuleConfig> {
        self.rule_configs.iter().find(|c| c.rule_id == rule_id)
    }

    /// Returns the stored config for a rule, or a default disabled config.
    ///
    /// Never fails: an absent rule behaves as `{enabled: false, no params}`.
    #[must_use]
    pub fn rule_config_or_default(&self, rule_id: &str) -> RuleConfig {
        self.rule_config(rule_id)
            .cloned()
            .unwrap_or_else(|| RuleConfig::new(rule_id, false))
    }

    /// Upserts a rule configuration by rule id.
    ///
    /// Replaces the entire parameter map; there is no partial merge.
    pub fn set_rule_config(&mut self, config: RuleConfig) {
        if let Some(existing) = self
            .rule_configs
            .iter_mut()
            .find(|c| c.rule_id == config.rule_id)
        {
            *existing = config;
        } else {
            self.rule_configs.push(config);
        }
    }

    /// Checks whether a rule is enabled; unknown rules are disabled.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_id: &str) -> bool {
        self.rule_config(rule_id).is_some_and(|c| c.enabled)
    }

    /// Returns a rule parameter, or `default` when the rule or key is absent.
    #[must_use]
    pub fn rule_parameter(&self, rule_id: &str, key: &str, default: &str) -> String {
        self.rule_config(rule_id)
            .and_then(|c| c.parameters.get(key))
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }

    /// Parses a boolean parameter; unparseable values yield `default`.
    #[must_use]
    pub fn parameter_bool(&self, rule_id: &str, key: &str, default: bool) -> bool {
        match self
            .rule_parameter(rule_id, key, "")
            .trim()
            .to_ascii_lowercase()
            .as_str()
        {
            "true" | "1" | "yes" => true,
            "false" | "0" | "no" => false,
            _ => default,
        }
    }

    /// Parses an integer parameter; unparseable values yield `default`.
    #[must_use]
    pub fn parameter_u32(&self, rule_id: &str, key: &str, default: u32) -> u32 {
        self.rule_parameter(rule_id, key, "")
            .trim()
            .parse()
            .unwrap_or(default)
    }

    /// Parses a float parameter; unparseable values yield `default`.
    #[must_use]
    pub fn parameter_f32(&self, rule_id: &str, key: &str, default: f32) -> f32 {
        self.rule_parameter(rule_id, key, "")
            .trim()
            .parse()
            .unwrap_or(default)
    }

    /// Parses a severity parameter; unparseable values yield `default`.
    #[must_use]
    pub fn parameter_severity(&self, rule_id: &str, key: &str, default: Severity) -> Severity {
        Severity::parse_param(&self.rule_parameter(rule_id, key, ""), default)
    }

    /// Exports the profile as a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Serialize`] if serialization fails.
    pub fn export_to_json(&self) -> Result<String, ProfileError> {
        let doc = ProfileDoc {
            profile_name: Some(self.name.clone()),
            description: Some(self.description.clone()),
            version: Some(self.version),
            rules: self
                .rule_configs
                .iter()
                .map(|c| RuleDoc {
                    rule_id: c.rule_id.clone(),
                    enabled: c.enabled,
                    parameters: c.parameters.clone(),
                })
                .collect(),
        };
        Ok(serde_json::to_string_pretty(&doc)?)
    }

    /// Imports profile data from a JSON document.
    ///
    /// All-or-nothing at the document level: a malformed document returns an
    /// error and leaves the profile untouched. Tolerant at the field level:
    /// missing metadata fields keep their prior values.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Parse`] on malformed JSON.
    pub fn import_from_json(&mut self, json: &str) -> Result<(), ProfileError> {
        let doc: ProfileDoc =
            serde_json::from_str(json).map_err(|e| ProfileError::Parse(e.to_string()))?;

        if let Some(name) = doc.profile_name {
            self.name = name;
        }
        if let Some(description) = doc.description {
            self.description = description;
        }
        if let Some(version) = doc.version {
            self.version = version;
        }

        self.rule_configs.clear();
        for rule in doc.rules {
            self.set_rule_config(RuleConfig {
                rule_id: rule.rule_id,
                enabled: rule.enabled,
                parameters: rule.parameters,
            });
        }

        debug!(
            "imported profile '{}' with {} rule(s)",
            self.name,
            self.rule_configs.len()
        );
        Ok(())
    }
}

fn doc_default_enabled() -> bool {
    true
}

/// Wire representation of a profile document.
#[derive(Serialize, Deserialize)]
struct ProfileDoc {
    #[serde(rename = "ProfileName", default)]
    profile_name: Option<String>,
    #[serde(rename = "Description", default)]
    description: Option<String>,
    #[serde(rename = "Version", default)]
    version: Option<u32>,
    #[serde(rename = "Rules", default)]
    rules: Vec<RuleDoc>,
}

#[derive(Serialize, Deserialize)]
struct RuleDoc {
    #[serde(rename = "RuleID", default)]
    rule_id: String,
    #[serde(rename = "Enabled", default = "doc_default_enabled")]
    enabled: bool,
    #[serde(rename = "Parameters", default)]
    parameters: BTreeMap<String, String>,
}
