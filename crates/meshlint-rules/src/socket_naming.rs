//! Rule checking socket naming and placement.
//!
//! # Configuration
//!
//! - `Severity`: severity for naming violations (default warning)
//! - `NamingPrefix`: required socket name prefix; empty disables the prefix
//!   sub-check (default `Socket_`)
//! - `TransformWarningDistance`: socket offset distance from the origin
//!   that triggers a placement warning (default 100.0)
//! - `AllowAutoFix`: permit prefixing socket names (default true)

use meshlint_core::{AnalysisResult, CheckRule, FixAction, FixError, MeshAsset, Profile, Severity};

/// Rule id for the socket-naming check.
pub const RULE_ID: &str = "SM_SocketNaming";

/// Checks socket name prefixes and flags sockets placed suspiciously far
/// from the mesh. Sub-checks aggregate into one worst-severity finding.
#[derive(Debug, Default)]
pub struct SocketNamingRule;

impl SocketNamingRule {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl CheckRule for SocketNamingRule {
    fn rule_id(&self) -> &'static str {
        RULE_ID
    }

    fn description(&self) -> &'static str {
        "Checks socket naming conventions and socket placement"
    }

    fn check(&self, asset: &MeshAsset, profile: &Profile, out: &mut Vec<AnalysisResult>) -> bool {
        if !profile.is_rule_enabled(RULE_ID) || asset.sockets.is_empty() {
            return false;
        }

        let prefix = profile.rule_parameter(RULE_ID, "NamingPrefix", "Socket_");
        let distance_warning =
            profile.parameter_f32(RULE_ID, "TransformWarningDistance", 100.0);
        let severity = profile.parameter_severity(RULE_ID, "Severity", Severity::Warning);

        let misnamed: Vec<String> = if prefix.is_empty() {
            Vec::new()
        } else {
            asset
                .sockets
                .iter()
                .filter(|socket| !socket.name.starts_with(&prefix))
                .map(|socket| socket.name.clone())
                .collect()
        };

        let mut worst = None;
        let mut details = Vec::new();

        if !misnamed.is_empty() {
            worst = worst.max(Some(severity));
            details.push(format!(
                "socket(s) missing the '{prefix}' prefix: {}",
                misnamed.join(", ")
            ));
        }

        let stray: Vec<&str> = asset
            .sockets
            .iter()
            .filter(|socket| {
                let [x, y, z] = socket.offset;
                (x * x + y * y + z * z).sqrt() >= distance_warning
            })
            .map(|socket| socket.name.as_str())
            .collect();
        if !stray.is_empty() {
            worst = worst.max(Some(Severity::Warning));
            details.push(format!(
                "socket(s) placed over {distance_warning:.0} unit(s) from the origin: {}",
                stray.join(", ")
            ));
        }

        let Some(severity) = worst else {
            return false;
        };

        let mut result = AnalysisResult::new(
            asset.asset_ref(),
            severity,
            RULE_ID,
            format!(
                "static mesh '{}' has socket issues: {}",
                asset.name,
                details.join("; ")
            ),
        );

        let allow_fix = profile.parameter_bool(RULE_ID, "AllowAutoFix", true);
        if allow_fix && !misnamed.is_empty() && renames_are_unambiguous(asset, &prefix) {
            let source = asset.source.clone();
            let count = misnamed.len();
            result = result.with_fix(FixAction::new(
                format!("prefix {count} socket name(s) with '{prefix}'"),
                move || prefix_sockets(&source, &prefix),
            ));
        }

        out.push(result);
        true
    }
}

/// Prefixing must not collide with an existing socket name.
fn renames_are_unambiguous(asset: &MeshAsset, prefix: &str) -> bool {
    asset.sockets.iter().all(|socket| {
        socket.name.starts_with(prefix)
            || !asset
                .sockets
                .iter()
                .any(|other| other.name == format!("{prefix}{}", socket.name))
    })
}

fn prefix_sockets(source: &std::path::Path, prefix: &str) -> Result<(), FixError> {
    let mut asset = MeshAsset::load(source).map_err(|e| FixError::Stale(e.to_string()))?;
    for socket in &mut asset.sockets {
        if !socket.name.starts_with(prefix) {
            socket.name = format!("{prefix}{}", socket.name);
        }
    }
    asset.save()
}
