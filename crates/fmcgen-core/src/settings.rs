//! Settings contract for a generation run.
//!
//! The configuration file carries a `settings` list of single-key mappings:
//!
//! ```yaml
//! settings:
//!   - hosts_number: 10
//!   - access_control_policies_number: 1
//! ```
//!
//! Absent keys and counts `<= 0` mean "skip that generator".

use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use tracing::warn;

use crate::error::{Error, Result};

/// Every option recognized in the `settings` list.
pub const SETTING_KEYS: [&str; 14] = [
    "hosts_number",
    "networks_number",
    "ranges_number",
    "ports_number",
    "icmpv4s_number",
    "security_zones_number",
    "urls_number",
    "port_groups_number",
    "network_groups_number",
    "url_groups_number",
    "intrusion_policies_number",
    "access_control_policies_number",
    "access_control_categories_number",
    "access_control_rules_number",
];

/// Generation counts, one per recognized option. Each may appear as a
/// single-key entry of the `settings` list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct GenerationSettings {
    /// Number of host objects.
    pub hosts_number: i64,
    /// Number of network objects.
    pub networks_number: i64,
    /// Number of range objects.
    pub ranges_number: i64,
    /// Number of port objects.
    pub ports_number: i64,
    /// Number of ICMPv4 objects.
    pub icmpv4s_number: i64,
    /// Number of security zones.
    pub security_zones_number: i64,
    /// Number of URL objects.
    pub urls_number: i64,
    /// Number of port groups; needs ports or ICMPv4 objects.
    pub port_groups_number: i64,
    /// Number of network groups; needs hosts, networks or ranges.
    pub network_groups_number: i64,
    /// Number of URL groups; needs URL objects.
    pub url_groups_number: i64,
    /// Number of intrusion policies.
    pub intrusion_policies_number: i64,
    /// Number of access-control policies.
    pub access_control_policies_number: i64,
    /// Categories per access-control policy.
    pub access_control_categories_number: i64,
    /// Rules per access-control policy.
    pub access_control_rules_number: i64,
}

impl GenerationSettings {
    fn slot_mut(&mut self, key: &str) -> Option<&mut i64> {
        let slot = match key {
            "hosts_number" => &mut self.hosts_number,
            "networks_number" => &mut self.networks_number,
            "ranges_number" => &mut self.ranges_number,
            "ports_number" => &mut self.ports_number,
            "icmpv4s_number" => &mut self.icmpv4s_number,
            "security_zones_number" => &mut self.security_zones_number,
            "urls_number" => &mut self.urls_number,
            "port_groups_number" => &mut self.port_groups_number,
            "network_groups_number" => &mut self.network_groups_number,
            "url_groups_number" => &mut self.url_groups_number,
            "intrusion_policies_number" => &mut self.intrusion_policies_number,
            "access_control_policies_number" => &mut self.access_control_policies_number,
            "access_control_categories_number" => &mut self.access_control_categories_number,
            "access_control_rules_number" => &mut self.access_control_rules_number,
            _ => return None,
        };
        Some(slot)
    }

    /// Set a count by its settings key. Returns false for unknown keys.
    pub fn set(&mut self, key: &str, value: i64) -> bool {
        match self.slot_mut(key) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }
}

/// Read and parse a settings file.
pub fn load_settings(path: &Path) -> Result<GenerationSettings> {
    let content = std::fs::read_to_string(path).map_err(|err| match err.kind() {
        std::io::ErrorKind::NotFound => Error::ConfigNotFound(path.to_path_buf()),
        _ => Error::Io(err),
    })?;
    let document: Value = serde_yaml::from_str(&content)?;
    parse_settings(&document)
}

/// Flatten the `settings` list of a configuration document.
///
/// Later entries override earlier ones. Non-mapping entries are skipped and
/// unknown keys are ignored with a warning.
pub fn parse_settings(document: &Value) -> Result<GenerationSettings> {
    let entries = document.get("settings").ok_or(Error::SettingsMissing)?;
    let entries = entries
        .as_sequence()
        .ok_or_else(|| Error::InvalidSettings("'settings' must be a list".to_string()))?;

    let mut settings = GenerationSettings::default();
    for entry in entries {
        let Some(mapping) = entry.as_mapping() else {
            continue;
        };
        for (key, value) in mapping {
            let Some(key) = key.as_str() else {
                warn!(key = ?key, "ignoring non-string settings key");
                continue;
            };
            if !SETTING_KEYS.contains(&key) {
                warn!(key, "ignoring unknown setting");
                continue;
            }
            let Some(count) = value.as_i64() else {
                return Err(Error::InvalidSettings(format!(
                    "'{key}' must be an integer"
                )));
            };
            settings.set(key, count);
        }
    }

    Ok(settings)
}
