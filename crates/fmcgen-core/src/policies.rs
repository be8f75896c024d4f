use serde::{Deserialize, Serialize};

use crate::objects::Named;

/// Inspection mode of an intrusion policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InspectionMode {
    Detection,
    Prevention,
}

impl InspectionMode {
    pub const ALL: [InspectionMode; 2] = [InspectionMode::Detection, InspectionMode::Prevention];
}

/// Platform-provided base policies an intrusion policy can derive from.
///
/// Names are case sensitive on the platform side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BasePolicy {
    #[serde(rename = "Balanced Security and Connectivity")]
    BalancedSecurityAndConnectivity,
    #[serde(rename = "Security Over Connectivity")]
    SecurityOverConnectivity,
}

impl BasePolicy {
    pub const ALL: [BasePolicy; 2] = [
        BasePolicy::BalancedSecurityAndConnectivity,
        BasePolicy::SecurityOverConnectivity,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BasePolicy::BalancedSecurityAndConnectivity => "Balanced Security and Connectivity",
            BasePolicy::SecurityOverConnectivity => "Security Over Connectivity",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntrusionPolicy {
    pub name: String,
    pub inspection_mode: InspectionMode,
    pub base_policy: BasePolicy,
}

impl Named for IntrusionPolicy {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Reference to a policy that already exists on the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingPolicy {
    pub name: String,
}

/// Section of an access policy a category belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Mandatory,
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub section: Section,
}

/// Action taken by an access rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleAction {
    Allow,
    Trust,
    Block,
    Monitor,
    BlockReset,
    BlockInteractive,
}

impl RuleAction {
    pub const ALL: [RuleAction; 6] = [
        RuleAction::Allow,
        RuleAction::Trust,
        RuleAction::Block,
        RuleAction::Monitor,
        RuleAction::BlockReset,
        RuleAction::BlockInteractive,
    ];

    /// Intrusion policies cannot be attached to BLOCK, TRUST, BLOCK_RESET or
    /// MONITOR rules.
    pub fn accepts_intrusion_policy(self) -> bool {
        !matches!(
            self,
            RuleAction::Block | RuleAction::Trust | RuleAction::BlockReset | RuleAction::Monitor
        )
    }
}

/// Action applied to traffic no rule matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DefaultAction {
    Block,
    Trust,
    Permit,
    NetworkDiscovery,
}

impl DefaultAction {
    pub const ALL: [DefaultAction; 4] = [
        DefaultAction::Block,
        DefaultAction::Trust,
        DefaultAction::Permit,
        DefaultAction::NetworkDiscovery,
    ];
}

/// A single access-control rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRule {
    pub name: String,
    pub action: RuleAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_zones: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_zones: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_network_objects: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_network_objects: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_port_objects: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_objects: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intrusion_policy: Option<String>,
    pub send_events_to_fmc: bool,
    pub log_connection_begin: bool,
    pub log_connection_end: bool,
}

/// An access-control policy with its categories and rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessPolicy {
    pub name: String,
    pub default_action: DefaultAction,
    pub categories: Vec<Category>,
    pub access_rules: Vec<AccessRule>,
}

impl AccessPolicy {
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|category| category.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_use_wire_spelling() {
        let value = serde_json::to_value(RuleAction::BlockInteractive).expect("action");
        assert_eq!(value, serde_json::json!("BLOCK_INTERACTIVE"));
        let value = serde_json::to_value(DefaultAction::NetworkDiscovery).expect("default");
        assert_eq!(value, serde_json::json!("NETWORK_DISCOVERY"));
    }

    #[test]
    fn base_policy_serializes_to_platform_name() {
        for policy in BasePolicy::ALL {
            let value = serde_json::to_value(policy).expect("base policy");
            assert_eq!(value, serde_json::json!(policy.as_str()));
        }
    }

    #[test]
    fn only_allow_and_interactive_accept_intrusion_policy() {
        let accepting: Vec<RuleAction> = RuleAction::ALL
            .into_iter()
            .filter(|action| action.accepts_intrusion_policy())
            .collect();
        assert_eq!(
            accepting,
            vec![RuleAction::Allow, RuleAction::BlockInteractive]
        );
    }
}
