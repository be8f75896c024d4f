use fmcgen_core::Named;

use crate::generators::policy::AccessPolicyPools;

/// Append-only name pools threaded through a generation run.
///
/// Generators read slices of these pools; the engine merges the names of
/// newly generated records back in before the next stage runs.
#[derive(Debug, Clone, Default)]
pub struct ObjectRegistry {
    /// Hosts, networks, ranges and network groups.
    pub network_objects: Vec<String>,
    /// Ports, ICMPv4 objects and port groups.
    pub port_objects: Vec<String>,
    /// URLs and URL groups.
    pub url_objects: Vec<String>,
    pub security_zones: Vec<String>,
    pub intrusion_policies: Vec<String>,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the name of every record to `pool`.
    pub fn merge<T: Named>(pool: &mut Vec<String>, records: &[T]) {
        pool.extend(records.iter().map(|record| record.name().to_string()));
    }

    pub fn access_policy_pools(&self) -> AccessPolicyPools<'_> {
        AccessPolicyPools {
            network_objects: &self.network_objects,
            port_objects: &self.port_objects,
            security_zones: &self.security_zones,
            intrusion_policies: &self.intrusion_policies,
            url_objects: &self.url_objects,
        }
    }
}
