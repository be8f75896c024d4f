//! Document shapes consumed by the FMC declarative-config tooling.
//!
//! Every generated category is wrapped as
//! `fmc.domains[0].{objects|policies}.<type>: [...]` under the `Global` domain.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Name of the single domain every document targets.
pub const GLOBAL_DOMAIN: &str = "Global";

/// Top-level `fmc:` document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FmcDocument<T> {
    pub fmc: FmcTree<T>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FmcTree<T> {
    pub domains: Vec<Domain<T>>,
}

/// A domain holding either object lists or policy lists keyed by type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Domain<T> {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objects: Option<BTreeMap<String, Vec<T>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policies: Option<BTreeMap<String, Vec<T>>>,
}

impl<T> FmcDocument<T> {
    /// Wrap `items` under `objects.<object_type>`.
    pub fn objects(object_type: &str, items: Vec<T>) -> Self {
        Self::single_domain(Domain {
            name: GLOBAL_DOMAIN.to_string(),
            objects: Some(BTreeMap::from([(object_type.to_string(), items)])),
            policies: None,
        })
    }

    /// Wrap `items` under `policies.<policy_type>`.
    pub fn policies(policy_type: &str, items: Vec<T>) -> Self {
        Self::single_domain(Domain {
            name: GLOBAL_DOMAIN.to_string(),
            objects: None,
            policies: Some(BTreeMap::from([(policy_type.to_string(), items)])),
        })
    }

    fn single_domain(domain: Domain<T>) -> Self {
        Self {
            fmc: FmcTree {
                domains: vec![domain],
            },
        }
    }

    /// Items stored under `kind` in the first domain, objects or policies.
    pub fn items(&self, kind: &str) -> Option<&[T]> {
        let domain = self.fmc.domains.first()?;
        domain
            .objects
            .as_ref()
            .and_then(|objects| objects.get(kind))
            .or_else(|| domain.policies.as_ref().and_then(|p| p.get(kind)))
            .map(Vec::as_slice)
    }
}

/// Declaration of entities that already exist on the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExistingDocument<T> {
    pub existing: FmcDocument<T>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn objects_document_nests_under_global_domain() {
        let doc = FmcDocument::objects("hosts", vec!["host_1"]);
        let value = serde_json::to_value(&doc).expect("document");
        assert_eq!(
            value,
            serde_json::json!({
                "fmc": {"domains": [{"name": "Global", "objects": {"hosts": ["host_1"]}}]}
            })
        );
        assert_eq!(doc.items("hosts"), Some(&["host_1"][..]));
        assert_eq!(doc.items("networks"), None);
    }

    #[test]
    fn policies_document_omits_objects_key() {
        let doc = FmcDocument::policies("intrusion_policies", vec![1, 2]);
        let value = serde_json::to_value(&doc).expect("document");
        let domain = &value["fmc"]["domains"][0];
        assert!(domain.get("objects").is_none());
        assert_eq!(domain["policies"]["intrusion_policies"], serde_json::json!([1, 2]));
    }

    #[test]
    fn documents_read_back_without_the_other_section() {
        let yaml = "\
fmc:
  domains:
    - name: Global
      objects:
        hosts:
          - host_1
";
        let doc: FmcDocument<String> = serde_yaml::from_str(yaml).expect("objects document");
        assert_eq!(doc.fmc.domains[0].policies, None);
        assert_eq!(doc.items("hosts"), Some(&["host_1".to_string()][..]));

        let existing = ExistingDocument {
            existing: FmcDocument::policies("intrusion_policies", vec!["base".to_string()]),
        };
        let rendered = serde_yaml::to_string(&existing).expect("render");
        let back: ExistingDocument<String> = serde_yaml::from_str(&rendered).expect("read back");
        assert_eq!(back, existing);
        assert_eq!(back.existing.fmc.domains[0].objects, None);
    }
}
