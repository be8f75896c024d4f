use serde::Serialize;

use fmcgen_core::{ExistingDocument, FmcDocument};

use crate::errors::GenerationError;

/// A document ready to be written, with the bookkeeping the run report needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub file_name: String,
    pub kind: String,
    pub records: usize,
    pub contents: String,
}

/// `fmc.domains[Global].objects.<object_type>` into `<object_type>.nac.yaml`.
pub fn render_objects<T: Serialize + Clone>(
    object_type: &str,
    items: &[T],
) -> Result<RenderedDocument, GenerationError> {
    let document = FmcDocument::objects(object_type, items.to_vec());
    Ok(RenderedDocument {
        file_name: format!("{object_type}.nac.yaml"),
        kind: object_type.to_string(),
        records: items.len(),
        contents: serde_yaml::to_string(&document)?,
    })
}

/// `fmc.domains[Global].policies.<policy_type>` into `file_name`.
pub fn render_policies<T: Serialize + Clone>(
    policy_type: &str,
    file_name: String,
    items: &[T],
) -> Result<RenderedDocument, GenerationError> {
    let document = FmcDocument::policies(policy_type, items.to_vec());
    Ok(RenderedDocument {
        file_name,
        kind: policy_type.to_string(),
        records: items.len(),
        contents: serde_yaml::to_string(&document)?,
    })
}

/// `existing.fmc.domains[Global].policies.<policy_type>` declaring entities
/// the platform already provides.
pub fn render_prerequisites<T: Serialize + Clone>(
    policy_type: &str,
    file_name: String,
    items: &[T],
) -> Result<RenderedDocument, GenerationError> {
    let document = ExistingDocument {
        existing: FmcDocument::policies(policy_type, items.to_vec()),
    };
    Ok(RenderedDocument {
        file_name,
        kind: format!("{policy_type}_existing"),
        records: items.len(),
        contents: serde_yaml::to_string(&document)?,
    })
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use fmcgen_core::Host;

    use super::*;

    #[test]
    fn objects_render_under_global_domain() {
        let hosts = vec![Host {
            name: "host_1".to_string(),
            ip: Ipv4Addr::new(10, 1, 2, 3),
        }];
        let rendered = render_objects("hosts", &hosts).expect("render");
        assert_eq!(rendered.file_name, "hosts.nac.yaml");
        assert_eq!(rendered.records, 1);
        assert!(rendered.contents.starts_with("fmc:\n"));

        let value: serde_yaml::Value = serde_yaml::from_str(&rendered.contents).expect("yaml");
        let host = &value["fmc"]["domains"][0]["objects"]["hosts"][0];
        assert_eq!(value["fmc"]["domains"][0]["name"].as_str(), Some("Global"));
        assert_eq!(host["name"].as_str(), Some("host_1"));
        assert_eq!(host["ip"].as_str(), Some("10.1.2.3"));
    }
}
