use std::path::PathBuf;
use std::time::Instant;

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use fmcgen_core::{
    AccessPolicy, GenerationSettings, Host, Icmpv4, IntrusionPolicy, Network, NetworkGroup, Port,
    PortGroup, Range, SecurityZone, Url, UrlGroup,
};

use crate::errors::GenerationError;
use crate::generators::policy::{self, AccessPolicyShape};
use crate::generators::{network, service, url, zone};
use crate::model::{GenerateOptions, GenerationReport};
use crate::output::{
    RenderedDocument, clear_output_dir, render_objects, render_policies, render_prerequisites,
    write_bytes_atomic,
};
use crate::registry::ObjectRegistry;
use crate::sampling::stage_rng;

/// Everything generated in one run, in emission order. Skipped categories
/// are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedConfig {
    pub hosts: Vec<Host>,
    pub networks: Vec<Network>,
    pub ranges: Vec<Range>,
    pub ports: Vec<Port>,
    pub icmpv4s: Vec<Icmpv4>,
    pub security_zones: Vec<SecurityZone>,
    pub urls: Vec<Url>,
    pub port_groups: Vec<PortGroup>,
    pub network_groups: Vec<NetworkGroup>,
    pub url_groups: Vec<UrlGroup>,
    pub intrusion_policies: Vec<IntrusionPolicy>,
    pub access_policies: Vec<AccessPolicy>,
}

impl GeneratedConfig {
    /// Render one document per non-empty category, in dependency order.
    ///
    /// The intrusion-policy prerequisites precede the intrusion policies, and
    /// every access policy gets a document of its own.
    pub fn documents(&self) -> Result<Vec<RenderedDocument>, GenerationError> {
        let mut documents = Vec::new();

        push_objects(&mut documents, "hosts", &self.hosts)?;
        push_objects(&mut documents, "networks", &self.networks)?;
        push_objects(&mut documents, "ranges", &self.ranges)?;
        push_objects(&mut documents, "ports", &self.ports)?;
        push_objects(&mut documents, "icmpv4s", &self.icmpv4s)?;
        push_objects(&mut documents, "security_zones", &self.security_zones)?;
        push_objects(&mut documents, "urls", &self.urls)?;
        push_objects(&mut documents, "port_groups", &self.port_groups)?;
        push_objects(&mut documents, "network_groups", &self.network_groups)?;
        push_objects(&mut documents, "url_groups", &self.url_groups)?;

        if !self.intrusion_policies.is_empty() {
            documents.push(render_prerequisites(
                "intrusion_policies",
                "intrusion_policies_existing.nac.yaml".to_string(),
                &policy::existing_base_policies(),
            )?);
            documents.push(render_policies(
                "intrusion_policies",
                "intrusion_policies.nac.yaml".to_string(),
                &self.intrusion_policies,
            )?);
        }

        for access_policy in &self.access_policies {
            documents.push(render_policies(
                "access_policies",
                format!("access_policies_{}.nac.yaml", access_policy.name),
                std::slice::from_ref(access_policy),
            )?);
        }

        Ok(documents)
    }
}

fn push_objects<T: serde::Serialize + Clone>(
    documents: &mut Vec<RenderedDocument>,
    object_type: &str,
    items: &[T],
) -> Result<(), GenerationError> {
    if !items.is_empty() {
        documents.push(render_objects(object_type, items)?);
    }
    Ok(())
}

/// Negative counts mean "generate nothing".
fn requested(count: i64) -> usize {
    usize::try_from(count).unwrap_or(0)
}

/// Run one stage with its own RNG, or skip it when nothing is requested.
fn stage<T>(
    seed: u64,
    kind: &str,
    count: i64,
    build: impl FnOnce(usize, &mut ChaCha8Rng) -> Vec<T>,
) -> Vec<T> {
    let count = requested(count);
    if count == 0 {
        debug!(kind, "stage skipped");
        return Vec::new();
    }
    info!(kind, count, "generating");
    let mut rng = stage_rng(seed, kind);
    build(count, &mut rng)
}

/// Like [`stage`], but also skipped when the pool it draws members from is empty.
fn group_stage<T>(
    seed: u64,
    kind: &str,
    count: i64,
    pool: &[String],
    build: impl FnOnce(usize, &[String], &mut ChaCha8Rng) -> Vec<T>,
) -> Vec<T> {
    if pool.is_empty() {
        debug!(kind, "stage skipped, no objects to reference");
        return Vec::new();
    }
    stage(seed, kind, count, |count, rng| build(count, pool, rng))
}

/// Generate every category requested by `settings`, deterministically for `seed`.
pub fn generate(settings: &GenerationSettings, seed: u64) -> GeneratedConfig {
    let mut registry = ObjectRegistry::new();
    let mut config = GeneratedConfig::default();

    config.hosts = stage(seed, "hosts", settings.hosts_number, |n, rng| {
        network::hosts(n, rng)
    });
    ObjectRegistry::merge(&mut registry.network_objects, &config.hosts);

    config.networks = stage(seed, "networks", settings.networks_number, |n, rng| {
        network::networks(n, rng)
    });
    ObjectRegistry::merge(&mut registry.network_objects, &config.networks);

    config.ranges = stage(seed, "ranges", settings.ranges_number, |n, rng| {
        network::ranges(n, rng)
    });
    ObjectRegistry::merge(&mut registry.network_objects, &config.ranges);

    config.ports = stage(seed, "ports", settings.ports_number, |n, rng| {
        service::ports(n, rng)
    });
    ObjectRegistry::merge(&mut registry.port_objects, &config.ports);

    config.icmpv4s = stage(seed, "icmpv4s", settings.icmpv4s_number, |n, rng| {
        service::icmpv4s(n, rng)
    });
    ObjectRegistry::merge(&mut registry.port_objects, &config.icmpv4s);

    config.security_zones = stage(
        seed,
        "security_zones",
        settings.security_zones_number,
        |n, rng| zone::security_zones(n, rng),
    );
    ObjectRegistry::merge(&mut registry.security_zones, &config.security_zones);

    config.urls = stage(seed, "urls", settings.urls_number, |n, rng| url::urls(n, rng));
    ObjectRegistry::merge(&mut registry.url_objects, &config.urls);

    config.port_groups = group_stage(
        seed,
        "port_groups",
        settings.port_groups_number,
        &registry.port_objects,
        |n, pool, rng| service::port_groups(n, pool, rng),
    );
    ObjectRegistry::merge(&mut registry.port_objects, &config.port_groups);

    config.network_groups = group_stage(
        seed,
        "network_groups",
        settings.network_groups_number,
        &registry.network_objects,
        |n, pool, rng| network::network_groups(n, pool, rng),
    );
    ObjectRegistry::merge(&mut registry.network_objects, &config.network_groups);

    config.url_groups = group_stage(
        seed,
        "url_groups",
        settings.url_groups_number,
        &registry.url_objects,
        |n, pool, rng| url::url_groups(n, pool, rng),
    );
    ObjectRegistry::merge(&mut registry.url_objects, &config.url_groups);

    config.intrusion_policies = stage(
        seed,
        "intrusion_policies",
        settings.intrusion_policies_number,
        |n, rng| policy::intrusion_policies(n, rng),
    );
    ObjectRegistry::merge(&mut registry.intrusion_policies, &config.intrusion_policies);

    let shape = AccessPolicyShape {
        policies: requested(settings.access_control_policies_number),
        categories_per_policy: requested(settings.access_control_categories_number),
        rules_per_policy: requested(settings.access_control_rules_number),
    };
    if shape.is_generatable() {
        info!(
            kind = "access_policies",
            count = shape.policies,
            categories = shape.categories_per_policy,
            rules = shape.rules_per_policy,
            "generating"
        );
        let mut rng = stage_rng(seed, "access_policies");
        config.access_policies =
            policy::access_policies(shape, registry.access_policy_pools(), &mut rng);
    } else {
        debug!(kind = "access_policies", "stage skipped");
    }

    config
}

/// Result of a generation run.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub out_dir: PathBuf,
    pub report: GenerationReport,
    pub config: GeneratedConfig,
}

/// Entry point for generating and writing a full set of documents.
#[derive(Debug, Clone)]
pub struct GenerationEngine {
    options: GenerateOptions,
}

impl GenerationEngine {
    pub fn new(options: GenerateOptions) -> Self {
        Self { options }
    }

    pub fn run(&self, settings: &GenerationSettings) -> Result<GenerationResult, GenerationError> {
        let start = Instant::now();
        let seed = self.options.seed.unwrap_or_else(|| rand::rng().random());
        let out_dir = self.options.out_dir.clone();
        let mut report = GenerationReport::new(seed, out_dir.clone());

        info!(
            run_id = %report.run_id,
            seed,
            out_dir = %out_dir.display(),
            "generation started"
        );

        if self.options.clear_output {
            let removed = clear_output_dir(&out_dir)?;
            info!(removed, "output directory cleared");
        } else {
            std::fs::create_dir_all(&out_dir)?;
        }

        let config = generate(settings, seed);
        for document in config.documents()? {
            let path = out_dir.join(&document.file_name);
            write_bytes_atomic(&path, document.contents.as_bytes())?;
            info!(
                file = %document.file_name,
                records = document.records,
                "document written"
            );
            report.record_file(&document.file_name, &document.kind, document.records);
        }

        report.duration_ms = start.elapsed().as_millis() as u64;
        info!(
            run_id = %report.run_id,
            files = report.files.len(),
            records = report.records_total(),
            duration_ms = report.duration_ms,
            "generation completed"
        );

        Ok(GenerationResult {
            out_dir,
            report,
            config,
        })
    }
}
