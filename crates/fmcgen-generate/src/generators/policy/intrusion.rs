use rand::Rng;

use fmcgen_core::{BasePolicy, ExistingPolicy, InspectionMode, IntrusionPolicy};

use crate::sampling::{pick, sequential_name};

pub fn intrusion_policies(count: usize, rng: &mut impl Rng) -> Vec<IntrusionPolicy> {
    (1..=count)
        .map(|i| IntrusionPolicy {
            name: sequential_name("intrusion_policy", i),
            inspection_mode: pick(&InspectionMode::ALL, rng),
            base_policy: pick(&BasePolicy::ALL, rng),
        })
        .collect()
}

/// The base-policy catalog, declared as pre-existing so generated intrusion
/// policies can reference it.
pub fn existing_base_policies() -> Vec<ExistingPolicy> {
    BasePolicy::ALL
        .iter()
        .map(|policy| ExistingPolicy {
            name: policy.as_str().to_string(),
        })
        .collect()
}
