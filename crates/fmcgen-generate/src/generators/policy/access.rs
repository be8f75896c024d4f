//! Access-control policy generation.
//!
//! Rules are built with their constraints applied up front; nothing is
//! validated after the fact:
//!
//! * MONITOR logs only at connection end.
//! * BLOCK and BLOCK_RESET log only at connection begin.
//! * Any other action logs at begin, end or both, never neither, since
//!   events are always sent to FMC.
//! * Intrusion policies attach only to ALLOW and BLOCK_INTERACTIVE rules.

use rand::Rng;
use rand::seq::IndexedRandom;

use fmcgen_core::{AccessPolicy, AccessRule, Category, DefaultAction, RuleAction, Section};

use crate::sampling::{maybe_sample, pick, sequential_name};

const ZONE_PROBABILITY: f64 = 0.3;
const ZONE_MAX: usize = 3;
const NETWORK_PROBABILITY: f64 = 0.5;
const NETWORK_MAX: usize = 5;
const PORT_PROBABILITY: f64 = 0.4;
const PORT_MAX: usize = 5;
const URL_PROBABILITY: f64 = 0.4;
const URL_MAX: usize = 3;
const INTRUSION_PROBABILITY: f64 = 0.3;

/// Names available for rules to reference.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessPolicyPools<'a> {
    pub network_objects: &'a [String],
    pub port_objects: &'a [String],
    pub security_zones: &'a [String],
    pub intrusion_policies: &'a [String],
    pub url_objects: &'a [String],
}

/// How many policies to build and how large each one is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessPolicyShape {
    pub policies: usize,
    pub categories_per_policy: usize,
    pub rules_per_policy: usize,
}

impl AccessPolicyShape {
    /// A policy needs at least one category or one rule to be worth emitting.
    pub fn is_generatable(&self) -> bool {
        self.policies > 0 && (self.categories_per_policy > 0 || self.rules_per_policy > 0)
    }
}

pub fn access_policies(
    shape: AccessPolicyShape,
    pools: AccessPolicyPools<'_>,
    rng: &mut impl Rng,
) -> Vec<AccessPolicy> {
    if !shape.is_generatable() {
        return Vec::new();
    }

    (1..=shape.policies)
        .map(|policy_number| {
            let categories = categories(policy_number, shape.categories_per_policy);
            let access_rules = (1..=shape.rules_per_policy)
                .map(|rule_number| {
                    let category = category_index(
                        rule_number,
                        shape.rules_per_policy,
                        categories.len(),
                    )
                    .map(|index| categories[index].name.clone());
                    access_rule(policy_number, rule_number, category, &pools, rng)
                })
                .collect();

            AccessPolicy {
                name: sequential_name("access_policy", policy_number),
                default_action: pick(&DefaultAction::ALL, rng),
                categories,
                access_rules,
            }
        })
        .collect()
}

/// `category_<p>_<n>`: the first half (rounded down) in the mandatory
/// section, the rest in the default section.
fn categories(policy_number: usize, count: usize) -> Vec<Category> {
    let mandatory = count / 2;
    (1..=count)
        .map(|number| Category {
            name: format!("category_{policy_number}_{number}"),
            section: if number <= mandatory {
                Section::Mandatory
            } else {
                Section::Default
            },
        })
        .collect()
}

/// Category slot for the 1-indexed `rule_number`.
///
/// Rules fill categories in blocks of `rules / categories`; the remainder all
/// lands on the last category rather than being spread out. With fewer rules
/// than categories each rule gets its own category. `None` when the policy
/// has no categories.
pub fn category_index(rule_number: usize, rules: usize, categories: usize) -> Option<usize> {
    if categories == 0 {
        return None;
    }
    let rules_per_category = (rules / categories).max(1);
    let index = rule_number.saturating_sub(1) / rules_per_category;
    Some(index.min(categories - 1))
}

fn access_rule(
    policy_number: usize,
    rule_number: usize,
    category: Option<String>,
    pools: &AccessPolicyPools<'_>,
    rng: &mut impl Rng,
) -> AccessRule {
    let action = pick(&RuleAction::ALL, rng);

    let source_zones = maybe_sample(pools.security_zones, ZONE_PROBABILITY, ZONE_MAX, rng);
    let destination_zones = maybe_sample(pools.security_zones, ZONE_PROBABILITY, ZONE_MAX, rng);
    let source_network_objects =
        maybe_sample(pools.network_objects, NETWORK_PROBABILITY, NETWORK_MAX, rng);
    let destination_network_objects =
        maybe_sample(pools.network_objects, NETWORK_PROBABILITY, NETWORK_MAX, rng);
    let destination_port_objects =
        maybe_sample(pools.port_objects, PORT_PROBABILITY, PORT_MAX, rng);
    let url_objects = maybe_sample(pools.url_objects, URL_PROBABILITY, URL_MAX, rng);

    let intrusion_policy = if !pools.intrusion_policies.is_empty()
        && action.accepts_intrusion_policy()
        && rng.random_bool(INTRUSION_PROBABILITY)
    {
        pools.intrusion_policies.choose(rng).cloned()
    } else {
        None
    };

    let (log_connection_begin, log_connection_end) = logging_flags(action, rng);

    AccessRule {
        name: format!("rule_{policy_number}_{rule_number}"),
        action,
        category,
        source_zones,
        destination_zones,
        source_network_objects,
        destination_network_objects,
        destination_port_objects,
        url_objects,
        intrusion_policy,
        send_events_to_fmc: true,
        log_connection_begin,
        log_connection_end,
    }
}

/// `(log_connection_begin, log_connection_end)` for `action`.
fn logging_flags(action: RuleAction, rng: &mut impl Rng) -> (bool, bool) {
    match action {
        RuleAction::Monitor => (false, true),
        RuleAction::Block | RuleAction::BlockReset => (true, false),
        _ => {
            let begin = rng.random_bool(0.5);
            let end = rng.random_bool(0.5);
            if begin || end {
                (begin, end)
            } else if rng.random_bool(0.5) {
                (true, false)
            } else {
                (false, true)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn categories_split_mandatory_first() {
        let categories = categories(2, 5);
        let sections: Vec<Section> = categories.iter().map(|c| c.section).collect();
        assert_eq!(
            sections,
            vec![
                Section::Mandatory,
                Section::Mandatory,
                Section::Default,
                Section::Default,
                Section::Default,
            ]
        );
        assert_eq!(categories[0].name, "category_2_1");
        assert_eq!(categories[4].name, "category_2_5");
    }

    #[test]
    fn logging_never_disables_both_flags() {
        let mut rng = ChaCha8Rng::seed_from_u64(41);
        for _ in 0..200 {
            for action in RuleAction::ALL {
                let (begin, end) = logging_flags(action, &mut rng);
                assert!(begin || end);
            }
        }
    }

    #[test]
    fn empty_shape_generates_nothing() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let shape = AccessPolicyShape {
            policies: 3,
            categories_per_policy: 0,
            rules_per_policy: 0,
        };
        assert!(access_policies(shape, AccessPolicyPools::default(), &mut rng).is_empty());
    }
}
