use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use fmcgen_core::{AccessPolicy, RuleAction, Section};
use fmcgen_generate::generators::policy::{
    AccessPolicyPools, AccessPolicyShape, access_policies, category_index,
};

fn names(kind: &str, count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("{kind}_{i}")).collect()
}

fn generate_with_pools(seed: u64, shape: AccessPolicyShape) -> Vec<AccessPolicy> {
    let network_objects = names("host", 12);
    let port_objects = names("port", 8);
    let security_zones = names("security_zone", 4);
    let intrusion_policies = names("intrusion_policy", 3);
    let url_objects = names("url", 5);
    let pools = AccessPolicyPools {
        network_objects: &network_objects,
        port_objects: &port_objects,
        security_zones: &security_zones,
        intrusion_policies: &intrusion_policies,
        url_objects: &url_objects,
    };
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    access_policies(shape, pools, &mut rng)
}

fn shape(policies: usize, categories: usize, rules: usize) -> AccessPolicyShape {
    AccessPolicyShape {
        policies,
        categories_per_policy: categories,
        rules_per_policy: rules,
    }
}

#[test]
fn logging_flags_follow_the_action() {
    for policy in generate_with_pools(1, shape(4, 6, 150)) {
        for rule in &policy.access_rules {
            assert!(rule.send_events_to_fmc);
            assert!(rule.log_connection_begin || rule.log_connection_end);
            match rule.action {
                RuleAction::Monitor => {
                    assert!(!rule.log_connection_begin);
                    assert!(rule.log_connection_end);
                }
                RuleAction::Block | RuleAction::BlockReset => {
                    assert!(rule.log_connection_begin);
                    assert!(!rule.log_connection_end);
                }
                _ => {}
            }
        }
    }
}

#[test]
fn intrusion_policies_only_on_permitting_actions() {
    let policies = generate_with_pools(2, shape(4, 2, 200));
    let mut attached = 0;
    for rule in policies.iter().flat_map(|policy| &policy.access_rules) {
        if rule.intrusion_policy.is_some() {
            attached += 1;
            assert!(matches!(
                rule.action,
                RuleAction::Allow | RuleAction::BlockInteractive
            ));
        }
    }
    assert!(attached > 0, "expected some rules to carry an intrusion policy");
}

#[test]
fn mandatory_categories_precede_default_ones() {
    for policy in generate_with_pools(3, shape(3, 7, 20)) {
        let sections: Vec<Section> = policy.categories.iter().map(|c| c.section).collect();
        let mut sorted = sections.clone();
        sorted.sort();
        assert_eq!(sections, sorted);
        assert_eq!(
            sections.iter().filter(|s| **s == Section::Mandatory).count(),
            3
        );
    }
}

#[test]
fn every_rule_references_a_category_of_its_policy() {
    for policy in generate_with_pools(4, shape(2, 3, 17)) {
        let categories: Vec<&str> = policy.category_names().collect();
        for rule in &policy.access_rules {
            let category = rule.category.as_deref().expect("category set");
            assert!(categories.contains(&category));
        }
    }
}

#[test]
fn attachments_stay_within_their_bounds() {
    for rule in generate_with_pools(5, shape(2, 2, 200))
        .iter()
        .flat_map(|policy| &policy.access_rules)
    {
        let within = |values: &Option<Vec<String>>, max: usize| {
            values
                .as_ref()
                .is_none_or(|values| (1..=max).contains(&values.len()))
        };
        assert!(within(&rule.source_zones, 3));
        assert!(within(&rule.destination_zones, 3));
        assert!(within(&rule.source_network_objects, 5));
        assert!(within(&rule.destination_network_objects, 5));
        assert!(within(&rule.destination_port_objects, 5));
        assert!(within(&rule.url_objects, 3));
    }
}

#[test]
fn names_are_sequential_per_policy() {
    let policies = generate_with_pools(6, shape(2, 2, 3));
    assert_eq!(policies[1].name, "access_policy_2");
    let rule_names: Vec<&str> = policies[1]
        .access_rules
        .iter()
        .map(|rule| rule.name.as_str())
        .collect();
    assert_eq!(rule_names, vec!["rule_2_1", "rule_2_2", "rule_2_3"]);
    assert_eq!(policies[1].categories[0].name, "category_2_1");
}

// Characterization: leftover rules pile onto the last category instead of
// being spread round-robin.
#[test]
fn remainder_rules_collapse_onto_last_category() {
    let indexes: Vec<Option<usize>> = (1..=10).map(|r| category_index(r, 10, 4)).collect();
    let expected = [0, 0, 1, 1, 2, 2, 3, 3, 3, 3].map(Some);
    assert_eq!(indexes, expected);
}

#[test]
fn fewer_rules_than_categories_get_one_category_each() {
    let indexes: Vec<Option<usize>> = (1..=2).map(|r| category_index(r, 2, 4)).collect();
    assert_eq!(indexes, vec![Some(0), Some(1)]);
}

#[test]
fn rules_without_categories_stay_uncategorized() {
    let policies = generate_with_pools(7, shape(1, 0, 5));
    assert_eq!(policies.len(), 1);
    assert!(policies[0].categories.is_empty());
    assert!(policies[0].access_rules.iter().all(|rule| rule.category.is_none()));
}

#[test]
fn categories_without_rules_still_make_a_policy() {
    let policies = generate_with_pools(8, shape(1, 3, 0));
    assert_eq!(policies[0].categories.len(), 3);
    assert!(policies[0].access_rules.is_empty());
}
