use rand::Rng;
use rand::seq::IndexedRandom;

use fmcgen_core::{Url, UrlGroup};

use crate::sampling::{pick, sequential_name};

const SUBDOMAINS: [&str; 20] = [
    "www", "api", "app", "web", "portal", "admin", "test", "dev", "staging", "prod", "mail",
    "shop", "store", "blog", "news", "support", "help", "docs", "wiki", "cdn",
];

const GROUP_MIN_REFERENCES: usize = 2;
const GROUP_MAX_REFERENCES: usize = 4;
const GROUP_MAX_LITERALS: usize = 3;

fn random_url(rng: &mut impl Rng) -> String {
    format!("https://{}.example.com", pick(&SUBDOMAINS, rng))
}

pub fn urls(count: usize, rng: &mut impl Rng) -> Vec<Url> {
    (1..=count)
        .map(|i| Url {
            name: sequential_name("url", i),
            url: random_url(rng),
        })
        .collect()
}

/// URL groups with 2..=4 references into `pool` and 1..=3 distinct literals.
pub fn url_groups(count: usize, pool: &[String], rng: &mut impl Rng) -> Vec<UrlGroup> {
    (1..=count)
        .map(|i| UrlGroup {
            name: sequential_name("url_group", i),
            urls: url_references(pool, rng),
            literals: url_literals(rng),
        })
        .collect()
}

fn url_references(pool: &[String], rng: &mut impl Rng) -> Vec<String> {
    if pool.len() < GROUP_MIN_REFERENCES {
        return pool.to_vec();
    }
    let amount = rng.random_range(GROUP_MIN_REFERENCES..=GROUP_MAX_REFERENCES.min(pool.len()));
    pool.choose_multiple(rng, amount).cloned().collect()
}

fn url_literals(rng: &mut impl Rng) -> Vec<String> {
    let target = rng.random_range(1..=GROUP_MAX_LITERALS);
    let mut literals = Vec::with_capacity(target);
    while literals.len() < target {
        let literal = random_url(rng);
        if !literals.contains(&literal) {
            literals.push(literal);
        }
    }
    literals
}
