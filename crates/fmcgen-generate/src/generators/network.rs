use rand::Rng;

use fmcgen_core::{Host, IpRange, Network, NetworkGroup, Range};

use crate::sampling::{random_host_ip, random_prefix, sample_or_all, sequential_name};

const GROUP_MIN_MEMBERS: usize = 3;
const GROUP_MAX_MEMBERS: usize = 5;

pub fn hosts(count: usize, rng: &mut impl Rng) -> Vec<Host> {
    (1..=count)
        .map(|i| Host {
            name: sequential_name("host", i),
            ip: random_host_ip(rng),
        })
        .collect()
}

pub fn networks(count: usize, rng: &mut impl Rng) -> Vec<Network> {
    (1..=count)
        .map(|i| Network {
            name: sequential_name("network", i),
            prefix: random_prefix(rng),
        })
        .collect()
}

/// Ranges between two random host addresses, start never after end.
pub fn ranges(count: usize, rng: &mut impl Rng) -> Vec<Range> {
    (1..=count)
        .map(|i| {
            let first = random_host_ip(rng);
            let second = random_host_ip(rng);
            Range {
                name: sequential_name("range", i),
                ip_range: IpRange::ordered(first, second),
            }
        })
        .collect()
}

/// Network groups of 3..=5 members drawn from `pool`.
///
/// Each group becomes a candidate member for the groups generated after it
/// in the same batch.
pub fn network_groups(count: usize, pool: &[String], rng: &mut impl Rng) -> Vec<NetworkGroup> {
    let mut candidates = pool.to_vec();
    let mut groups = Vec::with_capacity(count);

    for i in 1..=count {
        let size = rng.random_range(GROUP_MIN_MEMBERS..=GROUP_MAX_MEMBERS);
        let group = NetworkGroup {
            name: sequential_name("network_group", i),
            objects: sample_or_all(&candidates, size, rng),
        };
        candidates.push(group.name.clone());
        groups.push(group);
    }

    groups
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn hosts_are_named_sequentially_inside_ten_slash_eight() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let hosts = hosts(25, &mut rng);
        assert_eq!(hosts.len(), 25);
        for (i, host) in hosts.iter().enumerate() {
            assert_eq!(host.name, format!("host_{}", i + 1));
            let octets = host.ip.octets();
            assert_eq!(octets[0], 10);
            assert!((1..=254).contains(&octets[3]));
        }
    }

    #[test]
    fn ranges_never_start_after_they_end() {
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        for range in ranges(500, &mut rng) {
            assert!(range.ip_range.start().octets() <= range.ip_range.end().octets());
        }
    }

    #[test]
    fn later_groups_may_reference_earlier_groups() {
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        let pool = vec!["host_1".to_string()];
        let groups = network_groups(3, &pool, &mut rng);

        // Pools smaller than the group size are used whole.
        assert_eq!(groups[0].objects, vec!["host_1"]);
        assert_eq!(groups[1].objects, vec!["host_1", "network_group_1"]);
        let mut third = groups[2].objects.clone();
        third.sort();
        assert_eq!(third, vec!["host_1", "network_group_1", "network_group_2"]);
    }

    #[test]
    fn groups_reference_only_known_names() {
        let mut rng = ChaCha8Rng::seed_from_u64(14);
        let pool: Vec<String> = (1..=8).map(|i| format!("network_{i}")).collect();
        let groups = network_groups(10, &pool, &mut rng);
        for (index, group) in groups.iter().enumerate() {
            assert!((3..=5).contains(&group.objects.len()));
            for member in &group.objects {
                let earlier_group = groups[..index].iter().any(|g| &g.name == member);
                assert!(pool.contains(member) || earlier_group, "{member} unknown");
            }
        }
    }
}
