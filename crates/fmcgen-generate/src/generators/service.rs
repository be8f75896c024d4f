use rand::Rng;

use fmcgen_core::{ICMPV4_CODES, Icmpv4, Port, PortGroup, PortRange, PortSpec, Protocol};

use crate::sampling::{pick, sample_or_all, sequential_name};

const MIN_PORT: u16 = 1024;
const MAX_PORT: u16 = 65535;
const MAX_RANGE_START: u16 = 60000;
const MAX_RANGE_WIDTH: u16 = 100;

const GROUP_MIN_MEMBERS: usize = 2;
const GROUP_MAX_MEMBERS: usize = 6;

/// Port objects mixing single ports and ranges over TCP, UDP and ESP.
pub fn ports(count: usize, rng: &mut impl Rng) -> Vec<Port> {
    (1..=count)
        .map(|i| {
            let is_range = rng.random_bool(0.5);
            let protocol = pick(&Protocol::ALL, rng);
            let port = protocol
                .has_ports()
                .then(|| random_port_spec(is_range, rng));
            Port {
                name: sequential_name("port", i),
                protocol,
                port,
            }
        })
        .collect()
}

fn random_port_spec(is_range: bool, rng: &mut impl Rng) -> PortSpec {
    if !is_range {
        return PortSpec::Single(rng.random_range(MIN_PORT..=MAX_PORT));
    }
    let start = rng.random_range(MIN_PORT..=MAX_RANGE_START);
    let end = start
        .saturating_add(rng.random_range(1..=MAX_RANGE_WIDTH))
        .min(MAX_PORT);
    match PortRange::new(start, end) {
        Ok(range) => PortSpec::Range(range),
        Err(_) => PortSpec::Single(start),
    }
}

/// ICMPv4 objects with a valid type/code pair: type first, then one of its codes.
pub fn icmpv4s(count: usize, rng: &mut impl Rng) -> Vec<Icmpv4> {
    (1..=count)
        .map(|i| {
            let (icmp_type, codes) = pick(ICMPV4_CODES, rng);
            Icmpv4 {
                name: sequential_name("icmpv4", i),
                icmp_type,
                code: pick(codes, rng),
            }
        })
        .collect()
}

/// Port groups of 2..=6 port or ICMPv4 references.
pub fn port_groups(count: usize, pool: &[String], rng: &mut impl Rng) -> Vec<PortGroup> {
    (1..=count)
        .map(|i| {
            let size = rng.random_range(GROUP_MIN_MEMBERS..=GROUP_MAX_MEMBERS);
            PortGroup {
                name: sequential_name("port_group", i),
                objects: sample_or_all(pool, size, rng),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn esp_ports_carry_no_port_number() {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        for port in ports(300, &mut rng) {
            match (port.protocol, port.port) {
                (Protocol::Esp, spec) => assert_eq!(spec, None),
                (_, Some(PortSpec::Single(value))) => assert!(value >= MIN_PORT),
                (_, Some(PortSpec::Range(range))) => {
                    assert!(range.start() >= MIN_PORT);
                    assert!(range.start() < range.end());
                    assert!(range.end() - range.start() <= MAX_RANGE_WIDTH);
                }
                (protocol, None) => panic!("{protocol:?} port without number"),
            }
        }
    }

    #[test]
    fn icmp_pairs_come_from_the_table() {
        let mut rng = ChaCha8Rng::seed_from_u64(22);
        let objects = icmpv4s(300, &mut rng);
        assert!(objects.iter().all(Icmpv4::is_valid_combination));
        assert_eq!(objects[299].name, "icmpv4_300");
    }

    #[test]
    fn port_groups_sample_between_two_and_six() {
        let mut rng = ChaCha8Rng::seed_from_u64(23);
        let pool: Vec<String> = (1..=10).map(|i| format!("port_{i}")).collect();
        for group in port_groups(50, &pool, &mut rng) {
            assert!((2..=6).contains(&group.objects.len()));
            assert!(group.objects.iter().all(|name| pool.contains(name)));
        }
    }
}
