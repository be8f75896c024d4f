use rand::Rng;

use fmcgen_core::{InterfaceType, SecurityZone};

use crate::sampling::{pick, sequential_name};

pub fn security_zones(count: usize, rng: &mut impl Rng) -> Vec<SecurityZone> {
    (1..=count)
        .map(|i| SecurityZone {
            name: sequential_name("security_zone", i),
            interface_type: pick(&InterfaceType::ALL, rng),
        })
        .collect()
}
