//! Intrusion and access-control policy generators.

pub mod access;
pub mod intrusion;

pub use access::{AccessPolicyPools, AccessPolicyShape, access_policies, category_index};
pub use intrusion::{existing_base_policies, intrusion_policies};
