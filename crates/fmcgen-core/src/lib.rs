//! Core contracts for fmcgen.
//!
//! This crate defines the FMC object and policy records, the document shapes
//! they are emitted in, and the settings contract read from `cfg.yaml`.

pub mod document;
pub mod error;
pub mod objects;
pub mod policies;
pub mod settings;

pub use document::{Domain, ExistingDocument, FmcDocument, FmcTree, GLOBAL_DOMAIN};
pub use error::{Error, Result};
pub use objects::{
    Host, ICMPV4_CODES, Icmpv4, InterfaceType, IpRange, Ipv4Prefix, Named, Network, NetworkGroup,
    Port, PortGroup, PortRange, PortSpec, Protocol, Range, SecurityZone, Url, UrlGroup,
};
pub use policies::{
    AccessPolicy, AccessRule, BasePolicy, Category, DefaultAction, ExistingPolicy, InspectionMode,
    IntrusionPolicy, RuleAction, Section,
};
pub use settings::{GenerationSettings, SETTING_KEYS, load_settings, parse_settings};
