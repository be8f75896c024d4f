//! Object and policy generators.
//!
//! Every generator takes a count and an explicit RNG and returns records
//! named `<kind>_<i>` (1-indexed). Generators that reference other objects
//! receive a read-only pool of names; merging new names back is the
//! caller's job (see [`ObjectRegistry`](crate::registry::ObjectRegistry)).

pub mod network;
pub mod policy;
pub mod service;
pub mod url;
pub mod zone;
