//! SuiNS Core Library
//!
//! Canonical Sui identifiers and the per-network deployment registry shared by
//! the SuiNS tooling.

pub mod address;
pub mod registry;

pub use address::{AddressError, SuiAddress};
pub use registry::{Network, PackageInfo, RegistryError, Slot};
