//! Day-one setup flows
//!
//! Two independent operations against the same resolved deployment:
//!
//! - [`DayOneSetup::create_display`] registers the `Display<DayOne>` object.
//!   It does not check chain state, so running it twice creates two displays.
//! - [`DayOneSetup::create_transfer_policy`] creates the `TransferPolicy<DayOne>`
//!   unless one already exists.
//!
//! Both append to a caller-owned [`TransactionBuilder`]; nothing is signed or
//! submitted here. Required registry fields are checked before any operation
//! is appended or any query is sent.
//!
//! Concurrent policy setups for the same network are not serialized: two runs
//! that both observe "no policy" will both emit a creation. Callers that may
//! run setups in parallel have to serialize them per network.

mod display;
mod transfer_policy;


use serde::Serialize;
use suins_core::{Network, PackageInfo, RegistryError, SuiAddress};
use thiserror::Error;

use crate::rpc::RpcError;

pub use display::DISPLAY_FIELDS;

/// Module and struct of the day-one NFT inside the SuiNS package
pub const DAY_ONE_TYPE_PATH: &str = "day_one::DayOne";

#[derive(Error, Debug)]
pub enum SetupError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("Transfer policy lookup failed: {0}")]
    Remote(#[from] RpcError),
}

/// Result of a transfer policy setup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SetupOutcome {
    /// Creation and cap transfer were appended to the transaction
    Created,
    /// A policy already exists; the transaction was left untouched
    Skipped { existing: usize },
}

impl SetupOutcome {
    pub fn is_created(&self) -> bool {
        matches!(self, SetupOutcome::Created)
    }
}

/// Fully qualified `DayOne` type for a package. Cheap; recompute it per use.
pub fn day_one_type(package_id: SuiAddress) -> String {
    format!("{package_id}::{DAY_ONE_TYPE_PATH}")
}

/// Addresses every setup operation needs, resolved up front
#[derive(Debug, Clone)]
struct Targets {
    asset_type: String,
    publisher: SuiAddress,
    admin: SuiAddress,
}

/// Setup flows bound to one network's deployment
#[derive(Debug, Clone, Copy)]
pub struct DayOneSetup<'a> {
    info: &'a PackageInfo,
}

impl DayOneSetup<'static> {
    /// Bind to the registry entry for `network`.
    pub fn for_network(network: Network) -> Self {
        Self::new(PackageInfo::resolve(network))
    }
}

impl<'a> DayOneSetup<'a> {
    pub fn new(info: &'a PackageInfo) -> Self {
        Self { info }
    }

    pub fn network(&self) -> Network {
        self.info.network
    }

    /// `DayOne` type for this deployment
    pub fn asset_type(&self) -> Result<String, SetupError> {
        Ok(day_one_type(self.info.package()?))
    }

    fn targets(&self) -> Result<Targets, SetupError> {
        Ok(Targets {
            asset_type: self.asset_type()?,
            publisher: self.info.publisher()?,
            admin: self.info.admin()?,
        })
    }
}
