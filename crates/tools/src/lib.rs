//! SuiNS Tools Library
//!
//! Runtime configuration, the day-one setup flows and the plumbing they
//! need: a transaction builder and a read-only fullnode client.

pub mod config;
pub mod logging;
pub mod rpc;
pub mod setup;
pub mod tx;

pub use config::{Config, ConfigError};
pub use rpc::{RemoteState, RpcError, SuiRpcClient, TransferPolicyRecord};
pub use setup::{day_one_type, DayOneSetup, SetupError, SetupOutcome};
pub use suins_core::{Network, PackageInfo, SuiAddress};
pub use tx::{ProgrammableTransaction, SetupTransaction, TransactionBuilder};
