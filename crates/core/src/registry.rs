//! Per-network SuiNS deployment registry
//!
//! One [`PackageInfo`] per [`Network`], built once as `static` data. Every
//! identifier literal goes through the same normalizer as runtime input, so a
//! value entered as `0xABC` and one entered fully padded compare equal.
//! Components that have not been deployed on a network yet are recorded as
//! [`Slot::Pending`] and refuse to hand out an address.
//!
//! # Examples
//!
//! ```rust
//! use suins_core::registry::{Network, PackageInfo};
//!
//! let info = PackageInfo::resolve(Network::Testnet);
//! assert!(info.discord.is_some());
//! assert!(info.package().is_ok());
//! ```

use crate::address::SuiAddress;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Registry error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Invalid network: {0}. Must be: mainnet or testnet")]
    UnknownNetwork(String),

    #[error("{field} is not yet deployed on {network}")]
    Placeholder {
        network: Network,
        field: &'static str,
    },
}

/// Networks the SuiNS packages are deployed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Sui Mainnet - production
    Mainnet,
    /// Sui Testnet
    Testnet,
}

impl Network {
    pub const ALL: [Network; 2] = [Network::Mainnet, Network::Testnet];

    /// Get network as string
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
        }
    }

    /// Get the public fullnode JSON-RPC endpoint for this network
    pub fn default_rpc_url(&self) -> &'static str {
        match self {
            Network::Mainnet => "https://fullnode.mainnet.sui.io:443",
            Network::Testnet => "https://fullnode.testnet.sui.io:443",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Network {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mainnet" => Ok(Network::Mainnet),
            "testnet" => Ok(Network::Testnet),
            other => Err(RegistryError::UnknownNetwork(other.to_string())),
        }
    }
}

/// An identifier that is either deployed or still waiting to be filled in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Slot {
    Assigned(SuiAddress),
    Pending,
}

impl Slot {
    /// Assigned slot from a literal, normalized at compile time.
    pub const fn id(raw: &'static str) -> Self {
        Slot::Assigned(SuiAddress::from_static(raw))
    }

    pub fn address(&self) -> Option<SuiAddress> {
        match self {
            Slot::Assigned(addr) => Some(*addr),
            Slot::Pending => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Slot::Pending)
    }

    /// Return the address or fail with `RegistryError::Placeholder`.
    pub fn require(&self, network: Network, field: &'static str) -> Result<SuiAddress, RegistryError> {
        self.address()
            .ok_or(RegistryError::Placeholder { network, field })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscountsPackage {
    pub package_id: Slot,
    pub discount_house_id: Slot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscordConfig {
    pub package_id: Slot,
    pub discord_cap: Slot,
    pub discord_object_id: Slot,
    pub discord_table_id: Slot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CouponsPackage {
    pub package_id: Slot,
}

/// Deployed SuiNS objects and packages on one network
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageInfo {
    pub network: Network,
    pub package_id: Slot,
    pub registration_package_id: Slot,
    pub upgrade_cap: Option<SuiAddress>,
    pub publisher_id: Slot,
    /// Recipient of objects created by setup transactions
    pub admin_address: Slot,
    pub admin_cap: Slot,
    pub suins: Slot,
    pub display_object: Option<SuiAddress>,
    pub direct_setup_package_id: Slot,
    pub discounts: DiscountsPackage,
    pub renewals_package_id: Slot,
    pub subnames_package_id: Slot,
    pub temp_subdomains_proxy_package_id: Slot,
    pub discord: Option<DiscordConfig>,
    pub coupons: CouponsPackage,
}

static MAINNET: PackageInfo = PackageInfo {
    network: Network::Mainnet,
    package_id: Slot::id("0xd22b24490e0bae52676651b4f56660a5ff8022a2576e0089f79b3c88d44e08f0"),
    registration_package_id: Slot::id(
        "0x9d451fa0139fef8f7c1f0bd5d7e45b7fa9dbb84c2e63c2819c7abd0a7f7d749d",
    ),
    upgrade_cap: Some(SuiAddress::from_static(
        "0x9cda28244a0d0de294d2b271e772a9c33eb47d316c59913d7369b545b4af098c",
    )),
    publisher_id: Slot::id("0x7339f23f06df3601167d67a31752781d307136fd18304c48c928778e752caae1"),
    admin_address: Slot::id("0xa81a2328b7bbf70ab196d6aca400b5b0721dec7615bf272d95e0b0df04517e72"),
    admin_cap: Slot::id("0x3f8d702d90c572b60ac692fb5074f7a7ac350b80d9c59eab4f6b7692786cae0a"),
    suins: Slot::id("0x6e0ddefc0ad98889c04bab9639e512c21766c5e6366f89e696956d9be6952871"),
    display_object: Some(SuiAddress::from_static(
        "0x866fbd8e51b6637c25f0e811ece9a85eb417f3987ecdfefb80f15d1192d72b4c",
    )),
    direct_setup_package_id: Slot::id(
        "0xdac22652eb400beb1f5e2126459cae8eedc116b73b8ad60b71e3e8d7fdb317e2",
    ),
    discounts: DiscountsPackage {
        package_id: Slot::id("0x6a6ea140e095ddd82f7c745905054b3203129dd04a09d0375416c31161932d2d"),
        discount_house_id: Slot::id(
            "0x7fdd883c0b7427f18cdb498c4c87a4a79d6bec4783cb3f21aa3816bbc64ce8ef",
        ),
    },
    renewals_package_id: Slot::id(
        "0xd5e5f74126e7934e35991643b0111c3361827fc0564c83fa810668837c6f0b0f",
    ),
    subnames_package_id: Slot::Pending,
    temp_subdomains_proxy_package_id: Slot::Pending,
    discord: None,
    coupons: CouponsPackage {
        package_id: Slot::Pending,
    },
};

static TESTNET: PackageInfo = PackageInfo {
    network: Network::Testnet,
    package_id: Slot::id("0x22fa05f21b1ad71442491220bb9338f7b7095fe35000ef88d5400d28523bdd93"),
    registration_package_id: Slot::id(
        "0x4255184a0143c0ce4394a3f16a6f5aa5d64507269e54e51ea396d569fe8f1ba5",
    ),
    upgrade_cap: None,
    publisher_id: Slot::id("0x62d9690d7e6234bfd57170a89c9c8ec54604ea31cefaa3869e8be4912ee1a4ab"),
    admin_address: Slot::id("0xfe09cf0b3d77678b99250572624bf74fe3b12af915c5db95f0ed5d755612eb68"),
    admin_cap: Slot::id("0x5def5bd9dc94b7d418d081a91c533ec619fb4350e6c4e4602aea96fd49331b15"),
    suins: Slot::id("0x300369e8909b9a6464da265b9a5a9ab6fe2158a040e84e808628cde7a07ee5a3"),
    display_object: None,
    direct_setup_package_id: Slot::id(
        "0xb82c701b383df8e5e55e2c8f201ee5a9fe43fc252dad291d52cc7da32f44161f",
    ),
    discounts: DiscountsPackage {
        package_id: Slot::Pending,
        discount_house_id: Slot::Pending,
    },
    renewals_package_id: Slot::id(
        "0x54800ebb4606fd0c03b4554976264373b3374eeb3fd63e7ff69f31cac786ba8c",
    ),
    subnames_package_id: Slot::id(
        "0x3c272bc45f9157b7818ece4f7411bdfa8af46303b071aca4e18c03119c9ff636",
    ),
    temp_subdomains_proxy_package_id: Slot::id(
        "0x3489ab5dcd346afee8b681267bcab2583a5eba9855680ec9931355e50e21c148",
    ),
    discord: Some(DiscordConfig {
        package_id: Slot::id("0x3632aa821af418cd7ea22fe3e5ddd1ea0437d785598de80241b74a0ba1c2c1c1"),
        discord_cap: Slot::id("0x7855fea8596ed665fa0aa308f9d2fc63d2186970ba0094d7603a5914eabf41df"),
        discord_object_id: Slot::id(
            "0xf19fb56e24e26766ab650c752af9422e6bd39f53e2a8ffcc2963a9881650149c",
        ),
        discord_table_id: Slot::id(
            "0x2bf826d3f41ed992342eb089814467d782262cce06bfd635738f3003d16fb2b5",
        ),
    }),
    coupons: CouponsPackage {
        package_id: Slot::id("0x689a2d65a9666921e73ad4d59d13fee0d4be5df1ab5c0eeda8e0f7ebecb6f1b7"),
    },
};

impl PackageInfo {
    /// Look up the deployment for a network. Total: every `Network` has an entry.
    pub fn resolve(network: Network) -> &'static PackageInfo {
        match network {
            Network::Mainnet => &MAINNET,
            Network::Testnet => &TESTNET,
        }
    }

    /// Core SuiNS package id
    pub fn package(&self) -> Result<SuiAddress, RegistryError> {
        self.package_id.require(self.network, "package_id")
    }

    /// Publisher object for the core package
    pub fn publisher(&self) -> Result<SuiAddress, RegistryError> {
        self.publisher_id.require(self.network, "publisher_id")
    }

    pub fn admin(&self) -> Result<SuiAddress, RegistryError> {
        self.admin_address.require(self.network, "admin_address")
    }

    /// Every identifier field with its dotted name, in declaration order.
    /// Optional fields that are absent are left out.
    pub fn addresses(&self) -> Vec<(&'static str, Slot)> {
        let mut fields = vec![
            ("package_id", self.package_id),
            ("registration_package_id", self.registration_package_id),
        ];
        if let Some(cap) = self.upgrade_cap {
            fields.push(("upgrade_cap", Slot::Assigned(cap)));
        }
        fields.extend([
            ("publisher_id", self.publisher_id),
            ("admin_address", self.admin_address),
            ("admin_cap", self.admin_cap),
            ("suins", self.suins),
        ]);
        if let Some(display) = self.display_object {
            fields.push(("display_object", Slot::Assigned(display)));
        }
        fields.extend([
            ("direct_setup_package_id", self.direct_setup_package_id),
            ("discounts.package_id", self.discounts.package_id),
            ("discounts.discount_house_id", self.discounts.discount_house_id),
            ("renewals_package_id", self.renewals_package_id),
            ("subnames_package_id", self.subnames_package_id),
            ("temp_subdomains_proxy_package_id", self.temp_subdomains_proxy_package_id),
        ]);
        if let Some(discord) = &self.discord {
            fields.extend([
                ("discord.package_id", discord.package_id),
                ("discord.discord_cap", discord.discord_cap),
                ("discord.discord_object_id", discord.discord_object_id),
                ("discord.discord_table_id", discord.discord_table_id),
            ]);
        }
        fields.push(("coupons.package_id", self.coupons.package_id));
        fields
    }

    /// Names of fields still waiting on a deployment
    pub fn placeholders(&self) -> Vec<&'static str> {
        self.addresses()
            .into_iter()
            .filter(|(_, slot)| slot.is_pending())
            .map(|(name, _)| name)
            .collect()
    }
}
