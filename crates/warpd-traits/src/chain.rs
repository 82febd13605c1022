//! Chain metadata and protocol families

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Map keyed by chain name.
///
/// Ordered so that snapshots and logs are deterministic.
pub type ChainMap<T> = BTreeMap<String, T>;

/// Protocol family a chain belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtocolType {
    /// EVM chains
    Ethereum,
    /// Solana VM chains
    Sealevel,
    /// Cosmos SDK chains
    Cosmos,
    /// Fuel chains, the auxiliary family with its own wallet
    Fuel,
}

impl ProtocolType {
    /// Returns true for the auxiliary protocol family, whose wallet is
    /// connected separately and whose tokens need convertibility checks
    pub fn is_auxiliary(&self) -> bool {
        matches!(self, Self::Fuel)
    }

    /// Lowercase name, matching the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ethereum => "ethereum",
            Self::Sealevel => "sealevel",
            Self::Cosmos => "cosmos",
            Self::Fuel => "fuel",
        }
    }
}

impl fmt::Display for ProtocolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata describing one chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainMetadata {
    /// Unique chain name, also the map key
    pub name: String,
    /// Chain id (EVM chain id, or protocol-specific numeric id)
    pub chain_id: u64,
    /// Protocol family
    pub protocol: ProtocolType,
    /// Human-readable name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// RPC endpoints, primary first
    #[serde(default)]
    pub rpc_urls: Vec<String>,
    /// Block explorer base URLs
    #[serde(default)]
    pub block_explorers: Vec<String>,
    /// Whether this is a test network
    #[serde(default)]
    pub is_testnet: bool,
}

impl ChainMetadata {
    /// Creates metadata with the required fields
    pub fn new(name: impl Into<String>, chain_id: u64, protocol: ProtocolType) -> Self {
        Self {
            name: name.into(),
            chain_id,
            protocol,
            display_name: None,
            rpc_urls: Vec::new(),
            block_explorers: Vec::new(),
            is_testnet: false,
        }
    }

    /// Adds an RPC endpoint
    pub fn with_rpc(mut self, url: impl Into<String>) -> Self {
        self.rpc_urls.push(url.into());
        self
    }

    /// Sets the display name
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Marks the chain as a testnet
    pub fn testnet(mut self) -> Self {
        self.is_testnet = true;
        self
    }

    /// Display name, falling back to the title-cased chain name
    pub fn display_name(&self) -> String {
        self.display_name
            .clone()
            .unwrap_or_else(|| to_title_case(&self.name))
    }
}

/// Partial chain metadata supplied by the user.
///
/// Every field is optional; set fields win over the registry base.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainMetadataOverride {
    /// Chain id override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,
    /// Protocol override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<ProtocolType>,
    /// Display name override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Replacement RPC endpoints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpc_urls: Option<Vec<String>>,
    /// Replacement block explorers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_explorers: Option<Vec<String>>,
    /// Testnet flag override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_testnet: Option<bool>,
}

impl ChainMetadataOverride {
    /// Applies this override over a base
    pub fn apply_to(&self, base: &ChainMetadata) -> ChainMetadata {
        ChainMetadata {
            name: base.name.clone(),
            chain_id: self.chain_id.unwrap_or(base.chain_id),
            protocol: self.protocol.unwrap_or(base.protocol),
            display_name: self.display_name.clone().or_else(|| base.display_name.clone()),
            rpc_urls: self.rpc_urls.clone().unwrap_or_else(|| base.rpc_urls.clone()),
            block_explorers: self
                .block_explorers
                .clone()
                .unwrap_or_else(|| base.block_explorers.clone()),
            is_testnet: self.is_testnet.unwrap_or(base.is_testnet),
        }
    }

    /// Builds full metadata for a chain the registry does not know.
    ///
    /// Returns `None` unless protocol, chain id and at least one RPC URL are set.
    pub fn to_custom_chain(&self, name: &str) -> Option<ChainMetadata> {
        let rpc_urls = self.rpc_urls.clone().filter(|urls| !urls.is_empty())?;
        Some(ChainMetadata {
            name: name.to_string(),
            chain_id: self.chain_id?,
            protocol: self.protocol?,
            display_name: self.display_name.clone(),
            rpc_urls,
            block_explorers: self.block_explorers.clone().unwrap_or_default(),
            is_testnet: self.is_testnet.unwrap_or(false),
        })
    }
}

/// Title-cases a chain or category name ("fueltestnet" -> "Fueltestnet",
/// "transfer" -> "Transfer")
pub fn to_title_case(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
