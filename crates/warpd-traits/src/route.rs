//! Token route configuration

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Token standard of a route endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenStandard {
    /// Plain ERC-20
    #[serde(rename = "ERC20")]
    Erc20,
    /// Plain ERC-721
    #[serde(rename = "ERC721")]
    Erc721,
    /// Native-asset router on an EVM chain
    EvmHypNative,
    /// Collateral router on an EVM chain
    EvmHypCollateral,
    /// Synthetic router on an EVM chain
    EvmHypSynthetic,
    /// ERC-721 collateral router
    EvmHypERC721Collateral,
    /// ERC-721 synthetic router
    EvmHypERC721,
    /// Native-asset router on a Sealevel chain
    SealevelHypNative,
    /// Collateral router on a Sealevel chain
    SealevelHypCollateral,
    /// Synthetic router on a Sealevel chain
    SealevelHypSynthetic,
    /// Cosmos IBC token
    CosmosIbc,
    /// Native-asset router on a Fuel chain
    FuelHypNative,
    /// Collateral router on a Fuel chain
    FuelHypCollateral,
    /// Synthetic router on a Fuel chain
    FuelHypSynthetic,
}

impl TokenStandard {
    /// Returns true for non-fungible standards, whose amount is a token id
    pub fn is_nft(&self) -> bool {
        matches!(
            self,
            Self::Erc721 | Self::EvmHypERC721Collateral | Self::EvmHypERC721
        )
    }
}

/// Connection from one route endpoint to another
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenConnectionConfig {
    /// Chain of the connected token
    pub chain_name: String,
    /// Address or denom of the connected token
    pub address_or_denom: String,
}

/// One token endpoint of a route
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenConfig {
    /// Chain the token lives on
    pub chain_name: String,
    /// Token standard
    pub standard: TokenStandard,
    /// Decimal places
    pub decimals: u8,
    /// Symbol, e.g. "USDC"
    pub symbol: String,
    /// Full name
    pub name: String,
    /// Router address or denom
    pub address_or_denom: String,
    /// Underlying collateral token, for collateral routers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collateral_address_or_denom: Option<String>,
    /// Endpoints this token can be sent to
    #[serde(default)]
    pub connections: Vec<TokenConnectionConfig>,
}

impl TokenConfig {
    /// Key used to deduplicate tokens across base and override configs
    pub fn route_key(&self) -> (&str, &str) {
        (&self.chain_name, &self.address_or_denom)
    }
}

/// Full token route configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteConfig {
    /// Token endpoints
    pub tokens: Vec<TokenConfig>,
    /// Engine options, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<serde_json::Value>,
}

impl RouteConfig {
    /// Creates a config from tokens
    pub fn new(tokens: Vec<TokenConfig>) -> Self {
        Self {
            tokens,
            options: None,
        }
    }

    /// Distinct chain names referenced by the token list
    pub fn chain_names(&self) -> BTreeSet<String> {
        self.tokens.iter().map(|t| t.chain_name.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(chain: &str, address: &str) -> TokenConfig {
        TokenConfig {
            chain_name: chain.into(),
            standard: TokenStandard::EvmHypCollateral,
            decimals: 6,
            symbol: "USDC".into(),
            name: "USD Coin".into(),
            address_or_denom: address.into(),
            collateral_address_or_denom: None,
            connections: Vec::new(),
        }
    }

    #[test]
    fn test_chain_names_are_distinct() {
        let config = RouteConfig::new(vec![
            token("sepolia", "0x1"),
            token("sepolia", "0x2"),
            token("fueltestnet", "0x3"),
        ]);
        let chains: Vec<_> = config.chain_names().into_iter().collect();
        assert_eq!(chains, vec!["fueltestnet".to_string(), "sepolia".to_string()]);
    }

    #[test]
    fn test_nft_standards() {
        assert!(TokenStandard::EvmHypERC721Collateral.is_nft());
        assert!(!TokenStandard::FuelHypSynthetic.is_nft());
    }

    #[test]
    fn test_config_deserializes_camel_case() {
        let json = r#"{
            "tokens": [{
                "chainName": "sepolia",
                "standard": "EvmHypNative",
                "decimals": 18,
                "symbol": "ETH",
                "name": "Ether",
                "addressOrDenom": "0xabc",
                "connections": [{"chainName": "fueltestnet", "addressOrDenom": "0xdef"}]
            }]
        }"#;
        let config: RouteConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.tokens[0].connections[0].chain_name, "fueltestnet");
        assert_eq!(config.tokens[0].standard, TokenStandard::EvmHypNative);
    }
}
