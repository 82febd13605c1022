//! Canned chains, tokens and routes

use warpd_traits::{
    ChainMetadata, ProtocolType, RouteConfig, TokenConfig, TokenConnectionConfig, TokenStandard,
};

/// Sepolia testnet
pub fn sepolia() -> ChainMetadata {
    ChainMetadata::new("sepolia", 11155111, ProtocolType::Ethereum)
        .with_rpc("https://rpc.sepolia.org")
        .with_display_name("Sepolia")
        .testnet()
}

/// Arbitrum Sepolia testnet
pub fn arbitrum_sepolia() -> ChainMetadata {
    ChainMetadata::new("arbitrumsepolia", 421614, ProtocolType::Ethereum)
        .with_rpc("https://sepolia-rollup.arbitrum.io/rpc")
        .with_display_name("Arbitrum Sepolia")
        .testnet()
}

/// Fuel testnet, the default auxiliary chain
pub fn fueltestnet() -> ChainMetadata {
    ChainMetadata::new("fueltestnet", 0, ProtocolType::Fuel)
        .with_rpc("https://testnet.fuel.network/v1/graphql")
        .with_display_name("Fuel Testnet")
        .testnet()
}

/// Token endpoint on `chain` with no connections
pub fn token_config(
    chain: &str,
    standard: TokenStandard,
    address: &str,
    decimals: u8,
) -> TokenConfig {
    TokenConfig {
        chain_name: chain.to_string(),
        standard,
        decimals,
        symbol: "USDC".to_string(),
        name: "USD Coin".to_string(),
        address_or_denom: address.to_string(),
        collateral_address_or_denom: None,
        connections: Vec::new(),
    }
}

/// Two tokens connected to each other
pub fn connected_pair(mut a: TokenConfig, mut b: TokenConfig) -> RouteConfig {
    a.connections.push(TokenConnectionConfig {
        chain_name: b.chain_name.clone(),
        address_or_denom: b.address_or_denom.clone(),
    });
    b.connections.push(TokenConnectionConfig {
        chain_name: a.chain_name.clone(),
        address_or_denom: a.address_or_denom.clone(),
    });
    RouteConfig::new(vec![a, b])
}

/// USDC collateral on Sepolia routed to a synthetic on Arbitrum Sepolia
pub fn evm_route() -> RouteConfig {
    connected_pair(
        token_config("sepolia", TokenStandard::EvmHypCollateral, "0xsepoliarouter", 6),
        token_config("arbitrumsepolia", TokenStandard::EvmHypSynthetic, "0xarbrouter", 6),
    )
}

/// ETH on Sepolia routed to a synthetic on Fuel testnet
pub fn fuel_route() -> RouteConfig {
    connected_pair(
        token_config("sepolia", TokenStandard::EvmHypNative, "0xsepolianative", 18),
        token_config("fueltestnet", TokenStandard::FuelHypSynthetic, "0xfuelrouter", 9),
    )
}
