//! Route-engine token view and amount scaling

use crate::chain::ProtocolType;
use crate::route::TokenStandard;
use serde::{Deserialize, Serialize};
use warpd_error::{Result, WarpError};

/// A token endpoint as resolved by the route engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    /// Chain the token lives on
    pub chain_name: String,
    /// Protocol family of that chain
    pub protocol: ProtocolType,
    /// Token standard
    pub standard: TokenStandard,
    /// Decimal places
    pub decimals: u8,
    /// Symbol
    pub symbol: String,
    /// Router address or denom
    pub address_or_denom: String,
    /// Reachable destinations
    #[serde(default)]
    pub connections: Vec<TokenConnection>,
}

/// Route from a token to a token on another chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenConnection {
    /// The destination-side token
    pub token: Token,
}

impl Token {
    /// Returns the connection to `chain`, if this token routes there
    pub fn connection_for_chain(&self, chain: &str) -> Option<&TokenConnection> {
        self.connections.iter().find(|c| c.token.chain_name == chain)
    }

    /// Returns true if amounts of this token are item ids
    pub fn is_nft(&self) -> bool {
        self.standard.is_nft()
    }

    /// Wraps a base-unit amount of this token
    pub fn amount(&self, amount: u128) -> TokenAmount {
        TokenAmount {
            token: self.clone(),
            amount,
        }
    }
}

/// Base-unit amount of a specific token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAmount {
    /// The token
    pub token: Token,
    /// Amount in base units, or the item id for NFTs
    pub amount: u128,
}

/// Result of a precision-loss query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrecisionCheck {
    /// Base units that would be dropped by the destination representation
    pub remainder: u128,
    /// Decimal places between origin and destination tokens
    pub decimal_diff: i32,
}

impl PrecisionCheck {
    /// Returns true if no precision would be lost
    pub fn is_lossless(&self) -> bool {
        self.remainder == 0
    }
}

/// Scales a human-readable decimal string to base units.
///
/// Digits beyond `decimals` are rounded down.
pub fn to_base_units(human: &str, decimals: u8) -> Result<u128> {
    let value = human.trim();
    if value.is_empty() {
        return Err(WarpError::InvalidAmount("amount is empty".into()));
    }

    let (whole, fraction) = match value.split_once('.') {
        Some((w, f)) => (w, f),
        None => (value, ""),
    };
    if whole.is_empty() && fraction.is_empty() {
        return Err(WarpError::InvalidAmount(format!("'{}' is not a number", human)));
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit())
    {
        return Err(WarpError::InvalidAmount(format!("'{}' is not a number", human)));
    }

    let decimals = decimals as usize;
    let mut digits = String::with_capacity(whole.len() + decimals);
    digits.push_str(whole);
    if fraction.len() >= decimals {
        digits.push_str(&fraction[..decimals]);
    } else {
        digits.push_str(fraction);
        digits.extend(std::iter::repeat('0').take(decimals - fraction.len()));
    }

    digits.chars().try_fold(0u128, |acc, c| {
        let digit = c as u128 - '0' as u128;
        acc.checked_mul(10)
            .and_then(|v| v.checked_add(digit))
            .ok_or_else(|| WarpError::InvalidAmount(format!("'{}' overflows", human)))
    })
}

/// Formats a base-unit amount as a decimal string without trailing zeros
pub fn from_base_units(value: u128, decimals: u8) -> String {
    let decimals = decimals as usize;
    if decimals == 0 {
        return value.to_string();
    }
    let raw = format!("{:0>width$}", value, width = decimals + 1);
    let (whole, fraction) = raw.split_at(raw.len() - decimals);
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        whole.to_string()
    } else {
        format!("{}.{}", whole, fraction)
    }
}
