//! Route-config and chain-metadata assembly

use std::collections::BTreeSet;
use warpd_error::{Result, WarpError};
use warpd_traits::{
    ChainMap, ChainMetadata, ChainMetadataOverride, Registry, RegistryContent, RouteConfig,
};

/// Merges user route configs over the base config.
///
/// Base tokens keep their order. An override token with the same chain and
/// address replaces the base token in place; other override tokens are
/// appended in order. Override `options` are ignored.
pub fn assemble_route_config(base: RouteConfig, overrides: &[RouteConfig]) -> RouteConfig {
    let mut merged = base;
    for token in overrides.iter().flat_map(|o| o.tokens.iter()) {
        match merged
            .tokens
            .iter_mut()
            .find(|t| t.route_key() == token.route_key())
        {
            Some(existing) => *existing = token.clone(),
            None => merged.tokens.push(token.clone()),
        }
    }
    merged
}

/// Chain metadata before and after applying user overrides
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssembledMetadata {
    /// Registry metadata of the referenced chains
    pub chain_metadata: ChainMap<ChainMetadata>,
    /// Same chains with overrides applied, plus custom chains defined
    /// entirely by overrides
    pub chain_metadata_with_overrides: ChainMap<ChainMetadata>,
}

/// Builds metadata for exactly the chains in `chains`.
///
/// Registry lookups are skipped for chains absent from `content`. A chain
/// with neither registry metadata nor a complete override is an error;
/// overrides for chains outside `chains` are ignored.
pub async fn assemble_chain_metadata(
    chains: &BTreeSet<String>,
    registry: &dyn Registry,
    content: &RegistryContent,
    overrides: &ChainMap<ChainMetadataOverride>,
) -> Result<AssembledMetadata> {
    let mut assembled = AssembledMetadata::default();

    for chain in chains {
        let base = if content.contains(chain) {
            registry.get_chain_metadata(chain).await?
        } else {
            None
        };
        let patch = overrides.get(chain);

        let merged = match (&base, patch) {
            (Some(base), Some(patch)) => patch.apply_to(base),
            (Some(base), None) => base.clone(),
            (None, Some(patch)) => patch.to_custom_chain(chain).ok_or_else(|| {
                WarpError::ContextInit(format!(
                    "No registry metadata for {} and override is incomplete",
                    chain
                ))
            })?,
            (None, None) => {
                return Err(WarpError::ContextInit(format!(
                    "No metadata found for chain {}",
                    chain
                )))
            }
        };

        if let Some(base) = base {
            assembled.chain_metadata.insert(chain.clone(), base);
        }
        assembled
            .chain_metadata_with_overrides
            .insert(chain.clone(), merged);
    }

    tracing::debug!(
        chains = assembled.chain_metadata_with_overrides.len(),
        "Assembled chain metadata"
    );
    Ok(assembled)
}
