//! Route engine and engine factory fakes

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use warpd_error::{Result, WarpError};
use warpd_provider::{MultiProtocolProvider, RouteEngineFactory};
use warpd_traits::{
    PrecisionCheck, ProtocolType, RouteConfig, RouteEngine, Token, TokenAmount, TokenConfig,
    TokenConnection, TransferRemoteRequest, TxCategory, WarpTypedTransaction,
};

/// A call received by [`MockRouteEngine`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    /// Collateral check
    Collateral {
        /// Amount in base units
        amount: u128,
        /// Destination chain
        destination: String,
    },
    /// Convertibility check
    Convertible {
        /// Amount in base units
        amount: u128,
    },
    /// Precision-loss check
    PrecisionLoss {
        /// Amount in base units
        amount: u128,
    },
    /// Transaction list request
    TransferRemoteTxs(TransferRemoteRequest),
}

/// Configurable route engine that records every call
#[derive(Debug)]
pub struct MockRouteEngine {
    tokens: Vec<Token>,
    collateral_sufficient: bool,
    convertible: bool,
    precision: PrecisionCheck,
    txs: Vec<WarpTypedTransaction>,
    calls: Mutex<Vec<EngineCall>>,
}

impl MockRouteEngine {
    /// Engine over `tokens` whose checks pass and which builds one transfer
    pub fn new(tokens: Vec<Token>) -> Self {
        let protocol = tokens
            .first()
            .map(|t| t.protocol)
            .unwrap_or(ProtocolType::Ethereum);
        Self {
            tokens,
            collateral_sufficient: true,
            convertible: true,
            precision: PrecisionCheck::default(),
            txs: vec![WarpTypedTransaction::new(TxCategory::Transfer, protocol)],
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Engine over the tokens of `config`; chain protocols come from `provider`
    pub fn from_route_config(config: &RouteConfig, provider: &MultiProtocolProvider) -> Result<Self> {
        Ok(Self::new(tokens_from_config(config, provider)?))
    }

    /// Sets the collateral check result
    pub fn with_collateral(mut self, sufficient: bool) -> Self {
        self.collateral_sufficient = sufficient;
        self
    }

    /// Sets the convertibility check result
    pub fn with_convertible(mut self, convertible: bool) -> Self {
        self.convertible = convertible;
        self
    }

    /// Sets the precision-loss check result
    pub fn with_precision_loss(mut self, remainder: u128, decimal_diff: i32) -> Self {
        self.precision = PrecisionCheck {
            remainder,
            decimal_diff,
        };
        self
    }

    /// Sets the transactions returned by the transaction builder
    pub fn with_txs(mut self, txs: Vec<WarpTypedTransaction>) -> Self {
        self.txs = txs;
        self
    }

    /// Calls received so far
    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls.lock().clone()
    }

    /// Returns true if the transaction builder was called
    pub fn built_txs(&self) -> bool {
        self.calls
            .lock()
            .iter()
            .any(|c| matches!(c, EngineCall::TransferRemoteTxs(_)))
    }
}

#[async_trait]
impl RouteEngine for MockRouteEngine {
    fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    async fn is_destination_collateral_sufficient(
        &self,
        amount: &TokenAmount,
        destination: &str,
    ) -> Result<bool> {
        self.calls.lock().push(EngineCall::Collateral {
            amount: amount.amount,
            destination: destination.to_string(),
        });
        Ok(self.collateral_sufficient)
    }

    async fn is_amount_convertible(&self, amount: &TokenAmount, _destination: &str) -> Result<bool> {
        self.calls.lock().push(EngineCall::Convertible {
            amount: amount.amount,
        });
        Ok(self.convertible)
    }

    async fn precision_loss(&self, amount: &TokenAmount, _destination: &str) -> Result<PrecisionCheck> {
        self.calls.lock().push(EngineCall::PrecisionLoss {
            amount: amount.amount,
        });
        Ok(self.precision)
    }

    async fn transfer_remote_txs(
        &self,
        request: &TransferRemoteRequest,
    ) -> Result<Vec<WarpTypedTransaction>> {
        self.calls
            .lock()
            .push(EngineCall::TransferRemoteTxs(request.clone()));
        Ok(self.txs.clone())
    }
}

/// Converts route-config tokens to engine tokens
pub fn tokens_from_config(config: &RouteConfig, provider: &MultiProtocolProvider) -> Result<Vec<Token>> {
    let base = |t: &TokenConfig| -> Result<Token> {
        Ok(Token {
            chain_name: t.chain_name.clone(),
            protocol: provider.protocol(&t.chain_name)?,
            standard: t.standard,
            decimals: t.decimals,
            symbol: t.symbol.clone(),
            address_or_denom: t.address_or_denom.clone(),
            connections: Vec::new(),
        })
    };

    config
        .tokens
        .iter()
        .map(|t| {
            let mut token = base(t)?;
            for conn in &t.connections {
                let target = config
                    .tokens
                    .iter()
                    .find(|o| {
                        o.chain_name == conn.chain_name && o.address_or_denom == conn.address_or_denom
                    })
                    .ok_or_else(|| {
                        WarpError::ContextInit(format!(
                            "connection to unknown token {} on {}",
                            conn.address_or_denom, conn.chain_name
                        ))
                    })?;
                token.connections.push(TokenConnection {
                    token: base(target)?,
                });
            }
            Ok(token)
        })
        .collect()
}

/// How a factory call was made
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactoryCall {
    /// Tokens in the merged config
    pub tokens: usize,
    /// Auxiliary chain, for aux-aware builds
    pub aux_chain: Option<String>,
}

type Customize = Box<dyn Fn(MockRouteEngine) -> MockRouteEngine + Send + Sync>;

/// Factory producing [`MockRouteEngine`]s from the merged config
pub struct MockEngineFactory {
    customize: Customize,
    fail: bool,
    calls: Mutex<Vec<FactoryCall>>,
    last: Mutex<Option<Arc<MockRouteEngine>>>,
}

impl MockEngineFactory {
    /// Factory producing default engines
    pub fn new() -> Self {
        Self {
            customize: Box::new(|engine| engine),
            fail: false,
            calls: Mutex::new(Vec::new()),
            last: Mutex::new(None),
        }
    }

    /// Applies `f` to every engine produced
    pub fn with_customize(
        mut self,
        f: impl Fn(MockRouteEngine) -> MockRouteEngine + Send + Sync + 'static,
    ) -> Self {
        self.customize = Box::new(f);
        self
    }

    /// Factory whose builds always fail
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    /// Calls received so far
    pub fn calls(&self) -> Vec<FactoryCall> {
        self.calls.lock().clone()
    }

    /// Most recently produced engine
    pub fn last_engine(&self) -> Option<Arc<MockRouteEngine>> {
        self.last.lock().clone()
    }

    fn build(
        &self,
        config: &RouteConfig,
        provider: &MultiProtocolProvider,
        aux_chain: Option<&str>,
    ) -> Result<Arc<dyn RouteEngine>> {
        self.calls.lock().push(FactoryCall {
            tokens: config.tokens.len(),
            aux_chain: aux_chain.map(str::to_string),
        });
        if self.fail {
            return Err(WarpError::ContextInit("engine construction failed".into()));
        }
        let engine = Arc::new((self.customize)(MockRouteEngine::from_route_config(
            config, provider,
        )?));
        *self.last.lock() = Some(engine.clone());
        Ok(engine)
    }
}

impl Default for MockEngineFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteEngineFactory for MockEngineFactory {
    fn from_config(
        &self,
        config: &RouteConfig,
        provider: Arc<MultiProtocolProvider>,
    ) -> Result<Arc<dyn RouteEngine>> {
        self.build(config, &provider, None)
    }

    fn from_config_with_aux(
        &self,
        config: &RouteConfig,
        provider: Arc<MultiProtocolProvider>,
        aux_chain: &str,
    ) -> Result<Arc<dyn RouteEngine>> {
        self.build(config, &provider, Some(aux_chain))
    }
}
