//! Wallet integration: one adapter per supported wallet behind a common interface.
//!
//! Adapters are picked explicitly through [`WalletKind`]; nothing is sniffed
//! from ambient globals. Operations are async and run outside the economy
//! engine, which only ever sees the resulting account or receipt.

pub mod demo;
pub mod score;

#[cfg(target_arch = "wasm32")]
pub mod csprclick;

use thiserror::Error;

pub use demo::DemoWallet;
pub use score::{ScoreRejection, ScoreSubmission};

#[cfg(target_arch = "wasm32")]
pub use csprclick::CsprClickWallet;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    #[error("wallet extension not found; install it from https://cspr.click")]
    NotInstalled,
    #[error("this wallet is not available on this platform")]
    Unsupported,
    #[error("request rejected: {0}")]
    Rejected(String),
    #[error("wallet is not connected")]
    NotConnected,
    #[error("leaderboard contract is not deployed yet")]
    ContractNotDeployed,
    #[error("score would be rejected: {0}")]
    Implausible(#[from] ScoreRejection),
    #[error("wallet call failed: {0}")]
    Js(String),
}

/// A connected account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletAccount {
    pub public_key: String,
}

impl WalletAccount {
    /// "0203abcd...ef0123" style short form for display.
    pub fn truncated(&self) -> String {
        let key = &self.public_key;
        if key.chars().count() <= 16 {
            return key.clone();
        }
        let head: String = key.chars().take(8).collect();
        let tail: String = key.chars().rev().take(6).collect::<Vec<_>>().into_iter().rev().collect();
        format!("{head}...{tail}")
    }
}

/// Confirmation returned for an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub deploy_hash: String,
}

/// Leaderboard contract settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractConfig {
    pub node_address: String,
    pub chain_name: String,
    /// `None` until the contract is deployed.
    pub contract_hash: Option<String>,
    pub entry_point: String,
    /// Motes, as a decimal string.
    pub payment_amount: String,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            node_address: "http://65.21.235.219:7777/rpc".into(),
            chain_name: "casper-test".into(),
            contract_hash: None,
            entry_point: "submit_score".into(),
            payment_amount: "1000000000".into(),
        }
    }
}

/// The interface every wallet adapter implements.
#[allow(async_fn_in_trait)]
pub trait WalletAdapter {
    /// Ask the wallet for an account.
    async fn connect(&mut self) -> Result<WalletAccount, WalletError>;

    /// Sign an arbitrary message with the connected account.
    async fn sign(&mut self, payload: &str) -> Result<String, WalletError>;

    /// Send a score to the leaderboard.
    async fn submit(&mut self, score: &ScoreSubmission) -> Result<Receipt, WalletError>;

    /// Forget the connected account.
    fn disconnect(&mut self);
}

/// Which adapter to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalletKind {
    /// Simulated wallet, always available.
    Demo,
    /// CSPR.click browser extension.
    CsprClick,
}

/// An adapter chosen by [`WalletKind`].
pub enum Wallet {
    Demo(DemoWallet),
    #[cfg(target_arch = "wasm32")]
    CsprClick(CsprClickWallet),
}

impl Wallet {
    pub fn select(kind: WalletKind, config: ContractConfig, seed: u32) -> Result<Self, WalletError> {
        match kind {
            WalletKind::Demo => Ok(Wallet::Demo(DemoWallet::new(seed))),
            #[cfg(target_arch = "wasm32")]
            WalletKind::CsprClick => Ok(Wallet::CsprClick(CsprClickWallet::new(config))),
            #[cfg(not(target_arch = "wasm32"))]
            WalletKind::CsprClick => {
                let _ = config;
                Err(WalletError::Unsupported)
            }
        }
    }

    pub fn kind(&self) -> WalletKind {
        match self {
            Wallet::Demo(_) => WalletKind::Demo,
            #[cfg(target_arch = "wasm32")]
            Wallet::CsprClick(_) => WalletKind::CsprClick,
        }
    }
}

impl WalletAdapter for Wallet {
    async fn connect(&mut self) -> Result<WalletAccount, WalletError> {
        match self {
            Wallet::Demo(w) => w.connect().await,
            #[cfg(target_arch = "wasm32")]
            Wallet::CsprClick(w) => w.connect().await,
        }
    }

    async fn sign(&mut self, payload: &str) -> Result<String, WalletError> {
        match self {
            Wallet::Demo(w) => w.sign(payload).await,
            #[cfg(target_arch = "wasm32")]
            Wallet::CsprClick(w) => w.sign(payload).await,
        }
    }

    async fn submit(&mut self, score: &ScoreSubmission) -> Result<Receipt, WalletError> {
        match self {
            Wallet::Demo(w) => w.submit(score).await,
            #[cfg(target_arch = "wasm32")]
            Wallet::CsprClick(w) => w.submit(score).await,
        }
    }

    fn disconnect(&mut self) {
        match self {
            Wallet::Demo(w) => w.disconnect(),
            #[cfg(target_arch = "wasm32")]
            Wallet::CsprClick(w) => w.disconnect(),
        }
    }
}
