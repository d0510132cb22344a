//! Connection and submission controllers.
//!
//! Every operation swallows its failure: it is logged and the store is left
//! as it was. Only the small outcome values below reach the caller.

use crate::config::PortalConfig;
use crate::live::LiveFeed;
use crate::store::ViewStore;
use std::rc::Rc;
use tracing::{info, warn};
use wp_contract::{ContractError, WalletAdapter, WaveContract};
use wp_types::{WalletAddress, WaveReceipt};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectOutcome {
    Connected(WalletAddress),
    /// No wallet injected. The caller tells the user to install one.
    WalletMissing,
    Failed,
}

struct Backend<W, C> {
    wallet: W,
    contract: C,
}

pub struct Portal<W, C> {
    backend: Option<Backend<W, C>>,
    store: Rc<ViewStore>,
    config: PortalConfig,
}

impl<W, C> Portal<W, C>
where
    W: WalletAdapter,
    C: WaveContract,
{
    /// `backend` is `None` when the host has no injected wallet.
    pub fn new(backend: Option<(W, C)>, store: Rc<ViewStore>, config: PortalConfig) -> Self {
        Self {
            backend: backend.map(|(wallet, contract)| Backend { wallet, contract }),
            store,
            config,
        }
    }

    pub fn store(&self) -> &Rc<ViewStore> {
        &self.store
    }

    pub fn has_wallet(&self) -> bool {
        self.backend.is_some()
    }

    /// Start-up check. Never prompts the user.
    pub async fn check_if_wallet_is_connected(&self) -> Option<WalletAddress> {
        let Some(backend) = &self.backend else {
            info!("make sure you have a wallet installed");
            return None;
        };

        let accounts = match backend.wallet.authorized_accounts().await {
            Ok(accounts) => accounts,
            Err(err) => {
                warn!(%err, "could not list authorized accounts");
                return None;
            }
        };

        let Some(account) = accounts.into_iter().next() else {
            info!("no authorized account found");
            return None;
        };
        info!(%account, "found an authorized account");
        self.store.set_account(account.clone());
        self.load_waves().await;
        Some(account)
    }

    /// Explicit connect. May show a wallet prompt.
    pub async fn connect_wallet(&self) -> ConnectOutcome {
        let Some(backend) = &self.backend else {
            warn!("connect requested without an injected wallet");
            return ConnectOutcome::WalletMissing;
        };

        let accounts = match backend.wallet.request_accounts().await {
            Ok(accounts) => accounts,
            Err(err) => {
                warn!(%err, "wallet connection failed");
                return ConnectOutcome::Failed;
            }
        };

        let Some(account) = accounts.into_iter().next() else {
            warn!("wallet granted no accounts");
            return ConnectOutcome::Failed;
        };
        info!(%account, "connected");
        self.store.set_account(account.clone());
        self.load_waves().await;
        ConnectOutcome::Connected(account)
    }

    /// Bulk reload. The contract's list replaces the local one on success.
    pub async fn load_waves(&self) {
        let Some(backend) = &self.backend else {
            info!("no injected wallet; skipping wave load");
            return;
        };

        match backend.contract.get_all_waves().await {
            Ok(waves) => {
                info!(count = waves.len(), "loaded waves");
                self.store.replace_waves(waves);
            }
            Err(err) => warn!(%err, "could not load waves"),
        }
    }

    /// Submits the current draft and waits until it is mined. The list is
    /// updated by the live feed, not here.
    pub async fn wave(&self) -> Option<WaveReceipt> {
        let Some(backend) = &self.backend else {
            info!("no injected wallet; cannot wave");
            return None;
        };

        let message = self.store.draft();
        match self.submit(backend, &message).await {
            Ok(receipt) => Some(receipt),
            Err(err) => {
                warn!(%err, "wave failed");
                None
            }
        }
    }

    async fn submit(
        &self,
        backend: &Backend<W, C>,
        message: &str,
    ) -> Result<WaveReceipt, ContractError> {
        let count = backend.contract.get_total_waves().await?;
        info!(count, "retrieved total wave count");

        let pending = backend.contract.wave(message, self.config.gas_limit).await?;
        info!(hash = %pending.hash, "mining");

        let receipt = backend.contract.confirm(&pending).await?;
        info!(hash = %receipt.hash, "mined");

        match backend.contract.get_total_waves().await {
            Ok(count) => info!(count, "total wave count is now"),
            Err(err) => warn!(%err, "could not re-read total wave count"),
        }
        Ok(receipt)
    }

    /// Attaches the `NewWave` listener. `None` when no wallet is present.
    pub fn mount(&self) -> Option<LiveFeed> {
        let Some(backend) = &self.backend else {
            info!("no injected wallet; live updates disabled");
            return None;
        };
        Some(LiveFeed::new(backend.contract.new_waves(), Rc::clone(&self.store)))
    }
}
