//! Chain suggestions to browser-extension wallets.
//!
//! Wallet extensions are reached through [`WalletProvider`] handles that the
//! page receives at mount, one per [`WalletKind`] that is installed. The
//! outcome of every suggestion is reported through a [`Notifier`].

use crate::keplr::{chain_to_keplr, ChainInfo, ConversionError, STARGATE_FEATURE};
use crate::schema::{ChainRecord, Registry};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};
use strum_macros::{Display, EnumIter};
use thiserror::Error;
use tracing::{info, warn};

/// Supported wallets. Cosmostation is driven through its Keplr-compatible
/// provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "lowercase")]
pub enum WalletKind {
    Keplr,
    Cosmostation,
}

/// Failure reported by the wallet itself, e.g. the user declined.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct WalletError {
    pub message: String,
}

impl WalletError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Handle to an injected wallet provider.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Ask the wallet to add `config`. May prompt the user.
    async fn experimental_suggest_chain(&self, config: &ChainInfo) -> Result<(), WalletError>;
}

/// The providers present in the browser, keyed by wallet.
#[derive(Clone, Default)]
pub struct Wallets {
    providers: HashMap<WalletKind, Arc<dyn WalletProvider>>,
}

impl fmt::Debug for Wallets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.providers.keys()).finish()
    }
}

impl Wallets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, kind: WalletKind, provider: Arc<dyn WalletProvider>) -> Self {
        self.install(kind, provider);
        self
    }

    pub fn install(&mut self, kind: WalletKind, provider: Arc<dyn WalletProvider>) {
        self.providers.insert(kind, provider);
    }

    pub fn get(&self, kind: WalletKind) -> Option<Arc<dyn WalletProvider>> {
        self.providers.get(&kind).cloned()
    }

    pub fn is_installed(&self, kind: WalletKind) -> bool {
        self.providers.contains_key(&kind)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToastKind {
    Success,
    Error,
}

/// A transient message shown to the user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Notifier that keeps toasts in memory until the page drains them.
#[derive(Debug, Default)]
pub struct Toaster {
    toasts: Mutex<Vec<Toast>>,
}

impl Toaster {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, kind: ToastKind, message: &str) {
        let mut toasts = self.toasts.lock().unwrap_or_else(|e| e.into_inner());
        toasts.push(Toast {
            kind,
            message: message.to_string(),
        });
    }

    /// Toasts not yet drained, oldest first.
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn drain(&self) -> Vec<Toast> {
        std::mem::take(&mut *self.toasts.lock().unwrap_or_else(|e| e.into_inner()))
    }
}

impl Notifier for Toaster {
    fn success(&self, message: &str) {
        self.push(ToastKind::Success, message);
    }

    fn error(&self, message: &str) {
        self.push(ToastKind::Error, message);
    }
}

#[derive(Debug, Error)]
pub enum SuggestError {
    #[error("{0} not installed")]
    NotInstalled(WalletKind),
    #[error(transparent)]
    Conversion(#[from] ConversionError),
    #[error(transparent)]
    Rejected(#[from] WalletError),
    #[error("unknown chain {0}")]
    UnknownChain(String),
}

/// Turns chain records into wallet suggestions and reports the outcome.
#[derive(Clone)]
pub struct SuggestionAdapter {
    registry: Arc<Registry>,
    wallets: Wallets,
    notifier: Arc<dyn Notifier>,
}

impl SuggestionAdapter {
    pub fn new(registry: Arc<Registry>, wallets: Wallets, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            registry,
            wallets,
            notifier,
        }
    }

    pub fn wallets(&self) -> &Wallets {
        &self.wallets
    }

    /// Suggest `chain` to the `kind` wallet. Every call ends in exactly one
    /// toast; the returned error mirrors the error toast.
    pub async fn suggest_chain(&self, kind: WalletKind, chain: &ChainRecord) -> Result<(), SuggestError> {
        let Some(provider) = self.wallets.get(kind) else {
            warn!(wallet = %kind, "wallet provider not injected");
            let err = SuggestError::NotInstalled(kind);
            self.notifier.error(&err.to_string());
            return Err(err);
        };

        match self.dispatch(provider.as_ref(), kind, chain).await {
            Ok(()) => {
                info!(wallet = %kind, chain_id = %chain.chain_id, "chain added");
                self.notifier.success(&format!("{} added", chain.pretty_name));
                Ok(())
            }
            Err(err) => {
                warn!(wallet = %kind, chain_id = %chain.chain_id, error = %err, "chain suggestion failed");
                self.notifier.error(&err.to_string());
                Err(err)
            }
        }
    }

    async fn dispatch(
        &self,
        provider: &dyn WalletProvider,
        kind: WalletKind,
        chain: &ChainRecord,
    ) -> Result<(), SuggestError> {
        let mut config = chain_to_keplr(chain, &self.registry.assets)?;
        config.strip_feature(STARGATE_FEATURE);

        info!(wallet = %kind, chain_id = %config.chain_id, features = ?config.features, "suggesting chain");
        provider.experimental_suggest_chain(&config).await?;
        Ok(())
    }
}
