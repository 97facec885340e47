//! The directory page: one instance per mount.
//!
//! Binds the catalog, the view state, keyboard focus and the wallet adapter
//! behind the handlers a front end calls from its event listeners.

use crate::config::HelperConfig;
use crate::row::{headers, render_rows, HeaderCell, NetworkRow};
use crate::schema::Registry;
use crate::shortcut::{handle_keydown, Focus, KeyEvent, KeyOutcome};
use crate::view::{SortProperty, ViewState};
use crate::wallet::{Notifier, SuggestError, SuggestionAdapter, WalletKind, Wallets};
use std::sync::Arc;
use tracing::warn;

pub struct NetworkHelperPage {
    registry: Arc<Registry>,
    state: ViewState,
    focus: Focus,
    config: HelperConfig,
    adapter: SuggestionAdapter,
    notifier: Arc<dyn Notifier>,
}

impl NetworkHelperPage {
    /// Mount the page with the table layout.
    pub fn new(
        registry: Arc<Registry>,
        wallets: Wallets,
        notifier: Arc<dyn Notifier>,
        config: HelperConfig,
    ) -> Self {
        Self::with_state(registry, wallets, notifier, config, ViewState::default())
    }

    pub fn with_state(
        registry: Arc<Registry>,
        wallets: Wallets,
        notifier: Arc<dyn Notifier>,
        config: HelperConfig,
        state: ViewState,
    ) -> Self {
        let adapter = SuggestionAdapter::new(registry.clone(), wallets, notifier.clone());
        Self {
            registry,
            state,
            focus: Focus::default(),
            config,
            adapter,
            notifier,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn config(&self) -> &HelperConfig {
        &self.config
    }

    pub fn on_search_input(&mut self, text: &str) {
        self.state.set_search_text(text);
    }

    pub fn on_click_sort(&mut self, property: SortProperty) {
        self.state.set_sort_key(property);
    }

    pub fn on_toggle_testnets(&mut self, show_testnets: bool) {
        self.state.set_category_filter(show_testnets);
    }

    pub fn on_focus_change(&mut self, focus: Focus) {
        self.focus = focus;
    }

    /// Returns whether the caller must suppress the browser's default action.
    pub fn on_keydown(&mut self, event: &KeyEvent) -> bool {
        let outcome = handle_keydown(event, self.focus);
        if outcome == KeyOutcome::FocusSearch {
            self.focus = Focus::Search;
        }
        outcome.prevents_default()
    }

    pub fn rows(&self) -> Vec<NetworkRow> {
        render_rows(&self.registry, &self.state)
    }

    pub fn headers(&self) -> Vec<HeaderCell> {
        headers(&self.state)
    }

    /// Whether a provider for `kind` was injected, for enabling its button.
    pub fn wallet_installed(&self, kind: WalletKind) -> bool {
        self.adapter.wallets().is_installed(kind)
    }

    /// Handler for a row's wallet button.
    pub async fn suggest(&self, kind: WalletKind, chain_id: &str) -> Result<(), SuggestError> {
        let Some(chain) = self.registry.chain_by_id(chain_id) else {
            warn!(chain_id, "suggestion for a chain not in the registry");
            let err = SuggestError::UnknownChain(chain_id.to_string());
            self.notifier.error(&err.to_string());
            return Err(err);
        };
        self.adapter.suggest_chain(kind, chain).await
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::wallet::test::StubProvider;
    use crate::wallet::{ToastKind, Toaster};

    fn page(wallets: Wallets) -> (NetworkHelperPage, Arc<Toaster>) {
        let toaster = Arc::new(Toaster::new());
        let page = NetworkHelperPage::new(
            Arc::new(Registry::bundled()),
            wallets,
            toaster.clone(),
            HelperConfig::default(),
        );
        (page, toaster)
    }

    #[test]
    fn slash_focuses_search_without_typing() {
        let (mut page, _) = page(Wallets::new());
        page.on_search_input("osmo");

        assert!(page.on_keydown(&KeyEvent::new("/")));
        assert_eq!(page.focus(), Focus::Search);
        assert_eq!(page.state().search_text, "osmo");

        // a second slash is typed into the box
        assert!(!page.on_keydown(&KeyEvent::new("/")));
        assert_eq!(page.focus(), Focus::Search);
    }

    #[test]
    fn search_narrows_rows() {
        let (mut page, _) = page(Wallets::new());
        let all = page.rows().len();
        page.on_search_input("COSMOS");
        let rows = page.rows();
        assert!(rows.len() < all);
        assert!(rows.iter().all(|r| {
            r.pretty_name.to_lowercase().contains("cosmos")
                || r.chain_id.contains("cosmos")
                || r.chain_name.contains("cosmos")
        }));
    }

    #[test]
    fn grid_page_toggles_testnets() {
        let toaster = Arc::new(Toaster::new());
        let mut page = NetworkHelperPage::with_state(
            Arc::new(Registry::bundled()),
            Wallets::new(),
            toaster,
            HelperConfig::default(),
            ViewState::grid(),
        );
        assert!(page.headers().is_empty());
        assert!(page.rows().iter().all(|r| r.network_type.to_string() == "mainnet"));

        page.on_toggle_testnets(true);
        let rows = page.rows();
        assert!(!rows.is_empty());
        assert!(rows.iter().all(|r| r.network_type.to_string() == "testnet"));
    }

    #[test]
    fn reports_which_wallets_are_installed() {
        let keplr = Arc::new(StubProvider::default());
        let (page, _) = page(Wallets::new().with(WalletKind::Keplr, keplr));
        assert!(page.wallet_installed(WalletKind::Keplr));
        assert!(!page.wallet_installed(WalletKind::Cosmostation));
    }

    #[tokio::test]
    async fn unknown_chain_is_reported() {
        let keplr = Arc::new(StubProvider::default());
        let (page, toaster) = page(Wallets::new().with(WalletKind::Keplr, keplr.clone()));

        let result = page.suggest(WalletKind::Keplr, "nope-1").await;

        assert!(matches!(result, Err(SuggestError::UnknownChain(_))));
        assert!(keplr.calls().is_empty());
        let toasts = toaster.toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind, ToastKind::Error);
        assert_eq!(toasts[0].message, "unknown chain nope-1");
    }

    #[tokio::test]
    async fn cosmostation_button_uses_its_provider() {
        let cosmostation = Arc::new(StubProvider::default());
        let (page, toaster) =
            page(Wallets::new().with(WalletKind::Cosmostation, cosmostation.clone()));

        page.suggest(WalletKind::Cosmostation, "cosmoshub-4")
            .await
            .expect("stub accepts");

        assert_eq!(cosmostation.calls().len(), 1);
        assert_eq!(toaster.toasts()[0].message, "Cosmos Hub added");
    }
}
