//! Cosmos network directory and wallet chain suggestions
//!
//! Lists chains from the cosmos chain registry, lets the user search, sort
//! and filter them, and suggests a chosen chain to a Keplr-compatible
//! browser wallet.
//!
//! ## Build-time data
//!
//! The build script reads the registry snapshot in `data/` (`chains.json`
//! and `assets.json`). Override with:
//! - `CHAIN_REGISTRY_PATH` / `CHAIN_REGISTRY_ASSETS_PATH` to supply other files.
//! - `CHAIN_REGISTRY_URL` / `CHAIN_REGISTRY_ASSETS_URL` to refresh the
//!   snapshot from a remote source (skipped with the `offline` feature).
//!
//! ## Examples
//!
//! ```rust
//! use cosmos_network_helper::{derive_visible_list, Network, Registry, ViewState};
//!
//! let registry = Registry::bundled();
//! let mut state = ViewState::list();
//! state.set_search_text("osmo");
//!
//! let visible = derive_visible_list(&registry.chains, &state);
//! assert!(visible.iter().any(|c| c.chain_id == Network::Osmosis.chain_id()));
//! ```

use serde::{de, Deserialize, Deserializer};
use thiserror::Error;

pub mod config;
pub mod icon;
pub mod keplr;
pub mod page;
pub mod row;
pub mod schema;
pub mod shortcut;
pub mod view;
pub mod wallet;

pub use config::HelperConfig;
pub use icon::{IconSource, IconView, NetworkIcon};
pub use keplr::{chain_to_keplr, ChainInfo, ConversionError, STARGATE_FEATURE};
pub use page::NetworkHelperPage;
pub use row::{render_rows, HeaderCell, NetworkRow};
pub use schema::{AssetList, ChainRecord, NetworkType, Registry};
pub use shortcut::{handle_keydown, Focus, KeyEvent, KeyOutcome};
pub use view::{derive_visible_list, Layout, SortDirection, SortProperty, ViewState};
pub use wallet::{
    Notifier, SuggestError, SuggestionAdapter, Toast, ToastKind, Toaster, WalletError, WalletKind,
    WalletProvider, Wallets,
};

include!(concat!(env!("OUT_DIR"), "/network_generated.rs"));

#[cfg(test)]
mod test {
    use super::{all_assets, all_chains, Network, NetworkType};
    use std::collections::HashSet;
    use strum::IntoEnumIterator;

    #[test]
    fn network_count_matches_bundled_json() {
        assert_eq!(Network::iter().count(), all_chains().len());
    }

    #[test]
    fn network_properties() {
        let hub = Network::CosmosHub;
        assert_eq!(hub.chain_name(), "cosmoshub");
        assert_eq!(hub.chain_id(), "cosmoshub-4");
        assert_eq!(hub.pretty_name(), "Cosmos Hub");
        assert_eq!(hub.network_type(), NetworkType::Mainnet);
        assert_eq!(hub.record().bech32_prefix.as_deref(), Some("cosmos"));

        assert_eq!(Network::OsmosisTestnet.network_type(), NetworkType::Testnet);
    }

    #[test]
    fn lookup_by_name_and_id() {
        assert_eq!(Network::from_chain_name("juno"), Ok(Network::Juno));
        assert_eq!(Network::try_from("juno-1"), Ok(Network::Juno));
        assert!(Network::from_chain_name("juno-1").is_err());
        assert_eq!(
            Network::try_from("nope").unwrap_err().to_string(),
            "network nope is not in the bundled chain registry"
        );
    }

    #[test]
    fn deserialize_from_id_or_name() {
        let by_id: Network = serde_json::from_str("\"secret-4\"").unwrap();
        assert_eq!(by_id, Network::SecretNetwork);
        let by_name: Network = serde_json::from_str("\"stargaze\"").unwrap();
        assert_eq!(by_name, Network::Stargaze);
        let result: Result<Network, _> = serde_json::from_str("\"invalid\"");
        assert!(result.is_err());
    }

    #[test]
    fn enum_follows_catalog_order() {
        let names: Vec<&str> = Network::iter().map(|n| n.chain_name()).collect();
        let catalog: Vec<&str> = all_chains().iter().map(|c| c.chain_name.as_str()).collect();
        assert_eq!(names, catalog);
    }

    #[test]
    fn chain_records_have_basic_fields() {
        let mut ids = HashSet::new();
        for record in all_chains() {
            assert!(
                ids.insert(record.chain_id.as_str()),
                "chain_id {} reused",
                record.chain_id
            );
            assert!(
                !record.pretty_name.trim().is_empty(),
                "pretty_name should not be empty for {}",
                record.chain_id
            );
            assert!(
                !record.chain_name.trim().is_empty(),
                "chain_name should not be empty for {}",
                record.chain_id
            );
        }
    }

    #[test]
    fn every_chain_has_an_asset_list() {
        for record in all_chains() {
            let list = all_assets()
                .iter()
                .find(|a| a.chain_name == record.chain_name)
                .unwrap_or_else(|| panic!("no asset list for {}", record.chain_name));
            assert!(
                !list.assets.is_empty(),
                "asset list for {} is empty",
                record.chain_name
            );
        }
    }
}
