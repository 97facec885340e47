//! Show the Keplr `experimentalSuggestChain` payload for a chain.
//!
//! `cargo run --example keplr_config -- juno-1`

use cosmos_network_helper::{chain_to_keplr, Network, Registry, STARGATE_FEATURE};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let registry = Registry::bundled();
    let chain_id = std::env::args()
        .nth(1)
        .unwrap_or_else(|| Network::Osmosis.chain_id().to_string());
    let chain = registry
        .chain_by_id(&chain_id)
        .ok_or_else(|| format!("{chain_id} is not in the bundled registry"))?;

    let mut config = chain_to_keplr(chain, &registry.assets)?;
    config.strip_feature(STARGATE_FEATURE);

    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
