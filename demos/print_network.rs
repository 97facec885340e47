//! Print one bundled network, its row and icon states.

use cosmos_network_helper::{HelperConfig, Network, NetworkRow, Registry};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let network = Network::CosmosHub;
    println!(
        "{} ({}) is a {} chain",
        network.pretty_name(),
        network.chain_id(),
        network.network_type()
    );

    let registry = Registry::bundled();
    let config = HelperConfig::default();
    let mut row = NetworkRow::from_chain(network.record(), &registry);
    println!("Symbol: {}", row.symbol.as_deref().unwrap_or("<none>"));
    match row.website_link() {
        Some(link) => println!("Website: {}", link.url),
        None => println!("Website: <none>"),
    }

    // walk the icon through both load failures
    for _ in 0..3 {
        println!("Icon ({:?}): {:?}", row.icon.source(), row.icon.render(&config));
        row.icon.on_load_error();
    }

    println!("Full record:\n{}", serde_json::to_string_pretty(network.record())?);
    Ok(())
}
