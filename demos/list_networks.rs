//! Print the directory as the table layout shows it, optionally filtered.
//!
//! `cargo run --example list_networks -- osmo`

use cosmos_network_helper::{render_rows, Registry, ViewState};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let registry = Registry::bundled();
    let mut state = ViewState::list();
    if let Some(search) = std::env::args().nth(1) {
        state.set_search_text(search);
    }

    let rows = render_rows(&registry, &state);
    println!("{} of {} chains", rows.len(), registry.chains.len());
    for row in rows {
        println!(
            "{:<28} {:<20} {:<8} {}",
            row.pretty_name,
            row.chain_id,
            row.symbol.as_deref().unwrap_or("-"),
            row.network_type,
        );
    }

    Ok(())
}
