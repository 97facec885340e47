//! Rows and column headers of the network directory.

use crate::icon::NetworkIcon;
use crate::schema::{ChainRecord, NetworkType, Registry};
use crate::view::{derive_visible_list, SortDirection, SortProperty, ViewState};
use strum::IntoEnumIterator;
use url::Url;

/// One chain as displayed in the directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetworkRow {
    pub chain_name: String,
    pub chain_id: String,
    pub pretty_name: String,
    pub network_type: NetworkType,
    /// Symbol of the chain's first registered asset.
    pub symbol: Option<String>,
    pub website: Option<String>,
    /// Registry logo, png preferred over jpeg over svg.
    pub logo: Option<String>,
    pub icon: NetworkIcon,
}

/// A link that opens outside the directory page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkTarget {
    pub url: Url,
    pub new_context: bool,
}

impl NetworkRow {
    pub fn from_chain(chain: &ChainRecord, registry: &Registry) -> Self {
        Self {
            chain_name: chain.chain_name.clone(),
            chain_id: chain.chain_id.clone(),
            pretty_name: chain.pretty_name.clone(),
            network_type: chain.network_type,
            symbol: registry.primary_asset(chain).map(|a| a.symbol.clone()),
            website: chain.website.clone(),
            logo: chain.logo_uri().map(str::to_string),
            icon: NetworkIcon::new(&chain.chain_name),
        }
    }

    /// Target for the external link icon, if the chain has a usable website.
    pub fn website_link(&self) -> Option<LinkTarget> {
        let url = Url::parse(self.website.as_deref()?).ok()?;
        Some(LinkTarget {
            url,
            new_context: true,
        })
    }
}

/// Rows for the current view, in display order.
pub fn render_rows(registry: &Registry, state: &ViewState) -> Vec<NetworkRow> {
    derive_visible_list(&registry.chains, state)
        .into_iter()
        .map(|chain| NetworkRow::from_chain(chain, registry))
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortIndicator {
    ChevronDown,
    ChevronUp,
}

/// A sortable column header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderCell {
    pub property: SortProperty,
    pub label: String,
    pub indicator: Option<SortIndicator>,
}

impl HeaderCell {
    pub fn for_property(state: &ViewState, property: SortProperty) -> Self {
        let indicator = state
            .sort()
            .filter(|sort| sort.property == property)
            .and_then(|sort| match sort.direction {
                SortDirection::Descending => Some(SortIndicator::ChevronDown),
                SortDirection::Ascending => Some(SortIndicator::ChevronUp),
                SortDirection::Unsorted => None,
            });
        Self {
            property,
            label: property.to_string(),
            indicator,
        }
    }
}

/// Column headers; the grid layout has none.
pub fn headers(state: &ViewState) -> Vec<HeaderCell> {
    if state.sort().is_none() {
        return Vec::new();
    }
    SortProperty::iter()
        .map(|property| HeaderCell::for_property(state, property))
        .collect()
}
