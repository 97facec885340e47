//! Chain list view-model.
//!
//! [`ViewState`] holds what the user typed and clicked; [`derive_visible_list`]
//! turns it and the catalog into the rows to show. The visible list is
//! recomputed from scratch on every render.

use crate::schema::{ChainRecord, NetworkType};
use icu_collator::options::CollatorOptions;
use icu_collator::{Collator, CollatorBorrowed};
use icu_provider::DataError;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use strum_macros::{Display, EnumIter};
use tracing::{debug, warn};

/// Column the list can be sorted by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "lowercase")]
pub enum SortProperty {
    #[strum(serialize = "Name")]
    Name,
    #[strum(serialize = "ID")]
    Id,
}

impl SortProperty {
    /// The chain field this column shows.
    pub fn key(self, chain: &ChainRecord) -> &str {
        match self {
            Self::Name => &chain.pretty_name,
            Self::Id => &chain.chain_id,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// First state of a column, A to Z.
    Descending,
    /// Z to A.
    Ascending,
    /// Catalog order.
    #[serde(rename = "none")]
    Unsorted,
}

impl SortDirection {
    /// Direction after clicking the already active column again.
    pub fn next(self) -> Self {
        match self {
            Self::Descending => Self::Ascending,
            Self::Ascending => Self::Unsorted,
            Self::Unsorted => Self::Descending,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sort {
    pub property: SortProperty,
    pub direction: SortDirection,
}

impl Default for Sort {
    fn default() -> Self {
        Self {
            property: SortProperty::Name,
            direction: SortDirection::Descending,
        }
    }
}

/// The two page layouts. Each carries its own ordering scheme: the table
/// sorts by column, the card grid filters by network category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Layout {
    List { sort: Sort },
    Grid { show_testnets: bool },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub search_text: String,
    pub layout: Layout,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::list()
    }
}

impl ViewState {
    /// Table layout sorted by name, descending.
    pub fn list() -> Self {
        Self {
            search_text: String::new(),
            layout: Layout::List {
                sort: Sort::default(),
            },
        }
    }

    /// Card layout showing mainnets.
    pub fn grid() -> Self {
        Self {
            search_text: String::new(),
            layout: Layout::Grid {
                show_testnets: false,
            },
        }
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
    }

    /// Handle a click on a column header. Returns `false` in the grid layout,
    /// which has no columns.
    pub fn set_sort_key(&mut self, property: SortProperty) -> bool {
        let Layout::List { sort } = &mut self.layout else {
            return false;
        };
        sort.direction = if sort.property == property {
            sort.direction.next()
        } else {
            SortDirection::Descending
        };
        sort.property = property;
        debug!(property = %property, direction = ?sort.direction, "sort changed");
        true
    }

    /// Choose between mainnets and testnets. Returns `false` in the list
    /// layout, which shows every category.
    pub fn set_category_filter(&mut self, is_testnet: bool) -> bool {
        let Layout::Grid { show_testnets } = &mut self.layout else {
            return false;
        };
        *show_testnets = is_testnet;
        debug!(show_testnets = is_testnet, "category filter changed");
        true
    }

    pub fn sort(&self) -> Option<Sort> {
        match self.layout {
            Layout::List { sort } => Some(sort),
            Layout::Grid { .. } => None,
        }
    }

    pub fn show_testnets(&self) -> Option<bool> {
        match self.layout {
            Layout::List { .. } => None,
            Layout::Grid { show_testnets } => Some(show_testnets),
        }
    }
}

static COLLATOR: Lazy<Result<CollatorBorrowed<'static>, DataError>> =
    Lazy::new(|| Collator::try_new(Default::default(), CollatorOptions::default()));

/// Root-locale collation order: punctuation before digits before letters,
/// case only breaking ties, lowercase first.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    match COLLATOR.as_ref() {
        Ok(collator) => collator.compare(a, b),
        Err(err) => {
            warn!(error = %err, "collation data unavailable, comparing code points");
            a.cmp(b)
        }
    }
}

/// Whether `chain` matches the search text on name, id or registry name.
pub fn matches_search(chain: &ChainRecord, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let needle = needle.to_lowercase();
    [&chain.pretty_name, &chain.chain_id, &chain.chain_name]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Chains to display for `state`, in display order.
pub fn derive_visible_list<'a>(chains: &'a [ChainRecord], state: &ViewState) -> Vec<&'a ChainRecord> {
    let mut visible: Vec<&ChainRecord> = match state.layout {
        Layout::Grid { show_testnets } => {
            let wanted = if show_testnets {
                NetworkType::Testnet
            } else {
                NetworkType::Mainnet
            };
            chains.iter().filter(|c| c.network_type == wanted).collect()
        }
        Layout::List { .. } => chains.iter().collect(),
    };

    if let Layout::List { sort } = state.layout {
        let key = sort.property;
        match sort.direction {
            SortDirection::Descending => {
                visible.sort_by(|a, b| locale_cmp(key.key(a), key.key(b)))
            }
            SortDirection::Ascending => {
                visible.sort_by(|a, b| locale_cmp(key.key(b), key.key(a)))
            }
            SortDirection::Unsorted => {}
        }
    }

    visible.retain(|c| matches_search(c, &state.search_text));
    visible
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn chain(name: &str, id: &str, pretty: &str, network_type: &str) -> ChainRecord {
        serde_json::from_value(json!({
            "chain_name": name,
            "chain_id": id,
            "pretty_name": pretty,
            "network_type": network_type,
        }))
        .unwrap()
    }

    fn dataset() -> Vec<ChainRecord> {
        vec![
            chain("osmosis", "osmosis-1", "Osmosis", "mainnet"),
            chain("cosmoshub", "cosmoshub-4", "Cosmos Hub", "mainnet"),
            chain("osmosistestnet", "osmo-test-5", "Osmosis Testnet", "testnet"),
            chain("akash", "akashnet-2", "Akash", "mainnet"),
            chain("junotestnet", "uni-6", "juno testnet", "testnet"),
        ]
    }

    fn ids(list: &[&ChainRecord]) -> Vec<String> {
        list.iter().map(|c| c.chain_id.clone()).collect()
    }

    #[test]
    fn sort_direction_cycles() {
        let mut state = ViewState::list();
        assert_eq!(state.sort(), Some(Sort::default()));

        assert!(state.set_sort_key(SortProperty::Name));
        assert_eq!(state.sort().unwrap().direction, SortDirection::Ascending);
        state.set_sort_key(SortProperty::Name);
        assert_eq!(state.sort().unwrap().direction, SortDirection::Unsorted);
        state.set_sort_key(SortProperty::Name);
        assert_eq!(state.sort().unwrap().direction, SortDirection::Descending);
    }

    #[test]
    fn new_property_always_starts_descending() {
        for start in [
            SortDirection::Descending,
            SortDirection::Ascending,
            SortDirection::Unsorted,
        ] {
            let mut state = ViewState {
                search_text: String::new(),
                layout: Layout::List {
                    sort: Sort {
                        property: SortProperty::Name,
                        direction: start,
                    },
                },
            };
            state.set_sort_key(SortProperty::Id);
            assert_eq!(
                state.sort(),
                Some(Sort {
                    property: SortProperty::Id,
                    direction: SortDirection::Descending
                })
            );
        }
    }

    #[test]
    fn layout_specific_setters_are_ignored_elsewhere() {
        let mut grid = ViewState::grid();
        assert!(!grid.set_sort_key(SortProperty::Id));
        assert_eq!(grid, ViewState::grid());

        let mut list = ViewState::list();
        assert!(!list.set_category_filter(true));
        assert_eq!(list, ViewState::list());
    }

    #[test]
    fn empty_search_keeps_all_in_sort_order() {
        let data = dataset();
        let mut state = ViewState::list();

        let desc = derive_visible_list(&data, &state);
        assert_eq!(
            ids(&desc),
            vec!["akashnet-2", "cosmoshub-4", "uni-6", "osmosis-1", "osmo-test-5"]
        );

        state.set_sort_key(SortProperty::Name);
        let asc = derive_visible_list(&data, &state);
        assert_eq!(
            ids(&asc),
            vec!["osmo-test-5", "osmosis-1", "uni-6", "cosmoshub-4", "akashnet-2"]
        );

        state.set_sort_key(SortProperty::Name);
        let unsorted = derive_visible_list(&data, &state);
        let catalog: Vec<String> = data.iter().map(|c| c.chain_id.clone()).collect();
        assert_eq!(ids(&unsorted), catalog);
    }

    #[test]
    fn sort_by_id() {
        let data = dataset();
        let mut state = ViewState::list();
        state.set_sort_key(SortProperty::Id);
        assert_eq!(
            ids(&derive_visible_list(&data, &state)),
            vec!["akashnet-2", "cosmoshub-4", "osmo-test-5", "osmosis-1", "uni-6"]
        );

        state.set_sort_key(SortProperty::Id);
        assert_eq!(
            ids(&derive_visible_list(&data, &state)),
            vec!["uni-6", "osmosis-1", "osmo-test-5", "cosmoshub-4", "akashnet-2"]
        );
    }

    #[test]
    fn default_view_of_bundled_registry_starts_at_a() {
        let registry = crate::Registry::bundled();
        let names: Vec<&str> = derive_visible_list(&registry.chains, &ViewState::default())
            .iter()
            .map(|c| c.pretty_name.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "Akash",
                "Cosmos Hub",
                "Cosmos Hub Public Testnet",
                "Evmos",
                "Juno",
                "Osmosis",
                "Osmosis Testnet",
                "Secret Network",
                "Stargaze",
            ]
        );
    }

    #[test]
    fn search_matches_any_field_case_insensitively() {
        let data = dataset();
        let mut state = ViewState::list();
        state.set_sort_key(SortProperty::Name);
        state.set_sort_key(SortProperty::Name);

        for needle in ["OSMO", "hub", "uni-", "testnet", "net-2", "x", "", "Akash"] {
            state.set_search_text(needle);
            let visible = derive_visible_list(&data, &state);
            let lower = needle.to_lowercase();
            for c in &data {
                let hit = c.pretty_name.to_lowercase().contains(&lower)
                    || c.chain_id.to_lowercase().contains(&lower)
                    || c.chain_name.to_lowercase().contains(&lower);
                assert_eq!(
                    visible.iter().any(|v| v.chain_id == c.chain_id),
                    hit,
                    "{needle:?} vs {}",
                    c.chain_id
                );
            }
        }

        state.set_search_text("osmosistest");
        assert_eq!(ids(&derive_visible_list(&data, &state)), vec!["osmo-test-5"]);
    }

    #[test]
    fn grid_filters_by_category_before_search() {
        let data = dataset();
        let mut state = ViewState::grid();
        assert_eq!(
            ids(&derive_visible_list(&data, &state)),
            vec!["osmosis-1", "cosmoshub-4", "akashnet-2"]
        );

        state.set_category_filter(true);
        assert_eq!(
            ids(&derive_visible_list(&data, &state)),
            vec!["osmo-test-5", "uni-6"]
        );

        state.set_search_text("JUNO");
        assert_eq!(ids(&derive_visible_list(&data, &state)), vec!["uni-6"]);
    }

    #[test]
    fn derivation_is_deterministic() {
        let data = dataset();
        let mut state = ViewState::list();
        state.set_search_text("o");
        assert_eq!(
            ids(&derive_visible_list(&data, &state)),
            ids(&derive_visible_list(&data, &state))
        );
    }

    #[test]
    fn locale_cmp_ignores_case_first() {
        assert_eq!(locale_cmp("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_cmp("Zebra", "apple"), Ordering::Greater);
        assert_eq!(locale_cmp("a", "A"), Ordering::Less);
        assert_eq!(locale_cmp("A", "a"), Ordering::Greater);
        assert_eq!(locale_cmp("same", "same"), Ordering::Equal);
        assert_eq!(locale_cmp("ab", "abc"), Ordering::Less);
    }

    #[test]
    fn locale_cmp_puts_punctuation_before_digits_and_letters() {
        assert_eq!(locale_cmp("a_b", "a1"), Ordering::Less);
        assert_eq!(locale_cmp("a-b", "ab"), Ordering::Less);
        assert_eq!(locale_cmp("1", "a"), Ordering::Less);
        assert_eq!(locale_cmp("evmos_9001-2", "evmos1"), Ordering::Less);
    }

    #[test]
    fn view_state_serializes() {
        let state = ViewState::grid();
        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(
            value,
            json!({"search_text": "", "layout": {"kind": "grid", "show_testnets": false}})
        );
        let back: ViewState = serde_json::from_value(value).unwrap();
        assert_eq!(back, state);
    }
}
