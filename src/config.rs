//! Runtime settings for icon lookup and rendering.

use serde::{Deserialize, Serialize};

/// Default remote icon location, keyed by chain name.
pub const REMOTE_ICON_TEMPLATE: &str = "https://raw.githubusercontent.com/cosmostation/cosmostation_token_resource/master/coin_image/chains/chain-{name}.svg";

/// Default bundled icon location, keyed by chain name.
pub const LOCAL_ICON_TEMPLATE: &str = "/networks/{name}.png";

/// Settings the page reads once at mount.
///
/// Templates use `{name}` as the chain name placeholder.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HelperConfig {
    pub remote_icon_template: String,
    pub local_icon_template: String,
    /// Characters of the chain name shown when no icon loads.
    pub placeholder_len: usize,
    /// Icon edge length in pixels.
    pub icon_size: u32,
}

impl Default for HelperConfig {
    fn default() -> Self {
        Self {
            remote_icon_template: REMOTE_ICON_TEMPLATE.to_string(),
            local_icon_template: LOCAL_ICON_TEMPLATE.to_string(),
            placeholder_len: 3,
            icon_size: 30,
        }
    }
}

impl HelperConfig {
    /// Parse settings from JSON; missing keys keep their defaults.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn remote_icon_url(&self, name: &str) -> String {
        self.remote_icon_template.replace("{name}", name)
    }

    pub fn local_icon_url(&self, name: &str) -> String {
        self.local_icon_template.replace("{name}", name)
    }
}
