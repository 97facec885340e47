//! Serde bindings for the cosmos chain-registry `chain.json` and
//! `assetlist.json` schemas.
//!
//! Only the fields the directory and the wallet conversion read are modelled;
//! everything else in a registry file is ignored. Use [`load_registry`] to
//! parse the files exported by the build script, or [`Registry::bundled`] for
//! the copy compiled into the crate.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use thiserror::Error;

/// Network category of a chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NetworkType {
    Mainnet,
    Testnet,
    Devnet,
}

/// Top-level chain record as defined by the chain registry.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ChainRecord {
    pub chain_name: String,
    pub chain_id: String,
    pub pretty_name: String,
    pub network_type: NetworkType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bech32_prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slip44: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fees: Option<Fees>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staking: Option<Staking>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codebase: Option<Codebase>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apis: Option<Apis>,
    #[serde(
        rename = "logo_URIs",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub logo_uris: Option<LogoUris>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub explorers: Vec<Explorer>,
}

impl ChainRecord {
    /// First logo available, preferring png over jpeg over svg.
    pub fn logo_uri(&self) -> Option<&str> {
        self.logo_uris.as_ref().and_then(LogoUris::preferred)
    }

    pub fn is_testnet(&self) -> bool {
        self.network_type == NetworkType::Testnet
    }

    /// Denoms accepted for transaction fees.
    pub fn fee_tokens(&self) -> &[FeeToken] {
        self.fees
            .as_ref()
            .map(|f| f.fee_tokens.as_slice())
            .unwrap_or_default()
    }

    /// Denoms that can be staked.
    pub fn staking_tokens(&self) -> &[StakingToken] {
        self.staking
            .as_ref()
            .map(|s| s.staking_tokens.as_slice())
            .unwrap_or_default()
    }

    /// First advertised RPC endpoint.
    pub fn rpc_endpoint(&self) -> Option<&str> {
        self.apis
            .as_ref()
            .and_then(|a| a.rpc.first())
            .map(|e| e.address.as_str())
    }

    /// First advertised REST (LCD) endpoint.
    pub fn rest_endpoint(&self) -> Option<&str> {
        self.apis
            .as_ref()
            .and_then(|a| a.rest.first())
            .map(|e| e.address.as_str())
    }

    pub fn explorers(&self) -> &[Explorer] {
        &self.explorers
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct LogoUris {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub png: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jpeg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub svg: Option<String>,
}

impl LogoUris {
    pub fn preferred(&self) -> Option<&str> {
        self.png
            .as_deref()
            .or(self.jpeg.as_deref())
            .or(self.svg.as_deref())
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Fees {
    #[serde(default)]
    pub fee_tokens: Vec<FeeToken>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct FeeToken {
    pub denom: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low_gas_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_gas_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high_gas_price: Option<f64>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Staking {
    #[serde(default)]
    pub staking_tokens: Vec<StakingToken>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct StakingToken {
    pub denom: String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Codebase {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cosmos_sdk_version: Option<String>,
    #[serde(default)]
    pub cosmwasm_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cosmwasm_version: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Apis {
    #[serde(default)]
    pub rpc: Vec<Endpoint>,
    #[serde(default)]
    pub rest: Vec<Endpoint>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Endpoint {
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Explorer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_page: Option<String>,
}

/// Assets registered for one chain.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct AssetList {
    pub chain_name: String,
    #[serde(default)]
    pub assets: Vec<Asset>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Asset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub denom_units: Vec<DenomUnit>,
    pub base: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub display: String,
    pub symbol: String,
    #[serde(
        rename = "logo_URIs",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub logo_uris: Option<LogoUris>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coingecko_id: Option<String>,
}

impl Asset {
    /// Exponent of the display denom unit, 0 when the unit is not listed.
    pub fn display_exponent(&self) -> u8 {
        self.denom_units
            .iter()
            .find(|u| u.denom == self.display)
            .map_or(0, |u| u.exponent)
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct DenomUnit {
    pub denom: String,
    pub exponent: u8,
}

/// The read-only chain and asset catalog the directory is built over.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    pub chains: Vec<ChainRecord>,
    pub assets: Vec<AssetList>,
}

impl Registry {
    pub fn new(chains: Vec<ChainRecord>, assets: Vec<AssetList>) -> Self {
        Self { chains, assets }
    }

    /// Registry backed by the data compiled into the crate.
    pub fn bundled() -> Self {
        Self::new(crate::all_chains().to_vec(), crate::all_assets().to_vec())
    }

    /// Parse a registry from chain and asset list JSON arrays.
    pub fn from_json(chains: &str, assets: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::new(
            serde_json::from_str(chains)?,
            serde_json::from_str(assets)?,
        ))
    }

    pub fn chain_by_id(&self, chain_id: &str) -> Option<&ChainRecord> {
        self.chains.iter().find(|c| c.chain_id == chain_id)
    }

    /// Asset list registered under the chain's name, if any.
    pub fn asset_list(&self, chain: &ChainRecord) -> Option<&AssetList> {
        self.assets.iter().find(|a| a.chain_name == chain.chain_name)
    }

    /// First asset of the chain's list; the one shown next to the chain.
    pub fn primary_asset(&self, chain: &ChainRecord) -> Option<&Asset> {
        self.asset_list(chain).and_then(|list| list.assets.first())
    }
}

/// Errors when loading the registry files at runtime.
#[derive(Debug, Error)]
pub enum SchemaLoadError {
    #[error("{0} not set; build script should export it")]
    MissingPath(&'static str),
    #[error("failed to read {0}: {1}")]
    Io(String, #[source] std::io::Error),
    #[error("failed to parse {0}: {1}")]
    Json(String, #[source] serde_json::Error),
}

fn load_file<T: serde::de::DeserializeOwned>(
    var: &'static str,
    path: Option<&'static str>,
) -> Result<T, SchemaLoadError> {
    let path = path.ok_or(SchemaLoadError::MissingPath(var))?;
    let text =
        std::fs::read_to_string(path).map_err(|e| SchemaLoadError::Io(path.to_string(), e))?;
    serde_json::from_str(&text).map_err(|e| SchemaLoadError::Json(path.to_string(), e))
}

/// Load the chain list and asset lists from the files exported by the build script.
pub fn load_registry() -> Result<Registry, SchemaLoadError> {
    let chains = load_file("CHAIN_REGISTRY_PATH", option_env!("CHAIN_REGISTRY_PATH"))?;
    let assets = load_file(
        "CHAIN_REGISTRY_ASSETS_PATH",
        option_env!("CHAIN_REGISTRY_ASSETS_PATH"),
    )?;
    Ok(Registry::new(chains, assets))
}
