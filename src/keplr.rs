//! Keplr `experimentalSuggestChain` payloads built from chain-registry records.

use crate::schema::{AssetList, ChainRecord, FeeToken};
use semver::Version;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Feature flag advertised for stargate chains. Keplr-compatible wallets
/// reject suggestions that list it.
pub const STARGATE_FEATURE: &str = "stargate";

const DEFAULT_SDK_VERSION: Version = Version::new(0, 40, 0);
const DEFAULT_WASM_VERSION: Version = Version::new(0, 24, 0);

// Keplr's own defaults for missing gas prices
const DEFAULT_LOW_GAS_PRICE: f64 = 0.01;
const DEFAULT_AVERAGE_GAS_PRICE: f64 = 0.025;
const DEFAULT_HIGH_GAS_PRICE: f64 = 0.04;

/// Chain configuration in the schema Keplr-compatible wallets accept.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainInfo {
    pub chain_id: String,
    pub chain_name: String,
    pub rpc: String,
    pub rest: String,
    pub bip44: Bip44,
    pub bech32_config: Bech32Config,
    pub currencies: Vec<Currency>,
    pub stake_currency: Currency,
    pub fee_currencies: Vec<FeeCurrency>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
}

impl ChainInfo {
    /// Drop `feature` from the advertised feature list.
    pub fn strip_feature(&mut self, feature: &str) {
        self.features.retain(|f| f != feature);
    }

    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bip44 {
    pub coin_type: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bech32Config {
    pub bech32_prefix_acc_addr: String,
    pub bech32_prefix_acc_pub: String,
    pub bech32_prefix_val_addr: String,
    pub bech32_prefix_val_pub: String,
    pub bech32_prefix_cons_addr: String,
    pub bech32_prefix_cons_pub: String,
}

impl Bech32Config {
    /// Standard cosmos-sdk derivation of all prefixes from the account prefix.
    pub fn from_prefix(prefix: &str) -> Self {
        Self {
            bech32_prefix_acc_addr: prefix.to_string(),
            bech32_prefix_acc_pub: format!("{prefix}pub"),
            bech32_prefix_val_addr: format!("{prefix}valoper"),
            bech32_prefix_val_pub: format!("{prefix}valoperpub"),
            bech32_prefix_cons_addr: format!("{prefix}valcons"),
            bech32_prefix_cons_pub: format!("{prefix}valconspub"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    pub coin_denom: String,
    pub coin_minimal_denom: String,
    pub coin_decimals: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coin_gecko_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeCurrency {
    #[serde(flatten)]
    pub currency: Currency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_price_step: Option<GasPriceStep>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GasPriceStep {
    pub low: f64,
    pub average: f64,
    pub high: f64,
}

impl GasPriceStep {
    fn from_fee_token(token: &FeeToken) -> Option<Self> {
        if token.low_gas_price.is_none()
            && token.average_gas_price.is_none()
            && token.high_gas_price.is_none()
        {
            return None;
        }
        Some(Self {
            low: token.low_gas_price.unwrap_or(DEFAULT_LOW_GAS_PRICE),
            average: token.average_gas_price.unwrap_or(DEFAULT_AVERAGE_GAS_PRICE),
            high: token.high_gas_price.unwrap_or(DEFAULT_HIGH_GAS_PRICE),
        })
    }
}

/// Reasons a chain record cannot be turned into a wallet configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("no asset list registered for {0}")]
    NoAssetList(String),
    #[error("{0} has no bech32 prefix")]
    MissingBech32Prefix(String),
    #[error("{0} has no slip44 coin type")]
    MissingSlip44(String),
    #[error("{0} has no rpc endpoint")]
    NoRpcEndpoint(String),
    #[error("{0} has no rest endpoint")]
    NoRestEndpoint(String),
    #[error("{0} has no staking currency among its assets")]
    NoStakeCurrency(String),
    #[error("unrecognised version {version:?} for {chain}")]
    InvalidVersion { chain: String, version: String },
}

/// Build the wallet configuration for `chain` using the registry's asset lists.
pub fn chain_to_keplr(chain: &ChainRecord, assets: &[AssetList]) -> Result<ChainInfo, ConversionError> {
    let name = || chain.chain_name.clone();

    let asset_list = assets
        .iter()
        .find(|a| a.chain_name == chain.chain_name)
        .ok_or_else(|| ConversionError::NoAssetList(name()))?;
    let prefix = chain
        .bech32_prefix
        .as_deref()
        .ok_or_else(|| ConversionError::MissingBech32Prefix(name()))?;
    let coin_type = chain
        .slip44
        .ok_or_else(|| ConversionError::MissingSlip44(name()))?;
    let rpc = chain
        .rpc_endpoint()
        .ok_or_else(|| ConversionError::NoRpcEndpoint(name()))?;
    let rest = chain
        .rest_endpoint()
        .ok_or_else(|| ConversionError::NoRestEndpoint(name()))?;

    let currencies: Vec<Currency> = asset_list
        .assets
        .iter()
        .map(|asset| Currency {
            coin_denom: asset.symbol.clone(),
            coin_minimal_denom: asset.base.clone(),
            coin_decimals: asset.display_exponent(),
            coin_gecko_id: asset.coingecko_id.clone(),
        })
        .collect();

    let stake_currency = currencies
        .iter()
        .find(|c| {
            chain
                .staking_tokens()
                .iter()
                .any(|t| t.denom == c.coin_minimal_denom)
        })
        .cloned()
        .ok_or_else(|| ConversionError::NoStakeCurrency(name()))?;

    let fee_currencies = currencies
        .iter()
        .filter_map(|c| {
            let token = chain
                .fee_tokens()
                .iter()
                .find(|t| t.denom == c.coin_minimal_denom)?;
            Some(FeeCurrency {
                currency: c.clone(),
                gas_price_step: GasPriceStep::from_fee_token(token),
            })
        })
        .collect();

    Ok(ChainInfo {
        chain_id: chain.chain_id.clone(),
        chain_name: chain.pretty_name.clone(),
        rpc: rpc.to_string(),
        rest: rest.to_string(),
        bip44: Bip44 { coin_type },
        bech32_config: Bech32Config::from_prefix(prefix),
        currencies,
        stake_currency,
        fee_currencies,
        features: features(chain)?,
    })
}

fn features(chain: &ChainRecord) -> Result<Vec<String>, ConversionError> {
    let codebase = chain.codebase.as_ref();
    let sdk = match codebase.and_then(|c| c.cosmos_sdk_version.as_deref()) {
        Some(raw) => parse_version(&chain.chain_name, raw)?,
        None => DEFAULT_SDK_VERSION,
    };

    let mut features = Vec::new();
    if sdk >= Version::new(0, 40, 0) {
        features.push(STARGATE_FEATURE.to_string());
        features.push("ibc-transfer".to_string());
    }
    if sdk >= Version::new(0, 43, 0) {
        features.push("no-legacy-stdTx".to_string());
    }
    if sdk >= Version::new(0, 45, 0) {
        features.push("ibc-go".to_string());
    }

    if let Some(codebase) = codebase.filter(|c| c.cosmwasm_enabled) {
        features.push("cosmwasm".to_string());
        let wasm = match codebase.cosmwasm_version.as_deref() {
            Some(raw) => parse_version(&chain.chain_name, raw)?,
            None => DEFAULT_WASM_VERSION,
        };
        if wasm >= Version::new(0, 24, 0) {
            features.push("wasmd_0.24+".to_string());
        }
    }
    Ok(features)
}

/// Loose version parsing: leading text such as `v` or a fork path is skipped
/// and missing minor or patch components count as zero.
fn parse_version(chain: &str, raw: &str) -> Result<Version, ConversionError> {
    let invalid = || ConversionError::InvalidVersion {
        chain: chain.to_string(),
        version: raw.to_string(),
    };

    let start = raw.find(|c: char| c.is_ascii_digit()).ok_or_else(invalid)?;
    let core: String = raw[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    let mut parts = core
        .split('.')
        .filter(|p| !p.is_empty())
        .map(|p| p.parse::<u64>().map_err(|_| invalid()));
    let major = parts.next().ok_or_else(invalid)??;
    let minor = parts.next().transpose()?.unwrap_or(0);
    let patch = parts.next().transpose()?.unwrap_or(0);
    Ok(Version::new(major, minor, patch))
}
