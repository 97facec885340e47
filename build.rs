use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

// Subset of a chain-registry chain.json needed for code generation
#[derive(Debug, Clone, Deserialize)]
struct ChainEntry {
    chain_name: String,
    chain_id: String,
    pretty_name: String,
    network_type: String,
}

#[derive(Debug, Clone, Deserialize)]
struct AssetListEntry {
    chain_name: String,
    #[serde(default)]
    assets: Vec<serde_json::Value>,
}

/// One of the two registry files bundled with the crate.
struct RegistryFile {
    file_name: &'static str,
    path_var: &'static str,
    url_var: &'static str,
}

const CHAINS: RegistryFile = RegistryFile {
    file_name: "chains.json",
    path_var: "CHAIN_REGISTRY_PATH",
    url_var: "CHAIN_REGISTRY_URL",
};

const ASSETS: RegistryFile = RegistryFile {
    file_name: "assets.json",
    path_var: "CHAIN_REGISTRY_ASSETS_PATH",
    url_var: "CHAIN_REGISTRY_ASSETS_URL",
};

/// Simplified chain data for code generation
#[derive(Debug, Clone)]
struct NetworkData {
    variant: String,
    chain_name: String,
    chain_id: String,
    pretty_name: String,
    network_type: String,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=CHAIN_REGISTRY_DIR");
    for file in [&CHAINS, &ASSETS] {
        println!("cargo:rerun-if-env-changed={}", file.path_var);
        println!("cargo:rerun-if-env-changed={}", file.url_var);
    }

    let chains_json = load_registry_file(&CHAINS);
    let assets_json = load_registry_file(&ASSETS);

    let networks = get_networks(&chains_json);
    check_asset_lists(&assets_json, &networks);

    let network_code = generate_network_code(&networks);
    let formatted_code = format_rust_code(&network_code);

    let out_dir = env::var("OUT_DIR").unwrap();
    // Keep copies in OUT_DIR for include_str! and runtime loading
    for (file, text) in [(&CHAINS, &chains_json), (&ASSETS, &assets_json)] {
        let dest = Path::new(&out_dir).join(file.file_name);
        fs::write(&dest, text)
            .unwrap_or_else(|e| panic!("Failed to write {} to {:?}: {e}", file.file_name, dest));
        println!("cargo:rustc-env={}={}", file.path_var, dest.display());
    }

    let dest_path = Path::new(&out_dir).join("network_generated.rs");
    fs::write(&dest_path, formatted_code).unwrap();

    println!(
        "cargo:info=Generated Network enum for {} chains",
        networks.len()
    );
}

fn load_registry_file(file: &RegistryFile) -> String {
    if let Ok(path) = env::var(file.path_var) {
        return fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read {} file {path}: {e}", file.path_var));
    }

    let manifest_dir =
        PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set by Cargo"));
    let local = registry_dir(&manifest_dir).join(file.file_name);
    println!("cargo:rerun-if-changed={}", local.display());

    // Downloads are opt-in: without a URL the bundled snapshot is the source
    let url = match env::var(file.url_var) {
        Ok(url) => url,
        Err(_) => return read_local(&local),
    };

    let is_docs_rs = env::var("DOCS_RS").is_ok();
    let is_offline = env::var("CARGO_FEATURE_OFFLINE").is_ok();
    if is_docs_rs || is_offline {
        return read_local(&local);
    }

    let ttl = Duration::from_secs(2 * 60 * 60); // 2h
    if !is_stale(&local, ttl) {
        if let Ok(text) = fs::read_to_string(&local) {
            return text;
        }
    }

    match download(&url) {
        Some(text) => {
            fs::write(&local, &text).unwrap_or_else(|e| {
                panic!("Failed to write downloaded {} to {:?}: {e}", file.file_name, local)
            });
            text
        }
        None => {
            println!(
                "cargo:warning=Download of {url} failed, using local {:?}",
                local
            );
            read_local(&local)
        }
    }
}

fn read_local(path: &Path) -> String {
    fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read chain registry file {:?}: {e}", path))
}

fn download(url: &str) -> Option<String> {
    let client = match Client::builder().timeout(Duration::from_secs(30)).build() {
        Ok(c) => c,
        Err(e) => {
            println!("cargo:warning=Failed to build HTTP client: {e}");
            return None;
        }
    };

    let response = match client
        .get(url)
        .header("User-Agent", "cosmos-network-helper/0.1")
        .send()
    {
        Ok(r) => r,
        Err(e) => {
            println!("cargo:warning=Failed to download {url}: {e}");
            return None;
        }
    };

    if !response.status().is_success() {
        println!(
            "cargo:warning=Fetching {url} returned HTTP {}",
            response.status()
        );
        return None;
    }

    match response.text() {
        Ok(text) => Some(text),
        Err(e) => {
            println!("cargo:warning=Failed to read response body from {url}: {e}");
            None
        }
    }
}

fn is_stale(path: &Path, ttl: Duration) -> bool {
    match fs::metadata(path) {
        Ok(meta) => match meta.modified() {
            Ok(modified) => match modified.elapsed() {
                Ok(elapsed) => elapsed > ttl,
                Err(_) => true,
            },
            Err(_) => true,
        },
        Err(_) => true,
    }
}

fn registry_dir(manifest_dir: &Path) -> PathBuf {
    if let Ok(dir) = env::var("CHAIN_REGISTRY_DIR") {
        return PathBuf::from(dir);
    }
    manifest_dir.join("data")
}

// Returns the networks in catalog order; duplicate names or ids abort the build
fn get_networks(json_str: &str) -> Vec<NetworkData> {
    let chains: Vec<ChainEntry> = match serde_json::from_str(json_str) {
        Ok(chains) => chains,
        Err(err) => panic!("Failed to parse chains.json: {err}"),
    };

    let default_names = HashMap::from([
        ("cosmoshub", "CosmosHub"),
        ("cosmoshubtestnet", "CosmosHubTestnet"),
        ("osmosistestnet", "OsmosisTestnet"),
        ("secretnetwork", "SecretNetwork"),
    ]);

    let mut names = HashSet::new();
    let mut ids = HashSet::new();
    let mut variants = HashSet::new();

    chains
        .iter()
        .map(|chain| {
            if !names.insert(chain.chain_name.clone()) {
                panic!("chain_name {} appears twice in chains.json", chain.chain_name);
            }
            if !ids.insert(chain.chain_id.clone()) {
                panic!("chain_id {} appears twice in chains.json", chain.chain_id);
            }
            if !matches!(chain.network_type.as_str(), "mainnet" | "testnet" | "devnet") {
                panic!(
                    "unknown network_type {:?} for {}",
                    chain.network_type, chain.chain_name
                );
            }

            let variant = default_names
                .get(chain.chain_name.as_str())
                .map(|s| s.to_string())
                .unwrap_or_else(|| sanitize_enum_name(&chain.chain_name));
            if !variants.insert(variant.clone()) {
                panic!("chain_name {} maps to a duplicate variant {variant}", chain.chain_name);
            }

            NetworkData {
                variant,
                chain_name: chain.chain_name.clone(),
                chain_id: chain.chain_id.clone(),
                pretty_name: chain.pretty_name.clone(),
                network_type: chain.network_type.clone(),
            }
        })
        .collect()
}

fn check_asset_lists(json_str: &str, networks: &[NetworkData]) {
    let lists: Vec<AssetListEntry> = match serde_json::from_str(json_str) {
        Ok(lists) => lists,
        Err(err) => panic!("Failed to parse assets.json: {err}"),
    };

    let known: HashSet<&str> = networks.iter().map(|n| n.chain_name.as_str()).collect();
    for list in &lists {
        if !known.contains(list.chain_name.as_str()) {
            println!(
                "cargo:warning=assets.json lists {} which has no chain record",
                list.chain_name
            );
        }
        if list.assets.is_empty() {
            println!("cargo:warning=asset list for {} is empty", list.chain_name);
        }
    }
}

fn generate_network_code(networks: &[NetworkData]) -> String {
    let mut enum_variants = TokenStream::new();
    for network in networks {
        let name_ident = format_ident!("{}", network.variant);
        let doc_comment = format!("{} ({})", network.pretty_name, network.chain_id);
        enum_variants.extend(quote! {
            #[doc = #doc_comment]
            #name_ident,
        });
    }

    let info_arms = networks
        .iter()
        .map(|network| {
            let name_ident = format_ident!("{}", network.variant);
            let chain_name = &network.chain_name;
            let chain_id = &network.chain_id;
            let pretty_name = &network.pretty_name;
            let network_type = match network.network_type.as_str() {
                "testnet" => quote! { crate::schema::NetworkType::Testnet },
                "devnet" => quote! { crate::schema::NetworkType::Devnet },
                _ => quote! { crate::schema::NetworkType::Mainnet },
            };
            quote! {
                Self::#name_ident => NetworkInfo {
                    chain_name: #chain_name,
                    chain_id: #chain_id,
                    pretty_name: #pretty_name,
                    network_type: #network_type,
                }
            }
        })
        .collect::<Vec<_>>();

    let name_arms = networks
        .iter()
        .map(|network| {
            let name_ident = format_ident!("{}", network.variant);
            let chain_name = &network.chain_name;
            quote! { #chain_name => Ok(Self::#name_ident), }
        })
        .collect::<Vec<_>>();

    let id_arms = networks
        .iter()
        .map(|network| {
            let name_ident = format_ident!("{}", network.variant);
            let chain_id = &network.chain_id;
            quote! { #chain_id => Ok(Self::#name_ident), }
        })
        .collect::<Vec<_>>();

    let generated_code = quote! {
        use once_cell::sync::OnceCell;
        use strum_macros::EnumIter;

        #[doc = r" Identity of a bundled chain-registry entry"]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct NetworkInfo {
            pub chain_name: &'static str,
            pub chain_id: &'static str,
            pub pretty_name: &'static str,
            pub network_type: crate::schema::NetworkType,
        }

        #[doc = r" The chains bundled with this crate, in catalog order."]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
        pub enum Network {
            #enum_variants
        }

        static CHAINS_JSON: &str = include_str!(concat!(env!("OUT_DIR"), "/chains.json"));
        static ASSETS_JSON: &str = include_str!(concat!(env!("OUT_DIR"), "/assets.json"));
        static CHAINS: OnceCell<Vec<crate::schema::ChainRecord>> = OnceCell::new();
        static ASSETS: OnceCell<Vec<crate::schema::AssetList>> = OnceCell::new();

        /// Full chain list deserialized from the bundled chains.json.
        pub fn all_chains() -> &'static [crate::schema::ChainRecord] {
            CHAINS
                .get_or_init(|| {
                    serde_json::from_str(CHAINS_JSON)
                        .expect("Failed to parse bundled chains.json; try cleaning and rebuilding")
                })
                .as_slice()
        }

        /// Asset lists deserialized from the bundled assets.json.
        pub fn all_assets() -> &'static [crate::schema::AssetList] {
            ASSETS
                .get_or_init(|| {
                    serde_json::from_str(ASSETS_JSON)
                        .expect("Failed to parse bundled assets.json; try cleaning and rebuilding")
                })
                .as_slice()
        }

        impl Network {
            /// Returns the identity fields of this network
            pub fn info(&self) -> NetworkInfo {
                match self {
                    #(#info_arms),*
                }
            }

            /// Returns the chain-registry directory name.
            pub fn chain_name(&self) -> &'static str {
                self.info().chain_name
            }

            /// Returns the chain id, e.g. `cosmoshub-4`.
            pub fn chain_id(&self) -> &'static str {
                self.info().chain_id
            }

            /// Returns the human readable name.
            pub fn pretty_name(&self) -> &'static str {
                self.info().pretty_name
            }

            pub fn network_type(&self) -> crate::schema::NetworkType {
                self.info().network_type
            }

            /// Returns the full bundled record for this network.
            pub fn record(&self) -> &'static crate::schema::ChainRecord {
                let name = self.chain_name();
                all_chains()
                    .iter()
                    .find(|c| c.chain_name == name)
                    .expect("bundled chains.json and generated Network enum out of sync")
            }

            /// Looks a network up by its chain-registry name.
            pub fn from_chain_name(name: &str) -> Result<Self, UnknownNetwork> {
                match name {
                    #(#name_arms)*
                    _ => Err(UnknownNetwork(name.to_string())),
                }
            }
        }

        impl TryFrom<&str> for Network {
            type Error = UnknownNetwork;

            /// Initializes `Network` from a chain id, returns error if the chain is not bundled
            fn try_from(value: &str) -> Result<Self, Self::Error> {
                match value {
                    #(#id_arms)*
                    _ => Err(UnknownNetwork(value.to_string())),
                }
            }
        }

        impl<'de> Deserialize<'de> for Network {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let value = String::deserialize(deserializer)?;
                Network::try_from(value.as_str())
                    .or_else(|_| Network::from_chain_name(&value))
                    .map_err(de::Error::custom)
            }
        }

        #[doc = r" Error indicating that a chain is not part of the bundled registry."]
        #[derive(Error, Debug, Clone, PartialEq, Eq)]
        #[error("network {0} is not in the bundled chain registry")]
        pub struct UnknownNetwork(pub String);
    };

    generated_code.to_string()
}

fn sanitize_enum_name(name: &str) -> String {
    let filtered: String = name
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            }
        })
        .collect();

    if filtered.chars().next().is_some_and(char::is_alphabetic) {
        filtered
    } else {
        format!("Network{filtered}")
    }
}

/// Formats the generated code with syn and prettyplease, keeping the raw
/// token string if it does not parse.
fn format_rust_code(code: &str) -> String {
    match syn::parse_file(code) {
        Ok(file) => prettyplease::unparse(&file),
        Err(_) => code.to_string(),
    }
}
