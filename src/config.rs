use solana_program::pubkey::Pubkey;
use std::str::FromStr;

use crate::{error::ConfigError, idl, schema::AccountSchema};

pub const DEVNET_RPC_URL: &str = "https://api.devnet.solana.com";
pub const SWAP_PROGRAM_ID: &str = "DBHmndyfN4j7BtQsLaCR1SPd7iAXaf1ezUicDs3pUXS8";
pub const ORACLE_PROGRAM_ID: &str = "8UDq3zAd8RqqkVVpCS8bRbRuWUQyDD6ioVVmtYtUCy6y";
pub const SQUAD_MULTISIG: &str = "5eWBQxV7BZSVA4FqDfxQEZRFr67LZkCy9JNkoX2Q4Q5b";
pub const PYTH_BTC_USD_FEED: &str = "HovQMDrbAgAYPCmHVSrezcSmkMtXSSUsLDFANExrZh2J";
pub const SBTC_MINT: &str = "7dMm9RgrkknPkrp7n1sgkbJFPkG5pAZzEs32NcyjeDkW";
pub const ZBTC_MINT: &str = "91AgzqSfXnCq6AJm5CPPHL3paB25difEJ1TfSnrFKrf";

pub const CONFIG_SEED: &str = "config_v1";
pub const SBTC_MINT_AUTHORITY_SEED: &str = "sbtc_mint_authority";
pub const TREASURY_AUTH_SEED: &str = "treasury_auth_v1";
pub const FEE_AUTH_SEED: &str = "fee_auth_v1";
pub const TREASURY_SEED: &str = "treasury_v1";
pub const FEES_SEED: &str = "fees_v1";
pub const ORACLE_STATE_SEED: &str = "oracle";

//46257.62 USD, shown while the oracle can't be read
pub const FALLBACK_PRICE_CENTS: u64 = 4_625_762;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeedConfig {
    pub config: String,
    pub sbtc_mint_authority: String,
    pub treasury_auth: String,
    pub fee_auth: String,
    pub treasury: String,
    pub fees: String,
    pub oracle_state: String,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            config: CONFIG_SEED.to_string(),
            sbtc_mint_authority: SBTC_MINT_AUTHORITY_SEED.to_string(),
            treasury_auth: TREASURY_AUTH_SEED.to_string(),
            fee_auth: FEE_AUTH_SEED.to_string(),
            treasury: TREASURY_SEED.to_string(),
            fees: FEES_SEED.to_string(),
            oracle_state: ORACLE_STATE_SEED.to_string(),
        }
    }
}

/// Deployment parameters, loaded once and shared read-only afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub deploy_env: String,
    pub rpc_url: String,
    pub swap_program_id: Pubkey,
    pub oracle_program_id: Pubkey,
    pub squad_multisig: Pubkey,
    pub pyth_price_feed: Pubkey,
    pub sbtc_mint: Pubkey,
    pub zbtc_mint: Pubkey,
    pub seeds: SeedConfig,
    pub oracle_schema: AccountSchema,
    pub oracle_price_field: String,
    pub fallback_price_cents: u64,
}

impl Config {
    pub fn devnet() -> Result<Self, ConfigError> {
        Self::from_vars(|_| None)
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Builds the devnet configuration with every variable `lookup` knows overriding its default.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());
        let key = |name: &str, default: &str| parse_pubkey(name, &var(name, default));

        Ok(Self {
            deploy_env: var("DEPLOY_ENV", "devnet"),
            rpc_url: var("RPC_URL", DEVNET_RPC_URL),
            swap_program_id: key("SWAP_PROGRAM_ID", SWAP_PROGRAM_ID)?,
            oracle_program_id: key("ORACLE_PROGRAM_ID", ORACLE_PROGRAM_ID)?,
            squad_multisig: key("SQUAD_MULTISIG", SQUAD_MULTISIG)?,
            pyth_price_feed: key("PYTH_PRICE_FEED", PYTH_BTC_USD_FEED)?,
            sbtc_mint: key("SBTC_MINT", SBTC_MINT)?,
            zbtc_mint: key("ZBTC_MINT", ZBTC_MINT)?,
            seeds: SeedConfig::default(),
            oracle_schema: idl::oracle_state_schema(),
            oracle_price_field: "target_price_cents".to_string(),
            fallback_price_cents: FALLBACK_PRICE_CENTS,
        })
    }
}

pub fn parse_pubkey(name: &str, value: &str) -> Result<Pubkey, ConfigError> {
    Pubkey::from_str(value).map_err(|_| ConfigError::InvalidAddress {
        name: name.to_string(),
        value: value.to_string(),
    })
}
