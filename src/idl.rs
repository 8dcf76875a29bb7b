//! Record and event layouts of the otc swap program and its price oracle.

use crate::schema::{AccountSchema, Discriminator, Field, FieldType};

pub const CONFIG_ACCOUNT: &str = "Config";
pub const ORACLE_STATE_ACCOUNT: &str = "OracleState";
pub const BURN_EVENT: &str = "BurnEvent";
pub const MINT_EVENT: &str = "MintEvent";
pub const INITIALIZED_EVENT: &str = "InitializedEvent";

const CONFIG_FIELDS: &[(&str, FieldType)] = &[
    ("squad_multisig", FieldType::Pubkey),
    ("sbtc_mint", FieldType::Pubkey),
    ("zbtc_mint", FieldType::Pubkey),
    ("treasury_zbtc_vault", FieldType::Pubkey),
    ("fee_vault", FieldType::Pubkey),
    ("fee_rate_bps", FieldType::U64),
    ("min_collateral_bps", FieldType::U64),
    ("bump", FieldType::U8),
    ("sbtc_decimals", FieldType::U8),
    ("zbtc_decimals", FieldType::U8),
    ("paused", FieldType::Bool),
    ("total_sbtc_outstanding", FieldType::U128),
    ("created_at", FieldType::I64),
    ("authorized_zbtc_pyth_feed", FieldType::Pubkey),
    ("authorized_sbtc_oracle_state_pda", FieldType::Pubkey),
];

//the oracle program publishes no idl, deployments with another layout set Config::oracle_schema
const ORACLE_STATE_FIELDS: &[(&str, FieldType)] = &[
    ("target_price_cents", FieldType::U64),
    ("last_update", FieldType::I64),
];

const BURN_EVENT_FIELDS: &[(&str, FieldType)] = &[
    ("user", FieldType::Pubkey),
    ("sbtc_burned", FieldType::U64),
    ("zbtc_redeemed", FieldType::U64),
    ("fee_amount", FieldType::U64),
    ("zbtc_price_cents", FieldType::U64),
    ("sbtc_price_cents", FieldType::U64),
    ("timestamp", FieldType::I64),
];

const MINT_EVENT_FIELDS: &[(&str, FieldType)] = &[
    ("user", FieldType::Pubkey),
    ("zbtc_deposited", FieldType::U64),
    ("sbtc_minted", FieldType::U128),
    ("fee_amount", FieldType::U64),
    ("zbtc_price_cents", FieldType::U64),
    ("sbtc_price_cents", FieldType::U64),
    ("timestamp", FieldType::I64),
];

const INITIALIZED_EVENT_FIELDS: &[(&str, FieldType)] = &[
    ("squad_multisig", FieldType::Pubkey),
    ("sbtc_mint", FieldType::Pubkey),
    ("zbtc_mint", FieldType::Pubkey),
    ("treasury_vault", FieldType::Pubkey),
    ("fee_vault", FieldType::Pubkey),
    ("fee_rate_bps", FieldType::U64),
    ("min_collateral_bps", FieldType::U64),
    ("timestamp", FieldType::I64),
    ("sbtc_mint_authority", FieldType::Pubkey),
    ("treasury_vault_authority", FieldType::Pubkey),
    ("fee_vault_authority", FieldType::Pubkey),
    ("authorized_zbtc_pyth_feed", FieldType::Pubkey),
    ("authorized_sbtc_oracle_state_pda", FieldType::Pubkey),
];

fn to_fields(fields: &[(&str, FieldType)]) -> Vec<Field> {
    fields.iter().map(|(name, ty)| Field::new(*name, *ty)).collect()
}

pub fn config_schema() -> AccountSchema {
    AccountSchema::new(CONFIG_ACCOUNT, Discriminator::for_account(CONFIG_ACCOUNT), to_fields(CONFIG_FIELDS))
}

pub fn oracle_state_schema() -> AccountSchema {
    AccountSchema::new(
        ORACLE_STATE_ACCOUNT,
        Discriminator::for_account(ORACLE_STATE_ACCOUNT),
        to_fields(ORACLE_STATE_FIELDS),
    )
}

pub fn burn_event_schema() -> AccountSchema {
    AccountSchema::new(BURN_EVENT, Discriminator::for_event(BURN_EVENT), to_fields(BURN_EVENT_FIELDS))
}

pub fn mint_event_schema() -> AccountSchema {
    AccountSchema::new(MINT_EVENT, Discriminator::for_event(MINT_EVENT), to_fields(MINT_EVENT_FIELDS))
}

pub fn initialized_event_schema() -> AccountSchema {
    AccountSchema::new(
        INITIALIZED_EVENT,
        Discriminator::for_event(INITIALIZED_EVENT),
        to_fields(INITIALIZED_EVENT_FIELDS),
    )
}
