#![allow(dead_code)]

use borsh::BorshSerialize;
use otc_swap_core::{
    decode::Value,
    idl,
    schema::AccountSchema,
    state::SwapConfig,
};
use solana_program::{clock::UnixTimestamp, program_pack::Pack, pubkey::Pubkey};
use spl_token::state::{Account as TokenAccount, AccountState};
use std::str::FromStr;

pub fn key(base58: &str) -> Pubkey {
    Pubkey::from_str(base58).unwrap()
}

/// Lays out `values` the way the program stores them: discriminator, then each field little endian.
pub fn encode(schema: &AccountSchema, values: &[Value]) -> Vec<u8> {
    assert_eq!(schema.fields().len(), values.len());
    let mut data = schema.discriminator().0.to_vec();
    for (field, value) in schema.fields().iter().zip(values) {
        assert_eq!(field.ty, value.field_type(), "value for {} has the wrong type", field.name);
        match *value {
            Value::U8(v) => data.push(v),
            Value::U16(v) => data.extend_from_slice(&v.to_le_bytes()),
            Value::U32(v) => data.extend_from_slice(&v.to_le_bytes()),
            Value::U64(v) => data.extend_from_slice(&v.to_le_bytes()),
            Value::U128(v) => data.extend_from_slice(&v.to_le_bytes()),
            Value::I8(v) => data.extend_from_slice(&v.to_le_bytes()),
            Value::I16(v) => data.extend_from_slice(&v.to_le_bytes()),
            Value::I32(v) => data.extend_from_slice(&v.to_le_bytes()),
            Value::I64(v) => data.extend_from_slice(&v.to_le_bytes()),
            Value::I128(v) => data.extend_from_slice(&v.to_le_bytes()),
            Value::Bool(v) => data.push(v as u8),
            Value::Pubkey(v) => data.extend_from_slice(v.as_ref()),
        }
    }
    assert_eq!(data.len(), schema.account_len());
    data
}

pub fn swap_config(squad_multisig: Pubkey, bump: u8) -> SwapConfig {
    SwapConfig {
        squad_multisig,
        sbtc_mint: key("7dMm9RgrkknPkrp7n1sgkbJFPkG5pAZzEs32NcyjeDkW"),
        zbtc_mint: key("91AgzqSfXnCq6AJm5CPPHL3paB25difEJ1TfSnrFKrf"),
        treasury_zbtc_vault: key("FkECS4C9g9xHDCSacUf1cpZ3MEvquxuD9yb9Ao4asES8"),
        fee_vault: key("DauXPgtQevwJxavMpzH5Zkx3sH7BDuwrZBP5BsYskqgV"),
        fee_rate_bps: 50,
        min_collateral_bps: 1_000,
        bump,
        sbtc_decimals: 8,
        zbtc_decimals: 8,
        paused: false,
        total_sbtc_outstanding: 21_000_000 * 100_000_000,
        created_at: 1_735_689_600,
        authorized_zbtc_pyth_feed: key("HovQMDrbAgAYPCmHVSrezcSmkMtXSSUsLDFANExrZh2J"),
        authorized_sbtc_oracle_state_pda: key("n6vZ3Uczer7nG5MLMed9CdYZajeFhzKHRCQyuAcuhuK"),
    }
}

pub fn config_account_data(config: &SwapConfig) -> Vec<u8> {
    let mut data = idl::config_schema().discriminator().0.to_vec();
    data.extend(config.try_to_vec().unwrap());
    data
}

pub fn oracle_state_data(target_price_cents: u64, last_update: UnixTimestamp) -> Vec<u8> {
    encode(
        &idl::oracle_state_schema(),
        &[Value::U64(target_price_cents), Value::I64(last_update)],
    )
}

pub fn pyth_price_data(price: u64, expo: i32) -> Vec<u8> {
    let mut data = vec![0u8; 48];
    data[16..24].copy_from_slice(&price.to_le_bytes());
    data[24..28].copy_from_slice(&expo.to_le_bytes());
    data
}

pub fn token_account_data(mint: Pubkey, owner: Pubkey, amount: u64) -> Vec<u8> {
    let account = TokenAccount {
        mint,
        owner,
        amount,
        state: AccountState::Initialized,
        ..TokenAccount::default()
    };
    let mut data = vec![0u8; TokenAccount::LEN];
    TokenAccount::pack(account, &mut data).unwrap();
    data
}
