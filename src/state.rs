use solana_program::{clock::UnixTimestamp, pubkey::Pubkey};
use borsh::{BorshDeserialize, BorshSerialize};
use rust_decimal::Decimal;
use std::convert::TryFrom;

use crate::{
    decode::{decode, DecodedRecord},
    error::DecodeError,
    idl,
};

//basis points are stored with a resolution of 10^-4
const BPS_DECIMALS: u32 = 4;

/// Configuration account of the swap program.
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct SwapConfig {
    pub squad_multisig: Pubkey,
    pub sbtc_mint: Pubkey,
    pub zbtc_mint: Pubkey,
    pub treasury_zbtc_vault: Pubkey,
    pub fee_vault: Pubkey,
    pub fee_rate_bps: u64,
    pub min_collateral_bps: u64,
    pub bump: u8,
    pub sbtc_decimals: u8,
    pub zbtc_decimals: u8,
    pub paused: bool,
    pub total_sbtc_outstanding: u128,
    pub created_at: UnixTimestamp,
    pub authorized_zbtc_pyth_feed: Pubkey,
    pub authorized_sbtc_oracle_state_pda: Pubkey,
}

impl SwapConfig {
    //discriminator included
    pub const LEN: usize = 8 + 5 * 32 + 8 + 8 + 1 + 1 + 1 + 1 + 16 + 8 + 32 + 32;

    pub fn unpack(data: &[u8]) -> Result<Self, DecodeError> {
        Self::try_from(&decode(data, &idl::config_schema())?)
    }

    pub fn fee_rate(&self) -> Decimal {
        Decimal::from_i128_with_scale(self.fee_rate_bps as i128, BPS_DECIMALS)
    }

    pub fn min_collateral_ratio(&self) -> Decimal {
        Decimal::from_i128_with_scale(self.min_collateral_bps as i128, BPS_DECIMALS)
    }
}

impl TryFrom<&DecodedRecord> for SwapConfig {
    type Error = DecodeError;

    fn try_from(record: &DecodedRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            squad_multisig: record.pubkey("squad_multisig")?,
            sbtc_mint: record.pubkey("sbtc_mint")?,
            zbtc_mint: record.pubkey("zbtc_mint")?,
            treasury_zbtc_vault: record.pubkey("treasury_zbtc_vault")?,
            fee_vault: record.pubkey("fee_vault")?,
            fee_rate_bps: record.u64("fee_rate_bps")?,
            min_collateral_bps: record.u64("min_collateral_bps")?,
            bump: record.u8("bump")?,
            sbtc_decimals: record.u8("sbtc_decimals")?,
            zbtc_decimals: record.u8("zbtc_decimals")?,
            paused: record.bool("paused")?,
            total_sbtc_outstanding: record.u128("total_sbtc_outstanding")?,
            created_at: record.i64("created_at")?,
            authorized_zbtc_pyth_feed: record.pubkey("authorized_zbtc_pyth_feed")?,
            authorized_sbtc_oracle_state_pda: record.pubkey("authorized_sbtc_oracle_state_pda")?,
        })
    }
}
