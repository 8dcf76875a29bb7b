use rust_decimal::Decimal;
use solana_program::{clock::UnixTimestamp, msg, program_error::ProgramError, program_pack::Pack, pubkey::Pubkey};
use spl_token::{error::TokenError, state::Account as TokenAccount};
use std::convert::TryFrom;

use crate::{
    config::Config,
    error::{to_error_msg, ClientError, DeriveError, PriceError},
    idl,
    pda::{self, DerivedAddress},
    price::{default_max_ratio, PriceQuote, PriceSource, PythPrice},
    reader::{fetch_record, AccountReader},
    seeds::Seeds,
    state::SwapConfig,
};

/// Every program owned address the swap instructions take.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwapAddresses {
    pub config: DerivedAddress,
    pub sbtc_mint_authority: DerivedAddress,
    pub treasury_authority: DerivedAddress,
    pub fee_authority: DerivedAddress,
    pub treasury_vault: DerivedAddress,
    pub fee_vault: DerivedAddress,
    //token accounts holding the deposited zbtc and the collected fees
    pub treasury_zbtc_vault: DerivedAddress,
    pub fee_zbtc_vault: DerivedAddress,
    pub oracle_state: DerivedAddress,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UserTokenAccounts {
    pub sbtc: DerivedAddress,
    pub zbtc: DerivedAddress,
}

/// Raw token amounts, in base units of each mint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UserBalances {
    pub sbtc: u64,
    pub zbtc: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PriceData {
    pub sbtc: PriceQuote,
    pub btc: PriceQuote,
    //sbtc to btc ratio, or why it was rejected
    pub validation: Result<Decimal, PriceError>,
}

pub struct SwapClient<R: AccountReader> {
    config: Config,
    reader: R,
}

impl<R: AccountReader> SwapClient<R> {
    pub fn new(config: Config, reader: R) -> Self {
        Self { config, reader }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    //all swap program authorities are seeded with the squad multisig, not with whoever is connected
    fn swap_pda(&self, seed: &str) -> Result<DerivedAddress, DeriveError> {
        Seeds::new()
            .with(seed)?
            .with_key(&self.config.squad_multisig)?
            .derive(&self.config.swap_program_id)
    }

    pub fn addresses(&self) -> Result<SwapAddresses, DeriveError> {
        let seeds = &self.config.seeds;
        let treasury_authority = self.swap_pda(&seeds.treasury_auth)?;
        let fee_authority = self.swap_pda(&seeds.fee_auth)?;

        Ok(SwapAddresses {
            config: self.swap_pda(&seeds.config)?,
            sbtc_mint_authority: self.swap_pda(&seeds.sbtc_mint_authority)?,
            treasury_authority,
            fee_authority,
            treasury_vault: self.swap_pda(&seeds.treasury)?,
            fee_vault: self.swap_pda(&seeds.fees)?,
            treasury_zbtc_vault: pda::associated_token_address(&treasury_authority.address, &self.config.zbtc_mint)?,
            fee_zbtc_vault: pda::associated_token_address(&fee_authority.address, &self.config.zbtc_mint)?,
            oracle_state: self.oracle_state()?,
        })
    }

    fn oracle_state(&self) -> Result<DerivedAddress, DeriveError> {
        Seeds::new()
            .with(&self.config.seeds.oracle_state)?
            .derive(&self.config.oracle_program_id)
    }

    pub fn user_token_accounts(&self, user: &Pubkey) -> Result<UserTokenAccounts, DeriveError> {
        Ok(UserTokenAccounts {
            sbtc: pda::associated_token_address(user, &self.config.sbtc_mint)?,
            zbtc: pda::associated_token_address(user, &self.config.zbtc_mint)?,
        })
    }

    /// Balances of the user's sbtc and zbtc token accounts; an account that does not exist holds nothing.
    pub fn user_balances(&self, user: &Pubkey) -> Result<UserBalances, ClientError> {
        let accounts = self.user_token_accounts(user)?;
        Ok(UserBalances {
            sbtc: self.token_balance(&accounts.sbtc.address, &self.config.sbtc_mint)?,
            zbtc: self.token_balance(&accounts.zbtc.address, &self.config.zbtc_mint)?,
        })
    }

    fn token_balance(&self, address: &Pubkey, mint: &Pubkey) -> Result<u64, ClientError> {
        let data = match self.reader.read(address)? {
            Some(data) => data,
            None => return Ok(0),
        };
        let invalid = |error: ProgramError| ClientError::InvalidTokenAccount {
            address: *address,
            error,
        };
        let account = TokenAccount::unpack(&data).map_err(invalid)?;
        if account.mint != *mint {
            return Err(invalid(TokenError::MintMismatch.into()));
        }
        Ok(account.amount)
    }

    pub fn fetch_config(&self) -> Result<SwapConfig, ClientError> {
        let config_pda = self.swap_pda(&self.config.seeds.config)?;
        let record = fetch_record(&self.reader, &config_pda.address, &idl::config_schema())?
            .ok_or(ClientError::AccountNotFound(config_pda.address))?;
        let swap_config = SwapConfig::try_from(&record)?;

        //the stored bump has to reproduce the address the record was read from
        let reproduced = pda::create_program_address(
            &self.config.swap_program_id,
            &[self.config.seeds.config.as_bytes(), swap_config.squad_multisig.as_ref()],
            swap_config.bump,
        );
        if reproduced != Ok(config_pda.address) {
            return Err(ClientError::BumpMismatch {
                address: config_pda.address,
                bump: swap_config.bump,
            });
        }
        Ok(swap_config)
    }

    pub fn sbtc_price(&self, now: UnixTimestamp) -> Result<PriceQuote, ClientError> {
        let oracle_state = self.oracle_state()?.address;
        let record = fetch_record(&self.reader, &oracle_state, &self.config.oracle_schema)?
            .ok_or(ClientError::AccountNotFound(oracle_state))?;
        Ok(PriceQuote::from_record(
            &record,
            &self.config.oracle_price_field,
            now,
            PriceSource::Oracle,
        )?)
    }

    pub fn btc_price(&self, now: UnixTimestamp) -> Result<PriceQuote, ClientError> {
        let feed = self.config.pyth_price_feed;
        let data = self.reader.read(&feed)?.ok_or(ClientError::AccountNotFound(feed))?;
        Ok(PythPrice::unpack(&data)?.quote(now)?)
    }

    /// Price to show when the oracle may be unavailable: never fails, but tags substituted quotes.
    pub fn sbtc_price_or_fallback(&self, now: UnixTimestamp) -> PriceQuote {
        self.or_fallback("sbtc", self.sbtc_price(now), now)
    }

    pub fn btc_price_or_fallback(&self, now: UnixTimestamp) -> PriceQuote {
        self.or_fallback("btc", self.btc_price(now), now)
    }

    /// Both prices, with the sbtc price checked against btc within the default ratio.
    pub fn price_data(&self, now: UnixTimestamp) -> PriceData {
        let sbtc = self.sbtc_price_or_fallback(now);
        let btc = self.btc_price_or_fallback(now);
        let validation = sbtc.validate_against(&btc, default_max_ratio());
        if let Err(e) = &validation {
            msg!("sbtc price {} rejected against btc price {}: {}", sbtc, btc, e);
        }
        PriceData { sbtc, btc, validation }
    }

    fn or_fallback(&self, asset: &str, result: Result<PriceQuote, ClientError>, now: UnixTimestamp) -> PriceQuote {
        match result {
            Ok(quote) => quote,
            Err(ClientError::AccountNotFound(address)) => {
                msg!("{} price account {} not found, using simulated price", asset, address);
                PriceQuote::new(self.config.fallback_price_cents, now, PriceSource::Simulated)
            }
            Err(e) => {
                msg!(
                    "reading {} price failed: {} ({}), using fallback price",
                    asset,
                    e,
                    to_error_msg(&ProgramError::from(e.clone()))
                );
                PriceQuote::new(self.config.fallback_price_cents, now, PriceSource::Fallback)
            }
        }
    }
}
