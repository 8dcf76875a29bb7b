mod helpers;

use helpers::*;
use otc_swap_core::{
    client::SwapClient,
    config::Config,
    error::{ClientError, DecodeError, PriceError, ReadError},
    price::{default_max_ratio, PriceQuote, PriceSource},
    reader::{AccountReader, MemoryLedger},
};
use solana_program::{program_error::ProgramError, pubkey::Pubkey};
use spl_token::error::TokenError;
use rust_decimal_macros::dec;

const NOW: i64 = 1_735_689_600;
const PYTH_FEED: &str = "HovQMDrbAgAYPCmHVSrezcSmkMtXSSUsLDFANExrZh2J";
const ORACLE_STATE: &str = "n6vZ3Uczer7nG5MLMed9CdYZajeFhzKHRCQyuAcuhuK";

struct Unreachable;

impl AccountReader for Unreachable {
    fn read(&self, _address: &Pubkey) -> Result<Option<Vec<u8>>, ReadError> {
        Err(ReadError::Rpc("connection refused".to_string()))
    }
}

fn devnet_client(ledger: MemoryLedger) -> SwapClient<MemoryLedger> {
    SwapClient::new(Config::devnet().unwrap(), ledger)
}

#[test]
fn devnet_addresses() {
    let client = devnet_client(MemoryLedger::new());
    let addresses = client.addresses().unwrap();

    assert_eq!(addresses.config.address, key("M8uCStPutLUYbpP1hbC4SQBLza29jZQECX4DbYwSPUj"));
    assert_eq!(addresses.config.bump, 253);
    assert_eq!(addresses.sbtc_mint_authority.address, key("5RJzxKweQkKxJd5hVYt1jKgddH69nQLhwJZbE2iRibLQ"));
    assert_eq!(addresses.treasury_authority.address, key("AZBRUWrYkVeyRXwQFMyDhDt92nPuiCQFy45pTNb8xzbj"));
    assert_eq!(addresses.fee_authority.address, key("GgHQN7jKvB2AVK3tm3RqSf1Ch7B1sr6WfjDue9KGzisx"));
    assert_eq!(addresses.treasury_vault.address, key("2LKn1eCAYANg1HYnFBc3AyzbA2j37q8MXKdeacDt44Fw"));
    assert_eq!(addresses.fee_vault.address, key("Ft7J3cLvyVCxYWh79C3cqVzR7hiZQutrcZB4YmGQqVQN"));
    assert_eq!(addresses.treasury_zbtc_vault.address, key("FkECS4C9g9xHDCSacUf1cpZ3MEvquxuD9yb9Ao4asES8"));
    assert_eq!(addresses.fee_zbtc_vault.address, key("DauXPgtQevwJxavMpzH5Zkx3sH7BDuwrZBP5BsYskqgV"));
    assert_eq!(addresses.oracle_state.address, key("n6vZ3Uczer7nG5MLMed9CdYZajeFhzKHRCQyuAcuhuK"));
}

#[test]
fn addresses_follow_the_configured_multisig() {
    let other = Pubkey::new_unique();
    let config = Config::from_vars(|name| match name {
        "SQUAD_MULTISIG" => Some(other.to_string()),
        _ => None,
    })
    .unwrap();
    let client = SwapClient::new(config, MemoryLedger::new());
    let addresses = client.addresses().unwrap();

    assert_ne!(addresses.config.address, key("M8uCStPutLUYbpP1hbC4SQBLza29jZQECX4DbYwSPUj"));
    //the oracle state is not seeded with the multisig
    assert_eq!(addresses.oracle_state.address, key("n6vZ3Uczer7nG5MLMed9CdYZajeFhzKHRCQyuAcuhuK"));
}

#[test]
fn user_token_accounts() {
    let client = devnet_client(MemoryLedger::new());
    let user = Pubkey::new_unique();
    let accounts = client.user_token_accounts(&user).unwrap();

    assert_eq!(
        accounts.sbtc.address,
        spl_associated_token_account::get_associated_token_address(&user, &client.config().sbtc_mint)
    );
    assert_eq!(
        accounts.zbtc.address,
        spl_associated_token_account::get_associated_token_address(&user, &client.config().zbtc_mint)
    );

    let squad = client.user_token_accounts(&client.config().squad_multisig).unwrap();
    assert_eq!(squad.zbtc.address, key("GzjKhqZ5EDKHtfKkEbqUM2gzKWFjNW8jdLLL6pzNC53Y"));
}

#[test]
fn fetch_config() {
    let client = devnet_client(MemoryLedger::new());
    let config_pda = client.addresses().unwrap().config;
    let stored = swap_config(client.config().squad_multisig, config_pda.bump);

    let mut ledger = MemoryLedger::new();
    ledger.insert(config_pda.address, config_account_data(&stored));
    let client = devnet_client(ledger);

    let fetched = client.fetch_config().unwrap();
    assert_eq!(fetched, stored);
    assert_eq!(fetched.fee_rate(), dec!(0.005));
    assert_eq!(fetched.min_collateral_ratio(), dec!(0.1));
}

#[test]
fn fetch_config_missing() {
    let client = devnet_client(MemoryLedger::new());
    let address = client.addresses().unwrap().config.address;
    assert_eq!(client.fetch_config(), Err(ClientError::AccountNotFound(address)));
}

#[test]
fn fetch_config_with_wrong_bump() {
    let address = key("M8uCStPutLUYbpP1hbC4SQBLza29jZQECX4DbYwSPUj");
    let squad = key("5eWBQxV7BZSVA4FqDfxQEZRFr67LZkCy9JNkoX2Q4Q5b");
    let mut ledger = MemoryLedger::new();
    ledger.insert(address, config_account_data(&swap_config(squad, 254)));

    assert_eq!(
        devnet_client(ledger).fetch_config(),
        Err(ClientError::BumpMismatch { address, bump: 254 })
    );
}

#[test]
fn fetch_config_for_another_multisig() {
    //a record naming a different multisig cannot reproduce the address it was read from
    let address = key("M8uCStPutLUYbpP1hbC4SQBLza29jZQECX4DbYwSPUj");
    let mut ledger = MemoryLedger::new();
    ledger.insert(address, config_account_data(&swap_config(Pubkey::new_unique(), 253)));

    assert!(matches!(
        devnet_client(ledger).fetch_config(),
        Err(ClientError::BumpMismatch { bump: 253, .. })
    ));
}

#[test]
fn fetch_config_of_wrong_type() {
    let address = key("M8uCStPutLUYbpP1hbC4SQBLza29jZQECX4DbYwSPUj");
    let mut ledger = MemoryLedger::new();
    let mut data = oracle_state_data(4_625_762, NOW);
    data.resize(300, 0);
    ledger.insert(address, data);

    assert!(matches!(
        devnet_client(ledger).fetch_config(),
        Err(ClientError::Decode(DecodeError::WrongAccountType { .. }))
    ));
}

#[test]
fn oracle_price() {
    let mut ledger = MemoryLedger::new();
    ledger.insert(
        key("n6vZ3Uczer7nG5MLMed9CdYZajeFhzKHRCQyuAcuhuK"),
        oracle_state_data(9_812_345, NOW - 30),
    );
    let client = devnet_client(ledger);

    let quote = client.sbtc_price(NOW).unwrap();
    assert_eq!(quote, PriceQuote::new(9_812_345, NOW, PriceSource::Oracle));
    assert_eq!(quote.dollars(), dec!(98123.45));
    assert_eq!(client.sbtc_price_or_fallback(NOW), quote);

    let reference = PriceQuote::new(10_000_000, NOW, PriceSource::Pyth);
    assert!(quote.validate_against(&reference, default_max_ratio()).is_ok());
}

#[test]
fn malformed_oracle_uses_fallback_price() {
    let mut ledger = MemoryLedger::new();
    ledger.insert(key("n6vZ3Uczer7nG5MLMed9CdYZajeFhzKHRCQyuAcuhuK"), vec![0; 4]);
    let client = devnet_client(ledger);

    assert!(matches!(
        client.sbtc_price(NOW),
        Err(ClientError::Decode(DecodeError::TruncatedAccount { expected: 24, actual: 4 }))
    ));
    assert_eq!(
        client.sbtc_price_or_fallback(NOW),
        PriceQuote::new(4_625_762, NOW, PriceSource::Fallback)
    );
}

#[test]
fn unreachable_ledger_uses_fallback_price() {
    let client = SwapClient::new(Config::devnet().unwrap(), Unreachable);
    assert!(matches!(client.fetch_config(), Err(ClientError::Read(ReadError::Rpc(_)))));

    let quote = client.sbtc_price_or_fallback(NOW);
    assert_eq!(quote.source(), PriceSource::Fallback);
    assert_eq!(quote.to_string(), "$46257.62 (Fallback)");
}

#[test]
fn btc_price_from_pyth_feed() {
    let mut ledger = MemoryLedger::new();
    ledger.insert(key(PYTH_FEED), pyth_price_data(6_512_345_678_901, -8));
    let client = devnet_client(ledger);

    let quote = client.btc_price(NOW).unwrap();
    assert_eq!(quote, PriceQuote::new(6_512_345, NOW, PriceSource::Pyth));
    assert_eq!(client.btc_price_or_fallback(NOW), quote);
}

#[test]
fn missing_pyth_feed_uses_simulated_price() {
    let client = devnet_client(MemoryLedger::new());
    assert_eq!(client.btc_price(NOW), Err(ClientError::AccountNotFound(key(PYTH_FEED))));
    assert_eq!(
        client.btc_price_or_fallback(NOW),
        PriceQuote::new(4_625_762, NOW, PriceSource::Simulated)
    );
}

#[test]
fn short_pyth_feed_uses_fallback_price() {
    let mut ledger = MemoryLedger::new();
    ledger.insert(key(PYTH_FEED), vec![0; 10]);
    let client = devnet_client(ledger);

    assert_eq!(
        client.btc_price(NOW),
        Err(ClientError::Decode(DecodeError::TruncatedAccount { expected: 32, actual: 10 }))
    );
    assert_eq!(client.btc_price_or_fallback(NOW).source(), PriceSource::Fallback);
}

#[test]
fn price_data_within_range() {
    let mut ledger = MemoryLedger::new();
    ledger.insert(key(ORACLE_STATE), oracle_state_data(6_500_000, NOW));
    ledger.insert(key(PYTH_FEED), pyth_price_data(6_500_000_000_000, -8));
    let data = devnet_client(ledger).price_data(NOW);

    assert_eq!(data.sbtc.source(), PriceSource::Oracle);
    assert_eq!(data.btc.source(), PriceSource::Pyth);
    assert_eq!(data.validation, Ok(dec!(1)));
}

#[test]
fn price_data_out_of_range() {
    let mut ledger = MemoryLedger::new();
    ledger.insert(key(ORACLE_STATE), oracle_state_data(100, NOW));
    ledger.insert(key(PYTH_FEED), pyth_price_data(6_500_000_000_000, -8));
    let data = devnet_client(ledger).price_data(NOW);

    assert!(matches!(data.validation, Err(PriceError::PriceOutOfRange { .. })));
}

#[test]
fn price_data_with_nothing_on_ledger() {
    let data = devnet_client(MemoryLedger::new()).price_data(NOW);
    assert_eq!(data.sbtc.source(), PriceSource::Simulated);
    assert_eq!(data.btc.source(), PriceSource::Simulated);
    assert_eq!(data.validation, Ok(dec!(1)));
}

#[test]
fn user_balances() {
    let user = Pubkey::new_unique();
    let client = devnet_client(MemoryLedger::new());
    assert_eq!(client.user_balances(&user).unwrap(), Default::default());

    let accounts = client.user_token_accounts(&user).unwrap();
    let sbtc_mint = client.config().sbtc_mint;
    let zbtc_mint = client.config().zbtc_mint;

    let mut ledger = MemoryLedger::new();
    ledger.insert(accounts.sbtc.address, token_account_data(sbtc_mint, user, 250_000_000));
    let client = devnet_client(ledger.clone());
    let balances = client.user_balances(&user).unwrap();
    assert_eq!((balances.sbtc, balances.zbtc), (250_000_000, 0));

    ledger.insert(accounts.zbtc.address, token_account_data(zbtc_mint, user, 7));
    let balances = devnet_client(ledger).user_balances(&user).unwrap();
    assert_eq!((balances.sbtc, balances.zbtc), (250_000_000, 7));
}

#[test]
fn user_balances_reject_foreign_token_accounts() {
    let user = Pubkey::new_unique();
    let accounts = devnet_client(MemoryLedger::new()).user_token_accounts(&user).unwrap();

    let mut ledger = MemoryLedger::new();
    ledger.insert(accounts.zbtc.address, token_account_data(Pubkey::new_unique(), user, 7));
    assert_eq!(
        devnet_client(ledger).user_balances(&user),
        Err(ClientError::InvalidTokenAccount {
            address: accounts.zbtc.address,
            error: TokenError::MintMismatch.into(),
        })
    );

    let mut ledger = MemoryLedger::new();
    ledger.insert(accounts.sbtc.address, vec![1; 40]);
    assert_eq!(
        devnet_client(ledger).user_balances(&user),
        Err(ClientError::InvalidTokenAccount {
            address: accounts.sbtc.address,
            error: ProgramError::InvalidAccountData,
        })
    );
}
