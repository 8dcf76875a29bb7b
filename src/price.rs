use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use solana_program::clock::UnixTimestamp;
use std::{
    convert::TryFrom,
    fmt::{self, Display, Formatter},
};

use crate::{
    decode::{DecodedRecord, Value},
    error::{DecodeError, PriceError},
};

//prices are handled in cents
pub const PRICE_DECIMALS: u32 = 2;

//aggregate price and exponent of a pyth price account
const PYTH_PRICE_OFFSET: usize = 16;
const PYTH_EXPO_OFFSET: usize = 24;
pub const PYTH_MIN_LEN: usize = 32;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PriceSource {
    Oracle,
    Pyth,
    Simulated,
    Fallback,
}

impl Display for PriceSource {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(match self {
            PriceSource::Oracle => "Solana DevNet Oracle",
            PriceSource::Pyth => "Pyth Network",
            PriceSource::Simulated => "Simulated",
            PriceSource::Fallback => "Fallback",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PriceQuote {
    cents: u64,
    timestamp: UnixTimestamp,
    source: PriceSource,
}

impl PriceQuote {
    pub fn new(cents: u64, timestamp: UnixTimestamp, source: PriceSource) -> Self {
        Self { cents, timestamp, source }
    }

    /// Reads a price already scaled to cents from a decoded record.
    ///
    /// Unsigned fields of any width are accepted, signed ones only when non negative.
    pub fn from_record(
        record: &DecodedRecord,
        field: &str,
        timestamp: UnixTimestamp,
        source: PriceSource,
    ) -> Result<Self, PriceError> {
        let value = record.get(field).ok_or(PriceError::InvalidPrice)?;
        let cents = match *value {
            Value::U8(v) => v as u64,
            Value::U16(v) => v as u64,
            Value::U32(v) => v as u64,
            Value::U64(v) => v,
            Value::U128(v) => u64::try_from(v).map_err(|_| PriceError::Overflow)?,
            Value::I8(v) => u64::try_from(v).map_err(|_| PriceError::InvalidPrice)?,
            Value::I16(v) => u64::try_from(v).map_err(|_| PriceError::InvalidPrice)?,
            Value::I32(v) => u64::try_from(v).map_err(|_| PriceError::InvalidPrice)?,
            Value::I64(v) => u64::try_from(v).map_err(|_| PriceError::InvalidPrice)?,
            Value::I128(v) if v < 0 => return Err(PriceError::InvalidPrice),
            Value::I128(v) => u64::try_from(v).map_err(|_| PriceError::Overflow)?,
            Value::Bool(_) | Value::Pubkey(_) => return Err(PriceError::InvalidPrice),
        };
        Ok(Self::new(cents, timestamp, source))
    }

    /// Converts `price * 10^expo` into cents, truncating digits below a cent.
    pub fn from_exponent(
        price: i64,
        expo: i32,
        timestamp: UnixTimestamp,
        source: PriceSource,
    ) -> Result<Self, PriceError> {
        if price < 0 {
            return Err(PriceError::InvalidPrice);
        }
        let scale = expo
            .checked_add(PRICE_DECIMALS as i32)
            .ok_or(PriceError::Overflow)?;
        let cents = if scale >= 0 {
            let mul = 10i128
                .checked_pow(scale as u32)
                .ok_or(PriceError::Overflow)?;
            (price as i128).checked_mul(mul).ok_or(PriceError::Overflow)?
        } else {
            //anything past 10^38 rounds to zero anyway
            match 10i128.checked_pow(scale.unsigned_abs()) {
                Some(div) => price as i128 / div,
                None => 0,
            }
        };
        let cents = u64::try_from(cents).map_err(|_| PriceError::Overflow)?;
        Ok(Self::new(cents, timestamp, source))
    }

    pub fn cents(&self) -> u64 {
        self.cents
    }

    pub fn timestamp(&self) -> UnixTimestamp {
        self.timestamp
    }

    pub fn source(&self) -> PriceSource {
        self.source
    }

    pub fn dollars(&self) -> Decimal {
        Decimal::from_i128_with_scale(self.cents as i128, PRICE_DECIMALS)
    }

    pub fn ratio_to(&self, reference: &PriceQuote) -> Result<Decimal, PriceError> {
        if self.cents == 0 || reference.cents == 0 {
            return Err(PriceError::InvalidPrice);
        }
        self.dollars()
            .checked_div(reference.dollars())
            .ok_or(PriceError::Overflow)
    }

    /// Checks that this price is within a factor of `max_ratio` of `reference` in either direction.
    pub fn validate_against(&self, reference: &PriceQuote, max_ratio: Decimal) -> Result<Decimal, PriceError> {
        let ratio = self.ratio_to(reference)?;
        let scaled = ratio.checked_mul(max_ratio).ok_or(PriceError::Overflow)?;
        if ratio > max_ratio || scaled < Decimal::ONE {
            return Err(PriceError::PriceOutOfRange { ratio });
        }
        Ok(ratio)
    }
}

/// Price and exponent as published in a pyth price feed account.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PythPrice {
    pub price: u64,
    pub expo: i32,
}

impl PythPrice {
    pub fn unpack(data: &[u8]) -> Result<Self, DecodeError> {
        if data.len() < PYTH_MIN_LEN {
            return Err(DecodeError::TruncatedAccount {
                expected: PYTH_MIN_LEN,
                actual: data.len(),
            });
        }
        let mut price = [0u8; 8];
        price.copy_from_slice(&data[PYTH_PRICE_OFFSET..PYTH_PRICE_OFFSET + 8]);
        let mut expo = [0u8; 4];
        expo.copy_from_slice(&data[PYTH_EXPO_OFFSET..PYTH_EXPO_OFFSET + 4]);
        Ok(Self {
            price: u64::from_le_bytes(price),
            expo: i32::from_le_bytes(expo),
        })
    }

    pub fn quote(&self, timestamp: UnixTimestamp) -> Result<PriceQuote, PriceError> {
        let price = i64::try_from(self.price).map_err(|_| PriceError::Overflow)?;
        PriceQuote::from_exponent(price, self.expo, timestamp, PriceSource::Pyth)
    }
}

pub fn default_max_ratio() -> Decimal {
    dec!(10)
}

impl Display for PriceQuote {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "${} ({})", self.dollars(), self.source)
    }
}
