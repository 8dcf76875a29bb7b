use thiserror::Error;
use solana_program::{program_error::ProgramError, pubkey::Pubkey};
use spl_token::error::TokenError;
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

use crate::schema::Discriminator;

//OFFSET is used to deal with technical debt imposed on us by SPL::ProgramError
// ProgramError uses the Custom variant to store other errors (such as spl token TokenError but also ours)
// so to distinguish TokenErrors from our errors, we're offsetting ours by 100 while TokenErrors start at 0
const OFFSET: isize = 100;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
pub enum ErrorCode {
	#[error("Seed exceeds the maximum seed length")]
	SeedTooLong = OFFSET,
	#[error("Too many seeds")]
	TooManySeeds,
	#[error("No bump yields an off-curve address")]
	DerivationExhausted,
	#[error("Derived address lies on the curve")]
	OnCurve,
	#[error("Account data is shorter than its layout")]
	TruncatedAccount,
	#[error("Account discriminator does not match")]
	WrongAccountType,
	#[error("Boolean field is neither 0 nor 1")]
	InvalidBooleanEncoding,
	#[error("Record has no such field")]
	MissingField,
	#[error("Record field has a different type")]
	FieldTypeMismatch,
	#[error("Invalid base58 address")]
	InvalidAddress,
	#[error("Unknown field type")]
	UnknownFieldType,
	#[error("Account not found")]
	AccountNotFound,
	#[error("Account reader failed")]
	ReaderFailure,
	#[error("Invalid price value")]
	InvalidPrice,
	#[error("Price outside of the accepted range")]
	PriceOutOfRange,
	#[error("Stored bump does not reproduce the account address")]
	BumpMismatch,
	#[error("Schema declares a field twice")]
	DuplicateField,
	#[error("Invalid token account")]
	InvalidTokenAccount,
}

//errors returned by the deployed swap program itself, numbered like anchor numbers them
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
pub enum SwapProgramError {
	#[error("Fee rate must be 5% or less")]
	InvalidFeeRate = 6000,
	#[error("Collateral ratio must be at least 10%")]
	InvalidCollateralRatio,
	#[error("sBTC mint must have Squad as initial authority")]
	InvalidMintAuthority,
	#[error("sBTC mint must have Squad or no freeze authority")]
	InvalidFreezeAuthority,
	#[error("Invalid amount")]
	InvalidAmount,
	#[error("Invalid zBTC mint")]
	InvalidZbtcMint,
	#[error("Invalid sBTC mint")]
	InvalidSbtcMint,
	#[error("Invalid token account owner")]
	InvalidTokenAccountOwner,
	#[error("Invalid token mint")]
	InvalidTokenMint,
	#[error("Insufficient balance")]
	InsufficientBalance,
	#[error("Protocol paused")]
	Paused,
	#[error("Insufficient liquidity")]
	InsufficientLiquidity,
	#[error("Insufficient collateral")]
	InsufficientCollateral,
	#[error("Invalid squad multisig")]
	InvalidSquadMultisig,
	#[error("Invalid treasury vault")]
	InvalidTreasuryVault,
	#[error("Invalid fee vault")]
	InvalidFeeVault,
	#[error("Invalid token owner")]
	InvalidTokenOwner,
	#[error("Pyth oracle error")]
	PythError,
	#[error("Invalid Pyth account")]
	InvalidPythAccount,
	#[error("Invalid oracle account")]
	InvalidOracleAccount,
	#[error("Invalid oracle data")]
	InvalidOracleData,
	#[error("Stale price data")]
	StaleOraclePrice,
	#[error("Invalid price value")]
	InvalidPrice,
	#[error("High confidence interval - unreliable data")]
	HighConfidence,
}

const SWAP_PROGRAM_OFFSET: u32 = SwapProgramError::InvalidFeeRate as u32;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeriveError {
	#[error("Seed {index} is {len} bytes long, at most {max} are allowed", max = crate::seeds::MAX_SEED_LEN)]
	SeedTooLong { index: usize, len: usize },
	#[error("{count} seeds given, at most {max} are allowed", max = crate::seeds::MAX_SEEDS)]
	TooManySeeds { count: usize },
	#[error("No bump in 0..=255 yields an off-curve address")]
	DerivationExhausted,
	#[error("Bump {bump} yields an address on the curve")]
	OnCurve { bump: u8 },
}

impl DeriveError {
	pub fn code(&self) -> ErrorCode {
		match self {
			DeriveError::SeedTooLong { .. } => ErrorCode::SeedTooLong,
			DeriveError::TooManySeeds { .. } => ErrorCode::TooManySeeds,
			DeriveError::DerivationExhausted => ErrorCode::DerivationExhausted,
			DeriveError::OnCurve { .. } => ErrorCode::OnCurve,
		}
	}
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
	#[error("Account data has {actual} bytes but {expected} are required")]
	TruncatedAccount { expected: usize, actual: usize },
	#[error("Expected account discriminator {expected} but found {found}")]
	WrongAccountType { expected: Discriminator, found: Discriminator },
	#[error("Field {field} holds {byte:#04x} which is not a valid boolean")]
	InvalidBooleanEncoding { field: String, byte: u8 },
	#[error("Record {record} has no field {field}")]
	MissingField { record: String, field: String },
	#[error("Field {field} is not of type {expected}")]
	FieldTypeMismatch { field: String, expected: &'static str },
}

impl DecodeError {
	pub fn code(&self) -> ErrorCode {
		match self {
			DecodeError::TruncatedAccount { .. } => ErrorCode::TruncatedAccount,
			DecodeError::WrongAccountType { .. } => ErrorCode::WrongAccountType,
			DecodeError::InvalidBooleanEncoding { .. } => ErrorCode::InvalidBooleanEncoding,
			DecodeError::MissingField { .. } => ErrorCode::MissingField,
			DecodeError::FieldTypeMismatch { .. } => ErrorCode::FieldTypeMismatch,
		}
	}
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
	#[error("{name} is not a valid base58 address: {value}")]
	InvalidAddress { name: String, value: String },
	#[error("Unknown field type {0}")]
	UnknownFieldType(String),
	#[error("Field {field} is declared more than once in {schema}")]
	DuplicateField { schema: String, field: String },
}

impl ConfigError {
	pub fn code(&self) -> ErrorCode {
		match self {
			ConfigError::InvalidAddress { .. } => ErrorCode::InvalidAddress,
			ConfigError::UnknownFieldType(_) => ErrorCode::UnknownFieldType,
			ConfigError::DuplicateField { .. } => ErrorCode::DuplicateField,
		}
	}
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReadError {
	#[error("Rpc request failed: {0}")]
	Rpc(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
	#[error("Invalid price value")]
	InvalidPrice,
	#[error("Price scaling overflowed")]
	Overflow,
	#[error("Price ratio {ratio} is outside of the accepted range")]
	PriceOutOfRange { ratio: rust_decimal::Decimal },
}

impl PriceError {
	pub fn code(&self) -> ErrorCode {
		match self {
			PriceError::InvalidPrice | PriceError::Overflow => ErrorCode::InvalidPrice,
			PriceError::PriceOutOfRange { .. } => ErrorCode::PriceOutOfRange,
		}
	}
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
	#[error(transparent)]
	Derive(#[from] DeriveError),
	#[error(transparent)]
	Decode(#[from] DecodeError),
	#[error(transparent)]
	Read(#[from] ReadError),
	#[error(transparent)]
	Price(#[from] PriceError),
	#[error("Account {0} not found")]
	AccountNotFound(Pubkey),
	#[error("Bump {bump} does not reproduce account {address}")]
	BumpMismatch { address: Pubkey, bump: u8 },
	#[error("Token account {address} is invalid: {error}")]
	InvalidTokenAccount { address: Pubkey, error: ProgramError },
}

impl ClientError {
	pub fn code(&self) -> ErrorCode {
		match self {
			ClientError::Derive(e) => e.code(),
			ClientError::Decode(e) => e.code(),
			ClientError::Read(_) => ErrorCode::ReaderFailure,
			ClientError::Price(e) => e.code(),
			ClientError::AccountNotFound(_) => ErrorCode::AccountNotFound,
			ClientError::BumpMismatch { .. } => ErrorCode::BumpMismatch,
			ClientError::InvalidTokenAccount { .. } => ErrorCode::InvalidTokenAccount,
		}
	}
}

macro_rules! into_program_error {
	($($error:ty),*) => {
		$(
			impl From<$error> for ProgramError {
				fn from(e: $error) -> Self {
					ProgramError::Custom(e.code() as u32)
				}
			}
		)*
	};
}

into_program_error!(DeriveError, DecodeError, ConfigError, PriceError, ClientError);

impl From<ErrorCode> for ProgramError {
	fn from(e: ErrorCode) -> Self {
		ProgramError::Custom(e as u32)
	}
}

impl From<SwapProgramError> for ProgramError {
	fn from(e: SwapProgramError) -> Self {
		ProgramError::Custom(e as u32)
	}
}

pub fn to_error_msg(error: &ProgramError) -> String {
	match error {
		ProgramError::Custom(ec) if *ec < OFFSET as u32 => TokenError::from_u32(*ec)
			.map(|e| e.to_string())
			.unwrap_or_else(|| error.to_string()),
		ProgramError::Custom(ec) if *ec >= SWAP_PROGRAM_OFFSET => SwapProgramError::from_u32(*ec)
			.map(|e| e.to_string())
			.unwrap_or_else(|| error.to_string()),
		ProgramError::Custom(ec) => ErrorCode::from_u32(*ec)
			.map(|e| e.to_string())
			.unwrap_or_else(|| error.to_string()),
		e => e.to_string(),
	}
}
