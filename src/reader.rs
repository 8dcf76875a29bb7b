use solana_program::pubkey::Pubkey;
use std::collections::HashMap;

use crate::{
    decode::{decode, DecodedRecord},
    error::{ClientError, ReadError},
    schema::AccountSchema,
};

/// Read-only access to account data on the ledger.
pub trait AccountReader {
    /// Returns `None` when no account exists at `address`.
    fn read(&self, address: &Pubkey) -> Result<Option<Vec<u8>>, ReadError>;
}

impl<R: AccountReader + ?Sized> AccountReader for &R {
    fn read(&self, address: &Pubkey) -> Result<Option<Vec<u8>>, ReadError> {
        (**self).read(address)
    }
}

#[derive(Clone, Debug, Default)]
pub struct MemoryLedger {
    accounts: HashMap<Pubkey, Vec<u8>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, address: Pubkey, data: Vec<u8>) -> Option<Vec<u8>> {
        self.accounts.insert(address, data)
    }

    pub fn remove(&mut self, address: &Pubkey) -> Option<Vec<u8>> {
        self.accounts.remove(address)
    }
}

impl AccountReader for MemoryLedger {
    fn read(&self, address: &Pubkey) -> Result<Option<Vec<u8>>, ReadError> {
        Ok(self.accounts.get(address).cloned())
    }
}

#[cfg(feature = "rpc")]
impl AccountReader for solana_client::rpc_client::RpcClient {
    fn read(&self, address: &Pubkey) -> Result<Option<Vec<u8>>, ReadError> {
        let response = self
            .get_account_with_commitment(address, self.commitment())
            .map_err(|e| ReadError::Rpc(e.to_string()))?;
        Ok(response.value.map(|account| account.data))
    }
}

/// Reads the account at `address` and decodes it with `schema`.
pub fn fetch_record<R: AccountReader + ?Sized>(
    reader: &R,
    address: &Pubkey,
    schema: &AccountSchema,
) -> Result<Option<DecodedRecord>, ClientError> {
    match reader.read(address)? {
        Some(data) => Ok(Some(decode(&data, schema)?)),
        None => Ok(None),
    }
}
