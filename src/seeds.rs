use arrayvec::ArrayVec;
use solana_program::pubkey::Pubkey;

use crate::{
    error::DeriveError,
    pda::{self, DerivedAddress},
};

//limits imposed by the runtime
pub const MAX_SEEDS: usize = 16;
pub const MAX_SEED_LEN: usize = 32;

/// An ordered list of seeds for address derivation.
///
/// Bounds are enforced on construction, so a `Seeds` value can always be derived from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Seeds(ArrayVec<Vec<u8>, MAX_SEEDS>);

impl Seeds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_slices(seeds: &[&[u8]]) -> Result<Self, DeriveError> {
        check_seeds(seeds)?;
        Ok(Self(seeds.iter().map(|seed| seed.to_vec()).collect()))
    }

    pub fn with(mut self, seed: impl AsRef<[u8]>) -> Result<Self, DeriveError> {
        let seed = seed.as_ref();
        if seed.len() > MAX_SEED_LEN {
            return Err(DeriveError::SeedTooLong {
                index: self.0.len(),
                len: seed.len(),
            });
        }
        self.0
            .try_push(seed.to_vec())
            .map_err(|_| DeriveError::TooManySeeds { count: MAX_SEEDS + 1 })?;
        Ok(self)
    }

    pub fn with_key(self, key: &Pubkey) -> Result<Self, DeriveError> {
        self.with(key.as_ref())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slices(&self) -> ArrayVec<&[u8], MAX_SEEDS> {
        self.0.iter().map(Vec::as_slice).collect()
    }

    pub fn derive(&self, program_id: &Pubkey) -> Result<DerivedAddress, DeriveError> {
        pda::derive(program_id, &self.as_slices())
    }
}

pub(crate) fn check_seeds(seeds: &[&[u8]]) -> Result<(), DeriveError> {
    if seeds.len() > MAX_SEEDS {
        return Err(DeriveError::TooManySeeds { count: seeds.len() });
    }
    match seeds.iter().position(|seed| seed.len() > MAX_SEED_LEN) {
        Some(index) => Err(DeriveError::SeedTooLong {
            index,
            len: seeds[index].len(),
        }),
        None => Ok(()),
    }
}
