use arrayvec::ArrayVec;
use curve25519_dalek::edwards::CompressedEdwardsY;
use solana_program::{hash::hashv, pubkey::Pubkey};

use crate::{error::DeriveError, seeds::{check_seeds, MAX_SEEDS}};

pub const PDA_MARKER: &[u8] = b"ProgramDerivedAddress";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DerivedAddress {
    pub address: Pubkey,
    pub bump: u8,
}

/// Decides whether 32 bytes are the compressed encoding of a curve point.
pub trait CurveCheck {
    fn is_on_curve(&self, bytes: &[u8; 32]) -> bool;
}

/// The curve ordinary keypair addresses live on.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ed25519;

impl CurveCheck for Ed25519 {
    fn is_on_curve(&self, bytes: &[u8; 32]) -> bool {
        CompressedEdwardsY(*bytes).decompress().is_some()
    }
}

/// Finds the off-curve address for `seeds` under `program_id`, trying bumps from 255 down to 0.
pub fn derive(program_id: &Pubkey, seeds: &[&[u8]]) -> Result<DerivedAddress, DeriveError> {
    derive_with(&Ed25519, program_id, seeds)
}

pub fn derive_with<C: CurveCheck + ?Sized>(
    curve: &C,
    program_id: &Pubkey,
    seeds: &[&[u8]],
) -> Result<DerivedAddress, DeriveError> {
    check_seeds(seeds)?;
    (0..=u8::MAX)
        .rev()
        .find_map(|bump| {
            off_curve_address(curve, program_id, seeds, bump).map(|address| DerivedAddress { address, bump })
        })
        .ok_or(DeriveError::DerivationExhausted)
}

/// Derives the address for a known bump, e.g. one stored alongside the account.
pub fn create_program_address(program_id: &Pubkey, seeds: &[&[u8]], bump: u8) -> Result<Pubkey, DeriveError> {
    check_seeds(seeds)?;
    off_curve_address(&Ed25519, program_id, seeds, bump).ok_or(DeriveError::OnCurve { bump })
}

pub fn associated_token_address(wallet: &Pubkey, mint: &Pubkey) -> Result<DerivedAddress, DeriveError> {
    derive(
        &spl_associated_token_account::id(),
        &[wallet.as_ref(), spl_token::id().as_ref(), mint.as_ref()],
    )
}

fn off_curve_address<C: CurveCheck + ?Sized>(
    curve: &C,
    program_id: &Pubkey,
    seeds: &[&[u8]],
    bump: u8,
) -> Option<Pubkey> {
    let bump = [bump];
    //seeds are checked by the callers so the capacity always suffices
    let mut input = ArrayVec::<&[u8], { MAX_SEEDS + 3 }>::new();
    input.extend(seeds.iter().copied());
    input.push(&bump);
    input.push(program_id.as_ref());
    input.push(PDA_MARKER);

    let hash = hashv(&input).to_bytes();
    if curve.is_on_curve(&hash) {
        None
    } else {
        Some(Pubkey::new_from_array(hash))
    }
}
