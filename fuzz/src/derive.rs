use arbitrary::Arbitrary;
use honggfuzz::fuzz;
use otc_swap_core::{
    error::DeriveError,
    pda,
    seeds::{MAX_SEEDS, MAX_SEED_LEN},
};
use solana_program::pubkey::Pubkey;

#[derive(Debug, Arbitrary)]
struct FuzzDerivation {
    program_id: [u8; 32],
    seeds: Vec<Vec<u8>>,
}

fn check(derivation: &FuzzDerivation) {
    let program_id = Pubkey::new_from_array(derivation.program_id);
    let seeds: Vec<&[u8]> = derivation.seeds.iter().map(Vec::as_slice).collect();

    match pda::derive(&program_id, &seeds) {
        Ok(derived) => {
            assert_eq!(
                pda::create_program_address(&program_id, &seeds, derived.bump),
                Ok(derived.address)
            );
            //the runtime counts the bump as a seed
            if seeds.len() < MAX_SEEDS {
                assert_eq!(
                    Pubkey::find_program_address(&seeds, &program_id),
                    (derived.address, derived.bump)
                );
            }
        }
        Err(DeriveError::TooManySeeds { count }) => assert!(count > MAX_SEEDS),
        Err(DeriveError::SeedTooLong { index, len }) => {
            assert!(len > MAX_SEED_LEN);
            assert_eq!(seeds[index].len(), len);
        }
        Err(e) => panic!("unexpected error {:?}", e),
    }
}

fn main() {
    loop {
        fuzz!(|derivation: FuzzDerivation| {
            check(&derivation);
        });
    }
}
