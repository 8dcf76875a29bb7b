use arbitrary::Arbitrary;
use honggfuzz::fuzz;
use otc_swap_core::{
    decode::decode,
    error::DecodeError,
    idl,
    schema::{AccountSchema, Discriminator, Field, FieldType},
    state::SwapConfig,
};

#[derive(Debug, Arbitrary)]
struct FuzzAccount {
    discriminator: [u8; 8],
    fields: Vec<FieldType>,
    use_schema_discriminator: bool,
    data: Vec<u8>,
}

fn check(account: &FuzzAccount) {
    let fields = account
        .fields
        .iter()
        .enumerate()
        .map(|(i, ty)| Field::new(format!("f{}", i), *ty))
        .collect();
    let schema = AccountSchema::new("Fuzz", Discriminator(account.discriminator), fields);

    let mut data = account.data.clone();
    if account.use_schema_discriminator && data.len() >= 8 {
        data[..8].copy_from_slice(&account.discriminator);
    }

    match decode(&data, &schema) {
        Ok(record) => {
            assert!(data.len() >= schema.account_len());
            assert_eq!(record.values().len(), schema.fields().len());
        }
        Err(DecodeError::TruncatedAccount { expected, actual }) => {
            assert_eq!(expected, schema.account_len());
            assert!(actual < expected);
        }
        Err(DecodeError::WrongAccountType { found, .. }) => assert_ne!(found, schema.discriminator()),
        Err(DecodeError::InvalidBooleanEncoding { byte, .. }) => assert!(byte > 1),
        Err(e) => panic!("unexpected error {:?}", e),
    }

    //the config layout must never panic on arbitrary input either
    let _ = SwapConfig::unpack(&account.data);
    let _ = decode(&account.data, &idl::mint_event_schema());
}

fn main() {
    loop {
        fuzz!(|account: FuzzAccount| {
            check(&account);
        });
    }
}
