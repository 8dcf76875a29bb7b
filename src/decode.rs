use solana_program::pubkey::Pubkey;

use crate::{
    error::DecodeError,
    schema::{AccountSchema, Discriminator, FieldType, DISCRIMINATOR_LEN},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Value {
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    I128(i128),
    Bool(bool),
    Pubkey(Pubkey),
}

impl Value {
    pub fn field_type(&self) -> FieldType {
        match self {
            Value::U8(_) => FieldType::U8,
            Value::U16(_) => FieldType::U16,
            Value::U32(_) => FieldType::U32,
            Value::U64(_) => FieldType::U64,
            Value::U128(_) => FieldType::U128,
            Value::I8(_) => FieldType::I8,
            Value::I16(_) => FieldType::I16,
            Value::I32(_) => FieldType::I32,
            Value::I64(_) => FieldType::I64,
            Value::I128(_) => FieldType::I128,
            Value::Bool(_) => FieldType::Bool,
            Value::Pubkey(_) => FieldType::Pubkey,
        }
    }
}

/// Field values of one account, in layout order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedRecord {
    schema: String,
    discriminator: Discriminator,
    values: Vec<(String, Value)>,
}

macro_rules! typed_getter {
    ($name:ident, $variant:ident, $t:ty) => {
        pub fn $name(&self, field: &str) -> Result<$t, DecodeError> {
            match self.get_required(field)? {
                Value::$variant(value) => Ok(*value),
                _ => Err(DecodeError::FieldTypeMismatch {
                    field: field.to_string(),
                    expected: FieldType::$variant.name(),
                }),
            }
        }
    };
}

impl DecodedRecord {
    pub fn schema(&self) -> &str {
        &self.schema
    }

    pub fn discriminator(&self) -> Discriminator {
        self.discriminator
    }

    pub fn values(&self) -> &[(String, Value)] {
        &self.values
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    fn get_required(&self, field: &str) -> Result<&Value, DecodeError> {
        self.get(field).ok_or_else(|| DecodeError::MissingField {
            record: self.schema.clone(),
            field: field.to_string(),
        })
    }

    typed_getter!(u8, U8, u8);
    typed_getter!(u16, U16, u16);
    typed_getter!(u32, U32, u32);
    typed_getter!(u64, U64, u64);
    typed_getter!(u128, U128, u128);
    typed_getter!(i8, I8, i8);
    typed_getter!(i16, I16, i16);
    typed_getter!(i32, I32, i32);
    typed_getter!(i64, I64, i64);
    typed_getter!(i128, I128, i128);
    typed_getter!(bool, Bool, bool);
    typed_getter!(pubkey, Pubkey, Pubkey);
}

/// Decodes account data against `schema`.
///
/// The data has to be at least as long as the layout and start with the schema's discriminator.
/// Nothing is returned unless every field decodes.
pub fn decode(buffer: &[u8], schema: &AccountSchema) -> Result<DecodedRecord, DecodeError> {
    let expected = schema.account_len();
    if buffer.len() < expected {
        return Err(DecodeError::TruncatedAccount {
            expected,
            actual: buffer.len(),
        });
    }

    let (prefix, mut body) = buffer.split_at(DISCRIMINATOR_LEN);
    let found = Discriminator(le_bytes(prefix));
    if found != schema.discriminator() {
        return Err(DecodeError::WrongAccountType {
            expected: schema.discriminator(),
            found,
        });
    }

    let mut values = Vec::with_capacity(schema.fields().len());
    for field in schema.fields() {
        let (raw, rest) = body.split_at(field.ty.width());
        body = rest;
        let value = read_value(field.ty, raw).ok_or_else(|| DecodeError::InvalidBooleanEncoding {
            field: field.name.clone(),
            byte: raw[0],
        })?;
        values.push((field.name.clone(), value));
    }

    Ok(DecodedRecord {
        schema: schema.name().to_string(),
        discriminator: found,
        values,
    })
}

//only a non canonical boolean byte makes this return None
fn read_value(ty: FieldType, raw: &[u8]) -> Option<Value> {
    Some(match ty {
        FieldType::U8 => Value::U8(raw[0]),
        FieldType::U16 => Value::U16(u16::from_le_bytes(le_bytes(raw))),
        FieldType::U32 => Value::U32(u32::from_le_bytes(le_bytes(raw))),
        FieldType::U64 => Value::U64(u64::from_le_bytes(le_bytes(raw))),
        FieldType::U128 => Value::U128(u128::from_le_bytes(le_bytes(raw))),
        FieldType::I8 => Value::I8(i8::from_le_bytes(le_bytes(raw))),
        FieldType::I16 => Value::I16(i16::from_le_bytes(le_bytes(raw))),
        FieldType::I32 => Value::I32(i32::from_le_bytes(le_bytes(raw))),
        FieldType::I64 => Value::I64(i64::from_le_bytes(le_bytes(raw))),
        FieldType::I128 => Value::I128(i128::from_le_bytes(le_bytes(raw))),
        FieldType::Bool => match raw[0] {
            0 => Value::Bool(false),
            1 => Value::Bool(true),
            _ => return None,
        },
        FieldType::Pubkey => Value::Pubkey(Pubkey::new_from_array(le_bytes(raw))),
    })
}

//raw always has the width of the field type it was split off for
fn le_bytes<const N: usize>(raw: &[u8]) -> [u8; N] {
    let mut bytes = [0u8; N];
    bytes.copy_from_slice(raw);
    bytes
}
