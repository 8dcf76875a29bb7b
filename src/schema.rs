use solana_program::{hash::hashv, pubkey::PUBKEY_BYTES};
use std::{
    convert::TryFrom,
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use crate::error::ConfigError;

pub const DISCRIMINATOR_LEN: usize = 8;

/// Fingerprint stored in the first bytes of an account, identifying its record type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Discriminator(pub [u8; DISCRIMINATOR_LEN]);

impl Discriminator {
    pub fn for_account(name: &str) -> Self {
        Self::namespaced("account", name)
    }

    pub fn for_event(name: &str) -> Self {
        Self::namespaced("event", name)
    }

    fn namespaced(namespace: &str, name: &str) -> Self {
        let hash = hashv(&[namespace.as_bytes(), b":", name.as_bytes()]).to_bytes();
        let mut discriminator = [0u8; DISCRIMINATOR_LEN];
        discriminator.copy_from_slice(&hash[..DISCRIMINATOR_LEN]);
        Self(discriminator)
    }
}

impl AsRef<[u8]> for Discriminator {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<&[u8]> for Discriminator {
    type Error = std::array::TryFromSliceError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Ok(Self(<[u8; DISCRIMINATOR_LEN]>::try_from(bytes)?))
    }
}

impl Display for Discriminator {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldType {
    U8,
    U16,
    U32,
    U64,
    U128,
    I8,
    I16,
    I32,
    I64,
    I128,
    Bool,
    Pubkey,
}

impl FieldType {
    pub const fn width(self) -> usize {
        match self {
            FieldType::U8 | FieldType::I8 | FieldType::Bool => 1,
            FieldType::U16 | FieldType::I16 => 2,
            FieldType::U32 | FieldType::I32 => 4,
            FieldType::U64 | FieldType::I64 => 8,
            FieldType::U128 | FieldType::I128 => 16,
            FieldType::Pubkey => PUBKEY_BYTES,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            FieldType::U8 => "u8",
            FieldType::U16 => "u16",
            FieldType::U32 => "u32",
            FieldType::U64 => "u64",
            FieldType::U128 => "u128",
            FieldType::I8 => "i8",
            FieldType::I16 => "i16",
            FieldType::I32 => "i32",
            FieldType::I64 => "i64",
            FieldType::I128 => "i128",
            FieldType::Bool => "bool",
            FieldType::Pubkey => "pubkey",
        }
    }
}

//accepts the type names used by anchor idls
impl FromStr for FieldType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "u8" => FieldType::U8,
            "u16" => FieldType::U16,
            "u32" => FieldType::U32,
            "u64" => FieldType::U64,
            "u128" => FieldType::U128,
            "i8" => FieldType::I8,
            "i16" => FieldType::I16,
            "i32" => FieldType::I32,
            "i64" => FieldType::I64,
            "i128" => FieldType::I128,
            "bool" => FieldType::Bool,
            "pubkey" | "publicKey" => FieldType::Pubkey,
            other => return Err(ConfigError::UnknownFieldType(other.to_string())),
        })
    }
}

impl Display for FieldType {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub ty: FieldType,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: FieldType) -> Self {
        Self { name: name.into(), ty }
    }
}

/// Layout of a record: a discriminator followed by fixed width fields without padding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountSchema {
    name: String,
    discriminator: Discriminator,
    fields: Vec<Field>,
}

impl AccountSchema {
    /// Field names are not checked here; lookups by name return the first field of that name.
    pub fn new(name: impl Into<String>, discriminator: Discriminator, fields: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            discriminator,
            fields,
        }
    }

    /// Builds a schema from `(field name, idl type name)` pairs.
    pub fn from_idl(
        name: impl Into<String>,
        discriminator: Discriminator,
        fields: &[(&str, &str)],
    ) -> Result<Self, ConfigError> {
        let name = name.into();
        let mut parsed: Vec<Field> = Vec::with_capacity(fields.len());
        for (field, ty) in fields {
            if parsed.iter().any(|f| f.name == *field) {
                return Err(ConfigError::DuplicateField {
                    schema: name,
                    field: field.to_string(),
                });
            }
            parsed.push(Field::new(*field, ty.parse()?));
        }
        Ok(Self::new(name, discriminator, parsed))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn discriminator(&self) -> Discriminator {
        self.discriminator
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Size of the fields, excluding the discriminator.
    pub fn fixed_size(&self) -> usize {
        self.fields.iter().map(|field| field.ty.width()).sum()
    }

    pub fn account_len(&self) -> usize {
        DISCRIMINATOR_LEN + self.fixed_size()
    }

    /// Offset of a field relative to the start of the account data.
    pub fn offset_of(&self, name: &str) -> Option<usize> {
        let mut offset = DISCRIMINATOR_LEN;
        for field in &self.fields {
            if field.name == name {
                return Some(offset);
            }
            offset += field.ty.width();
        }
        None
    }
}
