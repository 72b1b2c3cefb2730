//! A minimal schema model for ordinal-addressed rows.
//!
//! Each action kind declares its layout as a fixed, ordered list of
//! [`StructField`]s. The ordinal of a field in its [`StructType`] is part of
//! the persisted format and must stay stable across versions.

use std::collections::HashMap;
use std::sync::Arc;

use crate::utils::require;
use crate::{DeltaResult, Error};

pub type SchemaRef = Arc<StructType>;

/// The type of a single row ordinal.
///
/// `Map` values always map string keys to string values; that is the only map
/// shape the transaction-log actions need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataType {
    Boolean,
    Integer,
    Long,
    String,
    Map,
    Struct(SchemaRef),
}

impl DataType {
    pub const BOOLEAN: DataType = DataType::Boolean;
    pub const INTEGER: DataType = DataType::Integer;
    pub const LONG: DataType = DataType::Long;
    pub const STRING: DataType = DataType::String;
    pub const MAP: DataType = DataType::Map;
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataType::Boolean => write!(f, "boolean"),
            DataType::Integer => write!(f, "integer"),
            DataType::Long => write!(f, "long"),
            DataType::String => write!(f, "string"),
            DataType::Map => write!(f, "map<string, string>"),
            DataType::Struct(fields) => {
                write!(f, "struct<")?;
                for (i, field) in fields.fields().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", field.name(), field.data_type())?;
                }
                write!(f, ">")
            }
        }
    }
}

/// A named field of a [`StructType`], with its type and nullability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructField {
    name: String,
    data_type: DataType,
    nullable: bool,
}

impl StructField {
    /// A new field that may hold null values.
    pub fn nullable(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullable: true,
        }
    }

    /// A new field that must never hold null values.
    pub fn not_null(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullable: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data_type(&self) -> &DataType {
        &self.data_type
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }
}

/// An ordered collection of [`StructField`]s with a precomputed name→ordinal
/// index, so per-access lookups never scan the field list.
#[derive(Debug, Clone)]
pub struct StructType {
    fields: Vec<StructField>,
    // name -> ordinal
    index: HashMap<String, usize>,
}

impl StructType {
    pub fn try_new(fields: impl IntoIterator<Item = StructField>) -> DeltaResult<Self> {
        let fields: Vec<_> = fields.into_iter().collect();
        let mut index = HashMap::with_capacity(fields.len());
        for (ordinal, field) in fields.iter().enumerate() {
            require!(
                index.insert(field.name().to_string(), ordinal).is_none(),
                Error::schema(format!("duplicate field name: {}", field.name()))
            );
        }
        Ok(Self { fields, index })
    }

    /// Number of fields (the row width for rows of this schema).
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The ordinal of the field with the given name, if any.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// The field at the given ordinal, or an error if out of range.
    pub fn field_at(&self, ordinal: usize) -> DeltaResult<&StructField> {
        self.fields.get(ordinal).ok_or_else(|| {
            Error::schema(format!(
                "ordinal {ordinal} out of range for schema of {} fields",
                self.fields.len()
            ))
        })
    }

    pub fn fields(&self) -> impl ExactSizeIterator<Item = &StructField> {
        self.fields.iter()
    }
}

// The index is derived from the fields, so equality over the fields alone is
// the full content equality.
impl PartialEq for StructType {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
    }
}

impl Eq for StructType {}
