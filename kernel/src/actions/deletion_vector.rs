//! The deletion vector descriptor carried by add/remove file actions.

use std::sync::{Arc, LazyLock};

use crate::row::{Row, Value};
use crate::schema::{DataType, SchemaRef, StructField, StructType};
use crate::utils::require;
use crate::{DeltaResult, Error};

mod ordinals {
    pub(super) const STORAGE_TYPE: usize = 0;
    pub(super) const PATH_OR_INLINE_DV: usize = 1;
    pub(super) const OFFSET: usize = 2;
    pub(super) const SIZE_IN_BYTES: usize = 3;
    pub(super) const CARDINALITY: usize = 4;
}

/// The fixed row layout of a deletion vector descriptor. The ordinal of each
/// field is part of the persisted format and must not change.
pub fn deletion_vector_schema() -> &'static SchemaRef {
    static SCHEMA: LazyLock<SchemaRef> = LazyLock::new(|| {
        Arc::new(
            StructType::try_new([
                StructField::not_null("storageType", DataType::STRING),
                StructField::not_null("pathOrInlineDv", DataType::STRING),
                StructField::nullable("offset", DataType::INTEGER),
                StructField::not_null("sizeInBytes", DataType::LONG),
                StructField::not_null("cardinality", DataType::LONG),
            ])
            .expect("deletion vector schema is statically valid"),
        )
    });
    &SCHEMA
}

/// Describes a deletion vector attached to a data file: an auxiliary structure
/// marking logically deleted rows without rewriting the file.
///
/// This is an immutable value object. It appears nested inside [`AddFile`] and
/// [`RemoveFile`] rows as a struct-typed ordinal.
///
/// [`AddFile`]: crate::actions::AddFile
/// [`RemoveFile`]: crate::actions::RemoveFile
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeletionVectorDescriptor {
    /// A single character to indicate how to access the DV. Legal options are
    /// `'u'` (persisted relative), `'i'` (inline), and `'p'` (persisted
    /// absolute).
    pub storage_type: String,

    /// Either the relative/absolute path of the DV file, or the inline encoded
    /// bytes, depending on `storage_type`.
    pub path_or_inline_dv: String,

    /// Start of the data for this DV in bytes from the beginning of the file
    /// it is stored in. Always absent for inline DVs.
    pub offset: Option<i32>,

    /// Size of the serialized DV in bytes.
    pub size_in_bytes: i64,

    /// Number of rows the DV logically removes from the file.
    pub cardinality: i64,
}

impl DeletionVectorDescriptor {
    pub fn new(
        storage_type: impl Into<String>,
        path_or_inline_dv: impl Into<String>,
        offset: Option<i32>,
        size_in_bytes: i64,
        cardinality: i64,
    ) -> Self {
        Self {
            storage_type: storage_type.into(),
            path_or_inline_dv: path_or_inline_dv.into(),
            offset,
            size_in_bytes,
            cardinality,
        }
    }

    /// A string that uniquely identifies the deletion vector a descriptor
    /// points at, independent of which action row carries it.
    pub fn unique_id(&self) -> String {
        match self.offset {
            Some(offset) => format!("{}{}@{offset}", self.storage_type, self.path_or_inline_dv),
            None => format!("{}{}", self.storage_type, self.path_or_inline_dv),
        }
    }

    /// Encodes this descriptor into its fixed-layout row form.
    pub(crate) fn to_row(&self) -> Row {
        let values = vec![
            Some(Value::String(self.storage_type.clone())),
            Some(Value::String(self.path_or_inline_dv.clone())),
            self.offset.map(Value::Integer),
            Some(Value::Long(self.size_in_bytes)),
            Some(Value::Long(self.cardinality)),
        ];
        Row::new_unchecked(deletion_vector_schema().clone(), values)
    }

    /// Decodes a descriptor from its row form, validating the schema.
    pub(crate) fn from_row(row: &Row) -> DeltaResult<Self> {
        require!(
            row.schema() == deletion_vector_schema(),
            Error::schema("row is not a deletionVector row".to_string())
        );
        let required_string = |ordinal: usize, name: &str| {
            row.string_value(ordinal)
                .map(String::from)
                .ok_or_else(|| Error::missing_data(name.to_string()))
        };
        let required_long = |ordinal: usize, name: &str| {
            row.long_value(ordinal)
                .ok_or_else(|| Error::missing_data(name.to_string()))
        };
        Ok(Self {
            storage_type: required_string(ordinals::STORAGE_TYPE, "storageType")?,
            path_or_inline_dv: required_string(ordinals::PATH_OR_INLINE_DV, "pathOrInlineDv")?,
            offset: row.int_value(ordinals::OFFSET),
            size_in_bytes: required_long(ordinals::SIZE_IN_BYTES, "sizeInBytes")?,
            cardinality: required_long(ordinals::CARDINALITY, "cardinality")?,
        })
    }
}

impl std::fmt::Display for DeletionVectorDescriptor {
    /// The relied-upon debug rendering:
    /// `DeletionVectorDescriptor(storageType=u, pathOrInlineDv=abc, offset=Optional[1], sizeInBytes=10, cardinality=2)`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "DeletionVectorDescriptor(storageType={}, pathOrInlineDv={}, offset={}, sizeInBytes={}, cardinality={})",
            self.storage_type,
            self.path_or_inline_dv,
            crate::actions::fmt_optional(self.offset.as_ref()),
            self.size_in_bytes,
            self.cardinality,
        )
    }
}
