//! A generic, ordinal-addressed row of typed values.
//!
//! [`Row`] is the physical backing representation for transaction-log actions:
//! a fixed-width tuple whose layout is given by a [`StructType`]. The typed
//! wrappers in [`crate::actions`] read one ordinal per accessor and never scan
//! or reflect. Rows are immutable; "updates" go through
//! [`Row::with_replaced`], which produces a full-width copy with exactly one
//! ordinal replaced.

use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use itertools::Itertools;

use crate::schema::{DataType, SchemaRef};
use crate::utils::require;
use crate::{DeltaResult, Error};

/// A single typed value held at one row ordinal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Boolean(bool),
    Integer(i32),
    Long(i64),
    String(String),
    Map(HashMap<String, String>),
    Struct(Row),
}

impl Value {
    /// Whether this value is an instance of the given type. For struct values
    /// the nested row's schema must equal the expected struct schema.
    fn is_of_type(&self, data_type: &DataType) -> bool {
        match (self, data_type) {
            (Value::Boolean(_), DataType::Boolean) => true,
            (Value::Integer(_), DataType::Integer) => true,
            (Value::Long(_), DataType::Long) => true,
            (Value::String(_), DataType::String) => true,
            (Value::Map(_), DataType::Map) => true,
            (Value::Struct(row), DataType::Struct(schema)) => row.schema() == schema,
            _ => false,
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Long(_) => "long",
            Value::String(_) => "string",
            Value::Map(_) => "map",
            Value::Struct(_) => "struct",
        }
    }
}

// Maps hash their entries in sorted key order so that two maps built in
// different insertion orders hash alike, matching their content equality.
impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Value::Boolean(v) => v.hash(state),
            Value::Integer(v) => v.hash(state),
            Value::Long(v) => v.hash(state),
            Value::String(v) => v.hash(state),
            Value::Map(map) => {
                for (key, value) in map.iter().sorted() {
                    key.hash(state);
                    value.hash(state);
                }
            }
            Value::Struct(row) => row.hash(state),
        }
    }
}

/// An ordinal-addressed tuple of typed values with a fixed schema.
///
/// Null at an ordinal is represented as `None`; "present but empty" (e.g. an
/// empty map) stays `Some`, so absence is never conflated with emptiness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    schema: SchemaRef,
    values: Vec<Option<Value>>,
}

impl Row {
    /// Creates a row, validating width, nullability, and the type of every
    /// present value against the schema.
    pub fn try_new(schema: SchemaRef, values: Vec<Option<Value>>) -> DeltaResult<Self> {
        require!(
            values.len() == schema.len(),
            Error::schema(format!(
                "row width {} does not match schema width {}",
                values.len(),
                schema.len()
            ))
        );
        for (ordinal, value) in values.iter().enumerate() {
            let field = schema.field_at(ordinal)?;
            match value {
                None => require!(
                    field.is_nullable(),
                    Error::missing_data(field.name().to_string())
                ),
                Some(value) => require!(
                    value.is_of_type(field.data_type()),
                    Error::unexpected_column_type(format!(
                        "{} is of type {}, not {}",
                        field.name(),
                        value.type_name(),
                        field.data_type()
                    ))
                ),
            }
        }
        Ok(Self { schema, values })
    }

    /// Constructs a row without validation, for callers that control both the
    /// schema and the values (the fixed action layouts in this crate).
    pub(crate) fn new_unchecked(schema: SchemaRef, values: Vec<Option<Value>>) -> Self {
        debug_assert_eq!(values.len(), schema.len());
        Self { schema, values }
    }

    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    /// The number of ordinals in this row.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether the value at the given ordinal is null. Out-of-range ordinals
    /// read as null.
    pub fn is_null_at(&self, ordinal: usize) -> bool {
        !matches!(self.values.get(ordinal), Some(Some(_)))
    }

    fn value_at(&self, ordinal: usize) -> Option<&Value> {
        self.values.get(ordinal).and_then(|v| v.as_ref())
    }

    /// The string at `ordinal`, or `None` if null or not a string.
    pub fn string_value(&self, ordinal: usize) -> Option<&str> {
        match self.value_at(ordinal) {
            Some(Value::String(v)) => Some(v),
            _ => None,
        }
    }

    /// The long at `ordinal`, or `None` if null or not a long.
    pub fn long_value(&self, ordinal: usize) -> Option<i64> {
        match self.value_at(ordinal) {
            Some(Value::Long(v)) => Some(*v),
            _ => None,
        }
    }

    /// The integer at `ordinal`, or `None` if null or not an integer.
    pub fn int_value(&self, ordinal: usize) -> Option<i32> {
        match self.value_at(ordinal) {
            Some(Value::Integer(v)) => Some(*v),
            _ => None,
        }
    }

    /// The boolean at `ordinal`, or `None` if null or not a boolean.
    pub fn bool_value(&self, ordinal: usize) -> Option<bool> {
        match self.value_at(ordinal) {
            Some(Value::Boolean(v)) => Some(*v),
            _ => None,
        }
    }

    /// The string→string map at `ordinal`, or `None` if null or not a map.
    pub fn map_value(&self, ordinal: usize) -> Option<&HashMap<String, String>> {
        match self.value_at(ordinal) {
            Some(Value::Map(v)) => Some(v),
            _ => None,
        }
    }

    /// The nested row at `ordinal`, or `None` if null or not a struct.
    pub fn struct_value(&self, ordinal: usize) -> Option<&Row> {
        match self.value_at(ordinal) {
            Some(Value::Struct(v)) => Some(v),
            _ => None,
        }
    }

    /// A full-width copy of this row with exactly one ordinal replaced. The
    /// receiver is unchanged. The replacement is validated against the schema.
    pub fn with_replaced(&self, ordinal: usize, value: Option<Value>) -> DeltaResult<Row> {
        let field = self.schema.field_at(ordinal)?;
        match &value {
            None => require!(
                field.is_nullable(),
                Error::missing_data(field.name().to_string())
            ),
            Some(v) => require!(
                v.is_of_type(field.data_type()),
                Error::unexpected_column_type(format!(
                    "{} is of type {}, not {}",
                    field.name(),
                    v.type_name(),
                    field.data_type()
                ))
            ),
        }
        let mut values = self.values.clone();
        values[ordinal] = value;
        Ok(Row {
            schema: self.schema.clone(),
            values,
        })
    }

    /// Infallible variant of [`Row::with_replaced`] for callers that control
    /// both the layout and the replacement value.
    pub(crate) fn replacing(&self, ordinal: usize, value: Option<Value>) -> Row {
        debug_assert!(ordinal < self.values.len());
        let mut values = self.values.clone();
        values[ordinal] = value;
        Row {
            schema: self.schema.clone(),
            values,
        }
    }
}

impl Hash for Row {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.values.hash(state);
    }
}
