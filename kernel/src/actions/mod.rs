//! Typed, immutable views over transaction-log action rows.
//!
//! Each action kind ([`AddFile`], [`RemoveFile`], [`DomainMetadata`]) declares
//! a fixed ordinal layout over a generic [`Row`]. The layouts are the
//! persisted wire format of table-state changes: ordinals must remain stable
//! across versions so that old logs keep reading back correctly.
//!
//! Actions are value objects. Every `with_*` method produces a new action over
//! a full-width row copy with exactly one ordinal replaced; the receiver is
//! never mutated. Equality and hashing are field-wise, with map-valued fields
//! compared by content regardless of insertion order.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, OnceLock};

use itertools::Itertools;
use serde::Deserialize;
use tracing::debug;

use crate::row::{Row, Value};
use crate::schema::{DataType, SchemaRef, StructField, StructType};
use crate::utils::require;
use crate::{DeltaResult, Error};

pub mod deletion_vector;

pub use deletion_vector::DeletionVectorDescriptor;
use deletion_vector::deletion_vector_schema;

static EMPTY_MAP: LazyLock<HashMap<String, String>> = LazyLock::new(HashMap::new);

/// Renders an optional in the relied-upon debug form: `Optional[v]` or
/// `Optional.empty`.
pub(crate) fn fmt_optional<T: std::fmt::Display>(value: Option<&T>) -> String {
    match value {
        Some(value) => format!("Optional[{value}]"),
        None => "Optional.empty".to_string(),
    }
}

/// Renders a map as `{k=v, k2=v2}` in sorted key order, so the output is
/// stable regardless of the map's internal iteration order.
fn fmt_map(map: &HashMap<String, String>) -> String {
    format!(
        "{{{}}}",
        map.iter()
            .sorted()
            .map(|(k, v)| format!("{k}={v}"))
            .join(", ")
    )
}

fn fmt_optional_map(map: Option<&HashMap<String, String>>) -> String {
    match map {
        Some(map) => format!("Optional[{}]", fmt_map(map)),
        None => "Optional.empty".to_string(),
    }
}

mod add_ordinals {
    pub(super) const PATH: usize = 0;
    pub(super) const PARTITION_VALUES: usize = 1;
    pub(super) const SIZE: usize = 2;
    pub(super) const MODIFICATION_TIME: usize = 3;
    pub(super) const DATA_CHANGE: usize = 4;
    pub(super) const DELETION_VECTOR: usize = 5;
    pub(super) const TAGS: usize = 6;
    pub(super) const BASE_ROW_ID: usize = 7;
    pub(super) const DEFAULT_ROW_COMMIT_VERSION: usize = 8;
    pub(super) const STATS: usize = 9;
}

mod remove_ordinals {
    pub(super) const PATH: usize = 0;
    pub(super) const DELETION_TIMESTAMP: usize = 1;
    pub(super) const DATA_CHANGE: usize = 2;
    pub(super) const EXTENDED_FILE_METADATA: usize = 3;
    pub(super) const PARTITION_VALUES: usize = 4;
    pub(super) const SIZE: usize = 5;
    pub(super) const STATS: usize = 6;
    pub(super) const TAGS: usize = 7;
    pub(super) const DELETION_VECTOR: usize = 8;
    pub(super) const BASE_ROW_ID: usize = 9;
    pub(super) const DEFAULT_ROW_COMMIT_VERSION: usize = 10;
}

mod domain_metadata_ordinals {
    pub(super) const DOMAIN: usize = 0;
    pub(super) const CONFIGURATION: usize = 1;
    pub(super) const REMOVED: usize = 2;
}

/// The fixed row layout of an `add` action.
pub fn add_file_schema() -> &'static SchemaRef {
    static SCHEMA: LazyLock<SchemaRef> = LazyLock::new(|| {
        Arc::new(
            StructType::try_new([
                StructField::not_null("path", DataType::STRING),
                StructField::not_null("partitionValues", DataType::MAP),
                StructField::not_null("size", DataType::LONG),
                StructField::not_null("modificationTime", DataType::LONG),
                StructField::not_null("dataChange", DataType::BOOLEAN),
                StructField::nullable(
                    "deletionVector",
                    DataType::Struct(deletion_vector_schema().clone()),
                ),
                StructField::nullable("tags", DataType::MAP),
                StructField::nullable("baseRowId", DataType::LONG),
                StructField::nullable("defaultRowCommitVersion", DataType::LONG),
                StructField::nullable("stats", DataType::STRING),
            ])
            .expect("add schema is statically valid"),
        )
    });
    &SCHEMA
}

/// The fixed row layout of a `remove` action.
pub fn remove_file_schema() -> &'static SchemaRef {
    static SCHEMA: LazyLock<SchemaRef> = LazyLock::new(|| {
        Arc::new(
            StructType::try_new([
                StructField::not_null("path", DataType::STRING),
                StructField::nullable("deletionTimestamp", DataType::LONG),
                StructField::not_null("dataChange", DataType::BOOLEAN),
                StructField::nullable("extendedFileMetadata", DataType::BOOLEAN),
                StructField::nullable("partitionValues", DataType::MAP),
                StructField::nullable("size", DataType::LONG),
                StructField::nullable("stats", DataType::STRING),
                StructField::nullable("tags", DataType::MAP),
                StructField::nullable(
                    "deletionVector",
                    DataType::Struct(deletion_vector_schema().clone()),
                ),
                StructField::nullable("baseRowId", DataType::LONG),
                StructField::nullable("defaultRowCommitVersion", DataType::LONG),
            ])
            .expect("remove schema is statically valid"),
        )
    });
    &SCHEMA
}

/// The fixed row layout of a `domainMetadata` action.
pub fn domain_metadata_schema() -> &'static SchemaRef {
    static SCHEMA: LazyLock<SchemaRef> = LazyLock::new(|| {
        Arc::new(
            StructType::try_new([
                StructField::not_null("domain", DataType::STRING),
                StructField::not_null("configuration", DataType::STRING),
                StructField::not_null("removed", DataType::BOOLEAN),
            ])
            .expect("domainMetadata schema is statically valid"),
        )
    });
    &SCHEMA
}

/// File-level statistics parsed out of an add action's raw stats JSON.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileStats {
    /// Number of records in the data file.
    pub num_records: i64,
}

/// A file that was added to the table.
///
/// `AddFile` is a typed view over a row in the fixed [`add_file_schema`]
/// layout. It parses its stats JSON lazily and caches the result; a malformed
/// stats string degrades to "no stats" rather than an error.
#[derive(Clone)]
pub struct AddFile {
    row: Row,
    // Lazily parsed stats, excluded from equality and hashing.
    stats: OnceLock<Option<FileStats>>,
}

impl AddFile {
    /// Creates an add action from its required fields. Optional fields start
    /// absent; chain `with_*` methods to set them.
    pub fn new(
        path: impl Into<String>,
        partition_values: HashMap<String, String>,
        size: i64,
        modification_time: i64,
        data_change: bool,
    ) -> Self {
        let values = vec![
            Some(Value::String(path.into())),
            Some(Value::Map(partition_values)),
            Some(Value::Long(size)),
            Some(Value::Long(modification_time)),
            Some(Value::Boolean(data_change)),
            None,
            None,
            None,
            None,
            None,
        ];
        Self {
            row: Row::new_unchecked(add_file_schema().clone(), values),
            stats: OnceLock::new(),
        }
    }

    /// Wraps an existing row, validating that it has the add layout and that
    /// all required fields are present.
    pub fn from_row(row: Row) -> DeltaResult<Self> {
        require!(
            row.schema() == add_file_schema(),
            Error::schema("row is not an add row".to_string())
        );
        for ordinal in [
            add_ordinals::PATH,
            add_ordinals::PARTITION_VALUES,
            add_ordinals::SIZE,
            add_ordinals::MODIFICATION_TIME,
            add_ordinals::DATA_CHANGE,
        ] {
            require!(
                !row.is_null_at(ordinal),
                Error::missing_data(row.schema().field_at(ordinal)?.name().to_string())
            );
        }
        Ok(Self {
            row,
            stats: OnceLock::new(),
        })
    }

    /// The underlying row in the fixed add layout.
    pub fn row(&self) -> &Row {
        &self.row
    }

    pub fn into_row(self) -> Row {
        self.row
    }

    pub fn path(&self) -> &str {
        self.row.string_value(add_ordinals::PATH).unwrap_or_default()
    }

    pub fn partition_values(&self) -> &HashMap<String, String> {
        self.row
            .map_value(add_ordinals::PARTITION_VALUES)
            .unwrap_or(&EMPTY_MAP)
    }

    pub fn size(&self) -> i64 {
        self.row.long_value(add_ordinals::SIZE).unwrap_or_default()
    }

    /// Modification time of the file, in epoch milliseconds.
    pub fn modification_time(&self) -> i64 {
        self.row
            .long_value(add_ordinals::MODIFICATION_TIME)
            .unwrap_or_default()
    }

    pub fn data_change(&self) -> bool {
        self.row
            .bool_value(add_ordinals::DATA_CHANGE)
            .unwrap_or_default()
    }

    pub fn deletion_vector(&self) -> Option<DeletionVectorDescriptor> {
        // the nested row's schema was validated when the row was built
        self.row
            .struct_value(add_ordinals::DELETION_VECTOR)
            .and_then(|row| DeletionVectorDescriptor::from_row(row).ok())
    }

    pub fn tags(&self) -> Option<&HashMap<String, String>> {
        self.row.map_value(add_ordinals::TAGS)
    }

    pub fn base_row_id(&self) -> Option<i64> {
        self.row.long_value(add_ordinals::BASE_ROW_ID)
    }

    pub fn default_row_commit_version(&self) -> Option<i64> {
        self.row.long_value(add_ordinals::DEFAULT_ROW_COMMIT_VERSION)
    }

    /// The raw, unparsed stats JSON string, if any.
    pub fn stats_json(&self) -> Option<&str> {
        self.row.string_value(add_ordinals::STATS)
    }

    /// The parsed file statistics. Parsed lazily from the raw JSON on first
    /// access and cached; a parse failure is treated as "no stats".
    pub fn stats(&self) -> Option<&FileStats> {
        self.stats
            .get_or_init(|| {
                let raw = self.stats_json()?;
                match serde_json::from_str(raw) {
                    Ok(stats) => Some(stats),
                    Err(err) => {
                        debug!("dropping unparseable stats for {}: {err}", self.path());
                        None
                    }
                }
            })
            .as_ref()
    }

    /// Number of records in the file, derived from the parsed stats.
    pub fn num_records(&self) -> Option<i64> {
        self.stats().map(|stats| stats.num_records)
    }

    fn replacing(&self, ordinal: usize, value: Option<Value>) -> Self {
        Self {
            row: self.row.replacing(ordinal, value),
            stats: self.stats.clone(),
        }
    }

    /// A copy of this action with the deletion vector replaced.
    pub fn with_deletion_vector(&self, dv: DeletionVectorDescriptor) -> Self {
        self.replacing(
            add_ordinals::DELETION_VECTOR,
            Some(Value::Struct(dv.to_row())),
        )
    }

    /// A copy of this action with the tags replaced.
    pub fn with_tags(&self, tags: HashMap<String, String>) -> Self {
        self.replacing(add_ordinals::TAGS, Some(Value::Map(tags)))
    }

    /// A copy of this action with the raw stats JSON replaced. The stats cache
    /// starts over on the copy.
    pub fn with_stats(&self, stats_json: impl Into<String>) -> Self {
        Self {
            row: self
                .row
                .replacing(add_ordinals::STATS, Some(Value::String(stats_json.into()))),
            stats: OnceLock::new(),
        }
    }

    /// A copy of this action with the base row ID replaced; the receiver is
    /// unchanged.
    pub fn with_new_base_row_id(&self, base_row_id: i64) -> Self {
        self.replacing(add_ordinals::BASE_ROW_ID, Some(Value::Long(base_row_id)))
    }

    /// A copy of this action with the default row commit version replaced; the
    /// receiver is unchanged.
    pub fn with_new_default_row_commit_version(&self, version: i64) -> Self {
        self.replacing(
            add_ordinals::DEFAULT_ROW_COMMIT_VERSION,
            Some(Value::Long(version)),
        )
    }

    /// Maps this add action into the remove layout, as when a file is removed
    /// from the table after having been added.
    ///
    /// `extendedFileMetadata` is always true on the result, the stats string
    /// passes through raw (never re-parsed), and fields absent on this add
    /// stay absent on the result.
    pub fn to_remove_file_row(&self, data_change: bool, deletion_timestamp: Option<i64>) -> RemoveFile {
        let copy_value = |ordinal: usize| -> Option<Value> {
            match self.row.is_null_at(ordinal) {
                true => None,
                false => {
                    // clone the value through the typed accessors to keep the
                    // ordinal translation explicit
                    match ordinal {
                        add_ordinals::PARTITION_VALUES | add_ordinals::TAGS => {
                            self.row.map_value(ordinal).cloned().map(Value::Map)
                        }
                        add_ordinals::DELETION_VECTOR => {
                            self.row.struct_value(ordinal).cloned().map(Value::Struct)
                        }
                        add_ordinals::STATS => {
                            self.row.string_value(ordinal).map(|s| Value::String(s.into()))
                        }
                        _ => self.row.long_value(ordinal).map(Value::Long),
                    }
                }
            }
        };
        let values = vec![
            Some(Value::String(self.path().to_string())),
            deletion_timestamp.map(Value::Long),
            Some(Value::Boolean(data_change)),
            Some(Value::Boolean(true)),
            copy_value(add_ordinals::PARTITION_VALUES),
            Some(Value::Long(self.size())),
            copy_value(add_ordinals::STATS),
            copy_value(add_ordinals::TAGS),
            copy_value(add_ordinals::DELETION_VECTOR),
            copy_value(add_ordinals::BASE_ROW_ID),
            copy_value(add_ordinals::DEFAULT_ROW_COMMIT_VERSION),
        ];
        RemoveFile {
            row: Row::new_unchecked(remove_file_schema().clone(), values),
        }
    }
}

impl PartialEq for AddFile {
    fn eq(&self, other: &Self) -> bool {
        self.row == other.row
    }
}

impl Eq for AddFile {}

impl std::hash::Hash for AddFile {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.row.hash(state);
    }
}

impl std::fmt::Display for AddFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "AddFile(path={}, partitionValues={}, size={}, modificationTime={}, dataChange={}, \
             deletionVector={}, tags={}, baseRowId={}, defaultRowCommitVersion={}, stats={})",
            self.path(),
            fmt_map(self.partition_values()),
            self.size(),
            self.modification_time(),
            self.data_change(),
            fmt_optional(self.deletion_vector().as_ref()),
            fmt_optional_map(self.tags()),
            fmt_optional(self.base_row_id().as_ref()),
            fmt_optional(self.default_row_commit_version().as_ref()),
            fmt_optional(self.stats_json().as_ref()),
        )
    }
}

impl std::fmt::Debug for AddFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self, f)
    }
}

/// A file that was removed from the table (a tombstone).
///
/// The stats string on a remove action is an opaque passthrough; it is never
/// re-parsed.
#[derive(Clone)]
pub struct RemoveFile {
    row: Row,
}

impl RemoveFile {
    /// Creates a remove action from its required fields. All optional fields
    /// start absent.
    pub fn new(path: impl Into<String>, data_change: bool) -> Self {
        let mut values = vec![None; remove_file_schema().len()];
        values[remove_ordinals::PATH] = Some(Value::String(path.into()));
        values[remove_ordinals::DATA_CHANGE] = Some(Value::Boolean(data_change));
        Self {
            row: Row::new_unchecked(remove_file_schema().clone(), values),
        }
    }

    /// Wraps an existing row, validating that it has the remove layout and
    /// that all required fields are present.
    pub fn from_row(row: Row) -> DeltaResult<Self> {
        require!(
            row.schema() == remove_file_schema(),
            Error::schema("row is not a remove row".to_string())
        );
        for ordinal in [remove_ordinals::PATH, remove_ordinals::DATA_CHANGE] {
            require!(
                !row.is_null_at(ordinal),
                Error::missing_data(row.schema().field_at(ordinal)?.name().to_string())
            );
        }
        Ok(Self { row })
    }

    /// The underlying row in the fixed remove layout.
    pub fn row(&self) -> &Row {
        &self.row
    }

    pub fn into_row(self) -> Row {
        self.row
    }

    pub fn path(&self) -> &str {
        self.row
            .string_value(remove_ordinals::PATH)
            .unwrap_or_default()
    }

    /// When the file was removed, in epoch milliseconds.
    pub fn deletion_timestamp(&self) -> Option<i64> {
        self.row.long_value(remove_ordinals::DELETION_TIMESTAMP)
    }

    pub fn data_change(&self) -> bool {
        self.row
            .bool_value(remove_ordinals::DATA_CHANGE)
            .unwrap_or_default()
    }

    pub fn extended_file_metadata(&self) -> Option<bool> {
        self.row.bool_value(remove_ordinals::EXTENDED_FILE_METADATA)
    }

    pub fn partition_values(&self) -> Option<&HashMap<String, String>> {
        self.row.map_value(remove_ordinals::PARTITION_VALUES)
    }

    pub fn size(&self) -> Option<i64> {
        self.row.long_value(remove_ordinals::SIZE)
    }

    /// The raw stats JSON carried over from the add action, if any. Never
    /// re-parsed.
    pub fn stats_json(&self) -> Option<&str> {
        self.row.string_value(remove_ordinals::STATS)
    }

    pub fn tags(&self) -> Option<&HashMap<String, String>> {
        self.row.map_value(remove_ordinals::TAGS)
    }

    pub fn deletion_vector(&self) -> Option<DeletionVectorDescriptor> {
        self.row
            .struct_value(remove_ordinals::DELETION_VECTOR)
            .and_then(|row| DeletionVectorDescriptor::from_row(row).ok())
    }

    pub fn base_row_id(&self) -> Option<i64> {
        self.row.long_value(remove_ordinals::BASE_ROW_ID)
    }

    pub fn default_row_commit_version(&self) -> Option<i64> {
        self.row
            .long_value(remove_ordinals::DEFAULT_ROW_COMMIT_VERSION)
    }

    fn replacing(&self, ordinal: usize, value: Option<Value>) -> Self {
        Self {
            row: self.row.replacing(ordinal, value),
        }
    }

    pub fn with_deletion_timestamp(&self, timestamp: i64) -> Self {
        self.replacing(
            remove_ordinals::DELETION_TIMESTAMP,
            Some(Value::Long(timestamp)),
        )
    }

    pub fn with_extended_file_metadata(&self, extended: bool) -> Self {
        self.replacing(
            remove_ordinals::EXTENDED_FILE_METADATA,
            Some(Value::Boolean(extended)),
        )
    }

    pub fn with_partition_values(&self, partition_values: HashMap<String, String>) -> Self {
        self.replacing(
            remove_ordinals::PARTITION_VALUES,
            Some(Value::Map(partition_values)),
        )
    }

    pub fn with_size(&self, size: i64) -> Self {
        self.replacing(remove_ordinals::SIZE, Some(Value::Long(size)))
    }

    pub fn with_stats_json(&self, stats_json: impl Into<String>) -> Self {
        self.replacing(
            remove_ordinals::STATS,
            Some(Value::String(stats_json.into())),
        )
    }

    pub fn with_tags(&self, tags: HashMap<String, String>) -> Self {
        self.replacing(remove_ordinals::TAGS, Some(Value::Map(tags)))
    }

    pub fn with_deletion_vector(&self, dv: DeletionVectorDescriptor) -> Self {
        self.replacing(
            remove_ordinals::DELETION_VECTOR,
            Some(Value::Struct(dv.to_row())),
        )
    }

    pub fn with_new_base_row_id(&self, base_row_id: i64) -> Self {
        self.replacing(remove_ordinals::BASE_ROW_ID, Some(Value::Long(base_row_id)))
    }

    pub fn with_new_default_row_commit_version(&self, version: i64) -> Self {
        self.replacing(
            remove_ordinals::DEFAULT_ROW_COMMIT_VERSION,
            Some(Value::Long(version)),
        )
    }
}

impl PartialEq for RemoveFile {
    fn eq(&self, other: &Self) -> bool {
        self.row == other.row
    }
}

impl Eq for RemoveFile {}

impl std::hash::Hash for RemoveFile {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.row.hash(state);
    }
}

impl std::fmt::Display for RemoveFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "RemoveFile(path={}, deletionTimestamp={}, dataChange={}, extendedFileMetadata={}, \
             partitionValues={}, size={}, stats={}, tags={}, deletionVector={}, baseRowId={}, \
             defaultRowCommitVersion={})",
            self.path(),
            fmt_optional(self.deletion_timestamp().as_ref()),
            self.data_change(),
            fmt_optional(self.extended_file_metadata().as_ref()),
            fmt_optional_map(self.partition_values()),
            fmt_optional(self.size().as_ref()),
            fmt_optional(self.stats_json().as_ref()),
            fmt_optional_map(self.tags()),
            fmt_optional(self.deletion_vector().as_ref()),
            fmt_optional(self.base_row_id().as_ref()),
            fmt_optional(self.default_row_commit_version().as_ref()),
        )
    }
}

impl std::fmt::Debug for RemoveFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self, f)
    }
}

/// A named configuration blob scoped to a metadata domain.
#[derive(Clone)]
pub struct DomainMetadata {
    row: Row,
}

impl DomainMetadata {
    /// Creates a live (non-removed) domain metadata action.
    pub fn new(domain: impl Into<String>, configuration: impl Into<String>) -> Self {
        let values = vec![
            Some(Value::String(domain.into())),
            Some(Value::String(configuration.into())),
            Some(Value::Boolean(false)),
        ];
        Self {
            row: Row::new_unchecked(domain_metadata_schema().clone(), values),
        }
    }

    /// Wraps an existing row, validating that it has the domainMetadata layout.
    pub fn from_row(row: Row) -> DeltaResult<Self> {
        require!(
            row.schema() == domain_metadata_schema(),
            Error::schema("row is not a domainMetadata row".to_string())
        );
        for ordinal in [
            domain_metadata_ordinals::DOMAIN,
            domain_metadata_ordinals::CONFIGURATION,
            domain_metadata_ordinals::REMOVED,
        ] {
            require!(
                !row.is_null_at(ordinal),
                Error::missing_data(row.schema().field_at(ordinal)?.name().to_string())
            );
        }
        Ok(Self { row })
    }

    /// The underlying row in the fixed domainMetadata layout.
    pub fn row(&self) -> &Row {
        &self.row
    }

    pub fn into_row(self) -> Row {
        self.row
    }

    pub fn domain(&self) -> &str {
        self.row
            .string_value(domain_metadata_ordinals::DOMAIN)
            .unwrap_or_default()
    }

    pub fn configuration(&self) -> &str {
        self.row
            .string_value(domain_metadata_ordinals::CONFIGURATION)
            .unwrap_or_default()
    }

    pub fn is_removed(&self) -> bool {
        self.row
            .bool_value(domain_metadata_ordinals::REMOVED)
            .unwrap_or_default()
    }

    /// A copy of this action with the removed flag replaced; the receiver is
    /// unchanged.
    pub fn with_removed(&self, removed: bool) -> Self {
        Self {
            row: self.row.replacing(
                domain_metadata_ordinals::REMOVED,
                Some(Value::Boolean(removed)),
            ),
        }
    }
}

impl PartialEq for DomainMetadata {
    fn eq(&self, other: &Self) -> bool {
        self.row == other.row
    }
}

impl Eq for DomainMetadata {}

impl std::hash::Hash for DomainMetadata {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.row.hash(state);
    }
}

impl std::fmt::Display for DomainMetadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "DomainMetadata(domain={}, configuration={}, removed={})",
            self.domain(),
            self.configuration(),
            self.is_removed(),
        )
    }
}

impl std::fmt::Debug for DomainMetadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self, f)
    }
}
