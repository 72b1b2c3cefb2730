//! Typed views over Delta transaction-log actions plus operation metrics reporting.
//!
//! This crate covers two pieces of a Delta table implementation:
//!
//! 1. The **action row model**: [`AddFile`], [`RemoveFile`], and
//!    [`DomainMetadata`] are immutable, typed views over a generic
//!    ordinal-addressed [`Row`]. The ordinal layout of each action kind is the
//!    persisted wire format of table-state changes and is stable across
//!    versions. "Updates" are functional: they produce a new view over a new
//!    row and never mutate the original.
//!
//! 2. The **metrics and reporting subsystem**: an operation (snapshot
//!    construction, scan planning, transaction commit) creates a query context
//!    that owns a fresh set of [`Timer`]s and [`Counter`]s, mutates them while
//!    it runs, and finalizes the context exactly once into an immutable report.
//!    Reports serialize to canonical, byte-reproducible single-line JSON.
//!
//! The storage/row engine, expression evaluation, schema management, and log
//! replay all live outside this crate; they only supply rows and consume
//! reports.
//!
//! [`AddFile`]: crate::actions::AddFile
//! [`RemoveFile`]: crate::actions::RemoveFile
//! [`DomainMetadata`]: crate::actions::DomainMetadata
//! [`Row`]: crate::row::Row
//! [`Timer`]: crate::metrics::Timer
//! [`Counter`]: crate::metrics::Counter

pub mod actions;
mod error;
pub mod metrics;
pub mod row;
pub mod schema;
pub(crate) mod utils;

pub use error::{DeltaResult, Error};

/// The version of a Delta table.
pub type Version = u64;
