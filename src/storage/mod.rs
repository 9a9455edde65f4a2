//! Storage layer for fintrack
//!
//! JSON snapshot files under the data directory, read once per command and
//! validated into a [`Snapshot`].

pub mod file_io;
pub mod snapshot;

pub use file_io::{read_json, write_json_atomic};
pub use snapshot::{RawBudget, RawCategory, RawTransaction, RecordKind, RejectedRecord, Snapshot};
