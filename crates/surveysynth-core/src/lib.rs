//! Core contracts and helpers for Surveysynth.
//!
//! This crate defines the canonical response-table model, column identifier
//! normalization, and schema inference shared by the matching and
//! generation crates.

pub mod error;
pub mod identifier;
pub mod schema;
pub mod table;

pub use error::{Error, Result};
pub use identifier::{IdentifierAllocator, MAX_IDENTIFIER_LEN, normalize_label};
pub use schema::{ColumnDomain, TableSchema};
pub use table::{ResponseColumn, ResponseTable, cell_is_missing};
