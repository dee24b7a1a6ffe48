//! Bulk spreadsheet import and sample seeding for VRNT student records.
//!
//! This crate provides:
//! - Worksheet loading (xlsx, xls, ods)
//! - The header-to-column mapping
//! - Sequential per-row reconciliation against the record and object stores
//! - The bundled sample dataset seeder

pub mod error;
pub mod mapping;
pub mod reconcile;
pub mod seed;
pub mod sheet;

pub use error::{ImportError, ImportResult};
pub use mapping::{MappedRow, map_row};
pub use reconcile::{ImportReport, RowOutcome, RowReport, import_rows, import_workbook};
pub use seed::{SeedReport, sample_students, seed_samples, seed_students};
pub use sheet::{Cell, RowView, Worksheet, load_first_worksheet};
