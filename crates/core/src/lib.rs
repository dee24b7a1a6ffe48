//! Core domain types and shared logic for VRNT student records.
//!
//! This crate defines the data model used across all other crates:
//! - Student records and sparse patches
//! - Category flag
//! - Document kinds, upload policy and storage paths
//! - Store configuration

pub mod category;
pub mod config;
pub mod document;
pub mod error;
pub mod student;

pub use category::Category;
pub use document::{DocumentKind, DocumentPath, UploadPolicy};
pub use error::{Error, Result};
pub use student::{StudentId, StudentPatch, StudentRecord};

/// Table holding one row per certified student.
pub const DEFAULT_TABLE: &str = "students_vrnt";

/// Bucket holding uploaded documents.
pub const DEFAULT_BUCKET: &str = "vrnt-uploads";

/// Maximum document size: 5 MiB
pub const MAX_DOCUMENT_SIZE: u64 = 5 * 1024 * 1024;

/// Maximum rows returned by a UID search.
pub const SEARCH_LIMIT: usize = 100;
