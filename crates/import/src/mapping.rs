//! Spreadsheet column headers and how they map onto student fields.

use crate::sheet::RowView;
use std::path::PathBuf;
use vrnt_core::{Category, DocumentKind, StudentPatch};

/// Header text to column name. `Category` is handled separately.
pub const COLUMN_MAPPING: [(&str, &str); 17] = [
    ("UID", "uid"),
    ("Email Address", "email_address"),
    ("Name (as in Aadhaar)", "name_aadhar"),
    ("Mobile Number", "mobile_number"),
    ("Email ID", "email_id"),
    ("Aadhaar Number", "aadhaar_number"),
    ("Address", "address"),
    ("Year of Certification", "year_of_certification"),
    ("Certified In", "certified_in"),
    ("School", "school"),
    ("Veda Adhyapakar Name", "veda_adhyapakar_name"),
    ("Vedham", "vedham"),
    ("Date of Birth", "date_of_birth"),
    ("Father Name", "father_name"),
    ("Shaka", "shaka"),
    ("Gothram", "gothram"),
    ("Soothram", "soothram"),
];

pub const CATEGORY_HEADER: &str = "Category";

/// Header of the column holding a local file path for each document kind.
pub const FILE_COLUMNS: [(&str, DocumentKind); 3] = [
    ("Passport Photo Path", DocumentKind::Photo),
    ("Certificate Path", DocumentKind::Certificate),
    ("Aadhaar Card Path", DocumentKind::IdProof),
];

/// A data row translated into an insert payload and its document files.
#[derive(Clone, Debug, PartialEq)]
pub struct MappedRow {
    pub patch: StudentPatch,
    pub documents: Vec<(DocumentKind, PathBuf)>,
}

/// Translate one row. Unknown headers are ignored.
pub fn map_row(row: &RowView<'_>) -> vrnt_core::Result<MappedRow> {
    let mut patch = StudentPatch::default();
    for (header, column) in COLUMN_MAPPING {
        if let Some(value) = row.text(header) {
            patch.set(column, value)?;
        }
    }
    patch.category = Some(Category::from_cell(row.text(CATEGORY_HEADER).as_deref()));

    let documents = FILE_COLUMNS
        .iter()
        .filter_map(|(header, kind)| row.text(header).map(|p| (*kind, PathBuf::from(p))))
        .collect();

    Ok(MappedRow { patch, documents })
}
