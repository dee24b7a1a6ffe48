pub mod mocks;

#[allow(unused_imports)]
pub use mocks::FlakyStore;

use vrnt_import::{Cell, Worksheet};

pub const HEADERS: [&str; 6] = [
    "UID",
    "Name (as in Aadhaar)",
    "Category",
    "Passport Photo Path",
    "Certificate Path",
    "Remarks",
];

/// Worksheet with the common headers and one row per `(uid, name, category)`.
#[allow(dead_code)]
pub fn roster(rows: &[(&str, &str, &str)]) -> Worksheet {
    let mut sheet = Worksheet::new("Students", HEADERS.iter().map(|h| h.to_string()).collect());
    for (idx, (uid, name, category)) in rows.iter().enumerate() {
        sheet.push_row(
            idx as u32 + 2,
            vec![(*uid).into(), (*name).into(), (*category).into()],
        );
    }
    sheet
}

#[allow(dead_code)]
pub fn with_files(uid: &str, photo: &str, certificate: &str) -> Worksheet {
    let mut sheet = Worksheet::new("Students", HEADERS.iter().map(|h| h.to_string()).collect());
    sheet.push_row(
        2,
        vec![
            uid.into(),
            "Ganesh Shastri".into(),
            "P".into(),
            photo.into(),
            certificate.into(),
            Cell::Empty,
        ],
    );
    sheet
}
