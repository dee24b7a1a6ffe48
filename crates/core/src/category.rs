//! Institution-type flag carried on every student record.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Institution type of the student's certifying school.
///
/// The store constrains the column to `P` or `S`. Older rows written by the
/// sample dataset use `N`, which reads back as [`Category::S`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "P")]
    P,
    #[default]
    #[serde(rename = "S", alias = "N")]
    S,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::P => "P",
            Self::S => "S",
        }
    }

    /// Map a free-form spreadsheet cell to a category.
    ///
    /// Only a case-insensitive `P` yields [`Category::P`]; anything else,
    /// including a missing cell, falls back to [`Category::S`].
    pub fn from_cell(cell: Option<&str>) -> Self {
        match cell {
            Some(value) if value.trim().eq_ignore_ascii_case("p") => Self::P,
            _ => Self::S,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim() {
            "P" | "p" => Ok(Self::P),
            "S" | "s" | "N" | "n" => Ok(Self::S),
            other => Err(crate::Error::InvalidCategory(other.to_string())),
        }
    }
}
