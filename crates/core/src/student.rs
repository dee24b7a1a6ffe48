//! Student records and sparse patches.

use crate::category::Category;
use crate::document::DocumentKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Store-assigned record key. Opaque to this crate.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(String);

impl StudentId {
    /// Wrap a store-assigned key, rejecting blank input.
    pub fn new(id: impl Into<String>) -> crate::Result<Self> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(crate::Error::InvalidPath("student id is empty".to_string()));
        }
        if trimmed.contains('/') {
            return Err(crate::Error::InvalidPath(format!(
                "student id must not contain '/': {trimmed}"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StudentId({})", self.0)
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One row of the student table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub id: StudentId,
    #[serde(default)]
    pub uid: Option<String>,

    // Personal
    #[serde(default)]
    pub name_aadhar: Option<String>,
    #[serde(default)]
    pub mobile_number: Option<String>,
    #[serde(default)]
    pub email_address: Option<String>,
    #[serde(default)]
    pub email_id: Option<String>,
    #[serde(default)]
    pub aadhaar_number: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub father_name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,

    // Certification
    #[serde(default)]
    pub vedham: Option<String>,
    #[serde(default)]
    pub shaka: Option<String>,
    #[serde(default)]
    pub gothram: Option<String>,
    #[serde(default)]
    pub soothram: Option<String>,
    #[serde(default)]
    pub certified_in: Option<String>,
    #[serde(default)]
    pub year_of_certification: Option<String>,
    #[serde(default)]
    pub school: Option<String>,
    #[serde(default)]
    pub veda_adhyapakar_name: Option<String>,
    #[serde(default)]
    pub category: Option<Category>,

    // Documents
    #[serde(default)]
    pub passport_photo_url: Option<String>,
    #[serde(default)]
    pub certificate_url: Option<String>,
    #[serde(default)]
    pub aadhaar_card_url: Option<String>,

    // Store-managed
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl StudentRecord {
    /// URL of the stored document of the given kind, if any.
    pub fn document_url(&self, kind: DocumentKind) -> Option<&str> {
        match kind {
            DocumentKind::Photo => self.passport_photo_url.as_deref(),
            DocumentKind::Certificate => self.certificate_url.as_deref(),
            DocumentKind::IdProof => self.aadhaar_card_url.as_deref(),
        }
    }

    /// Create a record from an insert payload.
    pub fn from_patch(id: StudentId, patch: &StudentPatch) -> Self {
        let mut record = Self {
            id,
            uid: None,
            name_aadhar: None,
            mobile_number: None,
            email_address: None,
            email_id: None,
            aadhaar_number: None,
            date_of_birth: None,
            father_name: None,
            address: None,
            vedham: None,
            shaka: None,
            gothram: None,
            soothram: None,
            certified_in: None,
            year_of_certification: None,
            school: None,
            veda_adhyapakar_name: None,
            category: None,
            passport_photo_url: None,
            certificate_url: None,
            aadhaar_card_url: None,
            created_at: None,
            updated_at: None,
        };
        record.apply(patch);
        record
    }

    /// Overwrite the fields present in `patch`, leaving the rest untouched.
    pub fn apply(&mut self, patch: &StudentPatch) {
        fn merge<T: Clone>(slot: &mut Option<T>, value: &Option<T>) {
            if let Some(value) = value {
                *slot = Some(value.clone());
            }
        }

        merge(&mut self.uid, &patch.uid);
        merge(&mut self.name_aadhar, &patch.name_aadhar);
        merge(&mut self.mobile_number, &patch.mobile_number);
        merge(&mut self.email_address, &patch.email_address);
        merge(&mut self.email_id, &patch.email_id);
        merge(&mut self.aadhaar_number, &patch.aadhaar_number);
        merge(&mut self.date_of_birth, &patch.date_of_birth);
        merge(&mut self.father_name, &patch.father_name);
        merge(&mut self.address, &patch.address);
        merge(&mut self.vedham, &patch.vedham);
        merge(&mut self.shaka, &patch.shaka);
        merge(&mut self.gothram, &patch.gothram);
        merge(&mut self.soothram, &patch.soothram);
        merge(&mut self.certified_in, &patch.certified_in);
        merge(&mut self.year_of_certification, &patch.year_of_certification);
        merge(&mut self.school, &patch.school);
        merge(&mut self.veda_adhyapakar_name, &patch.veda_adhyapakar_name);
        merge(&mut self.category, &patch.category);
        merge(&mut self.passport_photo_url, &patch.passport_photo_url);
        merge(&mut self.certificate_url, &patch.certificate_url);
        merge(&mut self.aadhaar_card_url, &patch.aadhaar_card_url);

        for column in &patch.cleared {
            match *column {
                "category" => self.category = None,
                other => {
                    if let Some(slot) = self.text_column(other) {
                        *slot = None;
                    }
                }
            }
        }
    }

    fn text_column(&mut self, column: &str) -> Option<&mut Option<String>> {
        let slot = match column {
            "uid" => &mut self.uid,
            "name_aadhar" => &mut self.name_aadhar,
            "mobile_number" => &mut self.mobile_number,
            "email_address" => &mut self.email_address,
            "email_id" => &mut self.email_id,
            "aadhaar_number" => &mut self.aadhaar_number,
            "date_of_birth" => &mut self.date_of_birth,
            "father_name" => &mut self.father_name,
            "address" => &mut self.address,
            "vedham" => &mut self.vedham,
            "shaka" => &mut self.shaka,
            "gothram" => &mut self.gothram,
            "soothram" => &mut self.soothram,
            "certified_in" => &mut self.certified_in,
            "year_of_certification" => &mut self.year_of_certification,
            "school" => &mut self.school,
            "veda_adhyapakar_name" => &mut self.veda_adhyapakar_name,
            "passport_photo_url" => &mut self.passport_photo_url,
            "certificate_url" => &mut self.certificate_url,
            "aadhaar_card_url" => &mut self.aadhaar_card_url,
            _ => return None,
        };
        Some(slot)
    }
}

/// Sparse set of attribute values.
///
/// Only fields that are `Some` are serialized, so the same structure serves as
/// an update patch (untouched columns stay as they are) and as an insert
/// payload (absent columns take the store default).
///
/// Setting a column to `""` stores an empty string. To store NULL, mark the
/// column with [`StudentPatch::clear`]; cleared columns appear as `null` in
/// [`StudentPatch::to_json`], which is the update wire body.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_aadhar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aadhaar_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub father_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vedham: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shaka: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gothram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soothram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certified_in: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_of_certification: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub veda_adhyapakar_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passport_photo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aadhaar_card_url: Option<String>,

    #[serde(skip)]
    cleared: BTreeSet<&'static str>,
}

impl StudentPatch {
    /// Column names accepted by [`StudentPatch::set`].
    pub const FIELDS: [&'static str; 21] = [
        "uid",
        "name_aadhar",
        "mobile_number",
        "email_address",
        "email_id",
        "aadhaar_number",
        "date_of_birth",
        "father_name",
        "address",
        "vedham",
        "shaka",
        "gothram",
        "soothram",
        "certified_in",
        "year_of_certification",
        "school",
        "veda_adhyapakar_name",
        "category",
        "passport_photo_url",
        "certificate_url",
        "aadhaar_card_url",
    ];

    /// True when no field is present or cleared.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Number of fields present or cleared.
    pub fn len(&self) -> usize {
        match self.to_json() {
            serde_json::Value::Object(map) => map.len(),
            _ => 0,
        }
    }

    /// Columns marked for NULL.
    pub fn cleared(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.cleared.iter().copied()
    }

    /// Update body: present fields with their values, cleared fields as `null`.
    pub fn to_json(&self) -> serde_json::Value {
        let mut value = match serde_json::to_value(self) {
            Ok(value @ serde_json::Value::Object(_)) => value,
            _ => serde_json::Value::Object(serde_json::Map::new()),
        };
        if let serde_json::Value::Object(map) = &mut value {
            for column in &self.cleared {
                map.insert((*column).to_string(), serde_json::Value::Null);
            }
        }
        value
    }

    /// Set a field by column name. An empty value is stored as an empty string.
    pub fn set(&mut self, field: &str, value: impl Into<String>) -> crate::Result<()> {
        let value = value.into();
        if field == "category" {
            self.category = Some(value.parse()?);
            self.cleared.remove("category");
            return Ok(());
        }
        let slot = self
            .text_slot(field)
            .ok_or_else(|| crate::Error::UnknownField(field.to_string()))?;
        *slot = Some(value);
        self.cleared.remove(field);
        Ok(())
    }

    /// Mark a column to be written as NULL on update.
    pub fn clear(&mut self, field: &str) -> crate::Result<()> {
        let column = Self::FIELDS
            .iter()
            .copied()
            .find(|name| *name == field)
            .ok_or_else(|| crate::Error::UnknownField(field.to_string()))?;
        match self.text_slot(column) {
            Some(slot) => *slot = None,
            None => self.category = None,
        }
        self.cleared.insert(column);
        Ok(())
    }

    fn text_slot(&mut self, field: &str) -> Option<&mut Option<String>> {
        let slot = match field {
            "uid" => &mut self.uid,
            "name_aadhar" => &mut self.name_aadhar,
            "mobile_number" => &mut self.mobile_number,
            "email_address" => &mut self.email_address,
            "email_id" => &mut self.email_id,
            "aadhaar_number" => &mut self.aadhaar_number,
            "date_of_birth" => &mut self.date_of_birth,
            "father_name" => &mut self.father_name,
            "address" => &mut self.address,
            "vedham" => &mut self.vedham,
            "shaka" => &mut self.shaka,
            "gothram" => &mut self.gothram,
            "soothram" => &mut self.soothram,
            "certified_in" => &mut self.certified_in,
            "year_of_certification" => &mut self.year_of_certification,
            "school" => &mut self.school,
            "veda_adhyapakar_name" => &mut self.veda_adhyapakar_name,
            "passport_photo_url" => &mut self.passport_photo_url,
            "certificate_url" => &mut self.certificate_url,
            "aadhaar_card_url" => &mut self.aadhaar_card_url,
            _ => return None,
        };
        Some(slot)
    }

    /// Build a patch from `column=value` pairs.
    pub fn from_assignments<'a>(
        assignments: impl IntoIterator<Item = &'a str>,
    ) -> crate::Result<Self> {
        Self::from_changes(assignments, [])
    }

    /// Build a patch from `column=value` pairs and columns to clear.
    ///
    /// Clears are applied after assignments, so a column named in both ends
    /// up NULL.
    pub fn from_changes<'a>(
        assignments: impl IntoIterator<Item = &'a str>,
        clears: impl IntoIterator<Item = &'a str>,
    ) -> crate::Result<Self> {
        let mut patch = Self::default();
        for assignment in assignments {
            let (field, value) = assignment.split_once('=').ok_or_else(|| {
                crate::Error::UnknownField(format!("expected column=value, got {assignment}"))
            })?;
            patch.set(field.trim(), value)?;
        }
        for field in clears {
            patch.clear(field.trim())?;
        }
        if patch.is_empty() {
            return Err(crate::Error::EmptyPatch);
        }
        Ok(patch)
    }

    /// Attach a document URL to the column matching `kind`.
    pub fn set_document_url(&mut self, kind: DocumentKind, url: impl Into<String>) {
        let url = Some(url.into());
        match kind {
            DocumentKind::Photo => self.passport_photo_url = url,
            DocumentKind::Certificate => self.certificate_url = url,
            DocumentKind::IdProof => self.aadhaar_card_url = url,
        }
        self.cleared.remove(kind.url_column());
    }
}
