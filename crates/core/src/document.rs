//! Supporting documents: kinds, upload policy and storage paths.

use crate::student::StudentId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicI64, Ordering};
use time::OffsetDateTime;
use uuid::Uuid;

const IMAGE_TYPES: [&str; 4] = ["image/jpeg", "image/jpg", "image/png", "image/webp"];
const PDF_TYPE: &str = "application/pdf";

/// Length of the random token in a document file name.
const TOKEN_LEN: usize = 6;

/// Kind of document attached to a student record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// Passport-size photo.
    #[serde(rename = "passport")]
    Photo,
    /// Certification document.
    Certificate,
    /// Aadhaar card or other identity proof.
    #[serde(rename = "aadhaar")]
    IdProof,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 3] = [Self::Photo, Self::Certificate, Self::IdProof];

    /// Path segment and file-name prefix used in the bucket.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Photo => "passport",
            Self::Certificate => "certificate",
            Self::IdProof => "aadhaar",
        }
    }

    /// Student column holding this document's public URL.
    pub fn url_column(&self) -> &'static str {
        match self {
            Self::Photo => "passport_photo_url",
            Self::Certificate => "certificate_url",
            Self::IdProof => "aadhaar_card_url",
        }
    }

    /// MIME types accepted for this kind.
    pub fn allowed_types(&self) -> Vec<&'static str> {
        let mut types = IMAGE_TYPES.to_vec();
        if !matches!(self, Self::Photo) {
            types.push(PDF_TYPE);
        }
        types
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentKind {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "photo" | "passport" => Ok(Self::Photo),
            "certificate" => Ok(Self::Certificate),
            "id-proof" | "idproof" | "aadhaar" => Ok(Self::IdProof),
            other => Err(crate::Error::UnknownKind(other.to_string())),
        }
    }
}

/// Client-side checks applied before any document leaves the process.
#[derive(Clone, Copy, Debug)]
pub struct UploadPolicy {
    pub max_size: u64,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_size: crate::MAX_DOCUMENT_SIZE,
        }
    }
}

impl UploadPolicy {
    /// Validate a declared size and MIME type for `kind`.
    ///
    /// Returns the file extension to use for the stored object.
    pub fn validate(&self, kind: DocumentKind, mime: &str, size: u64) -> crate::Result<&'static str> {
        if size > self.max_size {
            return Err(crate::Error::FileTooLarge {
                size,
                max: self.max_size,
            });
        }

        let mime = mime.trim().to_ascii_lowercase();
        let allowed = kind.allowed_types();
        if !allowed.contains(&mime.as_str()) {
            return Err(crate::Error::TypeNotAllowed {
                mime,
                allowed: allowed.into_iter().map(str::to_string).collect(),
            });
        }

        Ok(extension_for(&mime))
    }
}

fn extension_for(mime: &str) -> &'static str {
    match mime {
        "image/png" => "png",
        "image/webp" => "webp",
        "application/pdf" => "pdf",
        _ => "jpg",
    }
}

static LAST_MILLIS: AtomicI64 = AtomicI64::new(0);

/// Milliseconds since the epoch, strictly increasing within this process.
fn monotonic_millis() -> i64 {
    let now = (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64;
    let mut prev = LAST_MILLIS.load(Ordering::Relaxed);
    loop {
        let next = now.max(prev + 1);
        match LAST_MILLIS.compare_exchange_weak(prev, next, Ordering::AcqRel, Ordering::Relaxed) {
            Ok(_) => return next,
            Err(actual) => prev = actual,
        }
    }
}

fn random_token() -> String {
    const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut n = Uuid::new_v4().as_u128();
    let mut token = String::with_capacity(TOKEN_LEN);
    for _ in 0..TOKEN_LEN {
        token.push(ALPHABET[(n % 36) as usize] as char);
        n /= 36;
    }
    token
}

/// Object path of an uploaded document:
/// `{owner}/{kind}/{kind}_{millis}_{token}.{ext}`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DocumentPath {
    owner: StudentId,
    kind: DocumentKind,
    millis: i64,
    token: String,
    extension: &'static str,
}

impl DocumentPath {
    /// Build a fresh path for a new upload.
    pub fn generate(owner: &StudentId, kind: DocumentKind, extension: &'static str) -> Self {
        Self {
            owner: owner.clone(),
            kind,
            millis: monotonic_millis(),
            token: random_token(),
            extension,
        }
    }

    pub fn owner(&self) -> &StudentId {
        &self.owner
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn file_name(&self) -> String {
        format!(
            "{kind}_{millis}_{token}.{ext}",
            kind = self.kind,
            millis = self.millis,
            token = self.token,
            ext = self.extension
        )
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.owner, self.kind, self.file_name())
    }
}
