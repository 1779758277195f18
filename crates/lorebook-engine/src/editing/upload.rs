//! The media upload boundary.
//!
//! Binary storage is owned externally; the markup subsystem only needs the
//! resulting URL. An upload failure is surfaced to the initiating caller
//! and the mutator is never invoked, leaving the field untouched.

use thiserror::Error;

/// A file handed to the uploader, as received from a paste or drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Successful upload result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedMedia {
    pub url: String,
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("upload rejected: {0}")]
    Rejected(String),
    #[error("upload transport failed: {0}")]
    Io(#[from] std::io::Error),
}

/// External storage collaborator.
pub trait MediaUploader {
    fn upload(&self, file: &MediaFile) -> Result<UploadedMedia, UploadError>;
}
