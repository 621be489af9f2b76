use jiff::civil::Date;
use thiserror::Error;

use crate::dashboard::Notice;
use crate::document::{Category, Document};
use crate::{Error, Result};

/// Largest accepted upload, in bytes.
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Accepted content types: PDF and the OpenXML word, sheet and slide formats.
pub const ALLOWED_MIME_TYPES: [&str; 4] = [
    "application/pdf",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "application/vnd.openxmlformats-officedocument.presentationml.presentation",
];

/// Why a file was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FileRejection {
    #[error("only PDF, DOCX, XLSX and PPTX files are accepted")]
    UnsupportedType,
    #[error("file exceeds the upload size limit")]
    TooLarge,
}

impl FileRejection {
    /// Returns the notice shown for this rejection.
    pub fn notice(self) -> Notice {
        match self {
            Self::UnsupportedType => Notice::UnsupportedFileType,
            Self::TooLarge => Notice::FileTooLarge,
        }
    }
}

impl From<FileRejection> for Error {
    fn from(rejection: FileRejection) -> Self {
        Error::validation(rejection.to_string())
    }
}

/// Checks content type and size against the upload rules.
pub fn check_file(mime_type: &str, size: u64) -> Result<(), FileRejection> {
    check_file_with_limit(mime_type, size, MAX_FILE_SIZE)
}

/// Like [`check_file`], with `max_size` bytes as the size limit.
pub fn check_file_with_limit(mime_type: &str, size: u64, max_size: u64) -> Result<(), FileRejection> {
    let mime_type = mime_type.split(';').next().unwrap_or_default().trim();
    if !ALLOWED_MIME_TYPES
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(mime_type))
    {
        return Err(FileRejection::UnsupportedType);
    }
    if size > max_size {
        return Err(FileRejection::TooLarge);
    }
    Ok(())
}

/// Strips the last extension from a file name: `laporan.final.pdf` becomes `laporan.final`.
pub fn name_from_file_name(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(pos) if pos + 1 < file_name.len() && !file_name[pos + 1..].contains('/') => {
            &file_name[..pos]
        }
        _ => file_name,
    }
}

/// Returns the lowercased extension including its dot, e.g. `.pdf`.
///
/// Extensions with anything other than ASCII letters and digits are dropped.
pub fn file_extension(file_name: &str) -> Option<String> {
    let base = file_name.rsplit(['/', '\\']).next()?;
    let (_, extension) = base.rsplit_once('.')?;

    let valid = !extension.is_empty() && extension.chars().all(|c| c.is_ascii_alphanumeric());
    valid.then(|| format!(".{}", extension.to_ascii_lowercase()))
}

/// A file picked by the user, before upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub file_name: String,
    pub mime_type: String,
    pub size: u64,
}

impl SelectedFile {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, size: u64) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            size,
        }
    }
}

/// Complete upload ready to be sent to the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub name: String,
    pub category: Category,
    pub date: Date,
    pub file: SelectedFile,
}

/// Upload form state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadForm {
    pub name: String,
    pub date: Option<Date>,
    pub category: Option<Category>,
    pub file: Option<SelectedFile>,
    /// A submission is in flight.
    pub uploading: bool,
}

impl UploadForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts a picked file and fills the name from it.
    ///
    /// A refused file leaves the form unchanged.
    pub fn select_file(&mut self, file: SelectedFile) -> Notice {
        if let Err(rejection) = check_file(&file.mime_type, file.size) {
            return rejection.notice();
        }

        self.name = name_from_file_name(&file.file_name).to_owned();
        self.file = Some(file);
        Notice::FileSelected
    }

    /// Names of required fields that are still empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.date.is_none() {
            missing.push("date");
        }
        if self.category.is_none() {
            missing.push("category");
        }
        if self.file.is_none() {
            missing.push("file");
        }
        missing
    }

    /// Returns whether the submit control should be enabled.
    pub fn can_submit(&self) -> bool {
        !self.uploading && self.missing_fields().is_empty()
    }

    /// Returns whether anything has been entered.
    pub fn is_dirty(&self) -> bool {
        !self.name.is_empty() || self.date.is_some() || self.category.is_some() || self.file.is_some()
    }

    /// Marks the form as uploading and returns the request to send.
    pub fn begin_submit(&mut self) -> Result<UploadRequest, Notice> {
        if self.uploading {
            return Err(Notice::Busy);
        }

        let (Some(date), Some(category), Some(file)) = (self.date, self.category, self.file.clone())
        else {
            return Err(Notice::IncompleteForm);
        };
        let name = self.name.trim();
        if name.is_empty() {
            return Err(Notice::IncompleteForm);
        }

        self.uploading = true;
        Ok(UploadRequest {
            name: name.to_owned(),
            category,
            date,
            file,
        })
    }

    /// Clears the in-flight flag and resets the form on success.
    pub fn finish_submit(&mut self, result: &Result<Document>) -> Notice {
        self.uploading = false;
        match result {
            Ok(_) => {
                *self = Self::default();
                Notice::Uploaded
            }
            Err(_) => Notice::UploadFailed,
        }
    }

    /// Abandons the form; a notice is only produced if something was entered.
    pub fn cancel(&mut self) -> Option<Notice> {
        let dirty = self.is_dirty();
        *self = Self::default();
        dirty.then_some(Notice::UploadCancelled)
    }
}
