//! Upload and edit form rules.
//!
//! The server re-checks everything enforced here; these checks only keep
//! obviously invalid submissions from leaving the client.

mod edit;
mod upload;

pub use self::edit::EditForm;
pub use self::upload::{
    ALLOWED_MIME_TYPES, FileRejection, MAX_FILE_SIZE, SelectedFile, UploadForm, UploadRequest,
    check_file, check_file_with_limit, file_extension, name_from_file_name,
};
