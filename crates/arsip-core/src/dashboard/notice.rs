use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// User-facing notification produced by a state transition.
///
/// The dashboard renders these as dismissable toasts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A non-empty search matched nothing.
    NoSearchMatches,
    /// A date range matched nothing.
    NoDocumentsInRange,
    /// A bulk action was requested with an empty selection.
    NoSelection,
    /// Another delete is still in flight.
    Busy,
    FiltersReset,
    LoadFailed,
    /// The chosen file is not PDF, DOCX, XLSX or PPTX.
    UnsupportedFileType,
    /// The chosen file exceeds the upload limit.
    FileTooLarge,
    FileSelected,
    /// Submit was attempted with a required field missing.
    IncompleteForm,
    UploadCancelled,
    UploadFailed,
    Uploaded,
    Updated,
    UpdateFailed,
    Deleted,
    DeleteFailed,
    /// Every selected document was deleted.
    BulkDeleted { count: usize },
    /// Some selected documents could not be deleted and stay selected.
    BulkDeletePartial { deleted: usize, failed: usize },
}

impl Notice {
    /// Returns the message shown to the user.
    pub fn message(&self) -> String {
        match self {
            Self::NoSearchMatches => "Tidak ada dokumen yang cocok dengan pencarian".into(),
            Self::NoDocumentsInRange => "Tidak ada dokumen pada rentang tanggal ini".into(),
            Self::NoSelection => "Tidak ada dokumen yang dipilih".into(),
            Self::Busy => "Mohon tunggu, proses sebelumnya belum selesai".into(),
            Self::FiltersReset => "Filter telah direset".into(),
            Self::LoadFailed => "Gagal mengambil data dokumen".into(),
            Self::UnsupportedFileType => {
                "Tipe file tidak didukung. Hanya PDF, DOCX, XLSX, dan PPTX yang diperbolehkan."
                    .into()
            }
            Self::FileTooLarge => {
                "Ukuran file terlalu besar. Maksimal ukuran file adalah 10MB.".into()
            }
            Self::FileSelected => "File berhasil dipilih!".into(),
            Self::IncompleteForm => "Mohon lengkapi semua kolom sebelum mengunggah!".into(),
            Self::UploadCancelled => "Pengunggahan dibatalkan".into(),
            Self::UploadFailed => "Gagal mengunggah dokumen".into(),
            Self::Uploaded => "Dokumen berhasil diunggah!".into(),
            Self::Updated => "Dokumen berhasil diperbarui".into(),
            Self::UpdateFailed => "Gagal memperbarui dokumen".into(),
            Self::Deleted => "Dokumen berhasil dihapus!".into(),
            Self::DeleteFailed => "Gagal menghapus dokumen dari server".into(),
            Self::BulkDeleted { count } => format!("{count} dokumen berhasil dihapus!"),
            Self::BulkDeletePartial { deleted, failed } => format!(
                "{deleted} dari {} dokumen berhasil dihapus, {failed} gagal",
                deleted + failed
            ),
        }
    }

    /// Returns the severity.
    pub fn level(&self) -> NoticeLevel {
        match self {
            Self::NoSearchMatches
            | Self::NoDocumentsInRange
            | Self::FiltersReset
            | Self::Busy
            | Self::UploadCancelled => NoticeLevel::Info,
            Self::FileSelected
            | Self::Uploaded
            | Self::Updated
            | Self::Deleted
            | Self::BulkDeleted { .. } => NoticeLevel::Success,
            Self::NoSelection | Self::IncompleteForm | Self::BulkDeletePartial { .. } => {
                NoticeLevel::Warning
            }
            Self::LoadFailed
            | Self::UnsupportedFileType
            | Self::FileTooLarge
            | Self::UploadFailed
            | Self::UpdateFailed
            | Self::DeleteFailed => NoticeLevel::Error,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}
