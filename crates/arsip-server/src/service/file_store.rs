//! Filesystem-backed File Store.
//!
//! New uploads always land in the primary directory. Lookups check every
//! configured directory in priority order, so files written by older
//! deployments under a different root stay reachable.

use std::io;
use std::path::{Path, PathBuf};

use arsip_core::form::{MAX_FILE_SIZE, file_extension};
use jiff::Timestamp;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

/// Tracing target for file store operations.
pub const TRACING_TARGET_FILE_STORE: &str = "arsip_server::service::file_store";

/// Prefix of every stored file reference, and of the public URL path.
pub const STORED_PATH_PREFIX: &str = "uploads";

/// Reduces a stored reference to a bare file name safe to join onto an
/// upload directory.
///
/// Anything up to the last `/` or `\` is dropped, so references recorded
/// with a different directory prefix still resolve. Returns `None` for
/// names that could escape the directory or are otherwise unusable: empty
/// names, `.`, `..`, and names with NUL bytes or drive separators.
pub fn resolve_stored_reference(reference: &str) -> Option<&str> {
    let name = reference.trim().rsplit(['/', '\\']).next()?;

    let unsafe_name = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('\0')
        || name.contains(':');

    (!unsafe_name).then_some(name)
}

/// Generates a collision-resistant name: `file-<unix millis>-<9 digits><.ext>`.
pub fn generate_stored_name(original_name: &str) -> String {
    let millis = Timestamp::now().as_millisecond();
    let suffix = Uuid::new_v4().as_u128() % 1_000_000_000;
    let extension = file_extension(original_name).unwrap_or_default();

    format!("file-{millis}-{suffix:09}{extension}")
}

/// A file that was just written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Generated file name.
    pub name: String,
    /// Absolute or configured path the bytes were written to.
    pub path: PathBuf,
}

impl StoredFile {
    /// Returns the reference recorded in the metadata store, `uploads/<name>`.
    pub fn reference(&self) -> String {
        format!("{STORED_PATH_PREFIX}/{}", self.name)
    }
}

/// Uploaded binaries on the local filesystem.
#[derive(Debug, Clone)]
pub struct FileStore {
    upload_dirs: Vec<PathBuf>,
    max_file_size: u64,
}

impl FileStore {
    /// Creates a store that writes to and reads from `primary_dir`.
    pub fn new(primary_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dirs: vec![primary_dir.into()],
            max_file_size: MAX_FILE_SIZE,
        }
    }

    /// Sets the largest accepted upload, in bytes.
    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }

    /// Returns the largest accepted upload, in bytes.
    #[inline]
    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    /// Adds a lower-priority directory that is only searched.
    pub fn with_fallback_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.upload_dirs.push(dir.into());
        self
    }

    /// Returns the directory new uploads are written to.
    pub fn primary_dir(&self) -> &Path {
        &self.upload_dirs[0]
    }

    /// Returns every searched directory, in priority order.
    pub fn upload_dirs(&self) -> &[PathBuf] {
        &self.upload_dirs
    }

    /// Creates the primary directory if it is missing.
    pub async fn ensure_primary_dir(&self) -> io::Result<()> {
        fs::create_dir_all(self.primary_dir()).await
    }

    /// Writes `bytes` under a freshly generated name in the primary directory.
    ///
    /// The file is created exclusively: a name clash fails instead of
    /// overwriting another upload.
    pub async fn write(&self, bytes: &[u8], original_name: &str) -> io::Result<StoredFile> {
        self.ensure_primary_dir().await?;

        let name = generate_stored_name(original_name);
        let path = self.primary_dir().join(&name);

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await?;
        file.write_all(bytes).await?;
        file.sync_all().await?;

        tracing::debug!(
            target: TRACING_TARGET_FILE_STORE,
            path = %path.display(),
            size = bytes.len(),
            "Stored uploaded file"
        );

        Ok(StoredFile { name, path })
    }

    /// Finds the file behind a stored reference, checking each directory in order.
    pub async fn locate(&self, reference: &str) -> Option<PathBuf> {
        let name = resolve_stored_reference(reference)?;

        for dir in &self.upload_dirs {
            let candidate = dir.join(name);
            if let Ok(metadata) = fs::metadata(&candidate).await
                && metadata.is_file()
            {
                return Some(candidate);
            }
        }

        None
    }

    /// Reads the file behind a stored reference.
    ///
    /// Returns `Ok(None)` when no directory holds it.
    pub async fn read(&self, reference: &str) -> io::Result<Option<(PathBuf, Vec<u8>)>> {
        let Some(path) = self.locate(reference).await else {
            return Ok(None);
        };

        match fs::read(&path).await {
            Ok(bytes) => Ok(Some((path, bytes))),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Removes the file behind a stored reference.
    ///
    /// A file that is already gone is not an error; the removed path is
    /// returned when there was one.
    pub async fn remove(&self, reference: &str) -> io::Result<Option<PathBuf>> {
        let Some(path) = self.locate(reference).await else {
            tracing::debug!(
                target: TRACING_TARGET_FILE_STORE,
                reference,
                "No stored file to remove"
            );
            return Ok(None);
        };

        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(
                    target: TRACING_TARGET_FILE_STORE,
                    path = %path.display(),
                    "Removed stored file"
                );
                Ok(Some(path))
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }
}
