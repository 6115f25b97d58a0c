//! File storage backends for fs-store.
//!
//! The local backend keeps one file per entity directly in the base directory:
//! ```text
//! {base_path}/
//! ├── 7048f7b889394333b22029a7a8f24bce_report.pdf
//! ├── a1b2c3d4e5f60718293a4b5c6d7e8f90_notes.txt
//! └── ...
//! ```
//! The id, the original name and both timestamps are recovered from the
//! directory entry itself, so no separate metadata store is needed.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use super::entity::{FileEntity, FileId, FileMetadata};
use crate::{FsStoreError, Result};

/// Longest directory entry name most filesystems accept, in bytes.
pub const MAX_STORED_NAME_BYTES: usize = 255;

/// Durable key to (bytes, metadata) store used by [`super::FileService`].
///
/// Implementations make no ordering promise for [`get_all`](Self::get_all);
/// callers impose their own order.
pub trait FileStorageBackend: Send + Sync {
    /// Persist the entity. Timestamps are assigned by the backend at write time.
    ///
    /// The write must be atomic from the caller's point of view.
    fn save(&self, file: &FileEntity) -> Result<FileMetadata>;

    /// Remove the file with the given id.
    ///
    /// Returns [`FsStoreError::NotFound`] when no such file exists.
    fn delete(&self, id: &FileId) -> Result<()>;

    /// Enumerate all stored files with metadata, content omitted.
    fn get_all(&self) -> Result<Vec<FileMetadata>>;
}

/// Filesystem-backed storage keyed by `"{id}_{file_name}"`.
#[derive(Debug, Clone)]
pub struct LocalFileStorage {
    /// Base directory for file storage.
    base_path: PathBuf,
}

impl LocalFileStorage {
    /// Create a new LocalFileStorage with the given base path.
    ///
    /// The base directory will be created if it doesn't exist.
    pub fn new(base_path: impl Into<PathBuf>) -> Result<Self> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path)?;

        Ok(Self { base_path })
    }

    /// Get the base path of this storage.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Build the stored name for an id and original file name.
    pub fn stored_name(id: &FileId, file_name: &str) -> String {
        format!("{id}_{file_name}")
    }

    /// Split a stored name back into id and original file name.
    ///
    /// Returns `None` for entries that were not written by this backend.
    pub fn parse_stored_name(stored_name: &str) -> Option<(FileId, String)> {
        let (prefix, file_name) = stored_name.split_once('_')?;
        let id = FileId::parse(prefix)?;
        Some((id, file_name.to_string()))
    }

    /// Find the path of the stored file with the given id.
    fn find_path(&self, id: &FileId) -> Result<Option<PathBuf>> {
        for entry in fs::read_dir(&self.base_path)? {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if let Some((entry_id, _)) = Self::parse_stored_name(name) {
                if &entry_id == id {
                    return Ok(Some(entry.path()));
                }
            }
        }
        Ok(None)
    }

    /// Read creation and modification times from filesystem metadata.
    ///
    /// Falls back to the modification time where the platform does not record birth time.
    fn timestamps(metadata: &fs::Metadata) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
        let modified = metadata.modified()?;
        let created = metadata.created().unwrap_or(modified);
        Ok((created.into(), modified.into()))
    }

    /// Reject names that would escape the base directory, break the key format,
    /// or make the stored name too long for the filesystem.
    fn check_file_name(id: &FileId, file_name: &str) -> Result<()> {
        if file_name.contains(['/', '\\', '\0']) {
            return Err(FsStoreError::Validation(format!(
                "file name contains a path separator: {file_name:?}"
            )));
        }
        let stored_len = Self::stored_name(id, file_name).len();
        if stored_len > MAX_STORED_NAME_BYTES {
            return Err(FsStoreError::Validation(format!(
                "stored file name is {stored_len} bytes, limit is {MAX_STORED_NAME_BYTES}"
            )));
        }
        Ok(())
    }
}

impl FileStorageBackend for LocalFileStorage {
    fn save(&self, file: &FileEntity) -> Result<FileMetadata> {
        Self::check_file_name(&file.id, &file.file_name)?;

        let final_path = self
            .base_path
            .join(Self::stored_name(&file.id, &file.file_name));
        // Dot prefix keeps in-flight writes out of get_all
        let temp_path = self.base_path.join(format!(".{}.tmp", file.id));

        let write_result = (|| -> io::Result<()> {
            let mut temp = fs::File::create(&temp_path)?;
            temp.write_all(&file.content)?;
            temp.sync_all()?;
            fs::rename(&temp_path, &final_path)
        })();

        if let Err(e) = write_result {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }

        let (created_at, updated_at) = Self::timestamps(&fs::metadata(&final_path)?)?;

        Ok(FileMetadata {
            id: file.id.clone(),
            file_name: file.file_name.clone(),
            created_at,
            updated_at,
        })
    }

    fn delete(&self, id: &FileId) -> Result<()> {
        let path = self
            .find_path(id)?
            .ok_or_else(|| FsStoreError::NotFound(format!("File: {id}")))?;

        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            // Removed concurrently between lookup and delete
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(FsStoreError::NotFound(format!("File: {id}")))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn get_all(&self) -> Result<Vec<FileMetadata>> {
        let mut files = Vec::new();

        for entry in fs::read_dir(&self.base_path)? {
            let entry = entry?;
            let name = entry.file_name();
            let Some((id, file_name)) = name.to_str().and_then(Self::parse_stored_name) else {
                continue;
            };

            let metadata = match entry.metadata() {
                Ok(m) => m,
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(e.into()),
            };
            if !metadata.is_file() {
                continue;
            }

            let (created_at, updated_at) = Self::timestamps(&metadata)?;
            files.push(FileMetadata {
                id,
                file_name,
                created_at,
                updated_at,
            });
        }

        Ok(files)
    }
}
