//! Filesystem-style adapter over the storage client.
//!
//! Maps the client's object operations onto the contract a generic
//! virtual-filesystem layer expects: existence checks, rename, directory
//! listing, metadata. The backend has no directory objects and no
//! permission model, so `create_dir` is synthetic and visibility is
//! reported as unsupported.

use std::fs::File;

use bytes::Bytes;

use crate::api::{Result, StorageClient, Transport};
use crate::models::FileRecord;
use crate::utils::path::normalize;

/// Object permission level, as far as a generic filesystem layer models it.
/// This backend supports none of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
}

pub struct StorageAdapter<T: Transport> {
    client: StorageClient<T>,
}

impl<T: Transport> StorageAdapter<T> {
    pub fn new(client: StorageClient<T>) -> Self {
        Self { client }
    }

    /// Write and return the descriptor of the stored object.
    ///
    /// The API reports no metadata on upload, so the descriptor carries the
    /// size of the written contents and default mime/timestamp values.
    pub async fn write(&mut self, path: &str, contents: impl Into<Bytes>) -> Result<FileRecord> {
        let contents = contents.into();
        let size = contents.len() as u64;
        self.client.write(path, contents).await?;

        Ok(FileRecord::File {
            path: normalize(path),
            size,
            mimetype: "application/octet-stream".to_string(),
            timestamp: 0,
        })
    }

    /// Write from a reader; the reader stays owned by the caller.
    pub async fn write_stream<R: std::io::Read>(
        &mut self,
        path: &str,
        reader: &mut R,
    ) -> Result<()> {
        self.client.write_stream(path, reader).await
    }

    /// Overwrite an existing object. The backend makes no distinction
    /// between create and overwrite, so this is plain delegation.
    pub async fn update(&mut self, path: &str, contents: impl Into<Bytes>) -> Result<FileRecord> {
        self.write(path, contents).await
    }

    /// Overwrite an existing object from a reader.
    pub async fn update_stream<R: std::io::Read>(
        &mut self,
        path: &str,
        reader: &mut R,
    ) -> Result<()> {
        self.write_stream(path, reader).await
    }

    pub async fn read(&mut self, path: &str) -> Result<Bytes> {
        self.client.read(path).await
    }

    /// Read into a temp-backed file owned by the caller.
    pub async fn read_stream(&mut self, path: &str) -> Result<File> {
        self.client.read_stream(path).await
    }

    pub async fn copy(&mut self, from: &str, to: &str) -> Result<()> {
        self.client.copy(from, to).await
    }

    /// Copy then delete the source. Two sequential requests, not atomic: a
    /// failed delete after a successful copy leaves the source in place.
    pub async fn rename(&mut self, from: &str, to: &str) -> Result<()> {
        self.client.copy(from, to).await?;
        self.client.delete(&[from]).await
    }

    pub async fn delete(&mut self, path: &str) -> Result<()> {
        self.client.delete(&[path]).await
    }

    /// Delete everything the prefix matches, in one bulk request.
    pub async fn delete_dir(&mut self, prefix: &str) -> Result<()> {
        let matched = self.client.list_matched(prefix).await?;
        let paths: Vec<String> = matched
            .into_iter()
            .map(|record| record.path().to_string())
            .collect();

        self.client.delete(&paths).await
    }

    /// The backend has no directory objects; succeed with a synthetic
    /// descriptor and touch nothing.
    pub fn create_dir(&self, path: &str) -> FileRecord {
        FileRecord::Dir {
            path: normalize(path),
        }
    }

    pub async fn has(&mut self, path: &str) -> Result<bool> {
        Ok(self.client.stat(path).await?.is_some())
    }

    pub async fn metadata(&mut self, path: &str) -> Result<Option<FileRecord>> {
        self.client.stat(path).await
    }

    pub async fn list_contents(&mut self, prefix: &str) -> Result<Vec<FileRecord>> {
        self.client.list_matched(prefix).await
    }

    /// Permissions are not modeled by this backend.
    pub fn visibility(&self, _path: &str) -> Option<Visibility> {
        None
    }

    /// Permissions are not modeled by this backend; reports failure without
    /// touching the API.
    pub fn set_visibility(&self, _path: &str, _visibility: Visibility) -> bool {
        false
    }
}
