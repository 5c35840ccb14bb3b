use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::ports::{ObjectStorage, StorageError};

/// Default root for [`FilesystemObjectStorage`].
pub const DEFAULT_STORAGE_DIR: &str = ".pkl-storage";

/// Object storage backed by a local directory: one subdirectory per bucket.
#[derive(Debug, Clone)]
pub struct FilesystemObjectStorage {
    root: PathBuf,
}

impl FilesystemObjectStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn bucket_path(&self, operation: &'static str, bucket: &str) -> Result<PathBuf, StorageError> {
        Ok(self.root.join(single_segment(operation, "bucket", bucket)?))
    }

    fn object_path(
        &self,
        operation: &'static str,
        bucket: &str,
        key: &str,
    ) -> Result<PathBuf, StorageError> {
        let bucket_path = self.bucket_path(operation, bucket)?;
        if !bucket_path.is_dir() {
            return Err(StorageError::request(operation, format!("no such bucket: {bucket}")));
        }
        Ok(bucket_path.join(single_segment(operation, "key", key)?))
    }
}

impl ObjectStorage for FilesystemObjectStorage {
    fn list_buckets(&self) -> Result<Vec<String>, StorageError> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StorageError::request("listBuckets", e)),
        };

        let mut buckets = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StorageError::request("listBuckets", e))?;
            if entry.path().is_dir() {
                buckets.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        buckets.sort();
        Ok(buckets)
    }

    fn create_bucket(&self, bucket: &str) -> Result<(), StorageError> {
        let path = self.bucket_path("createBucket", bucket)?;
        fs::create_dir_all(&self.root).map_err(|e| StorageError::request("createBucket", e))?;
        match fs::create_dir(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                Err(StorageError::BucketAlreadyExists(bucket.to_string()))
            }
            Err(e) => Err(StorageError::request("createBucket", e)),
        }
    }

    fn put_object(&self, bucket: &str, key: &str, body: &[u8]) -> Result<(), StorageError> {
        let path = self.object_path("putObject", bucket, key)?;
        fs::write(path, body).map_err(|e| StorageError::request("putObject", e))
    }

    fn delete_object(&self, bucket: &str, key: &str) -> Result<(), StorageError> {
        let path = self.object_path("deleteObject", bucket, key)?;
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            // Deleting a missing object succeeds, as on S3.
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::request("deleteObject", e)),
        }
    }
}

/// Reject names that would escape the storage root.
fn single_segment<'a>(
    operation: &'static str,
    what: &str,
    name: &'a str,
) -> Result<&'a Path, StorageError> {
    let path = Path::new(name);
    let mut components = path.components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(path),
        _ => Err(StorageError::request(operation, format!("invalid {what} name '{name}'"))),
    }
}
