//! Bucket existence and creation shared by upload and removal.

use tracing::{info, warn};

use crate::domain::{AppError, StorageError};
use crate::ports::ObjectStorage;

/// Whether `bucket` appears in the account's bucket list.
pub fn bucket_exists(storage: &impl ObjectStorage, bucket: &str) -> Result<bool, AppError> {
    let buckets = storage.list_buckets()?;
    Ok(buckets.iter().any(|name| name == bucket))
}

/// Create `bucket`; an already existing bucket is not an error.
pub fn create_bucket(storage: &impl ObjectStorage, bucket: &str) -> Result<(), AppError> {
    match storage.create_bucket(bucket) {
        Ok(()) => {
            info!("Created bucket: {}", bucket);
            Ok(())
        }
        Err(StorageError::BucketAlreadyExists(_)) => {
            warn!("Bucket {} already exists", bucket);
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}
