//! Object storage port definition.

pub use crate::domain::StorageError;

/// Minimal bucket API used for persisting the rendered configuration.
///
/// Requests are issued one at a time; implementations need not be reentrant.
pub trait ObjectStorage {
    /// Names of every bucket visible to the account.
    fn list_buckets(&self) -> Result<Vec<String>, StorageError>;

    /// Create a bucket. Reports `StorageError::BucketAlreadyExists` when taken.
    fn create_bucket(&self, bucket: &str) -> Result<(), StorageError>;

    /// Store `body` under `key`, replacing any existing object.
    fn put_object(&self, bucket: &str, key: &str, body: &[u8]) -> Result<(), StorageError>;

    /// Delete the object at `key`.
    fn delete_object(&self, bucket: &str, key: &str) -> Result<(), StorageError>;
}
