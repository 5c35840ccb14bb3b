use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::ports::{ObjectStorage, StorageError};

/// A storage request observed by [`MemoryObjectStorage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageCall {
    ListBuckets,
    CreateBucket { bucket: String },
    PutObject { bucket: String, key: String, body: Vec<u8> },
    DeleteObject { bucket: String, key: String },
}

#[derive(Debug, Default)]
struct State {
    buckets: BTreeSet<String>,
    objects: BTreeMap<(String, String), Vec<u8>>,
    calls: Vec<StorageCall>,
    fail_create: Option<String>,
}

/// In-memory object storage recording every request.
#[derive(Debug, Clone, Default)]
pub struct MemoryObjectStorage {
    state: Arc<Mutex<State>>,
}

impl MemoryObjectStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that already holds `buckets`.
    pub fn with_buckets<I, S>(buckets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let storage = Self::new();
        storage.lock().buckets.extend(buckets.into_iter().map(Into::into));
        storage
    }

    /// Make every subsequent `create_bucket` fail with `details`.
    pub fn fail_create_with(&self, details: &str) {
        self.lock().fail_create = Some(details.to_string());
    }

    pub fn calls(&self) -> Vec<StorageCall> {
        self.lock().calls.clone()
    }

    pub fn object(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        self.lock().objects.get(&(bucket.to_string(), key.to_string())).cloned()
    }

    pub fn has_bucket(&self, bucket: &str) -> bool {
        self.lock().buckets.contains(bucket)
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // Recover from poisoning; state is only mutated under complete calls.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ObjectStorage for MemoryObjectStorage {
    fn list_buckets(&self) -> Result<Vec<String>, StorageError> {
        let mut state = self.lock();
        state.calls.push(StorageCall::ListBuckets);
        Ok(state.buckets.iter().cloned().collect())
    }

    fn create_bucket(&self, bucket: &str) -> Result<(), StorageError> {
        let mut state = self.lock();
        state.calls.push(StorageCall::CreateBucket { bucket: bucket.to_string() });
        if let Some(details) = &state.fail_create {
            return Err(StorageError::request("createBucket", details));
        }
        if !state.buckets.insert(bucket.to_string()) {
            return Err(StorageError::BucketAlreadyExists(bucket.to_string()));
        }
        Ok(())
    }

    fn put_object(&self, bucket: &str, key: &str, body: &[u8]) -> Result<(), StorageError> {
        let mut state = self.lock();
        state.calls.push(StorageCall::PutObject {
            bucket: bucket.to_string(),
            key: key.to_string(),
            body: body.to_vec(),
        });
        if !state.buckets.contains(bucket) {
            return Err(StorageError::request("putObject", format!("no such bucket: {bucket}")));
        }
        state.objects.insert((bucket.to_string(), key.to_string()), body.to_vec());
        Ok(())
    }

    fn delete_object(&self, bucket: &str, key: &str) -> Result<(), StorageError> {
        let mut state = self.lock();
        state.calls.push(StorageCall::DeleteObject {
            bucket: bucket.to_string(),
            key: key.to_string(),
        });
        if !state.buckets.contains(bucket) {
            return Err(StorageError::request("deleteObject", format!("no such bucket: {bucket}")));
        }
        state.objects.remove(&(bucket.to_string(), key.to_string()));
        Ok(())
    }
}
