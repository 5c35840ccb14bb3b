use super::OutputFormat;

/// Location of the rendered configuration in object storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketObject {
    pub bucket: String,
    pub key: String,
}

impl BucketObject {
    pub fn new(bucket: &str, service: &str, format: OutputFormat) -> Self {
        Self { bucket: bucket.to_string(), key: object_key(service, format) }
    }
}

/// Object key for a service: `<service>.<format>`.
pub fn object_key(service: &str, format: OutputFormat) -> String {
    format!("{service}.{format}")
}
