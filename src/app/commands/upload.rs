//! Upload the rendered PKL configuration to its bucket.

use tracing::info;

use super::bucket::{bucket_exists, create_bucket};
use crate::app::AppContext;
use crate::domain::{AppError, BucketObject, ServiceDescription};
use crate::ports::{ConfigEvaluator, ObjectStorage, TemplateExpander};

#[derive(Debug, PartialEq, Eq)]
pub enum UploadOutcome {
    /// No `upload` block is configured.
    Skipped,
    Uploaded { object: BucketObject, created_bucket: bool },
}

pub fn execute<E, S, T>(
    ctx: &AppContext<E, S, T>,
    service: &ServiceDescription,
) -> Result<UploadOutcome, AppError>
where
    E: ConfigEvaluator,
    S: ObjectStorage,
    T: TemplateExpander,
{
    let config = service.pkl_config()?;
    let Some(upload) = config.upload.as_ref() else {
        info!("No upload configuration found");
        return Ok(UploadOutcome::Skipped);
    };
    let file = config.file()?;
    let object = BucketObject::new(&upload.bucket, service.service_name()?, upload.format);

    info!("Uploading PKL configuration to S3 bucket");

    let mut created_bucket = false;
    if !bucket_exists(ctx.storage(), &upload.bucket)? {
        if !upload.create {
            return Err(AppError::BucketNotFound(upload.bucket.clone()));
        }
        create_bucket(ctx.storage(), &upload.bucket)?;
        created_bucket = true;
    }

    let body = ctx.evaluator().evaluate(file, upload.format)?;
    ctx.storage().put_object(&object.bucket, &object.key, &body)?;
    info!("Uploaded {} to bucket {}", object.key, object.bucket);

    Ok(UploadOutcome::Uploaded { object, created_bucket })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{MemoryObjectStorage, MinijinjaTemplateExpander, StorageCall};
    use crate::domain::OutputFormat;
    use crate::testing::FakeEvaluator;
    use serde_json::{Value, json};

    type TestContext = AppContext<FakeEvaluator, MemoryObjectStorage, MinijinjaTemplateExpander>;

    fn context(storage: MemoryObjectStorage) -> TestContext {
        let evaluator = FakeEvaluator::with_json(r#"{"key": "value"}"#);
        evaluator.set_output(OutputFormat::Yaml, "key: value\n");
        AppContext::new(evaluator, storage, MinijinjaTemplateExpander::new())
    }

    fn service(upload: Value) -> ServiceDescription {
        ServiceDescription::from_value(json!({
            "service": "svc",
            "custom": { "pklConfig": { "file": "valid.pkl", "upload": upload } }
        }))
        .unwrap()
    }

    #[test]
    fn no_upload_block_makes_no_storage_calls() {
        let ctx = context(MemoryObjectStorage::with_buckets(["bucket"]));
        let service = ServiceDescription::from_value(json!({
            "service": "svc",
            "custom": { "pklConfig": { "file": "valid.pkl" } }
        }))
        .unwrap();

        assert_eq!(execute(&ctx, &service).unwrap(), UploadOutcome::Skipped);
        assert!(ctx.storage().calls().is_empty());
        assert!(ctx.evaluator().calls().is_empty());
    }

    #[test]
    fn absent_bucket_without_create_is_fatal() {
        let ctx = context(MemoryObjectStorage::new());

        let err = execute(&ctx, &service(json!({ "bucket": "bucket", "create": false })))
            .unwrap_err();

        assert_eq!(err.to_string(), "No buckets found matching bucket");
        assert_eq!(ctx.storage().calls(), vec![StorageCall::ListBuckets]);
        assert!(ctx.evaluator().calls().is_empty());
    }

    #[test]
    fn absent_bucket_is_created_then_uploaded() {
        let ctx = context(MemoryObjectStorage::new());

        let outcome = execute(&ctx, &service(json!({ "bucket": "bucket" }))).unwrap();

        assert_eq!(
            outcome,
            UploadOutcome::Uploaded {
                object: BucketObject { bucket: "bucket".into(), key: "svc.json".into() },
                created_bucket: true,
            }
        );
        assert_eq!(
            ctx.storage().calls(),
            vec![
                StorageCall::ListBuckets,
                StorageCall::CreateBucket { bucket: "bucket".into() },
                StorageCall::PutObject {
                    bucket: "bucket".into(),
                    key: "svc.json".into(),
                    body: br#"{"key": "value"}"#.to_vec(),
                },
            ]
        );
    }

    #[test]
    fn custom_format_sets_key_and_evaluation_format() {
        let ctx = context(MemoryObjectStorage::with_buckets(["bucket"]));

        execute(&ctx, &service(json!({ "bucket": "bucket", "format": "yaml" }))).unwrap();

        assert_eq!(ctx.evaluator().calls(), vec![("valid.pkl".to_string(), OutputFormat::Yaml)]);
        assert_eq!(ctx.storage().object("bucket", "svc.yaml"), Some(b"key: value\n".to_vec()));
    }

    #[test]
    fn missing_file_fails_before_storage_calls() {
        let ctx = context(MemoryObjectStorage::with_buckets(["bucket"]));
        let service = ServiceDescription::from_value(json!({
            "service": "svc",
            "custom": { "pklConfig": { "upload": { "bucket": "bucket" } } }
        }))
        .unwrap();

        assert!(matches!(execute(&ctx, &service), Err(AppError::MissingFile)));
        assert!(ctx.storage().calls().is_empty());
    }

    #[test]
    fn evaluation_failure_skips_put() {
        let ctx = context(MemoryObjectStorage::with_buckets(["bucket"]));
        ctx.evaluator().fail_with("boom");

        let err = execute(&ctx, &service(json!({ "bucket": "bucket" }))).unwrap_err();

        assert!(matches!(err, AppError::Evaluation { .. }));
        assert_eq!(ctx.storage().calls(), vec![StorageCall::ListBuckets]);
    }
}
