//! Remove the uploaded PKL configuration from its bucket.

use tracing::{info, warn};

use super::bucket::bucket_exists;
use crate::app::AppContext;
use crate::domain::{AppError, BucketObject, ServiceDescription};
use crate::ports::{ConfigEvaluator, ObjectStorage, TemplateExpander};

#[derive(Debug, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// No `upload` block is configured.
    Skipped,
    /// The bucket does not exist, so there is nothing to delete.
    BucketMissing { bucket: String },
    Removed { object: BucketObject },
}

pub fn execute<E, S, T>(
    ctx: &AppContext<E, S, T>,
    service: &ServiceDescription,
) -> Result<RemoveOutcome, AppError>
where
    E: ConfigEvaluator,
    S: ObjectStorage,
    T: TemplateExpander,
{
    let config = service.pkl_config()?;
    let Some(upload) = config.upload.as_ref() else {
        info!("No upload configuration found");
        return Ok(RemoveOutcome::Skipped);
    };
    let object = BucketObject::new(&upload.bucket, service.service_name()?, upload.format);

    info!("Removing PKL configuration from S3 bucket");

    if !bucket_exists(ctx.storage(), &upload.bucket)? {
        warn!("No buckets found matching {}", upload.bucket);
        return Ok(RemoveOutcome::BucketMissing { bucket: upload.bucket.clone() });
    }

    ctx.storage().delete_object(&object.bucket, &object.key)?;
    info!("Removed {} from bucket {}", object.key, object.bucket);

    Ok(RemoveOutcome::Removed { object })
}
