//! Plugin entry point: construction-time merge plus lifecycle hook dispatch.

use serde::Serialize;
use tracing::debug;

use super::AppContext;
use super::commands::apply::{self, ApplyOutcome};
use super::commands::remove::{self, RemoveOutcome};
use super::commands::upload::{self, UploadOutcome};
use crate::domain::lifecycle::{HOOK_BINDINGS, plugin_commands};
use crate::domain::{AppError, CommandSpec, HookAction, ServiceDescription};
use crate::ports::{ConfigEvaluator, ObjectStorage, ServiceHost, TemplateExpander};

/// Options the host passes to the plugin constructor.
#[derive(Debug, Clone, Copy, Default)]
pub struct PluginOptions {
    /// Skip the construction-time merge.
    pub test: bool,
}

/// Result of a dispatched lifecycle hook.
#[derive(Debug, PartialEq, Eq)]
pub enum HookOutcome {
    Upload(UploadOutcome),
    Remove(RemoveOutcome),
}

type HookHandler<E, S, T> =
    fn(&AppContext<E, S, T>, &ServiceDescription) -> Result<HookOutcome, AppError>;

/// Commands and hook bindings advertised to the host.
#[derive(Debug, Clone, Serialize)]
pub struct PluginManifest {
    pub commands: Vec<CommandSpec>,
    pub hooks: Vec<HookBinding>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HookBinding {
    pub event: &'static str,
    pub action: HookAction,
}

pub struct PklPlugin<E: ConfigEvaluator, S: ObjectStorage, T: TemplateExpander> {
    ctx: AppContext<E, S, T>,
    hooks: Vec<(&'static str, HookHandler<E, S, T>)>,
    applied: Option<ApplyOutcome>,
}

impl<E, S, T> PklPlugin<E, S, T>
where
    E: ConfigEvaluator,
    S: ObjectStorage,
    T: TemplateExpander,
{
    /// Construct the plugin, merging PKL values into `host` unless `options.test` is set.
    pub fn new(
        ctx: AppContext<E, S, T>,
        host: &mut impl ServiceHost,
        options: PluginOptions,
    ) -> Result<Self, AppError> {
        let applied = if options.test { None } else { Some(apply::execute(&ctx, host)?) };

        let hooks = HOOK_BINDINGS
            .iter()
            .map(|&(event, action)| (event, handler_for::<E, S, T>(action)))
            .collect();

        Ok(Self { ctx, hooks, applied })
    }

    pub fn context(&self) -> &AppContext<E, S, T> {
        &self.ctx
    }

    /// Outcome of the construction-time merge, if it ran.
    pub fn applied(&self) -> Option<&ApplyOutcome> {
        self.applied.as_ref()
    }

    /// Run the merge explicitly, e.g. after constructing in test mode.
    pub fn apply(&self, host: &mut impl ServiceHost) -> Result<ApplyOutcome, AppError> {
        apply::execute(&self.ctx, host)
    }

    pub fn hook_events(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.hooks.iter().map(|(event, _)| *event)
    }

    /// Dispatch a host lifecycle event to its registered handler.
    pub fn run_hook(
        &self,
        event: &str,
        service: &ServiceDescription,
    ) -> Result<HookOutcome, AppError> {
        let (_, handler) = self
            .hooks
            .iter()
            .find(|(name, _)| *name == event)
            .ok_or_else(|| AppError::UnknownHook(event.to_string()))?;

        debug!("Running hook {}", event);
        handler(&self.ctx, service)
    }

    pub fn manifest(&self) -> PluginManifest {
        PluginManifest {
            commands: plugin_commands(),
            hooks: HOOK_BINDINGS
                .iter()
                .map(|&(event, action)| HookBinding { event, action })
                .collect(),
        }
    }
}

fn handler_for<E, S, T>(action: HookAction) -> HookHandler<E, S, T>
where
    E: ConfigEvaluator,
    S: ObjectStorage,
    T: TemplateExpander,
{
    match action {
        HookAction::Upload => upload_hook::<E, S, T>,
        HookAction::Remove => remove_hook::<E, S, T>,
    }
}

fn upload_hook<E, S, T>(
    ctx: &AppContext<E, S, T>,
    service: &ServiceDescription,
) -> Result<HookOutcome, AppError>
where
    E: ConfigEvaluator,
    S: ObjectStorage,
    T: TemplateExpander,
{
    upload::execute(ctx, service).map(HookOutcome::Upload)
}

fn remove_hook<E, S, T>(
    ctx: &AppContext<E, S, T>,
    service: &ServiceDescription,
) -> Result<HookOutcome, AppError>
where
    E: ConfigEvaluator,
    S: ObjectStorage,
    T: TemplateExpander,
{
    remove::execute(ctx, service).map(HookOutcome::Remove)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{
        MemoryObjectStorage, MemoryServiceHost, MinijinjaTemplateExpander, StorageCall,
    };
    use crate::domain::BucketObject;
    use crate::domain::lifecycle::{AFTER_REMOVE_EVENT, BEFORE_PACKAGE_EVENT, PKL_UPLOAD_EVENT};
    use crate::testing::FakeEvaluator;
    use serde_json::json;

    fn host() -> MemoryServiceHost {
        MemoryServiceHost::from_value(json!({
            "service": "svc",
            "custom": {
                "pklConfig": { "file": "valid.pkl", "upload": { "bucket": "bucket" } },
                "stage": "{{pkl:stage}}"
            }
        }))
        .unwrap()
    }

    fn context() -> AppContext<FakeEvaluator, MemoryObjectStorage, MinijinjaTemplateExpander> {
        AppContext::new(
            FakeEvaluator::with_json(r#"{"stage": "prod"}"#),
            MemoryObjectStorage::with_buckets(["bucket"]),
            MinijinjaTemplateExpander::new(),
        )
    }

    #[test]
    fn construction_applies_configuration() {
        let mut host = host();
        let plugin = PklPlugin::new(context(), &mut host, PluginOptions::default()).unwrap();

        assert_eq!(plugin.applied().unwrap().spliced, vec!["service", "custom"]);
        assert_eq!(host.service().get("custom").unwrap()["stage"], json!("prod"));
    }

    #[test]
    fn test_mode_skips_construction_merge() {
        let mut host = host();
        let plugin =
            PklPlugin::new(context(), &mut host, PluginOptions { test: true }).unwrap();

        assert!(plugin.applied().is_none());
        assert!(host.extensions().is_empty());
        assert!(plugin.context().evaluator().calls().is_empty());
    }

    #[test]
    fn registers_all_lifecycle_hooks() {
        let mut host = host();
        let plugin =
            PklPlugin::new(context(), &mut host, PluginOptions { test: true }).unwrap();

        let events: Vec<&str> = plugin.hook_events().collect();
        assert_eq!(events, vec![PKL_UPLOAD_EVENT, BEFORE_PACKAGE_EVENT, AFTER_REMOVE_EVENT]);
    }

    #[test]
    fn hooks_dispatch_to_upload_and_remove() {
        let mut host = host();
        let plugin =
            PklPlugin::new(context(), &mut host, PluginOptions { test: true }).unwrap();
        let object = BucketObject { bucket: "bucket".into(), key: "svc.json".into() };

        let uploaded = plugin.run_hook(BEFORE_PACKAGE_EVENT, host.service()).unwrap();
        assert_eq!(
            uploaded,
            HookOutcome::Upload(UploadOutcome::Uploaded {
                object: object.clone(),
                created_bucket: false
            })
        );

        let removed = plugin.run_hook(AFTER_REMOVE_EVENT, host.service()).unwrap();
        assert_eq!(removed, HookOutcome::Remove(RemoveOutcome::Removed { object }));
        assert!(plugin.context().storage().calls().contains(&StorageCall::DeleteObject {
            bucket: "bucket".into(),
            key: "svc.json".into()
        }));
    }

    #[test]
    fn unknown_hook_is_rejected() {
        let mut host = host();
        let plugin =
            PklPlugin::new(context(), &mut host, PluginOptions { test: true }).unwrap();

        let err = plugin.run_hook("before:deploy:deploy", host.service()).unwrap_err();
        assert!(matches!(err, AppError::UnknownHook(event) if event == "before:deploy:deploy"));
    }

    #[test]
    fn manifest_lists_commands_and_hooks() {
        let mut host = host();
        let plugin =
            PklPlugin::new(context(), &mut host, PluginOptions { test: true }).unwrap();

        let manifest = serde_json::to_value(plugin.manifest()).unwrap();
        assert_eq!(manifest["commands"][0]["name"], "pkl");
        assert_eq!(manifest["hooks"][2]["event"], AFTER_REMOVE_EVENT);
        assert_eq!(manifest["hooks"][2]["action"], "remove");
    }
}
