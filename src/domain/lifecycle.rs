//! Lifecycle events and the command surface exposed to the host.

use serde::Serialize;

/// Direct invocation of `pkl upload`.
pub const PKL_UPLOAD_EVENT: &str = "pkl:upload:upload";
/// Fired by the host right before deployment artifacts are built.
pub const BEFORE_PACKAGE_EVENT: &str = "before:package:createDeploymentArtifacts";
/// Fired by the host after the service stack has been removed.
pub const AFTER_REMOVE_EVENT: &str = "after:remove:remove";

/// What a lifecycle hook does when fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HookAction {
    Upload,
    Remove,
}

/// Host event bindings, in registration order.
pub const HOOK_BINDINGS: [(&str, HookAction); 3] = [
    (PKL_UPLOAD_EVENT, HookAction::Upload),
    (BEFORE_PACKAGE_EVENT, HookAction::Upload),
    (AFTER_REMOVE_EVENT, HookAction::Remove),
];

/// A command registered with the host CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandSpec {
    pub name: &'static str,
    pub usage: &'static str,
    pub lifecycle_events: Vec<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<CommandSpec>,
}

/// The `pkl` command group with its `upload` subcommand.
pub fn plugin_commands() -> Vec<CommandSpec> {
    vec![CommandSpec {
        name: "pkl",
        usage: "Manage PKL configuration",
        lifecycle_events: vec!["pkl"],
        commands: vec![CommandSpec {
            name: "upload",
            usage: "Upload PKL configuration to S3 bucket",
            lifecycle_events: vec!["upload"],
            commands: Vec::new(),
        }],
    }]
}
