//! Default command: resolve a container and open a shell in it

use anyhow::Result;
use tracing::debug;

use super::definition::ConnectArgs;
use super::EXIT_FAILURE;
use crate::config::{Config, DEFAULT_COMMAND};
use crate::ecs::{AwsEcs, AwsScope};
use crate::launch::{launch, ExecInvocation, LaunchMode};
use crate::prerequisites::check_prerequisites;
use crate::resolve::Resolver;
use crate::select::TerminalSelector;
use crate::update::{print_update_notice, spawn_update_check};

/// Flag values merged with the user's config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectSettings {
    pub scope: AwsScope,
    pub shell_command: String,
    pub mode: LaunchMode,
}

impl ConnectSettings {
    pub fn from_args(args: &ConnectArgs, config: &Config) -> Self {
        let region = args
            .region
            .clone()
            .unwrap_or_else(|| config.region().to_string());
        let profile = args.profile.clone().or_else(|| config.default_profile.clone());
        let shell_command = args
            .shell_command
            .clone()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| {
                if config.default_command.trim().is_empty() {
                    DEFAULT_COMMAND.to_string()
                } else {
                    config.default_command.clone()
                }
            });

        Self {
            scope: AwsScope { region, profile },
            shell_command,
            mode: if args.print {
                LaunchMode::Print
            } else {
                LaunchMode::Execute
            },
        }
    }
}

pub async fn run(args: ConnectArgs) -> Result<i32> {
    let config = Config::load_or_default();
    let settings = ConnectSettings::from_args(&args, &config);
    debug!("Connect settings: {:?}", settings);

    // Runs alongside the session; only a result that is already in gets shown
    let update_rx = spawn_update_check();

    // Printing doesn't need the CLI tooling locally
    if settings.mode == LaunchMode::Execute && !check_prerequisites() {
        return Ok(EXIT_FAILURE);
    }

    let api = AwsEcs::connect(&settings.scope).await;
    let mut selector = TerminalSelector::default();
    let mut resolver = Resolver::new(&api, &mut selector);

    let cluster = resolver.resolve_cluster(args.cluster.as_deref()).await?;
    let service = resolver
        .resolve_service(&cluster, args.service.as_deref())
        .await?;
    let task = resolver.resolve_task(&cluster, &service).await?;
    let container = match args.container {
        Some(container) => container,
        None => resolver.resolve_container(&task)?,
    };

    let invocation = ExecInvocation::new(&cluster, &task.task_arn, &container, &settings.shell_command)
        .with_region(&settings.scope.region)
        .with_profile(settings.scope.profile.as_deref());

    let code = launch(&invocation, settings.mode)?;

    print_update_notice(update_rx);

    Ok(code)
}
