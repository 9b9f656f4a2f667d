//! CLI argument definitions

use clap::{Args, Parser, Subcommand};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "ecs-exec")]
#[command(about = "Open an interactive shell in an ECS container")]
#[command(version = VERSION)]
#[command(
    long_about = "ecs-exec walks you through picking a cluster, service, task and container, \
    then opens an `aws ecs execute-command` session into it.\n\n\
    Pass --cluster / --service / --container to skip the matching prompts."
)]
pub struct Cli {
    #[command(flatten)]
    pub connect: ConnectArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check that the AWS CLI and Session Manager plugin are installed
    Check,

    /// Check for a newer release
    Update,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ConnectArgs {
    /// AWS region to search
    #[arg(short = 'r', long, env = "AWS_REGION")]
    pub region: Option<String>,

    /// AWS profile to use
    #[arg(short = 'p', long, env = "AWS_PROFILE")]
    pub profile: Option<String>,

    /// Cluster name or ARN, skips the cluster prompt
    #[arg(short = 'c', long)]
    pub cluster: Option<String>,

    /// Service name or ARN, skips the service prompt
    #[arg(short = 's', long)]
    pub service: Option<String>,

    /// Container to exec into; only needed when the task has several
    #[arg(long)]
    pub container: Option<String>,

    /// Command to run in the container (defaults to /bin/sh)
    #[arg(long = "command", value_name = "CMD")]
    pub shell_command: Option<String>,

    /// Print the execute-command invocation instead of running it
    #[arg(long)]
    pub print: bool,
}
