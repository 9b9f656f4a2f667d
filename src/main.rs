//! ecs-exec - open a shell in an ECS container without the lookup legwork

use clap::Parser;

use ecs_exec::cli::{self, Cli, EXIT_FAILURE};

#[tokio::main]
async fn main() {
    // Initialize tracing
    if std::env::var("ECS_EXEC_DEBUG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter("ecs_exec=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    let cli = Cli::parse();

    let code = match cli::run(cli).await {
        Ok(code) => code,
        Err(e) => {
            cli::report_error(&e);
            EXIT_FAILURE
        }
    };

    std::process::exit(code);
}
