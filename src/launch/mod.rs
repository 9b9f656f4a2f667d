//! Composes the `aws ecs execute-command` invocation and runs or prints it

use anyhow::{Context, Result};
use crossterm::style::Stylize;
use std::process::{Command, ExitStatus};
use tracing::debug;

const AWS_PROGRAM: &str = "aws";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchMode {
    /// Write the command line to stdout and exit 0.
    Print,
    /// Run the command attached to this terminal.
    Execute,
}

/// The exact argument vector handed to the AWS CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecInvocation {
    args: Vec<String>,
}

impl ExecInvocation {
    pub fn new(cluster: &str, task_arn: &str, container: &str, shell_command: &str) -> Self {
        let args = [
            "ecs",
            "execute-command",
            "--cluster",
            cluster,
            "--task",
            task_arn,
            "--container",
            container,
            "--interactive",
            "--command",
            shell_command,
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        Self { args }
    }

    pub fn with_region(mut self, region: &str) -> Self {
        self.args.extend(["--region".to_string(), region.to_string()]);
        self
    }

    pub fn with_profile(mut self, profile: Option<&str>) -> Self {
        if let Some(profile) = profile {
            self.args.extend(["--profile".to_string(), profile.to_string()]);
        }
        self
    }

    pub fn program(&self) -> &str {
        AWS_PROGRAM
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Shell-ready command line, quoting arguments that need it.
    pub fn command_line(&self) -> String {
        std::iter::once(AWS_PROGRAM.to_string())
            .chain(self.args.iter().map(|a| shell_quote(a)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

pub fn build_command(cluster: &str, task_arn: &str, container: &str, shell_command: &str) -> String {
    ExecInvocation::new(cluster, task_arn, container, shell_command).command_line()
}

fn shell_quote(arg: &str) -> String {
    let is_plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=@%+,".contains(c));
    if is_plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

/// Prints or runs `invocation`, returning the exit code to leave with.
pub fn launch(invocation: &ExecInvocation, mode: LaunchMode) -> Result<i32> {
    match mode {
        LaunchMode::Print => {
            println!("{}", invocation.command_line());
            Ok(0)
        }
        LaunchMode::Execute => {
            debug!("Running {}", invocation.command_line());
            let status = Command::new(invocation.program())
                .args(invocation.args())
                .status()
                .with_context(|| format!("Failed to start {}", invocation.program()))?;

            let code = exit_code(status);
            eprintln!("{}", format!("[shell] terminated: {}", code).dark_grey());
            Ok(code)
        }
    }
}

fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}

#[cfg(test)]
mod tests {
    use super::*;

    const TASK_ARN: &str = "arn:aws:ecs:us-east-1:123456789012:task/prod/abc123";

    #[test]
    fn test_build_command() {
        assert_eq!(
            build_command("prod", TASK_ARN, "app", "/bin/sh"),
            format!(
                "aws ecs execute-command --cluster prod --task {} --container app --interactive --command /bin/sh",
                TASK_ARN
            )
        );
    }

    #[test]
    fn test_command_with_spaces_is_quoted() {
        let line = build_command("prod", TASK_ARN, "app", "bash -l");
        assert!(line.ends_with("--command 'bash -l'"));

        let line = build_command("prod", TASK_ARN, "app", "echo 'hi'");
        assert!(line.ends_with(r"--command 'echo '\''hi'\'''"));
    }

    #[test]
    fn test_region_and_profile_are_appended() {
        let invocation = ExecInvocation::new("prod", TASK_ARN, "app", "/bin/sh")
            .with_region("eu-west-1")
            .with_profile(Some("staging"));
        assert!(invocation
            .command_line()
            .ends_with("--region eu-west-1 --profile staging"));

        let invocation = ExecInvocation::new("prod", TASK_ARN, "app", "/bin/sh")
            .with_region("eu-west-1")
            .with_profile(None);
        assert!(!invocation.command_line().contains("--profile"));
    }

    #[test]
    fn test_args_are_unquoted() {
        let invocation = ExecInvocation::new("prod", TASK_ARN, "app", "bash -l");
        assert_eq!(invocation.program(), "aws");
        assert_eq!(invocation.args().last().map(String::as_str), Some("bash -l"));
        assert_eq!(invocation.args()[0], "ecs");
    }

    #[test]
    fn test_print_mode_exits_zero() {
        let invocation = ExecInvocation::new("prod", TASK_ARN, "app", "/bin/sh");
        assert_eq!(launch(&invocation, LaunchMode::Print).unwrap(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_code_propagates() {
        let status = Command::new("sh").args(["-c", "exit 3"]).status().unwrap();
        assert_eq!(exit_code(status), 3);
    }
}
