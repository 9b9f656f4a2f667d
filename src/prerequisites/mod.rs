//! Checks that the client tooling for execute-command sessions is installed
//!
//! A passing result is cached on disk for a week so the tool checks don't run on
//! every invocation.

mod cache;

pub use cache::{PrerequisiteCache, CACHE_TTL_DAYS};

use anyhow::Result;
use chrono::{DateTime, Utc};
use crossterm::style::Stylize;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing::{debug, warn};

use crate::config::get_app_dir;

const CACHE_FILE: &str = "prerequisites-cache.json";

/// Tools required to open an execute-command session, in check order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prerequisite {
    AwsCli,
    SessionManagerPlugin,
}

impl Prerequisite {
    pub const ALL: [Prerequisite; 2] = [Prerequisite::AwsCli, Prerequisite::SessionManagerPlugin];

    pub fn program(&self) -> &'static str {
        match self {
            Prerequisite::AwsCli => "aws",
            Prerequisite::SessionManagerPlugin => "session-manager-plugin",
        }
    }

    pub fn args(&self) -> &'static [&'static str] {
        &["--version"]
    }

    pub fn describe_missing(&self) -> String {
        match self {
            Prerequisite::AwsCli => format!(
                "{}\n\n\
                 To use this tool, you need to install the AWS CLI:\n\
                 {}\n\n\
                 Installation options:\n\
                 • macOS: brew install awscli\n\
                 • Windows: Download installer from AWS\n\
                 • Linux: pip install awscli",
                "✗ AWS CLI is not installed or not accessible".red(),
                "https://aws.amazon.com/cli/".blue()
            ),
            Prerequisite::SessionManagerPlugin => format!(
                "{}\n\n\
                 To use this tool, you need to install the Session Manager plugin:\n\
                 {}\n\n\
                 Installation options:\n\
                 • macOS: Download and install the .pkg file\n\
                 • Windows: Download and run the .msi installer\n\
                 • Linux: Download and install the .deb or .rpm package",
                "✗ Session Manager plugin is not installed".red(),
                "https://docs.aws.amazon.com/systems-manager/latest/userguide/session-manager-working-with-install-plugin.html"
                    .blue()
            ),
        }
    }
}

/// Runs `program args` quietly; spawn failures count as "not installed".
pub fn check_command(program: &str, args: &[&str]) -> bool {
    Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

pub fn is_installed(prerequisite: Prerequisite) -> bool {
    check_command(prerequisite.program(), prerequisite.args())
}

pub fn cache_path() -> Result<PathBuf> {
    Ok(get_app_dir()?.join(CACHE_FILE))
}

pub struct PrerequisiteGate<P> {
    cache_path: Option<PathBuf>,
    is_present: P,
}

impl<P> PrerequisiteGate<P>
where
    P: Fn(Prerequisite) -> bool,
{
    /// `cache_path = None` disables caching entirely.
    pub fn new(cache_path: Option<PathBuf>, is_present: P) -> Self {
        Self {
            cache_path,
            is_present,
        }
    }

    /// Uses a fresh cached pass if there is one, otherwise runs the tool checks.
    pub fn check(&self) -> bool {
        self.report(self.evaluate(Utc::now(), true))
    }

    /// Always runs the tool checks, refreshing the cache on success.
    pub fn check_uncached(&self) -> bool {
        self.report(self.evaluate(Utc::now(), false))
    }

    /// Returns the first missing prerequisite, if any.
    pub fn evaluate(&self, now: DateTime<Utc>, use_cache: bool) -> Result<(), Prerequisite> {
        if use_cache {
            if let Some(path) = &self.cache_path {
                match PrerequisiteCache::load(path) {
                    Some(cache) if cache.is_valid(now) => {
                        debug!("Prerequisites satisfied from cache {}", path.display());
                        return Ok(());
                    }
                    Some(_) => debug!("Prerequisite cache is stale, re-checking"),
                    None => debug!("No usable prerequisite cache"),
                }
            }
        }

        for prerequisite in Prerequisite::ALL {
            if !(self.is_present)(prerequisite) {
                debug!("Prerequisite missing: {}", prerequisite.program());
                return Err(prerequisite);
            }
        }

        if let Some(path) = &self.cache_path {
            if let Err(e) = PrerequisiteCache::passed_at(now).save(path) {
                warn!("Failed to save prerequisite cache: {}", e);
            }
        }

        Ok(())
    }

    fn report(&self, outcome: Result<(), Prerequisite>) -> bool {
        match outcome {
            Ok(()) => {
                eprintln!("{}", "✓ Prerequisites check passed".green());
                true
            }
            Err(missing) => {
                eprintln!("{}", missing.describe_missing());
                false
            }
        }
    }
}

/// Checks the real tools, using the cache in the app directory.
pub fn check_prerequisites() -> bool {
    eprintln!("{}", "Checking prerequisites...".dark_grey());

    let cache_path = match cache_path() {
        Ok(path) => Some(path),
        Err(e) => {
            warn!("Prerequisite cache unavailable: {}", e);
            None
        }
    };

    PrerequisiteGate::new(cache_path, is_installed).check()
}
