//! ECS resource listing
//!
//! The rest of the crate talks to ECS only through [`EcsApi`], so the
//! resolution pipeline can run against the real service or an in-memory fake.

mod client;

pub use client::{AwsEcs, AwsScope};

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Page size used for every list call.
pub const PAGE_SIZE: i32 = 100;

/// DescribeTasks accepts at most this many task identifiers per request.
pub const DESCRIBE_BATCH_SIZE: usize = 100;

/// A running task as returned by DescribeTasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub task_arn: String,
    pub task_definition_arn: String,
    pub started_at: Option<DateTime<Utc>>,
    pub enable_execute_command: bool,
    pub containers: Vec<Container>,
}

impl Task {
    /// Only tasks with execute-command enabled can host an exec session.
    pub fn has_execute_command_enabled(&self) -> bool {
        self.enable_execute_command
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub name: String,
}

impl Container {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// List/describe operations the resolution pipeline needs from ECS.
///
/// Implementations return resources in the order the service reports them;
/// callers rely on that order for display.
#[async_trait]
pub trait EcsApi: Send + Sync {
    /// Full ARNs of every cluster in the configured region.
    async fn list_clusters(&self) -> Result<Vec<String>>;

    /// Full ARNs of every service in `cluster`.
    async fn list_services(&self, cluster: &str) -> Result<Vec<String>>;

    /// Full ARNs of the running tasks of `service` in `cluster`.
    async fn list_tasks(&self, cluster: &str, service: &str) -> Result<Vec<String>>;

    /// Descriptions for `task_arns`, in the same order as the input.
    async fn describe_tasks(&self, cluster: &str, task_arns: &[String]) -> Result<Vec<Task>>;
}
