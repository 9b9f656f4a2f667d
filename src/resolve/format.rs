//! Display labels derived from ECS ARNs
//!
//! Labels are for display only and are never used to look anything up.
//! Identifiers that don't look like ARNs are used as-is rather than rejected.

use chrono::{DateTime, Local, TimeZone};
use std::fmt::Display;

use crate::ecs::Task;

pub const EXEC_ENABLED_MARKER: &str = "✓ exec enabled";
pub const EXEC_DISABLED_MARKER: &str = "✗ exec disabled";

const STARTED_AT_FORMAT: &str = "%b %-d, %I:%M %p";

/// Text after the last `:` of `arn` with the first occurrence of `prefix` removed.
pub fn short_name(arn: &str, prefix: &str) -> String {
    let tail = arn.rsplit(':').next().unwrap_or(arn);
    tail.replacen(prefix, "", 1)
}

pub fn cluster_name(arn: &str) -> String {
    short_name(arn, "cluster/")
}

pub fn service_name(arn: &str) -> String {
    short_name(arn, "service/")
}

/// `arn:aws:ecs:<region>:<account>:task/<cluster>/<id>` becomes `<cluster>/<id>`.
pub fn task_id(task_arn: &str) -> String {
    short_name(task_arn, "task/")
}

/// Revision of a task definition ARN (`...:task-definition/app:7` gives `7`).
pub fn task_revision(task_definition_arn: &str) -> String {
    short_name(task_definition_arn, "task-definition/")
}

pub fn format_started_at<Tz>(started_at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    started_at.format(STARTED_AT_FORMAT).to_string()
}

pub fn exec_marker(enabled: bool) -> &'static str {
    if enabled {
        EXEC_ENABLED_MARKER
    } else {
        EXEC_DISABLED_MARKER
    }
}

/// Picker label for the task at zero-based `index` of a listing.
pub fn task_label(task: &Task, index: usize) -> String {
    let started = task
        .started_at
        .map(|ts| format_started_at(&ts.with_timezone(&Local)))
        .unwrap_or_else(|| "unknown".to_string());

    format!(
        "#{} {} (v{}) {} - started {}",
        index + 1,
        task_id(&task.task_arn),
        task_revision(&task.task_definition_arn),
        exec_marker(task.has_execute_command_enabled()),
        started
    )
}
