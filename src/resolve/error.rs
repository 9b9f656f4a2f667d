use std::fmt;
use thiserror::Error;

use crate::select::SelectError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Clusters,
    Services,
    Tasks,
    Containers,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceKind::Clusters => "clusters",
            ResourceKind::Services => "services",
            ResourceKind::Tasks => "tasks",
            ResourceKind::Containers => "containers",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("No {0} found")]
    NoResourcesFound(ResourceKind),

    #[error("Task {task_id} does not have execute command enabled")]
    IneligibleTask { task_id: String },

    #[error(transparent)]
    Select(#[from] SelectError),

    #[error(transparent)]
    Api(#[from] anyhow::Error),
}

impl ResolveError {
    /// Follow-up instructions printed after the error line, if any.
    pub fn remediation(&self) -> Option<&'static str> {
        match self {
            ResolveError::IneligibleTask { .. } => Some(EXECUTE_COMMAND_REMEDIATION),
            _ => None,
        }
    }
}

const EXECUTE_COMMAND_REMEDIATION: &str = "\
To connect to this task, the ECS service or task definition needs to have
the 'enable-execute-command' flag set to true.

You can enable this by:
• Updating your ECS service with --enable-execute-command flag
• Or updating your task definition and redeploying

AWS CLI example:
  aws ecs update-service --cluster CLUSTER --service SERVICE --enable-execute-command --force-new-deployment";
