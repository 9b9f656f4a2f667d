//! Cluster → service → task → container resolution
//!
//! Each stage issues its listing call, then either short-circuits (value
//! given up front, or a single candidate) or asks the selector. Every stage
//! fails with [`ResolveError::NoResourcesFound`] on an empty listing, and a
//! task without execute-command enabled is never returned.

mod error;
pub mod format;

pub use error::{ResolveError, ResourceKind};

use tracing::debug;

use crate::ecs::{EcsApi, Task};
use crate::select::{Choice, Selector};

pub struct Resolver<'a, A: ?Sized, S> {
    api: &'a A,
    selector: &'a mut S,
}

impl<'a, A, S> Resolver<'a, A, S>
where
    A: EcsApi + ?Sized,
    S: Selector,
{
    pub fn new(api: &'a A, selector: &'a mut S) -> Self {
        Self { api, selector }
    }

    /// Returns `cluster` unchanged when given, without checking it exists.
    pub async fn resolve_cluster(&mut self, cluster: Option<&str>) -> Result<String, ResolveError> {
        if let Some(cluster) = cluster {
            debug!("Using cluster {} from arguments", cluster);
            return Ok(cluster.to_string());
        }

        let arns = self.api.list_clusters().await?;
        debug!("Found {} clusters", arns.len());
        if arns.is_empty() {
            return Err(ResolveError::NoResourcesFound(ResourceKind::Clusters));
        }

        let choices: Vec<_> = arns
            .into_iter()
            .map(|arn| Choice::new(format::cluster_name(&arn), arn))
            .collect();
        Ok(self.selector.select("Cluster:", &choices)?)
    }

    /// Returns `service` unchanged when given, without checking it exists.
    pub async fn resolve_service(
        &mut self,
        cluster: &str,
        service: Option<&str>,
    ) -> Result<String, ResolveError> {
        if let Some(service) = service {
            debug!("Using service {} from arguments", service);
            return Ok(service.to_string());
        }

        let arns = self.api.list_services(cluster).await?;
        debug!("Found {} services in {}", arns.len(), cluster);
        if arns.is_empty() {
            return Err(ResolveError::NoResourcesFound(ResourceKind::Services));
        }

        let choices: Vec<_> = arns
            .into_iter()
            .map(|arn| Choice::new(format::service_name(&arn), arn))
            .collect();
        Ok(self.selector.select("Service:", &choices)?)
    }

    /// Picks one running task of `service`, auto-selecting a lone task, and
    /// rejects it if execute-command is disabled.
    pub async fn resolve_task(&mut self, cluster: &str, service: &str) -> Result<Task, ResolveError> {
        let arns = self.api.list_tasks(cluster, service).await?;
        debug!("Found {} tasks for {}", arns.len(), service);
        if arns.is_empty() {
            return Err(ResolveError::NoResourcesFound(ResourceKind::Tasks));
        }

        let mut tasks = self.api.describe_tasks(cluster, &arns).await?;
        let task = match tasks.len() {
            // Tasks can stop between the list and describe calls
            0 => return Err(ResolveError::NoResourcesFound(ResourceKind::Tasks)),
            1 => {
                let task = tasks.remove(0);
                debug!("Auto-selected only task {}", task.task_arn);
                task
            }
            _ => {
                let choices: Vec<_> = tasks
                    .into_iter()
                    .enumerate()
                    .map(|(idx, task)| Choice::new(format::task_label(&task, idx), task))
                    .collect();
                self.selector.select("Task:", &choices)?
            }
        };

        validate_task(task)
    }

    /// Picks a container of `task`, auto-selecting a lone container.
    pub fn resolve_container(&mut self, task: &Task) -> Result<String, ResolveError> {
        match task.containers.as_slice() {
            [] => Err(ResolveError::NoResourcesFound(ResourceKind::Containers)),
            [only] => {
                debug!("Auto-selected only container {}", only.name);
                Ok(only.name.clone())
            }
            containers => {
                let choices: Vec<_> = containers
                    .iter()
                    .map(|c| Choice::new(c.name.clone(), c.name.clone()))
                    .collect();
                Ok(self.selector.select("Container:", &choices)?)
            }
        }
    }
}

/// Passes `task` through only if it can host an execute-command session.
pub fn validate_task(task: Task) -> Result<Task, ResolveError> {
    if !task.has_execute_command_enabled() {
        return Err(ResolveError::IneligibleTask {
            task_id: format::task_id(&task.task_arn),
        });
    }
    Ok(task)
}
