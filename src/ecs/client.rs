//! `EcsApi` backed by the AWS SDK

use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_ecs::Client;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::{debug, warn};

use super::{Container, EcsApi, Task, DESCRIBE_BATCH_SIZE, PAGE_SIZE};

/// Region and profile the client is built for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwsScope {
    pub region: String,
    pub profile: Option<String>,
}

pub struct AwsEcs {
    client: Client,
}

impl AwsEcs {
    /// Builds a client for `scope`, resolving credentials through the usual
    /// AWS provider chain for the chosen profile.
    pub async fn connect(scope: &AwsScope) -> Self {
        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).region(Region::new(scope.region.clone()));

        if let Some(profile) = &scope.profile {
            loader = loader.profile_name(profile);
        }

        let config = loader.load().await;
        debug!(
            "ECS client ready (region={}, profile={})",
            scope.region,
            scope.profile.as_deref().unwrap_or("<ambient>")
        );

        Self {
            client: Client::new(&config),
        }
    }
}

#[async_trait]
impl EcsApi for AwsEcs {
    async fn list_clusters(&self) -> Result<Vec<String>> {
        let mut arns = Vec::new();
        let mut next_token = None;

        loop {
            let resp = self
                .client
                .list_clusters()
                .max_results(PAGE_SIZE)
                .set_next_token(next_token)
                .send()
                .await
                .context("Failed to list clusters")?;

            arns.extend(resp.cluster_arns().iter().cloned());
            next_token = resp.next_token().map(str::to_string);
            if next_token.is_none() {
                break;
            }
        }

        Ok(arns)
    }

    async fn list_services(&self, cluster: &str) -> Result<Vec<String>> {
        let mut arns = Vec::new();
        let mut next_token = None;

        loop {
            let resp = self
                .client
                .list_services()
                .cluster(cluster)
                .max_results(PAGE_SIZE)
                .set_next_token(next_token)
                .send()
                .await
                .with_context(|| format!("Failed to list services in cluster {}", cluster))?;

            arns.extend(resp.service_arns().iter().cloned());
            next_token = resp.next_token().map(str::to_string);
            if next_token.is_none() {
                break;
            }
        }

        Ok(arns)
    }

    async fn list_tasks(&self, cluster: &str, service: &str) -> Result<Vec<String>> {
        let mut arns = Vec::new();
        let mut next_token = None;

        loop {
            let resp = self
                .client
                .list_tasks()
                .cluster(cluster)
                .service_name(service)
                .max_results(PAGE_SIZE)
                .set_next_token(next_token)
                .send()
                .await
                .with_context(|| format!("Failed to list tasks for service {}", service))?;

            arns.extend(resp.task_arns().iter().cloned());
            next_token = resp.next_token().map(str::to_string);
            if next_token.is_none() {
                break;
            }
        }

        Ok(arns)
    }

    async fn describe_tasks(&self, cluster: &str, task_arns: &[String]) -> Result<Vec<Task>> {
        let mut described: HashMap<String, Task> = HashMap::new();

        for batch in task_arns.chunks(DESCRIBE_BATCH_SIZE) {
            let resp = self
                .client
                .describe_tasks()
                .cluster(cluster)
                .set_tasks(Some(batch.to_vec()))
                .send()
                .await
                .context("Failed to describe tasks")?;

            for failure in resp.failures() {
                warn!(
                    "DescribeTasks failure for {}: {}",
                    failure.arn().unwrap_or("unknown"),
                    failure.reason().unwrap_or("no reason given")
                );
            }

            for task in resp.tasks() {
                let task = convert_task(task);
                described.insert(task.task_arn.clone(), task);
            }
        }

        // DescribeTasks does not promise to answer in request order
        Ok(task_arns
            .iter()
            .filter_map(|arn| described.remove(arn))
            .collect())
    }
}

fn convert_task(task: &aws_sdk_ecs::types::Task) -> Task {
    Task {
        task_arn: task.task_arn().unwrap_or_default().to_string(),
        task_definition_arn: task.task_definition_arn().unwrap_or_default().to_string(),
        started_at: task
            .started_at()
            .and_then(|ts| DateTime::<Utc>::from_timestamp(ts.secs(), ts.subsec_nanos())),
        enable_execute_command: task.enable_execute_command(),
        containers: task
            .containers()
            .iter()
            .filter_map(|c| c.name().map(Container::new))
            .collect(),
    }
}
