//! Update check against the crates.io registry

use anyhow::Result;
use crossterm::style::Stylize;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tokio::sync::oneshot::error::TryRecvError;
use tracing::{debug, warn};

use crate::config::{get_app_dir, get_update_settings};

const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
const REGISTRY_API: &str = "https://crates.io/api/v1/crates/";

#[derive(Debug, Clone)]
pub struct UpdateInfo {
    pub available: bool,
    pub current_version: String,
    pub latest_version: String,
}

#[derive(Debug, Deserialize)]
struct CrateResponse {
    #[serde(rename = "crate")]
    krate: CrateInfo,
}

#[derive(Debug, Deserialize)]
struct CrateInfo {
    #[serde(default)]
    max_stable_version: Option<String>,
    max_version: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct UpdateCache {
    checked_at: chrono::DateTime<chrono::Utc>,
    latest_version: String,
}

fn cache_path() -> Result<PathBuf> {
    Ok(get_app_dir()?.join("update_cache.json"))
}

fn load_cache() -> Option<UpdateCache> {
    let path = cache_path().ok()?;
    let content = fs::read_to_string(&path).ok()?;
    serde_json::from_str(&content).ok()
}

fn save_cache(cache: &UpdateCache) -> Result<()> {
    let path = cache_path()?;
    let content = serde_json::to_string_pretty(cache)?;
    fs::write(&path, content)?;
    Ok(())
}

pub async fn check_for_update(current_version: &str, force: bool) -> Result<UpdateInfo> {
    let settings = get_update_settings();

    if !force {
        if let Some(cache) = load_cache() {
            let age = chrono::Utc::now() - cache.checked_at;
            let max_age = chrono::Duration::hours(settings.check_interval_hours as i64);

            if age < max_age {
                let available = is_newer_version(&cache.latest_version, current_version);
                return Ok(UpdateInfo {
                    available,
                    current_version: current_version.to_string(),
                    latest_version: cache.latest_version,
                });
            }
        }
    }

    let client = reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .timeout(std::time::Duration::from_secs(5))
        .build()?;

    let latest_version = fetch_latest_version(&client).await?;

    let cache = UpdateCache {
        checked_at: chrono::Utc::now(),
        latest_version: latest_version.clone(),
    };
    if let Err(e) = save_cache(&cache) {
        warn!("Failed to save update cache: {}", e);
    }

    Ok(UpdateInfo {
        available: is_newer_version(&latest_version, current_version),
        current_version: current_version.to_string(),
        latest_version,
    })
}

async fn fetch_latest_version(client: &reqwest::Client) -> Result<String> {
    let url = format!("{}{}", REGISTRY_API, CRATE_NAME);
    let response = client.get(&url).send().await?;

    if !response.status().is_success() {
        anyhow::bail!("Failed to check for updates: HTTP {}", response.status());
    }

    let body: CrateResponse = response.json().await?;
    Ok(body
        .krate
        .max_stable_version
        .unwrap_or(body.krate.max_version))
}

fn is_newer_version(latest: &str, current: &str) -> bool {
    let parse_version =
        |v: &str| -> Vec<u32> { v.split('.').filter_map(|s| s.parse().ok()).collect() };

    let latest_parts = parse_version(latest);
    let current_parts = parse_version(current);

    for i in 0..latest_parts.len().max(current_parts.len()) {
        let l = latest_parts.get(i).copied().unwrap_or(0);
        let c = current_parts.get(i).copied().unwrap_or(0);
        if l > c {
            return true;
        }
        if l < c {
            return false;
        }
    }
    false
}

pub type UpdateReceiver = tokio::sync::oneshot::Receiver<Result<UpdateInfo>>;

/// Starts the cached update check in the background when CLI notices are on.
pub fn spawn_update_check() -> Option<UpdateReceiver> {
    let settings = get_update_settings();
    if !settings.check_enabled || !settings.notify_in_cli {
        return None;
    }

    let (tx, rx) = tokio::sync::oneshot::channel();
    tokio::spawn(async move {
        let version = env!("CARGO_PKG_VERSION");
        let _ = tx.send(check_for_update(version, false).await);
    });
    Some(rx)
}

/// Takes the background result if it has already arrived and reports an update.
fn poll_update_receiver(rx: Option<UpdateReceiver>) -> Option<UpdateInfo> {
    match rx?.try_recv() {
        Ok(Ok(info)) if info.available => Some(info),
        Ok(Ok(_)) => None,
        Ok(Err(e)) => {
            debug!("Update check failed: {}", e);
            None
        }
        Err(TryRecvError::Empty) => {
            debug!("Update check still running, skipping notice");
            None
        }
        Err(TryRecvError::Closed) => None,
    }
}

/// Prints the notice if the background check already found an update.
/// Never waits on the registry.
pub fn print_update_notice(rx: Option<UpdateReceiver>) {
    if let Some(info) = poll_update_receiver(rx) {
        eprintln!(
            "\n{}",
            format!(
                "Update available: v{} → v{} (run: cargo install {})",
                info.current_version, info.latest_version, CRATE_NAME
            )
            .yellow()
        );
    }
}
