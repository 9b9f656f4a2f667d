//! `ecs-exec check` command implementation

use anyhow::Result;
use crossterm::style::Stylize;
use tracing::warn;

use super::EXIT_FAILURE;
use crate::prerequisites::{cache_path, is_installed, PrerequisiteGate};

pub fn run() -> Result<i32> {
    eprintln!("{}", "Checking prerequisites...".dark_grey());

    let cache_path = cache_path()
        .map_err(|e| warn!("Prerequisite cache unavailable: {}", e))
        .ok();

    if PrerequisiteGate::new(cache_path, is_installed).check_uncached() {
        Ok(0)
    } else {
        Ok(EXIT_FAILURE)
    }
}
