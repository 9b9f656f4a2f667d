//! `ecs-exec update` command implementation

use anyhow::Result;

use crate::update::check_for_update;

pub async fn run() -> Result<i32> {
    let version = env!("CARGO_PKG_VERSION");
    println!("Checking for updates...");

    let info = check_for_update(version, true).await?;
    if info.available {
        println!(
            "Update available: v{} → v{}",
            info.current_version, info.latest_version
        );
        println!("Run: cargo install {}", env!("CARGO_PKG_NAME"));
    } else {
        println!("Already on the latest version (v{})", info.current_version);
    }

    Ok(0)
}
