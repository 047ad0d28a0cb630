use anyhow::Result;
use spiglet_core::project::ProjectManager;
use spiglet_core::Platform;

pub async fn execute(manager: &ProjectManager, platform: Option<Platform>) -> Result<()> {
    manager
        .run_debug(platform)
        .await
        .map_err(|e| anyhow::anyhow!("Debug run failed: {}", e))
}
