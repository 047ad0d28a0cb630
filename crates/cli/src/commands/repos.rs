use anyhow::Result;
use colored::*;
use spiglet_core::project::ProjectManager;
use spiglet_core::Platform;

pub fn execute(manager: &ProjectManager, platform: Option<Platform>) -> Result<()> {
    let platform = manager.platform(platform);

    println!(
        "{} {}",
        "Default repositories for".bold(),
        platform.to_string().cyan()
    );
    for url in platform.default_repositories() {
        println!("  {}", url);
    }

    Ok(())
}
