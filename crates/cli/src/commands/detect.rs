use anyhow::Result;
use colored::*;
use spiglet_core::project::ProjectManager;
use spiglet_core::Platform;

pub fn execute(manager: &ProjectManager, platform: Option<Platform>) -> Result<()> {
    let result = manager
        .detect_main_class(platform)
        .map_err(|e| anyhow::anyhow!("Main-class detection failed: {}", e))?;

    println!("{}", result.main_class.blue().bold());
    if result.overridden {
        println!("  {}", "configured in spiglet.yml".dimmed());
    } else {
        println!(
            "  {}",
            format!("detected among {} compiled classes", result.scanned_classes).dimmed()
        );
    }

    Ok(())
}
