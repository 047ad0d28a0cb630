use anyhow::Result;
use colored::*;
use spiglet_core::project::ProjectManager;
use spiglet_core::Platform;

pub fn execute(manager: &ProjectManager, platform: Option<Platform>) -> Result<()> {
    let result = manager
        .generate_descriptor_for(platform)
        .map_err(|e| anyhow::anyhow!("Descriptor generation failed: {}", e))?;

    println!(
        "{} {}",
        "Wrote".bold(),
        result.path.display().to_string().green()
    );
    println!();
    print!("{}", result.yaml);

    Ok(())
}
