use anyhow::Result;
use colored::*;
use spiglet_core::project::ProjectManager;
use spiglet_core::Platform;

pub fn execute(manager: &ProjectManager, platform: Option<Platform>) -> Result<()> {
    let plan = manager
        .plan_debug(platform)
        .map_err(|e| anyhow::anyhow!("Failed to plan debug pipeline: {}", e))?;

    println!(
        "{} {}",
        "Debug pipeline for".bold(),
        plan.platform.to_string().cyan()
    );

    if !plan.dropped_soft_edges.is_empty() {
        let dropped = plan
            .dropped_soft_edges
            .iter()
            .map(|(pred, succ)| format!("{} before {}", pred, succ))
            .collect::<Vec<_>>()
            .join("; ");
        println!(
            "{} {}",
            "Warning:".yellow().bold(),
            format!("conflicting ordering hints dropped: {}", dropped).yellow()
        );
    }

    println!("\n{}:", "Execution order".bold());
    for (i, task) in plan.tasks.iter().enumerate() {
        println!(
            "  {}. {} {}",
            i + 1,
            task.id.blue().bold(),
            format!("- {}", task.description).dimmed()
        );
    }

    Ok(())
}
