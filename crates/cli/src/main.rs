use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use spiglet_core::project::{ProjectManager, ProjectManagerConfig};
use spiglet_core::Platform;

mod commands;

/// Spiglet - a build helper for Minecraft server plugins
#[derive(Parser)]
#[command(name = "spiglet")]
#[command(about = "Scaffold, describe and debug-run Minecraft server plugins")]
#[command(version)]
struct Cli {
    /// Path to the plugin project root (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    project: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect the plugin main class from compiled classes
    Detect {
        /// Target platform (spigot, paper, nukkit, bungee)
        #[arg(long)]
        platform: Option<Platform>,
    },
    /// Generate the plugin descriptor (plugin.yml / bungee.yml)
    Describe {
        /// Target platform (spigot, paper, nukkit, bungee)
        #[arg(long)]
        platform: Option<Platform>,
    },
    /// Show the debug pipeline order without running it
    Plan {
        /// Target platform (spigot, paper, nukkit, bungee)
        #[arg(long)]
        platform: Option<Platform>,
    },
    /// Run the debug pipeline: download, install, launch the server
    Debug {
        /// Target platform (spigot, paper, nukkit, bungee)
        #[arg(long)]
        platform: Option<Platform>,
    },
    /// Print the default Maven repositories for a platform
    Repos {
        /// Target platform (spigot, paper, nukkit, bungee)
        #[arg(long)]
        platform: Option<Platform>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize the project manager with all business logic
    let manager = ProjectManager::new(ProjectManagerConfig {
        project_root: cli.project,
    })
    .map_err(|e| anyhow::anyhow!("Failed to initialize project: {}", e))?;

    // Execute command (CLI layer only handles presentation)
    match cli.command {
        Commands::Detect { platform } => commands::detect::execute(&manager, platform),
        Commands::Describe { platform } => commands::describe::execute(&manager, platform),
        Commands::Plan { platform } => commands::plan::execute(&manager, platform),
        Commands::Debug { platform } => commands::debug::execute(&manager, platform).await,
        Commands::Repos { platform } => commands::repos::execute(&manager, platform),
    }
}
