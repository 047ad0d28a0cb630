//! Server platform table: marker superclasses, descriptor files, repositories

use std::fmt;

use serde::{Deserialize, Serialize};

/// How a platform's debug pipeline obtains its server jar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineFlavor {
    /// Spigot: download BuildTools, build the server jar locally
    BuildTools,
    /// Paper, Nukkit, BungeeCord: download a ready-made server jar
    DirectDownload,
}

/// A Minecraft server platform a plugin can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Spigot,
    Paper,
    Nukkit,
    Bungee,
}

impl Platform {
    /// The marker superclass a plugin main class extends, in internal
    /// (slash-separated) form
    pub fn plugin_superclass(&self) -> &'static str {
        match self {
            // Paper plugins extend the Bukkit base class
            Platform::Spigot | Platform::Paper => "org/bukkit/plugin/java/JavaPlugin",
            Platform::Nukkit => "cn/nukkit/plugin/PluginBase",
            Platform::Bungee => "net/md_5/bungee/api/plugin/Plugin",
        }
    }

    /// File name of the generated plugin descriptor
    pub fn descriptor_file_name(&self) -> &'static str {
        match self {
            Platform::Bungee => "bungee.yml",
            _ => "plugin.yml",
        }
    }

    /// Maven repositories added by default for this platform
    pub fn default_repositories(&self) -> &'static [&'static str] {
        match self {
            Platform::Spigot => &[repositories::SPIGOT, repositories::PAPER],
            Platform::Paper => &[repositories::PAPER],
            Platform::Nukkit => &[repositories::NUKKIT_X],
            Platform::Bungee => &[repositories::BUNGEE_CORD],
        }
    }

    pub fn pipeline_flavor(&self) -> PipelineFlavor {
        match self {
            Platform::Spigot => PipelineFlavor::BuildTools,
            _ => PipelineFlavor::DirectDownload,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Spigot => "spigot",
            Platform::Paper => "paper",
            Platform::Nukkit => "nukkit",
            Platform::Bungee => "bungee",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "spigot" => Ok(Platform::Spigot),
            "paper" => Ok(Platform::Paper),
            "nukkit" => Ok(Platform::Nukkit),
            "bungee" | "bungeecord" => Ok(Platform::Bungee),
            other => Err(format!(
                "Unknown platform '{}'. Supported platforms: spigot, paper, nukkit, bungee",
                other
            )),
        }
    }
}

/// Well-known Maven repositories for the supported platforms
pub mod repositories {
    pub const SPIGOT: &str = "https://hub.spigotmc.org/nexus/content/repositories/snapshots/";
    pub const BUNGEE_CORD: &str = "https://oss.sonatype.org/content/repositories/snapshots/";
    pub const PAPER: &str = "https://papermc.io/repo/repository/maven-public/";
    pub const PROTOCOL_LIB: &str = "https://repo.dmulloy2.net/nexus/repository/public/";
    pub const JITPACK: &str = "https://jitpack.io";
    pub const ENGINE_HUB: &str = "https://maven.enginehub.org/repo/";
    pub const CODE_MC: &str = "https://repo.codemc.org/repository/maven-public/";
    pub const NUKKIT_X: &str = "https://repo.nukkitx.com/maven-snapshots/";
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_superclass_names() {
        assert_eq!(
            Platform::Spigot.plugin_superclass(),
            "org/bukkit/plugin/java/JavaPlugin"
        );
        assert_eq!(
            Platform::Paper.plugin_superclass(),
            Platform::Spigot.plugin_superclass()
        );
        assert_eq!(
            Platform::Nukkit.plugin_superclass(),
            "cn/nukkit/plugin/PluginBase"
        );
        assert_eq!(
            Platform::Bungee.plugin_superclass(),
            "net/md_5/bungee/api/plugin/Plugin"
        );
    }

    #[test]
    fn test_descriptor_file_names() {
        assert_eq!(Platform::Spigot.descriptor_file_name(), "plugin.yml");
        assert_eq!(Platform::Bungee.descriptor_file_name(), "bungee.yml");
    }

    #[test]
    fn test_platform_parsing() {
        assert_eq!(Platform::from_str("Paper").unwrap(), Platform::Paper);
        assert_eq!(Platform::from_str("bungeecord").unwrap(), Platform::Bungee);
        assert!(Platform::from_str("forge").is_err());
    }

    #[test]
    fn test_pipeline_flavors() {
        assert_eq!(Platform::Spigot.pipeline_flavor(), PipelineFlavor::BuildTools);
        assert_eq!(Platform::Paper.pipeline_flavor(), PipelineFlavor::DirectDownload);
        assert_eq!(Platform::Nukkit.pipeline_flavor(), PipelineFlavor::DirectDownload);
    }
}
