//! Plugin descriptor generation
//!
//! Builds the `plugin.yml` (or `bungee.yml`) the server reads at plugin load
//! time, from the project configuration plus the resolved main class. Key
//! spelling follows the Bukkit descriptor format (`api-version`,
//! `softdepend`, `loadbefore`).

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::configs::project::{CommandConfig, PermissionConfig, ProjectConfig};
use crate::types::{SpigletError, SpigletResult};

/// When the server activates the plugin relative to world loading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Load {
    #[serde(rename = "STARTUP")]
    Startup,
    #[serde(rename = "POST_WORLD", alias = "POSTWORLD")]
    PostWorld,
}

/// A command entry as it appears in the descriptor. Key spelling differs
/// from the configuration form: Bukkit reads `permission-message`.
#[derive(Debug, Serialize, Clone, Default)]
pub struct CommandDescriptor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permission: Option<String>,
    #[serde(rename = "permission-message", skip_serializing_if = "Option::is_none")]
    pub permission_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aliases: Option<Vec<String>>,
}

impl From<&CommandConfig> for CommandDescriptor {
    fn from(config: &CommandConfig) -> Self {
        Self {
            description: config.description.clone(),
            usage: config.usage.clone(),
            permission: config.permission.clone(),
            permission_message: config.permission_message.clone(),
            aliases: config.aliases.clone(),
        }
    }
}

/// A permission entry as it appears in the descriptor
#[derive(Debug, Serialize, Clone, Default)]
pub struct PermissionDescriptor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<BTreeMap<String, bool>>,
}

impl From<&PermissionConfig> for PermissionDescriptor {
    fn from(config: &PermissionConfig) -> Self {
        Self {
            description: config.description.clone(),
            default: config.default.clone(),
            children: config.children.clone(),
        }
    }
}

/// The generated descriptor contents
#[derive(Debug, Serialize, Clone)]
pub struct PluginDescriptor {
    pub name: String,
    pub version: String,
    pub main: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
    #[serde(rename = "api-version", skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load: Option<Load>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub depend: Vec<String>,
    #[serde(rename = "softdepend", skip_serializing_if = "Vec::is_empty")]
    pub soft_depend: Vec<String>,
    #[serde(rename = "loadbefore", skip_serializing_if = "Vec::is_empty")]
    pub load_before: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub commands: BTreeMap<String, CommandDescriptor>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub permissions: BTreeMap<String, PermissionDescriptor>,
}

impl PluginDescriptor {
    /// Assemble a descriptor from project configuration and the resolved
    /// main class. `fallback_name` is the project directory name, used when
    /// the configuration does not set one (spigradle's defaulting rule).
    pub fn from_config(
        config: &ProjectConfig,
        main_class: &str,
        fallback_name: &str,
    ) -> SpigletResult<Self> {
        let name = config
            .name
            .clone()
            .unwrap_or_else(|| fallback_name.to_string());
        if name.trim().is_empty() {
            return Err(SpigletError::Config(
                "Plugin name must not be blank".to_string(),
            ));
        }
        if main_class.trim().is_empty() {
            return Err(SpigletError::Config(
                "Plugin main class must not be blank".to_string(),
            ));
        }

        Ok(Self {
            name,
            version: config.version.clone().unwrap_or_else(|| "0.0.0".to_string()),
            main: main_class.to_string(),
            description: config.description.clone(),
            website: config.website.clone(),
            authors: config.authors.clone().unwrap_or_default(),
            api_version: config.api_version.clone(),
            prefix: config.prefix.clone(),
            load: config.load,
            depend: config.depend.clone().unwrap_or_default(),
            soft_depend: config.soft_depend.clone().unwrap_or_default(),
            load_before: config.load_before.clone().unwrap_or_default(),
            commands: config
                .commands
                .iter()
                .flatten()
                .map(|(name, command)| (name.clone(), command.into()))
                .collect(),
            permissions: config
                .permissions
                .iter()
                .flatten()
                .map(|(name, permission)| (name.clone(), permission.into()))
                .collect(),
        })
    }

    /// Render the descriptor as YAML
    pub fn to_yaml(&self) -> SpigletResult<String> {
        let yaml = serde_yaml::to_string(self)?;
        Ok(yaml)
    }
}
