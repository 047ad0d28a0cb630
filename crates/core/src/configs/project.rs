use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::configs::debug::DebugConfig;
use crate::descriptor::Load;
use crate::platform::Platform;
use crate::types::SpigletResult;

/// A command the plugin registers with the server
#[derive(Debug, Deserialize, Serialize, JsonSchema, Clone, Default)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CommandConfig {
    pub description: Option<String>,
    pub usage: Option<String>,
    pub permission: Option<String>,
    pub permission_message: Option<String>,
    pub aliases: Option<Vec<String>>,
}

/// A permission node the plugin declares
#[derive(Debug, Deserialize, Serialize, JsonSchema, Clone, Default)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PermissionConfig {
    pub description: Option<String>,
    pub default: Option<String>,
    pub children: Option<BTreeMap<String, bool>>,
}

/// Project configuration read from `spiglet.yml`
#[derive(Debug, Deserialize, Serialize, JsonSchema, Clone, Default)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProjectConfig {
    /// Plugin name; defaults to the project directory name
    pub name: Option<String>,
    /// Plugin version; defaults to "0.0.0"
    pub version: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub authors: Option<Vec<String>>,
    pub api_version: Option<String>,
    pub prefix: Option<String>,
    /// Explicit main class; bypasses detection when set
    pub main: Option<String>,
    pub load: Option<Load>,
    pub depend: Option<Vec<String>>,
    pub soft_depend: Option<Vec<String>>,
    pub load_before: Option<Vec<String>>,
    pub commands: Option<BTreeMap<String, CommandConfig>>,
    pub permissions: Option<BTreeMap<String, PermissionConfig>>,
    /// Target platform; defaults to spigot
    pub platform: Option<Platform>,
    /// Directory of compiled classes, relative to the project root
    pub classes_dir: Option<String>,
    /// Built plugin jar to install into the debug server
    pub artifact: Option<String>,
    pub debug: Option<DebugConfig>,
}

pub fn parse_project_config(yaml_str: &str) -> SpigletResult<ProjectConfig> {
    let config: ProjectConfig = serde_yaml::from_str(yaml_str)?;
    Ok(config)
}
