use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Debug-pipeline settings, nested under `debug:` in `spiglet.yml`
#[derive(Debug, Deserialize, Serialize, JsonSchema, Clone)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct DebugConfig {
    /// Working directory for the debug server, relative to the project root
    pub server_directory: String,
    /// Server jar path inside the server directory
    pub server_jar: String,
    /// Server version used to derive download URLs
    pub server_version: String,
    /// Whether the Minecraft EULA has been accepted; launching refuses
    /// to write eula.txt without this
    pub eula: bool,
    pub jvm_args: Vec<String>,
    pub program_args: Vec<String>,
    /// Where BuildTools is downloaded and run (Spigot flavor only)
    pub build_tools_dir: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            server_directory: "debug/server".to_string(),
            server_jar: "server.jar".to_string(),
            server_version: "1.20.4".to_string(),
            eula: false,
            jvm_args: vec!["-Xmx1G".to_string()],
            program_args: vec!["nogui".to_string()],
            build_tools_dir: "debug/buildtools".to_string(),
        }
    }
}
