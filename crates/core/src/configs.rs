//! Configuration parsing for plugin projects
//!
//! Every recognized option is enumerated statically; there are no open-ended
//! attribute bags. Project settings live in `spiglet.yml` at the project root.

pub mod debug;
pub mod project;

pub use debug::DebugConfig;
pub use project::{parse_project_config, CommandConfig, PermissionConfig, ProjectConfig};
