//! Debug pipeline execution
//!
//! Runs a planned pipeline: downloads, server directory preparation, plugin
//! installation, and launching the server process. Planning stays in
//! [`crate::planner`]; this module only acts on the computed order.

pub mod command;
pub mod download;
pub mod runner;

pub use command::CommandExecutor;
pub use download::Downloader;
pub use runner::DebugRunner;
