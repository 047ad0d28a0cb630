//! Spiglet Core Library
//!
//! This is the core library for the Spiglet Minecraft plugin build helper.
//! It provides the business logic for descriptor generation, main-class
//! detection, and the debug pipeline.
//!
//! ## Architecture
//!
//! The core library is organized into several modules:
//!
//! - [`project`] - High-level project management interface
//! - [`classfile`] - Minimal reader for the JVM class-file format
//! - [`detection`] - Main-class detection by superclass chain walking
//! - [`descriptor`] - Plugin descriptor (`plugin.yml`) generation
//! - [`planner`] - Task graph planning with hard and soft edges
//! - [`pipeline`] - Per-platform debug pipeline shapes
//! - [`execution`] - Debug pipeline execution (downloads, server launch)
//! - [`configs`] - Configuration parsing for `spiglet.yml`
//! - [`platform`] - Platform table (superclasses, descriptors, repositories)
//! - [`results`] - Result types for project operations
//! - [`types`] - Common error types and type aliases
//!
//! ## Usage
//!
//! The primary entry point is the [`ProjectManager`]:
//!
//! ```rust,no_run
//! use spiglet_core::project::{ProjectManager, ProjectManagerConfig};
//! use std::path::PathBuf;
//!
//! # fn example() -> spiglet_core::types::SpigletResult<()> {
//! let manager = ProjectManager::new(ProjectManagerConfig {
//!     project_root: PathBuf::from("."),
//! })?;
//!
//! let main_class = manager.detect_main_class(None)?;
//! # Ok(())
//! # }
//! ```

pub mod classfile;
pub mod configs;
pub mod descriptor;
pub mod detection;
pub mod execution;
pub mod pipeline;
pub mod planner;
pub mod platform;
pub mod project;
pub mod results;
pub mod types;

// Re-export the main types for easier usage
pub use platform::Platform;
pub use project::{ProjectManager, ProjectManagerConfig};
pub use types::{SpigletError, SpigletResult};
