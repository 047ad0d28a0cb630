//! Result types for project manager operations
//!
//! Centralized output structures so the CLI layer only does presentation.

use std::path::PathBuf;

use crate::descriptor::PluginDescriptor;
use crate::platform::Platform;

/// Outcome of main-class resolution
#[derive(Debug, Clone)]
pub struct MainClassResult {
    pub main_class: String,
    /// Number of compiled classes inspected; zero when an override
    /// short-circuited scanning
    pub scanned_classes: usize,
    pub overridden: bool,
}

/// Outcome of descriptor generation
#[derive(Debug, Clone)]
pub struct DescriptorResult {
    pub path: PathBuf,
    pub yaml: String,
    pub descriptor: PluginDescriptor,
}

/// One planned task with its human-readable description
#[derive(Debug, Clone)]
pub struct PlannedTask {
    pub id: String,
    pub description: String,
}

/// Outcome of debug pipeline planning
#[derive(Debug, Clone)]
pub struct DebugPlanResult {
    pub platform: Platform,
    pub tasks: Vec<PlannedTask>,
    pub dropped_soft_edges: Vec<(String, String)>,
}
