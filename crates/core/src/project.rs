//! High-level project management interface
//!
//! [`ProjectManager`] is the primary entry point: it loads `spiglet.yml`
//! once and exposes the operations the CLI presents (main-class detection,
//! descriptor generation, debug pipeline planning and execution).
//!
//! ## Example
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
//! let descriptor = manager.generate_descriptor()?;
//! println!("{}", descriptor.yaml);
//! # Ok(())
//! # }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::configs::project::{parse_project_config, ProjectConfig};
use crate::detection::{default_classes_dir, detect_main_class, ClassIndex};
use crate::descriptor::PluginDescriptor;
use crate::execution::DebugRunner;
use crate::pipeline::DebugPipeline;
use crate::platform::Platform;
use crate::results::{DebugPlanResult, DescriptorResult, MainClassResult, PlannedTask};
use crate::types::{SpigletError, SpigletResult};

pub const CONFIG_FILE_NAME: &str = "spiglet.yml";

/// High-level manager for one plugin project
#[derive(Debug)]
pub struct ProjectManager {
    pub root: PathBuf,
    pub config: ProjectConfig,
}

/// Configuration for initializing a project manager
#[derive(Debug)]
pub struct ProjectManagerConfig {
    pub project_root: PathBuf,
}

impl ProjectManager {
    /// Initialize a manager from the given project root. A missing
    /// `spiglet.yml` is fine; every setting has a default.
    pub fn new(config: ProjectManagerConfig) -> SpigletResult<Self> {
        let root = config.project_root;
        if !root.is_dir() {
            return Err(SpigletError::Config(format!(
                "Project root {} does not exist",
                root.display()
            )));
        }

        let config_path = root.join(CONFIG_FILE_NAME);
        let project_config = if config_path.exists() {
            let content = fs::read_to_string(&config_path)?;
            parse_project_config(&content).map_err(|e| {
                SpigletError::Config(format!(
                    "Failed to parse {}: {}",
                    config_path.display(),
                    e
                ))
            })?
        } else {
            ProjectConfig::default()
        };

        Ok(Self {
            root,
            config: project_config,
        })
    }

    /// The platform to target: an explicit choice wins, then the config,
    /// then spigot
    pub fn platform(&self, explicit: Option<Platform>) -> Platform {
        explicit
            .or(self.config.platform)
            .unwrap_or(Platform::Spigot)
    }

    fn classes_dir(&self) -> PathBuf {
        match &self.config.classes_dir {
            Some(dir) => self.root.join(dir),
            None => default_classes_dir(&self.root),
        }
    }

    fn fallback_name(&self) -> String {
        self.root
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "plugin".to_string())
    }

    /// Resolve the plugin main class for the given platform
    pub fn detect_main_class(&self, explicit: Option<Platform>) -> SpigletResult<MainClassResult> {
        let platform = self.platform(explicit);

        // A configured main class bypasses scanning entirely
        if let Some(main) = &self.config.main {
            if !main.trim().is_empty() {
                return Ok(MainClassResult {
                    main_class: main.clone(),
                    scanned_classes: 0,
                    overridden: true,
                });
            }
        }

        let index = ClassIndex::from_dir(&self.classes_dir())?;
        let main_class = detect_main_class(&index, platform.plugin_superclass(), None)?;
        Ok(MainClassResult {
            main_class,
            scanned_classes: index.len(),
            overridden: false,
        })
    }

    /// Generate the plugin descriptor next to the compiled classes so it is
    /// packed into the jar
    pub fn generate_descriptor(&self) -> SpigletResult<DescriptorResult> {
        self.generate_descriptor_for(None)
    }

    pub fn generate_descriptor_for(
        &self,
        explicit: Option<Platform>,
    ) -> SpigletResult<DescriptorResult> {
        let platform = self.platform(explicit);
        let main = self.detect_main_class(explicit)?;
        let descriptor =
            PluginDescriptor::from_config(&self.config, &main.main_class, &self.fallback_name())?;
        let yaml = descriptor.to_yaml()?;

        let out_dir = self.classes_dir();
        fs::create_dir_all(&out_dir)?;
        let path = out_dir.join(platform.descriptor_file_name());
        fs::write(&path, &yaml)?;

        Ok(DescriptorResult {
            path,
            yaml,
            descriptor,
        })
    }

    pub fn debug_pipeline(&self, explicit: Option<Platform>) -> DebugPipeline {
        DebugPipeline::for_platform(self.platform(explicit), &self.root, &self.config)
    }

    /// Plan the debug pipeline without executing anything
    pub fn plan_debug(&self, explicit: Option<Platform>) -> SpigletResult<DebugPlanResult> {
        let pipeline = self.debug_pipeline(explicit);
        let plan = pipeline.plan()?;

        let tasks = plan
            .order
            .iter()
            .map(|id| PlannedTask {
                id: id.clone(),
                description: pipeline
                    .task(id)
                    .map(|task| task.description.clone())
                    .unwrap_or_default(),
            })
            .collect();

        Ok(DebugPlanResult {
            platform: pipeline.platform,
            tasks,
            dropped_soft_edges: plan.dropped_soft_edges,
        })
    }

    /// Plan and execute the debug pipeline
    pub async fn run_debug(&self, explicit: Option<Platform>) -> SpigletResult<()> {
        let pipeline = self.debug_pipeline(explicit);
        DebugRunner::new(&pipeline).run().await
    }
}

/// Convenience wrapper used by tests and embedding callers
pub fn load_project(root: &Path) -> SpigletResult<ProjectManager> {
    ProjectManager::new(ProjectManagerConfig {
        project_root: root.to_path_buf(),
    })
}
