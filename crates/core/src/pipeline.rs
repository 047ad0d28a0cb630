//! Debug pipeline shapes per platform
//!
//! Translates the platform's debug flow (download a server runtime, install
//! the built plugin, launch for interactive testing) into a declarative task
//! graph. Planning and execution stay separate: this module only describes
//! tasks and their edges, the planner orders them, the runner acts on them.

use std::path::{Path, PathBuf};

use crate::configs::ProjectConfig;
use crate::planner::{TaskGraph, TaskPlan, TaskSpec};
use crate::platform::{PipelineFlavor, Platform};
use crate::types::SpigletResult;

pub const BUILD_TOOLS_URL: &str =
    "https://hub.spigotmc.org/jenkins/job/BuildTools/lastSuccessfulBuild/artifact/target/BuildTools.jar";
pub const NUKKIT_JAR_URL: &str =
    "https://ci.opencollab.dev/job/NukkitX/job/Nukkit/job/master/lastSuccessfulBuild/artifact/target/nukkit-1.0-SNAPSHOT.jar";
pub const BUNGEE_JAR_URL: &str =
    "https://ci.md-5.net/job/BungeeCord/lastSuccessfulBuild/artifact/bootstrap/target/BungeeCord.jar";

fn paper_jar_url(version: &str) -> String {
    format!("https://papermc.io/api/v1/paper/{}/latest/download", version)
}

/// What the runner does when a task's turn comes up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskAction {
    /// Fetch a file, skipping the download when it is already present
    DownloadFile { url: String, dest: PathBuf },
    /// Run BuildTools to produce the server jar (Spigot flavor)
    RunBuildTools {
        build_tools_dir: PathBuf,
        build_tools_jar: PathBuf,
        version: String,
        output_jar: PathBuf,
    },
    /// Create the server working directory and its plugins folder
    PrepareServerDir { server_dir: PathBuf },
    /// Verify the plugin artifact the host build produced exists
    BuildArtifact { artifact: PathBuf },
    /// Copy the plugin artifact into the server's plugins folder
    InstallPlugin { artifact: PathBuf, plugins_dir: PathBuf },
    /// Write eula.txt; refuses unless the configuration accepts the EULA
    WriteEula { server_dir: PathBuf, accepted: bool },
    /// Launch the server jar for interactive debugging
    LaunchServer {
        server_dir: PathBuf,
        jar: PathBuf,
        jvm_args: Vec<String>,
        program_args: Vec<String>,
    },
    /// Lifecycle anchor with no effect of its own
    Aggregate,
}

/// One pipeline task: graph spec plus its action and a one-line description
#[derive(Debug, Clone)]
pub struct PipelineTask {
    pub spec: TaskSpec,
    pub action: TaskAction,
    pub description: String,
}

/// The full debug pipeline for one platform and project
#[derive(Debug)]
pub struct DebugPipeline {
    pub platform: Platform,
    tasks: Vec<PipelineTask>,
}

impl DebugPipeline {
    pub fn for_platform(
        platform: Platform,
        project_root: &Path,
        config: &ProjectConfig,
    ) -> Self {
        let debug = config.debug.clone().unwrap_or_default();
        let server_dir = project_root.join(&debug.server_directory);
        let server_jar = server_dir.join(&debug.server_jar);
        let plugins_dir = server_dir.join("plugins");
        let artifact = project_root.join(
            config
                .artifact
                .clone()
                .unwrap_or_else(|| default_artifact(project_root, config)),
        );

        let mut tasks = Vec::new();

        match platform.pipeline_flavor() {
            PipelineFlavor::BuildTools => {
                let build_tools_dir = project_root.join(&debug.build_tools_dir);
                let build_tools_jar = build_tools_dir.join("BuildTools.jar");
                tasks.push(PipelineTask {
                    spec: TaskSpec::new("downloadBuildTool"),
                    action: TaskAction::DownloadFile {
                        url: BUILD_TOOLS_URL.to_string(),
                        dest: build_tools_jar.clone(),
                    },
                    description: "Download Spigot BuildTools".to_string(),
                });
                tasks.push(PipelineTask {
                    spec: TaskSpec::new("buildServerJar")
                        .depends_on("downloadBuildTool")
                        .must_run_after("downloadBuildTool"),
                    action: TaskAction::RunBuildTools {
                        build_tools_dir,
                        build_tools_jar,
                        version: debug.server_version.clone(),
                        output_jar: server_jar.clone(),
                    },
                    description: format!("Build Spigot {} with BuildTools", debug.server_version),
                });
                tasks.push(PipelineTask {
                    spec: TaskSpec::new("prepareServerDir").depends_on("buildServerJar"),
                    action: TaskAction::PrepareServerDir {
                        server_dir: server_dir.clone(),
                    },
                    description: "Prepare the server directory".to_string(),
                });
            }
            PipelineFlavor::DirectDownload => {
                let url = match platform {
                    Platform::Nukkit => NUKKIT_JAR_URL.to_string(),
                    Platform::Bungee => BUNGEE_JAR_URL.to_string(),
                    _ => paper_jar_url(&debug.server_version),
                };
                tasks.push(PipelineTask {
                    spec: TaskSpec::new("downloadServerJar"),
                    action: TaskAction::DownloadFile {
                        url,
                        dest: server_jar.clone(),
                    },
                    description: format!("Download the {} server jar", platform),
                });
                tasks.push(PipelineTask {
                    spec: TaskSpec::new("prepareServerDir").depends_on("downloadServerJar"),
                    action: TaskAction::PrepareServerDir {
                        server_dir: server_dir.clone(),
                    },
                    description: "Prepare the server directory".to_string(),
                });
            }
        }

        tasks.push(PipelineTask {
            spec: TaskSpec::new("buildPluginArtifact"),
            action: TaskAction::BuildArtifact {
                artifact: artifact.clone(),
            },
            description: "Check the built plugin artifact".to_string(),
        });
        tasks.push(PipelineTask {
            spec: TaskSpec::new("preparePluginInstall").depends_on("buildPluginArtifact"),
            action: TaskAction::InstallPlugin {
                artifact,
                plugins_dir,
            },
            description: "Install the plugin into the server".to_string(),
        });

        // Only Bukkit-family servers gate startup on the Minecraft EULA
        let eula_gated = matches!(platform, Platform::Spigot | Platform::Paper);
        if eula_gated {
            tasks.push(PipelineTask {
                spec: TaskSpec::new("acceptEula"),
                action: TaskAction::WriteEula {
                    server_dir: server_dir.clone(),
                    accepted: debug.eula,
                },
                description: "Write eula.txt".to_string(),
            });
        }

        let mut run_spec = TaskSpec::new("runServer")
            .must_run_after("preparePluginInstall")
            .must_run_after("prepareServerDir");
        if eula_gated {
            run_spec = run_spec.depends_on("acceptEula");
        }
        if platform.pipeline_flavor() == PipelineFlavor::DirectDownload {
            run_spec = run_spec.must_run_after("downloadServerJar");
        }
        tasks.push(PipelineTask {
            spec: run_spec,
            action: TaskAction::LaunchServer {
                server_dir,
                jar: server_jar,
                jvm_args: debug.jvm_args.clone(),
                program_args: debug.program_args.clone(),
            },
            description: format!("Launch the {} server", platform),
        });

        let download_task = match platform.pipeline_flavor() {
            PipelineFlavor::BuildTools => "prepareServerDir",
            PipelineFlavor::DirectDownload => "downloadServerJar",
        };
        tasks.push(PipelineTask {
            spec: TaskSpec::new("debugRun")
                .depends_on("preparePluginInstall")
                .depends_on(download_task)
                .depends_on("runServer"),
            action: TaskAction::Aggregate,
            description: format!("Debug-run the plugin on {}", platform),
        });

        Self { platform, tasks }
    }

    pub fn tasks(&self) -> &[PipelineTask] {
        &self.tasks
    }

    pub fn task(&self, id: &str) -> Option<&PipelineTask> {
        self.tasks.iter().find(|task| task.spec.id == id)
    }

    pub fn graph(&self) -> SpigletResult<TaskGraph> {
        let specs: Vec<TaskSpec> = self.tasks.iter().map(|task| task.spec.clone()).collect();
        TaskGraph::new(&specs)
    }

    pub fn plan(&self) -> SpigletResult<TaskPlan> {
        self.graph()?.plan()
    }
}

fn default_artifact(project_root: &Path, config: &ProjectConfig) -> String {
    let name = config
        .name
        .clone()
        .or_else(|| {
            project_root
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| "plugin".to_string());
    format!("build/libs/{}.jar", name)
}
