//! Debug pipeline runner
//!
//! Walks a planned task order and performs each task's action sequentially.
//! All ordering decisions were made by the planner; the runner just acts,
//! printing a colored header per task the way an interactive build tool
//! should.

use std::fs;
use std::path::Path;

use colored::*;

use crate::execution::command::CommandExecutor;
use crate::execution::download::Downloader;
use crate::pipeline::{DebugPipeline, TaskAction};
use crate::types::{SpigletError, SpigletResult};

/// Executes a debug pipeline in planned order
pub struct DebugRunner<'a> {
    pipeline: &'a DebugPipeline,
    downloader: Downloader,
}

impl<'a> DebugRunner<'a> {
    pub fn new(pipeline: &'a DebugPipeline) -> Self {
        Self {
            pipeline,
            downloader: Downloader::new(),
        }
    }

    /// Plan the pipeline and run every task in order
    pub async fn run(&self) -> SpigletResult<()> {
        let plan = self.pipeline.plan()?;

        for (predecessor, successor) in &plan.dropped_soft_edges {
            println!(
                "{} {}",
                "Warning:".yellow().bold(),
                format!(
                    "ordering hint '{}' before '{}' conflicts with the task graph and was dropped",
                    predecessor, successor
                )
                .yellow()
            );
        }

        for task_id in &plan.order {
            let task = self.pipeline.task(task_id).ok_or_else(|| {
                SpigletError::Task(format!("Planned task '{}' not found in pipeline", task_id))
            })?;

            println!();
            println!(
                "┌─ {} {}",
                format!("Running '{}'", task_id).bold(),
                format!("({})", self.pipeline.platform).cyan()
            );
            println!("└─ {}", task.description.dimmed());

            self.execute(&task.spec.id, &task.action).await?;
        }

        Ok(())
    }

    async fn execute(&self, task_id: &str, action: &TaskAction) -> SpigletResult<()> {
        match action {
            TaskAction::DownloadFile { url, dest } => {
                if self.downloader.fetch(url, dest).await? {
                    println!("Downloaded {} -> {}", url, dest.display());
                } else {
                    println!("Using existing {}", dest.display());
                }
            }
            TaskAction::RunBuildTools {
                build_tools_dir,
                build_tools_jar,
                version,
                output_jar,
            } => {
                if output_jar.exists() {
                    println!("Using existing server jar {}", output_jar.display());
                    return Ok(());
                }
                fs::create_dir_all(build_tools_dir)?;
                let executor = CommandExecutor::new(build_tools_dir);
                let mut command = std::process::Command::new("java");
                command
                    .arg("-jar")
                    .arg(build_tools_jar)
                    .arg("--rev")
                    .arg(version);
                executor.execute_command(
                    &mut command,
                    "Failed to launch BuildTools",
                    "BuildTools failed",
                )?;

                let built = build_tools_dir.join(format!("spigot-{}.jar", version));
                if !built.exists() {
                    return Err(SpigletError::Task(format!(
                        "BuildTools finished but {} was not produced",
                        built.display()
                    )));
                }
                copy_into(&built, output_jar)?;
            }
            TaskAction::PrepareServerDir { server_dir } => {
                fs::create_dir_all(server_dir.join("plugins"))?;
            }
            TaskAction::BuildArtifact { artifact } => {
                if !artifact.exists() {
                    return Err(SpigletError::Task(format!(
                        "Plugin artifact {} not found; build the plugin first",
                        artifact.display()
                    )));
                }
            }
            TaskAction::InstallPlugin {
                artifact,
                plugins_dir,
            } => {
                fs::create_dir_all(plugins_dir)?;
                let file_name = artifact.file_name().ok_or_else(|| {
                    SpigletError::Task(format!(
                        "Artifact path {} has no file name",
                        artifact.display()
                    ))
                })?;
                copy_into(artifact, &plugins_dir.join(file_name))?;
                println!("Installed {} into {}", artifact.display(), plugins_dir.display());
            }
            TaskAction::WriteEula {
                server_dir,
                accepted,
            } => {
                if !accepted {
                    return Err(SpigletError::Config(
                        "Running a server requires accepting the Minecraft EULA; \
                         set debug.eula to true in spiglet.yml"
                            .to_string(),
                    ));
                }
                fs::create_dir_all(server_dir)?;
                fs::write(server_dir.join("eula.txt"), "eula=true\n")?;
            }
            TaskAction::LaunchServer {
                server_dir,
                jar,
                jvm_args,
                program_args,
            } => {
                fs::create_dir_all(server_dir)?;
                let executor = CommandExecutor::new(server_dir);
                executor.run_jar(jvm_args, jar, program_args)?;
            }
            TaskAction::Aggregate => {
                println!("{}", format!("'{}' complete", task_id).green());
            }
        }
        Ok(())
    }
}

fn copy_into(source: &Path, dest: &Path) -> SpigletResult<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(source, dest)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configs::{DebugConfig, ProjectConfig};
    use crate::pipeline::DebugPipeline;
    use crate::platform::Platform;

    fn project_config(eula: bool) -> ProjectConfig {
        ProjectConfig {
            name: Some("sample".to_string()),
            debug: Some(DebugConfig {
                eula,
                ..DebugConfig::default()
            }),
            ..ProjectConfig::default()
        }
    }

    #[tokio::test]
    async fn test_write_eula_refused_without_acceptance() {
        let temp_dir = tempfile::tempdir().unwrap();
        let pipeline =
            DebugPipeline::for_platform(Platform::Spigot, temp_dir.path(), &project_config(false));
        let runner = DebugRunner::new(&pipeline);

        let err = runner
            .execute(
                "acceptEula",
                &TaskAction::WriteEula {
                    server_dir: temp_dir.path().to_path_buf(),
                    accepted: false,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, SpigletError::Config(_)));
    }

    #[tokio::test]
    async fn test_write_eula_creates_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let pipeline =
            DebugPipeline::for_platform(Platform::Spigot, temp_dir.path(), &project_config(true));
        let runner = DebugRunner::new(&pipeline);

        runner
            .execute(
                "acceptEula",
                &TaskAction::WriteEula {
                    server_dir: temp_dir.path().join("server"),
                    accepted: true,
                },
            )
            .await
            .unwrap();
        let contents = fs::read_to_string(temp_dir.path().join("server").join("eula.txt")).unwrap();
        assert_eq!(contents, "eula=true\n");
    }

    #[tokio::test]
    async fn test_install_plugin_copies_artifact() {
        let temp_dir = tempfile::tempdir().unwrap();
        let artifact = temp_dir.path().join("build").join("libs").join("sample.jar");
        fs::create_dir_all(artifact.parent().unwrap()).unwrap();
        fs::write(&artifact, b"jar bytes").unwrap();

        let pipeline =
            DebugPipeline::for_platform(Platform::Spigot, temp_dir.path(), &project_config(true));
        let runner = DebugRunner::new(&pipeline);

        let plugins_dir = temp_dir.path().join("server").join("plugins");
        runner
            .execute(
                "preparePluginInstall",
                &TaskAction::InstallPlugin {
                    artifact: artifact.clone(),
                    plugins_dir: plugins_dir.clone(),
                },
            )
            .await
            .unwrap();
        assert_eq!(fs::read(plugins_dir.join("sample.jar")).unwrap(), b"jar bytes");
    }

    #[tokio::test]
    async fn test_missing_artifact_fails_eagerly() {
        let temp_dir = tempfile::tempdir().unwrap();
        let pipeline =
            DebugPipeline::for_platform(Platform::Spigot, temp_dir.path(), &project_config(true));
        let runner = DebugRunner::new(&pipeline);

        let err = runner
            .execute(
                "buildPluginArtifact",
                &TaskAction::BuildArtifact {
                    artifact: temp_dir.path().join("missing.jar"),
                },
            )
            .await
            .unwrap_err();
        assert!(err.to_string().contains("build the plugin first"));
    }
}
