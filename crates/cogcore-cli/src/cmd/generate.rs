use crate::output::print_json;
use anyhow::Context;
use clap::Subcommand;
use cogcore_core::artifact::GuideOutcome;
use cogcore_core::config::ConfigRecord;
use cogcore_core::contract::{validate, InstallContext};
use cogcore_core::{adapters, bundled};
use std::path::{Path, PathBuf};

#[derive(Subcommand)]
pub enum GenerateSubcommand {
    /// Preview the settings artifact for an adapter
    Settings {
        /// Target platform (claude-code, aider)
        #[arg(long)]
        adapter: String,

        /// Flat key=value configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Preview the project guide for an adapter
    Guide {
        /// Target platform (claude-code, aider)
        #[arg(long)]
        adapter: String,

        /// Flat key=value configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

pub fn run(root: &Path, subcommand: GenerateSubcommand, json: bool) -> anyhow::Result<()> {
    let (adapter_name, config_path) = match &subcommand {
        GenerateSubcommand::Settings { adapter, config }
        | GenerateSubcommand::Guide { adapter, config } => (adapter.clone(), config.clone()),
    };

    let adapter = adapters::parse(&adapter_name)?;
    let (_, install_root) = validate(root, adapter.as_ref()).into_result()?;

    let config = match config_path {
        Some(path) => ConfigRecord::from_file(&path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ConfigRecord::new(),
    };
    let hooks = bundled::builtin_hooks();
    let agents = bundled::builtin_agents();

    let ctx = InstallContext {
        project_root: root,
        install_root,
        config: &config,
        hooks: &hooks,
        agents: &agents,
        // Previews never touch disk, so the override flag is moot.
        force: true,
    };

    let artifact = match subcommand {
        GenerateSubcommand::Settings { .. } => adapter.generate_settings(&ctx)?,
        GenerateSubcommand::Guide { .. } => {
            match adapter.generate_project_guide(&ctx, None)? {
                GuideOutcome::Generated(artifact) => artifact,
                GuideOutcome::Skipped { path } => {
                    anyhow::bail!("guide generation skipped unexpectedly: {}", path.display())
                }
            }
        }
    };

    if json {
        print_json(&artifact)?;
    } else {
        print!("{}", artifact.content);
    }
    Ok(())
}
