use crate::output::print_json;
use anyhow::Context;
use cogcore_core::artifact::InstallOutcome;
use cogcore_core::config::ConfigRecord;
use cogcore_core::install::{self, InstallOptions};
use cogcore_core::pack::MergedConfig;
use cogcore_core::{adapters, bundled};
use std::path::{Path, PathBuf};

#[allow(clippy::too_many_arguments)]
pub fn run(
    root: &Path,
    adapter_name: &str,
    config_path: Option<&Path>,
    force: bool,
    packs: &[PathBuf],
    allow_partial_packs: bool,
    json: bool,
) -> anyhow::Result<()> {
    let adapter = adapters::parse(adapter_name)?;

    let config = load_config(root, config_path)?;
    let mut merged = MergedConfig::base(config, bundled::builtin_skills()?);
    merged
        .merge_dirs(packs, allow_partial_packs)
        .context("failed to merge extension packs")?;

    let hooks = bundled::builtin_hooks();
    let agents = bundled::builtin_agents();

    let report = install::run(
        root,
        adapter.as_ref(),
        &merged,
        &hooks,
        &agents,
        &InstallOptions { force },
    )?;

    if json {
        print_json(&report)?;
    } else {
        println!("Installing cognitive-core for: {adapter_name}");
        for path in &report.written {
            println!("  written: {}", path.display());
        }
        for skipped in &report.skipped {
            println!("  skipped: {} ({})", skipped.path.display(), skipped.reason);
        }
        for diag in &report.diagnostics {
            println!(
                "  warning: skill '{}' capability '{}' is unsupported on {}",
                diag.skill, diag.capability, diag.adapter
            );
        }
        for deg in &report.degradations {
            println!(
                "  degraded: hook '{}' {} -> {} on {}",
                deg.hook, deg.from, deg.to, deg.adapter
            );
        }
        for pack in &merged.skipped_packs {
            println!("  pack skipped: {} ({})", pack.path, pack.reason);
        }
    }

    match &report.outcome {
        InstallOutcome::Completed => Ok(()),
        InstallOutcome::Aborted { error, pending } => {
            anyhow::bail!(
                "install aborted: {error}; {} stage(s) not reached: {}",
                pending.len(),
                pending.join(", ")
            )
        }
    }
}

fn load_config(root: &Path, explicit: Option<&Path>) -> anyhow::Result<ConfigRecord> {
    match explicit {
        Some(path) => ConfigRecord::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => {
            let default = root.join("cognitive-core.conf");
            if default.is_file() {
                ConfigRecord::from_file(&default)
                    .with_context(|| format!("failed to load config {}", default.display()))
            } else {
                Ok(ConfigRecord::new())
            }
        }
    }
}
