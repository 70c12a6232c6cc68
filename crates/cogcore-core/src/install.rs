//! The install pipeline: validate, resolve tool grants, generate artifacts,
//! translate enforcement, write.
//!
//! Ordering is the contract: validation happens strictly before any
//! filesystem mutation, so a contract failure leaves zero artifacts. After
//! validation there is no rollback — a generation failure instead produces
//! a report naming exactly which artifacts were written and which stages
//! were never reached, so the caller can resume or clean up.

use crate::agent::AgentDoc;
use crate::artifact::{
    CapabilityDiagnostic, DegradationRecord, GeneratedArtifact, GuideOutcome, InstallOutcome,
    InstallReport,
};
use crate::capability::ToolGrant;
use crate::contract::{validate, Adapter, InstallContext};
use crate::error::Result;
use crate::hook::HookDefinition;
use crate::io;
use crate::pack::MergedConfig;
use crate::skill::SkillDefinition;
use crate::types::{EnforcementClass, EnforcementSupport};
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct InstallOptions {
    /// Regenerate the project guide even when one already exists.
    pub force: bool,
}

/// Run one install of `merged` onto `adapter`'s platform.
///
/// Returns `Err` only for pre-write failures (contract violations). Any
/// failure after validation is reported through the `outcome` field with
/// the pending stage list intact.
pub fn run(
    project_root: &Path,
    adapter: &dyn Adapter,
    merged: &MergedConfig,
    hooks: &[HookDefinition],
    agents: &[AgentDoc],
    opts: &InstallOptions,
) -> Result<InstallReport> {
    let (adapter_name, install_root) = validate(project_root, adapter).into_result()?;

    tracing::info!(
        adapter = %adapter_name,
        install_root = %install_root.display(),
        skills = merged.skills.len(),
        hooks = hooks.len(),
        "starting install run"
    );

    let skills: Vec<&SkillDefinition> = merged.skills.values().collect();

    let mut remaining: Vec<String> = Vec::new();
    remaining.push("scaffold".to_string());
    for skill in &skills {
        remaining.push(format!("skill {}", skill.name));
    }
    for hook in hooks {
        remaining.push(format!("hook {}", hook.name));
    }
    for agent in agents {
        remaining.push(format!("agent {}", agent.name));
    }
    remaining.push("settings".to_string());
    remaining.push("project guide".to_string());
    remaining.push("support artifacts".to_string());
    remaining.push("post-install".to_string());

    let ctx = InstallContext {
        project_root,
        install_root,
        config: &merged.config,
        hooks,
        agents,
        force: opts.force,
    };

    let mut report = InstallReport::new(adapter_name.as_str());
    if let Err(e) = execute(adapter, &ctx, &skills, &mut report, &mut remaining) {
        tracing::error!(error = %e, "install aborted after validation");
        report.outcome = InstallOutcome::Aborted {
            error: e.to_string(),
            pending: remaining,
        };
    }
    Ok(report)
}

fn execute(
    adapter: &dyn Adapter,
    ctx: &InstallContext<'_>,
    skills: &[&SkillDefinition],
    report: &mut InstallReport,
    remaining: &mut Vec<String>,
) -> Result<()> {
    let advisory_only = matches!(
        adapter.contract().enforcement,
        EnforcementSupport::AdvisoryOnly
    );

    // Optional operation: directory scaffold.
    for dir in adapter.scaffold_dirs() {
        io::ensure_dir(&ctx.install_root.join(dir))?;
    }
    remaining.remove(0);

    // Skills: capability resolution goes through the mapper for every
    // declared capability; unsupported ones become diagnostics, never
    // silent drops.
    for skill in skills {
        let grant = ToolGrant::resolve(
            adapter.capability_map(),
            skill.capabilities.iter().copied(),
        );
        for capability in &grant.unsupported {
            tracing::warn!(
                skill = %skill.name,
                capability = %capability,
                "capability unsupported on this adapter; skill installs with reduced grant"
            );
            report.diagnostics.push(CapabilityDiagnostic {
                skill: skill.name.clone(),
                capability: *capability,
                adapter: report.adapter.clone(),
            });
        }
        let artifact = adapter.install_skill(ctx, skill, &grant)?;
        write_artifact(ctx.project_root, &artifact, report)?;
        remaining.remove(0);
    }

    // Hooks: on advisory-only platforms a blocking hook loses its
    // guarantee; that loss is recorded per hook.
    for hook in ctx.hooks {
        let artifact = adapter.install_hook(ctx, hook)?;
        write_artifact(ctx.project_root, &artifact, report)?;
        if advisory_only && hook.intent == EnforcementClass::Blocking {
            report
                .degradations
                .push(DegradationRecord::blocking_to_advisory(
                    &hook.name,
                    &report.adapter,
                ));
        }
        remaining.remove(0);
    }

    for agent in ctx.agents {
        let artifact = adapter.install_agent(ctx, agent)?;
        write_artifact(ctx.project_root, &artifact, report)?;
        remaining.remove(0);
    }

    let settings = adapter.generate_settings(ctx)?;
    write_artifact(ctx.project_root, &settings, report)?;
    remaining.remove(0);

    // Never overwrite unreviewed user edits: the existing guide is read
    // here and the adapter decides Generated vs Skipped.
    let guide_abs = ctx.project_root.join(adapter.guide_path());
    let existing = std::fs::read_to_string(&guide_abs).ok();
    match adapter.generate_project_guide(ctx, existing.as_deref())? {
        GuideOutcome::Generated(artifact) => {
            write_artifact(ctx.project_root, &artifact, report)?;
        }
        GuideOutcome::Skipped { path } => {
            tracing::info!(path = %path.display(), "project guide exists; skipping");
            report.record_skipped(path, "exists; pass force to regenerate");
        }
    }
    remaining.remove(0);

    for artifact in adapter.support_artifacts(ctx)? {
        write_artifact(ctx.project_root, &artifact, report)?;
    }
    remaining.remove(0);

    // Optional operation: post-install step (default no-op).
    adapter.post_install(ctx)?;
    remaining.remove(0);

    Ok(())
}

fn write_artifact(
    project_root: &Path,
    artifact: &GeneratedArtifact,
    report: &mut InstallReport,
) -> Result<()> {
    let abs = project_root.join(&artifact.path);
    io::atomic_write(&abs, artifact.content.as_bytes())?;
    if artifact.executable {
        io::make_executable(&abs)?;
    }
    tracing::debug!(path = %artifact.path.display(), "wrote artifact");
    report.record_written(artifact.path.clone());
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
