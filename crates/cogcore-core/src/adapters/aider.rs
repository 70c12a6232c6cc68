//! Adapter for Aider — an advisory-only platform.
//!
//! Aider loads passive documents and auto-runs lint/test commands, but has
//! no pre-action hook point. Blocking hooks therefore degrade to advisory
//! statements in CONVENTIONS.md; the install pipeline records that loss per
//! hook.

use crate::advisory;
use crate::agent::AgentDoc;
use crate::bundled::{AIDER_CONF_TEMPLATE, CONVENTIONS_TEMPLATE};
use crate::artifact::{ArtifactKind, GeneratedArtifact, GuideOutcome};
use crate::capability::{CapabilityMap, ToolGrant};
use crate::config::{split_patterns, ConfigRecord};
use crate::contract::{Adapter, AdapterContract, InstallContext};
use crate::error::Result;
use crate::hook::HookDefinition;
use crate::skill::SkillDefinition;
use crate::template::Template;
use crate::types::{AdapterKind, Capability, EnforcementLevel, EnforcementSupport};
use std::collections::BTreeMap;
use std::path::PathBuf;

pub struct Aider {
    caps: CapabilityMap,
    settings_template: Option<Template>,
    guide_template: Option<Template>,
}

impl Default for Aider {
    fn default() -> Self {
        Self {
            caps: capability_map(),
            settings_template: Some(
                Template::new(".aider.conf.yml", AIDER_CONF_TEMPLATE)
                    .expect("bundled settings template is well-formed"),
            ),
            guide_template: Some(
                Template::new("CONVENTIONS.md", CONVENTIONS_TEMPLATE)
                    .expect("bundled guide template is well-formed"),
            ),
        }
    }
}

impl Aider {
    /// No registered templates: both generators take the built-in fallback
    /// path. The fallback must stay behaviorally in sync with the templates.
    pub fn without_templates() -> Self {
        Self {
            caps: capability_map(),
            settings_template: None,
            guide_template: None,
        }
    }

    /// Replace the settings template (used to exercise strict rendering).
    pub fn with_settings_template(template: Template) -> Self {
        Self {
            settings_template: Some(template),
            ..Self::default()
        }
    }
}

fn capability_map() -> CapabilityMap {
    // Aider exposes in-chat commands, not tools; unmapped capabilities
    // surface as explicit Unsupported diagnostics.
    CapabilityMap::new()
        .grant(Capability::ReadFile, &["/read"])
        .grant(Capability::ExecuteShell, &["/run"])
        .grant(Capability::FetchWeb, &["/web"])
}

// ---------------------------------------------------------------------------
// Settings model
// ---------------------------------------------------------------------------

/// The logical bindings behind the settings artifact. Both the templated
/// and the no-template path derive from this one struct, which is what
/// keeps them behaviorally in sync as either evolves.
struct SettingsModel {
    project_name: String,
    model: String,
    edit_format: String,
    lint_command: String,
    test_command: String,
}

impl SettingsModel {
    fn from_config(cfg: &ConfigRecord) -> Self {
        Self {
            project_name: cfg.get("project_name").to_string(),
            model: cfg.get("model").to_string(),
            edit_format: cfg.get("edit_format").to_string(),
            lint_command: cfg.get("lint_command").to_string(),
            test_command: cfg.get("test_command").to_string(),
        }
    }

    /// Minimal artifact with the same trigger points and permission set as
    /// the templated output: model wiring, edit format, auto-lint binding,
    /// test binding, always-read guide.
    fn render_fallback(&self) -> String {
        format!(
            "# cognitive-core generated Aider configuration\n\
             # Project: {project}\n\
             model: ollama_chat/{model}\n\
             editor-model: ollama_chat/{model}\n\
             edit-format: {edit_format}\n\
             auto-lint: true\n\
             lint-cmd: {lint}\n\
             auto-test: false\n\
             test-cmd: {test}\n\
             read:\n\
             \x20 - CONVENTIONS.md\n",
            project = self.project_name,
            model = self.model,
            edit_format = self.edit_format,
            lint = self.lint_command,
            test = self.test_command,
        )
    }
}

// ---------------------------------------------------------------------------
// Guide sections
// ---------------------------------------------------------------------------

fn agent_context(agents: &[AgentDoc]) -> String {
    if agents.is_empty() {
        return "No agent documentation installed.".to_string();
    }
    let refs: Vec<String> = agents
        .iter()
        .map(|a| format!("- **{}**: `.cognitive-core/agents/{}.md`", a.title(), a.name))
        .collect();
    format!(
        "Agent documentation is available for reference:\n{}\n\n\
         Use their guidance when working in their specialist domains.",
        refs.join("\n")
    )
}

fn env_exports(cfg: &ConfigRecord) -> String {
    let raw = cfg.get("env_vars");
    let exports: Vec<String> = raw
        .split(';')
        .map(str::trim)
        .filter(|entry| entry.contains('='))
        .map(|entry| format!("export {entry}"))
        .collect();
    if exports.is_empty() {
        "# No additional environment variables configured".to_string()
    } else {
        exports.join("\n")
    }
}

// ---------------------------------------------------------------------------
// Adapter impl
// ---------------------------------------------------------------------------

impl Adapter for Aider {
    fn kind(&self) -> AdapterKind {
        AdapterKind::Aider
    }

    fn contract(&self) -> AdapterContract {
        AdapterContract::full(
            "aider",
            ".cognitive-core",
            EnforcementSupport::AdvisoryOnly,
        )
    }

    fn capability_map(&self) -> &CapabilityMap {
        &self.caps
    }

    fn install_hook(
        &self,
        _ctx: &InstallContext<'_>,
        hook: &HookDefinition,
    ) -> Result<GeneratedArtifact> {
        let mut content = format!(
            "# Hook: {} ({})\n\n\
             Translated to advisory form — this platform cannot execute blocking hooks.\n\n",
            hook.name, hook.trigger
        );
        for bullet in advisory::translate_hook(hook) {
            content.push_str(&bullet);
            content.push('\n');
        }
        Ok(GeneratedArtifact {
            adapter: self.contract().name,
            path: PathBuf::from(format!(".cognitive-core/advisories/{}.md", hook.name)),
            content,
            kind: ArtifactKind::Advisory,
            enforcement: EnforcementLevel::Degraded,
            executable: false,
        })
    }

    fn install_agent(
        &self,
        _ctx: &InstallContext<'_>,
        agent: &AgentDoc,
    ) -> Result<GeneratedArtifact> {
        Ok(GeneratedArtifact {
            adapter: self.contract().name,
            path: PathBuf::from(format!(".cognitive-core/agents/{}.md", agent.name)),
            content: agent.body.clone(),
            kind: ArtifactKind::Support,
            enforcement: EnforcementLevel::Full,
            executable: false,
        })
    }

    fn install_skill(
        &self,
        _ctx: &InstallContext<'_>,
        skill: &SkillDefinition,
        grant: &ToolGrant,
    ) -> Result<GeneratedArtifact> {
        let mut content = format!(
            "# {}\n\n{}\n\n- Version: {}\n- Category: {}\n",
            skill.name, skill.description, skill.version, skill.category
        );
        if !grant.tokens.is_empty() {
            content.push_str(&format!("- Commands: {}\n", grant.tokens.join(", ")));
        }
        if !grant.unsupported.is_empty() {
            let caps: Vec<&str> = grant.unsupported.iter().map(|c| c.as_str()).collect();
            content.push_str(&format!("- Unavailable on this platform: {}\n", caps.join(", ")));
        }
        content.push('\n');
        content.push_str(&skill.body);

        Ok(GeneratedArtifact {
            adapter: self.contract().name,
            path: PathBuf::from(format!(".cognitive-core/skills/{}.md", skill.name)),
            content,
            kind: ArtifactKind::Support,
            enforcement: EnforcementLevel::Full,
            executable: false,
        })
    }

    fn generate_settings(&self, ctx: &InstallContext<'_>) -> Result<GeneratedArtifact> {
        let content = match &self.settings_template {
            Some(template) => template.render(&ctx.config.effective())?,
            None => SettingsModel::from_config(ctx.config).render_fallback(),
        };
        Ok(GeneratedArtifact {
            adapter: self.contract().name,
            path: PathBuf::from(".aider.conf.yml"),
            content,
            kind: ArtifactKind::Bindings,
            enforcement: EnforcementLevel::Degraded,
            executable: false,
        })
    }

    fn guide_path(&self) -> PathBuf {
        PathBuf::from("CONVENTIONS.md")
    }

    fn generate_project_guide(
        &self,
        ctx: &InstallContext<'_>,
        existing: Option<&str>,
    ) -> Result<GuideOutcome> {
        let path = self.guide_path();
        if existing.is_some() && !ctx.force {
            return Ok(GuideOutcome::Skipped { path });
        }

        let safety_rules = advisory::advisory_section("aider", ctx.hooks);
        let agent_refs = agent_context(ctx.agents);

        let content = match &self.guide_template {
            Some(template) => {
                let mut vars: BTreeMap<String, String> = ctx.config.effective();
                vars.insert("safety_rules".to_string(), safety_rules);
                vars.insert("agent_context".to_string(), agent_refs);
                template.render(&vars)?
            }
            None => {
                let cfg = ctx.config;
                format!(
                    "# Project Conventions — {project}\n\n\
                     ## Project Identity\n\
                     - **Project**: {project}\n\
                     - **Language**: {language}\n\
                     - **Architecture**: {architecture}\n\
                     - **Database**: {database}\n\n\
                     ## Code Standards\n\
                     - Follow {language} community best practices\n\
                     - Run lint before every commit: `{lint}`\n\
                     - Run tests: `{test}`\n\
                     - All new code must have tests\n\n\
                     ## Git Conventions\n\
                     - Main branch: `{branch}`\n\
                     - Commit format: `type(scope): subject` ({commit_format} format)\n\
                     - Scopes: {scopes}\n\
                     - NO AI/tool references in commit messages\n\n\
                     ## Safety Rules (CRITICAL — MUST FOLLOW)\n\
                     {safety_rules}\n\n\
                     ## Architecture\n\
                     Pattern: **{architecture}**\n\
                     Source root: `{src_root}`\n\
                     Test root: `{test_root}`\n\n\
                     ## Key Rules\n\
                     {compact_rules}\n\n\
                     ## Agent Context\n\
                     {agent_context}\n",
                    project = cfg.get("project_name"),
                    language = cfg.get("language"),
                    architecture = cfg.get("architecture"),
                    database = cfg.get("database"),
                    lint = cfg.get("lint_command"),
                    test = cfg.get("test_command"),
                    branch = cfg.get("main_branch"),
                    commit_format = cfg.get("commit_format"),
                    scopes = cfg.get("commit_scopes"),
                    safety_rules = safety_rules,
                    src_root = cfg.get("src_root"),
                    test_root = cfg.get("test_root"),
                    compact_rules = cfg.get("compact_rules"),
                    agent_context = agent_refs,
                )
            }
        };

        Ok(GuideOutcome::Generated(GeneratedArtifact {
            adapter: self.contract().name,
            path,
            content,
            kind: ArtifactKind::Advisory,
            enforcement: EnforcementLevel::Degraded,
            executable: false,
        }))
    }

    fn support_artifacts(&self, ctx: &InstallContext<'_>) -> Result<Vec<GeneratedArtifact>> {
        let cfg = ctx.config;

        let mut ignore = String::from(
            "# cognitive-core generated .aiderignore\n\
             # Prevents Aider from reading sensitive files\n\n\
             # Secrets and credentials\n\
             .env\n\
             .env.*\n\
             *.pem\n\
             *.key\n\
             credentials.json\n\
             secrets.yaml\n\
             secrets.yml\n\n\
             # Build artifacts\n\
             node_modules/\n\
             target/\n\
             __pycache__/\n\
             .git/\n\n\
             # IDE and editor files\n\
             .idea/\n\
             .vscode/\n\
             *.swp\n",
        );
        let extra = split_patterns(cfg.get("ignore_patterns"));
        if !extra.is_empty() {
            ignore.push_str("\n# Project-specific ignore patterns\n");
            for pattern in extra {
                ignore.push_str(&pattern);
                ignore.push('\n');
            }
        }

        let launcher = format!(
            "#!/bin/bash\n\
             # cognitive-core Aider launcher — {project}\n\
             set -euo pipefail\n\n\
             export OLLAMA_API_BASE=\"${{OLLAMA_API_BASE:-{base_url}}}\"\n\n\
             {exports}\n\n\
             echo \"=== cognitive-core Aider launcher ===\"\n\
             echo \"Project:  {project}\"\n\
             echo \"Model:    {model}\"\n\
             echo \"Ollama:   ${{OLLAMA_API_BASE}}\"\n\n\
             exec aider \"$@\"\n",
            project = cfg.get("project_name"),
            base_url = cfg.get("model_base_url"),
            model = cfg.get("model"),
            exports = env_exports(cfg),
        );

        Ok(vec![
            GeneratedArtifact {
                adapter: self.contract().name,
                path: PathBuf::from(".aiderignore"),
                content: ignore,
                kind: ArtifactKind::Support,
                enforcement: EnforcementLevel::Full,
                executable: false,
            },
            GeneratedArtifact {
                adapter: self.contract().name,
                path: PathBuf::from("cc-aider-start.sh"),
                content: launcher,
                kind: ArtifactKind::Support,
                enforcement: EnforcementLevel::Full,
                executable: true,
            },
        ])
    }

    fn scaffold_dirs(&self) -> &'static [&'static str] {
        &["skills", "agents", "advisories"]
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
