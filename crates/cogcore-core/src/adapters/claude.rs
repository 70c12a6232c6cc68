//! Adapter for Claude Code — an enforcement-capable platform.
//!
//! Hooks install as executable guard scripts wired into the settings
//! bindings, so blocking intent survives translation at full strength.

use crate::agent::AgentDoc;
use crate::artifact::{ArtifactKind, GeneratedArtifact, GuideOutcome};
use crate::capability::{CapabilityMap, ToolGrant};
use crate::contract::{Adapter, AdapterContract, InstallContext};
use crate::error::Result;
use crate::hook::HookDefinition;
use crate::skill::SkillDefinition;
use crate::types::{
    AdapterKind, Capability, EnforcementLevel, EnforcementSupport, TriggerEvent,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

pub struct ClaudeCode {
    caps: CapabilityMap,
}

impl Default for ClaudeCode {
    fn default() -> Self {
        Self {
            caps: CapabilityMap::new()
                .grant(Capability::ReadFile, &["Read"])
                .grant(Capability::WriteFile, &["Write", "Edit"])
                .grant(Capability::SearchFiles, &["Grep"])
                .grant(Capability::GlobFiles, &["Glob"])
                .grant(Capability::ExecuteShell, &["Bash"])
                .grant(Capability::FetchWeb, &["WebFetch"])
                .grant(Capability::SearchWeb, &["WebSearch"])
                .grant(Capability::HumanInteraction, &["AskUserQuestion"]),
        }
    }
}

// ---------------------------------------------------------------------------
// Settings bindings document
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct Settings {
    permissions: Permissions,
    hooks: BTreeMap<&'static str, Vec<HookMatcher>>,
}

#[derive(Serialize)]
struct Permissions {
    allow: Vec<String>,
    deny: Vec<String>,
}

#[derive(Serialize)]
struct HookMatcher {
    matcher: String,
    hooks: Vec<HookCommand>,
}

#[derive(Serialize)]
struct HookCommand {
    #[serde(rename = "type")]
    kind: &'static str,
    command: String,
}

fn event_name(trigger: TriggerEvent) -> &'static str {
    match trigger {
        TriggerEvent::PreToolUse => "PreToolUse",
        TriggerEvent::PostToolUse => "PostToolUse",
        TriggerEvent::SessionStart => "SessionStart",
        TriggerEvent::UserPromptSubmit => "UserPromptSubmit",
    }
}

impl ClaudeCode {
    fn hook_command(hook: &HookDefinition) -> String {
        format!("$CLAUDE_PROJECT_DIR/.claude/hooks/{}.sh", hook.name)
    }
}

// ---------------------------------------------------------------------------
// Adapter impl
// ---------------------------------------------------------------------------

impl Adapter for ClaudeCode {
    fn kind(&self) -> AdapterKind {
        AdapterKind::ClaudeCode
    }

    fn contract(&self) -> AdapterContract {
        AdapterContract::full("claude-code", ".claude", EnforcementSupport::Blocking)
    }

    fn capability_map(&self) -> &CapabilityMap {
        &self.caps
    }

    fn install_hook(
        &self,
        _ctx: &InstallContext<'_>,
        hook: &HookDefinition,
    ) -> Result<GeneratedArtifact> {
        Ok(GeneratedArtifact {
            adapter: self.contract().name,
            path: PathBuf::from(format!(".claude/hooks/{}.sh", hook.name)),
            content: hook.source.clone(),
            kind: ArtifactKind::Support,
            enforcement: EnforcementLevel::Full,
            executable: true,
        })
    }

    fn install_agent(
        &self,
        _ctx: &InstallContext<'_>,
        agent: &AgentDoc,
    ) -> Result<GeneratedArtifact> {
        let content = format!(
            "---\nname: {}\ndescription: {}\n---\n\n{}",
            agent.name, agent.description, agent.body
        );
        Ok(GeneratedArtifact {
            adapter: self.contract().name,
            path: PathBuf::from(format!(".claude/agents/{}.md", agent.name)),
            content,
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
        let mut frontmatter = format!(
            "---\nname: {}\ndescription: {}\nversion: {}\ncategory: {}\n",
            skill.name, skill.description, skill.version, skill.category
        );
        if !grant.tokens.is_empty() {
            frontmatter.push_str(&format!("allowed-tools: {}\n", grant.tokens.join(", ")));
        }
        frontmatter.push_str("---\n\n");

        Ok(GeneratedArtifact {
            adapter: self.contract().name,
            path: PathBuf::from(format!(".claude/skills/{}/SKILL.md", skill.name)),
            content: frontmatter + &skill.body,
            kind: ArtifactKind::Support,
            enforcement: EnforcementLevel::Full,
            executable: false,
        })
    }

    fn generate_settings(&self, ctx: &InstallContext<'_>) -> Result<GeneratedArtifact> {
        let cfg = ctx.config;

        let mut allow = vec![
            "Read".to_string(),
            "Write".to_string(),
            "Edit".to_string(),
            "Glob".to_string(),
            "Grep".to_string(),
            format!("Bash({}:*)", cfg.get("lint_command")),
            format!("Bash({}:*)", cfg.get("test_command")),
        ];
        allow.sort();

        // Blocked patterns become explicit denies; the guard hook backs
        // them up at runtime.
        let deny: Vec<String> = cfg
            .blocked_patterns()
            .into_iter()
            .map(|p| format!("Bash({p})"))
            .collect();

        let mut hooks: BTreeMap<&'static str, Vec<HookMatcher>> = BTreeMap::new();
        for hook in ctx.hooks {
            hooks
                .entry(event_name(hook.trigger))
                .or_default()
                .push(HookMatcher {
                    matcher: "Bash".to_string(),
                    hooks: vec![HookCommand {
                        kind: "command",
                        command: Self::hook_command(hook),
                    }],
                });
        }

        let settings = Settings {
            permissions: Permissions { allow, deny },
            hooks,
        };
        let mut content = serde_json::to_string_pretty(&settings)?;
        content.push('\n');

        Ok(GeneratedArtifact {
            adapter: self.contract().name,
            path: PathBuf::from(".claude/settings.json"),
            content,
            kind: ArtifactKind::Bindings,
            enforcement: EnforcementLevel::Full,
            executable: false,
        })
    }

    fn guide_path(&self) -> PathBuf {
        PathBuf::from("CLAUDE.md")
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

        let cfg = ctx.config;
        let mut content = format!(
            "# {project}\n\n\
             - **Language**: {language}\n\
             - **Architecture**: {architecture}\n\
             - **Lint**: `{lint}`\n\
             - **Test**: `{test}`\n\
             - **Main branch**: `{branch}`\n\n\
             ## Safety Rules\n\n\
             These rules are enforced by pre-action hooks; a matching command is \
             blocked before it runs.\n\n",
            project = cfg.get("project_name"),
            language = cfg.get("language"),
            architecture = cfg.get("architecture"),
            lint = cfg.get("lint_command"),
            test = cfg.get("test_command"),
            branch = cfg.get("main_branch"),
        );
        for hook in ctx.hooks {
            for rule in &hook.rules {
                content.push_str(&format!("- {}\n", rule.reason));
            }
        }

        if !ctx.agents.is_empty() {
            content.push_str("\n## Specialist Agents\n\n");
            for agent in ctx.agents {
                content.push_str(&format!(
                    "- **{}**: `.claude/agents/{}.md`\n",
                    agent.title(),
                    agent.name
                ));
            }
        }

        Ok(GuideOutcome::Generated(GeneratedArtifact {
            adapter: self.contract().name,
            path,
            content,
            kind: ArtifactKind::Advisory,
            enforcement: EnforcementLevel::Full,
            executable: false,
        }))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
