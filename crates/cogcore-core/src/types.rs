use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Capability
// ---------------------------------------------------------------------------

/// Abstract permission categories, independent of any platform's tool names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Capability {
    ReadFile,
    WriteFile,
    SearchFiles,
    GlobFiles,
    ExecuteShell,
    FetchWeb,
    SearchWeb,
    HumanInteraction,
}

impl Capability {
    pub fn all() -> &'static [Capability] {
        &[
            Capability::ReadFile,
            Capability::WriteFile,
            Capability::SearchFiles,
            Capability::GlobFiles,
            Capability::ExecuteShell,
            Capability::FetchWeb,
            Capability::SearchWeb,
            Capability::HumanInteraction,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Capability::ReadFile => "read-file",
            Capability::WriteFile => "write-file",
            Capability::SearchFiles => "search-files",
            Capability::GlobFiles => "glob-files",
            Capability::ExecuteShell => "execute-shell",
            Capability::FetchWeb => "fetch-web",
            Capability::SearchWeb => "search-web",
            Capability::HumanInteraction => "human-interaction",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Capability {
    type Err = crate::error::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Capability::all()
            .iter()
            .find(|c| c.as_str() == s)
            .copied()
            .ok_or_else(|| crate::error::CoreError::UnknownCapability(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Operation
// ---------------------------------------------------------------------------

/// The operations an adapter may declare. The first five are required by the
/// contract; `Scaffold` and `PostInstall` are optional and default-implemented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    InstallHook,
    InstallAgent,
    InstallSkill,
    GenerateSettings,
    GenerateProjectGuide,
    Scaffold,
    PostInstall,
}

impl Operation {
    pub fn required() -> &'static [Operation] {
        &[
            Operation::InstallHook,
            Operation::InstallAgent,
            Operation::InstallSkill,
            Operation::GenerateSettings,
            Operation::GenerateProjectGuide,
        ]
    }

    pub fn optional() -> &'static [Operation] {
        &[Operation::Scaffold, Operation::PostInstall]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Operation::InstallHook => "install_hook",
            Operation::InstallAgent => "install_agent",
            Operation::InstallSkill => "install_skill",
            Operation::GenerateSettings => "generate_settings",
            Operation::GenerateProjectGuide => "generate_project_guide",
            Operation::Scaffold => "scaffold",
            Operation::PostInstall => "post_install",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SkillCategory
// ---------------------------------------------------------------------------

/// Composition level of a skill, from a single behavior to a full workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    Atomic,
    Molecular,
    Cellular,
    Organism,
}

impl SkillCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            SkillCategory::Atomic => "atomic",
            SkillCategory::Molecular => "molecular",
            SkillCategory::Cellular => "cellular",
            SkillCategory::Organism => "organism",
        }
    }
}

impl fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SkillCategory {
    type Err = crate::error::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "atomic" => Ok(SkillCategory::Atomic),
            "molecular" => Ok(SkillCategory::Molecular),
            "cellular" => Ok(SkillCategory::Cellular),
            "organism" => Ok(SkillCategory::Organism),
            _ => Err(crate::error::CoreError::UnknownCategory(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// TriggerEvent
// ---------------------------------------------------------------------------

/// The point in the assistant's lifecycle at which a hook fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerEvent {
    PreToolUse,
    PostToolUse,
    SessionStart,
    UserPromptSubmit,
}

impl TriggerEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            TriggerEvent::PreToolUse => "pre_tool_use",
            TriggerEvent::PostToolUse => "post_tool_use",
            TriggerEvent::SessionStart => "session_start",
            TriggerEvent::UserPromptSubmit => "user_prompt_submit",
        }
    }
}

impl fmt::Display for TriggerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TriggerEvent {
    type Err = crate::error::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pre_tool_use" => Ok(TriggerEvent::PreToolUse),
            "post_tool_use" => Ok(TriggerEvent::PostToolUse),
            "session_start" => Ok(TriggerEvent::SessionStart),
            "user_prompt_submit" => Ok(TriggerEvent::UserPromptSubmit),
            _ => Err(crate::error::CoreError::UnknownTrigger(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Enforcement
// ---------------------------------------------------------------------------

/// What a hook intends: block before the action, or advise only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnforcementClass {
    Blocking,
    Advisory,
}

impl fmt::Display for EnforcementClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EnforcementClass::Blocking => "blocking",
            EnforcementClass::Advisory => "advisory",
        };
        f.write_str(s)
    }
}

/// What a platform can actually execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnforcementSupport {
    /// The platform runs hook logic before the action and can veto it.
    Blocking,
    /// The platform only loads passive documents.
    AdvisoryOnly,
}

/// Whether a generated artifact carries the full guarantee or a degraded one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnforcementLevel {
    Full,
    Degraded,
}

// ---------------------------------------------------------------------------
// AdapterKind
// ---------------------------------------------------------------------------

/// Closed set of known platform adapters. Adding a platform extends this enum
/// and every `match` on it is a compiler-checked exhaustiveness exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdapterKind {
    ClaudeCode,
    Aider,
}

impl AdapterKind {
    pub fn all() -> &'static [AdapterKind] {
        &[AdapterKind::ClaudeCode, AdapterKind::Aider]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AdapterKind::ClaudeCode => "claude-code",
            AdapterKind::Aider => "aider",
        }
    }
}

impl fmt::Display for AdapterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AdapterKind {
    type Err = crate::error::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AdapterKind::all()
            .iter()
            .find(|k| k.as_str() == s)
            .copied()
            .ok_or_else(|| crate::error::CoreError::UnknownAdapter(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
