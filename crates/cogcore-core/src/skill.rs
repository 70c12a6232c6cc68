use crate::error::Result;
use crate::types::{Capability, SkillCategory};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

// ---------------------------------------------------------------------------
// SkillInput
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputType {
    String,
    Integer,
    Boolean,
    Path,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillInput {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: InputType,
    #[serde(default)]
    pub required: bool,
}

// ---------------------------------------------------------------------------
// SkillDefinition
// ---------------------------------------------------------------------------

/// A named, versioned unit of assistant behavior in its universal form.
/// Authored once as a YAML descriptor; read-only during translation — an
/// adapter renders it into a platform artifact but never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillDefinition {
    pub name: String,
    pub version: String,
    pub description: String,
    pub category: SkillCategory,
    #[serde(default)]
    pub capabilities: BTreeSet<Capability>,
    #[serde(default)]
    pub inputs: Vec<SkillInput>,
    pub body: String,
}

impl SkillDefinition {
    pub fn from_yaml(data: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(data)?)
    }

    /// Load every `*.yaml` descriptor in `dir`, sorted by filename so the
    /// result is deterministic. A missing directory is an empty set; a
    /// malformed descriptor is an error.
    pub fn load_dir(dir: &Path) -> Result<Vec<SkillDefinition>> {
        if !dir.exists() {
            tracing::debug!(path = %dir.display(), "skill directory does not exist");
            return Ok(Vec::new());
        }

        let mut paths: Vec<_> = std::fs::read_dir(dir)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| {
                p.is_file() && p.extension().and_then(|e| e.to_str()) == Some("yaml")
            })
            .collect();
        paths.sort();

        let mut skills = Vec::new();
        for path in paths {
            let data = std::fs::read_to_string(&path)?;
            let skill = Self::from_yaml(&data)?;
            tracing::debug!(name = %skill.name, path = %path.display(), "loaded skill");
            skills.push(skill);
        }
        Ok(skills)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
