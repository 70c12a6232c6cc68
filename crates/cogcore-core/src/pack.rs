use crate::config::{split_patterns, ConfigRecord};
use crate::error::{CoreError, Result};
use crate::skill::SkillDefinition;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Pack
// ---------------------------------------------------------------------------

/// An extension bundle scoped to a language or database ecosystem.
///
/// Directory contract: `defaults.conf` (flat key=value), `skills/*.yaml`,
/// `fitness.sh`, and `compact-rules.md` — all optional. Packs are loaded
/// additively at install time and never persist state themselves.
#[derive(Debug, Clone)]
pub struct Pack {
    pub name: String,
    pub root: PathBuf,
    pub defaults: ConfigRecord,
    pub skills: Vec<SkillDefinition>,
    pub compact_rules: Option<String>,
    pub fitness_script: Option<PathBuf>,
}

impl Pack {
    pub fn load(dir: &Path) -> Result<Pack> {
        if !dir.is_dir() {
            return Err(CoreError::PackNotFound(dir.display().to_string()));
        }
        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "pack".to_string());

        let defaults_path = dir.join("defaults.conf");
        let defaults = if defaults_path.is_file() {
            let data = std::fs::read_to_string(&defaults_path)?;
            ConfigRecord::parse(&data).map_err(|e| match e {
                CoreError::MalformedConfigLine(line) => CoreError::MalformedPackDefaults {
                    pack: name.clone(),
                    line,
                },
                other => other,
            })?
        } else {
            ConfigRecord::new()
        };

        let skills = SkillDefinition::load_dir(&dir.join("skills"))?;

        let rules_path = dir.join("compact-rules.md");
        let compact_rules = if rules_path.is_file() {
            Some(std::fs::read_to_string(&rules_path)?)
        } else {
            None
        };

        let fitness_path = dir.join("fitness.sh");
        let fitness_script = fitness_path.is_file().then_some(fitness_path);

        tracing::debug!(
            pack = %name,
            skills = skills.len(),
            has_defaults = !defaults.is_empty(),
            "loaded pack"
        );

        Ok(Pack {
            name,
            root: dir.to_path_buf(),
            defaults,
            skills,
            compact_rules,
            fitness_script,
        })
    }
}

// ---------------------------------------------------------------------------
// MergedConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct SkippedPack {
    pub path: String,
    pub reason: String,
}

/// The base install plus every merged pack. Skill collisions are fatal;
/// blocked-pattern lists combine by set union regardless of application
/// order, so no pack can narrow the safety baseline; every other
/// configuration key is last-applied-wins.
#[derive(Debug, Clone)]
pub struct MergedConfig {
    pub config: ConfigRecord,
    pub skills: BTreeMap<String, SkillDefinition>,
    pub loaded_packs: Vec<String>,
    pub skipped_packs: Vec<SkippedPack>,
}

impl MergedConfig {
    pub fn base(config: ConfigRecord, skills: Vec<SkillDefinition>) -> Self {
        let skills = skills.into_iter().map(|s| (s.name.clone(), s)).collect();
        Self {
            config,
            skills,
            loaded_packs: Vec::new(),
            skipped_packs: Vec::new(),
        }
    }

    pub fn merge(&mut self, pack: &Pack) -> Result<()> {
        // Collision check first: a failed merge must not leave the base
        // half-updated.
        for skill in &pack.skills {
            if self.skills.contains_key(&skill.name) {
                return Err(CoreError::SkillCollision {
                    skill: skill.name.clone(),
                    pack: pack.name.clone(),
                });
            }
        }

        let mut blocked = self.config.blocked_patterns();
        for (key, value) in pack.defaults.iter() {
            if key == "blocked_patterns" {
                blocked.extend(split_patterns(value));
            } else {
                self.config.set(key, value);
            }
        }
        self.config.set_blocked_patterns(&blocked);

        // Compaction rules concatenate without reformatting.
        if let Some(rules) = &pack.compact_rules {
            let existing = self.config.get("compact_rules").to_string();
            let combined = if existing.trim().is_empty() {
                rules.trim_end().to_string()
            } else {
                format!("{}\n{}", existing.trim_end(), rules.trim_end())
            };
            self.config.set("compact_rules", combined);
        }

        for skill in &pack.skills {
            self.skills.insert(skill.name.clone(), skill.clone());
        }
        self.loaded_packs.push(pack.name.clone());
        Ok(())
    }

    /// Load and merge each pack directory in order. With `allow_partial`,
    /// a failing pack is skipped and recorded; otherwise the first failure
    /// aborts the whole merge.
    pub fn merge_dirs(&mut self, dirs: &[PathBuf], allow_partial: bool) -> Result<()> {
        for dir in dirs {
            let outcome = Pack::load(dir).and_then(|pack| self.merge(&pack));
            if let Err(e) = outcome {
                if allow_partial {
                    tracing::warn!(pack = %dir.display(), error = %e, "skipping pack");
                    self.skipped_packs.push(SkippedPack {
                        path: dir.display().to_string(),
                        reason: e.to_string(),
                    });
                } else {
                    return Err(e);
                }
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
