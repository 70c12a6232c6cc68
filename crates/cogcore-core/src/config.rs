use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Documented defaults for every configuration key the generators read.
/// A key absent from both the record and this table resolves to "".
pub const DEFAULTS: &[(&str, &str)] = &[
    ("project_name", "project"),
    ("language", "unknown"),
    ("architecture", "none"),
    ("database", "none"),
    ("lint_command", "echo no-lint"),
    ("test_command", "echo no-tests"),
    ("main_branch", "main"),
    ("commit_format", "conventional"),
    ("commit_scopes", "core"),
    ("src_root", "src"),
    ("test_root", "tests"),
    ("security_level", "standard"),
    ("blocked_patterns", ""),
    ("ignore_patterns", ""),
    ("compact_rules", ""),
    ("env_vars", ""),
    ("model", "qwen2.5-coder:32b"),
    ("edit_format", "diff"),
    ("model_base_url", "http://localhost:11434"),
];

// ---------------------------------------------------------------------------
// ConfigRecord
// ---------------------------------------------------------------------------

/// Flat configuration record, supplied once per install run and passed by
/// value into every generator call. Generators never read ambient process
/// state; everything they need is in here or in [`DEFAULTS`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigRecord {
    values: BTreeMap<String, String>,
}

impl ConfigRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a flat `key=value` file. Blank lines and `#` comments are
    /// skipped; a leading `export ` and surrounding quotes are tolerated so
    /// shell-style config files keep working. A non-blank line without `=`
    /// is an error.
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::parse(&data)
    }

    pub fn parse(data: &str) -> Result<Self> {
        let mut values = BTreeMap::new();
        for raw in data.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let line = line.strip_prefix("export ").unwrap_or(line);
            let Some((key, value)) = line.split_once('=') else {
                return Err(CoreError::MalformedConfigLine(raw.to_string()));
            };
            let key = key.trim();
            if key.is_empty() {
                return Err(CoreError::MalformedConfigLine(raw.to_string()));
            }
            values.insert(key.to_string(), unquote(value.trim()).to_string());
        }
        Ok(Self { values })
    }

    /// Look up `key`, falling back to the documented default, then "".
    pub fn get(&self, key: &str) -> &str {
        if let Some(v) = self.values.get(key) {
            return v;
        }
        DEFAULTS
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
            .unwrap_or("")
    }

    /// Look up `key` without default fallback.
    pub fn get_raw(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Every key with its effective value: defaults overlaid by the record.
    /// This is the variable set templates resolve against.
    pub fn effective(&self) -> BTreeMap<String, String> {
        let mut out: BTreeMap<String, String> = DEFAULTS
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        for (k, v) in &self.values {
            out.insert(k.clone(), v.clone());
        }
        out
    }

    /// Comma-separated blocked command patterns, as a set.
    pub fn blocked_patterns(&self) -> BTreeSet<String> {
        split_patterns(self.get("blocked_patterns"))
    }

    /// Replace the blocked-pattern list with the given set, preserving the
    /// canonical comma-joined encoding.
    pub fn set_blocked_patterns(&mut self, patterns: &BTreeSet<String>) {
        let joined = patterns.iter().cloned().collect::<Vec<_>>().join(",");
        self.set("blocked_patterns", joined);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Split a comma-separated pattern list, trimming and dropping empties.
/// Patterns may contain spaces ("rm -rf /"), so the separator is the comma.
pub fn split_patterns(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

fn unquote(value: &str) -> &str {
    let v = value.trim();
    if v.len() >= 2
        && ((v.starts_with('"') && v.ends_with('"')) || (v.starts_with('\'') && v.ends_with('\'')))
    {
        &v[1..v.len() - 1]
    } else {
        v
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_unset_keys() {
        let cfg = ConfigRecord::new();
        assert_eq!(cfg.get("project_name"), "project");
        assert_eq!(cfg.get("main_branch"), "main");
        assert_eq!(cfg.get("nonexistent_key"), "");
    }

    #[test]
    fn set_overrides_default() {
        let mut cfg = ConfigRecord::new();
        cfg.set("project_name", "billing");
        assert_eq!(cfg.get("project_name"), "billing");
    }

    #[test]
    fn parse_flat_file() {
        let cfg = ConfigRecord::parse(
            "# comment\n\
             project_name=shop\n\
             export language=rust\n\
             lint_command=\"cargo clippy\"\n\
             \n",
        )
        .unwrap();
        assert_eq!(cfg.get("project_name"), "shop");
        assert_eq!(cfg.get("language"), "rust");
        assert_eq!(cfg.get("lint_command"), "cargo clippy");
    }

    #[test]
    fn parse_rejects_line_without_equals() {
        let err = ConfigRecord::parse("project_name shop\n").unwrap_err();
        assert!(matches!(err, CoreError::MalformedConfigLine(_)));
    }

    #[test]
    fn parse_rejects_empty_key() {
        assert!(ConfigRecord::parse("=value\n").is_err());
    }

    #[test]
    fn effective_overlays_defaults() {
        let mut cfg = ConfigRecord::new();
        cfg.set("language", "go");
        let eff = cfg.effective();
        assert_eq!(eff["language"], "go");
        assert_eq!(eff["main_branch"], "main");
    }

    #[test]
    fn blocked_patterns_split_on_commas() {
        let mut cfg = ConfigRecord::new();
        cfg.set("blocked_patterns", "rm -rf /, db.drop ,");
        let pats = cfg.blocked_patterns();
        assert_eq!(pats.len(), 2);
        assert!(pats.contains("rm -rf /"));
        assert!(pats.contains("db.drop"));
    }

    #[test]
    fn blocked_patterns_roundtrip() {
        let mut cfg = ConfigRecord::new();
        let set: BTreeSet<String> = ["db.drop".to_string(), "rm -rf /".to_string()]
            .into_iter()
            .collect();
        cfg.set_blocked_patterns(&set);
        assert_eq!(cfg.blocked_patterns(), set);
    }

    #[test]
    fn from_file_roundtrip() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("cognitive-core.conf");
        std::fs::write(&path, "project_name=demo\ntest_command='cargo test'\n").unwrap();
        let cfg = ConfigRecord::from_file(&path).unwrap();
        assert_eq!(cfg.get("project_name"), "demo");
        assert_eq!(cfg.get("test_command"), "cargo test");
    }
}
