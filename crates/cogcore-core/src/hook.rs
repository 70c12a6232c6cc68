use crate::types::{EnforcementClass, TriggerEvent};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// HookRule / HookDefinition
// ---------------------------------------------------------------------------

/// One (trigger-condition, reason) pair extracted from a hook's rule source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HookRule {
    /// The pattern the hook matches against (as written in the source).
    pub condition: String,
    /// The operator-facing reason, verbatim from the source.
    pub reason: String,
}

/// A rule evaluated at a defined trigger point. `source` is the executable
/// rule script for platforms that can run it; `rules` is the structured
/// extraction used when only a passive document can be installed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HookDefinition {
    pub name: String,
    pub trigger: TriggerEvent,
    pub intent: EnforcementClass,
    pub source: String,
    pub rules: Vec<HookRule>,
}

impl HookDefinition {
    /// Build a hook from its shell rule source, extracting the structured
    /// rule set as it goes.
    pub fn from_source(
        name: impl Into<String>,
        trigger: TriggerEvent,
        intent: EnforcementClass,
        source: impl Into<String>,
    ) -> Self {
        let source = source.into();
        let rules = extract_rules(&source);
        Self {
            name: name.into(),
            trigger,
            intent,
            source,
            rules,
        }
    }
}

// ---------------------------------------------------------------------------
// Rule extraction
// ---------------------------------------------------------------------------

static GREP_RE: OnceLock<Regex> = OnceLock::new();
static REASON_RE: OnceLock<Regex> = OnceLock::new();

fn grep_re() -> &'static Regex {
    GREP_RE.get_or_init(|| Regex::new(r#"grep\s+-q[EF]?\s+'([^']+)'"#).unwrap())
}

fn reason_re() -> &'static Regex {
    REASON_RE.get_or_init(|| Regex::new(r#"REASON="(Blocked:[^"]+)""#).unwrap())
}

/// Extract (condition, reason) pairs from a shell rule source.
///
/// The source convention, shared with the bundled guard script: each guard
/// block tests the command with `grep -qE '<pattern>'` and assigns
/// `REASON="Blocked: ..."` before blocking. The pattern closest above a
/// REASON line is its condition. Order of appearance is preserved.
pub fn extract_rules(source: &str) -> Vec<HookRule> {
    let mut rules = Vec::new();
    let mut last_condition: Option<String> = None;

    for line in source.lines() {
        if let Some(caps) = grep_re().captures(line) {
            last_condition = Some(caps[1].to_string());
        }
        if let Some(caps) = reason_re().captures(line) {
            rules.push(HookRule {
                condition: last_condition.take().unwrap_or_default(),
                reason: caps[1].trim().to_string(),
            });
        }
    }
    rules
}

/// Baseline safety rules, used when a hook source yields no extractable
/// rules. Mirrors the blocked-command baseline every install carries.
pub fn default_safety_rules() -> Vec<HookRule> {
    let pairs: &[(&str, &str)] = &[
        (
            r"rm\s+-rf\s+/(etc|usr|var|home)?",
            "Blocked: rm -rf targeting system-critical paths",
        ),
        (
            r"git\s+push\s+.*--force.*\s(main|master)",
            "Blocked: force push to the main branch",
        ),
        (
            r"git\s+reset\s+--hard",
            "Blocked: git reset --hard may destroy uncommitted work",
        ),
        (
            r"(DROP|TRUNCATE)\s+TABLE",
            "Blocked: destructive DDL statement",
        ),
        (
            r"DELETE\s+FROM\s+\w+\s*;",
            "Blocked: DELETE without a WHERE clause",
        ),
        (r"rm\s+(-\w+\s+)*\.git", "Blocked: removing the .git directory"),
        (r"chmod\s+777", "Blocked: world-writable permissions"),
        (
            r"(curl|wget)\s+[^|]*\|\s*(ba)?sh",
            "Blocked: piping downloaded content to a shell",
        ),
        (
            r"base64\s+(-d|--decode)\s*\|\s*(ba)?sh",
            "Blocked: executing base64-decoded commands",
        ),
        (
            r"eval\s+.*\$\(",
            "Blocked: eval with command substitution",
        ),
    ];
    pairs
        .iter()
        .map(|(condition, reason)| HookRule {
            condition: condition.to_string(),
            reason: reason.to_string(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = r#"#!/usr/bin/env bash
COMMAND="$1"
if echo "$COMMAND" | grep -qE 'rm\s+-rf\s+/'; then
    REASON="Blocked: rm targeting system-critical path"
    deny "$REASON"
fi
if echo "$COMMAND" | grep -qE 'chmod\s+777'; then
    REASON="Blocked: world-writable permissions"
    deny "$REASON"
fi
"#;

    #[test]
    fn extracts_condition_reason_pairs_in_order() {
        let rules = extract_rules(SOURCE);
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].condition, r"rm\s+-rf\s+/");
        assert_eq!(rules[0].reason, "Blocked: rm targeting system-critical path");
        assert_eq!(rules[1].condition, r"chmod\s+777");
        assert_eq!(rules[1].reason, "Blocked: world-writable permissions");
    }

    #[test]
    fn non_blocked_reason_assignments_are_ignored() {
        let source = "REASON=\"informational note\"\n";
        assert!(extract_rules(source).is_empty());
    }

    #[test]
    fn reason_without_condition_keeps_empty_condition() {
        let source = "REASON=\"Blocked: bare reason\"\n";
        let rules = extract_rules(source);
        assert_eq!(rules.len(), 1);
        assert!(rules[0].condition.is_empty());
    }

    #[test]
    fn from_source_populates_rules() {
        let hook = HookDefinition::from_source(
            "validate-bash",
            TriggerEvent::PreToolUse,
            EnforcementClass::Blocking,
            SOURCE,
        );
        assert_eq!(hook.rules.len(), 2);
        assert_eq!(hook.source, SOURCE);
    }

    #[test]
    fn default_rules_are_nonempty_and_labeled() {
        let rules = default_safety_rules();
        assert!(rules.len() >= 8);
        for rule in &rules {
            assert!(rule.reason.starts_with("Blocked:"));
            assert!(!rule.condition.is_empty());
        }
    }
}
