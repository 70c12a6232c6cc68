//! Built-in content shipped with every install: the baseline guard hook,
//! a starter skill set, specialist agent docs, and the document templates
//! the advisory-only adapters render.

use crate::agent::AgentDoc;
use crate::error::Result;
use crate::hook::HookDefinition;
use crate::skill::SkillDefinition;
use crate::types::{EnforcementClass, TriggerEvent};

// ---------------------------------------------------------------------------
// Hooks
// ---------------------------------------------------------------------------

/// Pre-action guard for shell commands. Each guard block pairs a
/// `grep -qE` condition with a `REASON="Blocked: ..."` assignment; the rule
/// extractor depends on that shape.
pub const VALIDATE_BASH_SH: &str = r#"#!/usr/bin/env bash
# cognitive-core guard: blocks destructive shell commands before they run.
# Reads the proposed command on stdin as JSON, exits 2 with a reason to veto.
set -euo pipefail

COMMAND=$(cat)

deny() {
    printf '{"decision":"block","reason":"%s"}\n' "$1"
    exit 2
}

if echo "$COMMAND" | grep -qE 'rm\s+-rf\s+/(etc|usr|var|home)?(\s|$|")'; then
    REASON="Blocked: rm targeting system-critical path"
    deny "$REASON"
fi

if echo "$COMMAND" | grep -qE 'git\s+push\s+.*--force.*(main|master)'; then
    REASON="Blocked: force push to the main branch"
    deny "$REASON"
fi

if echo "$COMMAND" | grep -qE 'git\s+reset\s+--hard'; then
    REASON="Blocked: git reset --hard may destroy uncommitted work"
    deny "$REASON"
fi

if echo "$COMMAND" | grep -qE '(DROP|TRUNCATE)\s+TABLE'; then
    REASON="Blocked: destructive DDL statement"
    deny "$REASON"
fi

if echo "$COMMAND" | grep -qE 'chmod\s+777'; then
    REASON="Blocked: world-writable permissions"
    deny "$REASON"
fi

if echo "$COMMAND" | grep -qE '(curl|wget)\s+[^|]*\|\s*(ba)?sh'; then
    REASON="Blocked: piping downloaded content to a shell"
    deny "$REASON"
fi

exit 0
"#;

pub fn builtin_hooks() -> Vec<HookDefinition> {
    vec![HookDefinition::from_source(
        "validate-bash",
        TriggerEvent::PreToolUse,
        EnforcementClass::Blocking,
        VALIDATE_BASH_SH,
    )]
}

// ---------------------------------------------------------------------------
// Skills
// ---------------------------------------------------------------------------

const COMMIT_DISCIPLINE_YAML: &str = r#"name: commit-discipline
version: 1.1.0
description: Stage deliberately and write commits in the project's format
category: molecular
capabilities: [read-file, execute-shell]
inputs:
  - name: scope
    type: string
body: |
  Before committing, inspect the staged diff and confirm it contains one
  logical change. Use the configured commit format and scope list. Never
  reference tooling in the message.
"#;

const TEST_FIRST_YAML: &str = r#"name: test-first
version: 1.0.0
description: Write the failing test before the implementation
category: atomic
capabilities: [read-file, write-file, execute-shell]
body: |
  Reproduce the requirement as a failing test under the configured test
  root, run the test command to watch it fail, then implement until green.
"#;

const DEPENDENCY_AUDIT_YAML: &str = r#"name: dependency-audit
version: 0.3.0
description: Review a new dependency before adding it
category: cellular
capabilities: [read-file, search-files, fetch-web]
inputs:
  - name: package
    type: string
    required: true
body: |
  Check maintenance status, license, and transitive weight before adding
  the package. Prefer the standard library or an existing dependency when
  the gap is small.
"#;

pub fn builtin_skills() -> Result<Vec<SkillDefinition>> {
    [COMMIT_DISCIPLINE_YAML, TEST_FIRST_YAML, DEPENDENCY_AUDIT_YAML]
        .iter()
        .map(|yaml| SkillDefinition::from_yaml(yaml))
        .collect()
}

// ---------------------------------------------------------------------------
// Agents
// ---------------------------------------------------------------------------

const REVIEWER_MD: &str = r#"# Code Reviewer

Reviews changes for correctness and fit with the project's conventions
before they merge. Reads the surrounding code, not just the diff. Flags
missing tests and silent behavior changes; does not restyle working code.
"#;

const SECURITY_AUDITOR_MD: &str = r#"# Security Auditor

Audits changes that touch authentication, secrets, subprocess execution,
or file-system boundaries. Treats any widening of the blocked-command
baseline as a finding.
"#;

pub fn builtin_agents() -> Vec<AgentDoc> {
    vec![
        AgentDoc {
            name: "reviewer".to_string(),
            description: "Code Reviewer".to_string(),
            body: REVIEWER_MD.to_string(),
        },
        AgentDoc {
            name: "security-auditor".to_string(),
            description: "Security Auditor".to_string(),
            body: SECURITY_AUDITOR_MD.to_string(),
        },
    ]
}

// ---------------------------------------------------------------------------
// Aider templates
// ---------------------------------------------------------------------------

/// Settings template for the aider adapter. Placeholders resolve from the
/// configuration record; rendering fails on any unresolved key.
pub const AIDER_CONF_TEMPLATE: &str = r#"# cognitive-core generated Aider configuration
# Project: {{project_name}}

# Model configuration
model: ollama_chat/{{model}}
editor-model: ollama_chat/{{model}}

# Edit format
edit-format: {{edit_format}}

# Auto-lint after edits
auto-lint: true
lint-cmd: {{lint_command}}

# Auto-test after edits
auto-test: false
test-cmd: {{test_command}}

# Read-only context files (always in context)
read:
  - CONVENTIONS.md
"#;

/// Project-guide template for the aider adapter. `safety_rules` and
/// `agent_context` are computed by the generator, not configuration keys.
pub const CONVENTIONS_TEMPLATE: &str = r#"# Project Conventions — {{project_name}}

## Project Identity
- **Project**: {{project_name}}
- **Language**: {{language}}
- **Architecture**: {{architecture}}
- **Database**: {{database}}

## Code Standards
- Follow {{language}} community best practices
- Run lint before every commit: `{{lint_command}}`
- Run tests: `{{test_command}}`
- All new code must have tests

## Git Conventions
- Main branch: `{{main_branch}}`
- Commit format: `type(scope): subject` ({{commit_format}} format)
- Scopes: {{commit_scopes}}
- NO AI/tool references in commit messages

## Safety Rules (CRITICAL — MUST FOLLOW)
{{safety_rules}}

## Architecture
Pattern: **{{architecture}}**
Source root: `{{src_root}}`
Test root: `{{test_root}}`

## Key Rules
{{compact_rules}}

## Agent Context
{{agent_context}}
"#;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
