//! Hook-to-advisory fallback translation.
//!
//! Platforms without programmatic pre-action enforcement can only load
//! passive documents. For those, each hook rule is re-expressed as a labeled
//! advisory statement, and the loss of the blocking guarantee is recorded so
//! it stays auditable. The translator never claims a guarantee the target
//! platform cannot provide.

use crate::hook::{default_safety_rules, HookDefinition, HookRule};

/// Label attached to every translated rule. Grep-able in generated guides.
pub const ADVISORY_LABEL: &str = "advisory — not enforced";

/// Render a hook's rules as ordered advisory bullets. Falls back to the
/// baseline safety rules when the hook source yielded nothing extractable,
/// so a degraded install is never silently rule-free.
pub fn translate_hook(hook: &HookDefinition) -> Vec<String> {
    let fallback;
    let rules: &[HookRule] = if hook.rules.is_empty() {
        fallback = default_safety_rules();
        &fallback
    } else {
        &hook.rules
    };
    rules.iter().map(render_rule).collect()
}

fn render_rule(rule: &HookRule) -> String {
    format!("- [{ADVISORY_LABEL}] {}", rule.reason)
}

/// The full advisory section for a set of hooks, ready to embed in an
/// always-loaded document. States the degradation up front.
pub fn advisory_section(adapter_name: &str, hooks: &[HookDefinition]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "The `{adapter_name}` platform cannot run enforcement hooks. The rules below \
         were translated from blocking hooks and are **not enforced** here — the \
         assistant must follow them as written.\n"
    ));
    for hook in hooks {
        out.push_str(&format!("\nFrom hook `{}`:\n", hook.name));
        for bullet in translate_hook(hook) {
            out.push_str(&bullet);
            out.push('\n');
        }
    }
    out
}
