use crate::error::{CoreError, Result};
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

static PLACEHOLDER_RE: OnceLock<Regex> = OnceLock::new();

fn placeholder_re() -> &'static Regex {
    PLACEHOLDER_RE.get_or_init(|| Regex::new(r"\{\{([A-Za-z0-9_]+)\}\}").unwrap())
}

/// A document template with `{{key}}` placeholders.
///
/// Rendering is strict: every placeholder must resolve or rendering fails
/// with the complete list of unresolved keys. There is no blank-on-miss.
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    raw: String,
}

impl Template {
    pub fn new(name: impl Into<String>, raw: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let raw = raw.into();
        check_well_formed(&name, &raw)?;
        Ok(Self { name, raw })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Every distinct placeholder key in the template.
    pub fn placeholders(&self) -> BTreeSet<String> {
        placeholder_re()
            .captures_iter(&self.raw)
            .map(|c| c[1].to_string())
            .collect()
    }

    /// Substitute every placeholder from `vars`. Unresolved keys are
    /// collected and reported together, never silently blanked.
    pub fn render(&self, vars: &BTreeMap<String, String>) -> Result<String> {
        let missing: Vec<String> = self
            .placeholders()
            .into_iter()
            .filter(|key| !vars.contains_key(key))
            .collect();
        if !missing.is_empty() {
            return Err(CoreError::UnresolvedPlaceholders {
                artifact: self.name.clone(),
                keys: missing,
            });
        }

        let out = placeholder_re().replace_all(&self.raw, |caps: &regex::Captures<'_>| {
            vars[&caps[1]].clone()
        });
        Ok(out.into_owned())
    }
}

/// Reject templates with an opening `{{` that never closes or that wraps a
/// non-identifier key. Caught at registration, not at render time.
fn check_well_formed(name: &str, raw: &str) -> Result<()> {
    let mut rest = raw;
    while let Some(start) = rest.find("{{") {
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            return Err(CoreError::MalformedTemplate {
                artifact: name.to_string(),
                reason: "unclosed '{{' placeholder".to_string(),
            });
        };
        let key = &after[..end];
        if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(CoreError::MalformedTemplate {
                artifact: name.to_string(),
                reason: format!("invalid placeholder key {key:?}"),
            });
        }
        rest = &after[end + 2..];
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn renders_all_placeholders() {
        let t = Template::new("conf", "model: {{model}}\nproject: {{project_name}}\n").unwrap();
        let out = t
            .render(&vars(&[("model", "m1"), ("project_name", "shop")]))
            .unwrap();
        assert_eq!(out, "model: m1\nproject: shop\n");
    }

    #[test]
    fn missing_keys_reported_together() {
        let t = Template::new("conf", "{{a}} {{b}} {{a}}").unwrap();
        let err = t.render(&vars(&[])).unwrap_err();
        match err {
            CoreError::UnresolvedPlaceholders { artifact, keys } => {
                assert_eq!(artifact, "conf");
                assert_eq!(keys, ["a", "b"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn no_silent_blank_substitution() {
        let t = Template::new("conf", "value={{unset_key}}").unwrap();
        assert!(t.render(&vars(&[("other", "x")])).is_err());
    }

    #[test]
    fn unclosed_placeholder_is_malformed() {
        let err = Template::new("conf", "broken {{key").unwrap_err();
        assert!(matches!(err, CoreError::MalformedTemplate { .. }));
    }

    #[test]
    fn invalid_key_is_malformed() {
        assert!(Template::new("conf", "{{bad key}}").is_err());
        assert!(Template::new("conf", "{{}}").is_err());
    }

    #[test]
    fn render_is_deterministic() {
        let t = Template::new("conf", "{{x}}-{{y}}").unwrap();
        let v = vars(&[("x", "1"), ("y", "2")]);
        assert_eq!(t.render(&v).unwrap(), t.render(&v).unwrap());
    }

    #[test]
    fn placeholders_listed_sorted_unique() {
        let t = Template::new("conf", "{{b}}{{a}}{{b}}").unwrap();
        let keys: Vec<String> = t.placeholders().into_iter().collect();
        assert_eq!(keys, ["a", "b"]);
    }
}
