use crate::types::Capability;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// CapabilityMap
// ---------------------------------------------------------------------------

/// Per-adapter mapping from abstract capabilities to ordered platform tool
/// tokens. Token order is preserved from the mapping table; an unmapped
/// capability resolves to an explicit [`Resolution::Unsupported`], never to
/// an empty list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CapabilityMap {
    entries: BTreeMap<Capability, Vec<String>>,
}

impl CapabilityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style registration. An empty token list is a programming
    /// error: it would be indistinguishable from "capability unsupported".
    pub fn grant(mut self, capability: Capability, tokens: &[&str]) -> Self {
        assert!(
            !tokens.is_empty(),
            "capability {capability} mapped to an empty token list; use no mapping instead"
        );
        self.entries
            .insert(capability, tokens.iter().map(|t| t.to_string()).collect());
        self
    }

    pub fn resolve(&self, capability: Capability) -> Resolution<'_> {
        match self.entries.get(&capability) {
            Some(tokens) => Resolution::Tools(tokens),
            None => Resolution::Unsupported(capability),
        }
    }

    pub fn supports(&self, capability: Capability) -> bool {
        self.entries.contains_key(&capability)
    }

    pub fn capabilities(&self) -> impl Iterator<Item = Capability> + '_ {
        self.entries.keys().copied()
    }
}

/// Outcome of one capability lookup. `Tools` is guaranteed non-empty by
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    Tools(&'a [String]),
    Unsupported(Capability),
}

// ---------------------------------------------------------------------------
// ToolGrant
// ---------------------------------------------------------------------------

/// The resolved tool grant for one skill on one adapter. Deduplication of
/// tokens arising from multiple capabilities happens here, in the consumer,
/// keeping the mapper itself a pure lookup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolGrant {
    pub tokens: Vec<String>,
    pub unsupported: Vec<Capability>,
}

impl ToolGrant {
    pub fn resolve(map: &CapabilityMap, capabilities: impl IntoIterator<Item = Capability>) -> Self {
        let mut tokens: Vec<String> = Vec::new();
        let mut unsupported = Vec::new();
        for cap in capabilities {
            match map.resolve(cap) {
                Resolution::Tools(list) => {
                    for token in list {
                        if !tokens.contains(token) {
                            tokens.push(token.clone());
                        }
                    }
                }
                Resolution::Unsupported(c) => unsupported.push(c),
            }
        }
        Self {
            tokens,
            unsupported,
        }
    }

    pub fn is_reduced(&self) -> bool {
        !self.unsupported.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_map() -> CapabilityMap {
        CapabilityMap::new()
            .grant(Capability::ReadFile, &["Read"])
            .grant(Capability::WriteFile, &["Write", "Edit"])
            .grant(Capability::ExecuteShell, &["Bash"])
    }

    #[test]
    fn resolve_returns_ordered_tokens() {
        let map = sample_map();
        match map.resolve(Capability::WriteFile) {
            Resolution::Tools(tokens) => assert_eq!(tokens, ["Write", "Edit"]),
            Resolution::Unsupported(_) => panic!("expected tokens"),
        }
    }

    #[test]
    fn resolve_unmapped_is_explicit_unsupported() {
        let map = sample_map();
        assert_eq!(
            map.resolve(Capability::FetchWeb),
            Resolution::Unsupported(Capability::FetchWeb)
        );
    }

    #[test]
    #[should_panic(expected = "empty token list")]
    fn empty_token_list_is_rejected() {
        let _ = CapabilityMap::new().grant(Capability::ReadFile, &[]);
    }

    #[test]
    fn grant_dedups_across_capabilities() {
        let map = CapabilityMap::new()
            .grant(Capability::ReadFile, &["Read"])
            .grant(Capability::SearchFiles, &["Grep", "Read"]);
        let grant = ToolGrant::resolve(&map, [Capability::ReadFile, Capability::SearchFiles]);
        assert_eq!(grant.tokens, ["Read", "Grep"]);
        assert!(!grant.is_reduced());
    }

    #[test]
    fn grant_collects_unsupported() {
        let map = sample_map();
        let grant = ToolGrant::resolve(
            &map,
            [Capability::ReadFile, Capability::HumanInteraction],
        );
        assert_eq!(grant.tokens, ["Read"]);
        assert_eq!(grant.unsupported, [Capability::HumanInteraction]);
        assert!(grant.is_reduced());
    }

    #[test]
    fn grant_embeds_exactly_the_mapped_tokens() {
        // read-file → ["Read"], execute-shell → ["Bash"] must yield exactly
        // those two tokens and no others.
        let map = CapabilityMap::new()
            .grant(Capability::ReadFile, &["Read"])
            .grant(Capability::ExecuteShell, &["Bash"]);
        let grant = ToolGrant::resolve(&map, [Capability::ReadFile, Capability::ExecuteShell]);
        assert_eq!(grant.tokens, ["Read", "Bash"]);
    }
}
