use crate::agent::AgentDoc;
use crate::artifact::{GeneratedArtifact, GuideOutcome};
use crate::capability::{CapabilityMap, ToolGrant};
use crate::config::ConfigRecord;
use crate::error::{CoreError, Result};
use crate::hook::HookDefinition;
use crate::skill::SkillDefinition;
use crate::types::{AdapterKind, EnforcementSupport, Operation};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// AdapterContract
// ---------------------------------------------------------------------------

/// The binding surface a platform adapter presents to the validator:
/// identity, the directory it owns, the operations it declares, and whether
/// it can execute blocking hooks. Immutable once built; artifact generation
/// must not touch an adapter whose contract has not passed validation in
/// the current run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdapterContract {
    pub name: String,
    /// Relative path under the project root that the adapter owns.
    pub install_root: String,
    pub operations: BTreeSet<Operation>,
    pub enforcement: EnforcementSupport,
}

impl AdapterContract {
    /// A contract declaring every operation, required and optional.
    pub fn full(
        name: impl Into<String>,
        install_root: impl Into<String>,
        enforcement: EnforcementSupport,
    ) -> Self {
        let operations = Operation::required()
            .iter()
            .chain(Operation::optional())
            .copied()
            .collect();
        Self {
            name: name.into(),
            install_root: install_root.into(),
            operations,
            enforcement,
        }
    }
}

// ---------------------------------------------------------------------------
// InstallContext
// ---------------------------------------------------------------------------

/// Everything a generator call may read. Built once per run; generators
/// never reach for ambient process state.
#[derive(Debug)]
pub struct InstallContext<'a> {
    pub project_root: &'a Path,
    pub install_root: PathBuf,
    pub config: &'a ConfigRecord,
    pub hooks: &'a [HookDefinition],
    pub agents: &'a [AgentDoc],
    pub force: bool,
}

// ---------------------------------------------------------------------------
// Adapter trait
// ---------------------------------------------------------------------------

/// A platform-specific implementation of the translation contract.
///
/// The five required operations are plain trait methods; the optional
/// scaffold and post-install operations have the documented defaults (a
/// standard directory layout, a no-op). All generators are pure — they
/// return artifacts and the install runner owns the writes.
pub trait Adapter {
    fn kind(&self) -> AdapterKind;
    fn contract(&self) -> AdapterContract;
    fn capability_map(&self) -> &CapabilityMap;

    fn install_hook(
        &self,
        ctx: &InstallContext<'_>,
        hook: &HookDefinition,
    ) -> Result<GeneratedArtifact>;

    fn install_agent(
        &self,
        ctx: &InstallContext<'_>,
        agent: &AgentDoc,
    ) -> Result<GeneratedArtifact>;

    fn install_skill(
        &self,
        ctx: &InstallContext<'_>,
        skill: &SkillDefinition,
        grant: &ToolGrant,
    ) -> Result<GeneratedArtifact>;

    fn generate_settings(&self, ctx: &InstallContext<'_>) -> Result<GeneratedArtifact>;

    /// Where the project guide lives, relative to the project root. The
    /// install runner reads this file to supply `existing` below.
    fn guide_path(&self) -> PathBuf;

    fn generate_project_guide(
        &self,
        ctx: &InstallContext<'_>,
        existing: Option<&str>,
    ) -> Result<GuideOutcome>;

    /// Adapter-specific files generated alongside the settings artifact
    /// (ignore files, launchers). Default: none.
    fn support_artifacts(&self, _ctx: &InstallContext<'_>) -> Result<Vec<GeneratedArtifact>> {
        Ok(Vec::new())
    }

    /// Optional operation: directories created under the install root
    /// before any artifact is written.
    fn scaffold_dirs(&self) -> &'static [&'static str] {
        &["skills", "agents", "hooks"]
    }

    /// Optional operation: runs after all artifacts are written.
    fn post_install(&self, _ctx: &InstallContext<'_>) -> Result<()> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ValidationResult {
    Valid {
        adapter: String,
        install_root: PathBuf,
    },
    Invalid {
        adapter: String,
        missing: Vec<String>,
        missing_count: usize,
    },
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid { .. })
    }

    pub fn into_result(self) -> Result<(String, PathBuf)> {
        match self {
            ValidationResult::Valid {
                adapter,
                install_root,
            } => Ok((adapter, install_root)),
            ValidationResult::Invalid {
                adapter, missing, ..
            } => Err(CoreError::Contract { adapter, missing }),
        }
    }
}

/// Check an adapter against the contract. Accumulates every failure rather
/// than stopping at the first, so one run reports every missing piece.
/// A failure here is fatal and precedes any filesystem mutation.
pub fn validate(project_root: &Path, adapter: &dyn Adapter) -> ValidationResult {
    let contract = adapter.contract();
    let mut missing = Vec::new();

    if contract.name.trim().is_empty() {
        missing.push("name".to_string());
    }
    if contract.install_root.trim().is_empty() {
        missing.push("install_root".to_string());
    }
    for op in Operation::required() {
        if !contract.operations.contains(op) {
            missing.push(format!("operation {op}"));
        }
    }

    let adapter_name = if contract.name.trim().is_empty() {
        adapter.kind().to_string()
    } else {
        contract.name.clone()
    };

    if missing.is_empty() {
        ValidationResult::Valid {
            adapter: adapter_name,
            install_root: resolve_install_root(project_root, adapter),
        }
    } else {
        let missing_count = missing.len();
        ValidationResult::Invalid {
            adapter: adapter_name,
            missing,
            missing_count,
        }
    }
}

/// Resolve the directory an adapter owns. Pure and deterministic: the same
/// inputs always produce the same path.
pub fn resolve_install_root(project_root: &Path, adapter: &dyn Adapter) -> PathBuf {
    project_root.join(adapter.contract().install_root)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::{ArtifactKind, GeneratedArtifact};
    use crate::types::EnforcementLevel;

    /// Test double with a configurable contract; operation bodies are
    /// irrelevant to validation.
    struct StubAdapter {
        contract: AdapterContract,
        caps: CapabilityMap,
    }

    impl StubAdapter {
        fn with_contract(contract: AdapterContract) -> Self {
            Self {
                contract,
                caps: CapabilityMap::new(),
            }
        }
    }

    fn stub_artifact() -> GeneratedArtifact {
        GeneratedArtifact {
            adapter: "stub".to_string(),
            path: PathBuf::from("stub.txt"),
            content: String::new(),
            kind: ArtifactKind::Support,
            enforcement: EnforcementLevel::Full,
            executable: false,
        }
    }

    impl Adapter for StubAdapter {
        fn kind(&self) -> AdapterKind {
            AdapterKind::ClaudeCode
        }
        fn contract(&self) -> AdapterContract {
            self.contract.clone()
        }
        fn capability_map(&self) -> &CapabilityMap {
            &self.caps
        }
        fn install_hook(
            &self,
            _: &InstallContext<'_>,
            _: &HookDefinition,
        ) -> Result<GeneratedArtifact> {
            Ok(stub_artifact())
        }
        fn install_agent(&self, _: &InstallContext<'_>, _: &AgentDoc) -> Result<GeneratedArtifact> {
            Ok(stub_artifact())
        }
        fn install_skill(
            &self,
            _: &InstallContext<'_>,
            _: &SkillDefinition,
            _: &ToolGrant,
        ) -> Result<GeneratedArtifact> {
            Ok(stub_artifact())
        }
        fn generate_settings(&self, _: &InstallContext<'_>) -> Result<GeneratedArtifact> {
            Ok(stub_artifact())
        }
        fn guide_path(&self) -> PathBuf {
            PathBuf::from("GUIDE.md")
        }
        fn generate_project_guide(
            &self,
            _: &InstallContext<'_>,
            _: Option<&str>,
        ) -> Result<GuideOutcome> {
            Ok(GuideOutcome::Generated(stub_artifact()))
        }
    }

    #[test]
    fn full_contract_validates() {
        let adapter = StubAdapter::with_contract(AdapterContract::full(
            "x",
            ".x",
            EnforcementSupport::Blocking,
        ));
        let result = validate(Path::new("/proj"), &adapter);
        match result {
            ValidationResult::Valid {
                adapter,
                install_root,
            } => {
                assert_eq!(adapter, "x");
                assert_eq!(install_root, PathBuf::from("/proj/.x"));
            }
            other => panic!("expected valid, got {other:?}"),
        }
    }

    #[test]
    fn every_missing_operation_reported_at_once() {
        let mut contract = AdapterContract::full("x", ".x", EnforcementSupport::Blocking);
        contract.operations.remove(&Operation::InstallAgent);
        contract.operations.remove(&Operation::GenerateSettings);
        let adapter = StubAdapter::with_contract(contract);

        let result = validate(Path::new("/proj"), &adapter);
        match result {
            ValidationResult::Invalid {
                missing,
                missing_count,
                ..
            } => {
                assert_eq!(missing_count, 2);
                assert!(missing.contains(&"operation install_agent".to_string()));
                assert!(missing.contains(&"operation generate_settings".to_string()));
            }
            other => panic!("expected invalid, got {other:?}"),
        }
    }

    #[test]
    fn empty_name_and_root_both_reported() {
        let adapter = StubAdapter::with_contract(AdapterContract::full(
            "",
            "  ",
            EnforcementSupport::Blocking,
        ));
        let result = validate(Path::new("/proj"), &adapter);
        match result {
            ValidationResult::Invalid { missing, .. } => {
                assert!(missing.contains(&"name".to_string()));
                assert!(missing.contains(&"install_root".to_string()));
            }
            other => panic!("expected invalid, got {other:?}"),
        }
    }

    #[test]
    fn missing_optional_operations_do_not_fail_validation() {
        let mut contract = AdapterContract::full("x", ".x", EnforcementSupport::Blocking);
        contract.operations.remove(&Operation::Scaffold);
        contract.operations.remove(&Operation::PostInstall);
        let adapter = StubAdapter::with_contract(contract);
        assert!(validate(Path::new("/proj"), &adapter).is_valid());
    }

    #[test]
    fn into_result_carries_full_missing_list() {
        let mut contract = AdapterContract::full("x", ".x", EnforcementSupport::Blocking);
        for op in Operation::required() {
            contract.operations.remove(op);
        }
        let adapter = StubAdapter::with_contract(contract);
        let err = validate(Path::new("/proj"), &adapter)
            .into_result()
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("5 missing"));
        assert!(msg.contains("install_hook"));
        assert!(msg.contains("generate_project_guide"));
    }

    #[test]
    fn resolve_install_root_is_idempotent() {
        let adapter = StubAdapter::with_contract(AdapterContract::full(
            "x",
            ".x",
            EnforcementSupport::Blocking,
        ));
        let a = resolve_install_root(Path::new("/proj"), &adapter);
        let b = resolve_install_root(Path::new("/proj"), &adapter);
        assert_eq!(a, b);
    }
}
