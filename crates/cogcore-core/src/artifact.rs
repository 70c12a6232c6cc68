use crate::types::{Capability, EnforcementClass, EnforcementLevel};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// GeneratedArtifact
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    /// Structured bindings: permission grants and trigger→action wiring.
    Bindings,
    /// Narrative document loaded passively by the platform.
    Advisory,
    /// Supporting file (hook script, skill document, ignore file, launcher).
    Support,
}

/// Output of one generator call for one adapter. Paths are relative to the
/// project root; the install runner owns the actual writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedArtifact {
    pub adapter: String,
    pub path: PathBuf,
    pub content: String,
    pub kind: ArtifactKind,
    pub enforcement: EnforcementLevel,
    #[serde(default)]
    pub executable: bool,
}

/// Outcome of `generate_project_guide`: an existing guide without the
/// override flag is never overwritten.
#[derive(Debug, Clone, PartialEq)]
pub enum GuideOutcome {
    Generated(GeneratedArtifact),
    Skipped { path: PathBuf },
}

// ---------------------------------------------------------------------------
// Degradation / diagnostics
// ---------------------------------------------------------------------------

/// Records the loss of an enforcement class for one hook on one adapter,
/// so an operator can evaluate residual risk before relying on the install.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegradationRecord {
    pub hook: String,
    pub adapter: String,
    pub from: EnforcementClass,
    pub to: EnforcementClass,
    pub recorded_at: DateTime<Utc>,
}

impl DegradationRecord {
    pub fn blocking_to_advisory(hook: impl Into<String>, adapter: impl Into<String>) -> Self {
        Self {
            hook: hook.into(),
            adapter: adapter.into(),
            from: EnforcementClass::Blocking,
            to: EnforcementClass::Advisory,
            recorded_at: Utc::now(),
        }
    }
}

/// A per-skill capability that the adapter could not grant. Non-fatal: the
/// skill installs with a reduced grant and the omission is surfaced here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapabilityDiagnostic {
    pub skill: String,
    pub capability: Capability,
    pub adapter: String,
}

// ---------------------------------------------------------------------------
// InstallReport
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedArtifact {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum InstallOutcome {
    Completed,
    /// Generation failed after validation. `pending` names the stages that
    /// were never reached, so the caller can resume or clean up.
    Aborted { error: String, pending: Vec<String> },
}

/// Full account of one install run: what was written, what was skipped,
/// which capabilities were unsupported, and which guarantees degraded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstallReport {
    pub run_id: Uuid,
    pub adapter: String,
    pub started_at: DateTime<Utc>,
    pub written: Vec<PathBuf>,
    pub skipped: Vec<SkippedArtifact>,
    pub diagnostics: Vec<CapabilityDiagnostic>,
    pub degradations: Vec<DegradationRecord>,
    pub outcome: InstallOutcome,
}

impl InstallReport {
    pub fn new(adapter: impl Into<String>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            adapter: adapter.into(),
            started_at: Utc::now(),
            written: Vec::new(),
            skipped: Vec::new(),
            diagnostics: Vec::new(),
            degradations: Vec::new(),
            outcome: InstallOutcome::Completed,
        }
    }

    pub fn record_written(&mut self, path: PathBuf) {
        self.written.push(path);
    }

    pub fn record_skipped(&mut self, path: PathBuf, reason: impl Into<String>) {
        self.skipped.push(SkippedArtifact {
            path,
            reason: reason.into(),
        });
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.outcome, InstallOutcome::Completed)
    }

    pub fn is_degraded(&self) -> bool {
        !self.degradations.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
