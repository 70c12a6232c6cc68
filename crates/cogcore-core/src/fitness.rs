//! Pack fitness scoring — the one externally invoked step a pack may ship.
//!
//! The script's first stdout line must be `<integer 0-100> <description>`;
//! anything else is an explicit parse error, never a silent zero.

use crate::error::{CoreError, Result};
use crate::pack::Pack;
use serde::Serialize;
use std::path::Path;
use std::process::Command;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FitnessScore {
    pub score: u8,
    pub description: String,
}

/// Run a pack's fitness script against the project and parse its verdict.
pub fn run(pack: &Pack, project_root: &Path) -> Result<FitnessScore> {
    let Some(script) = &pack.fitness_script else {
        return Err(CoreError::NoFitnessScript(pack.name.clone()));
    };

    let shell = which::which("bash")
        .or_else(|_| which::which("sh"))
        .map_err(|_| CoreError::NoShell)?;

    tracing::debug!(pack = %pack.name, script = %script.display(), "running fitness script");

    let output = Command::new(shell)
        .arg(script)
        .current_dir(project_root)
        .env("COGCORE_PROJECT_ROOT", project_root)
        .output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(CoreError::FitnessFailed {
            pack: pack.name.clone(),
            detail: stderr.chars().take(500).collect(),
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let first = stdout.lines().next().unwrap_or("").trim();
    parse_verdict(&pack.name, first)
}

fn parse_verdict(pack: &str, line: &str) -> Result<FitnessScore> {
    let unparseable = || CoreError::FitnessUnparseable {
        pack: pack.to_string(),
        line: line.to_string(),
    };

    let (score_str, description) = line.split_once(' ').ok_or_else(unparseable)?;
    let score: u8 = score_str.parse().map_err(|_| unparseable())?;
    if score > 100 || description.trim().is_empty() {
        return Err(unparseable());
    }
    Ok(FitnessScore {
        score,
        description: description.trim().to_string(),
    })
}
