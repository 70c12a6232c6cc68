use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A specialist agent document: a markdown body installed under the
/// adapter's agents directory and referenced from the project guide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentDoc {
    /// Slug used for the installed filename (e.g. `security-auditor`).
    pub name: String,
    pub description: String,
    pub body: String,
}

impl AgentDoc {
    /// Display title derived from the slug: `security-auditor` → "Security Auditor".
    pub fn title(&self) -> String {
        self.name
            .split('-')
            .filter(|part| !part.is_empty())
            .map(|part| {
                let mut chars = part.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Load every `*.md` file in `dir` as an agent doc, sorted by filename.
    /// The first non-empty line (minus a leading `#`) becomes the description.
    pub fn load_dir(dir: &Path) -> Result<Vec<AgentDoc>> {
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut paths: Vec<_> = std::fs::read_dir(dir)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file() && p.extension().and_then(|e| e.to_str()) == Some("md"))
            .collect();
        paths.sort();

        let mut agents = Vec::new();
        for path in paths {
            let body = std::fs::read_to_string(&path)?;
            let name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            let description = body
                .lines()
                .find(|l| !l.trim().is_empty())
                .map(|l| l.trim_start_matches('#').trim().to_string())
                .unwrap_or_default();
            agents.push(AgentDoc {
                name,
                description,
                body,
            });
        }
        Ok(agents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn title_from_slug() {
        let doc = AgentDoc {
            name: "security-auditor".into(),
            description: String::new(),
            body: String::new(),
        };
        assert_eq!(doc.title(), "Security Auditor");
    }

    #[test]
    fn load_dir_reads_markdown() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("reviewer.md"),
            "# Code Reviewer\n\nReview changes before merge.\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("README.txt"), "ignored").unwrap();

        let agents = AgentDoc::load_dir(dir.path()).unwrap();
        assert_eq!(agents.len(), 1);
        assert_eq!(agents[0].name, "reviewer");
        assert_eq!(agents[0].description, "Code Reviewer");
    }

    #[test]
    fn load_dir_missing_is_empty() {
        let dir = TempDir::new().unwrap();
        assert!(AgentDoc::load_dir(&dir.path().join("none")).unwrap().is_empty());
    }
}
