use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("adapter '{adapter}' fails the contract ({} missing): {}", .missing.len(), .missing.join(", "))]
    Contract {
        adapter: String,
        missing: Vec<String>,
    },

    #[error("unresolved placeholder(s) in '{artifact}': {}", .keys.join(", "))]
    UnresolvedPlaceholders {
        artifact: String,
        keys: Vec<String>,
    },

    #[error("malformed template '{artifact}': {reason}")]
    MalformedTemplate { artifact: String, reason: String },

    #[error("skill name collision: '{skill}' provided by pack '{pack}' already exists")]
    SkillCollision { skill: String, pack: String },

    #[error("malformed defaults in pack '{pack}': {line}")]
    MalformedPackDefaults { pack: String, line: String },

    #[error("malformed configuration line: {0}")]
    MalformedConfigLine(String),

    #[error("pack directory not found: {0}")]
    PackNotFound(String),

    #[error("pack '{0}' has no fitness script")]
    NoFitnessScript(String),

    #[error("fitness script for pack '{pack}' failed: {detail}")]
    FitnessFailed { pack: String, detail: String },

    #[error("fitness output for pack '{pack}' is unparseable: {line:?}")]
    FitnessUnparseable { pack: String, line: String },

    #[error("unknown adapter: {0}")]
    UnknownAdapter(String),

    #[error("unknown capability: {0}")]
    UnknownCapability(String),

    #[error("unknown skill category: {0}")]
    UnknownCategory(String),

    #[error("unknown trigger event: {0}")]
    UnknownTrigger(String),

    #[error("no shell interpreter found: install bash or sh")]
    NoShell,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
