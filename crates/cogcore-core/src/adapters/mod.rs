mod aider;
mod claude;

pub use aider::Aider;
pub use claude::ClaudeCode;

use crate::contract::Adapter;
use crate::error::Result;
use crate::types::AdapterKind;
use std::str::FromStr;

/// Construct the adapter for a known platform.
pub fn by_kind(kind: AdapterKind) -> Box<dyn Adapter> {
    match kind {
        AdapterKind::ClaudeCode => Box::new(ClaudeCode::default()),
        AdapterKind::Aider => Box::new(Aider::default()),
    }
}

/// Parse a platform name and construct its adapter.
pub fn parse(name: &str) -> Result<Box<dyn Adapter>> {
    Ok(by_kind(AdapterKind::from_str(name)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::validate;
    use std::path::Path;

    #[test]
    fn every_known_adapter_passes_validation() {
        for kind in AdapterKind::all() {
            let adapter = by_kind(*kind);
            let result = validate(Path::new("/proj"), adapter.as_ref());
            assert!(result.is_valid(), "{kind} failed validation: {result:?}");
        }
    }

    #[test]
    fn parse_rejects_unknown_platform() {
        assert!(parse("emacs").is_err());
    }
}
