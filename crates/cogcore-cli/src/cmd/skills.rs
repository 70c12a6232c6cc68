use crate::output::{print_json, print_table};
use cogcore_core::bundled;
use cogcore_core::config::ConfigRecord;
use cogcore_core::pack::MergedConfig;
use std::path::{Path, PathBuf};

pub fn run(_root: &Path, packs: &[PathBuf], json: bool) -> anyhow::Result<()> {
    let mut merged = MergedConfig::base(ConfigRecord::new(), bundled::builtin_skills()?);
    merged.merge_dirs(packs, false)?;

    if json {
        let skills: Vec<_> = merged.skills.values().collect();
        print_json(&skills)?;
    } else {
        let rows: Vec<Vec<String>> = merged
            .skills
            .values()
            .map(|s| {
                let caps: Vec<&str> = s.capabilities.iter().map(|c| c.as_str()).collect();
                vec![
                    s.name.clone(),
                    s.version.clone(),
                    s.category.to_string(),
                    caps.join(", "),
                ]
            })
            .collect();
        print_table(&["skill", "version", "category", "capabilities"], rows);
    }
    Ok(())
}
