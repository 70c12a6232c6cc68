use crate::output::{print_json, print_table};
use clap::Subcommand;
use cogcore_core::fitness;
use cogcore_core::pack::Pack;
use std::path::{Path, PathBuf};

#[derive(Subcommand)]
pub enum PackSubcommand {
    /// Show what a pack directory provides
    Inspect { dir: PathBuf },

    /// Run the pack's fitness script against the project
    Score { dir: PathBuf },
}

pub fn run(root: &Path, subcommand: PackSubcommand, json: bool) -> anyhow::Result<()> {
    match subcommand {
        PackSubcommand::Inspect { dir } => {
            let pack = Pack::load(&dir)?;
            if json {
                #[derive(serde::Serialize)]
                struct PackSummary {
                    name: String,
                    skills: Vec<String>,
                    default_keys: Vec<String>,
                    has_compact_rules: bool,
                    has_fitness_script: bool,
                }
                print_json(&PackSummary {
                    name: pack.name.clone(),
                    skills: pack.skills.iter().map(|s| s.name.clone()).collect(),
                    default_keys: pack.defaults.iter().map(|(k, _)| k.to_string()).collect(),
                    has_compact_rules: pack.compact_rules.is_some(),
                    has_fitness_script: pack.fitness_script.is_some(),
                })?;
            } else {
                println!("pack: {}", pack.name);
                println!(
                    "  defaults: {}  compact rules: {}  fitness: {}",
                    pack.defaults.len(),
                    if pack.compact_rules.is_some() { "yes" } else { "no" },
                    if pack.fitness_script.is_some() { "yes" } else { "no" },
                );
                let rows: Vec<Vec<String>> = pack
                    .skills
                    .iter()
                    .map(|s| {
                        vec![
                            s.name.clone(),
                            s.version.clone(),
                            s.category.to_string(),
                        ]
                    })
                    .collect();
                if !rows.is_empty() {
                    print_table(&["skill", "version", "category"], rows);
                }
            }
        }
        PackSubcommand::Score { dir } => {
            let pack = Pack::load(&dir)?;
            let score = fitness::run(&pack, root)?;
            if json {
                print_json(&score)?;
            } else {
                println!("{} {}", score.score, score.description);
            }
        }
    }
    Ok(())
}
