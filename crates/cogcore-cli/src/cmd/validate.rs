use crate::output::print_json;
use cogcore_core::adapters;
use cogcore_core::contract::{validate, ValidationResult};
use std::path::Path;

pub fn run(root: &Path, adapter_name: &str, json: bool) -> anyhow::Result<()> {
    let adapter = adapters::parse(adapter_name)?;
    let result = validate(root, adapter.as_ref());

    if json {
        print_json(&result)?;
    } else {
        match &result {
            ValidationResult::Valid {
                adapter,
                install_root,
            } => {
                println!("adapter '{adapter}' is valid");
                println!("  install root: {}", install_root.display());
            }
            ValidationResult::Invalid {
                adapter,
                missing,
                missing_count,
            } => {
                println!("adapter '{adapter}' fails the contract ({missing_count} missing):");
                for piece in missing {
                    println!("  missing: {piece}");
                }
            }
        }
    }

    result.into_result()?;
    Ok(())
}
