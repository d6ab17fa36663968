use std::path::Path;
use std::process;

use strata_model::document;

use crate::{report_error, OutputFormat};

pub(crate) fn cmd_validate(baseline_path: &Path, output: OutputFormat, quiet: bool) {
    let text = match std::fs::read_to_string(baseline_path) {
        Ok(text) => text,
        Err(e) => {
            let msg = format!("error reading '{}': {}", baseline_path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let baseline = match document::from_str(&text) {
        Ok(baseline) => baseline,
        Err(e) => {
            let msg = format!("invalid baseline '{}': {}", baseline_path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let component_count = baseline.len();
    let type_count: usize = baseline
        .components()
        .flat_map(|c| c.api_type_containers(None))
        .map(|container| container.types().count())
        .sum();

    if quiet {
        return;
    }
    match output {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "name": baseline.name,
                "components": component_count,
                "types": type_count,
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&value).unwrap_or_default()
            );
        }
        OutputFormat::Text => {
            println!(
                "baseline '{}': {} component(s), {} type(s)",
                baseline.name, component_count, type_count
            );
        }
    }
}
