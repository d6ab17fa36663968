use std::path::Path;
use std::process;

use strata_compare::{compare_baselines, CompareContext, MemberComparator};
use strata_model::{document, Baseline};

use crate::{render, report_error, OutputFormat, VisibilityArg};

fn load_baseline(path: &Path, output: OutputFormat, quiet: bool) -> Baseline {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            let msg = format!("error reading '{}': {}", path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };
    match document::from_str(&text) {
        Ok(baseline) => baseline,
        Err(e) => {
            let msg = format!("error loading baseline '{}': {}", path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    }
}

pub(crate) fn cmd_diff(
    reference_path: &Path,
    target_path: &Path,
    visibility: VisibilityArg,
    force: bool,
    unscoped: Vec<String>,
    output: OutputFormat,
    quiet: bool,
) {
    let reference = load_baseline(reference_path, output, quiet);
    let target = load_baseline(target_path, output, quiet);

    let comparator = MemberComparator;
    let ctx = CompareContext::new(visibility.mask(), &comparator).with_unscoped(unscoped);

    let delta = match compare_baselines(&reference, &target, &ctx, force) {
        Ok(delta) => delta,
        Err(e) => {
            let msg = format!("comparison failed: {}", e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    match delta {
        None => {
            if !quiet {
                match output {
                    OutputFormat::Json => {
                        println!("{{\"children\": []}}");
                    }
                    OutputFormat::Text => {
                        println!("no differences");
                    }
                }
            }
        }
        Some(delta) => {
            if !quiet {
                match output {
                    OutputFormat::Json => {
                        println!(
                            "{}",
                            serde_json::to_string_pretty(&delta).unwrap_or_default()
                        );
                    }
                    OutputFormat::Text => {
                        println!("{}", render::to_text(&delta));
                    }
                }
            }
            process::exit(1);
        }
    }
}
