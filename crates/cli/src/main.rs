mod commands;
mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use strata_model::Visibility;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Visibility mask selecting which declared visibilities are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum VisibilityArg {
    /// Only API-visible, accessible elements
    Api,
    /// Every declared visibility
    All,
}

impl VisibilityArg {
    pub(crate) fn mask(self) -> Visibility {
        match self {
            VisibilityArg::Api => Visibility::API,
            VisibilityArg::All => Visibility::ALL,
        }
    }
}

/// strata: API baseline compatibility delta engine.
#[derive(Parser)]
#[command(name = "strata", version, about = "API baseline compatibility delta engine")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two baseline documents and report the compatibility delta
    Diff {
        /// Path to the reference baseline document
        reference: PathBuf,
        /// Path to the baseline document to compare against the reference
        target: PathBuf,
        /// Which declared visibilities take part in the comparison
        #[arg(long, default_value = "all", value_enum)]
        visibility: VisibilityArg,
        /// Compare component pairs even when their versions are identical
        #[arg(long)]
        force: bool,
        /// Component id resolved without origin qualification (repeatable)
        #[arg(long = "unscoped", value_name = "ID")]
        unscoped: Vec<String>,
    },

    /// Validate a baseline document and report its contents
    Validate {
        /// Path to the baseline document
        baseline: PathBuf,
    },
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{{\"error\": \"{}\"}}", msg.replace('"', "\\\""));
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Diff {
            reference,
            target,
            visibility,
            force,
            unscoped,
        } => {
            commands::diff::cmd_diff(
                &reference,
                &target,
                visibility,
                force,
                unscoped,
                cli.output,
                cli.quiet,
            );
        }
        Commands::Validate { baseline } => {
            commands::validate::cmd_validate(&baseline, cli.output, cli.quiet);
        }
    }
}
