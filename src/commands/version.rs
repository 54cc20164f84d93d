use clap::{Args, Subcommand};
use serde::Serialize;

use buildenv::utils::validation;
use buildenv::version::{compare_versions_detailed, extract_larger_version, VersionComparison};

use super::{CmdResult, GlobalArgs};

#[derive(Args)]
pub struct VersionArgs {
    #[command(subcommand)]
    command: VersionCommand,
}

#[derive(Subcommand)]
enum VersionCommand {
    /// Compare two versions (e.g. a detected tool version against a minimum)
    Compare {
        /// Left-hand version
        a: String,
        /// Right-hand version
        b: String,
    },
    /// Print the larger of two versions; either may be omitted
    Larger {
        a: Option<String>,
        b: Option<String>,
    },
}

#[derive(Serialize)]
#[serde(untagged)]
pub enum VersionOutput {
    Compare(VersionCompareOutput),
    Larger(VersionLargerOutput),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionCompareOutput {
    command: String,
    a: String,
    b: String,
    #[serde(flatten)]
    comparison: VersionComparison,
    greater_or_equals: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionLargerOutput {
    command: String,
    larger: Option<String>,
}

pub fn run(args: VersionArgs, _global: &GlobalArgs) -> CmdResult<VersionOutput> {
    match args.command {
        VersionCommand::Compare { a, b } => {
            let a = validation::require_non_empty(&a, "a", "Version cannot be empty")?;
            let b = validation::require_non_empty(&b, "b", "Version cannot be empty")?;

            let comparison = compare_versions_detailed(a, b);

            Ok((
                VersionOutput::Compare(VersionCompareOutput {
                    command: "version.compare".to_string(),
                    a: a.to_string(),
                    b: b.to_string(),
                    comparison,
                    greater_or_equals: comparison.ordering != std::cmp::Ordering::Less,
                }),
                0,
            ))
        }
        VersionCommand::Larger { a, b } => {
            let larger = extract_larger_version(
                validation::non_blank(a.as_deref()),
                validation::non_blank(b.as_deref()),
            );

            Ok((
                VersionOutput::Larger(VersionLargerOutput {
                    command: "version.larger".to_string(),
                    larger: larger.map(str::to_string),
                }),
                0,
            ))
        }
    }
}
