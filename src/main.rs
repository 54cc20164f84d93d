use clap::{Parser, Subcommand};

use commands::GlobalArgs;

mod commands;
mod output;
mod tty;

use commands::{config, path, url, version};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "buildenv")]
#[command(version = VERSION)]
#[command(about = "Normalize versions, daemon URLs and paths for container image builds")]
struct Cli {
    /// Config file to use instead of ~/.config/buildenv/buildenv.json
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare dotted version identifiers
    Version(version::VersionArgs),
    /// Normalize Docker daemon and registry URLs
    Url(url::UrlArgs),
    /// Compose build directories and convert Windows paths
    Path(path::PathArgs),
    /// Inspect buildenv configuration
    Config(config::ConfigArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let global = GlobalArgs {
        config_path: cli.config,
    };

    let (json_result, exit_code) = commands::run_json(cli.command, &global);
    if let Err(err) = output::print_json_result(json_result) {
        eprintln!("{}", err);
        return std::process::ExitCode::from(1);
    }

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
