use clap::{Args, Subcommand};
use serde::Serialize;

use buildenv::defaults::{self, BuildenvConfig, Defaults};
use buildenv::utils::{env, text, validation};

use super::{CmdResult, GlobalArgs};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Display configuration (merged defaults + file)
    Show {
        /// Show only built-in defaults (ignore buildenv.json)
        #[arg(long)]
        builtin: bool,
    },
    /// Show the path to buildenv.json
    Path,
    /// Resolve a build property from the environment, then buildenv.json
    Property {
        /// Property name, or a `${name}` placeholder
        name: String,

        /// Value used when neither source defines the property
        #[arg(long, default_value = "")]
        default: String,
    },
}

#[derive(Debug, Serialize)]
pub struct ConfigOutput {
    command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    config: Option<BuildenvConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    defaults: Option<Defaults>,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    exists: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<String>,
}

impl ConfigOutput {
    fn new(command: &str) -> Self {
        Self {
            command: command.to_string(),
            config: None,
            defaults: None,
            path: None,
            exists: None,
            name: None,
            value: None,
        }
    }
}

pub fn run(args: ConfigArgs, global: &GlobalArgs) -> CmdResult<ConfigOutput> {
    match args.command {
        ConfigCommand::Show { builtin } => show(builtin, global),
        ConfigCommand::Path => path(global),
        ConfigCommand::Property { name, default } => property(&name, &default, global),
    }
}

fn show(builtin: bool, global: &GlobalArgs) -> CmdResult<ConfigOutput> {
    if builtin {
        return Ok((
            ConfigOutput {
                defaults: Some(defaults::builtin_defaults()),
                ..ConfigOutput::new("config.show")
            },
            0,
        ));
    }

    let config = global.try_load_config()?;

    Ok((
        ConfigOutput {
            config: Some(config),
            ..ConfigOutput::new("config.show")
        },
        0,
    ))
}

fn path(global: &GlobalArgs) -> CmdResult<ConfigOutput> {
    let config_path = global.resolve_config_path()?;
    let exists = config_path.exists();
    if !exists {
        crate::tty::status("No config file found; built-in defaults apply");
    }

    Ok((
        ConfigOutput {
            path: Some(config_path.display().to_string()),
            exists: Some(exists),
            ..ConfigOutput::new("config.path")
        },
        0,
    ))
}

fn property(name: &str, default: &str, global: &GlobalArgs) -> CmdResult<ConfigOutput> {
    let name = validation::require_non_empty(name, "name", "Property name cannot be empty")?;
    let name = text::extract_property_name(name).unwrap_or(name);
    let config = global.load_config();

    let value = env::env_var_or_property(name, &config.properties, default);

    Ok((
        ConfigOutput {
            name: Some(name.to_string()),
            value: Some(value),
            ..ConfigOutput::new("config.property")
        },
        0,
    ))
}
