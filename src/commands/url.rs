use clap::{Args, Subcommand};
use serde::Serialize;

use buildenv::url::{convert_tcp_to_http_url_with_port, ensure_registry_http_url, first_registry_of};
use buildenv::utils::validation;
use buildenv::Error;

use super::{CmdResult, GlobalArgs};

/// Environment variable consulted after the explicit registry flags.
const REGISTRY_ENV_VAR: &str = "BUILDENV_REGISTRY";

#[derive(Args)]
pub struct UrlArgs {
    #[command(subcommand)]
    command: UrlCommand,
}

#[derive(Subcommand)]
enum UrlCommand {
    /// Convert a tcp:// daemon URL to http:// or https://
    Daemon {
        /// Daemon URL, e.g. tcp://127.0.0.1:2375
        url: String,

        /// Port that speaks plain HTTP (default from config, 2375)
        #[arg(long)]
        http_port: Option<u16>,
    },
    /// Pick the effective registry by precedence and normalize it to a URL
    Registry {
        /// Registry configured on the image itself (highest precedence)
        #[arg(long)]
        image_registry: Option<String>,

        /// Registry configured for the build
        #[arg(long)]
        registry: Option<String>,

        /// Fail instead of returning null when no registry is configured
        #[arg(long)]
        required: bool,
    },
    /// Prefix https:// unless the URL already has an HTTP(S) scheme
    EnsureHttp { url: String },
}

#[derive(Serialize)]
#[serde(untagged)]
pub enum UrlOutput {
    Daemon(UrlDaemonOutput),
    Registry(UrlRegistryOutput),
    EnsureHttp(UrlEnsureHttpOutput),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlDaemonOutput {
    command: String,
    input: String,
    url: String,
    http_port: u16,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlRegistryOutput {
    command: String,
    registry: Option<String>,
    url: Option<String>,
    source: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlEnsureHttpOutput {
    command: String,
    input: String,
    url: String,
}

pub fn run(args: UrlArgs, global: &GlobalArgs) -> CmdResult<UrlOutput> {
    match args.command {
        UrlCommand::Daemon { url, http_port } => {
            let url = validation::require_non_empty(&url, "url", "Daemon URL cannot be empty")?;
            let http_port =
                http_port.unwrap_or_else(|| global.load_config().defaults.docker.http_port);

            Ok((
                UrlOutput::Daemon(UrlDaemonOutput {
                    command: "url.daemon".to_string(),
                    input: url.to_string(),
                    url: convert_tcp_to_http_url_with_port(url, http_port),
                    http_port,
                }),
                0,
            ))
        }
        UrlCommand::Registry {
            image_registry,
            registry,
            required,
        } => {
            let config = global.load_config();
            let from_env = std::env::var(REGISTRY_ENV_VAR).ok();

            let selected = select_registry(
                image_registry.as_deref(),
                registry.as_deref(),
                from_env.as_deref(),
                config.defaults.registry.default_registry.as_deref(),
                required,
            )?;
            if selected.is_none() {
                buildenv::log_status!("url", "No registry configured");
            }

            Ok((
                UrlOutput::Registry(UrlRegistryOutput {
                    command: "url.registry".to_string(),
                    registry: selected.map(|(_, registry)| registry.to_string()),
                    url: selected.map(|(_, registry)| ensure_registry_http_url(registry)),
                    source: selected.map(|(source, _)| source.to_string()),
                }),
                0,
            ))
        }
        UrlCommand::EnsureHttp { url } => {
            let url = validation::require_non_empty(&url, "url", "Registry URL cannot be empty")?;

            Ok((
                UrlOutput::EnsureHttp(UrlEnsureHttpOutput {
                    command: "url.ensure_http".to_string(),
                    input: url.to_string(),
                    url: ensure_registry_http_url(url),
                }),
                0,
            ))
        }
    }
}

/// Pick the registry by precedence: image, `--registry`, environment, config.
///
/// Blank values count as absent. Returns the winning source label with the
/// registry, or None unless `required` is set.
fn select_registry<'a>(
    image: Option<&'a str>,
    flag: Option<&'a str>,
    env: Option<&'a str>,
    config: Option<&'a str>,
    required: bool,
) -> buildenv::Result<Option<(&'static str, &'a str)>> {
    let candidates = [
        ("image", validation::non_blank(image)),
        ("flag", validation::non_blank(flag)),
        ("env", validation::non_blank(env)),
        ("config", validation::non_blank(config)),
    ];
    let values: Vec<Option<&str>> = candidates.iter().map(|(_, value)| *value).collect();

    let Some(winner) = first_registry_of(&values) else {
        if required {
            return Err(Error::validation_missing_argument(vec![
                "--image-registry".to_string(),
                "--registry".to_string(),
            ])
            .with_hint(format!(
                "Set {} or defaults.registry.defaultRegistry in buildenv.json",
                REGISTRY_ENV_VAR
            )));
        }
        return Ok(None);
    };

    let source = candidates
        .iter()
        .find(|(_, value)| *value == Some(winner))
        .map_or("config", |(source, _)| *source);

    Ok(Some((source, winner)))
}
