use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::platform::Platform;
use crate::url::DOCKER_HTTP_PORT;

/// Environment variable that points at an alternate buildenv.json.
pub const CONFIG_ENV_VAR: &str = "BUILDENV_CONFIG";

const CONFIG_FILENAME: &str = "buildenv.json";

/// Root configuration structure for buildenv.json
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct BuildenvConfig {
    #[serde(default)]
    pub defaults: Defaults,

    /// Build properties consulted after environment variables.
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

/// All configurable defaults that can be overridden via buildenv.json
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Defaults {
    #[serde(default = "default_docker")]
    pub docker: DockerConfig,

    #[serde(default)]
    pub registry: RegistryConfig,

    #[serde(default = "default_build")]
    pub build: BuildConfig,

    /// Forces a platform instead of detecting the host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            docker: default_docker(),
            registry: RegistryConfig::default(),
            build: default_build(),
            platform: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DockerConfig {
    #[serde(default = "default_http_port")]
    pub http_port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RegistryConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_registry: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfig {
    #[serde(default = "default_build_dir_name")]
    pub build_dir_name: String,

    #[serde(default = "default_project_base_dir")]
    pub project_base_dir: String,
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_docker() -> DockerConfig {
    DockerConfig {
        http_port: default_http_port(),
    }
}

fn default_http_port() -> u16 {
    DOCKER_HTTP_PORT
}

fn default_build() -> BuildConfig {
    BuildConfig {
        build_dir_name: default_build_dir_name(),
        project_base_dir: default_project_base_dir(),
    }
}

fn default_build_dir_name() -> String {
    "target".to_string()
}

fn default_project_base_dir() -> String {
    ".".to_string()
}

impl Defaults {
    /// Configured platform, or the host platform when none is set.
    pub fn platform_or_host(&self) -> Platform {
        self.platform.unwrap_or_else(Platform::host)
    }
}

// =============================================================================
// Loading functions
// =============================================================================

/// Base buildenv config directory (~/.config/buildenv/, %APPDATA%\buildenv on Windows)
pub fn config_dir() -> Result<PathBuf> {
    #[cfg(windows)]
    {
        let appdata = env::var("APPDATA").map_err(|_| {
            Error::internal_unexpected(
                "APPDATA environment variable not set on Windows".to_string(),
            )
        })?;
        Ok(PathBuf::from(appdata).join("buildenv"))
    }

    #[cfg(not(windows))]
    {
        let home = env::var("HOME").map_err(|_| {
            Error::internal_unexpected(
                "HOME environment variable not set on Unix-like system".to_string(),
            )
        })?;
        Ok(PathBuf::from(home).join(".config").join("buildenv"))
    }
}

/// Location of buildenv.json: a non-blank `explicit` path (e.g. `--config`),
/// then `BUILDENV_CONFIG`, then the default location. `~` is expanded.
pub fn resolve_config_path(explicit: Option<&str>) -> Result<PathBuf> {
    let from_env = env::var(CONFIG_ENV_VAR).ok();
    let chosen = explicit
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .or_else(|| from_env.as_deref().map(str::trim).filter(|p| !p.is_empty()));

    match chosen {
        Some(path) => Ok(PathBuf::from(shellexpand::tilde(path).into_owned())),
        None => Ok(config_dir()?.join(CONFIG_FILENAME)),
    }
}

/// Parse buildenv.json content. `source` names the origin for error details.
pub fn load_config_from_str(content: &str, source: &str) -> Result<BuildenvConfig> {
    let config: BuildenvConfig =
        serde_json::from_str(content).map_err(|e| Error::config_invalid_json(source, e))?;

    if config.defaults.docker.http_port == 0 {
        return Err(Error::config_invalid_value(
            "defaults.docker.httpPort",
            Some("0".to_string()),
            "Port must be between 1 and 65535",
        )
        .with_hint(format!("Fix or remove the value in {}", source)));
    }

    Ok(config)
}

/// Load a specific config file. A missing file yields built-in defaults.
pub fn load_config_from_path(path: &Path) -> Result<BuildenvConfig> {
    if !path.exists() {
        return Ok(BuildenvConfig::default());
    }

    let content = fs::read_to_string(path).map_err(|e| {
        Error::internal_io(e.to_string(), Some(format!("read {}", path.display())))
    })?;

    load_config_from_str(&content, &path.display().to_string())
}

/// Load buildenv.json strictly, surfacing parse errors.
pub fn try_load_config(explicit: Option<&str>) -> Result<BuildenvConfig> {
    load_config_from_path(&resolve_config_path(explicit)?)
}

/// Load buildenv.json, falling back to built-in defaults on any error.
pub fn load_config(explicit: Option<&str>) -> BuildenvConfig {
    match try_load_config(explicit) {
        Ok(config) => config,
        Err(err) => {
            log_status!("config", "Using built-in defaults: {} ({})", err, err.details);
            BuildenvConfig::default()
        }
    }
}

/// Get built-in defaults (ignoring any file config)
pub fn builtin_defaults() -> Defaults {
    Defaults::default()
}
