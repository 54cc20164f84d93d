use buildenv::defaults::{self, BuildenvConfig, Defaults};
use buildenv::Platform;
use std::path::PathBuf;

pub type CmdResult<T> = buildenv::Result<(T, i32)>;

pub(crate) struct GlobalArgs {
    /// `--config` override for the buildenv.json location.
    pub config_path: Option<String>,
}

impl GlobalArgs {
    pub fn resolve_config_path(&self) -> buildenv::Result<PathBuf> {
        defaults::resolve_config_path(self.config_path.as_deref())
    }

    /// Load config strictly, surfacing parse errors.
    pub fn try_load_config(&self) -> buildenv::Result<BuildenvConfig> {
        defaults::try_load_config(self.config_path.as_deref())
    }

    /// Load config, falling back to built-in defaults on any error.
    pub fn load_config(&self) -> BuildenvConfig {
        defaults::load_config(self.config_path.as_deref())
    }
}

/// Platform from `--platform`, then config, then the host.
pub(crate) fn resolve_platform(flag: Option<&str>, defaults: &Defaults) -> buildenv::Result<Platform> {
    match flag {
        Some(value) => value.parse(),
        None => Ok(defaults.platform_or_host()),
    }
}

pub mod config;
pub mod path;
pub mod url;
pub mod version;

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $global:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args, $global))
    };
}

pub(crate) fn run_json(
    command: crate::Commands,
    global: &GlobalArgs,
) -> (buildenv::Result<serde_json::Value>, i32) {
    match command {
        crate::Commands::Version(args) => dispatch!(args, global, version),
        crate::Commands::Url(args) => dispatch!(args, global, url),
        crate::Commands::Path(args) => dispatch!(args, global, path),
        crate::Commands::Config(args) => dispatch!(args, global, config),
    }
}
