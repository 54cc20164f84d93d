use clap::{Args, Subcommand};
use serde::Serialize;

use buildenv::defaults::Defaults;
use buildenv::paths::{fixup_path, prepare_absolute_output_dir_path, prepare_absolute_source_dir_path};
use buildenv::utils::validation;
use buildenv::{AbsoluteKind, Platform};

use super::{resolve_platform, CmdResult, GlobalArgs};

#[derive(Args)]
pub struct PathArgs {
    #[command(subcommand)]
    command: PathCommand,
}

/// Build directory overrides shared by `output` and `source`.
#[derive(Args)]
struct LayoutArgs {
    /// Build directory name (default from config, "target")
    #[arg(long = "build-dir")]
    build_dir: Option<String>,

    /// Project base directory (default from config, ".")
    #[arg(long = "base-dir")]
    base_dir: Option<String>,

    /// Path convention to use: posix or windows (default: config, then host)
    #[arg(long)]
    platform: Option<String>,
}

#[derive(Subcommand)]
enum PathCommand {
    /// Resolve the output directory for a build artifact
    Output {
        /// Target path, absolute or relative to the build directory
        #[arg(long)]
        target: String,

        /// Directory between the build directory and the target
        #[arg(long = "sub-path", default_value = "")]
        sub_path: String,

        #[command(flatten)]
        layout: LayoutArgs,
    },
    /// Resolve a source directory inside the build directory
    Source {
        #[arg(long)]
        target: String,

        #[command(flatten)]
        layout: LayoutArgs,
    },
    /// Convert C:\dir paths to /c/dir on Windows
    Fixup {
        path: String,

        #[arg(long)]
        platform: Option<String>,
    },
}

#[derive(Serialize)]
#[serde(untagged)]
pub enum PathOutput {
    Resolved(PathResolvedOutput),
    Fixup(PathFixupOutput),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathResolvedOutput {
    command: String,
    platform: Platform,
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    absolute_kind: Option<AbsoluteKind>,
    target_was_absolute: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathFixupOutput {
    command: String,
    platform: Platform,
    input: String,
    path: String,
    converted: bool,
}

/// Layout after applying CLI overrides on top of config.
struct Layout {
    platform: Platform,
    build_dir_name: String,
    project_base_dir: String,
}

impl LayoutArgs {
    fn resolve(self, defaults: &Defaults) -> buildenv::Result<Layout> {
        Ok(Layout {
            platform: resolve_platform(self.platform.as_deref(), defaults)?,
            build_dir_name: self
                .build_dir
                .unwrap_or_else(|| defaults.build.build_dir_name.clone()),
            project_base_dir: self
                .base_dir
                .unwrap_or_else(|| defaults.build.project_base_dir.clone()),
        })
    }
}

pub fn run(args: PathArgs, global: &GlobalArgs) -> CmdResult<PathOutput> {
    match args.command {
        PathCommand::Output {
            target,
            sub_path,
            layout,
        } => {
            let target = validation::require_non_empty(&target, "target", "Target path cannot be empty")?;
            let layout = layout.resolve(&global.load_config().defaults)?;

            let path = prepare_absolute_output_dir_path(
                layout.platform,
                &layout.build_dir_name,
                &layout.project_base_dir,
                &sub_path,
                target,
            );

            Ok((
                PathOutput::Resolved(resolved(
                    "path.output",
                    layout.platform,
                    target,
                    path.to_string_lossy().into_owned(),
                )),
                0,
            ))
        }
        PathCommand::Source { target, layout } => {
            let target = validation::require_non_empty(&target, "target", "Target path cannot be empty")?;
            let layout = layout.resolve(&global.load_config().defaults)?;

            let path = prepare_absolute_source_dir_path(
                layout.platform,
                &layout.build_dir_name,
                &layout.project_base_dir,
                target,
            );

            Ok((
                PathOutput::Resolved(resolved(
                    "path.source",
                    layout.platform,
                    target,
                    path.to_string_lossy().into_owned(),
                )),
                0,
            ))
        }
        PathCommand::Fixup { path, platform } => {
            let platform = resolve_platform(platform.as_deref(), &global.load_config().defaults)?;
            let fixed = fixup_path(platform, &path);

            Ok((
                PathOutput::Fixup(PathFixupOutput {
                    command: "path.fixup".to_string(),
                    platform,
                    converted: fixed != path,
                    input: path,
                    path: fixed,
                }),
                0,
            ))
        }
    }
}

fn resolved(command: &str, platform: Platform, target: &str, path: String) -> PathResolvedOutput {
    PathResolvedOutput {
        command: command.to_string(),
        platform,
        absolute_kind: platform.absolute_kind(&path),
        target_was_absolute: platform.is_absolute(target),
        path,
    }
}
