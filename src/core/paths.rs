//! Output/source directory composition and Windows-to-POSIX path conversion.
//!
//! Everything here is string composition for a given [`Platform`]; nothing
//! touches the filesystem.

use crate::platform::Platform;
use regex::Regex;
use std::path::PathBuf;
use std::sync::LazyLock;

static DRIVE_PATH_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^([A-Za-z]):([\\/].*)$").expect("drive path pattern is valid")
});

/// Resolve an output directory for a build artifact.
///
/// An absolute `target_path` wins outright. Otherwise the result is
/// `project_base_dir/build_dir_name/sub_path/target_path` with the platform
/// separator. `sub_path` is always nested, even when it has a leading
/// separator.
pub fn prepare_absolute_output_dir_path(
    platform: Platform,
    build_dir_name: &str,
    project_base_dir: &str,
    sub_path: &str,
    target_path: &str,
) -> PathBuf {
    if platform.is_absolute(target_path) {
        return PathBuf::from(target_path);
    }

    PathBuf::from(join_segments(
        platform,
        &[project_base_dir, build_dir_name, sub_path, target_path],
    ))
}

/// Resolve a source directory: `project_base_dir/build_dir_name/target_path`
/// unless `target_path` is already absolute.
pub fn prepare_absolute_source_dir_path(
    platform: Platform,
    build_dir_name: &str,
    project_base_dir: &str,
    target_path: &str,
) -> PathBuf {
    if platform.is_absolute(target_path) {
        return PathBuf::from(target_path);
    }

    PathBuf::from(join_segments(
        platform,
        &[project_base_dir, build_dir_name, target_path],
    ))
}

/// Convert `C:\some\dir` to `/c/some/dir` on Windows.
///
/// Used when handing paths to MSYS-style shells. Posix platforms and paths
/// without a rooted drive prefix (including drive-relative `C:foo`) are
/// returned unchanged.
pub fn fixup_path(platform: Platform, path: &str) -> String {
    if !platform.is_windows() {
        return path.to_string();
    }

    match DRIVE_PATH_PATTERN.captures(path) {
        Some(caps) => {
            let drive = caps.get(1).map(|m| m.as_str()).unwrap_or("");
            let rest = caps.get(2).map(|m| m.as_str()).unwrap_or("");
            format!("/{}{}", drive.to_lowercase(), rest.replace('\\', "/"))
        }
        None => path.to_string(),
    }
}

fn is_separator(platform: Platform, c: char) -> bool {
    c == '/' || (platform.is_windows() && c == '\\')
}

fn join_segments(platform: Platform, segments: &[&str]) -> String {
    let separator = platform.separator();
    let mut joined = String::new();

    for segment in segments.iter().filter(|s| !s.is_empty()) {
        if joined.is_empty() {
            joined.push_str(segment);
            continue;
        }

        if !joined.ends_with(|c: char| is_separator(platform, c)) {
            joined.push(separator);
        }
        joined.push_str(segment.trim_start_matches(|c: char| is_separator(platform, c)));
    }

    joined
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::Path;

    fn as_str(path: &Path) -> &str {
        path.to_str().unwrap()
    }

    #[test]
    fn output_dir_on_posix() {
        let path = prepare_absolute_output_dir_path(
            Platform::Posix,
            "target",
            "test-project",
            "testDir",
            "bar",
        );
        assert_eq!(as_str(&path), "test-project/target/testDir/bar");
    }

    #[test]
    fn output_dir_keeps_absolute_target_on_posix() {
        let path = prepare_absolute_output_dir_path(
            Platform::Posix,
            "target",
            "test-project",
            "testDir",
            "/home/redhat/jkube",
        );
        assert_eq!(as_str(&path), "/home/redhat/jkube");
    }

    #[test]
    fn output_dir_on_windows() {
        let path = prepare_absolute_output_dir_path(
            Platform::Windows,
            "target",
            "test-project",
            "testDir",
            "bar",
        );
        assert_eq!(as_str(&path), r"test-project\target\testDir\bar");
    }

    #[test]
    fn output_dir_keeps_absolute_target_on_windows() {
        let path = prepare_absolute_output_dir_path(
            Platform::Windows,
            "target",
            "test-project",
            "testDir",
            r"C:\users\redhat\jkube",
        );
        assert_eq!(as_str(&path), r"C:\users\redhat\jkube");
    }

    #[test]
    fn rooted_sub_path_stays_under_build_dir() {
        let path = prepare_absolute_output_dir_path(
            Platform::Posix,
            "target",
            "test-project",
            "/opt/out/",
            "bar",
        );
        assert_eq!(as_str(&path), "test-project/target/opt/out/bar");

        let path = prepare_absolute_output_dir_path(
            Platform::Windows,
            "target",
            "test-project",
            r"\out",
            "bar",
        );
        assert_eq!(as_str(&path), r"test-project\target\out\bar");
    }

    #[test]
    fn output_dir_skips_empty_sub_path() {
        let path =
            prepare_absolute_output_dir_path(Platform::Posix, "target", "test-project", "", "bar");
        assert_eq!(as_str(&path), "test-project/target/bar");
    }

    #[test]
    fn source_dir_on_posix() {
        let path =
            prepare_absolute_source_dir_path(Platform::Posix, "target", "test-project", "testDir");
        assert_eq!(as_str(&path), "test-project/target/testDir");

        let path = prepare_absolute_source_dir_path(
            Platform::Posix,
            "target",
            "test-project",
            "/home/redhat/jkube",
        );
        assert_eq!(as_str(&path), "/home/redhat/jkube");
    }

    #[test]
    fn source_dir_on_windows() {
        let path = prepare_absolute_source_dir_path(
            Platform::Windows,
            "target",
            "test-project",
            "testDir",
        );
        assert_eq!(as_str(&path), r"test-project\target\testDir");

        let path = prepare_absolute_source_dir_path(
            Platform::Windows,
            "target",
            "test-project",
            r"C:\users\redhat\jkube",
        );
        assert_eq!(as_str(&path), r"C:\users\redhat\jkube");
    }

    #[test]
    fn trailing_separators_are_not_doubled() {
        let path =
            prepare_absolute_source_dir_path(Platform::Posix, "target/", "/work/project/", "gen");
        assert_eq!(as_str(&path), "/work/project/target/gen");
    }

    #[test]
    fn fixup_converts_drive_paths_on_windows() {
        assert_eq!(fixup_path(Platform::Windows, r"c:\...\"), "/c/.../");
        assert_eq!(
            fixup_path(Platform::Windows, r"C:\Users\dev\project"),
            "/c/Users/dev/project"
        );
    }

    #[test]
    fn fixup_leaves_non_drive_paths_on_windows() {
        assert_eq!(fixup_path(Platform::Windows, "/etc/ip/"), "/etc/ip/");
        assert_eq!(fixup_path(Platform::Windows, r"relative\dir"), r"relative\dir");
    }

    #[test]
    fn fixup_leaves_drive_relative_paths_on_windows() {
        assert_eq!(fixup_path(Platform::Windows, "C:foo"), "C:foo");
        assert_eq!(fixup_path(Platform::Windows, "C:"), "C:");
        assert_eq!(fixup_path(Platform::Windows, "D:/build"), "/d/build");
    }

    #[test]
    fn fixup_is_identity_on_posix() {
        assert_eq!(fixup_path(Platform::Posix, "/etc/ip/"), "/etc/ip/");
        assert_eq!(fixup_path(Platform::Posix, r"c:\...\"), r"c:\...\");
    }
}
