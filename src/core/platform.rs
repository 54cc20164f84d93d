//! Host platform as an explicit value.
//!
//! Path handling takes a [`Platform`] argument instead of reading process
//! state, so both platform behaviours can be exercised from any host.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Posix,
    Windows,
}

/// Which absolute-path convention a path matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AbsoluteKind {
    PosixAbsolute,
    WindowsAbsolute,
}

impl Platform {
    /// Classify an OS name such as `"Windows 10"` or `"Linux"`.
    pub fn from_os_name(os_name: &str) -> Self {
        if os_name.to_lowercase().contains("windows") {
            Platform::Windows
        } else {
            Platform::Posix
        }
    }

    /// Platform of the running process.
    pub fn host() -> Self {
        Self::from_os_name(std::env::consts::OS)
    }

    pub fn is_windows(self) -> bool {
        self == Platform::Windows
    }

    pub fn separator(self) -> char {
        match self {
            Platform::Posix => '/',
            Platform::Windows => '\\',
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Posix => "posix",
            Platform::Windows => "windows",
        }
    }

    pub fn absolute_kind(self, path: &str) -> Option<AbsoluteKind> {
        match self {
            Platform::Posix => is_posix_absolute(path).then_some(AbsoluteKind::PosixAbsolute),
            Platform::Windows => {
                is_windows_absolute(path).then_some(AbsoluteKind::WindowsAbsolute)
            }
        }
    }

    pub fn is_absolute(self, path: &str) -> bool {
        self.absolute_kind(path).is_some()
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "posix" | "unix" | "linux" | "macos" => Ok(Platform::Posix),
            "windows" | "win" => Ok(Platform::Windows),
            other => Err(Error::validation_invalid_argument(
                "platform",
                format!("Unknown platform: {}", other),
                Some(other.to_string()),
                Some(vec!["posix".to_string(), "windows".to_string()]),
            )),
        }
    }
}

/// `/usr/local` style paths.
pub fn is_posix_absolute(path: &str) -> bool {
    path.starts_with('/')
}

/// `C:\Users`, `c:/users` or UNC `\\server\share` paths.
///
/// A bare `C:foo` is drive-relative and does not count.
pub fn is_windows_absolute(path: &str) -> bool {
    if path.starts_with(r"\\") {
        return true;
    }

    let bytes = path.as_bytes();
    bytes.len() >= 3
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && (bytes[2] == b'\\' || bytes[2] == b'/')
}
