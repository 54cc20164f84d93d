// Public modules
pub mod defaults;
pub mod error;
pub mod paths;
pub mod platform;
pub mod url;
pub mod version;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
pub use platform::{AbsoluteKind, Platform};
pub use version::VersionComparison;
