//! Generic utility primitives with zero build-decision logic.
//!
//! - `duration` - Human-readable elapsed time
//! - `env` - Environment variable / build property lookup
//! - `properties` - Prefix-scoped property extraction
//! - `text` - List splitting and property placeholder parsing
//! - `validation` - Input validation helpers

pub mod duration;
pub mod env;
pub mod properties;
pub mod text;
pub mod validation;
