//! Platform resolver
//!
//! Pure mapping from the running platform to the bytecode kinds it can load
//! and the source language it prefers.

mod capabilities;
mod resolver;

pub use capabilities::PlatformCapabilities;
pub use resolver::{resolve_platform, supported_platforms, PlatformRequirements};
