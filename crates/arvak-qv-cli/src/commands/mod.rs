//! CLI command implementations.

pub mod basis;
pub mod common;
pub mod fit;
pub mod version;
