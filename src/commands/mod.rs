//! CLI command implementations.

pub mod bom;
