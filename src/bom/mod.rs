//! Grouped BOM generation.

pub mod group;
pub mod resolve;
pub mod writer;

pub use group::group_components;
pub use resolve::{resolve_output, Resolution};
pub use writer::write_bom;
