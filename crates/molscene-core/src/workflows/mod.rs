//! # Workflows Module
//!
//! High-level entry points that run a complete import: decode a MOL table, build
//! the sphere and cylinder descriptors, and optionally hand them to a host scene.
//!
//! - **Import Workflow** ([`import`]) - parse-then-build, plus the parse-then-apply
//!   step that populates a [`SceneBuilder`](crate::engine::scene::SceneBuilder)
//!   all at once or not at all.

pub mod import;
