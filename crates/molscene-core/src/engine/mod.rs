//! # Engine Module
//!
//! Turns a decoded [`Molecule`](crate::core::models::molecule::Molecule) into the
//! primitives a 3D host needs, and defines how those primitives reach the host.
//!
//! ## Overview
//!
//! - **Geometry** ([`primitives`]) - One sphere per atom and one cylinder per bond, with
//!   bond references resolved and cylinder orientations computed
//! - **Host seam** ([`scene`]) - The [`scene::SceneBuilder`] trait implemented by host
//!   applications, plus an in-memory [`scene::RecordingScene`]
//! - **Tessellation** ([`mesh`]) - Triangle meshes for hosts without native primitives
//! - **Configuration** ([`config`]) - Validated diameters and mesh resolution
//! - **Diagnostics** ([`error`], [`progress`]) - The import error taxonomy and progress events
//!
//! Every operation here is a pure transform over immutable input; the only side
//! effects are the calls made through a caller-supplied `SceneBuilder`.

pub mod config;
pub mod error;
pub mod mesh;
pub mod primitives;
pub mod progress;
pub mod scene;
