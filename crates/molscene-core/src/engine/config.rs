use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_ATOM_DIAMETER: f64 = 1.0;
pub const DEFAULT_BOND_DIAMETER: f64 = 0.4;
pub const DEFAULT_SEGMENTS: u32 = 16;
pub const MIN_SEGMENTS: u32 = 3;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Parameter '{name}' must be a finite number greater than zero (got {value})")]
    NonPositive { name: &'static str, value: f64 },
    #[error("Parameter '{name}' needs at least {minimum} segments (got {value})")]
    TooFewSegments {
        name: &'static str,
        value: u32,
        minimum: u32,
    },
}

/// Tessellation density used when primitives are turned into triangle meshes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct MeshResolution {
    /// Subdivisions around the sphere's polar axis.
    pub sphere_segments: u32,
    /// Subdivisions from pole to pole.
    pub sphere_rings: u32,
    /// Subdivisions around the cylinder's axis.
    pub cylinder_segments: u32,
}

impl Default for MeshResolution {
    fn default() -> Self {
        Self {
            sphere_segments: DEFAULT_SEGMENTS,
            sphere_rings: DEFAULT_SEGMENTS,
            cylinder_segments: DEFAULT_SEGMENTS,
        }
    }
}

impl MeshResolution {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_segments("sphere_segments", self.sphere_segments)?;
        check_segments("sphere_rings", self.sphere_rings)?;
        check_segments("cylinder_segments", self.cylinder_segments)
    }
}

/// Parameters of one import: primitive sizes and mesh density.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ImportConfig {
    pub atom_diameter: f64,
    pub bond_diameter: f64,
    #[serde(default)]
    pub mesh: MeshResolution,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            atom_diameter: DEFAULT_ATOM_DIAMETER,
            bond_diameter: DEFAULT_BOND_DIAMETER,
            mesh: MeshResolution::default(),
        }
    }
}

impl ImportConfig {
    /// Checks every parameter. Values deserialized from a file bypass the
    /// builder, so the import workflow calls this before doing any work.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_diameter("atom_diameter", self.atom_diameter)?;
        check_diameter("bond_diameter", self.bond_diameter)?;
        self.mesh.validate()
    }
}

#[derive(Default)]
pub struct ImportConfigBuilder {
    atom_diameter: Option<f64>,
    bond_diameter: Option<f64>,
    mesh: Option<MeshResolution>,
}

impl ImportConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn atom_diameter(mut self, diameter: f64) -> Self {
        self.atom_diameter = Some(diameter);
        self
    }
    pub fn bond_diameter(mut self, diameter: f64) -> Self {
        self.bond_diameter = Some(diameter);
        self
    }
    pub fn mesh_resolution(mut self, mesh: MeshResolution) -> Self {
        self.mesh = Some(mesh);
        self
    }

    pub fn build(self) -> Result<ImportConfig, ConfigError> {
        let config = ImportConfig {
            atom_diameter: self
                .atom_diameter
                .ok_or(ConfigError::MissingParameter("atom_diameter"))?,
            bond_diameter: self
                .bond_diameter
                .ok_or(ConfigError::MissingParameter("bond_diameter"))?,
            mesh: self.mesh.unwrap_or_default(),
        };
        config.validate()?;
        Ok(config)
    }
}

fn check_diameter(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

fn check_segments(name: &'static str, value: u32) -> Result<(), ConfigError> {
    if value >= MIN_SEGMENTS {
        Ok(())
    } else {
        Err(ConfigError::TooFewSegments {
            name,
            value,
            minimum: MIN_SEGMENTS,
        })
    }
}
