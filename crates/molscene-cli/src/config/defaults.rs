use molscene::engine::config::{DEFAULT_ATOM_DIAMETER, DEFAULT_BOND_DIAMETER, DEFAULT_SEGMENTS};

pub struct DefaultsConfig {
    pub atom_diameter: f64,
    pub bond_diameter: f64,
    pub sphere_segments: u32,
    pub sphere_rings: u32,
    pub cylinder_segments: u32,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            atom_diameter: DEFAULT_ATOM_DIAMETER,
            bond_diameter: DEFAULT_BOND_DIAMETER,
            sphere_segments: DEFAULT_SEGMENTS,
            sphere_rings: DEFAULT_SEGMENTS,
            cylinder_segments: DEFAULT_SEGMENTS,
        }
    }
}
