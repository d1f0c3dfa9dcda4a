use super::config::ImportConfig;
use super::error::ImportError;
use super::progress::{Progress, ProgressReporter, Stage};
use crate::core::models::atom::Atom;
use crate::core::models::molecule::Molecule;
use crate::core::models::topology::{Bond, BondOrder};
use crate::core::utils::elements::{Color, element_color, is_known_element};
use crate::core::utils::geometry::{canonical_axis, segment_placement};
use nalgebra::{Isometry3, Point3, Rotation3, Translation3, UnitQuaternion, Vector3};
use tracing::{debug, info, trace};

/// Placement and tags of the sphere that represents one atom.
#[derive(Debug, Clone, PartialEq)]
pub struct SphereDescriptor {
    pub name: String,
    pub atom_index: usize,
    pub center: Point3<f64>,
    pub diameter: f64,
    pub element: String,
    pub charge_code: i32,
    pub color: Color,
}

impl SphereDescriptor {
    pub fn radius(&self) -> f64 {
        self.diameter / 2.0
    }

    pub fn transform(&self) -> Isometry3<f64> {
        Isometry3::translation(self.center.x, self.center.y, self.center.z)
    }
}

/// Placement and tags of the cylinder that represents one bond.
///
/// The unrotated cylinder runs along +Z and is centered at the origin; applying
/// [`CylinderDescriptor::transform`] puts it between the two atom centers.
#[derive(Debug, Clone, PartialEq)]
pub struct CylinderDescriptor {
    pub name: String,
    /// 1-based position within the bond block.
    pub bond_index: usize,
    /// 1-based line of the source file the bond was read from.
    pub line: usize,
    pub from_atom: usize,
    pub to_atom: usize,
    pub from_name: String,
    pub to_name: String,
    pub center: Point3<f64>,
    pub length: f64,
    pub diameter: f64,
    pub rotation: Rotation3<f64>,
    pub order_code: i32,
    pub order: Option<BondOrder>,
    pub stereo_code: i32,
}

impl CylinderDescriptor {
    pub fn radius(&self) -> f64 {
        self.diameter / 2.0
    }

    /// Unit vector along the bond, from the first atom toward the second.
    pub fn direction(&self) -> Vector3<f64> {
        self.rotation * canonical_axis().into_inner()
    }

    pub fn endpoints(&self) -> (Point3<f64>, Point3<f64>) {
        let half = self.direction() * (self.length / 2.0);
        (self.center - half, self.center + half)
    }

    pub fn transform(&self) -> Isometry3<f64> {
        Isometry3::from_parts(
            Translation3::from(self.center.coords),
            UnitQuaternion::from_rotation_matrix(&self.rotation),
        )
    }
}

/// Every primitive of one import, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MolScene {
    pub spheres: Vec<SphereDescriptor>,
    pub cylinders: Vec<CylinderDescriptor>,
}

impl MolScene {
    pub fn len(&self) -> usize {
        self.spheres.len() + self.cylinders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spheres.is_empty() && self.cylinders.is_empty()
    }
}

pub fn build_sphere(atom: &Atom, diameter: f64) -> SphereDescriptor {
    if !is_known_element(&atom.symbol) {
        trace!("No colour for element '{}' of {}, using fallback.", atom.symbol, atom.name);
    }
    SphereDescriptor {
        name: atom.name.clone(),
        atom_index: atom.index,
        center: atom.position,
        diameter,
        element: atom.symbol.clone(),
        charge_code: atom.charge_code,
        color: element_color(&atom.symbol),
    }
}

pub fn build_cylinder(
    bond: &Bond,
    bond_index: usize,
    from: &Atom,
    to: &Atom,
    diameter: f64,
) -> CylinderDescriptor {
    let placement = segment_placement(&from.position, &to.position);
    CylinderDescriptor {
        name: format!("bond_{}-{}", from.name, to.name),
        bond_index,
        line: bond.line,
        from_atom: from.index,
        to_atom: to.index,
        from_name: from.name.clone(),
        to_name: to.name.clone(),
        center: placement.center,
        length: placement.length,
        diameter,
        rotation: placement.rotation,
        order_code: bond.order_code,
        order: bond.order(),
        stereo_code: bond.stereo_code,
    }
}

/// Resolves both ends of a bond against the atom table.
pub fn resolve_bond<'a>(
    molecule: &'a Molecule,
    bond: &Bond,
) -> Result<(&'a Atom, &'a Atom), ImportError> {
    let lookup = |index: usize, field: &'static str| {
        molecule.atom(index).ok_or(ImportError::Reference {
            line: bond.line,
            field,
            index,
            atom_count: molecule.atom_count(),
        })
    };
    Ok((
        lookup(bond.from_atom, "first atom")?,
        lookup(bond.to_atom, "second atom")?,
    ))
}

/// Builds the sphere and cylinder descriptors of a molecule.
///
/// All bond references are resolved before any descriptor is produced; a single
/// dangling reference fails the whole build.
pub fn build_scene(
    molecule: &Molecule,
    config: &ImportConfig,
    reporter: &ProgressReporter,
) -> Result<MolScene, ImportError> {
    let endpoints = molecule
        .bonds()
        .iter()
        .map(|bond| resolve_bond(molecule, bond))
        .collect::<Result<Vec<_>, _>>()?;

    reporter.report(Progress::StageStart(Stage::Geometry));
    reporter.report(Progress::ObjectsPlanned {
        total: (molecule.atom_count() + molecule.bond_count()) as u64,
    });

    let spheres = molecule
        .atoms()
        .iter()
        .map(|atom| {
            let sphere = build_sphere(atom, config.atom_diameter);
            reporter.report(Progress::ObjectDone);
            sphere
        })
        .collect::<Vec<_>>();

    let cylinders = molecule
        .bonds()
        .iter()
        .zip(endpoints)
        .enumerate()
        .map(|(i, (bond, (from, to)))| {
            let cylinder = build_cylinder(bond, i + 1, from, to, config.bond_diameter);
            if bond.order().is_none() {
                reporter.report(Progress::Message(format!(
                    "{} keeps unrecognized bond type code {}",
                    cylinder.name, bond.order_code
                )));
            }
            debug!(
                "{}: length {:.4}, center ({:.4}, {:.4}, {:.4})",
                cylinder.name,
                cylinder.length,
                cylinder.center.x,
                cylinder.center.y,
                cylinder.center.z
            );
            reporter.report(Progress::ObjectDone);
            cylinder
        })
        .collect::<Vec<_>>();

    reporter.report(Progress::StageFinish(Stage::Geometry));
    info!(
        "Built {} sphere(s) and {} cylinder(s).",
        spheres.len(),
        cylinders.len()
    );
    Ok(MolScene { spheres, cylinders })
}
