use crate::cli::{ImportArgs, OutputFormat};
use crate::config::build_config;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use molscene::{
    core::models::molecule::Molecule,
    engine::{
        config::ImportConfig,
        error::ImportError,
        primitives::{CylinderDescriptor, MolScene, SphereDescriptor},
        progress::ProgressReporter,
        scene::RecordingScene,
    },
    workflows::import::{self, ImportResult},
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

pub fn run(args: ImportArgs) -> Result<()> {
    let app = build_config(&args)?;
    let config = app.core_config;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    let ImportResult { molecule, scene } = import_file(&app.input_path, &config, &reporter)?;

    let mut host = RecordingScene::new();
    let applied = import::apply(&scene, &mut host, &reporter)?;
    info!(
        "Scene holds {} object(s): {} atom(s), {} bond(s).",
        host.len(),
        applied.atoms.len(),
        applied.bonds.len()
    );
    for (id, object) in host.iter() {
        debug!("{:?} -> {}", id, object.name());
    }

    let output = match app.format {
        OutputFormat::Summary => render_summary(&app.input_path, &molecule, &scene, &config),
        OutputFormat::Toml => render_toml(&molecule, &scene, &config)?,
    };
    print!("{output}");
    Ok(())
}

fn import_file(
    path: &Path,
    config: &ImportConfig,
    reporter: &ProgressReporter,
) -> Result<ImportResult> {
    info!("Invoking the import workflow on {:?}", path);
    import::run_from_path(path, config, reporter).map_err(|e| match e {
        ImportError::Parse(_) => CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        },
        other => other.into(),
    })
}

fn render_summary(
    path: &Path,
    molecule: &Molecule,
    scene: &MolScene,
    config: &ImportConfig,
) -> String {
    let mut elements: BTreeMap<&str, usize> = BTreeMap::new();
    for sphere in &scene.spheres {
        *elements.entry(sphere.element.as_str()).or_default() += 1;
    }
    let formula = elements
        .iter()
        .map(|(symbol, count)| format!("{symbol}x{count}"))
        .collect::<Vec<_>>()
        .join(" ");

    let (vertices, triangles) = mesh_totals(scene, config);
    let mut out = String::new();
    out.push_str(&format!(
        "Imported '{}' from {}\n",
        molecule.header.title,
        path.display()
    ));
    out.push_str(&format!(
        "  {:<10} {} sphere(s), diameter {:.3}\n",
        "Atoms:",
        scene.spheres.len(),
        config.atom_diameter
    ));
    out.push_str(&format!(
        "  {:<10} {} cylinder(s), diameter {:.3}\n",
        "Bonds:",
        scene.cylinders.len(),
        config.bond_diameter
    ));
    if !formula.is_empty() {
        out.push_str(&format!("  {:<10} {}\n", "Elements:", formula));
    }
    if let Some(longest) = scene
        .cylinders
        .iter()
        .max_by(|a, b| a.length.total_cmp(&b.length))
    {
        out.push_str(&format!(
            "  {:<10} {} ({:.4})\n",
            "Longest:", longest.name, longest.length
        ));
    }
    out.push_str(&format!(
        "  {:<10} {} vertices, {} triangles\n",
        "Mesh:", vertices, triangles
    ));
    out
}

fn mesh_totals(scene: &MolScene, config: &ImportConfig) -> (usize, usize) {
    let spheres = scene.spheres.iter().map(|s| s.mesh(&config.mesh));
    let cylinders = scene.cylinders.iter().map(|c| c.mesh(&config.mesh));
    spheres.chain(cylinders).fold((0, 0), |(v, t), mesh| {
        (v + mesh.vertex_count(), t + mesh.triangle_count())
    })
}

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct SceneReport {
    title: String,
    atom_diameter: f64,
    bond_diameter: f64,
    atoms: Vec<AtomEntry>,
    bonds: Vec<BondEntry>,
}

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct AtomEntry {
    name: String,
    element: String,
    center: [f64; 3],
    charge_code: i32,
    color: [f32; 3],
}

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct BondEntry {
    name: String,
    from: String,
    to: String,
    center: [f64; 3],
    length: f64,
    /// Unit quaternion as `[w, x, y, z]`.
    rotation: [f64; 4],
    order_code: i32,
    stereo_code: i32,
}

impl From<&SphereDescriptor> for AtomEntry {
    fn from(sphere: &SphereDescriptor) -> Self {
        Self {
            name: sphere.name.clone(),
            element: sphere.element.clone(),
            center: sphere.center.coords.into(),
            charge_code: sphere.charge_code,
            color: sphere.color,
        }
    }
}

impl From<&CylinderDescriptor> for BondEntry {
    fn from(cylinder: &CylinderDescriptor) -> Self {
        let q = cylinder.transform().rotation;
        Self {
            name: cylinder.name.clone(),
            from: cylinder.from_name.clone(),
            to: cylinder.to_name.clone(),
            center: cylinder.center.coords.into(),
            length: cylinder.length,
            rotation: [q.w, q.i, q.j, q.k],
            order_code: cylinder.order_code,
            stereo_code: cylinder.stereo_code,
        }
    }
}

fn render_toml(molecule: &Molecule, scene: &MolScene, config: &ImportConfig) -> Result<String> {
    let report = SceneReport {
        title: molecule.header.title.clone(),
        atom_diameter: config.atom_diameter,
        bond_diameter: config.bond_diameter,
        atoms: scene.spheres.iter().map(AtomEntry::from).collect(),
        bonds: scene.cylinders.iter().map(BondEntry::from).collect(),
    };
    toml::to_string(&report).map_err(|e| CliError::Other(e.into()))
}
