use crate::core::io::mol::{MolError, MolFile};
use crate::core::io::traits::MolecularFile;
use crate::core::models::molecule::Molecule;
use crate::engine::config::ImportConfig;
use crate::engine::error::ImportError;
use crate::engine::primitives::{MolScene, build_scene};
use crate::engine::progress::{Progress, ProgressReporter, Stage};
use crate::engine::scene::SceneBuilder;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct ImportResult {
    pub molecule: Molecule,
    pub scene: MolScene,
}

/// Host handles created by [`apply`], index-aligned with the descriptors.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedScene<H> {
    pub atoms: Vec<H>,
    pub bonds: Vec<H>,
}

/// Decodes MOL text and builds its descriptors with the given diameters.
///
/// Nothing is returned unless the whole file decodes and every bond resolves.
pub fn import_mol(
    contents: &str,
    atom_diameter: f64,
    bond_diameter: f64,
) -> Result<MolScene, ImportError> {
    let config = ImportConfig {
        atom_diameter,
        bond_diameter,
        ..Default::default()
    };
    run(contents, &config, &ProgressReporter::new()).map(|result| result.scene)
}

#[instrument(skip_all, name = "import_workflow")]
pub fn run(
    contents: &str,
    config: &ImportConfig,
    reporter: &ProgressReporter,
) -> Result<ImportResult, ImportError> {
    config.validate()?;

    reporter.report(Progress::StageStart(Stage::Decode));
    let molecule = MolFile::read_from_str(contents)?;
    reporter.report(Progress::StageFinish(Stage::Decode));
    info!(
        "Decoded '{}': {} atom(s), {} bond(s).",
        molecule.header.title,
        molecule.atom_count(),
        molecule.bond_count()
    );

    let scene = build_scene(&molecule, config, reporter)?;
    Ok(ImportResult { molecule, scene })
}

pub fn run_from_path(
    path: impl AsRef<Path>,
    config: &ImportConfig,
    reporter: &ProgressReporter,
) -> Result<ImportResult, ImportError> {
    let path = path.as_ref();
    debug!("Reading MOL file from {}", path.display());
    let contents = std::fs::read_to_string(path).map_err(MolError::from)?;
    run(&contents, config, reporter)
}

/// Materializes a built scene through the host interface.
///
/// Spheres are created first, then cylinders, each in file order. If the host
/// fails, every object created during this call is removed again, newest first,
/// and the host's error is returned.
#[instrument(skip_all, name = "apply_scene")]
pub fn apply<S: SceneBuilder>(
    scene: &MolScene,
    builder: &mut S,
    reporter: &ProgressReporter,
) -> Result<AppliedScene<S::Handle>, ImportError> {
    reporter.report(Progress::StageStart(Stage::Scene));
    reporter.report(Progress::ObjectsPlanned {
        total: scene.len() as u64,
    });

    let mut applied = AppliedScene {
        atoms: Vec::with_capacity(scene.spheres.len()),
        bonds: Vec::with_capacity(scene.cylinders.len()),
    };

    if let Err(err) = populate(scene, builder, reporter, &mut applied) {
        rollback(builder, applied);
        return Err(err);
    }

    reporter.report(Progress::StageFinish(Stage::Scene));
    info!(
        "Created {} atom object(s) and {} bond object(s).",
        applied.atoms.len(),
        applied.bonds.len()
    );
    Ok(applied)
}

fn populate<S: SceneBuilder>(
    scene: &MolScene,
    builder: &mut S,
    reporter: &ProgressReporter,
    applied: &mut AppliedScene<S::Handle>,
) -> Result<(), ImportError> {
    for sphere in &scene.spheres {
        let handle = builder
            .add_sphere(sphere)
            .map_err(|e| host_error(format!("could not create atom '{}'", sphere.name), e))?;
        applied.atoms.push(handle);
        reporter.report(Progress::ObjectDone);
    }

    let atom_count = applied.atoms.len();
    for cylinder in &scene.cylinders {
        let endpoint = |index: usize, field: &'static str| {
            index
                .checked_sub(1)
                .and_then(|i| applied.atoms.get(i))
                .ok_or(ImportError::Reference {
                    line: cylinder.line,
                    field,
                    index,
                    atom_count,
                })
        };
        let from = endpoint(cylinder.from_atom, "first atom")?;
        let to = endpoint(cylinder.to_atom, "second atom")?;
        let handle = builder
            .add_cylinder(cylinder, from, to)
            .map_err(|e| host_error(format!("could not create bond '{}'", cylinder.name), e))?;
        applied.bonds.push(handle);
        reporter.report(Progress::ObjectDone);
    }
    Ok(())
}

fn rollback<S: SceneBuilder>(builder: &mut S, applied: AppliedScene<S::Handle>) {
    let total = applied.atoms.len() + applied.bonds.len();
    warn!("Scene population failed; removing {total} object(s) created so far.");
    for handle in applied.bonds.iter().rev().chain(applied.atoms.iter().rev()) {
        builder.remove(handle);
    }
}

fn host_error<E>(message: String, source: E) -> ImportError
where
    E: std::error::Error + Send + Sync + 'static,
{
    ImportError::Scene {
        message,
        source: Box::new(source),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::{ConfigError, ImportConfigBuilder};
    use crate::engine::scene::RecordingScene;
    use nalgebra::{Point3, Rotation3};
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::NamedTempFile;
    use thiserror::Error;

    const TOL: f64 = 1e-6;

    const CARBON_MONOXIDE: &str = "\
  MolScene  test

  2  1  0  0  0  0  0  0  0  0999 V2000
    0.0000    0.0000    0.0000 C   0  0  0  0  0  0  0  0  0  0  0  0
    0.0000    0.0000    1.5000 O   0  0  0  0  0  0  0  0  0  0  0  0
  1  2  1  0  0  0  0
M  END
";

    const WATER: &str = "\
water

  3  2  0  0  0  0  0  0  0  0999 V2000
    0.0000    0.0000    0.1173 O   0  0  0  0  0  0  0  0  0  0  0  0
    0.0000    0.7572   -0.4692 H   0  0  0  0  0  0  0  0  0  0  0  0
    0.0000   -0.7572   -0.4692 H   0  0  0  0  0  0  0  0  0  0  0  0
  1  2  1  0  0  0  0
  1  3  1  0  0  0  0
M  END
";

    const DANGLING_BOND: &str = "\
broken

  2  1  0  0  0  0  0  0  0  0999 V2000
    0.0000    0.0000    0.0000 C   0  0  0  0  0  0  0  0  0  0  0  0
    0.0000    0.0000    1.5000 O   0  0  0  0  0  0  0  0  0  0  0  0
  1  3  1  0  0  0  0
M  END
";

    #[test]
    fn two_atom_file_yields_two_spheres_and_one_cylinder() {
        let scene = import_mol(CARBON_MONOXIDE, 1.0, 0.4).unwrap();

        assert_eq!(scene.spheres.len(), 2);
        assert_eq!(scene.cylinders.len(), 1);
        assert_eq!(scene.spheres[0].name, "C2");
        assert_eq!(scene.spheres[1].name, "O3");
        assert_eq!(scene.spheres[1].center, Point3::new(0.0, 0.0, 1.5));

        let cyl = &scene.cylinders[0];
        assert_eq!(cyl.name, "bond_C2-O3");
        assert!((cyl.length - 1.5).abs() < TOL);
        assert!((cyl.center - Point3::new(0.0, 0.0, 0.75)).norm() < TOL);
        assert!(cyl.rotation.angle_to(&Rotation3::identity()) < TOL);
        assert_eq!(cyl.diameter, 0.4);
    }

    #[test]
    fn importing_twice_gives_the_same_geometry() {
        let first = import_mol(WATER, 1.0, 0.4).unwrap();
        let second = import_mol(WATER, 1.0, 0.4).unwrap();

        for (a, b) in first.spheres.iter().zip(&second.spheres) {
            assert_eq!(a.name, b.name);
            assert!((a.center - b.center).norm() < TOL);
        }
        for (a, b) in first.cylinders.iter().zip(&second.cylinders) {
            assert_eq!(a.name, b.name);
            assert!((a.center - b.center).norm() < TOL);
            assert!((a.length - b.length).abs() < TOL);
            assert!(a.rotation.angle_to(&b.rotation) < TOL);
        }
    }

    #[test]
    fn zero_counts_produce_an_empty_scene() {
        let text = "empty\n\n  0  0  0  0  0  0  0  0  0  0999 V2000\nM  END\n";
        let scene = import_mol(text, 1.0, 0.4).unwrap();
        assert!(scene.is_empty());
    }

    #[test]
    fn dangling_bond_reference_yields_no_geometry() {
        let err = import_mol(DANGLING_BOND, 1.0, 0.4).unwrap_err();
        match err {
            ImportError::Reference {
                line,
                field,
                index,
                atom_count,
            } => {
                assert_eq!(line, 6);
                assert_eq!(field, "second atom");
                assert_eq!(index, 3);
                assert_eq!(atom_count, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn parse_failures_surface_as_parse_errors() {
        let err = import_mol("title\n\n  x  0\n", 1.0, 0.4).unwrap_err();
        assert!(matches!(err, ImportError::Parse(MolError::Parse { .. })));
    }

    #[test]
    fn invalid_config_fails_before_decoding() {
        let events = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            events.lock().unwrap().push(event);
        }));
        let config = ImportConfig {
            bond_diameter: 0.0,
            ..Default::default()
        };

        let err = run(CARBON_MONOXIDE, &config, &reporter).unwrap_err();
        assert!(matches!(
            err,
            ImportError::Config(ConfigError::NonPositive {
                name: "bond_diameter",
                ..
            })
        ));
        drop(reporter);
        assert!(events.into_inner().unwrap().is_empty());
    }

    #[test]
    fn run_keeps_molecule_and_reports_stages() {
        let events = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            events.lock().unwrap().push(event);
        }));
        let config = ImportConfigBuilder::new()
            .atom_diameter(0.5)
            .bond_diameter(0.1)
            .build()
            .unwrap();

        let result = run(WATER, &config, &reporter).unwrap();
        assert_eq!(result.molecule.header.title, "water");
        assert_eq!(result.molecule.atom_count(), 3);
        assert!(result.scene.spheres.iter().all(|s| s.diameter == 0.5));

        drop(reporter);
        let events = events.into_inner().unwrap();
        assert_eq!(events.first(), Some(&Progress::StageStart(Stage::Decode)));
        assert!(events.contains(&Progress::StageFinish(Stage::Decode)));
        assert!(events.contains(&Progress::ObjectsPlanned { total: 5 }));
        assert_eq!(
            events.iter().filter(|e| **e == Progress::ObjectDone).count(),
            5
        );
        assert_eq!(events.last(), Some(&Progress::StageFinish(Stage::Geometry)));
    }

    #[test]
    fn run_from_path_reads_the_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(WATER.as_bytes()).unwrap();

        let result = run_from_path(file.path(), &ImportConfig::default(), &ProgressReporter::new())
            .unwrap();
        assert_eq!(result.scene.len(), 5);
    }

    #[test]
    fn run_from_missing_path_is_an_io_error() {
        let err = run_from_path(
            "/definitely/not/here.mol",
            &ImportConfig::default(),
            &ProgressReporter::new(),
        )
        .unwrap_err();
        assert!(matches!(err, ImportError::Parse(MolError::Io(_))));
    }

    #[test]
    fn apply_creates_spheres_then_cylinders_in_file_order() {
        let scene = import_mol(WATER, 1.0, 0.4).unwrap();
        let mut host = RecordingScene::new();

        let applied = apply(&scene, &mut host, &ProgressReporter::new()).unwrap();
        assert_eq!(applied.atoms.len(), 3);
        assert_eq!(applied.bonds.len(), 2);

        let names: Vec<_> = host.iter().map(|(_, obj)| obj.name().to_string()).collect();
        assert_eq!(names, ["O2", "H3", "H4", "bond_O2-H3", "bond_O2-H4"]);
    }

    #[derive(Debug, Error)]
    #[error("host refused object #{0}")]
    struct Refused(usize);

    /// Wraps a recording scene and fails on the n-th creation request.
    struct FlakyScene {
        inner: RecordingScene,
        fail_at: usize,
        calls: usize,
    }

    impl FlakyScene {
        fn tick(&mut self) -> Result<(), Refused> {
            self.calls += 1;
            if self.calls == self.fail_at {
                Err(Refused(self.calls))
            } else {
                Ok(())
            }
        }
    }

    impl SceneBuilder for FlakyScene {
        type Handle = <RecordingScene as SceneBuilder>::Handle;
        type Error = Refused;

        fn add_sphere(
            &mut self,
            sphere: &crate::engine::primitives::SphereDescriptor,
        ) -> Result<Self::Handle, Refused> {
            self.tick()?;
            Ok(self.inner.add_sphere(sphere).unwrap())
        }

        fn add_cylinder(
            &mut self,
            cylinder: &crate::engine::primitives::CylinderDescriptor,
            from: &Self::Handle,
            to: &Self::Handle,
        ) -> Result<Self::Handle, Refused> {
            self.tick()?;
            Ok(self.inner.add_cylinder(cylinder, from, to).unwrap())
        }

        fn remove(&mut self, handle: &Self::Handle) {
            self.inner.remove(handle);
        }
    }

    #[test]
    fn host_failure_rolls_back_every_created_object() {
        let scene = import_mol(WATER, 1.0, 0.4).unwrap();
        for fail_at in 1..=scene.len() {
            let mut host = FlakyScene {
                inner: RecordingScene::new(),
                fail_at,
                calls: 0,
            };
            let err = apply(&scene, &mut host, &ProgressReporter::new()).unwrap_err();
            match err {
                ImportError::Scene { source, .. } => {
                    assert_eq!(source.to_string(), format!("host refused object #{fail_at}"));
                }
                other => panic!("unexpected error: {other:?}"),
            }
            assert!(host.inner.is_empty(), "leftovers after failing at {fail_at}");
        }
    }

    #[test]
    fn apply_rejects_cylinders_whose_atoms_were_not_created() {
        let mut scene = import_mol(CARBON_MONOXIDE, 1.0, 0.4).unwrap();
        scene.spheres.pop();
        let mut host = RecordingScene::new();

        let err = apply(&scene, &mut host, &ProgressReporter::new()).unwrap_err();
        assert!(matches!(
            err,
            ImportError::Reference {
                index: 2,
                atom_count: 1,
                ..
            }
        ));
        assert!(host.is_empty());
    }
}
