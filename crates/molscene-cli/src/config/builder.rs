use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::AppConfig;
use crate::cli::ImportArgs;
use crate::error::{CliError, Result};
use molscene::engine::config::{ImportConfigBuilder, MeshResolution};
use std::str::FromStr;

/// Merges command-line flags, `--set` values, the config file and built-in
/// defaults, in that order of precedence.
pub fn build_config(args: &ImportArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let geometry_file = file_config.geometry.take().unwrap_or_default();
    let atom_diameter = args
        .atom_diameter
        .or(geometry_file.atom_diameter)
        .unwrap_or(defaults.atom_diameter);
    let bond_diameter = args
        .bond_diameter
        .or(geometry_file.bond_diameter)
        .unwrap_or(defaults.bond_diameter);

    let mesh_file = file_config.mesh.take().unwrap_or_default();
    let mesh = MeshResolution {
        sphere_segments: args
            .sphere_segments
            .or(mesh_file.sphere_segments)
            .unwrap_or(defaults.sphere_segments),
        sphere_rings: args
            .sphere_rings
            .or(mesh_file.sphere_rings)
            .unwrap_or(defaults.sphere_rings),
        cylinder_segments: args
            .cylinder_segments
            .or(mesh_file.cylinder_segments)
            .unwrap_or(defaults.cylinder_segments),
    };

    let core_config = ImportConfigBuilder::new()
        .atom_diameter(atom_diameter)
        .bond_diameter(bond_diameter)
        .mesh_resolution(mesh)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        input_path: args.input.clone(),
        format: args.format,
        core_config,
    })
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value))
    })
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };
        let key = key.trim();

        match key {
            "geometry.atom-diameter" => {
                config
                    .geometry
                    .get_or_insert_with(Default::default)
                    .atom_diameter = Some(parse_value(key, value_str, "float")?);
            }
            "geometry.bond-diameter" => {
                config
                    .geometry
                    .get_or_insert_with(Default::default)
                    .bond_diameter = Some(parse_value(key, value_str, "float")?);
            }
            "mesh.sphere-segments" => {
                config
                    .mesh
                    .get_or_insert_with(Default::default)
                    .sphere_segments = Some(parse_value(key, value_str, "integer")?);
            }
            "mesh.sphere-rings" => {
                config.mesh.get_or_insert_with(Default::default).sphere_rings =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "mesh.cylinder-segments" => {
                config
                    .mesh
                    .get_or_insert_with(Default::default)
                    .cylinder_segments = Some(parse_value(key, value_str, "integer")?);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn base_import_args() -> ImportArgs {
        ImportArgs {
            input: PathBuf::from("in.mol"),
            config: None,
            atom_diameter: None,
            bond_diameter: None,
            sphere_segments: None,
            sphere_rings: None,
            cylinder_segments: None,
            set_values: vec![],
            format: OutputFormat::Summary,
        }
    }

    fn write_config(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("molscene.toml");
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn defaults_fill_everything_without_a_file() {
        let app = build_config(&base_import_args()).expect("build ok");
        let cfg = app.core_config;
        let defaults = DefaultsConfig::default();

        assert_eq!(app.input_path, PathBuf::from("in.mol"));
        assert_eq!(cfg.atom_diameter, defaults.atom_diameter);
        assert_eq!(cfg.bond_diameter, defaults.bond_diameter);
        assert_eq!(cfg.mesh.sphere_segments, defaults.sphere_segments);
        assert_eq!(cfg.mesh.sphere_rings, defaults.sphere_rings);
        assert_eq!(cfg.mesh.cylinder_segments, defaults.cylinder_segments);
    }

    #[test]
    fn build_config_reads_file_and_merges() {
        let (_dir, path) = write_config(
            r#"
            [geometry]
            atom-diameter = 0.7

            [mesh]
            sphere-rings = 10
            cylinder-segments = 6
            "#,
        );
        let mut args = base_import_args();
        args.config = Some(path);

        let cfg = build_config(&args).expect("build ok").core_config;
        assert_eq!(cfg.atom_diameter, 0.7);
        assert_eq!(cfg.bond_diameter, DefaultsConfig::default().bond_diameter);
        assert_eq!(cfg.mesh.sphere_rings, 10);
        assert_eq!(cfg.mesh.cylinder_segments, 6);
        assert_eq!(
            cfg.mesh.sphere_segments,
            DefaultsConfig::default().sphere_segments
        );
    }

    #[test]
    fn cli_overrides_set_values_which_override_the_file() {
        let (_dir, path) = write_config("[geometry]\natom-diameter = 0.7\nbond-diameter = 0.3\n");
        let mut args = base_import_args();
        args.config = Some(path);
        args.set_values = vec![
            "geometry.atom-diameter=0.9".to_string(),
            "geometry.bond-diameter=0.25".to_string(),
        ];
        args.bond_diameter = Some(0.2);

        let cfg = build_config(&args).expect("build ok").core_config;
        assert_eq!(cfg.atom_diameter, 0.9);
        assert_eq!(cfg.bond_diameter, 0.2);
    }

    #[test]
    fn set_values_cover_mesh_keys() {
        let mut args = base_import_args();
        args.set_values = vec![
            "mesh.sphere-segments=32".to_string(),
            "mesh.sphere-rings = 12".to_string(),
            "mesh.cylinder-segments=5".to_string(),
        ];

        let cfg = build_config(&args).expect("build ok").core_config;
        assert_eq!(cfg.mesh.sphere_segments, 32);
        assert_eq!(cfg.mesh.sphere_rings, 12);
        assert_eq!(cfg.mesh.cylinder_segments, 5);
    }

    #[test]
    fn malformed_set_values_are_rejected() {
        for bad in [
            "geometry.atom-diameter",
            "geometry.atom-diameter=big",
            "mesh.sphere-rings=-3",
            "render.samples=4",
        ] {
            let mut args = base_import_args();
            args.set_values = vec![bad.to_string()];
            assert!(
                matches!(build_config(&args), Err(CliError::Config(_))),
                "'{bad}' should be rejected"
            );
        }
    }

    #[test]
    fn invalid_final_values_are_config_errors() {
        let mut args = base_import_args();
        args.atom_diameter = Some(0.0);
        assert!(matches!(build_config(&args), Err(CliError::Config(_))));

        let mut args = base_import_args();
        args.sphere_segments = Some(2);
        assert!(matches!(build_config(&args), Err(CliError::Config(_))));
    }
}
