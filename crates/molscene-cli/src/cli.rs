use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan",
    version,
    about = "MolScene CLI - Turn MDL MOL (V2000) connection tables into ball-and-stick scenes of spheres and cylinders.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the sphere and cylinder scene of a MOL file and report it.
    Import(ImportArgs),
    /// Decode a MOL file and print its header, atom and bond tables.
    Inspect(InspectArgs),
}

/// Arguments for the `import` subcommand.
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Path to the input MOL file.
    #[arg(value_name = "PATH")]
    pub input: PathBuf,

    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Geometry Overrides ---
    /// Diameter of every atom sphere.
    #[arg(long, value_name = "FLOAT")]
    pub atom_diameter: Option<f64>,

    /// Diameter of every bond cylinder.
    #[arg(long, value_name = "FLOAT")]
    pub bond_diameter: Option<f64>,

    // --- Mesh Overrides ---
    /// Subdivisions around each sphere's polar axis.
    #[arg(long, value_name = "INT")]
    pub sphere_segments: Option<u32>,

    /// Subdivisions of each sphere from pole to pole.
    #[arg(long, value_name = "INT")]
    pub sphere_rings: Option<u32>,

    /// Subdivisions around each cylinder's axis.
    #[arg(long, value_name = "INT")]
    pub cylinder_segments: Option<u32>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S geometry.atom-diameter=0.6
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,

    /// How the imported scene is written to stdout.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Summary)]
    pub format: OutputFormat,
}

/// Arguments for the `inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Path to the input MOL file.
    #[arg(value_name = "PATH")]
    pub input: PathBuf,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable overview of the scene.
    Summary,
    /// Every sphere and cylinder descriptor as a TOML document.
    Toml,
}
