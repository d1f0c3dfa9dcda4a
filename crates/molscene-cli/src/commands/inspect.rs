use crate::cli::InspectArgs;
use crate::error::{CliError, Result};
use molscene::core::io::{mol::MolFile, traits::MolecularFile};
use molscene::core::models::atom::ChargeState;
use molscene::core::models::molecule::Molecule;
use std::fmt::Write;
use tracing::info;

pub fn run(args: InspectArgs) -> Result<()> {
    info!("Decoding MOL file from {:?}", &args.input);
    let molecule = MolFile::read_from_path(&args.input).map_err(|e| CliError::FileParsing {
        path: args.input.clone(),
        source: e.into(),
    })?;
    print!("{}", render_tables(&molecule));
    Ok(())
}

fn describe_charge(state: ChargeState) -> String {
    match state {
        ChargeState::Neutral => "0".to_string(),
        ChargeState::Charged(charge) => format!("{charge:+}"),
        ChargeState::DoubletRadical => "radical".to_string(),
        ChargeState::Unknown(code) => format!("?{code}"),
    }
}

fn render_tables(molecule: &Molecule) -> String {
    let header = &molecule.header;
    let mut out = String::new();

    let _ = writeln!(out, "Title:    {}", header.title);
    let _ = writeln!(
        out,
        "Counts:   {} atom(s), {} bond(s), {} atom list(s)",
        header.atom_count, header.bond_count, header.atom_list_count
    );
    let _ = writeln!(out, "Chiral:   {}", if header.is_chiral { "yes" } else { "no" });
    let _ = writeln!(out, "Version:  {}", header.version_tag.trim());

    if !molecule.atoms().is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{:>5}  {:<8} {:<4} {:>10} {:>10} {:>10}  {}",
            "#", "Name", "Elem", "X", "Y", "Z", "Charge"
        );
        for atom in molecule.atoms() {
            let _ = writeln!(
                out,
                "{:>5}  {:<8} {:<4} {:>10.4} {:>10.4} {:>10.4}  {}",
                atom.index,
                atom.name,
                atom.symbol,
                atom.position.x,
                atom.position.y,
                atom.position.z,
                describe_charge(atom.charge_state())
            );
        }
    }

    if !molecule.bonds().is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{:>5}  {:>5} {:>5}  {:<20} {}",
            "#", "From", "To", "Order", "Stereo"
        );
        for (i, bond) in molecule.bonds().iter().enumerate() {
            let order = bond
                .order()
                .map(|order| order.to_string())
                .unwrap_or_else(|| format!("code {}", bond.order_code));
            let _ = writeln!(
                out,
                "{:>5}  {:>5} {:>5}  {:<20} {}",
                i + 1,
                bond.from_atom,
                bond.to_atom,
                order,
                bond.stereo_code
            );
        }
    }
    out
}
