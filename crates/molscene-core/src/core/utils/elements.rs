use phf::{Map, phf_map};

/// RGB colour in the `0.0..=1.0` range.
pub type Color = [f32; 3];

/// Colour used for symbols that have no entry in the table.
pub const FALLBACK_COLOR: Color = [0.8, 0.0, 0.8];

static CPK_COLORS: Map<&'static str, Color> = phf_map! {
    "H" => [1.0, 1.0, 1.0],
    "D" => [1.0, 1.0, 0.75],
    "C" => [0.2, 0.2, 0.2],
    "N" => [0.0, 0.0, 1.0],
    "O" => [1.0, 0.0, 0.0],
    "F" => [0.12, 0.94, 0.12], "Cl" => [0.12, 0.94, 0.12],
    "Br" => [0.6, 0.13, 0.0],
    "I" => [0.4, 0.0, 0.73],
    "He" => [0.0, 1.0, 1.0], "Ne" => [0.0, 1.0, 1.0], "Ar" => [0.0, 1.0, 1.0],
    "Kr" => [0.0, 1.0, 1.0], "Xe" => [0.0, 1.0, 1.0],
    "P" => [1.0, 0.65, 0.0],
    "S" => [1.0, 1.0, 0.0],
    "B" => [1.0, 0.67, 0.47],
    "Li" => [0.47, 0.0, 1.0], "Na" => [0.47, 0.0, 1.0], "K" => [0.47, 0.0, 1.0],
    "Rb" => [0.47, 0.0, 1.0], "Cs" => [0.47, 0.0, 1.0],
    "Be" => [0.0, 0.47, 0.0], "Mg" => [0.0, 0.47, 0.0], "Ca" => [0.0, 0.47, 0.0],
    "Sr" => [0.0, 0.47, 0.0], "Ba" => [0.0, 0.47, 0.0],
    "Ti" => [0.6, 0.6, 0.6],
    "Fe" => [0.87, 0.47, 0.0],
    "Cu" => [0.78, 0.5, 0.2],
    "Zn" => [0.49, 0.5, 0.69],
    "Si" => [0.94, 0.78, 0.63],
    "Se" => [1.0, 0.63, 0.0],
};

/// Display colour for an element symbol.
///
/// Lookup is exact first, then with the symbol re-cased to the usual form
/// (`"CL"` and `"cl"` both resolve to chlorine). Unknown or empty symbols get
/// [`FALLBACK_COLOR`].
pub fn element_color(symbol: &str) -> Color {
    let symbol = symbol.trim();
    if let Some(color) = CPK_COLORS.get(symbol) {
        return *color;
    }
    CPK_COLORS
        .get(normalize_symbol(symbol).as_str())
        .copied()
        .unwrap_or(FALLBACK_COLOR)
}

pub fn is_known_element(symbol: &str) -> bool {
    CPK_COLORS.contains_key(normalize_symbol(symbol.trim()).as_str())
}

fn normalize_symbol(symbol: &str) -> String {
    let mut chars = symbol.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
