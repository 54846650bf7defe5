use std::fmt::Write as _;

use muenster_client::Garage;

const SEPARATOR: &str = "----------------------------------------";

/// One line per garage, then a separator and the total count.
pub(crate) fn garage_table(garages: &[Garage]) -> String {
    let mut out = String::new();
    for garage in garages {
        let _ = writeln!(out, "{garage}");
    }
    let _ = writeln!(out, "{SEPARATOR}");
    let _ = write!(out, "Total locations found: {}", garages.len());
    out
}
