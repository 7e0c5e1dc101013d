//! Plain-text reports for the terminal.

use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, Write};

use conveyor_core::calculations::{CapacityResult, CrossSectionResult};
use conveyor_core::KFactorTable;

const RULE: &str = "═══════════════════════════════════════";

pub fn print_k_factor(trough_deg: f64, surcharge_deg: f64, k: f64) {
    println!(
        "K({:.1}° trough, {:.1}° surcharge) = {:.4}",
        trough_deg, surcharge_deg, k
    );
}

pub fn print_cross_section(section: &CrossSectionResult) {
    println!("Cross-section ({}):", section.profile);
    println!("  K           = {:.4}  [{}]", section.k_factor, section.k_table_ref);
    println!(
        "  B           = {:.3} m{}",
        section.belt_width_m,
        if section.width_floor_applied { "  (minimum width applied)" } else { "" }
    );
    println!("  0.9B - 0.05 = {:.3} m", section.effective_width_m);
    println!("  A           = {:.5} m²  [{}]", section.area_m2, section.formula_ref);
}

pub fn print_capacity(result: &CapacityResult) {
    println!("{}", RULE);
    println!("  CAPACITY: {}", if result.label.is_empty() { "-" } else { result.label.as_str() });
    println!("{}", RULE);
    println!();
    print_cross_section(&result.cross_section);
    println!();
    println!("Flow:");
    println!("  V           = {:.2} m/s", result.speed_mps);
    println!("  γ           = {:.2} t/m³", result.density_tpm3);
    println!("  Volume flow = {:.1} m³/h", result.volume_flow_m3ph);
    println!();
    println!("{}", RULE);
    println!("  Q = {:.1} t/h  [{}]", result.mass_flow_tph, result.formula_ref);
    println!("{}", RULE);
    print_warnings(&result.warnings);
}

pub fn print_warnings(warnings: &[String]) {
    if warnings.is_empty() {
        return;
    }
    println!();
    println!("Warnings:");
    for w in warnings {
        println!("  [WARN] {}", w);
    }
}

pub fn print_table(table: &KFactorTable) -> io::Result<()> {
    write_table(&mut io::stdout().lock(), table)
}

/// Write the reference table with one column per surcharge angle found in
/// any row. A row without a value for a column leaves that cell blank.
pub fn write_table<W: Write>(out: &mut W, table: &KFactorTable) -> io::Result<()> {
    let mut surcharges: BTreeSet<u32> = table.flat_row().keys().copied().collect();
    for trough in table.trough_angles() {
        if let Some(row) = table.row(trough) {
            surcharges.extend(row.keys().copied());
        }
    }

    write!(out, "{:>8}", "trough")?;
    for s in &surcharges {
        write!(out, "{:>10}", format!("s={}°", s))?;
    }
    writeln!(out)?;

    write_row(out, "flat", table.flat_row(), &surcharges)?;
    for trough in table.trough_angles() {
        if let Some(row) = table.row(trough) {
            write_row(out, &format!("{}°", trough), row, &surcharges)?;
        }
    }
    Ok(())
}

fn write_row<W: Write>(
    out: &mut W,
    name: &str,
    row: &BTreeMap<u32, f64>,
    surcharges: &BTreeSet<u32>,
) -> io::Result<()> {
    write!(out, "{:>8}", name)?;
    for s in surcharges {
        match row.get(s) {
            Some(k) => write!(out, "{:>10.4}", k)?,
            None => write!(out, "{:>10}", "")?,
        }
    }
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(table: &KFactorTable) -> String {
        let mut buf = Vec::new();
        write_table(&mut buf, table).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_standard_table_layout() {
        let text = render(KFactorTable::standard());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "  trough     s=10°     s=20°     s=30°");
        assert_eq!(lines[1], "    flat    0.0295    0.0591    0.0906");
        assert_eq!(lines[3], "     20°    0.0963    0.1245    0.1538");
    }

    #[test]
    fn test_rows_with_different_surcharges_stay_in_their_columns() {
        let json = r#"{
            "troughed": {"20": {"10": 0.1, "30": 0.3}, "40": {"20": 0.25}},
            "flat": {"10": 0.02, "20": 0.05}
        }"#;
        let table = KFactorTable::from_json_str(json).unwrap();
        let text = render(&table);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "  trough     s=10°     s=20°     s=30°");
        assert_eq!(lines[1], "    flat    0.0200    0.0500          ");
        assert_eq!(lines[2], "     20°    0.1000              0.3000");
        assert_eq!(lines[3], "     40°              0.2500          ");
    }
}
