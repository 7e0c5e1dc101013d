//! # K-Factor Reference Table
//!
//! Dimensionless area coefficient K for the load cross-section formula
//! `A = K × (0.9·B − 0.05)²`, tabulated against trough angle and material
//! surcharge angle (reference Table 4).
//!
//! ## Standard Data (three-roll troughed belt)
//!
//! | Trough | Surcharge 10° | Surcharge 20° | Surcharge 30° |
//! |--------|---------------|---------------|---------------|
//! | 10°    | 0.0649        | 0.0945        | 0.1253        |
//! | 15°    | 0.0817        | 0.1106        | 0.1408        |
//! | 20°    | 0.0963        | 0.1245        | 0.1538        |
//! | 25°    | 0.1113        | 0.1381        | 0.1661        |
//! | 30°    | 0.1232        | 0.1488        | 0.1754        |
//! | 35°    | 0.1348        | 0.1588        | 0.1837        |
//! | 40°    | 0.1426        | 0.1649        | 0.1882        |
//! | 45°    | 0.1500        | 0.1704        | 0.1916        |
//!
//! Flat belt: 0.0295 / 0.0591 / 0.0906 at 10° / 20° / 30° surcharge.
//!
//! The printed source may have the 10° and 20° columns swapped in the 15°,
//! 25° and 45° rows. The values are kept exactly as printed; the correct
//! order cannot be recovered from the table alone.
//!
//! ## Lookup
//!
//! Below 5° of trough the belt is treated as flat and only the flat row is
//! used. Otherwise every troughed row is interpolated at the surcharge angle,
//! and the resulting trough → K column is interpolated at the trough angle.
//!
//! ```rust
//! use conveyor_core::k_factor::{get_k_factor, KFactorTable};
//!
//! assert_eq!(get_k_factor(20.0, 20.0).unwrap(), 0.1245);
//! assert_eq!(get_k_factor(0.0, 20.0).unwrap(), 0.0591);
//!
//! // Same lookup against an explicit table
//! let table = KFactorTable::standard();
//! assert_eq!(table.k_factor(45.0, 30.0).unwrap(), 0.1916);
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use log::debug;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::interpolation::interpolate;

/// Trough angles below this are looked up in the flat-belt row
pub const FLAT_BELT_THRESHOLD_DEG: f64 = 5.0;

/// Process-wide standard table, built on first use and never mutated.
static STANDARD_K_TABLE: Lazy<KFactorTable> = Lazy::new(KFactorTable::standard_data);

/// Belt cross-section profile, as decided by the trough angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BeltProfile {
    /// Trough angle below 5°: flat-belt coefficients
    Flat,
    /// Three-roll troughed idler set
    Troughed,
}

impl BeltProfile {
    /// Classify a trough angle in degrees
    pub fn from_trough_deg(trough_deg: f64) -> Self {
        if trough_deg < FLAT_BELT_THRESHOLD_DEG {
            BeltProfile::Flat
        } else {
            BeltProfile::Troughed
        }
    }

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            BeltProfile::Flat => "Flat belt",
            BeltProfile::Troughed => "Three-roll troughed",
        }
    }
}

impl std::fmt::Display for BeltProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Unvalidated table shape used for (de)serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct KFactorTableData {
    troughed: BTreeMap<u32, BTreeMap<u32, f64>>,
    flat: BTreeMap<u32, f64>,
}

/// K-factor reference data: troughed rows keyed by trough angle then
/// surcharge angle, plus a flat-belt row keyed by surcharge angle.
///
/// Angles are integer degrees. Construction always validates, so every
/// `KFactorTable` in hand has non-empty rows of positive, finite
/// coefficients.
///
/// ## JSON Example
///
/// ```json
/// {
///   "troughed": {
///     "20": { "10": 0.0963, "20": 0.1245, "30": 0.1538 },
///     "35": { "10": 0.1348, "20": 0.1588, "30": 0.1837 }
///   },
///   "flat": { "10": 0.0295, "20": 0.0591, "30": 0.0906 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "KFactorTableData", into = "KFactorTableData")]
pub struct KFactorTable {
    troughed: BTreeMap<u32, BTreeMap<u32, f64>>,
    flat: BTreeMap<u32, f64>,
}

impl TryFrom<KFactorTableData> for KFactorTable {
    type Error = CalcError;

    fn try_from(data: KFactorTableData) -> CalcResult<Self> {
        KFactorTable::new(data.troughed, data.flat)
    }
}

impl From<KFactorTable> for KFactorTableData {
    fn from(table: KFactorTable) -> Self {
        KFactorTableData {
            troughed: table.troughed,
            flat: table.flat,
        }
    }
}

impl KFactorTable {
    /// Build a table from alternate reference data.
    ///
    /// Fails with `CalcError::EmptyTable` when there are no troughed rows,
    /// no flat row, or an empty row, and with `CalcError::InvalidTable` for
    /// a coefficient that is not a positive finite number.
    pub fn new(
        troughed: BTreeMap<u32, BTreeMap<u32, f64>>,
        flat: BTreeMap<u32, f64>,
    ) -> CalcResult<Self> {
        let table = KFactorTable { troughed, flat };
        table.validate()?;
        Ok(table)
    }

    /// The shared standard table.
    pub fn standard() -> &'static KFactorTable {
        &STANDARD_K_TABLE
    }

    fn standard_data() -> KFactorTable {
        let rows: [(u32, [f64; 3]); 8] = [
            (10, [0.0649, 0.0945, 0.1253]),
            (15, [0.0817, 0.1106, 0.1408]), // possibly swapped upstream, kept as printed
            (20, [0.0963, 0.1245, 0.1538]),
            (25, [0.1113, 0.1381, 0.1661]), // possibly swapped upstream, kept as printed
            (30, [0.1232, 0.1488, 0.1754]),
            (35, [0.1348, 0.1588, 0.1837]),
            (40, [0.1426, 0.1649, 0.1882]),
            (45, [0.1500, 0.1704, 0.1916]), // possibly swapped upstream, kept as printed
        ];
        let surcharges = [10u32, 20, 30];

        let troughed: BTreeMap<u32, BTreeMap<u32, f64>> = rows
            .iter()
            .map(|(trough, ks)| {
                let row = surcharges.iter().copied().zip(ks.iter().copied()).collect();
                (*trough, row)
            })
            .collect();
        let flat: BTreeMap<u32, f64> =
            surcharges.iter().copied().zip([0.0295, 0.0591, 0.0906]).collect();

        KFactorTable { troughed, flat }
    }

    /// Parse and validate a table from JSON.
    pub fn from_json_str(json: &str) -> CalcResult<Self> {
        let table: KFactorTable = serde_json::from_str(json)?;
        debug!(
            "Loaded K-factor table with {} troughed rows and {} flat entries",
            table.troughed.len(),
            table.flat.len()
        );
        Ok(table)
    }

    /// Read, parse and validate a table from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> CalcResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;
        Self::from_json_str(&json)
    }

    /// Check the table invariants.
    pub fn validate(&self) -> CalcResult<()> {
        if self.troughed.is_empty() {
            return Err(CalcError::empty_table("troughed"));
        }
        if self.flat.is_empty() {
            return Err(CalcError::empty_table("flat"));
        }
        for (trough, row) in &self.troughed {
            if row.is_empty() {
                return Err(CalcError::empty_table(format!("troughed row {}°", trough)));
            }
            check_coefficients(row, &format!("trough {}°", trough))?;
        }
        check_coefficients(&self.flat, "flat")
    }

    /// Reference trough angles, ascending
    pub fn trough_angles(&self) -> impl Iterator<Item = u32> + '_ {
        self.troughed.keys().copied()
    }

    /// Troughed row for an exact reference trough angle
    pub fn row(&self, trough_deg: u32) -> Option<&BTreeMap<u32, f64>> {
        self.troughed.get(&trough_deg)
    }

    /// Flat-belt row
    pub fn flat_row(&self) -> &BTreeMap<u32, f64> {
        &self.flat
    }

    /// Resolve K for a trough and surcharge angle (degrees).
    pub fn k_factor(&self, trough_deg: f64, surcharge_deg: f64) -> CalcResult<f64> {
        if BeltProfile::from_trough_deg(trough_deg) == BeltProfile::Flat {
            return interpolate(surcharge_deg, &self.flat);
        }

        let column = self
            .troughed
            .iter()
            .map(|(trough, row)| Ok((*trough, interpolate(surcharge_deg, row)?)))
            .collect::<CalcResult<BTreeMap<u32, f64>>>()?;

        interpolate(trough_deg, &column)
    }
}

impl Default for KFactorTable {
    fn default() -> Self {
        KFactorTable::standard().clone()
    }
}

fn check_coefficients(row: &BTreeMap<u32, f64>, label: &str) -> CalcResult<()> {
    match row.iter().find(|(_, k)| !(k.is_finite() && **k > 0.0)) {
        Some((surcharge, k)) => Err(CalcError::invalid_table(format!(
            "{} at surcharge {}°: K = {} must be a positive finite number",
            label, surcharge, k
        ))),
        None => Ok(()),
    }
}

/// K-factor from the standard table.
pub fn get_k_factor(trough_deg: f64, surcharge_deg: f64) -> CalcResult<f64> {
    KFactorTable::standard().k_factor(trough_deg, surcharge_deg)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    fn two_row_table() -> KFactorTable {
        let troughed: BTreeMap<u32, BTreeMap<u32, f64>> = [
            (20, [(10, 1.0), (30, 3.0)].into_iter().collect()),
            (40, [(10, 2.0), (30, 6.0)].into_iter().collect()),
        ]
        .into_iter()
        .collect();
        let flat: BTreeMap<u32, f64> = [(10, 0.5), (30, 1.5)].into_iter().collect();
        KFactorTable::new(troughed, flat).unwrap()
    }

    #[test]
    fn test_every_standard_key_pair_is_literal() {
        let table = KFactorTable::standard();
        for trough in table.trough_angles() {
            for (surcharge, k) in table.row(trough).unwrap() {
                assert_eq!(table.k_factor(trough as f64, *surcharge as f64).unwrap(), *k);
            }
        }
        assert_eq!(get_k_factor(20.0, 20.0).unwrap(), 0.1245);
    }

    #[test]
    fn test_anomalous_rows_kept_as_printed() {
        let table = KFactorTable::standard();
        assert_eq!(table.row(15).unwrap()[&10], 0.0817);
        assert_eq!(table.row(25).unwrap()[&20], 0.1381);
        assert_eq!(table.row(45).unwrap()[&10], 0.1500);
    }

    #[test]
    fn test_flat_branch() {
        assert_eq!(get_k_factor(0.0, 20.0).unwrap(), 0.0591);
        assert_eq!(get_k_factor(4.99, 10.0).unwrap(), 0.0295);
        assert!(approx_eq(get_k_factor(2.0, 25.0).unwrap(), (0.0591 + 0.0906) / 2.0, 1e-12));
    }

    #[test]
    fn test_threshold_switches_to_troughed() {
        // 5° is troughed and clamps to the 10° row
        assert_eq!(get_k_factor(5.0, 20.0).unwrap(), 0.0945);
        assert_eq!(BeltProfile::from_trough_deg(5.0), BeltProfile::Troughed);
        assert_eq!(BeltProfile::from_trough_deg(4.0), BeltProfile::Flat);
    }

    #[test]
    fn test_surcharge_clamps() {
        assert_eq!(get_k_factor(20.0, 5.0).unwrap(), get_k_factor(20.0, 10.0).unwrap());
        assert_eq!(get_k_factor(20.0, 45.0).unwrap(), 0.1538);
    }

    #[test]
    fn test_trough_clamps() {
        assert_eq!(get_k_factor(60.0, 20.0).unwrap(), 0.1704);
        assert_eq!(get_k_factor(7.0, 30.0).unwrap(), 0.1253);
    }

    #[test]
    fn test_bilinear_interpolation() {
        // Surcharge 15° between the 20° and 25° trough rows, trough 22.5°
        let at_20 = (0.0963 + 0.1245) / 2.0;
        let at_25 = (0.1113 + 0.1381) / 2.0;
        let expected = (at_20 + at_25) / 2.0;
        assert!(approx_eq(get_k_factor(22.5, 15.0).unwrap(), expected, 1e-12));
    }

    #[test]
    fn test_injected_table() {
        let table = two_row_table();
        // Row 20 at surcharge 20 → 2.0, row 40 → 4.0, trough 30 → 3.0
        assert!(approx_eq(table.k_factor(30.0, 20.0).unwrap(), 3.0, 1e-12));
        assert!(approx_eq(table.k_factor(1.0, 20.0).unwrap(), 1.0, 1e-12));
    }

    #[test]
    fn test_validation_rejects_bad_tables() {
        let empty_rows = KFactorTable::new(BTreeMap::new(), [(10, 0.1)].into_iter().collect());
        assert_eq!(empty_rows.unwrap_err().error_code(), "EMPTY_TABLE");

        let troughed: BTreeMap<u32, BTreeMap<u32, f64>> =
            [(20, [(10, -0.1)].into_iter().collect())].into_iter().collect();
        let negative = KFactorTable::new(troughed, [(10, 0.1)].into_iter().collect());
        assert_eq!(negative.unwrap_err().error_code(), "INVALID_TABLE");

        let troughed: BTreeMap<u32, BTreeMap<u32, f64>> =
            [(20, BTreeMap::new())].into_iter().collect();
        let empty_row = KFactorTable::new(troughed, [(10, 0.1)].into_iter().collect());
        assert_eq!(empty_row.unwrap_err().error_code(), "EMPTY_TABLE");
    }

    #[test]
    fn test_json_roundtrip_and_validation() {
        let json = serde_json::to_string_pretty(KFactorTable::standard()).unwrap();
        assert!(json.contains("\"troughed\""));
        let roundtrip = KFactorTable::from_json_str(&json).unwrap();
        assert_eq!(&roundtrip, KFactorTable::standard());

        let bad = r#"{ "troughed": { "20": { "10": 0.0 } }, "flat": { "10": 0.03 } }"#;
        let err = KFactorTable::from_json_str(bad).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_missing_file() {
        let err = KFactorTable::from_json_file("/nonexistent/k_table.json").unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_standard_table_shared_across_threads() {
        let handles: Vec<_> = (0..4)
            .map(|i| std::thread::spawn(move || get_k_factor(10.0 + 5.0 * i as f64, 20.0).unwrap()))
            .collect();
        let ks: Vec<f64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(ks, vec![0.0945, 0.1106, 0.1245, 0.1381]);
    }
}
