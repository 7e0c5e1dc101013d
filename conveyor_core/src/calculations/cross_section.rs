//! # Load Cross-Section
//!
//! Area of bulk material carried on the belt:
//!
//! ```text
//! B  = max(0.3, width_mm / 1000)          belt width, m
//! b  = max(0, 0.9 · B − 0.05)             loaded width, m
//! A  = K(trough, surcharge) · b²          area, m²
//! ```
//!
//! ## Assumptions
//!
//! - Belts narrower than 300 mm are computed as 300 mm
//! - The loaded width is clamped at zero so a tiny belt never squares a
//!   negative width into a positive area
//! - K comes from [`KFactorTable`]; trough angles below 5° use the flat row
//!
//! ## Example
//!
//! ```rust
//! use conveyor_core::calculations::cross_section::{calculate, BeltGeometry};
//! use conveyor_core::k_factor::KFactorTable;
//!
//! let geometry = BeltGeometry::new(800.0, 20.0, 20.0);
//! let result = calculate(&geometry, KFactorTable::standard()).unwrap();
//!
//! assert_eq!(result.k_factor, 0.1245);
//! assert!((result.area_m2 - 0.055888).abs() < 1e-6);
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use crate::calculations::formula_ref;
use crate::errors::CalcResult;
use crate::k_factor::{BeltProfile, KFactorTable};
use crate::labels::parse_trough_label;
use crate::units::{Meters, Millimeters};

/// Narrowest belt width used in the area formula (m)
pub const MIN_BELT_WIDTH_M: f64 = 0.3;

/// Fraction of the belt width available to the load
pub const LOADED_WIDTH_FACTOR: f64 = 0.9;

/// Edge clearance subtracted from the loaded width (m)
pub const EDGE_CLEARANCE_M: f64 = 0.05;

/// Belt geometry for one calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "width_mm": 800.0,
///   "trough_deg": 20.0,
///   "surcharge_deg": 20.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeltGeometry {
    /// Nominal belt width in millimeters (e.g., 650, 800, 1000)
    pub width_mm: f64,

    /// Trough angle of the wing idlers in degrees (0 for a flat belt)
    pub trough_deg: f64,

    /// Material surcharge angle in degrees
    pub surcharge_deg: f64,
}

impl BeltGeometry {
    /// Create a geometry from numeric values
    pub fn new(width_mm: f64, trough_deg: f64, surcharge_deg: f64) -> Self {
        BeltGeometry {
            width_mm,
            trough_deg,
            surcharge_deg,
        }
    }

    /// Create a geometry whose trough angle comes from a free-text label
    /// such as `"35° trough"`, falling back to `default_trough_deg`.
    pub fn from_trough_label(
        width_mm: f64,
        trough_label: Option<&str>,
        surcharge_deg: f64,
        default_trough_deg: f64,
    ) -> Self {
        BeltGeometry::new(
            width_mm,
            parse_trough_label(trough_label, default_trough_deg),
            surcharge_deg,
        )
    }

    /// Flat or troughed, from the trough angle
    pub fn profile(&self) -> BeltProfile {
        BeltProfile::from_trough_deg(self.trough_deg)
    }

    /// Belt width used in the formula (m), floored at 0.3 m
    pub fn design_width_m(&self) -> f64 {
        Meters::from(Millimeters(self.width_mm)).at_least(MIN_BELT_WIDTH_M).value()
    }

    /// Loaded width 0.9·B − 0.05 (m), never negative
    pub fn effective_width_m(&self) -> f64 {
        let b = Meters(self.design_width_m());
        (b * LOADED_WIDTH_FACTOR - Meters(EDGE_CLEARANCE_M)).at_least(0.0).value()
    }

    /// True when the 0.3 m minimum replaces the nominal width (NaN included)
    pub fn width_floor_applies(&self) -> bool {
        let width_m = Meters::from(Millimeters(self.width_mm)).value();
        width_m.is_nan() || width_m < MIN_BELT_WIDTH_M
    }

    /// Describe the input values that will be clamped.
    pub fn clamp_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.width_floor_applies() {
            warnings.push(format!(
                "width_mm = {} is below the {} mm minimum; computed as {} mm",
                self.width_mm,
                MIN_BELT_WIDTH_M * 1000.0,
                MIN_BELT_WIDTH_M * 1000.0
            ));
        }
        if self.trough_deg < 0.0 {
            warnings.push(format!(
                "trough_deg = {} is negative; treated as a flat belt",
                self.trough_deg
            ));
        }
        if self.surcharge_deg < 0.0 {
            warnings.push(format!(
                "surcharge_deg = {} is negative; lowest tabulated surcharge used",
                self.surcharge_deg
            ));
        }
        warnings
    }
}

impl Default for BeltGeometry {
    fn default() -> Self {
        BeltGeometry::new(800.0, 20.0, 20.0)
    }
}

/// Results from the cross-section calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "profile": "Troughed",
///   "k_factor": 0.1245,
///   "belt_width_m": 0.8,
///   "effective_width_m": 0.67,
///   "area_m2": 0.055888,
///   "width_floor_applied": false,
///   "k_table_ref": "Table 4",
///   "formula_ref": "Formula (3): A = K · (0.9 · B − 0.05)²"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossSectionResult {
    /// Flat or troughed profile used for the K lookup
    pub profile: BeltProfile,

    /// Interpolated K-factor (dimensionless)
    pub k_factor: f64,

    /// Belt width used in the formula (m)
    pub belt_width_m: f64,

    /// Loaded width 0.9·B − 0.05 (m)
    pub effective_width_m: f64,

    /// Load cross-section area (m²)
    pub area_m2: f64,

    /// True when the 0.3 m minimum belt width replaced the input width
    pub width_floor_applied: bool,

    /// Source of the K-factor
    pub k_table_ref: String,

    /// Area formula applied
    pub formula_ref: String,
}

/// Calculate the load cross-section against a K-factor table.
///
/// # Returns
///
/// * `Ok(CrossSectionResult)` - always, for a validated table
/// * `Err(CalcError)` - only if the table has an empty row
pub fn calculate(geometry: &BeltGeometry, table: &KFactorTable) -> CalcResult<CrossSectionResult> {
    let belt_width_m = geometry.design_width_m();
    let width_floor_applied = geometry.width_floor_applies();
    if width_floor_applied {
        debug!("Belt width {} mm floored to {} m", geometry.width_mm, MIN_BELT_WIDTH_M);
    }

    let k_factor = table.k_factor(geometry.trough_deg, geometry.surcharge_deg)?;
    let effective_width_m = geometry.effective_width_m();
    let area_m2 = k_factor * effective_width_m.powi(2);

    Ok(CrossSectionResult {
        profile: geometry.profile(),
        k_factor,
        belt_width_m,
        effective_width_m,
        area_m2,
        width_floor_applied,
        k_table_ref: formula_ref::K_TABLE.to_string(),
        formula_ref: formula_ref::CROSS_SECTION.to_string(),
    })
}

impl KFactorTable {
    /// Load cross-section area (m²) for a belt width in mm and angles in degrees.
    pub fn cross_section_area_m2(
        &self,
        width_mm: f64,
        trough_deg: f64,
        surcharge_deg: f64,
    ) -> CalcResult<f64> {
        let geometry = BeltGeometry::new(width_mm, trough_deg, surcharge_deg);
        Ok(calculate(&geometry, self)?.area_m2)
    }
}

/// Load cross-section area (m²) from the standard K-factor table.
///
/// ```rust
/// use conveyor_core::calculations::cross_section_area_m2;
///
/// let area = cross_section_area_m2(800.0, 20.0, 20.0).unwrap();
/// assert!((area - 0.1245 * 0.67 * 0.67).abs() < 1e-9);
/// ```
pub fn cross_section_area_m2(
    width_mm: f64,
    trough_deg: f64,
    surcharge_deg: f64,
) -> CalcResult<f64> {
    KFactorTable::standard().cross_section_area_m2(width_mm, trough_deg, surcharge_deg)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_reference_belt() {
        let geometry = BeltGeometry::new(800.0, 20.0, 20.0);
        let result = calculate(&geometry, KFactorTable::standard()).unwrap();
        assert_eq!(result.k_factor, 0.1245);
        assert!(approx_eq(result.belt_width_m, 0.8, 1e-12));
        assert!(approx_eq(result.effective_width_m, 0.67, 1e-12));
        // 0.1245 × 0.4489
        assert!(approx_eq(result.area_m2, 0.05588805, 1e-9));
        assert!(!result.width_floor_applied);
        assert_eq!(result.profile, BeltProfile::Troughed);
    }

    #[test]
    fn test_width_floor() {
        let narrow = cross_section_area_m2(100.0, 20.0, 20.0).unwrap();
        let floor = cross_section_area_m2(300.0, 20.0, 20.0).unwrap();
        assert_eq!(narrow, floor);
        // 0.9 × 0.3 − 0.05 = 0.22
        assert!(approx_eq(narrow, 0.1245 * 0.22 * 0.22, 1e-12));

        let geometry = BeltGeometry::new(100.0, 20.0, 20.0);
        let result = calculate(&geometry, KFactorTable::standard()).unwrap();
        assert!(result.width_floor_applied);
        assert_eq!(result.belt_width_m, MIN_BELT_WIDTH_M);
    }

    #[test]
    fn test_degenerate_widths_never_negative() {
        for width in [0.0, -500.0, f64::NAN] {
            let area = cross_section_area_m2(width, 20.0, 20.0).unwrap();
            assert!(area > 0.0, "width {} gave area {}", width, area);
        }
    }

    #[test]
    fn test_effective_width_clamped_at_zero() {
        let geometry = BeltGeometry::new(800.0, 20.0, 20.0);
        assert!(geometry.effective_width_m() >= 0.0);
        // The 0.3 m floor keeps the loaded width positive in practice
        assert!(approx_eq(BeltGeometry::new(10.0, 0.0, 0.0).effective_width_m(), 0.22, 1e-12));
    }

    #[test]
    fn test_flat_belt_area() {
        let area = cross_section_area_m2(1000.0, 0.0, 20.0).unwrap();
        // 0.9 × 1.0 − 0.05 = 0.85
        assert!(approx_eq(area, 0.0591 * 0.85 * 0.85, 1e-12));
    }

    #[test]
    fn test_area_grows_with_trough_and_surcharge() {
        let shallow = cross_section_area_m2(1000.0, 20.0, 20.0).unwrap();
        let deep = cross_section_area_m2(1000.0, 35.0, 20.0).unwrap();
        let heaped = cross_section_area_m2(1000.0, 35.0, 30.0).unwrap();
        assert!(deep > shallow);
        assert!(heaped > deep);
    }

    #[test]
    fn test_from_trough_label() {
        let geometry = BeltGeometry::from_trough_label(800.0, Some("35° trough"), 20.0, 20.0);
        assert_eq!(geometry.trough_deg, 35.0);
        let fallback = BeltGeometry::from_trough_label(800.0, None, 20.0, 30.0);
        assert_eq!(fallback.trough_deg, 30.0);
    }

    #[test]
    fn test_clamp_warnings() {
        assert!(BeltGeometry::default().clamp_warnings().is_empty());
        let warnings = BeltGeometry::new(100.0, -5.0, -1.0).clamp_warnings();
        assert_eq!(warnings.len(), 3);
        assert!(warnings[0].contains("width_mm"));
    }

    #[test]
    fn test_serialization_roundtrip() {
        let geometry = BeltGeometry::new(1200.0, 35.0, 25.0);
        let json = serde_json::to_string(&geometry).unwrap();
        let roundtrip: BeltGeometry = serde_json::from_str(&json).unwrap();
        assert_eq!(geometry, roundtrip);

        let result = calculate(&geometry, KFactorTable::standard()).unwrap();
        let json = serde_json::to_string_pretty(&result).unwrap();
        assert!(json.contains("area_m2"));
        assert!(json.contains("Table 4"));
    }
}
