//! # Conveying Capacity
//!
//! Mass flow of bulk material from the load cross-section:
//!
//! ```text
//! Q = 3600 · A · V · γ
//!
//! A  load cross-section, m²   (see cross_section)
//! V  belt speed, m/s          floored at 0.05
//! γ  bulk density, t/m³       floored at 0.1
//! Q  mass flow, t/h
//! ```
//!
//! The reference writes Q = 60 · A · v · γ with v in m/min; with v = 60 · V
//! that is the 3600 factor above.
//!
//! ## Example
//!
//! ```rust
//! use conveyor_core::calculations::capacity::{calculate, CapacityInput, FlowState};
//! use conveyor_core::calculations::cross_section::BeltGeometry;
//!
//! let input = CapacityInput {
//!     label: "CV-01".to_string(),
//!     geometry: BeltGeometry::new(800.0, 20.0, 20.0),
//!     flow: FlowState::new(1.5, 1.6),
//! };
//!
//! let result = calculate(&input).unwrap();
//! println!("Capacity: {:.1} t/h", result.mass_flow_tph);
//! assert!((result.mass_flow_tph - 482.87).abs() < 0.01);
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use crate::calculations::cross_section::{self, BeltGeometry, CrossSectionResult};
use crate::calculations::formula_ref;
use crate::errors::CalcResult;
use crate::k_factor::KFactorTable;
use crate::units::{MetersPerSecond, SquareMeters, TonnesPerCubicMeter};

/// Slowest belt speed used in the formula (m/s)
pub const MIN_BELT_SPEED_MPS: f64 = 0.05;

/// Lowest bulk density used in the formula (t/m³)
pub const MIN_BULK_DENSITY_TPM3: f64 = 0.1;

/// Belt speed and material density for one calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "speed_mps": 1.5,
///   "density_tpm3": 1.6
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlowState {
    /// Belt speed in meters per second
    pub speed_mps: f64,

    /// Bulk density in tonnes per cubic meter
    pub density_tpm3: f64,
}

impl FlowState {
    /// Create a flow state
    pub fn new(speed_mps: f64, density_tpm3: f64) -> Self {
        FlowState {
            speed_mps,
            density_tpm3,
        }
    }

    /// Belt speed used in the formula, floored at 0.05 m/s
    pub fn design_speed_mps(&self) -> f64 {
        MetersPerSecond(self.speed_mps).at_least(MIN_BELT_SPEED_MPS).value()
    }

    /// Bulk density used in the formula, floored at 0.1 t/m³
    pub fn design_density_tpm3(&self) -> f64 {
        TonnesPerCubicMeter(self.density_tpm3).at_least(MIN_BULK_DENSITY_TPM3).value()
    }

    /// Describe the input values that will be clamped.
    pub fn clamp_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.speed_mps.is_nan() || self.speed_mps < MIN_BELT_SPEED_MPS {
            warnings.push(format!(
                "speed_mps = {} is below the minimum; computed as {} m/s",
                self.speed_mps, MIN_BELT_SPEED_MPS
            ));
        }
        if self.density_tpm3.is_nan() || self.density_tpm3 < MIN_BULK_DENSITY_TPM3 {
            warnings.push(format!(
                "density_tpm3 = {} is below the minimum; computed as {} t/m³",
                self.density_tpm3, MIN_BULK_DENSITY_TPM3
            ));
        }
        warnings
    }
}

/// Input parameters for a capacity check.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "CV-01",
///   "geometry": { "width_mm": 800.0, "trough_deg": 20.0, "surcharge_deg": 20.0 },
///   "flow": { "speed_mps": 1.5, "density_tpm3": 1.6 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityInput {
    /// User label for this conveyor (e.g., "CV-01", "Crusher discharge")
    pub label: String,

    /// Belt width and angles
    pub geometry: BeltGeometry,

    /// Belt speed and material density
    pub flow: FlowState,
}

impl CapacityInput {
    /// All clamp warnings for geometry and flow
    pub fn clamp_warnings(&self) -> Vec<String> {
        let mut warnings = self.geometry.clamp_warnings();
        warnings.extend(self.flow.clamp_warnings());
        warnings
    }
}

/// Results from the capacity calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "CV-01",
///   "mass_flow_tph": 482.87,
///   "volume_flow_m3ph": 301.80,
///   "area_m2": 0.055888,
///   "speed_mps": 1.5,
///   "density_tpm3": 1.6,
///   "cross_section": { "k_factor": 0.1245, "...": "..." },
///   "formula_ref": "Formula (1): Q = 3600 · A · V · γ",
///   "warnings": []
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityResult {
    /// Label copied from the input
    pub label: String,

    /// Mass flow in tonnes per hour
    pub mass_flow_tph: f64,

    /// Volume flow in cubic meters per hour (3600 · A · V)
    pub volume_flow_m3ph: f64,

    /// Load cross-section area (m²)
    pub area_m2: f64,

    /// Belt speed used, after flooring (m/s)
    pub speed_mps: f64,

    /// Bulk density used, after flooring (t/m³)
    pub density_tpm3: f64,

    /// Cross-section breakdown
    pub cross_section: CrossSectionResult,

    /// Capacity formula applied
    pub formula_ref: String,

    /// Inputs that were clamped to safe minimums
    pub warnings: Vec<String>,
}

/// Calculate capacity using the standard K-factor table.
pub fn calculate(input: &CapacityInput) -> CalcResult<CapacityResult> {
    calculate_with_table(input, KFactorTable::standard())
}

/// Calculate capacity against an explicit K-factor table.
///
/// This is a pure function: no state, no I/O, same output for the same input.
pub fn calculate_with_table(
    input: &CapacityInput,
    table: &KFactorTable,
) -> CalcResult<CapacityResult> {
    let section = cross_section::calculate(&input.geometry, table)?;

    let speed_mps = input.flow.design_speed_mps();
    let density_tpm3 = input.flow.design_density_tpm3();
    if speed_mps != input.flow.speed_mps || density_tpm3 != input.flow.density_tpm3 {
        debug!(
            "Flow floored for '{}': V {} -> {} m/s, density {} -> {} t/m³",
            input.label, input.flow.speed_mps, speed_mps, input.flow.density_tpm3, density_tpm3
        );
    }

    let volume_flow = SquareMeters(section.area_m2) * MetersPerSecond(speed_mps);
    let mass_flow = volume_flow * TonnesPerCubicMeter(density_tpm3);

    Ok(CapacityResult {
        label: input.label.clone(),
        mass_flow_tph: mass_flow.value(),
        volume_flow_m3ph: volume_flow.value(),
        area_m2: section.area_m2,
        speed_mps,
        density_tpm3,
        cross_section: section,
        formula_ref: formula_ref::CAPACITY.to_string(),
        warnings: input.clamp_warnings(),
    })
}

impl KFactorTable {
    /// Mass flow (t/h) and cross-section area (m²) for the given belt.
    pub fn capacity_from_geometry_tph(
        &self,
        width_mm: f64,
        trough_deg: f64,
        surcharge_deg: f64,
        speed_mps: f64,
        density_tpm3: f64,
    ) -> CalcResult<(f64, f64)> {
        let input = CapacityInput {
            label: String::new(),
            geometry: BeltGeometry::new(width_mm, trough_deg, surcharge_deg),
            flow: FlowState::new(speed_mps, density_tpm3),
        };
        let result = calculate_with_table(&input, self)?;
        Ok((result.mass_flow_tph, result.area_m2))
    }
}

/// Mass flow (t/h) and cross-section area (m²) from the standard table.
///
/// ```rust
/// use conveyor_core::calculations::capacity_from_geometry_tph;
///
/// let (tph, area) = capacity_from_geometry_tph(800.0, 20.0, 20.0, 1.5, 1.6).unwrap();
/// assert!((tph - 3600.0 * area * 1.5 * 1.6).abs() < 1e-9);
/// ```
pub fn capacity_from_geometry_tph(
    width_mm: f64,
    trough_deg: f64,
    surcharge_deg: f64,
    speed_mps: f64,
    density_tpm3: f64,
) -> CalcResult<(f64, f64)> {
    KFactorTable::standard().capacity_from_geometry_tph(
        width_mm,
        trough_deg,
        surcharge_deg,
        speed_mps,
        density_tpm3,
    )
}
