//! # Conveyor Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` / geometry structs - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input) -> CalcResult<*Result>` - Pure calculation function
//!
//! Out-of-range inputs are clamped to safe minimums rather than rejected, and
//! every clamp that fires is listed in the result's `warnings`.
//!
//! ## Available Calculations
//!
//! - [`cross_section`] - Load cross-section area from belt width and angles
//! - [`capacity`] - Mass flow from cross-section, belt speed and bulk density

pub mod capacity;
pub mod cross_section;

// Re-export commonly used types
pub use capacity::{capacity_from_geometry_tph, CapacityInput, CapacityResult, FlowState};
pub use cross_section::{cross_section_area_m2, BeltGeometry, CrossSectionResult};

/// Reference citations for the formulas and table used by the calculations.
///
/// Carried in results so reports can point back to the source.
pub mod formula_ref {
    /// Mass flow from load cross-section
    pub const CAPACITY: &str = "Formula (1): Q = 3600 · A · V · γ";
    /// Load cross-section area from belt width
    pub const CROSS_SECTION: &str = "Formula (3): A = K · (0.9 · B − 0.05)²";
    /// K-factor table by trough and surcharge angle
    pub const K_TABLE: &str = "Table 4";
}
