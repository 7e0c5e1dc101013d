//! # conveyor_core - Belt Conveyor Capacity Engine
//!
//! `conveyor_core` computes the load cross-section and mass-flow capacity of
//! bulk material on a flat or three-roll troughed belt conveyor, using the
//! K-factor reference table indexed by trough angle and surcharge angle.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **Clamp, don't reject**: Degenerate widths, speeds and densities are
//!   raised to safe minimums so an interactive caller always gets a number
//! - **Injectable data**: The reference table is a value ([`KFactorTable`]);
//!   the standard one is shared read-only, alternates can be passed in
//! - **JSON-First**: Inputs, results and errors implement Serialize/Deserialize
//!
//! ## Quick Start
//!
//! ```rust
//! use conveyor_core::{capacity_from_geometry_tph, get_k_factor};
//!
//! let k = get_k_factor(20.0, 20.0).unwrap();
//! assert_eq!(k, 0.1245);
//!
//! // 800 mm belt, 20° trough, 20° surcharge, 1.5 m/s, 1.6 t/m³
//! let (tph, area_m2) = capacity_from_geometry_tph(800.0, 20.0, 20.0, 1.5, 1.6).unwrap();
//! assert!((tph - 482.87).abs() < 0.01);
//! assert!((area_m2 - 0.05589).abs() < 1e-5);
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Cross-section and capacity calculations
//! - [`k_factor`] - K-factor reference table and 2D lookup
//! - [`interpolation`] - Clamped piecewise-linear interpolation
//! - [`labels`] - Degree/radian conversion and trough label parsing
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod errors;
pub mod interpolation;
pub mod k_factor;
pub mod labels;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{
    capacity_from_geometry_tph, cross_section_area_m2, BeltGeometry, CapacityInput, CapacityResult,
    CrossSectionResult, FlowState,
};
pub use errors::{CalcError, CalcResult};
pub use interpolation::interpolate;
pub use k_factor::{get_k_factor, BeltProfile, KFactorTable};
pub use labels::{deg2rad, parse_trough_label};
