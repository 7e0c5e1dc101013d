//! # Unit Types
//!
//! Type-safe wrappers for the handful of units a conveyor capacity check
//! touches. They are plain f64 newtypes so JSON stays clean (just numbers).
//!
//! ## Metric Units
//!
//! - Length: millimeters (belt width as catalogued), meters (formula input)
//! - Angle: degrees (trough, surcharge), radians
//! - Area: square meters (load cross-section)
//! - Speed: meters per second (belt speed)
//! - Density: tonnes per cubic meter (bulk density)
//! - Flow: tonnes per hour (mass flow), cubic meters per hour (volume flow)
//!
//! ## Example
//!
//! ```rust
//! use conveyor_core::units::{Meters, Millimeters};
//!
//! let width = Millimeters(800.0);
//! let width_m: Meters = width.into();
//! assert_eq!(width_m.0, 0.8);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Seconds per hour, for m/s to per-hour flow conversion
pub const SECONDS_PER_HOUR: f64 = 3600.0;

// ============================================================================
// Length Units
// ============================================================================

/// Length in millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

impl From<Millimeters> for Meters {
    fn from(mm: Millimeters) -> Self {
        Meters(mm.0 / 1000.0)
    }
}

impl From<Meters> for Millimeters {
    fn from(m: Meters) -> Self {
        Millimeters(m.0 * 1000.0)
    }
}

// ============================================================================
// Angle Units
// ============================================================================

/// Angle in degrees
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Degrees(pub f64);

/// Angle in radians
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Radians(pub f64);

impl From<Degrees> for Radians {
    fn from(deg: Degrees) -> Self {
        Radians(deg.0 * std::f64::consts::PI / 180.0)
    }
}

impl From<Radians> for Degrees {
    fn from(rad: Radians) -> Self {
        Degrees(rad.0 * 180.0 / std::f64::consts::PI)
    }
}

// ============================================================================
// Area Units
// ============================================================================

/// Area in square meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquareMeters(pub f64);

// ============================================================================
// Flow Units
// ============================================================================

/// Speed in meters per second
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetersPerSecond(pub f64);

/// Bulk density in tonnes per cubic meter
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TonnesPerCubicMeter(pub f64);

/// Volume flow in cubic meters per hour
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicMetersPerHour(pub f64);

/// Mass flow in tonnes per hour
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TonnesPerHour(pub f64);

/// Area swept along the belt per unit time: 3600 s/h × A (m²) × V (m/s)
impl Mul<MetersPerSecond> for SquareMeters {
    type Output = CubicMetersPerHour;
    fn mul(self, rhs: MetersPerSecond) -> Self::Output {
        CubicMetersPerHour(SECONDS_PER_HOUR * self.0 * rhs.0)
    }
}

impl Mul<TonnesPerCubicMeter> for CubicMetersPerHour {
    type Output = TonnesPerHour;
    fn mul(self, rhs: TonnesPerCubicMeter) -> Self::Output {
        TonnesPerHour(self.0 * rhs.0)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }

            /// Raise to a lower bound (NaN passes through as the bound)
            pub fn at_least(self, floor: f64) -> Self {
                Self(self.0.max(floor))
            }
        }
    };
}

impl_arithmetic!(Millimeters);
impl_arithmetic!(Meters);
impl_arithmetic!(Degrees);
impl_arithmetic!(Radians);
impl_arithmetic!(SquareMeters);
impl_arithmetic!(MetersPerSecond);
impl_arithmetic!(TonnesPerCubicMeter);
impl_arithmetic!(CubicMetersPerHour);
impl_arithmetic!(TonnesPerHour);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_millimeters_to_meters() {
        let m: Meters = Millimeters(1200.0).into();
        assert_eq!(m.0, 1.2);
        let mm: Millimeters = Meters(0.65).into();
        assert_eq!(mm.0, 650.0);
    }

    #[test]
    fn test_degrees_to_radians() {
        let rad: Radians = Degrees(180.0).into();
        assert!((rad.0 - std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn test_flow_chain() {
        let volume = SquareMeters(0.1) * MetersPerSecond(2.0);
        assert!((volume.0 - 720.0).abs() < 1e-9);
        let mass = volume * TonnesPerCubicMeter(1.5);
        assert!((mass.0 - 1080.0).abs() < 1e-9);
    }

    #[test]
    fn test_arithmetic_and_floor() {
        let a = Meters(0.8);
        let b = Meters(0.05);
        assert!(((a * 0.9 - b).0 - 0.67).abs() < 1e-12);
        assert_eq!(MetersPerSecond(0.0).at_least(0.05).0, 0.05);
        assert_eq!(MetersPerSecond(2.0).at_least(0.05).0, 2.0);
        assert_eq!(MetersPerSecond(f64::NAN).at_least(0.05).0, 0.05);
    }

    #[test]
    fn test_serialization() {
        let w = Millimeters(800.0);
        let json = serde_json::to_string(&w).unwrap();
        assert_eq!(json, "800.0");

        let roundtrip: Millimeters = serde_json::from_str(&json).unwrap();
        assert_eq!(w, roundtrip);
    }
}
