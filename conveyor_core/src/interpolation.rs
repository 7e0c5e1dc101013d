//! # Piecewise-Linear Interpolation
//!
//! Clamped linear interpolation over a discrete, ascending set of keys. This
//! is the only numeric primitive the K-factor lookup needs: the 2D table is
//! resolved by running it once per trough row and once more across rows.
//!
//! ## Rules
//!
//! | Query                | Result                                  |
//! |----------------------|-----------------------------------------|
//! | `x <= first key`     | first value (no extrapolation below)    |
//! | `x >= last key`      | last value (no extrapolation above)     |
//! | `x == some key`      | that key's value, exactly               |
//! | `x0 <= x <= x1`      | `y0 + (y1 - y0) * (x - x0) / (x1 - x0)` |
//! | no bracket found     | value at index `len / 2`                |
//! | empty table          | `CalcError::EmptyTable`                 |
//!
//! The last row is only reached by a NaN query, since every comparison
//! against NaN is false.
//!
//! ## Example
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use conveyor_core::interpolation::interpolate;
//!
//! let table: BTreeMap<u32, f64> = [(10, 1.0), (20, 3.0)].into_iter().collect();
//! assert_eq!(interpolate(15.0, &table).unwrap(), 2.0);
//! assert_eq!(interpolate(99.0, &table).unwrap(), 3.0);
//! ```

use std::collections::BTreeMap;

use crate::errors::{CalcError, CalcResult};

/// Interpolate `x` over an ordered map of key → value.
///
/// Keys are anything losslessly widened to `f64` (the reference tables use
/// integer degrees). `BTreeMap` iteration order gives the ascending-key
/// precondition for free.
pub fn interpolate<K>(x: f64, table: &BTreeMap<K, f64>) -> CalcResult<f64>
where
    K: Copy + Into<f64>,
{
    let points: Vec<(f64, f64)> = table.iter().map(|(k, v)| ((*k).into(), *v)).collect();
    interpolate_points(x, &points)
}

/// Interpolate `x` over `(key, value)` points already sorted by ascending key.
pub fn interpolate_points(x: f64, points: &[(f64, f64)]) -> CalcResult<f64> {
    let (Some(&(x_first, y_first)), Some(&(x_last, y_last))) = (points.first(), points.last())
    else {
        return Err(CalcError::empty_table("interpolation points"));
    };

    if x <= x_first {
        return Ok(y_first);
    }
    if x >= x_last {
        return Ok(y_last);
    }

    if let Some(&(_, y)) = points.iter().find(|(k, _)| *k == x) {
        return Ok(y);
    }

    for pair in points.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        if x0 <= x && x <= x1 {
            return Ok(y0 + (y1 - y0) * (x - x0) / (x1 - x0));
        }
    }

    // Unbracketed (NaN query): fall back to the middle entry
    Ok(points[points.len() / 2].1)
}
