//! FILENAME: core/chart-engine/src/scale.rs
//! PURPOSE: Axis bounds derivation and linear scales.
//! CONTEXT: Bounds are derived once per render from every series value.
//! The upper bound is rounded up to a human-friendly value so the axis
//! never ticks at something like 27.3; the lower bound is 0, or the
//! mirror of the upper bound when any value is negative.

use serde::{Deserialize, Serialize};

use crate::data::DataPoint;

// ============================================================================
// AXIS BOUNDS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisBounds {
    pub max_value: f64,
    pub min_value: f64,
}

impl AxisBounds {
    /// `count` evenly spaced values from `min_value` to `max_value`
    /// inclusive.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        match count {
            0 => Vec::new(),
            1 => vec![self.max_value],
            _ => {
                let step = (self.max_value - self.min_value) / (count - 1) as f64;
                (0..count)
                    .map(|i| {
                        if i == count - 1 {
                            self.max_value
                        } else {
                            self.min_value + step * i as f64
                        }
                    })
                    .collect()
            }
        }
    }

    /// Ticks on a 1/2/5 step grid aiming for roughly `target` intervals.
    pub fn nice_ticks(&self, target: usize) -> Vec<f64> {
        let span = self.max_value - self.min_value;
        if target == 0 || !(span > 0.0) || !span.is_finite() {
            return vec![self.min_value];
        }
        let step = nice_step(span / target as f64);
        let start = (self.min_value / step).ceil() * step;

        let mut ticks = Vec::new();
        let mut value = start;
        while value <= self.max_value + step * 0.001 {
            ticks.push(value);
            value += step;
        }
        ticks
    }

    pub fn span(&self) -> f64 {
        self.max_value - self.min_value
    }
}

/// Rounds `value` up to 1.5, 3, 7 or 10 times its power of ten.
///
/// Values that are not positive and finite are treated as magnitude 1
/// with factor 0, which yields 2.
pub fn nice_ceiling(value: f64) -> f64 {
    let (magnitude, factor) = if value > 0.0 && value.is_finite() {
        let magnitude = 10f64.powi(value.log10().floor() as i32);
        (magnitude, value / magnitude)
    } else {
        (1.0, 0.0)
    };

    let rounding = if factor <= 1.5 {
        1.5
    } else if factor <= 3.0 {
        3.0
    } else if factor <= 7.0 {
        7.0
    } else {
        10.0
    };

    (rounding * magnitude).ceil()
}

/// Rounds a raw tick step to 1, 2 or 5 times a power of ten.
pub fn nice_step(raw: f64) -> f64 {
    if !(raw > 0.0) || !raw.is_finite() {
        return 1.0;
    }
    let base = 10f64.powi(raw.log10().floor() as i32);
    let n = raw / base;
    let nice = if n <= 1.0 {
        1.0
    } else if n <= 2.0 {
        2.0
    } else if n <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * base
}

/// Bounds over every series of every point.
pub fn derive_bounds(data: &[DataPoint]) -> AxisBounds {
    bounds_from_values(
        data.iter()
            .flat_map(|p| p.values.values())
            .filter_map(|v| *v),
    )
}

/// Bounds over the named series only.
pub fn derive_bounds_for(data: &[DataPoint], keys: &[&str]) -> AxisBounds {
    bounds_from_values(
        data.iter()
            .flat_map(|p| keys.iter().filter_map(move |k| p.value(k))),
    )
}

fn bounds_from_values(values: impl Iterator<Item = f64>) -> AxisBounds {
    let mut range: Option<(f64, f64)> = None;
    for v in values.filter(|v| v.is_finite()) {
        range = Some(match range {
            Some((lo, hi)) => (lo.min(v), hi.max(v)),
            None => (v, v),
        });
    }

    let (true_min, true_max) = match range {
        Some(range) => range,
        None => {
            log::debug!("No defined values; using fallback bounds");
            (0.0, 0.0)
        }
    };

    if true_min < 0.0 {
        let max_value = nice_ceiling(true_max.max(-true_min));
        AxisBounds {
            max_value,
            min_value: -max_value,
        }
    } else {
        AxisBounds {
            max_value: nice_ceiling(true_max),
            min_value: 0.0,
        }
    }
}

// ============================================================================
// SCALES
// ============================================================================

/// Maps a data value to a pixel coordinate.
pub trait Scale {
    fn apply(&self, value: f64) -> f64;
}

impl<F> Scale for F
where
    F: Fn(f64) -> f64,
{
    fn apply(&self, value: f64) -> f64 {
        self(value)
    }
}

/// Affine map from `domain` to `range`. Out-of-domain values extrapolate;
/// there is no clamping. A zero-width domain maps everything to the start
/// of the range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        LinearScale { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Maps a range value back into the domain.
    pub fn invert(&self, position: f64) -> f64 {
        let (r0, r1) = self.range;
        let (d0, d1) = self.domain;
        if r1 == r0 {
            return d0;
        }
        d0 + (position - r0) / (r1 - r0) * (d1 - d0)
    }
}

impl Scale for LinearScale {
    fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return r0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }
}
