//! FILENAME: core/chart-engine/src/path.rs
//! PURPOSE: SVG path data builder.

use std::fmt::Write;

/// Accumulates `M`, `L` and `C` commands into an SVG `d` string.
/// Coordinates are rounded to 3 decimals and printed without trailing
/// zeros, e.g. `M0,10L5.5,3`.
#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    data: String,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.command('M', &[x, y]);
    }

    pub fn line_to(&mut self, x: f64, y: f64) {
        self.command('L', &[x, y]);
    }

    pub fn bezier_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64) {
        self.command('C', &[x1, y1, x2, y2, x, y]);
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn finish(self) -> String {
        self.data
    }

    fn command(&mut self, op: char, coords: &[f64]) {
        self.data.push(op);
        for (i, value) in coords.iter().enumerate() {
            if i > 0 {
                self.data.push(',');
            }
            // Writing into a String cannot fail.
            let _ = write!(self.data, "{}", round_coord(*value));
        }
    }
}

fn round_coord(value: f64) -> f64 {
    let rounded = (value * 1000.0).round() / 1000.0;
    // Avoid printing "-0".
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_and_rounding() {
        let mut path = PathBuilder::new();
        assert!(path.is_empty());
        path.move_to(0.0, 10.0);
        path.line_to(5.12345, -0.0001);
        path.bezier_to(1.0, 2.0, 3.0, 4.0, 5.0, 6.5);
        assert_eq!(path.finish(), "M0,10L5.123,0C1,2,3,4,5,6.5");
    }
}
