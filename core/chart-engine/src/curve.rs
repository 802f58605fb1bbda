//! FILENAME: core/chart-engine/src/curve.rs
//! PURPOSE: Curve interpolation between consecutive pixel points.
//! CONTEXT: A curve is selected by name from chart configuration. Each
//! call to `Curve::write` fits one run of points on its own; there is no
//! continuity across runs. Unknown names render as straight lines.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::path::PathBuilder;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Curve {
    #[default]
    Linear,
    /// Monotone cubic in x (no overshoot between points).
    MonotoneX,
    /// Step change halfway between points.
    Step,
    /// Step change at the previous point.
    StepBefore,
    /// Step change at the next point.
    StepAfter,
    /// Uniform cubic B-spline; passes through the end points only.
    Basis,
    /// Natural cubic spline through every point.
    Natural,
}

impl Curve {
    pub fn from_name(name: &str) -> Curve {
        match name {
            "linear" => Curve::Linear,
            "monotone" | "monotoneX" => Curve::MonotoneX,
            "step" => Curve::Step,
            "stepBefore" => Curve::StepBefore,
            "stepAfter" => Curve::StepAfter,
            "basis" => Curve::Basis,
            "natural" => Curve::Natural,
            other => {
                warn!("Unknown curve type '{}', using linear", other);
                Curve::Linear
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Curve::Linear => "linear",
            Curve::MonotoneX => "monotoneX",
            Curve::Step => "step",
            Curve::StepBefore => "stepBefore",
            Curve::StepAfter => "stepAfter",
            Curve::Basis => "basis",
            Curve::Natural => "natural",
        }
    }

    /// Writes one run of points. An empty run writes nothing.
    pub fn write(&self, points: &[(f64, f64)], path: &mut PathBuilder) {
        match self {
            Curve::Linear => linear(points, path),
            Curve::MonotoneX => monotone_x(points, path),
            Curve::Step => step(points, 0.5, path),
            Curve::StepBefore => step(points, 0.0, path),
            Curve::StepAfter => step(points, 1.0, path),
            Curve::Basis => basis(points, path),
            Curve::Natural => natural(points, path),
        }
    }

    /// Convenience: the path for one run as a string.
    pub fn path(&self, points: &[(f64, f64)]) -> String {
        let mut path = PathBuilder::new();
        self.write(points, &mut path);
        path.finish()
    }
}

// ============================================================================
// LINEAR / STEP
// ============================================================================

fn linear(points: &[(f64, f64)], path: &mut PathBuilder) {
    let Some((&(x0, y0), rest)) = points.split_first() else {
        return;
    };
    path.move_to(x0, y0);
    for &(x, y) in rest {
        path.line_to(x, y);
    }
}

/// `t` is where between two points the vertical change happens:
/// 0 = at the previous x, 1 = at the next x.
fn step(points: &[(f64, f64)], t: f64, path: &mut PathBuilder) {
    let Some((&(x0, y0), rest)) = points.split_first() else {
        return;
    };
    path.move_to(x0, y0);

    let (mut px, mut py) = (x0, y0);
    for &(x, y) in rest {
        if t <= 0.0 {
            path.line_to(px, y);
            path.line_to(x, y);
        } else {
            let x1 = px * (1.0 - t) + x * t;
            path.line_to(x1, py);
            path.line_to(x1, y);
        }
        px = x;
        py = y;
    }

    if t > 0.0 && t < 1.0 && !rest.is_empty() {
        path.line_to(px, py);
    }
}

// ============================================================================
// BASIS
// ============================================================================

fn basis(points: &[(f64, f64)], path: &mut PathBuilder) {
    match points {
        [] => {}
        [(x, y)] => path.move_to(*x, *y),
        [(x0, y0), (x1, y1)] => {
            path.move_to(*x0, *y0);
            path.line_to(*x1, *y1);
        }
        _ => {
            let (x0, y0) = points[0];
            let (x1, y1) = points[1];
            path.move_to(x0, y0);
            path.line_to((5.0 * x0 + x1) / 6.0, (5.0 * y0 + y1) / 6.0);

            let ((mut ax, mut ay), (mut bx, mut by)) = (points[0], points[1]);
            for &(x, y) in &points[2..] {
                basis_segment(path, (ax, ay), (bx, by), (x, y));
                (ax, ay) = (bx, by);
                (bx, by) = (x, y);
            }

            basis_segment(path, (ax, ay), (bx, by), (bx, by));
            path.line_to(bx, by);
        }
    }
}

fn basis_segment(path: &mut PathBuilder, p0: (f64, f64), p1: (f64, f64), p: (f64, f64)) {
    path.bezier_to(
        (2.0 * p0.0 + p1.0) / 3.0,
        (2.0 * p0.1 + p1.1) / 3.0,
        (p0.0 + 2.0 * p1.0) / 3.0,
        (p0.1 + 2.0 * p1.1) / 3.0,
        (p0.0 + 4.0 * p1.0 + p.0) / 6.0,
        (p0.1 + 4.0 * p1.1 + p.1) / 6.0,
    );
}

// ============================================================================
// NATURAL
// ============================================================================

fn natural(points: &[(f64, f64)], path: &mut PathBuilder) {
    match points {
        [] => {}
        [(x, y)] => path.move_to(*x, *y),
        [(x0, y0), (x1, y1)] => {
            path.move_to(*x0, *y0);
            path.line_to(*x1, *y1);
        }
        _ => {
            let xs: Vec<f64> = points.iter().map(|p| p.0).collect();
            let ys: Vec<f64> = points.iter().map(|p| p.1).collect();
            let (ax, bx) = natural_control_points(&xs);
            let (ay, by) = natural_control_points(&ys);

            path.move_to(xs[0], ys[0]);
            for i in 0..xs.len() - 1 {
                path.bezier_to(ax[i], ay[i], bx[i], by[i], xs[i + 1], ys[i + 1]);
            }
        }
    }
}

/// Solves the tridiagonal system for a natural cubic spline through `x`
/// (at least three values). Returns the first and second control point
/// coordinate of every segment.
fn natural_control_points(x: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let n = x.len() - 1;
    let mut a = vec![0.0; n];
    let mut b = vec![0.0; n];
    let mut r = vec![0.0; n];

    a[0] = 0.0;
    b[0] = 2.0;
    r[0] = x[0] + 2.0 * x[1];
    for i in 1..n - 1 {
        a[i] = 1.0;
        b[i] = 4.0;
        r[i] = 4.0 * x[i] + 2.0 * x[i + 1];
    }
    a[n - 1] = 2.0;
    b[n - 1] = 7.0;
    r[n - 1] = 8.0 * x[n - 1] + x[n];

    for i in 1..n {
        let m = a[i] / b[i - 1];
        b[i] -= m;
        r[i] -= m * r[i - 1];
    }

    a[n - 1] = r[n - 1] / b[n - 1];
    for i in (0..n - 1).rev() {
        a[i] = (r[i] - a[i + 1]) / b[i];
    }

    b[n - 1] = (x[n] + a[n - 1]) / 2.0;
    for i in 0..n - 1 {
        b[i] = 2.0 * x[i + 1] - a[i + 1];
    }

    (a, b)
}

// ============================================================================
// MONOTONE X
// ============================================================================

fn monotone_x(points: &[(f64, f64)], path: &mut PathBuilder) {
    // Coincident consecutive points carry no direction.
    let mut pts: Vec<(f64, f64)> = Vec::with_capacity(points.len());
    for &p in points {
        if pts.last() != Some(&p) {
            pts.push(p);
        }
    }

    match pts.as_slice() {
        [] => {}
        [(x, y)] => path.move_to(*x, *y),
        [(x0, y0), (x1, y1)] => {
            path.move_to(*x0, *y0);
            path.line_to(*x1, *y1);
        }
        _ => {
            let n = pts.len();
            // Tangent at every interior point, then the two end tangents.
            let mut tangents = vec![0.0; n];
            for i in 1..n - 1 {
                tangents[i] = interior_slope(pts[i - 1], pts[i], pts[i + 1]);
            }
            tangents[0] = end_slope(pts[0], pts[1], tangents[1]);
            tangents[n - 1] = end_slope(pts[n - 2], pts[n - 1], tangents[n - 2]);

            path.move_to(pts[0].0, pts[0].1);
            for i in 0..n - 1 {
                hermite_segment(path, pts[i], pts[i + 1], tangents[i], tangents[i + 1]);
            }
        }
    }
}

fn sign(v: f64) -> f64 {
    if v < 0.0 {
        -1.0
    } else {
        1.0
    }
}

fn secant(a: (f64, f64), b: (f64, f64)) -> f64 {
    let h = b.0 - a.0;
    if h == 0.0 {
        0.0
    } else {
        (b.1 - a.1) / h
    }
}

/// Fritsch-Carlson style tangent at `p1`, zero at local extrema.
fn interior_slope(p0: (f64, f64), p1: (f64, f64), p2: (f64, f64)) -> f64 {
    let h0 = p1.0 - p0.0;
    let h1 = p2.0 - p1.0;
    let s0 = secant(p0, p1);
    let s1 = secant(p1, p2);
    let p = if h0 + h1 == 0.0 {
        0.0
    } else {
        (s0 * h1 + s1 * h0) / (h0 + h1)
    };
    let slope = (sign(s0) + sign(s1)) * s0.abs().min(s1.abs()).min(0.5 * p.abs());
    if slope.is_finite() {
        slope
    } else {
        0.0
    }
}

/// One-sided tangent for an end point, from the neighbouring tangent.
fn end_slope(a: (f64, f64), b: (f64, f64), neighbour: f64) -> f64 {
    let h = b.0 - a.0;
    if h == 0.0 {
        neighbour
    } else {
        (3.0 * (b.1 - a.1) / h - neighbour) / 2.0
    }
}

fn hermite_segment(path: &mut PathBuilder, a: (f64, f64), b: (f64, f64), t0: f64, t1: f64) {
    let dx = (b.0 - a.0) / 3.0;
    path.bezier_to(a.0 + dx, a.1 + dx * t0, b.0 - dx, b.1 - dx * t1, b.0, b.1);
}
