//! FILENAME: core/chart-engine/tests/common/mod.rs
//! Fixtures for chart-engine integration tests.

#![allow(dead_code)]

use chart_engine::{points_from_json, DataPoint, LineGenerator, LinearScale};

/// Monthly revenue/cost points with gaps, as a dashboard would send them.
pub fn monthly_points() -> Vec<DataPoint> {
    points_from_json(
        r#"[
            {"index": 0, "revenue": 12, "cost": 8},
            {"index": 1, "revenue": null, "cost": 9},
            {"index": 2, "revenue": 27.3, "cost": null},
            {"index": 3, "revenue": 31, "cost": -4},
            {"index": 4, "cost": 6}
        ]"#,
    )
    .expect("fixture points")
}

/// Identity-ish pixel mapping: x = index * 10, y = 100 - value.
pub fn simple_generator(curve: &str, key: &str) -> LineGenerator<LinearScale, LinearScale> {
    LineGenerator::new(
        curve,
        LinearScale::new((0.0, 10.0), (0.0, 100.0)),
        LinearScale::new((0.0, 100.0), (100.0, 0.0)),
        key,
    )
}

/// Small deterministic pseudo-random sequence for property-style checks.
pub fn pseudo_random_values(seed: u64, count: usize, spread: f64) -> Vec<f64> {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    (0..count)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            let unit = (state >> 11) as f64 / (1u64 << 53) as f64;
            (unit - 0.5) * 2.0 * spread
        })
        .collect()
}
