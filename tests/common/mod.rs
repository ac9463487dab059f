//! Common test utilities for integration tests.
#![allow(dead_code)]

use reclog::components::Position3D;

/// `n` positions along the x axis: `[0, 0, 0]`, `[1, 0, 0]`, ...
pub fn positions(n: usize) -> Vec<Position3D> {
    (0..n).map(|i| Position3D::new(i as f32, 0.0, 0.0)).collect()
}

/// Random partition lengths summing to `total`, zero lengths included.
pub fn random_lengths(rng: &mut fastrand::Rng, total: usize) -> Vec<usize> {
    let mut lengths = Vec::new();
    let mut remaining = total;
    while remaining > 0 {
        let len = rng.usize(0..=remaining.min(4));
        lengths.push(len);
        remaining -= len;
    }
    lengths
}
