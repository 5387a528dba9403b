/// Generate a random `f64` in the range `[low, high)`.
///
/// A degenerate range (`low == high`) always yields `low`. The result is
/// interpolated between the endpoints, so ranges wider than `f64::MAX`
/// stay finite.
#[inline]
pub(crate) fn f64_range(rng: &mut fastrand::Rng, low: f64, high: f64) -> f64 {
    let r = rng.f64();
    (low * (1.0 - r) + high * r).clamp(low, high)
}

/// Draw from `N(mean, std_dev²)` with the Box-Muller transform.
#[inline]
pub(crate) fn normal(rng: &mut fastrand::Rng, mean: f64, std_dev: f64) -> f64 {
    // `1 - u` keeps the log argument in (0, 1].
    let u1 = 1.0 - rng.f64();
    let u2 = rng.f64();
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * core::f64::consts::PI * u2).cos();
    mean + z * std_dev
}
