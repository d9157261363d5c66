use rand::Rng;

/// Parametric heart curve:
/// x = 16 sin³t, y = 13 cos t − 5 cos 2t − 2 cos 3t − cos 4t.
pub fn heart_curve(t: f64) -> (f64, f64) {
    let x = 16.0 * t.sin().powi(3);
    let y = 13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos();
    (x, y)
}

/// Add uniform noise in `[-noise, noise]` to both coordinates.
pub fn perturb<R: Rng + ?Sized>(point: (f64, f64), noise: f64, rng: &mut R) -> (f64, f64) {
    if noise == 0.0 {
        return point;
    }
    let noise = noise.abs();
    (
        point.0 + rng.gen_range(-noise..=noise),
        point.1 + rng.gen_range(-noise..=noise),
    )
}
