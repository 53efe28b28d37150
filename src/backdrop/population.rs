use super::{env::SurfaceSize, variant::VariantConfig};

/// Particles the surface area alone asks for, before any clamping.
#[must_use]
pub fn density_count(config: &VariantConfig, size: SurfaceSize) -> usize {
    let area = f64::from(size.width.max(0.0)) * f64::from(size.height.max(0.0));
    let count = (area / f64::from(config.density_divisor)).floor();
    if count.is_finite() { count as usize } else { 0 }
}

/// Population for a surface of `size`.
///
/// Normal motion clamps the density count into `[min_count, max_count]`.
/// Reduced motion only caps it, so a tiny surface may get no particles.
#[must_use]
pub fn population_count(config: &VariantConfig, size: SurfaceSize, reduced_motion: bool) -> usize {
    let density = density_count(config, size);
    if reduced_motion {
        density.min(config.reduced_cap)
    } else {
        density.clamp(config.min_count, config.max_count)
    }
}
