use rand::Rng;

use super::{env::SurfaceSize, population::population_count, variant::VariantConfig};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    /// Downward pixels per frame.
    pub speed: f32,
    /// Sideways pixels per frame.
    pub drift: f32,
    /// Pellet radius, drop length or flake radius.
    pub size: f32,
    pub opacity: f32,
    /// Hail streak length, rain stroke width, unused for snowfall.
    pub accent: f32,
}

/// A fixed-size particle population over one surface.
#[derive(Debug)]
pub struct ParticleField {
    config: &'static VariantConfig,
    bounds: SurfaceSize,
    particles: Vec<Particle>,
}

impl ParticleField {
    #[must_use]
    pub fn new(config: &'static VariantConfig) -> Self {
        Self {
            config,
            bounds: SurfaceSize::default(),
            particles: Vec::new(),
        }
    }

    /// Throws the current set away and spawns a fresh one sized for `bounds`.
    pub fn populate<R: Rng>(&mut self, bounds: SurfaceSize, reduced_motion: bool, rng: &mut R) {
        let count = population_count(self.config, bounds, reduced_motion);
        self.bounds = bounds;
        self.particles.clear();
        self.particles.reserve(count);
        for _ in 0..count {
            self.particles
                .push(spawn(self.config, bounds, reduced_motion, rng));
        }
    }

    /// Moves every particle one frame, handing each to `visit` right after its own update.
    pub fn advance_each<R: Rng, F: FnMut(&Particle)>(&mut self, rng: &mut R, mut visit: F) {
        for particle in &mut self.particles {
            step(particle, self.config, self.bounds, rng);
            visit(particle);
        }
    }

    pub fn advance<R: Rng>(&mut self, rng: &mut R) {
        self.advance_each(rng, |_| {});
    }

    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    #[must_use]
    pub fn bounds(&self) -> SurfaceSize {
        self.bounds
    }

    #[must_use]
    pub fn config(&self) -> &'static VariantConfig {
        self.config
    }
}

pub fn spawn<R: Rng>(
    config: &VariantConfig,
    bounds: SurfaceSize,
    reduced_motion: bool,
    rng: &mut R,
) -> Particle {
    let x = offset_within(bounds.width, rng);
    let y = offset_within(bounds.height, rng);
    let size = config.size.sample(rng);
    let (speed, drift) = if reduced_motion {
        (config.reduced_speed, 0.0)
    } else {
        (config.speed.sample(rng), config.drift.sample(rng))
    };
    let opacity = config.opacity.sample(rng);
    let accent = config.accent.map_or(0.0, |span| span.sample(rng));

    Particle {
        x,
        y,
        speed,
        drift,
        size,
        opacity,
        accent,
    }
}

/// One frame of motion: fall, drift, then recycle past the bottom and wrap at the sides.
///
/// Recycling only re-rolls the horizontal position; speed, drift and
/// opacity stay with the particle for its whole life.
pub fn step<R: Rng>(particle: &mut Particle, config: &VariantConfig, bounds: SurfaceSize, rng: &mut R) {
    particle.y += particle.speed;
    particle.x += particle.drift;

    let bottom = config.bottom_margin.resolve(particle.size);
    if particle.y > bounds.height + bottom {
        particle.y = -bottom;
        particle.x = offset_within(bounds.width, rng);
    }

    let side = config.side_margin.resolve(particle.size);
    if particle.x > bounds.width + side {
        particle.x = -side;
    } else if particle.x < -side {
        particle.x = bounds.width + side;
    }
}

/// Uniform position in `[0, extent)`, or 0 on an empty axis.
fn offset_within<R: Rng>(extent: f32, rng: &mut R) -> f32 {
    if extent > 0.0 && extent.is_finite() {
        rng.random_range(0.0..extent)
    } else {
        0.0
    }
}
