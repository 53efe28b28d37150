use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{
    draw::{draw_hailstone, draw_raindrop, draw_snowflake},
    env::DrawContext,
    field::Particle,
};

pub type DrawFn = fn(&Particle, &mut dyn DrawContext);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    Hail,
    Rain,
    Snowfall,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::Hail, Variant::Rain, Variant::Snowfall];

    #[must_use]
    pub fn config(self) -> &'static VariantConfig {
        match self {
            Self::Hail => &HAIL,
            Self::Rain => &RAIN,
            Self::Snowfall => &SNOWFALL,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        self.config().label
    }

    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Hail => Self::Rain,
            Self::Rain => Self::Snowfall,
            Self::Snowfall => Self::Hail,
        }
    }
}

/// Uniform range from `lo` up to `hi`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub lo: f32,
    pub hi: f32,
}

impl Span {
    #[must_use]
    pub const fn new(lo: f32, hi: f32) -> Self {
        Self { lo, hi }
    }

    /// `[-magnitude, magnitude)`.
    #[must_use]
    pub const fn symmetric(magnitude: f32) -> Self {
        Self {
            lo: -magnitude,
            hi: magnitude,
        }
    }

    /// Collapsed spans always yield `lo`.
    pub fn sample<R: Rng>(self, rng: &mut R) -> f32 {
        if self.lo < self.hi {
            rng.random_range(self.lo..self.hi)
        } else {
            self.lo
        }
    }

    #[must_use]
    pub fn contains(self, value: f32) -> bool {
        value >= self.lo && value <= self.hi
    }
}

/// How far past an edge a particle may travel before it is recycled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Margin {
    Fixed(f32),
    /// Multiple of the particle's `size`.
    SizeScaled(f32),
}

impl Margin {
    #[must_use]
    pub fn resolve(self, size: f32) -> f32 {
        match self {
            Self::Fixed(px) => px,
            Self::SizeScaled(factor) => size * factor,
        }
    }

    /// Largest margin any particle drawn from `size` can have.
    #[must_use]
    pub fn upper_bound(self, size: Span) -> f32 {
        match self {
            Self::Fixed(px) => px,
            Self::SizeScaled(factor) => size.hi * factor,
        }
    }
}

/// Everything that distinguishes one backdrop from another.
#[derive(Debug)]
pub struct VariantConfig {
    pub label: &'static str,
    /// CSS square pixels of surface per particle.
    pub density_divisor: f32,
    pub min_count: usize,
    pub max_count: usize,
    /// Population ceiling while reduced motion is on.
    pub reduced_cap: usize,
    pub size: Span,
    pub speed: Span,
    pub reduced_speed: f32,
    pub drift: Span,
    pub opacity: Span,
    /// Hail streak length, rain stroke width.
    pub accent: Option<Span>,
    pub bottom_margin: Margin,
    pub side_margin: Margin,
    pub draw: DrawFn,
}

pub static HAIL: VariantConfig = VariantConfig {
    label: "Hail",
    density_divisor: 12_000.0,
    min_count: 30,
    max_count: 200,
    reduced_cap: 15,
    size: Span::new(1.5, 3.5),
    speed: Span::new(2.5, 5.5),
    reduced_speed: 0.2,
    drift: Span::symmetric(0.6),
    opacity: Span::new(0.5, 0.8),
    accent: Some(Span::new(4.0, 12.0)),
    bottom_margin: Margin::Fixed(20.0),
    side_margin: Margin::Fixed(20.0),
    draw: draw_hailstone,
};

pub static RAIN: VariantConfig = VariantConfig {
    label: "Rain",
    density_divisor: 8_000.0,
    min_count: 40,
    max_count: 250,
    reduced_cap: 20,
    size: Span::new(10.0, 25.0),
    speed: Span::new(3.0, 7.0),
    reduced_speed: 0.3,
    drift: Span::symmetric(0.4),
    opacity: Span::new(0.3, 0.55),
    accent: Some(Span::new(0.6, 1.4)),
    bottom_margin: Margin::SizeScaled(1.0),
    side_margin: Margin::Fixed(20.0),
    draw: draw_raindrop,
};

pub static SNOWFALL: VariantConfig = VariantConfig {
    label: "Snowfall",
    density_divisor: 10_000.0,
    min_count: 40,
    max_count: 250,
    reduced_cap: 20,
    size: Span::new(1.5, 4.0),
    speed: Span::new(0.25, 1.0),
    reduced_speed: 0.1,
    drift: Span::symmetric(0.3),
    opacity: Span::new(0.5, 0.9),
    accent: None,
    bottom_margin: Margin::SizeScaled(2.0),
    side_margin: Margin::SizeScaled(2.0),
    draw: draw_snowflake,
};
