//! Falling-particle backdrops: hail, rain and snowfall.
//!
//! One engine, three configurations. [`variant`] holds the per-variant
//! tables, [`field`] the particle set and its motion, [`draw`] the draw
//! styles and [`animator`] the mount/frame/unmount lifecycle over the
//! capabilities declared in [`env`].

pub mod animator;
pub mod draw;
pub mod env;
pub mod field;
pub mod population;
pub mod variant;

pub use animator::{AnimatorState, ParticleFieldAnimator};
pub use variant::Variant;
