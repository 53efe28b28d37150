use log::debug;
use rand::{SeedableRng, rngs::StdRng};

use super::{
    env::{
        DrawContext, FrameToken, Host, Subscription, Surface, SurfaceSize,
        normalized_pixel_ratio,
    },
    field::{Particle, ParticleField},
    variant::Variant,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatorState {
    /// Constructed, not yet mounted.
    Detached,
    /// Mounted on a surface without a drawing context; does nothing.
    Inert,
    Animating,
    Static,
    Unmounted,
}

impl AnimatorState {
    #[must_use]
    pub fn is_live(self) -> bool {
        matches!(self, Self::Animating | Self::Static)
    }
}

/// Drives one falling-particle backdrop on a surface it owns.
///
/// All host interaction goes through the [`Host`] passed into each call:
/// the animator holds listener subscriptions and at most one pending
/// frame token, and gives every one of them back on [`unmount`].
///
/// [`unmount`]: ParticleFieldAnimator::unmount
#[derive(Debug)]
pub struct ParticleFieldAnimator<S: Surface> {
    variant: Variant,
    state: AnimatorState,
    surface: Option<S>,
    field: ParticleField,
    rng: StdRng,
    reduced_motion: bool,
    pending_frame: Option<FrameToken>,
    resize_subscription: Option<Subscription>,
    motion_subscription: Option<Subscription>,
    frames_rendered: u64,
}

impl<S: Surface> ParticleFieldAnimator<S> {
    #[must_use]
    pub fn new(variant: Variant) -> Self {
        Self::with_rng(variant, StdRng::from_rng(&mut rand::rng()))
    }

    /// Deterministic particle layout, for tests and reproducible captures.
    #[must_use]
    pub fn with_seed(variant: Variant, seed: u64) -> Self {
        Self::with_rng(variant, StdRng::seed_from_u64(seed))
    }

    fn with_rng(variant: Variant, rng: StdRng) -> Self {
        Self {
            variant,
            state: AnimatorState::Detached,
            surface: None,
            field: ParticleField::new(variant.config()),
            rng,
            reduced_motion: false,
            pending_frame: None,
            resize_subscription: None,
            motion_subscription: None,
            frames_rendered: 0,
        }
    }

    pub fn mount<H: Host>(&mut self, mut surface: S, host: &mut H) {
        if self.state != AnimatorState::Detached {
            debug!("{} backdrop already mounted; ignoring", self.variant.label());
            return;
        }

        if surface.context().is_none() {
            debug!(
                "{} backdrop has no drawing context; staying inert",
                self.variant.label()
            );
            self.surface = Some(surface);
            self.state = AnimatorState::Inert;
            return;
        }

        self.surface = Some(surface);
        self.reduced_motion = host.prefers_reduced_motion();
        self.fit_surface();
        self.repopulate();

        if self.reduced_motion {
            self.state = AnimatorState::Static;
            self.render_static();
        } else {
            self.state = AnimatorState::Animating;
            self.run_frame(host);
        }

        self.resize_subscription = Some(host.subscribe_resize());
        self.motion_subscription = Some(host.subscribe_motion());
        debug!(
            "{} backdrop mounted: {} particles, {:?}",
            self.variant.label(),
            self.field.len(),
            self.state
        );
    }

    /// Releases listeners and the pending frame. Returns the surface to the caller.
    pub fn unmount<H: Host>(&mut self, host: &mut H) -> Option<S> {
        if let Some(subscription) = self.resize_subscription.take() {
            host.unsubscribe_resize(subscription);
        }
        if let Some(subscription) = self.motion_subscription.take() {
            host.unsubscribe_motion(subscription);
        }
        if let Some(token) = self.pending_frame.take() {
            host.cancel_frame(token);
        }
        if self.state != AnimatorState::Unmounted {
            debug!("{} backdrop unmounted", self.variant.label());
        }
        self.state = AnimatorState::Unmounted;
        self.surface.take()
    }

    pub fn handle_resize<H: Host>(&mut self, _host: &mut H) {
        if !self.state.is_live() {
            return;
        }
        self.fit_surface();
        self.repopulate();
        if self.reduced_motion {
            self.render_static();
        }
    }

    pub fn handle_motion_change<H: Host>(&mut self, reduced_motion: bool, host: &mut H) {
        if !self.state.is_live() {
            return;
        }
        self.reduced_motion = reduced_motion;
        if let Some(token) = self.pending_frame.take() {
            host.cancel_frame(token);
        }
        self.repopulate();

        if reduced_motion {
            self.state = AnimatorState::Static;
            self.render_static();
        } else {
            self.state = AnimatorState::Animating;
            self.run_frame(host);
        }
        debug!(
            "{} backdrop now {:?} with {} particles",
            self.variant.label(),
            self.state,
            self.field.len()
        );
    }

    /// Runs the frame behind `token`. Tokens other than the pending one are ignored.
    pub fn handle_frame<H: Host>(&mut self, token: &FrameToken, host: &mut H) -> bool {
        if self.pending_frame.as_ref() != Some(token) {
            return false;
        }
        self.pending_frame = None;
        if self.reduced_motion || self.state != AnimatorState::Animating {
            return false;
        }
        self.run_frame(host);
        true
    }

    #[must_use]
    pub fn state(&self) -> AnimatorState {
        self.state
    }

    #[must_use]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    #[must_use]
    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        self.field.particles()
    }

    #[must_use]
    pub fn bounds(&self) -> SurfaceSize {
        self.field.bounds()
    }

    #[must_use]
    pub fn pending_frame(&self) -> Option<&FrameToken> {
        self.pending_frame.as_ref()
    }

    #[must_use]
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    #[must_use]
    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    /// Matches the backing store to the displayed size and rescales the transform.
    fn fit_surface(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        let ratio = normalized_pixel_ratio(surface.device_pixel_ratio());
        let displayed = surface.displayed_size();
        surface.set_backing_size(
            backing_length(displayed.width, ratio),
            backing_length(displayed.height, ratio),
        );
        if let Some(ctx) = surface.context() {
            ctx.reset_transform();
            ctx.scale(ratio);
        }
    }

    fn logical_size(&self) -> SurfaceSize {
        let Some(surface) = self.surface.as_ref() else {
            return SurfaceSize::default();
        };
        let ratio = normalized_pixel_ratio(surface.device_pixel_ratio());
        let (width, height) = surface.backing_size();
        SurfaceSize::new(width as f32 / ratio, height as f32 / ratio)
    }

    fn repopulate(&mut self) {
        let bounds = self.logical_size();
        self.field
            .populate(bounds, self.reduced_motion, &mut self.rng);
    }

    fn render_static(&mut self) {
        let bounds = self.field.bounds();
        let draw = self.field.config().draw;
        let Some(ctx) = self.surface.as_mut().and_then(|surface| surface.context()) else {
            return;
        };
        ctx.clear(bounds.width, bounds.height);
        for particle in self.field.particles() {
            draw(particle, &mut *ctx);
        }
        self.frames_rendered += 1;
    }

    /// Clear, update-then-draw each particle, and book the next frame.
    fn run_frame<H: Host>(&mut self, host: &mut H) {
        let bounds = self.field.bounds();
        let draw = self.field.config().draw;
        let Some(ctx) = self.surface.as_mut().and_then(|surface| surface.context()) else {
            return;
        };
        ctx.clear(bounds.width, bounds.height);
        self.field
            .advance_each(&mut self.rng, |particle| draw(particle, &mut *ctx));
        self.frames_rendered += 1;

        if !self.reduced_motion {
            if let Some(stale) = self.pending_frame.take() {
                host.cancel_frame(stale);
            }
            self.pending_frame = Some(host.request_frame());
        }
    }
}

fn backing_length(css: f32, ratio: f32) -> u32 {
    let device = (css * ratio).floor();
    if device.is_finite() && device > 0.0 {
        device as u32
    } else {
        0
    }
}
