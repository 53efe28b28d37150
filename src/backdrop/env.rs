//! Capabilities an animator borrows from its host.
//!
//! Nothing in the engine reads global state. Surface size, device pixel
//! ratio, the reduce-motion preference, resize notifications and frame
//! scheduling all come through these traits, so a test can drive an
//! animator tick by tick without a terminal attached.

/// A point in surface-local CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Width and height in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfaceSize {
    pub width: f32,
    pub height: f32,
}

impl SurfaceSize {
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    #[must_use]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    #[must_use]
    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Rgba,
}

impl ColorStop {
    #[must_use]
    pub const fn new(offset: f32, color: Rgba) -> Self {
        Self { offset, color }
    }
}

/// Soft halo drawn around a filled disc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub blur: f32,
    pub color: Rgba,
}

/// Immediate-mode drawing with a scale transform.
///
/// Coordinates passed to the drawing calls are CSS pixels; the current
/// transform maps them onto the backing store.
pub trait DrawContext {
    fn reset_transform(&mut self);
    fn scale(&mut self, factor: f32);
    fn clear(&mut self, width: f32, height: f32);
    /// Round-capped line whose color follows `stops` from `from` (0) to `to` (1).
    fn stroke_gradient_line(&mut self, from: Point, to: Point, width: f32, stops: &[ColorStop]);
    fn fill_disc(&mut self, center: Point, radius: f32, color: Rgba, glow: Option<Glow>);
    /// Disc whose color follows `stops` from the center (0) to the rim (1).
    fn fill_radial_disc(&mut self, center: Point, radius: f32, stops: &[ColorStop]);
}

/// The drawing surface an animator owns between mount and unmount.
pub trait Surface {
    type Context: DrawContext;

    /// Size currently displayed, in CSS pixels.
    fn displayed_size(&self) -> SurfaceSize;
    fn device_pixel_ratio(&self) -> f32;
    fn set_backing_size(&mut self, width: u32, height: u32);
    fn backing_size(&self) -> (u32, u32);
    /// `None` when the surface cannot be drawn on.
    fn context(&mut self) -> Option<&mut Self::Context>;
}

/// Registration handle for a host event listener.
///
/// Not `Clone`: whoever holds it is the only party able to cancel it, and
/// cancelling consumes it.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

impl Subscription {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn id(&self) -> u64 {
        self.0
    }
}

/// Handle for one scheduled frame callback.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct FrameToken(u64);

impl FrameToken {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn id(&self) -> u64 {
        self.0
    }
}

pub trait ResizeEvents {
    fn subscribe_resize(&mut self) -> Subscription;
    fn unsubscribe_resize(&mut self, subscription: Subscription);
}

pub trait MotionPreference {
    fn prefers_reduced_motion(&self) -> bool;
    fn subscribe_motion(&mut self) -> Subscription;
    fn unsubscribe_motion(&mut self, subscription: Subscription);
}

pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameToken;
    fn cancel_frame(&mut self, token: FrameToken);
}

/// Everything an animator needs from its environment besides the surface.
pub trait Host: ResizeEvents + MotionPreference + FrameScheduler {}

impl<T> Host for T where T: ResizeEvents + MotionPreference + FrameScheduler {}

/// Falls back to 1.0 for ratios the host cannot report sensibly.
#[must_use]
pub fn normalized_pixel_ratio(ratio: f32) -> f32 {
    if ratio.is_finite() && ratio > 0.0 {
        ratio
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_ratio_falls_back_to_one() {
        assert!((normalized_pixel_ratio(0.0) - 1.0).abs() < f32::EPSILON);
        assert!((normalized_pixel_ratio(-2.0) - 1.0).abs() < f32::EPSILON);
        assert!((normalized_pixel_ratio(f32::NAN) - 1.0).abs() < f32::EPSILON);
        assert!((normalized_pixel_ratio(2.0) - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn with_alpha_clamps() {
        let white = Rgba::opaque(255, 255, 255);
        assert!((white.with_alpha(1.7).a - 1.0).abs() < f32::EPSILON);
        assert!(white.with_alpha(-0.3).a.abs() < f32::EPSILON);
    }
}
