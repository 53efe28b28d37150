#![allow(dead_code)]

use std::collections::HashSet;

use crate::{
    backdrop::env::{
        ColorStop, DrawContext, FrameScheduler, FrameToken, Glow, MotionPreference, Point,
        ResizeEvents, Rgba, Subscription, Surface, SurfaceSize,
    },
    cli::Cli,
};

pub(crate) fn state_test_cli() -> Cli {
    Cli {
        effect: None,
        fps: 30,
        reduced_motion: false,
        no_backdrop: false,
        cell_width: 8.0,
        cell_height: 16.0,
        pixel_ratio: 1.0,
        user: "tester".to_string(),
        log_file: None,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum DrawOp {
    ResetTransform,
    Scale(f32),
    Clear {
        width: f32,
        height: f32,
    },
    Line {
        from: Point,
        to: Point,
        width: f32,
        stops: Vec<ColorStop>,
    },
    Disc {
        center: Point,
        radius: f32,
        color: Rgba,
        glow: Option<Glow>,
    },
    RadialDisc {
        center: Point,
        radius: f32,
        stops: Vec<ColorStop>,
    },
}

#[derive(Debug, Default)]
pub(crate) struct RecordingContext {
    pub ops: Vec<DrawOp>,
}

impl RecordingContext {
    pub fn clears(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Clear { .. }))
            .count()
    }
}

impl DrawContext for RecordingContext {
    fn reset_transform(&mut self) {
        self.ops.push(DrawOp::ResetTransform);
    }

    fn scale(&mut self, factor: f32) {
        self.ops.push(DrawOp::Scale(factor));
    }

    fn clear(&mut self, width: f32, height: f32) {
        self.ops.push(DrawOp::Clear { width, height });
    }

    fn stroke_gradient_line(&mut self, from: Point, to: Point, width: f32, stops: &[ColorStop]) {
        self.ops.push(DrawOp::Line {
            from,
            to,
            width,
            stops: stops.to_vec(),
        });
    }

    fn fill_disc(&mut self, center: Point, radius: f32, color: Rgba, glow: Option<Glow>) {
        self.ops.push(DrawOp::Disc {
            center,
            radius,
            color,
            glow,
        });
    }

    fn fill_radial_disc(&mut self, center: Point, radius: f32, stops: &[ColorStop]) {
        self.ops.push(DrawOp::RadialDisc {
            center,
            radius,
            stops: stops.to_vec(),
        });
    }
}

#[derive(Debug)]
pub(crate) struct FakeSurface {
    pub displayed: SurfaceSize,
    pub ratio: f32,
    pub backing: (u32, u32),
    pub drawable: bool,
    pub context: RecordingContext,
}

impl FakeSurface {
    pub fn new(width: f32, height: f32, ratio: f32) -> Self {
        Self {
            displayed: SurfaceSize::new(width, height),
            ratio,
            backing: (0, 0),
            drawable: true,
            context: RecordingContext::default(),
        }
    }

    pub fn without_context(width: f32, height: f32) -> Self {
        Self {
            drawable: false,
            ..Self::new(width, height, 1.0)
        }
    }

    pub fn set_displayed(&mut self, width: f32, height: f32) {
        self.displayed = SurfaceSize::new(width, height);
    }
}

impl Surface for FakeSurface {
    type Context = RecordingContext;

    fn displayed_size(&self) -> SurfaceSize {
        self.displayed
    }

    fn device_pixel_ratio(&self) -> f32 {
        self.ratio
    }

    fn set_backing_size(&mut self, width: u32, height: u32) {
        self.backing = (width, height);
    }

    fn backing_size(&self) -> (u32, u32) {
        self.backing
    }

    fn context(&mut self) -> Option<&mut RecordingContext> {
        self.drawable.then_some(&mut self.context)
    }
}

/// Host double that counts every subscription and frame it hands out.
#[derive(Debug, Default)]
pub(crate) struct FakeHost {
    reduced_motion: bool,
    next_id: u64,
    resize: HashSet<u64>,
    motion: HashSet<u64>,
    pending: HashSet<u64>,
    unsubscribe_calls: usize,
    cancel_calls: usize,
}

impl FakeHost {
    pub fn new(reduced_motion: bool) -> Self {
        Self {
            reduced_motion,
            ..Self::default()
        }
    }

    fn next(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    pub fn pending_frames(&self) -> usize {
        self.pending.len()
    }

    pub fn resize_listeners(&self) -> usize {
        self.resize.len()
    }

    pub fn motion_listeners(&self) -> usize {
        self.motion.len()
    }

    pub fn unsubscribe_calls(&self) -> usize {
        self.unsubscribe_calls
    }

    pub fn cancel_calls(&self) -> usize {
        self.cancel_calls
    }

    /// Fires the oldest pending frame, as the display would.
    pub fn fire(&mut self) -> Option<FrameToken> {
        let id = self.pending.iter().min().copied()?;
        self.pending.remove(&id);
        Some(FrameToken::new(id))
    }
}

impl ResizeEvents for FakeHost {
    fn subscribe_resize(&mut self) -> Subscription {
        let id = self.next();
        self.resize.insert(id);
        Subscription::new(id)
    }

    fn unsubscribe_resize(&mut self, subscription: Subscription) {
        self.unsubscribe_calls += 1;
        self.resize.remove(&subscription.id());
    }
}

impl MotionPreference for FakeHost {
    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    fn subscribe_motion(&mut self) -> Subscription {
        let id = self.next();
        self.motion.insert(id);
        Subscription::new(id)
    }

    fn unsubscribe_motion(&mut self, subscription: Subscription) {
        self.unsubscribe_calls += 1;
        self.motion.remove(&subscription.id());
    }
}

impl FrameScheduler for FakeHost {
    fn request_frame(&mut self) -> FrameToken {
        let id = self.next();
        self.pending.insert(id);
        FrameToken::new(id)
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        self.cancel_calls += 1;
        self.pending.remove(&token.id());
    }
}
