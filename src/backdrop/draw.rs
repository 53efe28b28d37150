//! Per-variant draw styles, plugged into [`VariantConfig::draw`](super::variant::VariantConfig).

use super::{
    env::{ColorStop, DrawContext, Glow, Point, Rgba},
    field::Particle,
};

pub const HAIL_COLOR: Rgba = Rgba::opaque(255, 255, 255);
pub const RAIN_COLOR: Rgba = Rgba::opaque(200, 220, 255);
pub const SNOW_CORE_COLOR: Rgba = Rgba::opaque(255, 0, 0);
pub const SNOW_HALO_COLOR: Rgba = Rgba::opaque(255, 100, 100);

const HAIL_GLOW_BLUR: f32 = 3.0;

/// Unit vector along the direction of travel.
fn heading(particle: &Particle) -> (f32, f32) {
    let angle = particle.speed.atan2(particle.drift);
    (angle.cos(), angle.sin())
}

/// Fading streak trailing behind a bright pellet.
pub fn draw_hailstone(particle: &Particle, ctx: &mut dyn DrawContext) {
    let (dx, dy) = heading(particle);
    let head = Point::new(particle.x, particle.y);
    let tail = Point::new(
        particle.x - dx * particle.accent,
        particle.y - dy * particle.accent,
    );
    let stops = [
        ColorStop::new(0.0, HAIL_COLOR.with_alpha(particle.opacity)),
        ColorStop::new(1.0, HAIL_COLOR.with_alpha(0.0)),
    ];
    ctx.stroke_gradient_line(head, tail, particle.size * 0.6, &stops);

    ctx.fill_disc(
        head,
        particle.size,
        HAIL_COLOR.with_alpha(particle.opacity),
        Some(Glow {
            blur: HAIL_GLOW_BLUR,
            color: HAIL_COLOR.with_alpha(particle.opacity * 0.6),
        }),
    );
}

/// Thin blue-tinted streak fading toward its leading end.
pub fn draw_raindrop(particle: &Particle, ctx: &mut dyn DrawContext) {
    let (dx, dy) = heading(particle);
    let start = Point::new(particle.x, particle.y);
    let end = Point::new(
        particle.x + dx * particle.size,
        particle.y + dy * particle.size,
    );
    let stops = [
        ColorStop::new(0.0, RAIN_COLOR.with_alpha(particle.opacity)),
        ColorStop::new(0.7, RAIN_COLOR.with_alpha(particle.opacity * 0.6)),
        ColorStop::new(1.0, RAIN_COLOR.with_alpha(0.0)),
    ];
    ctx.stroke_gradient_line(start, end, particle.accent, &stops);
}

/// Soft red glow, twice the flake radius across.
pub fn draw_snowflake(particle: &Particle, ctx: &mut dyn DrawContext) {
    let stops = [
        ColorStop::new(0.0, SNOW_CORE_COLOR.with_alpha(particle.opacity)),
        ColorStop::new(0.5, SNOW_HALO_COLOR.with_alpha(particle.opacity * 0.6)),
        ColorStop::new(1.0, SNOW_HALO_COLOR.with_alpha(0.0)),
    ];
    ctx.fill_radial_disc(
        Point::new(particle.x, particle.y),
        particle.size * 2.0,
        &stops,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{DrawOp, RecordingContext};

    fn particle(speed: f32, drift: f32, size: f32, accent: f32) -> Particle {
        Particle {
            x: 100.0,
            y: 50.0,
            speed,
            drift,
            size,
            opacity: 0.8,
            accent,
        }
    }

    #[test]
    fn hailstone_draws_streak_then_glowing_pellet() {
        let mut ctx = RecordingContext::default();
        draw_hailstone(&particle(4.0, 0.0, 2.0, 10.0), &mut ctx);

        assert_eq!(ctx.ops.len(), 2);
        let DrawOp::Line { from, to, width, stops } = &ctx.ops[0] else {
            panic!("expected streak first, got {:?}", ctx.ops[0]);
        };
        assert_eq!(*from, Point::new(100.0, 50.0));
        assert!((to.x - 100.0).abs() < 1e-4);
        assert!((to.y - 40.0).abs() < 1e-4, "streak trails upward");
        assert!((width - 1.2).abs() < 1e-6);
        assert!((stops[0].color.a - 0.8).abs() < f32::EPSILON);
        assert!(stops[1].color.a.abs() < f32::EPSILON);

        let DrawOp::Disc { radius, glow, .. } = &ctx.ops[1] else {
            panic!("expected pellet second, got {:?}", ctx.ops[1]);
        };
        assert!((radius - 2.0).abs() < f32::EPSILON);
        let glow = glow.expect("pellet glows");
        assert!((glow.color.a - 0.48).abs() < 1e-6);
    }

    #[test]
    fn raindrop_streak_leads_forward_without_pellet() {
        let mut ctx = RecordingContext::default();
        draw_raindrop(&particle(5.0, 0.0, 20.0, 1.1), &mut ctx);

        assert_eq!(ctx.ops.len(), 1);
        let DrawOp::Line { to, width, stops, .. } = &ctx.ops[0] else {
            panic!("expected a streak, got {:?}", ctx.ops[0]);
        };
        assert!((to.y - 70.0).abs() < 1e-4);
        assert!((width - 1.1).abs() < f32::EPSILON);
        assert_eq!(stops.len(), 3);
        assert_eq!(stops[0].color.b, 255);
        assert!((stops[1].color.a - 0.48).abs() < 1e-6);
    }

    #[test]
    fn drifting_streak_leans_with_the_wind() {
        let mut ctx = RecordingContext::default();
        draw_raindrop(&particle(3.0, 3.0, 10.0, 1.0), &mut ctx);
        let DrawOp::Line { to, .. } = &ctx.ops[0] else {
            panic!("expected a streak");
        };
        assert!(to.x > 100.0);
        assert!(to.y > 50.0);
    }

    #[test]
    fn snowflake_is_a_single_radial_glow() {
        let mut ctx = RecordingContext::default();
        draw_snowflake(&particle(0.5, 0.1, 3.0, 0.0), &mut ctx);

        assert_eq!(ctx.ops.len(), 1);
        let DrawOp::RadialDisc { radius, stops, .. } = &ctx.ops[0] else {
            panic!("expected a radial disc, got {:?}", ctx.ops[0]);
        };
        assert!((radius - 6.0).abs() < f32::EPSILON);
        assert_eq!((stops[0].color.r, stops[0].color.g), (255, 0));
        assert!(stops[2].color.a.abs() < f32::EPSILON);
    }
}
