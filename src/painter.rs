// The painter: an animated character that chases the mouse and drags a brush.
// Visual: the sprite eases toward (and a bit past) the cursor, leans into its motion,
// bobs gently while idle, and leaves ink behind its brush tip while LMB is held.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::palette::Color;
use crate::paths::{PathAccumulator, PathId};
use crate::smooth::rotate_point;
use crate::stroke::StrokeOptions;

/// Idle fade change per tick.
const IDLE_FADE_STEP: f32 = 0.01;
/// Idle wobble amplitude in pixels.
const IDLE_AMPLITUDE: f32 = 2.0;
/// Ticks per second the frame-rate setting is measured against.
const TICK_RATE: f32 = 60.0;

/// Per-axis pair in roster files, e.g. `{"x": 500, "y": 750}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Axes {
    pub x: f32,
    pub y: f32,
}

impl From<Axes> for Vec2 {
    fn from(a: Axes) -> Self {
        Vec2::new(a.x, a.y)
    }
}

/// One roster entry. Missing fields take the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PainterConfig {
    pub name: String,
    /// Animation frame images, in order.
    pub sources: Vec<String>,
    /// Brush tip position relative to the sprite's top-left, in unscaled pixels (negated).
    pub offset_x: f32,
    pub offset_y: f32,
    /// Rotation anchor as a fraction of the sprite size.
    pub center_x: f32,
    pub center_y: f32,
    pub scale: f32,
    pub speed: f32,
    /// Defaults to `speed`.
    pub max_speed: Option<f32>,
    /// Defaults to 30% of `max_speed`.
    pub min_speed: Option<f32>,
    pub acceleration: f32,
    /// Lean per pixel of velocity.
    pub dr: f32,
    /// Animation frames per second.
    pub frame_rate: f32,
    /// Fraction of the remaining lean applied per tick.
    pub speed_r: f32,
    pub idle_fade_power: f32,
    /// Idle wobble periods in milliseconds (per radian).
    pub idle_frequency: Axes,
    pub stroke: StrokeOptions,
}

impl Default for PainterConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            sources: Vec::new(),
            offset_x: 0.0,
            offset_y: 0.0,
            center_x: 0.5,
            center_y: 0.5,
            scale: 1.0,
            speed: 0.1,
            max_speed: None,
            min_speed: None,
            acceleration: 0.001,
            dr: 0.05,
            frame_rate: 24.0,
            speed_r: 1.0,
            idle_fade_power: 1.0,
            idle_frequency: Axes { x: 500.0, y: 750.0 },
            stroke: StrokeOptions::default(),
        }
    }
}

/// Pointer device state, sampled once per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    /// Last known position. `None` only before the pointer has ever been seen over the
    /// window; leaving the window keeps the last sample.
    pub position: Option<Vec2>,
    pub left: bool,
    pub right: bool,
}

#[derive(Debug, Clone)]
pub struct Painter {
    pub name: String,
    /// Size of every animation frame, in image pixels. Never empty.
    frame_sizes: Vec<Vec2>,
    frame: usize,
    frame_rate: f32,
    /// Tick counter; wraps past 255.
    age: u8,

    pub scale: f32,
    pub center: Vec2,
    pub offset: Vec2,

    pub position: Vec2,
    pub velocity: Vec2,
    pub rotation: f32,
    pub target_rotation: f32,
    pub dr: f32,
    pub speed_r: f32,

    speed: f32,
    min_speed: f32,
    max_speed: f32,
    pub acceleration: f32,

    idle_fade_power: f32,
    pub idle_frequency: Vec2,

    is_painting: bool,
    active_path: Option<PathId>,
    /// How far the brush tip moved during the last tick.
    pub brush_delta: Vec2,

    pub stroke: StrokeOptions,
}

impl Painter {
    /// Build a painter whose frames have the given sizes (one per source image).
    pub fn new(config: &PainterConfig, frame_sizes: Vec<Vec2>) -> Result<Self> {
        if frame_sizes.is_empty() {
            return Err(Error::invalid_painter(format!("{:?} has no animation frames", config.name)));
        }
        if config.frame_rate.is_nan() || config.frame_rate <= 0.0 {
            return Err(Error::invalid_painter(format!(
                "{:?} frame_rate must be positive, got {}",
                config.name, config.frame_rate
            )));
        }
        let max_speed = config.max_speed.unwrap_or(config.speed);
        let min_speed = config.min_speed.unwrap_or(max_speed * 0.3);
        if min_speed > max_speed {
            return Err(Error::invalid_painter(format!(
                "{:?} min_speed {min_speed} exceeds max_speed {max_speed}",
                config.name
            )));
        }

        Ok(Self {
            name: config.name.clone(),
            frame_sizes,
            frame: 0,
            frame_rate: config.frame_rate,
            age: 0,
            scale: config.scale,
            center: Vec2::new(config.center_x, config.center_y),
            offset: Vec2::new(config.offset_x, config.offset_y),
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            rotation: 0.0,
            target_rotation: 0.0,
            dr: config.dr,
            speed_r: config.speed_r,
            speed: config.speed.clamp(min_speed, max_speed),
            min_speed,
            max_speed,
            acceleration: config.acceleration,
            idle_fade_power: config.idle_fade_power.clamp(0.0, 1.0),
            idle_frequency: config.idle_frequency.into(),
            is_painting: false,
            active_path: None,
            brush_delta: Vec2::ZERO,
            stroke: config.stroke,
        })
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    #[cfg(test)]
    pub fn frame_count(&self) -> usize {
        self.frame_sizes.len()
    }

    #[cfg(test)]
    pub fn age(&self) -> u8 {
        self.age
    }

    #[cfg(test)]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    #[cfg(test)]
    pub fn speed_range(&self) -> (f32, f32) {
        (self.min_speed, self.max_speed)
    }

    #[cfg(test)]
    pub fn idle_fade_power(&self) -> f32 {
        self.idle_fade_power
    }

    pub fn is_painting(&self) -> bool {
        self.is_painting
    }

    /// The path this painter is currently drawing into.
    pub fn active_path(&self) -> Option<PathId> {
        self.active_path
    }

    /// On-screen size of the current frame.
    pub fn scaled_size(&self) -> Vec2 {
        self.frame_sizes[self.frame] * self.scale
    }

    /// The rotation anchor in canvas coordinates.
    pub fn pivot(&self) -> Vec2 {
        self.position + self.scaled_size() * self.center
    }

    /// Where ink lands: the offset tip, rotated with the sprite.
    pub fn brush_position(&self) -> Vec2 {
        let tip = self.position - self.offset * self.scale;
        rotate_point(self.pivot(), tip, self.rotation)
    }

    /// End the current stroke, if any. The path itself stays where it is.
    pub fn stop_painting(&mut self) {
        if self.is_painting {
            debug!(painter = %self.name, "stroke ended");
        }
        self.is_painting = false;
        self.active_path = None;
    }

    /// Advance one tick.
    ///
    /// `canvas` is the drawable size, `color` the ink for a stroke started this tick,
    /// `elapsed_ms` the process-wide clock driving idle wobble.
    pub fn update(
        &mut self,
        pointer: &PointerState,
        canvas: Vec2,
        paths: &mut PathAccumulator,
        color: Color,
        elapsed_ms: f64,
    ) {
        // 1) Idle fade: painting calms the wobble, releasing brings it back slowly.
        let step = if self.is_painting { -IDLE_FADE_STEP } else { IDLE_FADE_STEP };
        self.idle_fade_power = (self.idle_fade_power + step).clamp(0.0, 1.0);

        // 2) Animation.
        self.age = self.age.wrapping_add(1);
        let period = (TICK_RATE / self.frame_rate).floor().max(1.0) as u32;
        if u32::from(self.age) % period == 0 {
            self.frame = (self.frame + 1) % self.frame_sizes.len();
        }

        // 3) Speed: hold RMB to slow down (charge), release to speed back up (dash).
        let acceleration = if pointer.right { -self.acceleration } else { self.acceleration };
        self.speed = (self.speed + acceleration).clamp(self.min_speed, self.max_speed);

        // 4) + 5) Start or stop the stroke at the current tip.
        let brush = self.brush_position();
        if pointer.left {
            if !self.is_painting {
                self.is_painting = true;
                self.active_path = Some(paths.begin(color, brush));
                debug!(painter = %self.name, x = brush.x, y = brush.y, "stroke started");
            }
        } else {
            self.stop_painting();
        }

        // 6) + 7) Ease toward a target pushed away from the canvas' far edge.
        if let Some(raw) = pointer.position {
            let target = raw - (canvas - raw) / 3.0;
            self.velocity = (target - self.position) * self.speed;
            self.position += self.velocity;
        }

        // 8) Idle wobble.
        let wave = |period: f32| (elapsed_ms / f64::from(period)).sin() as f32;
        let wobble = Vec2::new(wave(self.idle_frequency.x), wave(self.idle_frequency.y));
        self.position += wobble * IDLE_AMPLITUDE * self.idle_fade_power;

        // 9) Lean into the motion.
        self.target_rotation = self.velocity.x * self.dr - self.velocity.y * self.dr;
        self.rotation += (self.target_rotation - self.rotation) * self.speed_r;

        // 10) + 11) Follow with the brush.
        let new_brush = self.brush_position();
        self.brush_delta = new_brush - brush;
        if self.is_painting
            && let Some(id) = self.active_path
        {
            paths.append(id, new_brush);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANVAS: Vec2 = Vec2::new(200.0, 100.0);

    fn painter(config: PainterConfig) -> Painter {
        Painter::new(&config, vec![Vec2::new(100.0, 80.0), Vec2::new(100.0, 80.0)])
            .expect("valid painter")
    }

    fn steady() -> PainterConfig {
        PainterConfig { speed: 0.1, max_speed: Some(0.1), ..Default::default() }
    }

    fn at(x: f32, y: f32, left: bool, right: bool) -> PointerState {
        PointerState { position: Some(Vec2::new(x, y)), left, right }
    }

    #[test]
    fn eases_toward_the_pointer() {
        let mut p = painter(steady());
        p.position = Vec2::new(100.0, 100.0);
        let mut paths = PathAccumulator::new();
        // At the canvas' far corner the overshoot offset is zero.
        p.update(&at(200.0, 100.0, false, false), CANVAS, &mut paths, Color::WHITE, 0.0);
        assert!((p.velocity.x - 10.0).abs() < 1e-4, "{:?}", p.velocity);
        assert!((p.position.x - 110.0).abs() < 1e-4, "{:?}", p.position);
        assert_eq!(p.velocity.y, 0.0);
        assert_eq!(p.position.y, 100.0);
    }

    #[test]
    fn target_overshoots_away_from_far_edge() {
        let mut p = painter(PainterConfig { speed: 1.0, ..Default::default() });
        let mut paths = PathAccumulator::new();
        p.update(&at(50.0, 40.0, false, false), CANVAS, &mut paths, Color::WHITE, 0.0);
        // speed 1 jumps straight to the target: raw - (canvas - raw) / 3
        assert!((p.position - Vec2::new(0.0, 20.0)).length() < 1e-4, "{:?}", p.position);
    }

    #[test]
    fn unknown_pointer_skips_integration() {
        let mut p = painter(steady());
        p.position = Vec2::new(30.0, 40.0);
        p.velocity = Vec2::new(1.5, -2.0);
        let mut paths = PathAccumulator::new();
        p.update(&PointerState::default(), CANVAS, &mut paths, Color::WHITE, 0.0);
        assert_eq!(p.position, Vec2::new(30.0, 40.0));
        assert_eq!(p.velocity, Vec2::new(1.5, -2.0));
    }

    #[test]
    fn speed_stays_in_range() {
        let mut p = painter(PainterConfig {
            speed: 0.1,
            min_speed: Some(0.035),
            max_speed: Some(0.2),
            acceleration: 0.01,
            ..Default::default()
        });
        let mut paths = PathAccumulator::new();
        for i in 0..500 {
            let right = (i / 17) % 3 != 0;
            p.update(&at(120.0, 60.0, false, right), CANVAS, &mut paths, Color::WHITE, 0.0);
            let (min, max) = p.speed_range();
            assert!(p.speed() >= min && p.speed() <= max, "tick {i}: {}", p.speed());
        }
    }

    #[test]
    fn right_button_decelerates() {
        let mut p = painter(PainterConfig {
            speed: 0.1,
            min_speed: Some(0.01),
            max_speed: Some(0.2),
            acceleration: 0.01,
            ..Default::default()
        });
        let mut paths = PathAccumulator::new();
        p.update(&at(0.0, 0.0, false, true), CANVAS, &mut paths, Color::WHITE, 0.0);
        assert!((p.speed() - 0.09).abs() < 1e-6);
        p.update(&at(0.0, 0.0, false, false), CANVAS, &mut paths, Color::WHITE, 0.0);
        p.update(&at(0.0, 0.0, false, false), CANVAS, &mut paths, Color::WHITE, 0.0);
        assert!((p.speed() - 0.11).abs() < 1e-6);
    }

    #[test]
    fn frame_and_age_wrap() {
        // 24 fps against 60 ticks/s: a new frame every 2 ticks.
        let mut p = painter(PainterConfig::default());
        let mut paths = PathAccumulator::new();
        let pointer = PointerState::default();
        p.update(&pointer, CANVAS, &mut paths, Color::WHITE, 0.0);
        assert_eq!(p.frame(), 0);
        p.update(&pointer, CANVAS, &mut paths, Color::WHITE, 0.0);
        assert_eq!(p.frame(), 1);
        p.update(&pointer, CANVAS, &mut paths, Color::WHITE, 0.0);
        p.update(&pointer, CANVAS, &mut paths, Color::WHITE, 0.0);
        assert_eq!(p.frame(), 0);

        for _ in 0..1000 {
            p.update(&pointer, CANVAS, &mut paths, Color::WHITE, 0.0);
            assert!(p.frame() < p.frame_count());
        }
        // 1004 ticks: 1004 mod 256
        assert_eq!(p.age(), (1004 % 256) as u8);
    }

    #[test]
    fn idle_fade_power_stays_in_unit_range() {
        let mut p = painter(PainterConfig::default());
        let mut paths = PathAccumulator::new();
        for i in 0..400 {
            let left = i < 350;
            p.update(&at(60.0, 60.0, left, false), CANVAS, &mut paths, Color::WHITE, i as f64 * 16.0);
            let fade = p.idle_fade_power();
            assert!((0.0..=1.0).contains(&fade), "tick {i}: {fade}");
        }
        // Painting drained it; the last 49 idle ticks refill it part way.
        assert!(p.idle_fade_power() > 0.0 && p.idle_fade_power() < 1.0);
    }

    #[test]
    fn wobble_follows_the_clock_and_fade() {
        let mut p = painter(PainterConfig::default());
        let mut paths = PathAccumulator::new();
        let quarter_x = std::f64::consts::FRAC_PI_2 * 500.0;
        p.update(&PointerState::default(), CANVAS, &mut paths, Color::WHITE, quarter_x);
        // sin(pi/2) = 1 on x at full fade.
        assert!((p.position.x - 2.0).abs() < 1e-3, "{:?}", p.position);

        let mut calm = painter(PainterConfig { idle_fade_power: 0.0, ..Default::default() });
        calm.is_painting = true;
        calm.update(&PointerState::default(), CANVAS, &mut paths, Color::WHITE, quarter_x);
        assert_eq!(calm.position, Vec2::ZERO);
    }

    #[test]
    fn leans_into_motion() {
        let mut p = painter(PainterConfig { speed_r: 1.0, dr: 0.05, ..steady() });
        let mut paths = PathAccumulator::new();
        p.update(&at(200.0, 100.0, false, false), CANVAS, &mut paths, Color::WHITE, 0.0);
        let expected = p.velocity.x * 0.05 - p.velocity.y * 0.05;
        assert!(expected > 0.0);
        assert!((p.rotation - expected).abs() < 1e-6);
        assert_eq!(p.target_rotation, p.rotation);
    }

    #[test]
    fn brush_tip_follows_offset_and_rotation() {
        let mut p = painter(PainterConfig {
            scale: 0.5,
            offset_x: -20.0,
            offset_y: -40.0,
            ..Default::default()
        });
        p.position = Vec2::new(10.0, 10.0);
        assert_eq!(p.brush_position(), Vec2::new(20.0, 30.0));

        // Half a turn about the pivot mirrors the tip through it.
        p.rotation = std::f32::consts::PI;
        let pivot = p.pivot();
        let mirrored = pivot * 2.0 - Vec2::new(20.0, 30.0);
        assert!((p.brush_position() - mirrored).length() < 1e-3);
    }

    #[test]
    fn pressing_starts_exactly_one_path() {
        let mut p = painter(steady());
        p.position = Vec2::new(50.0, 50.0);
        let mut paths = PathAccumulator::new();
        let tip = p.brush_position();

        p.update(&at(150.0, 80.0, true, false), CANVAS, &mut paths, Color::RED, 0.0);
        assert!(p.is_painting());
        assert_eq!(paths.len(), 1);
        let path = paths.last().expect("new path");
        assert_eq!(Some(path.id()), p.active_path());
        assert_eq!(path.color, Color::RED);
        let points = path.points().expect("still raw");
        // Seeded with the tip before the move, then followed to the new tip.
        assert_eq!(points[0], tip);
        assert_eq!(points.len(), 2);
        assert_eq!(points[1], p.brush_position());

        // Holding keeps growing the same path; color changes only apply to new strokes.
        p.update(&at(150.0, 80.0, true, false), CANVAS, &mut paths, Color::BLUE, 0.0);
        assert_eq!(paths.len(), 1);
        assert_eq!(paths.last().and_then(|p| p.points()).map(<[Vec2]>::len), Some(3));
    }

    #[test]
    fn releasing_stops_appending_but_keeps_the_path() {
        let mut p = painter(steady());
        let mut paths = PathAccumulator::new();
        p.update(&at(150.0, 80.0, true, false), CANVAS, &mut paths, Color::RED, 0.0);
        p.update(&at(150.0, 80.0, false, false), CANVAS, &mut paths, Color::RED, 0.0);
        assert!(!p.is_painting());
        assert_eq!(p.active_path(), None);
        p.update(&at(10.0, 10.0, false, false), CANVAS, &mut paths, Color::RED, 0.0);
        assert_eq!(paths.len(), 1);
        assert_eq!(paths.last().and_then(|p| p.points()).map(<[Vec2]>::len), Some(2));
    }

    #[test]
    fn config_defaults_and_validation() {
        let p = painter(PainterConfig { speed: 0.2, ..Default::default() });
        let (min, max) = p.speed_range();
        assert!((max - 0.2).abs() < 1e-6);
        assert!((min - 0.06).abs() < 1e-6);

        assert!(Painter::new(&PainterConfig::default(), Vec::new()).is_err());
        let bad_range = PainterConfig { min_speed: Some(0.5), max_speed: Some(0.1), ..Default::default() };
        assert!(Painter::new(&bad_range, vec![Vec2::ONE]).is_err());
        let bad_rate = PainterConfig { frame_rate: 0.0, ..Default::default() };
        assert!(Painter::new(&bad_rate, vec![Vec2::ONE]).is_err());
    }
}
