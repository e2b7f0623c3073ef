// Pressure-aware stroke outlines.
// Visual: a thin centerline of brush-tip positions becomes a closed, variable-width
// ink shape (thinner where the brush moves fast, round caps at the ends).
//
// Two stages:
//   1) `stroke_points` streamlines the raw input and annotates every point with
//      pressure, direction and running length.
//   2) `stroke_outline` walks those points and offsets them left/right by a
//      pressure-driven radius, adding corners and caps, returning one polygon.

use std::f32::consts::PI;

use glam::Vec2;
use serde::{Deserialize, Serialize};

// Slightly more than PI so the half-turn corner/cap arcs overlap their neighbours.
const FIXED_PI: f32 = PI + 0.0001;
const RATE_OF_PRESSURE_CHANGE: f32 = 0.275;
const ARC_STEP: f32 = 1.0 / 13.0;
/// The end cap sweeps three half-turns, so it samples finer.
const END_CAP_STEP: f32 = 1.0 / 29.0;

/// How a stroke end tapers off.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Taper {
    #[default]
    Off,
    /// Taper across the whole stroke (or `size`, whichever is longer).
    Full,
    /// Taper over this many pixels of stroke length.
    Length(f32),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaperOptions {
    /// Round cap when true, flat cap when false. Ignored while tapering.
    pub cap: bool,
    pub taper: Taper,
}

impl Default for TaperOptions {
    fn default() -> Self {
        Self { cap: true, taper: Taper::Off }
    }
}

/// Shape of the brush. Passed through from the painter's roster entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokeOptions {
    /// Base diameter in pixels.
    pub size: f32,
    /// How much pressure affects width, in [-1, 1]. 0 = constant width.
    pub thinning: f32,
    /// Minimum spacing between outline points, as a fraction of `size`.
    pub smoothing: f32,
    /// How far each input point is pulled toward the previous one, in [0, 1].
    pub streamline: f32,
    /// Derive pressure from brush speed instead of using supplied pressure.
    pub simulate_pressure: bool,
    /// The input is complete: keep the exact last point and draw a dot for single points.
    pub last: bool,
    pub start: TaperOptions,
    pub end: TaperOptions,
}

impl Default for StrokeOptions {
    fn default() -> Self {
        Self {
            size: 16.0,
            thinning: 0.5,
            smoothing: 0.5,
            streamline: 0.5,
            simulate_pressure: true,
            last: false,
            start: TaperOptions::default(),
            end: TaperOptions::default(),
        }
    }
}

/// One input sample; `pressure` is `None` for plain mouse positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputPoint {
    pub position: Vec2,
    pub pressure: Option<f32>,
}

impl From<Vec2> for InputPoint {
    fn from(position: Vec2) -> Self {
        Self { position, pressure: None }
    }
}

/// A streamlined, annotated point of the stroke centerline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokePoint {
    pub point: Vec2,
    pub pressure: f32,
    /// Unit vector pointing back toward the previous point.
    pub vector: Vec2,
    pub distance: f32,
    pub running_length: f32,
}

/// Stage 1: streamline the input and annotate it.
pub fn stroke_points(input: &[InputPoint], options: &StrokeOptions) -> Vec<StrokePoint> {
    let t = 0.15 + (1.0 - options.streamline) * 0.85;

    let mut pts: Vec<InputPoint> = input.to_vec();
    match pts.len() {
        0 => return Vec::new(),
        1 => pts.push(InputPoint {
            position: pts[0].position + Vec2::ONE,
            pressure: pts[0].pressure,
        }),
        2 => {
            // Pad short strokes so the streamline has something to chew on.
            let (a, b) = (pts[0], pts[1]);
            pts = vec![a];
            for i in 1..5 {
                pts.push(InputPoint {
                    position: a.position.lerp(b.position, i as f32 / 4.0),
                    pressure: b.pressure,
                });
            }
        }
        _ => {}
    }

    let first = pts[0];
    let mut out = vec![StrokePoint {
        point: first.position,
        pressure: first.pressure.filter(|p| *p >= 0.0).unwrap_or(0.25),
        vector: Vec2::ONE,
        distance: 0.0,
        running_length: 0.0,
    }];

    let max = pts.len() - 1;
    let mut reached_minimum_length = false;
    let mut running_length = 0.0;
    let mut prev = out[0];

    for (i, input) in pts.iter().enumerate().skip(1) {
        let point = if options.last && i == max {
            input.position
        } else {
            prev.point.lerp(input.position, t)
        };
        if point == prev.point {
            continue;
        }

        let distance = point.distance(prev.point);
        running_length += distance;

        // Skip the jittery first few pixels of a stroke.
        if i < max && !reached_minimum_length {
            if running_length < options.size {
                continue;
            }
            reached_minimum_length = true;
        }

        prev = StrokePoint {
            point,
            pressure: input.pressure.filter(|p| *p >= 0.0).unwrap_or(0.5),
            vector: (prev.point - point).normalize_or_zero(),
            distance,
            running_length,
        };
        out.push(prev);
    }

    out[0].vector = out.get(1).map_or(Vec2::ZERO, |p| p.vector);
    out
}

fn stroke_radius(size: f32, thinning: f32, pressure: f32) -> f32 {
    size * (0.5 - thinning * (0.5 - pressure))
}

fn simulated_pressure(prev: f32, distance: f32, size: f32) -> f32 {
    let sp = (distance / size).min(1.0);
    let rp = (1.0 - sp).min(1.0);
    (prev + (rp - prev) * (sp * RATE_OF_PRESSURE_CHANGE)).min(1.0)
}

fn ease_out_quad(t: f32) -> f32 {
    t * (2.0 - t)
}

fn ease_out_cubic(t: f32) -> f32 {
    let t = t - 1.0;
    t * t * t + 1.0
}

/// Perpendicular (rotated a quarter turn clockwise on screen).
fn per(v: Vec2) -> Vec2 {
    Vec2::new(v.y, -v.x)
}

fn rotate_around(point: Vec2, center: Vec2, angle: f32) -> Vec2 {
    let (s, c) = angle.sin_cos();
    let d = point - center;
    Vec2::new(d.x * c - d.y * s, d.x * s + d.y * c) + center
}

fn taper_length(taper: Taper, size: f32, total_length: f32) -> f32 {
    match taper {
        Taper::Off => 0.0,
        Taper::Full => size.max(total_length),
        Taper::Length(len) => len.max(0.0),
    }
}

/// Stage 2: the closed outline polygon for already-annotated points.
pub fn stroke_outline(points: &[StrokePoint], options: &StrokeOptions) -> Vec<Vec2> {
    let size = options.size;
    let thinning = options.thinning;
    if points.is_empty() || size <= 0.0 {
        return Vec::new();
    }

    let len = points.len();
    let total_length = points[len - 1].running_length;
    let taper_start = taper_length(options.start.taper, size, total_length);
    let taper_end = taper_length(options.end.taper, size, total_length);
    let min_distance = (size * options.smoothing).powi(2);

    let mut left: Vec<Vec2> = Vec::new();
    let mut right: Vec<Vec2> = Vec::new();

    // Seed the running pressure from the first few points so strokes don't start blobby.
    let mut prev_pressure = points.iter().take(10).fold(points[0].pressure, |acc, curr| {
        let pressure = if options.simulate_pressure {
            simulated_pressure(acc, curr.distance, size)
        } else {
            curr.pressure
        };
        (acc + pressure) / 2.0
    });

    let mut radius = stroke_radius(size, thinning, points[len - 1].pressure);
    let mut first_radius: Option<f32> = None;
    let mut prev_vector = points[0].vector;
    let mut pl = points[0].point;
    let mut pr = pl;
    let mut tl = pl;
    let mut tr = pr;
    let mut prev_was_sharp = false;

    for (i, sp) in points.iter().enumerate() {
        let StrokePoint { point, vector, running_length, distance, .. } = *sp;
        let mut pressure = sp.pressure;

        // Drop points crowded at the very end; the end cap covers them.
        if i < len - 1 && total_length - running_length < 3.0 {
            continue;
        }

        if thinning != 0.0 {
            if options.simulate_pressure {
                pressure = simulated_pressure(prev_pressure, distance, size);
            }
            radius = stroke_radius(size, thinning, pressure);
        } else {
            radius = size / 2.0;
        }
        if first_radius.is_none() {
            first_radius = Some(radius);
        }

        let ts = if running_length < taper_start {
            ease_out_quad(running_length / taper_start)
        } else {
            1.0
        };
        let te = if total_length - running_length < taper_end {
            ease_out_cubic((total_length - running_length) / taper_end)
        } else {
            1.0
        };
        radius = (radius * ts.min(te)).max(0.01);

        let is_last = i == len - 1;
        let next_vector = if is_last { vector } else { points[i + 1].vector };
        let next_dpr = if is_last { 1.0 } else { vector.dot(next_vector) };
        let prev_dpr = vector.dot(prev_vector);

        let is_sharp = prev_dpr < 0.0 && !prev_was_sharp;
        let next_is_sharp = next_dpr < 0.0;

        if is_sharp || next_is_sharp {
            // Wrap a half-turn around the corner instead of folding the outline.
            let offset = per(prev_vector) * radius;
            let mut t = 0.0;
            while t <= 1.0 {
                tl = rotate_around(point - offset, point, FIXED_PI * t);
                left.push(tl);
                tr = rotate_around(point + offset, point, FIXED_PI * -t);
                right.push(tr);
                t += ARC_STEP;
            }
            pl = tl;
            pr = tr;
            if next_is_sharp {
                prev_was_sharp = true;
            }
            continue;
        }
        prev_was_sharp = false;

        if is_last {
            let offset = per(vector) * radius;
            left.push(point - offset);
            right.push(point + offset);
            continue;
        }

        let offset = per(next_vector.lerp(vector, next_dpr)) * radius;

        tl = point - offset;
        if i <= 1 || pl.distance_squared(tl) > min_distance {
            left.push(tl);
            pl = tl;
        }

        tr = point + offset;
        if i <= 1 || pr.distance_squared(tr) > min_distance {
            right.push(tr);
            pr = tr;
        }

        prev_pressure = pressure;
        prev_vector = vector;
    }

    let first_point = points[0].point;
    let last_point = if len > 1 {
        points[len - 1].point
    } else {
        points[0].point + Vec2::ONE
    };

    let mut start_cap = Vec::new();
    let mut end_cap = Vec::new();

    if len == 1 {
        if (taper_start == 0.0 && taper_end == 0.0) || options.last {
            // A single tap: draw a dot.
            let r = first_radius.unwrap_or(radius);
            let start = first_point + per(first_point - last_point).normalize_or_zero() * -r;
            let mut dot = Vec::new();
            let mut t = ARC_STEP;
            while t <= 1.0 {
                dot.push(rotate_around(start, first_point, FIXED_PI * 2.0 * t));
                t += ARC_STEP;
            }
            return dot;
        }
    } else if !left.is_empty() && !right.is_empty() {
        // A tapered start already narrows to a point and needs no cap.
        if taper_start == 0.0 && options.start.cap {
            let mut t = ARC_STEP;
            while t <= 1.0 {
                start_cap.push(rotate_around(right[0], first_point, FIXED_PI * t));
                t += ARC_STEP;
            }
        } else if taper_start == 0.0 {
            let corners = left[0] - right[0];
            let a = corners * 0.5;
            let b = corners * 0.51;
            start_cap.extend([first_point - a, first_point - b, first_point + b, first_point + a]);
        }

        let direction = per(-points[len - 1].vector);
        if taper_end > 0.0 {
            end_cap.push(last_point);
        } else if options.end.cap {
            let start = last_point + direction * radius;
            let mut t = END_CAP_STEP;
            while t < 1.0 {
                end_cap.push(rotate_around(start, last_point, FIXED_PI * 3.0 * t));
                t += END_CAP_STEP;
            }
        } else {
            end_cap.extend([
                last_point + direction * radius,
                last_point + direction * radius * 0.99,
                last_point - direction * radius * 0.99,
                last_point - direction * radius,
            ]);
        }
    }

    let mut outline = left;
    outline.extend(end_cap);
    outline.extend(right.into_iter().rev());
    outline.extend(start_cap);
    outline
}

/// Both stages in one call.
pub fn stroke(input: &[InputPoint], options: &StrokeOptions) -> Vec<Vec2> {
    stroke_outline(&stroke_points(input, options), options)
}
