// Geometry helpers shared by the motion model and the stroke pipeline.
// Visual: `smooth` is what turns a faceted brush outline into a soft ink blob.

use glam::Vec2;

/// Rotate `point` about `center` by `-angle` radians.
///
/// The negated angle matches the sprite rotation convention: a painter leaning by `r`
/// is drawn rotated by `r`, and its brush tip is found by rotating back the other way.
pub fn rotate_point(center: Vec2, point: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = (-angle).sin_cos();
    let d = point - center;
    Vec2::new(
        cos * d.x + sin * d.y + center.x,
        cos * d.y - sin * d.x + center.y,
    )
}

/// Corner-cut a polyline `iterations` times.
///
/// Each pass keeps the first point, then replaces every following point with three
/// points blended from (previous, point, next) with weights (3,2,1)/6, (1,1,1)/3 and
/// (1,2,3)/6. A missing `next` (last point) is replaced by the point itself, so the
/// end of the polyline is never pulled inward. `iterations == 0` is the identity.
pub fn smooth(polyline: &[Vec2], iterations: usize) -> Vec<Vec2> {
    let mut current = polyline.to_vec();
    for _ in 0..iterations {
        current = smooth_once(&current);
    }
    current
}

fn smooth_once(points: &[Vec2]) -> Vec<Vec2> {
    let Some(&head) = points.first() else {
        return Vec::new();
    };

    let mut out = Vec::with_capacity(1 + 3 * (points.len() - 1));
    out.push(head);
    for i in 1..points.len() {
        let prev = points[i - 1];
        let point = points[i];
        let next = points.get(i + 1).copied().unwrap_or(point);

        out.push((prev * 3.0 + point * 2.0 + next) / 6.0);
        out.push((prev + point + next) / 3.0);
        out.push((prev + point * 2.0 + next * 3.0) / 6.0);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-4
    }

    fn zigzag() -> Vec<Vec2> {
        vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 5.0),
            Vec2::new(20.0, -5.0),
            Vec2::new(30.0, 5.0),
            Vec2::new(40.0, 0.0),
        ]
    }

    #[test]
    fn rotation_uses_negated_angle() {
        // +90° moves +x to +y, matching the sprite's rotation with y pointing down.
        let p = rotate_point(Vec2::ZERO, Vec2::new(1.0, 0.0), FRAC_PI_2);
        assert!(close(p, Vec2::new(0.0, 1.0)), "{p:?}");
    }

    #[test]
    fn rotation_about_offset_center() {
        let c = Vec2::new(5.0, 5.0);
        let p = rotate_point(c, Vec2::new(6.0, 5.0), PI);
        assert!(close(p, Vec2::new(4.0, 5.0)), "{p:?}");
        assert!(close(rotate_point(c, Vec2::new(1.0, 2.0), 0.0), Vec2::new(1.0, 2.0)));
    }

    #[test]
    fn zero_iterations_is_identity() {
        let path = zigzag();
        assert_eq!(smooth(&path, 0), path);
    }

    #[test]
    fn first_point_is_preserved() {
        let path = zigzag();
        for k in 0..4 {
            assert_eq!(smooth(&path, k)[0], path[0]);
        }
    }

    #[test]
    fn one_pass_weights() {
        let path = vec![Vec2::new(0.0, 0.0), Vec2::new(6.0, 0.0), Vec2::new(12.0, 6.0)];
        let out = smooth(&path, 1);
        assert_eq!(out.len(), 7);
        // Interior point 1: prev=(0,0) point=(6,0) next=(12,6)
        assert!(close(out[1], Vec2::new(4.0, 1.0)));
        assert!(close(out[2], Vec2::new(6.0, 2.0)));
        assert!(close(out[3], Vec2::new(8.0, 3.0)));
        // Last point: next is itself, the final emitted point stays near the end.
        assert!(close(out[6], Vec2::new(11.0, 5.0)));
    }

    #[test]
    fn passes_compose() {
        let path = zigzag();
        assert_eq!(smooth(&smooth(&path, 1), 2), smooth(&path, 3));
        assert_eq!(smooth(&smooth(&path, 2), 1), smooth(&path, 3));
    }

    #[test]
    fn output_grows_threefold_and_input_is_untouched() {
        let path = zigzag();
        let copy = path.clone();
        let out = smooth(&path, 2);
        assert_eq!(out.len(), 1 + 3 * (1 + 3 * 4 - 1));
        assert_eq!(path, copy);
    }

    #[test]
    fn degenerate_inputs() {
        assert!(smooth(&[], 3).is_empty());
        let one = [Vec2::new(3.0, 4.0)];
        assert_eq!(smooth(&one, 3), one.to_vec());
    }
}
