// Painted strokes, in z-order.
// Visual: every path is one blob of ink; later paths are drawn on top.
//
// A path starts Raw (brush-tip positions, still growing) and becomes Baked (a cached
// outline) the first time it is rendered while no painter is drawing into it.

use glam::Vec2;

use crate::palette::Color;
use crate::smooth::smooth;
use crate::stroke::{InputPoint, StrokeOptions, stroke};

/// Smoothing passes applied to every stroke outline to remove faceting.
pub const OUTLINE_SMOOTHING: usize = 3;

/// Stable handle of a path inside one accumulator. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PathId(u64);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Vec2),
    LineTo(Vec2),
}

/// A fillable closed shape as drawing commands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outline {
    pub commands: Vec<PathCommand>,
}

impl Outline {
    /// Outline for a raw centerline: stroke outline, smoothed, seam point dropped.
    pub fn from_points(points: &[Vec2], options: &StrokeOptions) -> Self {
        let input: Vec<InputPoint> = points.iter().copied().map(InputPoint::from).collect();
        let smoothed = smooth(&stroke(&input, options), OUTLINE_SMOOTHING);
        Self::from_polygon(&smoothed)
    }

    /// Move to the first real point and line to the rest. The leading point is the
    /// unsmoothed seam of the closed outline, so it is skipped when there is more.
    pub fn from_polygon(polygon: &[Vec2]) -> Self {
        let body = if polygon.len() > 1 { &polygon[1..] } else { polygon };
        let mut commands = Vec::with_capacity(body.len());
        if let Some((head, tail)) = body.split_first() {
            commands.push(PathCommand::MoveTo(*head));
            commands.extend(tail.iter().map(|p| PathCommand::LineTo(*p)));
        }
        Self { commands }
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PathShape {
    Raw(Vec<Vec2>),
    Baked(Outline),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    id: PathId,
    pub color: Color,
    pub shape: PathShape,
}

impl Path {
    pub fn id(&self) -> PathId {
        self.id
    }

    #[cfg(test)]
    pub fn is_baked(&self) -> bool {
        matches!(self.shape, PathShape::Baked(_))
    }

    /// Raw points, or `None` once baked.
    #[cfg(test)]
    pub fn points(&self) -> Option<&[Vec2]> {
        match &self.shape {
            PathShape::Raw(points) => Some(points),
            PathShape::Baked(_) => None,
        }
    }
}

/// Ordered paths. Append-only apart from `pop` and `clear`.
#[derive(Debug, Default)]
pub struct PathAccumulator {
    paths: Vec<Path>,
    next_id: u64,
}

impl PathAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter()
    }

    #[cfg(test)]
    pub fn last(&self) -> Option<&Path> {
        self.paths.last()
    }

    #[cfg(test)]
    pub fn get(&self, id: PathId) -> Option<&Path> {
        self.paths.iter().rev().find(|p| p.id == id)
    }

    /// Start a new raw path seeded with `start`, on top of everything else.
    pub fn begin(&mut self, color: Color, start: Vec2) -> PathId {
        let id = PathId(self.next_id);
        self.next_id += 1;
        self.paths.push(Path { id, color, shape: PathShape::Raw(vec![start]) });
        id
    }

    /// Append a point to a raw path. Returns false if the path is gone or baked.
    pub fn append(&mut self, id: PathId, point: Vec2) -> bool {
        // The growing path is almost always the last one.
        match self.paths.iter_mut().rev().find(|p| p.id == id) {
            Some(Path { shape: PathShape::Raw(points), .. }) => {
                points.push(point);
                true
            }
            _ => false,
        }
    }

    /// Remove the most recent path (undo last stroke).
    pub fn pop(&mut self) -> Option<Path> {
        self.paths.pop()
    }

    pub fn clear(&mut self) {
        self.paths.clear();
    }

    /// Hand every path's outline and color to `fill`, bottom to top.
    ///
    /// Raw paths are baked and cached on the way, except `live` (the path a painter is
    /// still drawing into), whose outline is rebuilt on every call.
    pub fn render(
        &mut self,
        live: Option<PathId>,
        options: &StrokeOptions,
        mut fill: impl FnMut(&Outline, Color),
    ) {
        for path in &mut self.paths {
            let outline = match &path.shape {
                PathShape::Baked(outline) => {
                    fill(outline, path.color);
                    continue;
                }
                PathShape::Raw(points) => Outline::from_points(points, options),
            };
            fill(&outline, path.color);
            if live != Some(path.id) {
                path.shape = PathShape::Baked(outline);
            }
        }
    }
}
