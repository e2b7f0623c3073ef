// Window + software drawing utilities.
// Visual effects provided here:
// 1) A window showing the canvas, with the system cursor hidden (the painter is the cursor).
// 2) Solid ink: stroke outlines filled with their color.
// 3) The painter sprite, rotated about its anchor and alpha-blended over the ink.

use glam::Vec2;
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

use crate::assets::Sprite;
use crate::error::Error;
use crate::painter::{Painter, PointerState};
use crate::palette::Color;
use crate::paths::{Outline, PathCommand};
use crate::session::Command;
use crate::types::FrameBuffer;

pub struct Drawer {
    window: Window, // the on-screen window you see
    last_position: Option<Vec2>, // where the mouse was last seen inside the window
}

impl Drawer {
    /// Create a window of the canvas size.
    /// Visual: a new empty window appears with your chosen title and no cursor.
    pub fn new(title: &str, width: usize, height: usize, fps: usize) -> Result<Self, Error> {
        let mut window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(fps);
        window.set_cursor_visibility(false);
        Ok(Self { window, last_position: None })
    }

    /// Push the pixels for this frame to the screen.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// True while ESC is held down (we'll exit when this is pressed).
    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Mouse state for this tick.
    /// Visual: when the mouse leaves the window the painter keeps heading for where it
    /// was last seen instead of freezing.
    pub fn pointer(&mut self) -> PointerState {
        let sampled = self
            .window
            .get_mouse_pos(MouseMode::Discard)
            .map(|(x, y)| Vec2::new(x, y));
        self.last_position = remember_position(self.last_position, sampled);
        PointerState {
            position: self.last_position,
            left: self.window.get_mouse_down(MouseButton::Left),
            right: self.window.get_mouse_down(MouseButton::Right),
        }
    }

    /// Key presses since the last frame, as commands (held keys don't repeat).
    pub fn commands(&self) -> Vec<Command> {
        self.window
            .get_keys_pressed(KeyRepeat::No)
            .into_iter()
            .filter_map(command_for_key)
            .collect()
    }
}

/// A fresh sample wins; otherwise keep the last known position.
fn remember_position(last: Option<Vec2>, sampled: Option<Vec2>) -> Option<Vec2> {
    sampled.or(last)
}

/// The keyboard table.
pub fn command_for_key(key: Key) -> Option<Command> {
    let command = match key {
        Key::X => Command::PopLast,
        Key::R | Key::C => Command::ClearAll,
        Key::Key1 => Command::SelectColor(0),
        Key::Key2 => Command::SelectColor(1),
        Key::Key3 => Command::SelectColor(2),
        Key::Key4 => Command::SelectColor(3),
        Key::Key5 => Command::SelectColor(4),
        Key::Key6 => Command::SelectColor(5),
        Key::Key7 => Command::SelectColor(6),
        Key::Key8 => Command::SelectColor(7),
        Key::Key9 => Command::SelectColor(8),
        Key::Key0 => Command::SelectColor(9),
        Key::Tab => Command::CycleCharacter,
        _ => return None,
    };
    Some(command)
}

/* ---------- Software drawing: pixels, filled outlines, sprites ---------- */

/// Alpha-blend `argb` over the pixel at (x, y) if it is inside bounds.
/// Visual: opaque sprite pixels replace the ink below, soft edges mix with it.
#[inline]
fn blend_pixel(fb: &mut FrameBuffer, x: i32, y: i32, argb: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let a = argb >> 24;
    if a == 0 {
        return;
    }
    let idx = y * fb.width + x;
    if a == 0xFF {
        fb.pixels[idx] = argb & 0x00FF_FFFF;
        return;
    }
    let dst = fb.pixels[idx];
    let mix = |shift: u32| {
        let s = (argb >> shift) & 0xFF;
        let d = (dst >> shift) & 0xFF;
        ((s * a + d * (255 - a) + 127) / 255) << shift
    };
    fb.pixels[idx] = mix(16) | mix(8) | mix(0);
}

/// Fill a closed outline with the non-zero winding rule (every subpath is closed).
/// Visual: the stroke appears as one solid blob of ink, overlaps included.
pub fn fill_outline(fb: &mut FrameBuffer, outline: &Outline, color: Color) {
    if outline.is_empty() {
        return;
    }

    // 1) Flatten the commands into closed edges.
    let mut edges: Vec<(Vec2, Vec2)> = Vec::with_capacity(outline.commands.len());
    let mut start: Option<Vec2> = None;
    let mut cursor = Vec2::ZERO;
    for command in &outline.commands {
        match *command {
            PathCommand::MoveTo(p) => {
                if let Some(s) = start {
                    edges.push((cursor, s));
                }
                start = Some(p);
                cursor = p;
            }
            PathCommand::LineTo(p) => {
                edges.push((cursor, p));
                cursor = p;
            }
        }
    }
    if let Some(s) = start {
        edges.push((cursor, s));
    }
    edges.retain(|(a, b)| a.y != b.y && a.is_finite() && b.is_finite());
    if edges.is_empty() {
        return;
    }

    // 2) Only scan the rows the shape covers.
    let (min_y, max_y) = edges
        .iter()
        .fold((f32::MAX, f32::MIN), |(lo, hi), (a, b)| (lo.min(a.y.min(b.y)), hi.max(a.y.max(b.y))));
    let y0 = (min_y.floor().max(0.0)) as usize;
    let y1 = (max_y.ceil().min(fb.height as f32)) as usize;

    // 3) Per row, sample at pixel centers and fill where the winding is non-zero.
    let mut crossings: Vec<(f32, i32)> = Vec::new();
    for y in y0..y1 {
        let sy = y as f32 + 0.5;
        crossings.clear();
        for &(a, b) in &edges {
            let winding = if a.y <= sy && b.y > sy {
                1
            } else if b.y <= sy && a.y > sy {
                -1
            } else {
                continue;
            };
            let x = a.x + (sy - a.y) * (b.x - a.x) / (b.y - a.y);
            crossings.push((x, winding));
        }
        crossings.sort_by(|l, r| l.0.total_cmp(&r.0));

        let mut winding = 0;
        for pair in crossings.windows(2) {
            winding += pair[0].1;
            if winding == 0 {
                continue;
            }
            // Pixels whose centers lie in [left, right).
            let left = (pair[0].0 - 0.5).ceil().max(0.0);
            let right = (pair[1].0 - 0.5).ceil().min(fb.width as f32);
            if right <= left {
                continue;
            }
            let row = y * fb.width;
            fb.pixels[row + left as usize..row + right as usize].fill(color.0);
        }
    }
}

/// Draw the painter's current frame: scaled, rotated by its lean about its anchor.
/// Visual: the character, tilted into its motion, on top of the ink.
pub fn draw_sprite(fb: &mut FrameBuffer, sprite: &Sprite, painter: &Painter) {
    let size = sprite.size() * painter.scale;
    if size.x <= 0.0 || size.y <= 0.0 {
        return;
    }
    let anchor = size * painter.center;
    let pivot = painter.position + anchor;
    let (sin, cos) = painter.rotation.sin_cos();

    // Screen-space bounding box of the rotated sprite.
    let corners = [Vec2::ZERO, Vec2::new(size.x, 0.0), size, Vec2::new(0.0, size.y)].map(|c| {
        let l = c - anchor;
        pivot + Vec2::new(l.x * cos - l.y * sin, l.x * sin + l.y * cos)
    });
    let lo = corners.iter().fold(Vec2::splat(f32::MAX), |m, c| m.min(*c)).floor().max(Vec2::ZERO);
    let hi = corners
        .iter()
        .fold(Vec2::splat(f32::MIN), |m, c| m.max(*c))
        .ceil()
        .min(Vec2::new(fb.width as f32, fb.height as f32));

    // Map every covered screen pixel back into the image (nearest sample).
    let texel = sprite.size() / size;
    for y in lo.y as i32..hi.y as i32 {
        for x in lo.x as i32..hi.x as i32 {
            let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - pivot;
            let local = Vec2::new(d.x * cos + d.y * sin, -d.x * sin + d.y * cos) + anchor;
            if local.x < 0.0 || local.y < 0.0 || local.x >= size.x || local.y >= size.y {
                continue;
            }
            let u = ((local.x * texel.x) as usize).min(sprite.width - 1);
            let v = ((local.y * texel.y) as usize).min(sprite.height - 1);
            blend_pixel(fb, x, y, sprite.pixel(u, v));
        }
    }
}
