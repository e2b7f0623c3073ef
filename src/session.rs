// Everything the keyboard and mouse act on: the roster, who is active, the current
// ink color, and the painted paths.
// Visual: one painter on screen at a time, drawing in the selected color over all
// earlier strokes.

use glam::Vec2;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::palette::{Color, PALETTE};
use crate::painter::{Painter, PointerState};
use crate::paths::{Outline, PathAccumulator};

/// Keyboard actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Undo the last stroke (`x`).
    PopLast,
    /// Wipe the canvas (`r`, `c`).
    ClearAll,
    /// Pick ink by palette index (`1`..`9` → 0..8, `0` → 9).
    SelectColor(usize),
    /// Next character, wrapping (`Tab`).
    CycleCharacter,
}

pub struct Session {
    painters: Vec<Painter>,
    active: usize,
    color: Color,
    paths: PathAccumulator,
}

impl Session {
    pub fn new(painters: Vec<Painter>) -> Result<Self> {
        if painters.is_empty() {
            return Err(Error::invalid_painter("roster is empty"));
        }
        Ok(Self {
            painters,
            active: 0,
            color: PALETTE[0],
            paths: PathAccumulator::new(),
        })
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn painter(&self) -> &Painter {
        &self.painters[self.active]
    }

    pub fn painter_mut(&mut self) -> &mut Painter {
        &mut self.painters[self.active]
    }

    #[cfg(test)]
    pub fn painters(&self) -> &[Painter] {
        &self.painters
    }

    #[cfg(test)]
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn paths(&self) -> &PathAccumulator {
        &self.paths
    }

    pub fn apply(&mut self, command: Command) {
        debug!(?command, "key command");
        match command {
            Command::PopLast => self.pop_last(),
            Command::ClearAll => {
                self.paths.clear();
                self.painter_mut().stop_painting();
            }
            Command::SelectColor(index) => {
                if let Some(&color) = PALETTE.get(index) {
                    self.color = color;
                }
            }
            Command::CycleCharacter => {
                // The outgoing painter's stroke ends; the newcomer starts fresh.
                self.painter_mut().stop_painting();
                self.active = (self.active + 1) % self.painters.len();
                info!(painter = %self.painter().name, "switched character");
            }
        }
    }

    fn pop_last(&mut self) {
        let Some(popped) = self.paths.pop() else {
            return;
        };
        let painter = self.painter_mut();
        if painter.active_path() == Some(popped.id()) {
            painter.stop_painting();
        }
    }

    /// Update the active painter for one frame.
    pub fn tick(&mut self, pointer: &PointerState, canvas: Vec2, elapsed_ms: f64) {
        let color = self.color;
        let painter = &mut self.painters[self.active];
        painter.update(pointer, canvas, &mut self.paths, color, elapsed_ms);
    }

    /// Fill every path, oldest first. The active painter's growing path stays raw.
    pub fn render_paths(&mut self, fill: impl FnMut(&Outline, Color)) {
        let painter = &self.painters[self.active];
        let live = painter.active_path().filter(|_| painter.is_painting());
        self.paths.render(live, &painter.stroke, fill);
    }
}
