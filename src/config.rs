// The character roster: which painters exist and how each one moves and paints.
// Visual: Tab cycles through these in order.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::painter::PainterConfig;
use crate::stroke::StrokeOptions;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterConfig {
    pub painters: Vec<PainterConfig>,
}

impl RosterConfig {
    /// Read a roster from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
        Self::from_json(&text).map_err(|err| match err {
            ParseError::Json(source) => Error::Config { path: path.to_path_buf(), source },
            ParseError::Empty => Error::invalid_painter(format!("{} lists no painters", path.display())),
        })
    }

    fn from_json(text: &str) -> std::result::Result<Self, ParseError> {
        let roster: Self = serde_json::from_str(text).map_err(ParseError::Json)?;
        if roster.painters.is_empty() {
            return Err(ParseError::Empty);
        }
        Ok(roster)
    }

    /// The two stock characters: a bird with a two-frame flap and a toad.
    pub fn builtin() -> Self {
        let stroke = StrokeOptions {
            smoothing: 1.0,
            streamline: 0.6,
            thinning: 0.5,
            last: true,
            ..Default::default()
        };

        let berd = PainterConfig {
            name: "berd".into(),
            sources: vec!["images/berd0.png".into(), "images/berd1.png".into()],
            scale: 0.5,
            center_x: 0.55,
            center_y: 0.35,
            offset_x: -25.0,
            offset_y: -107.5,
            speed: 0.1,
            min_speed: Some(0.035),
            max_speed: Some(0.2),
            dr: 0.05,
            speed_r: 0.1,
            acceleration: 0.0002,
            stroke,
            ..Default::default()
        };

        let tode = PainterConfig {
            name: "tode".into(),
            sources: vec!["images/tode.png".into()],
            scale: 0.5,
            center_x: 0.55,
            center_y: 0.35,
            offset_x: 0.0,
            offset_y: -70.0,
            speed: 0.09,
            min_speed: Some(0.01),
            max_speed: Some(0.15),
            dr: 0.05,
            speed_r: 0.05,
            acceleration: 0.00001,
            stroke,
            ..Default::default()
        };

        Self { painters: vec![berd, tode] }
    }
}

#[derive(Debug)]
enum ParseError {
    Json(serde_json::Error),
    Empty,
}
