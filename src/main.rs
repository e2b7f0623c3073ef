// What you SEE:
// • A character follows your mouse (overshooting a little), leaning into its motion
//   and bobbing gently while idle.
// • Hold Left Mouse: it paints smooth ink strokes with its brush tip.
// • Hold Right Mouse: it slows down ("charge"); release to dash again.
// • X undoes the last stroke, R or C clears, 1..0 pick colors, Tab switches character.
// • ESC quits.

mod assets;
mod config;
mod draw;
mod error;
mod painter;
mod palette;
mod paths;
mod session;
mod smooth;
mod stroke;
mod types;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use glam::Vec2;
use tracing::{debug, info};

use config::RosterConfig;
use draw::{Drawer, draw_sprite, fill_outline};
use error::Error;
use painter::Painter;
use session::Session;
use types::FrameBuffer;

#[derive(Parser, Debug)]
#[command(name = "inkling", version, about = "A mouse-following character that paints smooth ink strokes")]
struct Cli {
    /// Canvas width in pixels.
    #[arg(long, default_value_t = 1280)]
    width: usize,

    /// Canvas height in pixels.
    #[arg(long, default_value_t = 720)]
    height: usize,

    /// Target frames per second (the motion model assumes 60).
    #[arg(long, default_value_t = 60)]
    fps: usize,

    /// Roster JSON; the two built-in characters are used when omitted.
    #[arg(long)]
    roster: Option<PathBuf>,

    /// Directory sprite sources are resolved against.
    #[arg(long, default_value = ".")]
    assets: PathBuf,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, default_value_t = tracing::Level::INFO)]
    log_level: tracing::Level,
}

fn main() -> Result<(), Error> {
    let cli = Cli::parse();
    tracing_subscriber::fmt().with_max_level(cli.log_level).init();

    /* --- Roster: painters + their sprite frames ---
       Visual: nothing yet; missing art becomes placeholder blobs. */
    let roster = match &cli.roster {
        Some(path) => RosterConfig::load(path)?,
        None => RosterConfig::builtin(),
    };
    let mut sheets = Vec::with_capacity(roster.painters.len());
    let mut painters = Vec::with_capacity(roster.painters.len());
    for entry in &roster.painters {
        let frames = assets::load_frames(&cli.assets, &entry.sources);
        let sizes = frames.iter().map(|f| f.size()).collect();
        painters.push(Painter::new(entry, sizes)?);
        sheets.push(frames);
    }
    let mut session = Session::new(painters)?;
    info!(width = cli.width, height = cli.height, painters = sheets.len(), "starting");

    /* --- Window + reusable screen buffer ---
       Visual: a black canvas with no cursor. */
    let mut drawer = Drawer::new("Inkling", cli.width, cli.height, cli.fps)?;
    let mut screen = FrameBuffer::new(cli.width, cli.height);
    let canvas = Vec2::new(cli.width as f32, cli.height as f32);

    let started = Instant::now();
    let mut last_fps_time = started;
    let mut frames_this_second: u32 = 0;

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        // 1) Clear.
        screen.clear(palette::BACKGROUND);

        // 2) Keys (undo/clear/color/switch) act before this frame's motion.
        for command in drawer.commands() {
            session.apply(command);
        }

        // 3) Move the active painter; it extends its stroke while LMB is held.
        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
        session.tick(&drawer.pointer(), canvas, elapsed_ms);

        // 4) Ink, oldest stroke at the bottom.
        session.render_paths(|outline, color| fill_outline(&mut screen, outline, color));

        // 5) The character on top.
        let painter = session.painter();
        let sprite = &sheets[session.active_index()][painter.frame()];
        draw_sprite(&mut screen, sprite, painter);

        // 6) Present.
        drawer.present(&screen)?;

        // 7) FPS, once per second.
        frames_this_second += 1;
        let now = Instant::now();
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            debug!(fps = frames_this_second as f32 / secs, paths = session.paths().len(), "frame rate");
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    info!("bye");
    Ok(())
}
