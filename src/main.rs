//! Terminal demo runner (default binary).
//!
//! Draws a map view with an overlay window on top and drives the frame loop
//! against the crossterm backend.
//!
//! Keys: `q` quit, arrows move the overlay, Tab switches focus, `h` hides the
//! overlay, `f` toggles the FPS meter, `c` toggles change highlighting.
//!
//! Usage: `tile-canvas [config.json]` (otherwise `TILE_CANVAS_*` variables).

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use tile_canvas::core::{Canvas, CanvasConfig, View};
use tile_canvas::term::TerminalBackend;
use tile_canvas::types::{glyph, Colour, Rect};

const MAP_Z: i32 = 0;
const OVERLAY_Z: i32 = 5;

fn main() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => CanvasConfig::from_json_file(&PathBuf::from(path))?,
        None => CanvasConfig::from_env(),
    };
    init_logging(&config)?;

    let mut canvas = Canvas::setup(TerminalBackend::new(), &config).context("canvas setup failed")?;

    info!(title = %config.title, "demo started");

    let result = run(&mut canvas);
    if let Err(e) = &result {
        error!(error = %e, "demo loop failed");
    }

    // Always try to restore terminal state.
    if let Err(e) = canvas.shutdown() {
        error!(error = %e, "failed to restore terminal");
    }
    info!("demo stopped");
    result
}

fn init_logging(config: &CanvasConfig) -> Result<()> {
    // The terminal is in raw mode on the alternate screen; log to a file or not at all.
    let Some(path) = &config.log_path else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("cannot open log {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

struct Demo {
    map: View,
    overlay: View,
    overlay_focused: bool,
    /// Overlay footprint (border included) as of the last composed frame.
    overlay_area: Option<Rect>,
}

impl Demo {
    fn new(w: i32, h: i32) -> Self {
        // Bottom row is left for the key help line.
        let (mw, mh) = (w - 2, h - 3);
        let mut map = View::new(mw, mh, 1, 1, MAP_Z, true);
        map.set_title("MAP");
        let floor = Colour::rgb(70, 70, 80);
        for y in 0..mh {
            for x in 0..mw {
                map.draw(x, y, glyph::DOT, floor, Colour::BLACK);
            }
        }
        let (cx, cy) = (mw / 2, mh / 2);
        let ring = Colour::rgb(200, 160, 60);
        for r in (2..cy.min(cx)).step_by(3) {
            map.draw_circle(cx, cy, r, glyph::SHADE_MEDIUM, ring, Colour::BLACK);
        }
        map.draw(cx, cy, glyph::AT, Colour::WHITE, Colour::BLACK);

        let mut overlay = View::new(12, 5, 4, 3, OVERLAY_Z, true);
        overlay.set_title("OVERLAY");
        let fill = Colour::rgb(40, 90, 160);
        for y in 0..5 {
            for x in 0..12 {
                overlay.draw(x, y, glyph::SHADE_LIGHT, fill, Colour::rgb(10, 10, 30));
            }
        }
        overlay.set_focused(true);

        Self {
            map,
            overlay,
            overlay_focused: true,
            overlay_area: None,
        }
    }

    fn switch_focus(&mut self) {
        self.overlay_focused = !self.overlay_focused;
        self.overlay.set_focused(self.overlay_focused);
        self.map.set_focused(!self.overlay_focused);
    }

    fn footprint(&self) -> Option<Rect> {
        if !self.overlay.is_visible() {
            return None;
        }
        let pos = self.overlay.position();
        let (w, h) = self.overlay.dims();
        Some(Rect::new(pos.x - 1, pos.y - 1, w + 2, h + 2))
    }

    fn compose(&mut self, canvas: &mut Canvas<TerminalBackend>) {
        // Overlay cells keep their z, so the old footprint must be cleared
        // before the map can show through again.
        let area = self.footprint();
        if area != self.overlay_area {
            if let Some(old) = self.overlay_area {
                canvas.clear(Some(old));
            }
            self.overlay_area = area;
        }

        self.overlay.render(canvas, None);
        self.map.render(canvas, None);

        let (_, h) = canvas.dims();
        canvas.draw_text(
            1,
            h - 1,
            MAP_Z,
            "q quit  arrows move  tab focus  h hide  f fps  c changes",
            Colour::rgb(150, 150, 150),
            Colour::BLACK,
        );
    }
}

fn run(canvas: &mut Canvas<TerminalBackend>) -> Result<()> {
    let (w, h) = canvas.dims();
    let mut demo = Demo::new(w, h);

    loop {
        demo.compose(canvas);
        canvas.render()?;

        while event::poll(Duration::from_millis(0))? {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let pos = demo.overlay.position();
            match key.code {
                KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(()),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return Ok(()),
                KeyCode::Left => demo.overlay.move_to(pos.x - 1, pos.y),
                KeyCode::Right => demo.overlay.move_to(pos.x + 1, pos.y),
                KeyCode::Up => demo.overlay.move_to(pos.x, pos.y - 1),
                KeyCode::Down => demo.overlay.move_to(pos.x, pos.y + 1),
                KeyCode::Tab => demo.switch_focus(),
                KeyCode::Char('h') => demo.overlay.toggle_visible(),
                KeyCode::Char('f') => canvas.toggle_fps(),
                KeyCode::Char('c') => canvas.toggle_changes(),
                _ => {}
            }
        }
    }
}
