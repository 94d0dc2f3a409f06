//! Single-line terminal renderer

use std::{
    io::{self, Write},
    sync::Mutex,
};

use tracing::warn;

use super::{RenderAdapter, Screen};
use crate::utils::format_remaining;

const BAR_WIDTH: usize = 20;
const RING_GLYPHS: [char; 5] = ['○', '◔', '◑', '◕', '●'];

struct Line<W> {
    out: W,
    display: String,
    progress: f64,
    screen: Screen,
    last_drawn: Option<String>,
}

/// Redraws one line in place: a ring glyph and bar for progress, then the time
pub struct TerminalRenderer<W: Write + Send = io::Stdout> {
    line: Mutex<Line<W>>,
}

impl TerminalRenderer<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            line: Mutex::new(Line {
                out,
                display: format_remaining(0),
                progress: 1.0,
                // A paused timer is drawn without a screen change
                screen: Screen::Running,
                last_drawn: None,
            }),
        }
    }

    /// Move past the current line so later output starts clean
    pub fn end_line(&self) {
        let Ok(mut line) = self.line.lock() else {
            return;
        };
        if line.last_drawn.take().is_some() {
            if let Err(e) = writeln!(line.out).and_then(|_| line.out.flush()) {
                warn!("Failed to write to terminal: {}", e);
            }
        }
    }

    pub fn into_inner(self) -> Option<W> {
        self.line.into_inner().ok().map(|line| line.out)
    }

    fn update(&self, apply: impl FnOnce(&mut Line<W>)) {
        let Ok(mut line) = self.line.lock() else {
            return;
        };
        apply(&mut *line);

        let text = compose(&line.display, line.progress, line.screen);
        if line.last_drawn.as_deref() == Some(text.as_str()) {
            return;
        }
        if let Err(e) = write!(line.out, "\r\x1b[2K{}", text).and_then(|_| line.out.flush()) {
            warn!("Failed to write to terminal: {}", e);
        }
        line.last_drawn = Some(text);
    }
}

fn compose(display: &str, progress: f64, screen: Screen) -> String {
    let progress = progress.clamp(0.0, 1.0);
    let glyph = RING_GLYPHS[(progress * (RING_GLYPHS.len() - 1) as f64).round() as usize];
    let filled = (progress * BAR_WIDTH as f64).round() as usize;
    let bar: String = "█".repeat(filled) + &"░".repeat(BAR_WIDTH - filled);

    match screen {
        Screen::Setup => "ready: set a duration to start".to_string(),
        Screen::Running => format!("{} {} {}", glyph, bar, display),
        Screen::Done => format!("{} {} {}  time's up", glyph, bar, display),
    }
}

impl<W: Write + Send> RenderAdapter for TerminalRenderer<W> {
    fn display_time(&self, formatted: &str) {
        self.update(|line| line.display = formatted.to_string());
    }

    fn set_ring_progress(&self, fraction: f64) {
        self.update(|line| line.progress = fraction);
    }

    fn show_screen(&self, screen: Screen) {
        self.update(|line| line.screen = screen);
    }

    fn signal_completion(&self) {
        let Ok(mut line) = self.line.lock() else {
            return;
        };
        // Terminal bell
        if let Err(e) = write!(line.out, "\x07").and_then(|_| line.out.flush()) {
            warn!("Failed to write to terminal: {}", e);
        }
    }
}
