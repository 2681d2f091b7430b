#![forbid(unsafe_code)]

//! Interactive terminal viewer.
//!
//! Lock-step loop: one engine step, one frame, then input handling until the
//! frame budget runs out. The canvas fills the window at two pixels per
//! terminal row, with the last row kept for a status line.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use mottle_core::{EngineOptions, PatternEngine, ScaleSet};
use mottle_render::{HalfBlockPresenter, PackedRgba, Palette, Shading, shade_field};

use crate::cli::Opts;
use crate::error::AppError;
use crate::session::TerminalSession;

/// What a single input event asks the viewer to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Randomize,
    TogglePause,
    NextPalette,
    Resize { cols: u16, rows: u16 },
}

/// Map a terminal event to a viewer action. Unbound input maps to `None`.
pub fn action_for(event: &Event) -> Option<Action> {
    match event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) => match code {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            KeyCode::Char('r') => Some(Action::Randomize),
            KeyCode::Char(' ') => Some(Action::TogglePause),
            KeyCode::Char('p') => Some(Action::NextPalette),
            _ => None,
        },
        Event::Resize(cols, rows) => Some(Action::Resize {
            cols: *cols,
            rows: *rows,
        }),
        _ => None,
    }
}

/// Pixel canvas for a terminal of `cols x rows`: full width, two pixels per
/// row, minus the status row. Never smaller than one pixel.
pub fn canvas_size(cols: u16, rows: u16) -> (usize, usize) {
    let width = usize::from(cols).max(1);
    let height = (usize::from(rows).saturating_sub(1) * 2).max(1);
    (width, height)
}

/// Frame budget for a frame cap.
pub fn frame_budget(fps: u32) -> Duration {
    Duration::from_secs_f64(1.0 / f64::from(fps.max(1)))
}

/// Mutable viewer state, separate from the terminal so it can be driven
/// without one.
#[derive(Debug)]
pub struct Viewer {
    engine: PatternEngine,
    scales: ScaleSet,
    options: EngineOptions,
    palette: Palette,
    shading: Shading,
    paused: bool,
    pixels: Vec<PackedRgba>,
}

impl Viewer {
    pub fn new(
        width: usize,
        height: usize,
        scales: ScaleSet,
        options: EngineOptions,
        palette: Palette,
    ) -> Result<Self, AppError> {
        let engine = PatternEngine::with_options(width, height, scales.clone(), options)?;
        Ok(Self {
            engine,
            scales,
            options,
            palette,
            shading: Shading::for_palette(palette)?,
            paused: false,
            pixels: Vec::new(),
        })
    }

    pub fn engine(&self) -> &PatternEngine {
        &self.engine
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Apply one action. Returns `false` when the viewer should exit.
    pub fn apply(&mut self, action: Action) -> Result<bool, AppError> {
        match action {
            Action::Quit => return Ok(false),
            Action::Randomize => {
                tracing::debug!("field re-randomized");
                self.engine.randomize();
            }
            Action::TogglePause => self.paused = !self.paused,
            Action::NextPalette => {
                self.palette = self.palette.next();
                self.shading = Shading::for_palette(self.palette)?;
                tracing::debug!(palette = %self.palette, "palette changed");
            }
            Action::Resize { cols, rows } => {
                let (width, height) = canvas_size(cols, rows);
                if (width, height) != (self.engine.width(), self.engine.height()) {
                    self.engine = PatternEngine::with_options(
                        width,
                        height,
                        self.scales.clone(),
                        self.options,
                    )?;
                    tracing::info!(width, height, "canvas resized");
                }
            }
        }
        Ok(true)
    }

    /// Advance one generation unless paused.
    pub fn tick(&mut self) {
        if !self.paused {
            self.engine.step();
        }
    }

    /// Shade the current field into the pixel buffer.
    pub fn pixels(&mut self) -> &[PackedRgba] {
        shade_field(self.engine.field(), &self.shading, &mut self.pixels);
        &self.pixels
    }

    /// One-line status, cut to `cols` characters.
    pub fn status(&self, cols: u16) -> String {
        let state = if self.is_paused() { "paused" } else { "running" };
        let line = format!(
            " gen {} | {}x{} | {} | {} | q quit  r reseed  space pause  p palette",
            self.engine.generation(),
            self.engine.width(),
            self.engine.height(),
            self.palette,
            state,
        );
        line.chars().take(usize::from(cols)).collect()
    }
}

/// Run the viewer until the user quits.
pub fn run(opts: &Opts, scales: ScaleSet) -> Result<(), AppError> {
    let session = TerminalSession::enter()?;
    let (cols, rows) = session.size()?;
    let (width, height) = canvas_size(cols, rows);
    let mut term_cols = cols;

    let options = EngineOptions {
        seed: opts.seed,
        concurrent_blur: opts.concurrent_blur,
    };
    let mut viewer = Viewer::new(width, height, scales, options, opts.palette)?;
    let mut presenter = HalfBlockPresenter::new(io::stdout());
    let budget = frame_budget(opts.fps);
    tracing::info!(width, height, fps = opts.fps, "viewer started");

    loop {
        let frame_start = Instant::now();

        viewer.tick();
        let status = viewer.status(term_cols);
        let width = viewer.engine().width();
        presenter.present(viewer.pixels(), width, Some(&status))?;

        loop {
            let remaining = budget.saturating_sub(frame_start.elapsed());
            if !session.poll_event(remaining)? {
                break;
            }
            if let Some(action) = action_for(&session.read_event()?) {
                if let Action::Resize { cols, .. } = action {
                    term_cols = cols;
                    session.clear()?;
                }
                if !viewer.apply(action)? {
                    tracing::info!(generation = viewer.engine().generation(), "viewer stopped");
                    return Ok(());
                }
            }
            if remaining.is_zero() {
                break;
            }
        }
    }
}
