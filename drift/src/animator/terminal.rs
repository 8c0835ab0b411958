//! Terminal animator: two markers with trails on a ratatui canvas, plus an
//! annotation panel refreshed at highlighted steps.
//!
//! Keys: `q`, `Esc` or `Ctrl-C` stop the run. After the last frame any key
//! closes the screen.

use std::io::{self, IsTerminal, Stdout, stdout};
use std::panic;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::cursor::Show;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use drift_common::config::AnimationConfig;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Context, Line as Segment};
use ratatui::widgets::{Block, Paragraph};
use ratatui::{Frame, Terminal};
use tracing::{debug, info};

use super::{AnimationError, AnimationOutcome, Animator};
use crate::report::PropagationRow;
use crate::trajectory::{Point, Trajectory};

/// Registry name of this backend.
pub const BACKEND_NAME: &str = "terminal";

const TRUNC_COLOR: Color = Color::Rgb(0x00, 0xff, 0x88);
const ROUND_COLOR: Color = Color::Rgb(0x00, 0xcc, 0xff);
const BACKGROUND: Color = Color::Rgb(0x0a, 0x0a, 0x0f);
const TEXT_COLOR: Color = Color::Rgb(0xcc, 0xcc, 0xcc);

/// Canvas units kept free around the outermost radius.
const CANVAS_MARGIN: f64 = 30.0;

/// Upper bound on a single input poll so the running flag is seen promptly.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Factory function registered under [`BACKEND_NAME`].
pub fn create_animator(config: &AnimationConfig) -> Box<dyn Animator> {
    Box::new(TerminalAnimator::new(config))
}

/// Full-screen terminal renderer.
#[derive(Debug, Clone)]
pub struct TerminalAnimator {
    step_delay: Duration,
    highlight_pause: Duration,
}

impl TerminalAnimator {
    /// Create a renderer with the configured pacing.
    pub fn new(config: &AnimationConfig) -> Self {
        Self {
            step_delay: Duration::from_millis(config.step_delay_ms),
            highlight_pause: Duration::from_millis(config.highlight_pause_ms),
        }
    }

    fn play(
        &self,
        terminal: &mut Term,
        trajectory: &Trajectory<'_>,
        running: &AtomicBool,
    ) -> Result<AnimationOutcome, AnimationError> {
        let max_step = trajectory.max_step();
        let extent = max_step as f64 * trajectory.animation().scale + CANVAS_MARGIN;
        let mut scene = Scene::new(max_step);

        for (step, frame) in (1..).zip(trajectory.frames()) {
            if !running.load(Ordering::SeqCst) {
                return Ok(AnimationOutcome::Interrupted { at_step: step - 1 });
            }

            let frame = frame.map_err(|source| AnimationError::Numeric { step, source })?;
            scene.step = step;
            scene.truncated_trail.push(frame.truncated_position);
            scene.rounded_trail.push(frame.rounded_position);
            if frame.annotation.is_some() {
                scene.annotation = frame.annotation;
            }

            terminal.draw(|f| render(f, &scene, extent))?;
            if !pace(self.step_delay, running)? {
                return Ok(AnimationOutcome::Interrupted { at_step: step });
            }

            if let Some(row) = &frame.annotation {
                debug!("Pausing on highlighted step {}", row.step);
                if !pace(self.highlight_pause, running)? {
                    return Ok(AnimationOutcome::Interrupted { at_step: step });
                }
            }
        }

        scene.finished = true;
        terminal.draw(|f| render(f, &scene, extent))?;
        wait_for_key(running)?;

        Ok(AnimationOutcome::Completed { frames: max_step })
    }
}

impl Animator for TerminalAnimator {
    fn name(&self) -> &'static str {
        BACKEND_NAME
    }

    fn run(
        &mut self,
        trajectory: &Trajectory<'_>,
        running: &AtomicBool,
    ) -> Result<AnimationOutcome, AnimationError> {
        if !stdout().is_terminal() {
            return Err(AnimationError::Unavailable(
                "stdout is not a terminal".to_string(),
            ));
        }

        enable_raw_mode().map_err(|e| {
            AnimationError::Unavailable(format!("failed to enable raw mode: {e}"))
        })?;
        let mut out = stdout();
        if let Err(e) = execute!(out, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AnimationError::Unavailable(format!(
                "failed to enter alternate screen: {e}"
            )));
        }
        let mut terminal = match Terminal::new(CrosstermBackend::new(out)) {
            Ok(terminal) => terminal,
            Err(e) => {
                restore_terminal();
                return Err(AnimationError::Unavailable(format!(
                    "failed to create terminal: {e}"
                )));
            }
        };

        info!("Terminal animation started ({} frames)", trajectory.max_step());
        let previous_hook: Arc<PanicHook> = Arc::from(panic::take_hook());
        let chained = Arc::clone(&previous_hook);
        panic::set_hook(Box::new(move |info| {
            restore_terminal();
            chained(info);
        }));

        let result = self.play(&mut terminal, trajectory, running);

        restore_terminal();
        panic::set_hook(Box::new(move |info| previous_hook(info)));

        result
    }
}

type PanicHook = dyn Fn(&panic::PanicHookInfo<'_>) + Sync + Send + 'static;

/// Leave raw mode and the alternate screen. Safe to call more than once.
fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(stdout(), LeaveAlternateScreen, Show);
}

/// Everything drawn in one frame.
struct Scene {
    max_step: i64,
    step: i64,
    truncated_trail: Vec<Point>,
    rounded_trail: Vec<Point>,
    annotation: Option<PropagationRow>,
    finished: bool,
}

impl Scene {
    fn new(max_step: i64) -> Self {
        // Both trails start at the origin.
        Self {
            max_step,
            step: 0,
            truncated_trail: vec![Point::default()],
            rounded_trail: vec![Point::default()],
            annotation: None,
            finished: false,
        }
    }
}

fn render(frame: &mut Frame, scene: &Scene, extent: f64) {
    let [panel, plot] =
        Layout::vertical([Constraint::Length(5), Constraint::Min(0)]).areas(frame.area());

    let header = format!(
        "{:>4}   -   {:>18}   -   {:>18}   -   {:>18}",
        "Step", "Vec (trunc)", "Vec (round)", "Gap"
    );
    let values = match &scene.annotation {
        Some(row) => format!(
            "{:>4}   -   {:>18.10}   -   {:>18.10}   -   {:>18.10}",
            row.step, row.magnitude_truncated, row.magnitude_rounded, row.gap
        ),
        None => String::new(),
    };
    let status = if scene.finished {
        "done - press any key to close".to_string()
    } else {
        format!("step {}/{}   q/Esc: stop", scene.step, scene.max_step)
    };

    let text = vec![
        Line::from(Span::styled(
            header,
            Style::default().fg(TEXT_COLOR).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(values, Style::default().fg(TRUNC_COLOR))),
        Line::from(Span::styled(status, Style::default().fg(Color::DarkGray))),
    ];
    let panel_widget = Paragraph::new(text)
        .centered()
        .block(Block::bordered().title(" Rocket - pi from Leibniz (Trunc vs Round) "));
    frame.render_widget(panel_widget, panel);

    let canvas = Canvas::default()
        .block(Block::bordered())
        .marker(Marker::Braille)
        .background_color(BACKGROUND)
        .x_bounds([-extent, extent])
        .y_bounds([-extent, extent])
        .paint(|ctx| {
            draw_trail(ctx, &scene.truncated_trail, TRUNC_COLOR);
            draw_trail(ctx, &scene.rounded_trail, ROUND_COLOR);
            draw_marker(ctx, &scene.truncated_trail, TRUNC_COLOR, scene.finished.then_some("Trunc (Leibniz) "));
            draw_marker(ctx, &scene.rounded_trail, ROUND_COLOR, scene.finished.then_some("Round (Leibniz) "));
        });
    frame.render_widget(canvas, plot);
}

fn draw_trail(ctx: &mut Context<'_>, trail: &[Point], color: Color) {
    for pair in trail.windows(2) {
        ctx.draw(&Segment::new(pair[0].x, pair[0].y, pair[1].x, pair[1].y, color));
    }
}

fn draw_marker(ctx: &mut Context<'_>, trail: &[Point], color: Color, label: Option<&'static str>) {
    let Some(tip) = trail.last() else {
        return;
    };
    let style = Style::default().fg(color).add_modifier(Modifier::BOLD);
    match label {
        Some(label) => ctx.print(tip.x, tip.y, Line::from(Span::styled(format!("{label}▲"), style))),
        None => ctx.print(tip.x, tip.y, Line::from(Span::styled("▲", style))),
    }
}

fn is_stop_key(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Sleep for `duration` while watching for stop keys.
///
/// Returns `Ok(false)` if the run should stop.
fn pace(duration: Duration, running: &AtomicBool) -> io::Result<bool> {
    let deadline = Instant::now() + duration;
    loop {
        if !running.load(Ordering::SeqCst) {
            return Ok(false);
        }
        let now = Instant::now();
        if now >= deadline {
            return Ok(true);
        }
        if event::poll((deadline - now).min(POLL_INTERVAL))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && is_stop_key(&key)
        {
            running.store(false, Ordering::SeqCst);
            return Ok(false);
        }
    }
}

/// Block until a key press or until `running` is cleared.
fn wait_for_key(running: &AtomicBool) -> io::Result<()> {
    while running.load(Ordering::SeqCst) {
        if event::poll(POLL_INTERVAL)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_keys() {
        assert!(is_stop_key(&KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(is_stop_key(&KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(is_stop_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!is_stop_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(!is_stop_key(&KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)));
    }

    #[test]
    fn pace_returns_immediately_when_stopped() {
        let running = AtomicBool::new(false);
        assert!(!pace(Duration::from_secs(10), &running).unwrap());
    }

    #[test]
    fn pacing_comes_from_config() {
        let config = AnimationConfig {
            step_delay_ms: 5,
            highlight_pause_ms: 7,
            ..Default::default()
        };
        let animator = TerminalAnimator::new(&config);
        assert_eq!(animator.step_delay, Duration::from_millis(5));
        assert_eq!(animator.highlight_pause, Duration::from_millis(7));
    }
}
