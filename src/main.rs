//! Terminal train set runner (default binary).
//!
//! Uses crossterm for keys and mouse clicks and the framebuffer renderer
//! from [`tui_rails::term`]. Clicks toggle turnouts and uncouple cars;
//! the keyboard drives the cab throttle.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind, MouseButton, MouseEventKind};

use tui_rails::core::{Cab, Consist, TrackMap};
use tui_rails::input::{handle_key_event, should_quit};
use tui_rails::term::{TerminalRenderer, TrackView};
use tui_rails::types::{TrainAction, TICK_MS};

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let mut map = TrackMap::default();
    let mut consist = Consist::default();
    let mut cab = Cab::new();
    let view = TrackView::default();

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let fb = view.render(&map, &consist, &cab);
        term.draw(&fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        match action {
                            TrainAction::ThrottleUp => cab.throttle_up(),
                            TrainAction::ThrottleDown => cab.throttle_down(),
                            TrainAction::Coast => cab.throttle_idle(),
                            TrainAction::Reverse => cab.reverse(),
                        }
                    }
                }
                Event::Mouse(mouse) => {
                    if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
                        let point = view.world_from_cell(mouse.column, mouse.row);
                        map.toggle_turnout(map.tile_from_world(point));
                        consist.request_uncouple(&map, point);
                    }
                }
                _ => {}
            }
        }

        // Tick on wall-clock delta; the consist skips anomalously large gaps.
        if last_tick.elapsed() >= tick_duration {
            let dt_ms = last_tick.elapsed().as_secs_f64() * 1000.0;
            last_tick = Instant::now();

            cab.tick(dt_ms);
            consist.lead_mut().set_speed(cab.signed_speed());
            consist.tick(&map, dt_ms);
        }
    }
}
