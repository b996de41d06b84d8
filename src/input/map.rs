//! Keyboard mapping for cab controls.
//!
//! Terminals deliver no reliable key-release events, so the throttle is
//! latched: accelerate and brake stay applied until the coast key returns
//! the lever to idle.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::TrainAction;

/// Map a key press to a cab action.
pub fn handle_key_event(key: KeyEvent) -> Option<TrainAction> {
    match key.code {
        KeyCode::Up | KeyCode::Char('a') => Some(TrainAction::ThrottleUp),
        KeyCode::Down | KeyCode::Char('d') => Some(TrainAction::ThrottleDown),
        KeyCode::Char(' ') | KeyCode::Char('s') => Some(TrainAction::Coast),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(TrainAction::Reverse),
        _ => None,
    }
}

/// Check if a key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
