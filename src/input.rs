/// Keyboard handling.
///
/// Instead of acting on each key event individually, `HeldKeys` records the
/// frame number of the last press/repeat event for every key.  Each frame the
/// game asks which keys are still "fresh" and applies all of them at once,
/// so Space can be held together with a direction key.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (kitty protocol): proper
///   `Press` / `Repeat` / `Release` events, keys are dropped on release.
/// * **Classic terminals**: only `Press` events.  Keys expire after
///   `HOLD_WINDOW` frames of silence.

use std::collections::HashMap;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::entities::InputState;

/// A key counts as held if its last press/repeat arrived within this many
/// frames.  8 frames at 60 FPS ≈ 133 ms, longer than the gap between OS
/// key-repeat events (≥ 15 Hz).
pub const HOLD_WINDOW: u64 = 8;

#[derive(Debug, Default)]
pub struct HeldKeys {
    last_seen: HashMap<KeyCode, u64>,
    frame: u64,
    quit: bool,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new frame.  Call once per tick before feeding events.
    pub fn begin_frame(&mut self) {
        self.frame += 1;
    }

    pub fn handle(&mut self, event: &Event) {
        let Event::Key(KeyEvent { code, kind, modifiers, .. }) = event else {
            return;
        };
        match kind {
            KeyEventKind::Press => {
                self.last_seen.insert(*code, self.frame);
                match code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.quit = true,
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        self.quit = true
                    }
                    _ => {}
                }
            }
            KeyEventKind::Repeat => {
                self.last_seen.insert(*code, self.frame);
            }
            KeyEventKind::Release => {
                self.last_seen.remove(code);
            }
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    fn is_held(&self, key: KeyCode) -> bool {
        self.last_seen
            .get(&key)
            .map(|&last| self.frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    fn any_held(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|&k| self.is_held(k))
    }

    /// Logical key state for the current frame.
    pub fn state(&self) -> InputState {
        InputState {
            left: self.any_held(&[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')]),
            right: self.any_held(&[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')]),
            fire: self.is_held(KeyCode::Char(' ')),
        }
    }
}
