/// Terminal input folded into one `InputState` per frame.
///
/// Terminals without key-release events only repeat `Press`, so a key counts
/// as held while its last press/repeat is at most `HOLD_WINDOW` frames old.
use std::collections::HashMap;

use crossterm::event::KeyCode;

use crate::collaborators::InputState;
use crate::display::column_to_playfield_x;

pub const HOLD_WINDOW: u64 = 8;

const LEFT_KEYS: [KeyCode; 3] = [KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const RIGHT_KEYS: [KeyCode; 3] = [KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
const FIRE_KEY: KeyCode = KeyCode::Char(' ');

#[derive(Debug, Default)]
pub struct KeyTracker {
    /// Frame of the last press/repeat event for each key.
    key_frame: HashMap<KeyCode, u64>,
    /// Terminal column of the left mouse button while pressed.
    pointer_col: Option<u16>,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press or repeat of `code` seen on `frame`.
    pub fn press(&mut self, code: KeyCode, frame: u64) {
        self.key_frame.insert(code, frame);
    }

    pub fn release(&mut self, code: KeyCode) {
        self.key_frame.remove(&code);
    }

    pub fn pointer_down(&mut self, col: u16) {
        self.pointer_col = Some(col);
    }

    pub fn pointer_up(&mut self) {
        self.pointer_col = None;
    }

    pub fn is_held(&self, key: KeyCode, frame: u64) -> bool {
        self.key_frame
            .get(&key)
            .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    fn any_held(&self, keys: &[KeyCode], frame: u64) -> bool {
        keys.iter().any(|&k| self.is_held(k, frame))
    }

    /// The input for `frame`, with the pointer mapped onto a terminal
    /// `cols` columns wide.
    pub fn snapshot(&self, frame: u64, cols: u16) -> InputState {
        InputState {
            move_left: self.any_held(&LEFT_KEYS, frame),
            move_right: self.any_held(&RIGHT_KEYS, frame),
            fire: self.is_held(FIRE_KEY, frame),
            pointer_active: self.pointer_col.is_some(),
            pointer_x: self
                .pointer_col
                .map(|c| column_to_playfield_x(c, cols))
                .unwrap_or(0.0),
        }
    }
}
