//! Keyboard Input Module
//!
//! Tracks the per-frame snapshot of flight commands. Decoupled from any
//! windowing system: the host maps its own key events onto [`KeyCode`] and
//! calls [`FlightKeys::handle_key`].
//!
//! Held commands (throttle, roll, pitch, altitude) stay set while the key is
//! down. Edge-triggered commands (gear, reset, fire, drop) are latched on
//! press and stay set until consumed through the `take_*` methods, so a held
//! key cannot repeat-fire.

/// Generic key codes for flight input, independent of windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Throttle up
    W,
    /// Throttle down
    S,
    /// Roll left
    A,
    /// Roll right
    D,
    /// Quick climb
    Space,
    /// Quick descend
    ShiftLeft,
    ShiftRight,
    /// Pitch nose up
    Numpad8,
    /// Pitch nose down
    Numpad5,
    /// Fire left hardpoint
    Numpad4,
    /// Fire right hardpoint
    Numpad6,
    /// Drop a bomb
    Numpad0,
    B,
    /// Toggle landing gear
    G,
    /// Reset to spawn
    R,
    /// Catch-all for unhandled keys
    Unknown,
}

/// Per-frame snapshot of flight commands.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlightKeys {
    // Held commands, true while the key is down.
    /// W - advance throttle
    pub throttle_up: bool,
    /// S - retard throttle
    pub throttle_down: bool,
    /// A - bank left
    pub roll_left: bool,
    /// D - bank right
    pub roll_right: bool,
    /// Numpad 8 - nose up
    pub pitch_up: bool,
    /// Numpad 5 - nose down
    pub pitch_down: bool,
    /// Space - direct climb
    pub climb: bool,
    /// Shift - direct descend
    pub descend: bool,

    // Edge-triggered commands, latched on press, cleared on consumption.
    /// G - toggle landing gear
    pub gear_toggle: bool,
    /// R - reset to spawn pose
    pub reset: bool,
    /// Numpad 4 - fire the left hardpoint
    pub fire_left: bool,
    /// Numpad 6 - fire the right hardpoint
    pub fire_right: bool,
    /// Numpad 0 / B - release a bomb
    pub drop: bool,
}

impl FlightKeys {
    /// Create a snapshot with nothing pressed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update command state from a key press or release.
    ///
    /// Returns `true` if the key maps to a flight command. Edge-triggered
    /// commands latch only on press; release is ignored for them because
    /// consumption clears the latch instead.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) -> bool {
        match key {
            KeyCode::W => {
                self.throttle_up = pressed;
                true
            }
            KeyCode::S => {
                self.throttle_down = pressed;
                true
            }
            KeyCode::A => {
                self.roll_left = pressed;
                true
            }
            KeyCode::D => {
                self.roll_right = pressed;
                true
            }
            KeyCode::Numpad8 => {
                self.pitch_up = pressed;
                true
            }
            KeyCode::Numpad5 => {
                self.pitch_down = pressed;
                true
            }
            KeyCode::Space => {
                self.climb = pressed;
                true
            }
            KeyCode::ShiftLeft | KeyCode::ShiftRight => {
                self.descend = pressed;
                true
            }
            KeyCode::G => {
                if pressed {
                    self.gear_toggle = true;
                }
                true
            }
            KeyCode::R => {
                if pressed {
                    self.reset = true;
                }
                true
            }
            KeyCode::Numpad4 => {
                if pressed {
                    self.fire_left = true;
                }
                true
            }
            KeyCode::Numpad6 => {
                if pressed {
                    self.fire_right = true;
                }
                true
            }
            KeyCode::Numpad0 | KeyCode::B => {
                if pressed {
                    self.drop = true;
                }
                true
            }
            KeyCode::Unknown => false,
        }
    }

    /// Throttle direction: +1 up, -1 down, 0 neither or both.
    pub fn throttle_axis(&self) -> i32 {
        (self.throttle_up as i32) - (self.throttle_down as i32)
    }

    /// Roll direction: +1 right, -1 left, 0 neither or both.
    pub fn roll_axis(&self) -> i32 {
        (self.roll_right as i32) - (self.roll_left as i32)
    }

    /// Altitude nudge direction: +1 climb, -1 descend.
    pub fn climb_axis(&self) -> i32 {
        (self.climb as i32) - (self.descend as i32)
    }

    /// Consume the gear-toggle command.
    pub fn take_gear_toggle(&mut self) -> bool {
        std::mem::take(&mut self.gear_toggle)
    }

    /// Consume the reset command.
    pub fn take_reset(&mut self) -> bool {
        std::mem::take(&mut self.reset)
    }

    /// Consume the left-hardpoint fire command.
    pub fn take_fire_left(&mut self) -> bool {
        std::mem::take(&mut self.fire_left)
    }

    /// Consume the right-hardpoint fire command.
    pub fn take_fire_right(&mut self) -> bool {
        std::mem::take(&mut self.fire_right)
    }

    /// Consume the bomb-drop command.
    pub fn take_drop(&mut self) -> bool {
        std::mem::take(&mut self.drop)
    }

    /// Release everything and clear all latches.
    pub fn reset_all(&mut self) {
        *self = Self::default();
    }
}
