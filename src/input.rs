//! Logical button input
//!
//! Device adapters (keyboard, touch, on-screen pad) translate raw events
//! into press/release calls on [`InputState`]. The simulation polls the
//! held flags once per tick and consumes rising edges for one-shot
//! actions, so device timing never leaks into gameplay.

/// Abstract input signal, decoupled from physical keys/buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Up,
    Down,
    Left,
    Right,
    /// Shoot
    Fire,
    /// Ultimate beam
    Ultimate,
    Start,
    Select,
}

impl Button {
    pub const COUNT: usize = 8;

    pub const ALL: [Button; Button::COUNT] = [
        Button::Up,
        Button::Down,
        Button::Left,
        Button::Right,
        Button::Fire,
        Button::Ultimate,
        Button::Start,
        Button::Select,
    ];

    #[inline]
    fn index(self) -> usize {
        match self {
            Button::Up => 0,
            Button::Down => 1,
            Button::Left => 2,
            Button::Right => 3,
            Button::Fire => 4,
            Button::Ultimate => 5,
            Button::Start => 6,
            Button::Select => 7,
        }
    }

    /// Pad element name used by the on-screen controller markup.
    pub fn pad_name(self) -> &'static str {
        match self {
            Button::Up => "up",
            Button::Down => "down",
            Button::Left => "left",
            Button::Right => "right",
            Button::Fire => "j",
            Button::Ultimate => "b",
            Button::Start => "start",
            Button::Select => "select",
        }
    }

    pub fn from_pad_name(name: &str) -> Option<Button> {
        Button::ALL.iter().copied().find(|b| b.pad_name() == name)
    }
}

/// Map a keyboard event code to its logical button.
///
/// Arrows and WASD steer, J shoots, B fires the ultimate, Enter starts,
/// Shift selects. KeyR is deliberately absent: the radio is a side channel
/// handled by the driver, not a gameplay input.
pub fn key_to_button(code: &str) -> Option<Button> {
    match code {
        "ArrowUp" | "KeyW" => Some(Button::Up),
        "ArrowDown" | "KeyS" => Some(Button::Down),
        "ArrowLeft" | "KeyA" => Some(Button::Left),
        "ArrowRight" | "KeyD" => Some(Button::Right),
        "KeyJ" => Some(Button::Fire),
        "KeyB" => Some(Button::Ultimate),
        "Enter" => Some(Button::Start),
        "ShiftLeft" | "ShiftRight" => Some(Button::Select),
        _ => None,
    }
}

/// Current held/pressed status for every logical button.
///
/// Adapters mutate this from event callbacks; the tick reads it. No
/// history is kept beyond one rising-edge flag per button, which the
/// driver clears after each executed tick.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: [bool; Button::COUNT],
    pressed: [bool; Button::COUNT],
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a press edge. Repeats while held are no-ops.
    ///
    /// Returns whether the state changed (i.e. this was a rising edge).
    pub fn press(&mut self, button: Button) -> bool {
        let i = button.index();
        if self.held[i] {
            return false;
        }
        self.held[i] = true;
        self.pressed[i] = true;
        true
    }

    /// Register a release edge. Returns whether the button was held.
    pub fn release(&mut self, button: Button) -> bool {
        let i = button.index();
        let was_held = self.held[i];
        self.held[i] = false;
        was_held
    }

    #[inline]
    pub fn is_held(&self, button: Button) -> bool {
        self.held[button.index()]
    }

    /// Whether a rising edge was recorded since the edges were last
    /// cleared. Non-consuming: the driver clears edges after each
    /// executed tick, so the simulation can stay read-only on input.
    #[inline]
    pub fn was_pressed(&self, button: Button) -> bool {
        self.pressed[button.index()]
    }

    /// Drop any unconsumed rising edges (end of an executed frame).
    pub fn clear_edges(&mut self) {
        self.pressed = [false; Button::COUNT];
    }

    /// Release everything (e.g. window blur).
    pub fn release_all(&mut self) {
        self.held = [false; Button::COUNT];
    }
}
