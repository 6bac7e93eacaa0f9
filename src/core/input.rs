//! Input system for handling keyboard and mouse input
//!
//! The platform layer feeds raw key/button transitions into an [`InputSystem`];
//! once per frame the registry takes an [`InputSnapshot`] and translates it into
//! player [`Command`]s through the fixed [`KeyBindings`] table.

use std::collections::HashSet;
use tracing::debug;

use super::event::{InputEvent, KeyCode, MouseButton};
use super::math::Coord;

/// Signed step direction used by thrust and engine controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Reverse,
}

impl Direction {
    /// +1.0 for forward, -1.0 for reverse
    pub fn sign(self) -> f32 {
        match self {
            Direction::Forward => 1.0,
            Direction::Reverse => -1.0,
        }
    }
}

/// What the player asked for this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Signed per-axis intent (x, y, z, rotation)
    Move(Coord),
    Thrust(Direction),
    Engine(Direction),
    Fire,
    Reset,
    Quit,
}

/// Frame snapshot: keys held right now plus the discrete events since the last snapshot
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSnapshot {
    pub pressed: HashSet<KeyCode>,
    pub events: Vec<InputEvent>,
}

impl InputSnapshot {
    /// Snapshot with the given keys held and no events
    pub fn holding(keys: &[KeyCode]) -> Self {
        Self {
            pressed: keys.iter().copied().collect(),
            events: Vec::new(),
        }
    }

    /// Append a discrete event
    pub fn with_event(mut self, event: InputEvent) -> Self {
        self.events.push(event);
        self
    }

    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }
}

/// InputSystem accumulates keyboard and mouse state between frames
pub struct InputSystem {
    // Keyboard state
    pressed_keys: HashSet<KeyCode>,

    // Discrete events not yet handed to the simulation
    pending: Vec<InputEvent>,
}

impl InputSystem {
    /// Create a new InputSystem with nothing pressed
    pub fn new() -> Self {
        Self {
            pressed_keys: HashSet::new(),
            pending: Vec::new(),
        }
    }

    /// Process keyboard input event
    pub fn on_key(&mut self, keycode: KeyCode, pressed: bool) {
        if pressed {
            // Key repeat must not queue a second KeyDown
            if self.pressed_keys.insert(keycode) {
                self.pending.push(InputEvent::KeyDown(keycode));
            }
        } else if self.pressed_keys.remove(&keycode) {
            self.pending.push(InputEvent::KeyUp(keycode));
        }
    }

    /// Process mouse button event
    pub fn on_mouse_button(&mut self, button: MouseButton, pressed: bool) {
        let event = if pressed {
            InputEvent::MouseButtonDown(button)
        } else {
            InputEvent::MouseButtonUp(button)
        };
        self.pending.push(event);
    }

    /// The window's close button was clicked
    pub fn on_close_requested(&mut self) {
        debug!("Close requested");
        self.pending.push(InputEvent::Quit);
    }

    /// Take this frame's snapshot, draining the event queue
    pub fn snapshot(&mut self) -> InputSnapshot {
        InputSnapshot {
            pressed: self.pressed_keys.clone(),
            events: std::mem::take(&mut self.pending),
        }
    }
}

impl Default for InputSystem {
    fn default() -> Self {
        Self::new()
    }
}

/// A pair of opposing keys; holding both cancels out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPair {
    pub positive: KeyCode,
    pub negative: KeyCode,
}

impl KeyPair {
    pub const fn new(positive: KeyCode, negative: KeyCode) -> Self {
        Self { positive, negative }
    }

    /// +1, -1, or 0 when neither or both are held
    pub fn axis(&self, input: &InputSnapshot) -> f32 {
        match (input.is_pressed(self.positive), input.is_pressed(self.negative)) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        }
    }

    fn direction(&self, input: &InputSnapshot) -> Option<Direction> {
        let value = self.axis(input);
        if value > 0.0 {
            Some(Direction::Forward)
        } else if value < 0.0 {
            Some(Direction::Reverse)
        } else {
            None
        }
    }
}

/// Fixed key → intent table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    pub move_x: KeyPair,
    pub move_y: KeyPair,
    pub move_z: KeyPair,
    pub rotate: KeyPair,
    pub thrust: KeyPair,
    pub engine: KeyPair,
    pub reset: KeyCode,
    pub quit: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_x: KeyPair::new(KeyCode::E, KeyCode::Q),
            // Screen y grows downwards: R climbs, F sinks
            move_y: KeyPair::new(KeyCode::F, KeyCode::R),
            move_z: KeyPair::new(KeyCode::Space, KeyCode::C),
            rotate: KeyPair::new(KeyCode::A, KeyCode::D),
            thrust: KeyPair::new(KeyCode::LShift, KeyCode::LCtrl),
            engine: KeyPair::new(KeyCode::W, KeyCode::S),
            reset: KeyCode::Enter,
            quit: KeyCode::Escape,
        }
    }
}

impl KeyBindings {
    /// Translate one frame of input into player commands
    ///
    /// Held keys produce continuous commands (move, thrust, engine); the
    /// event queue produces one-shot commands (fire, reset, quit) in order.
    pub fn resolve(&self, input: &InputSnapshot) -> Vec<Command> {
        let mut commands = Vec::new();

        let intent = Coord::new(
            self.move_x.axis(input),
            self.move_y.axis(input),
            self.move_z.axis(input),
            self.rotate.axis(input),
        );
        if intent != Coord::ZERO {
            commands.push(Command::Move(intent));
        }

        if let Some(direction) = self.thrust.direction(input) {
            commands.push(Command::Thrust(direction));
        }

        if let Some(direction) = self.engine.direction(input) {
            commands.push(Command::Engine(direction));
        }

        for event in &input.events {
            match *event {
                InputEvent::Quit => commands.push(Command::Quit),
                InputEvent::KeyDown(key) if key == self.quit => commands.push(Command::Quit),
                InputEvent::KeyDown(key) if key == self.reset => commands.push(Command::Reset),
                InputEvent::MouseButtonDown(_) => commands.push(Command::Fire),
                _ => {}
            }
        }

        commands
    }
}
