//! Input capture
//!
//! Host event handlers only touch `InputState`. Once per frame the session
//! takes a `TickInput` snapshot, which also drains the one-shot actions.

use std::collections::HashSet;

use glam::Vec2;

use crate::sim::TickInput;

/// Game keys, mapped from physical key codes (`KeyboardEvent.code`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Attack,
    Reset,
}

impl Key {
    /// WASD and the arrow keys move, E strikes, R restarts
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "KeyW" | "ArrowUp" => Some(Key::Up),
            "KeyS" | "ArrowDown" => Some(Key::Down),
            "KeyA" | "ArrowLeft" => Some(Key::Left),
            "KeyD" | "ArrowRight" => Some(Key::Right),
            "KeyE" => Some(Key::Attack),
            "KeyR" => Some(Key::Reset),
            _ => None,
        }
    }
}

/// Keyboard and pointer state between two frames
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashSet<Key>,
    pointer: Vec2,
    /// Attack went down since the last snapshot
    attack_pressed: bool,
    reset_requested: bool,
    fire_queue: Vec<Vec2>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key-down. Returns false for unmapped codes.
    ///
    /// Auto-repeat key-downs of an already held key are not new presses.
    pub fn key_down(&mut self, code: &str) -> bool {
        let Some(key) = Key::from_code(code) else {
            return false;
        };
        if self.held.insert(key) {
            match key {
                Key::Attack => self.attack_pressed = true,
                Key::Reset => self.reset_requested = true,
                _ => {}
            }
        }
        true
    }

    /// Record a key-up. Returns false for unmapped codes.
    pub fn key_up(&mut self, code: &str) -> bool {
        match Key::from_code(code) {
            Some(key) => {
                self.held.remove(&key);
                true
            }
            None => false,
        }
    }

    /// Drop all held keys (focus lost, key-ups will never arrive)
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn pointer_moved(&mut self, pos: Vec2) {
        self.pointer = pos;
    }

    /// Last known pointer position (canvas coordinates)
    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn queue_fire(&mut self, target: Vec2) {
        self.fire_queue.push(target);
    }

    pub fn request_reset(&mut self) {
        self.reset_requested = true;
    }

    /// Sample held keys and drain pending one-shot actions
    pub fn snapshot(&mut self) -> TickInput {
        TickInput {
            up: self.is_held(Key::Up),
            down: self.is_held(Key::Down),
            left: self.is_held(Key::Left),
            right: self.is_held(Key::Right),
            attack_held: self.is_held(Key::Attack),
            attack_pressed: std::mem::take(&mut self.attack_pressed),
            fire_at: std::mem::take(&mut self.fire_queue),
            reset: std::mem::take(&mut self.reset_requested),
        }
    }
}
