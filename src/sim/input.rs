//! Control intent and edge detection
//!
//! Input arrives as a plain boolean key-state table, sampled once per tick.
//! Edge-triggered signals (jump, run-starting "any input") are synthesized by
//! comparing against the previous tick's table instead of callback
//! subscriptions, so delivery is synchronous within the tick.

use serde::{Deserialize, Serialize};

/// Boolean control state for the current tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ControlIntent {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl ControlIntent {
    /// Any control held this tick
    pub fn any(&self) -> bool {
        self.forward || self.backward || self.left || self.right || self.jump
    }
}

/// Rising edges synthesized for one tick
#[derive(Debug, Clone, Copy, Default)]
pub struct IntentEdges {
    /// Jump went false -> true this tick (fires once, not while held)
    pub jump_pressed: bool,
    /// Any control went false -> true this tick (starts the run)
    pub any_pressed: bool,
}

/// Stores the previous tick's intent and compares against the current one
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeDetector {
    prev: ControlIntent,
}

impl EdgeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume this tick's intent, producing its rising edges
    pub fn sample(&mut self, current: ControlIntent) -> IntentEdges {
        let edges = IntentEdges {
            jump_pressed: current.jump && !self.prev.jump,
            any_pressed: (current.forward && !self.prev.forward)
                || (current.backward && !self.prev.backward)
                || (current.left && !self.prev.left)
                || (current.right && !self.prev.right)
                || (current.jump && !self.prev.jump),
        };
        self.prev = current;
        edges
    }
}
