// Pointer position and per-event velocity, owned by each effect

use crate::geometry::{vec2, Vec2};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerState {
    pub pos: Option<Vec2>,
    pub last: Option<Vec2>,
    pub vel: Vec2,
}

impl PointerState {
    pub fn new() -> Self {
        PointerState {
            pos: None,
            last: None,
            vel: vec2(0.0, 0.0),
        }
    }

    // Records a new position and returns the velocity since the previous event.
    // The first event has no predecessor, so its velocity is zero.
    pub fn move_to(&mut self, pos: Vec2) -> Vec2 {
        self.last = self.pos;
        self.pos = Some(pos);
        self.vel = match self.last {
            Some(last) => pos - last,
            None => vec2(0.0, 0.0),
        };
        self.vel
    }

    pub fn position(&self) -> Option<Vec2> {
        self.pos
    }

    pub fn is_seen(&self) -> bool {
        self.pos.is_some()
    }
}

impl Default for PointerState {
    fn default() -> Self {
        PointerState::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_move_has_no_velocity() {
        let mut p = PointerState::new();
        assert!(!p.is_seen());
        assert_eq!(p.move_to(vec2(10.0, 10.0)), vec2(0.0, 0.0));
        assert!(p.is_seen());
    }

    #[test]
    fn velocity_is_delta_between_events() {
        let mut p = PointerState::new();
        p.move_to(vec2(0.0, 0.0));
        assert_eq!(p.move_to(vec2(5.0, 5.0)), vec2(5.0, 5.0));
        assert_eq!(p.move_to(vec2(4.0, 7.0)), vec2(-1.0, 2.0));
        assert_eq!(p.last, Some(vec2(5.0, 5.0)));
    }
}
