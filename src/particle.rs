// A single drifting point of the fluid field

use crate::color::Color;
use crate::geometry::Vec2;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f64,
    pub color: Color,
    pub life: f64,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, radius: f64, color: Color) -> Particle {
        Particle {
            pos,
            vel,
            radius,
            color,
            life: 1.0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    // Fixed per-frame decay of both life and radius
    pub fn age(&mut self, life_decay: f64, radius_decay: f64) {
        self.life -= life_decay;
        self.radius *= radius_decay;
    }
}
