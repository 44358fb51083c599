// Particle "fluid" field: a bounded population of drifting points pushed
// around by the pointer, linked to their neighbours by faint lines.

use crate::color::Color;
use crate::config::FieldConfig;
use crate::error::FxError;
use crate::geometry::{vec2, Bounds, Vec2};
use crate::particle::Particle;
use crate::pointer::PointerState;
use crate::renderer::Surface;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Link {
    pub from: Vec2,
    pub to: Vec2,
    pub opacity: f64,
}

pub struct ParticleField {
    config: FieldConfig,
    bounds: Bounds,
    // Oldest first, so eviction pops from the front
    particles: VecDeque<Particle>,
    capacity: usize,
    pointer: PointerState,
    rng: StdRng,
}

impl ParticleField {
    pub fn new(config: FieldConfig, bounds: Bounds) -> ParticleField {
        ParticleField::with_rng(config, bounds, StdRng::from_entropy())
    }

    pub fn with_seed(config: FieldConfig, bounds: Bounds, seed: u64) -> ParticleField {
        ParticleField::with_rng(config, bounds, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: FieldConfig, bounds: Bounds, rng: StdRng) -> ParticleField {
        let count = config.count;
        let mut field = ParticleField {
            config,
            bounds,
            particles: VecDeque::new(),
            capacity: 0,
            pointer: PointerState::new(),
            rng,
        };
        field.initialize(count, bounds);
        field
    }

    // Replaces the population with `count` fresh particles spread over `bounds`
    pub fn initialize(&mut self, count: usize, bounds: Bounds) {
        self.bounds = bounds;
        self.capacity = count * 2;
        self.particles.clear();
        self.particles.reserve(self.capacity);

        let (min_radius, max_radius) = self.config.initial_radius;
        let speed = self.config.initial_speed;
        for _ in 0..count {
            let pos = vec2(
                self.rng.gen::<f64>() * bounds.width,
                self.rng.gen::<f64>() * bounds.height,
            );
            let vel = vec2(self.jitter(speed), self.jitter(speed));
            let radius = self.rng.gen::<f64>() * (max_radius - min_radius) + min_radius;
            let color = self.pick_color();
            self.particles.push_back(Particle::new(pos, vel, radius, color));
        }
        log::debug!("particle field initialized with {} particles", count);
    }

    pub fn on_pointer_move(&mut self, position: Vec2) {
        let velocity = self.pointer.move_to(position);
        let threshold = self.config.spawn_threshold;
        if velocity.x.abs() > threshold || velocity.y.abs() > threshold {
            self.spawn_burst(position, velocity);
        }
    }

    // Touch moves steer the repulsion but never spawn
    pub fn on_touch_move(&mut self, position: Vec2) {
        self.pointer.move_to(position);
    }

    pub fn spawn_burst(&mut self, position: Vec2, velocity: Vec2) {
        let (min_radius, max_radius) = self.config.burst_radius;
        let spread = self.config.burst_spread;
        let bias = self.config.burst_velocity_bias;
        let jitter = self.config.burst_jitter;
        for _ in 0..self.config.burst_size {
            let pos = position + vec2(self.jitter(spread), self.jitter(spread));
            let vel = velocity * bias + vec2(self.jitter(jitter), self.jitter(jitter));
            let radius = self.rng.gen::<f64>() * (max_radius - min_radius) + min_radius;
            let color = self.pick_color();
            self.particles.push_back(Particle::new(pos, vel, radius, color));
        }
    }

    pub fn step(&mut self) {
        let config = &self.config;
        let bounds = self.bounds;
        let pointer = self.pointer.position();
        let reach = config.interaction_radius;

        for p in self.particles.iter_mut() {
            p.pos += p.vel;

            p.vel.y += config.gravity;
            p.vel *= config.friction;

            if let Some(target) = pointer {
                let to_pointer = target - p.pos;
                let dist = glm::length(&to_pointer);
                // Linear falloff, pushing away from the pointer
                if dist > 0.0 && dist < reach {
                    let force = (reach - dist) / reach;
                    p.vel -= to_pointer / dist * force * config.repulsion_strength;
                }
            }

            bounds.wrap(&mut p.pos);
            p.age(config.life_decay, config.radius_decay);
        }

        self.particles.retain(|p| p.is_alive());
        while self.particles.len() > self.capacity {
            self.particles.pop_front();
        }
    }

    // Quadratic pairwise scan; the population cap keeps it cheap
    pub fn links(&self) -> Vec<Link> {
        let max_dist = self.config.link_distance;
        let mut links = Vec::new();
        for (i, a) in self.particles.iter().enumerate() {
            for b in self.particles.iter().skip(i + 1) {
                let dist = glm::distance(&a.pos, &b.pos);
                if dist < max_dist {
                    links.push(Link {
                        from: a.pos,
                        to: b.pos,
                        opacity: (1.0 - dist / max_dist)
                            * a.life.min(b.life)
                            * self.config.link_opacity,
                    });
                }
            }
        }
        links
    }

    pub fn render<S: Surface>(&self, surface: &mut S) -> Result<(), FxError> {
        let config = &self.config;
        surface.fade(self.bounds, config.background, config.background_alpha)?;
        for link in self.links() {
            surface.line(link.from, link.to, config.link_width, config.link_color, link.opacity)?;
        }
        for p in &self.particles {
            surface.glow(p.pos, p.radius * 2.0, p.color, p.life * config.glow_opacity)?;
        }
        Ok(())
    }

    pub fn resize(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn particles(&self) -> &VecDeque<Particle> {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn jitter(&mut self, spread: f64) -> f64 {
        (self.rng.gen::<f64>() - 0.5) * spread
    }

    fn pick_color(&mut self) -> Color {
        self.config
            .palette
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(Color::WHITE)
    }
}
