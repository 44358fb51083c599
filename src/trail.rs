// Custom cursor: a lerped indicator that trails the real pointer, plus a
// ribbon drawn through recent cursor positions that tapers toward the tail.

use crate::color::Color;
use crate::config::TrailConfig;
use crate::error::FxError;
use crate::geometry::{Bounds, Vec2};
use crate::pointer::PointerState;
use crate::renderer::Surface;
use std::collections::VecDeque;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CursorState {
    /// No pointer activity yet, or the pointer left the page.
    Inactive,
    Active,
    /// Over one of the interactive targets.
    Hovering,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TrailSample {
    pub pos: Vec2,
    pub life: f64,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Segment {
    pub from: Vec2,
    pub to: Vec2,
    pub width: f64,
}

/// Presentation of the cursor indicator element for the current frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IndicatorStyle {
    pub visible: bool,
    pub center: Vec2,
    pub size: f64,
    pub border: Color,
    pub background: Option<Color>,
    pub scale: f64,
}

impl IndicatorStyle {
    pub fn left(&self) -> f64 {
        self.center.x - self.size / 2.0
    }

    pub fn top(&self) -> f64 {
        self.center.y - self.size / 2.0
    }
}

pub struct CursorTrail {
    config: TrailConfig,
    bounds: Bounds,
    target: PointerState,
    smoothed: Vec2,
    // Insertion order, oldest first
    samples: VecDeque<TrailSample>,
    active: bool,
    hovering: bool,
    pressed: bool,
    enabled: bool,
}

impl CursorTrail {
    pub fn new(config: TrailConfig, bounds: Bounds) -> CursorTrail {
        let enabled = bounds.width > config.min_viewport_width;
        CursorTrail {
            config,
            bounds,
            target: PointerState::new(),
            smoothed: Vec2::zeros(),
            samples: VecDeque::new(),
            active: false,
            hovering: false,
            pressed: false,
            enabled,
        }
    }

    pub fn on_pointer_move(&mut self, raw: Vec2) {
        if !self.enabled {
            return;
        }
        if !self.target.is_seen() {
            self.smoothed = raw;
        }
        self.target.move_to(raw);
        self.active = true;
        // Sampled at the smoothed position so the ribbon ends at the indicator
        self.samples.push_back(TrailSample {
            pos: self.smoothed,
            life: 1.0,
        });
    }

    pub fn on_pointer_leave(&mut self) {
        self.samples.clear();
        self.active = false;
        self.hovering = false;
        self.pressed = false;
    }

    pub fn set_hovering(&mut self, hovering: bool) {
        self.hovering = hovering;
    }

    pub fn on_pointer_down(&mut self) {
        self.pressed = true;
    }

    pub fn on_pointer_up(&mut self) {
        self.pressed = false;
    }

    pub fn step(&mut self) {
        if let Some(target) = self.target.position() {
            self.smoothed += (target - self.smoothed) * self.config.lerp;
        }

        let decay = self.config.life_decay;
        for sample in self.samples.iter_mut() {
            sample.life -= decay;
        }
        self.samples.retain(|s| s.life > 0.0);
    }

    // Width grows linearly from zero at the oldest sample to `max_width` at
    // the newest
    pub fn ribbon(&self) -> Vec<Segment> {
        let count = self.samples.len();
        let mut segments = Vec::with_capacity(count.saturating_sub(1));
        for i in 0..count.saturating_sub(1) {
            let width = self.config.max_width * (i as f64 / count as f64);
            if width < self.config.min_width {
                continue;
            }
            segments.push(Segment {
                from: self.samples[i].pos,
                to: self.samples[i + 1].pos,
                width,
            });
        }
        segments
    }

    pub fn render<S: Surface>(&self, surface: &mut S) -> Result<(), FxError> {
        surface.clear(self.bounds)?;
        let color = self.config.ribbon_color;
        for segment in self.ribbon() {
            surface.line(segment.from, segment.to, segment.width, color, 1.0)?;
        }
        Ok(())
    }

    pub fn indicator(&self) -> IndicatorStyle {
        let hovering = self.state() == CursorState::Hovering;
        IndicatorStyle {
            visible: self.state() != CursorState::Inactive,
            center: self.smoothed,
            size: if hovering {
                self.config.hover_size
            } else {
                self.config.indicator_size
            },
            border: if hovering {
                self.config.hover_border_color
            } else {
                self.config.border_color
            },
            background: if hovering {
                Some(self.config.hover_background)
            } else {
                None
            },
            scale: if self.pressed {
                self.config.pressed_scale
            } else {
                1.0
            },
        }
    }

    // Narrow viewports switch the cursor off entirely until they widen again
    pub fn resize(&mut self, bounds: Bounds) {
        self.bounds = bounds;
        let enabled = bounds.width > self.config.min_viewport_width;
        if self.enabled && !enabled {
            log::debug!("viewport {}px too narrow, hiding cursor", bounds.width);
            self.on_pointer_leave();
        }
        self.enabled = enabled;
    }

    pub fn state(&self) -> CursorState {
        match (self.active && self.enabled, self.hovering) {
            (false, _) => CursorState::Inactive,
            (true, false) => CursorState::Active,
            (true, true) => CursorState::Hovering,
        }
    }

    pub fn samples(&self) -> &VecDeque<TrailSample> {
        &self.samples
    }

    pub fn smoothed(&self) -> Vec2 {
        self.smoothed
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn hover_selector(&self) -> &str {
        &self.config.hover_selector
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::vec2;
    use crate::renderer::recording::{Call, Recorder};

    const EPS: f64 = 1e-9;

    fn trail() -> CursorTrail {
        CursorTrail::new(TrailConfig::default(), Bounds::new(1280.0, 800.0))
    }

    fn with_lives(lives: &[f64]) -> CursorTrail {
        let mut t = trail();
        for (i, life) in lives.iter().enumerate() {
            t.samples.push_back(TrailSample {
                pos: vec2(i as f64 * 10.0, 0.0),
                life: *life,
            });
        }
        t
    }

    #[test]
    fn first_move_snaps_then_lerps() {
        let mut t = trail();
        t.on_pointer_move(vec2(100.0, 100.0));
        assert_eq!(t.smoothed(), vec2(100.0, 100.0));
        assert_eq!(t.samples()[0].pos, vec2(100.0, 100.0));

        t.on_pointer_move(vec2(200.0, 100.0));
        // Second sample is taken before the cursor catches up
        assert_eq!(t.samples()[1].pos, vec2(100.0, 100.0));

        t.step();
        assert!((t.smoothed().x - 125.0).abs() < EPS);
        t.step();
        assert!((t.smoothed().x - 143.75).abs() < EPS);
    }

    #[test]
    fn step_decays_and_removes_spent_samples() {
        let mut t = with_lives(&[1.0, 0.5, 0.02]);
        t.step();
        let lives: Vec<f64> = t.samples().iter().map(|s| s.life).collect();
        assert_eq!(lives.len(), 2);
        assert!((lives[0] - 0.98).abs() < EPS);
        assert!((lives[1] - 0.48).abs() < EPS);
    }

    #[test]
    fn idle_trail_empties() {
        let mut t = trail();
        for i in 0..30 {
            t.on_pointer_move(vec2(i as f64, 0.0));
        }
        for _ in 0..51 {
            t.step();
            assert!(t.samples().iter().all(|s| s.life > 0.0));
        }
        assert!(t.samples().is_empty());
    }

    #[test]
    fn ribbon_tapers_toward_tail() {
        let t = with_lives(&[1.0; 10]);
        let ribbon = t.ribbon();
        // i = 0 has zero width and is skipped
        assert_eq!(ribbon.len(), 8);
        assert_eq!(ribbon[0].from, vec2(10.0, 0.0));
        assert!((ribbon[0].width - 2.5).abs() < EPS);
        assert!((ribbon[7].width - 20.0).abs() < EPS);
        for pair in ribbon.windows(2) {
            assert!(pair[0].width <= pair[1].width);
        }
    }

    #[test]
    fn thin_segments_are_skipped() {
        // Width for i = 1 of 60 samples is 25 / 60 < 0.5
        let t = with_lives(&[1.0; 60]);
        let ribbon = t.ribbon();
        assert_eq!(ribbon.len(), 57);
        assert!(ribbon.iter().all(|s| s.width >= 0.5));
    }

    #[test]
    fn short_trails_draw_nothing() {
        assert!(with_lives(&[]).ribbon().is_empty());
        assert!(with_lives(&[1.0]).ribbon().is_empty());
    }

    #[test]
    fn render_clears_then_strokes() {
        let t = with_lives(&[1.0; 4]);
        let mut recorder = Recorder::default();
        t.render(&mut recorder).unwrap();
        assert_eq!(recorder.calls[0], Call::Clear);
        assert_eq!(recorder.lines().len(), 2);
    }

    #[test]
    fn state_machine() {
        let mut t = trail();
        assert_eq!(t.state(), CursorState::Inactive);
        assert!(!t.indicator().visible);

        t.on_pointer_move(vec2(10.0, 10.0));
        assert_eq!(t.state(), CursorState::Active);

        t.set_hovering(true);
        assert_eq!(t.state(), CursorState::Hovering);
        let style = t.indicator();
        assert_eq!(style.size, 40.0);
        assert_eq!(style.border, crate::config::VIOLET);
        assert!(style.background.is_some());

        t.set_hovering(false);
        assert_eq!(t.state(), CursorState::Active);
        assert_eq!(t.indicator().size, 20.0);

        t.on_pointer_leave();
        assert_eq!(t.state(), CursorState::Inactive);
        assert!(t.samples().is_empty());
    }

    #[test]
    fn indicator_is_centered_and_pressable() {
        let mut t = trail();
        t.on_pointer_move(vec2(100.0, 50.0));
        let style = t.indicator();
        assert!(style.visible);
        assert_eq!(style.left(), 90.0);
        assert_eq!(style.top(), 40.0);

        t.on_pointer_down();
        assert_eq!(t.indicator().scale, 0.8);
        t.on_pointer_up();
        assert_eq!(t.indicator().scale, 1.0);
    }

    #[test]
    fn hover_selector_comes_from_config() {
        let config = TrailConfig {
            hover_selector: ".card".to_owned(),
            ..TrailConfig::default()
        };
        let t = CursorTrail::new(config, Bounds::new(1280.0, 800.0));
        assert_eq!(t.hover_selector(), ".card");
    }

    #[test]
    fn narrow_viewport_disables_cursor() {
        let mut t = trail();
        t.on_pointer_move(vec2(10.0, 10.0));
        t.resize(Bounds::new(600.0, 800.0));
        t.resize(Bounds::new(600.0, 800.0));
        assert!(!t.is_enabled());
        assert_eq!(t.state(), CursorState::Inactive);
        assert!(t.samples().is_empty());

        t.on_pointer_move(vec2(20.0, 20.0));
        assert!(t.samples().is_empty());

        t.resize(Bounds::new(1024.0, 800.0));
        t.on_pointer_move(vec2(20.0, 20.0));
        assert_eq!(t.state(), CursorState::Active);
        assert_eq!(t.samples().len(), 1);
    }
}
