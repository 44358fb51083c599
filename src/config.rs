// Tunables for both effects. The defaults are fixed per-frame constants tuned
// for a ~60fps animation frame rate.

use crate::color::Color;

pub const BLUE: Color = Color::from_u32(0x28abffff);
pub const VIOLET: Color = Color::from_u32(0x9d5cffff);

#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
    /// Particles created by `initialize`. The population cap is twice this.
    pub count: usize,
    pub palette: Vec<Color>,

    /// Per-axis pointer speed (px per event) above which a move spawns a burst.
    pub spawn_threshold: f64,
    pub burst_size: usize,
    /// Side of the square around the pointer that burst particles appear in.
    pub burst_spread: f64,
    /// Share of the pointer velocity a burst particle inherits.
    pub burst_velocity_bias: f64,
    pub burst_jitter: f64,
    pub burst_radius: (f64, f64),

    pub initial_speed: f64,
    pub initial_radius: (f64, f64),

    pub gravity: f64,
    pub friction: f64,
    pub interaction_radius: f64,
    pub repulsion_strength: f64,

    pub life_decay: f64,
    pub radius_decay: f64,

    pub link_distance: f64,
    pub link_opacity: f64,
    pub link_width: f64,
    pub link_color: Color,

    pub glow_opacity: f64,
    pub background: Color,
    pub background_alpha: f64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            count: 100,
            palette: vec![BLUE, VIOLET],
            spawn_threshold: 2.0,
            burst_size: 3,
            burst_spread: 20.0,
            burst_velocity_bias: 0.1,
            burst_jitter: 2.0,
            burst_radius: (2.0, 5.0),
            initial_speed: 0.5,
            initial_radius: (1.0, 3.0),
            gravity: 0.05,
            friction: 0.99,
            interaction_radius: 150.0,
            repulsion_strength: 0.5,
            life_decay: 0.005,
            radius_decay: 0.995,
            link_distance: 100.0,
            link_opacity: 0.3,
            link_width: 0.5,
            link_color: BLUE,
            glow_opacity: 0.8,
            background: Color::from_u32(0x0a0a0aff),
            background_alpha: 0.05,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TrailConfig {
    /// Fraction of the remaining distance the cursor covers each frame.
    pub lerp: f64,
    pub life_decay: f64,
    pub max_width: f64,
    /// Segments thinner than this are not drawn.
    pub min_width: f64,
    pub ribbon_color: Color,

    pub indicator_size: f64,
    pub hover_size: f64,
    pub border_color: Color,
    pub hover_border_color: Color,
    pub hover_background: Color,
    pub pressed_scale: f64,

    /// The cursor switches itself off on viewports this narrow or narrower.
    pub min_viewport_width: f64,
    pub hover_selector: String,
}

impl Default for TrailConfig {
    fn default() -> Self {
        TrailConfig {
            lerp: 0.25,
            life_decay: 0.02,
            max_width: 25.0,
            min_width: 0.5,
            ribbon_color: Color::WHITE,
            indicator_size: 20.0,
            hover_size: 40.0,
            border_color: BLUE,
            hover_border_color: VIOLET,
            hover_background: Color::from_u32(0x9d5cff1a),
            pressed_scale: 0.8,
            min_viewport_width: 768.0,
            hover_selector: "a, button, .project-card, input, textarea, .nav-link".to_owned(),
        }
    }
}

impl TrailConfig {
    // Stylesheet hiding the native cursor over the hover targets. Limited to
    // the widths where the custom cursor is drawn, so narrow windows keep a
    // visible pointer.
    pub fn native_cursor_rule(&self) -> String {
        format!(
            "@media (hover: hover) and (pointer: fine) and (min-width: {}px) \
             {{ {} {{ cursor: none !important; }} }}",
            self.min_viewport_width + 1.0,
            self.hover_selector
        )
    }
}
