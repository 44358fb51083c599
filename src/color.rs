// Simple color struct, created from an unsigned 32 representing RRGGBBAA

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::from_u32(0xffffffff);

    pub const fn from_u32(num: u32) -> Color {
        let r = (num >> 24) as u8;
        let g = (num >> 16) as u8;
        let b = (num >> 8) as u8;
        let a = num as u8;

        Color { r, g, b, a }
    }

    // CSS color string with the alpha replaced, clamped to [0, 1]
    pub fn css(&self, alpha: f64) -> String {
        let alpha = if alpha.is_nan() { 0.0 } else { alpha.max(0.0).min(1.0) };
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
    }

    // CSS color string using the color's own alpha byte
    pub fn css_opaque(&self) -> String {
        self.css(self.a as f64 / 255.0)
    }
}
