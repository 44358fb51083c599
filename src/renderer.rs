// Drawing surface the effects render onto. The browser implementation wraps a
// CanvasRenderingContext2d; tests substitute a recorder.

use crate::color::Color;
use crate::error::FxError;
use crate::geometry::{Bounds, Vec2};
use std::f64::consts::PI;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

pub trait Surface {
    // Wipes the whole surface to transparent
    fn clear(&mut self, bounds: Bounds) -> Result<(), FxError>;

    // Paints a translucent rectangle over the surface, leaving fading ghosts
    // of earlier frames
    fn fade(&mut self, bounds: Bounds, color: Color, alpha: f64) -> Result<(), FxError>;

    // Filled disc with a radial gradient from `alpha` at the center to
    // transparent at `radius`
    fn glow(
        &mut self,
        center: Vec2,
        radius: f64,
        color: Color,
        alpha: f64,
    ) -> Result<(), FxError>;

    // Straight stroke with round caps and joins
    fn line(
        &mut self,
        from: Vec2,
        to: Vec2,
        width: f64,
        color: Color,
        alpha: f64,
    ) -> Result<(), FxError>;
}

impl Surface for CanvasRenderingContext2d {
    fn clear(&mut self, bounds: Bounds) -> Result<(), FxError> {
        self.clear_rect(0.0, 0.0, bounds.width, bounds.height);
        Ok(())
    }

    fn fade(&mut self, bounds: Bounds, color: Color, alpha: f64) -> Result<(), FxError> {
        self.set_fill_style(&JsValue::from_str(&color.css(alpha)));
        self.fill_rect(0.0, 0.0, bounds.width, bounds.height);
        Ok(())
    }

    fn glow(
        &mut self,
        center: Vec2,
        radius: f64,
        color: Color,
        alpha: f64,
    ) -> Result<(), FxError> {
        if radius <= 0.0 {
            return Ok(());
        }
        let gradient =
            self.create_radial_gradient(center.x, center.y, 0.0, center.x, center.y, radius)?;
        gradient.add_color_stop(0.0, &color.css(alpha))?;
        gradient.add_color_stop(1.0, &color.css(0.0))?;

        self.begin_path();
        self.set_fill_style(&gradient);
        self.arc(center.x, center.y, radius, 0.0, PI * 2.0)?;
        self.fill();
        Ok(())
    }

    fn line(
        &mut self,
        from: Vec2,
        to: Vec2,
        width: f64,
        color: Color,
        alpha: f64,
    ) -> Result<(), FxError> {
        self.begin_path();
        self.set_stroke_style(&JsValue::from_str(&color.css(alpha)));
        self.set_line_width(width);
        self.set_line_cap("round");
        self.set_line_join("round");
        self.move_to(from.x, from.y);
        self.line_to(to.x, to.y);
        self.stroke();
        Ok(())
    }
}
