//! Canvas 2D backend for the confetti surface

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{FrameScheduler, ParticleSurface};
use crate::CardError;
use crate::sim::Particle;

/// A full-viewport `<canvas>` drawn in CSS px
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, CardError> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or(CardError::NoContext2d)?;
        Ok(Self { canvas, ctx })
    }

    /// Match the backing store to the viewport in device pixels
    pub fn resize(&self, viewport: Vec2, dpr: f64) {
        self.canvas.set_width((viewport.x as f64 * dpr).floor() as u32);
        self.canvas.set_height((viewport.y as f64 * dpr).floor() as u32);
        let _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
    }
}

impl ParticleSurface for CanvasSurface {
    fn clear(&mut self, viewport: Vec2) {
        self.ctx.clear_rect(0.0, 0.0, viewport.x as f64, viewport.y as f64);
    }

    fn draw_particle(&mut self, p: &Particle) {
        let ctx = &self.ctx;
        ctx.save();
        ctx.set_global_alpha(p.alpha as f64);
        let _ = ctx.translate(p.pos.x as f64, p.pos.y as f64);
        let _ = ctx.rotate(p.rotation as f64);
        ctx.set_fill_style_str(p.color);
        ctx.fill_rect(
            -p.size.x as f64 / 2.0,
            -p.size.y as f64 / 2.0,
            p.size.x as f64,
            p.size.y as f64,
        );
        ctx.restore();
    }

    fn set_visible(&mut self, visible: bool) {
        let _ = self
            .canvas
            .style()
            .set_property("opacity", if visible { "1" } else { "0" });
    }
}

/// Records whether the animator asked for another frame; the caller turns that
/// into a `requestAnimationFrame`
#[derive(Debug, Default)]
pub struct RafRequest {
    pub requested: bool,
}

impl FrameScheduler for RafRequest {
    fn schedule_next_frame(&mut self) {
        self.requested = true;
    }
}
